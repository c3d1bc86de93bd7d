//! Calculate summary metrics and hot functions from built stacks.
//!
//! Hot functions are the labels that most often sit at the top of a
//! sampled stack (self samples). These are the primary targets for
//! optimization.

use super::name_resolver::NameTable;
use super::stack_builder::Stack;
use crate::flamegraph::model::TimeGraphModel;
use log::debug;
use std::collections::HashMap;

/// A label ranked by self samples
///
/// **Public** - returned from calculate_hot_functions
#[derive(Debug, Clone, PartialEq)]
pub struct HotFunction {
    /// Resolved label
    pub label: String,

    /// Number of ticks where this label was the leaf frame
    pub self_samples: u64,

    /// Percentage of all ticks
    pub percentage: f64,
}

/// Calculate the top leaf labels by self samples
///
/// **Public** - main entry point for hot function ranking
///
/// # Arguments
/// * `stacks` - Stacks from stack_builder (any order)
/// * `names` - Name table the stacks refer to
/// * `top_n` - Number of functions to return
///
/// # Returns
/// Hot functions sorted by self samples (descending), ties by label
pub fn calculate_hot_functions(stacks: &[Stack], names: &NameTable, top_n: usize) -> Vec<HotFunction> {
    debug!("Calculating top {} hot functions from {} stacks", top_n, stacks.len());

    let mut counts: HashMap<usize, u64> = HashMap::new();
    for leaf in stacks.iter().filter_map(|stack| stack.last()) {
        *counts.entry(*leaf).or_insert(0) += 1;
    }

    let total = stacks.len() as u64;
    let mut hot: Vec<HotFunction> = counts
        .into_iter()
        .filter_map(|(id, count)| {
            names
                .get(id)
                .map(|label| create_hot_function(label, count, total))
        })
        .collect();

    hot.sort_by(|a, b| {
        b.self_samples
            .cmp(&a.self_samples)
            .then_with(|| a.label.cmp(&b.label))
    });
    hot.truncate(top_n);
    hot
}

/// Create a HotFunction from a label and its count
///
/// **Private** - internal conversion
fn create_hot_function(label: &str, self_samples: u64, total: u64) -> HotFunction {
    let percentage = if total > 0 {
        (self_samples as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    HotFunction {
        label: label.to_string(),
        self_samples,
        percentage,
    }
}

/// Calculate profile statistics
///
/// **Public** - provides summary statistics for logging and reports
pub fn calculate_profile_stats(stacks: &[Stack], names: &NameTable, model: &TimeGraphModel) -> ProfileStats {
    ProfileStats {
        tick_count: stacks.len(),
        empty_stacks: stacks.iter().filter(|s| s.is_empty()).count(),
        distinct_labels: names.len(),
        max_depth: stacks.iter().map(Vec::len).max().unwrap_or(0),
        row_count: model.rows.len(),
        state_count: model.rows.iter().map(|row| row.states.len()).sum(),
        total_length: model.total_length,
    }
}

/// Profile statistics
///
/// **Public** - returned from calculate_profile_stats
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStats {
    /// Number of ticks (one stack each)
    pub tick_count: usize,

    /// Ticks without any frame
    pub empty_stacks: usize,

    /// Size of the name table
    pub distinct_labels: usize,

    /// Deepest stack, in frames
    pub max_depth: usize,

    /// Rows in the model
    pub row_count: usize,

    /// States across all rows
    pub state_count: usize,

    /// Model timeline length
    pub total_length: u64,
}

impl ProfileStats {
    /// Average states per row, a rough measure of how well stacks merged
    pub fn states_per_row(&self) -> f64 {
        if self.row_count == 0 {
            0.0
        } else {
            self.state_count as f64 / self.row_count as f64
        }
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Ticks: {} | Labels: {} | Max depth: {} | Rows: {} | States: {} | Length: {}",
            self.tick_count,
            self.distinct_labels,
            self.max_depth,
            self.row_count,
            self.state_count,
            self.total_length
        )
    }
}
