//! Timeline model generation from merged levels.
//!
//! Each non-empty level becomes a row; each interval becomes a state
//! positioned on the sorted-stack axis. Also renders the terminal summary
//! of hot functions.

use super::model::{Row, State, TimeGraphModel, TimeGraphRange};
use crate::aggregator::merger::Level;
use crate::aggregator::metrics::{HotFunction, ProfileStats};
use crate::aggregator::name_resolver::NameTable;
use crate::utils::config::{MODEL_ID, ROW_NAME_PREFIX, STATE_ID_PREFIX, UNKNOWN_LABEL};
use log::debug;

/// Build the timeline model from merged levels
///
/// **Public** - main entry point for model generation
///
/// # Arguments
/// * `levels` - Output of the merger, indexed by depth
/// * `names` - Name table the levels' name ids refer to
pub fn build_model(levels: &[Level], names: &NameTable) -> TimeGraphModel {
    let rows: Vec<Row> = levels
        .iter()
        .enumerate()
        .filter(|(_, level)| !level.is_empty())
        .map(|(idx, level)| build_row(idx, level, names))
        .collect();

    let total_length = rows.iter().map(|row| row.range.end).max().unwrap_or(0);

    debug!("Built model with {} rows, total length {}", rows.len(), total_length);

    TimeGraphModel {
        arrows: Vec::new(),
        id: MODEL_ID.to_string(),
        rows,
        total_length,
    }
}

/// Build one row from a non-empty level
///
/// **Private** - internal helper for build_model
fn build_row(idx: usize, level: &Level, names: &NameTable) -> Row {
    let mut states = Vec::with_capacity(level.len());
    let start = level.first().map_or(0, |iv| iv.start as u64);
    let mut end = 0;

    for interval in level {
        let state_start = interval.start as u64;
        let state_end = interval.end() as u64;
        // Name ids come from the same table, a miss would be a builder bug
        let label = names.get(interval.name_id).unwrap_or(UNKNOWN_LABEL);

        states.push(State {
            id: format!("{}{}-{}", STATE_ID_PREFIX, idx, state_start),
            label: label.to_string(),
            range: TimeGraphRange::new(state_start, state_end),
        });
        end = end.max(state_end);
    }

    Row {
        id: idx,
        name: format!("{}{}", ROW_NAME_PREFIX, idx),
        range: TimeGraphRange::new(start, end),
        states,
    }
}

/// Pick an ANSI color for a label from its category prefix
fn get_ansi_color(label: &str) -> &'static str {
    if label.starts_with("(C++)") {
        "\x1b[31m" // Red
    } else if label.starts_with("(lib)") {
        "\x1b[35m" // Magenta
    } else if label.starts_with("(IC)")
        || label.starts_with("(stub)")
        || label.starts_with("(builtin)")
        || label.starts_with("(bytecode)")
        || label.starts_with("(regexp)")
    {
        "\x1b[33m" // Yellow
    } else if label.starts_with("(unknown)") {
        "\x1b[90m" // Gray
    } else if label.starts_with('~') {
        "\x1b[36m" // Cyan (unoptimized JS)
    } else {
        "\x1b[32m" // Green (optimized JS)
    }
}

/// Render a text report of the hottest functions
pub fn generate_text_summary(hot: &[HotFunction], stats: &ProfileStats) -> String {
    let reset = "\x1b[0m";
    let mut lines = Vec::new();

    lines.push("  HOT FUNCTIONS (self samples)".to_string());
    lines.push(format!("  ┏{}┳{}┳{}┓", "━".repeat(52), "━".repeat(10), "━".repeat(9)));
    lines.push(format!("  ┃ {:<50} ┃ {:^8} ┃ {:^7} ┃", "Function", "SAMPLES", "%"));
    lines.push(format!("  ┣{}╋{}╋{}┫", "━".repeat(52), "━".repeat(10), "━".repeat(9)));

    for function in hot {
        let display = truncate_label(&function.label, 50);
        lines.push(format!(
            "  ┃ {}{:<50}{} ┃ {:>8} ┃ {:>6.1}% ┃",
            get_ansi_color(&function.label),
            display,
            reset,
            function.self_samples,
            function.percentage
        ));
    }

    lines.push(format!("  ┗{}┻{}┻{}┛", "━".repeat(52), "━".repeat(10), "━".repeat(9)));
    lines.push(String::new());
    lines.push(format!("  {}", stats.summary()));

    if stats.empty_stacks > 0 {
        lines.push(format!("  ({} ticks had no frames)", stats.empty_stacks));
    }

    lines.join("\n")
}

/// Shorten a label to `max` characters, keeping the tail
fn truncate_label(label: &str, max: usize) -> String {
    let count = label.chars().count();
    if count <= max {
        return label.to_string();
    }
    let tail: String = label.chars().skip(count - (max - 3)).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::merger::Interval;

    fn names(labels: &[&str]) -> NameTable {
        let mut table = NameTable::new();
        for label in labels {
            table.intern(label.to_string());
        }
        table
    }

    #[test]
    fn test_empty_levels() {
        let model = build_model(&[], &NameTable::new());

        assert_eq!(model.id, "nodeprof");
        assert!(model.arrows.is_empty());
        assert!(model.rows.is_empty());
        assert_eq!(model.total_length, 0);
    }

    #[test]
    fn test_single_state() {
        let levels = vec![vec![Interval::new(0, 1, 0)]];
        let model = build_model(&levels, &names(&["foo"]));

        assert_eq!(model.rows.len(), 1);
        let row = &model.rows[0];
        assert_eq!(row.id, 0);
        assert_eq!(row.name, "Row 0");
        assert_eq!(row.range, TimeGraphRange::new(0, 1));
        assert_eq!(row.states[0].id, "state-0-0");
        assert_eq!(row.states[0].label, "foo");
        assert_eq!(model.total_length, 1);
    }

    #[test]
    fn test_row_range_spans_states() {
        let levels = vec![
            vec![Interval::new(0, 4, 0)],
            vec![Interval::new(1, 2, 1), Interval::new(3, 1, 2)],
        ];
        let model = build_model(&levels, &names(&["main", "a", "b"]));

        let row = &model.rows[1];
        assert_eq!(row.range, TimeGraphRange::new(1, 4));
        assert_eq!(row.states[1].id, "state-1-3");
        assert_eq!(row.states[1].range, TimeGraphRange::new(3, 4));
        assert_eq!(model.total_length, 4);
    }

    #[test]
    fn test_empty_level_is_skipped() {
        let levels = vec![vec![Interval::new(0, 2, 0)], vec![]];
        let model = build_model(&levels, &names(&["main"]));

        assert_eq!(model.rows.len(), 1);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("abcdefghijkl", 8), "...hijkl");
    }

    #[test]
    fn test_ansi_color_by_category() {
        assert_eq!(get_ansi_color("(C++) foo"), "\x1b[31m");
        assert_eq!(get_ansi_color("~lazy"), "\x1b[36m");
        assert_eq!(get_ansi_color("main ./index.js:1:1"), "\x1b[32m");
    }

    #[test]
    fn test_generate_text_summary() {
        let hot = vec![HotFunction {
            label: "(C++) foo".to_string(),
            self_samples: 3,
            percentage: 75.0,
        }];
        let stats = ProfileStats {
            tick_count: 4,
            empty_stacks: 1,
            ..Default::default()
        };

        let summary = generate_text_summary(&hot, &stats);

        assert!(summary.contains("(C++) foo"));
        assert!(summary.contains("75.0%"));
        assert!(summary.contains("Ticks: 4"));
        assert!(summary.contains("1 ticks had no frames"));
    }
}
