//! Output model consumed by the timeline chart.
//!
//! This module defines the structure of the JSON documents we write to disk.
//! Field names follow the chart's camelCase conventions.

use serde::{Deserialize, Serialize};

/// Half-open range on the sorted-stack axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGraphRange {
    pub start: u64,
    pub end: u64,
}

impl TimeGraphRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level model written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeGraphModel {
    /// Links between states; this converter never produces any
    pub arrows: Vec<TimeGraphArrow>,

    /// Constant identifier of the conversion source
    pub id: String,

    /// One row per stack depth, outermost first
    pub rows: Vec<Row>,

    /// Largest row end
    pub total_length: u64,
}

/// A link between two states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeGraphArrow {
    pub source_id: u64,
    pub destination_id: u64,
    pub range: TimeGraphRange,
}

/// One depth of the flame graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Depth index
    pub id: usize,

    /// Display name ("Row {depth}")
    pub name: String,

    /// From the first state's start to the furthest state end
    pub range: TimeGraphRange,

    pub states: Vec<State>,
}

/// One merged interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Unique id: "state-{row}-{start}"
    pub id: String,

    /// Resolved function label
    pub label: String,

    pub range: TimeGraphRange,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_serializes_camel_case() {
        let model = TimeGraphModel {
            arrows: vec![],
            id: "nodeprof".to_string(),
            rows: vec![],
            total_length: 0,
        };

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(
            value,
            json!({ "arrows": [], "id": "nodeprof", "rows": [], "totalLength": 0 })
        );
    }

    #[test]
    fn test_range_len() {
        assert_eq!(TimeGraphRange::new(2, 5).len(), 3);
        assert!(TimeGraphRange::new(4, 4).is_empty());
    }
}
