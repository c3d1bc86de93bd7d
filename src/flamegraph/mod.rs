//! Flame-graph timeline model generation.
//!
//! This module converts merged stack levels into the row/state model
//! rendered by the timeline chart.

pub mod generator;
pub mod model;

// Re-export main types
pub use generator::{build_model, generate_text_summary};
pub use model::{Row, State, TimeGraphArrow, TimeGraphModel, TimeGraphRange};
