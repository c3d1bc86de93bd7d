//! Configuration and constants for the converter and CLI.

/// Identifier written into every generated model
pub const MODEL_ID: &str = "nodeprof";

/// Default output path for the standalone converter
pub const DEFAULT_OUTPUT_FILE: &str = "timeline-data.json";

/// Label used when a code entry cannot be resolved
pub const UNKNOWN_LABEL: &str = "(unknown)";

// Row and state naming in the output model
pub const ROW_NAME_PREFIX: &str = "Row ";
pub const STATE_ID_PREFIX: &str = "state-";

// Replacement for the shared JS path prefix
pub const SHARED_PATH_REPLACEMENT: &str = "./";

/// Default number of hot functions shown in the summary
pub const DEFAULT_TOP_FUNCTIONS: usize = 10;
pub const MAX_TOP_FUNCTIONS: usize = 1000;

// Top-level fields the timeline consumer requires in a model document
pub const REQUIRED_MODEL_FIELDS: &[&str] = &["arrows", "rows", "id", "totalLength"];

// Top-level fields a V8 log document must carry
pub const CODE_FIELD: &str = "code";
pub const TICKS_FIELD: &str = "ticks";
