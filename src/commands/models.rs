use crate::utils::config::{DEFAULT_OUTPUT_FILE, DEFAULT_TOP_FUNCTIONS};
use std::path::PathBuf;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the V8 log; `None` reads standard input
    pub input: Option<PathBuf>,

    /// Output path for the model JSON
    pub output: PathBuf,

    /// Pretty-print the written JSON
    pub pretty: bool,

    /// Echo the model JSON to stdout
    pub print_model: bool,

    /// Print hot function summary to stdout
    pub print_summary: bool,

    /// Number of hot functions in the summary
    pub top_functions: usize,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: None,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            pretty: false,
            print_model: false,
            print_summary: false,
            top_functions: DEFAULT_TOP_FUNCTIONS,
        }
    }
}
