//! Log parsing and input schema definitions.
//!
//! This module handles:
//! - Parsing raw JSON from the V8 profiler
//! - Validating the log's top-level shape
//! - Defining the input schema

pub mod schema;
pub mod v8_log;

// Re-export main types
pub use schema::{CodeEntry, CodeKind, CodeType, Log, Tick};
pub use v8_log::{parse_log, parse_log_reader, parse_log_slice, parse_log_str, validate_log_format};
