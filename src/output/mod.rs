//! Output writers and checks for timeline models.
//!
//! This module handles:
//! - JSON models (compact and pretty)
//! - Reading models back
//! - The consumer's required-field check

pub mod json;
pub mod validation;

// Re-export main functions
pub use json::{model_to_string, read_model, read_model_document, write_model, write_model_compact};
pub use validation::validate_model_document;
