//! JSON model output writer.
//!
//! Writes TimeGraphModel structs to JSON files, compact (the format the
//! timeline extension loads) or pretty-printed.

use crate::flamegraph::model::TimeGraphModel;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write a model to a JSON file with pretty printing
///
/// **Public** - human-readable output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_model(model: &TimeGraphModel, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_model_with(model, output_path.as_ref(), true)
}

/// Write a model as compact JSON (no formatting)
///
/// **Public** - default output of the convert command
pub fn write_model_compact(
    model: &TimeGraphModel,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_model_with(model, output_path.as_ref(), false)
}

fn write_model_with(model: &TimeGraphModel, output_path: &Path, pretty: bool) -> Result<(), OutputError> {
    info!("Writing model to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, model)?;
    } else {
        serde_json::to_writer(&mut writer, model)?;
    }
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "Model written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a model to a string (for stdout or in-memory use)
///
/// **Public** - useful for tests and debugging
pub fn model_to_string(model: &TimeGraphModel, pretty: bool) -> Result<String, OutputError> {
    let content = if pretty {
        serde_json::to_string_pretty(model)?
    } else {
        serde_json::to_string(model)?
    };
    Ok(content)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a model from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_model(input_path: impl AsRef<Path>) -> Result<TimeGraphModel, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading model from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let model: TimeGraphModel = serde_json::from_reader(BufReader::new(file))?;

    debug!("Model loaded: id {}, {} rows", model.id, model.rows.len());

    Ok(model)
}

/// Read a model file as an untyped JSON document
///
/// **Public** - input for the consumer's required-field check
pub fn read_model_document(input_path: impl AsRef<Path>) -> Result<serde_json::Value, OutputError> {
    let file = File::open(input_path.as_ref()).map_err(OutputError::WriteFailed)?;
    let document = serde_json::from_reader(BufReader::new(file))?;
    Ok(document)
}
