//! Main log parser for preprocessed V8 profiler output.
//!
//! Parses raw JSON into a typed [`Log`]. Structural problems (invalid JSON,
//! missing `code`/`ticks`) abort; individual malformed entries degrade to
//! unresolved slots so one bad record never loses the whole profile.

use super::schema::{CodeEntry, Log, Tick};
use crate::utils::config::{CODE_FIELD, TICKS_FIELD};
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Read;

/// Stand-in for a stack value that is not an integer; never a valid index
const UNREADABLE_FRAME: i64 = -1;

/// Parse a log from a JSON string
pub fn parse_log_str(content: &str) -> Result<Log, ParseError> {
    let raw: Value = serde_json::from_str(content)?;
    parse_log(&raw)
}

/// Parse a log from raw bytes
pub fn parse_log_slice(content: &[u8]) -> Result<Log, ParseError> {
    let raw: Value = serde_json::from_slice(content)?;
    parse_log(&raw)
}

/// Parse a log from any reader (file, stdin)
pub fn parse_log_reader<R: Read>(mut reader: R) -> Result<Log, ParseError> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    parse_log_slice(&content)
}

/// Parse an already-decoded JSON document into a [`Log`]
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::InvalidFormat` - document is not an object, or a field has the wrong shape
/// * `ParseError::MissingField` - `code` or `ticks` is absent
pub fn parse_log(raw: &Value) -> Result<Log, ParseError> {
    let obj = validate_log_format(raw)?;

    let code = parse_code_table(array_field(obj, CODE_FIELD)?);
    let ticks = parse_ticks(array_field(obj, TICKS_FIELD)?);

    debug!(
        "Parsed log: {} code entries, {} ticks",
        code.len(),
        ticks.len()
    );

    Ok(Log { code, ticks })
}

/// Check the top-level shape of a log document
///
/// **Public** - lets callers reject a document before converting it
pub fn validate_log_format(raw: &Value) -> Result<&Map<String, Value>, ParseError> {
    let obj = raw.as_object().ok_or_else(|| {
        ParseError::InvalidFormat("Log must be a JSON object".to_string())
    })?;

    for field in [CODE_FIELD, TICKS_FIELD] {
        if !obj.contains_key(field) {
            return Err(ParseError::MissingField(field));
        }
    }

    Ok(obj)
}

fn array_field<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a [Value], ParseError> {
    match obj.get(field) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ParseError::InvalidFormat(format!(
            "'{}' must be an array, found {}",
            field,
            json_kind(other)
        ))),
        None => Err(ParseError::MissingField(field)),
    }
}

/// Parse the code table, keeping a slot for every raw entry
///
/// **Private** - internal parsing logic
fn parse_code_table(entries: &[Value]) -> Vec<Option<CodeEntry>> {
    let mut code = Vec::with_capacity(entries.len());
    let mut skipped = 0usize;

    for (index, entry) in entries.iter().enumerate() {
        if entry.is_null() {
            code.push(None);
            continue;
        }
        match CodeEntry::deserialize(entry) {
            Ok(parsed) => code.push(Some(parsed)),
            Err(e) => {
                // Log but don't fail - the slot resolves to "(unknown)"
                warn!("Failed to parse code entry {}: {}", index, e);
                skipped += 1;
                code.push(None);
            }
        }
    }

    if skipped > 0 {
        warn!("{} of {} code entries were unreadable", skipped, entries.len());
    }

    code
}

/// Parse samples; unreadable ticks become empty samples to keep tick order
///
/// **Private** - internal parsing logic
fn parse_ticks(entries: &[Value]) -> Vec<Tick> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_tick(index, entry))
        .collect()
}

/// Parse one tick, falling back to per-value parsing of `s`
///
/// A value that is not an integer becomes [`UNREADABLE_FRAME`], which
/// resolves to `(unknown)` while the rest of the stack survives.
fn parse_tick(index: usize, entry: &Value) -> Tick {
    let error = match Tick::deserialize(entry) {
        Ok(tick) => return tick,
        Err(e) => e,
    };

    match entry.get("s") {
        Some(Value::Array(values)) => {
            let mut unreadable = 0usize;
            let s: Vec<i64> = values
                .iter()
                .map(|value| {
                    value.as_i64().unwrap_or_else(|| {
                        unreadable += 1;
                        UNREADABLE_FRAME
                    })
                })
                .collect();
            warn!(
                "Tick {} has {} unreadable stack values: {}",
                index, unreadable, error
            );
            Tick::new(s)
        }
        _ => {
            warn!("Failed to parse tick {}: {}", index, error);
            Tick::default()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
