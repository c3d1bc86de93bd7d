//! End-to-end conversion from V8 logs to timeline models.
//!
//! Every call owns its name table and stacks; nothing is cached between
//! calls, so independent logs can be converted on separate threads.

use crate::aggregator::{build_stacks, merge_stacks, ProfileStacks};
use crate::flamegraph::{build_model, TimeGraphModel};
use crate::parser::{parse_log_reader, parse_log_slice, parse_log_str, Log};
use crate::utils::error::ParseError;
use log::{debug, info};
use std::io::Read;

/// Intermediate and final results of one conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Name table and stacks, stacks in sorted (axis) order
    pub stacks: ProfileStacks,

    pub model: TimeGraphModel,
}

/// Convert a parsed log, keeping the sorted stacks for metrics
pub fn convert_log_detailed(log: &Log) -> Conversion {
    let mut stacks = build_stacks(log);
    let levels = merge_stacks(&mut stacks.stacks);
    let model = build_model(&levels, &stacks.names);

    info!(
        "Converted {} ticks into {} rows (total length {})",
        log.ticks.len(),
        model.rows.len(),
        model.total_length
    );

    Conversion { stacks, model }
}

/// Convert a parsed log into a timeline model
pub fn convert_log(log: &Log) -> TimeGraphModel {
    convert_log_detailed(log).model
}

/// Parse and convert a JSON string
pub fn convert_str(content: &str) -> Result<TimeGraphModel, ParseError> {
    let log = parse_log_str(content)?;
    Ok(convert_log(&log))
}

/// Parse and convert raw JSON bytes
pub fn convert_slice(content: &[u8]) -> Result<TimeGraphModel, ParseError> {
    debug!("Converting {} bytes of log data", content.len());
    let log = parse_log_slice(content)?;
    Ok(convert_log(&log))
}

/// Parse and convert a log read from `reader`
pub fn convert_reader<R: Read>(reader: R) -> Result<TimeGraphModel, ParseError> {
    let log = parse_log_reader(reader)?;
    Ok(convert_log(&log))
}
