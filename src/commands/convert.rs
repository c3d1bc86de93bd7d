//! Convert command implementation.
//!
//! The convert command:
//! 1. Reads the V8 log (file or stdin)
//! 2. Parses it
//! 3. Builds and merges stacks into the timeline model
//! 4. Calculates metrics
//! 5. Writes the model JSON

use super::models::ConvertArgs;
use crate::aggregator::{calculate_hot_functions, calculate_profile_stats};
use crate::converter::convert_log_detailed;
use crate::flamegraph::generate_text_summary;
use crate::output::{model_to_string, write_model, write_model_compact};
use crate::parser::{parse_log_reader, Log};
use crate::utils::config::MAX_TOP_FUNCTIONS;
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input file cannot be opened or read
/// * Log is malformed (invalid JSON, missing `code`/`ticks`)
/// * Output file cannot be written
pub fn execute_convert(args: ConvertArgs) -> Result<()> {
    let start_time = Instant::now();

    // Step 1-2: Read and parse
    info!("Step 1/4: Reading V8 log...");
    let log = read_log(&args)?;

    // Step 3: Build, merge, model
    info!("Step 2/4: Building timeline model...");
    let conversion = convert_log_detailed(&log);

    // Step 4: Metrics
    info!("Step 3/4: Calculating metrics...");
    let stats = calculate_profile_stats(
        &conversion.stacks.stacks,
        &conversion.stacks.names,
        &conversion.model,
    );
    info!("Profile: {}", stats.summary());

    // Step 5: Write
    info!("Step 4/4: Writing output files...");
    let written = if args.pretty {
        write_model(&conversion.model, &args.output)
    } else {
        write_model_compact(&conversion.model, &args.output)
    };
    written.context("Failed to write timeline model")?;

    info!("✓ Model written to: {}", args.output.display());

    if args.print_model {
        println!("{}", model_to_string(&conversion.model, args.pretty)?);
    }

    if args.print_summary {
        let hot = calculate_hot_functions(
            &conversion.stacks.stacks,
            &conversion.stacks.names,
            args.top_functions,
        );
        println!("\n{}", "=".repeat(80));
        println!("PROFILE SUMMARY");
        println!("{}", "=".repeat(80));
        println!("{}", generate_text_summary(&hot, &stats));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Conversion completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Read the log from the input path or stdin
///
/// **Private** - internal helper for execute_convert
fn read_log(args: &ConvertArgs) -> Result<Log> {
    match &args.input {
        Some(path) => {
            debug!("Reading log from: {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            parse_log_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse log {}", path.display()))
        }
        None => {
            debug!("Reading log from stdin");
            parse_log_reader(std::io::stdin().lock()).context("Failed to parse log from stdin")
        }
    }
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if let Some(input) = &args.input {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }
        if input.is_dir() {
            anyhow::bail!("Input path is a directory: {}", input.display());
        }
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.input.as_ref() == Some(&args.output) {
        anyhow::bail!("Output path must differ from the input log");
    }

    if args.top_functions == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top_functions > MAX_TOP_FUNCTIONS {
        anyhow::bail!("top is too large (max {})", MAX_TOP_FUNCTIONS);
    }

    Ok(())
}
