use crate::output::{read_model_document, validate_model_document};
use crate::utils::config::{DEFAULT_OUTPUT_FILE, MODEL_ID};
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a model JSON file the way the timeline consumer does
pub fn validate_model_file(file_path: &Path) -> Result<()> {
    println!("Validating model: {}", file_path.display());

    let document = read_model_document(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    validate_model_document(&document).context("Model rejected by the timeline consumer")?;

    let rows = document["rows"].as_array().map_or(0, Vec::len);
    let states: usize = document["rows"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row["states"].as_array())
                .map(Vec::len)
                .sum()
        })
        .unwrap_or(0);

    println!("✓ Valid timeline model");
    println!("  Id: {}", document["id"]);
    println!("  Rows: {}", rows);
    println!("  States: {}", states);
    println!("  Total Length: {}", document["totalLength"]);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Node Prof Timeline Model Schema");
    println!("Model id: {}", MODEL_ID);
    println!("Default output: {}", DEFAULT_OUTPUT_FILE);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  arrows: array            - Always empty");
        println!("  id: string               - Source identifier ('{}')", MODEL_ID);
        println!("  rows: array              - One row per stack depth");
        println!("    id: number             - Depth index");
        println!("    name: string           - 'Row <depth>'");
        println!("    range: object          - {{start, end}} over the row's states");
        println!("    states: array          - Merged intervals");
        println!("      id: string           - 'state-<row>-<start>'");
        println!("      label: string        - Resolved function name");
        println!("      range: object        - {{start, end}} on the sorted sample axis");
        println!("  totalLength: number      - Largest row end");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Node Prof Timeline v{}", env!("CARGO_PKG_VERSION"));
    println!("Model id: {}", MODEL_ID);
    println!();
    println!("Converts V8 CPU profiler logs into flame-graph timeline models.");
}
