//! Node Prof Timeline CLI
//!
//! Converts a preprocessed V8 CPU profiler log into the JSON timeline
//! model loaded by the flame-graph view.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use nodeprof_timeline::commands::{
    display_schema, display_version, execute_convert, validate_args, validate_model_file,
    ConvertArgs,
};
use nodeprof_timeline::utils::config::{DEFAULT_OUTPUT_FILE, DEFAULT_TOP_FUNCTIONS};

/// Node Prof Timeline - flame-graph models from V8 profiler logs
#[derive(Parser, Debug)]
#[command(name = "nodeprof-timeline")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a V8 log into a timeline model
    Convert {
        /// Path to the preprocessed V8 log (reads stdin if omitted)
        input: Option<PathBuf>,

        /// Output path for the model JSON
        #[arg(short, long, env = "NODEPROF_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Also print the model JSON to stdout
        #[arg(long)]
        print: bool,

        /// Print hot function summary to stdout
        #[arg(long)]
        summary: bool,

        /// Number of hot functions in the summary
        #[arg(long, default_value_t = DEFAULT_TOP_FUNCTIONS)]
        top: usize,
    },

    /// Validate a model JSON file
    Validate {
        /// Path to model JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            pretty,
            print,
            summary,
            top,
        } => {
            let args = ConvertArgs {
                input,
                output,
                pretty,
                print_model: print,
                print_summary: summary,
                top_functions: top,
            };

            validate_args(&args)?;
            execute_convert(args)?;
        }

        Commands::Validate { file } => {
            validate_model_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
