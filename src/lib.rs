//! Node Prof Timeline
//!
//! Converts V8 CPU profiler logs into flame-graph timeline models: one row
//! per call-stack depth, each holding labeled intervals on a shared
//! sample axis.
//!
//! ## Getting Started
//!
//! ```bash
//! node --prof app.js
//! node --prof-process --preprocess isolate*.log > profile.json
//! nodeprof-timeline convert profile.json
//! ```
//!
//! From code:
//!
//! ```no_run
//! let content = std::fs::read("profile.json").unwrap();
//! let model = nodeprof_timeline::convert_slice(&content).unwrap();
//! println!("{} rows", model.rows.len());
//! ```

pub mod aggregator;
pub mod commands;
pub mod converter;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod utils;

pub use converter::{convert_log, convert_log_detailed, convert_reader, convert_slice, convert_str, Conversion};
pub use flamegraph::TimeGraphModel;
pub use parser::Log;
