//! Aggregation of parsed logs into stacks, levels and metrics.
//!
//! This module transforms a parsed V8 log into:
//! - Resolved, de-duplicated labels (name table)
//! - One root-first stack of name ids per tick
//! - Depth levels of merged intervals (flame-graph core)
//! - Hot function and summary statistics

pub mod merger;
pub mod metrics;
pub mod name_resolver;
pub mod stack_builder;

// Re-export main types and functions
pub use merger::{merge_sorted_stacks, merge_stacks, sort_stacks, Interval, Level};
pub use metrics::{calculate_hot_functions, calculate_profile_stats, HotFunction, ProfileStats};
pub use name_resolver::{code_to_name, find_shared_path, NameId, NameResolver, NameTable};
pub use stack_builder::{build_stacks, ProfileStacks, Stack};
