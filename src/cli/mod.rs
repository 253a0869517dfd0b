//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{BuildArgs, Cli, Commands};
pub use output::format_filter_list;
