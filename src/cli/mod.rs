//! CLI module
//!
//! Command-line interface for walking paginated endpoints.
//!
//! # Commands
//!
//! - `walk` - Print every page's JSON body
//! - `count` - Print page and record totals

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, StrategyKind, WalkArgs};
pub use runner::Runner;
