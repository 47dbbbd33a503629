//! Command-line surface
//!
//! - `args` - `-Name:value` argument syntax and the clap parser
//! - `orchestration` - the version-stamping run, independent of clap

pub mod args;
pub mod orchestration;

pub use args::{normalize_args, Args};
pub use orchestration::{run, RunArgs, RunSummary};
