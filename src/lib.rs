pub mod ci;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ui;
pub mod updater;
pub mod walker;
pub mod warning;

pub use error::{Result, SetVersionError};
