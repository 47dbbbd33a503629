//! Continuous-integration version extraction
//!
//! Reads build labels, numbers and timestamps published by the CI server
//! through environment variables. Lookups go through the [`EnvSource`] trait
//! so extraction can be exercised against an in-memory environment:
//!
//! - [`ProcessEnv`]: the real process environment
//! - [`MapEnv`]: a fixed set of variables for tests and embedding

pub mod cruise_control;
pub mod team_city;

use std::collections::HashMap;

/// Full build label, e.g. `Build-2-5-1234`
pub const BUILD_LABEL_VAR: &str = "CCNetLabel";
/// Numeric build counter
pub const NUMERIC_LABEL_VAR: &str = "CCNetNumericLabel";
pub const BUILD_DATE_VAR: &str = "CCNetBuildDate";
pub const BUILD_TIME_VAR: &str = "CCNetBuildTime";
/// Checkout folder of the build, used when no root folder is given
pub const WORKING_DIRECTORY_VAR: &str = "CCNetWorkingDirectory";

/// Build number used when the CI value cannot be read
pub const DEFAULT_BUILD_NUMBER: u32 = 1;

/// Source of environment variables
pub trait EnvSource {
    /// Value of `name`, or `None` when unset or not valid unicode
    fn var(&self, name: &str) -> Option<String>;

    /// Value of `name` when set to a non-empty string
    fn non_empty_var(&self, name: &str) -> Option<String> {
        self.var(name).filter(|value| !value.is_empty())
    }
}

/// The environment of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory environment
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment
    pub fn new() -> Self {
        MapEnv {
            vars: HashMap::new(),
        }
    }

    /// Set a variable, returning the environment for chaining
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
