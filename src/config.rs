use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::{FormatTraits, VersionProperties};
use crate::error::{Result, SetVersionError};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "setversion.toml";
/// File name looked up in the user configuration directory
pub const USER_CONFIG_FILE: &str = ".setversion.toml";

/// Represents the complete configuration for set-version-info.
///
/// Contains the default version values and the file formats to scan for.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub version: VersionDefaults,

    #[serde(default)]
    pub scan: ScanConfig,
}

fn default_major() -> u32 {
    1
}

fn default_build_number() -> u32 {
    1
}

fn default_company_name() -> String {
    "Twaddle Software".to_string()
}

fn default_product_name() -> String {
    "Build Utilities".to_string()
}

fn default_copyright_start_year() -> i32 {
    1997
}

/// Version values in effect before CI extraction and command-line overrides.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionDefaults {
    #[serde(default = "default_major")]
    pub major: u32,

    #[serde(default)]
    pub minor: u32,

    #[serde(default)]
    pub subversion_revision: u32,

    #[serde(default = "default_build_number")]
    pub build_number: u32,

    #[serde(default = "default_company_name")]
    pub company_name: String,

    #[serde(default = "default_product_name")]
    pub product_name: String,

    #[serde(default)]
    pub trademark: String,

    #[serde(default = "default_copyright_start_year")]
    pub copyright_start_year: i32,
}

impl Default for VersionDefaults {
    fn default() -> Self {
        VersionDefaults {
            major: default_major(),
            minor: 0,
            subversion_revision: 0,
            build_number: default_build_number(),
            company_name: default_company_name(),
            product_name: default_product_name(),
            trademark: String::new(),
            copyright_start_year: default_copyright_start_year(),
        }
    }
}

impl VersionDefaults {
    /// Copy these defaults onto `version`, validating each value
    pub fn apply_to(&self, version: &mut VersionProperties) -> Result<()> {
        version.set_major(self.major)?;
        version.set_minor(self.minor);
        version.set_subversion_revision(self.subversion_revision);
        version.set_build_number(self.build_number);
        version.set_company_name(self.company_name.as_str())?;
        version.set_product_name(self.product_name.as_str())?;
        version.set_trademark(self.trademark.as_str());
        version.set_copyright_start_year(self.copyright_start_year)?;
        Ok(())
    }
}

fn default_formats() -> Vec<String> {
    vec!["csharp".to_string()]
}

/// Which file formats a run rewrites.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScanConfig {
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            formats: default_formats(),
        }
    }
}

impl ScanConfig {
    /// Resolve the configured names into format descriptors
    pub fn format_traits(&self) -> Result<Vec<FormatTraits>> {
        self.formats
            .iter()
            .map(|name| FormatTraits::by_name(name))
            .collect()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `setversion.toml` in current directory
/// 3. `.setversion.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return read_config(Path::new(path));
    }

    let local = Path::new(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return read_config(&local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(USER_CONFIG_FILE);
        if user.exists() {
            return read_config(&user);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path).map_err(|e| SetVersionError::io(path, e))?;
    parse_config(&config_str)
}

/// Parse configuration text in TOML form
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    Ok(config)
}
