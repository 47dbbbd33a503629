use crate::error::{Result, SetVersionError};
use chrono::{Datelike, NaiveDateTime};
use std::fmt;

/// Earliest copyright start year accepted by [`VersionProperties`]
pub const MIN_COPYRIGHT_START_YEAR: i32 = 1990;

/// Version and branding values written into assembly metadata files.
///
/// Built once per run with defaults, then overridden by CI extraction and
/// command-line values. Every setter validates its input, so the record is
/// valid at all times after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionProperties {
    major: u32,
    minor: u32,
    subversion_revision: u32,
    build_number: u32,
    company_name: String,
    product_name: String,
    trademark: String,
    copyright_start_year: i32,
    build_date: String,
    build_time: String,
    build_year: i32,
}

impl VersionProperties {
    /// Create the default version record stamped with the given build time
    pub fn new(now: NaiveDateTime) -> Self {
        VersionProperties {
            major: 1,
            minor: 0,
            subversion_revision: 0,
            build_number: 1,
            company_name: "Twaddle Software".to_string(),
            product_name: "Build Utilities".to_string(),
            trademark: String::new(),
            copyright_start_year: 1997,
            build_date: now.format("%d-%m-%Y").to_string(),
            build_time: now.format("%H:%M:%S").to_string(),
            build_year: now.year(),
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn subversion_revision(&self) -> u32 {
        self.subversion_revision
    }

    pub fn build_number(&self) -> u32 {
        self.build_number
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn trademark(&self) -> &str {
        &self.trademark
    }

    pub fn copyright_start_year(&self) -> i32 {
        self.copyright_start_year
    }

    pub fn build_date(&self) -> &str {
        &self.build_date
    }

    pub fn build_time(&self) -> &str {
        &self.build_time
    }

    /// Year the copyright range ends at
    pub fn build_year(&self) -> i32 {
        self.build_year
    }

    /// Set the major version; zero is rejected
    pub fn set_major(&mut self, major: u32) -> Result<()> {
        if major == 0 {
            return Err(SetVersionError::invalid_value(
                "Major version must be greater than zero",
            ));
        }
        self.major = major;
        Ok(())
    }

    pub fn set_minor(&mut self, minor: u32) {
        self.minor = minor;
    }

    pub fn set_subversion_revision(&mut self, revision: u32) {
        self.subversion_revision = revision;
    }

    pub fn set_build_number(&mut self, build_number: u32) {
        self.build_number = build_number;
    }

    pub fn set_company_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.company_name = non_empty("Company name", name.into())?;
        Ok(())
    }

    pub fn set_product_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.product_name = non_empty("Product name", name.into())?;
        Ok(())
    }

    /// Set the trademark text; an empty trademark is allowed
    pub fn set_trademark(&mut self, trademark: impl Into<String>) {
        self.trademark = trademark.into();
    }

    pub fn set_copyright_start_year(&mut self, year: i32) -> Result<()> {
        if year < MIN_COPYRIGHT_START_YEAR {
            return Err(SetVersionError::invalid_value(format!(
                "Copyright start year {} is before {}",
                year, MIN_COPYRIGHT_START_YEAR
            )));
        }
        self.copyright_start_year = year;
        Ok(())
    }

    pub fn set_build_date(&mut self, date: impl Into<String>) -> Result<()> {
        self.build_date = non_empty("Build date", date.into())?;
        Ok(())
    }

    pub fn set_build_time(&mut self, time: impl Into<String>) -> Result<()> {
        self.build_time = non_empty("Build time", time.into())?;
        Ok(())
    }

    /// Four-part version: `major.minor.revision.build`
    pub fn full_version(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.major, self.minor, self.subversion_revision, self.build_number
        )
    }
}

impl fmt::Display for VersionProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_version())
    }
}

fn non_empty(field: &str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(SetVersionError::invalid_value(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(value)
}
