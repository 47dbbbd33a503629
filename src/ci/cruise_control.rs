use crate::ci::team_city::read_build_number;
use crate::ci::{EnvSource, BUILD_DATE_VAR, BUILD_LABEL_VAR, BUILD_TIME_VAR};
use crate::domain::VersionProperties;
use crate::error::Result;
use crate::warning::RunWarning;

/// Major version used when the build label carries none
pub const DEFAULT_MAJOR: u32 = 1;
/// Minor version used when the build label carries none
pub const DEFAULT_MINOR: u32 = 0;

/// Apply CruiseControl build information to `version`.
///
/// Major and minor come from the build label (`prefix-major-minor-rest` or
/// `prefix-major-minor.rest`), the build number from the numeric label and
/// the build date/time from their own variables. Empty date or time values
/// leave the current ones in place.
pub fn load(env: &impl EnvSource, version: &mut VersionProperties) -> Result<Vec<RunWarning>> {
    let mut warnings = Vec::new();

    let label = env.var(BUILD_LABEL_VAR).unwrap_or_default();
    let major = label_major(&label).filter(|&major| major > 0);
    let minor = label_minor(&label);
    if major.is_none() || minor.is_none() {
        warnings.push(RunWarning::UnparsableBuildLabel {
            label: label.clone(),
        });
    }
    version.set_major(major.unwrap_or(DEFAULT_MAJOR))?;
    version.set_minor(minor.unwrap_or(DEFAULT_MINOR));

    version.set_build_number(read_build_number(env, &mut warnings));

    if let Some(date) = env.non_empty_var(BUILD_DATE_VAR) {
        version.set_build_date(date)?;
    }
    if let Some(time) = env.non_empty_var(BUILD_TIME_VAR) {
        version.set_build_time(time)?;
    }

    Ok(warnings)
}

/// Second hyphen-delimited field of the label, when a third field follows
pub fn label_major(label: &str) -> Option<u32> {
    let mut fields = label.splitn(3, '-');
    fields.next()?;
    let major = fields.next()?;
    fields.next()?;
    major.parse().ok()
}

/// Text after the second hyphen, up to the next hyphen or else the next dot
pub fn label_minor(label: &str) -> Option<u32> {
    let rest = label.splitn(3, '-').nth(2)?;
    let end = rest.find('-').or_else(|| rest.find('.'))?;
    rest[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ci::{MapEnv, NUMERIC_LABEL_VAR};
    use chrono::NaiveDate;

    fn version() -> VersionProperties {
        let now = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        VersionProperties::new(now)
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!(label_major("Build-2-5-1234"), Some(2));
        assert_eq!(label_minor("Build-2-5-1234"), Some(5));
        assert_eq!(label_major("Build-3-7.88"), Some(3));
        assert_eq!(label_minor("Build-3-7.88"), Some(7));
    }

    #[test]
    fn test_label_parsing_failures() {
        assert_eq!(label_major(""), None);
        assert_eq!(label_major("Build"), None);
        assert_eq!(label_major("Build-2"), None);
        assert_eq!(label_major("Build-x-5-1"), None);
        assert_eq!(label_minor("Build-2-5"), None);
        assert_eq!(label_minor("Build-2-y-1"), None);
    }

    #[test]
    fn test_load_full_environment() {
        let env = MapEnv::new()
            .with(BUILD_LABEL_VAR, "Release-4-2-311")
            .with(NUMERIC_LABEL_VAR, "311")
            .with(BUILD_DATE_VAR, "2024-05-06")
            .with(BUILD_TIME_VAR, "10:11:12");
        let mut v = version();
        let warnings = load(&env, &mut v).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(v.major(), 4);
        assert_eq!(v.minor(), 2);
        assert_eq!(v.build_number(), 311);
        assert_eq!(v.build_date(), "2024-05-06");
        assert_eq!(v.build_time(), "10:11:12");
    }

    #[test]
    fn test_load_falls_back_on_bad_label() {
        let env = MapEnv::new()
            .with(BUILD_LABEL_VAR, "nightly")
            .with(NUMERIC_LABEL_VAR, "oops");
        let mut v = version();
        v.set_major(9).unwrap();
        v.set_minor(9);
        let warnings = load(&env, &mut v).unwrap();
        assert_eq!(v.major(), DEFAULT_MAJOR);
        assert_eq!(v.minor(), DEFAULT_MINOR);
        assert_eq!(v.build_number(), 1);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_zero_major_falls_back() {
        let env = MapEnv::new()
            .with(BUILD_LABEL_VAR, "Build-0-3-1")
            .with(NUMERIC_LABEL_VAR, "1");
        let mut v = version();
        load(&env, &mut v).unwrap();
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), 3);
    }

    #[test]
    fn test_empty_timestamps_keep_defaults() {
        let env = MapEnv::new()
            .with(BUILD_LABEL_VAR, "Build-1-1-1")
            .with(NUMERIC_LABEL_VAR, "1")
            .with(BUILD_DATE_VAR, "");
        let mut v = version();
        load(&env, &mut v).unwrap();
        assert_eq!(v.build_date(), "02-01-2024");
        assert_eq!(v.build_time(), "03:04:05");
    }
}
