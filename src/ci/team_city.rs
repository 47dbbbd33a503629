use crate::ci::{EnvSource, DEFAULT_BUILD_NUMBER, NUMERIC_LABEL_VAR};
use crate::domain::VersionProperties;
use crate::warning::RunWarning;

/// Apply the TeamCity build number to `version`.
///
/// Only the build number is read; anything unparsable becomes
/// [`DEFAULT_BUILD_NUMBER`] and yields a warning.
pub fn load(env: &impl EnvSource, version: &mut VersionProperties) -> Vec<RunWarning> {
    let mut warnings = Vec::new();
    version.set_build_number(read_build_number(env, &mut warnings));
    warnings
}

/// Parse the numeric build label, falling back to the default build number
pub(crate) fn read_build_number(env: &impl EnvSource, warnings: &mut Vec<RunWarning>) -> u32 {
    let value = env.var(NUMERIC_LABEL_VAR);
    match value.as_deref().map(str::trim).map(str::parse::<u32>) {
        Some(Ok(number)) => number,
        _ => {
            warnings.push(RunWarning::UnparsableBuildNumber {
                variable: NUMERIC_LABEL_VAR.to_string(),
                value,
                fallback: DEFAULT_BUILD_NUMBER,
            });
            DEFAULT_BUILD_NUMBER
        }
    }
}
