use std::fmt;

/// Non-fatal problems met while assembling the version record.
/// These fall back to a default value and are reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum RunWarning {
    /// Numeric build label is missing or not a number
    UnparsableBuildNumber {
        variable: String,
        value: Option<String>,
        fallback: u32,
    },
    /// Build label does not carry `prefix-major-minor` components
    UnparsableBuildLabel { label: String },
    /// `-CopyrightStartYear` value is not a number and was ignored
    UnparsableCopyrightYear { value: String },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::UnparsableBuildNumber {
                variable,
                value,
                fallback,
            } => match value {
                Some(value) => write!(
                    f,
                    "Cannot parse build number '{}' from {}, using {}",
                    value, variable, fallback
                ),
                None => write!(f, "{} is not set, using build number {}", variable, fallback),
            },
            RunWarning::UnparsableBuildLabel { label } => {
                write!(
                    f,
                    "Cannot read major/minor version from build label '{}', using defaults",
                    label
                )
            }
            RunWarning::UnparsableCopyrightYear { value } => {
                write!(f, "Ignoring non-numeric copyright start year '{}'", value)
            }
        }
    }
}
