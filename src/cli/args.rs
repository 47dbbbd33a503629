use std::ffi::OsString;

use clap::Parser;

/// Options accepted in `-Name:value` / `-Name` form: (name, long flag, takes a value)
const OPTIONS: &[(&str, &str, bool)] = &[
    ("RootFolder", "root-folder", true),
    ("UseCruiseControl", "use-cruise-control", false),
    ("UseTeamCity", "use-team-city", false),
    ("CompanyName", "company-name", true),
    ("ProductName", "product-name", true),
    ("Trademark", "trademark", true),
    ("CopyrightStartYear", "copyright-start-year", true),
    ("Config", "config", true),
    ("Quiet", "quiet", false),
];

#[derive(Parser, Debug, Clone, PartialEq, Default)]
#[command(
    name = "set-version-info",
    version,
    about = "Stamp version, company and product attributes into AssemblyInfo files"
)]
pub struct Args {
    #[arg(long, help = "Root folder to scan (default: CI working directory, then current directory)")]
    pub root_folder: Option<String>,

    #[arg(long, help = "Read version information from CruiseControl variables")]
    pub use_cruise_control: bool,

    #[arg(long, help = "Read the build number from TeamCity variables")]
    pub use_team_city: bool,

    #[arg(long, help = "Company name override")]
    pub company_name: Option<String>,

    #[arg(long, help = "Product name override")]
    pub product_name: Option<String>,

    #[arg(long, help = "Trademark override")]
    pub trademark: Option<String>,

    #[arg(long, help = "First year of the copyright range")]
    pub copyright_start_year: Option<String>,

    #[arg(long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(long, help = "Only print warnings and errors")]
    pub quiet: bool,
}

impl Args {
    /// Parse `-Name:value` style arguments (the first item is the program name)
    pub fn try_parse_legacy<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Args::try_parse_from(normalize_args(args))
    }
}

/// Rewrite `-Name:value` and `-Name` arguments into long options.
///
/// Names are matched without regard to case. Flags ignore any value given
/// after the colon; value options given without one receive an empty value.
/// When an option is repeated the first occurrence wins and later ones are
/// dropped. Anything else is passed through unchanged for clap to judge.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut seen: Vec<&'static str> = Vec::new();
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .filter_map(|(i, arg)| {
            if i == 0 {
                return Some(arg);
            }
            match arg.to_str().and_then(normalize_one) {
                Some((long, _)) if seen.contains(&long) => None,
                Some((long, normalized)) => {
                    seen.push(long);
                    Some(OsString::from(normalized))
                }
                None => Some(arg),
            }
        })
        .collect()
}

/// Long option name and its `--long[=value]` form
fn normalize_one(arg: &str) -> Option<(&'static str, String)> {
    if arg.starts_with("--") {
        return None;
    }
    let body = arg.strip_prefix('-')?;
    let (name, value) = match body.split_once(':') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    let &(_, long, takes_value) = OPTIONS
        .iter()
        .find(|(option, _, _)| option.eq_ignore_ascii_case(name))?;

    let normalized = if takes_value {
        format!("--{}={}", long, value.unwrap_or(""))
    } else {
        format!("--{}", long)
    };
    Some((long, normalized))
}
