//! Version-stamping run
//!
//! Builds the version record (config defaults, then CI extraction, then
//! command-line overrides), resolves the root folder and rewrites every
//! matching file below it. Kept apart from `main.rs` so the run can be
//! driven programmatically without clap.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::ci::{self, EnvSource, WORKING_DIRECTORY_VAR};
use crate::cli::args::Args;
use crate::config::Config;
use crate::domain::{TagCatalog, VersionProperties};
use crate::error::{Result, SetVersionError};
use crate::ui::Reporter;
use crate::updater::AssemblyInfoUpdater;
use crate::walker;
use crate::warning::RunWarning;

/// Which CI server to read version information from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CiSystem {
    #[default]
    None,
    CruiseControl,
    TeamCity,
}

/// Arguments for the version-stamping run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunArgs {
    pub root_folder: Option<PathBuf>,
    pub ci: CiSystem,
    pub company_name: Option<String>,
    pub product_name: Option<String>,
    pub trademark: Option<String>,
    /// Raw text; non-numeric values are ignored with a warning
    pub copyright_start_year: Option<String>,
    pub quiet: bool,
}

impl From<Args> for RunArgs {
    fn from(args: Args) -> Self {
        // CruiseControl wins when both CI switches are given
        let ci = if args.use_cruise_control {
            CiSystem::CruiseControl
        } else if args.use_team_city {
            CiSystem::TeamCity
        } else {
            CiSystem::None
        };

        RunArgs {
            root_folder: args
                .root_folder
                .filter(|root| !root.is_empty())
                .map(PathBuf::from),
            ci,
            company_name: args.company_name,
            product_name: args.product_name,
            trademark: args.trademark,
            copyright_start_year: args.copyright_start_year,
            quiet: args.quiet,
        }
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub root_folder: PathBuf,
    /// Four-part version written into the files
    pub version: String,
    pub folders_visited: usize,
    pub files_rewritten: Vec<PathBuf>,
}

/// Build the version record for this run.
///
/// Order: config defaults, then CI extraction, then explicit overrides.
pub fn load_version_information(
    args: &RunArgs,
    config: &Config,
    env: &impl EnvSource,
    now: NaiveDateTime,
    reporter: &Reporter,
) -> Result<VersionProperties> {
    let mut version = VersionProperties::new(now);
    config.version.apply_to(&mut version)?;

    let warnings = match args.ci {
        CiSystem::CruiseControl => ci::cruise_control::load(env, &mut version)?,
        CiSystem::TeamCity => ci::team_city::load(env, &mut version),
        CiSystem::None => Vec::new(),
    };
    for warning in &warnings {
        reporter.warning(warning);
    }

    if let Some(company) = &args.company_name {
        version.set_company_name(company.as_str())?;
    }
    if let Some(product) = &args.product_name {
        version.set_product_name(product.as_str())?;
    }
    if let Some(trademark) = &args.trademark {
        version.set_trademark(trademark.as_str());
    }
    if let Some(year_text) = &args.copyright_start_year {
        match year_text.trim().parse::<i32>() {
            Ok(year) => version.set_copyright_start_year(year)?,
            Err(_) => reporter.warning(&RunWarning::UnparsableCopyrightYear {
                value: year_text.clone(),
            }),
        }
    }

    Ok(version)
}

/// Root folder: explicit argument, then the CI working directory, then the current directory
pub fn resolve_root_folder(args: &RunArgs, env: &impl EnvSource) -> Result<PathBuf> {
    if let Some(root) = args.root_folder.as_ref().filter(|p| !p.as_os_str().is_empty()) {
        return Ok(root.clone());
    }
    if let Some(root) = env.non_empty_var(WORKING_DIRECTORY_VAR) {
        return Ok(PathBuf::from(root));
    }
    std::env::current_dir().map_err(|e| SetVersionError::io(".", e))
}

/// Run the whole pipeline against the folder tree.
///
/// The first failing file aborts the run.
pub fn run(
    args: RunArgs,
    config: &Config,
    env: &impl EnvSource,
    now: NaiveDateTime,
) -> Result<RunSummary> {
    let reporter = Reporter::new(args.quiet);

    let version = load_version_information(&args, config, env, now, &reporter)?;
    reporter.version_number(&version.full_version());

    let formats = config.scan.format_traits()?;
    let updater = AssemblyInfoUpdater::new(TagCatalog::standard(), formats, reporter)?;

    let root_folder = resolve_root_folder(&args, env)?;
    let mut files_rewritten = Vec::new();
    let folders_visited = walker::process_files_in_folder(&root_folder, |dir: &Path| {
        reporter.status(&format!("Processing files in {}", dir.display()));
        files_rewritten.extend(updater.process_folder_contents(dir, &version)?);
        Ok(())
    })?;

    reporter.success(&format!(
        "Updated {} file(s) under {}",
        files_rewritten.len(),
        root_folder.display()
    ));

    Ok(RunSummary {
        root_folder,
        version: version.full_version(),
        folders_visited,
        files_rewritten,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ci::{MapEnv, BUILD_LABEL_VAR, NUMERIC_LABEL_VAR};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn quiet_args() -> RunArgs {
        RunArgs {
            quiet: true,
            ..RunArgs::default()
        }
    }

    #[test]
    fn test_cruise_control_takes_precedence() {
        let args = Args {
            use_cruise_control: true,
            use_team_city: true,
            ..Args::default()
        };
        assert_eq!(RunArgs::from(args).ci, CiSystem::CruiseControl);
    }

    #[test]
    fn test_overrides_apply_after_ci() {
        let env = MapEnv::new()
            .with(BUILD_LABEL_VAR, "Build-3-4-77")
            .with(NUMERIC_LABEL_VAR, "77");
        let args = RunArgs {
            ci: CiSystem::CruiseControl,
            company_name: Some("Acme".to_string()),
            trademark: Some("Rocket™".to_string()),
            copyright_start_year: Some("2005".to_string()),
            ..quiet_args()
        };
        let version =
            load_version_information(&args, &Config::default(), &env, now(), &Reporter::quiet())
                .unwrap();
        assert_eq!(version.full_version(), "3.4.0.77");
        assert_eq!(version.company_name(), "Acme");
        assert_eq!(version.trademark(), "Rocket™");
        assert_eq!(version.copyright_start_year(), 2005);
        assert_eq!(version.build_year(), 2025);
    }

    #[test]
    fn test_non_numeric_copyright_year_ignored() {
        let args = RunArgs {
            copyright_start_year: Some("soon".to_string()),
            ..quiet_args()
        };
        let version = load_version_information(
            &args,
            &Config::default(),
            &MapEnv::new(),
            now(),
            &Reporter::quiet(),
        )
        .unwrap();
        assert_eq!(version.copyright_start_year(), 1997);
    }

    #[test]
    fn test_out_of_range_override_is_error() {
        let args = RunArgs {
            copyright_start_year: Some("1980".to_string()),
            ..quiet_args()
        };
        let result = load_version_information(
            &args,
            &Config::default(),
            &MapEnv::new(),
            now(),
            &Reporter::quiet(),
        );
        assert!(result.is_err());

        let args = RunArgs {
            company_name: Some(String::new()),
            ..quiet_args()
        };
        let result = load_version_information(
            &args,
            &Config::default(),
            &MapEnv::new(),
            now(),
            &Reporter::quiet(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_root_folder_argument_beats_environment() {
        let env = MapEnv::new().with(WORKING_DIRECTORY_VAR, "/ci/work");
        let args = RunArgs {
            root_folder: Some(PathBuf::from("/tmp/x")),
            ..quiet_args()
        };
        assert_eq!(resolve_root_folder(&args, &env).unwrap(), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_root_folder_falls_back_to_environment() {
        let env = MapEnv::new().with(WORKING_DIRECTORY_VAR, "/ci/work");
        let args = RunArgs {
            root_folder: Some(PathBuf::new()),
            ..quiet_args()
        };
        assert_eq!(
            resolve_root_folder(&args, &env).unwrap(),
            PathBuf::from("/ci/work")
        );
    }

    #[test]
    fn test_root_folder_falls_back_to_current_dir() {
        let root = resolve_root_folder(&quiet_args(), &MapEnv::new()).unwrap();
        assert_eq!(root, std::env::current_dir().unwrap());
    }
}
