use std::backtrace::{Backtrace, BacktraceStatus};
use std::process::ExitCode;

use anyhow::Result;
use chrono::Local;

use set_version_info::ci::ProcessEnv;
use set_version_info::cli::{run, Args, RunArgs};
use set_version_info::config;
use set_version_info::ui;
use set_version_info::SetVersionError;

fn main() -> ExitCode {
    let args = match Args::try_parse_legacy(std::env::args_os()) {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            report_failure(&SetVersionError::argument(e.to_string().trim_end().to_string()).into());
            return ExitCode::FAILURE;
        }
    };

    match stamp_versions(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn stamp_versions(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    run(
        RunArgs::from(args),
        &config,
        &ProcessEnv,
        Local::now().naive_local(),
    )?;
    Ok(())
}

/// Print message, error type, causes and backtrace to stdout for the CI log
fn report_failure(err: &anyhow::Error) {
    let kind = err
        .downcast_ref::<SetVersionError>()
        .map(SetVersionError::kind)
        .unwrap_or("anyhow::Error");
    let causes: Vec<String> = err.chain().skip(1).map(|cause| cause.to_string()).collect();

    ui::display_error(&err.to_string());
    print!(
        "{}",
        ui::format_failure(&err.to_string(), kind, &causes, &stack_trace(err))
    );
    println!();
}

/// The error's own backtrace when one was captured, else the reporting site's
fn stack_trace(err: &anyhow::Error) -> String {
    match err.backtrace().status() {
        BacktraceStatus::Captured => err.backtrace().to_string(),
        _ => Backtrace::force_capture().to_string(),
    }
}
