//! Application body.
//!
//! [`run`] is where the scaffold hands off to business logic. The mode
//! handlers are intentionally stubs: they log what they were asked to do and
//! return, so a new project replaces them one by one while keeping the
//! wiring (arguments, config, logging, validation) untouched.

use crate::cli::{Cli, Mode};
use crate::config::ConfigManager;
use crate::error::AppResult;
use crate::logging::TimedScope;
use crate::system;

/// Execute the selected mode against the parsed arguments and the merged
/// configuration.
pub fn run(args: &Cli, config: &ConfigManager) -> AppResult<()> {
    let _scope = TimedScope::enter("application run");

    println!("{} v{}", crate::consts::APP_NAME_FULL, crate::VERSION);

    tracing::info!(
        "Effective settings: mode={}, format={}, inputs={}, output={}, dry_run={}",
        args.mode,
        args.format,
        args.input.len(),
        args.output
            .as_ref()
            .map(|p| p.as_str())
            .unwrap_or("<none>"),
        args.dry_run
    );
    tracing::info!(
        "Configuration: app.name={}, processing.output_format={}",
        config.get_str("app.name", crate::APP_NAME),
        config.get_str("processing.output_format", "json")
    );

    system::system_report().log();

    // TODO: replace the stubs below with real processing once this scaffold
    // grows a domain.
    match args.mode {
        Mode::Analyze => analyze(args),
        Mode::Convert => convert(args),
        Mode::Validate => validate(args),
        Mode::Batch => batch(args),
    }?;

    println!("Application finished successfully.");
    Ok(())
}

fn analyze(args: &Cli) -> AppResult<()> {
    tracing::info!("analyze: {} input path(s), nothing to do yet", args.input.len());
    Ok(())
}

fn convert(args: &Cli) -> AppResult<()> {
    tracing::info!(
        "convert: would write {} output to {}",
        args.format,
        args.output
            .as_ref()
            .map(|p| p.as_str())
            .unwrap_or("<none>")
    );
    Ok(())
}

fn validate(args: &Cli) -> AppResult<()> {
    tracing::info!("validate: {} input path(s), nothing to do yet", args.input.len());
    Ok(())
}

fn batch(args: &Cli) -> AppResult<()> {
    tracing::info!("batch: {} input path(s), nothing to do yet", args.input.len());
    Ok(())
}
