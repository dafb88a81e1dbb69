//! appbase - Reusable scaffold for command-line applications
//!
//! Main entry point. Wiring only:
//!
//! 1. Parse and normalize the command line
//! 2. Run the dependency/path validation chain
//! 3. Load the JSON configuration (created from defaults when absent)
//! 4. Initialize logging (level from the CLI, console/file switches from
//!    the merged configuration)
//! 5. Hand off to [`appbase::app::run`]
//!
//! Argument errors exit non-zero through clap; validation and runtime errors
//! propagate as `anyhow::Result`, which prints the message and exits
//! non-zero.

use anyhow::Result;
use appbase::cli::Cli;
use appbase::config::ConfigManager;
use appbase::logging::{self, LogOptions};
use appbase::{APP_NAME, VERSION, consts};
use camino::Utf8PathBuf;
use clap::Parser;

fn main() -> Result<()> {
    let mut args = Cli::parse();

    if args.version {
        println!("{APP_NAME} {VERSION}");
        return Ok(());
    }

    args.normalize();
    args.validate()?;

    // Config comes first: the logging switches live in the merged tree.
    // The loader stays silent and records how it obtained the tree; the
    // outcome is replayed once the subscriber is up.
    let config = ConfigManager::load(args.config_path(), true);

    let (log_dir, file_prefix) = match &args.log_file {
        Some(log_file) => (
            log_file
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| Utf8PathBuf::from(consts::DEFAULT_LOG_DIR)),
            log_file
                .file_stem()
                .unwrap_or(consts::DEFAULT_LOG_PREFIX)
                .to_string(),
        ),
        None => (
            Utf8PathBuf::from(config.get_str("logging.log_dir", consts::DEFAULT_LOG_DIR)),
            consts::DEFAULT_LOG_PREFIX.to_string(),
        ),
    };

    let options = LogOptions {
        level: args.effective_log_level(),
        log_dir,
        file_prefix,
        enable_console: args.console_enabled(config.get_bool("logging.enable_console", true)),
        enable_file: config.get_bool("logging.enable_file", true),
    };
    let _guard = logging::init(&options)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    config.log_outcome();
    tracing::info!("Using config file {}", config.config_path());

    appbase::app::run(&args, &config)?;

    tracing::info!("Application shutdown complete");
    Ok(())
}
