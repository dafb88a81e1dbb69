//! Command-line argument surface.
//!
//! Declares the flags (grouped into basic / logging / advanced help
//! sections), post-processes derived fields, and runs the validation
//! library against the parsed arguments. Path and dependency checks happen
//! after parsing through [`Cli::validate`], not inside the parser itself;
//! clap handles syntax, the validation library handles semantics.

use crate::consts;
use crate::error::AppResult;
use crate::logging::LogLevel;
use crate::validation;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, ValueEnum};

/// Processing modes. All of them are scaffold stubs; real business logic
/// plugs in behind [`crate::app::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Analyze input files
    Analyze,
    /// Convert inputs into the selected output format
    Convert,
    /// Validate inputs without producing output
    Validate,
    /// Process many inputs in one run
    Batch,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::Analyze => "analyze",
            Mode::Convert => "convert",
            Mode::Validate => "validate",
            Mode::Batch => "batch",
        };
        f.write_str(name)
    }
}

/// Output serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Xml,
    Csv,
    Txt,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
            OutputFormat::Csv => "csv",
            OutputFormat::Txt => "txt",
        };
        f.write_str(name)
    }
}

/// Parsed command-line arguments.
///
/// Created once per invocation: parse, then [`normalize`](Cli::normalize)
/// (derived fields, absolute paths), then [`validate`](Cli::validate);
/// read-only afterward.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "appbase",
    about = consts::APP_DESCRIPTION,
    disable_version_flag = true
)]
pub struct Cli {
    /// Print version information and exit
    #[arg(short = 'v', long = "version", help_heading = "Basic options")]
    pub version: bool,

    /// Path to the configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help_heading = "Basic options"
    )]
    pub config: Option<Utf8PathBuf>,

    /// Execution mode
    #[arg(
        long,
        value_enum,
        default_value_t = Mode::Analyze,
        value_name = "MODE",
        help_heading = "Basic options"
    )]
    pub mode: Mode,

    /// Files or directories to process
    #[arg(value_name = "INPUT")]
    pub input: Vec<Utf8PathBuf>,

    /// Output directory
    #[arg(short = 'o', long, value_name = "DIR", help_heading = "Basic options")]
    pub output: Option<Utf8PathBuf>,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::Json,
        value_name = "FORMAT",
        help_heading = "Basic options"
    )]
    pub format: OutputFormat,

    /// Log level
    #[arg(
        long = "log-level",
        value_enum,
        value_name = "LEVEL",
        help_heading = "Logging options"
    )]
    pub log_level: Option<LogLevel>,

    /// Log file path
    #[arg(long = "log-file", value_name = "FILE", help_heading = "Logging options")]
    pub log_file: Option<Utf8PathBuf>,

    /// Increase verbosity (repeat for debug output)
    #[arg(long, action = ArgAction::Count, help_heading = "Logging options")]
    pub verbose: u8,

    /// Only log errors and disable console output
    #[arg(short = 'q', long, help_heading = "Logging options")]
    pub quiet: bool,

    /// Run in debug mode (forces DEBUG log level)
    #[arg(long, help_heading = "Advanced options")]
    pub debug: bool,

    /// Show what would be done without doing it
    #[arg(long = "dry-run", help_heading = "Advanced options")]
    pub dry_run: bool,

    /// Overwrite existing outputs
    #[arg(long, help_heading = "Advanced options")]
    pub force: bool,
}

impl Cli {
    /// Post-process parsed arguments: resolve the supplied paths to
    /// absolute form. Call once, right after parsing.
    pub fn normalize(&mut self) {
        if let Some(config) = self.config.take() {
            self.config = Some(absolutize(&config));
        }
        if let Some(output) = self.output.take() {
            self.output = Some(absolutize(&output));
        }
        if let Some(log_file) = self.log_file.take() {
            self.log_file = Some(absolutize(&log_file));
        }
    }

    /// The effective log level derived from `--debug`, `--verbose`,
    /// `--quiet`, and `--log-level`, in that precedence order.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.debug || self.verbose >= 2 {
            LogLevel::Debug
        } else if self.verbose == 1 {
            LogLevel::Info
        } else if self.quiet {
            LogLevel::Error
        } else {
            self.log_level.unwrap_or(LogLevel::Info)
        }
    }

    /// Whether console logging stays enabled. `--quiet` wins over the
    /// configured default.
    pub fn console_enabled(&self, config_default: bool) -> bool {
        !self.quiet && config_default
    }

    /// The configuration file to load: the `--config` value, or the
    /// built-in default location.
    pub fn config_path(&self) -> Utf8PathBuf {
        self.config.clone().unwrap_or_else(|| {
            Utf8PathBuf::from(consts::DEFAULT_CONFIG_DIR).join(consts::DEFAULT_CONFIG_FILENAME)
        })
    }

    /// Run the dependency and path checks against the parsed arguments.
    ///
    /// Enforced rules:
    /// - `--mode convert` requires `--output`
    /// - `--mode batch` requires at least one input path
    /// - `--quiet` and `--verbose` are mutually exclusive
    /// - `--dry-run` and `--force` are mutually exclusive
    /// - every supplied input path must exist
    /// - a supplied `--config` must exist as a file
    /// - a supplied `--output` must be an existing writable directory
    /// - the `--log-file` parent directory must be writable (created on
    ///   demand)
    pub fn validate(&self) -> AppResult<()> {
        validation::validate_conditional_required(
            self.mode == Mode::Convert,
            self.output.is_some(),
            "--mode convert",
            "--output",
        )?;

        validation::validate_conditional_required(
            self.mode == Mode::Batch,
            !self.input.is_empty(),
            "--mode batch",
            "input files or directories",
        )?;

        for input in &self.input {
            validation::validate_file_or_directory_exists(input, "input path")?;
        }

        validation::validate_mutually_exclusive(&[
            (self.quiet, "--quiet"),
            (self.verbose > 0, "--verbose"),
        ])?;

        validation::validate_mutually_exclusive(&[
            (self.dry_run, "--dry-run"),
            (self.force, "--force"),
        ])?;

        if let Some(config) = &self.config {
            validation::validate_file_exists(config, "config file")?;
        }

        if let Some(output) = &self.output {
            validation::validate_writable_directory(output, "output directory", false)?;
        }

        if let Some(log_file) = &self.log_file {
            if let Some(parent) = log_file.parent() {
                if !parent.as_str().is_empty() {
                    validation::validate_writable_directory(parent, "log directory", true)?;
                }
            }
        }

        Ok(())
    }
}

fn absolutize(path: &Utf8Path) -> Utf8PathBuf {
    match std::path::absolute(path.as_std_path()) {
        Ok(abs) => Utf8PathBuf::try_from(abs).unwrap_or_else(|_| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
