//! Logging setup and timing helpers.
//!
//! Builds the global tracing subscriber with a console layer and/or a
//! rotating file layer. File logs rotate daily and keep
//! [`consts::LOG_MAX_FILES`](crate::consts::LOG_MAX_FILES) segments. If the
//! file appender cannot be created the setup degrades to console-only with a
//! warning when console output is enabled, and fails otherwise.

use crate::consts;
use crate::error::{AppError, AppResult, ErrorCode};
use camino::Utf8PathBuf;
use clap::ValueEnum;
use std::fs;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log severity levels exposed on the CLI and in the config file.
///
/// `Critical` maps onto tracing's ERROR (tracing has no higher level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// The tracing filter directive for this level.
    pub fn filter_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            other => Err(AppError::config(format!(
                "invalid log level: {other} (expected DEBUG, INFO, WARNING, ERROR, or CRITICAL)"
            ))
            .with_code(ErrorCode::LoggingInit)
            .with_detail("level", other)),
        }
    }
}

/// Options for [`init`].
#[derive(Debug, Clone)]
pub struct LogOptions {
    pub level: LogLevel,
    pub log_dir: Utf8PathBuf,
    pub file_prefix: String,
    pub enable_console: bool,
    pub enable_file: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            log_dir: Utf8PathBuf::from(consts::DEFAULT_LOG_DIR),
            file_prefix: consts::DEFAULT_LOG_PREFIX.to_string(),
            enable_console: true,
            enable_file: true,
        }
    }
}

/// Install the global tracing subscriber.
///
/// Returns the non-blocking writer guard when a file layer was created; the
/// guard must be held for the duration of the program to keep file logging
/// active.
pub fn init(options: &LogOptions) -> AppResult<Option<WorkerGuard>> {
    let env_filter = EnvFilter::new(options.level.filter_str());

    let mut file_writer: Option<(NonBlocking, WorkerGuard)> = None;
    if options.enable_file {
        match build_file_writer(options) {
            Ok(writer) => file_writer = Some(writer),
            Err(e) if options.enable_console => {
                // Degraded mode: the console layer still carries the logs.
                eprintln!("warning: {e}; continuing with console logging only");
            }
            Err(e) => return Err(e),
        }
    }

    let console_layer = options.enable_console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_target(false)
    });

    let (file_layer, guard) = match file_writer {
        Some((non_blocking, guard)) => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false) // No ANSI codes in log files
                .with_target(true)
                .with_file(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| {
            AppError::config("failed to install the tracing subscriber")
                .with_code(ErrorCode::LoggingInit)
                .with_source(e)
        })?;

    tracing::info!(
        "Logging initialized: level={}, console={}, file={}",
        options.level,
        options.enable_console,
        guard.is_some()
    );

    Ok(guard)
}

fn build_file_writer(options: &LogOptions) -> AppResult<(NonBlocking, WorkerGuard)> {
    if !options.log_dir.exists() {
        fs::create_dir_all(&options.log_dir).map_err(|e| {
            AppError::config(format!("failed to create log directory: {}", options.log_dir))
                .with_code(ErrorCode::LoggingInit)
                .with_detail("log_dir", options.log_dir.as_str())
                .with_source(e)
        })?;
    }

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&options.file_prefix)
        .filename_suffix("log")
        .max_log_files(consts::LOG_MAX_FILES)
        .build(&options.log_dir)
        .map_err(|e| {
            AppError::config(format!("failed to create log file appender in {}", options.log_dir))
                .with_code(ErrorCode::LoggingInit)
                .with_detail("log_dir", options.log_dir.as_str())
                .with_source(e)
        })?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Scoped timing helper: logs entry on construction and exit with the
/// elapsed duration on drop.
///
/// ```
/// use appbase::logging::TimedScope;
///
/// {
///     let _scope = TimedScope::enter("load inputs");
///     // ... work ...
/// } // logs "Leaving load inputs" with the duration
/// ```
pub struct TimedScope {
    name: String,
    start: Instant,
}

impl TimedScope {
    pub fn enter(name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::debug!("Entering {}", name);
        Self {
            name,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for TimedScope {
    fn drop(&mut self) {
        tracing::debug!("Leaving {} after {:.2?}", self.name, self.start.elapsed());
    }
}

/// Run a closure and log how long it took.
pub fn time_call<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    tracing::info!("{} completed in {:.2?}", name, start.elapsed());
    result
}
