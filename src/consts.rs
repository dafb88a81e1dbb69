//! Application-wide constants.

/// Human-readable application name.
pub const APP_NAME_FULL: &str = "Application Base";

/// One-line description used in the CLI help header.
pub const APP_DESCRIPTION: &str = "A base template for command-line applications";

/// Default directory for the configuration file.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Default configuration file name inside [`DEFAULT_CONFIG_DIR`].
pub const DEFAULT_CONFIG_FILENAME: &str = "appbase_config.json";

/// Default directory for log files.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Prefix for rotated log file names.
pub const DEFAULT_LOG_PREFIX: &str = "appbase";

/// Number of rotated log segments kept on disk.
pub const LOG_MAX_FILES: usize = 5;
