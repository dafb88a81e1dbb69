// appbase - Reusable scaffold for command-line applications
//
// This is the library crate containing the scaffold components: argument
// parsing, configuration management, logging setup, typed errors, and the
// validation helper library. The binary crate (main.rs) wires them together.

pub mod app;
pub mod cli;
pub mod config;
pub mod consts;
pub mod error;
pub mod logging;
pub mod system;
pub mod validation;

// Re-export commonly used types for convenience
pub use cli::{Cli, Mode, OutputFormat};
pub use config::{ConfigManager, LoadOutcome};
pub use error::{AppError, AppResult, ErrorCode, ErrorKind};
pub use logging::LogLevel;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
