//! Command-line parsing and validation helpers.

mod defaults;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use defaults::{DEFAULT_CONTEXT_PATH, DEFAULT_FDK_CMD};

/// CLI options for cfdk. Validated values keep the `fdk` subprocesses safe.
#[derive(Debug, Parser, Clone)]
#[command(name = "cfdk", about = "CLI Tool for changing FDK context", author, version)]
pub struct AppConfig {
    /// Path to the FDK context document
    #[arg(long = "config", env = "CFDK_CONFIG", default_value = DEFAULT_CONTEXT_PATH)]
    pub config_path: PathBuf,

    /// Path to the FDK CLI binary
    #[arg(long = "fdk-cmd", env = "FDK_CMD", default_value = DEFAULT_FDK_CMD)]
    pub fdk_cmd: String,

    /// Do not run `fdk login` after switching context
    #[arg(long = "skip-login", default_value_t = false)]
    pub skip_login: bool,

    /// Print the selectable domains and their contexts, then exit
    #[arg(long = "list-contexts", default_value_t = false)]
    pub list_contexts: bool,

    /// Disable colors in the picker and summary
    #[arg(long = "no-color", default_value_t = false)]
    pub no_color: bool,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "CFDK_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "CFDK_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow logging context keys, domains and env names (debug log only)
    #[arg(long = "log-content", env = "CFDK_LOG_CONTENT", default_value_t = false)]
    pub log_content: bool,
}
