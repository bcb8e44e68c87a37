pub mod app;
pub mod config;
pub mod context_store;
pub mod domains;
pub mod fdk;
pub mod selector;
pub mod session;
mod telemetry;
pub mod terminal_restore;

pub use app::{
    crash_log_path, init_logging, log_debug, log_debug_content, log_file_path, log_panic,
};
pub use session::{run_session, SessionError, SessionResult};
pub use telemetry::init_tracing;
