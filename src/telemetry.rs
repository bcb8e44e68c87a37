//! Structured selector events (`config_loaded`, `selection_finished`,
//! `config_saved`, handoff steps) as JSON lines.

use crate::config::AppConfig;
use std::env;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, Once};
use tracing_subscriber::fmt::time::UtcTime;

const TRACE_LOG_ENV: &str = "CFDK_TRACE_LOG";
const TRACE_LOG_NAME: &str = "cfdk_trace.jsonl";

static TRACING: Once = Once::new();

fn trace_log_path(override_path: Option<OsString>) -> PathBuf {
    match override_path {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => env::temp_dir().join(TRACE_LOG_NAME),
    }
}

/// Send `tracing` events to the trace file when logging is on. The picker
/// draws on stdout, so events never go there.
pub fn init_tracing(config: &AppConfig) {
    if !config.logs || config.no_logs {
        return;
    }
    TRACING.call_once(|| {
        let path = trace_log_path(env::var_os(TRACE_LOG_ENV));
        let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
            return;
        };
        let _ = tracing_subscriber::fmt()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(Mutex::new(file))
            .with_current_span(false)
            .with_span_list(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_path_honors_override() {
        let path = trace_log_path(Some(OsString::from("/var/tmp/cfdk.jsonl")));
        assert_eq!(path, PathBuf::from("/var/tmp/cfdk.jsonl"));
    }

    #[test]
    fn trace_path_defaults_to_temp_dir() {
        assert_eq!(trace_log_path(None), env::temp_dir().join(TRACE_LOG_NAME));
        assert_eq!(
            trace_log_path(Some(OsString::new())),
            env::temp_dir().join(TRACE_LOG_NAME)
        );
    }
}
