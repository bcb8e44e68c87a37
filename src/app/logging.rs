//! Opt-in debug and crash logs for the selector.
//!
//! The picker owns the screen while it runs, so diagnostics go to files in
//! the temp directory, and nothing is written unless `--logs` is set. Lines
//! that carry context keys, domains or env names additionally need
//! `--log-content`.

use crate::config::AppConfig;
use std::{
    env,
    fs::{self, File, OpenOptions},
    io::Write,
    panic,
    path::{Path, PathBuf},
    sync::Mutex,
    time::{SystemTime, UNIX_EPOCH},
};

const DEBUG_LOG_LIMIT: u64 = 5 * 1024 * 1024;
const CRASH_LOG_LIMIT: u64 = 256 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LogFlags {
    enabled: bool,
    content: bool,
}

impl LogFlags {
    fn from_config(config: &AppConfig) -> Self {
        let enabled = config.logs && !config.no_logs;
        Self {
            enabled,
            content: enabled && config.log_content,
        }
    }
}

struct DebugLog {
    flags: LogFlags,
    file: Option<File>,
}

static DEBUG_LOG: Mutex<DebugLog> = Mutex::new(DebugLog {
    flags: LogFlags {
        enabled: false,
        content: false,
    },
    file: None,
});

pub fn log_file_path() -> PathBuf {
    env::temp_dir().join("cfdk_tui.log")
}

/// Crash log path. Entries hold the panic location and, with
/// `--log-content`, the panic message.
pub fn crash_log_path() -> PathBuf {
    env::temp_dir().join("cfdk_crash.log")
}

fn debug_log() -> std::sync::MutexGuard<'static, DebugLog> {
    DEBUG_LOG
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn flags() -> LogFlags {
    debug_log().flags
}

/// Open `path` for appending, starting it over when it has grown past
/// `limit`. Runs are short, so the size is only checked here.
fn open_capped(path: &Path, limit: u64) -> Option<File> {
    let oversized = fs::metadata(path).map(|meta| meta.len() > limit).unwrap_or(false);
    OpenOptions::new()
        .create(true)
        .append(!oversized)
        .write(true)
        .truncate(oversized)
        .open(path)
        .ok()
}

pub fn init_logging(config: &AppConfig) {
    apply_flags(LogFlags::from_config(config));
}

fn apply_flags(flags: LogFlags) {
    let mut log = debug_log();
    log.flags = flags;
    log.file = if flags.enabled {
        open_capped(&log_file_path(), DEBUG_LOG_LIMIT)
    } else {
        None
    };
}

fn stamped(msg: &str) -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    format!("[{secs}] {msg}\n")
}

pub fn log_debug(msg: &str) {
    let mut log = debug_log();
    if !log.flags.enabled {
        return;
    }
    if let Some(file) = log.file.as_mut() {
        let _ = file.write_all(stamped(msg).as_bytes());
    }
}

/// Like [`log_debug`], for lines that name the user's contexts.
pub fn log_debug_content(msg: &str) {
    if flags().content {
        log_debug(msg);
    }
}

/// Called from the terminal panic hook after the screen is restored.
pub fn log_panic(info: &panic::PanicHookInfo<'_>) {
    let flags = flags();
    if !flags.enabled {
        return;
    }
    let location = info
        .location()
        .map(|loc| format!("{}:{}", loc.file(), loc.line()))
        .unwrap_or_else(|| "unknown location".to_string());
    let message = if flags.content {
        panic_message(info.payload())
    } else {
        "message withheld without --log-content"
    };
    let line = stamped(&format!(
        "cfdk {} panicked at {location}: {message}",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(mut file) = open_capped(&crash_log_path(), CRASH_LOG_LIMIT) {
        let _ = file.write_all(line.as_bytes());
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
