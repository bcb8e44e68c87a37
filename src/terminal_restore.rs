//! Terminal state owned by the picker: raw mode, the alternate screen and a
//! hidden cursor.
//!
//! What has been acquired is recorded in a process-wide bit set so the panic
//! hook can hand the terminal back even when the guard never drops.

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Write},
    panic,
    sync::{
        atomic::{AtomicU8, Ordering},
        Once,
    },
};

const RAW_MODE: u8 = 0b01;
const ALT_SCREEN: u8 = 0b10;

static ACQUIRED: AtomicU8 = AtomicU8::new(0);
static PANIC_HOOK: Once = Once::new();

/// Holds the terminal for the picker. Dropping it releases everything.
pub struct TerminalRestoreGuard {
    _private: (),
}

impl TerminalRestoreGuard {
    /// Enter raw mode and the alternate screen with the cursor hidden. A
    /// partial acquisition is undone before the error is returned.
    pub fn acquire(out: &mut impl Write) -> io::Result<Self> {
        install_panic_hook();
        let guard = Self { _private: () };
        enable_raw_mode()?;
        ACQUIRED.fetch_or(RAW_MODE, Ordering::SeqCst);
        execute!(out, EnterAlternateScreen, Hide)?;
        ACQUIRED.fetch_or(ALT_SCREEN, Ordering::SeqCst);
        Ok(guard)
    }

    pub fn release(&self) {
        release_terminal();
    }
}

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        release_terminal();
    }
}

/// Undo whatever was acquired. Later calls find nothing to do.
pub fn release_terminal() {
    let acquired = ACQUIRED.swap(0, Ordering::SeqCst);
    if acquired == 0 {
        return;
    }
    let mut stdout = io::stdout();
    if acquired & ALT_SCREEN != 0 {
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
    if acquired & RAW_MODE != 0 {
        let _ = disable_raw_mode();
    }
    let _ = execute!(stdout, Show);
    let _ = stdout.flush();
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            release_terminal();
            crate::log_panic(info);
            previous(info);
        }));
    });
}
