//! Handoff to the `fdk` CLI once a context has been chosen.

use crate::log_debug;
use crate::session::SessionResult;
use thiserror::Error;

/// Result type for a single `fdk` invocation.
pub type CommandResult = std::result::Result<(), String>;

/// The two external steps run after a selection.
pub trait EnvironmentActivator {
    fn set_environment(&mut self, name: &str) -> CommandResult;
    fn login(&mut self) -> CommandResult;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandoffError {
    #[error("failed to set environment '{env}': {reason}")]
    SetEnvironment { env: String, reason: String },

    #[error("failed to run fdk login: {0}")]
    Login(String),
}

/// Activate the selected environment, then log in.
///
/// A cancelled session runs nothing. A failed env step stops before login.
pub fn hand_off<A: EnvironmentActivator + ?Sized>(
    result: &SessionResult,
    activator: &mut A,
    login: bool,
) -> Result<(), HandoffError> {
    let SessionResult::Selected { active_env, .. } = result else {
        return Ok(());
    };

    tracing::info!(event = "set_environment", env = %active_env);
    activator
        .set_environment(active_env)
        .map_err(|reason| HandoffError::SetEnvironment {
            env: active_env.clone(),
            reason,
        })?;

    if !login {
        log_debug("login skipped by flag");
        return Ok(());
    }
    tracing::info!(event = "login");
    activator.login().map_err(HandoffError::Login)
}

/// Runs the real `fdk` binary attached to the controlling TTY.
#[derive(Debug, Clone)]
pub struct FdkCli {
    command: String,
}

impl FdkCli {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl EnvironmentActivator for FdkCli {
    fn set_environment(&mut self, name: &str) -> CommandResult {
        run_tty_command(&self.command, &["env", "set", "-n", name])
    }

    fn login(&mut self) -> CommandResult {
        run_tty_command(&self.command, &["login"])
    }
}

/// Run `<command> <args..>` using the controlling TTY so the CLI can prompt the user.
fn run_tty_command(command: &str, args: &[&str]) -> CommandResult {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return Err("fdk command is empty".to_string());
    }
    let label = format!("{trimmed} {}", args.join(" "));
    log_debug(&format!("running {label}"));

    #[cfg(unix)]
    {
        use std::fs::OpenOptions;
        use std::process::{Command, Stdio};

        let tty = OpenOptions::new()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .map_err(|err| format!("failed to open /dev/tty: {err}"))?;
        let tty_in = tty
            .try_clone()
            .map_err(|err| format!("failed to clone tty for stdin: {err}"))?;
        let tty_out = tty
            .try_clone()
            .map_err(|err| format!("failed to clone tty for stdout: {err}"))?;
        let tty_err = tty;

        let status = Command::new(trimmed)
            .args(args)
            .stdin(Stdio::from(tty_in))
            .stdout(Stdio::from(tty_out))
            .stderr(Stdio::from(tty_err))
            .status()
            .map_err(|err| format!("failed to spawn {label}: {err}"))?;

        if status.success() {
            Ok(())
        } else {
            let code = status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            Err(format!("{label} exited with code {code}"))
        }
    }

    #[cfg(not(unix))]
    {
        use std::process::Command;

        let status = Command::new(trimmed)
            .args(args)
            .status()
            .map_err(|err| format!("failed to spawn {label}: {err}"))?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("{label} exited with {status}"))
        }
    }
}
