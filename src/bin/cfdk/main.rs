//! cfdk entrypoint: pick an FDK context domain, persist it, then hand off to
//! `fdk env set` and `fdk login`.

mod cli_utils;

use anyhow::Result;
use cfdk::config::AppConfig;
use cfdk::fdk::{hand_off, FdkCli};
use cfdk::selector::TerminalSurface;
use cfdk::{init_logging, init_tracing, log_debug, log_file_path, run_session, SessionResult};

use crate::cli_utils::{format_selection_summary, list_contexts};

fn main() -> Result<()> {
    let config = AppConfig::parse_args()?;
    init_logging(&config);
    init_tracing(&config);
    log_debug("=== cfdk started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));

    if config.list_contexts {
        return list_contexts(&config.config_path);
    }

    let color = config.color_enabled();
    let result = run_session(&config.config_path, || TerminalSurface::open(color))?;

    match &result {
        SessionResult::Selected {
            domain, active_env, ..
        } => {
            println!("{}", format_selection_summary(domain, color));
            println!("{active_env}");
        }
        SessionResult::Cancelled => log_debug("no selection made; skipping fdk handoff"),
    }

    let mut fdk = FdkCli::new(config.fdk_cmd.clone());
    hand_off(&result, &mut fdk, !config.skip_login)?;
    log_debug("=== cfdk finished ===");
    Ok(())
}
