//! One selector run: load the document, pick a domain, persist the new active
//! context, and report what happened.
//!
//! Everything the run touches is threaded through as values. The document is
//! written at most once, and only after a confirmed selection.

use crate::context_store::{self, ConfigDocument, ContextStoreError};
use crate::domains::{extract_domains, resolve_context, ResolveError};
use crate::selector::{run_selection, CancelReason, SelectionOutcome, SelectorSurface};
use crate::{log_debug, log_debug_content};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Outcome handed to the `fdk` handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResult {
    /// The new active context has been written to disk.
    Selected {
        domain: String,
        context_key: String,
        active_env: String,
    },
    /// Nothing was written.
    Cancelled,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to load context document")]
    ConfigLoad(#[source] ContextStoreError),

    #[error("failed to save context document; the selection was not applied")]
    ConfigSave(#[source] ContextStoreError),

    #[error("failed to initialize terminal")]
    TerminalInit(#[source] io::Error),

    #[error("terminal error during selection")]
    Terminal(#[source] io::Error),

    #[error("selected domain does not map to a context")]
    Resolution(#[from] ResolveError),
}

/// Run the whole selection against the document at `path`.
///
/// The surface is only opened once the document has loaded, and it is closed
/// again before anything is written.
pub fn run_session<S, F>(path: &Path, open_surface: F) -> Result<SessionResult, SessionError>
where
    S: SelectorSurface,
    F: FnOnce() -> io::Result<S>,
{
    let document = context_store::load(path).map_err(SessionError::ConfigLoad)?;
    let options = extract_domains(&document.theme.contexts);
    tracing::info!(
        event = "config_loaded",
        contexts = document.theme.contexts.len(),
        options = options.len()
    );
    log_debug(&format!(
        "loaded {} contexts, {} domain options",
        document.theme.contexts.len(),
        options.len()
    ));

    let mut surface = open_surface().map_err(SessionError::TerminalInit)?;
    let outcome = run_selection(&mut surface, &options).map_err(SessionError::Terminal)?;
    drop(surface);

    match outcome {
        SelectionOutcome::Cancelled(reason) => {
            match &reason {
                CancelReason::User => log_debug("selection cancelled"),
                CancelReason::InputError(err) => {
                    log_debug(&format!("selection ended by input error: {err}"))
                }
            }
            tracing::info!(event = "selection_finished", confirmed = false);
            Ok(SessionResult::Cancelled)
        }
        SelectionOutcome::Confirmed { index, option } => {
            tracing::info!(event = "selection_finished", confirmed = true, index);
            commit_selection(path, document, &option)
        }
    }
}

/// Point the active context at `domain`'s first context and persist it.
///
/// The document is consumed: if the save fails the selection is dropped and
/// the caller has to start a new run.
pub fn commit_selection(
    path: &Path,
    mut document: ConfigDocument,
    domain: &str,
) -> Result<SessionResult, SessionError> {
    let key = resolve_context(&document.theme.contexts, domain)?.to_string();
    let active_env = document.theme.contexts[&key].env.clone();
    if !document.set_active_context(&key) {
        return Err(ResolveError::NotFound {
            domain: domain.to_string(),
        }
        .into());
    }
    log_debug_content(&format!("domain '{domain}' -> context '{key}' (env '{active_env}')"));

    context_store::save(path, &document).map_err(SessionError::ConfigSave)?;
    tracing::info!(event = "config_saved", path = %path.display());

    Ok(SessionResult::Selected {
        domain: domain.to_string(),
        context_key: key,
        active_env,
    })
}
