//! Domain options derived from the context set, and the reverse lookup from a
//! chosen domain back to a context key.
//!
//! Several contexts may share a domain. Both directions walk the set in its
//! key order, so the option order and the winning key are stable across runs.

use crate::context_store::ContextSet;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no context has domain '{domain}'")]
    NotFound { domain: String },
}

/// Distinct domains in first-seen order.
pub fn extract_domains(contexts: &ContextSet) -> Vec<String> {
    let mut seen = HashSet::new();
    contexts
        .values()
        .filter(|entry| seen.insert(entry.domain.as_str()))
        .map(|entry| entry.domain.clone())
        .collect()
}

/// Key of the first context whose domain is `domain`.
pub fn resolve_context<'a>(
    contexts: &'a ContextSet,
    domain: &str,
) -> Result<&'a str, ResolveError> {
    contexts
        .iter()
        .find(|(_, entry)| entry.domain == domain)
        .map(|(key, _)| key.as_str())
        .ok_or_else(|| ResolveError::NotFound {
            domain: domain.to_string(),
        })
}
