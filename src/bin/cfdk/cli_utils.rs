use anyhow::{Context, Result};
use cfdk::context_store::{self, ConfigDocument};
use cfdk::domains::extract_domains;
use std::path::Path;

const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

pub(crate) fn format_selection_summary(domain: &str, color: bool) -> String {
    if color {
        format!("You selected: {GREEN}{domain}{RESET}")
    } else {
        format!("You selected: {domain}")
    }
}

pub(crate) fn list_contexts(path: &Path) -> Result<()> {
    let document = context_store::load(path)
        .with_context(|| format!("cannot list contexts from {}", path.display()))?;
    print!("{}", format_context_listing(&document));
    Ok(())
}

/// One row per domain option, in picker order. `*` marks the domain of the
/// active context; the first key is the one a selection would activate.
pub(crate) fn format_context_listing(document: &ConfigDocument) -> String {
    let contexts = &document.theme.contexts;
    let domains = extract_domains(contexts);
    if domains.is_empty() {
        return "No contexts found.\n".to_string();
    }

    let active_domain = document
        .active_context()
        .map(|(_, entry)| entry.domain.as_str());
    let width = domains.iter().map(|d| display_domain(d).len()).max().unwrap_or(0);

    let mut out = String::new();
    for domain in &domains {
        let keys: Vec<&str> = contexts
            .iter()
            .filter(|(_, entry)| &entry.domain == domain)
            .map(|(key, _)| key.as_str())
            .collect();
        let marker = if active_domain == Some(domain.as_str()) {
            '*'
        } else {
            ' '
        };
        let shown = display_domain(domain);
        out.push_str(&format!("{marker} {shown:<width$}  {}", keys[0]));
        if keys.len() > 1 {
            out.push_str(&format!(" (also: {})", keys[1..].join(", ")));
        }
        out.push('\n');
    }
    out
}

fn display_domain(domain: &str) -> &str {
    if domain.is_empty() {
        "(empty)"
    } else {
        domain
    }
}
