//! Persisted FDK context document.
//!
//! The document lives at `.fdk/context.json` and is shared with other FDK
//! tooling, so everything this crate does not model (the `partners` block and
//! any unknown keys) is carried through untouched on save.

mod document;
#[cfg(test)]
mod tests;

use std::fs::{self, File, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use document::{ConfigDocument, ContextEntry, ContextSet, ThemeSection};

/// Well-known location of the context document, relative to the project root.
pub const DEFAULT_CONTEXT_PATH: &str = ".fdk/context.json";

#[derive(Debug, Error)]
pub enum ContextStoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize context document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Read and parse the whole document. Any failure is fatal for the run.
pub fn load(path: &Path) -> Result<ConfigDocument, ContextStoreError> {
    let bytes = fs::read(path).map_err(|source| ContextStoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ContextStoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `document` and atomically replace `path` with it.
///
/// The bytes go to [`staging_path`] first, are synced, then renamed over the
/// target, so a crash mid-write leaves either the old or the new file. An
/// existing target's permissions carry over to the replacement.
pub fn save(path: &Path, document: &ConfigDocument) -> Result<(), ContextStoreError> {
    let mut bytes = serde_json::to_vec_pretty(document).map_err(ContextStoreError::Serialize)?;
    bytes.push(b'\n');

    let permissions = fs::metadata(path).ok().map(|meta| meta.permissions());
    let tmp = staging_path(path);
    let staged =
        write_synced(&tmp, &bytes, permissions).map_err(|source| ContextStoreError::Write {
            path: tmp.clone(),
            source,
        });
    if let Err(err) = staged {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        ContextStoreError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Sibling temp file used while saving `path`.
pub fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("context.json");
    let tmp_name = format!(".{name}.tmp-{}", std::process::id());
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

fn write_synced(path: &Path, bytes: &[u8], permissions: Option<Permissions>) -> io::Result<()> {
    let mut file = File::create(path)?;
    if let Some(permissions) = permissions {
        file.set_permissions(permissions)?;
    }
    file.write_all(bytes)?;
    file.sync_all()
}
