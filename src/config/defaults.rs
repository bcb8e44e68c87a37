pub const DEFAULT_CONTEXT_PATH: &str = crate::context_store::DEFAULT_CONTEXT_PATH;
pub const DEFAULT_FDK_CMD: &str = "fdk";

/// Binaries accepted by name without a path lookup.
pub(super) const FDK_CMD_ALLOWLIST: &[&str] = &[DEFAULT_FDK_CMD];
