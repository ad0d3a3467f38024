//! Audit error types.
//!
//! Loaders return `anyhow::Result` with file context attached; the variants
//! here are raised inside those results so callers can downcast and tell a
//! structurally wrong document apart from an I/O failure.

use thiserror::Error;

/// Errors raised while loading a catalog or configuration.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The catalog document's top level is not a name → collection mapping.
    #[error("catalog must be an object keyed by collection name, found {0}")]
    NotAMapping(&'static str),

    /// The configuration would break a generator or classifier guarantee.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
