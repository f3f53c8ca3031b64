//! Error types at the resolver boundary.

use thiserror::Error;

/// Failure modes of a single resolution request.
///
/// An empty cascade result is not an error: all answer levels are
/// simply omitted.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Unparseable or out-of-range input; reported to the caller as a
    /// client error.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A geo index query failed, after the optional single resend.
    /// Scoped to the request; never fatal to the process.
    #[error("index query failed: {0}")]
    IndexUnavailable(#[from] anyhow::Error),
}
