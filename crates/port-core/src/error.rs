//! Configuration and distribution errors.
//!
//! Sub-crates define their own error enums and wrap `PortError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `port-core`.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid {what} distribution: {reason}")]
    Distribution {
        what:   &'static str,
        reason: String,
    },
}

/// Shorthand result type for `port-core`.
pub type PortResult<T> = Result<T, PortError>;
