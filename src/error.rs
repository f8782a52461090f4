//! Crate-level error types.
//!
//! [`StripError`] unifies every error source (configuration, terminal
//! setup) behind a single enum so callers can match on the variant they
//! care about while still using the `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StripError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum StripError {
    /// A configuration value could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal setup, drawing, or restore failed.
    #[error("terminal error: {0}")]
    Terminal(String),
}
