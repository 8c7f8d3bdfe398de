//! Errors

use thiserror::Error;

/// General error class for any errors possible from the sampler
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmceeError {
    /// Invalid parameters were given, e.g. too few walkers, zero iterations or
    /// mismatched dimensions
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A log probability evaluated to a value that cannot be sampled from,
    /// e.g. NaN for an initial walker position
    #[error("degenerate numeric value: {0}")]
    NumericDegenerate(String),
}

impl EmceeError {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> EmceeError {
        EmceeError::InvalidArgument(msg.into())
    }
}

/// Result alias which wraps [`EmceeError`]
pub type Result<T> = ::std::result::Result<T, EmceeError>;
