//! Error types for the Enigma machine library.

use thiserror::Error;

/// Errors produced by the Enigma machine library.
///
/// Every message quotes the offending value so a failure can be diagnosed
/// without re-running the machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// A component or machine was assembled from an illegal combination
    /// (malformed wiring, bad plugboard pairs, wrong rotor count,
    /// incompatible rotor or reflector).
    #[error("Invalid configuration. {0}")]
    InvalidConfiguration(String),
    /// A character outside the alphabet was supplied.
    #[error("Invalid input. {0}")]
    InvalidInput(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnigmaError>;

impl EnigmaError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        EnigmaError::InvalidConfiguration(message.into())
    }

    pub(crate) fn input(message: impl Into<String>) -> Self {
        EnigmaError::InvalidInput(message.into())
    }
}
