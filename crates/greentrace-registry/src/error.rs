//! Error types for the registry.

use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while documenting trees or moving tokens.
#[derive(Debug, Error)]
pub enum Error {
    /// Coordinates or threshold rejected by the network builder
    #[error(transparent)]
    Network(#[from] greentrace_network::Error),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record with this id is already stored
    #[error("Duplicate record: {0}")]
    DuplicateRecord(String),

    /// Redemption costs more than the account holds
    #[error("Insufficient balance: need {required}, have {available}")]
    InsufficientBalance { required: u64, available: u64 },

    /// The classifier could not name the tree
    #[error("Classification error: {0}")]
    Classification(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
