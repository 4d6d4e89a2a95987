//! Error types for greentrace-network.

use thiserror::Error;

/// Result type for network operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Caller contract violations rejected by the network builder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Connection threshold was negative or not a finite number.
    #[error("invalid connection threshold: {0}")]
    InvalidThreshold(f64),

    /// Coordinates were non-finite or outside the valid degree range.
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}
