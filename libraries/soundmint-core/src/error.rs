/// Core error types for Soundmint
use crate::types::TrackId;
use thiserror::Error;

/// Result type alias using `MarketError`
pub type Result<T> = std::result::Result<T, MarketError>;

/// Core error type for catalog and marketplace operations
///
/// None of these are fatal: every variant is scoped to the user action that
/// produced it.
#[derive(Error, Debug)]
pub enum MarketError {
    /// Catalog could not be loaded (callers fall back to an empty listing)
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    /// On-chain purchase or resale was rejected or reverted
    #[error("Purchase error: {0}")]
    Purchase(String),

    /// User input rejected before dispatch (e.g. resale price)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Track is not part of the current listing
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),
}

impl MarketError {
    /// Create a catalog load error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::CatalogLoad(msg.into())
    }

    /// Create a purchase error
    pub fn purchase(msg: impl Into<String>) -> Self {
        Self::Purchase(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}
