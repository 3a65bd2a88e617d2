/// Marketplace token records
use crate::types::{Price, TrackId};
use serde::{Deserialize, Serialize};

/// A token as the marketplace reports it, before its metadata is resolved
///
/// `uri` points at the metadata document without the `.json` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Token identifier
    pub id: TrackId,

    /// Price the token was bought or listed at
    pub price: Price,

    /// Metadata location
    pub uri: String,
}

impl TokenRecord {
    /// Create a token record
    pub fn new(id: impl Into<TrackId>, price: Price, uri: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            price,
            uri: uri.into(),
        }
    }
}
