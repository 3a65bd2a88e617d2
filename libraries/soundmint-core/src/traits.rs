/// Collaborator traits for Soundmint
///
/// Both traits are injected explicitly into the storefront; nothing in the
/// workspace reaches for a global wallet or contract handle.
use crate::error::Result;
use crate::types::{Price, TokenRecord, Track, TrackId};
use async_trait::async_trait;

/// Source of unsold listings
///
/// Implementations either query a listing index plus per-token metadata, or
/// read a static JSON file.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every listed track in catalog order
    ///
    /// # Errors
    /// Returns `MarketError::CatalogLoad` when the listing itself cannot be
    /// fetched. Consumers are expected to degrade to an empty listing.
    async fn fetch_listings(&self) -> Result<Vec<Track>>;

    /// Resolve metadata for tokens reported by the marketplace
    ///
    /// Tokens whose metadata cannot be resolved are skipped; the result keeps
    /// the order of `tokens` and each track carries its token's price.
    async fn resolve_tokens(&self, tokens: Vec<TokenRecord>) -> Result<Vec<Track>>;
}

/// Marketplace contract operations
///
/// Calls are awaited once and never retried. The storefront reports failed
/// transactions as `MarketError::Purchase`.
#[async_trait]
pub trait Marketplace: Send + Sync {
    /// Buy a listed token, paying `price`
    async fn purchase(&self, track_id: &TrackId, price: Price) -> Result<()>;

    /// Relist an owned token at `price`, paying the royalty `fee`
    async fn resell(&self, track_id: &TrackId, price: Price, fee: Price) -> Result<()>;

    /// Royalty fee charged on resale
    async fn royalty_fee(&self) -> Result<Price>;

    /// Tokens held by the connected account
    async fn owned_tokens(&self) -> Result<Vec<TokenRecord>>;

    /// Tokens the connected account has relisted, oldest first
    async fn relisted_tokens(&self) -> Result<Vec<TokenRecord>>;

    /// Ids of the account's relisted tokens that have since been bought
    async fn sold_resales(&self) -> Result<Vec<TrackId>>;
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Box<T> {
    async fn fetch_listings(&self) -> Result<Vec<Track>> {
        (**self).fetch_listings().await
    }

    async fn resolve_tokens(&self, tokens: Vec<TokenRecord>) -> Result<Vec<Track>> {
        (**self).resolve_tokens(tokens).await
    }
}
