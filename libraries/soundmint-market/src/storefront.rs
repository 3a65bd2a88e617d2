//! Storefront - listings plus purchase and resale flows.

use soundmint_core::{CatalogSource, MarketError, Marketplace, Price, Result, Track, TrackId};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// What the listing page should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorefrontStatus {
    /// No refresh has completed yet
    Loading,
    /// At least one track is listed
    Ready,
    /// Nothing listed (or the catalog failed to load)
    Empty,
}

/// The connected account's resales
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resales {
    /// Every token the account has relisted, sold or not
    pub listed: Vec<Track>,
    /// The relisted tokens that have been bought
    pub sold: Vec<Track>,
}

/// Marketplace front for one catalog and one marketplace contract.
///
/// Both collaborators are injected; the storefront never retries a failed
/// call. A catalog failure degrades to an empty listing and is kept in
/// [`Storefront::last_error`] until the next successful refresh.
pub struct Storefront<C, M> {
    catalog: C,
    marketplace: M,
    listings: Option<Vec<Track>>,
    last_error: Option<String>,
}

impl<C: CatalogSource, M: Marketplace> Storefront<C, M> {
    pub fn new(catalog: C, marketplace: M) -> Self {
        Self {
            catalog,
            marketplace,
            listings: None,
            last_error: None,
        }
    }

    /// Re-fetch the catalog, falling back to an empty listing on failure
    pub async fn refresh(&mut self) -> &[Track] {
        match self.catalog.fetch_listings().await {
            Ok(tracks) => {
                info!(count = tracks.len(), "Listings refreshed");
                self.last_error = None;
                self.listings = Some(tracks);
            }
            Err(e) => {
                warn!(error = %e, "Catalog unavailable, showing no listings");
                self.last_error = Some(e.to_string());
                self.listings = Some(Vec::new());
            }
        }
        self.listings()
    }

    /// Current listings (empty before the first refresh)
    pub fn listings(&self) -> &[Track] {
        self.listings.as_deref().unwrap_or_default()
    }

    pub fn status(&self) -> StorefrontStatus {
        match &self.listings {
            None => StorefrontStatus::Loading,
            Some(tracks) if tracks.is_empty() => StorefrontStatus::Empty,
            Some(_) => StorefrontStatus::Ready,
        }
    }

    /// Error from the most recent failed refresh
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn find(&self, track_id: &TrackId) -> Option<&Track> {
        self.listings().iter().find(|track| &track.id == track_id)
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn marketplace(&self) -> &M {
        &self.marketplace
    }

    /// Tokens owned by the connected account, with resolved metadata
    pub async fn my_tokens(&self) -> Result<Vec<Track>> {
        let tokens = self.marketplace.owned_tokens().await?;
        debug!(count = tokens.len(), "Resolving owned tokens");
        self.catalog.resolve_tokens(tokens).await
    }

    /// The account's relisted tokens, with the bought ones split out
    pub async fn my_resales(&self) -> Result<Resales> {
        let relisted = self.marketplace.relisted_tokens().await?;
        let listed = self.catalog.resolve_tokens(relisted).await?;

        let sold_ids: HashSet<TrackId> =
            self.marketplace.sold_resales().await?.into_iter().collect();
        let sold: Vec<Track> = listed
            .iter()
            .filter(|track| sold_ids.contains(&track.id))
            .cloned()
            .collect();

        info!(listed = listed.len(), sold = sold.len(), "Resales loaded");
        Ok(Resales { listed, sold })
    }

    /// Buy a listed track at its listing price
    ///
    /// Listings are re-fetched only when the purchase succeeds.
    pub async fn purchase(&mut self, track_id: &TrackId) -> Result<()> {
        let price = self
            .find(track_id)
            .map(|track| track.price)
            .ok_or_else(|| MarketError::TrackNotFound(track_id.clone()))?;

        debug!(token = %track_id, price = %price, "Purchasing");
        self.marketplace
            .purchase(track_id, price)
            .await
            .map_err(into_purchase_error)?;

        info!(token = %track_id, "Purchase confirmed");
        self.refresh().await;
        Ok(())
    }

    /// Relist an owned track at a user-entered price
    ///
    /// The price is validated before anything is sent to the marketplace.
    pub async fn resell(&mut self, track_id: &TrackId, price_input: &str) -> Result<()> {
        let price = Price::parse_listing(price_input)?;

        let fee = self
            .marketplace
            .royalty_fee()
            .await
            .map_err(into_purchase_error)?;

        debug!(token = %track_id, price = %price, fee = %fee, "Relisting");
        self.marketplace
            .resell(track_id, price, fee)
            .await
            .map_err(into_purchase_error)?;

        info!(token = %track_id, price = %price, "Resale listed");
        self.refresh().await;
        Ok(())
    }
}

/// Marketplace failures surface as `Purchase` errors
fn into_purchase_error(error: MarketError) -> MarketError {
    match error {
        MarketError::Purchase(_) => error,
        other => MarketError::purchase(other.to_string()),
    }
}
