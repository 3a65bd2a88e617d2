//! Catalog sources for unsold listings.

use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use soundmint_core::{CatalogSource, MarketError, Price, Result, TokenRecord, Track, TrackId};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Default request timeout for catalog fetches
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One entry of the listing index
#[derive(Debug, Clone, Deserialize)]
struct ListingRecord {
    token_id: TokenId,
    price: Price,
    uri: String,
}

/// Token ids arrive as JSON numbers or strings depending on the indexer
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TokenId {
    Number(u64),
    Text(String),
}

impl From<TokenId> for TrackId {
    fn from(raw: TokenId) -> Self {
        match raw {
            TokenId::Number(n) => TrackId::from(n),
            TokenId::Text(s) => TrackId::new(s),
        }
    }
}

impl From<ListingRecord> for TokenRecord {
    fn from(listing: ListingRecord) -> Self {
        TokenRecord::new(listing.token_id, listing.price, listing.uri)
    }
}

/// Per-token metadata document (`<uri>.json`)
#[derive(Debug, Clone, Deserialize)]
struct TokenMetadata {
    name: String,
    audio: String,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

/// Catalog backed by an HTTP listing index plus per-token metadata.
///
/// The index at `listings_url` is a JSON array of
/// `{ "token_id", "price", "uri" }`. Each listing's metadata lives at
/// `<uri>.json`; relative URIs resolve against the index URL.
///
/// # Example
///
/// ```ignore
/// use soundmint_market::HttpCatalog;
/// use soundmint_core::CatalogSource;
///
/// let catalog = HttpCatalog::new("https://market.example/listings")?;
/// let tracks = catalog.fetch_listings().await?;
/// println!("{} tracks for sale", tracks.len());
/// ```
pub struct HttpCatalog {
    http: Client,
    listings_url: Url,
}

impl HttpCatalog {
    /// Create a catalog client with the default timeout.
    pub fn new(listings_url: &str) -> Result<Self> {
        Self::with_timeout(listings_url, DEFAULT_TIMEOUT)
    }

    /// Create a catalog client with an explicit request timeout.
    pub fn with_timeout(listings_url: &str, timeout: Duration) -> Result<Self> {
        let listings_url = Url::parse(listings_url.trim()).map_err(|e| {
            MarketError::invalid_input(format!("invalid listings URL {}: {}", listings_url, e))
        })?;

        if !matches!(listings_url.scheme(), "http" | "https") {
            return Err(MarketError::invalid_input(
                "listings URL must start with http:// or https://",
            ));
        }

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Soundmint/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MarketError::network(e.to_string()))?;

        Ok(Self { http, listings_url })
    }

    async fn fetch_index(&self) -> Result<Vec<ListingRecord>> {
        debug!(url = %self.listings_url, "Fetching listing index");

        let response = self
            .http
            .get(self.listings_url.clone())
            .send()
            .await
            .map_err(|e| MarketError::catalog(format!("listing index unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(MarketError::catalog(format!(
                "listing index returned {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| MarketError::catalog(format!("Failed to parse listing index: {}", e)))
    }

    async fn fetch_track(&self, token: TokenRecord) -> Result<Track> {
        let metadata_url = self
            .listings_url
            .join(&format!("{}.json", token.uri))
            .map_err(|e| MarketError::invalid_input(format!("bad token URI {}: {}", token.uri, e)))?;

        debug!(url = %metadata_url, "Fetching token metadata");

        let response = self
            .http
            .get(metadata_url.clone())
            .send()
            .await
            .map_err(|e| MarketError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::network(format!(
                "{} returned {}",
                metadata_url,
                status.as_u16()
            )));
        }

        let metadata: TokenMetadata = response.json().await.map_err(|e| {
            MarketError::network(format!("Failed to parse metadata {}: {}", metadata_url, e))
        })?;

        let mut track = Track::new(token.id, metadata.name, metadata.audio, token.price);
        if let Some(artist) = metadata.artist {
            track = track.with_artist(artist);
        }
        if let Some(image) = metadata.image {
            track = track.with_artwork(image);
        }
        if let Some(duration) = metadata.duration {
            track = track.with_duration_seconds(duration);
        }
        Ok(track)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_listings(&self) -> Result<Vec<Track>> {
        let listings = self.fetch_index().await?;
        let total = listings.len();

        let tracks = self
            .resolve_tokens(listings.into_iter().map(TokenRecord::from).collect())
            .await?;

        info!(listed = total, loaded = tracks.len(), "Catalog loaded");
        Ok(tracks)
    }

    async fn resolve_tokens(&self, tokens: Vec<TokenRecord>) -> Result<Vec<Track>> {
        let total = tokens.len();

        let results = join_all(tokens.into_iter().map(|token| async move {
            let id = token.id.clone();
            self.fetch_track(token).await.map_err(|e| (id, e))
        }))
        .await;

        let mut tracks = Vec::with_capacity(total);
        for result in results {
            match result {
                Ok(track) => tracks.push(track),
                Err((token, e)) => warn!(token = %token, error = %e, "Skipping token"),
            }
        }

        debug!(requested = total, resolved = tracks.len(), "Token metadata resolved");
        Ok(tracks)
    }
}

/// Catalog read from a JSON file of full track records.
pub struct StaticCatalog {
    path: PathBuf,
}

impl StaticCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_tracks(&self) -> Result<Vec<Track>> {
        debug!(path = %self.path.display(), "Reading static catalog");

        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            MarketError::catalog(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            MarketError::catalog(format!("cannot parse {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_listings(&self) -> Result<Vec<Track>> {
        let tracks = self.read_tracks().await?;
        info!(loaded = tracks.len(), "Static catalog loaded");
        Ok(tracks)
    }

    /// Tokens resolve against the file's records by id; the token's price wins
    async fn resolve_tokens(&self, tokens: Vec<TokenRecord>) -> Result<Vec<Track>> {
        let known = self.read_tracks().await?;

        Ok(tokens
            .into_iter()
            .filter_map(|token| {
                let Some(track) = known.iter().find(|track| track.id == token.id) else {
                    warn!(token = %token.id, "Skipping token missing from static catalog");
                    return None;
                };
                Some(Track {
                    price: token.price,
                    ..track.clone()
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            HttpCatalog::new("ftp://market.example/listings"),
            Err(MarketError::InvalidInput(_))
        ));
        assert!(matches!(
            HttpCatalog::new("not a url"),
            Err(MarketError::InvalidInput(_))
        ));
    }

    #[test]
    fn token_ids_accept_numbers_and_strings() {
        let records: Vec<ListingRecord> = serde_json::from_str(
            r#"[
                {"token_id": 4, "price": "1000", "uri": "meta/4"},
                {"token_id": "0x05", "price": 2000, "uri": "meta/5"}
            ]"#,
        )
        .unwrap();

        assert_eq!(TrackId::from(records[0].token_id.clone()).as_str(), "4");
        assert_eq!(TrackId::from(records[1].token_id.clone()).as_str(), "0x05");
        assert_eq!(records[1].price, Price::from_minor(2000));
    }

    #[test]
    fn metadata_optional_fields_default() {
        let metadata: TokenMetadata =
            serde_json::from_str(r#"{"name": "Echoes", "audio": "https://cdn/e.mp3"}"#).unwrap();
        assert!(metadata.artist.is_none());
        assert!(metadata.image.is_none());
        assert!(metadata.duration.is_none());
    }
}
