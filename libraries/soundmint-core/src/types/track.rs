/// Track domain type
use crate::types::{Price, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A purchasable music item
///
/// Immutable once loaded from the catalog; the playback controller and the
/// storefront only ever read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Token identifier of the listing
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name (empty when the metadata does not carry one)
    #[serde(default)]
    pub artist: String,

    /// Location of the audio stream
    pub audio_url: String,

    /// Cover art location
    #[serde(default)]
    pub artwork_url: Option<String>,

    /// Listing price
    pub price: Price,

    /// Track length in seconds, when known ahead of playback
    #[serde(default)]
    pub duration_seconds: Option<f64>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        audio_url: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: String::new(),
            audio_url: audio_url.into(),
            artwork_url: None,
            price,
            duration_seconds: None,
        }
    }

    /// Set the artist name
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set the cover art location
    #[must_use]
    pub fn with_artwork(mut self, artwork_url: impl Into<String>) -> Self {
        self.artwork_url = Some(artwork_url.into());
        self
    }

    /// Set the known duration in seconds
    #[must_use]
    pub fn with_duration_seconds(mut self, seconds: f64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    /// Get the track duration as a Duration
    ///
    /// Negative, non-finite and out-of-range values read as unknown.
    pub fn duration(&self) -> Option<Duration> {
        self.duration_seconds
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}
