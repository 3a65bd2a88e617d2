//! Catalog wiring and the headless playback loop.

use crate::config::{CatalogSettings, PlaybackSettings};
use crate::error::{CliError, Result};
use async_trait::async_trait;
use soundmint_core::{
    CatalogSource, MarketError, Marketplace, Price, TokenRecord, Track, TrackId,
};
use soundmint_market::{HttpCatalog, StaticCatalog};
use soundmint_playback::{PlaybackController, PlaybackEvent, VirtualRenderer};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Length assumed for tracks whose metadata has no duration
pub const FALLBACK_TRACK_SECONDS: f64 = 180.0;

/// Build the catalog source selected by the configuration
pub fn build_catalog(settings: &CatalogSettings) -> Result<Box<dyn CatalogSource>> {
    match (&settings.listings_url, &settings.static_path) {
        (Some(url), None) => {
            info!(url = %url, "Using HTTP catalog");
            let catalog =
                HttpCatalog::with_timeout(url, Duration::from_secs(settings.timeout_secs))?;
            Ok(Box::new(catalog))
        }
        (None, Some(path)) => {
            info!(path = %path.display(), "Using static catalog");
            Ok(Box::new(StaticCatalog::new(path)))
        }
        _ => Err(CliError::Config(
            "exactly one catalog source must be configured".to_string(),
        )),
    }
}

/// Marketplace used when no wallet is connected
///
/// Browsing works; every transaction is refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineMarketplace;

fn no_wallet() -> MarketError {
    MarketError::purchase("no wallet connected")
}

#[async_trait]
impl Marketplace for OfflineMarketplace {
    async fn purchase(&self, _track_id: &TrackId, _price: Price) -> soundmint_core::Result<()> {
        Err(no_wallet())
    }

    async fn resell(
        &self,
        _track_id: &TrackId,
        _price: Price,
        _fee: Price,
    ) -> soundmint_core::Result<()> {
        Err(no_wallet())
    }

    async fn royalty_fee(&self) -> soundmint_core::Result<Price> {
        Err(no_wallet())
    }

    async fn owned_tokens(&self) -> soundmint_core::Result<Vec<TokenRecord>> {
        Err(no_wallet())
    }

    async fn relisted_tokens(&self) -> soundmint_core::Result<Vec<TokenRecord>> {
        Err(no_wallet())
    }

    async fn sold_resales(&self) -> soundmint_core::Result<Vec<TrackId>> {
        Err(no_wallet())
    }
}

/// Virtual renderer that knows the catalog durations
pub fn renderer_for(tracks: &[Track]) -> VirtualRenderer {
    tracks
        .iter()
        .fold(VirtualRenderer::new(FALLBACK_TRACK_SECONDS), |renderer, track| {
            match track.duration() {
                Some(duration) if !duration.is_zero() => {
                    renderer.with_duration(track.audio_url.clone(), duration.as_secs_f64())
                }
                _ => renderer,
            }
        })
}

/// Virtual clock settings for a session
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Wall-clock interval between renderer updates
    pub tick: Duration,

    /// Playback time advanced per tick
    pub step: Duration,

    /// Stop once this many tracks have been started
    pub max_tracks: Option<usize>,
}

impl SessionSettings {
    pub fn from_playback(settings: &PlaybackSettings, max_tracks: Option<usize>) -> Self {
        let tick = Duration::from_millis(settings.tick_ms);
        Self {
            tick,
            step: tick.mul_f64(settings.speed),
            max_tracks,
        }
    }
}

/// Outcome of a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub tracks_started: usize,

    /// Playback stopped by itself (end of playlist or renderer failure)
    pub finished: bool,
}

/// Drive `controller` on a virtual clock until playback stops
///
/// Events queued before the call (e.g. by `load_playlist`) are logged and
/// counted too.
pub async fn run(
    controller: &mut PlaybackController<VirtualRenderer>,
    settings: SessionSettings,
) -> SessionSummary {
    let mut interval = tokio::time::interval(settings.tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut tracks_started = 0;

    loop {
        for event in controller.drain_events() {
            if matches!(event, PlaybackEvent::TrackChanged { .. }) {
                tracks_started += 1;
            }
            log_event(&event);
        }

        if settings
            .max_tracks
            .is_some_and(|max| tracks_started > max)
        {
            info!("Track limit reached");
            if controller.is_playing() {
                // Pausing a loaded track cannot fail
                let _ = controller.toggle_play();
            }
            return SessionSummary {
                tracks_started: tracks_started - 1,
                finished: false,
            };
        }

        if !controller.is_playing() {
            return SessionSummary {
                tracks_started,
                finished: true,
            };
        }

        interval.tick().await;
        controller.renderer_mut().advance(settings.step);
        if let Err(e) = controller.pump_renderer_notifications() {
            warn!(error = %e, "Playback stopped");
        }
    }
}

fn log_event(event: &PlaybackEvent) {
    match event {
        PlaybackEvent::TrackChanged {
            index, track_id, ..
        } => info!(index, token = %track_id, "Now playing"),
        PlaybackEvent::StateChanged { is_playing } => {
            debug!(is_playing, "Playback state changed");
        }
        PlaybackEvent::PositionUpdate {
            position_seconds,
            duration_seconds,
            progress_percent,
        } => debug!(
            "{:.1}s / {:.1}s ({:.0}%)",
            position_seconds, duration_seconds, progress_percent
        ),
        PlaybackEvent::PlaylistLoaded { length } => info!(length, "Playlist loaded"),
        PlaybackEvent::Error { message } => warn!("{}", message),
        other => debug!(?other, "Playback event"),
    }
}
