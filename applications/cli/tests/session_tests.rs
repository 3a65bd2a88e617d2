/// Headless playback session tests
///
/// The tokio clock is paused, so interval ticks resolve instantly.
use soundmint_cli::session::{self, SessionSettings};
use soundmint_cli::{config::CatalogSettings, CliError, OfflineMarketplace};
use soundmint_core::{CatalogSource, Marketplace, Price, Track, TrackId};
use soundmint_market::{Storefront, StorefrontStatus};
use soundmint_playback::{PlaybackConfig, PlaybackController, RepeatMode, Renderer};
use std::io::Write;
use std::time::Duration;

fn track(id: &str, seconds: Option<f64>) -> Track {
    let track = Track::new(
        TrackId::new(id),
        format!("Track {}", id),
        format!("https://cdn.example/{}.mp3", id),
        Price::parse_major("0.1").unwrap(),
    );
    match seconds {
        Some(seconds) => track.with_duration_seconds(seconds),
        None => track,
    }
}

fn settings(max_tracks: Option<usize>) -> SessionSettings {
    SessionSettings {
        tick: Duration::from_millis(250),
        step: Duration::from_secs(1),
        max_tracks,
    }
}

fn controller(
    tracks: Vec<Track>,
    repeat: RepeatMode,
) -> PlaybackController<soundmint_playback::VirtualRenderer> {
    let renderer = session::renderer_for(&tracks);
    let config = PlaybackConfig {
        repeat,
        shuffle_seed: Some(1),
        ..PlaybackConfig::default()
    };
    let mut controller = PlaybackController::new(renderer, config);
    controller.load_playlist(tracks).unwrap();
    controller.toggle_play().unwrap();
    controller
}

#[test]
fn test_renderer_uses_catalog_durations() {
    let tracks = vec![track("a", Some(3.0)), track("b", None)];
    let mut renderer = session::renderer_for(&tracks);

    renderer.load("https://cdn.example/a.mp3").unwrap();
    assert_eq!(renderer.duration(), Some(3.0));

    renderer.load("https://cdn.example/b.mp3").unwrap();
    assert_eq!(renderer.duration(), Some(session::FALLBACK_TRACK_SECONDS));
}

#[test]
fn test_out_of_range_duration_uses_fallback() {
    let tracks = vec![track("a", Some(1e30))];
    let mut renderer = session::renderer_for(&tracks);

    renderer.load("https://cdn.example/a.mp3").unwrap();
    assert_eq!(renderer.duration(), Some(session::FALLBACK_TRACK_SECONDS));
}

#[test]
fn test_session_settings_scale_by_speed() {
    let playback = soundmint_cli::config::PlaybackSettings {
        tick_ms: 200,
        speed: 5.0,
        ..Default::default()
    };
    let settings = SessionSettings::from_playback(&playback, Some(2));
    assert_eq!(settings.tick, Duration::from_millis(200));
    assert_eq!(settings.step, Duration::from_secs(1));
    assert_eq!(settings.max_tracks, Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_plays_through_playlist_and_stops() {
    let mut controller = controller(
        vec![track("a", Some(2.0)), track("b", Some(3.0)), track("c", Some(1.0))],
        RepeatMode::Off,
    );

    let summary = session::run(&mut controller, settings(None)).await;

    assert_eq!(summary.tracks_started, 3);
    assert!(summary.finished);
    assert_eq!(controller.snapshot().current_index, Some(2));
    assert!(!controller.is_playing());
}

#[tokio::test(start_paused = true)]
async fn test_track_limit_pauses_playback() {
    let mut controller = controller(
        vec![track("a", Some(2.0)), track("b", Some(2.0)), track("c", Some(2.0))],
        RepeatMode::Playlist,
    );

    let summary = session::run(&mut controller, settings(Some(4))).await;

    assert_eq!(summary.tracks_started, 4);
    assert!(!summary.finished);
    assert!(!controller.is_playing());
    assert!(!controller.renderer().is_playing());
}

#[tokio::test(start_paused = true)]
async fn test_renderer_failure_ends_session() {
    let tracks = vec![track("a", Some(1.0)), track("b", Some(1.0))];
    let mut renderer = session::renderer_for(&tracks);
    renderer.fail_url("https://cdn.example/b.mp3");

    let mut controller = PlaybackController::new(renderer, PlaybackConfig::default());
    controller.load_playlist(tracks).unwrap();
    controller.toggle_play().unwrap();

    let summary = session::run(&mut controller, settings(None)).await;

    assert!(summary.finished);
    assert_eq!(summary.tracks_started, 2);
    assert_eq!(controller.snapshot().current_index, Some(1));
    assert!(!controller.is_playing());
}

#[tokio::test]
async fn test_offline_marketplace_refuses_transactions() {
    let market = OfflineMarketplace;
    assert!(market.purchase(&TrackId::new("1"), Price::ZERO).await.is_err());
    assert!(market.royalty_fee().await.is_err());
    assert!(market.owned_tokens().await.is_err());
}

#[tokio::test]
async fn test_static_catalog_from_settings() {
    let tracks = vec![track("a", Some(10.0))];
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&tracks).unwrap().as_bytes())
        .unwrap();

    let settings = CatalogSettings {
        static_path: Some(file.path().to_path_buf()),
        ..CatalogSettings::default()
    };
    let catalog = session::build_catalog(&settings).unwrap();
    assert_eq!(catalog.fetch_listings().await.unwrap(), tracks);

    let mut storefront = Storefront::new(catalog, OfflineMarketplace);
    storefront.refresh().await;
    assert_eq!(storefront.status(), StorefrontStatus::Ready);
    assert!(storefront.purchase(&TrackId::new("a")).await.is_err());
}

#[test]
fn test_build_catalog_requires_one_source() {
    let result = session::build_catalog(&CatalogSettings::default());
    assert!(matches!(result, Err(CliError::Config(_))));
}
