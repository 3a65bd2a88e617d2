//! Soundmint - Playback Queue Controller
//!
//! Renderer-agnostic playback control for the Soundmint marketplace.
//!
//! This crate provides:
//! - Playlist with canonical and shuffled order over the same track set
//! - Next/previous with wraparound, direct selection
//! - Repeat modes (Off, Playlist, One) applied when a track ends
//! - Volume (0-100%, linear gain) and seek (fraction or seconds)
//! - Progress sync from renderer notifications
//! - Event queue for UI synchronization
//!
//! # Architecture
//!
//! The controller does not decode or output audio. It drives a single
//! [`Renderer`] handle: a browser audio element behind a binding, or the
//! clock-driven [`VirtualRenderer`] used by the CLI and tests. Renderer
//! notifications arrive over a channel and are dispatched by
//! [`PlaybackController::pump_renderer_notifications`].
//!
//! # Example
//!
//! ```rust
//! use soundmint_core::{Price, Track, TrackId};
//! use soundmint_playback::{PlaybackConfig, PlaybackController, RepeatMode, VirtualRenderer};
//! use std::time::Duration;
//!
//! let tracks = vec![
//!     Track::new(TrackId::new("1"), "Intro", "https://cdn.example/1.mp3", Price::ZERO),
//!     Track::new(TrackId::new("2"), "Outro", "https://cdn.example/2.mp3", Price::ZERO),
//! ];
//!
//! let renderer = VirtualRenderer::new(3.0);
//! let mut controller = PlaybackController::new(renderer, PlaybackConfig::default());
//! controller.load_playlist(tracks).unwrap();
//! controller.toggle_play().unwrap();
//!
//! // Play the first track through
//! controller.renderer_mut().advance(Duration::from_secs(3));
//! controller.pump_renderer_notifications().unwrap();
//!
//! let state = controller.snapshot();
//! assert_eq!(state.current_index, Some(1));
//! assert!(state.is_playing);
//! assert_eq!(state.repeat_mode, RepeatMode::Off);
//! ```

mod controller;
mod error;
mod events;
mod playlist;
pub mod renderer;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use playlist::Playlist;
pub use renderer::{ListenerId, Renderer, RendererError, RendererNotification, VirtualRenderer};
pub use shuffle::shuffled_order;
pub use types::{Direction, PlaybackConfig, PlaybackState, RepeatMode, SeekTarget};
pub use volume::Volume;
