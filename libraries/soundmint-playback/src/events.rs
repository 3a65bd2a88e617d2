//! Playback Events
//!
//! The controller queues events at key points for the UI to drain:
//! - Play/pause changes
//! - Track changes (skip, select, end of track, shuffle toggle)
//! - Position updates (forwarded renderer progress and seeks)
//! - Volume, shuffle and repeat changes

use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};
use soundmint_core::TrackId;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback started or stopped
    StateChanged {
        /// Whether the renderer is now playing
        is_playing: bool,
    },

    /// Current track changed
    TrackChanged {
        /// Index into the active playlist
        index: usize,
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Position update
    PositionUpdate {
        position_seconds: f64,
        duration_seconds: f64,
        progress_percent: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
    },

    /// Shuffle toggled
    ShuffleChanged { enabled: bool },

    /// Repeat mode cycled
    RepeatChanged { mode: RepeatMode },

    /// A new track set replaced the playlist
    PlaylistLoaded {
        /// New playlist length
        length: usize,
    },

    /// Renderer failure surfaced to the user
    Error {
        /// Error message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_variant_tag() {
        let event = PlaybackEvent::RepeatChanged {
            mode: RepeatMode::Playlist,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"RepeatChanged":{"mode":"playlist"}}"#);
    }

    #[test]
    fn track_changed_carries_both_ids() {
        let json = r#"{"TrackChanged":{"index":1,"track_id":"7","previous_track_id":"3"}}"#;
        let event: PlaybackEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            PlaybackEvent::TrackChanged {
                index: 1,
                track_id: TrackId::new("7"),
                previous_track_id: Some(TrackId::new("3")),
            }
        );
    }
}
