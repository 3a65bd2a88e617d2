//! Core types for playback control

use crate::error::PlaybackError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Repeat mode
///
/// Cycles in a fixed order: `Off → Playlist → One → Off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the last track ends
    #[default]
    Off,

    /// Loop the whole playlist
    Playlist,

    /// Loop the current track only
    One,
}

impl RepeatMode {
    /// Next mode in the repeat button cycle
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::Playlist,
            RepeatMode::Playlist => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RepeatMode::Off => "off",
            RepeatMode::Playlist => "playlist",
            RepeatMode::One => "one",
        };
        f.write_str(name)
    }
}

impl FromStr for RepeatMode {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(RepeatMode::Off),
            "playlist" | "all" => Ok(RepeatMode::Playlist),
            "one" | "track" => Ok(RepeatMode::One),
            other => Err(PlaybackError::InvalidOperation(format!(
                "unknown repeat mode: {other}"
            ))),
        }
    }
}

/// Skip direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Forward, wrapping past the last track to the first
    Next,

    /// Backward, wrapping before the first track to the last
    Previous,
}

/// Seek target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SeekTarget {
    /// Fraction of the track duration (0.0 - 1.0), as reported by a slider
    Fraction(f64),

    /// Absolute position in seconds
    Seconds(f64),
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 50)
    pub volume: u8,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Start with shuffle enabled (default: false)
    pub shuffle: bool,

    /// Fixed seed for the shuffle RNG (default: entropy)
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 50,
            repeat: RepeatMode::Off,
            shuffle: false,
            shuffle_seed: None,
        }
    }
}

/// Snapshot of the controller's observable state
///
/// `current_index` is `None` exactly when the active playlist is empty, and
/// `is_playing` is then always false.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Index into the active (canonical or shuffled) playlist
    pub current_index: Option<usize>,

    /// Whether the renderer has been told to play
    pub is_playing: bool,

    /// Playback position in seconds
    pub position_seconds: f64,

    /// Duration of the current track in seconds (0 when unknown)
    pub duration_seconds: f64,

    /// Position as a percentage of duration (0-100)
    pub progress_percent: f64,

    /// Volume level (0-100)
    pub volume: u8,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Whether the shuffled order is active
    pub shuffle_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 50);
        assert_eq!(config.repeat, RepeatMode::Off);
        assert!(!config.shuffle);
        assert!(config.shuffle_seed.is_none());
    }

    #[test]
    fn repeat_cycle_order() {
        assert_eq!(RepeatMode::Off.cycle(), RepeatMode::Playlist);
        assert_eq!(RepeatMode::Playlist.cycle(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycle(), RepeatMode::Off);
    }

    #[test]
    fn repeat_mode_parsing() {
        assert_eq!("none".parse::<RepeatMode>().unwrap(), RepeatMode::Off);
        assert_eq!("Playlist".parse::<RepeatMode>().unwrap(), RepeatMode::Playlist);
        assert_eq!("all".parse::<RepeatMode>().unwrap(), RepeatMode::Playlist);
        assert_eq!("one".parse::<RepeatMode>().unwrap(), RepeatMode::One);
        assert!("sometimes".parse::<RepeatMode>().is_err());
    }

    #[test]
    fn config_deserializes_partial_input() {
        let config: PlaybackConfig =
            serde_json::from_str(r#"{ "repeat": "playlist", "shuffle_seed": 7 }"#).unwrap();
        assert_eq!(config.volume, 50);
        assert_eq!(config.repeat, RepeatMode::Playlist);
        assert_eq!(config.shuffle_seed, Some(7));
    }
}
