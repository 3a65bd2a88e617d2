//! Playback controller - queue policy over a single renderer
//!
//! Owns the playlist, repeat/shuffle policy, volume and the renderer handle.
//! Every mutation is synchronous; renderer notifications are picked up by
//! [`PlaybackController::pump_renderer_notifications`].

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    playlist::Playlist,
    renderer::{ListenerId, Renderer, RendererError, RendererNotification},
    types::{Direction, PlaybackConfig, PlaybackState, RepeatMode, SeekTarget},
    volume::Volume,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use soundmint_core::{Track, TrackId};
use tracing::{debug, info, warn};

/// Playback queue controller
///
/// The controller is the only owner of the renderer. It subscribes on
/// construction and unsubscribes (after pausing) when dropped.
///
/// When the playlist is empty every track operation is a no-op and the
/// snapshot reports no current track.
pub struct PlaybackController<R: Renderer> {
    renderer: R,
    listener: ListenerId,
    notifications: flume::Receiver<RendererNotification>,

    playlist: Playlist,
    current_index: Option<usize>,
    is_playing: bool,

    position_seconds: f64,
    duration_seconds: f64,
    progress_percent: f64,

    volume: Volume,
    repeat: RepeatMode,
    shuffle: bool,
    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<R: Renderer> PlaybackController<R> {
    /// Create a controller around `renderer`
    ///
    /// Subscribes to the renderer and applies the configured volume. The
    /// playlist starts empty; call [`load_playlist`](Self::load_playlist).
    pub fn new(mut renderer: R, config: PlaybackConfig) -> Self {
        let (sender, notifications) = flume::unbounded();
        let listener = renderer.subscribe(sender);

        let volume = Volume::new(config.volume);
        renderer.set_volume(volume.gain());

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            renderer,
            listener,
            notifications,
            playlist: Playlist::default(),
            current_index: None,
            is_playing: false,
            position_seconds: 0.0,
            duration_seconds: 0.0,
            progress_percent: 0.0,
            volume,
            repeat: config.repeat,
            shuffle: config.shuffle,
            rng,
            pending_events: Vec::new(),
        }
    }

    // ===== Playlist =====

    /// Replace the track set
    ///
    /// Stops the current stream, applies shuffle if enabled and loads the
    /// first track into the renderer without starting it.
    pub fn load_playlist(&mut self, tracks: Vec<Track>) -> Result<()> {
        self.renderer.pause();
        self.discard_stale_notifications();
        self.set_playing(false);

        let previous_track_id = self.current_track().map(|t| t.id.clone());

        self.playlist = Playlist::new(tracks);
        if self.shuffle {
            self.playlist.shuffle(&mut self.rng);
        }
        self.current_index = (!self.playlist.is_empty()).then_some(0);
        self.reset_progress();

        info!(
            "Loaded playlist with {} tracks (shuffle: {})",
            self.playlist.len(),
            self.shuffle
        );
        self.pending_events.push(PlaybackEvent::PlaylistLoaded {
            length: self.playlist.len(),
        });

        self.load_current(previous_track_id)
    }

    // ===== Navigation =====

    /// Move to the next or previous track, wrapping at both ends
    ///
    /// With a single track the same track is rewound to 0.
    pub fn advance(&mut self, direction: Direction) -> Result<()> {
        let Some(index) = self.current_index else {
            return Ok(());
        };

        let target = match direction {
            Direction::Next => self.playlist.wrap_next(index),
            Direction::Previous => self.playlist.wrap_previous(index),
        };

        if target == index {
            return self.rewind();
        }

        self.switch_to(target)
    }

    /// Skip to the next track
    pub fn next(&mut self) -> Result<()> {
        self.advance(Direction::Next)
    }

    /// Go back to the previous track
    pub fn previous(&mut self) -> Result<()> {
        self.advance(Direction::Previous)
    }

    /// Jump to `index` of the active playlist
    ///
    /// Selecting the current track leaves playback untouched.
    pub fn select(&mut self, index: usize) -> Result<()> {
        let Some(current) = self.current_index else {
            return Ok(());
        };

        if index >= self.playlist.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.playlist.len(),
            });
        }

        if index == current {
            return Ok(());
        }

        self.switch_to(index)
    }

    // ===== Playback Control =====

    /// Start or pause the current track
    pub fn toggle_play(&mut self) -> Result<()> {
        if self.current_index.is_none() {
            return Ok(());
        }

        if self.is_playing {
            self.renderer.pause();
            self.set_playing(false);
            return Ok(());
        }

        self.renderer.play().map_err(|e| self.fail_playback(e))?;
        self.set_playing(true);
        Ok(())
    }

    /// Set volume, clamping `level` to 0-100
    pub fn set_volume(&mut self, level: i32) {
        self.volume.set_level(level.clamp(0, 100) as u8);
        self.renderer.set_volume(self.volume.gain());

        debug!("Volume set to {}", self.volume.level());
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
        });
    }

    /// Move the playback position
    ///
    /// The position is updated immediately, ahead of the renderer's next
    /// progress notification, and clamped to the track duration.
    pub fn seek(&mut self, target: SeekTarget) -> Result<()> {
        if self.current_index.is_none() {
            return Ok(());
        }

        let duration = self.known_duration();
        let position = match target {
            SeekTarget::Fraction(fraction) => {
                if !fraction.is_finite() {
                    return Err(PlaybackError::InvalidSeek(fraction));
                }
                match duration {
                    Some(duration) => fraction.clamp(0.0, 1.0) * duration,
                    None => 0.0,
                }
            }
            SeekTarget::Seconds(seconds) => {
                if !seconds.is_finite() {
                    return Err(PlaybackError::InvalidSeek(seconds));
                }
                match duration {
                    Some(duration) => seconds.clamp(0.0, duration),
                    None => seconds.max(0.0),
                }
            }
        };

        self.renderer.set_current_time(position);
        self.update_progress(position, duration);
        debug!("Seeked to {:.2}s", position);
        Ok(())
    }

    // ===== Shuffle & Repeat =====

    /// Toggle between canonical and shuffled order
    ///
    /// Enabling draws a fresh permutation every time. Either way the
    /// controller moves to index 0 of the new order; `is_playing` is kept.
    pub fn toggle_shuffle(&mut self) -> Result<()> {
        self.shuffle = !self.shuffle;
        debug!("Shuffle {}", if self.shuffle { "enabled" } else { "disabled" });
        self.pending_events.push(PlaybackEvent::ShuffleChanged {
            enabled: self.shuffle,
        });

        let Some(index) = self.current_index else {
            return Ok(());
        };
        let previous_track_id = self.playlist.get(index).map(|t| t.id.clone());

        if self.shuffle {
            self.playlist.shuffle(&mut self.rng);
        } else {
            self.playlist.unshuffle();
        }
        self.current_index = Some(0);

        let first_id = self.playlist.get(0).map(|t| t.id.clone());
        if first_id == previous_track_id {
            // Same track stays loaded, only its index moved
            return Ok(());
        }

        self.renderer.pause();
        self.discard_stale_notifications();
        self.reset_progress();
        self.load_current(previous_track_id)?;
        self.resume_if_playing()
    }

    /// Rotate the repeat mode: Off → Playlist → One → Off
    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycle();
        debug!("Repeat mode: {}", self.repeat);
        self.pending_events
            .push(PlaybackEvent::RepeatChanged { mode: self.repeat });
        self.repeat
    }

    // ===== Renderer Notifications =====

    /// Sync position and duration from a renderer progress notification
    ///
    /// A non-finite duration (source not loaded yet) keeps the percentage at 0.
    pub fn on_renderer_progress(&mut self, current_time: f64, duration: f64) {
        if self.current_index.is_none() {
            return;
        }

        let position = if current_time.is_finite() {
            current_time.max(0.0)
        } else {
            0.0
        };
        let duration = Some(duration).filter(|d| d.is_finite() && *d > 0.0);
        self.update_progress(position, duration);
    }

    /// Apply the repeat policy when the current track finishes
    pub fn on_renderer_ended(&mut self) -> Result<()> {
        let Some(index) = self.current_index else {
            return Ok(());
        };

        match self.repeat {
            RepeatMode::One => {
                debug!("Track ended, repeating current track");
                self.set_playing(true);
                self.rewind()
            }
            RepeatMode::Playlist => self.advance(Direction::Next),
            RepeatMode::Off => {
                if Some(index) == self.playlist.last_index() {
                    info!("Reached end of playlist");
                    self.renderer.pause();
                    self.set_playing(false);
                    Ok(())
                } else {
                    self.advance(Direction::Next)
                }
            }
        }
    }

    /// Dispatch every notification the renderer has delivered so far
    ///
    /// Notifications queued before a track switch are dropped by the switch,
    /// so an `Ended` that moves to a new track also discards what follows it.
    pub fn pump_renderer_notifications(&mut self) -> Result<()> {
        while let Ok(notification) = self.notifications.try_recv() {
            match notification {
                RendererNotification::Progress {
                    current_time,
                    duration,
                } => self.on_renderer_progress(current_time, duration),
                RendererNotification::Ended => self.on_renderer_ended()?,
            }
        }
        Ok(())
    }

    // ===== State Queries =====

    /// Current observable state
    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            current_index: self.current_index,
            is_playing: self.is_playing,
            position_seconds: self.position_seconds,
            duration_seconds: self.duration_seconds,
            progress_percent: self.progress_percent,
            volume: self.volume.level(),
            repeat_mode: self.repeat,
            shuffle_enabled: self.shuffle,
        }
    }

    /// Track at the current index
    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.playlist.get(i))
    }

    /// Tracks in the active (possibly shuffled) order
    pub fn active_tracks(&self) -> impl Iterator<Item = &Track> + '_ {
        self.playlist.iter()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the renderer, e.g. to drive a virtual clock
    ///
    /// Loading or subscribing through this handle bypasses the controller.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Stop the current stream, then load and (if playing) start `index`
    fn switch_to(&mut self, index: usize) -> Result<()> {
        let previous_track_id = self.current_track().map(|t| t.id.clone());

        self.renderer.pause();
        self.discard_stale_notifications();

        self.current_index = Some(index);
        self.reset_progress();
        self.load_current(previous_track_id)?;
        self.resume_if_playing()
    }

    /// Load the current track into the renderer and announce it
    fn load_current(&mut self, previous_track_id: Option<TrackId>) -> Result<()> {
        let Some(index) = self.current_index else {
            return Ok(());
        };
        let Some(track) = self.playlist.get(index) else {
            return Ok(());
        };

        let track_id = track.id.clone();
        let url = track.audio_url.clone();
        info!("Now at track {} ({}): {}", index, track_id, track.title);

        self.pending_events.push(PlaybackEvent::TrackChanged {
            index,
            track_id,
            previous_track_id,
        });

        self.renderer.load(&url).map_err(|e| self.fail_playback(e))
    }

    /// Restart the current track from 0
    fn rewind(&mut self) -> Result<()> {
        self.renderer.set_current_time(0.0);
        self.discard_stale_notifications();
        self.update_progress(0.0, self.known_duration());
        self.resume_if_playing()
    }

    fn resume_if_playing(&mut self) -> Result<()> {
        if self.is_playing {
            self.renderer.play().map_err(|e| self.fail_playback(e))?;
        }
        Ok(())
    }

    /// Reset to paused and surface a renderer failure
    fn fail_playback(&mut self, error: RendererError) -> PlaybackError {
        warn!("Renderer failure: {}", error);
        self.renderer.pause();
        self.set_playing(false);
        self.pending_events.push(PlaybackEvent::Error {
            message: error.to_string(),
        });
        PlaybackError::Renderer(error)
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing == playing {
            return;
        }
        self.is_playing = playing;
        debug!("Playback {}", if playing { "started" } else { "paused" });
        self.pending_events
            .push(PlaybackEvent::StateChanged { is_playing: playing });
    }

    fn discard_stale_notifications(&mut self) {
        let dropped = self.notifications.drain().count();
        if dropped > 0 {
            debug!("Discarded {} stale renderer notifications", dropped);
        }
    }

    /// Renderer duration if loaded, otherwise catalog metadata
    fn known_duration(&self) -> Option<f64> {
        self.renderer
            .duration()
            .filter(|d| d.is_finite() && *d > 0.0)
            .or_else(|| {
                self.current_track()
                    .and_then(|t| t.duration())
                    .map(|d| d.as_secs_f64())
                    .filter(|d| *d > 0.0)
            })
    }

    fn reset_progress(&mut self) {
        self.position_seconds = 0.0;
        self.progress_percent = 0.0;
        self.duration_seconds = self
            .current_track()
            .and_then(|t| t.duration())
            .map_or(0.0, |d| d.as_secs_f64());
    }

    fn update_progress(&mut self, position: f64, duration: Option<f64>) {
        self.position_seconds = position;
        match duration {
            Some(duration) => {
                self.duration_seconds = duration;
                self.progress_percent = (position / duration * 100.0).clamp(0.0, 100.0);
            }
            None => self.progress_percent = 0.0,
        }

        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_seconds: self.position_seconds,
            duration_seconds: self.duration_seconds,
            progress_percent: self.progress_percent,
        });
    }
}

impl<R: Renderer> Drop for PlaybackController<R> {
    fn drop(&mut self) {
        self.renderer.pause();
        self.renderer.unsubscribe(self.listener);
    }
}
