//! Audio renderer abstraction
//!
//! The controller never decodes audio itself. It drives a single renderer
//! handle (an HTML audio element in a browser, a virtual clock in the CLI)
//! and listens for its two notifications over a `flume` channel.

use std::collections::{HashMap, HashSet};
use std::time::Duration;
use thiserror::Error;

/// Errors reported by a renderer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RendererError {
    /// Source could not be loaded or started
    #[error("Failed to load {url}: {reason}")]
    Load { url: String, reason: String },

    /// Playback failed for another reason
    #[error("Playback failed: {0}")]
    Playback(String),

    /// `play()` called before any source was loaded
    #[error("No source loaded")]
    NoSource,
}

/// Notification pushed by the renderer to its subscribers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RendererNotification {
    /// Playback position moved
    ///
    /// `duration` is NaN until the renderer knows the track length.
    Progress { current_time: f64, duration: f64 },

    /// Current source played through to the end
    Ended,
}

/// Handle returned by [`Renderer::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Single-stream audio renderer
///
/// Loading a new source stops whatever was playing. Notifications are
/// delivered to every subscribed sender until it is unsubscribed.
pub trait Renderer {
    /// Replace the current source, paused at position 0
    fn load(&mut self, url: &str) -> Result<(), RendererError>;

    /// Start or resume the current source
    fn play(&mut self) -> Result<(), RendererError>;

    /// Pause the current source (no-op if nothing is playing)
    fn pause(&mut self);

    /// Position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position (seconds)
    fn set_current_time(&mut self, seconds: f64);

    /// Length of the current source, if known
    fn duration(&self) -> Option<f64>;

    /// Output gain (0.0 - 1.0)
    fn set_volume(&mut self, gain: f32);

    /// Register a notification listener
    fn subscribe(&mut self, sender: flume::Sender<RendererNotification>) -> ListenerId;

    /// Remove a listener registered with [`Renderer::subscribe`]
    fn unsubscribe(&mut self, id: ListenerId);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn load(&mut self, url: &str) -> Result<(), RendererError> {
        (**self).load(url)
    }

    fn play(&mut self) -> Result<(), RendererError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        (**self).set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        (**self).duration()
    }

    fn set_volume(&mut self, gain: f32) {
        (**self).set_volume(gain);
    }

    fn subscribe(&mut self, sender: flume::Sender<RendererNotification>) -> ListenerId {
        (**self).subscribe(sender)
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        (**self).unsubscribe(id);
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn load(&mut self, url: &str) -> Result<(), RendererError> {
        (**self).load(url)
    }

    fn play(&mut self) -> Result<(), RendererError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        (**self).set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        (**self).duration()
    }

    fn set_volume(&mut self, gain: f32) {
        (**self).set_volume(gain);
    }

    fn subscribe(&mut self, sender: flume::Sender<RendererNotification>) -> ListenerId {
        (**self).subscribe(sender)
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        (**self).unsubscribe(id);
    }
}

/// Headless renderer driven by an explicit clock
///
/// Nothing is decoded: [`VirtualRenderer::advance`] moves the position of
/// the playing source and emits the same notifications a real audio element
/// would. Durations come from [`VirtualRenderer::with_duration`] or fall back
/// to the default passed to [`VirtualRenderer::new`].
#[derive(Debug)]
pub struct VirtualRenderer {
    durations: HashMap<String, f64>,
    default_duration: f64,
    failing_urls: HashSet<String>,

    source: Option<String>,
    duration: Option<f64>,
    position: f64,
    playing: bool,
    gain: f32,

    listeners: Vec<(ListenerId, flume::Sender<RendererNotification>)>,
    next_listener_id: u64,
}

impl VirtualRenderer {
    /// Create a renderer where every source lasts `default_duration` seconds
    pub fn new(default_duration: f64) -> Self {
        Self {
            durations: HashMap::new(),
            default_duration,
            failing_urls: HashSet::new(),
            source: None,
            duration: None,
            position: 0.0,
            playing: false,
            gain: 1.0,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Set the length of one source
    #[must_use]
    pub fn with_duration(mut self, url: impl Into<String>, seconds: f64) -> Self {
        self.durations.insert(url.into(), seconds);
        self
    }

    /// Make `play()` fail whenever `url` is the loaded source
    pub fn fail_url(&mut self, url: impl Into<String>) {
        self.failing_urls.insert(url.into());
    }

    /// Currently loaded source
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Move the clock forward
    ///
    /// Emits `Progress` while playing, followed by `Ended` (and a pause) once
    /// the position reaches the end of the source.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }

        self.position += elapsed.as_secs_f64();

        let ended = match self.duration {
            Some(duration) if self.position >= duration => {
                self.position = duration;
                true
            }
            _ => false,
        };

        self.notify(RendererNotification::Progress {
            current_time: self.position,
            duration: self.duration.unwrap_or(f64::NAN),
        });

        if ended {
            self.playing = false;
            self.notify(RendererNotification::Ended);
        }
    }

    fn notify(&mut self, notification: RendererNotification) {
        // Listeners whose receiver is gone are dropped
        self.listeners
            .retain(|(_, sender)| sender.send(notification).is_ok());
    }
}

impl Default for VirtualRenderer {
    fn default() -> Self {
        Self::new(180.0)
    }
}

impl Renderer for VirtualRenderer {
    fn load(&mut self, url: &str) -> Result<(), RendererError> {
        let duration = self
            .durations
            .get(url)
            .copied()
            .unwrap_or(self.default_duration);

        self.source = Some(url.to_string());
        self.duration = Some(duration).filter(|d| d.is_finite() && *d > 0.0);
        self.position = 0.0;
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) -> Result<(), RendererError> {
        let url = self.source.as_ref().ok_or(RendererError::NoSource)?;

        if self.failing_urls.contains(url) {
            self.playing = false;
            return Err(RendererError::Load {
                url: url.clone(),
                reason: "source unavailable".to_string(),
            });
        }

        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        let upper = self.duration.unwrap_or(f64::INFINITY);
        self.position = seconds.clamp(0.0, upper);
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    fn subscribe(&mut self, sender: flume::Sender<RendererNotification>) -> ListenerId {
        let id = ListenerId::new(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, sender));
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener, _)| *listener != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_resets_position_and_pauses() {
        let mut renderer = VirtualRenderer::new(60.0);
        renderer.load("a.mp3").unwrap();
        renderer.play().unwrap();
        renderer.advance(Duration::from_secs(10));
        assert_eq!(renderer.current_time(), 10.0);

        renderer.load("b.mp3").unwrap();
        assert_eq!(renderer.current_time(), 0.0);
        assert!(!renderer.is_playing());
        assert_eq!(renderer.source(), Some("b.mp3"));
    }

    #[test]
    fn play_without_source_fails() {
        let mut renderer = VirtualRenderer::default();
        assert_eq!(renderer.play(), Err(RendererError::NoSource));
    }

    #[test]
    fn failing_url_rejects_play() {
        let mut renderer = VirtualRenderer::default();
        renderer.fail_url("broken.mp3");
        renderer.load("broken.mp3").unwrap();

        assert!(matches!(renderer.play(), Err(RendererError::Load { .. })));
        assert!(!renderer.is_playing());
    }

    #[test]
    fn advance_emits_progress_then_ended() {
        let mut renderer = VirtualRenderer::new(5.0);
        let (tx, rx) = flume::unbounded();
        renderer.subscribe(tx);

        renderer.load("a.mp3").unwrap();
        renderer.play().unwrap();
        renderer.advance(Duration::from_secs(2));
        renderer.advance(Duration::from_secs(4));

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                RendererNotification::Progress {
                    current_time: 2.0,
                    duration: 5.0
                },
                RendererNotification::Progress {
                    current_time: 5.0,
                    duration: 5.0
                },
                RendererNotification::Ended,
            ]
        );
        assert!(!renderer.is_playing());
    }

    #[test]
    fn paused_clock_is_silent() {
        let mut renderer = VirtualRenderer::new(5.0);
        let (tx, rx) = flume::unbounded();
        renderer.subscribe(tx);
        renderer.load("a.mp3").unwrap();

        renderer.advance(Duration::from_secs(1));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut renderer = VirtualRenderer::new(5.0);
        let (tx, rx) = flume::unbounded();
        let id = renderer.subscribe(tx);
        assert_eq!(renderer.listener_count(), 1);

        renderer.unsubscribe(id);
        assert_eq!(renderer.listener_count(), 0);

        renderer.load("a.mp3").unwrap();
        renderer.play().unwrap();
        renderer.advance(Duration::from_secs(1));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_is_pruned() {
        let mut renderer = VirtualRenderer::new(5.0);
        let (tx, rx) = flume::unbounded();
        renderer.subscribe(tx);
        drop(rx);

        renderer.load("a.mp3").unwrap();
        renderer.play().unwrap();
        renderer.advance(Duration::from_secs(1));
        assert_eq!(renderer.listener_count(), 0);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut renderer = VirtualRenderer::default().with_duration("a.mp3", 30.0);
        renderer.load("a.mp3").unwrap();

        renderer.set_current_time(45.0);
        assert_eq!(renderer.current_time(), 30.0);

        renderer.set_current_time(-3.0);
        assert_eq!(renderer.current_time(), 0.0);
    }
}
