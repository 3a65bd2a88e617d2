//! Playlist with canonical and shuffled orders
//!
//! Both orders are views over the same track set:
//!
//! ```text
//! canonical: [A, B, C, D]
//! shuffled:  [2, 0, 3, 1]   → active order C, A, D, B
//! ```
//!
//! Indices handed out by the playlist always refer to the *active* order.

use crate::shuffle::shuffled_order;
use rand::Rng;
use soundmint_core::Track;

/// Ordered track set for playback
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    /// Tracks in catalog order
    tracks: Vec<Track>,

    /// Permutation of `tracks` indices while shuffle is on
    shuffled: Option<Vec<usize>>,
}

impl Playlist {
    /// Create a playlist in catalog order
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            shuffled: None,
        }
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether the shuffled order is active
    pub fn is_shuffled(&self) -> bool {
        self.shuffled.is_some()
    }

    /// Track at `index` of the active order
    pub fn get(&self, index: usize) -> Option<&Track> {
        match &self.shuffled {
            Some(order) => order.get(index).and_then(|&i| self.tracks.get(i)),
            None => self.tracks.get(index),
        }
    }

    /// Tracks in catalog order
    pub fn canonical(&self) -> &[Track] {
        &self.tracks
    }

    /// Tracks in the active order
    pub fn iter(&self) -> impl Iterator<Item = &Track> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Index of the last track, if any
    pub fn last_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Replace the active order with a fresh random permutation
    ///
    /// Always draws a new permutation, even if already shuffled.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.shuffled = Some(shuffled_order(self.tracks.len(), rng));
    }

    /// Return to catalog order
    pub fn unshuffle(&mut self) {
        self.shuffled = None;
    }

    /// Index after `index`, wrapping to 0 past the end
    pub fn wrap_next(&self, index: usize) -> usize {
        if self.is_empty() {
            0
        } else {
            (index + 1) % self.len()
        }
    }

    /// Index before `index`, wrapping to the last track before 0
    pub fn wrap_previous(&self, index: usize) -> usize {
        match index.checked_sub(1) {
            Some(prev) => prev,
            None => self.last_index().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use soundmint_core::{Price, TrackId};

    fn create_test_track(id: &str) -> Track {
        Track::new(
            TrackId::new(id),
            format!("Track {}", id),
            format!("https://cdn.example/{}.mp3", id),
            Price::ZERO,
        )
    }

    fn ids(playlist: &Playlist) -> Vec<String> {
        playlist.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn wraparound_navigation() {
        let playlist = Playlist::new(vec![
            create_test_track("a"),
            create_test_track("b"),
            create_test_track("c"),
        ]);

        assert_eq!(playlist.wrap_next(0), 1);
        assert_eq!(playlist.wrap_next(2), 0);
        assert_eq!(playlist.wrap_previous(1), 0);
        assert_eq!(playlist.wrap_previous(0), 2);
    }

    #[test]
    fn single_track_wraps_to_itself() {
        let playlist = Playlist::new(vec![create_test_track("solo")]);
        assert_eq!(playlist.wrap_next(0), 0);
        assert_eq!(playlist.wrap_previous(0), 0);
    }

    #[test]
    fn shuffle_then_unshuffle_restores_order() {
        let tracks: Vec<Track> = (0..10).map(|i| create_test_track(&i.to_string())).collect();
        let mut playlist = Playlist::new(tracks);
        let original = ids(&playlist);

        let mut rng = StdRng::seed_from_u64(3);
        playlist.shuffle(&mut rng);
        assert!(playlist.is_shuffled());

        let mut shuffled = ids(&playlist);
        shuffled.sort();
        let mut sorted_original = original.clone();
        sorted_original.sort();
        assert_eq!(shuffled, sorted_original);

        playlist.unshuffle();
        assert_eq!(ids(&playlist), original);
    }

    #[test]
    fn canonical_view_ignores_shuffle() {
        let mut playlist = Playlist::new(vec![
            create_test_track("a"),
            create_test_track("b"),
            create_test_track("c"),
            create_test_track("d"),
        ]);
        playlist.shuffle(&mut StdRng::seed_from_u64(11));

        let canonical: Vec<&str> = playlist.canonical().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(canonical, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_playlist() {
        let playlist = Playlist::default();
        assert!(playlist.is_empty());
        assert!(playlist.get(0).is_none());
        assert!(playlist.last_index().is_none());
    }
}
