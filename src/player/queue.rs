use rand::Rng;

use crate::http::model::PlaylistSong;

/// Outcome of a queue operation, for the caller to translate into ticker
/// and notification side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Playback (re)started on this track.
    Started(PlaylistSong),
    Stopped,
    /// `play` was asked for an empty queue.
    Empty,
    Unchanged,
}

/// The playback queue state machine. Pure bookkeeping: no timers, no I/O.
///
/// Invariant: `current` is `None` or a valid index into `tracks`. The
/// shuffle and repeat flags survive queue replacement.
#[derive(Debug, Default)]
pub struct PlayQueue {
    tracks: Vec<PlaylistSong>,
    current: Option<usize>,
    playing: bool,
    shuffle: bool,
    repeat: bool,
}

impl PlayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the queue wholesale with a fresh snapshot. The playing
    /// flag and the shuffle/repeat flags are left as they are.
    pub fn load(&mut self, tracks: Vec<PlaylistSong>) {
        self.current = if tracks.is_empty() { None } else { Some(0) };
        self.tracks = tracks;
    }

    pub fn play(&mut self) -> Transition {
        if self.tracks.is_empty() {
            return Transition::Empty;
        }
        let index = *self.current.get_or_insert(0);
        self.playing = true;
        Transition::Started(self.tracks[index].clone())
    }

    pub fn stop(&mut self) -> Transition {
        self.playing = false;
        Transition::Stopped
    }

    pub fn next(&mut self) -> Transition {
        if self.tracks.is_empty() {
            return Transition::Unchanged;
        }

        if self.shuffle {
            let index = rand::rng().random_range(0..self.tracks.len());
            return self.start_at(index);
        }

        let current = self.current.map(|i| i as i64).unwrap_or(-1);
        if current < self.tracks.len() as i64 - 1 {
            self.start_at((current + 1) as usize)
        } else if self.repeat {
            self.start_at(0)
        } else {
            self.playing = false;
            Transition::Stopped
        }
    }

    /// Mirror of `next`, except running off the front never stops
    /// playback; without repeat it stays on the first track.
    pub fn previous(&mut self) -> Transition {
        if self.tracks.is_empty() {
            return Transition::Unchanged;
        }

        if self.shuffle {
            let index = rand::rng().random_range(0..self.tracks.len());
            return self.start_at(index);
        }

        match self.current {
            Some(i) if i > 0 => self.start_at(i - 1),
            Some(_) | None if self.repeat => self.start_at(self.tracks.len() - 1),
            _ => self.start_at(0),
        }
    }

    pub fn play_specific(&mut self, song_id: i64) -> Transition {
        match self.tracks.iter().position(|t| t.song_id == song_id) {
            Some(index) => self.start_at(index),
            None => Transition::Unchanged,
        }
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.repeat
    }

    fn start_at(&mut self, index: usize) -> Transition {
        self.current = Some(index);
        self.playing = true;
        Transition::Started(self.tracks[index].clone())
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&PlaylistSong> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: i64, name: &str) -> PlaylistSong {
        PlaylistSong {
            song_id: id,
            song_name: Some(name.to_string()),
        }
    }

    fn queue_abc() -> PlayQueue {
        let mut queue = PlayQueue::new();
        queue.load(vec![track(1, "A"), track(2, "B"), track(3, "C")]);
        queue
    }

    #[test]
    fn load_sets_index_to_zero_or_unset() {
        let mut queue = PlayQueue::new();
        queue.load(vec![]);
        assert_eq!(queue.current_index(), None);

        queue.load(vec![track(1, "A")]);
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn load_does_not_touch_playing_or_flags() {
        let mut queue = queue_abc();
        queue.toggle_shuffle();
        queue.toggle_repeat();
        queue.play();

        queue.load(vec![track(9, "Z")]);
        assert!(queue.is_playing());
        assert!(queue.shuffle());
        assert!(queue.repeat());
    }

    #[test]
    fn play_on_empty_queue_stays_stopped() {
        let mut queue = PlayQueue::new();
        assert_eq!(queue.play(), Transition::Empty);
        assert!(!queue.is_playing());
    }

    #[test]
    fn play_defaults_unset_index_to_zero() {
        let mut queue = queue_abc();
        assert_eq!(queue.play(), Transition::Started(track(1, "A")));
        assert_eq!(queue.current_index(), Some(0));
        assert!(queue.is_playing());
    }

    #[test]
    fn next_advances_and_keeps_playing() {
        let mut queue = queue_abc();
        queue.play();
        assert_eq!(queue.next(), Transition::Started(track(2, "B")));
        assert_eq!(queue.current_index(), Some(1));
        assert!(queue.is_playing());
    }

    #[test]
    fn next_at_end_without_repeat_stops_and_keeps_index() {
        let mut queue = queue_abc();
        queue.play_specific(3);
        assert_eq!(queue.next(), Transition::Stopped);
        assert_eq!(queue.current_index(), Some(2));
        assert!(!queue.is_playing());
    }

    #[test]
    fn next_at_end_with_repeat_wraps_to_start() {
        let mut queue = queue_abc();
        queue.play_specific(3);
        queue.toggle_repeat();
        assert_eq!(queue.next(), Transition::Started(track(1, "A")));
        assert_eq!(queue.current_index(), Some(0));
        assert!(queue.is_playing());
    }

    #[test]
    fn next_on_empty_queue_is_a_noop() {
        let mut queue = PlayQueue::new();
        assert_eq!(queue.next(), Transition::Unchanged);
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn next_never_leaves_the_valid_range() {
        let mut queue = queue_abc();
        queue.play();
        queue.toggle_shuffle();
        for _ in 0..200 {
            queue.next();
            let index = queue.current_index().unwrap();
            assert!(index < queue.len());
            assert!(queue.is_playing());
        }
    }

    #[test]
    fn previous_never_leaves_the_valid_range() {
        let mut queue = queue_abc();
        queue.play();
        for _ in 0..10 {
            queue.previous();
            assert!(queue.current_index().unwrap() < queue.len());
        }
        queue.toggle_shuffle();
        for _ in 0..200 {
            queue.previous();
            assert!(queue.current_index().unwrap() < queue.len());
        }
    }

    #[test]
    fn previous_at_start_without_repeat_stays_on_first() {
        let mut queue = queue_abc();
        queue.play();
        assert_eq!(queue.previous(), Transition::Started(track(1, "A")));
        assert_eq!(queue.current_index(), Some(0));
        assert!(queue.is_playing());
    }

    #[test]
    fn previous_at_start_with_repeat_wraps_to_last() {
        let mut queue = queue_abc();
        queue.play();
        queue.toggle_repeat();
        assert_eq!(queue.previous(), Transition::Started(track(3, "C")));
        assert_eq!(queue.current_index(), Some(2));
    }

    #[test]
    fn play_specific_jumps_to_the_track() {
        let mut queue = queue_abc();
        assert_eq!(queue.play_specific(2), Transition::Started(track(2, "B")));
        assert_eq!(queue.current_index(), Some(1));
        assert!(queue.is_playing());
    }

    #[test]
    fn play_specific_unknown_id_is_a_noop() {
        let mut queue = queue_abc();
        queue.play();
        assert_eq!(queue.play_specific(42), Transition::Unchanged);
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn stop_keeps_index_and_flags() {
        let mut queue = queue_abc();
        queue.toggle_shuffle();
        queue.play_specific(2);
        queue.stop();
        assert!(!queue.is_playing());
        assert_eq!(queue.current_index(), Some(1));
        assert!(queue.shuffle());
    }

    #[test]
    fn toggles_flip_only_the_flag() {
        let mut queue = queue_abc();
        queue.play();
        assert!(queue.toggle_shuffle());
        assert!(queue.toggle_repeat());
        assert!(queue.is_playing());
        assert_eq!(queue.current_index(), Some(0));
        assert!(!queue.toggle_shuffle());
        assert!(!queue.toggle_repeat());
    }
}
