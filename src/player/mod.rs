pub mod queue;
pub mod ticker;

use flume::Sender;
use tracing::debug;

use crate::event::events::{Event, NoticeKind};
use crate::http::model::PlaylistSong;

use self::queue::{PlayQueue, Transition};
use self::ticker::{TRACK_DURATION_SECS, Ticker};

/// Queue state machine plus the simulated progress ticker. All transition
/// side effects (ticker restarts, user-visible messages) are decided here;
/// the queue itself stays pure.
pub struct Player {
    queue: PlayQueue,
    ticker: Ticker,
    event_tx: Sender<Event>,
}

impl Player {
    pub fn new(event_tx: Sender<Event>) -> Self {
        Self {
            queue: PlayQueue::new(),
            ticker: Ticker::new(event_tx.clone()),
            event_tx,
        }
    }

    /// Swap in the freshly fetched song list of a playlist. Playback state
    /// and flags are left alone.
    pub fn load_queue(&mut self, tracks: Vec<PlaylistSong>) {
        debug!("queue replaced with {} tracks", tracks.len());
        self.queue.load(tracks);
    }

    pub fn play(&mut self) {
        match self.queue.play() {
            Transition::Started(track) => self.track_started(track),
            Transition::Empty => {
                let _ = self.event_tx.send(Event::Notice(
                    "No songs in this playlist".into(),
                    NoticeKind::Error,
                ));
            }
            _ => {}
        }
    }

    pub fn stop(&mut self) {
        self.queue.stop();
        self.ticker.stop();
    }

    pub fn toggle_playback(&mut self) {
        if self.queue.is_playing() {
            self.stop();
        } else {
            self.play();
        }
    }

    pub fn next(&mut self) {
        self.apply(|queue| queue.next());
    }

    pub fn previous(&mut self) {
        self.apply(|queue| queue.previous());
    }

    pub fn play_specific(&mut self, song_id: i64) {
        self.apply(|queue| queue.play_specific(song_id));
    }

    pub fn toggle_shuffle(&mut self) {
        let enabled = self.queue.toggle_shuffle();
        let label = if enabled {
            "Shuffle enabled"
        } else {
            "Shuffle disabled"
        };
        let _ = self
            .event_tx
            .send(Event::Notice(label.into(), NoticeKind::Success));
    }

    pub fn toggle_repeat(&mut self) {
        let enabled = self.queue.toggle_repeat();
        self.ticker.set_repeat(enabled);
    }

    /// The ticker ran out without repeat; playback ends on the current
    /// track.
    pub fn on_track_ended(&mut self) {
        self.queue.stop();
    }

    fn apply(&mut self, op: impl FnOnce(&mut PlayQueue) -> Transition) {
        match op(&mut self.queue) {
            Transition::Started(track) => self.track_started(track),
            Transition::Stopped => self.ticker.stop(),
            _ => {}
        }
    }

    fn track_started(&mut self, track: PlaylistSong) {
        debug!("playing {}", track.display_name());
        self.ticker.set_repeat(self.queue.repeat());
        self.ticker.start();
    }

    // --- read accessors for the UI ---

    pub fn is_playing(&self) -> bool {
        self.queue.is_playing()
    }

    pub fn shuffle(&self) -> bool {
        self.queue.shuffle()
    }

    pub fn repeat(&self) -> bool {
        self.queue.repeat()
    }

    pub fn current_track(&self) -> Option<&PlaylistSong> {
        self.queue.current_track()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn progress(&self) -> (u64, u64) {
        (self.ticker.position_secs(), TRACK_DURATION_SECS)
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

    #[tokio::test(start_paused = true)]
    async fn play_on_empty_queue_reports_no_songs() {
        let (tx, rx) = flume::unbounded();
        let mut player = Player::new(tx);

        player.play();
        assert!(!player.is_playing());
        match rx.try_recv() {
            Ok(Event::Notice(message, NoticeKind::Error)) => {
                assert_eq!(message, "No songs in this playlist");
            }
            other => panic!("expected an error notice, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_playback_round_trips() {
        let (tx, _rx) = flume::unbounded();
        let mut player = Player::new(tx);
        player.load_queue(vec![track(1, "A"), track(2, "B")]);

        player.toggle_playback();
        assert!(player.is_playing());
        player.toggle_playback();
        assert!(!player.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn track_end_stops_but_keeps_position_in_queue() {
        let (tx, _rx) = flume::unbounded();
        let mut player = Player::new(tx);
        player.load_queue(vec![track(1, "A"), track(2, "B")]);
        player.play_specific(2);

        player.on_track_ended();
        assert!(!player.is_playing());
        assert_eq!(player.current_track(), Some(&track(2, "B")));
    }
}
