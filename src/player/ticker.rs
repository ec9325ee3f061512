use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use flume::Sender;
use tokio::task::JoinHandle;

use crate::event::events::Event;

/// Every track plays for the same simulated length.
pub const TRACK_DURATION_SECS: u64 = 180;

/// Simulated elapsed-time counter. One second of wall clock advances the
/// position by one; reaching the end wraps when repeat is on, otherwise
/// stops and reports `TrackEnded`.
///
/// Invariant: at most one counting task is live. `start` aborts the
/// previous task before spawning, so restarting never stacks intervals.
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
    position: Arc<AtomicU64>,
    repeat: Arc<AtomicBool>,
    event_tx: Sender<Event>,
}

impl Ticker {
    pub fn new(event_tx: Sender<Event>) -> Self {
        Self {
            handle: None,
            position: Arc::new(AtomicU64::new(0)),
            repeat: Arc::new(AtomicBool::new(false)),
            event_tx,
        }
    }

    pub fn start(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.position.store(0, Ordering::Relaxed);

        let position = self.position.clone();
        let repeat = self.repeat.clone();
        let tx = self.event_tx.clone();

        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // the first tick completes immediately; swallow it so the
            // position stays at 0 for the first second
            interval.tick().await;
            loop {
                interval.tick().await;
                let elapsed = position.fetch_add(1, Ordering::Relaxed) + 1;
                if elapsed >= TRACK_DURATION_SECS {
                    if repeat.load(Ordering::Relaxed) {
                        position.store(0, Ordering::Relaxed);
                    } else {
                        position.store(0, Ordering::Relaxed);
                        let _ = tx.send(Event::TrackEnded);
                        break;
                    }
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn set_repeat(&self, repeat: bool) {
        self.repeat.store(repeat, Ordering::Relaxed);
    }

    pub fn position_secs(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn counts_one_second_per_tick() {
        let (tx, _rx) = flume::unbounded();
        let mut ticker = Ticker::new(tx);
        ticker.start();
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        assert_eq!(ticker.position_secs(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_keeps_a_single_interval() {
        let (tx, _rx) = flume::unbounded();
        let mut ticker = Ticker::new(tx);

        // a stacked second interval would double-count the shared position
        ticker.start();
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        ticker.start();
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert_eq!(ticker.position_secs(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn wraps_at_duration_when_repeat_is_on() {
        let (tx, rx) = flume::unbounded();
        let mut ticker = Ticker::new(tx);
        ticker.set_repeat(true);
        ticker.start();
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(TRACK_DURATION_SECS + 5)).await;
        tokio::task::yield_now().await;
        assert_eq!(ticker.position_secs(), 5);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn reports_track_ended_without_repeat() {
        let (tx, rx) = flume::unbounded();
        let mut ticker = Ticker::new(tx);
        ticker.start();
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(TRACK_DURATION_SECS + 5)).await;
        tokio::task::yield_now().await;
        assert!(matches!(rx.try_recv(), Ok(Event::TrackEnded)));
        assert_eq!(ticker.position_secs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_interval() {
        let (tx, _rx) = flume::unbounded();
        let mut ticker = Ticker::new(tx);
        ticker.start();
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        ticker.stop();

        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert_eq!(ticker.position_secs(), 2);
    }
}
