//! Settle-interval debouncing for query input
//!
//! Each pushed value arms a sleep tagged with a generation number; a newer
//! push bumps the generation, so only the value that survives the full
//! quiet interval is delivered. Intermediate values of a burst are never
//! queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

/// Sending half: feed raw values as they arrive
pub struct Debouncer<T> {
    delay: Duration,
    generation: Arc<AtomicU64>,
    tx: mpsc::UnboundedSender<T>,
}

/// Receiving half: yields only settled values
pub struct Debounced<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer pair with the given quiet interval
    #[must_use]
    pub fn channel(delay: Duration) -> (Self, Debounced<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                generation: Arc::new(AtomicU64::new(0)),
                tx,
            },
            Debounced { rx },
        )
    }

    /// Feed a new value, resetting the pending timer
    pub fn push(&self, value: T) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let guard = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A newer push has superseded this value
            if guard.load(Ordering::SeqCst) != generation {
                return;
            }
            // Receiver dropped: nothing to deliver
            let _ = tx.send(value);
        });
    }
}

impl<T> Debounced<T> {
    /// Wait for the next settled value
    ///
    /// Returns `None` once every sender has been dropped.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Non-blocking poll for an already-settled value
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}
