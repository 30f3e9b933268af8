//! Selection debouncing.
//!
//! Selection-change notifications arrive in bursts while the user drags.
//! Only the selection present after a quiet window is acted on.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::classifier::CodeClassifier;
use crate::selection::{stabilize, SelectionEvent, SelectionSource};

/// Quiet-window timer driven by explicit instants.
///
/// Every [`register`](Self::register) restarts the window; [`poll`](Self::poll)
/// fires once when it has elapsed uninterrupted.
#[derive(Debug, Clone)]
pub struct SelectionDebouncer {
    window: Duration,
    pending: Option<Instant>,
}

impl SelectionDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a change notification at `now`.
    pub fn register(&mut self, now: Instant) {
        self.pending = Some(now);
    }

    /// Returns `true` exactly once per quiet window, when it has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(last) if now.saturating_duration_since(last) >= self.window => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// When the pending window will elapse, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|last| last + self.window)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Async watcher turning raw notifications into [`SelectionEvent`]s.
pub struct SelectionWatcher {
    source: Arc<dyn SelectionSource>,
    classifier: Arc<dyn CodeClassifier>,
    debounce: Duration,
    max_chars: usize,
}

impl SelectionWatcher {
    pub fn new(
        source: Arc<dyn SelectionSource>,
        classifier: Arc<dyn CodeClassifier>,
        debounce: Duration,
        max_chars: usize,
    ) -> Self {
        Self {
            source,
            classifier,
            debounce,
            max_chars,
        }
    }

    /// Read the source now and classify the result.
    pub fn read(&self) -> SelectionEvent {
        stabilize(&self.source.snapshot(), self.max_chars, self.classifier.as_ref())
    }

    /// Run until `notifications` closes or `events` is dropped.
    pub fn spawn(
        self,
        mut notifications: mpsc::Receiver<()>,
        events: mpsc::Sender<SelectionEvent>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut debouncer = SelectionDebouncer::new(self.debounce);
            info!(debounce_ms = self.debounce.as_millis() as u64, "Selection watcher started");

            loop {
                let deadline = debouncer.deadline();
                tokio::select! {
                    notification = notifications.recv() => {
                        if notification.is_none() {
                            break;
                        }
                        debouncer.register(tokio::time::Instant::now().into_std());
                    }
                    _ = sleep_until(deadline), if deadline.is_some() => {
                        if !debouncer.poll(tokio::time::Instant::now().into_std()) {
                            continue;
                        }
                        let event = self.read();
                        debug!(stable = matches!(event, SelectionEvent::Stable(_)), "Selection settled");
                        if events.send(event).await.is_err() {
                            break;
                        }
                    }
                }
            }

            info!("Selection watcher stopped");
        })
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    if let Some(deadline) = deadline {
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
