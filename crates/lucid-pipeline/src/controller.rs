//! Explanation request lifecycle.
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success
//!                     │                │
//!                     └──err──▶ Error ─┴──retry / new selection / ask──▶ Loading
//! ```
//!
//! Each issued request carries a sequence number. A completion whose number
//! is not the latest is dropped, so a superseded request can never
//! overwrite the state of the one that replaced it.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use lucid_config::PipelineConfig;
use lucid_protocols::{ExplainRequest, ExplanationMode};

use crate::client::{ExplainClient, Explanation};
use crate::error::ExplainError;
use crate::history::{ExplanationRecord, History, UsageStats};
use crate::selection::Selection;

/// Controller state. Owned by the controller; callers read it by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(Explanation),
    Error(ExplainError),
}

impl RequestState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Result of one issued request.
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub result: Result<Explanation, ExplainError>,
    pub elapsed: Duration,
}

/// Issues explain requests for stabilized selections.
pub struct ExplanationRequestController {
    client: Arc<dyn ExplainClient>,
    timeout: Duration,
    mode: ExplanationMode,
    state: RequestState,
    seq: u64,
    last_request: Option<ExplainRequest>,
    in_flight: Option<JoinHandle<()>>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    history: History,
    stats: UsageStats,
}

impl ExplanationRequestController {
    pub fn new(
        client: Arc<dyn ExplainClient>,
        timeout: Duration,
        mode: ExplanationMode,
        history_limit: usize,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            client,
            timeout,
            mode,
            state: RequestState::Idle,
            seq: 0,
            last_request: None,
            in_flight: None,
            completion_tx,
            completion_rx,
            history: History::new(history_limit),
            stats: UsageStats::default(),
        }
    }

    pub fn from_config(client: Arc<dyn ExplainClient>, config: &PipelineConfig) -> Self {
        Self::new(
            client,
            Duration::from_secs(config.request_timeout_secs),
            config.mode.clone(),
            config.history_limit,
        )
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Sequence number of the latest issued (or cleared) request.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn last_request(&self) -> Option<&ExplainRequest> {
        self.last_request.as_ref()
    }

    pub fn mode(&self) -> &ExplanationMode {
        &self.mode
    }

    pub fn set_mode(&mut self, mode: ExplanationMode) {
        self.mode = mode;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn stats(&self) -> &UsageStats {
        &self.stats
    }

    /// Request body for a selection under the current mode.
    ///
    /// Code is sent for analysis; the default mode is left implicit.
    pub fn request_for(&self, selection: &Selection) -> ExplainRequest {
        let mut request = ExplainRequest::new(selection.text.clone()).with_analyze(selection.is_code);
        if self.mode != ExplanationMode::default() {
            request = request.with_mode(self.mode.clone());
        }
        request
    }

    /// Start explaining `selection`.
    ///
    /// Returns `false` without issuing a call when the same request is
    /// already in flight or resolved.
    pub fn submit(&mut self, selection: &Selection) -> bool {
        let request = self.request_for(selection);
        if self.is_duplicate(&request) {
            debug!(seq = self.seq, "Duplicate selection, keeping current state");
            return false;
        }
        self.issue(request);
        true
    }

    /// Ask a follow-up question about `selection`.
    ///
    /// The answer replaces the current result. Blank questions and repeats
    /// of the current one are ignored.
    pub fn ask(&mut self, selection: &Selection, question: &str) -> bool {
        let question = question.trim();
        if question.is_empty() {
            return false;
        }
        let request = ExplainRequest::new(selection.text.clone()).with_question(question);
        if self.is_duplicate(&request) {
            debug!(seq = self.seq, "Question already asked");
            return false;
        }
        info!(seq = self.seq + 1, "Asking follow-up question");
        self.issue(request);
        true
    }

    /// Re-issue the last request after a failure.
    pub fn retry(&mut self) -> bool {
        if !matches!(self.state, RequestState::Error(_)) {
            return false;
        }
        let Some(request) = self.last_request.clone() else {
            return false;
        };
        info!(seq = self.seq + 1, "Retrying explanation");
        self.issue(request);
        true
    }

    /// Drop any in-flight request and return to Idle.
    pub fn clear(&mut self) {
        self.seq += 1;
        self.abort_in_flight();
        self.last_request = None;
        self.state = RequestState::Idle;
    }

    /// Wait for the next completion from any issued request.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completion_rx.recv().await
    }

    /// Apply a completion. Returns `false` if it was stale and ignored.
    pub fn complete(&mut self, completion: Completion) -> bool {
        if completion.seq != self.seq || !self.state.is_loading() {
            debug!(
                seq = completion.seq,
                current = self.seq,
                "Dropping stale completion"
            );
            return false;
        }
        self.in_flight = None;

        let today = Utc::now().date_naive();
        let selected_text = self
            .last_request
            .as_ref()
            .map(|r| r.text.clone())
            .unwrap_or_default();

        match completion.result {
            Ok(explanation) => {
                info!(
                    seq = completion.seq,
                    elapsed_ms = completion.elapsed.as_millis() as u64,
                    "Explanation received"
                );
                self.stats.record_success(completion.elapsed, today);
                self.history.push(ExplanationRecord {
                    selected_text,
                    explanation: explanation.text.clone(),
                    timestamp: Utc::now(),
                    success: true,
                });
                self.state = RequestState::Success(explanation);
            }
            Err(err) => {
                warn!(seq = completion.seq, error = %err, "Explanation failed");
                self.history.push(ExplanationRecord {
                    selected_text,
                    explanation: err.user_message(),
                    timestamp: Utc::now(),
                    success: false,
                });
                self.state = RequestState::Error(err);
            }
        }
        true
    }

    fn is_duplicate(&self, request: &ExplainRequest) -> bool {
        !self.state.is_idle() && self.last_request.as_ref() == Some(request)
    }

    fn issue(&mut self, request: ExplainRequest) {
        self.abort_in_flight();
        self.seq += 1;
        let seq = self.seq;

        self.stats.record_request(Utc::now().date_naive());
        self.state = RequestState::Loading;
        self.last_request = Some(request.clone());

        debug!(seq, analyze = request.analyze, chars = request.text.chars().count(), "Issuing explain request");

        let client = self.client.clone();
        let timeout = self.timeout;
        let tx = self.completion_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let started = tokio::time::Instant::now();
            let result = match tokio::time::timeout(timeout, client.explain(&request)).await {
                Ok(result) => result,
                Err(_) => Err(ExplainError::Network(format!(
                    "request timed out after {}s",
                    timeout.as_secs()
                ))),
            };
            let _ = tx.send(Completion {
                seq,
                result,
                elapsed: started.elapsed(),
            });
        }));
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl Drop for ExplanationRequestController {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
