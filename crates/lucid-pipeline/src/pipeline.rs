//! Event-driven orchestrator.
//!
//! [`Pipeline`] is the single owner of the current selection, the request
//! controller and the panel. Events are applied in arrival order and every
//! handler returns the resulting [`PanelView`]. Dismissing the panel drops
//! the selection and returns the controller to Idle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use lucid_config::PipelineConfig;
use lucid_protocols::ExplanationMode;

use crate::classifier::{CodeClassifier, HeuristicClassifier};
use crate::client::ExplainClient;
use crate::controller::{Completion, ExplanationRequestController, RequestState};
use crate::geometry::Viewport;
use crate::history::{History, UsageStats};
use crate::panel::{search_url, Action, Key, PanelKind, PanelStateMachine, PanelView};
use crate::selection::{stabilize, Selection, SelectionEvent, SelectionSource};
use crate::watcher::SelectionWatcher;

/// Input from the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The page selection changed; debounced before it is read.
    SelectionChanged,
    /// Mouse click, viewport coordinates.
    Click { x: f64, y: f64 },
    KeyDown(Key),
    Resize(Viewport),
    Close,
    Retry,
    ResizeTerminal(f64),
    /// The click-outside grace period ended.
    GraceElapsed,
    /// A button from the current view's `actions`.
    Action(Action),
    /// Follow-up question typed into the terminal.
    Ask(String),
}

/// What [`Pipeline::run`] hands back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutput {
    View(PanelView),
    /// Open this link in a new tab.
    OpenUrl(String),
}

pub struct Pipeline {
    config: PipelineConfig,
    source: Arc<dyn SelectionSource>,
    classifier: Arc<dyn CodeClassifier>,
    controller: ExplanationRequestController,
    panel: PanelStateMachine,
    selection: Option<Selection>,
    viewport: Viewport,
    open_url: Option<String>,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        client: Arc<dyn ExplainClient>,
        source: Arc<dyn SelectionSource>,
    ) -> Self {
        let classifier = Arc::new(HeuristicClassifier::new(config.classifier_depth));
        Self::with_classifier(config, client, source, classifier)
    }

    pub fn with_classifier(
        config: PipelineConfig,
        client: Arc<dyn ExplainClient>,
        source: Arc<dyn SelectionSource>,
        classifier: Arc<dyn CodeClassifier>,
    ) -> Self {
        Self {
            controller: ExplanationRequestController::from_config(client, &config),
            panel: PanelStateMachine::from_config(&config),
            config,
            source,
            classifier,
            selection: None,
            viewport: Viewport::default(),
            open_url: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn view(&self) -> PanelView {
        self.panel.view(self.controller.state())
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn state(&self) -> &RequestState {
        self.controller.state()
    }

    pub fn panel(&self) -> &PanelStateMachine {
        &self.panel
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn history(&self) -> &History {
        self.controller.history()
    }

    pub fn stats(&self) -> &UsageStats {
        self.controller.stats()
    }

    pub fn set_mode(&mut self, mode: ExplanationMode) {
        self.controller.set_mode(mode);
    }

    /// Link requested by the last [`Action::SearchWeb`], if not yet taken.
    pub fn take_open_url(&mut self) -> Option<String> {
        self.open_url.take()
    }

    /// Read the source immediately, skipping the debounce window.
    pub fn read_selection(&self) -> SelectionEvent {
        stabilize(
            &self.source.snapshot(),
            self.config.max_chars,
            self.classifier.as_ref(),
        )
    }

    pub fn handle_selection(&mut self, event: SelectionEvent) -> PanelView {
        match event {
            SelectionEvent::Stable(selection) => {
                self.controller.submit(&selection);
                self.panel.show(&selection, &self.viewport);
                self.selection = Some(selection);
            }
            SelectionEvent::Cleared => {
                self.selection = None;
                self.panel.hide();
                self.controller.clear();
            }
        }
        self.view()
    }

    pub fn handle_completion(&mut self, completion: Completion) -> PanelView {
        self.controller.complete(completion);
        self.view()
    }

    /// Wait until no request is in flight and return the resulting view.
    pub async fn settle(&mut self) -> PanelView {
        while self.controller.state().is_loading() {
            let Some(completion) = self.controller.next_completion().await else {
                break;
            };
            self.controller.complete(completion);
        }
        self.view()
    }

    /// Apply a UI event.
    ///
    /// [`UiEvent::SelectionChanged`] only matters to the debouncer; [`run`](Self::run)
    /// routes it there and this method leaves state untouched.
    pub fn handle_ui(&mut self, event: UiEvent) -> PanelView {
        match event {
            UiEvent::SelectionChanged => {}
            UiEvent::Click { x, y } => {
                self.panel.on_click(x, y);
            }
            UiEvent::KeyDown(key) => {
                if self.panel.on_key(&key) {
                    self.dismiss();
                }
            }
            UiEvent::Resize(viewport) => {
                self.viewport = viewport;
                if let Some(selection) = &self.selection {
                    self.panel.reposition(selection, &self.viewport);
                }
            }
            UiEvent::Close => self.dismiss(),
            UiEvent::Retry => {
                self.controller.retry();
            }
            UiEvent::ResizeTerminal(width) => {
                self.panel.resize_terminal(width, &self.viewport);
            }
            UiEvent::GraceElapsed => {
                let empty = self.source.snapshot().is_empty();
                if self.panel.on_grace_elapsed(empty) {
                    debug!("Popup dismissed by outside click");
                    self.dismiss();
                }
            }
            UiEvent::Action(action) => self.handle_action(action),
            UiEvent::Ask(question) => {
                if self.panel.visible() == Some(PanelKind::Terminal) {
                    if let Some(selection) = &self.selection {
                        self.controller.ask(selection, &question);
                    }
                }
            }
        }
        self.view()
    }

    /// Actions not offered by the current view are ignored.
    fn handle_action(&mut self, action: Action) {
        if !self.panel.actions(self.controller.state()).contains(&action) {
            debug!(?action, "Action not available");
            return;
        }
        match action {
            Action::SearchWeb => {
                self.open_url = self.selection.as_ref().map(|s| search_url(&s.text));
            }
            Action::OpenAnalysis => {
                let Some(selection) = self.selection.as_mut() else {
                    return;
                };
                selection.is_code = true;
                self.controller.submit(selection);
                self.panel.show(selection, &self.viewport);
            }
            Action::Retry => {
                self.controller.retry();
            }
        }
    }

    fn dismiss(&mut self) {
        self.panel.hide();
        self.selection = None;
        self.controller.clear();
    }

    /// Drive the pipeline from a stream of UI events until it closes.
    ///
    /// Each distinct view and every requested link is sent on `out`.
    pub async fn run(mut self, mut ui: mpsc::Receiver<UiEvent>, out: mpsc::Sender<PipelineOutput>) {
        let (notify_tx, notify_rx) = mpsc::channel(64);
        let (selection_tx, mut selection_rx) = mpsc::channel(16);
        let watcher = SelectionWatcher::new(
            self.source.clone(),
            self.classifier.clone(),
            Duration::from_millis(self.config.debounce_ms),
            self.config.max_chars,
        )
        .spawn(notify_rx, selection_tx);

        let grace = Duration::from_millis(self.config.click_grace_ms);
        let mut grace_deadline: Option<tokio::time::Instant> = None;
        let mut last_view = self.view();
        info!("Pipeline started");

        loop {
            let deadline = grace_deadline;
            let view = tokio::select! {
                event = ui.recv() => match event {
                    None => break,
                    Some(UiEvent::SelectionChanged) => {
                        if notify_tx.send(()).await.is_err() {
                            break;
                        }
                        continue;
                    }
                    Some(event) => {
                        let view = self.handle_ui(event);
                        if self.panel.grace_pending() && grace_deadline.is_none() {
                            grace_deadline = Some(tokio::time::Instant::now() + grace);
                        }
                        view
                    }
                },
                Some(event) = selection_rx.recv() => self.handle_selection(event),
                Some(completion) = self.controller.next_completion() => {
                    self.handle_completion(completion)
                }
                _ = sleep_until(deadline), if deadline.is_some() => {
                    grace_deadline = None;
                    self.handle_ui(UiEvent::GraceElapsed)
                }
            };

            if let Some(url) = self.take_open_url() {
                if out.send(PipelineOutput::OpenUrl(url)).await.is_err() {
                    break;
                }
            }
            if view != last_view {
                if out.send(PipelineOutput::View(view.clone())).await.is_err() {
                    break;
                }
                last_view = view;
            }
        }

        drop(notify_tx);
        drop(selection_rx);
        let _ = watcher.await;
        info!("Pipeline stopped");
    }
}

async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    if let Some(deadline) = deadline {
        tokio::time::sleep_until(deadline).await;
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
