//! # Lucid Pipeline
//!
//! Selection to explanation pipeline:
//!
//! ```text
//! selection change ─▶ SelectionWatcher (debounce) ─▶ CodeClassifier
//!                                                        │
//!          PanelView ◀── PanelStateMachine ◀── ExplanationRequestController ─▶ relay
//! ```
//!
//! The page is modelled rather than driven: hosts feed [`UiEvent`]s and a
//! [`SelectionSource`] in, and render the [`PanelView`]s that come out (or
//! open the links in [`PipelineOutput::OpenUrl`]).

pub mod classifier;
pub mod client;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod history;
pub mod panel;
pub mod pipeline;
pub mod position;
pub mod selection;
pub mod watcher;

#[cfg(test)]
pub(crate) mod mock_client;

pub use classifier::{CodeClassifier, HeuristicClassifier};
pub use client::{ExplainClient, Explanation, RelayClient};
pub use controller::{Completion, ExplanationRequestController, RequestState};
pub use error::{ExplainError, ProviderFailure};
pub use geometry::{PanelGeometry, PanelPosition, Rect, Viewport};
pub use history::{ExplanationRecord, History, UsageStats};
pub use panel::{
    parse_terminal, search_url, Action, Key, PanelKind, PanelStateMachine, PanelView,
    TerminalContent,
};
pub use pipeline::{Pipeline, PipelineOutput, UiEvent};
pub use selection::{
    AnchorContext, ElementInfo, Selection, SelectionEvent, SelectionSnapshot, SelectionSource,
    SharedSelection,
};
pub use watcher::{SelectionDebouncer, SelectionWatcher};
