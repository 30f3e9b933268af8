//! Panel state: which panel is shown, where, and what it displays.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use lucid_config::{AnchoringMode, PipelineConfig, TerminalConfig};

use crate::client::Explanation;
use crate::controller::RequestState;
use crate::error::ExplainError;
use crate::geometry::{PanelGeometry, PanelPosition, Rect, Viewport};
use crate::position;
use crate::selection::Selection;

/// First fenced block, with an optional language line.
static FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"```(?:[\w-]*\n)?([\s\S]*?)```").ok());

const NO_IMPROVEMENTS: &str = "No code improvements suggested";

const SEARCH_URL: &str = "https://gemini.google.com/app";
const SEARCH_PROMPT: &str = "Give explanation/solution in detail:\n\n";

/// Which surface renders a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    /// Floating popup next to plain text.
    Popup,
    /// Side panel docked to the right edge, used for code.
    Terminal,
}

impl PanelKind {
    pub fn for_selection(selection: &Selection) -> Self {
        if selection.is_code {
            Self::Terminal
        } else {
            Self::Popup
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Self::Popup => "Text",
            Self::Terminal => "Code",
        }
    }

    pub fn loading_text(&self) -> &'static str {
        match self {
            Self::Popup => "Analyzing...",
            Self::Terminal => "Analyzing code...",
        }
    }
}

/// Buttons offered alongside a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Continue in a chat assistant, see [`search_url`].
    SearchWeb,
    /// Re-open a popup selection as code in the terminal.
    OpenAnalysis,
    Retry,
}

/// Link that hands `text` to a chat assistant for a longer answer.
pub fn search_url(text: &str) -> String {
    let query: String =
        url::form_urlencoded::byte_serialize(format!("{SEARCH_PROMPT}{text}").as_bytes()).collect();
    format!("{SEARCH_URL}?text={query}")
}

/// Keys the panel reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

/// What the panel shows right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum PanelView {
    Hidden,
    Loading {
        kind: PanelKind,
        badge: String,
    },
    Explanation {
        text: String,
        improvements: Option<String>,
        actions: Vec<Action>,
    },
    Terminal {
        improved_code: Option<String>,
        explanation: String,
        width: f64,
        actions: Vec<Action>,
    },
    Error {
        message: String,
        retry: bool,
    },
    NeedsCredentials,
}

impl PanelView {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => Ok(()),
            Self::Loading { kind, badge } => write!(f, "[{badge}] {}", kind.loading_text()),
            Self::Explanation {
                text, improvements, ..
            } => {
                write!(f, "{text}")?;
                if let Some(improvements) = improvements {
                    write!(f, "\n\n{improvements}")?;
                }
                Ok(())
            }
            Self::Terminal {
                improved_code,
                explanation,
                ..
            } => {
                writeln!(f, "$ improved code")?;
                writeln!(f, "{}", improved_code.as_deref().unwrap_or(NO_IMPROVEMENTS))?;
                writeln!(f)?;
                writeln!(f, "$ explanation")?;
                write!(f, "{explanation}")
            }
            Self::Error { message, retry } => {
                write!(f, "Error: {message}")?;
                if *retry {
                    write!(f, " (retry available)")?;
                }
                Ok(())
            }
            Self::NeedsCredentials => write!(f, "{}", ExplainError::NeedsConfiguration.user_message()),
        }
    }
}

/// Code and prose split out of a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalContent {
    pub improved_code: Option<String>,
    pub explanation: String,
}

/// Split the first fenced code block out of `text`.
pub fn parse_terminal(text: &str) -> TerminalContent {
    let Some(captures) = FENCE.as_ref().and_then(|re| re.captures(text)) else {
        return TerminalContent {
            improved_code: None,
            explanation: text.trim().to_string(),
        };
    };

    let improved_code = captures
        .get(1)
        .map(|m| m.as_str().trim().to_string())
        .filter(|code| !code.is_empty());

    let explanation = match captures.get(0) {
        Some(block) => format!("{}{}", &text[..block.start()], &text[block.end()..]),
        None => text.to_string(),
    };

    TerminalContent {
        improved_code,
        explanation: explanation.trim().to_string(),
    }
}

fn terminal_source(explanation: &Explanation) -> String {
    match &explanation.improvements {
        Some(improvements) => format!("{}\n\n{}", explanation.text, improvements),
        None => explanation.text.clone(),
    }
}

/// Visibility, placement and dismissal rules for the two panels.
///
/// Only one panel is visible at a time.
#[derive(Debug, Clone)]
pub struct PanelStateMachine {
    visible: Option<PanelKind>,
    position: Option<PanelPosition>,
    bounds: Option<Rect>,
    geometry: PanelGeometry,
    anchoring: AnchoringMode,
    terminal: TerminalConfig,
    terminal_width: f64,
    grace_pending: bool,
}

impl PanelStateMachine {
    pub fn new(geometry: PanelGeometry, anchoring: AnchoringMode, terminal: TerminalConfig) -> Self {
        Self {
            visible: None,
            position: None,
            bounds: None,
            geometry,
            anchoring,
            terminal_width: terminal.default_width,
            terminal,
            grace_pending: false,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            PanelGeometry::from(&config.panel),
            config.panel.anchoring,
            config.terminal.clone(),
        )
    }

    pub fn visible(&self) -> Option<PanelKind> {
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible.is_some()
    }

    /// Popup origin, in the anchoring mode's coordinates.
    pub fn position(&self) -> Option<PanelPosition> {
        self.position
    }

    /// Visible panel footprint in viewport coordinates.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn terminal_width(&self) -> f64 {
        self.terminal_width
    }

    pub fn grace_pending(&self) -> bool {
        self.grace_pending
    }

    /// Show the panel for `selection`.
    pub fn show(&mut self, selection: &Selection, viewport: &Viewport) {
        let kind = PanelKind::for_selection(selection);
        self.visible = Some(kind);
        self.grace_pending = false;
        self.place(kind, selection, viewport);
    }

    /// Recompute placement after the viewport changed.
    pub fn reposition(&mut self, selection: &Selection, viewport: &Viewport) {
        if let Some(kind) = self.visible {
            self.place(kind, selection, viewport);
        }
    }

    pub fn hide(&mut self) {
        if self.visible.take().is_some() {
            debug!("Panel hidden");
        }
        self.position = None;
        self.bounds = None;
        self.grace_pending = false;
    }

    /// Handle a click at viewport coordinates. Returns `true` when a
    /// dismissal grace check was armed.
    ///
    /// Clicks inside the panel are ignored. Only the popup is dismissed by
    /// clicking elsewhere; the terminal stays until closed.
    pub fn on_click(&mut self, x: f64, y: f64) -> bool {
        if self.visible != Some(PanelKind::Popup) {
            return false;
        }
        if self.bounds.is_some_and(|b| b.contains(x, y)) {
            return false;
        }
        self.grace_pending = true;
        true
    }

    /// Resolve a pending grace check. Returns `true` if the panel was hidden.
    pub fn on_grace_elapsed(&mut self, selection_empty: bool) -> bool {
        if !std::mem::take(&mut self.grace_pending) {
            return false;
        }
        if selection_empty && self.visible == Some(PanelKind::Popup) {
            self.hide();
            return true;
        }
        false
    }

    /// Returns `true` if the key hid the panel.
    pub fn on_key(&mut self, key: &Key) -> bool {
        match key {
            Key::Escape if self.is_visible() => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    /// Set the terminal width. Widths outside the configured range are
    /// rejected and the previous width kept.
    pub fn resize_terminal(&mut self, width: f64, viewport: &Viewport) -> bool {
        if !(self.terminal.min_width..=self.terminal.max_width).contains(&width) {
            debug!(width, "Terminal width out of range");
            return false;
        }
        self.terminal_width = width;
        if self.visible == Some(PanelKind::Terminal) {
            self.bounds = Some(self.terminal_bounds(viewport));
        }
        true
    }

    /// Project controller state onto the visible panel.
    pub fn view(&self, state: &RequestState) -> PanelView {
        let Some(kind) = self.visible else {
            return PanelView::Hidden;
        };

        match state {
            RequestState::Idle | RequestState::Loading => PanelView::Loading {
                kind,
                badge: kind.badge().to_string(),
            },
            RequestState::Success(explanation) => match kind {
                PanelKind::Popup => PanelView::Explanation {
                    text: explanation.text.clone(),
                    improvements: explanation.improvements.clone(),
                    actions: vec![Action::SearchWeb, Action::OpenAnalysis],
                },
                PanelKind::Terminal => {
                    let content = parse_terminal(&terminal_source(explanation));
                    PanelView::Terminal {
                        improved_code: content.improved_code,
                        explanation: content.explanation,
                        width: self.terminal_width,
                        actions: Vec::new(),
                    }
                }
            },
            RequestState::Error(ExplainError::NeedsConfiguration) => PanelView::NeedsCredentials,
            RequestState::Error(err) => PanelView::Error {
                message: err.user_message(),
                retry: err.is_retryable(),
            },
        }
    }

    /// Actions available in the current view.
    pub fn actions(&self, state: &RequestState) -> Vec<Action> {
        match self.view(state) {
            PanelView::Explanation { actions, .. } | PanelView::Terminal { actions, .. } => actions,
            PanelView::Error { retry: true, .. } => vec![Action::Retry],
            _ => Vec::new(),
        }
    }

    fn place(&mut self, kind: PanelKind, selection: &Selection, viewport: &Viewport) {
        match kind {
            PanelKind::Popup => {
                let pos = position::resolve(
                    &selection.bounding_box,
                    viewport,
                    &self.geometry,
                    self.anchoring,
                );
                self.bounds = Some(position::panel_bounds(
                    &pos,
                    viewport,
                    &self.geometry,
                    self.anchoring,
                ));
                self.position = Some(pos);
            }
            PanelKind::Terminal => {
                self.position = None;
                self.bounds = Some(self.terminal_bounds(viewport));
            }
        }
    }

    fn terminal_bounds(&self, viewport: &Viewport) -> Rect {
        Rect::new(
            (viewport.width - self.terminal_width).max(0.0),
            0.0,
            viewport.width,
            viewport.height,
        )
    }
}

impl Default for PanelStateMachine {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

#[cfg(test)]
#[path = "panel_tests.rs"]
mod tests;
