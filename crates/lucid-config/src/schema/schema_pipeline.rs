//! Selection pipeline configuration.

use serde::{Deserialize, Serialize};

use lucid_protocols::ExplanationMode;

/// Pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Quiet period before a selection counts as stable.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Longest selection (in characters) that is explained.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Base URL of the relay server.
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    #[serde(default)]
    pub mode: ExplanationMode,

    /// How many element ancestors of the anchor the code classifier inspects.
    #[serde(default = "default_classifier_depth")]
    pub classifier_depth: usize,

    /// Explanation history entries kept, newest first.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Delay before a click outside the panel is allowed to dismiss it.
    #[serde(default = "default_click_grace_ms")]
    pub click_grace_ms: u64,

    #[serde(default)]
    pub panel: PanelConfig,

    #[serde(default)]
    pub terminal: TerminalConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_chars: default_max_chars(),
            request_timeout_secs: default_request_timeout_secs(),
            relay_url: default_relay_url(),
            mode: ExplanationMode::default(),
            classifier_depth: default_classifier_depth(),
            history_limit: default_history_limit(),
            click_grace_ms: default_click_grace_ms(),
            panel: PanelConfig::default(),
            terminal: TerminalConfig::default(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_max_chars() -> usize {
    lucid_protocols::MAX_TEXT_CHARS
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_relay_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_classifier_depth() -> usize {
    1
}

fn default_history_limit() -> usize {
    100
}

fn default_click_grace_ms() -> u64 {
    10
}

/// Coordinate space the popup is positioned in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchoringMode {
    /// Fixed positioning, scroll offsets ignored.
    Viewport,
    /// Absolute positioning in document coordinates.
    #[default]
    Document,
}

/// Popup footprint used for placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default = "default_panel_width")]
    pub width: f64,
    #[serde(default = "default_panel_height")]
    pub height: f64,
    /// Distance between the selection and the panel.
    #[serde(default = "default_spacing")]
    pub gap: f64,
    /// Minimum distance between the panel and the viewport edges.
    #[serde(default = "default_spacing")]
    pub margin: f64,
    #[serde(default)]
    pub anchoring: AnchoringMode,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: default_panel_width(),
            height: default_panel_height(),
            gap: default_spacing(),
            margin: default_spacing(),
            anchoring: AnchoringMode::default(),
        }
    }
}

fn default_panel_width() -> f64 {
    320.0
}

fn default_panel_height() -> f64 {
    200.0
}

fn default_spacing() -> f64 {
    10.0
}

/// Side terminal panel used for code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default = "default_terminal_width")]
    pub default_width: f64,
    #[serde(default = "default_terminal_min_width")]
    pub min_width: f64,
    #[serde(default = "default_terminal_max_width")]
    pub max_width: f64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            default_width: default_terminal_width(),
            min_width: default_terminal_min_width(),
            max_width: default_terminal_max_width(),
        }
    }
}

fn default_terminal_width() -> f64 {
    400.0
}

fn default_terminal_min_width() -> f64 {
    300.0
}

fn default_terminal_max_width() -> f64 {
    800.0
}
