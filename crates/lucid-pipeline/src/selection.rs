//! Selection snapshots and stabilized selections.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::CodeClassifier;
use crate::error::ExplainError;
use crate::geometry::Rect;

/// One element on the path from the selection anchor to the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub tag: String,
    #[serde(default)]
    pub class_name: String,
}

impl ElementInfo {
    pub fn new(tag: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class_name: class_name.into(),
        }
    }
}

/// Element ancestors of the anchor node, nearest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorContext {
    pub ancestors: Vec<ElementInfo>,
}

impl AnchorContext {
    pub fn new(ancestors: Vec<ElementInfo>) -> Self {
        Self { ancestors }
    }
}

/// The page selection as read at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub text: String,
    #[serde(default)]
    pub ranges: Vec<Rect>,
    #[serde(default)]
    pub anchor: Option<AnchorContext>,
}

impl SelectionSnapshot {
    pub fn new(text: impl Into<String>, range: Rect) -> Self {
        Self {
            text: text.into(),
            ranges: vec![range],
            anchor: None,
        }
    }

    pub fn with_anchor(mut self, anchor: AnchorContext) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A selection that survived the quiet window and the length bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Trimmed, 1..=max_chars characters.
    pub text: String,
    pub bounding_box: Rect,
    pub is_code: bool,
}

/// Output of the selection watcher.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Stable(Selection),
    Cleared,
}

/// Reads the current page selection.
pub trait SelectionSource: Send + Sync {
    fn snapshot(&self) -> SelectionSnapshot;
}

/// Selection source backed by a value the host replaces as the user selects.
#[derive(Debug, Default)]
pub struct SharedSelection {
    current: Mutex<SelectionSnapshot>,
}

impl SharedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, snapshot: SelectionSnapshot) {
        *self.current.lock() = snapshot;
    }

    pub fn clear(&self) {
        *self.current.lock() = SelectionSnapshot::default();
    }
}

impl SelectionSource for SharedSelection {
    fn snapshot(&self) -> SelectionSnapshot {
        self.current.lock().clone()
    }
}

/// Turn a raw snapshot into a watcher event.
///
/// Empty text, text longer than `max_chars` (in chars, after trimming) and
/// snapshots without ranges all clear the selection.
pub fn stabilize(
    snapshot: &SelectionSnapshot,
    max_chars: usize,
    classifier: &dyn CodeClassifier,
) -> SelectionEvent {
    let text = snapshot.text.trim();
    if text.is_empty() {
        return SelectionEvent::Cleared;
    }

    let len = text.chars().count();
    if len > max_chars {
        let err = ExplainError::InputTooLong {
            len,
            max: max_chars,
        };
        debug!(error = %err, "Selection ignored");
        return SelectionEvent::Cleared;
    }

    let Some(first) = snapshot.ranges.first() else {
        debug!("Selection has no ranges");
        return SelectionEvent::Cleared;
    };

    SelectionEvent::Stable(Selection {
        text: text.to_string(),
        bounding_box: *first,
        is_code: classifier.is_code(snapshot.anchor.as_ref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::HeuristicClassifier;

    fn rect() -> Rect {
        Rect::new(10.0, 10.0, 100.0, 30.0)
    }

    #[test]
    fn test_stabilize_trims_text() {
        let snapshot = SelectionSnapshot::new("  paradigm shift \n", rect());
        let event = stabilize(&snapshot, 1000, &HeuristicClassifier::default());
        assert_eq!(
            event,
            SelectionEvent::Stable(Selection {
                text: "paradigm shift".to_string(),
                bounding_box: rect(),
                is_code: false,
            })
        );
    }

    #[test]
    fn test_stabilize_whitespace_only_clears() {
        let snapshot = SelectionSnapshot::new("   \t", rect());
        assert_eq!(
            stabilize(&snapshot, 1000, &HeuristicClassifier::default()),
            SelectionEvent::Cleared
        );
    }

    #[test]
    fn test_stabilize_length_bound_counts_chars() {
        let classifier = HeuristicClassifier::default();
        let at_limit = SelectionSnapshot::new("é".repeat(1000), rect());
        assert!(matches!(
            stabilize(&at_limit, 1000, &classifier),
            SelectionEvent::Stable(_)
        ));

        let over = SelectionSnapshot::new("a".repeat(1200), rect());
        assert_eq!(stabilize(&over, 1000, &classifier), SelectionEvent::Cleared);
    }

    #[test]
    fn test_stabilize_without_ranges_clears() {
        let snapshot = SelectionSnapshot {
            text: "hello".to_string(),
            ranges: Vec::new(),
            anchor: None,
        };
        assert_eq!(
            stabilize(&snapshot, 1000, &HeuristicClassifier::default()),
            SelectionEvent::Cleared
        );
    }

    #[test]
    fn test_stabilize_uses_first_range_and_classifier() {
        let second = Rect::new(0.0, 40.0, 50.0, 60.0);
        let snapshot = SelectionSnapshot {
            text: "function foo() {}".to_string(),
            ranges: vec![rect(), second],
            anchor: Some(AnchorContext::new(vec![ElementInfo::new("code", "")])),
        };
        let SelectionEvent::Stable(selection) =
            stabilize(&snapshot, 1000, &HeuristicClassifier::default())
        else {
            panic!("expected a stable selection");
        };
        assert_eq!(selection.bounding_box, rect());
        assert!(selection.is_code);
    }

    #[test]
    fn test_shared_selection() {
        let source = SharedSelection::new();
        assert!(source.snapshot().is_empty());
        source.set(SelectionSnapshot::new("hi", rect()));
        assert_eq!(source.snapshot().text, "hi");
        source.clear();
        assert!(source.snapshot().is_empty());
    }
}
