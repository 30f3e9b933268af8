//! Code detection for selections.

use crate::selection::AnchorContext;

/// Tags whose content is treated as code.
const CODE_TAGS: &[&str] = &["pre", "code", "script", "style"];

/// Class-name fragments that mark an editor or highlighted code block.
const CODE_CLASS_HINTS: &[&str] = &[
    "editor",
    "code",
    "syntax",
    "highlight",
    "javascript",
    "python",
    "java",
    "cpp",
];

/// Decides whether a selection is code.
pub trait CodeClassifier: Send + Sync {
    fn is_code(&self, anchor: Option<&AnchorContext>) -> bool;
}

/// Tag and class-name heuristic over the anchor's element ancestors.
///
/// False positives and negatives are expected; a `<div class="codex">` is
/// code to this classifier.
#[derive(Debug, Clone)]
pub struct HeuristicClassifier {
    depth: usize,
}

impl HeuristicClassifier {
    /// `depth` is how many ancestors to inspect, nearest first. `1` looks
    /// only at the element directly containing the selection.
    pub fn new(depth: usize) -> Self {
        Self {
            depth: depth.max(1),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self::new(1)
    }
}

impl CodeClassifier for HeuristicClassifier {
    fn is_code(&self, anchor: Option<&AnchorContext>) -> bool {
        let Some(anchor) = anchor else {
            return false;
        };

        anchor.ancestors.iter().take(self.depth).any(|element| {
            let tag = element.tag.to_ascii_lowercase();
            if CODE_TAGS.contains(&tag.as_str()) {
                return true;
            }
            let class_name = element.class_name.to_lowercase();
            CODE_CLASS_HINTS
                .iter()
                .any(|hint| class_name.contains(hint))
        })
    }
}
