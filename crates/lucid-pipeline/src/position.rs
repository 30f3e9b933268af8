//! Popup placement next to a selection.
//!
//! The panel goes to the right of the selection, flips to the left when it
//! would overflow the right edge, is pulled up when it would overflow the
//! bottom edge, and never starts closer than `margin` to the top-left.

use lucid_config::AnchoringMode;

use crate::geometry::{PanelGeometry, PanelPosition, Rect, Viewport};

/// Compute the popup origin for a selection rectangle.
///
/// `rect` is in viewport coordinates. In [`AnchoringMode::Document`] the
/// scroll offsets are added to every term and the result is a document
/// coordinate; in [`AnchoringMode::Viewport`] scroll is ignored.
pub fn resolve(
    rect: &Rect,
    viewport: &Viewport,
    geometry: &PanelGeometry,
    anchoring: AnchoringMode,
) -> PanelPosition {
    let (sx, sy) = match anchoring {
        AnchoringMode::Document => (viewport.scroll_x, viewport.scroll_y),
        AnchoringMode::Viewport => (0.0, 0.0),
    };

    let mut x = rect.right + sx + geometry.gap;
    let mut y = rect.top + sy;

    if x + geometry.width > viewport.width + sx {
        x = rect.left + sx - geometry.width - geometry.gap;
    }
    if y + geometry.height > viewport.height + sy {
        y = viewport.height + sy - geometry.height - geometry.margin;
    }

    PanelPosition {
        x: x.max(sx + geometry.margin),
        y: y.max(sy + geometry.margin),
    }
}

/// Footprint of a placed popup, converted back to viewport coordinates.
pub fn panel_bounds(
    position: &PanelPosition,
    viewport: &Viewport,
    geometry: &PanelGeometry,
    anchoring: AnchoringMode,
) -> Rect {
    let rect = Rect::from_origin(position.x, position.y, geometry.width, geometry.height);
    match anchoring {
        AnchoringMode::Document => rect.translate(-viewport.scroll_x, -viewport.scroll_y),
        AnchoringMode::Viewport => rect,
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod tests;
