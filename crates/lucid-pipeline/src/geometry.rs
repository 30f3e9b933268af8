//! Page geometry in CSS pixels.

use serde::{Deserialize, Serialize};

use lucid_config::PanelConfig;

/// Axis-aligned rectangle, viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle from an origin and a size.
    pub fn from_origin(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Edges are inclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }
}

/// Visible window size and scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    pub fn with_scroll(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Top-left corner of a placed panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelPosition {
    pub x: f64,
    pub y: f64,
}

/// Popup footprint and spacing used for placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    pub width: f64,
    pub height: f64,
    pub gap: f64,
    pub margin: f64,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 200.0,
            gap: 10.0,
            margin: 10.0,
        }
    }
}

impl From<&PanelConfig> for PanelGeometry {
    fn from(config: &PanelConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            gap: config.gap,
            margin: config.margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_size() {
        let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::from_origin(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(0.0, 0.0));
        assert!(rect.contains(10.0, 10.0));
        assert!(!rect.contains(10.5, 5.0));
    }

    #[test]
    fn test_geometry_from_config() {
        let config = PanelConfig {
            width: 400.0,
            ..PanelConfig::default()
        };
        let geometry = PanelGeometry::from(&config);
        assert_eq!(geometry.width, 400.0);
        assert_eq!(geometry.height, 200.0);
        assert_eq!(geometry.margin, 10.0);
    }
}
