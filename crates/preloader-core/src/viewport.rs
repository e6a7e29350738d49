//! Viewport geometry.

use serde::{Deserialize, Serialize};

/// Widths below this many pixels use the narrow (denser) layout.
pub const NARROW_BREAKPOINT_PX: u32 = 480;

/// Visible page area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Is the viewport below the narrow breakpoint?
    pub fn is_narrow(&self) -> bool {
        self.width < NARROW_BREAKPOINT_PX
    }

    /// The smaller of width and height.
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }
}

/// Pixel size of one terminal character cell.
///
/// Terminal hosts express their size in character cells; multiplying by
/// these metrics gives a pixel viewport the layout rules can work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellMetrics {
    pub width: u32,
    pub height: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: 8,
            height: 16,
        }
    }
}

impl CellMetrics {
    /// Pixel viewport covering `cols × rows` terminal cells.
    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            u32::from(cols) * self.width.max(1),
            u32::from(rows) * self.height.max(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_breakpoint() {
        assert!(Viewport::new(479, 800).is_narrow());
        assert!(!Viewport::new(480, 800).is_narrow());
    }

    #[test]
    fn test_min_side() {
        assert_eq!(Viewport::new(1280, 720).min_side(), 720);
        assert_eq!(Viewport::new(320, 640).min_side(), 320);
    }

    #[test]
    fn test_cell_metrics_viewport() {
        let metrics = CellMetrics::default();
        assert_eq!(metrics.viewport(80, 24), Viewport::new(640, 384));
    }

    #[test]
    fn test_cell_metrics_zero_is_clamped() {
        let metrics = CellMetrics {
            width: 0,
            height: 0,
        };
        assert_eq!(metrics.viewport(10, 5), Viewport::new(10, 5));
    }
}
