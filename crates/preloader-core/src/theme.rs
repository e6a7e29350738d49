//! Color themes for the matrix glyphs.

use serde::{Deserialize, Serialize};

/// Color theme for the active matrix cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTheme {
    #[default]
    Green,
    Cyan,
    White,
    Magenta,
    Yellow,
    Red,
    Blue,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Green => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
            ColorTheme::White => ColorTheme::Green,
        }
    }

    /// RGB triple for the highlighted glyphs.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::Green => (80, 255, 120),
            ColorTheme::Cyan => (0, 220, 255),
            ColorTheme::White => (240, 240, 240),
            ColorTheme::Magenta => (255, 80, 220),
            ColorTheme::Yellow => (255, 220, 60),
            ColorTheme::Red => (255, 70, 70),
            ColorTheme::Blue => (70, 130, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_returns_to_start() {
        let mut theme = ColorTheme::default();
        for _ in 0..7 {
            theme = theme.next();
        }
        assert_eq!(theme, ColorTheme::default());
    }
}
