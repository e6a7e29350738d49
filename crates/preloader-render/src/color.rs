//! Color helpers for the overlay.

use preloader_core::ColorTheme;
use ratatui::style::Color;

/// Background of the overlay.
pub const OVERLAY_BG: (u8, u8, u8) = (6, 8, 6);

/// Inactive glyph color.
pub const DIM_FG: (u8, u8, u8) = (38, 52, 40);

/// Ratatui color of a theme at full opacity.
pub fn theme_color(theme: ColorTheme) -> Color {
    let (r, g, b) = theme.rgb();
    Color::Rgb(r, g, b)
}

/// Mix `fg` over `bg` with `opacity` in `0.0..=1.0`.
pub fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), opacity: f32) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f32::from(b) + (f32::from(a) - f32::from(b)) * t).round() as u8;
    Color::Rgb(mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend((200, 100, 0), (0, 0, 0), 1.0), Color::Rgb(200, 100, 0));
        assert_eq!(blend((200, 100, 0), (10, 20, 30), 0.0), Color::Rgb(10, 20, 30));
    }

    #[test]
    fn test_blend_midpoint() {
        assert_eq!(blend((200, 100, 0), (0, 0, 0), 0.5), Color::Rgb(100, 50, 0));
    }

    #[test]
    fn test_blend_clamps_opacity() {
        assert_eq!(blend((200, 100, 0), (0, 0, 0), 3.0), Color::Rgb(200, 100, 0));
    }
}
