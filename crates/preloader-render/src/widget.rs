//! Ratatui widget drawing the overlay.

use preloader_core::{CellMetrics, ColorTheme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Clear, Widget},
};

use crate::{
    color::{DIM_FG, OVERLAY_BG, blend},
    surface::OverlaySurface,
};

/// Draws an [`OverlaySurface`] over the whole area.
///
/// The surface's layout is in pixels; `metrics` maps it back onto terminal
/// cells. Each grid cell's glyph lands on the terminal cell under its center.
#[derive(Debug, Clone, Copy)]
pub struct MatrixOverlay<'a> {
    surface: &'a OverlaySurface,
    metrics: CellMetrics,
    theme: ColorTheme,
    opacity: f32,
}

impl<'a> MatrixOverlay<'a> {
    pub fn new(surface: &'a OverlaySurface) -> Self {
        Self {
            surface,
            metrics: CellMetrics::default(),
            theme: ColorTheme::default(),
            opacity: 1.0,
        }
    }

    pub fn metrics(mut self, metrics: CellMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn theme(mut self, theme: ColorTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Glyph opacity, used while fading out.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

impl Widget for MatrixOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.surface.is_visible() {
            return;
        }

        Clear.render(area, buf);
        buf.set_style(area, Style::new().bg(blend(OVERLAY_BG, OVERLAY_BG, 1.0)));

        let Some(layout) = self.surface.layout() else {
            return;
        };
        let px_w = self.metrics.width.max(1);
        let px_h = self.metrics.height.max(1);
        let active_style = Style::new()
            .fg(blend(self.theme.rgb(), OVERLAY_BG, self.opacity))
            .add_modifier(Modifier::BOLD);
        let idle_style = Style::new().fg(blend(DIM_FG, OVERLAY_BG, self.opacity));

        for row in 0..self.surface.rows() {
            for col in 0..self.surface.cols() {
                let Some((label, active)) = self.surface.cell(row, col) else {
                    continue;
                };
                let (x, y) = layout.cell_origin(row, col);
                let half = layout.cell / 2;
                let tx = u32::from(area.x) + (x + half) / px_w;
                let ty = u32::from(area.y) + (y + half) / px_h;
                if tx >= u32::from(area.right()) || ty >= u32::from(area.bottom()) {
                    continue;
                }
                let style = if active { active_style } else { idle_style };
                if let Some(cell) = buf.cell_mut((tx as u16, ty as u16)) {
                    cell.set_char(label).set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preloader_engine::{Grid, compute_layout};
    use rand::{SeedableRng, rngs::SmallRng};
    use ratatui::style::Color;

    fn surface(width: u16, height: u16) -> (OverlaySurface, Grid) {
        let metrics = CellMetrics::default();
        let layout = compute_layout(metrics.viewport(width, height), 7);
        let labels: Vec<char> = "sohmhos".chars().collect();
        let grid = Grid::build(&labels, layout.rows, &mut SmallRng::seed_from_u64(2));
        let mut surface = OverlaySurface::new();
        surface.apply_layout(&layout);
        surface.render_grid(&grid);
        surface.show();
        (surface, grid)
    }

    fn glyph_count(buf: &Buffer) -> usize {
        buf.content()
            .iter()
            .filter(|c| "sohm".contains(c.symbol()))
            .count()
    }

    #[test]
    fn test_hidden_overlay_draws_nothing() {
        let (mut surface, _) = surface(80, 24);
        surface.hide();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        MatrixOverlay::new(&surface).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_draws_every_cell() {
        // 80x48 terminal = 640x768px: cells are 90px+ apart, no collisions.
        let (surface, grid) = surface(80, 48);
        let area = Rect::new(0, 0, 80, 48);
        let mut buf = Buffer::empty(area);
        MatrixOverlay::new(&surface).render(area, &mut buf);

        assert_eq!(glyph_count(&buf), grid.rows() * grid.cols());
    }

    #[test]
    fn test_active_cells_use_theme_color() {
        let (surface, grid) = surface(80, 48);
        let area = Rect::new(0, 0, 80, 48);
        let mut buf = Buffer::empty(area);
        MatrixOverlay::new(&surface)
            .theme(ColorTheme::Cyan)
            .render(area, &mut buf);

        let (r, g, b) = ColorTheme::Cyan.rgb();
        let bright = buf
            .content()
            .iter()
            .filter(|c| c.fg == Color::Rgb(r, g, b))
            .count();
        assert_eq!(bright, grid.cols());
    }

    #[test]
    fn test_faded_out_glyphs_match_background() {
        let (surface, _) = surface(80, 48);
        let area = Rect::new(0, 0, 80, 48);
        let mut buf = Buffer::empty(area);
        MatrixOverlay::new(&surface).opacity(0.0).render(area, &mut buf);

        let bg = blend(OVERLAY_BG, OVERLAY_BG, 1.0);
        assert!(
            buf.content()
                .iter()
                .filter(|c| c.symbol() != " ")
                .all(|c| c.fg == bg)
        );
    }

    #[test]
    fn test_offset_area() {
        let (surface, _) = surface(80, 48);
        let area = Rect::new(0, 2, 80, 48);
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 50));
        MatrixOverlay::new(&surface).render(area, &mut buf);
        // Nothing drawn above the area.
        assert!((0..80).all(|x| buf[(x, 0)].symbol() == " " && buf[(x, 1)].symbol() == " "));
    }
}
