//! Terminal-side mirror of the overlay markup.

use preloader_engine::{Grid, GridLayout};

/// Visibility of the overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlayState {
    #[default]
    Hidden,
    Visible,
    /// Fading out since `started_ms`.
    Fading { started_ms: u64 },
}

/// Cells, layout and visibility of the overlay, updated like a DOM would be.
#[derive(Debug, Clone, Default)]
pub struct OverlaySurface {
    layout: Option<GridLayout>,
    labels: Vec<char>,
    /// `active[row][col]`.
    active: Vec<Vec<bool>>,
    state: OverlayState,
}

impl OverlaySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_layout(&mut self, layout: &GridLayout) {
        self.layout = Some(*layout);
    }

    /// Drop all cells and recreate them from `grid`.
    pub fn render_grid(&mut self, grid: &Grid) {
        self.labels = (0..grid.cols()).filter_map(|col| grid.label(col)).collect();
        self.active = vec![vec![false; grid.cols()]; grid.rows()];
        for cell in grid.cells().filter(|c| c.active) {
            self.active[cell.row][cell.col] = true;
        }
    }

    /// Toggle one cell; out-of-range positions are ignored.
    pub fn set_cell_active(&mut self, row: usize, col: usize, active: bool) {
        if let Some(flag) = self.active.get_mut(row).and_then(|r| r.get_mut(col)) {
            *flag = active;
        }
    }

    pub fn show(&mut self) {
        self.state = OverlayState::Visible;
    }

    pub fn fade(&mut self, now_ms: u64) {
        self.state = OverlayState::Fading { started_ms: now_ms };
    }

    pub fn hide(&mut self) {
        self.state = OverlayState::Hidden;
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state != OverlayState::Hidden
    }

    /// Opacity at `now_ms` for a fade lasting `fade_ms`.
    pub fn opacity(&self, now_ms: u64, fade_ms: u64) -> f32 {
        match self.state {
            OverlayState::Hidden => 0.0,
            OverlayState::Visible => 1.0,
            OverlayState::Fading { .. } if fade_ms == 0 => 0.0,
            OverlayState::Fading { started_ms } => {
                let elapsed = now_ms.saturating_sub(started_ms) as f32;
                (1.0 - elapsed / fade_ms as f32).clamp(0.0, 1.0)
            }
        }
    }

    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    pub fn rows(&self) -> usize {
        self.active.len()
    }

    pub fn cols(&self) -> usize {
        self.labels.len()
    }

    /// Label and highlight of the cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<(char, bool)> {
        let active = *self.active.get(row)?.get(col)?;
        Some((self.labels[col], active))
    }

    /// Number of highlighted cells in each column.
    pub fn active_counts(&self) -> Vec<usize> {
        (0..self.cols())
            .map(|col| self.active.iter().filter(|row| row[col]).count())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preloader_core::Viewport;
    use preloader_engine::compute_layout;
    use rand::{SeedableRng, rngs::SmallRng};

    fn grid(rows: usize) -> Grid {
        let labels: Vec<char> = "sohmhos".chars().collect();
        Grid::build(&labels, rows, &mut SmallRng::seed_from_u64(4))
    }

    #[test]
    fn test_render_grid_mirrors_active_rows() {
        let grid = grid(6);
        let mut surface = OverlaySurface::new();
        surface.render_grid(&grid);

        assert_eq!((surface.rows(), surface.cols()), (6, 7));
        assert_eq!(surface.active_counts(), vec![1; 7]);
        for col in 0..7 {
            let row = grid.active_row(col).unwrap();
            assert_eq!(surface.cell(row, col), Some((grid.label(col).unwrap(), true)));
        }
    }

    #[test]
    fn test_set_cell_active_out_of_range() {
        let mut surface = OverlaySurface::new();
        surface.render_grid(&grid(6));
        surface.set_cell_active(99, 0, true);
        surface.set_cell_active(0, 99, true);
        assert_eq!(surface.active_counts(), vec![1; 7]);
    }

    #[test]
    fn test_opacity_over_fade() {
        let mut surface = OverlaySurface::new();
        assert_eq!(surface.opacity(0, 650), 0.0);
        surface.show();
        assert_eq!(surface.opacity(0, 650), 1.0);
        surface.fade(1000);
        assert_eq!(surface.opacity(1000, 650), 1.0);
        assert!((surface.opacity(1325, 650) - 0.5).abs() < 1e-6);
        assert_eq!(surface.opacity(2000, 650), 0.0);
        assert_eq!(surface.opacity(1000, 0), 0.0);
    }

    #[test]
    fn test_layout_is_kept() {
        let layout = compute_layout(Viewport::new(640, 384), 7);
        let mut surface = OverlaySurface::new();
        surface.apply_layout(&layout);
        assert_eq!(surface.layout(), Some(&layout));
    }
}
