//! The seam between the controller and whatever draws the preloader.

use preloader_core::Viewport;

use crate::{grid::Grid, layout::GridLayout};

/// Front end that owns the visuals: a DOM page, a terminal, a test recorder.
///
/// The controller calls these in a fixed order: `apply_layout` before
/// `render_grid`, and `set_cell_active(.., false)` before the matching
/// `set_cell_active(.., true)` for every move.
pub trait Host {
    /// Current viewport size in pixels.
    fn viewport(&self) -> Viewport;

    /// Apply grid container geometry (template columns/rows, gaps, font size).
    fn apply_layout(&mut self, layout: &GridLayout);

    /// Replace every rendered cell with the contents of `grid`.
    fn render_grid(&mut self, grid: &Grid);

    /// Toggle the highlight of one cell.
    fn set_cell_active(&mut self, row: usize, col: usize, active: bool);

    /// Put the page into its loading state and make the overlay opaque.
    fn show_overlay(&mut self);

    /// Start the overlay fade-out.
    fn fade_overlay(&mut self);

    /// Leave the loading state; the overlay is gone.
    fn hide_overlay(&mut self);

    /// Drop any URL fragment and scroll to the top.
    fn reset_location(&mut self);

    fn scroll_to_top(&mut self);

    /// Perform the real navigation to `href`.
    fn navigate(&mut self, href: &str);
}
