//! Responsive grid layout.

use preloader_core::Viewport;

/// Fewest rows the grid ever has.
pub const MIN_ROWS: usize = 6;
/// Smallest cell edge in pixels.
pub const MIN_CELL_PX: u32 = 18;
/// Smallest gap between cells in pixels.
pub const MIN_GAP_PX: u32 = 8;

const ROW_PITCH_NARROW_PX: u32 = 70;
const ROW_PITCH_WIDE_PX: u32 = 90;
const GAP_RATIO: f64 = 0.02;
const FONT_SCALE: f64 = 0.82;

/// Computed geometry of the grid container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    /// Edge of the square cell in pixels.
    pub cell: u32,
    /// Horizontal gap between columns.
    pub gap_x: u32,
    /// Vertical gap between rows.
    pub gap_y: u32,
    /// Glyph size in pixels.
    pub font_size: u32,
}

impl GridLayout {
    /// Top-left pixel of the cell at `(row, col)`.
    pub fn cell_origin(&self, row: usize, col: usize) -> (u32, u32) {
        let x = col as u32 * (self.cell + self.gap_x);
        let y = row as u32 * (self.cell + self.gap_y);
        (x, y)
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// Compute the layout of a `cols`-wide grid for the given viewport.
///
/// Rows follow the viewport height (denser below the narrow breakpoint),
/// the square cell is the largest that fits both directions, and whatever
/// space is left over becomes the gaps so the grid spans the viewport.
pub fn compute_layout(viewport: Viewport, cols: usize) -> GridLayout {
    let cols = cols.max(1);
    let vw = i64::from(viewport.width);
    let vh = i64::from(viewport.height);

    let pitch = if viewport.is_narrow() {
        ROW_PITCH_NARROW_PX
    } else {
        ROW_PITCH_WIDE_PX
    };
    let rows = MIN_ROWS.max((viewport.height / pitch) as usize);

    let gap = i64::from(MIN_GAP_PX.max((f64::from(viewport.min_side()) * GAP_RATIO) as u32));
    let n_cols = cols as i64;
    let n_rows = rows as i64;
    let cell_w = (vw - gap * (n_cols - 1)).div_euclid(n_cols);
    let cell_h = (vh - gap * (n_rows - 1)).div_euclid(n_rows);
    let cell = i64::from(MIN_CELL_PX).max(cell_w.min(cell_h));

    GridLayout {
        cols,
        rows,
        cell: cell as u32,
        gap_x: spread(vw - cell * n_cols, n_cols),
        gap_y: spread(vh - cell * n_rows, n_rows),
        font_size: (cell as f64 * FONT_SCALE) as u32,
    }
}

/// Even share of `free` pixels between `n` items, never negative.
fn spread(free: i64, n: i64) -> u32 {
    if n > 1 && free > 0 {
        (free / (n - 1)) as u32
    } else {
        0
    }
}

/// Columns moved per tick: narrow screens get two to stay lively.
pub fn ticks_per_batch(viewport: Viewport) -> usize {
    if viewport.is_narrow() { 2 } else { 1 }
}
