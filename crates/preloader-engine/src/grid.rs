//! Grid of labeled cells with one active cell per column.

use rand::Rng;

/// A single labeled grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub label: char,
    pub active: bool,
}

/// The matrix grid.
///
/// Stores only the active row of every column; a cell is active exactly
/// when its row is the one recorded for its column, so every column always
/// has one active cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    labels: Vec<char>,
    rows: usize,
    active_row_by_col: Vec<usize>,
}

impl Grid {
    /// Build a fresh grid with a random active row in every column.
    ///
    /// Columns are labeled with the characters of `labels`; `rows` is raised
    /// to one when zero.
    pub fn build<R: Rng + ?Sized>(labels: &[char], rows: usize, rng: &mut R) -> Self {
        let rows = rows.max(1);
        let active_row_by_col = labels.iter().map(|_| rng.random_range(0..rows)).collect();
        Self {
            labels: labels.to_vec(),
            rows,
            active_row_by_col,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.labels.len()
    }

    /// Label of every cell in column `col`.
    pub fn label(&self, col: usize) -> Option<char> {
        self.labels.get(col).copied()
    }

    /// Active row of column `col`.
    pub fn active_row(&self, col: usize) -> Option<usize> {
        self.active_row_by_col.get(col).copied()
    }

    pub fn is_active(&self, row: usize, col: usize) -> bool {
        self.active_row(col) == Some(row)
    }

    /// Move the active cell of `col` to `row`, returning the previous row.
    ///
    /// Returns `None` (and changes nothing) when either index is out of range.
    pub fn set_active(&mut self, col: usize, row: usize) -> Option<usize> {
        if row >= self.rows {
            return None;
        }
        let slot = self.active_row_by_col.get_mut(col)?;
        Some(std::mem::replace(slot, row))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| {
            self.labels.iter().enumerate().map(move |(col, &label)| Cell {
                row,
                col,
                label,
                active: self.active_row_by_col[col] == row,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};

    fn word() -> Vec<char> {
        "sohmhos".chars().collect()
    }

    #[test]
    fn test_build_seven_by_six() {
        let mut rng = SmallRng::seed_from_u64(7);
        let grid = Grid::build(&word(), 6, &mut rng);

        assert_eq!(grid.cols(), 7);
        assert_eq!(grid.rows(), 6);
        for col in 0..7 {
            let active: Vec<_> = grid.cells().filter(|c| c.col == col && c.active).collect();
            assert_eq!(active.len(), 1, "column {col} must have one active cell");
            assert!(active[0].row < 6);
        }
    }

    #[test]
    fn test_cells_are_row_major_and_labeled() {
        let mut rng = SmallRng::seed_from_u64(1);
        let grid = Grid::build(&word(), 6, &mut rng);
        let cells: Vec<_> = grid.cells().collect();

        assert_eq!(cells.len(), 42);
        assert_eq!((cells[0].row, cells[0].col), (0, 0));
        assert_eq!((cells[1].row, cells[1].col), (0, 1));
        assert_eq!((cells[7].row, cells[7].col), (1, 0));
        let first_row: String = cells[..7].iter().map(|c| c.label).collect();
        assert_eq!(first_row, "sohmhos");
    }

    #[test]
    fn test_zero_rows_becomes_one() {
        let mut rng = SmallRng::seed_from_u64(3);
        let grid = Grid::build(&word(), 0, &mut rng);
        assert_eq!(grid.rows(), 1);
        assert!((0..7).all(|col| grid.active_row(col) == Some(0)));
    }

    #[test]
    fn test_set_active() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut grid = Grid::build(&word(), 6, &mut rng);
        let before = grid.active_row(2);

        assert_eq!(grid.set_active(2, 5), before);
        assert!(grid.is_active(5, 2));
        assert_eq!(grid.set_active(2, 6), None);
        assert_eq!(grid.set_active(7, 0), None);
        assert!(grid.is_active(5, 2));
    }
}
