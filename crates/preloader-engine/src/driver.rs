//! Tick loop primitives: moving the active cells.

use preloader_core::Timings;
use rand::Rng;

use crate::grid::Grid;

/// One active-cell move inside a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub col: usize,
    pub from: usize,
    pub to: usize,
}

/// Pick the next active row for a column.
///
/// Uniform over every row except `prev`; with a single row the only choice
/// is `prev` itself.
pub fn next_row<R: Rng + ?Sized>(prev: usize, rows: usize, rng: &mut R) -> usize {
    if rows <= 1 {
        return prev;
    }
    let pick = rng.random_range(0..rows - 1);
    if pick >= prev { pick + 1 } else { pick }
}

/// Run one tick: move the active cell of `k` random columns.
pub fn tick<R: Rng + ?Sized>(grid: &mut Grid, k: usize, rng: &mut R) -> Vec<Move> {
    let cols = grid.cols();
    if cols == 0 {
        return Vec::new();
    }

    let mut moves = Vec::with_capacity(k);
    for _ in 0..k {
        let col = rng.random_range(0..cols);
        let Some(from) = grid.active_row(col) else {
            continue;
        };
        let to = next_row(from, grid.rows(), rng);
        grid.set_active(col, to);
        moves.push(Move { col, from, to });
    }
    moves
}

/// Delay before the next tick, uniform in `[tick_min, tick_max)`.
pub fn next_delay<R: Rng + ?Sized>(timings: &Timings, rng: &mut R) -> u64 {
    if timings.tick_min_ms >= timings.tick_max_ms {
        return timings.tick_min_ms;
    }
    rng.random_range(timings.tick_min_ms..timings.tick_max_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::SmallRng};

    fn labels() -> Vec<char> {
        "sohmhos".chars().collect()
    }

    #[test]
    fn test_single_row_is_noop() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut grid = Grid::build(&labels(), 1, &mut rng);
        let moves = tick(&mut grid, 2, &mut rng);

        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.from == 0 && m.to == 0));
    }

    #[test]
    fn test_next_row_covers_all_other_rows() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut seen = [false; 6];
        for _ in 0..500 {
            seen[next_row(2, 6, &mut rng)] = true;
        }
        assert_eq!(seen, [true, true, false, true, true, true]);
    }

    #[test]
    fn test_delay_in_range() {
        let mut rng = SmallRng::seed_from_u64(5);
        let timings = Timings::default();
        for _ in 0..1000 {
            let delay = next_delay(&timings, &mut rng);
            assert!((55..140).contains(&delay));
        }
    }

    #[test]
    fn test_degenerate_delay_range() {
        let mut rng = SmallRng::seed_from_u64(5);
        let timings = Timings {
            tick_min_ms: 90,
            tick_max_ms: 90,
            ..Timings::default()
        };
        assert_eq!(next_delay(&timings, &mut rng), 90);
    }

    proptest! {
        #[test]
        fn prop_tick_keeps_one_active_per_column(
            seed in any::<u64>(),
            rows in 1usize..20,
            k in 1usize..3,
            ticks in 1usize..50,
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut grid = Grid::build(&labels(), rows, &mut rng);

            for _ in 0..ticks {
                for m in tick(&mut grid, k, &mut rng) {
                    if rows > 1 {
                        prop_assert_ne!(m.from, m.to);
                    } else {
                        prop_assert_eq!(m.from, m.to);
                    }
                    prop_assert!(m.to < rows);
                }
                for col in 0..grid.cols() {
                    let active = grid.cells().filter(|c| c.col == col && c.active).count();
                    prop_assert_eq!(active, 1);
                }
            }
        }
    }
}
