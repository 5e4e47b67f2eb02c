// engine.rs - Toroidal transition rules producing four-way cell tags

use rand::Rng;

use crate::glitch::{GlitchLevel, inject_glitch};
use crate::grid::{CellState, Grid, Row};

/// Counts alive neighbours of `(row, col)`, wrapping around every edge.
/// A grid without cells has no neighbours to count.
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    if grid.is_empty() {
        return 0;
    }
    let (height, width) = (grid.height() as isize, grid.width() as isize);
    let mut count = 0;

    for dr in [-1isize, 0, 1] {
        for dc in [-1isize, 0, 1] {
            if dr == 0 && dc == 0 {
                continue;
            }
            let nr = (row as isize + dr).rem_euclid(height) as usize;
            let nc = (col as isize + dc).rem_euclid(width) as usize;
            if grid[nr][nc].is_alive() {
                count += 1;
            }
        }
    }
    count
}

/// Life thresholds, emitting the transition tag rather than a bool.
pub fn next_state(current: CellState, neighbors: u8) -> CellState {
    match (current.is_alive(), neighbors) {
        (true, 2) | (true, 3) => CellState::Survived, // Survival
        (true, _) => CellState::Died,                 // Under/overpopulation
        (false, 3) => CellState::New,                 // Birth
        (false, _) => CellState::Dead,                // Stays dead
    }
}

/// Deterministic rule pass. Allocates a fresh grid and leaves `grid` untouched.
///
/// A grid with no rows yields no rows; a grid whose first row is empty yields
/// a single empty row.
pub fn rule_pass(grid: &Grid) -> Grid {
    let (height, width) = (grid.height(), grid.width());
    if height == 0 {
        return Grid::default();
    }
    if width == 0 {
        return Grid::from_rows_unchecked(vec![Row::new()]);
    }

    let rows = (0..height)
        .map(|row| {
            (0..width)
                .map(|col| next_state(grid[row][col], live_neighbors(grid, row, col)))
                .collect()
        })
        .collect();
    Grid::from_rows_unchecked(rows)
}

/// Rule pass followed by glitch injection on the new grid, drawing from `rng`.
pub fn get_next_generation_with_rng<R: Rng + ?Sized>(
    grid: &Grid,
    level: GlitchLevel,
    rng: &mut R,
) -> Grid {
    let mut next = rule_pass(grid);
    inject_glitch(&mut next, level, rng);
    next
}

/// Same as [`get_next_generation_with_rng`] using the thread-local generator.
pub fn get_next_generation(grid: &Grid, level: GlitchLevel) -> Grid {
    get_next_generation_with_rng(grid, level, &mut rand::thread_rng())
}
