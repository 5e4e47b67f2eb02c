// glitch.rs - Random splat overwrites applied after the rule pass

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::GridError;
use crate::grid::{CellState, Grid};

/// Splats drawn each time a glitch fires.
pub const SPLAT_COUNT: usize = 10;
/// Side length of one square splat.
pub const SPLAT_SIZE: usize = 3;

/// Severity of glitch injection, mapped to a per-generation trigger probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlitchLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl GlitchLevel {
    pub const ALL: [GlitchLevel; 4] = [
        GlitchLevel::None,
        GlitchLevel::Low,
        GlitchLevel::Medium,
        GlitchLevel::High,
    ];

    pub fn probability(self) -> f64 {
        match self {
            GlitchLevel::None => 0.0,
            GlitchLevel::Low => 0.01,
            GlitchLevel::Medium => 0.05,
            GlitchLevel::High => 0.1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GlitchLevel::None => "None",
            GlitchLevel::Low => "Low",
            GlitchLevel::Medium => "Medium",
            GlitchLevel::High => "High",
        }
    }
}

impl fmt::Display for GlitchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GlitchLevel {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GlitchLevel::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GridError::UnknownGlitchLevel(s.to_string()))
    }
}

/// Runs one Bernoulli trial for `level`; when it fires, stamps
/// `SPLAT_COUNT` random splats onto `grid`. Returns whether it fired.
pub fn inject_glitch<R: Rng + ?Sized>(grid: &mut Grid, level: GlitchLevel, rng: &mut R) -> bool {
    if grid.is_empty() || !rng.gen_bool(level.probability()) {
        return false;
    }

    let (width, height) = (grid.width(), grid.height());
    for _ in 0..SPLAT_COUNT {
        let x = rng.gen_range(0..width);
        let y = rng.gen_range(0..height);
        splat(grid, x, y, rng);
    }
    debug!(%level, splats = SPLAT_COUNT, "glitch fired");
    true
}

/// Overwrites the `SPLAT_SIZE`-square whose top-left is column `x`, row `y`
/// with coin-flipped `New`/`Dead` cells. Offsets past the edge are clipped,
/// not wrapped.
pub fn splat<R: Rng + ?Sized>(grid: &mut Grid, x: usize, y: usize, rng: &mut R) {
    for i in 0..SPLAT_SIZE {
        for j in 0..SPLAT_SIZE {
            let state = if rng.gen_bool(0.5) {
                CellState::New
            } else {
                CellState::Dead
            };
            // `set` refuses out-of-bounds positions
            grid.set(y + j, x + i, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn probabilities_match_levels() {
        assert_eq!(GlitchLevel::None.probability(), 0.0);
        assert_eq!(GlitchLevel::Low.probability(), 0.01);
        assert_eq!(GlitchLevel::Medium.probability(), 0.05);
        assert_eq!(GlitchLevel::High.probability(), 0.1);
    }

    #[test]
    fn default_level_is_none() {
        assert_eq!(GlitchLevel::default(), GlitchLevel::None);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("high".parse::<GlitchLevel>().unwrap(), GlitchLevel::High);
        assert_eq!(" Medium ".parse::<GlitchLevel>().unwrap(), GlitchLevel::Medium);
        assert_eq!(
            "loud".parse::<GlitchLevel>(),
            Err(GridError::UnknownGlitchLevel("loud".into()))
        );
    }

    #[test]
    fn none_never_fires() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::empty(8, 8);
        for _ in 0..1000 {
            assert!(!inject_glitch(&mut grid, GlitchLevel::None, &mut rng));
        }
        assert_eq!(grid, Grid::empty(8, 8));
    }

    #[test]
    fn empty_grid_is_left_alone() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::empty(0, 0);
        assert!(!inject_glitch(&mut grid, GlitchLevel::High, &mut rng));
        let mut columnless = Grid::empty(0, 4);
        assert!(!inject_glitch(&mut columnless, GlitchLevel::High, &mut rng));
    }

    #[test]
    fn splat_at_corner_is_clipped_not_wrapped() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::from_rows(vec![vec![CellState::Died; 5]; 5]).unwrap();
        splat(&mut grid, 4, 4, &mut rng);

        // only the corner cell lies inside the 3x3 footprint
        for row in 0..5 {
            for col in 0..5 {
                let cell = grid[row][col];
                if (row, col) == (4, 4) {
                    assert!(matches!(cell, CellState::New | CellState::Dead));
                } else {
                    assert_eq!(cell, CellState::Died, "cell ({row}, {col}) was touched");
                }
            }
        }
    }

    #[test]
    fn splat_writes_only_new_or_dead_inside_footprint() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::from_rows(vec![vec![CellState::Survived; 6]; 6]).unwrap();
        splat(&mut grid, 1, 2, &mut rng);
        for row in 0..6 {
            for col in 0..6 {
                let inside = (2..5).contains(&row) && (1..4).contains(&col);
                let cell = grid[row][col];
                if inside {
                    assert!(matches!(cell, CellState::New | CellState::Dead));
                } else {
                    assert_eq!(cell, CellState::Survived);
                }
            }
        }
    }
}
