// patterns.rs - Grid seeding and the named pattern library

use rand::Rng;

use crate::grid::{CellState, Grid};

/// Chance that a cell starts out alive in a random grid.
pub const RANDOM_FILL_PROBABILITY: f64 = 0.3;

/// A named stamp. Rows use `#` for alive and `.` for dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub rows: &'static [&'static str],
}

impl Pattern {
    /// The stamp as a 0/1 matrix, ready for [`create_grid_with_pattern`].
    pub fn matrix(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|row| row.bytes().map(|b| u8::from(b == b'#')).collect())
            .collect()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        rows: &[
            ".#.",
            "..#",
            "###",
        ],
    },
    Pattern {
        name: "Block",
        rows: &[
            "##",
            "##",
        ],
    },
    Pattern {
        name: "Blinker",
        rows: &["###"],
    },
    Pattern {
        name: "Toad",
        rows: &[
            ".###",
            "###.",
        ],
    },
    Pattern {
        name: "Beacon",
        rows: &[
            "##..",
            "##..",
            "..##",
            "..##",
        ],
    },
    Pattern {
        name: "Pulsar",
        rows: &[
            "..###...###..",
            ".............",
            "#....#.#....#",
            "#....#.#....#",
            "#....#.#....#",
            "..###...###..",
            ".............",
            "..###...###..",
            "#....#.#....#",
            "#....#.#....#",
            "#....#.#....#",
            ".............",
            "..###...###..",
        ],
    },
    Pattern {
        name: "R-pentomino",
        rows: &[
            ".##",
            "##.",
            ".#.",
        ],
    },
    Pattern {
        name: "Lightweight Spaceship",
        rows: &[
            ".#..#",
            "#....",
            "#...#",
            "####.",
        ],
    },
    Pattern {
        name: "Gosper Glider Gun",
        rows: &[
            "........................#...........",
            "......................#.#...........",
            "............##......##............##",
            "...........#...#....##............##",
            "##........#.....#...##..............",
            "##........#...#.##....#.#...........",
            "..........#.....#.......#...........",
            "...........#...#....................",
            "............##......................",
        ],
    },
];

/// Looks a library pattern up by name, ignoring ASCII case.
pub fn find_pattern(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name.trim()))
}

pub fn create_empty_grid(width: usize, height: usize) -> Grid {
    Grid::empty(width, height)
}

/// Each cell is independently `New` with probability
/// [`RANDOM_FILL_PROBABILITY`], otherwise `Dead`.
pub fn create_random_grid_with_rng<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::empty(width, height);
    for row in 0..height {
        for col in 0..width {
            if rng.gen_bool(RANDOM_FILL_PROBABILITY) {
                grid.set(row, col, CellState::New);
            }
        }
    }
    grid
}

pub fn create_random_grid(width: usize, height: usize) -> Grid {
    create_random_grid_with_rng(width, height, &mut rand::thread_rng())
}

/// Empty grid with `pattern` stamped at its centre.
///
/// The stamp's top-left lands at `floor((width - pattern_width) / 2)`,
/// `floor((height - pattern_height) / 2)`, which goes negative when the pattern
/// is larger than the grid. Nonzero pattern values are written as their cell
/// code (values above 3 as `New`); zeros and cells falling outside the grid
/// are dropped. The pattern width is taken from its first row.
pub fn create_grid_with_pattern<P: AsRef<[u8]>>(width: usize, height: usize, pattern: &[P]) -> Grid {
    let mut grid = Grid::empty(width, height);

    let pattern_height = pattern.len() as i64;
    let pattern_width = pattern.first().map_or(0, |row| row.as_ref().len()) as i64;
    if pattern_height == 0 || pattern_width == 0 {
        return grid;
    }

    let start_x = (width as i64 - pattern_width).div_euclid(2);
    let start_y = (height as i64 - pattern_height).div_euclid(2);

    for (i, pattern_row) in pattern.iter().enumerate() {
        for (j, &value) in pattern_row.as_ref().iter().enumerate() {
            if value == 0 {
                continue;
            }
            let x = start_x + j as i64;
            let y = start_y + i as i64;
            if (0..width as i64).contains(&x) && (0..height as i64).contains(&y) {
                let state = CellState::try_from(value).unwrap_or(CellState::New);
                grid.set(y as usize, x as usize, state);
            }
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn library_patterns_are_rectangular() {
        for pattern in PATTERNS {
            assert!(pattern.height() > 0, "{} has no rows", pattern.name);
            assert!(
                pattern.rows.iter().all(|row| row.len() == pattern.width()),
                "{} is ragged",
                pattern.name
            );
            assert!(
                pattern.rows.iter().all(|row| row.bytes().all(|b| b == b'#' || b == b'.')),
                "{} has stray characters",
                pattern.name
            );
        }
    }

    #[test]
    fn library_cell_counts() {
        let alive = |name: &str| {
            find_pattern(name)
                .unwrap()
                .matrix()
                .iter()
                .flatten()
                .filter(|&&v| v == 1)
                .count()
        };
        assert_eq!(alive("glider"), 5);
        assert_eq!(alive("Pulsar"), 48);
        assert_eq!(alive("Gosper Glider Gun"), 36);
        assert_eq!(alive("Lightweight Spaceship"), 9);
    }

    #[test]
    fn unknown_pattern_is_none() {
        assert!(find_pattern("Spaceship Deluxe").is_none());
    }

    #[test]
    fn block_is_centred() {
        let grid = create_grid_with_pattern(10, 10, &[[1u8, 1], [1, 1]]);
        let alive: Vec<_> = grid.alive_cells().collect();
        assert_eq!(alive, [(4, 4), (4, 5), (5, 4), (5, 5)]);
    }

    #[test]
    fn odd_leftover_rounds_down() {
        let grid = create_grid_with_pattern(6, 5, &[[1u8, 1, 1]]);
        // start_x = floor(3 / 2) = 1, start_y = floor(4 / 2) = 2
        let alive: Vec<_> = grid.alive_cells().collect();
        assert_eq!(alive, [(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn oversized_pattern_is_clipped() {
        // 5 wide on a 3 wide grid: start_x = floor(-2 / 2) = -1, so the
        // outer 1s land on columns -1 and 3 and are dropped
        let grid = create_grid_with_pattern(3, 1, &[[1u8, 0, 1, 0, 1]]);
        assert_eq!(grid.width(), 3);
        let alive: Vec<_> = grid.alive_cells().collect();
        assert_eq!(alive, [(0, 1)]);
    }

    #[test]
    fn odd_negative_offset_floors_instead_of_truncating() {
        // 5 wide on a 2 wide grid: floor(-3 / 2) = -2 (truncation would give -1)
        let grid = create_grid_with_pattern(2, 1, &[[0u8, 0, 1, 0, 0]]);
        let alive: Vec<_> = grid.alive_cells().collect();
        assert_eq!(alive, [(0, 0)]);

        let tall = create_grid_with_pattern(1, 2, &[[0u8], [0], [1], [0], [0]]);
        assert_eq!(tall.alive_cells().collect::<Vec<_>>(), [(0, 0)]);
    }

    #[test]
    fn degenerate_pattern_leaves_grid_empty() {
        let no_rows: [[u8; 0]; 0] = [];
        assert_eq!(create_grid_with_pattern(4, 4, &no_rows), Grid::empty(4, 4));
        let no_cols: [Vec<u8>; 2] = [vec![], vec![]];
        assert_eq!(create_grid_with_pattern(4, 4, &no_cols), Grid::empty(4, 4));
    }

    #[test]
    fn pattern_values_become_cell_codes() {
        let grid = create_grid_with_pattern(3, 1, &[[1u8, 2, 9]]);
        assert_eq!(grid[0], [CellState::Survived, CellState::New, CellState::New]);
    }

    #[test]
    fn random_fill_is_near_thirty_percent() {
        let mut rng = StdRng::seed_from_u64(2024);
        let grid = create_random_grid_with_rng(100, 100, &mut rng);
        let census = grid.census();
        assert_eq!(census.survived + census.died, 0);
        let ratio = census.new as f64 / census.total() as f64;
        assert!((0.27..0.33).contains(&ratio), "fill ratio {ratio}");
    }

    #[test]
    fn seeded_random_grids_repeat() {
        let a = create_random_grid_with_rng(20, 20, &mut StdRng::seed_from_u64(5));
        let b = create_random_grid_with_rng(20, 20, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
