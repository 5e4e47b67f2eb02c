//! Toroidal Game of Life engine with four-way transition tags and glitch
//! injection.
//!
//! Every generation is a fresh [`Grid`]; nothing here keeps state between
//! calls. Randomness is injected through the `*_with_rng` entry points so runs
//! can be replayed from a seed.

pub mod engine;
pub mod error;
pub mod glitch;
pub mod grid;
pub mod patterns;

pub use engine::{get_next_generation, get_next_generation_with_rng, live_neighbors, next_state, rule_pass};
pub use error::GridError;
pub use glitch::{GlitchLevel, SPLAT_COUNT, SPLAT_SIZE, inject_glitch};
pub use grid::{Census, CellState, Grid, Row};
pub use patterns::{
    PATTERNS, Pattern, create_empty_grid, create_grid_with_pattern, create_random_grid,
    create_random_grid_with_rng, find_pattern,
};
