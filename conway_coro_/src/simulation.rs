// simulation.rs - The tick driver: owns the current grid and the generation count

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use conway::{
    Census, CellState, GlitchLevel, Grid, Pattern, create_empty_grid, create_grid_with_pattern,
    create_random_grid_with_rng, get_next_generation_with_rng,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::{SeedSource, SimConfig};
use crate::error::AppResult;

/// What one tick produced, for loggers and the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub generation: u64,
    pub census: Census,
    pub cycle_detected: bool,
}

pub struct Simulation {
    grid: Grid,
    generation: u64,
    width: usize,
    height: usize,
    glitch: GlitchLevel,
    seed: SeedSource,
    rng: StdRng,

    grid_history: VecDeque<u64>,
    history_len: usize,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> AppResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut sim = Self {
            grid: Grid::default(),
            generation: 0,
            width: config.width,
            height: config.height,
            glitch: config.glitch,
            seed: config.seed_source()?,
            rng,
            grid_history: VecDeque::with_capacity(config.cycle_history),
            history_len: config.cycle_history,
        };
        sim.reset();
        info!(
            width = sim.width,
            height = sim.height,
            glitch = %sim.glitch,
            seed = ?config.seed,
            "simulation ready"
        );
        Ok(sim)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn glitch_level(&self) -> GlitchLevel {
        self.glitch
    }

    pub fn set_glitch_level(&mut self, level: GlitchLevel) {
        if level != self.glitch {
            debug!(from = %self.glitch, to = %level, "glitch level changed");
            self.glitch = level;
        }
    }

    /// Advances one generation. The counter lives here, not in the engine.
    pub fn tick(&mut self) -> TickReport {
        self.grid = get_next_generation_with_rng(&self.grid, self.glitch, &mut self.rng);
        self.generation += 1;
        let cycle_detected = self.check_for_cycle();
        TickReport {
            generation: self.generation,
            census: self.grid.census(),
            cycle_detected,
        }
    }

    /// Rebuilds generation 0 from the configured seed source.
    pub fn reset(&mut self) {
        self.grid = match &self.seed {
            SeedSource::Library(pattern) => {
                create_grid_with_pattern(self.width, self.height, &pattern.matrix())
            }
            SeedSource::Custom(rows) => create_grid_with_pattern(self.width, self.height, rows),
            SeedSource::Random => create_random_grid_with_rng(self.width, self.height, &mut self.rng),
            SeedSource::Empty => create_empty_grid(self.width, self.height),
        };
        self.restart();
    }

    pub fn apply_pattern(&mut self, pattern: &'static Pattern) {
        self.seed = SeedSource::Library(pattern);
        self.reset();
    }

    pub fn randomize(&mut self) {
        self.seed = SeedSource::Random;
        self.reset();
    }

    pub fn clear(&mut self) {
        self.seed = SeedSource::Empty;
        self.reset();
    }

    /// Flips a cell between alive and dead. Out-of-range positions are ignored.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> bool {
        let Some(current) = self.grid.get(row, col) else {
            return false;
        };
        let next = if current.is_alive() {
            CellState::Dead
        } else {
            CellState::New
        };
        self.grid.set(row, col, next);
        self.grid_history.clear();
        true
    }

    fn restart(&mut self) {
        self.generation = 0;
        self.grid_history.clear();
    }

    fn hash_grid(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for row in self.grid.rows() {
            for cell in row {
                cell.is_alive().hash(&mut hasher);
            }
        }
        hasher.finish()
    }

    /// True when the current occupancy repeats one of the last `history_len`.
    fn check_for_cycle(&mut self) -> bool {
        if self.history_len == 0 {
            return false;
        }
        let current_hash = self.hash_grid();
        if self.grid_history.contains(&current_hash) {
            return true;
        }
        if self.grid_history.len() == self.history_len {
            self.grid_history.pop_front();
        }
        self.grid_history.push_back(current_hash);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conway::find_pattern;

    fn config(pattern: &str) -> SimConfig {
        SimConfig {
            width: 12,
            height: 12,
            pattern: Some(pattern.to_string()),
            seed: Some(3),
            ..SimConfig::default()
        }
    }

    #[test]
    fn tick_counts_generations() {
        let mut sim = Simulation::new(&config("Glider")).unwrap();
        assert_eq!(sim.generation(), 0);
        let report = sim.tick();
        assert_eq!(report.generation, 1);
        assert_eq!(report.census.alive(), 5);
        assert_eq!(sim.tick().generation, 2);
    }

    #[test]
    fn still_life_is_reported_as_cycle() {
        let mut sim = Simulation::new(&config("Block")).unwrap();
        assert!(!sim.tick().cycle_detected);
        assert!(sim.tick().cycle_detected);
    }

    #[test]
    fn blinker_cycle_found_within_history() {
        let mut sim = Simulation::new(&config("Blinker")).unwrap();
        let first_cycle = (0..5).map(|_| sim.tick()).find(|r| r.cycle_detected);
        assert_eq!(first_cycle.map(|r| r.generation), Some(3));
    }

    #[test]
    fn zero_history_disables_cycle_detection() {
        let mut sim = Simulation::new(&SimConfig {
            cycle_history: 0,
            ..config("Block")
        })
        .unwrap();
        assert!((0..5).all(|_| !sim.tick().cycle_detected));
    }

    #[test]
    fn reset_restores_seed_and_generation() {
        let mut sim = Simulation::new(&config("R-pentomino")).unwrap();
        let start = sim.grid().clone();
        for _ in 0..7 {
            sim.tick();
        }
        sim.reset();
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.grid(), &start);
    }

    #[test]
    fn seeded_runs_are_replayable() {
        let cfg = SimConfig {
            glitch: GlitchLevel::High,
            ..config("random")
        };
        let mut a = Simulation::new(&cfg).unwrap();
        let mut b = Simulation::new(&cfg).unwrap();
        for _ in 0..40 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn switching_seed_sources() {
        let mut sim = Simulation::new(&config("Glider")).unwrap();
        sim.clear();
        assert_eq!(sim.grid().census().alive(), 0);

        sim.apply_pattern(find_pattern("Beacon").unwrap());
        assert_eq!(sim.grid().census().alive(), 8);

        sim.randomize();
        assert_eq!(sim.grid().census().survived, 0);
    }

    #[test]
    fn toggle_flips_alive_and_dead() {
        let mut sim = Simulation::new(&config("empty")).unwrap();
        assert!(sim.toggle_cell(2, 3));
        assert_eq!(sim.grid()[2][3], CellState::New);
        assert!(sim.toggle_cell(2, 3));
        assert_eq!(sim.grid()[2][3], CellState::Dead);
        assert!(!sim.toggle_cell(12, 0));
    }

    #[test]
    fn glitch_level_can_change_mid_run() {
        let mut sim = Simulation::new(&config("empty")).unwrap();
        sim.set_glitch_level(GlitchLevel::High);
        assert_eq!(sim.glitch_level(), GlitchLevel::High);
        let disturbed = (0..500).filter(|_| sim.tick().census.alive() > 0).count();
        assert!(disturbed > 0);
    }
}
