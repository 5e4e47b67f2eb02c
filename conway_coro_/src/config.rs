// config.rs - Simulation settings loaded from TOML and overridden by the CLI

use std::path::Path;
use std::time::Duration;

use conway::{CellState, GlitchLevel, Pattern, find_pattern};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};

pub const MIN_BPM: u32 = 1;
pub const MAX_BPM: u32 = 600;

/// Where the first generation comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    Library(&'static Pattern),
    Custom(Vec<Vec<u8>>),
    Random,
    Empty,
}

/// RGB colour for each transition tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellColors {
    pub dead: [u8; 3],
    pub survived: [u8; 3],
    pub new: [u8; 3],
    pub died: [u8; 3],
}

impl Default for CellColors {
    fn default() -> Self {
        Self {
            dead: [40, 40, 40],
            survived: [0, 200, 0],
            new: [120, 255, 120],
            died: [140, 30, 30],
        }
    }
}

impl CellColors {
    pub fn rgb(&self, state: CellState) -> [u8; 3] {
        match state {
            CellState::Dead => self.dead,
            CellState::Survived => self.survived,
            CellState::New => self.new,
            CellState::Died => self.died,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    pub bpm: u32,
    pub glitch: GlitchLevel,
    /// Library pattern stamped at start, or `random` / `empty`.
    pub pattern: Option<String>,
    /// A 0/1 stamp that takes precedence over `pattern`.
    pub custom_pattern: Option<Vec<Vec<u8>>>,
    /// Fixed seed for a replayable run; entropy when absent.
    pub seed: Option<u64>,
    /// How many past generations cycle detection remembers.
    pub cycle_history: usize,
    pub colors: CellColors,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            bpm: 120,
            glitch: GlitchLevel::None,
            pattern: Some("Glider".to_string()),
            custom_pattern: None,
            seed: None,
            cycle_history: 10,
            colors: CellColors::default(),
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SimConfig = toml::from_str(&text)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Rejects settings the engine treats as undefined behaviour.
    pub fn validate(&self) -> AppResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AppError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !(MIN_BPM..=MAX_BPM).contains(&self.bpm) {
            return Err(AppError::InvalidConfig(format!(
                "bpm must be within {MIN_BPM}..={MAX_BPM}, got {}",
                self.bpm
            )));
        }
        self.seed_source()?;
        Ok(())
    }

    /// Resolves what the first generation is built from.
    pub fn seed_source(&self) -> AppResult<SeedSource> {
        if let Some(custom) = &self.custom_pattern {
            let width = custom.first().map_or(0, Vec::len);
            if width == 0 {
                return Err(AppError::InvalidConfig("custom_pattern is empty".into()));
            }
            if let Some(row) = custom.iter().position(|row| row.len() != width) {
                return Err(AppError::InvalidConfig(format!(
                    "custom_pattern row {row} is not {width} cells wide"
                )));
            }
            return Ok(SeedSource::Custom(custom.clone()));
        }

        match self.pattern.as_deref().map(str::trim) {
            None => Ok(SeedSource::Random),
            Some(name) if name.eq_ignore_ascii_case("random") => Ok(SeedSource::Random),
            Some(name) if name.eq_ignore_ascii_case("empty") => Ok(SeedSource::Empty),
            Some(name) => find_pattern(name)
                .map(SeedSource::Library)
                .ok_or_else(|| AppError::UnknownPattern(name.to_string())),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.bpm)
    }
}

/// One generation per beat.
pub fn tick_interval(bpm: u32) -> Duration {
    Duration::from_millis(60_000 / u64::from(bpm.clamp(MIN_BPM, MAX_BPM)))
}
