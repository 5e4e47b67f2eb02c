// grid.rs - Grid types for the glitching Game of Life

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::GridError;

/// Per-cell classification of the last transition.
///
/// The tag only has meaning relative to the generation it belongs to:
/// `New` means "born this step", `Died` means "alive last step, dead now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Dead = 0,
    Survived = 1,
    New = 2,
    Died = 3,
}

impl CellState {
    pub const ALL: [CellState; 4] = [
        CellState::Dead,
        CellState::Survived,
        CellState::New,
        CellState::Died,
    ];

    /// `Survived` and `New` are the alive tags for rule evaluation.
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, CellState::Survived | CellState::New)
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CellState {
    type Error = GridError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CellState::Dead),
            1 => Ok(CellState::Survived),
            2 => Ok(CellState::New),
            3 => Ok(CellState::Died),
            other => Err(GridError::InvalidCellCode(other)),
        }
    }
}

pub type Row = Vec<CellState>;

/// Row-major grid of cell tags, addressed as `grid[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// Every cell `Dead`. `empty(0, 0)` has no rows at all.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            rows: vec![vec![CellState::Dead; width]; height],
        }
    }

    /// Boundary constructor: rejects ragged input.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::RaggedRow {
                row,
                expected: width,
                found: bad.len(),
            });
        }
        Ok(Self { rows })
    }

    /// Boundary constructor from the compact 0..=3 codes.
    pub fn from_codes<R: AsRef<[u8]>>(codes: &[R]) -> Result<Self, GridError> {
        let rows = codes
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&code| CellState::try_from(code))
                    .collect::<Result<Row, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }

    /// Wraps rows the engine built itself; shape is known to be consistent.
    pub(crate) fn from_rows_unchecked(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Overwrites one cell. Returns false (and does nothing) when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = state;
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Positions `(row, col)` of every alive cell, row-major.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_alive())
                .map(move |(c, _)| (r, c))
        })
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for cell in self.rows.iter().flatten() {
            match cell {
                CellState::Dead => census.dead += 1,
                CellState::Survived => census.survived += 1,
                CellState::New => census.new += 1,
                CellState::Died => census.died += 1,
            }
        }
        census
    }
}

impl Index<usize> for Grid {
    type Output = Row;

    fn index(&self, row: usize) -> &Row {
        &self.rows[row]
    }
}

/// Cell counts per tag for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Census {
    pub dead: usize,
    pub survived: usize,
    pub new: usize,
    pub died: usize,
}

impl Census {
    pub fn alive(&self) -> usize {
        self.survived + self.new
    }

    pub fn total(&self) -> usize {
        self.dead + self.survived + self.new + self.died
    }
}
