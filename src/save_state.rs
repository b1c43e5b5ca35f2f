use crate::cell::{Position, Role};
use crate::grid::MAX_GRID_SIZE;
use crate::Grid;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    Io(String),
    Format(String),
    InvalidSize(i32),
    OutOfBounds(Position),
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "save file i/o failed: {msg}"),
            Self::Format(msg) => write!(f, "save file is malformed: {msg}"),
            Self::InvalidSize(size) => write!(f, "invalid grid size {size}"),
            Self::OutOfBounds(pos) => write!(f, "saved cell {pos} is outside the grid"),
        }
    }
}

impl std::error::Error for SaveError {}

/// Painted layout of a grid: endpoints and barriers. Search marks are not saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    pub size: i32,
    pub start: Option<Position>,
    pub end: Option<Position>,
    pub barriers: Vec<Position>,
}

impl SaveState {
    pub fn from_grid(grid: &Grid) -> Self {
        SaveState {
            size: grid.size,
            start: grid.positions_with_role(Role::Start).first().copied(),
            end: grid.positions_with_role(Role::End).first().copied(),
            barriers: grid.positions_with_role(Role::Barrier),
        }
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), SaveError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| SaveError::Format(e.to_string()))?;
        fs::write(path, json).map_err(|e| SaveError::Io(e.to_string()))?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self, SaveError> {
        let json = fs::read_to_string(path).map_err(|e| SaveError::Io(e.to_string()))?;
        serde_json::from_str(&json).map_err(|e| SaveError::Format(e.to_string()))
    }

    /// Rebuild a grid with the saved roles painted on it
    pub fn restore_grid(&self, cell_size: f32) -> Result<Grid, SaveError> {
        if self.size <= 0 || self.size > MAX_GRID_SIZE {
            return Err(SaveError::InvalidSize(self.size));
        }
        let mut grid = Grid::new(self.size, cell_size);

        let endpoints = [(self.start, Role::Start), (self.end, Role::End)];
        let painted = self
            .barriers
            .iter()
            .map(|&pos| (pos, Role::Barrier))
            .chain(endpoints.into_iter().filter_map(|(pos, role)| pos.map(|p| (p, role))));

        for (pos, role) in painted {
            if !grid.set_role(pos, role) {
                return Err(SaveError::OutOfBounds(pos));
            }
        }

        Ok(grid)
    }
}
