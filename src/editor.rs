use crate::cell::{Position, Role};
use crate::Grid;

/// Tracks the painted endpoints and applies the mouse paint rules:
/// the first left click places the start, the second the end, and later
/// clicks paint barriers. Start and end are never painted over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    pub start: Option<Position>,
    pub end: Option<Position>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild endpoint tracking from the roles already on `grid`
    /// (used after loading a saved layout).
    pub fn from_grid(grid: &Grid) -> Self {
        Editor {
            start: grid.positions_with_role(Role::Start).first().copied(),
            end: grid.positions_with_role(Role::End).first().copied(),
        }
    }

    /// Left click. Returns the role painted, if any.
    pub fn paint(&mut self, grid: &mut Grid, pos: Position) -> Option<Role> {
        if !grid.contains(pos) {
            return None;
        }
        let is_start = self.start == Some(pos);
        let is_end = self.end == Some(pos);

        let role = if self.start.is_none() && !is_end {
            self.start = Some(pos);
            Role::Start
        } else if self.end.is_none() && !is_start {
            self.end = Some(pos);
            Role::End
        } else if !is_start && !is_end {
            Role::Barrier
        } else {
            return None;
        };

        grid.set_role(pos, role);
        Some(role)
    }

    /// Right click: clear the cell, forgetting it as start/end if it was one
    pub fn erase(&mut self, grid: &mut Grid, pos: Position) {
        if !grid.set_role(pos, Role::Empty) {
            return;
        }
        if self.start == Some(pos) {
            self.start = None;
        }
        if self.end == Some(pos) {
            self.end = None;
        }
    }

    /// Replace `grid` with an empty one and forget both endpoints
    pub fn reset(&mut self, grid: &mut Grid) {
        *grid = grid.reset();
        self.start = None;
        self.end = None;
    }

    pub fn endpoints(&self) -> Option<(Position, Position)> {
        Some((self.start?, self.end?))
    }
}
