use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid. `row` grows downward, `col` grows rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Manhattan (L1) distance between two positions
    pub fn manhattan(&self, other: &Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// What the user painted on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
}

/// Transient search marking, reset before every run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Unvisited,
    Open,
    Closed,
    Path,
}

/// Combined view of role and status, as the shell renders it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Start,
    End,
    Barrier,
    Open,
    Closed,
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub pos: Position,
    pub role: Role,
    pub status: Status,
}

impl Cell {
    pub fn new(pos: Position) -> Self {
        Cell {
            pos,
            role: Role::Empty,
            status: Status::Unvisited,
        }
    }

    pub fn is_barrier(&self) -> bool {
        self.role == Role::Barrier
    }

    /// Painted roles win over search status: an End cell that is also in the
    /// frontier still shows as End.
    pub fn state(&self) -> CellState {
        match (self.role, self.status) {
            (Role::Start, _) => CellState::Start,
            (Role::End, _) => CellState::End,
            (Role::Barrier, _) => CellState::Barrier,
            (Role::Empty, Status::Unvisited) => CellState::Empty,
            (Role::Empty, Status::Open) => CellState::Open,
            (Role::Empty, Status::Closed) => CellState::Closed,
            (Role::Empty, Status::Path) => CellState::Path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_dominates_status() {
        let mut cell = Cell::new(Position::new(1, 2));
        assert_eq!(cell.state(), CellState::Empty);

        cell.status = Status::Open;
        assert_eq!(cell.state(), CellState::Open);

        cell.role = Role::End;
        assert_eq!(cell.state(), CellState::End);
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Position::new(0, 0);
        let b = Position::new(4, -3);
        assert_eq!(a.manhattan(&b), 7);
        assert_eq!(b.manhattan(&a), 7);
    }
}
