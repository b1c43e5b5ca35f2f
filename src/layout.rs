//! Text layout of a grid, one line per row:
//! - `.`: empty
//! - `#`: barrier
//! - `S`: start
//! - `E`: end
//! - `o`: open
//! - `x`: closed
//! - `*`: path

use crate::cell::{CellState, Position, Role, Status};
use crate::Grid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    Empty,
    RaggedRow { row: usize, expected: usize, found: usize },
    NotSquare { rows: usize, cols: usize },
    UnknownSymbol { row: usize, col: usize, symbol: char },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "layout has no rows"),
            Self::RaggedRow { row, expected, found } => {
                write!(f, "row {row} has {found} cells, expected {expected}")
            }
            Self::NotSquare { rows, cols } => {
                write!(f, "layout is {rows}x{cols}, grids must be square")
            }
            Self::UnknownSymbol { row, col, symbol } => {
                write!(f, "unknown symbol '{symbol}' at row {row}, col {col}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

pub fn symbol(state: CellState) -> char {
    match state {
        CellState::Empty => '.',
        CellState::Barrier => '#',
        CellState::Start => 'S',
        CellState::End => 'E',
        CellState::Open => 'o',
        CellState::Closed => 'x',
        CellState::Path => '*',
    }
}

fn parse_symbol(ch: char) -> Option<(Role, Status)> {
    let parsed = match ch {
        '.' => (Role::Empty, Status::Unvisited),
        '#' => (Role::Barrier, Status::Unvisited),
        'S' => (Role::Start, Status::Unvisited),
        'E' => (Role::End, Status::Unvisited),
        'o' => (Role::Empty, Status::Open),
        'x' => (Role::Empty, Status::Closed),
        '*' => (Role::Empty, Status::Path),
        _ => return None,
    };
    Some(parsed)
}

/// Render the grid as text
pub fn render(grid: &Grid) -> String {
    let side = grid.size.max(0) as usize;
    let mut result = String::with_capacity((side + 1) * side);
    for row in 0..grid.size {
        for col in 0..grid.size {
            if let Some(cell) = grid.cell(Position::new(row, col)) {
                result.push(symbol(cell.state()));
            }
        }
        result.push('\n');
    }
    result
}

/// Parse a text layout. Blank lines and surrounding whitespace are ignored.
pub fn parse(text: &str, cell_size: f32) -> Result<Grid, LayoutError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some(first) = lines.first() else {
        return Err(LayoutError::Empty);
    };
    let cols = first.chars().count();

    for (row, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != cols {
            return Err(LayoutError::RaggedRow {
                row,
                expected: cols,
                found,
            });
        }
    }
    if lines.len() != cols {
        return Err(LayoutError::NotSquare {
            rows: lines.len(),
            cols,
        });
    }

    let mut grid = Grid::new(cols as i32, cell_size);
    for (row, line) in lines.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let (role, status) = parse_symbol(ch).ok_or(LayoutError::UnknownSymbol {
                row,
                col,
                symbol: ch,
            })?;
            let pos = Position::new(row as i32, col as i32);
            grid.set_role(pos, role);
            grid.set_status(pos, status);
        }
    }

    Ok(grid)
}
