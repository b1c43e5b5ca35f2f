use crate::cell::{Cell, Position, Role, Status};

/// Largest side length the config and save files may ask for
pub const MAX_GRID_SIZE: i32 = 1000;

/// Square grid of cells with a per-cell neighbor cache.
/// Cells are stored row-major: index = row * size + col.
#[derive(Debug, Clone)]
pub struct Grid {
    pub size: i32,
    /// Pixel width/height of one cell (shell geometry only)
    pub cell_size: f32,
    cells: Vec<Cell>,
    neighbors: Vec<Vec<Position>>,
    /// Revision number - incremented whenever a cell role changes
    revision: u64,
    /// Revision at which `neighbors` was last rebuilt
    neighbors_revision: Option<u64>,
}

impl Grid {
    /// Create a new size x size grid with all cells empty
    pub fn new(size: i32, cell_size: f32) -> Self {
        let size = size.max(0);
        let side = size as usize;
        let mut cells = Vec::with_capacity(side * side);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell::new(Position::new(row, col)));
            }
        }

        Grid {
            size,
            cell_size,
            neighbors: vec![Vec::new(); cells.len()],
            cells,
            revision: 0,
            neighbors_revision: None,
        }
    }

    /// Fresh all-empty grid with the same dimensions.
    /// Positions held by the caller (start/end) no longer mean anything.
    pub fn reset(&self) -> Grid {
        Grid::new(self.size, self.cell_size)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.size && pos.col >= 0 && pos.col < self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some((pos.row * self.size + pos.col) as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn role(&self, pos: Position) -> Option<Role> {
        self.cell(pos).map(|c| c.role)
    }

    /// Paint a role. Returns false when `pos` is out of bounds.
    /// Any search status on the cell is cleared.
    pub fn set_role(&mut self, pos: Position, role: Role) -> bool {
        let Some(i) = self.index(pos) else {
            return false;
        };
        let cell = &mut self.cells[i];
        cell.status = Status::Unvisited;
        if cell.role != role {
            cell.role = role;
            self.revision += 1;
        }
        true
    }

    /// Set the search status of a cell. Barriers never take a status.
    pub fn set_status(&mut self, pos: Position, status: Status) {
        if let Some(i) = self.index(pos) {
            let cell = &mut self.cells[i];
            if cell.role != Role::Barrier {
                cell.status = status;
            }
        }
    }

    /// Drop every Open/Closed/Path mark left by a previous run
    pub fn clear_search_marks(&mut self) {
        for cell in &mut self.cells {
            cell.status = Status::Unvisited;
        }
    }

    pub fn positions_with_role(&self, role: Role) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|c| c.role == role)
            .map(|c| c.pos)
            .collect()
    }

    /// Passable 4-neighbors of `pos` computed from the current roles.
    /// Order: down, up, right, left.
    pub fn neighbors_of(&self, pos: Position) -> Vec<Position> {
        if !self.contains(pos) {
            return Vec::new();
        }
        let mut result = Vec::with_capacity(4);
        let candidates = [
            Position::new(pos.row + 1, pos.col),
            Position::new(pos.row - 1, pos.col),
            Position::new(pos.row, pos.col + 1),
            Position::new(pos.row, pos.col - 1),
        ];
        for n in candidates {
            if let Some(cell) = self.cell(n) {
                if !cell.is_barrier() {
                    result.push(n);
                }
            }
        }
        result
    }

    /// Rebuild the neighbor cache for every cell from the current barriers
    pub fn update_neighbors(&mut self) {
        let lists: Vec<Vec<Position>> = self.cells.iter().map(|c| self.neighbors_of(c.pos)).collect();
        self.neighbors = lists;
        self.neighbors_revision = Some(self.revision);
    }

    /// Neighbor list from the last `update_neighbors` call
    pub fn cached_neighbors(&self, pos: Position) -> &[Position] {
        match self.index(pos) {
            Some(i) => &self.neighbors[i],
            None => &[],
        }
    }

    /// True when no role changed since the last `update_neighbors`
    pub fn neighbors_fresh(&self) -> bool {
        self.neighbors_revision == Some(self.revision)
    }

    /// Get current grid revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Top-left pixel of a cell
    pub fn cell_origin(&self, pos: Position) -> (f32, f32) {
        (pos.col as f32 * self.cell_size, pos.row as f32 * self.cell_size)
    }

    /// Map a pixel coordinate to the cell under it
    pub fn cell_at_pixel(&self, x: f32, y: f32) -> Option<Position> {
        if x < 0.0 || y < 0.0 || self.cell_size <= 0.0 {
            return None;
        }
        let pos = Position::new((y / self.cell_size) as i32, (x / self.cell_size) as i32);
        if self.contains(pos) {
            Some(pos)
        } else {
            None
        }
    }
}
