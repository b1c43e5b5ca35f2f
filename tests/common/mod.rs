#![allow(dead_code)]

use pathviz::layout;
use pathviz::search::{find_endpoints, run};
use pathviz::{CellState, Grid, Outcome, Position, Step, Strategy};

pub const CELL_SIZE: f32 = 10.0;

/// Parse a text layout, panicking with the parse error on bad input
pub fn grid_from(text: &str) -> Grid {
    match layout::parse(text, CELL_SIZE) {
        Ok(grid) => grid,
        Err(e) => panic!("bad test layout: {}", e),
    }
}

/// Open size x size grid with start and end painted
pub fn open_grid(size: i32, start: Position, end: Position) -> Grid {
    let mut grid = Grid::new(size, CELL_SIZE);
    grid.set_role(start, pathviz::Role::Start);
    grid.set_role(end, pathviz::Role::End);
    grid
}

/// Result of one full run plus everything the observer saw
pub struct RunResult {
    pub grid: Grid,
    pub outcome: Outcome,
    pub steps: Vec<Step>,
}

impl RunResult {
    pub fn expanded_steps(&self) -> usize {
        self.steps.iter().filter(|s| matches!(s, Step::Expanded(_))).count()
    }

    pub fn traced_steps(&self) -> usize {
        self.steps.iter().filter(|s| matches!(s, Step::Traced(_))).count()
    }

    pub fn count(&self, state: CellState) -> usize {
        count_state(&self.grid, state)
    }
}

/// Refresh neighbors, locate the endpoints and run to completion
pub fn run_grid(mut grid: Grid, strategy: Strategy) -> RunResult {
    grid.update_neighbors();
    let (start, end) = find_endpoints(&grid).expect("layout needs one start and one end");
    let mut steps = Vec::new();
    let outcome = run(&mut grid, start, end, strategy, |step, _| steps.push(step))
        .expect("preconditions hold");
    RunResult { grid, outcome, steps }
}

pub fn run_layout(text: &str, strategy: Strategy) -> RunResult {
    run_grid(grid_from(text), strategy)
}

pub fn count_state(grid: &Grid, state: CellState) -> usize {
    grid.cells().filter(|c| c.state() == state).count()
}

/// Every consecutive pair of the path must be 4-adjacent and passable
pub fn assert_valid_path(grid: &Grid, path: &[Position]) {
    for pair in path.windows(2) {
        assert_eq!(
            pair[0].manhattan(&pair[1]),
            1,
            "path jumps from {} to {}",
            pair[0],
            pair[1]
        );
    }
    for pos in path {
        let cell = grid.cell(*pos).expect("path stays on the grid");
        assert!(!cell.is_barrier(), "path crosses barrier at {}", pos);
    }
}

/// Render for debugging output, as the shell copies it to the clipboard
pub fn visualize(grid: &Grid) -> String {
    format!("\n{}", layout::render(grid))
}
