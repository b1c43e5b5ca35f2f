use crate::cell::{Position, Role, Status};
use crate::frontier::Frontier;
use crate::reconstruct::reconstruct;
use crate::Grid;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Which priority function drives the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// f = g + Manhattan distance to the end
    #[default]
    AStar,
    /// f = g (uniform-cost search)
    Dijkstra,
}

impl Strategy {
    /// Frontier priority for a cell reached at cost `g`
    pub fn priority(&self, g: u32, pos: Position, end: Position) -> u32 {
        match self {
            Strategy::AStar => g + pos.manhattan(&end),
            Strategy::Dijkstra => g,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::AStar => "A*",
            Strategy::Dijkstra => "Dijkstra's",
        }
    }
}

/// Lifecycle of one search run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    Succeeded,
    Exhausted,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Succeeded | Phase::Exhausted)
    }
}

/// Event handed to the step observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// All neighbors of this cell were relaxed
    Expanded(Position),
    /// Path reconstruction stepped back onto this cell
    Traced(Position),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Cells popped and expanded (the end cell is not counted)
    pub expanded: usize,
    /// Cells inserted into the frontier, start excluded
    pub opened: usize,
}

/// Result of a finished run. Exhaustion is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded { path: Vec<Position>, stats: SearchStats },
    Exhausted { stats: SearchStats },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }

    /// Cells from start to end, both included
    pub fn path(&self) -> Option<&[Position]> {
        match self {
            Outcome::Succeeded { path, .. } => Some(path),
            Outcome::Exhausted { .. } => None,
        }
    }

    /// Number of moves along the path
    pub fn path_len(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }

    pub fn stats(&self) -> SearchStats {
        match self {
            Outcome::Succeeded { stats, .. } | Outcome::Exhausted { stats } => *stats,
        }
    }
}

/// Precondition violations detected before or during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    MissingStart,
    MissingEnd,
    DuplicateStart(usize),
    DuplicateEnd(usize),
    SameEndpoints,
    OutOfBounds(Position),
    RoleMismatch { pos: Position, expected: Role },
    StaleNeighbors,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingStart => write!(f, "no start cell on the grid"),
            Self::MissingEnd => write!(f, "no end cell on the grid"),
            Self::DuplicateStart(n) => write!(f, "expected one start cell, found {n}"),
            Self::DuplicateEnd(n) => write!(f, "expected one end cell, found {n}"),
            Self::SameEndpoints => write!(f, "start and end are the same cell"),
            Self::OutOfBounds(pos) => write!(f, "cell {pos} is outside the grid"),
            Self::RoleMismatch { pos, expected } => {
                write!(f, "cell {pos} is not painted as {expected:?}")
            }
            Self::StaleNeighbors => {
                write!(f, "neighbor lists are out of date, call update_neighbors first")
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Locate the unique Start and End cells
pub fn find_endpoints(grid: &Grid) -> Result<(Position, Position), SearchError> {
    let starts = grid.positions_with_role(Role::Start);
    let ends = grid.positions_with_role(Role::End);

    let start = match starts.as_slice() {
        [] => return Err(SearchError::MissingStart),
        [one] => *one,
        many => return Err(SearchError::DuplicateStart(many.len())),
    };
    let end = match ends.as_slice() {
        [] => return Err(SearchError::MissingEnd),
        [one] => *one,
        many => return Err(SearchError::DuplicateEnd(many.len())),
    };
    Ok((start, end))
}

/// One search run, advanced an expansion at a time with [`Search::step`].
///
/// The search keeps no reference to the grid, so a render loop can draw the
/// grid between steps. It only ever writes cell statuses.
#[derive(Debug)]
pub struct Search {
    strategy: Strategy,
    start: Position,
    end: Position,
    phase: Phase,
    grid_revision: u64,
    g_score: HashMap<Position, u32>,
    f_score: HashMap<Position, u32>,
    came_from: HashMap<Position, Position>,
    frontier: Frontier,
    stats: SearchStats,
    path: Vec<Position>,
}

impl Search {
    /// Validate preconditions and seed the frontier with `start`
    pub fn new(
        grid: &Grid,
        start: Position,
        end: Position,
        strategy: Strategy,
    ) -> Result<Self, SearchError> {
        for pos in [start, end] {
            if !grid.contains(pos) {
                return Err(SearchError::OutOfBounds(pos));
            }
        }
        if start == end {
            return Err(SearchError::SameEndpoints);
        }
        for (pos, expected) in [(start, Role::Start), (end, Role::End)] {
            if grid.role(pos) != Some(expected) {
                return Err(SearchError::RoleMismatch { pos, expected });
            }
        }
        if !grid.neighbors_fresh() {
            return Err(SearchError::StaleNeighbors);
        }

        let mut g_score = HashMap::new();
        let mut f_score = HashMap::new();
        g_score.insert(start, 0);
        f_score.insert(start, strategy.priority(0, start, end));

        let mut frontier = Frontier::new();
        frontier.push(0, start);

        debug!(?strategy, %start, %end, "search ready");

        Ok(Search {
            strategy,
            start,
            end,
            phase: Phase::Ready,
            grid_revision: grid.revision(),
            g_score,
            f_score,
            came_from: HashMap::new(),
            frontier,
            stats: SearchStats::default(),
            path: Vec::new(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Cost from start, `None` while unreached
    pub fn g_score(&self, pos: Position) -> Option<u32> {
        self.g_score.get(&pos).copied()
    }

    pub fn f_score(&self, pos: Position) -> Option<u32> {
        self.f_score.get(&pos).copied()
    }

    pub fn predecessor(&self, pos: Position) -> Option<Position> {
        self.came_from.get(&pos).copied()
    }

    pub fn in_frontier(&self, pos: Position) -> bool {
        self.frontier.contains(&pos)
    }

    /// `Some` once the search reached a terminal phase
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Succeeded => Some(Outcome::Succeeded {
                path: self.path.clone(),
                stats: self.stats,
            }),
            Phase::Exhausted => Some(Outcome::Exhausted { stats: self.stats }),
            Phase::Ready | Phase::Running => None,
        }
    }

    /// Pop one cell and expand it. Stepping a finished search is a no-op.
    pub fn step<F>(&mut self, grid: &mut Grid, observer: &mut F) -> Result<Phase, SearchError>
    where
        F: FnMut(Step, &Grid),
    {
        if self.phase.is_terminal() {
            return Ok(self.phase);
        }
        // A grid swapped in under the search can match the revision number
        // without ever having built its neighbor lists
        if grid.revision() != self.grid_revision || !grid.neighbors_fresh() {
            return Err(SearchError::StaleNeighbors);
        }
        self.phase = Phase::Running;

        let Some(current) = self.frontier.pop() else {
            debug!(expanded = self.stats.expanded, "frontier exhausted, no path");
            self.phase = Phase::Exhausted;
            return Ok(self.phase);
        };

        if current == self.end {
            self.path = reconstruct(&self.came_from, self.end, grid, observer);
            grid.set_status(self.end, Status::Unvisited);
            debug!(
                length = self.path.len().saturating_sub(1),
                expanded = self.stats.expanded,
                "path found"
            );
            self.phase = Phase::Succeeded;
            return Ok(self.phase);
        }

        let current_g = self.g_score.get(&current).copied().unwrap_or(u32::MAX);
        let neighbors = grid.cached_neighbors(current).to_vec();

        for neighbor in neighbors {
            let tentative_g = current_g.saturating_add(1);
            let known_g = self.g_score.get(&neighbor).copied().unwrap_or(u32::MAX);
            if tentative_g >= known_g {
                continue;
            }

            self.came_from.insert(neighbor, current);
            self.g_score.insert(neighbor, tentative_g);
            let f = self.strategy.priority(tentative_g, neighbor, self.end);
            self.f_score.insert(neighbor, f);

            if self.frontier.push(f, neighbor) {
                self.stats.opened += 1;
                grid.set_status(neighbor, Status::Open);
            }
        }

        self.stats.expanded += 1;
        trace!(%current, g = current_g, frontier = self.frontier.len(), "expanded");
        observer(Step::Expanded(current), &*grid);

        if current != self.start {
            grid.set_status(current, Status::Closed);
        }

        Ok(self.phase)
    }
}

/// Run a search to completion on the calling thread.
/// `observer` is invoked after every expansion and every reconstruction step.
pub fn run<F>(
    grid: &mut Grid,
    start: Position,
    end: Position,
    strategy: Strategy,
    mut observer: F,
) -> Result<Outcome, SearchError>
where
    F: FnMut(Step, &Grid),
{
    let mut search = Search::new(grid, start, end, strategy)?;
    loop {
        let phase = search.step(grid, &mut observer)?;
        if phase.is_terminal() {
            break;
        }
    }
    // Terminal phases always yield an outcome
    Ok(search
        .outcome()
        .unwrap_or(Outcome::Exhausted { stats: search.stats() }))
}
