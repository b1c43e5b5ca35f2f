//! Property-based invariant tests for the search engine.
//!
//! 1. Without barriers both strategies find a path of Manhattan length.
//! 2. On any grid, A* and Dijkstra agree on success and path length, and the
//!    length matches a breadth-first distance.
//! 3. A* never expands more cells than Dijkstra.
//! 4. A failed search tags no cell as Path.
//! 5. Reported paths are 4-connected and avoid barriers.
//! 6. `neighbors_of` is idempotent.

mod common;

use common::{assert_valid_path, open_grid, run_grid, CELL_SIZE};
use pathviz::{CellState, Grid, Position, Role, Strategy as SearchStrategy};
use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};

// ── Helpers ─────────────────────────────────────────────────────────────

/// Grid size, barrier mask, start index, end index
fn layout_strategy() -> impl Strategy<Value = (i32, Vec<bool>, usize, usize)> {
    (2i32..=10).prop_flat_map(|size| {
        let cells = (size * size) as usize;
        (
            Just(size),
            prop::collection::vec(prop::bool::weighted(0.3), cells),
            0..cells,
            0..cells,
        )
    })
    .prop_filter("start and end differ", |(_, _, s, e)| s != e)
}

fn build_grid(size: i32, barriers: &[bool], start: usize, end: usize) -> (Grid, Position, Position) {
    let at = |i: usize| Position::new(i as i32 / size, i as i32 % size);
    let mut grid = Grid::new(size, CELL_SIZE);
    for (i, &blocked) in barriers.iter().enumerate() {
        if blocked {
            grid.set_role(at(i), Role::Barrier);
        }
    }
    grid.set_role(at(start), Role::Start);
    grid.set_role(at(end), Role::End);
    (grid, at(start), at(end))
}

fn bfs_distance(grid: &Grid, start: Position, end: Position) -> Option<usize> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(start, 0usize);
    queue.push_back(start);
    while let Some(pos) = queue.pop_front() {
        let d = dist[&pos];
        if pos == end {
            return Some(d);
        }
        for n in grid.neighbors_of(pos) {
            if !dist.contains_key(&n) {
                dist.insert(n, d + 1);
                queue.push_back(n);
            }
        }
    }
    None
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Open grids
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn open_grid_path_is_manhattan(
        size in 2i32..=12,
        a in (0i32..12, 0i32..12),
        b in (0i32..12, 0i32..12),
    ) {
        let start = Position::new(a.0 % size, a.1 % size);
        let end = Position::new(b.0 % size, b.1 % size);
        prop_assume!(start != end);

        for strategy in [SearchStrategy::AStar, SearchStrategy::Dijkstra] {
            let result = run_grid(open_grid(size, start, end), strategy);
            prop_assert!(result.outcome.is_success());
            prop_assert_eq!(result.outcome.path_len(), Some(start.manhattan(&end) as usize));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-5. Random barriers
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn strategies_agree_and_are_optimal((size, barriers, s, e) in layout_strategy()) {
        let (grid, start, end) = build_grid(size, &barriers, s, e);
        let expected = bfs_distance(&grid, start, end);

        let astar = run_grid(grid.clone(), SearchStrategy::AStar);
        let dijkstra = run_grid(grid, SearchStrategy::Dijkstra);

        prop_assert_eq!(astar.outcome.path_len(), expected);
        prop_assert_eq!(dijkstra.outcome.path_len(), expected);
        prop_assert!(
            astar.outcome.stats().expanded <= dijkstra.outcome.stats().expanded,
            "A* expanded {} > Dijkstra {}",
            astar.outcome.stats().expanded,
            dijkstra.outcome.stats().expanded
        );

        for result in [&astar, &dijkstra] {
            match result.outcome.path() {
                Some(path) => {
                    prop_assert_eq!(path.first(), Some(&start));
                    prop_assert_eq!(path.last(), Some(&end));
                    assert_valid_path(&result.grid, path);
                    prop_assert_eq!(result.count(CellState::Path), path.len() - 2);
                }
                None => {
                    prop_assert_eq!(result.count(CellState::Path), 0);
                    prop_assert_eq!(result.traced_steps(), 0);
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Neighbor idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn neighbors_of_is_idempotent((size, barriers, s, e) in layout_strategy()) {
        let (grid, _, _) = build_grid(size, &barriers, s, e);
        for cell in grid.cells() {
            prop_assert_eq!(grid.neighbors_of(cell.pos), grid.neighbors_of(cell.pos));
            prop_assert!(grid.neighbors_of(cell.pos).iter().all(|n| cell.pos.manhattan(n) == 1));
        }
    }
}
