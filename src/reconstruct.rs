use crate::cell::{Position, Role, Status};
use crate::search::Step;
use crate::Grid;
use std::collections::HashMap;

/// Walk `came_from` backward from `end`, tagging every stepped-to cell as
/// Path and notifying `observer` once per step.
///
/// The start cell has no predecessor, which ends the walk. Start and end keep
/// their painted roles and are never tagged. Returns the path ordered from
/// start to end.
pub fn reconstruct<F>(
    came_from: &HashMap<Position, Position>,
    end: Position,
    grid: &mut Grid,
    observer: &mut F,
) -> Vec<Position>
where
    F: FnMut(Step, &Grid),
{
    let mut path = vec![end];
    let mut current = end;

    while let Some(&prev) = came_from.get(&current) {
        current = prev;
        if grid.role(current) != Some(Role::Start) {
            grid.set_status(current, Status::Path);
        }
        path.push(current);
        observer(Step::Traced(current), &*grid);
    }

    path.reverse();
    path
}
