//! Breadth-first search over the 4-connected grid graph.

use std::collections::VecDeque;

use crate::{
    GridCoord,
    map::{Grid, GridModel},
};

/// Neighbor expansion order: left, right, up, down.
///
/// When several shortest paths exist this order decides which one is
/// returned; horizontal steps win ties over vertical ones.
pub const NEIGHBOR_ORDER: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Returns manhattan distance between two cells.
pub fn manhattan_distance(a: GridCoord, b: GridCoord) -> u32 {
    a.col.abs_diff(b.col) + a.row.abs_diff(b.row)
}

/// Computes a shortest path from `start` to `goal`, both inclusive.
///
/// Returns an empty path if either cell lies outside the grid or the goal
/// is never discovered. Every cell is enqueued at most once, so the first
/// time the goal is dequeued its parent chain is minimal in edge count.
pub fn find_path(grid: &GridModel, start: GridCoord, goal: GridCoord) -> Vec<GridCoord> {
    if !grid.contains(start) || !grid.contains(goal) {
        return Vec::new();
    }

    let mut frontier = VecDeque::new();
    let mut visited: Grid<bool> = Grid::new(grid);
    let mut came_from: Grid<Option<GridCoord>> = Grid::new(grid);

    frontier.push_back(start);
    visited[start] = true;

    while let Some(current) = frontier.pop_front() {
        if current == goal {
            return reconstruct(&came_from, start, goal);
        }

        for (dc, dr) in NEIGHBOR_ORDER {
            let next = GridCoord::new(current.col + dc, current.row + dr);
            // Out-of-grid neighbors have no visited slot.
            let Some(seen) = visited.get_mut(next) else {
                continue;
            };
            if *seen {
                continue;
            }
            *seen = true;
            came_from[next] = Some(current);
            frontier.push_back(next);
        }
    }

    Vec::new()
}

fn reconstruct(
    came_from: &Grid<Option<GridCoord>>,
    start: GridCoord,
    goal: GridCoord,
) -> Vec<GridCoord> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from[current] {
            Some(previous) => {
                current = previous;
                path.push(current);
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
