//! Move legality checks and the post-decision safety net.

use maze_pursuit_core::{Category, Coord, Direction};
use maze_pursuit_grid::Grid;
use tracing::warn;

use crate::DEFAULT_DIRECTION;

/// Order in which candidate neighbors are enumerated, matching [`Grid::neighbors`].
const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Right,
    Direction::Left,
];

pub(crate) fn is_open(grid: &Grid, cell: Coord, obstacle: Category) -> bool {
    grid.contains(cell) && grid.get(cell) != obstacle
}

/// Enterable neighbors of `cell` paired with the direction that reaches them.
pub(crate) fn open_neighbors(
    grid: &Grid,
    cell: Coord,
    obstacle: Category,
) -> impl Iterator<Item = (Direction, Coord)> + '_ {
    NEIGHBOR_ORDER.into_iter().filter_map(move |direction| {
        let neighbor = grid.step(cell, direction)?;
        is_open(grid, neighbor, obstacle).then_some((direction, neighbor))
    })
}

pub(crate) fn first_open_direction(
    grid: &Grid,
    cell: Coord,
    obstacle: Category,
) -> Option<Direction> {
    Direction::SCAN_ORDER.into_iter().find(|&direction| {
        grid.step(cell, direction)
            .is_some_and(|neighbor| is_open(grid, neighbor, obstacle))
    })
}

/// Keeps `direction` when it leads onto an enterable cell, otherwise
/// substitutes the first enterable direction in scan order.
pub(crate) fn ensure_legal(
    grid: &Grid,
    position: Coord,
    direction: Direction,
    obstacle: Category,
) -> Direction {
    let lands_open = grid
        .step(position, direction)
        .is_some_and(|cell| is_open(grid, cell, obstacle));
    if lands_open {
        return direction;
    }

    match first_open_direction(grid, position, obstacle) {
        Some(substitute) => {
            warn!(
                %position,
                rejected = %direction,
                substitute = %substitute,
                "behavior chose a blocked move"
            );
            substitute
        }
        None => DEFAULT_DIRECTION,
    }
}
