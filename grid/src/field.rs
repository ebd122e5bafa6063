//! Single-source breadth-first distance fields.

use std::collections::VecDeque;

use maze_pursuit_core::{Category, Coord, UNREACHED};

use crate::Grid;

/// Hop counts from a single source cell to every cell of a grid.
///
/// The field mirrors the dimensions and wraparound setting of the grid it was
/// computed from. Cells that could not be reached, including obstacles and
/// every cell when the source itself was blocked, hold [`UNREACHED`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    source: Coord,
    distances: Grid,
}

impl DistanceField {
    /// Cell the search started from.
    #[must_use]
    pub const fn source(&self) -> Coord {
        self.source
    }

    /// Width of the field in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.distances.width()
    }

    /// Height of the field in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.distances.height()
    }

    /// Raw distance stored for the cell; [`UNREACHED`] when unreached or off-grid.
    #[must_use]
    pub fn get(&self, cell: Coord) -> i32 {
        self.distances.get(cell)
    }

    /// Shortest hop count to the cell, if it was reached.
    #[must_use]
    pub fn distance(&self, cell: Coord) -> Option<u32> {
        u32::try_from(self.get(cell)).ok()
    }

    /// Reports whether the search reached the cell.
    #[must_use]
    pub fn is_reachable(&self, cell: Coord) -> bool {
        self.distance(cell).is_some()
    }

    /// Number of cells the search reached, the source included.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.distances
            .cells()
            .iter()
            .filter(|&&distance| distance != UNREACHED)
            .count()
    }

    /// Closest candidate at a strictly positive distance.
    ///
    /// Candidates are examined in iteration order and the first one wins ties,
    /// so a row-major candidate stream yields a deterministic pick.
    pub fn nearest<I>(&self, candidates: I) -> Option<(Coord, u32)>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut best: Option<(Coord, u32)> = None;
        for cell in candidates {
            let Some(distance) = self.distance(cell) else {
                continue;
            };
            if distance == 0 {
                continue;
            }
            if best.map_or(true, |(_, current)| distance < current) {
                best = Some((cell, distance));
            }
        }
        best
    }

    /// Underlying grid of distances.
    #[must_use]
    pub fn as_grid(&self) -> &Grid {
        &self.distances
    }

    /// Consumes the field, yielding the underlying grid of distances.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.distances
    }
}

impl Grid {
    /// Computes the breadth-first distance from `start` to every cell.
    ///
    /// Cells holding `obstacle` are never entered. A blocked or off-grid
    /// `start` produces a field where every cell is [`UNREACHED`].
    #[must_use]
    pub fn all_distances(&self, start: Coord, obstacle: Category) -> DistanceField {
        let mut distances = self.blank_like(UNREACHED);

        let Some(start_index) = self.index(start) else {
            return DistanceField {
                source: start,
                distances,
            };
        };
        if self.cells[start_index] == obstacle {
            return DistanceField {
                source: start,
                distances,
            };
        }

        distances.cells[start_index] = 0;
        let mut queue = VecDeque::with_capacity(self.cells.len());
        queue.push_back(start);

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = self.index(cell) else {
                continue;
            };
            let next_distance = distances.cells[current_index] + 1;

            for neighbor in self.neighbors(cell) {
                let Some(neighbor_index) = self.index(neighbor) else {
                    continue;
                };
                if distances.cells[neighbor_index] != UNREACHED {
                    continue;
                }
                if self.cells[neighbor_index] == obstacle {
                    continue;
                }

                distances.cells[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }

        DistanceField {
            source: start,
            distances,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL: Category = 1;

    #[test]
    fn source_cell_is_zero_and_rings_grow_outward() {
        let grid = Grid::filled(3, 4, 0);
        let field = grid.all_distances(Coord::new(1, 2), WALL);

        assert_eq!(field.get(Coord::new(1, 2)), 0);
        assert_eq!(field.get(Coord::new(1, 1)), 1);
        assert_eq!(field.get(Coord::new(1, 0)), 2);
        assert_eq!(field.get(Coord::new(0, 0)), 3);
        assert_eq!(field.reachable_count(), 12);
    }

    #[test]
    fn walls_force_detours() {
        let mut grid = Grid::filled(3, 4, 0);
        let wall = Coord::new(1, 1);
        grid.set(wall, WALL);

        let field = grid.all_distances(Coord::new(1, 2), WALL);

        assert_eq!(field.get(wall), UNREACHED);
        assert_eq!(field.get(Coord::new(1, 0)), 4);
        assert_eq!(field.get(Coord::new(0, 1)), 2);
    }

    #[test]
    fn blocked_source_reaches_nothing() {
        let mut grid = Grid::filled(3, 3, 0);
        grid.set(Coord::new(0, 0), WALL);

        let field = grid.all_distances(Coord::new(0, 0), WALL);

        assert_eq!(field.reachable_count(), 0);
        assert!(field.as_grid().cells().iter().all(|&d| d == UNREACHED));
    }

    #[test]
    fn off_grid_source_reaches_nothing() {
        let grid = Grid::filled(3, 3, 0);

        let field = grid.all_distances(Coord::new(7, 0), WALL);

        assert_eq!(field.reachable_count(), 0);
        assert_eq!(field.width(), 3);
        assert_eq!(field.height(), 3);
    }

    #[test]
    fn nearest_skips_source_and_unreached_cells() {
        let grid = Grid::from_rows(vec![vec![0, 0, WALL, 0]]).expect("row");
        let field = grid.all_distances(Coord::new(0, 0), WALL);

        let candidates = [Coord::new(0, 0), Coord::new(3, 0), Coord::new(1, 0)];
        assert_eq!(field.nearest(candidates), Some((Coord::new(1, 0), 1)));
        assert_eq!(field.nearest([Coord::new(3, 0)]), None);
    }

    #[test]
    fn nearest_breaks_ties_by_candidate_order() {
        let grid = Grid::filled(3, 1, 0);
        let field = grid.all_distances(Coord::new(1, 0), WALL);

        let picked = field.nearest([Coord::new(2, 0), Coord::new(0, 0)]);
        assert_eq!(picked, Some((Coord::new(2, 0), 1)));
    }
}
