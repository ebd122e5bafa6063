//! Shortest path extraction with parent pointers.

use std::collections::VecDeque;

use maze_pursuit_core::{Category, Coord};

use crate::Grid;

/// Ordered cells leading from a source to a destination, both inclusive.
///
/// Consecutive cells are grid-adjacent under the wraparound setting of the
/// grid that produced the path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Coord>,
}

impl Path {
    /// Cells along the path, starting at the source.
    #[must_use]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Number of cells on the path, which is one more than [`Path::hops`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the path holds no cells. Paths built by the engine never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of steps needed to walk the path.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// First cell of the path.
    #[must_use]
    pub fn source(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    /// Last cell of the path.
    #[must_use]
    pub fn destination(&self) -> Option<Coord> {
        self.cells.last().copied()
    }

    /// Cell reached by the first step, absent when source and destination coincide.
    #[must_use]
    pub fn first_step(&self) -> Option<Coord> {
        self.cells.get(1).copied()
    }

    /// Consumes the path, yielding its cells.
    #[must_use]
    pub fn into_vec(self) -> Vec<Coord> {
        self.cells
    }
}

impl Grid {
    /// Finds a shortest path from `from` to `to` that never enters `obstacle`.
    ///
    /// A cell only counts as found once it is dequeued. Dequeued obstacle
    /// cells are discarded without expansion, so a blocked source or
    /// destination yields `None` just like an unreachable one.
    #[must_use]
    pub fn shortest_path(&self, from: Coord, to: Coord, obstacle: Category) -> Option<Path> {
        let from_index = self.index(from)?;
        let to_index = self.index(to)?;

        let mut parents: Vec<Option<usize>> = vec![None; self.cells.len()];
        let mut discovered = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();

        discovered[from_index] = true;
        queue.push_back(from_index);

        while let Some(current) = queue.pop_front() {
            if self.cells[current] == obstacle {
                continue;
            }
            if current == to_index {
                return self.trace_back(&parents, to_index);
            }

            let Some(cell) = self.coord_at(current) else {
                continue;
            };
            for neighbor in self.neighbors(cell) {
                let Some(neighbor_index) = self.index(neighbor) else {
                    continue;
                };
                if discovered[neighbor_index] {
                    continue;
                }

                discovered[neighbor_index] = true;
                parents[neighbor_index] = Some(current);
                queue.push_back(neighbor_index);
            }
        }

        None
    }

    fn trace_back(&self, parents: &[Option<usize>], destination: usize) -> Option<Path> {
        let mut cells = Vec::new();
        let mut current = Some(destination);
        while let Some(index) = current {
            cells.push(self.coord_at(index)?);
            current = parents[index];
        }
        cells.reverse();
        Some(Path { cells })
    }
}
