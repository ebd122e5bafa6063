//! In-place flood fill over connected same-category regions.

use maze_pursuit_core::{Category, Coord};

use crate::Grid;

impl Grid {
    /// Repaints the region connected to `start` that shares its category.
    ///
    /// Connectivity follows [`Grid::neighbors`], so cyclic grids fill across
    /// their edges. Returns the number of repainted cells, which is zero when
    /// `start` is off the grid or already holds `category`.
    pub fn flood_fill(&mut self, start: Coord, category: Category) -> usize {
        let Some(start_index) = self.index(start) else {
            return 0;
        };
        let original = self.cells[start_index];
        if original == category {
            return 0;
        }

        let mut pending = vec![start];
        let mut painted = 0;

        while let Some(cell) = pending.pop() {
            let Some(index) = self.index(cell) else {
                continue;
            };
            // Repainting marks the cell as visited.
            if self.cells[index] != original {
                continue;
            }

            self.cells[index] = category;
            painted += 1;
            pending.extend(self.neighbors(cell));
        }

        painted
    }
}
