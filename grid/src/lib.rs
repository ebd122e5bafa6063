#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid distance and path engine for Maze Pursuit.
//!
//! [`Grid`] owns a dense matrix of integer cell categories and knows nothing
//! about game rules. Obstacles are whatever category the caller names for a
//! given query, so the same grid can be searched under different obstacle
//! semantics. When the grid is cyclic, stepping over an edge wraps to the
//! opposite edge; otherwise off-grid positions are simply absent.

mod field;
mod fill;
mod path;

pub use field::DistanceField;
pub use path::Path;

use maze_pursuit_core::{Category, Coord, Direction, OUT_OF_BOUNDS};

/// Largest width or height accepted by the grid constructors.
pub const MAX_EXTENT: usize = u16::MAX as usize;

/// Errors raised while constructing a grid from caller supplied data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A row (or column) did not match the length of the first one.
    #[error("row {index} holds {found} cells but {expected} were expected")]
    RaggedRows {
        /// Position of the offending row in the input.
        index: usize,
        /// Length established by the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The requested dimensions exceed [`MAX_EXTENT`].
    #[error("grid of {width}x{height} cells exceeds the supported extent")]
    TooLarge {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
    },
}

/// Rectangular matrix of cell categories with optional wraparound adjacency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cyclic: bool,
    cells: Vec<Category>,
}

impl Grid {
    /// Creates a non-cyclic grid where every cell holds `value`.
    #[must_use]
    pub fn filled(width: u16, height: u16, value: Category) -> Self {
        let cell_count = usize::from(width) * usize::from(height);
        Self {
            width: u32::from(width),
            height: u32::from(height),
            cyclic: false,
            cells: vec![value; cell_count],
        }
    }

    /// Creates a non-cyclic `size` by `size` grid filled with zeroes.
    #[must_use]
    pub fn square(size: u16) -> Self {
        Self::filled(size, size, 0)
    }

    /// Builds a non-cyclic grid where `rows[y][x]` becomes the cell at `(x, y)`.
    pub fn from_rows(rows: Vec<Vec<Category>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width > MAX_EXTENT || height > MAX_EXTENT {
            return Err(GridError::TooLarge { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRows {
                    index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            width: clamp_extent(width),
            height: clamp_extent(height),
            cyclic: false,
            cells,
        })
    }

    /// Builds a non-cyclic grid from the world's column-major `board[x][y]` layout.
    pub fn from_columns(columns: Vec<Vec<Category>>) -> Result<Self, GridError> {
        let height = columns.first().map_or(0, Vec::len);
        if let Some((index, column)) = columns
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() != height)
        {
            return Err(GridError::RaggedRows {
                index,
                expected: height,
                found: column.len(),
            });
        }

        let rows = (0..height)
            .map(|y| columns.iter().map(|column| column[y]).collect())
            .collect();
        Self::from_rows(rows)
    }

    /// Returns the grid with the provided wraparound setting.
    #[must_use]
    pub fn with_cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    /// Width of the grid in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the grid in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether edges wrap to the opposite side.
    #[must_use]
    pub const fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// Enables or disables wraparound adjacency.
    pub fn set_cyclic(&mut self, cyclic: bool) {
        self.cyclic = cyclic;
    }

    /// Reports whether the coordinate lies on the grid.
    #[must_use]
    pub fn contains(&self, cell: Coord) -> bool {
        self.index(cell).is_some()
    }

    /// Category stored at the cell, or [`OUT_OF_BOUNDS`] when off the grid.
    #[must_use]
    pub fn get(&self, cell: Coord) -> Category {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(OUT_OF_BOUNDS)
    }

    /// Overwrites the category stored at the cell. Off-grid writes are ignored.
    pub fn set(&mut self, cell: Coord, category: Category) {
        if let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            *slot = category;
        }
    }

    /// Dense categories stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Category] {
        &self.cells
    }

    /// Copies the categories out as `rows[y][x]`.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<Category>> {
        let width = usize::try_from(self.width).unwrap_or(0);
        if width == 0 {
            return vec![Vec::new(); usize::try_from(self.height).unwrap_or(0)];
        }
        self.cells.chunks(width).map(<[Category]>::to_vec).collect()
    }

    /// Iterates every cell holding `category` in row-major order.
    pub fn find(&self, category: Category) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, value)| **value == category)
            .filter_map(move |(index, _)| self.coord_at(index))
    }

    /// Number of cells holding `category`.
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.cells.iter().filter(|&&value| value == category).count()
    }

    /// Canonical on-grid form of a coordinate.
    ///
    /// Cyclic grids fold any coordinate back onto the grid; non-cyclic grids
    /// only accept coordinates that already lie on it.
    #[must_use]
    pub fn wrap(&self, cell: Coord) -> Option<Coord> {
        if self.cells.is_empty() {
            return None;
        }

        if self.cyclic {
            let (width, height) = self.extent();
            Some(Coord::new(
                cell.x.rem_euclid(width),
                cell.y.rem_euclid(height),
            ))
        } else if self.contains(cell) {
            Some(cell)
        } else {
            None
        }
    }

    /// Cell reached by a single step from `cell` in `direction`.
    #[must_use]
    pub fn step(&self, cell: Coord, direction: Direction) -> Option<Coord> {
        if !self.contains(cell) {
            return None;
        }
        let (dx, dy) = direction.offset();
        self.wrap(cell.offset(dx, dy))
    }

    /// Grid-adjacent cells of `cell` in the order up, down, right, left.
    ///
    /// Off-grid steps are omitted on non-cyclic grids and wrap around on
    /// cyclic ones. Off-grid input has no neighbors.
    #[must_use]
    pub fn neighbors(&self, cell: Coord) -> NeighborIter {
        let mut neighbors = NeighborIter::default();
        if !self.contains(cell) {
            return neighbors;
        }

        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Right,
            Direction::Left,
        ] {
            if let Some(neighbor) = self.step(cell, direction) {
                neighbors.push(neighbor);
            }
        }

        neighbors
    }

    /// Direction of the single step leading from `from` to the adjacent `to`.
    ///
    /// On cyclic grids a delta longer than half the grid is read as the
    /// shorter wrapped step. Pairs that are not adjacent yield `None`.
    #[must_use]
    pub fn direction_between(&self, from: Coord, to: Coord) -> Option<Direction> {
        let mut dx = i64::from(to.x) - i64::from(from.x);
        let mut dy = i64::from(to.y) - i64::from(from.y);

        if self.cyclic {
            let width = i64::from(self.width);
            let height = i64::from(self.height);
            if dx.abs() > width / 2 {
                dx -= dx.signum() * width;
            }
            if dy.abs() > height / 2 {
                dy -= dy.signum() * height;
            }
        }

        match (dx, dy) {
            (1, 0) => Some(Direction::Right),
            (-1, 0) => Some(Direction::Left),
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            _ => None,
        }
    }

    fn extent(&self) -> (i32, i32) {
        (extent_i32(self.width), extent_i32(self.height))
    }

    pub(crate) fn index(&self, cell: Coord) -> Option<usize> {
        let column = u32::try_from(cell.x).ok()?;
        let row = u32::try_from(cell.y).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }

        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        let width = usize::try_from(self.width).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    pub(crate) fn coord_at(&self, index: usize) -> Option<Coord> {
        let width = usize::try_from(self.width).ok()?;
        if width == 0 || index >= self.cells.len() {
            return None;
        }
        let x = i32::try_from(index % width).ok()?;
        let y = i32::try_from(index / width).ok()?;
        Some(Coord::new(x, y))
    }

    pub(crate) fn blank_like(&self, value: Category) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cyclic: self.cyclic,
            cells: vec![value; self.cells.len()],
        }
    }
}

/// Fixed-capacity iterator over the up to four neighbors of a cell.
#[derive(Clone, Debug, Default)]
pub struct NeighborIter {
    buffer: [Option<Coord>; 4],
    len: usize,
    cursor: usize,
}

impl NeighborIter {
    fn push(&mut self, cell: Coord) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for NeighborIter {}

fn clamp_extent(value: usize) -> u32 {
    u32::try_from(value.min(MAX_EXTENT)).unwrap_or(0)
}

fn extent_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
