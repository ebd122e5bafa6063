#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Pursuit agent.
//!
//! This crate defines the value types that connect the world driver, the
//! grid engine, and the tactical decision layer. The world hands over a grid
//! of integer cell categories, the controlled entity's [`Coord`], and a list
//! of [`AdversaryView`] values each tick; the decision layer answers with a
//! single [`Direction`] wrapped in a [`Decision`] report.

use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

/// Integer tag stored in every grid cell. Its meaning is assigned by the caller.
pub type Category = i32;

/// Sentinel returned when a coordinate outside the grid is queried.
pub const OUT_OF_BOUNDS: Category = -1;

/// Distance recorded for cells a breadth-first search never reached.
pub const UNREACHED: i32 = -1;

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so callers may describe positions beyond the grid
/// edges; the engine resolves those through bounds checks or wraparound.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coord {
    /// Zero-based column index.
    pub x: i32,
    /// Zero-based row index.
    pub y: i32,
}

impl Coord {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column component of the coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row component of the coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Coordinate displaced by the provided deltas, without any wrapping.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Computes the Euclidean distance between two coordinates.
    #[must_use]
    pub fn distance(self, other: Coord) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// Computes the Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Reasons a textual `"x,y"` coordinate may fail to parse.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseCoordError {
    /// The input did not contain exactly one comma separator.
    #[error("expected a coordinate in the form x,y")]
    MissingSeparator,
    /// One of the components was not a valid integer.
    #[error("invalid coordinate component: {0}")]
    InvalidComponent(#[source] ParseIntError),
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (x, y) = value
            .split_once(',')
            .ok_or(ParseCoordError::MissingSeparator)?;
        if y.contains(',') {
            return Err(ParseCoordError::MissingSeparator);
        }

        let x = x
            .trim()
            .parse::<i32>()
            .map_err(ParseCoordError::InvalidComponent)?;
        let y = y
            .trim()
            .parse::<i32>()
            .map_err(ParseCoordError::InvalidComponent)?;
        Ok(Self::new(x, y))
    }
}

/// Cardinal movement directions available to the controlled entity.
///
/// The world's vertical axis grows upwards: [`Direction::Up`] increases the
/// row index and [`Direction::Down`] decreases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing row indices.
    Up,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward decreasing row indices.
    Down,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Fixed order used whenever any legal direction has to be picked.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Unit displacement `(dx, dy)` produced by a step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Left => (-1, 0),
            Self::Down => (0, -1),
            Self::Right => (1, 0),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Right => Self::Left,
        }
    }

    /// Integer move code understood by the world (`UP=0, LEFT=1, DOWN=2, RIGHT=3`).
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Up => 0,
            Self::Left => 1,
            Self::Down => 2,
            Self::Right => 3,
        }
    }

    /// Resolves a world move code back into a direction.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Up),
            1 => Some(Self::Left),
            2 => Some(Self::Down),
            3 => Some(Self::Right),
            _ => None,
        }
    }

    /// Upper-case name used by drivers when reporting a move.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Left => "LEFT",
            Self::Down => "DOWN",
            Self::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Assigns game meaning to the integer categories stored in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Category treated as an impassable wall.
    pub obstacle: Category,
    /// Category of ordinary collectibles (dots).
    pub collectible: Category,
    /// Category of bonus items (power pellets).
    pub bonus: Category,
}

impl Palette {
    /// Creates a palette from explicit category values.
    #[must_use]
    pub const fn new(obstacle: Category, collectible: Category, bonus: Category) -> Self {
        Self {
            obstacle,
            collectible,
            bonus,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(1, 2, 3)
    }
}

/// Read-only view of a single adversary for the current tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdversaryView {
    /// Cell currently occupied by the adversary.
    pub cell: Coord,
    /// Remaining time the adversary stays vulnerable; zero when dangerous.
    #[serde(default)]
    pub vulnerable_for: f64,
}

impl AdversaryView {
    /// Creates a view of an adversary that is currently dangerous.
    #[must_use]
    pub const fn dangerous(cell: Coord) -> Self {
        Self {
            cell,
            vulnerable_for: 0.0,
        }
    }

    /// Creates a view of an adversary that stays vulnerable for the given time.
    #[must_use]
    pub const fn vulnerable(cell: Coord, vulnerable_for: f64) -> Self {
        Self {
            cell,
            vulnerable_for,
        }
    }

    /// Reports whether the remaining vulnerable time exceeds the threshold.
    #[must_use]
    pub fn is_vulnerable(&self, threshold: f64) -> bool {
        self.vulnerable_for > threshold
    }
}

/// Tactical situation classified from scratch every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionState {
    /// A dangerous adversary is within striking distance.
    Escape,
    /// A vulnerable adversary is close enough to hunt.
    Chase,
    /// Danger is approaching and a bonus item is available.
    SeekBonus,
    /// Nothing urgent; gather ordinary collectibles.
    Collect,
}

impl DecisionState {
    /// Evaluation priority, where `1` wins over every other state.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Escape => 1,
            Self::Chase => 2,
            Self::SeekBonus => 3,
            Self::Collect => 4,
        }
    }

    /// Stable lowercase label used in logs and driver output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Escape => "escape",
            Self::Chase => "chase",
            Self::SeekBonus => "seek_bonus",
            Self::Collect => "collect",
        }
    }
}

impl fmt::Display for DecisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a single decision tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// State the situation was classified as.
    pub state: DecisionState,
    /// Direction the controlled entity should move in.
    pub direction: Direction,
    /// Cell the behavior steered toward, when it had one.
    pub target: Option<Coord>,
}
