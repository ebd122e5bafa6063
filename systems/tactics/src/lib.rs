#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Priority-ordered tactical decision layer for the controlled entity.
//!
//! Every tick is evaluated from scratch: one distance field is computed from
//! the entity's position, [`classify`] picks the highest priority
//! [`DecisionState`] whose trigger holds, [`act`] runs that state's behavior,
//! and the chosen direction is re-validated before it is returned. Nothing
//! is remembered between ticks.

mod behavior;
mod state;
mod steering;

pub use behavior::{act, Action};
pub use state::{classify, in_spawn_zone};

use maze_pursuit_core::{AdversaryView, Coord, Decision, DecisionState, Direction, Palette};
use maze_pursuit_grid::Grid;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Direction returned when no neighbor of the entity can be entered.
pub const DEFAULT_DIRECTION: Direction = Direction::Up;

/// Tunable thresholds that shape the state triggers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    danger_threshold: u32,
    chase_threshold: u32,
    bonus_lookahead: u32,
    spawn_radius: u32,
    vulnerability_threshold: f64,
}

impl Config {
    /// Creates a configuration from explicit thresholds.
    #[must_use]
    pub const fn new(
        danger_threshold: u32,
        chase_threshold: u32,
        bonus_lookahead: u32,
        spawn_radius: u32,
        vulnerability_threshold: f64,
    ) -> Self {
        Self {
            danger_threshold,
            chase_threshold,
            bonus_lookahead,
            spawn_radius,
            vulnerability_threshold,
        }
    }

    /// Distance at or below which a dangerous adversary forces an escape.
    #[must_use]
    pub const fn danger_threshold(&self) -> u32 {
        self.danger_threshold
    }

    /// Distance at or below which a vulnerable adversary is hunted.
    #[must_use]
    pub const fn chase_threshold(&self) -> u32 {
        self.chase_threshold
    }

    /// Extra distance beyond the danger threshold that triggers bonus seeking.
    #[must_use]
    pub const fn bonus_lookahead(&self) -> u32 {
        self.bonus_lookahead
    }

    /// Half-width of the square spawn zone centered on the grid midpoint.
    #[must_use]
    pub const fn spawn_radius(&self) -> u32 {
        self.spawn_radius
    }

    /// Remaining vulnerable time an adversary must exceed to count as prey.
    #[must_use]
    pub const fn vulnerability_threshold(&self) -> f64 {
        self.vulnerability_threshold
    }

    /// Overrides the escape trigger distance.
    #[must_use]
    pub const fn with_danger_threshold(mut self, value: u32) -> Self {
        self.danger_threshold = value;
        self
    }

    /// Overrides the chase trigger distance.
    #[must_use]
    pub const fn with_chase_threshold(mut self, value: u32) -> Self {
        self.chase_threshold = value;
        self
    }

    /// Overrides the bonus lookahead distance.
    #[must_use]
    pub const fn with_bonus_lookahead(mut self, value: u32) -> Self {
        self.bonus_lookahead = value;
        self
    }

    /// Overrides the spawn zone half-width.
    #[must_use]
    pub const fn with_spawn_radius(mut self, value: u32) -> Self {
        self.spawn_radius = value;
        self
    }

    /// Overrides the vulnerable time threshold.
    #[must_use]
    pub const fn with_vulnerability_threshold(mut self, value: f64) -> Self {
        self.vulnerability_threshold = value;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(3, 10, 3, 3, 0.0)
    }
}

/// Snapshot of the world handed to the decision layer for one tick.
#[derive(Clone, Copy, Debug)]
pub struct Situation<'a> {
    /// Categories of every cell, including the world's wraparound setting.
    pub grid: &'a Grid,
    /// Cell occupied by the controlled entity.
    pub position: Coord,
    /// Adversaries currently on the board.
    pub adversaries: &'a [AdversaryView],
}

impl<'a> Situation<'a> {
    /// Captures a new situation.
    #[must_use]
    pub const fn new(grid: &'a Grid, position: Coord, adversaries: &'a [AdversaryView]) -> Self {
        Self {
            grid,
            position,
            adversaries,
        }
    }
}

/// Stateless controller that turns a [`Situation`] into a [`Decision`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tactics {
    palette: Palette,
    config: Config,
}

impl Tactics {
    /// Creates a controller for the given category meanings and thresholds.
    #[must_use]
    pub const fn new(palette: Palette, config: Config) -> Self {
        Self { palette, config }
    }

    /// Category meanings used by the controller.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Thresholds used by the controller.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Chooses the move for the current tick.
    ///
    /// The returned direction always leads onto an enterable cell when the
    /// entity has one; otherwise it is [`DEFAULT_DIRECTION`].
    #[must_use]
    pub fn decide(&self, situation: &Situation<'_>) -> Decision {
        let field = situation
            .grid
            .all_distances(situation.position, self.palette.obstacle);
        let state = classify(situation, &field, &self.palette, &self.config);
        let action = act(state, situation, &field, &self.palette, &self.config);
        let direction = steering::ensure_legal(
            situation.grid,
            situation.position,
            action.direction,
            self.palette.obstacle,
        );

        debug!(
            state = %state,
            direction = %direction,
            target = ?action.target,
            position = %situation.position,
            "decided move"
        );

        Decision {
            state,
            direction,
            target: action.target,
        }
    }

    /// Convenience wrapper that only reports the state the tick classifies as.
    #[must_use]
    pub fn classify(&self, situation: &Situation<'_>) -> DecisionState {
        let field = situation
            .grid
            .all_distances(situation.position, self.palette.obstacle);
        classify(situation, &field, &self.palette, &self.config)
    }
}
