//! Per-state behaviors that propose the next move.

use std::cmp::Ordering;

use maze_pursuit_core::{Category, Coord, DecisionState, Direction, Palette};
use maze_pursuit_grid::{DistanceField, Grid};
use tracing::trace;

use crate::{
    state::{chase_targets, dangerous},
    steering::{first_open_direction, open_neighbors},
    Config, Situation, DEFAULT_DIRECTION,
};

/// Move proposed by a state's behavior before the safety net runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Action {
    /// Direction the behavior wants to step in.
    pub direction: Direction,
    /// Cell the behavior is heading for, if it picked one.
    pub target: Option<Coord>,
}

impl Action {
    const fn toward(direction: Direction, target: Coord) -> Self {
        Self {
            direction,
            target: Some(target),
        }
    }

    const fn aimless(direction: Direction) -> Self {
        Self {
            direction,
            target: None,
        }
    }
}

/// Runs the behavior associated with `state`.
///
/// CHASE and SEEK_BONUS degrade to COLLECT when their target cannot be
/// reached. The returned direction is not yet checked against the grid.
#[must_use]
pub fn act(
    state: DecisionState,
    situation: &Situation<'_>,
    field: &DistanceField,
    palette: &Palette,
    config: &Config,
) -> Action {
    match state {
        DecisionState::Escape => escape(situation, palette, config),
        DecisionState::Chase => chase(situation, field, palette, config)
            .unwrap_or_else(|| collect(situation, field, palette)),
        DecisionState::SeekBonus => seek_bonus(situation, field, palette)
            .unwrap_or_else(|| collect(situation, field, palette)),
        DecisionState::Collect => collect(situation, field, palette),
    }
}

fn escape(situation: &Situation<'_>, palette: &Palette, config: &Config) -> Action {
    let grid = situation.grid;
    let mut best: Option<(Direction, Coord, EscapeScore)> = None;

    for (direction, cell) in open_neighbors(grid, situation.position, palette.obstacle) {
        let score = EscapeScore::measure(situation, cell, palette, config);
        trace!(
            %cell,
            %direction,
            nearest = score.nearest_threat,
            mean = score.mean_threat,
            collectible = score.collectible,
            "escape candidate"
        );

        let replace = best
            .as_ref()
            .map_or(true, |(_, _, current)| score.is_better_than(current));
        if replace {
            best = Some((direction, cell, score));
        }
    }

    match best {
        Some((direction, cell, _)) => Action::toward(direction, cell),
        None => fallback(grid, situation.position, palette.obstacle),
    }
}

fn chase(
    situation: &Situation<'_>,
    field: &DistanceField,
    palette: &Palette,
    config: &Config,
) -> Option<Action> {
    let (target, _) =
        chase_targets(situation, field, config).min_by_key(|&(_, distance)| distance)?;
    steer_toward(situation.grid, situation.position, target, palette.obstacle)
        .map(|direction| Action::toward(direction, target))
}

fn seek_bonus(
    situation: &Situation<'_>,
    field: &DistanceField,
    palette: &Palette,
) -> Option<Action> {
    let (target, _) = field.nearest(situation.grid.find(palette.bonus))?;
    steer_toward(situation.grid, situation.position, target, palette.obstacle)
        .map(|direction| Action::toward(direction, target))
}

fn collect(situation: &Situation<'_>, field: &DistanceField, palette: &Palette) -> Action {
    let grid = situation.grid;
    let position = situation.position;

    let adjacent = open_neighbors(grid, position, palette.obstacle)
        .find(|&(_, cell)| cell != position && grid.get(cell) == palette.collectible);
    if let Some((direction, cell)) = adjacent {
        return Action::toward(direction, cell);
    }

    let routed = field
        .nearest(grid.find(palette.collectible))
        .and_then(|(target, _)| {
            steer_toward(grid, position, target, palette.obstacle)
                .map(|direction| Action::toward(direction, target))
        });

    routed.unwrap_or_else(|| fallback(grid, position, palette.obstacle))
}

fn fallback(grid: &Grid, position: Coord, obstacle: Category) -> Action {
    Action::aimless(first_open_direction(grid, position, obstacle).unwrap_or(DEFAULT_DIRECTION))
}

/// Direction of the first step along a shortest path from `from` to `to`.
fn steer_toward(grid: &Grid, from: Coord, to: Coord, obstacle: Category) -> Option<Direction> {
    let path = grid.shortest_path(from, to, obstacle)?;
    let next = path.first_step()?;
    grid.direction_between(from, next)
}

/// Safety ranking of one escape candidate.
#[derive(Clone, Copy, Debug)]
struct EscapeScore {
    /// Distance to the closest reachable threat, `u32::MAX` when none is reachable.
    nearest_threat: u32,
    mean_threat: f64,
    /// Distance to the closest collectible, `u32::MAX` when none is reachable.
    collectible: u32,
}

impl EscapeScore {
    fn measure(situation: &Situation<'_>, cell: Coord, palette: &Palette, config: &Config) -> Self {
        let grid = situation.grid;
        let field = grid.all_distances(cell, palette.obstacle);

        let mut nearest_threat = u32::MAX;
        let mut total = 0.0;
        let mut reachable = 0_u32;
        for distance in dangerous(situation.adversaries, config)
            .filter_map(|adversary| field.distance(adversary.cell))
        {
            nearest_threat = nearest_threat.min(distance);
            total += f64::from(distance);
            reachable += 1;
        }
        let mean_threat = if reachable == 0 {
            f64::INFINITY
        } else {
            total / f64::from(reachable)
        };

        let collectible = grid
            .find(palette.collectible)
            .filter_map(|target| field.distance(target))
            .min()
            .unwrap_or(u32::MAX);

        Self {
            nearest_threat,
            mean_threat,
            collectible,
        }
    }

    fn is_better_than(&self, other: &EscapeScore) -> bool {
        let ordering = self
            .nearest_threat
            .cmp(&other.nearest_threat)
            .then_with(|| self.mean_threat.total_cmp(&other.mean_threat))
            .then_with(|| other.collectible.cmp(&self.collectible));
        ordering == Ordering::Greater
    }
}
