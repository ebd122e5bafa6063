//! Priority classification of a tick into a decision state.

use maze_pursuit_core::{AdversaryView, Coord, DecisionState, Palette};
use maze_pursuit_grid::{DistanceField, Grid};

use crate::{Config, Situation};

/// Classifies the tick into the highest priority state whose trigger holds.
///
/// `field` must be the distance field computed from the entity's position
/// with the palette's obstacle category.
#[must_use]
pub fn classify(
    situation: &Situation<'_>,
    field: &DistanceField,
    palette: &Palette,
    config: &Config,
) -> DecisionState {
    let danger = config.danger_threshold();

    let threatened = dangerous(situation.adversaries, config)
        .filter_map(|adversary| field.distance(adversary.cell))
        .any(|distance| distance <= danger);
    if threatened {
        return DecisionState::Escape;
    }

    if chase_targets(situation, field, config).next().is_some() {
        return DecisionState::Chase;
    }

    let horizon = danger.saturating_add(config.bonus_lookahead());
    let approaching = dangerous(situation.adversaries, config)
        .filter(|adversary| {
            !in_spawn_zone(situation.grid, adversary.cell, config.spawn_radius())
        })
        .filter_map(|adversary| field.distance(adversary.cell))
        .any(|distance| distance > danger && distance <= horizon);
    if approaching && situation.grid.find(palette.bonus).next().is_some() {
        return DecisionState::SeekBonus;
    }

    DecisionState::Collect
}

/// Reports whether `cell` lies in the square spawn zone around the grid midpoint.
#[must_use]
pub fn in_spawn_zone(grid: &Grid, cell: Coord, radius: u32) -> bool {
    let center_x = i64::from(grid.width() / 2);
    let center_y = i64::from(grid.height() / 2);
    let radius = i64::from(radius);

    (i64::from(cell.x) - center_x).abs() <= radius
        && (i64::from(cell.y) - center_y).abs() <= radius
}

pub(crate) fn dangerous<'a>(
    adversaries: &'a [AdversaryView],
    config: &'a Config,
) -> impl Iterator<Item = &'a AdversaryView> + 'a {
    adversaries
        .iter()
        .filter(move |adversary| !adversary.is_vulnerable(config.vulnerability_threshold()))
}

/// Vulnerable adversaries worth hunting, paired with their distance.
pub(crate) fn chase_targets<'a>(
    situation: &'a Situation<'_>,
    field: &'a DistanceField,
    config: &'a Config,
) -> impl Iterator<Item = (Coord, u32)> + 'a {
    let grid: &'a Grid = situation.grid;
    let adversaries: &'a [AdversaryView] = situation.adversaries;

    adversaries
        .iter()
        .filter(move |adversary| adversary.is_vulnerable(config.vulnerability_threshold()))
        .filter(move |adversary| !in_spawn_zone(grid, adversary.cell, config.spawn_radius()))
        .filter_map(move |adversary| {
            let distance = field.distance(adversary.cell)?;
            (distance > 0 && distance <= config.chase_threshold())
                .then_some((adversary.cell, distance))
        })
}
