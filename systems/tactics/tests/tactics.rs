use maze_pursuit_core::{AdversaryView, Category, Coord, DecisionState, Direction, Palette};
use maze_pursuit_grid::Grid;
use maze_pursuit_system_tactics::{act, in_spawn_zone, Config, Situation, Tactics};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const OPEN: Category = 0;
const WALL: Category = 1;
const DOT: Category = 2;
const BONUS: Category = 3;

fn tactics() -> Tactics {
    Tactics::new(Palette::new(WALL, DOT, BONUS), Config::default())
}

fn grid(rows: &[&str]) -> Grid {
    // Rows are written top-down while y grows upward.
    let rows = rows
        .iter()
        .rev()
        .map(|row| {
            row.chars()
                .map(|symbol| match symbol {
                    '#' => WALL,
                    '.' => DOT,
                    'o' => BONUS,
                    _ => OPEN,
                })
                .collect()
        })
        .collect();
    Grid::from_rows(rows).expect("rectangular")
}

#[test]
fn escape_takes_the_only_exit_that_gains_distance() {
    let grid = grid(&["#####", "    #", "#####"]);
    let adversaries = [AdversaryView::dangerous(Coord::new(0, 1))];

    let decision = tactics().decide(&Situation::new(&grid, Coord::new(1, 1), &adversaries));

    assert_eq!(decision.state, DecisionState::Escape);
    assert_eq!(decision.direction, Direction::Right);
    assert_eq!(decision.target, Some(Coord::new(2, 1)));
}

#[test]
fn adversary_on_own_cell_still_forces_escape() {
    let grid = grid(&["     "]);
    let adversaries = [AdversaryView::dangerous(Coord::new(0, 0))];

    let decision = tactics().decide(&Situation::new(&grid, Coord::new(0, 0), &adversaries));

    assert_eq!(decision.state, DecisionState::Escape);
    assert_eq!(decision.direction, Direction::Right);
}

#[test]
fn vulnerable_adversary_is_hunted_down() {
    let grid = grid(&[
        "###########",
        "#         #",
        "#         #",
        "#         #",
        "#         #",
        "#         #",
        "#         #",
        "#         #",
        "###########",
    ]);
    let adversaries = [AdversaryView::vulnerable(Coord::new(1, 4), 6.5)];

    let decision = tactics().decide(&Situation::new(&grid, Coord::new(1, 1), &adversaries));

    assert_eq!(decision.state, DecisionState::Chase);
    assert_eq!(decision.direction, Direction::Up);
    assert_eq!(decision.target, Some(Coord::new(1, 4)));
}

#[test]
fn prey_inside_spawn_zone_is_left_alone() {
    let grid = grid(&[
        "###########",
        "#         #",
        "#         #",
        "#         #",
        "#         #",
        "#         #",
        "#.        #",
        "#         #",
        "###########",
    ]);
    let prey = Coord::new(5, 4);
    assert!(in_spawn_zone(&grid, prey, tactics().config().spawn_radius()));
    let adversaries = [AdversaryView::vulnerable(prey, 6.5)];

    let decision = tactics().decide(&Situation::new(&grid, Coord::new(1, 4), &adversaries));

    assert_eq!(decision.state, DecisionState::Collect);
    assert_eq!(decision.direction, Direction::Down);
    assert_eq!(decision.target, Some(Coord::new(1, 2)));
}

#[test]
fn approaching_threat_sends_entity_to_bonus() {
    let grid = grid(&["o              "]);
    let adversaries = [AdversaryView::dangerous(Coord::new(14, 0))];

    let decision = tactics().decide(&Situation::new(&grid, Coord::new(9, 0), &adversaries));

    assert_eq!(decision.state, DecisionState::SeekBonus);
    assert_eq!(decision.direction, Direction::Left);
    assert_eq!(decision.target, Some(Coord::new(0, 0)));
}

#[test]
fn unreachable_bonus_falls_back_to_collecting() {
    let grid = grid(&["o#     .       "]);
    let adversaries = [AdversaryView::dangerous(Coord::new(14, 0))];

    let decision = tactics().decide(&Situation::new(&grid, Coord::new(9, 0), &adversaries));

    assert_eq!(decision.state, DecisionState::SeekBonus);
    assert_eq!(decision.direction, Direction::Left);
    assert_eq!(decision.target, Some(Coord::new(7, 0)));
}

#[test]
fn cleared_board_picks_first_open_direction() {
    let grid = grid(&["###", "#  ", "# #"]);

    let decision = tactics().decide(&Situation::new(&grid, Coord::new(1, 1), &[]));

    assert_eq!(decision.state, DecisionState::Collect);
    assert_eq!(decision.direction, Direction::Down);
    assert_eq!(decision.target, None);
}

#[test]
fn fully_enclosed_entity_defaults_to_up() {
    let grid = grid(&["###", "# #", "###"]);
    let adversaries = [AdversaryView::dangerous(Coord::new(0, 0))];

    let decision = tactics().decide(&Situation::new(&grid, Coord::new(1, 1), &adversaries));

    assert_eq!(decision.state, DecisionState::Collect);
    assert_eq!(decision.direction, Direction::Up);
}

#[test]
fn entity_standing_on_wall_still_steps_onto_open_cell() {
    let grid = grid(&["###", " ##", "###"]);

    let decision = tactics().decide(&Situation::new(&grid, Coord::new(1, 1), &[]));

    assert_eq!(decision.state, DecisionState::Collect);
    assert_eq!(decision.direction, Direction::Left);
}

#[test]
fn wraparound_escape_uses_the_tunnel() {
    let grid = grid(&["#####", "     ", "#####"]).with_cyclic(true);
    let adversaries = [AdversaryView::dangerous(Coord::new(1, 1))];

    let decision = tactics().decide(&Situation::new(&grid, Coord::new(0, 1), &adversaries));

    assert_eq!(decision.state, DecisionState::Escape);
    assert_eq!(decision.direction, Direction::Left);
    assert_eq!(decision.target, Some(Coord::new(4, 1)));
}

#[test]
fn escape_is_maximin_over_random_situations() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x0e5c_a9e5);
    let palette = Palette::new(WALL, DOT, BONUS);
    let config = Config::default();

    for round in 0..200 {
        let (grid, position, adversaries) = random_situation(&mut rng, round % 2 == 1);
        let situation = Situation::new(&grid, position, &adversaries);
        let field = grid.all_distances(position, WALL);

        let action = act(DecisionState::Escape, &situation, &field, &palette, &config);

        let candidates: Vec<Coord> = Direction::SCAN_ORDER
            .into_iter()
            .filter_map(|direction| grid.step(position, direction))
            .filter(|&cell| grid.get(cell) != WALL)
            .collect();
        if candidates.is_empty() {
            continue;
        }

        let chosen = grid
            .step(position, action.direction)
            .expect("escape stays on the grid");
        assert_ne!(grid.get(chosen), WALL, "escape stepped into a wall");
        let chosen_safety = safety(&grid, chosen, &adversaries);
        for cell in candidates {
            assert!(
                chosen_safety >= safety(&grid, cell, &adversaries),
                "round {round}: {chosen} is less safe than {cell}"
            );
        }
    }
}

#[test]
fn decisions_never_walk_into_walls() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5afe_7e57);
    let tactics = tactics();

    for round in 0..300 {
        let (grid, position, adversaries) = random_situation(&mut rng, round % 3 == 0);

        let decision = tactics.decide(&Situation::new(&grid, position, &adversaries));

        let has_exit = Direction::SCAN_ORDER
            .into_iter()
            .filter_map(|direction| grid.step(position, direction))
            .any(|cell| grid.get(cell) != WALL);
        if has_exit {
            let next = grid
                .step(position, decision.direction)
                .expect("decision stays on the grid");
            assert_ne!(grid.get(next), WALL, "round {round}: {decision:?} hits a wall");
        } else {
            assert_eq!(decision.direction, Direction::Up);
        }
    }
}

fn safety(grid: &Grid, cell: Coord, adversaries: &[AdversaryView]) -> u32 {
    let field = grid.all_distances(cell, WALL);
    adversaries
        .iter()
        .filter(|adversary| !adversary.is_vulnerable(0.0))
        .filter_map(|adversary| field.distance(adversary.cell))
        .min()
        .unwrap_or(u32::MAX)
}

fn random_situation(rng: &mut ChaCha8Rng, cyclic: bool) -> (Grid, Coord, Vec<AdversaryView>) {
    let width: i32 = rng.gen_range(2..=8);
    let height: i32 = rng.gen_range(2..=8);
    let rows = (0..height)
        .map(|_| {
            (0..width)
                .map(|_| match rng.gen_range(0..10) {
                    0..=2 => WALL,
                    3..=5 => DOT,
                    6 => BONUS,
                    _ => OPEN,
                })
                .collect()
        })
        .collect();
    let mut grid = Grid::from_rows(rows)
        .expect("generated rows are rectangular")
        .with_cyclic(cyclic);

    let position = Coord::new(rng.gen_range(0..width), rng.gen_range(0..height));
    grid.set(position, OPEN);

    let adversaries = (0..rng.gen_range(1..=3))
        .map(|_| {
            let cell = Coord::new(rng.gen_range(0..width), rng.gen_range(0..height));
            if rng.gen_bool(0.25) {
                AdversaryView::vulnerable(cell, 5.0)
            } else {
                AdversaryView::dangerous(cell)
            }
        })
        .collect();

    (grid, position, adversaries)
}
