use maze_pursuit_core::{AdversaryView, Category, Coord, Decision, Palette};
use maze_pursuit_grid::Grid;
use maze_pursuit_system_tactics::{Config, Situation, Tactics};

const OPEN: Category = 0;
const WALL: Category = 1;
const DOT: Category = 2;
const BONUS: Category = 3;
const TICKS: usize = 60;

#[test]
fn deterministic_replay_produces_identical_runs() {
    let first = replay();
    let second = replay();

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.ticks.len(), TICKS);
}

#[test]
fn replay_clears_dots_and_never_enters_walls() {
    let outcome = replay();

    assert!(outcome.dots_left < outcome.dots_at_start, "no dot was collected");
    for tick in &outcome.ticks {
        assert_ne!(tick.cell_category, WALL, "entered a wall at {}", tick.position);
    }
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    ticks: Vec<TickRecord>,
    dots_at_start: usize,
    dots_left: usize,
}

#[derive(Debug, PartialEq)]
struct TickRecord {
    decision: Decision,
    position: Coord,
    cell_category: Category,
}

fn replay() -> ReplayOutcome {
    let mut grid = maze();
    let config = Config::default().with_spawn_radius(1);
    let tactics = Tactics::new(Palette::new(WALL, DOT, BONUS), config);
    let patrol = patrol_route();
    let dots_at_start = grid.count(DOT);

    let mut position = Coord::new(1, 1);
    let mut ticks = Vec::with_capacity(TICKS);

    for tick in 0..TICKS {
        let adversaries = [
            AdversaryView::dangerous(patrol[tick % patrol.len()]),
            AdversaryView::vulnerable(patrol[(tick + 5) % patrol.len()], 3.0),
        ];
        let decision = tactics.decide(&Situation::new(&grid, position, &adversaries));

        if let Some(next) = grid.step(position, decision.direction) {
            position = next;
        }
        let cell_category = grid.get(position);
        if cell_category == DOT || cell_category == BONUS {
            grid.set(position, OPEN);
        }

        ticks.push(TickRecord {
            decision,
            position,
            cell_category,
        });
    }

    ReplayOutcome {
        ticks,
        dots_at_start,
        dots_left: grid.count(DOT),
    }
}

fn maze() -> Grid {
    let layout = [
        "#########",
        "#o.....o#",
        "#.##.##.#",
        "#.......#",
        " .#...#. ",
        "#.......#",
        "#.##.##.#",
        "#o.....o#",
        "#########",
    ];
    let rows = layout
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
    Grid::from_rows(rows)
        .expect("layout is rectangular")
        .with_cyclic(true)
}

fn patrol_route() -> Vec<Coord> {
    let mut route = Vec::new();
    route.extend((1..=7).map(|x| Coord::new(x, 7)));
    route.extend((1..=6).rev().map(|y| Coord::new(7, y)));
    route.extend((1..=6).rev().map(|x| Coord::new(x, 1)));
    route.extend((2..=6).map(|y| Coord::new(1, y)));
    route
}
