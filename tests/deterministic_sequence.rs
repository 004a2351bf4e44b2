use sprite_snake::config::GridSize;
use sprite_snake::game::{DeathReason, GameState, TickOutcome};
use sprite_snake::input::Direction;
use sprite_snake::snake::{Cell, Orientation, Segment, Snake};

fn ten_by_ten() -> GridSize {
    GridSize::new(10, 10).expect("valid grid")
}

fn body(state: &GameState) -> Vec<Segment> {
    state.segments().copied().collect()
}

#[test]
fn first_apple_grows_the_snake_and_respawns() {
    let mut state = GameState::from_parts(
        ten_by_ten(),
        Snake::new(ten_by_ten().center(), Direction::Down),
        Some(Cell::new(5, 6)),
        42,
    )
    .expect("valid parts");

    assert_eq!(state.tick(), Ok(TickOutcome::Ate));

    assert_eq!(
        body(&state),
        vec![
            Segment::new(Cell::new(5, 5), Orientation::TailDown),
            Segment::new(Cell::new(5, 6), Orientation::HeadDown),
        ]
    );
    assert_eq!(state.score(), 1);
    assert!(state.apple().is_some());
}

#[test]
fn stepwise_turn_and_wall_collision() {
    let mut state = GameState::from_parts(
        ten_by_ten(),
        Snake::from_cells(vec![Cell::new(5, 5), Cell::new(5, 6)], Direction::Down)
            .expect("valid body"),
        Some(Cell::new(7, 2)),
        42,
    )
    .expect("valid parts");

    assert!(state.apply_direction(Direction::Left));
    assert_eq!(state.tick(), Ok(TickOutcome::Moved));
    assert_eq!(
        body(&state),
        vec![
            Segment::new(Cell::new(5, 6), Orientation::TailLeft),
            Segment::new(Cell::new(4, 6), Orientation::HeadLeft),
        ]
    );

    let mut outcomes = Vec::new();
    for _ in 0..7 {
        outcomes.push(state.tick().expect("consistent geometry"));
    }

    assert_eq!(
        outcomes,
        vec![
            TickOutcome::Moved,
            TickOutcome::Moved,
            TickOutcome::Moved,
            TickOutcome::Collided(DeathReason::Wall),
            TickOutcome::Idle,
            TickOutcome::Idle,
            TickOutcome::Idle,
        ]
    );
    assert!(state.is_game_over());
    assert_eq!(state.snake().head().cell, Cell::new(1, 6));
    assert_eq!(
        state.snake().next_head(),
        Segment::new(Cell::new(0, 6), Orientation::HeadLeft)
    );
}

#[test]
fn same_seed_and_inputs_replay_identically() {
    let script = [
        None,
        Some(Direction::Left),
        None,
        Some(Direction::Up),
        None,
        None,
        Some(Direction::Right),
        None,
        None,
        None,
        Some(Direction::Down),
        None,
    ];

    let play = || {
        let mut state = GameState::new_with_seed(ten_by_ten(), 7);
        let mut trace = Vec::new();
        for intent in script {
            if let Some(intent) = intent {
                state.apply_direction(intent);
            }
            let outcome = state.tick().expect("consistent geometry");
            trace.push((outcome, state.apple(), state.score(), body(&state)));
        }
        trace
    };

    assert_eq!(play(), play());
}
