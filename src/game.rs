use std::fmt;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::apple;
use crate::config::GridSize;
use crate::error::{GeometryError, SetupError};
use crate::input::Direction;
use crate::snake::{Cell, Segment, Snake};

/// Why the game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

impl fmt::Display for DeathReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wall => f.write_str("hit the wall"),
            Self::SelfCollision => f.write_str("ran into itself"),
        }
    }
}

/// What a single [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was already over; nothing changed.
    Idle,
    Moved,
    /// Moved onto the apple and grew by one segment.
    Ate,
    /// The candidate head collided; the body was left in place.
    Collided(DeathReason),
}

/// Complete state of one game.
///
/// Mutated only through [`GameState::apply_direction`] and
/// [`GameState::tick`]; a restart builds a fresh value.
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    apple: Option<Cell>,
    score: u32,
    ticks: u64,
    death_reason: Option<DeathReason>,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Places a one-cell snake at the board center heading down, with no
    /// apple yet. Apple placement draws from OS entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Same as [`GameState::new`] with reproducible apple placement.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, rng: StdRng) -> Self {
        Self {
            snake: Snake::new(bounds.center(), Direction::Down),
            apple: None,
            score: 0,
            ticks: 0,
            death_reason: None,
            bounds,
            rng,
        }
    }

    /// Builds a running game from explicit parts.
    ///
    /// The body must lie in the interior and the apple, when given, must lie
    /// in the interior off the body.
    pub fn from_parts(
        bounds: GridSize,
        snake: Snake,
        apple: Option<Cell>,
        seed: u64,
    ) -> Result<Self, SetupError> {
        if let Some(outside) = snake.cells().find(|cell| !bounds.is_interior(*cell)) {
            return Err(SetupError::OutsideInterior(outside));
        }

        if let Some(apple) = apple {
            if !bounds.is_interior(apple) {
                return Err(SetupError::OutsideInterior(apple));
            }
            if snake.occupies(apple) {
                return Err(SetupError::Overlap(apple));
            }
        }

        Ok(Self {
            snake,
            apple,
            ..Self::new_with_seed(bounds, seed)
        })
    }

    /// Applies a directional intent; only a turn onto the other axis is taken.
    ///
    /// Returns true when the heading changed. Ignored once the game is over.
    pub fn apply_direction(&mut self, intent: Direction) -> bool {
        if self.is_game_over() {
            return false;
        }

        self.snake.turn(intent)
    }

    /// Advances the simulation by one step.
    ///
    /// A collision latches game over and leaves the body where it was. An
    /// error means the body geometry is corrupt and the state must be
    /// discarded.
    pub fn tick(&mut self) -> Result<TickOutcome, GeometryError> {
        if self.is_game_over() {
            return Ok(TickOutcome::Idle);
        }

        let candidate = self.snake.next_head();
        if let Some(reason) = self.collision_at(candidate.cell) {
            self.death_reason = Some(reason);
            info!(
                "game over: {reason} moving {:?} into {}, score {}, {} ticks",
                self.snake.heading(),
                candidate.cell,
                self.score,
                self.ticks
            );
            return Ok(TickOutcome::Collided(reason));
        }

        let ate = self.apple == Some(candidate.cell);
        self.snake.advance(candidate, ate)?;
        self.ticks += 1;

        if ate {
            self.apple = None;
            self.score += 1;
            debug!("apple eaten at {}, score {}", candidate.cell, self.score);
        }

        if self.apple.is_none() {
            self.respawn_apple();
        }

        Ok(if ate {
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        })
    }

    fn collision_at(&self, cell: Cell) -> Option<DeathReason> {
        if !self.bounds.is_interior(cell) {
            return Some(DeathReason::Wall);
        }

        if self.snake.collides_with_body(cell) {
            return Some(DeathReason::SelfCollision);
        }

        None
    }

    fn respawn_apple(&mut self) {
        self.apple = apple::spawn_position(&mut self.rng, self.bounds, &self.snake);
        match self.apple {
            Some(cell) => debug!("apple spawned at {cell}"),
            None => warn!(
                "no free interior cell left for an apple ({} segments)",
                self.snake.len()
            ),
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Body segments ordered tail first.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.snake.segments()
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.snake.heading()
    }

    #[must_use]
    pub fn apple(&self) -> Option<Cell> {
        self.apple
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of ticks in which the snake moved.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.death_reason.is_some()
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }
}
