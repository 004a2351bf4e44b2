use std::time::Duration;

use log::{debug, info};

use crate::config::GridSize;
use crate::error::GeometryError;
use crate::game::{GameState, TickOutcome};
use crate::input::{Direction, GameInput};

/// Whether the event loop should keep running.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Control {
    Continue,
    Quit,
}

/// Fixed-cadence driver around one [`GameState`].
///
/// Directional input is buffered last-write-wins and handed to the engine
/// once, right before the next tick.
#[derive(Debug)]
pub struct App {
    state: GameState,
    seed: Option<u64>,
    restarts: u64,
    pending: Option<Direction>,
    paused: bool,
    tick_interval: Duration,
}

impl App {
    /// Starts a game; `seed` makes apple placement reproducible across restarts.
    #[must_use]
    pub fn new(bounds: GridSize, tick_interval: Duration, seed: Option<u64>) -> Self {
        Self {
            state: new_game(bounds, seed),
            seed,
            restarts: 0,
            pending: None,
            paused: false,
            tick_interval,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Whole seconds of play, derived from the tick counter.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        let millis = u128::from(self.state.ticks()) * self.tick_interval.as_millis();
        u64::try_from(millis / 1000).unwrap_or(u64::MAX)
    }

    pub fn handle_input(&mut self, input: GameInput) -> Control {
        match input {
            GameInput::Direction(direction) => {
                if !self.paused && !self.state.is_game_over() {
                    self.pending = Some(direction);
                }
            }
            GameInput::Pause => {
                if !self.state.is_game_over() {
                    self.paused = !self.paused;
                    debug!("paused: {}", self.paused);
                }
            }
            GameInput::Restart => self.restart(),
            GameInput::Quit => {
                info!(
                    "quitting with score {} after {} ticks",
                    self.state.score(),
                    self.state.ticks()
                );
                return Control::Quit;
            }
        }

        Control::Continue
    }

    /// Applies the buffered intent and ticks once.
    ///
    /// Returns `None` while paused.
    pub fn step(&mut self) -> Result<Option<TickOutcome>, GeometryError> {
        if self.paused {
            return Ok(None);
        }

        if let Some(intent) = self.pending.take() {
            self.state.apply_direction(intent);
        }

        self.state.tick().map(Some)
    }

    fn restart(&mut self) {
        self.restarts += 1;
        let seed = self.seed.map(|seed| seed.wrapping_add(self.restarts));
        self.state = new_game(self.state.bounds(), seed);
        self.pending = None;
        self.paused = false;
        info!("restarted game #{}", self.restarts);
    }
}

fn new_game(bounds: GridSize, seed: Option<u64>) -> GameState {
    match seed {
        Some(seed) => GameState::new_with_seed(bounds, seed),
        None => GameState::new(bounds),
    }
}
