use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Heading of the snake, and the directional intent a player can express.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Unit displacement `(dx, dy)` in grid coordinates, rows growing downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Maps a unit displacement back to its direction.
    #[must_use]
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }
}

/// Returns whether `next` may replace `current` as the heading.
///
/// Only a turn onto the other axis is legal: a vertical heading accepts left or
/// right, a horizontal heading accepts up or down. Same-axis intents (including
/// the reversal) are ignored.
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    current.is_vertical() != next.is_vertical()
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Restart,
    Quit,
}

/// Translates one terminal key event into a game input.
///
/// Key releases and repeats from terminals that report them are ignored.
#[must_use]
pub fn translate_key(event: KeyEvent) -> Option<GameInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(event.code, KeyCode::Char('c') | KeyCode::Char('C'))
            .then_some(GameInput::Quit);
    }

    let input = match event.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            GameInput::Direction(Direction::Up)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            GameInput::Direction(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            GameInput::Direction(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            GameInput::Direction(Direction::Right)
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => GameInput::Pause,
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}
