use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::{ConfigError, SetupError};
use crate::snake::Cell;

/// Smallest accepted board side, wall ring included.
pub const MIN_GRID_SIDE: u16 = 5;

/// Default board width in cells, wall ring included.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default board height in cells, wall ring included.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Base tick interval in milliseconds (5 ticks per second).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 40;

/// Sleep between frames of the event loop.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Terminal columns used to draw one grid cell.
pub const CELL_WIDTH: u16 = 2;

/// Log file written when neither the CLI nor the settings file names one.
pub const DEFAULT_LOG_FILE: &str = "sprite-snake.log";

/// Board dimensions, wall ring included.
///
/// Only constructible through [`GridSize::new`], so every value carries a
/// non-trivial interior.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    width: u16,
    height: u16,
}

impl GridSize {
    /// Validates the dimensions against [`MIN_GRID_SIDE`].
    pub fn new(width: u16, height: u16) -> Result<Self, SetupError> {
        if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
            return Err(SetupError::GridTooSmall {
                width,
                height,
                min: MIN_GRID_SIDE,
            });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    /// Floor-divided center of the board.
    #[must_use]
    pub fn center(self) -> Cell {
        Cell::new(i32::from(self.width / 2), i32::from(self.height / 2))
    }

    /// Returns true when `cell` lies strictly inside the wall ring.
    #[must_use]
    pub fn is_interior(self, cell: Cell) -> bool {
        cell.x > 0
            && cell.y > 0
            && cell.x < i32::from(self.width) - 1
            && cell.y < i32::from(self.height) - 1
    }

    /// Returns true when `cell` belongs to the outermost ring.
    #[must_use]
    pub fn is_wall(self, cell: Cell) -> bool {
        let inside_board = cell.x >= 0
            && cell.y >= 0
            && cell.x < i32::from(self.width)
            && cell.y < i32::from(self.height);
        inside_board && !self.is_interior(cell)
    }

    /// Iterates interior cells row by row.
    pub fn interior_cells(self) -> impl Iterator<Item = Cell> {
        let max_x = i32::from(self.width) - 1;
        let max_y = i32::from(self.height) - 1;
        (1..max_y).flat_map(move |y| (1..max_x).map(move |x| Cell::new(x, y)))
    }

    #[must_use]
    pub fn interior_cell_count(self) -> usize {
        usize::from(self.width - 2) * usize::from(self.height - 2)
    }
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub apple: Color,
    pub wall: Color,
    pub play_bg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    apple: Color::Red,
    wall: Color::Gray,
    play_bg: Color::Black,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Optional run settings, read from a JSON file and overlaid by CLI flags.
///
/// Every field is optional; missing values fall back to the constants above.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub tick_interval_ms: Option<u64>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns `self` with every value present in `overrides` replaced.
    #[must_use]
    pub fn overlay(self, overrides: Self) -> Self {
        Self {
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            tick_interval_ms: overrides.tick_interval_ms.or(self.tick_interval_ms),
            seed: overrides.seed.or(self.seed),
            log_file: overrides.log_file.or(self.log_file),
        }
    }

    /// Resolves the board size, applying defaults and validation.
    pub fn grid_size(&self) -> Result<GridSize, SetupError> {
        GridSize::new(
            self.width.unwrap_or(DEFAULT_GRID_WIDTH),
            self.height.unwrap_or(DEFAULT_GRID_HEIGHT),
        )
    }

    /// Resolves the tick interval, clamped to [`MIN_TICK_INTERVAL_MS`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        let millis = self
            .tick_interval_ms
            .unwrap_or(DEFAULT_TICK_INTERVAL_MS)
            .max(MIN_TICK_INTERVAL_MS);
        Duration::from_millis(millis)
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }
}
