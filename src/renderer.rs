use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::app::App;
use crate::config::{CELL_WIDTH, GridSize, THEME};
use crate::game::GameState;
use crate::snake::{Cell, Orientation};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu};

const GLYPH_WALL: &str = "██";
const GLYPH_APPLE: &str = "● ";

/// Renders the full frame from immutable state.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let state = app.state();
    let play_area = render_hud(frame, frame.area(), app);
    let board = board_rect(play_area, state.bounds());

    frame.render_widget(Block::new().style(Style::new().bg(THEME.play_bg)), board);
    render_walls(frame, board, state.bounds());
    render_apple(frame, board, state);
    render_snake(frame, board, state);

    if state.is_game_over() {
        render_game_over_menu(frame, board, state.score(), state.death_reason());
    } else if app.is_paused() {
        render_pause_menu(frame, board);
    }
}

/// Two-column glyph for a segment; the right column carries the stroke that
/// joins a segment to its right-hand neighbor.
#[must_use]
pub fn segment_glyph(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::HeadUp => "▲ ",
        Orientation::HeadDown => "▼ ",
        Orientation::HeadLeft => "◀─",
        Orientation::HeadRight => "▶ ",
        Orientation::TailUp => "╵ ",
        Orientation::TailDown => "╷ ",
        Orientation::TailLeft => "╴ ",
        Orientation::TailRight => "╶─",
        Orientation::Vertical => "│ ",
        Orientation::Horizontal => "──",
        Orientation::CornerUpRight => "└─",
        Orientation::CornerDownRight => "┌─",
        Orientation::CornerDownLeft => "┐ ",
        Orientation::CornerUpLeft => "┘ ",
    }
}

fn render_walls(frame: &mut Frame<'_>, board: Rect, bounds: GridSize) {
    let style = Style::new().fg(THEME.wall);
    let buffer = frame.buffer_mut();

    for y in 0..i32::from(bounds.height()) {
        for x in 0..i32::from(bounds.width()) {
            let cell = Cell::new(x, y);
            if !bounds.is_wall(cell) {
                continue;
            }
            if let Some((column, row)) = cell_to_terminal(board, cell) {
                buffer.set_string(column, row, GLYPH_WALL, style);
            }
        }
    }
}

fn render_apple(frame: &mut Frame<'_>, board: Rect, state: &GameState) {
    let Some((x, y)) = state.apple().and_then(|apple| cell_to_terminal(board, apple)) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_APPLE, Style::new().fg(THEME.apple));
}

fn render_snake(frame: &mut Frame<'_>, board: Rect, state: &GameState) {
    let buffer = frame.buffer_mut();
    for segment in state.segments() {
        let Some((x, y)) = cell_to_terminal(board, segment.cell) else {
            continue;
        };

        let style = if segment.orientation.is_head() {
            Style::new()
                .fg(THEME.snake_head)
                .add_modifier(Modifier::BOLD)
        } else if segment.orientation.is_tail() {
            Style::new().fg(THEME.snake_tail)
        } else {
            Style::new().fg(THEME.snake_body)
        };

        buffer.set_string(x, y, segment_glyph(segment.orientation), style);
    }
}

/// Centers the board inside `area`, clipping it when the terminal is small.
#[must_use]
pub fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width().saturating_mul(CELL_WIDTH).min(area.width);
    let height = bounds.height().min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Maps a grid cell to the terminal position of its left column.
#[must_use]
pub fn cell_to_terminal(board: Rect, cell: Cell) -> Option<(u16, u16)> {
    let column = u16::try_from(cell.x).ok()?.checked_mul(CELL_WIDTH)?;
    let row = u16::try_from(cell.y).ok()?;

    let x = board.x.checked_add(column)?;
    let y = board.y.checked_add(row)?;
    if x.saturating_add(CELL_WIDTH) > board.right() || y >= board.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::app::App;
    use crate::config::GridSize;
    use crate::snake::{Cell, Orientation};

    use super::{board_rect, cell_to_terminal, render, segment_glyph};

    const ALL_ORIENTATIONS: [Orientation; 14] = [
        Orientation::HeadUp,
        Orientation::HeadDown,
        Orientation::HeadLeft,
        Orientation::HeadRight,
        Orientation::TailUp,
        Orientation::TailDown,
        Orientation::TailLeft,
        Orientation::TailRight,
        Orientation::Vertical,
        Orientation::Horizontal,
        Orientation::CornerUpRight,
        Orientation::CornerDownRight,
        Orientation::CornerDownLeft,
        Orientation::CornerUpLeft,
    ];

    #[test]
    fn every_orientation_has_a_distinct_two_column_glyph() {
        let mut seen = Vec::new();
        for orientation in ALL_ORIENTATIONS {
            let glyph = segment_glyph(orientation);
            assert_eq!(glyph.chars().count(), 2, "{orientation:?}");
            assert!(!seen.contains(&glyph), "{orientation:?} reuses {glyph}");
            seen.push(glyph);
        }
    }

    #[test]
    fn board_is_centered_in_the_area() {
        let bounds = GridSize::new(10, 8).expect("valid grid");
        let board = board_rect(Rect::new(0, 0, 40, 12), bounds);

        assert_eq!(board, Rect::new(10, 2, 20, 8));
    }

    #[test]
    fn board_is_clipped_in_a_small_area() {
        let bounds = GridSize::new(30, 30).expect("valid grid");
        let board = board_rect(Rect::new(0, 0, 40, 12), bounds);

        assert_eq!(board, Rect::new(0, 0, 40, 12));
        assert_eq!(cell_to_terminal(board, Cell::new(19, 11)), Some((38, 11)));
        assert_eq!(cell_to_terminal(board, Cell::new(20, 5)), None);
        assert_eq!(cell_to_terminal(board, Cell::new(5, 12)), None);
    }

    #[test]
    fn negative_cells_are_not_drawn() {
        let board = Rect::new(3, 3, 20, 10);

        assert_eq!(cell_to_terminal(board, Cell::new(-1, 2)), None);
        assert_eq!(cell_to_terminal(board, Cell::new(2, -1)), None);
        assert_eq!(cell_to_terminal(board, Cell::new(2, 1)), Some((7, 4)));
    }

    #[test]
    fn frame_shows_walls_and_head() {
        let app = App::new(
            GridSize::new(10, 10).expect("valid grid"),
            Duration::from_millis(200),
            Some(1),
        );
        let mut terminal = Terminal::new(TestBackend::new(40, 16)).expect("test terminal");

        terminal
            .draw(|frame| render(frame, &app))
            .expect("draw succeeds");

        let area = Rect::new(0, 0, 40, 16);
        let play_area = Rect {
            height: area.height - crate::ui::hud::HUD_HEIGHT,
            ..area
        };
        let board = board_rect(play_area, app.state().bounds());
        let buffer = terminal.backend().buffer();

        assert_eq!(buffer[(board.x, board.y)].symbol(), "█");
        let (x, y) = cell_to_terminal(board, Cell::new(5, 5)).expect("head on screen");
        assert_eq!(buffer[(x, y)].symbol(), "▼");
    }
}
