use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::config::THEME;

/// Rows reserved below the board.
pub const HUD_HEIGHT: u16 = 2;

/// Renders the status rows and returns the remaining play area above them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, app: &App) -> Rect {
    let [play_area, status_area, help_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(HUD_HEIGHT - 1),
    ])
    .areas(area);

    let state = app.state();
    frame.render_widget(
        Paragraph::new(status_line(
            state.score(),
            app.elapsed_seconds(),
            state.snake().len(),
        ))
        .alignment(Alignment::Center),
        status_area,
    );

    frame.render_widget(
        Paragraph::new(Line::from("arrows/WASD move  [P] pause  [R] restart  [Q] quit"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(THEME.hud_muted)),
        help_area,
    );

    play_area
}

fn status_line(score: u32, seconds: u64, length: usize) -> Line<'static> {
    let label = Style::default().fg(THEME.hud_muted);
    let value = Style::default()
        .fg(THEME.hud_score)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Score: ", label),
        Span::styled(format!("{score:>5}"), value),
        Span::styled("   Time: ", label),
        Span::styled(format!("{seconds:>5}"), value),
        Span::styled("   Length: ", label),
        Span::styled(format!("{length:>3}"), value),
    ])
}
