use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::THEME;
use crate::game::DeathReason;

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED").style(
            Style::default()
                .fg(THEME.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("[P] Resume"),
        Line::from("[Q] Quit").style(Style::default().fg(THEME.menu_footer)),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<DeathReason>,
) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    frame.render_widget(
        Paragraph::new(game_over_lines(score, death_reason))
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn game_over_lines(score: u32, death_reason: Option<DeathReason>) -> Vec<Line<'static>> {
    let cause = death_reason.map_or_else(String::new, |reason| format!("The snake {reason}"));

    vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(THEME.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(cause),
        Line::from(format!("Score: {score}")),
        Line::from(""),
        Line::from("[R] Play again"),
        Line::from("[Q] Quit").style(Style::default().fg(THEME.menu_footer)),
    ]
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [band] = Layout::vertical([Constraint::Percentage(height_percent)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(band);
    popup
}
