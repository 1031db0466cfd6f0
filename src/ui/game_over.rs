use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

use super::{centred, render_backdrop};

pub fn render_game_over(frame: &mut Frame, area: Rect, app: &App, final_score: u32, victory: bool) {
    render_backdrop(frame, area, app);

    let (title, title_colour, message) = if victory {
        ("VICTORY!", Color::Rgb(255, 215, 0), "All Invaders Destroyed!")
    } else {
        ("GAME OVER", Color::Rgb(255, 50, 50), "The Invaders Won")
    };

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(title_colour).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(Span::styled(
            format!("Final Score: {final_score}"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Rgb(180, 180, 200))),
            Span::styled(
                "SPACE",
                Style::default()
                    .fg(Color::Rgb(80, 200, 255))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to Play Again", Style::default().fg(Color::Rgb(180, 180, 200))),
        ]),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Rgb(180, 180, 200))),
            Span::styled(
                "ESC",
                Style::default()
                    .fg(Color::Rgb(80, 200, 255))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to Quit", Style::default().fg(Color::Rgb(180, 180, 200))),
        ]),
    ];

    let panel = centred(area, 40, lines.len() as u16);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), panel);
}
