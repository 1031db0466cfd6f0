use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::game::draw::Surface;
use crate::game::Rect as FieldRect;

use super::field::BrailleCanvas;
use super::{centred, render_backdrop};

const BANNER: &str = r#"
 ___ _  ___   ___   ___ ___ ___  _  _
|_ _| \| \ \ / /_\ / __|_ _/ _ \| \| |
 | || .` |\ V / _ \\__ \| | (_) | .` |
|___|_|\_| \_/_/ \_\___/___\___/|_|\_|
"#;

// Each roster row: sprite column plus name and points.
const ROSTER_ROW_HEIGHT: u16 = 3;
const ROSTER_SPRITE_COLS: u16 = 4;

pub fn render_start(frame: &mut Frame, area: Rect, app: &App) {
    render_backdrop(frame, area, app);

    let kinds = &app.game.config().invader_types;
    let roster_height = kinds.len() as u16 * ROSTER_ROW_HEIGHT;
    let panel = centred(area, 56, 6 + 2 + roster_height + 3);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),             // Banner
            Constraint::Length(2),             // Roster header
            Constraint::Length(roster_height), // Roster
            Constraint::Length(3),             // Prompt
        ])
        .split(panel);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let header = Paragraph::new(Line::from(Span::styled(
        "INVADERS:",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[1]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(kinds.iter().map(|_| Constraint::Length(ROSTER_ROW_HEIGHT)))
        .split(chunks[2]);
    for ((name, kind), row) in kinds.iter().zip(rows.iter()) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Length(ROSTER_SPRITE_COLS),
                Constraint::Length(2),
                Constraint::Min(10),
            ])
            .split(*row);

        let sprite_area = cols[1];
        let mut canvas = BrailleCanvas::new(
            sprite_area.width as usize,
            sprite_area.height as usize,
            1.0,
            1.0,
            &app.sprites,
        );
        canvas.draw_sprite(&kind.sprite, FieldRect::new(0.0, 0.0, 1.0, 1.0));
        frame.render_widget(Paragraph::new(canvas.into_lines()), sprite_area);

        let info = Paragraph::new(vec![
            Line::from(Span::styled(
                name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} points", kind.score_value),
                Style::default().fg(Color::Rgb(180, 180, 200)),
            )),
        ]);
        frame.render_widget(info, cols[3]);
    }

    let prompt = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Press SPACE to Start",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(prompt, chunks[3]);
}
