pub mod field;
pub mod game_over;
pub mod sprites;
pub mod stars;
pub mod start;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::game::draw::draw_world;
use crate::game::Screen;

use field::BrailleCanvas;

pub const TITLE: &str = " Doctor Who Space Invasion ";

pub fn render(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(TITLE)
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    match app.game.screen() {
        Screen::Start => start::render_start(frame, inner, app),
        Screen::Playing => render_playing(frame, inner, app),
        Screen::GameOver { victory } => {
            game_over::render_game_over(frame, inner, app, app.game.score(), victory)
        }
    }
}

/// Starfield alone, as the backdrop for the menu screens.
pub fn render_backdrop(frame: &mut Frame, area: Rect, app: &App) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let config = app.game.config();
    let mut canvas = BrailleCanvas::new(
        area.width as usize,
        area.height as usize,
        config.display_width,
        config.display_height,
        &app.sprites,
    );
    app.stars.draw(&mut canvas);
    frame.render_widget(Paragraph::new(canvas.into_lines()), area);
}

fn render_playing(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // HUD
            Constraint::Min(8),    // Field
            Constraint::Length(1), // Help
        ])
        .split(area);

    let world = app.game.world();
    let hud = Line::from(vec![
        Span::styled(
            format!(" Score: {} ", world.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Lives: {} ", world.lives),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Invaders: {} ", world.invaders.len()),
            Style::default().fg(Color::Rgb(255, 80, 80)),
        ),
    ]);
    frame.render_widget(Paragraph::new(hud), chunks[0]);

    let field_area = chunks[1];
    if field_area.width > 0 && field_area.height > 0 {
        let config = app.game.config();
        let mut canvas = BrailleCanvas::new(
            field_area.width as usize,
            field_area.height as usize,
            config.display_width,
            config.display_height,
            &app.sprites,
        );
        app.stars.draw(&mut canvas);
        draw_world(world, &mut canvas);
        frame.render_widget(Paragraph::new(canvas.into_lines()), field_area);
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" \u{2190}\u{2192} Move ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled(
            "Space Shoot ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("q Quit", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(help, chunks[2]);
}

/// Centre a `width` x `height` box inside `area`.
pub fn centred(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
