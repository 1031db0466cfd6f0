use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use invasion::app::App;
use invasion::config::GameConfig;
use invasion::event::{Event, EventHandler, FrameClock};
use invasion::game::Game;
use invasion::ui;
use invasion::ui::sprites::SpriteSheet;
use invasion::ui::stars::Starfield;

#[derive(Parser, Debug)]
#[command(name = "invasion", version, about = "Defend Earth from a space invasion")]
struct Cli {
    /// JSON game configuration; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the game's random source
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Where to write the log (the terminal belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

type Backend = CrosstermBackend<io::Stdout>;

fn init_logging(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = path.unwrap_or_else(|| std::env::temp_dir().join("invasion.log"));
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(path)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging(cli.log_file.clone())?;
    log::info!("Logging to {}", log_path.display());

    let mut config = GameConfig::load(cli.config.as_deref())?;
    if let Some(fps) = cli.fps {
        config.fps = fps;
        config.validate().context("invalid --fps")?;
    }
    if cli.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let sprites = SpriteSheet::builtin();
    sprites.check(&config).context("checking sprite names")?;

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("Seed {seed}");
    log::debug!(
        "Config: {}x{} at {} fps, {} lives, {}x{} invaders, {} barriers",
        config.display_width,
        config.display_height,
        config.fps,
        config.lives,
        config.invader_rows,
        config.invader_columns,
        config.barrier_count
    );

    let stars = Starfield::new(
        config.display_width,
        config.display_height,
        StdRng::seed_from_u64(seed.wrapping_add(1)),
    );
    let game = Game::new(config, Box::new(StdRng::seed_from_u64(seed)))
        .context("laying out the first round")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let release_events = matches!(supports_keyboard_enhancement(), Ok(true));
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    } else {
        log::warn!("Terminal does not report key releases; using hold timeout");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(game, sprites, stars, release_events);
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("Final score: {}", app.game.score());
    result
}

fn run(terminal: &mut Terminal<Backend>, app: &mut App) -> Result<()> {
    let events = EventHandler::new();
    let mut clock = FrameClock::new(app.game.config().fps);

    loop {
        for event in events.drain()? {
            match event {
                Event::Key(key) => app.on_key(key),
                Event::Resize => terminal.autoresize()?,
            }
        }
        if app.should_quit {
            return Ok(());
        }

        app.on_tick();
        terminal.draw(|frame| ui::render(frame, app))?;

        if app.should_quit {
            return Ok(());
        }
        clock.wait();
    }
}
