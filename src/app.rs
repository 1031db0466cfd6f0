use crossterm::event::KeyEvent;

use crate::game::{Action, Game, Screen};
use crate::input::{self, HoldTimer};
use crate::ui::sprites::SpriteSheet;
use crate::ui::stars::Starfield;

/// How long a movement key counts as held after its last press when the
/// terminal cannot report releases. Longer than a typical key-repeat delay.
const HOLD_SECONDS: f32 = 0.55;

pub fn hold_frames(fps: u32) -> u32 {
    ((fps as f32 * HOLD_SECONDS).round() as u32).max(1)
}

pub struct App {
    pub should_quit: bool,
    pub game: Game,
    pub sprites: SpriteSheet,
    pub stars: Starfield,
    /// `None` when the terminal reports real key releases.
    hold: Option<HoldTimer>,
    /// Frames left during which Confirm is ignored on the game-over screen,
    /// so a Space still held from play cannot restart straight away.
    confirm_lockout: u32,
}

impl App {
    pub fn new(game: Game, sprites: SpriteSheet, stars: Starfield, release_events: bool) -> Self {
        let hold = if release_events {
            None
        } else {
            Some(HoldTimer::new(hold_frames(game.config().fps)))
        };
        Self {
            should_quit: false,
            game,
            sprites,
            stars,
            hold,
            confirm_lockout: 0,
        }
    }

    pub fn on_tick(&mut self) {
        if let Some(hold) = self.hold.as_mut() {
            for release in hold.tick() {
                self.game.handle(release);
            }
        }
        self.confirm_lockout = self.confirm_lockout.saturating_sub(1);
        let was_playing = self.game.screen() == Screen::Playing;
        if let Some(outcome) = self.game.tick() {
            log::trace!("Step: {outcome:?}");
        }
        if was_playing && matches!(self.game.screen(), Screen::GameOver { .. }) {
            self.confirm_lockout = hold_frames(self.game.config().fps);
        }
        self.stars.animate();
        self.should_quit = !self.game.is_running();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let Some(event) = input::translate(&key, self.game.screen()) else {
            return;
        };
        if let Some(hold) = self.hold.as_mut() {
            hold.observe(&event);
        }
        if event.action == Action::Confirm && self.confirm_lockout > 0 {
            return;
        }
        self.game.handle(event);
        self.should_quit = !self.game.is_running();
    }
}
