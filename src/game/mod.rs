//! Game core: entity model, simulation step and the screen state machine.
//!
//! Nothing in here knows about the terminal. The presentation layer feeds
//! `InputEvent`s in, calls `tick` once per frame and draws what it finds.

pub mod draw;
pub mod entity;
pub mod laser;
pub mod rng;
pub mod spawn;
pub mod step;

use crate::config::{ConfigError, GameConfig};

pub use entity::{Barrier, Decal, Defender, Entity, EntityRef, Invader, MoveIntent, Rect};
pub use laser::Laser;
pub use rng::{RandomSource, ScriptedRandom};
pub use step::{step, StepOutcome, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    GameOver { victory: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    Confirm,
    Cancel,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub action: Action,
    pub pressed: bool,
}

impl InputEvent {
    pub fn press(action: Action) -> Self {
        Self { action, pressed: true }
    }

    pub fn release(action: Action) -> Self {
        Self { action, pressed: false }
    }
}

/// The whole game: config, the current screen and the round in progress.
pub struct Game {
    config: GameConfig,
    rng: Box<dyn RandomSource>,
    screen: Screen,
    world: World,
    running: bool,
}

impl Game {
    /// Rejects configs that `GameConfig::validate` rejects.
    pub fn new(config: GameConfig, mut rng: Box<dyn RandomSource>) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = World::new(&config, rng.as_mut())?;
        Ok(Self {
            config,
            rng,
            screen: Screen::Start,
            world,
            running: true,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for scenario setup in tests and tools.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn score(&self) -> u32 {
        self.world.score
    }

    pub fn lives(&self) -> u32 {
        self.world.lives
    }

    /// Feed one input event. Events the current screen does not handle are
    /// dropped.
    pub fn handle(&mut self, event: InputEvent) {
        if event.action == Action::Quit && event.pressed {
            log::info!("Quit requested");
            self.running = false;
            return;
        }

        match self.screen {
            Screen::Start => {
                if event.pressed && event.action == Action::Confirm {
                    log::info!("Game started");
                    self.screen = Screen::Playing;
                }
            }
            Screen::Playing => match event.action {
                Action::MoveLeft => self.world.defender.role.intent.left = event.pressed,
                Action::MoveRight => self.world.defender.role.intent.right = event.pressed,
                Action::Fire if event.pressed => self.world.fire_defender_laser(),
                _ => {}
            },
            Screen::GameOver { .. } => {
                if !event.pressed {
                    return;
                }
                match event.action {
                    Action::Confirm => {
                        if let Err(e) = self.reset() {
                            // Config was validated in `new`, so layout cannot fail here.
                            log::error!("Restart failed: {e}");
                            self.running = false;
                            return;
                        }
                        log::info!("Game restarted");
                        self.screen = Screen::Playing;
                    }
                    Action::Cancel => {
                        log::info!("Leaving from game-over screen");
                        self.running = false;
                    }
                    _ => {}
                }
            }
        }
    }

    /// Advance one frame. A no-op outside of play.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.screen != Screen::Playing {
            return None;
        }

        let outcome = step(&mut self.world, &self.config, self.rng.as_mut());
        match outcome {
            StepOutcome::Defeat => {
                log::info!("Game over! Final score: {}", self.world.score);
                self.screen = Screen::GameOver { victory: false };
            }
            StepOutcome::Victory => {
                log::info!("Victory! All invaders destroyed. Final score: {}", self.world.score);
                self.screen = Screen::GameOver { victory: true };
            }
            StepOutcome::DefenderHit { .. } | StepOutcome::Continue => {}
        }
        Some(outcome)
    }

    /// Fresh round with new random kinds. Does not change the screen.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.world = World::new(&self.config, self.rng.as_mut())?;
        Ok(())
    }
}
