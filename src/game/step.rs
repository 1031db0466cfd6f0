//! One frame of play.
//!
//! The sub-steps run in a fixed order and the order is part of the rules:
//! movement, laser advance, invader fire, collisions, hit resolution and
//! finally the victory check.

use crate::config::{ConfigError, GameConfig};

use super::entity::{
    damage_barrier, defender_home, move_defender, Barrier, Defender, EntityRef, Invader,
};
use super::laser::{advance_all, Laser};
use super::rng::RandomSource;
use super::spawn::{spawn_barriers, spawn_defender, spawn_invaders};

/// Everything the simulation owns while a round is in progress.
#[derive(Debug, Clone)]
pub struct World {
    pub defender: Defender,
    pub invaders: Vec<Invader>,
    pub barriers: Vec<Barrier>,
    pub defender_lasers: Vec<Laser>,
    pub invader_lasers: Vec<Laser>,
    /// +1 = sweeping right, -1 = sweeping left
    pub direction: f32,
    pub score: u32,
    pub lives: u32,
    /// Grid size at layout time, the baseline for difficulty scaling
    pub total_invaders: usize,
}

/// What a frame decided, for the state machine to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// Defender was hit and respawned
    DefenderHit { lives_left: u32 },
    Defeat,
    Victory,
}

impl World {
    /// Fresh round: full lives, zero score, new grid and barriers.
    pub fn new(config: &GameConfig, rng: &mut dyn RandomSource) -> Result<Self, ConfigError> {
        let defender = spawn_defender(config, rng)?;
        let invaders = spawn_invaders(config, rng)?;
        let barriers = spawn_barriers(config, rng)?;
        Ok(Self {
            defender,
            total_invaders: invaders.len(),
            invaders,
            barriers,
            defender_lasers: Vec::new(),
            invader_lasers: Vec::new(),
            direction: 1.0,
            score: 0,
            lives: config.lives,
        })
    }

    /// Shoot from the top-centre of the defender.
    pub fn fire_defender_laser(&mut self) {
        let b = self.defender.bounds;
        let laser = Laser::fire(&self.defender.role.laser, b.x + b.width / 2.0, b.y);
        self.defender_lasers.push(laser);
    }

    /// Back to the start position, every in-flight shot gone.
    pub fn respawn_defender(&mut self, config: &GameConfig) {
        let (x, y) = defender_home(config, self.defender.bounds.width);
        self.defender.bounds.x = x;
        self.defender.bounds.y = y;
        self.defender_lasers.clear();
        self.invader_lasers.clear();
    }

    /// Current sweep speed, faster as the grid thins out.
    pub fn invader_speed(&self, config: &GameConfig) -> f32 {
        sweep_speed(
            config.invader_base_speed,
            config.invader_speed_cap,
            self.total_invaders,
            self.invaders.len(),
        )
    }

    /// Per-invader fire probability for this frame.
    pub fn fire_rate(&self, config: &GameConfig) -> f64 {
        fire_rate(
            config.invader_fire_rate,
            config.invader_fire_rate_cap,
            self.total_invaders,
            self.invaders.len(),
        )
    }

    /// All live entities in draw order: defender, invaders, barriers.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        std::iter::once(EntityRef::Defender(&self.defender))
            .chain(self.invaders.iter().map(EntityRef::Invader))
            .chain(self.barriers.iter().map(EntityRef::Barrier))
    }
}

/// `min(base * total / remaining, base * cap)`; base speed once none remain.
pub fn sweep_speed(base: f32, cap: f32, total: usize, remaining: usize) -> f32 {
    if remaining == 0 {
        return base;
    }
    let multiplier = total as f32 / remaining as f32;
    (base * multiplier).min(base * cap)
}

/// `min(base * total / remaining, cap)`; keeps aggregate fire roughly steady.
pub fn fire_rate(base: f64, cap: f64, total: usize, remaining: usize) -> f64 {
    if remaining == 0 {
        return base;
    }
    (base * (total as f64 / remaining as f64)).min(cap)
}

/// Run one frame. Only called while playing.
pub fn step(world: &mut World, config: &GameConfig, rng: &mut dyn RandomSource) -> StepOutcome {
    move_defender(&mut world.defender, config.display_width);
    sweep_invaders(world, config);

    advance_all(&mut world.defender_lasers, config.display_height);
    advance_all(&mut world.invader_lasers, config.display_height);

    invaders_fire(world, config, rng);

    defender_lasers_vs_invaders(world);
    lasers_vs_barriers(&mut world.defender_lasers, &mut world.barriers, config, rng);
    lasers_vs_barriers(&mut world.invader_lasers, &mut world.barriers, config, rng);
    let laser_hit = world
        .invader_lasers
        .iter()
        .any(|l| l.bounds().overlaps(&world.defender.bounds));
    if laser_hit {
        log::info!("Defender hit by invader laser");
        return resolve_hit(world, config);
    }

    invaders_vs_barriers(world, config, rng);
    let body_hit = world.invaders.iter().any(|i| i.overlaps(&world.defender));
    if body_hit {
        log::info!("Defender hit by invader");
        return resolve_hit(world, config);
    }

    if world.invaders.is_empty() {
        return StepOutcome::Victory;
    }
    StepOutcome::Continue
}

fn sweep_invaders(world: &mut World, config: &GameConfig) {
    let dx = world.invader_speed(config) * world.direction;
    let mut reached_edge = false;
    for invader in &mut world.invaders {
        invader.bounds.x += dx;
        let max_x = config.display_width - invader.bounds.width;
        if invader.bounds.x < 0.0 || invader.bounds.x > max_x {
            reached_edge = true;
        }
    }

    if reached_edge {
        for invader in &mut world.invaders {
            invader.bounds.y += config.invader_drop_step;
        }
        world.direction = -world.direction;
    }
}

fn invaders_fire(world: &mut World, config: &GameConfig, rng: &mut dyn RandomSource) {
    let rate = world.fire_rate(config);
    for invader in &world.invaders {
        if rng.chance(rate) {
            let b = invader.bounds;
            let laser = Laser::fire(&invader.role.laser, b.x + b.width / 2.0, b.bottom());
            world.invader_lasers.push(laser);
        }
    }
}

// At most one invader per laser per frame.
fn defender_lasers_vs_invaders(world: &mut World) {
    let invaders = &mut world.invaders;
    let score = &mut world.score;
    world.defender_lasers.retain(|laser| {
        let bounds = laser.bounds();
        match invaders.iter().position(|i| bounds.overlaps(&i.bounds)) {
            Some(idx) => {
                let invader = invaders.remove(idx);
                *score += invader.role.score_value;
                false
            }
            None => true,
        }
    });
}

fn lasers_vs_barriers(
    lasers: &mut Vec<Laser>,
    barriers: &mut Vec<Barrier>,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
) {
    lasers.retain(|laser| {
        let bounds = laser.bounds();
        match barriers.iter().position(|b| bounds.overlaps(&b.bounds)) {
            Some(idx) => {
                if damage_barrier(&mut barriers[idx], config, rng) {
                    barriers.remove(idx);
                }
                false
            }
            None => true,
        }
    });
}

// Invaders that crash into a barrier are lost without scoring.
fn invaders_vs_barriers(world: &mut World, config: &GameConfig, rng: &mut dyn RandomSource) {
    let barriers = &mut world.barriers;
    world.invaders.retain(|invader| {
        match barriers.iter().position(|b| invader.overlaps(b)) {
            Some(idx) => {
                if damage_barrier(&mut barriers[idx], config, rng) {
                    barriers.remove(idx);
                }
                false
            }
            None => true,
        }
    });
}

fn resolve_hit(world: &mut World, config: &GameConfig) -> StepOutcome {
    world.lives = world.lives.saturating_sub(1);
    if world.lives > 0 {
        log::info!("Lives remaining: {}", world.lives);
        world.respawn_defender(config);
        StepOutcome::DefenderHit {
            lives_left: world.lives,
        }
    } else {
        StepOutcome::Defeat
    }
}
