//! Invaders, the defender and barriers share one geometry shape. Role data
//! is carried in the generic `role` field instead of a type hierarchy.

use crate::config::{BarrierKind, DefenderKind, GameConfig, InvaderKind, LaserSpec};

use super::rng::RandomSource;

/// Axis-aligned rectangle in display units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only touch do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity<R> {
    /// Kind name from the config table ("Dalek", "K9", ...)
    pub name: String,
    pub sprite: String,
    pub bounds: Rect,
    pub role: R,
}

impl<R> Entity<R> {
    pub fn overlaps<S>(&self, other: &Entity<S>) -> bool {
        self.bounds.overlaps(&other.bounds)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvaderRole {
    pub laser: LaserSpec,
    pub score_value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// -1, 0 or +1
    pub fn axis(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefenderRole {
    pub speed: f32,
    pub intent: MoveIntent,
    pub laser: LaserSpec,
}

/// A cosmetic scorch mark, relative to the barrier's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decal {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarrierRole {
    pub health: u32,
    pub max_health: u32,
    pub decals: Vec<Decal>,
}

pub type Invader = Entity<InvaderRole>;
pub type Defender = Entity<DefenderRole>;
pub type Barrier = Entity<BarrierRole>;

/// Borrowed view over any entity, for code that treats them uniformly.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Invader(&'a Invader),
    Defender(&'a Defender),
    Barrier(&'a Barrier),
}

impl EntityRef<'_> {
    pub fn bounds(&self) -> Rect {
        match self {
            EntityRef::Invader(e) => e.bounds,
            EntityRef::Defender(e) => e.bounds,
            EntityRef::Barrier(e) => e.bounds,
        }
    }

    pub fn sprite(&self) -> &str {
        match self {
            EntityRef::Invader(e) => &e.sprite,
            EntityRef::Defender(e) => &e.sprite,
            EntityRef::Barrier(e) => &e.sprite,
        }
    }
}

pub fn new_invader(name: &str, kind: &InvaderKind, x: f32, y: f32) -> Invader {
    Entity {
        name: name.to_string(),
        sprite: kind.sprite.clone(),
        bounds: Rect::new(x, y, kind.width, kind.height),
        role: InvaderRole {
            laser: kind.laser,
            score_value: kind.score_value,
        },
    }
}

pub fn new_defender(name: &str, kind: &DefenderKind, x: f32, y: f32) -> Defender {
    Entity {
        name: name.to_string(),
        sprite: kind.sprite.clone(),
        bounds: Rect::new(x, y, kind.width, kind.height),
        role: DefenderRole {
            speed: kind.speed,
            intent: MoveIntent::default(),
            laser: kind.laser,
        },
    }
}

pub fn new_barrier(name: &str, kind: &BarrierKind, x: f32, y: f32) -> Barrier {
    Entity {
        name: name.to_string(),
        sprite: kind.sprite.clone(),
        bounds: Rect::new(x, y, kind.width, kind.height),
        role: BarrierRole {
            health: kind.health,
            max_health: kind.health,
            decals: Vec::new(),
        },
    }
}

/// Apply horizontal intent, clamped to the display.
pub fn move_defender(defender: &mut Defender, display_width: f32) {
    let dx = defender.role.speed * defender.role.intent.axis();
    let max_x = (display_width - defender.bounds.width).max(0.0);
    defender.bounds.x = (defender.bounds.x + dx).clamp(0.0, max_x);
}

/// Canonical defender position: centred, a fixed distance above the bottom.
pub fn defender_home(config: &GameConfig, width: f32) -> (f32, f32) {
    (
        config.display_width / 2.0 - width / 2.0,
        config.display_height - config.defender_bottom_offset,
    )
}

pub fn is_destroyed(barrier: &Barrier) -> bool {
    barrier.role.health == 0
}

/// Knock one point off a barrier and scorch it.
///
/// Returns true once the barrier is destroyed. A destroyed barrier gets no
/// new decals.
pub fn damage_barrier(barrier: &mut Barrier, config: &GameConfig, rng: &mut dyn RandomSource) -> bool {
    barrier.role.health = barrier.role.health.saturating_sub(1);
    if is_destroyed(barrier) {
        return true;
    }

    let w = barrier.bounds.width.max(0.0) as u32;
    let h = barrier.bounds.height.max(0.0) as u32;
    let (x_lo, x_hi) = inset(w, 5);
    let (y_lo, y_hi) = inset(h, 2);

    let count = rng.int_inclusive(config.decal_count_min, config.decal_count_max);
    for _ in 0..count {
        let x = rng.int_inclusive(x_lo, x_hi);
        let y = rng.int_inclusive(y_lo, y_hi);
        let radius = rng.int_inclusive(config.decal_radius_min, config.decal_radius_max);
        barrier.role.decals.push(Decal {
            x: x as f32,
            y: y as f32,
            radius: radius as f32,
        });
    }
    false
}

// [margin, size - margin], collapsing to the midpoint on tiny sprites
fn inset(size: u32, margin: u32) -> (u32, u32) {
    if size >= margin * 2 {
        (margin, size - margin)
    } else {
        (size / 2, size / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rng::ScriptedRandom;

    fn barrier(config: &GameConfig) -> Barrier {
        let kind = &config.barrier_types["Sonic"];
        new_barrier("Sonic", kind, 100.0, 400.0)
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn defender_clamped_to_display() {
        let config = GameConfig::default();
        let kind = &config.defender_types["K9"];
        let mut d = new_defender("K9", kind, 2.0, 520.0);
        d.role.intent.left = true;
        move_defender(&mut d, config.display_width);
        assert_eq!(d.bounds.x, 0.0);

        d.role.intent = MoveIntent { left: false, right: true };
        d.bounds.x = 738.0;
        move_defender(&mut d, config.display_width);
        assert_eq!(d.bounds.x, 740.0);
    }

    #[test]
    fn opposing_intent_cancels() {
        let config = GameConfig::default();
        let kind = &config.defender_types["K9"];
        let mut d = new_defender("K9", kind, 300.0, 520.0);
        d.role.intent = MoveIntent { left: true, right: true };
        move_defender(&mut d, config.display_width);
        assert_eq!(d.bounds.x, 300.0);
    }

    #[test]
    fn damage_adds_scripted_decals() {
        let config = GameConfig::default();
        let mut b = barrier(&config);
        // count=3, then (x, y, radius) triples
        let mut rng = ScriptedRandom::new([3.0, 10.0, 5.0, 4.0, 50.0, 12.0, 10.0, 95.0, 22.0, 8.0]);
        assert!(!damage_barrier(&mut b, &config, &mut rng));
        assert_eq!(b.role.health, 2);
        assert_eq!(
            b.role.decals,
            vec![
                Decal { x: 10.0, y: 5.0, radius: 4.0 },
                Decal { x: 50.0, y: 12.0, radius: 10.0 },
                Decal { x: 95.0, y: 22.0, radius: 8.0 },
            ]
        );
    }

    #[test]
    fn decals_accumulate_until_destroyed() {
        let config = GameConfig::default();
        let mut b = barrier(&config);
        let mut rng = ScriptedRandom::constant(6.0);
        assert!(!damage_barrier(&mut b, &config, &mut rng));
        assert_eq!(b.role.decals.len(), 6);
        assert!(!damage_barrier(&mut b, &config, &mut rng));
        assert_eq!(b.role.decals.len(), 12);
        assert!(damage_barrier(&mut b, &config, &mut rng));
        assert!(is_destroyed(&b));
        assert_eq!(b.role.decals.len(), 12);
    }
}
