//! Draw hooks. The core decides what to draw and in what order; a
//! `Surface` from the presentation layer decides how.

use crate::config::Rgb;

use super::entity::{EntityRef, Rect};
use super::laser::Laser;
use super::step::World;

pub trait Surface {
    /// Blit the named sprite scaled into `bounds`.
    fn draw_sprite(&mut self, sprite: &str, bounds: Rect);

    fn fill_rect(&mut self, bounds: Rect, colour: Rgb);

    /// Punch a hole in whatever was drawn, used for barrier damage.
    fn erase_circle(&mut self, cx: f32, cy: f32, radius: f32);
}

pub fn draw_entity(entity: EntityRef<'_>, surface: &mut dyn Surface) {
    let bounds = entity.bounds();
    surface.draw_sprite(entity.sprite(), bounds);
    if let EntityRef::Barrier(barrier) = entity {
        for decal in &barrier.role.decals {
            surface.erase_circle(bounds.x + decal.x, bounds.y + decal.y, decal.radius);
        }
    }
}

pub fn draw_laser(laser: &Laser, surface: &mut dyn Surface) {
    surface.fill_rect(laser.bounds(), laser.colour);
}

/// Entities in world order, lasers on top.
pub fn draw_world(world: &World, surface: &mut dyn Surface) {
    for entity in world.entities() {
        draw_entity(entity, surface);
    }
    for laser in world.defender_lasers.iter().chain(&world.invader_lasers) {
        draw_laser(laser, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::entity::Decal;
    use crate::game::rng::ScriptedRandom;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Surface for Recorder {
        fn draw_sprite(&mut self, sprite: &str, bounds: Rect) {
            self.calls.push(format!("sprite {sprite} {} {}", bounds.x, bounds.y));
        }

        fn fill_rect(&mut self, bounds: Rect, colour: Rgb) {
            self.calls.push(format!("rect {} {} {:?}", bounds.x, bounds.y, colour));
        }

        fn erase_circle(&mut self, cx: f32, cy: f32, radius: f32) {
            self.calls.push(format!("erase {cx} {cy} {radius}"));
        }
    }

    #[test]
    fn world_draw_order() {
        let mut config = GameConfig::default();
        config.invader_rows = 1;
        config.invader_columns = 1;
        config.barrier_count = 1;
        let mut world = World::new(&config, &mut ScriptedRandom::constant(0.0)).unwrap();
        world.barriers[0].role.decals.push(Decal { x: 5.0, y: 2.0, radius: 4.0 });
        world.fire_defender_laser();

        let mut rec = Recorder::default();
        draw_world(&world, &mut rec);
        assert_eq!(
            rec.calls,
            [
                "sprite k9 370 520",
                "sprite cyberman 100 50",
                "sprite sonic 100 400",
                "erase 105 402 4",
                "rect 400 520 Rgb(255, 255, 255)",
            ]
        );
    }

    #[test]
    fn destroyed_barrier_is_never_drawn() {
        let config = GameConfig::default();
        let mut world = World::new(&config, &mut ScriptedRandom::constant(0.0)).unwrap();
        world.barriers.remove(0);
        let mut rec = Recorder::default();
        draw_world(&world, &mut rec);
        let barrier_draws = rec.calls.iter().filter(|c| c.starts_with("sprite sonic")).count();
        assert_eq!(barrier_draws, 3);
    }
}
