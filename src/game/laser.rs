use crate::config::{LaserSpec, Rgb};

use super::entity::Rect;

/// A projectile. Moves vertically only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Laser {
    pub x: f32,
    pub y: f32,
    /// Negative = upward
    pub speed: f32,
    pub colour: Rgb,
    pub width: f32,
    pub height: f32,
}

impl Laser {
    /// Fire a laser with its top-left corner at `(x, y)`.
    pub fn fire(spec: &LaserSpec, x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            speed: spec.speed,
            colour: spec.colour,
            width: spec.width,
            height: spec.height,
        }
    }

    pub fn advance(&mut self) {
        self.y += self.speed;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_off_screen(&self, display_height: f32) -> bool {
        self.y < 0.0 || self.y > display_height
    }
}

/// Advance every laser and drop the ones that left the display.
pub fn advance_all(lasers: &mut Vec<Laser>, display_height: f32) {
    for laser in lasers.iter_mut() {
        laser.advance();
    }
    lasers.retain(|l| !l.is_off_screen(display_height));
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: LaserSpec = LaserSpec {
        colour: Rgb(255, 255, 255),
        speed: -7.0,
        width: 5.0,
        height: 10.0,
    };

    #[test]
    fn advance_moves_by_signed_speed() {
        let mut up = Laser::fire(&SPEC, 10.0, 100.0);
        up.advance();
        assert_eq!(up.y, 93.0);
        assert_eq!(up.x, 10.0);

        let mut down = Laser { speed: 3.0, ..up };
        down.advance();
        assert_eq!(down.y, 96.0);
    }

    #[test]
    fn off_screen_edges() {
        let l = Laser::fire(&SPEC, 0.0, 0.0);
        assert!(!l.is_off_screen(600.0));
        assert!(Laser { y: -0.5, ..l }.is_off_screen(600.0));
        assert!(!Laser { y: 600.0, ..l }.is_off_screen(600.0));
        assert!(Laser { y: 600.5, ..l }.is_off_screen(600.0));
    }

    #[test]
    fn advance_all_culls_exits() {
        let mut lasers = vec![
            Laser::fire(&SPEC, 0.0, 5.0),
            Laser::fire(&SPEC, 0.0, 300.0),
            Laser { speed: 3.0, ..Laser::fire(&SPEC, 0.0, 599.0) },
        ];
        advance_all(&mut lasers, 600.0);
        assert_eq!(lasers.len(), 1);
        assert_eq!(lasers[0].y, 293.0);
    }
}
