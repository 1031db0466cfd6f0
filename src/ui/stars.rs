//! Twinkling, drifting starfield behind every screen. Decoration only.

use rand::rngs::StdRng;
use rand::Rng;
use ratatui::style::Color;

use super::field::BrailleCanvas;

const STAR_COUNT: usize = 100;
const TWINKLE_CHANCE: f64 = 0.05;
const DRIFT_PER_SIZE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: u8,
    pub brightness: u8,
}

pub struct Starfield {
    stars: Vec<Star>,
    width: f32,
    height: f32,
    rng: StdRng,
}

impl Starfield {
    pub fn new(width: f32, height: f32, mut rng: StdRng) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.gen_range(0.0..=width),
                y: rng.gen_range(0.0..=height),
                size: rng.gen_range(1..=3),
                brightness: rng.gen_range(100..=255),
            })
            .collect();
        Self { stars, width, height, rng }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Twinkle, drift down, wrap to the top at a fresh column.
    pub fn animate(&mut self) {
        for star in &mut self.stars {
            if self.rng.gen_bool(TWINKLE_CHANCE) {
                star.brightness = self.rng.gen_range(100..=255);
            }
            star.y += star.size as f32 * DRIFT_PER_SIZE;
            if star.y > self.height {
                star.y = 0.0;
                star.x = self.rng.gen_range(0.0..=self.width);
            }
        }
    }

    pub fn draw(&self, canvas: &mut BrailleCanvas<'_>) {
        for star in &self.stars {
            let b = star.brightness;
            canvas.plot(star.x, star.y, Color::Rgb(b, b, b));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn stars_stay_on_screen() {
        let mut field = Starfield::new(800.0, 600.0, StdRng::seed_from_u64(3));
        assert_eq!(field.stars().len(), STAR_COUNT);
        for _ in 0..2_000 {
            field.animate();
        }
        for star in field.stars() {
            assert!((0.0..=600.0).contains(&star.y));
            assert!((0.0..=800.0).contains(&star.x));
            assert!((1..=3).contains(&star.size));
            assert!(star.brightness >= 100);
        }
    }
}
