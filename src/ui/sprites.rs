//! Built-in braille sprites, looked up by the logical names the kind
//! tables use.

use std::collections::HashMap;

use ratatui::style::Color;

use crate::config::{ConfigError, GameConfig};

/// A 1-bit bitmap, one string per row, `#` = lit.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub rows: &'static [&'static str],
    pub colour: Color,
}

impl Sprite {
    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Nearest-neighbour sample at normalised coordinates in `[0, 1)`.
    pub fn sample(&self, u: f32, v: f32) -> bool {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return false;
        }
        let px = ((u * w as f32) as usize).min(w - 1);
        let py = ((v * h as f32) as usize).min(h - 1);
        self.rows[py].as_bytes()[px] == b'#'
    }
}

const DALEK: &[&str] = &[
    "...#####...",
    "..#######..",
    "#####.#####",
    "..#######..",
    "...#####...",
    "..#######..",
    "##.#####.##",
    "..#######..",
    ".#.#.#.#.#.",
    ".#########.",
    "#.#.#.#.#.#",
    "###########",
    "#.#.#.#.#.#",
    "###########",
];

const CYBERMAN: &[&str] = &[
    "#.#####.#",
    "#########",
    "##.###.##",
    "#########",
    "..#####..",
    "..#.#.#..",
    ".#######.",
    "#########",
    "#.#####.#",
    "#.#####.#",
    "..##.##..",
    "..##.##..",
    "..##.##..",
    ".###.###.",
];

const WEEPING_ANGEL: &[&str] = &[
    "....###....",
    "#..#####..#",
    "##.#.#.#.##",
    "###.###.###",
    ".#########.",
    "..#######..",
    "...#####...",
    "...#####...",
    "..#######..",
    "..#######..",
    ".#########.",
    ".#########.",
    "###########",
    "###########",
];

const K9: &[&str] = &[
    "..........##",
    ".........###",
    "#.......####",
    ".###########",
    ".#########..",
    ".##.#####...",
    ".##.....##..",
    ".##.....##..",
];

const SONIC: &[&str] = &[
    ".##################.",
    "####################",
    "####################",
    "####################",
    ".##################.",
];

/// Sprite lookup by logical name.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    sprites: HashMap<&'static str, Sprite>,
}

impl SpriteSheet {
    pub fn builtin() -> Self {
        let mut sprites = HashMap::new();
        sprites.insert("dalek", Sprite { rows: DALEK, colour: Color::Rgb(220, 170, 60) });
        sprites.insert("cyberman", Sprite { rows: CYBERMAN, colour: Color::Rgb(190, 200, 210) });
        sprites.insert(
            "weeping_angel",
            Sprite { rows: WEEPING_ANGEL, colour: Color::Rgb(160, 160, 150) },
        );
        sprites.insert("k9", Sprite { rows: K9, colour: Color::Rgb(140, 200, 255) });
        sprites.insert("sonic", Sprite { rows: SONIC, colour: Color::Rgb(60, 220, 120) });
        Self { sprites }
    }

    pub fn get(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    /// Every sprite the config names must exist, or the game cannot draw.
    pub fn check(&self, config: &GameConfig) -> Result<(), ConfigError> {
        for name in config.sprite_names() {
            if self.get(name).is_none() {
                return Err(ConfigError::UnknownSprite(name.to_string()));
            }
        }
        Ok(())
    }
}
