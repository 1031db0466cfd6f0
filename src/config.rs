//! Game configuration: numeric tunables and the kind tables.
//!
//! Everything that differs between rosters or difficulty settings lives
//! here. New invader, barrier or defender kinds are added by extending the
//! tables, not by touching the simulation.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// An RGB colour triple, serialised as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Shape, speed and colour of the shots a kind fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaserSpec {
    pub colour: Rgb,
    /// Signed vertical speed per frame (negative = upward)
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenderKind {
    pub sprite: String,
    pub width: f32,
    pub height: f32,
    /// Horizontal movement per frame
    pub speed: f32,
    pub laser: LaserSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvaderKind {
    pub sprite: String,
    pub width: f32,
    pub height: f32,
    pub laser: LaserSpec,
    pub score_value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarrierKind {
    pub sprite: String,
    pub width: f32,
    pub height: f32,
    pub health: u32,
}

/// All tunables for one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Display ===
    pub display_width: f32,
    pub display_height: f32,
    pub fps: u32,

    // === Player ===
    pub lives: u32,
    /// Defender top edge sits this far above the bottom of the display
    pub defender_bottom_offset: f32,

    // === Invader grid ===
    pub invader_rows: usize,
    pub invader_columns: usize,
    pub invader_spacing: f32,
    pub invader_row_spacing: f32,
    pub invader_start_x: f32,
    pub invader_start_y: f32,
    pub invader_base_speed: f32,
    /// Upper bound on the sweep speed, as a multiple of the base speed
    pub invader_speed_cap: f32,
    pub invader_drop_step: f32,
    /// Per-invader, per-frame firing probability with a full grid
    pub invader_fire_rate: f64,
    pub invader_fire_rate_cap: f64,

    // === Barriers ===
    pub barrier_count: usize,
    pub barrier_start_x: f32,
    pub barrier_spacing: f32,
    pub barrier_bottom_offset: f32,
    pub decal_count_min: u32,
    pub decal_count_max: u32,
    pub decal_radius_min: u32,
    pub decal_radius_max: u32,

    // === Kind tables (ordered by name) ===
    pub defender_types: BTreeMap<String, DefenderKind>,
    pub invader_types: BTreeMap<String, InvaderKind>,
    pub barrier_types: BTreeMap<String, BarrierKind>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut defender_types = BTreeMap::new();
        defender_types.insert(
            "K9".to_string(),
            DefenderKind {
                sprite: "k9".to_string(),
                width: 60.0,
                height: 50.0, // keeps the 90x76 sprite aspect
                speed: 5.0,
                laser: LaserSpec {
                    colour: Rgb(255, 255, 255),
                    speed: -7.0,
                    width: 5.0,
                    height: 10.0,
                },
            },
        );

        let invader = |sprite: &str, colour: Rgb, score_value: u32| InvaderKind {
            sprite: sprite.to_string(),
            width: 35.0,
            height: 67.0,
            laser: LaserSpec {
                colour,
                speed: 3.0,
                width: 4.0,
                height: 8.0,
            },
            score_value,
        };
        let mut invader_types = BTreeMap::new();
        invader_types.insert("Dalek".to_string(), invader("dalek", Rgb(255, 0, 0), 15));
        invader_types.insert("Cyberman".to_string(), invader("cyberman", Rgb(0, 0, 255), 5));
        invader_types.insert(
            "WeepingAngel".to_string(),
            invader("weeping_angel", Rgb(128, 0, 128), 25),
        );

        let mut barrier_types = BTreeMap::new();
        barrier_types.insert(
            "Sonic".to_string(),
            BarrierKind {
                sprite: "sonic".to_string(),
                width: 100.0,
                height: 24.0,
                health: 3,
            },
        );

        Self {
            display_width: 800.0,
            display_height: 600.0,
            fps: 60,

            lives: 3,
            defender_bottom_offset: 80.0,

            invader_rows: 3,
            invader_columns: 6,
            invader_spacing: 65.0,
            invader_row_spacing: 80.0,
            invader_start_x: 100.0,
            invader_start_y: 50.0,
            invader_base_speed: 1.0,
            invader_speed_cap: 3.0,
            invader_drop_step: 10.0,
            invader_fire_rate: 0.001,
            invader_fire_rate_cap: 0.3,

            barrier_count: 4,
            barrier_start_x: 100.0,
            barrier_spacing: 180.0,
            barrier_bottom_offset: 200.0,
            decal_count_min: 3,
            decal_count_max: 6,
            decal_radius_min: 4,
            decal_radius_max: 10,

            defender_types,
            invader_types,
            barrier_types,
        }
    }
}

impl GameConfig {
    /// Load from a JSON file, or fall back to the built-in roster.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                let config: GameConfig = serde_json::from_str(&json)
                    .with_context(|| format!("failed to parse config {}", path.display()))?;
                log::info!("Loaded config from {}", path.display());
                config
            }
            None => GameConfig::default(),
        };
        config
            .validate()
            .context("invalid game configuration")?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialise config")
    }

    /// Total invaders in a fresh grid.
    pub fn total_invaders(&self) -> usize {
        self.invader_rows * self.invader_columns
    }

    /// Check the tunables describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_width <= 0.0 || self.display_height <= 0.0 {
            return Err(ConfigError::InvalidDisplay {
                width: self.display_width,
                height: self.display_height,
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if self.total_invaders() == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.invader_rows,
                columns: self.invader_columns,
            });
        }
        if self.defender_types.is_empty() {
            return Err(ConfigError::EmptyTable("defender_types"));
        }
        if self.invader_types.is_empty() {
            return Err(ConfigError::EmptyTable("invader_types"));
        }
        if self.barrier_count > 0 && self.barrier_types.is_empty() {
            return Err(ConfigError::EmptyTable("barrier_types"));
        }
        if self.decal_count_min > self.decal_count_max {
            return Err(ConfigError::InvalidRange {
                name: "decal_count",
                min: self.decal_count_min,
                max: self.decal_count_max,
            });
        }
        if self.decal_radius_min > self.decal_radius_max {
            return Err(ConfigError::InvalidRange {
                name: "decal_radius",
                min: self.decal_radius_min,
                max: self.decal_radius_max,
            });
        }
        if !(0.0..=1.0).contains(&self.invader_fire_rate)
            || !(0.0..=1.0).contains(&self.invader_fire_rate_cap)
        {
            return Err(ConfigError::InvalidProbability {
                rate: self.invader_fire_rate,
                cap: self.invader_fire_rate_cap,
            });
        }
        for (name, kind) in &self.barrier_types {
            if kind.health == 0 {
                return Err(ConfigError::ZeroHealth(name.clone()));
            }
        }
        Ok(())
    }

    /// Every sprite name referenced by the kind tables, in table order.
    pub fn sprite_names(&self) -> Vec<&str> {
        let defenders = self.defender_types.values().map(|k| k.sprite.as_str());
        let invaders = self.invader_types.values().map(|k| k.sprite.as_str());
        let barriers = self.barrier_types.values().map(|k| k.sprite.as_str());
        defenders.chain(invaders).chain(barriers).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidDisplay { width: f32, height: f32 },
    ZeroFps,
    ZeroLives,
    EmptyGrid { rows: usize, columns: usize },
    EmptyTable(&'static str),
    InvalidRange { name: &'static str, min: u32, max: u32 },
    InvalidProbability { rate: f64, cap: f64 },
    ZeroHealth(String),
    UnknownSprite(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDisplay { width, height } => {
                write!(f, "display size must be positive, got {width}x{height}")
            }
            Self::ZeroFps => write!(f, "fps must be at least 1"),
            Self::ZeroLives => write!(f, "lives must be at least 1"),
            Self::EmptyGrid { rows, columns } => {
                write!(f, "invader grid is empty ({rows} rows x {columns} columns)")
            }
            Self::EmptyTable(table) => write!(f, "{table} must define at least one kind"),
            Self::InvalidRange { name, min, max } => {
                write!(f, "{name} range is inverted: min={min}, max={max}")
            }
            Self::InvalidProbability { rate, cap } => write!(
                f,
                "fire rates must lie in [0, 1]: rate={rate}, cap={cap}"
            ),
            Self::ZeroHealth(name) => write!(f, "barrier kind {name} has zero health"),
            Self::UnknownSprite(name) => write!(f, "no sprite named '{name}'"),
        }
    }
}

impl std::error::Error for ConfigError {}
