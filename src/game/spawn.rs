//! Initial layout: invader grid, barrier row and the defender.
//!
//! Positions depend only on the config. The random source decides which
//! kind fills each slot.

use std::collections::BTreeMap;

use crate::config::{ConfigError, GameConfig};

use super::entity::{new_barrier, new_defender, new_invader, defender_home, Barrier, Defender, Invader};
use super::rng::RandomSource;

/// Pick a table entry uniformly. Tables are name-ordered, so the same
/// random sequence always picks the same kinds.
fn pick_kind<'a, K>(
    table: &'a BTreeMap<String, K>,
    table_name: &'static str,
    rng: &mut dyn RandomSource,
) -> Result<(&'a String, &'a K), ConfigError> {
    if table.is_empty() {
        return Err(ConfigError::EmptyTable(table_name));
    }
    let idx = rng.index(table.len());
    table
        .iter()
        .nth(idx)
        .ok_or(ConfigError::EmptyTable(table_name))
}

pub fn spawn_invaders(config: &GameConfig, rng: &mut dyn RandomSource) -> Result<Vec<Invader>, ConfigError> {
    let mut invaders = Vec::with_capacity(config.total_invaders());
    for row in 0..config.invader_rows {
        for col in 0..config.invader_columns {
            let x = config.invader_start_x + col as f32 * config.invader_spacing;
            let y = config.invader_start_y + row as f32 * config.invader_row_spacing;
            let (name, kind) = pick_kind(&config.invader_types, "invader_types", rng)?;
            invaders.push(new_invader(name, kind, x, y));
        }
    }
    Ok(invaders)
}

pub fn spawn_barriers(config: &GameConfig, rng: &mut dyn RandomSource) -> Result<Vec<Barrier>, ConfigError> {
    let y = config.display_height - config.barrier_bottom_offset;
    (0..config.barrier_count)
        .map(|i| {
            let x = config.barrier_start_x + i as f32 * config.barrier_spacing;
            let (name, kind) = pick_kind(&config.barrier_types, "barrier_types", rng)?;
            Ok(new_barrier(name, kind, x, y))
        })
        .collect()
}

pub fn spawn_defender(config: &GameConfig, rng: &mut dyn RandomSource) -> Result<Defender, ConfigError> {
    let (name, kind) = pick_kind(&config.defender_types, "defender_types", rng)?;
    let (x, y) = defender_home(config, kind.width);
    Ok(new_defender(name, kind, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rng::ScriptedRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn grid_positions_are_row_major() {
        let config = GameConfig::default();
        let invaders = spawn_invaders(&config, &mut ScriptedRandom::constant(0.0)).unwrap();
        assert_eq!(invaders.len(), 18);
        assert_eq!((invaders[0].bounds.x, invaders[0].bounds.y), (100.0, 50.0));
        assert_eq!((invaders[1].bounds.x, invaders[1].bounds.y), (165.0, 50.0));
        assert_eq!((invaders[6].bounds.x, invaders[6].bounds.y), (100.0, 130.0));
        assert_eq!((invaders[17].bounds.x, invaders[17].bounds.y), (425.0, 210.0));
    }

    #[test]
    fn scripted_kinds_follow_table_order() {
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new([0.0, 1.0, 2.0]).with_fallback(1.0);
        let invaders = spawn_invaders(&config, &mut rng).unwrap();
        assert_eq!(invaders[0].name, "Cyberman");
        assert_eq!(invaders[0].role.score_value, 5);
        assert_eq!(invaders[1].name, "Dalek");
        assert_eq!(invaders[1].role.score_value, 15);
        assert_eq!(invaders[2].name, "WeepingAngel");
        assert_eq!(invaders[2].role.score_value, 25);
        assert!(invaders[3..].iter().all(|i| i.name == "Dalek"));
    }

    #[test]
    fn barriers_evenly_spaced() {
        let config = GameConfig::default();
        let barriers = spawn_barriers(&config, &mut ScriptedRandom::constant(0.0)).unwrap();
        let xs: Vec<f32> = barriers.iter().map(|b| b.bounds.x).collect();
        assert_eq!(xs, [100.0, 280.0, 460.0, 640.0]);
        assert!(barriers.iter().all(|b| b.bounds.y == 400.0));
        assert!(barriers.iter().all(|b| b.role.health == 3 && b.role.decals.is_empty()));
    }

    #[test]
    fn defender_centred() {
        let config = GameConfig::default();
        let d = spawn_defender(&config, &mut ScriptedRandom::constant(0.0)).unwrap();
        assert_eq!(d.name, "K9");
        assert_eq!((d.bounds.x, d.bounds.y), (370.0, 520.0));
    }

    #[test]
    fn relayout_reproduces_positions() {
        let config = GameConfig::default();
        let a = spawn_invaders(&config, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = spawn_invaders(&config, &mut StdRng::seed_from_u64(2)).unwrap();
        let pos = |v: &[Invader]| v.iter().map(|i| (i.bounds.x, i.bounds.y)).collect::<Vec<_>>();
        assert_eq!(pos(&a), pos(&b));
    }

    #[test]
    fn empty_table_is_an_error() {
        let mut config = GameConfig::default();
        config.invader_types.clear();
        assert_eq!(
            spawn_invaders(&config, &mut ScriptedRandom::constant(0.0)).unwrap_err(),
            ConfigError::EmptyTable("invader_types")
        );
    }
}
