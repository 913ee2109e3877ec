pub mod check;
pub mod duel;
pub mod party;
pub mod play;
pub mod roll;
pub mod talk;

use ex_mechanics::{Archetype, Character, ProtectionPolicy};
use ex_story::GameConfig;

use crate::GlobalArgs;
use crate::content;

/// Build the session config from the command line.
fn game_config(global: &GlobalArgs) -> GameConfig {
    let seed = if global.random {
        rand::random()
    } else {
        global.seed
    };
    tracing::info!(seed, "dice seeded");

    let protection = if global.persistent_protection {
        ProtectionPolicy::Persistent
    } else {
        ProtectionPolicy::OneShot
    };

    GameConfig::default()
        .with_seed(seed)
        .with_protection(protection)
        .with_max_invalid_attempts(global.max_invalid)
}

/// The champions of two archetypes, told apart when they are the same.
fn contenders(first: &str, second: &str) -> Result<(Character, Character), String> {
    let first: Archetype = first.parse().map_err(|e| format!("{e}"))?;
    let second: Archetype = second.parse().map_err(|e| format!("{e}"))?;
    let a = content::champion(first).map_err(|e| e.to_string())?;
    let mut b = content::champion(second).map_err(|e| e.to_string())?;
    if first == second {
        b.name = format!("{} II", b.name);
    }
    Ok((a, b))
}
