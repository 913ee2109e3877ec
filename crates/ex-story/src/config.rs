//! Configuration for a play session.

use ex_mechanics::{DiceResolver, ProtectionPolicy};

use crate::scene::SceneId;

/// Configuration for a play session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible dice.
    pub seed: u64,
    /// Scene the story starts from.
    pub entry: SceneId,
    /// Whether protection lasts one attack or until the protector falls.
    pub protection: ProtectionPolicy,
    /// Consecutive invalid selections tolerated before giving up (0 = no limit).
    pub max_invalid_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            entry: SceneId(1),
            protection: ProtectionPolicy::OneShot,
            max_invalid_attempts: 0,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the entry scene.
    pub fn with_entry(mut self, entry: SceneId) -> Self {
        self.entry = entry;
        self
    }

    /// Set the protection policy.
    pub fn with_protection(mut self, protection: ProtectionPolicy) -> Self {
        self.protection = protection;
        self
    }

    /// Set the invalid selection limit (0 disables it).
    pub fn with_max_invalid_attempts(mut self, limit: u32) -> Self {
        self.max_invalid_attempts = limit;
        self
    }

    /// A dice resolver seeded from this config.
    pub fn dice(&self) -> DiceResolver {
        DiceResolver::seeded(self.seed)
    }
}
