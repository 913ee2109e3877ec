//! The process-wide dice resolver.

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{DicePool, DiceSource, Die, RollResult};
use crate::error::MechResult;

/// Owns the random source and turns die requests into outcomes.
///
/// Create one per session: seeding happens once here, never per roll.
pub struct DiceResolver {
    source: Box<dyn DiceSource>,
}

impl DiceResolver {
    /// Wrap an arbitrary dice source.
    pub fn new(source: impl DiceSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// A resolver backed by a `StdRng` seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A resolver backed by a `StdRng` seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Roll a single die.
    pub fn roll(&mut self, die: Die) -> u32 {
        let value = self.source.roll_die(die);
        tracing::trace!(%die, value, "rolled");
        value
    }

    /// Roll a die given only its number of sides.
    ///
    /// Fails with [`MechError::UnsupportedDie`](crate::MechError::UnsupportedDie)
    /// for sizes outside the supported set.
    pub fn roll_sides(&mut self, sides: u32) -> MechResult<u32> {
        let die = Die::from_sides(sides)?;
        Ok(self.roll(die))
    }

    /// Roll every die in `pool`.
    pub fn roll_pool(&mut self, pool: &DicePool) -> RollResult {
        let result = pool.roll(self.source.as_mut());
        tracing::trace!(%pool, total = result.total(), "rolled pool");
        result
    }
}

impl std::fmt::Debug for DiceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceResolver").finish_non_exhaustive()
    }
}
