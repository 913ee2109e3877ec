//! Clamped attribute values.

use serde::{Deserialize, Serialize};

/// A character attribute value, always within `[Stat::MIN, Stat::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stat(u8);

impl Stat {
    /// Lowest storable value.
    pub const MIN: u8 = 0;
    /// Highest storable value.
    pub const MAX: u8 = 100;

    /// Create a stat, clamping `value` into range.
    pub fn new(value: i64) -> Self {
        Self(clamp(value))
    }

    /// A stat at its maximum.
    pub fn full() -> Self {
        Self(Self::MAX)
    }

    /// Current value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Overwrite the value, clamping. Returns the stored value.
    pub fn set(&mut self, value: i64) -> u8 {
        self.0 = clamp(value);
        self.0
    }

    /// Adjust by a delta, clamping. Returns the new value.
    pub fn adjust(&mut self, delta: i64) -> u8 {
        self.set(i64::from(self.0).saturating_add(delta))
    }

    /// Returns true if the stat is at zero.
    pub fn is_empty(self) -> bool {
        self.0 == Self::MIN
    }
}

impl Default for Stat {
    fn default() -> Self {
        Self::full()
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn clamp(value: i64) -> u8 {
    // In range after the clamp, so the cast cannot truncate.
    value.clamp(i64::from(Stat::MIN), i64::from(Stat::MAX)) as u8
}
