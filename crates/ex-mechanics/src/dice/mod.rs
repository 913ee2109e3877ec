//! Dice types, pools, and rolling.
//!
//! Only the polyhedral sizes the story needs are supported: a coin (d2)
//! and d4 through d100. Rolls go through a [`DiceResolver`] that owns an
//! injected [`DiceSource`], so tests can swap the random generator for a
//! scripted one.

pub mod pool;
pub mod resolver;
pub mod roll;
pub mod source;

pub use pool::DicePool;
pub use resolver::DiceResolver;
pub use roll::{DieResult, RollResult};
pub use source::{DiceSource, ScriptedDice};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// A supported die. The discriminant is the number of faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Die {
    /// Coin flip.
    D2 = 2,
    /// Tetrahedron.
    D4 = 4,
    /// Cube.
    D6 = 6,
    /// Octahedron.
    D8 = 8,
    /// Pentagonal trapezohedron.
    D10 = 10,
    /// Dodecahedron.
    D12 = 12,
    /// Icosahedron.
    D20 = 20,
    /// Percentile.
    D100 = 100,
}

impl Die {
    /// Every supported die, smallest first.
    pub const ALL: [Die; 8] = [
        Die::D2,
        Die::D4,
        Die::D6,
        Die::D8,
        Die::D10,
        Die::D12,
        Die::D20,
        Die::D100,
    ];

    /// Number of faces.
    pub fn sides(self) -> u32 {
        self as u32
    }

    /// The die with exactly `sides` faces.
    pub fn from_sides(sides: u32) -> MechResult<Self> {
        Self::try_from(sides)
    }
}

impl TryFrom<u32> for Die {
    type Error = MechError;

    fn try_from(sides: u32) -> MechResult<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.sides() == sides)
            .ok_or(MechError::UnsupportedDie(sides))
    }
}

/// Accepts `d20`, `D6`, a bare `100`, or `coin`.
impl FromStr for Die {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        let tag = s.trim().to_ascii_lowercase();
        if tag == "coin" {
            return Ok(Self::D2);
        }
        tag.trim_start_matches('d')
            .parse::<u32>()
            .map_err(|_| MechError::UnknownDie(s.to_string()))
            .and_then(Self::try_from)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}
