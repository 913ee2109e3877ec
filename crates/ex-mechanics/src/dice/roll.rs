//! Dice roll results and aggregation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Die;

/// One face that came up, with the die it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// Die that was thrown.
    pub die: Die,
    /// Face shown, in `1..=die.sides()`.
    pub value: u32,
}

/// Every face from one throw of a pool, in pool order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Faces in the order the dice were thrown.
    pub dice: Vec<DieResult>,
}

impl RollResult {
    /// Sum of the faces. This is the amount fed into damage and healing.
    pub fn total(&self) -> u32 {
        self.values().sum()
    }

    /// Number of dice thrown.
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    /// Whether nothing was thrown (actions that need no dice).
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Face values without their dice.
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.dice.iter().map(|d| d.value)
    }
}

impl FromIterator<DieResult> for RollResult {
    fn from_iter<I: IntoIterator<Item = DieResult>>(iter: I) -> Self {
        Self {
            dice: iter.into_iter().collect(),
        }
    }
}

/// `4` for one die, `4 + 9 = 13` for several, `0` for none.
impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() <= 1 {
            return write!(f, "{}", self.total());
        }
        let faces: Vec<String> = self.values().map(|v| v.to_string()).collect();
        write!(f, "{} = {}", faces.join(" + "), self.total())
    }
}
