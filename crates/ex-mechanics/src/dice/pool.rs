//! Dice pool construction and rolling.

use std::fmt;
use std::iter;

use super::roll::{DieResult, RollResult};
use super::{DiceSource, Die};

/// Dice thrown together, such as the witch's `2d10`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DicePool {
    /// Dice in throw order.
    pub dice: Vec<Die>,
}

impl DicePool {
    /// An empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Just one die.
    pub fn single(die: Die) -> Self {
        Self { dice: vec![die] }
    }

    /// Builder: append `count` copies of `die`.
    pub fn add(mut self, die: Die, count: u32) -> Self {
        self.dice.extend(iter::repeat_n(die, count as usize));
        self
    }

    /// Number of dice.
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    /// Whether the pool holds no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Throw every die once, drawing faces from `source`.
    pub fn roll(&self, source: &mut dyn DiceSource) -> RollResult {
        self.dice
            .iter()
            .map(|&die| DieResult {
                die,
                value: source.roll_die(die),
            })
            .collect()
    }
}

/// Consecutive dice of one size collapse into `NdS`, joined by `+`.
impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = self.dice.chunk_by(|a, b| a == b);
        for (i, group) in groups.enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{}{}", group.len(), group[0])?;
        }
        Ok(())
    }
}
