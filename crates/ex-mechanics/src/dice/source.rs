//! Random sources that produce raw die faces.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

use super::Die;

/// Something that can produce a face for a die.
///
/// Implementations must return a value in `1..=die.sides()`.
pub trait DiceSource {
    /// Produce one face for `die`.
    fn roll_die(&mut self, die: Die) -> u32;
}

impl DiceSource for StdRng {
    fn roll_die(&mut self, die: Die) -> u32 {
        self.random_range(1..=die.sides())
    }
}

/// A deterministic source that replays a fixed list of faces.
///
/// Once the script runs out the last face is repeated. Faces that do not
/// fit the requested die are clamped into `1..=sides`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u32>,
    last: Option<u32>,
}

impl ScriptedDice {
    /// Create a source that yields `faces` in order.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            last: None,
        }
    }

    /// A source that always yields the same face.
    pub fn constant(face: u32) -> Self {
        Self::new([face])
    }

    /// Number of scripted faces not yet consumed.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self, die: Die) -> u32 {
        let face = match self.faces.pop_front() {
            Some(face) => {
                self.last = Some(face);
                face
            }
            None => self.last.unwrap_or(1),
        };
        face.clamp(1, die.sides())
    }
}
