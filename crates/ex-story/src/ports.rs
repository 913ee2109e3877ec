//! The engine's view of the terminal and of combat.
//!
//! The engine never prints or reads on its own. Front ends implement
//! these traits; tests implement them with recorders and scripts.

use std::collections::VecDeque;

use crate::error::StoryResult;
use crate::scene::Scene;

/// Shows the story to the player.
pub trait Renderer {
    /// Show a scene: art, text and the numbered choices.
    fn render_scene(&mut self, scene: &Scene);

    /// Tell the player their selection was not understood.
    fn report_invalid(&mut self, input: &str, choices: usize);

    /// Tell the player the story is over.
    fn report_finished(&mut self, scene: &Scene);
}

/// Supplies raw player input one line at a time.
pub trait InputReader {
    /// The next line, or `None` once input is exhausted.
    fn next_line(&mut self) -> StoryResult<Option<String>>;
}

/// How a battle ended for the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    /// The party won.
    Victory,
    /// The party lost.
    Defeat,
}

/// Runs the battles that battle scenes name.
pub trait EncounterHook {
    /// Fight `encounter` to the end.
    ///
    /// `input` is the same reader the engine uses, for battles that ask
    /// the player for decisions.
    fn run_battle(
        &mut self,
        encounter: &str,
        input: &mut dyn InputReader,
    ) -> StoryResult<BattleOutcome>;
}

/// Input from a fixed list of lines, for scripted sessions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    reads: usize,
}

impl ScriptedInput {
    /// Queue `lines` in order.
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            reads: 0,
        }
    }

    /// How many times the engine asked for a line.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl InputReader for ScriptedInput {
    fn next_line(&mut self) -> StoryResult<Option<String>> {
        self.reads += 1;
        Ok(self.lines.pop_front())
    }
}
