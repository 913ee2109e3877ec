//! Scenes, the choices leading out of them, and battle triggers.

use serde::{Deserialize, Serialize};

/// Identifier of a scene within a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub u32);

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SceneId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// One numbered option in a scene's menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The text shown to the player.
    pub text: String,
    /// Where the choice leads.
    pub target: SceneId,
}

impl Choice {
    /// Create a choice.
    pub fn new(text: impl Into<String>, target: SceneId) -> Self {
        Self {
            text: text.into(),
            target,
        }
    }
}

/// Hands control to the outside world instead of reading a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Run a named encounter and branch on its outcome.
    Battle {
        /// Encounter name understood by the hook.
        encounter: String,
        /// Next scene if the party wins.
        victory: SceneId,
        /// Next scene if the party loses.
        defeat: SceneId,
    },
}

/// A node in the story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique id.
    pub id: SceneId,
    /// Narrative text.
    pub text: String,
    /// Art reference, resolved by the renderer.
    pub art: Option<String>,
    /// Menu options in display order.
    pub choices: Vec<Choice>,
    /// Battle to run on arrival, if any.
    pub trigger: Option<Trigger>,
}

impl Scene {
    /// Create a scene with no choices.
    pub fn new(id: SceneId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            art: None,
            choices: Vec::new(),
            trigger: None,
        }
    }

    /// Set the art reference.
    pub fn with_art(mut self, art: impl Into<String>) -> Self {
        self.art = Some(art.into());
        self
    }

    /// Append a choice.
    pub fn with_choice(mut self, text: impl Into<String>, target: SceneId) -> Self {
        self.choices.push(Choice::new(text, target));
        self
    }

    /// Make this a battle scene.
    pub fn with_battle(
        mut self,
        encounter: impl Into<String>,
        victory: SceneId,
        defeat: SceneId,
    ) -> Self {
        self.trigger = Some(Trigger::Battle {
            encounter: encounter.into(),
            victory,
            defeat,
        });
        self
    }

    /// A scene with no way out ends the story.
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty() && self.trigger.is_none()
    }

    /// Every scene this one can lead to.
    pub fn targets(&self) -> impl Iterator<Item = SceneId> + '_ {
        let trigger = self.trigger.iter().flat_map(|t| match t {
            Trigger::Battle {
                victory, defeat, ..
            } => [*victory, *defeat],
        });
        self.choices.iter().map(|c| c.target).chain(trigger)
    }
}
