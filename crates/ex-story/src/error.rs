//! Error types for the story engine.

use thiserror::Error;

use crate::scene::SceneId;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while building or playing a story.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A scene id was reached that the graph does not contain.
    #[error("scene {target} not found{}", origin(.from))]
    BrokenGraph {
        /// The scene whose choice or trigger pointed at the missing one.
        from: Option<SceneId>,
        /// The missing scene.
        target: SceneId,
    },

    /// A scene with this id was already added.
    #[error("duplicate scene id: {0}")]
    DuplicateScene(SceneId),

    /// The player's input did not name a listed choice.
    #[error("invalid selection '{input}': expected a number from 1 to {choices}")]
    InvalidSelection {
        /// The raw input, trimmed.
        input: String,
        /// How many choices were on offer.
        choices: usize,
    },

    /// The configured limit of consecutive invalid selections was hit.
    #[error("too many invalid selections ({0} in a row)")]
    TooManyInvalid(u32),

    /// A battle scene was reached but the hook does not know the encounter.
    #[error("unknown encounter: {0}")]
    UnknownEncounter(String),

    /// Reading input failed.
    #[error("input error: {0}")]
    Io(#[from] std::io::Error),

    /// A mechanics operation failed during a battle.
    #[error("mechanics error: {0}")]
    Mechanics(#[from] ex_mechanics::MechError),
}

fn origin(from: &Option<SceneId>) -> String {
    from.map(|f| format!(" (reached from scene {f})"))
        .unwrap_or_default()
}
