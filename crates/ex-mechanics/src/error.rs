//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A die size outside the supported set was requested.
    #[error("unsupported die: d{0}")]
    UnsupportedDie(u32),

    /// A die tag that is not a number of sides at all.
    #[error("unknown die: {0}")]
    UnknownDie(String),

    /// The character's archetype has no such attribute.
    #[error("{archetype} has no attribute '{attribute}'")]
    UnknownAttribute {
        /// Archetype of the character that was queried.
        archetype: String,
        /// The attribute that was requested.
        attribute: String,
    },

    /// The archetype cannot perform the requested action.
    #[error("{archetype} cannot {action}")]
    ActionNotAvailable {
        /// Archetype of the acting character.
        archetype: String,
        /// The action that was attempted.
        action: String,
    },

    /// A participant index does not exist in the encounter.
    #[error("participant index {0} out of bounds")]
    UnknownParticipant(usize),

    /// An action targeted the acting participant where that makes no sense.
    #[error("participant {0} cannot target itself")]
    SelfTarget(usize),

    /// A defeated participant tried to act.
    #[error("{0} has been defeated and cannot act")]
    Defeated(String),

    /// Unknown archetype name.
    #[error("unknown archetype: {0}")]
    UnknownArchetype(String),

    /// Unknown room kind name.
    #[error("unknown room kind: {0}")]
    UnknownRoom(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
