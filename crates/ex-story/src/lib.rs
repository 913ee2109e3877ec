//! Narrative engine for Exandria.
//!
//! A story is a [`SceneGraph`] of numbered scenes joined by menu choices.
//! The [`NarrativeEngine`] walks it from an entry scene, rendering through
//! a [`Renderer`], reading selections through an [`InputReader`] and
//! handing battle scenes to an [`EncounterHook`].

/// Session configuration.
pub mod config;
/// The traversal loop.
pub mod engine;
/// Error types for the story engine.
pub mod error;
/// Scene storage and validation.
pub mod graph;
/// Interfaces to the outside world.
pub mod ports;
/// Scenes, choices and triggers.
pub mod scene;

pub use config::GameConfig;
pub use engine::{Ending, NarrativeEngine, Step, parse_selection};
pub use error::{StoryError, StoryResult};
pub use graph::{GraphDefect, SceneGraph};
pub use ports::{BattleOutcome, EncounterHook, InputReader, Renderer, ScriptedInput};
pub use scene::{Choice, Scene, SceneId, Trigger};
