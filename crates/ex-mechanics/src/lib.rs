//! Game mechanics for Exandria.
//!
//! Provides dice rolling with an injectable random source, archetype-based
//! characters with clamped attributes, an encounter resolver for attacks,
//! healing, buffs and protection, a table-driven room event resolver, and
//! the archetype dialogue tables.

pub mod character;
pub mod dialogue;
pub mod dice;
pub mod encounter;
pub mod error;
pub mod events;

pub use character::{Archetype, Attribute, Character, Stat};
pub use dice::{DicePool, DiceResolver, DiceSource, Die, DieResult, RollResult, ScriptedDice};
pub use encounter::{
    CombatAction, CombatEvent, DuelOutcome, Effect, Encounter, ProtectionPolicy, Side,
};
pub use error::{MechError, MechResult};
pub use events::{Container, Discovery, Entry, Loot, RoomKind, RoomOutcome, RoomReport};
