//! Encounter state, participant management, and the duel loop.
//!
//! An [`Encounter`] owns the characters taking part, who protects whom,
//! the current round and a log of combat events. Individual actions are
//! resolved in [`action`]; archetype dice live in [`pattern`].

pub mod action;
pub mod pattern;

pub use action::{CombatAction, CombatEvent, Effect, resolve_action};

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::dice::DiceResolver;
use crate::error::{MechError, MechResult};

/// Which side of a fight a participant is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The player's party.
    Heroes,
    /// Everyone the party fights.
    Foes,
}

impl Side {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Heroes => Self::Foes,
            Self::Foes => Self::Heroes,
        }
    }
}

/// Whether a protection status survives the attack it absorbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionPolicy {
    /// Cleared after redirecting one attack.
    #[default]
    OneShot,
    /// Stays until the protector falls.
    Persistent,
}

/// A participant in an encounter.
#[derive(Debug, Clone)]
pub struct Participant {
    /// The participant's character.
    pub character: Character,
    /// Which side they fight on.
    pub side: Side,
    protected_by: Option<usize>,
}

/// How a duel ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelOutcome {
    /// Index of the participant left standing.
    pub winner: usize,
    /// Index of the defeated participant.
    pub loser: usize,
    /// Number of exchanges fought.
    pub rounds: u32,
}

/// The state of an ongoing encounter.
#[derive(Debug, Clone)]
pub struct Encounter {
    participants: Vec<Participant>,
    policy: ProtectionPolicy,
    round: u32,
    log: Vec<CombatEvent>,
}

impl Encounter {
    /// Create an empty encounter.
    pub fn new(policy: ProtectionPolicy) -> Self {
        Self {
            participants: Vec::new(),
            policy,
            round: 0,
            log: Vec::new(),
        }
    }

    /// Add a participant and return their index.
    pub fn add(&mut self, character: Character, side: Side) -> usize {
        self.participants.push(Participant {
            character,
            side,
            protected_by: None,
        });
        self.participants.len() - 1
    }

    /// Get a participant by index.
    pub fn participant(&self, index: usize) -> MechResult<&Participant> {
        self.participants
            .get(index)
            .ok_or(MechError::UnknownParticipant(index))
    }

    /// Get a participant's character.
    pub fn character(&self, index: usize) -> MechResult<&Character> {
        self.participant(index).map(|p| &p.character)
    }

    /// Get a mutable reference to a participant's character.
    pub fn character_mut(&mut self, index: usize) -> MechResult<&mut Character> {
        self.participants
            .get_mut(index)
            .map(|p| &mut p.character)
            .ok_or(MechError::UnknownParticipant(index))
    }

    /// All participants in insertion order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Consume the encounter and hand back the characters.
    pub fn into_characters(self) -> Vec<Character> {
        self.participants.into_iter().map(|p| p.character).collect()
    }

    /// Returns true if someone currently shields this participant.
    pub fn is_protected(&self, index: usize) -> bool {
        self.participants
            .get(index)
            .is_some_and(|p| p.protected_by.is_some())
    }

    /// The protection policy in force.
    pub fn policy(&self) -> ProtectionPolicy {
        self.policy
    }

    /// Current round number (0 before any duel starts).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Start the next round and return its number.
    pub fn next_round(&mut self) -> u32 {
        self.round += 1;
        self.round
    }

    /// Every event resolved so far.
    pub fn log(&self) -> &[CombatEvent] {
        &self.log
    }

    /// Returns true once every participant on `side` is down.
    pub fn side_defeated(&self, side: Side) -> bool {
        self.participants
            .iter()
            .filter(|p| p.side == side)
            .all(|p| !p.character.is_alive())
    }

    /// Resolve one action. See [`resolve_action`].
    pub fn perform(
        &mut self,
        actor: usize,
        action: CombatAction,
        dice: &mut DiceResolver,
    ) -> MechResult<CombatEvent> {
        resolve_action(self, actor, action, dice)
    }

    /// Basic attack. Returns the damage dealt before redirection.
    pub fn attack(
        &mut self,
        attacker: usize,
        defender: usize,
        dice: &mut DiceResolver,
    ) -> MechResult<u32> {
        self.perform(attacker, CombatAction::Attack { target: defender }, dice)
            .map(|e| e.amount)
    }

    /// Mark `ward` as protected by `protector`.
    pub fn protect(
        &mut self,
        protector: usize,
        ward: usize,
        dice: &mut DiceResolver,
    ) -> MechResult<()> {
        self.perform(protector, CombatAction::Protect { ward }, dice)
            .map(|_| ())
    }

    /// Fight until one of the two falls.
    ///
    /// `first` strikes, then `second` answers if still standing. If both
    /// end an exchange at zero life (possible when protection redirects
    /// damage onto a duelist), `first` is the loser.
    pub fn duel(
        &mut self,
        first: usize,
        second: usize,
        dice: &mut DiceResolver,
    ) -> MechResult<DuelOutcome> {
        self.check_target(first, second, false)?;
        let mut rounds = 0;

        while self.alive(first) && self.alive(second) {
            rounds += 1;
            self.next_round();
            self.attack(first, second, dice)?;
            if self.alive(second) && self.alive(first) {
                self.attack(second, first, dice)?;
            }
        }

        let outcome = if self.alive(first) {
            DuelOutcome {
                winner: first,
                loser: second,
                rounds,
            }
        } else {
            DuelOutcome {
                winner: second,
                loser: first,
                rounds,
            }
        };
        tracing::info!(
            winner = %self.participants[outcome.winner].character.name,
            loser = %self.participants[outcome.loser].character.name,
            rounds,
            "duel finished"
        );
        Ok(outcome)
    }

    fn alive(&self, index: usize) -> bool {
        self.participants[index].character.is_alive()
    }

    /// Indices of living participants on the other side from `actor`.
    fn standing_opponents(&self, actor: usize) -> Vec<usize> {
        let side = self.participants[actor].side.opposite();
        self.participants
            .iter()
            .enumerate()
            .filter(|(_, p)| p.side == side && p.character.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    fn check_target(&self, actor: usize, target: usize, allow_self: bool) -> MechResult<()> {
        self.participant(actor)?;
        self.participant(target)?;
        if !allow_self && actor == target {
            return Err(MechError::SelfTarget(actor));
        }
        Ok(())
    }
}

impl Default for Encounter {
    fn default() -> Self {
        Self::new(ProtectionPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Archetype, Attribute};
    use crate::dice::ScriptedDice;

    fn scripted(faces: impl IntoIterator<Item = u32>) -> DiceResolver {
        DiceResolver::new(ScriptedDice::new(faces))
    }

    #[test]
    fn add_and_lookup() {
        let mut enc = Encounter::default();
        let a = enc.add(Character::new("Shereik", Archetype::Knight), Side::Heroes);
        let b = enc.add(Character::new("Ogro", Archetype::Monster), Side::Foes);
        assert_eq!((a, b), (0, 1));
        assert_eq!(enc.character(b).unwrap().name, "Ogro");
        assert!(enc.character(5).is_err());
        assert_eq!(enc.policy(), ProtectionPolicy::OneShot);
    }

    #[test]
    fn duel_runs_to_a_knockout() {
        let mut enc = Encounter::default();
        let knight = enc.add(
            Character::new("Shereik", Archetype::Knight)
                .with(Attribute::Strength, 30)
                .unwrap(),
            Side::Heroes,
        );
        let ogre = enc.add(
            Character::new("Ogro", Archetype::Monster)
                .with(Attribute::Strength, 20)
                .unwrap(),
            Side::Foes,
        );
        // Every roll is a 5: knight deals 35, ogre deals 25.
        let mut dice = scripted([5]);

        let outcome = enc.duel(knight, ogre, &mut dice).unwrap();
        assert_eq!(outcome.winner, knight);
        assert_eq!(outcome.loser, ogre);
        assert_eq!(outcome.rounds, 3);
        // Ogre fell on the third strike and never answered it.
        assert_eq!(enc.character(knight).unwrap().life(), 50);
        assert_eq!(enc.character(ogre).unwrap().life(), 0);
        assert_eq!(enc.log().len(), 5);
        assert_eq!(enc.round(), 3);
        assert!(enc.side_defeated(Side::Foes));
        assert!(!enc.side_defeated(Side::Heroes));
    }

    #[test]
    fn second_duelist_can_win() {
        let mut enc = Encounter::default();
        let weak = enc.add(
            Character::new("Tiago", Archetype::Villager)
                .with(Attribute::Strength, 0)
                .unwrap(),
            Side::Heroes,
        );
        let dragon = enc.add(Character::new("Granamir", Archetype::Dragon), Side::Foes);
        let mut dice = scripted([1]);

        let outcome = enc.duel(weak, dragon, &mut dice).unwrap();
        assert_eq!(outcome.winner, dragon);
        assert_eq!(outcome.rounds, 1);
        assert_eq!(enc.character(dragon).unwrap().life(), 99);
    }

    #[test]
    fn simultaneous_defeat_goes_against_the_initiator() {
        let mut enc = Encounter::new(ProtectionPolicy::Persistent);
        let first = enc.add(
            Character::new("Shereik", Archetype::Knight)
                .with(Attribute::Life, 4)
                .unwrap()
                .with(Attribute::Strength, 0)
                .unwrap(),
            Side::Heroes,
        );
        let second = enc.add(
            Character::new("Ogro", Archetype::Monster)
                .with(Attribute::Life, 3)
                .unwrap()
                .with(Attribute::Strength, 9)
                .unwrap(),
            Side::Foes,
        );
        // The ogre's own blow is redirected onto it: 6 of 10 to the ogre,
        // 4 to the knight, and both drop in the same exchange.
        enc.participants[first].protected_by = Some(second);
        let mut dice = scripted([1]);

        let outcome = enc.duel(first, second, &mut dice).unwrap();
        assert_eq!(outcome.rounds, 1);
        assert!(!enc.character(first).unwrap().is_alive());
        assert!(!enc.character(second).unwrap().is_alive());
        assert_eq!(outcome.winner, second);
        assert_eq!(outcome.loser, first);
    }

    #[test]
    fn duel_between_fallen_ends_at_once() {
        let mut enc = Encounter::default();
        let first = enc.add(Character::new("A", Archetype::Knight), Side::Heroes);
        let second = enc.add(Character::new("B", Archetype::Monster), Side::Foes);
        enc.character_mut(first).unwrap().set_life(0);
        enc.character_mut(second).unwrap().set_life(0);
        let mut dice = scripted([1]);
        let outcome = enc.duel(first, second, &mut dice).unwrap();
        assert_eq!(outcome.winner, second);
        assert_eq!(outcome.rounds, 0);
    }

    #[test]
    fn duel_rejects_self() {
        let mut enc = Encounter::default();
        let a = enc.add(Character::new("A", Archetype::Knight), Side::Heroes);
        let mut dice = scripted([1]);
        assert!(enc.duel(a, a, &mut dice).is_err());
    }

    #[test]
    fn protect_helper() {
        let mut enc = Encounter::default();
        let knight = enc.add(Character::new("Shereik", Archetype::Knight), Side::Heroes);
        let princess = enc.add(Character::new("Fiona", Archetype::Princess), Side::Heroes);
        let mut dice = scripted([1]);
        enc.protect(knight, princess, &mut dice).unwrap();
        assert!(enc.is_protected(princess));
        assert!(!enc.is_protected(knight));
    }

    #[test]
    fn into_characters_keeps_order() {
        let mut enc = Encounter::default();
        enc.add(Character::new("A", Archetype::Knight), Side::Heroes);
        enc.add(Character::new("B", Archetype::Dragon), Side::Foes);
        let names: Vec<String> = enc.into_characters().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn side_opposite() {
        assert_eq!(Side::Heroes.opposite(), Side::Foes);
        assert_eq!(Side::Foes.opposite(), Side::Heroes);
    }
}
