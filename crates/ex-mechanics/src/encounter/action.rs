//! Combat actions, their resolution, and event logging.

use serde::{Deserialize, Serialize};

use crate::character::Attribute;
use crate::dice::{DicePool, DiceResolver, RollResult};
use crate::error::{MechError, MechResult};

use super::{Encounter, ProtectionPolicy, pattern};

/// An action a participant can take during their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CombatAction {
    /// Strength plus the archetype's base die against one target.
    Attack {
        /// Index of the target participant.
        target: usize,
    },
    /// Strength plus two larger dice against one target.
    PowerfulAttack {
        /// Index of the target participant.
        target: usize,
    },
    /// Strength plus two larger dice against every standing opponent.
    AreaAttack,
    /// Shield another participant from incoming damage.
    Protect {
        /// Index of the participant to protect.
        ward: usize,
    },
    /// Restore life.
    Heal {
        /// Index of the target participant.
        target: usize,
    },
    /// Raise strength.
    Buff {
        /// Index of the target participant.
        target: usize,
    },
    /// Lower strength.
    Debuff {
        /// Index of the target participant.
        target: usize,
    },
}

impl CombatAction {
    fn verb(self) -> &'static str {
        match self {
            Self::Attack { .. } => "attack",
            Self::PowerfulAttack { .. } => "use a powerful attack",
            Self::AreaAttack => "cast an area attack",
            Self::Protect { .. } => "protect",
            Self::Heal { .. } => "heal",
            Self::Buff { .. } => "buff",
            Self::Debuff { .. } => "debuff",
        }
    }
}

impl std::fmt::Display for CombatAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack { target } => write!(f, "Attack #{target}"),
            Self::PowerfulAttack { target } => write!(f, "Powerful attack on #{target}"),
            Self::AreaAttack => write!(f, "Area attack"),
            Self::Protect { ward } => write!(f, "Protect #{ward}"),
            Self::Heal { target } => write!(f, "Heal #{target}"),
            Self::Buff { target } => write!(f, "Buff #{target}"),
            Self::Debuff { target } => write!(f, "Debuff #{target}"),
        }
    }
}

/// A change to one participant's attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// Index of the affected participant.
    pub target: usize,
    /// Which attribute changed.
    pub attribute: Attribute,
    /// Requested change (negative for damage).
    pub delta: i64,
    /// Value after clamping.
    pub value: u8,
}

/// A recorded combat event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEvent {
    /// Which round this happened in (0 outside a duel).
    pub round: u32,
    /// Index of the acting participant.
    pub actor: usize,
    /// What action was taken.
    pub action: CombatAction,
    /// The dice rolled, empty for actions without a roll.
    pub roll: RollResult,
    /// Damage dealt or points restored before redirection and clamping.
    pub amount: u32,
    /// Attribute changes, in application order.
    pub effects: Vec<Effect>,
    /// A narrative description of what happened.
    pub description: String,
}

/// Resolve `action` for participant `actor`, apply it, and log it.
pub fn resolve_action(
    encounter: &mut Encounter,
    actor: usize,
    action: CombatAction,
    dice: &mut DiceResolver,
) -> MechResult<CombatEvent> {
    let acting = encounter.character(actor)?;
    if !acting.is_alive() {
        return Err(MechError::Defeated(acting.name.clone()));
    }
    let archetype = acting.archetype;
    let strength = u32::from(acting.strength());
    let unavailable = || MechError::ActionNotAvailable {
        archetype: archetype.to_string(),
        action: action.verb().to_string(),
    };

    let (roll, amount, effects) = match action {
        CombatAction::Attack { target } => {
            encounter.check_target(actor, target, false)?;
            let roll = dice.roll_pool(&DicePool::single(pattern::base_attack_die(archetype)));
            let damage = strength + roll.total();
            let effects = encounter.apply_damage(target, damage);
            (roll, damage, effects)
        }
        CombatAction::PowerfulAttack { target } => {
            let pool = pattern::powerful_attack_pool(archetype).ok_or_else(unavailable)?;
            encounter.check_target(actor, target, false)?;
            let roll = dice.roll_pool(&pool);
            let damage = strength + roll.total();
            let effects = encounter.apply_damage(target, damage);
            (roll, damage, effects)
        }
        CombatAction::AreaAttack => {
            let pool = pattern::area_attack_pool(archetype).ok_or_else(unavailable)?;
            let roll = dice.roll_pool(&pool);
            let damage = strength + roll.total();
            let mut effects = Vec::new();
            for target in encounter.standing_opponents(actor) {
                effects.extend(encounter.apply_damage(target, damage));
            }
            (roll, damage, effects)
        }
        CombatAction::Protect { ward } => {
            encounter.check_target(actor, ward, false)?;
            encounter.participants[ward].protected_by = Some(actor);
            (RollResult::default(), 0, Vec::new())
        }
        CombatAction::Heal { target } => {
            let die = pattern::heal_die(archetype).ok_or_else(unavailable)?;
            encounter.check_target(actor, target, true)?;
            let roll = dice.roll_pool(&DicePool::single(die));
            let amount = roll.total();
            let effect = encounter.apply(target, Attribute::Life, i64::from(amount));
            (roll, amount, vec![effect])
        }
        CombatAction::Buff { target } => {
            let die = pattern::buff_die(archetype).ok_or_else(unavailable)?;
            encounter.check_target(actor, target, true)?;
            let roll = dice.roll_pool(&DicePool::single(die));
            let amount = roll.total();
            let effect = encounter.apply(target, Attribute::Strength, i64::from(amount));
            (roll, amount, vec![effect])
        }
        CombatAction::Debuff { target } => {
            let die = pattern::debuff_die(archetype).ok_or_else(unavailable)?;
            encounter.check_target(actor, target, false)?;
            let roll = dice.roll_pool(&DicePool::single(die));
            let amount = roll.total();
            let effect = encounter.apply(target, Attribute::Strength, -i64::from(amount));
            (roll, amount, vec![effect])
        }
    };

    let description = describe(encounter, actor, action, amount, &effects);
    tracing::debug!(round = encounter.round, %description, "combat action");

    let event = CombatEvent {
        round: encounter.round,
        actor,
        action,
        roll,
        amount,
        effects,
        description,
    };
    encounter.log.push(event.clone());
    Ok(event)
}

impl Encounter {
    /// Subtract `damage` from a participant's life, honoring protection.
    pub(super) fn apply_damage(&mut self, target: usize, damage: u32) -> Vec<Effect> {
        let protector = self.participants[target]
            .protected_by
            .filter(|&p| p != target && self.participants[p].character.is_alive());

        let Some(protector) = protector else {
            return vec![self.apply(target, Attribute::Life, -i64::from(damage))];
        };

        let pct = pattern::protection_percent(self.participants[protector].character.archetype);
        let absorbed = damage * pct / 100;
        let remainder = damage - absorbed;
        if self.policy == ProtectionPolicy::OneShot {
            self.participants[target].protected_by = None;
        }
        tracing::debug!(target, protector, absorbed, remainder, "damage redirected");

        vec![
            self.apply(protector, Attribute::Life, -i64::from(absorbed)),
            self.apply(target, Attribute::Life, -i64::from(remainder)),
        ]
    }

    /// Adjust a core attribute and record the change.
    pub(super) fn apply(&mut self, target: usize, attribute: Attribute, delta: i64) -> Effect {
        let character = &mut self.participants[target].character;
        let value = match attribute {
            Attribute::Strength => {
                let current = i64::from(character.strength());
                character.set_strength(current + delta)
            }
            _ => {
                let current = i64::from(character.life());
                character.set_life(current + delta)
            }
        };
        Effect {
            target,
            attribute,
            delta,
            value,
        }
    }
}

fn describe(
    encounter: &Encounter,
    actor: usize,
    action: CombatAction,
    amount: u32,
    effects: &[Effect],
) -> String {
    let name = |i: usize| encounter.participants[i].character.name.as_str();
    let actor_name = name(actor);
    match action {
        CombatAction::Attack { target } | CombatAction::PowerfulAttack { target } => {
            let mut text = format!("{actor_name} attacks {} for {amount} damage", name(target));
            if effects.len() > 1 {
                let shield = &effects[0];
                text.push_str(&format!(
                    "; {} takes {} of it",
                    name(shield.target),
                    -shield.delta
                ));
            }
            text
        }
        CombatAction::AreaAttack => {
            format!("{actor_name} unleashes a spell on every foe for {amount} damage")
        }
        CombatAction::Protect { ward } => format!("{actor_name} shields {}", name(ward)),
        CombatAction::Heal { target } => {
            format!("{actor_name} heals {} for {amount}", name(target))
        }
        CombatAction::Buff { target } => {
            format!("{actor_name} strengthens {} by {amount}", name(target))
        }
        CombatAction::Debuff { target } => {
            format!("{actor_name} weakens {} by {amount}", name(target))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Archetype, Character};
    use crate::dice::ScriptedDice;
    use crate::encounter::Side;

    fn scripted(faces: impl IntoIterator<Item = u32>) -> DiceResolver {
        DiceResolver::new(ScriptedDice::new(faces))
    }

    fn hero(name: &str, archetype: Archetype, strength: i64) -> Character {
        Character::new(name, archetype)
            .with(Attribute::Strength, strength)
            .unwrap()
    }

    #[test]
    fn attack_adds_strength_and_roll() {
        let mut enc = Encounter::new(ProtectionPolicy::OneShot);
        let a = enc.add(hero("Ogro", Archetype::Monster, 10), Side::Foes);
        let d = enc.add(Character::new("Shereik", Archetype::Knight), Side::Heroes);
        let mut dice = scripted([4]);

        let event = resolve_action(&mut enc, a, CombatAction::Attack { target: d }, &mut dice)
            .unwrap();
        assert_eq!(event.amount, 14);
        assert_eq!(event.roll.dice[0].die, crate::Die::D6);
        assert_eq!(enc.character(d).unwrap().life(), 86);
        assert_eq!(enc.log().len(), 1);
    }

    #[test]
    fn protection_redirects_share_to_protector() {
        let mut enc = Encounter::new(ProtectionPolicy::OneShot);
        let foe = enc.add(hero("Do71", Archetype::Witch, 12), Side::Foes);
        let ward = enc.add(Character::new("Fiona", Archetype::Princess), Side::Heroes);
        let guard = enc.add(Character::new("Gandalf", Archetype::Mage), Side::Heroes);
        let mut dice = scripted([8]);

        resolve_action(&mut enc, guard, CombatAction::Protect { ward }, &mut dice).unwrap();
        assert!(enc.is_protected(ward));

        let event =
            resolve_action(&mut enc, foe, CombatAction::Attack { target: ward }, &mut dice)
                .unwrap();
        assert_eq!(event.amount, 20);
        assert_eq!(enc.character(guard).unwrap().life(), 88);
        assert_eq!(enc.character(ward).unwrap().life(), 92);
        assert!(event.description.contains("Gandalf takes 12"));
    }

    #[test]
    fn one_shot_protection_is_consumed() {
        let mut enc = Encounter::new(ProtectionPolicy::OneShot);
        let foe = enc.add(hero("Ogro", Archetype::Monster, 14), Side::Foes);
        let ward = enc.add(Character::new("Tiago", Archetype::Villager), Side::Heroes);
        let guard = enc.add(Character::new("Shereik", Archetype::Knight), Side::Heroes);
        let mut dice = scripted([6]);

        resolve_action(&mut enc, guard, CombatAction::Protect { ward }, &mut dice).unwrap();
        resolve_action(&mut enc, foe, CombatAction::Attack { target: ward }, &mut dice).unwrap();
        assert!(!enc.is_protected(ward));
        // 20 damage, knight absorbs 18.
        assert_eq!(enc.character(guard).unwrap().life(), 82);
        assert_eq!(enc.character(ward).unwrap().life(), 98);

        resolve_action(&mut enc, foe, CombatAction::Attack { target: ward }, &mut dice).unwrap();
        assert_eq!(enc.character(guard).unwrap().life(), 82);
        assert_eq!(enc.character(ward).unwrap().life(), 78);
    }

    #[test]
    fn persistent_protection_stays() {
        let mut enc = Encounter::new(ProtectionPolicy::Persistent);
        let foe = enc.add(hero("Ogro", Archetype::Monster, 14), Side::Foes);
        let ward = enc.add(Character::new("Tiago", Archetype::Villager), Side::Heroes);
        let guard = enc.add(Character::new("Shereik", Archetype::Knight), Side::Heroes);
        let mut dice = scripted([6]);

        resolve_action(&mut enc, guard, CombatAction::Protect { ward }, &mut dice).unwrap();
        for _ in 0..2 {
            resolve_action(&mut enc, foe, CombatAction::Attack { target: ward }, &mut dice)
                .unwrap();
        }
        assert!(enc.is_protected(ward));
        assert_eq!(enc.character(guard).unwrap().life(), 64);
        assert_eq!(enc.character(ward).unwrap().life(), 96);
    }

    #[test]
    fn fallen_protector_shields_nobody() {
        let mut enc = Encounter::new(ProtectionPolicy::Persistent);
        let foe = enc.add(hero("Granamir", Archetype::Dragon, 10), Side::Foes);
        let ward = enc.add(Character::new("Fiona", Archetype::Princess), Side::Heroes);
        let guard = enc.add(Character::new("Tiago", Archetype::Villager), Side::Heroes);
        let mut dice = scripted([10]);

        resolve_action(&mut enc, guard, CombatAction::Protect { ward }, &mut dice).unwrap();
        enc.character_mut(guard).unwrap().set_life(0);
        resolve_action(&mut enc, foe, CombatAction::Attack { target: ward }, &mut dice).unwrap();
        assert_eq!(enc.character(ward).unwrap().life(), 80);
    }

    #[test]
    fn powerful_attack_sums_two_dice() {
        let mut enc = Encounter::new(ProtectionPolicy::OneShot);
        let dragon = enc.add(hero("Granamir", Archetype::Dragon, 5), Side::Foes);
        let knight = enc.add(Character::new("Shereik", Archetype::Knight), Side::Heroes);
        let mut dice = scripted([12, 7]);

        let event = resolve_action(
            &mut enc,
            dragon,
            CombatAction::PowerfulAttack { target: knight },
            &mut dice,
        )
        .unwrap();
        assert_eq!(event.roll.len(), 2);
        assert_eq!(event.amount, 24);
        assert_eq!(enc.character(knight).unwrap().life(), 76);
    }

    #[test]
    fn powerful_attack_not_available_to_knight() {
        let mut enc = Encounter::new(ProtectionPolicy::OneShot);
        let knight = enc.add(Character::new("Shereik", Archetype::Knight), Side::Heroes);
        let ogre = enc.add(Character::new("Ogro", Archetype::Monster), Side::Foes);
        let mut dice = scripted([1]);
        assert!(matches!(
            resolve_action(
                &mut enc,
                knight,
                CombatAction::PowerfulAttack { target: ogre },
                &mut dice
            ),
            Err(MechError::ActionNotAvailable { .. })
        ));
    }

    #[test]
    fn area_attack_hits_every_standing_foe() {
        let mut enc = Encounter::new(ProtectionPolicy::OneShot);
        let mage = enc.add(hero("Gandalf", Archetype::Mage, 0), Side::Heroes);
        let a = enc.add(Character::new("Ogro 1", Archetype::Monster), Side::Foes);
        let b = enc.add(Character::new("Ogro 2", Archetype::Monster), Side::Foes);
        let c = enc.add(Character::new("Ogro 3", Archetype::Monster), Side::Foes);
        let ally = enc.add(Character::new("Fiona", Archetype::Princess), Side::Heroes);
        enc.character_mut(c).unwrap().set_life(0);
        let mut dice = scripted([3, 4]);

        let event = resolve_action(&mut enc, mage, CombatAction::AreaAttack, &mut dice).unwrap();
        assert_eq!(event.amount, 7);
        assert_eq!(event.effects.len(), 2);
        assert_eq!(enc.character(a).unwrap().life(), 93);
        assert_eq!(enc.character(b).unwrap().life(), 93);
        assert_eq!(enc.character(ally).unwrap().life(), 100);
    }

    #[test]
    fn heal_buff_and_debuff() {
        let mut enc = Encounter::new(ProtectionPolicy::OneShot);
        let mage = enc.add(Character::new("Gandalf", Archetype::Mage), Side::Heroes);
        let knight = enc.add(
            Character::new("Shereik", Archetype::Knight)
                .with(Attribute::Life, 50)
                .unwrap()
                .with(Attribute::Strength, 40)
                .unwrap(),
            Side::Heroes,
        );
        let witch = enc.add(Character::new("Do71", Archetype::Witch), Side::Foes);
        let mut dice = scripted([9, 5, 7]);

        resolve_action(&mut enc, mage, CombatAction::Heal { target: knight }, &mut dice).unwrap();
        assert_eq!(enc.character(knight).unwrap().life(), 59);

        resolve_action(&mut enc, mage, CombatAction::Buff { target: knight }, &mut dice).unwrap();
        assert_eq!(enc.character(knight).unwrap().strength(), 45);

        resolve_action(&mut enc, witch, CombatAction::Debuff { target: knight }, &mut dice)
            .unwrap();
        assert_eq!(enc.character(knight).unwrap().strength(), 38);
    }

    #[test]
    fn heal_saturates_at_one_hundred() {
        let mut enc = Encounter::new(ProtectionPolicy::OneShot);
        let mage = enc.add(Character::new("Gandalf", Archetype::Mage), Side::Heroes);
        let mut dice = scripted([10]);
        let event =
            resolve_action(&mut enc, mage, CombatAction::Heal { target: mage }, &mut dice)
                .unwrap();
        assert_eq!(event.effects[0].value, 100);
    }

    #[test]
    fn defeated_actor_cannot_act() {
        let mut enc = Encounter::new(ProtectionPolicy::OneShot);
        let a = enc.add(Character::new("Ogro", Archetype::Monster), Side::Foes);
        let b = enc.add(Character::new("Shereik", Archetype::Knight), Side::Heroes);
        enc.character_mut(a).unwrap().set_life(0);
        let mut dice = scripted([1]);
        assert!(matches!(
            resolve_action(&mut enc, a, CombatAction::Attack { target: b }, &mut dice),
            Err(MechError::Defeated(_))
        ));
    }

    #[test]
    fn attacking_self_is_rejected() {
        let mut enc = Encounter::new(ProtectionPolicy::OneShot);
        let a = enc.add(Character::new("Ogro", Archetype::Monster), Side::Foes);
        let mut dice = scripted([1]);
        assert!(matches!(
            resolve_action(&mut enc, a, CombatAction::Attack { target: a }, &mut dice),
            Err(MechError::SelfTarget(0))
        ));
    }

    #[test]
    fn combat_action_display() {
        assert_eq!(CombatAction::Attack { target: 1 }.to_string(), "Attack #1");
        assert_eq!(CombatAction::AreaAttack.to_string(), "Area attack");
        assert_eq!(CombatAction::Protect { ward: 2 }.to_string(), "Protect #2");
    }
}
