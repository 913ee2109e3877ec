//! Archetype combat patterns: which dice each archetype rolls for what.

use crate::character::Archetype;
use crate::dice::{DicePool, Die};

/// The die added to strength for a basic attack.
pub fn base_attack_die(archetype: Archetype) -> Die {
    match archetype {
        Archetype::Knight | Archetype::Witch => Die::D8,
        Archetype::Mage | Archetype::Monster => Die::D6,
        Archetype::Dragon => Die::D10,
        Archetype::Princess | Archetype::Villager => Die::D4,
    }
}

/// Dice summed for a powerful single-target attack, if the archetype has one.
pub fn powerful_attack_pool(archetype: Archetype) -> Option<DicePool> {
    match archetype {
        Archetype::Witch => Some(DicePool::new().add(Die::D10, 2)),
        Archetype::Dragon => Some(DicePool::new().add(Die::D12, 2)),
        _ => None,
    }
}

/// Dice summed for an attack that hits every opponent.
pub fn area_attack_pool(archetype: Archetype) -> Option<DicePool> {
    match archetype {
        Archetype::Mage => Some(DicePool::new().add(Die::D10, 2)),
        _ => None,
    }
}

/// Share of redirected damage, in percent, when this archetype protects someone.
pub fn protection_percent(archetype: Archetype) -> u32 {
    match archetype {
        Archetype::Knight => 90,
        Archetype::Dragon => 80,
        Archetype::Villager => 70,
        _ => 60,
    }
}

/// Die rolled to restore life.
pub fn heal_die(archetype: Archetype) -> Option<Die> {
    match archetype {
        Archetype::Mage => Some(Die::D10),
        _ => None,
    }
}

/// Die rolled to raise strength.
pub fn buff_die(archetype: Archetype) -> Option<Die> {
    match archetype {
        Archetype::Mage => Some(Die::D6),
        _ => None,
    }
}

/// Die rolled to lower strength.
pub fn debuff_die(archetype: Archetype) -> Option<Die> {
    match archetype {
        Archetype::Witch => Some(Die::D8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powerful_attacks_use_two_larger_dice() {
        for archetype in Archetype::ALL {
            if let Some(pool) = powerful_attack_pool(archetype) {
                assert_eq!(pool.len(), 2);
                let base = base_attack_die(archetype).sides();
                assert!(pool.dice.iter().all(|d| d.sides() > base));
            }
        }
        assert!(powerful_attack_pool(Archetype::Knight).is_none());
    }

    #[test]
    fn protection_range() {
        for archetype in Archetype::ALL {
            let pct = protection_percent(archetype);
            assert!((60..=90).contains(&pct));
        }
        assert_eq!(protection_percent(Archetype::Knight), 90);
        assert_eq!(protection_percent(Archetype::Mage), 60);
    }

    #[test]
    fn only_casters_heal_and_curse() {
        assert_eq!(heal_die(Archetype::Mage), Some(Die::D10));
        assert_eq!(buff_die(Archetype::Mage), Some(Die::D6));
        assert_eq!(debuff_die(Archetype::Witch), Some(Die::D8));
        assert!(heal_die(Archetype::Knight).is_none());
        assert!(area_attack_pool(Archetype::Dragon).is_none());
    }
}
