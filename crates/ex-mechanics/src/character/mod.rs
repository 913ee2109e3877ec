//! Characters: a name, an archetype, and that archetype's attributes.
//!
//! Every archetype has life and strength; each adds its own attributes on
//! top. All attributes start at 100 and are clamped to `[0, 100]` on every
//! write, so out-of-range values are never an error.

pub mod stat;

pub use stat::Stat;

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// A named character attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Hit points; zero means defeated.
    Life,
    /// Added to every attack.
    Strength,
    /// Knight.
    Courage,
    /// Knight.
    Armor,
    /// Princess.
    Intelligence,
    /// Princess.
    Beauty,
    /// Princess.
    Wealth,
    /// Mage and witch.
    Magic,
    /// Villager.
    Loyalty,
    /// Villager.
    Honesty,
    /// Monsters, dragons included.
    Friendliness,
    /// Dragon.
    FirePower,
}

impl Attribute {
    /// Snake-case name used for display and parsing.
    pub fn name(self) -> &'static str {
        match self {
            Self::Life => "life",
            Self::Strength => "strength",
            Self::Courage => "courage",
            Self::Armor => "armor",
            Self::Intelligence => "intelligence",
            Self::Beauty => "beauty",
            Self::Wealth => "wealth",
            Self::Magic => "magic",
            Self::Loyalty => "loyalty",
            Self::Honesty => "honesty",
            Self::Friendliness => "friendliness",
            Self::FirePower => "fire_power",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The category of a character, which fixes its attributes and actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Armored melee fighter and best protector.
    Knight,
    /// Healer and area caster.
    Mage,
    /// Curse caster with a powerful attack.
    Witch,
    /// Noble with no combat specialty.
    Princess,
    /// Common folk.
    Villager,
    /// Generic foe (ogres and the like).
    Monster,
    /// Fire-breathing monster.
    Dragon,
}

impl Archetype {
    /// All archetypes.
    pub const ALL: [Archetype; 7] = [
        Archetype::Knight,
        Archetype::Mage,
        Archetype::Witch,
        Archetype::Princess,
        Archetype::Villager,
        Archetype::Monster,
        Archetype::Dragon,
    ];

    /// The attributes a character of this archetype carries.
    pub fn attributes(self) -> &'static [Attribute] {
        use Attribute::*;
        match self {
            Self::Knight => &[Life, Strength, Courage, Armor],
            Self::Mage | Self::Witch => &[Life, Strength, Magic],
            Self::Princess => &[Life, Strength, Intelligence, Beauty, Wealth],
            Self::Villager => &[Life, Strength, Loyalty, Honesty],
            Self::Monster => &[Life, Strength, Friendliness],
            Self::Dragon => &[Life, Strength, Friendliness, FirePower],
        }
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Knight => "knight",
            Self::Mage => "mage",
            Self::Witch => "witch",
            Self::Princess => "princess",
            Self::Villager => "villager",
            Self::Monster => "monster",
            Self::Dragon => "dragon",
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Archetype {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == lower)
            .ok_or_else(|| MechError::UnknownArchetype(s.to_string()))
    }
}

/// A character taking part in the story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name.
    pub name: String,
    /// The archetype tag.
    pub archetype: Archetype,
    stats: BTreeMap<Attribute, Stat>,
}

impl Character {
    /// Create a character with every archetype attribute at 100.
    pub fn new(name: impl Into<String>, archetype: Archetype) -> Self {
        let stats = archetype
            .attributes()
            .iter()
            .map(|&attr| (attr, Stat::full()))
            .collect();
        Self {
            name: name.into(),
            archetype,
            stats,
        }
    }

    /// Builder-style attribute override, clamped like [`Character::set`].
    pub fn with(mut self, attribute: Attribute, value: i64) -> MechResult<Self> {
        self.set(attribute, value)?;
        Ok(self)
    }

    /// Returns true if this archetype carries `attribute`.
    pub fn has(&self, attribute: Attribute) -> bool {
        self.stats.contains_key(&attribute)
    }

    /// Current value of an attribute.
    pub fn get(&self, attribute: Attribute) -> MechResult<u8> {
        self.stats
            .get(&attribute)
            .map(|s| s.value())
            .ok_or_else(|| unknown(self.archetype, attribute))
    }

    /// Store `clamp(value, 0, 100)`. Returns the stored value.
    pub fn set(&mut self, attribute: Attribute, value: i64) -> MechResult<u8> {
        let archetype = self.archetype;
        let stat = self
            .stats
            .get_mut(&attribute)
            .ok_or_else(|| unknown(archetype, attribute))?;
        Ok(stat.set(value))
    }

    /// Add `delta` to an attribute, clamping. Returns the new value.
    pub fn adjust(&mut self, attribute: Attribute, delta: i64) -> MechResult<u8> {
        let archetype = self.archetype;
        let stat = self
            .stats
            .get_mut(&attribute)
            .ok_or_else(|| unknown(archetype, attribute))?;
        Ok(stat.adjust(delta))
    }

    /// Current life.
    pub fn life(&self) -> u8 {
        self.core(Attribute::Life)
    }

    /// Current strength.
    pub fn strength(&self) -> u8 {
        self.core(Attribute::Strength)
    }

    /// Set life, clamping.
    pub fn set_life(&mut self, value: i64) -> u8 {
        self.core_mut(Attribute::Life).set(value)
    }

    /// Set strength, clamping.
    pub fn set_strength(&mut self, value: i64) -> u8 {
        self.core_mut(Attribute::Strength).set(value)
    }

    /// Returns true while life is above zero.
    pub fn is_alive(&self) -> bool {
        self.life() > 0
    }

    /// Attribute/value pairs in a stable order.
    pub fn attributes(&self) -> impl Iterator<Item = (Attribute, u8)> + '_ {
        self.stats.iter().map(|(&a, s)| (a, s.value()))
    }

    fn core(&self, attribute: Attribute) -> u8 {
        self.stats.get(&attribute).map_or(0, |s| s.value())
    }

    fn core_mut(&mut self, attribute: Attribute) -> &mut Stat {
        // Life and strength are part of every archetype.
        self.stats.entry(attribute).or_default()
    }
}

fn unknown(archetype: Archetype, attribute: Attribute) -> MechError {
    MechError::UnknownAttribute {
        archetype: archetype.to_string(),
        attribute: attribute.to_string(),
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} the {} (life {}, strength {})",
            self.name,
            self.archetype,
            self.life(),
            self.strength()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_starts_full() {
        for archetype in Archetype::ALL {
            let c = Character::new("Test", archetype);
            for &attr in archetype.attributes() {
                assert_eq!(c.get(attr).unwrap(), 100, "{archetype} {attr}");
            }
            assert!(c.is_alive());
        }
    }

    #[test]
    fn every_archetype_has_life_and_strength() {
        for archetype in Archetype::ALL {
            let attrs = archetype.attributes();
            assert!(attrs.contains(&Attribute::Life));
            assert!(attrs.contains(&Attribute::Strength));
        }
    }

    #[test]
    fn archetype_specific_attributes() {
        let knight = Character::new("Shereik", Archetype::Knight);
        assert!(knight.has(Attribute::Armor));
        assert!(knight.has(Attribute::Courage));
        assert!(!knight.has(Attribute::Magic));

        let dragon = Character::new("Granamir", Archetype::Dragon);
        assert!(dragon.has(Attribute::FirePower));
        assert!(dragon.has(Attribute::Friendliness));

        let princess = Character::new("Fiona", Archetype::Princess);
        assert!(princess.has(Attribute::Wealth));
    }

    #[test]
    fn setters_clamp() {
        let mut c = Character::new("Gandalf", Archetype::Mage);
        assert_eq!(c.set(Attribute::Magic, -20).unwrap(), 0);
        assert_eq!(c.set(Attribute::Magic, 55).unwrap(), 55);
        assert_eq!(c.set(Attribute::Magic, 180).unwrap(), 100);
        assert_eq!(c.set_life(-1), 0);
        assert!(!c.is_alive());
        assert_eq!(c.set_strength(101), 100);
    }

    #[test]
    fn adjust_clamps() {
        let mut c = Character::new("Tiago", Archetype::Villager);
        assert_eq!(c.adjust(Attribute::Life, -30).unwrap(), 70);
        assert_eq!(c.adjust(Attribute::Life, 50).unwrap(), 100);
    }

    #[test]
    fn unknown_attribute_is_an_error() {
        let mut c = Character::new("Ogro", Archetype::Monster);
        assert!(matches!(
            c.get(Attribute::Armor),
            Err(MechError::UnknownAttribute { .. })
        ));
        assert!(c.set(Attribute::Magic, 10).is_err());
    }

    #[test]
    fn with_builder() {
        let c = Character::new("Shereik", Archetype::Knight)
            .with(Attribute::Strength, 10)
            .unwrap();
        assert_eq!(c.strength(), 10);
    }

    #[test]
    fn archetype_from_str() {
        assert_eq!("Knight".parse::<Archetype>().unwrap(), Archetype::Knight);
        assert_eq!(" dragon ".parse::<Archetype>().unwrap(), Archetype::Dragon);
        assert!("paladin".parse::<Archetype>().is_err());
    }

    #[test]
    fn display() {
        let c = Character::new("Fiona", Archetype::Princess);
        assert_eq!(c.to_string(), "Fiona the princess (life 100, strength 100)");
    }

    #[test]
    fn serializes_attributes_by_name() {
        let c = Character::new("Do71", Archetype::Witch);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["archetype"], "witch");
        assert_eq!(json["stats"]["magic"], 100);
    }

    proptest! {
        #[test]
        fn any_write_stays_in_range(
            idx in 0usize..7,
            value in any::<i64>(),
        ) {
            let archetype = Archetype::ALL[idx];
            let mut c = Character::new("P", archetype);
            for &attr in archetype.attributes() {
                let stored = c.set(attr, value).unwrap();
                prop_assert!(stored <= 100);
                prop_assert_eq!(c.get(attr).unwrap(), stored);
            }
        }
    }
}
