//! Table-driven room events for dungeon crawling.
//!
//! Entering a room rolls an entry event and then a discovery. Containers
//! found in a room can be opened for a good, neutral or bad surprise.
//! Darker rooms push every modified roll further in both directions.
//! An unmarked passage skips all of that for a single d100 gamble.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::dice::{DiceResolver, Die};
use crate::error::MechError;

/// How well lit a room is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    /// Fully lit, no modifier.
    Bright,
    /// Half lit.
    Dim,
    /// Pitch black.
    Dark,
    /// A passage on no map. Ends the crawl one way or the other, and most
    /// parties never come back.
    Unmarked,
}

impl RoomKind {
    /// All room kinds, in menu order.
    pub const ALL: [RoomKind; 4] = [
        RoomKind::Bright,
        RoomKind::Dim,
        RoomKind::Dark,
        RoomKind::Unmarked,
    ];

    /// Added to every loot roll made in this room.
    pub fn modifier(self) -> u32 {
        match self {
            Self::Bright | Self::Unmarked => 0,
            Self::Dim => 1,
            Self::Dark => 3,
        }
    }

    /// How far through the labyrinth crossing this room takes the party.
    /// The unmarked passage counts for nothing: its outcome ends the crawl.
    pub fn progress(self) -> u32 {
        match self {
            Self::Bright => 1,
            Self::Dim => 2,
            Self::Dark => 3,
            Self::Unmarked => 0,
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bright => "bright",
            Self::Dim => "dim",
            Self::Dark => "dark",
            Self::Unmarked => "unmarked",
        }
    }
}

impl std::fmt::Display for RoomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoomKind {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| MechError::UnknownRoom(s.to_string()))
    }
}

/// What happens as the party walks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    /// Nothing in the way.
    Clear,
    /// A trap hits everyone.
    Trap {
        /// Life lost by each member.
        damage: u32,
    },
    /// A calm stretch.
    QuietPath,
    /// Weakening gas.
    Gas {
        /// Strength lost by each member.
        weakness: u32,
    },
}

/// Something that can be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    /// A plain box.
    Box,
    /// A table covered in odds and ends.
    Table,
    /// A hole dug in the floor.
    Hole,
    /// A chest at the far wall.
    Chest,
}

impl Container {
    /// The question put to the player.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Box => "The heroes find a box. Open it?",
            Self::Table => "A table holds all sorts of items. Search it?",
            Self::Hole => "Something was buried in a hole in the floor. Dig it up?",
            Self::Chest => "A chest waits at the end of the room. Open it?",
        }
    }
}

/// What the party finds once inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discovery {
    /// A container the party may open.
    Container {
        /// Which one.
        container: Container,
    },
    /// Ogres block the way out.
    Ambush {
        /// How many.
        ogres: u32,
    },
    /// Nothing at all.
    Empty,
}

/// Result of entering a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoomOutcome {
    /// The party fell into the abyss.
    Abyss,
    /// A hidden room, and the witch is home.
    SecretLair,
    /// An ordinary room.
    Explored {
        /// What happened on the way in.
        entry: Entry,
        /// What was found inside.
        discovery: Discovery,
    },
}

impl RoomOutcome {
    /// Returns true if the party did not survive the room.
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::Abyss)
    }
}

/// A room entered and what came of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomReport {
    /// The room chosen.
    pub kind: RoomKind,
    /// What happened.
    pub outcome: RoomOutcome,
}

impl std::fmt::Display for RoomReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.outcome {
            RoomOutcome::Abyss => {
                write!(f, "The party fell into the abyss and everyone perished!")
            }
            RoomOutcome::SecretLair => {
                write!(f, "A secret room... and the witch is waiting. Attack!")
            }
            RoomOutcome::Explored { entry, discovery } => {
                match entry {
                    Entry::Clear => writeln!(f, "The party enters the room without trouble.")?,
                    Entry::Trap { damage } => writeln!(
                        f,
                        "A trap springs in the middle of the path! Everyone takes {damage} damage!"
                    )?,
                    Entry::QuietPath => writeln!(f, "A quiet path, as far as that goes...")?,
                    Entry::Gas { weakness } => writeln!(
                        f,
                        "Weakening gas falls over the group! Everyone loses {weakness} strength!"
                    )?,
                }
                match discovery {
                    Discovery::Container { container } => write!(f, "{}", container.prompt()),
                    Discovery::Ambush { ogres } => write!(
                        f,
                        "Oh no! The room holds {ogres} ogre(s)! You must fight your way out!"
                    ),
                    Discovery::Empty => write!(f, "The room is empty... Luck? Maybe."),
                }
            }
        }
    }
}

/// What came out of an opened container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Loot {
    /// Rations: life restored.
    Food {
        /// Life gained.
        heal: u32,
    },
    /// A tonic: strength raised.
    Tonic {
        /// Strength gained.
        strength: u32,
    },
    /// Healing potions.
    Potions {
        /// Life gained.
        heal: u32,
    },
    /// A magic charm: strength raised.
    Charm {
        /// Strength gained.
        strength: u32,
    },
    /// Dust and cobwebs.
    Nothing,
    /// A foul stench.
    Stench {
        /// Life lost.
        damage: u32,
    },
    /// A hidden trap.
    Trap {
        /// Life lost.
        damage: u32,
    },
    /// A curse: strength drained.
    Curse {
        /// Strength lost.
        weakness: u32,
    },
    /// A hostile spell: strength drained.
    Spell {
        /// Strength lost.
        weakness: u32,
    },
}

impl Loot {
    /// Returns true for loot that helps the party.
    pub fn is_good(self) -> bool {
        matches!(
            self,
            Self::Food { .. } | Self::Tonic { .. } | Self::Potions { .. } | Self::Charm { .. }
        )
    }

    /// Life and strength deltas applied to each party member.
    pub fn deltas(self) -> (i64, i64) {
        match self {
            Self::Food { heal } | Self::Potions { heal } => (i64::from(heal), 0),
            Self::Tonic { strength } | Self::Charm { strength } => (0, i64::from(strength)),
            Self::Nothing => (0, 0),
            Self::Stench { damage } | Self::Trap { damage } => (-i64::from(damage), 0),
            Self::Curse { weakness } | Self::Spell { weakness } => (0, -i64::from(weakness)),
        }
    }
}

impl std::fmt::Display for Loot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Food { heal } => write!(f, "Food! Everyone recovers {heal} life."),
            Self::Tonic { strength } => write!(f, "A tonic! Everyone gains {strength} strength."),
            Self::Potions { heal } => write!(f, "Potions! Everyone recovers {heal} life."),
            Self::Charm { strength } => {
                write!(f, "A magic charm! Everyone gains {strength} strength.")
            }
            Self::Nothing => write!(f, "Nothing useful here."),
            Self::Stench { damage } => {
                write!(f, "A horrible stench! Everyone takes {damage} damage.")
            }
            Self::Trap { damage } => write!(f, "It was a trap! Everyone takes {damage} damage."),
            Self::Curse { weakness } => write!(f, "A curse! Everyone loses {weakness} strength."),
            Self::Spell { weakness } => {
                write!(f, "A hostile spell! Everyone loses {weakness} strength.")
            }
        }
    }
}

/// Enter a room and apply its entry event to the party.
///
/// The unmarked passage rolls a d100: up to 95 is the abyss, above that
/// the witch's secret lair. Every other room rolls a d4 entry event and a
/// d6 discovery.
pub fn enter_room(kind: RoomKind, party: &mut [Character], dice: &mut DiceResolver) -> RoomReport {
    if kind == RoomKind::Unmarked {
        let roll = dice.roll(Die::D100);
        let outcome = if roll <= 95 {
            RoomOutcome::Abyss
        } else {
            RoomOutcome::SecretLair
        };
        tracing::debug!(%kind, roll, ?outcome, "unmarked passage");
        return RoomReport { kind, outcome };
    }

    let entry = match dice.roll(Die::D4) {
        1 => Entry::Clear,
        2 => {
            let damage = dice.roll(Die::D10);
            hit_all(party, -i64::from(damage), 0);
            Entry::Trap { damage }
        }
        3 => Entry::QuietPath,
        _ => {
            let weakness = dice.roll(Die::D8);
            hit_all(party, 0, -i64::from(weakness));
            Entry::Gas { weakness }
        }
    };

    let discovery = match dice.roll(Die::D6) {
        1 => Discovery::Container {
            container: Container::Box,
        },
        2 => Discovery::Container {
            container: Container::Table,
        },
        3 => Discovery::Container {
            container: Container::Hole,
        },
        4 => Discovery::Container {
            container: Container::Chest,
        },
        5 => Discovery::Ambush {
            ogres: dice.roll(Die::D4),
        },
        _ => Discovery::Empty,
    };

    let outcome = RoomOutcome::Explored { entry, discovery };
    tracing::debug!(%kind, ?outcome, "room entered");
    RoomReport { kind, outcome }
}

/// Open a container and apply what is inside to every party member.
///
/// A d100 picks the table (up to 33 good, up to 67 neutral, bad above),
/// then a d4 picks the entry. Every amount includes the room modifier.
pub fn open_container(kind: RoomKind, party: &mut [Character], dice: &mut DiceResolver) -> Loot {
    let modifier = kind.modifier();
    let table = dice.roll(Die::D100);
    let loot = if table <= 33 {
        match dice.roll(Die::D4) {
            1 => Loot::Food {
                heal: dice.roll(Die::D6) + modifier,
            },
            2 => Loot::Tonic {
                strength: dice.roll(Die::D2) + modifier,
            },
            3 => Loot::Potions {
                heal: dice.roll(Die::D10) + modifier,
            },
            _ => Loot::Charm {
                strength: dice.roll(Die::D8) + modifier,
            },
        }
    } else if table <= 67 {
        Loot::Nothing
    } else {
        match dice.roll(Die::D4) {
            1 => Loot::Stench {
                damage: dice.roll(Die::D8) + modifier,
            },
            2 => Loot::Trap {
                damage: dice.roll(Die::D6) + modifier,
            },
            3 => Loot::Curse {
                weakness: dice.roll(Die::D4) + modifier,
            },
            _ => Loot::Spell {
                weakness: dice.roll(Die::D10) + modifier,
            },
        }
    };

    let (life, strength) = loot.deltas();
    hit_all(party, life, strength);
    tracing::debug!(%kind, table, ?loot, "container opened");
    loot
}

/// A remark for a party that walks past a container.
pub fn decline_remark(dice: &mut DiceResolver) -> &'static str {
    match dice.roll(Die::D4) {
        1 => "On to the next room, then...",
        2 => "Aw... I was curious. Spoilsport!",
        3 => "I love the smell of an ignored chance to explore in the morning.",
        _ => "You have a real talent for skipping the most interesting parts of an adventure.",
    }
}

fn hit_all(party: &mut [Character], life: i64, strength: i64) {
    for member in party.iter_mut() {
        if life != 0 {
            member.set_life(i64::from(member.life()) + life);
        }
        if strength != 0 {
            member.set_strength(i64::from(member.strength()) + strength);
        }
    }
}
