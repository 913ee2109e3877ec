//! Runs the story's battles, the labyrinth crawl and the parley with the
//! witch.
//!
//! Heroes act in party order, then foes. Each combatant picks an action
//! from its archetype: mages heal or blast, knights shield the princess,
//! witches alternate curses and hexes, dragons breathe fire.

use colored::Colorize;

use ex_mechanics::dialogue;
use ex_mechanics::encounter::Participant;
use ex_mechanics::events::{self, Discovery, RoomKind, RoomOutcome};
use ex_mechanics::{
    Archetype, Character, CombatAction, DiceResolver, Encounter, MechResult, ProtectionPolicy,
    Side,
};
use ex_story::{
    BattleOutcome, EncounterHook, InputReader, StoryError, StoryResult, parse_selection,
};

use crate::content::{self, battles};
use crate::terminal::party_table;

/// Length of the labyrinth. The way out lies beyond it.
const LABYRINTH_PATHS: u32 = 15;

/// Safety net for fights where healing outpaces damage.
const MAX_ROUNDS: u32 = 100;

/// Owns the party and the dice between scenes.
pub struct BattleHook {
    party: Vec<Character>,
    dice: DiceResolver,
    policy: ProtectionPolicy,
    /// Print the party table after each fight.
    show_party: bool,
}

impl BattleHook {
    pub fn new(dice: DiceResolver, policy: ProtectionPolicy) -> MechResult<Self> {
        Ok(Self {
            party: content::starting_party()?,
            dice,
            policy,
            show_party: true,
        })
    }

    #[cfg(test)]
    fn quiet(mut self) -> Self {
        self.show_party = false;
        self
    }

    /// Fight `foes` with the whole party. Survivors carry their wounds.
    fn fight(&mut self, foes: Vec<Character>) -> StoryResult<BattleOutcome> {
        let mut encounter = Encounter::new(self.policy);
        let heroes = self.party.len();
        for hero in self.party.drain(..) {
            encounter.add(hero, Side::Heroes);
        }
        for foe in foes {
            encounter.add(foe, Side::Foes);
        }

        let outcome = loop {
            if encounter.side_defeated(Side::Foes) {
                break BattleOutcome::Victory;
            }
            if encounter.side_defeated(Side::Heroes) || encounter.round() >= MAX_ROUNDS {
                break BattleOutcome::Defeat;
            }
            let round = encounter.next_round();
            println!("{}", format!("-- Round {round} --").bold());
            for actor in 0..encounter.participants().len() {
                if encounter.side_defeated(Side::Foes) || encounter.side_defeated(Side::Heroes) {
                    break;
                }
                if !encounter.character(actor)?.is_alive() {
                    continue;
                }
                let Some(action) = choose_action(&encounter, actor, round) else {
                    continue;
                };
                let event = encounter.perform(actor, action, &mut self.dice)?;
                println!("  {}", event.description);
            }
        };

        self.party = encounter.into_characters().into_iter().take(heroes).collect();

        match outcome {
            BattleOutcome::Victory => println!("\n{}", "Victory!".green().bold()),
            BattleOutcome::Defeat => println!("\n{}", "The party has fallen...".red().bold()),
        }
        if self.show_party {
            println!("{}", party_table(&self.party));
        }
        Ok(outcome)
    }

    /// Walk rooms until the party is through, dead, or in the witch's lair.
    fn labyrinth(&mut self, input: &mut dyn InputReader) -> StoryResult<BattleOutcome> {
        let mut progress = 0;
        while progress <= LABYRINTH_PATHS {
            let kind = choose_room(input)?;
            progress += kind.progress();
            let report = events::enter_room(kind, &mut self.party, &mut self.dice);
            println!("{report}");

            match report.outcome {
                RoomOutcome::Abyss => return Ok(BattleOutcome::Defeat),
                RoomOutcome::SecretLair => return Ok(BattleOutcome::Victory),
                RoomOutcome::Explored { discovery, .. } => match discovery {
                    Discovery::Container { .. } => {
                        if confirm(input)? {
                            let loot = events::open_container(kind, &mut self.party, &mut self.dice);
                            println!("{loot}");
                        } else {
                            println!("{}", events::decline_remark(&mut self.dice));
                        }
                    }
                    Discovery::Ambush { ogres } => {
                        if self.fight(content::ogres(ogres)?)? == BattleOutcome::Defeat {
                            return Ok(BattleOutcome::Defeat);
                        }
                    }
                    Discovery::Empty => {}
                },
            }

            if self.party.iter().all(|c| !c.is_alive()) {
                return Ok(BattleOutcome::Defeat);
            }
        }
        println!("{}", "At last, the way out of the labyrinth!".green());
        Ok(BattleOutcome::Victory)
    }

    /// Talk instead of fight. The witch stands down only if she never loses
    /// the thread of the conversation.
    fn parley(&mut self, input: &mut dyn InputReader) -> StoryResult<BattleOutcome> {
        let opening = choose_opening(input)?;
        let speaker = match self.party.iter().find(|c| c.is_alive()) {
            Some(hero) => hero.clone(),
            None => content::champion(Archetype::Knight)?,
        };
        let witch = content::champion(Archetype::Witch)?;

        let lines = dialogue::converse(&speaker, &witch, opening);
        for line in &lines {
            println!("  {line}");
        }
        if dialogue::stayed_on_script(&lines, &witch.name) {
            Ok(BattleOutcome::Victory)
        } else {
            println!("\n{}", "The witch has heard enough.".red().bold());
            Ok(BattleOutcome::Defeat)
        }
    }
}

impl EncounterHook for BattleHook {
    fn run_battle(
        &mut self,
        encounter: &str,
        input: &mut dyn InputReader,
    ) -> StoryResult<BattleOutcome> {
        match encounter {
            battles::FOREST_OGRES => {
                // First battle of a run: a fresh party sets out.
                self.party = content::starting_party()?;
                self.fight(content::ogres(2)?)
            }
            battles::LABYRINTH => self.labyrinth(input),
            battles::WITCH_PARLEY => self.parley(input),
            battles::WITCH => self.fight(vec![content::champion(Archetype::Witch)?]),
            battles::WITCH_SURPRISED => {
                let mut witch = content::champion(Archetype::Witch)?;
                witch.set_life(60);
                self.fight(vec![witch])
            }
            battles::DRAGON => self.fight(vec![content::champion(Archetype::Dragon)?]),
            other => Err(StoryError::UnknownEncounter(other.to_string())),
        }
    }
}

/// Ask which room to enter. Closed input walks into the bright room.
fn choose_room(input: &mut dyn InputReader) -> StoryResult<RoomKind> {
    loop {
        println!(
            "\nChoose a room: ({}) bright || ({}) dim || ({}) dark || ({}) unmarked passage",
            "1".cyan(),
            "2".cyan(),
            "3".cyan(),
            "4".cyan()
        );
        let Some(line) = input.next_line()? else {
            return Ok(RoomKind::Bright);
        };
        let line = line.trim();
        let kind = match line {
            "1" => Some(RoomKind::Bright),
            "2" => Some(RoomKind::Dim),
            "3" => Some(RoomKind::Dark),
            "4" => Some(RoomKind::Unmarked),
            other => other.parse().ok(),
        };
        match kind {
            Some(kind) => return Ok(kind),
            None => println!("{}", format!("There is no room '{line}'.").yellow()),
        }
    }
}

/// Ask how to open a conversation. Closed input opens with a plain greeting.
fn choose_opening(input: &mut dyn InputReader) -> StoryResult<&'static str> {
    loop {
        println!("\nWhat do you say?");
        for (i, greeting) in dialogue::GREETINGS.iter().enumerate() {
            println!("  {}: {greeting}", (i + 1).to_string().cyan());
        }
        let Some(line) = input.next_line()? else {
            return Ok(dialogue::GREETINGS[0]);
        };
        match parse_selection(&line, dialogue::GREETINGS.len()) {
            Ok(index) => return Ok(dialogue::GREETINGS[index]),
            Err(_) => println!(
                "{}",
                format!("'{}' is not something you can say.", line.trim()).yellow()
            ),
        }
    }
}

/// Ask whether to open a container. Closed input declines.
fn confirm(input: &mut dyn InputReader) -> StoryResult<bool> {
    loop {
        println!("(y/n)");
        let Some(line) = input.next_line()? else {
            return Ok(false);
        };
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!(
                "{}",
                "This is not a quantum adventure! There are only TWO options!".yellow()
            ),
        }
    }
}

/// Pick what `actor` does this round, or `None` if there is nothing to do.
fn choose_action(encounter: &Encounter, actor: usize, round: u32) -> Option<CombatAction> {
    let participants = encounter.participants();
    let me = &participants[actor];
    let weakest_foe = standing(participants, me.side.opposite())
        .min_by_key(|(_, p)| p.character.life())
        .map(|(i, _)| i)?;
    let foes_standing = standing(participants, me.side.opposite()).count();

    let action = match me.character.archetype {
        Archetype::Mage => {
            let hurt_ally = standing(participants, me.side)
                .filter(|(_, p)| p.character.life() < 50)
                .min_by_key(|(_, p)| p.character.life())
                .map(|(i, _)| i);
            match hurt_ally {
                Some(target) => CombatAction::Heal { target },
                None if foes_standing > 1 => CombatAction::AreaAttack,
                None => CombatAction::Attack {
                    target: weakest_foe,
                },
            }
        }
        Archetype::Knight => {
            let ward = standing(participants, me.side)
                .find(|(i, p)| {
                    *i != actor
                        && p.character.archetype == Archetype::Princess
                        && !encounter.is_protected(*i)
                })
                .map(|(i, _)| i);
            match ward {
                Some(ward) if round == 1 => CombatAction::Protect { ward },
                _ => CombatAction::Attack {
                    target: weakest_foe,
                },
            }
        }
        Archetype::Witch if round % 2 == 0 => {
            let strongest = standing(participants, me.side.opposite())
                .max_by_key(|(_, p)| p.character.strength())
                .map_or(weakest_foe, |(i, _)| i);
            CombatAction::Debuff { target: strongest }
        }
        Archetype::Witch | Archetype::Dragon => CombatAction::PowerfulAttack {
            target: weakest_foe,
        },
        Archetype::Princess | Archetype::Villager | Archetype::Monster => CombatAction::Attack {
            target: weakest_foe,
        },
    };
    Some(action)
}

/// Living participants on `side`, with their indices.
fn standing(
    participants: &[Participant],
    side: Side,
) -> impl Iterator<Item = (usize, &Participant)> {
    participants
        .iter()
        .enumerate()
        .filter(move |(_, p)| p.side == side && p.character.is_alive())
}
