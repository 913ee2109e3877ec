//! Canned small talk between characters.
//!
//! Each speaking archetype answers a fixed set of greetings. Anything off
//! script, and anything said to a monster, gets [`FALLBACK`].

use serde::{Deserialize, Serialize};

use crate::character::{Archetype, Character};

/// The greetings every speaking archetype understands.
pub const GREETINGS: [&str; 5] = [
    "Hello!",
    "How are you?",
    "Fine, and you?",
    "See you later!",
    "Bye!",
];

/// The answer to anything off script.
pub const FALLBACK: &str = "I can't say.";

/// Upper bound on exchanges in one conversation.
///
/// Some tables loop ("Bye!" answered by "Bye!"), so a conversation stops
/// here even when nobody runs out of lines.
pub const MAX_EXCHANGES: usize = 8;

/// One line of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Who said it.
    pub speaker: String,
    /// What they said.
    pub text: String,
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} says: {}", self.speaker, self.text)
    }
}

/// How an archetype answers `line`.
pub fn respond(archetype: Archetype, line: &str) -> &'static str {
    let table: &[&str; 5] = match archetype {
        Archetype::Knight => &[
            "How do you do, noble friend?",
            "Very well, and how fares your lordship?",
            "I am doing very well indeed!",
            "Until next time!",
            "See you later!",
        ],
        Archetype::Villager => &[
            "Doing fine, and you?",
            "None of your business!",
            "Then drop it!",
            "Take care!",
            "Don't care!",
        ],
        Archetype::Mage | Archetype::Witch | Archetype::Princess => &[
            "How are you?",
            "Fine, and you?",
            "I'm great!",
            "See you!",
            "Bye!",
        ],
        Archetype::Monster | Archetype::Dragon => return FALLBACK,
    };
    GREETINGS
        .iter()
        .position(|g| *g == line)
        .map_or(FALLBACK, |i| table[i])
}

/// Let `a` open with `opening` and trade lines with `b`.
///
/// Stops once either side answers [`FALLBACK`] or after
/// [`MAX_EXCHANGES`] exchanges.
pub fn converse(a: &Character, b: &Character, opening: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut mine = opening.to_string();

    for _ in 0..MAX_EXCHANGES {
        lines.push(line(a, &mine));
        let theirs = respond(b.archetype, &mine);
        lines.push(line(b, theirs));
        let next = respond(a.archetype, theirs);
        if theirs == FALLBACK || next == FALLBACK {
            break;
        }
        mine = next.to_string();
    }

    tracing::debug!(a = %a.name, b = %b.name, lines = lines.len(), "conversation");
    lines
}

/// Whether `speaker` answered every line in `lines` without falling back.
///
/// A speaker who never got a word in counts as not won over.
pub fn stayed_on_script(lines: &[Line], speaker: &str) -> bool {
    let mut theirs = lines.iter().filter(|l| l.speaker == speaker).peekable();
    theirs.peek().is_some() && theirs.all(|l| l.text != FALLBACK)
}

fn line(speaker: &Character, text: &str) -> Line {
    Line {
        speaker: speaker.name.clone(),
        text: text.to_string(),
    }
}
