use colored::Colorize;
use serde::Serialize;

use ex_mechanics::{Character, CombatEvent, DuelOutcome, Encounter, Side};

use crate::GlobalArgs;
use crate::terminal::party_table;

/// JSON shape of `duel --json`.
#[derive(Serialize)]
struct DuelReport {
    winner: String,
    loser: String,
    outcome: DuelOutcome,
    fighters: Vec<Character>,
    log: Vec<CombatEvent>,
}

pub fn run(global: &GlobalArgs, first: &str, second: &str, json: bool) -> Result<(), String> {
    let (first, second) = super::contenders(first, second)?;
    let config = super::game_config(global);
    let mut dice = config.dice();

    let mut encounter = Encounter::new(config.protection);
    let a = encounter.add(first, Side::Heroes);
    let b = encounter.add(second, Side::Foes);

    let outcome = encounter
        .duel(a, b, &mut dice)
        .map_err(|e| e.to_string())?;
    let log = encounter.log().to_vec();
    let fighters = encounter.into_characters();
    let winner = fighters[outcome.winner].name.clone();
    let loser = fighters[outcome.loser].name.clone();

    if json {
        let report = DuelReport {
            winner,
            loser,
            outcome,
            fighters,
            log,
        };
        let out = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "  {} vs {}\n",
        fighters[a].to_string().bold(),
        fighters[b].to_string().bold()
    );
    let mut round = 0;
    for event in &log {
        if event.round != round {
            round = event.round;
            println!("{}", format!("-- Round {round} --").dimmed());
        }
        println!("  {}", event.description);
    }
    println!(
        "\n  {} wins after {} round(s)!",
        winner.green().bold(),
        outcome.rounds
    );
    println!("{}", party_table(&fighters));
    Ok(())
}
