use colored::Colorize;

use ex_story::{Ending, NarrativeEngine};

use crate::GlobalArgs;
use crate::battle::BattleHook;
use crate::content;
use crate::terminal::{StdinReader, TerminalRenderer};

pub fn run(global: &GlobalArgs) -> Result<(), String> {
    let graph = content::story().map_err(|e| format!("failed to build story: {e}"))?;
    let config = super::game_config(global);
    let mut hook = BattleHook::new(config.dice(), config.protection)
        .map_err(|e| format!("failed to assemble party: {e}"))?;

    println!("  {} Exandria", "Welcome to".bold());
    println!("  Type the number of a choice and press enter.\n");

    let mut engine = NarrativeEngine::new(&graph, config);
    let ending = engine
        .run(&mut TerminalRenderer, &mut StdinReader, &mut hook)
        .map_err(|e| e.to_string())?;

    if let Ending::InputClosed(_) = ending {
        println!("{}", "Until next time, adventurer.".dimmed());
    }
    Ok(())
}
