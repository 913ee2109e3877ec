use colored::Colorize;

use ex_mechanics::{DicePool, Die};

use crate::GlobalArgs;

pub fn run(global: &GlobalArgs, die: &str, count: u32, json: bool) -> Result<(), String> {
    let die: Die = die.parse().map_err(|_| {
        format!("unknown die '{die}' (expected one of d2, d4, d6, d8, d10, d12, d20, d100)")
    })?;
    if count == 0 {
        return Err("count must be at least 1".into());
    }

    let mut dice = super::game_config(global).dice();
    let pool = DicePool::new().add(die, count);
    let result = dice.roll_pool(&pool);

    if json {
        let out = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        println!("  {} {result}", format!("{pool}:").bold());
    }
    Ok(())
}
