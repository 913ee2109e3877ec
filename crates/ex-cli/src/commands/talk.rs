use colored::Colorize;
use serde::Serialize;

use ex_mechanics::dialogue::{self, Line};

/// JSON shape of `talk --json`.
#[derive(Serialize)]
struct TalkReport {
    lines: Vec<Line>,
    won_over: bool,
}

pub fn run(first: &str, second: &str, opening: &str, json: bool) -> Result<(), String> {
    let (a, b) = super::contenders(first, second)?;
    let lines = dialogue::converse(&a, &b, opening);
    let won_over = dialogue::stayed_on_script(&lines, &b.name);

    if json {
        let report = TalkReport { lines, won_over };
        let out = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    for line in &lines {
        println!("  {line}");
    }
    if won_over {
        println!("\n  {} kept the conversation going.", b.name.green().bold());
    } else {
        println!("\n  {} had nothing more to say.", b.name.yellow().bold());
    }
    Ok(())
}
