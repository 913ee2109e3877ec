use colored::Colorize;

use crate::content;

pub fn run() -> Result<(), String> {
    let graph = content::story().map_err(|e| e.to_string())?;
    let defects = graph.validate(content::INTRO);

    for scene in graph.unreachable_from(content::INTRO) {
        println!("  {} scene {scene} is unreachable", "warning:".yellow());
    }
    for defect in &defects {
        println!("  {} {defect}", "error:".red());
    }

    if defects.is_empty() {
        println!(
            "  {} {} scenes, no broken references",
            "ok".green().bold(),
            graph.len()
        );
        Ok(())
    } else {
        Err(format!("story graph has {} defect(s)", defects.len()))
    }
}
