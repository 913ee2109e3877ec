//! Terminal adapters for the story engine.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use ex_mechanics::{Attribute, Character};
use ex_story::{InputReader, Renderer, Scene, StoryResult};

use crate::content;

/// Prints scenes to stdout.
pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn render_scene(&mut self, scene: &Scene) {
        if let Some(art) = scene.art.as_deref().and_then(content::art) {
            println!("{}", art.dimmed());
        }
        println!("{}", scene.text);
        if !scene.choices.is_empty() {
            println!("\n{}", "Choices:".bold());
            for (i, choice) in scene.choices.iter().enumerate() {
                println!("  {}: {}", (i + 1).to_string().cyan(), choice.text);
            }
        }
    }

    fn report_invalid(&mut self, input: &str, choices: usize) {
        println!(
            "{}",
            format!("Invalid option '{input}', pick a number from 1 to {choices}.").yellow()
        );
    }

    fn report_finished(&mut self, _scene: &Scene) {
        println!("\n{}", "The end.".bold());
    }
}

/// Reads selections from stdin, one line at a time.
pub struct StdinReader;

impl InputReader for StdinReader {
    fn next_line(&mut self) -> StoryResult<Option<String>> {
        print!("\n{} ", ">".bold());
        io::stdout().flush()?;
        let line = read_lossy_line(&mut io::stdin().lock())?;
        if line.is_none() {
            println!();
        }
        Ok(line)
    }
}

/// One line of raw bytes, with invalid UTF-8 replaced rather than rejected.
/// `None` at end of input.
fn read_lossy_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf)? {
        0 => Ok(None),
        _ => Ok(Some(String::from_utf8_lossy(&buf).into_owned())),
    }
}

/// A status table for a group of characters.
pub fn party_table(party: &[Character]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Archetype", "Life", "Strength", "Traits"]);

    for member in party {
        let traits = member
            .attributes()
            .filter(|(a, _)| !matches!(a, Attribute::Life | Attribute::Strength))
            .map(|(a, v)| format!("{a} {v}"))
            .collect::<Vec<_>>()
            .join(", ");
        let life = if member.is_alive() {
            member.life().to_string()
        } else {
            "fallen".to_string()
        };
        table.add_row(vec![
            member.name.clone(),
            member.archetype.to_string(),
            life,
            member.strength().to_string(),
            traits,
        ]);
    }
    table
}
