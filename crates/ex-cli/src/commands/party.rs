use crate::content;
use crate::terminal::party_table;

pub fn run() -> Result<(), String> {
    let party = content::starting_party().map_err(|e| e.to_string())?;
    println!("{}", party_table(&party));
    println!();
    println!("  {} heroes", party.len());
    Ok(())
}
