//! CLI frontend for the Exandria text adventure.

mod battle;
mod commands;
mod content;
mod terminal;

use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "exandria",
    about = "Exandria: a choose-your-path adventure with dice-driven battles",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every subcommand.
#[derive(Args)]
pub struct GlobalArgs {
    /// RNG seed for reproducible dice
    #[arg(long, global = true, default_value_t = 42)]
    pub seed: u64,

    /// Draw the seed from the operating system instead
    #[arg(long, global = true, conflicts_with = "seed")]
    pub random: bool,

    /// Keep protection up until the protector falls
    #[arg(long, global = true)]
    pub persistent_protection: bool,

    /// Give up after this many invalid selections in a row (0 = never)
    #[arg(long, global = true, default_value_t = 0)]
    pub max_invalid: u32,

    /// Log filter, e.g. `debug` or `ex_story=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the story (the default)
    Play,

    /// Roll dice
    Roll {
        /// Die to roll: d2 (or coin), d4, d6, d8, d10, d12, d20, d100
        die: String,

        /// Number of dice
        #[arg(short, long, default_value_t = 1)]
        count: u32,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fight a duel between two archetypes
    Duel {
        /// Archetype that strikes first
        first: String,

        /// Archetype that answers
        second: String,

        /// Print the outcome and combat log as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let two archetypes make small talk
    Talk {
        /// Archetype that opens the conversation
        first: String,

        /// Archetype that answers
        second: String,

        /// Opening line
        #[arg(long, default_value = "Hello!")]
        opening: String,

        /// Print the conversation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the starting party
    Party,

    /// Validate the built-in story graph
    Check,
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.log_level.as_deref());

    let global = &cli.global;
    let result = match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => commands::play::run(global),
        Commands::Roll { die, count, json } => commands::roll::run(global, &die, count, json),
        Commands::Duel {
            first,
            second,
            json,
        } => commands::duel::run(global, &first, &second, json),
        Commands::Talk {
            first,
            second,
            opening,
            json,
        } => commands::talk::run(&first, &second, &opening, json),
        Commands::Party => commands::party::run(),
        Commands::Check => commands::check::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
