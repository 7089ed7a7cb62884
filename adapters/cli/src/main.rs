#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for Carbon Quest.
//!
//! Every invocation resumes the saved game, applies one request and saves
//! again. `play` keeps the session open and runs the clock in real time.

mod action;
mod play;
mod render;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use carbon_quest_core::Event;
use carbon_quest_runtime::{Session, SessionConfig};
use carbon_quest_storage::{DirectoryStore, SaveSlot};
use clap::{Parser, Subcommand};

use crate::action::Action;

/// Idle space-mining game played from the terminal.
#[derive(Debug, Parser)]
#[command(name = "carbon-quest", version)]
struct Cli {
    /// TOML file overriding timing and gameplay tuning.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Directory holding the save file.
    #[arg(long, global = true, value_name = "DIR", default_value = ".carbon-quest")]
    save_dir: PathBuf,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Print the station summary and active panel.
    Status,
    /// Let simulated time pass.
    Wait {
        /// Seconds to advance.
        #[arg(default_value_t = 1.0)]
        seconds: f64,
    },
    /// Throw away the saved game and start over.
    Reset,
    /// Run the game interactively in real time.
    Play,
    #[command(flatten)]
    Action(Action),
}

/// Entry point for the Carbon Quest command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let store = DirectoryStore::open(&cli.save_dir)
        .with_context(|| format!("failed to open save directory {}", cli.save_dir.display()))?;
    let mut session = Session::resume(&config, SaveSlot::new(store));

    match cli.mode.unwrap_or(Mode::Status) {
        Mode::Status => {}
        Mode::Wait { seconds } => {
            let span = Duration::try_from_secs_f64(seconds)
                .with_context(|| format!("cannot wait for {seconds} seconds"))?;
            report(&session.advance(span));
        }
        Mode::Reset => session.reset(),
        Mode::Play => return play::run(&mut session),
        Mode::Action(action) => report(&session.dispatch(action.into_command())),
    }

    print!("{}", render::status(session.world()));
    Ok(())
}

fn report(events: &[Event]) {
    for line in events.iter().filter_map(render::describe) {
        println!("{line}");
    }
}
