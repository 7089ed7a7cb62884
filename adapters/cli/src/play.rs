//! Interactive session driven by the wall clock.

use std::{
    io::{self, BufRead},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use carbon_quest_runtime::Session;
use carbon_quest_world::query;
use clap::{Parser, Subcommand};

use crate::{action::Action, render, report};

/// How long the loop waits for input before advancing the clock.
const FRAME: Duration = Duration::from_millis(100);

#[derive(Debug, Parser)]
#[command(no_binary_name = true)]
struct Prompt {
    #[command(subcommand)]
    entry: Entry,
}

#[derive(Debug, Subcommand)]
enum Entry {
    /// Print the station summary and active panel.
    Status,
    /// Save and leave the game.
    Quit,
    #[command(flatten)]
    Action(Action),
}

enum Input {
    Entry(Entry),
    Invalid(String),
}

/// Runs until the player quits or standard input closes.
pub(crate) fn run(session: &mut Session) -> Result<()> {
    let input = spawn_reader()?;
    println!("{}", query::welcome_banner(session.world()));
    print!("{}", render::status(session.world()));

    let mut last = Instant::now();
    loop {
        let received = input.recv_timeout(FRAME);
        let now = Instant::now();
        report(&session.advance(now.duration_since(last)));
        last = now;

        match received {
            Ok(Input::Entry(Entry::Status)) => print!("{}", render::status(session.world())),
            Ok(Input::Entry(Entry::Action(action))) => {
                report(&session.dispatch(action.into_command()));
            }
            Ok(Input::Invalid(message)) => eprintln!("{message}"),
            Err(RecvTimeoutError::Timeout) => {}
            Ok(Input::Entry(Entry::Quit)) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    session.save();
    log::info!("left the game at tick {}", query::tick_index(session.world()));
    Ok(())
}

fn spawn_reader() -> Result<Receiver<Input>> {
    let (sender, receiver) = mpsc::channel();
    let _ = thread::Builder::new()
        .name("prompt".to_owned())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                let words: Vec<&str> = line.split_whitespace().collect();
                if words.is_empty() {
                    continue;
                }
                let input = match Prompt::try_parse_from(words) {
                    Ok(prompt) => Input::Entry(prompt.entry),
                    Err(error) => Input::Invalid(error.to_string()),
                };
                if sender.send(input).is_err() {
                    break;
                }
            }
        })
        .context("failed to start the input reader")?;
    Ok(receiver)
}
