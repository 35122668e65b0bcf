#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Mitosis levels in a terminal.
//!
//! The binary is the game loop the engine itself deliberately does not own:
//! it fetches level bytes from disk, feeds player actions into the field as
//! commands, threads the resulting events through the progression session,
//! and presents each new state as text.

mod catalog;
mod level_transfer;
mod text;

use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec2;
use mitosis_core::{CellCoord, Command};
use mitosis_rendering::{Presenter, Scene};
use mitosis_system_input::{Input, PointerInput};
use mitosis_system_progression::{Session, UserId};
use mitosis_world::{self as world, query, Field};

use crate::{catalog::Catalog, text::TextPresenter};

/// Command-line interface for the Mitosis puzzle.
#[derive(Debug, Parser)]
#[command(
    name = "mitosis",
    about = "Divide tokens across the grid until exactly the winning slots hold one"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Play a single level, or a whole catalog in order.
    Play {
        /// Binary level file to play.
        #[arg(long, conflicts_with = "catalog")]
        level: Option<PathBuf>,
        /// TOML manifest listing levels to play in order.
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Treat level files as the legacy text format.
        #[arg(long)]
        legacy: bool,
        /// User identifier attached to score records.
        #[arg(long, default_value = "anonymous")]
        user: String,
    },
    /// Print a level without starting a session.
    Show {
        /// Level file to display.
        level: PathBuf,
        /// Treat the level file as the legacy text format.
        #[arg(long)]
        legacy: bool,
    },
    /// Encode a level file into a shareable transfer string.
    Encode {
        /// Level file to encode.
        level: PathBuf,
        /// Treat the level file as the legacy text format.
        #[arg(long)]
        legacy: bool,
    },
    /// Decode a transfer string back into a binary level file.
    Decode {
        /// The transfer string produced by `encode`.
        transfer: String,
        /// Where to write the binary level; prints the board when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        CliCommand::Play {
            level,
            catalog,
            legacy,
            user,
        } => play(level, catalog, legacy, UserId::new(user)),
        CliCommand::Show { level, legacy } => {
            let field = load_level(&level, legacy)?;
            TextPresenter::default().present(&Scene::from_field(&field))
        }
        CliCommand::Encode { level, legacy } => {
            let field = load_level(&level, legacy)?;
            println!("{}", level_transfer::encode(&field));
            Ok(())
        }
        CliCommand::Decode { transfer, out } => decode_transfer(&transfer, out.as_deref()),
    }
}

/// Fetches and decodes a level file; the transport failure and the decode
/// failure surface separately in the error chain.
fn load_level(path: &Path, legacy: bool) -> Result<Field> {
    let field = if legacy {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read level {}", path.display()))?;
        Field::from_legacy_text(&text)
    } else {
        let bytes =
            fs::read(path).with_context(|| format!("failed to read level {}", path.display()))?;
        Field::from_bytes(&bytes)
    };
    field.with_context(|| format!("level {} is malformed", path.display()))
}

fn decode_transfer(transfer: &str, out: Option<&Path>) -> Result<()> {
    let field = level_transfer::decode(transfer).context("could not decode transfer string")?;
    match out {
        Some(path) => {
            fs::write(path, field.to_bytes())
                .with_context(|| format!("failed to write level {}", path.display()))?;
            println!(
                "wrote {}x{} level to {}",
                query::columns(&field),
                query::rows(&field),
                path.display()
            );
        }
        None => TextPresenter::default().present(&Scene::from_field(&field))?,
    }
    Ok(())
}

fn play(
    level: Option<PathBuf>,
    catalog: Option<PathBuf>,
    legacy: bool,
    user: UserId,
) -> Result<()> {
    let levels: Vec<(String, PathBuf)> = match (level, catalog) {
        (Some(path), None) => {
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            vec![(name, path)]
        }
        (None, Some(manifest)) => Catalog::load(&manifest)?
            .levels
            .into_iter()
            .map(|entry| (entry.name, entry.path))
            .collect(),
        _ => bail!("pass --level FILE or --catalog MANIFEST"),
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut session = Session::new();
    let mut input = Input::new();
    let mut presenter = TextPresenter::default();

    while let Some((name, path)) = levels.get(session.level_index() as usize) {
        let mut field = load_level(path, legacy)?;
        input.level_loaded();
        println!("Level {}: {name}", session.level_index() + 1);
        presenter.present(&Scene::from_field(&field))?;

        loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line.context("failed to read player input")?;

            let mut commands = Vec::new();
            match parse_action(&line) {
                Ok(PlayerAction::Divide(cell)) => commands.push(Command::Divide { cell }),
                Ok(PlayerAction::Poke { x, y }) => input.handle(
                    &[],
                    PointerInput::pressed_at(Vec2::new(x, y)),
                    |px, py| query::cell_at_point(&field, px, py),
                    &mut commands,
                ),
                Ok(PlayerAction::Reset) => commands.push(Command::Reset),
                Ok(PlayerAction::Quit) => return Ok(()),
                Ok(PlayerAction::Help) => {
                    print_help();
                    continue;
                }
                Err(message) => {
                    println!("{message}");
                    continue;
                }
            }

            let mut events = Vec::new();
            for command in commands {
                world::apply(&mut field, command, &mut events);
            }
            session.handle(&events);
            presenter.present(&Scene::from_field(&field))?;

            if session.is_solved() {
                let report = session.score_report(user.clone());
                println!(
                    "Solved level {} in {} moves (score record for {}).",
                    report.level + 1,
                    report.moves,
                    report.user.get()
                );
                session.advance_level();
                break;
            }
        }
    }

    println!("You won forever!");
    Ok(())
}

enum PlayerAction {
    Divide(CellCoord),
    Poke { x: f32, y: f32 },
    Reset,
    Quit,
    Help,
}

fn parse_action(line: &str) -> Result<PlayerAction, String> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("divide" | "d") => {
            let column = parse_index(parts.next())?;
            let row = parse_index(parts.next())?;
            Ok(PlayerAction::Divide(CellCoord::new(column, row)))
        }
        Some("poke" | "p") => {
            let x = parse_pixel(parts.next())?;
            let y = parse_pixel(parts.next())?;
            Ok(PlayerAction::Poke { x, y })
        }
        Some("reset" | "r") => Ok(PlayerAction::Reset),
        Some("quit" | "q") => Ok(PlayerAction::Quit),
        Some("help" | "h") | None => Ok(PlayerAction::Help),
        Some(other) => Err(format!("unknown command '{other}'; try 'help'")),
    }
}

fn parse_index(token: Option<&str>) -> Result<u32, String> {
    token
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| "expected a column and a row, e.g. 'divide 1 0'".to_owned())
}

fn parse_pixel(token: Option<&str>) -> Result<f32, String> {
    token
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| "expected pixel coordinates, e.g. 'poke 50 10'".to_owned())
}

fn print_help() {
    println!("commands:");
    println!("  divide COL ROW   divide the token at a grid cell");
    println!("  poke X Y         divide the cell under a pixel coordinate");
    println!("  reset            clear every token on the board");
    println!("  quit             leave the game");
}

#[cfg(test)]
mod tests {
    use super::{parse_action, PlayerAction};
    use mitosis_core::CellCoord;

    #[test]
    fn divide_parses_column_then_row() {
        match parse_action("divide 2 1") {
            Ok(PlayerAction::Divide(cell)) => assert_eq!(cell, CellCoord::new(2, 1)),
            other => panic!("expected divide action, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert!(parse_action("explode 1 1").is_err());
    }

    #[test]
    fn blank_lines_show_help() {
        assert!(matches!(parse_action("   "), Ok(PlayerAction::Help)));
    }
}
