//! StickyNote command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto `NoteBoard` use-cases against the configured
//!   database file.
//! - Keep output plain and line-oriented for scripting.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use std::path::PathBuf;
use stickynote_core::{
    init_logging, write_export, DeleteOutcome, NoteBoard, NoteCard, NotesView, SqliteKvStore,
    StickyConfig,
};

#[derive(Parser)]
#[command(name = "stickynote", version, about = "Sticky notes kept in a local store")]
struct Cli {
    /// Database file; overrides STICKYNOTE_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty note and print its id.
    New {
        /// Note color as #RRGGBB; defaults to yellow.
        #[arg(long)]
        color: Option<String>,
    },
    /// Replace the content of a note.
    Edit { id: String, content: String },
    /// Toggle the pinned flag of a note.
    Pin { id: String },
    /// Delete a note after confirmation.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Write a note to `note-<id>.txt`.
    Export {
        id: String,
        /// Target directory.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// List notes, pinned first.
    List {
        /// Case-insensitive substring filter.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Print a health-check response.
    Ping,
    /// Print the core crate version.
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = StickyConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_ref() {
        // A bad log setting only warns.
        if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match cli.command {
        Commands::Ping => println!("stickynote_core ping={}", stickynote_core::ping()),
        Commands::Version => {
            println!("stickynote_core version={}", stickynote_core::core_version())
        }
        command => run_board_command(command, cli.db.unwrap_or(config.db_path))?,
    }

    Ok(())
}

fn run_board_command(command: Commands, db_path: PathBuf) -> Result<()> {
    let store = SqliteKvStore::open(&db_path)
        .with_context(|| format!("failed to open note store at {}", db_path.display()))?;
    let mut board = NoteBoard::open(store)?;

    match command {
        Commands::New { color } => {
            let created = board.create(color.as_deref())?;
            println!("{}", created.note.id);
        }
        Commands::Edit { id, content } => match board.edit(&id, content)? {
            Some(_) => println!("updated {id}"),
            None => println!("no note {id}"),
        },
        Commands::Pin { id } => match board.toggle_pin(&id)? {
            Some(_) => {
                let pinned = board.note(&id).is_some_and(|note| note.pinned);
                println!("{} {id}", if pinned { "pinned" } else { "unpinned" });
            }
            None => println!("no note {id}"),
        },
        Commands::Delete { id, yes } => {
            let mut confirm = |prompt: &str| {
                yes || Confirm::new()
                    .with_prompt(prompt)
                    .default(false)
                    .interact()
                    .unwrap_or(false)
            };
            match board.delete(&id, &mut confirm)? {
                DeleteOutcome::Deleted(_) => println!("deleted {id}"),
                DeleteOutcome::Cancelled => println!("kept {id}"),
                DeleteOutcome::NotFound => println!("no note {id}"),
            }
        }
        Commands::Export { id, out } => match board.export(&id) {
            Some(export) => {
                let path = write_export(&out, &export)
                    .with_context(|| format!("failed to write export into {}", out.display()))?;
                println!("{}", path.display());
            }
            None => println!("no note {id}"),
        },
        Commands::List { search } => print_view(&board.search(search)),
        // Health checks never reach the store.
        Commands::Ping | Commands::Version => {}
    }

    Ok(())
}

fn print_view(view: &NotesView) {
    if view.is_empty() {
        println!("No notes.");
        return;
    }
    if !view.pinned.is_empty() {
        println!("Pinned");
        view.pinned.iter().for_each(print_card);
    }
    if !view.unpinned.is_empty() {
        println!("Notes");
        view.unpinned.iter().for_each(print_card);
    }
}

fn print_card(card: &NoteCard) {
    let first_line = card.content.lines().next().unwrap_or("");
    println!("  {} {} {} {}", card.pin_icon, card.id, card.color, first_line);
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn delete_parses_yes_flag_and_global_db() {
        let cli = Cli::parse_from(["stickynote", "delete", "abc", "--yes", "--db", "/tmp/x.db"]);
        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/x.db")));
        assert!(matches!(cli.command, Commands::Delete { ref id, yes: true } if id == "abc"));
    }
}
