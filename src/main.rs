// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Versemark CLI entrypoint.
//!
//! Edits highlights, notes and reader settings stored in a data directory, one JSON file per
//! storage slot.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use versemark::model::{HighlightColor, SettingsStep, VerseKey};
use versemark::store::{
    ChatHistoryStore, DirBackend, HighlightStore, NoteStore, Persistence, SettingsStore,
    WriteDurability,
};
use versemark::ui::{format_range, parse_range};

#[derive(Debug, Parser)]
#[command(name = "versemark", version, about = "Verse highlights and notes")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the storage slots.
    #[arg(
        long = "data-dir",
        env = "VERSEMARK_DATA_DIR",
        default_value = ".versemark",
        global = true
    )]
    data_dir: PathBuf,

    /// Sync files and directories after every write.
    #[arg(long = "durable-writes", global = true)]
    durable_writes: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Highlight verses with a palette color.
    Highlight {
        book: u32,
        chapter: u32,
        /// Verse list in range notation, e.g. `1-3,5`.
        verses: String,
        color: HighlightColor,
    },
    /// Remove highlights from verses.
    Unhighlight {
        book: u32,
        chapter: u32,
        verses: String,
    },
    /// Attach a note to verses. Omitted or blank text deletes their notes.
    Note {
        book: u32,
        chapter: u32,
        verses: String,
        text: Option<String>,
    },
    /// Print the annotations of a chapter.
    Show {
        book: u32,
        chapter: u32,
        verses: Option<String>,
    },
    /// Print reader settings, or step them.
    Settings {
        #[arg(long = "font-size", value_enum)]
        font_size: Option<Step>,
        #[arg(long = "line-height", value_enum)]
        line_height: Option<Step>,
        #[arg(long = "margin", value_enum)]
        margin: Option<Step>,
    },
    /// List saved expound conversations.
    History {
        /// Delete the conversation with this id.
        #[arg(long)]
        delete: Option<i64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Step {
    Up,
    Down,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn verse_keys(book: u32, chapter: u32, verses: &str) -> Result<Vec<VerseKey>, Box<dyn Error>> {
    Ok(parse_range(verses)?
        .into_iter()
        .map(|verse| VerseKey::new(book, chapter, verse))
        .collect())
}

fn settings_steps(
    font_size: Option<Step>,
    line_height: Option<Step>,
    margin: Option<Step>,
) -> Vec<SettingsStep> {
    let pick = |step: Option<Step>, up: SettingsStep, down: SettingsStep| {
        step.map(|step| match step {
            Step::Up => up,
            Step::Down => down,
        })
    };
    [
        pick(
            font_size,
            SettingsStep::IncreaseFontSize,
            SettingsStep::DecreaseFontSize,
        ),
        pick(
            line_height,
            SettingsStep::IncreaseLineHeight,
            SettingsStep::DecreaseLineHeight,
        ),
        pick(
            margin,
            SettingsStep::IncreaseMargin,
            SettingsStep::DecreaseMargin,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let durability = if cli.durable_writes {
        WriteDurability::Durable
    } else {
        WriteDurability::BestEffort
    };
    let backend = Arc::new(DirBackend::new(&cli.data_dir).with_durability(durability));
    let persistence = Persistence::new(backend)?;

    match cli.command {
        Command::Highlight {
            book,
            chapter,
            verses,
            color,
        } => {
            let keys = verse_keys(book, chapter, &verses)?;
            HighlightStore::load(persistence.clone()).apply_color(&keys, color);
            println!("{} verse(s) highlighted {color}", keys.len());
        }
        Command::Unhighlight {
            book,
            chapter,
            verses,
        } => {
            let keys = verse_keys(book, chapter, &verses)?;
            HighlightStore::load(persistence.clone()).remove_batch(&keys);
        }
        Command::Note {
            book,
            chapter,
            verses,
            text,
        } => {
            let keys = verse_keys(book, chapter, &verses)?;
            let text = text.unwrap_or_default();
            NoteStore::load(persistence.clone()).set_notes(&keys, &text);
        }
        Command::Show {
            book,
            chapter,
            verses,
        } => {
            let filter = verses.as_deref().map(parse_range).transpose()?;
            let wanted = |key: &VerseKey| {
                filter
                    .as_ref()
                    .map_or(true, |verses| verses.binary_search(&key.verse()).is_ok())
            };
            let highlights = HighlightStore::load(persistence.clone());
            let notes = NoteStore::load(persistence.clone());

            let highlighted: Vec<_> = highlights
                .in_chapter(book, chapter)
                .filter(|&(key, _)| wanted(key))
                .collect();
            for (key, color) in &highlighted {
                println!("{key}\t{color}");
            }
            for (key, note) in notes
                .entries()
                .iter()
                .filter(|&(key, _)| key.in_chapter(book, chapter) && wanted(key))
            {
                println!("{key}\tnote\t{}", note.text());
            }
            let numbers: Vec<u32> = highlighted.iter().map(|(key, _)| key.verse()).collect();
            if !numbers.is_empty() {
                println!("highlighted: {}", format_range(&numbers));
            }
        }
        Command::Settings {
            font_size,
            line_height,
            margin,
        } => {
            let mut settings = SettingsStore::load(persistence.clone());
            for step in settings_steps(font_size, line_height, margin) {
                settings.apply_step(step);
            }
            println!("{}", serde_json::to_string_pretty(settings.get())?);
        }
        Command::History { delete } => {
            let mut history = ChatHistoryStore::load(persistence.clone());
            if let Some(id) = delete {
                if !history.delete(id) {
                    return Err(format!("no conversation with id {id}").into());
                }
            }
            for record in history.list() {
                println!(
                    "{}\t{}\t{}\t{} message(s)",
                    record.id,
                    record.timestamp.to_rfc3339(),
                    record.verse_ref,
                    record.conversation.len()
                );
            }
        }
    }

    persistence.flush();
    let failed = persistence.failed_writes();
    if failed > 0 {
        return Err(format!("{failed} write(s) to {} failed", cli.data_dir.display()).into());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("versemark: {err}");
        std::process::exit(1);
    }
}
