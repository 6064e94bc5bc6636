//! Command-line front end.
//!
//! Presentation glue only: collects field values, renders listings and
//! stats. All record logic lives in the library's exercise store.

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use fitlog::exercises::types::{format_date, kind_glyph};
use fitlog::storage::{config, KeyValueStore};
use fitlog::{ExerciseStore, HistoryFilter, NewExercise};
use uuid::Uuid;

/// Track exercise sessions from the command line.
#[derive(Debug, Parser)]
#[command(name = "fitlog", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log a new exercise session
    Add {
        /// Activity kind, e.g. Running, Cycling, Yoga
        #[arg(long = "type")]
        kind: String,
        /// Session length in minutes
        #[arg(long)]
        duration: u32,
        /// Calories burned
        #[arg(long)]
        calories: u32,
        /// Activity date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Optional notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a logged session by id
    Remove {
        /// Id printed by `add` and `list`
        id: Uuid,
    },
    /// List logged sessions, most recently added first
    List {
        /// Only sessions from the last 7 days
        #[arg(long, conflicts_with = "month")]
        week: bool,
        /// Only sessions from the last 30 days
        #[arg(long)]
        month: bool,
    },
    /// Show aggregate statistics over all sessions
    Stats,
}

/// Execute the parsed command against a store opened over the configured
/// database.
pub fn run(args: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_config()?;
    let backing = KeyValueStore::open(&config.storage_path())?;
    let mut store = ExerciseStore::open(Box::new(backing));

    match args.command {
        Command::Add {
            kind,
            duration,
            calories,
            date,
            notes,
        } => {
            let record = store.add(NewExercise {
                kind,
                duration_min: duration,
                calories,
                date: date.unwrap_or_else(|| Utc::now().date_naive()),
                notes,
            })?;
            println!(
                "Added {} {} on {} ({})",
                record.glyph(),
                record.kind,
                format_date(record.date),
                record.id
            );
        }
        Command::Remove { id } => {
            if store.remove(id)? {
                println!("Exercise deleted");
            } else {
                println!("No exercise found with id {id}");
            }
        }
        Command::List { week, month } => {
            let filter = if week {
                HistoryFilter::week()
            } else if month {
                HistoryFilter::month()
            } else {
                HistoryFilter::All
            };
            render_list(&store.list(filter));
        }
        Command::Stats => {
            let stats = store.summarize();
            println!("Sessions:       {}", stats.count);
            println!("Total duration: {} min", stats.total_duration_min);
            println!("Total calories: {} cal", stats.total_calories);
            println!("Avg duration:   {} min", stats.avg_duration_min);
        }
    }

    Ok(())
}

fn render_list(records: &[fitlog::ExerciseRecord]) {
    if records.is_empty() {
        println!("No exercises found for this filter. Start tracking your fitness journey!");
        return;
    }

    for record in records {
        println!(
            "{} {}  {}  {} min  {} cal  [{}]",
            kind_glyph(&record.kind),
            record.kind,
            format_date(record.date),
            record.duration_min,
            record.calories,
            record.id
        );
        if let Some(notes) = &record.notes {
            println!("   📝 {notes}");
        }
    }
}
