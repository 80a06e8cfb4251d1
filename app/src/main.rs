use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::cmp::Ordering;
use std::path::PathBuf;
use uuid::Uuid;

use analytics::ScoreBand;
use catalog::{apply, Action};
use core_types::Instrument;

mod store;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Catalogue and rank strategy backtest reports.")]
struct Cli {
    /// Path of the catalogue snapshot file.
    #[arg(long, default_value = "catalog.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Registers a new trading instrument.
    AddInstrument {
        /// Display name, e.g. "EURUSD".
        #[arg(short, long)]
        name: String,

        /// Optional free-text description.
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Lists all registered instruments.
    ListInstruments,

    /// Deletes an instrument and, with it, all of its backtest records.
    DeleteInstrument {
        #[arg(long)]
        id: String,
    },

    /// Marks an instrument as the current one; `rankings` filters by it.
    SelectInstrument {
        #[arg(long)]
        id: String,
    },

    /// Ingests a backtest report file into the catalogue.
    Ingest {
        /// The exported report (HTML).
        #[arg(short, long)]
        file: PathBuf,

        /// Id of the instrument the backtest ran on.
        #[arg(short, long)]
        instrument: String,

        /// Display name of the strategy (expert advisor).
        #[arg(short, long)]
        strategy: String,
    },

    /// Prints the full metric block of one record.
    Show {
        #[arg(long)]
        record: String,
    },

    /// Prints strategy aggregates ranked by best score.
    Rankings {
        /// Restrict to one instrument; defaults to the selected one, if any.
        #[arg(short, long)]
        instrument: Option<String>,
    },

    /// Deletes a single backtest record.
    DeleteRecord {
        #[arg(long)]
        id: String,
    },

    /// Deletes a strategy aggregate together with all of its records.
    DeleteStrategy {
        #[arg(long)]
        id: String,
    },

    /// Sets or clears the free-text note on a strategy aggregate.
    Comment {
        #[arg(long)]
        id: String,

        /// Omit to clear the note.
        #[arg(long)]
        note: Option<String>,
    },

    /// Re-scores every record with the configured weights.
    Rescore,
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);

    let cli = Cli::parse();
    let state = store::load(&cli.state)?;

    match cli.command {
        Commands::AddInstrument { name, description } => {
            let instrument = Instrument {
                id: Uuid::new_v4().to_string(),
                name: name.clone(),
                description,
                created_at: Utc::now(),
            };
            println!("Added instrument '{}' with id {}", name, instrument.id);
            let state = apply(state, Action::AddInstrument(instrument));
            store::save(&cli.state, &state)?;
        }

        Commands::ListInstruments => {
            if state.instruments.is_empty() {
                println!("No instruments registered yet.");
            }
            for instrument in &state.instruments {
                let selected = state.selected_instrument.as_deref() == Some(instrument.id.as_str());
                println!(
                    "{} {:<12} {}  {}",
                    if selected { "*" } else { " " },
                    instrument.name,
                    instrument.id,
                    instrument.description.as_deref().unwrap_or("")
                );
            }
        }

        Commands::DeleteInstrument { id } => {
            if state.instrument(&id).is_none() {
                bail!("no instrument with id {id}");
            }
            let state = apply(state, Action::DeleteInstrument(id));
            store::save(&cli.state, &state)?;
            println!("Instrument deleted, records and aggregates dropped with it.");
        }

        Commands::SelectInstrument { id } => {
            if state.instrument(&id).is_none() {
                bail!("no instrument with id {id}");
            }
            let state = apply(state, Action::SelectInstrument(id));
            store::save(&cli.state, &state)?;
        }

        Commands::Ingest { file, instrument, strategy } => {
            if state.instrument(&instrument).is_none() {
                bail!("no instrument with id {instrument}; add it first");
            }
            let document = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read report {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());

            let record = ingestion::ingest_report(&document, &instrument, &strategy, &file_name)?;
            let id = record.id.clone();

            let state = apply(state, Action::AddRecord(record));
            let state = apply(state, Action::SelectInstrument(instrument));
            store::save(&cli.state, &state)?;

            let stored = state
                .record(&id)
                .context("record missing after insertion")?;
            ingestion::print_report(stored);
        }

        Commands::Show { record } => {
            match state.record(&record) {
                Some(record) => ingestion::print_report(record),
                None => bail!("no record with id {record}"),
            }
        }

        Commands::Rankings { instrument } => {
            let filter = instrument.or_else(|| state.selected_instrument.clone());
            let mut rows: Vec<_> = state
                .aggregates
                .iter()
                .filter(|a| filter.as_deref().is_none_or(|id| a.instrument_id == id))
                .collect();
            rows.sort_by(|a, b| {
                b.best_score
                    .partial_cmp(&a.best_score)
                    .unwrap_or(Ordering::Equal)
            });

            if rows.is_empty() {
                println!("No strategy aggregates to rank.");
            } else {
                println!(
                    "{:<24} {:<12} {:>5} {:>8} {:>8}  band",
                    "strategy", "instrument", "runs", "best", "avg"
                );
                for aggregate in rows {
                    println!(
                        "{:<24} {:<12} {:>5} {:>8.2} {:>8.2}  {}{}",
                        aggregate.strategy,
                        aggregate.instrument_id,
                        aggregate.total_backtests,
                        aggregate.best_score,
                        aggregate.average_score,
                        ScoreBand::classify(aggregate.best_score),
                        aggregate
                            .note
                            .as_deref()
                            .map(|n| format!("  // {n}"))
                            .unwrap_or_default()
                    );
                }
            }
        }

        Commands::DeleteRecord { id } => {
            if state.record(&id).is_none() {
                bail!("no record with id {id}");
            }
            let state = apply(state, Action::DeleteRecord(id));
            store::save(&cli.state, &state)?;
        }

        Commands::DeleteStrategy { id } => {
            if state.aggregate(&id).is_none() {
                bail!("no strategy aggregate with id {id}");
            }
            let state = apply(state, Action::DeleteAggregate(id));
            store::save(&cli.state, &state)?;
            println!("Strategy aggregate and its records deleted.");
        }

        Commands::Comment { id, note } => {
            if state.aggregate(&id).is_none() {
                bail!("no strategy aggregate with id {id}");
            }
            let state = apply(state, Action::SetAggregateNote { id, note });
            store::save(&cli.state, &state)?;
        }

        Commands::Rescore => {
            let state = apply(state, Action::SetWeights(settings.weights));
            store::save(&cli.state, &state)?;
            println!("Re-scored {} records with the configured weights.", state.records.len());
        }
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let level = level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();
}
