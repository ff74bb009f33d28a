mod commands;
mod logging;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use advent_core::config::AdventConfig;
use advent_core::store::{CalendarStore, FileStore};
use advent_core::{CalendarViewModel, Clock, FixedClock, LocalCalendarRepository, LocalClock, default_items};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "advent")]
#[command(about = "Open the doors of your advent calendar, one day at a time")]
struct Cli {
    /// Use this config file instead of ~/.config/advent/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the calendar grid
    Show {
        /// Print the doors as JSON instead of a grid
        #[arg(long)]
        json: bool,
    },
    /// Open the door for a day
    Open { day: u8 },
    /// View the picture behind an open door
    View { day: u8 },
}

type CalendarModel = CalendarViewModel<LocalCalendarRepository<FileStore>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => AdventConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AdventConfig::load()?,
    };

    let clock: Arc<dyn Clock> = match cli.today {
        Some(date) => Arc::new(FixedClock(date)),
        None => Arc::new(LocalClock),
    };

    let model = build_model(&config, clock)?;

    match cli.command.unwrap_or(Commands::Show { json: false }) {
        Commands::Show { json } => commands::show::run(&model, json).await,
        Commands::Open { day } => commands::open::run(&model, day).await,
        Commands::View { day } => commands::view::run(&model, &config, day).await,
    }
}

fn build_model(config: &AdventConfig, clock: Arc<dyn Clock>) -> Result<CalendarModel> {
    let store = FileStore::new(config.data_path());
    let repository =
        LocalCalendarRepository::new(CalendarStore::new(store), config.start_date, &default_items());
    let delay = config.rejection_delay()?;

    Ok(CalendarViewModel::new(Arc::new(repository), clock, delay))
}
