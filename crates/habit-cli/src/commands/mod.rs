//! CLI subcommands and the state they share.

pub mod config;
pub mod habit;
pub mod week;

use chrono::{Duration, NaiveDate};
use habit_core::store::data_dir;
use habit_core::{Config, FileBlobStore, HabitStore, SerialPrompter, Tracker};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::prompt::StdinPrompter;

pub type CliTracker = Tracker<FileBlobStore, SerialPrompter<StdinPrompter>>;

/// Resolved data directory and configuration.
pub struct Context {
    pub data_dir: PathBuf,
    pub config: Config,
}

impl Context {
    pub fn open(data_dir_override: Option<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let data_dir = match data_dir_override {
            Some(dir) => {
                std::fs::create_dir_all(&dir)?;
                dir
            }
            None => data_dir()?,
        };
        let config = Config::load_or_default(&data_dir);
        Ok(Self { data_dir, config })
    }

    /// Install the stderr subscriber. `RUST_LOG` wins over the config.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.config.log_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn open_tracker(&self) -> Result<CliTracker, Box<dyn std::error::Error>> {
        let blobs = FileBlobStore::new(self.config.habits_path(&self.data_dir));
        tracing::debug!(path = %blobs.path().display(), "opening habit store");
        let store = HabitStore::open(blobs)?;
        Ok(
            Tracker::new(store, SerialPrompter::new(StdinPrompter))
                .with_confirm_delete(self.config.tracker.confirm_delete),
        )
    }
}

/// A day given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayArg {
    Today,
    Yesterday,
    On(NaiveDate),
}

impl DayArg {
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            DayArg::Today => today,
            DayArg::Yesterday => today - Duration::days(1),
            DayArg::On(date) => date,
        }
    }
}

/// Parse `today`, `yesterday` or `YYYY-MM-DD`.
pub fn parse_day(s: &str) -> Result<DayArg, String> {
    match s {
        "today" => Ok(DayArg::Today),
        "yesterday" => Ok(DayArg::Yesterday),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map(DayArg::On)
            .map_err(|e| format!("expected today, yesterday or YYYY-MM-DD: {e}")),
    }
}
