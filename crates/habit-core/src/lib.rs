//! # Habit Core Library
//!
//! Core logic for a weekly habit tracker: users define habits, tick off days
//! on a seven-day grid, and the library decides which days count, which are
//! still editable and how long the current streak is. Front ends (the
//! `habit` CLI, or any GUI) are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Habit Store**: sole owner of the habit collection; persists the whole
//!   collection as one blob after every mutation
//! - **Schedule & Streak Engine**: pure functions over a habit and a
//!   caller-supplied "today"
//! - **Tracker**: composes the two with a clock and a prompt collaborator
//!
//! ## Key Components
//!
//! - [`HabitStore`]: create, rename, delete, set completion
//! - [`engine`]: active window, editability and streak rules
//! - [`Tracker`]: the toggle/confirm/report flow a UI drives
//! - [`Config`]: application configuration management

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod habit;
pub mod prompt;
pub mod store;
pub mod tracker;
pub mod week;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use engine::{current_streak, is_active, is_editable, DayStatus};
pub use error::{ConfigError, HabitError, Result};
pub use habit::{ActiveWindow, CompletedDates, DurationSpec, Habit, HabitId};
pub use prompt::{AutoPrompter, ChannelPrompter, PromptKind, PromptRequest, Prompter, SerialPrompter};
pub use store::{BlobStore, FileBlobStore, HabitStore, MemoryBlobStore};
pub use tracker::{ToggleOutcome, Tracker};
pub use week::{monday_of_week, GridCell, HabitRow, Week};
