//! Caller-side composition of the store, engine, clock and prompts.
//!
//! The store never consults the engine. The [`Tracker`] does it on the
//! store's behalf: it checks editability before a toggle, recomputes the
//! streak afterwards, and reports validation failures through the
//! [`Prompter`] before returning them.

use chrono::NaiveDate;
use tracing::info;

use crate::engine;
use crate::error::{HabitError, Result};
use crate::habit::{DurationSpec, Habit, HabitId};
use crate::prompt::Prompter;
use crate::store::{BlobStore, HabitStore};
use crate::week::{habit_row, HabitRow, Week};

pub const MSG_EMPTY_NAME: &str = "Please enter a habit name!";
pub const MSG_MISSING_END_DATE: &str = "Please select a custom end date!";
pub const MSG_END_BEFORE_START: &str = "The end date cannot be before today!";
pub const MSG_NOT_EDITABLE: &str = "This day can no longer be changed.";

/// Result of a successful completion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Streak after the change
    pub streak: u32,
    /// A completion was added, worth congratulating
    pub celebrate: bool,
}

/// Front-end facade over a [`HabitStore`]. "Today" comes from the store's
/// clock, the same one that stamps new habits.
pub struct Tracker<B: BlobStore, P: Prompter> {
    store: HabitStore<B>,
    prompter: P,
    confirm_delete: bool,
}

impl<B: BlobStore, P: Prompter> Tracker<B, P> {
    pub fn new(store: HabitStore<B>, prompter: P) -> Self {
        Self {
            store,
            prompter,
            confirm_delete: true,
        }
    }

    /// Skip the confirmation prompt on delete.
    pub fn with_confirm_delete(mut self, confirm: bool) -> Self {
        self.confirm_delete = confirm;
        self
    }

    pub fn store(&self) -> &HabitStore<B> {
        &self.store
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn today(&self) -> NaiveDate {
        self.store.today()
    }

    pub async fn add(&mut self, name: &str, duration: DurationSpec) -> Result<Habit> {
        let today = self.today();
        match self.store.create(name, duration, today) {
            Ok(habit) => {
                info!(habit = %habit.id, name = %habit.name, "habit added");
                Ok(habit)
            }
            Err(e) => Err(self.report(e).await),
        }
    }

    pub async fn rename(&mut self, id: &HabitId, name: &str) -> Result<Habit> {
        match self.store.rename(id, name) {
            Ok(habit) => Ok(habit),
            Err(e) => Err(self.report(e).await),
        }
    }

    /// Set or clear the completion on `date` if that day is still editable.
    ///
    /// # Errors
    /// `NotFound` for an unknown habit, `NotEditable` when the day is outside
    /// the window or older than yesterday or in the future.
    pub async fn toggle(&mut self, id: &HabitId, date: NaiveDate, completed: bool) -> Result<ToggleOutcome> {
        let today = self.today();
        let habit = self
            .store
            .get(id)
            .ok_or_else(|| HabitError::NotFound(id.clone()))?;

        if !engine::is_editable(habit, date, today) {
            return Err(self.report(HabitError::NotEditable { date }).await);
        }

        let was_completed = habit.completed_dates.is_completed(date);
        self.store.set_completion(id, date, completed)?;

        let streak = self
            .store
            .get(id)
            .map(|h| engine::current_streak(h, today))
            .unwrap_or(0);
        Ok(ToggleOutcome {
            streak,
            celebrate: completed && !was_completed,
        })
    }

    /// Delete after confirmation. Returns whether the habit was removed.
    pub async fn delete(&mut self, id: &HabitId) -> Result<bool> {
        let name = self
            .store
            .get(id)
            .map(|h| h.name.clone())
            .ok_or_else(|| HabitError::NotFound(id.clone()))?;

        if self.confirm_delete {
            let question = format!("Delete habit \"{name}\"? This cannot be undone.");
            if !self.prompter.confirm(&question).await {
                info!(habit = %id, "delete cancelled");
                return Ok(false);
            }
        }

        self.store.delete(id)?;
        info!(habit = %id, name = %name, "habit deleted");
        Ok(true)
    }

    pub fn streak(&self, id: &HabitId) -> Result<u32> {
        let habit = self
            .store
            .get(id)
            .ok_or_else(|| HabitError::NotFound(id.clone()))?;
        Ok(engine::current_streak(habit, self.today()))
    }

    /// Grid rows for every habit, in creation order.
    pub fn week_rows(&self, week: Week) -> Vec<HabitRow> {
        let today = self.today();
        self.store
            .all()
            .iter()
            .map(|habit| habit_row(habit, week, today))
            .collect()
    }

    /// Show a user-facing message for validation errors, then hand the
    /// error back.
    async fn report(&self, error: HabitError) -> HabitError {
        let message = match &error {
            HabitError::EmptyName => Some(MSG_EMPTY_NAME),
            HabitError::MissingEndDate => Some(MSG_MISSING_END_DATE),
            HabitError::InvalidDateRange { .. } => Some(MSG_END_BEFORE_START),
            HabitError::NotEditable { .. } => Some(MSG_NOT_EDITABLE),
            _ => None,
        };
        if let Some(message) = message {
            self.prompter.acknowledge(message).await;
        }
        error
    }
}
