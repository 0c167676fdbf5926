//! Habit store: the single owner and writer of the habit collection.
//!
//! Every mutating operation persists the full collection through the
//! [`BlobStore`] before returning. Editability is not checked here; callers
//! consult the [`engine`](crate::engine) first.

mod blob;
pub mod codec;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{HabitError, Result};
use crate::habit::{normalize_name, DurationSpec, Habit, HabitId};

/// Returns `~/.config/habit/`, creating it if needed.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("habit");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Ordered habit collection backed by a blob store.
pub struct HabitStore<B: BlobStore> {
    habits: Vec<Habit>,
    blobs: B,
    clock: Box<dyn Clock>,
}

impl<B: BlobStore> HabitStore<B> {
    /// Load the collection from `blobs`, stamping new habits with the wall clock.
    ///
    /// # Errors
    /// Returns an error only if the blob store itself fails to read. A
    /// malformed blob yields an empty collection.
    pub fn open(blobs: B) -> Result<Self> {
        Self::open_with_clock(blobs, SystemClock)
    }

    /// Load the collection, using `clock` for creation timestamps.
    pub fn open_with_clock(blobs: B, clock: impl Clock + 'static) -> Result<Self> {
        let habits = match blobs.load()? {
            None => Vec::new(),
            Some(blob) => match codec::decode(&blob) {
                Ok(habits) => habits,
                Err(e) => {
                    warn!(error = %e, "resetting to an empty habit collection");
                    Vec::new()
                }
            },
        };
        debug!(count = habits.len(), "habit collection loaded");
        Ok(Self {
            habits,
            blobs,
            clock: Box::new(clock),
        })
    }

    /// Create a habit starting on `today`.
    ///
    /// # Errors
    /// `EmptyName` for a blank name, `MissingEndDate` for a custom duration
    /// without an end, `InvalidDateRange` for a custom end before `today`.
    pub fn create(&mut self, name: &str, duration: DurationSpec, today: NaiveDate) -> Result<Habit> {
        let name = normalize_name(name)?;
        let window = duration.window_from(today)?;
        let habit = Habit::new(&name, window, self.clock.now())?;

        debug!(habit = %habit.id, name = %habit.name, "habit created");
        self.habits.push(habit.clone());
        self.persist()?;
        Ok(habit)
    }

    /// Rename a habit.
    ///
    /// A blank name is rejected with `EmptyName`; the stored name stays as it
    /// was, but the collection is still saved.
    pub fn rename(&mut self, id: &HabitId, new_name: &str) -> Result<Habit> {
        let index = self.index_of(id)?;
        let name = match normalize_name(new_name) {
            Ok(name) => name,
            Err(e) => {
                self.persist()?;
                return Err(e);
            }
        };

        self.habits[index].name = name;
        debug!(habit = %id, name = %self.habits[index].name, "habit renamed");
        self.persist()?;
        Ok(self.habits[index].clone())
    }

    /// Remove a habit permanently.
    pub fn delete(&mut self, id: &HabitId) -> Result<()> {
        let index = self.index_of(id)?;
        let removed = self.habits.remove(index);
        debug!(habit = %removed.id, name = %removed.name, "habit deleted");
        self.persist()
    }

    /// Mark or clear completion for `date`.
    ///
    /// Clearing removes the entry; a `false` marker is never written.
    pub fn set_completion(&mut self, id: &HabitId, date: NaiveDate, completed: bool) -> Result<()> {
        let index = self.index_of(id)?;
        let dates = &mut self.habits[index].completed_dates;
        if completed {
            dates.mark(date);
        } else {
            dates.clear(date);
        }
        debug!(habit = %id, %date, completed, "completion updated");
        self.persist()
    }

    /// Clock used for creation timestamps. Callers that need "today" read it
    /// from here so both agree.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Snapshot of all habits in creation order.
    pub fn all(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == id)
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// The backing blob store.
    pub fn blob_store(&self) -> &B {
        &self.blobs
    }

    fn index_of(&self, id: &HabitId) -> Result<usize> {
        self.habits
            .iter()
            .position(|h| &h.id == id)
            .ok_or_else(|| HabitError::NotFound(id.clone()))
    }

    fn persist(&self) -> Result<()> {
        let blob = codec::encode(&self.habits)?;
        self.blobs.save(&blob)
    }
}
