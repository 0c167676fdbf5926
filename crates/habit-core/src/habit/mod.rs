//! Habit records and their value types.
//!
//! A [`Habit`] is a named activity with an [`ActiveWindow`] and a sparse set
//! of completion markers keyed by calendar date. Dates are plain
//! [`NaiveDate`]s; "local midnight" normalisation happens once, when a
//! timestamp is turned into a calendar day.

pub(crate) mod record;

use chrono::{DateTime, Days, Local, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::error::{HabitError, Result};

/// Opaque habit identifier.
///
/// New habits get a random UUID. Records written by older versions carry a
/// millisecond timestamp instead; those ids are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation instant encoded in a legacy timestamp id, if any.
    pub fn legacy_timestamp(&self) -> Option<DateTime<Utc>> {
        let millis = self.0.parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(millis)
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HabitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HabitId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Inclusive calendar range during which a habit can be tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveWindow {
    /// From the habit's creation day onward
    Unbounded,
    /// From `start` through `end`, both inclusive
    Bounded { start: NaiveDate, end: NaiveDate },
}

impl ActiveWindow {
    /// Build a bounded window, rejecting `end < start`.
    pub fn bounded(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(HabitError::InvalidDateRange { start, end });
        }
        Ok(ActiveWindow::Bounded { start, end })
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match self {
            ActiveWindow::Unbounded => None,
            ActiveWindow::Bounded { start, .. } => Some(*start),
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match self {
            ActiveWindow::Unbounded => None,
            ActiveWindow::Bounded { end, .. } => Some(*end),
        }
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, ActiveWindow::Bounded { .. })
    }
}

/// How long a new habit should run, as chosen at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationSpec {
    /// No end date
    Forever,
    /// `n` weeks from today
    Weeks(u32),
    /// `n` calendar months from today, same day-of-month where it exists
    Months(u32),
    /// Caller-picked end date; `None` when the user has not chosen one yet
    Custom(Option<NaiveDate>),
}

impl DurationSpec {
    /// Resolve the duration into a window starting on `today`.
    ///
    /// Month arithmetic clamps to the last valid day, so Jan 31 plus one
    /// month is the last day of February. An end past the last representable
    /// date is clamped to [`NaiveDate::MAX`].
    pub fn window_from(&self, today: NaiveDate) -> Result<ActiveWindow> {
        match *self {
            DurationSpec::Forever => Ok(ActiveWindow::Unbounded),
            DurationSpec::Weeks(n) => {
                let end = today
                    .checked_add_days(Days::new(7 * u64::from(n)))
                    .unwrap_or(NaiveDate::MAX);
                ActiveWindow::bounded(today, end)
            }
            DurationSpec::Months(n) => {
                let end = today
                    .checked_add_months(Months::new(n))
                    .unwrap_or(NaiveDate::MAX);
                ActiveWindow::bounded(today, end)
            }
            DurationSpec::Custom(Some(end)) => ActiveWindow::bounded(today, end),
            DurationSpec::Custom(None) => Err(HabitError::MissingEndDate),
        }
    }
}

/// Sparse completion markers keyed by calendar date.
///
/// Only `true` markers are written by the store. `false` entries can still
/// arrive from old blobs and are treated exactly like a missing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedDates(BTreeMap<NaiveDate, bool>);

impl CompletedDates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, date: NaiveDate) {
        self.0.insert(date, true);
    }

    pub fn clear(&mut self, date: NaiveDate) {
        self.0.remove(&date);
    }

    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.0.get(&date).copied().unwrap_or(false)
    }

    /// Dates carrying a true marker, ascending.
    pub fn completed(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.0
            .iter()
            .filter(|(_, done)| **done)
            .map(|(date, _)| *date)
    }

    /// Number of true markers.
    pub fn count(&self) -> usize {
        self.completed().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Raw entries including any stray `false` markers.
    pub fn entries(&self) -> impl Iterator<Item = (NaiveDate, bool)> + '_ {
        self.0.iter().map(|(date, done)| (*date, *done))
    }

    pub(crate) fn insert_raw(&mut self, date: NaiveDate, done: bool) {
        self.0.insert(date, done);
    }
}

impl FromIterator<NaiveDate> for CompletedDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().map(|date| (date, true)).collect())
    }
}

/// A named, user-created tracked activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub window: ActiveWindow,
    pub completed_dates: CompletedDates,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a habit with a fresh id and no completions.
    ///
    /// # Errors
    /// Returns `EmptyName` when `name` is blank after trimming.
    pub fn new(name: &str, window: ActiveWindow, created_at: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            id: HabitId::new(),
            name: normalize_name(name)?,
            window,
            completed_dates: CompletedDates::new(),
            created_at,
        })
    }

    /// Local calendar day on which the habit was created.
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.with_timezone(&Local).date_naive()
    }
}

/// Trim a user-supplied name, rejecting blank input.
pub(crate) fn normalize_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(HabitError::EmptyName);
    }
    Ok(trimmed.to_string())
}
