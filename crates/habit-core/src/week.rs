//! Monday-anchored weekly grid.
//!
//! A [`Week`] is seven consecutive days starting on a Monday. Rows are built
//! from the engine predicates so a renderer only has to draw what it is
//! given.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::engine::{self, DayStatus};
use crate::habit::{Habit, HabitId};

/// Monday of the week containing `date`. Sundays belong to the week that
/// started six days earlier.
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    let back = Days::new(u64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_days(back).unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    /// Week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: monday_of_week(date),
        }
    }

    /// Week containing `today`.
    pub fn current(today: NaiveDate) -> Self {
        Self::containing(today)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Sunday of this week, clamped to the last representable date.
    pub fn end(&self) -> NaiveDate {
        self.day(6)
    }

    /// `None` when the week would fall outside the representable dates.
    pub fn previous(&self) -> Option<Self> {
        self.offset(-1)
    }

    pub fn next(&self) -> Option<Self> {
        self.offset(1)
    }

    /// Week shifted by `weeks`, negative for the past. `None` when the
    /// shifted week does not fit in the calendar.
    pub fn offset(&self, weeks: i64) -> Option<Self> {
        let days = Days::new(weeks.unsigned_abs().checked_mul(7)?);
        let start = if weeks < 0 {
            self.start.checked_sub_days(days)?
        } else {
            self.start.checked_add_days(days)?
        };
        start.checked_add_days(Days::new(6))?;
        Some(Self { start })
    }

    pub fn dates(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|i| self.day(i as u64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    fn day(&self, index: u64) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(index))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// One day of one habit on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub completed: bool,
    pub is_today: bool,
}

/// A habit's row: seven cells plus its current streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRow {
    pub id: HabitId,
    pub name: String,
    pub cells: Vec<GridCell>,
    pub streak: u32,
    /// Completed cells in this row
    pub completed_this_week: usize,
}

pub fn habit_row(habit: &Habit, week: Week, today: NaiveDate) -> HabitRow {
    let cells = week
        .dates()
        .into_iter()
        .map(|date| {
            let status = engine::completion_status(habit, date, today);
            GridCell {
                date,
                status,
                completed: status.is_trackable() && habit.completed_dates.is_completed(date),
                is_today: date == today,
            }
        })
        .collect::<Vec<GridCell>>();
    let completed_this_week = cells.iter().filter(|c| c.completed).count();

    HabitRow {
        id: habit.id.clone(),
        name: habit.name.clone(),
        cells,
        streak: engine::current_streak(habit, today),
        completed_this_week,
    }
}
