//! Wire shape of a habit inside the persisted blob.
//!
//! The layout stays readable by older builds: `duration` is either the
//! string `"forever"` or a `{startDate, endDate}` object, completion markers
//! are a `{"YYYY-MM-DD": true}` map, and ids may be millisecond timestamps.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::{normalize_name, ActiveWindow, CompletedDates, Habit, HabitId};

const FOREVER: &str = "forever";

/// Why a single stored record could not become a [`Habit`].
#[derive(Error, Debug)]
pub(crate) enum RecordError {
    #[error("habit {0} has an empty name")]
    EmptyName(String),

    #[error("habit {0} has no creation time and a non-timestamp id")]
    MissingCreationTime(String),

    #[error("habit {id} has an unknown duration keyword '{keyword}'")]
    UnknownDuration { id: String, keyword: String },

    #[error("habit {id} ends ({end}) before it starts ({start})")]
    InvertedWindow {
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum IdRecord {
    Text(String),
    Number(i64),
}

impl From<IdRecord> for HabitId {
    fn from(value: IdRecord) -> Self {
        match value {
            IdRecord::Text(s) => HabitId::from(s),
            IdRecord::Number(n) => HabitId::from(n.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DurationRecord {
    Keyword(String),
    Range {
        #[serde(rename = "startDate")]
        start_date: NaiveDate,
        #[serde(rename = "endDate")]
        end_date: NaiveDate,
    },
}

impl Default for DurationRecord {
    fn default() -> Self {
        DurationRecord::Keyword(FOREVER.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HabitRecord {
    id: IdRecord,
    name: String,
    #[serde(default)]
    duration: DurationRecord,
    #[serde(default)]
    completed_dates: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl From<&Habit> for HabitRecord {
    fn from(habit: &Habit) -> Self {
        let duration = match habit.window {
            ActiveWindow::Unbounded => DurationRecord::default(),
            ActiveWindow::Bounded { start, end } => DurationRecord::Range {
                start_date: start,
                end_date: end,
            },
        };
        let completed_dates = habit
            .completed_dates
            .entries()
            .map(|(date, done)| {
                (
                    date.format("%Y-%m-%d").to_string(),
                    serde_json::Value::Bool(done),
                )
            })
            .collect();

        Self {
            id: IdRecord::Text(habit.id.to_string()),
            name: habit.name.clone(),
            duration,
            completed_dates,
            created_at: Some(habit.created_at),
        }
    }
}

impl HabitRecord {
    /// Validate and convert into a [`Habit`].
    pub(crate) fn into_habit(self) -> Result<Habit, RecordError> {
        let id = HabitId::from(self.id);

        let name = normalize_name(&self.name)
            .map_err(|_| RecordError::EmptyName(id.to_string()))?;

        let created_at = self
            .created_at
            .or_else(|| id.legacy_timestamp())
            .ok_or_else(|| RecordError::MissingCreationTime(id.to_string()))?;

        let window = match self.duration {
            DurationRecord::Keyword(keyword) if keyword == FOREVER => ActiveWindow::Unbounded,
            DurationRecord::Keyword(keyword) => {
                return Err(RecordError::UnknownDuration {
                    id: id.to_string(),
                    keyword,
                })
            }
            DurationRecord::Range {
                start_date,
                end_date,
            } => ActiveWindow::bounded(start_date, end_date).map_err(|_| {
                RecordError::InvertedWindow {
                    id: id.to_string(),
                    start: start_date,
                    end: end_date,
                }
            })?,
        };

        let mut completed_dates = CompletedDates::new();
        for (key, marker) in self.completed_dates {
            match NaiveDate::parse_from_str(&key, "%Y-%m-%d") {
                Ok(date) => completed_dates.insert_raw(date, marker.as_bool() == Some(true)),
                Err(_) => tracing::warn!(habit = %id, key = %key, "dropping unparseable completion date"),
            }
        }

        Ok(Habit {
            id,
            name,
            window,
            completed_dates,
            created_at,
        })
    }
}
