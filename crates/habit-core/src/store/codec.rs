//! Blob encoding for the habit collection.

use std::collections::HashSet;

use crate::error::{HabitError, Result};
use crate::habit::record::HabitRecord;
use crate::habit::Habit;

/// Serialize the collection as a JSON array, in collection order.
pub fn encode(habits: &[Habit]) -> Result<String> {
    let records: Vec<HabitRecord> = habits.iter().map(HabitRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Parse a stored blob.
///
/// A blob that is not a JSON array fails with `MalformedStorage`. Inside a
/// valid array, individual records that cannot be decoded are skipped with a
/// warning, as are records repeating an earlier id.
pub fn decode(blob: &str) -> Result<Vec<Habit>> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(blob).map_err(|e| HabitError::MalformedStorage(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut habits = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let record: HabitRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable habit record");
                continue;
            }
        };
        let habit = match record.into_habit() {
            Ok(habit) => habit,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping invalid habit record");
                continue;
            }
        };
        if !seen.insert(habit.id.clone()) {
            tracing::warn!(index, habit = %habit.id, "skipping duplicate habit id");
            continue;
        }
        habits.push(habit);
    }
    Ok(habits)
}
