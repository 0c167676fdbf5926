//! Schedule and streak engine.
//!
//! Pure functions over a [`Habit`](crate::Habit) and a reference "today".
//! Nothing in here reads a clock or touches the store, so every rule can be
//! tested with fixed dates.

mod schedule;
mod streak;

pub use schedule::{
    completion_status, effective_end_date, effective_start_date, is_active, is_editable,
    DayStatus,
};
pub use streak::{completions_in, current_streak};
