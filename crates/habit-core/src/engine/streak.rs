//! Consecutive-completion streaks.

use chrono::{Duration, NaiveDate};

use super::schedule::is_active;
use crate::habit::Habit;

/// Length of the streak ending today or yesterday.
///
/// The streak is anchored on the most recent completion that falls on
/// `today` or the day before; without one the streak is broken and the
/// result is 0. From the anchor the walk goes backward one day at a time and
/// stops at the first missing day. Earlier runs behind a gap never count.
///
/// Completions after `today` are ignored.
pub fn current_streak(habit: &Habit, today: NaiveDate) -> u32 {
    let yesterday = today - Duration::days(1);

    let mut completed = habit.completed_dates.completed().rev().skip_while(|d| *d > today);

    let anchor = match completed.find(|d| *d == today || *d == yesterday) {
        Some(anchor) => anchor,
        None => return 0,
    };

    let mut streak = 1;
    let mut last_day = anchor;
    for candidate in completed {
        if candidate != last_day - Duration::days(1) {
            break;
        }
        streak += 1;
        last_day = candidate;
    }
    streak
}

/// Number of completed days in the inclusive range `from..=to`. Markers on
/// days outside the habit's active window are not counted.
pub fn completions_in(habit: &Habit, from: NaiveDate, to: NaiveDate) -> usize {
    habit
        .completed_dates
        .completed()
        .filter(|d| *d >= from && *d <= to && is_active(habit, *d))
        .count()
}
