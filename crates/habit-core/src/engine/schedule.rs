//! Active-window and editability rules.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::habit::Habit;

/// What a caller may do with a habit's cell on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Outside the active window; not a trackable cell at all
    Inactive,
    /// Today or yesterday inside the window
    Editable,
    /// Inside the window but too old or in the future
    ViewOnly,
}

impl DayStatus {
    pub fn is_trackable(&self) -> bool {
        !matches!(self, DayStatus::Inactive)
    }
}

/// First day the habit applies to.
///
/// Bounded windows use their own start; otherwise the local day the habit
/// was created.
pub fn effective_start_date(habit: &Habit) -> NaiveDate {
    habit.window.start().unwrap_or_else(|| habit.created_on())
}

/// Last day the habit applies to, if any.
pub fn effective_end_date(habit: &Habit) -> Option<NaiveDate> {
    habit.window.end()
}

pub fn is_active(habit: &Habit, date: NaiveDate) -> bool {
    if date < effective_start_date(habit) {
        return false;
    }
    effective_end_date(habit).map_or(true, |end| date <= end)
}

/// Whether the completion on `date` may be toggled as of `today`.
///
/// Only today and yesterday are editable, and only inside the window.
pub fn is_editable(habit: &Habit, date: NaiveDate, today: NaiveDate) -> bool {
    if !is_active(habit, date) {
        return false;
    }
    date == today || Some(date) == today.checked_sub_signed(Duration::days(1))
}

pub fn completion_status(habit: &Habit, date: NaiveDate, today: NaiveDate) -> DayStatus {
    if !is_active(habit, date) {
        DayStatus::Inactive
    } else if is_editable(habit, date, today) {
        DayStatus::Editable
    } else {
        DayStatus::ViewOnly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::local_noon;
    use crate::habit::ActiveWindow;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn forever_created_on(day: NaiveDate) -> Habit {
        Habit::new("Read", ActiveWindow::Unbounded, local_noon(day)).unwrap()
    }

    fn bounded(start: NaiveDate, end: NaiveDate) -> Habit {
        let window = ActiveWindow::bounded(start, end).unwrap();
        Habit::new("Run", window, local_noon(start)).unwrap()
    }

    #[test]
    fn unbounded_habit_starts_on_creation_day() {
        let created = date(2024, 6, 10);
        let habit = forever_created_on(created);

        assert_eq!(effective_start_date(&habit), created);
        assert_eq!(effective_end_date(&habit), None);
        assert!(!is_active(&habit, date(2024, 6, 9)));
        assert!(is_active(&habit, created));
        assert!(is_active(&habit, date(2030, 1, 1)));
    }

    #[test]
    fn bounded_window_is_inclusive() {
        let habit = bounded(date(2024, 6, 10), date(2024, 6, 17));

        assert!(!is_active(&habit, date(2024, 6, 9)));
        assert!(is_active(&habit, date(2024, 6, 10)));
        assert!(is_active(&habit, date(2024, 6, 17)));
        assert!(!is_active(&habit, date(2024, 6, 18)));
    }

    #[test]
    fn bounded_start_overrides_creation_day() {
        let window = ActiveWindow::bounded(date(2024, 6, 15), date(2024, 6, 20)).unwrap();
        let habit = Habit::new("Run", window, local_noon(date(2024, 6, 10))).unwrap();
        assert_eq!(effective_start_date(&habit), date(2024, 6, 15));
    }

    #[test]
    fn future_start_is_not_active_today() {
        let today = date(2024, 6, 10);
        let habit = bounded(date(2024, 6, 11), date(2024, 6, 20));
        assert!(!is_active(&habit, today));
        assert!(!is_editable(&habit, today, today));
    }

    #[test]
    fn only_today_and_yesterday_are_editable() {
        let today = date(2024, 6, 20);
        let habit = forever_created_on(date(2024, 6, 1));

        assert!(is_editable(&habit, today, today));
        assert!(is_editable(&habit, date(2024, 6, 19), today));
        assert!(!is_editable(&habit, date(2024, 6, 18), today));
        assert!(!is_editable(&habit, date(2024, 6, 21), today));
    }

    #[test]
    fn yesterday_before_window_start_is_not_editable() {
        let today = date(2024, 6, 10);
        let habit = forever_created_on(today);
        assert!(!is_editable(&habit, date(2024, 6, 9), today));
        assert!(is_editable(&habit, today, today));
    }

    #[test]
    fn yesterday_is_editable_after_window_end() {
        let habit = bounded(date(2024, 6, 1), date(2024, 6, 9));
        let today = date(2024, 6, 10);
        assert!(is_editable(&habit, date(2024, 6, 9), today));
        assert!(!is_editable(&habit, today, today));
    }

    #[test]
    fn status_classifies_every_cell() {
        let today = date(2024, 6, 12);
        let habit = bounded(date(2024, 6, 10), date(2024, 6, 14));

        assert_eq!(completion_status(&habit, date(2024, 6, 9), today), DayStatus::Inactive);
        assert_eq!(completion_status(&habit, date(2024, 6, 10), today), DayStatus::ViewOnly);
        assert_eq!(completion_status(&habit, date(2024, 6, 11), today), DayStatus::Editable);
        assert_eq!(completion_status(&habit, today, today), DayStatus::Editable);
        assert_eq!(completion_status(&habit, date(2024, 6, 13), today), DayStatus::ViewOnly);
        assert_eq!(completion_status(&habit, date(2024, 6, 15), today), DayStatus::Inactive);
        assert!(!DayStatus::Inactive.is_trackable());
    }
}
