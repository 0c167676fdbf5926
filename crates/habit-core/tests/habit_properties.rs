//! Property tests for the schedule and streak rules.

use chrono::{Duration, NaiveDate};
use habit_core::clock::local_noon;
use habit_core::{
    current_streak, engine, is_active, is_editable, ActiveWindow, DurationSpec, FixedClock, Habit,
    HabitStore, MemoryBlobStore,
};
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn day(offset: i64) -> NaiveDate {
    base() + Duration::days(offset)
}

fn window_strategy() -> impl Strategy<Value = ActiveWindow> {
    prop_oneof![
        Just(ActiveWindow::Unbounded),
        (0i64..200, 0i64..60).prop_map(|(start, len)| {
            ActiveWindow::Bounded {
                start: day(start),
                end: day(start + len),
            }
        }),
    ]
}

fn habit_strategy() -> impl Strategy<Value = Habit> {
    (window_strategy(), 0i64..200).prop_map(|(window, created)| {
        Habit::new("Habit", window, local_noon(day(created))).unwrap()
    })
}

proptest! {
    #[test]
    fn nothing_is_active_before_the_start(habit in habit_strategy(), before in 1i64..400) {
        let start = engine::effective_start_date(&habit);
        prop_assert!(!is_active(&habit, start - Duration::days(before)));
    }

    #[test]
    fn bounded_windows_are_exactly_their_range(start in 0i64..200, len in 0i64..60, probe in -30i64..300) {
        let window = ActiveWindow::bounded(day(start), day(start + len)).unwrap();
        let habit = Habit::new("Habit", window, local_noon(day(0))).unwrap();
        let date = day(probe);
        let inside = probe >= start && probe <= start + len;
        prop_assert_eq!(is_active(&habit, date), inside);
    }

    #[test]
    fn editable_implies_active(habit in habit_strategy(), probe in 0i64..300, today in 0i64..300) {
        let (date, today) = (day(probe), day(today));
        if is_editable(&habit, date, today) {
            prop_assert!(is_active(&habit, date));
        }
    }

    #[test]
    fn today_is_editable_whenever_active(habit in habit_strategy(), today in 0i64..300) {
        let today = day(today);
        if is_active(&habit, today) {
            prop_assert!(is_editable(&habit, today, today));
        }
    }

    #[test]
    fn no_recent_completion_means_no_streak(offsets in prop::collection::btree_set(2i64..120, 0..40)) {
        let today = day(200);
        let mut habit = Habit::new("Habit", ActiveWindow::Unbounded, local_noon(day(0))).unwrap();
        habit.completed_dates = offsets.iter().map(|n| today - Duration::days(*n)).collect();
        prop_assert_eq!(current_streak(&habit, today), 0);
    }

    #[test]
    fn full_run_counts_every_day(len in 1i64..100, end_yesterday in any::<bool>()) {
        let today = day(200);
        let last = if end_yesterday { today - Duration::days(1) } else { today };
        let mut habit = Habit::new("Habit", ActiveWindow::Unbounded, local_noon(day(0))).unwrap();
        habit.completed_dates = (0..len).map(|n| last - Duration::days(n)).collect();
        prop_assert_eq!(i64::from(current_streak(&habit, today)), len);
    }

    #[test]
    fn marking_twice_equals_marking_once(offsets in prop::collection::vec(0i64..30, 1..10)) {
        let today = day(100);
        let mut store =
            HabitStore::open_with_clock(MemoryBlobStore::new(), FixedClock::on(today)).unwrap();
        let habit = store.create("Habit", DurationSpec::Forever, today).unwrap();

        for n in &offsets {
            store.set_completion(&habit.id, today - Duration::days(*n), true).unwrap();
        }
        let once = store.get(&habit.id).unwrap().completed_dates.clone();
        for n in &offsets {
            store.set_completion(&habit.id, today - Duration::days(*n), true).unwrap();
        }
        prop_assert_eq!(&store.get(&habit.id).unwrap().completed_dates, &once);
    }
}
