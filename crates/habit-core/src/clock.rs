//! Reference clock collaborator.
//!
//! The engine never reads the wall clock; callers fetch "today" from a
//! [`Clock`] and pass it in.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

/// Source of the current instant and calendar day.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current local calendar day.
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Clock reading local noon on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::new(local_noon(date))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Local noon on `date`, as a UTC instant.
///
/// Noon keeps the round trip back to a calendar day stable across DST
/// transitions, which only ever shift the early-morning hours.
pub fn local_noon(date: NaiveDate) -> DateTime<Utc> {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
    noon.and_local_timezone(Local)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| noon.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_day() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let clock = FixedClock::on(day);
        assert_eq!(clock.today(), day);
    }

    #[test]
    fn system_clock_today_matches_local_date() {
        let before = Local::now().date_naive();
        let today = SystemClock.today();
        let after = Local::now().date_naive();
        assert!(today == before || today == after);
    }
}
