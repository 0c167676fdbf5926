//! Habit management commands for CLI.

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use habit_core::{engine, DurationSpec, Habit, HabitId};
use serde::Serialize;

use super::{parse_day, Context, DayArg};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DurationArg {
    /// No end date
    Forever,
    /// One week from today
    Week,
    /// One calendar month from today
    Month,
    /// Until --end
    Custom,
}

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,
        /// How long the habit runs
        #[arg(long, value_enum, default_value = "forever")]
        duration: DurationArg,
        /// End date for --duration custom (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// List habits
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rename a habit
    Rename {
        /// Habit ID
        id: String,
        /// New name
        name: String,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Mark a day as done (today or yesterday)
    Check {
        /// Habit ID
        id: String,
        /// today, yesterday or YYYY-MM-DD
        #[arg(long, value_parser = parse_day, default_value = "today")]
        date: DayArg,
    },
    /// Clear a day (today or yesterday)
    Uncheck {
        /// Habit ID
        id: String,
        /// today, yesterday or YYYY-MM-DD
        #[arg(long, value_parser = parse_day, default_value = "today")]
        date: DayArg,
    },
    /// Show the current streak
    Streak {
        /// Habit ID
        id: String,
    },
}

/// Flat view of a habit for listing.
#[derive(Debug, Serialize)]
struct HabitSummary {
    id: String,
    name: String,
    start: NaiveDate,
    end: Option<NaiveDate>,
    streak: u32,
    completed_days: usize,
}

impl HabitSummary {
    fn new(habit: &Habit, today: NaiveDate) -> Self {
        Self {
            id: habit.id.to_string(),
            name: habit.name.clone(),
            start: engine::effective_start_date(habit),
            end: engine::effective_end_date(habit),
            streak: engine::current_streak(habit, today),
            completed_days: habit.completed_dates.count(),
        }
    }
}

fn duration_spec(duration: DurationArg, end: Option<NaiveDate>) -> Result<DurationSpec, String> {
    match (duration, end) {
        (DurationArg::Custom, end) => Ok(DurationSpec::Custom(end)),
        (_, Some(_)) => Err("--end only applies to --duration custom".to_string()),
        (DurationArg::Forever, None) => Ok(DurationSpec::Forever),
        (DurationArg::Week, None) => Ok(DurationSpec::Weeks(1)),
        (DurationArg::Month, None) => Ok(DurationSpec::Months(1)),
    }
}

pub async fn run(ctx: &Context, action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = ctx.open_tracker()?;

    match action {
        HabitAction::Add { name, duration, end } => {
            let habit = tracker.add(&name, duration_spec(duration, end)?).await?;
            println!("Habit created: {}", habit.id);
            let summary = HabitSummary::new(&habit, tracker.today());
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        HabitAction::List { json } => {
            let today = tracker.today();
            let summaries: Vec<_> = tracker
                .store()
                .all()
                .iter()
                .map(|h| HabitSummary::new(h, today))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else if summaries.is_empty() {
                println!("No habits yet.");
            } else {
                for s in &summaries {
                    let until = s.end.map(|d| d.to_string()).unwrap_or_else(|| "forever".into());
                    println!(
                        "{}  {}  ({} .. {})  streak {}",
                        s.id, s.name, s.start, until, s.streak
                    );
                }
            }
        }
        HabitAction::Rename { id, name } => {
            let habit = tracker.rename(&HabitId::from(id), &name).await?;
            println!("Habit renamed: {}", habit.name);
        }
        HabitAction::Delete { id, yes } => {
            let mut tracker = if yes {
                tracker.with_confirm_delete(false)
            } else {
                tracker
            };
            if tracker.delete(&HabitId::from(id)).await? {
                println!("Habit deleted");
            } else {
                println!("Delete cancelled");
            }
        }
        HabitAction::Check { id, date } => {
            let date = date.resolve(tracker.today());
            let outcome = tracker.toggle(&HabitId::from(id), date, true).await?;
            if outcome.celebrate {
                println!("Nice work! Streak: {}", outcome.streak);
            } else {
                println!("Already done. Streak: {}", outcome.streak);
            }
        }
        HabitAction::Uncheck { id, date } => {
            let date = date.resolve(tracker.today());
            let outcome = tracker.toggle(&HabitId::from(id), date, false).await?;
            println!("Cleared {date}. Streak: {}", outcome.streak);
        }
        HabitAction::Streak { id } => {
            println!("{}", tracker.streak(&HabitId::from(id))?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_date_only_goes_with_custom() {
        let end = NaiveDate::from_ymd_opt(2024, 12, 31);
        assert_eq!(
            duration_spec(DurationArg::Custom, end).unwrap(),
            DurationSpec::Custom(end)
        );
        assert_eq!(
            duration_spec(DurationArg::Week, None).unwrap(),
            DurationSpec::Weeks(1)
        );
        assert!(duration_spec(DurationArg::Week, end).is_err());
        assert!(duration_spec(DurationArg::Forever, end).is_err());
    }
}
