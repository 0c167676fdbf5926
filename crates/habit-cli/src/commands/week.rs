//! Weekly grid output.

use habit_core::{DayStatus, GridCell, Week};

use super::Context;

fn cell(c: &GridCell) -> &'static str {
    match (c.status, c.completed) {
        (DayStatus::Inactive, _) => "     ",
        (DayStatus::Editable, true) => " [x] ",
        (DayStatus::Editable, false) => " [ ] ",
        (DayStatus::ViewOnly, true) => "  x  ",
        (DayStatus::ViewOnly, false) => "  .  ",
    }
}

pub fn run(ctx: &Context, offset: i64, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = ctx.open_tracker()?;
    let today = tracker.today();
    let week = Week::current(today)
        .offset(offset)
        .ok_or("week out of range")?;
    let rows = tracker.week_rows(week);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(5).max(5);
    let mut header = format!("{:width$}", "Habit");
    for date in week.dates() {
        let marker = if date == today { '*' } else { ' ' };
        header.push_str(&format!(" {}{marker}", date.format("%a %d")));
    }
    println!("{header}  Streak");

    for row in &rows {
        let mut line = format!("{:width$}", row.name);
        for c in &row.cells {
            line.push_str("   ");
            line.push_str(cell(c));
        }
        println!("{line}  {}", row.streak);
    }
    Ok(())
}
