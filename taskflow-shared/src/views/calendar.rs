/// Calendar month grid
///
/// Buckets a task list into the 6x7 grid the calendar view renders: 42 cells,
/// padded with leading empties so the 1st of the month lands on its weekday
/// column (Sunday-first), and trailing empties to complete the grid.
use crate::models::task::Task;
use chrono::{Datelike, Duration, NaiveDate};

/// Number of cells in the month grid (6 rows of 7 days)
pub const GRID_CELLS: usize = 42;

/// One populated day cell
#[derive(Debug)]
pub struct CalendarDay<'a> {
    /// The calendar date this cell represents
    pub date: NaiveDate,

    /// Tasks due on this date
    pub tasks: Vec<&'a Task>,
}

/// True when a task's due date falls on the given calendar day
///
/// Compared by day/month/year only; the time of day is ignored.
pub fn due_on(task: &Task, day: NaiveDate) -> bool {
    task.due_date.map(|due| due.date_naive()) == Some(day)
}

/// Builds the 42-cell grid for the month containing `anchor`
///
/// `None` cells are the leading/trailing padding outside the month. Each
/// populated cell collects the tasks due on its date.
pub fn month_grid(anchor: NaiveDate, tasks: &[Task]) -> Vec<Option<CalendarDay<'_>>> {
    let first = anchor
        .with_day(1)
        .expect("the first of the month always exists");

    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .expect("the first of the next month always exists");

    let days_in_month = next_first.signed_duration_since(first).num_days() as usize;
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut cells = Vec::with_capacity(GRID_CELLS);
    for index in 0..GRID_CELLS {
        if index < leading || index >= leading + days_in_month {
            cells.push(None);
            continue;
        }

        let date = first + Duration::days((index - leading) as i64);
        let day_tasks = tasks.iter().filter(|task| due_on(task, date)).collect();
        cells.push(Some(CalendarDay {
            date,
            tasks: day_tasks,
        }));
    }

    cells
}
