/// Property-style tests for the task data-shaping views
///
/// These exercise the documented guarantees of the list/calendar/analytics
/// shaping over a realistic task set:
/// - due-date sort places undated tasks after all dated ones
/// - the month grid always has 42 cells and aligns the 1st to its weekday
/// - the productivity score is a rounded 0-100 percentage, 0 on empty input
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use taskflow_shared::models::task::{CompletionStats, Task, TaskPriority, TaskStatus};
use taskflow_shared::views::{
    filter_and_sort, month_grid, productivity_score, SortKey, TaskQuery, GRID_CELLS,
};

fn make_task(id: i32, title: &str, due_date: Option<DateTime<Utc>>) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        due_date,
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        category_id: None,
        user_id: 1,
        created_at: Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap(),
    }
}

fn sample_tasks() -> Vec<Task> {
    vec![
        make_task(1, "Water plants", None),
        make_task(
            2,
            "Pay rent",
            Some(Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()),
        ),
        make_task(3, "File taxes", None),
        make_task(
            4,
            "Dentist appointment",
            Some(Utc.with_ymd_and_hms(2025, 6, 3, 9, 30, 0).unwrap()),
        ),
        make_task(
            5,
            "Book flights",
            Some(Utc.with_ymd_and_hms(2025, 6, 3, 22, 0, 0).unwrap()),
        ),
    ]
}

#[test]
fn due_date_sort_puts_undated_tasks_last() {
    let query = TaskQuery {
        sort: SortKey::DueDate,
        ..Default::default()
    };
    let sorted = filter_and_sort(sample_tasks(), &query);

    let first_undated = sorted
        .iter()
        .position(|t| t.due_date.is_none())
        .expect("sample has undated tasks");

    // Every task before the first undated one has a due date; none after does.
    assert!(sorted[..first_undated].iter().all(|t| t.due_date.is_some()));
    assert!(sorted[first_undated..].iter().all(|t| t.due_date.is_none()));

    // Dated tasks are ascending.
    let dates: Vec<_> = sorted.iter().filter_map(|t| t.due_date).collect();
    let mut ascending = dates.clone();
    ascending.sort();
    assert_eq!(dates, ascending);
}

#[test]
fn filters_compose() {
    let mut tasks = sample_tasks();
    tasks[1].status = TaskStatus::Completed;
    tasks[1].priority = TaskPriority::High;

    let query = TaskQuery {
        status: Some(TaskStatus::Completed),
        priority: Some(TaskPriority::High),
        search: Some("rent".to_string()),
        sort: SortKey::Title,
    };
    let result = filter_and_sort(tasks, &query);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 2);
}

#[test]
fn month_grid_is_always_42_cells() {
    let tasks = sample_tasks();

    for year in [2023, 2024, 2025, 2026] {
        for month in 1..=12 {
            let anchor = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let grid = month_grid(anchor, &tasks);
            assert_eq!(grid.len(), GRID_CELLS, "{year}-{month} grid size");
        }
    }
}

#[test]
fn month_grid_first_cell_aligns_to_weekday() {
    for year in [2024, 2025] {
        for month in 1..=12 {
            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let grid = month_grid(first, &[]);

            let first_populated = grid
                .iter()
                .position(|cell| cell.is_some())
                .expect("every month has days");

            assert_eq!(
                first_populated,
                first.weekday().num_days_from_sunday() as usize,
                "{year}-{month} leading padding"
            );
        }
    }
}

#[test]
fn month_grid_buckets_by_calendar_day_not_time() {
    let tasks = sample_tasks();
    let anchor = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let grid = month_grid(anchor, &tasks);

    let june_third = grid
        .iter()
        .flatten()
        .find(|cell| cell.date == NaiveDate::from_ymd_opt(2025, 6, 3).unwrap())
        .unwrap();

    // Tasks 4 and 5 are both due June 3rd, at different times of day.
    let mut ids: Vec<i32> = june_third.tasks.iter().map(|t| t.id).collect();
    ids.sort();
    assert_eq!(ids, vec![4, 5]);
}

#[test]
fn productivity_score_bounds() {
    let empty = CompletionStats {
        completed: 0,
        in_progress: 0,
        pending: 0,
    };
    assert_eq!(productivity_score(&empty), 0);

    for completed in 0..=10i64 {
        for pending in 0..=10i64 {
            let stats = CompletionStats {
                completed,
                in_progress: 0,
                pending,
            };
            let score = productivity_score(&stats);
            assert!(score <= 100);
            if completed > 0 && pending == 0 {
                assert_eq!(score, 100);
            }
        }
    }
}
