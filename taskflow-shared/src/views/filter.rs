/// Task list filtering and sorting
///
/// Reproduces, server-side and testable, what the task list view does with a
/// fetched task list: narrow by status/priority/search text, then order by the
/// selected sort key.
use crate::models::task::{Task, TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort key for the task list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Ascending by due date; tasks without one sort last
    #[default]
    DueDate,

    /// High before medium before low
    Priority,

    /// Lexicographic by title
    Title,
}

/// Filter and sort criteria for a task list
///
/// `None` filters mean "all". Search matches a case-insensitive substring of
/// the title or the description.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub search: Option<String>,
    pub sort: SortKey,
}

/// True when a task passes every active filter
pub fn matches(task: &Task, query: &TaskQuery) -> bool {
    if let Some(status) = query.status {
        if task.status != status {
            return false;
        }
    }

    if let Some(priority) = query.priority {
        if task.priority != priority {
            return false;
        }
    }

    if let Some(ref search) = query.search {
        if !search.is_empty() {
            let needle = search.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !in_title && !in_description {
                return false;
            }
        }
    }

    true
}

/// Compares two tasks under a sort key
pub fn compare(a: &Task, b: &Task, sort: SortKey) -> Ordering {
    match sort {
        SortKey::DueDate => match (a.due_date, b.due_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
        },
        SortKey::Priority => b.priority.rank().cmp(&a.priority.rank()),
        SortKey::Title => a.title.cmp(&b.title),
    }
}

/// Applies a query to a task list: filters, then sorts (stable)
pub fn filter_and_sort(tasks: Vec<Task>, query: &TaskQuery) -> Vec<Task> {
    let mut filtered: Vec<Task> = tasks
        .into_iter()
        .filter(|task| matches(task, query))
        .collect();

    filtered.sort_by(|a, b| compare(a, b, query.sort));
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(id: i32, title: &str, status: TaskStatus, priority: TaskPriority) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            due_date: None,
            status,
            priority,
            category_id: None,
            user_id: 1,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_status_filter_exact_match() {
        let t = task(1, "a", TaskStatus::Pending, TaskPriority::Low);

        let all = TaskQuery::default();
        assert!(matches(&t, &all));

        let pending = TaskQuery {
            status: Some(TaskStatus::Pending),
            ..Default::default()
        };
        assert!(matches(&t, &pending));

        let completed = TaskQuery {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        assert!(!matches(&t, &completed));
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let mut t = task(1, "Buy groceries", TaskStatus::Pending, TaskPriority::Low);
        t.description = Some("milk and EGGS".to_string());

        let by_title = TaskQuery {
            search: Some("GROC".to_string()),
            ..Default::default()
        };
        assert!(matches(&t, &by_title));

        let by_description = TaskQuery {
            search: Some("eggs".to_string()),
            ..Default::default()
        };
        assert!(matches(&t, &by_description));

        let no_match = TaskQuery {
            search: Some("rent".to_string()),
            ..Default::default()
        };
        assert!(!matches(&t, &no_match));

        // Empty search behaves like no search.
        let empty = TaskQuery {
            search: Some(String::new()),
            ..Default::default()
        };
        assert!(matches(&t, &empty));
    }

    #[test]
    fn test_search_without_description() {
        let t = task(1, "Pay rent", TaskStatus::Pending, TaskPriority::Low);

        let query = TaskQuery {
            search: Some("milk".to_string()),
            ..Default::default()
        };
        assert!(!matches(&t, &query));
    }

    #[test]
    fn test_sort_by_due_date_places_undated_last() {
        let mut a = task(1, "a", TaskStatus::Pending, TaskPriority::Low);
        let mut b = task(2, "b", TaskStatus::Pending, TaskPriority::Low);
        let c = task(3, "c", TaskStatus::Pending, TaskPriority::Low);
        a.due_date = Some(Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap());
        b.due_date = Some(Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap());

        let sorted = filter_and_sort(vec![c.clone(), a.clone(), b.clone()], &TaskQuery::default());
        let ids: Vec<i32> = sorted.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_by_priority_high_first() {
        let low = task(1, "low", TaskStatus::Pending, TaskPriority::Low);
        let high = task(2, "high", TaskStatus::Pending, TaskPriority::High);
        let medium = task(3, "medium", TaskStatus::Pending, TaskPriority::Medium);

        let query = TaskQuery {
            sort: SortKey::Priority,
            ..Default::default()
        };
        let sorted = filter_and_sort(vec![low, high, medium], &query);
        let ids: Vec<i32> = sorted.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_title() {
        let b = task(1, "Beta", TaskStatus::Pending, TaskPriority::Low);
        let a = task(2, "Alpha", TaskStatus::Pending, TaskPriority::Low);

        let query = TaskQuery {
            sort: SortKey::Title,
            ..Default::default()
        };
        let sorted = filter_and_sort(vec![b, a], &query);
        assert_eq!(sorted[0].title, "Alpha");
    }
}
