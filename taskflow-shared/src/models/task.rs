/// Task model and database operations
///
/// This module provides the Task model, the status/priority enums, and every
/// task-level read and write the API exposes: CRUD, filtered reads, and the
/// aggregate analytics queries.
///
/// All reads and writes here are scoped to a `user_id`. Ownership of a
/// *specific* task (does this row belong to the acting user?) is enforced one
/// layer up, in the HTTP handlers; this layer trusts the ids it is given.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT,
///     due_date TIMESTAMPTZ,
///     status TEXT NOT NULL DEFAULT 'pending',
///     priority TEXT NOT NULL DEFAULT 'medium',
///     category_id INTEGER REFERENCES task_categories(id),
///     user_id INTEGER NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::models::task::{CreateTask, Task, TaskPriority, TaskStatus};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, user_id: i32) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     title: "Pay rent".to_string(),
///     description: None,
///     due_date: None,
///     status: TaskStatus::Pending,
///     priority: TaskPriority::High,
///     category_id: None,
///     user_id,
/// }).await?;
///
/// let all = Task::list_by_user(&pool, user_id).await?;
/// assert!(all.iter().any(|t| t.id == task.id));
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;

/// Task status
///
/// Stored as TEXT in the database; the API rejects any value outside this set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started yet
    #[default]
    Pending,

    /// Being worked on
    InProgress,

    /// Done
    Completed,
}

/// Error returned when parsing an unknown status string
#[derive(Debug, thiserror::Error)]
#[error("invalid task status: {0:?} (expected one of: pending, in-progress, completed)")]
pub struct InvalidStatus(pub String);

impl TaskStatus {
    /// All accepted wire values, in display order
    pub const ALL: [&'static str; 3] = ["pending", "in-progress", "completed"];

    /// Wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,

    #[default]
    Medium,

    High,
}

/// Error returned when parsing an unknown priority string
#[derive(Debug, thiserror::Error)]
#[error("invalid task priority: {0:?} (expected one of: low, medium, high)")]
pub struct InvalidPriority(pub String);

impl TaskPriority {
    /// All accepted wire values, in ascending order
    pub const ALL: [&'static str; 3] = ["low", "medium", "high"];

    /// Wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// Numeric rank for sorting: high > medium > low
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::Low => 1,
            TaskPriority::Medium => 2,
            TaskPriority::High => 3,
        }
    }
}

impl FromStr for TaskPriority {
    type Err = InvalidPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(InvalidPriority(other.to_string())),
        }
    }
}

/// Coerces a raw due-date string into a timestamp, leniently.
///
/// Accepted inputs: RFC 3339 (`2025-06-01T09:30:00Z`, with or without offset),
/// a bare datetime (`2025-06-01T09:30:00`, taken as UTC), or a bare date
/// (`2025-06-01`, taken as midnight UTC).
///
/// Anything else, including garbage, yields `None`, i.e. "no due date".
/// That leniency is a deliberate policy of this application: a malformed due
/// date is recovered locally rather than rejected.
pub fn coerce_due_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    None
}

/// Task model: a user-owned unit of work
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: i32,

    /// Short summary, always present
    pub title: String,

    /// Free text, rendered as markdown by clients
    pub description: Option<String>,

    /// When the task is due, if scheduled at all
    pub due_date: Option<DateTime<Utc>>,

    /// Current status
    pub status: TaskStatus,

    /// Priority level
    pub priority: TaskPriority,

    /// Category this task is filed under, if any
    pub category_id: Option<i32>,

    /// Owning user
    pub user_id: i32,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last mutated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub category_id: Option<i32>,
    pub user_id: i32,
}

/// Input for partially updating a task
///
/// Outer `None` means "leave the column alone"; inner `None` (for the nullable
/// columns) means "clear it". `updated_at` is refreshed on every update.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category_id: Option<Option<i32>>,
}

impl UpdateTask {
    /// True when the update would touch no column
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.category_id.is_none()
    }
}

const TASK_COLUMNS: &str = "id, title, description, due_date, status, priority, \
                            category_id, user_id, created_at, updated_at";

/// Completion counts per status for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub completed: i64,
    pub in_progress: i64,
    pub pending: i64,
}

impl CompletionStats {
    /// Total number of tasks counted
    pub fn total(&self) -> i64 {
        self.completed + self.in_progress + self.pending
    }
}

/// Task count for one category grouping key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Task-creation count for one day of the week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayActivity {
    pub day: String,
    pub count: i64,
}

/// Day names in Sunday-first order, matching Postgres `EXTRACT(DOW ...)`
pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl Task {
    /// Creates a new task
    ///
    /// The caller is responsible for having forced `user_id` to the
    /// authenticated user and for having normalized `due_date` (see
    /// [`coerce_due_date`]).
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (title, description, due_date, status, priority, category_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(data.title)
        .bind(data.description)
        .bind(data.due_date)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.category_id)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    ///
    /// Not user-scoped: handlers fetch first, then compare `user_id` against
    /// the caller (not-found is reported before forbidden).
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let task =
            sqlx::query_as::<_, Task>(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(task)
    }

    /// Lists all tasks owned by a user, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC",
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Partially updates a task
    ///
    /// Only the fields present in `data` are written; `updated_at` is always
    /// refreshed. Returns the updated task, or `None` if the row is gone.
    pub async fn update(
        pool: &PgPool,
        id: i32,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the SET list dynamically from the populated fields.
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${bind_count}"));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${bind_count}"));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${bind_count}"));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${bind_count}"));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${bind_count}"));
        }
        if data.category_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", category_id = ${bind_count}"));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {TASK_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(category_id) = data.category_id {
            q = q.bind(category_id);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task by ID
    ///
    /// Returns true if a row was deleted, false if the id matched nothing.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists a user's tasks due on a given calendar day
    ///
    /// The range covers the whole day: midnight inclusive up to the next
    /// midnight exclusive, in UTC.
    pub async fn list_by_date(
        pool: &PgPool,
        user_id: i32,
        day: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let start = day.and_time(NaiveTime::MIN).and_utc();
        let end = start + chrono::Duration::days(1);

        let tasks = sqlx::query_as::<_, Task>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE user_id = $1 AND due_date >= $2 AND due_date < $3
            ORDER BY due_date ASC
            "#,
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists a user's tasks with a given status
    pub async fn list_by_status(
        pool: &PgPool,
        user_id: i32,
        status: TaskStatus,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 AND status = $2 ORDER BY created_at DESC",
        ))
        .bind(user_id)
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists a user's tasks with a given priority
    pub async fn list_by_priority(
        pool: &PgPool,
        user_id: i32,
        priority: TaskPriority,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 AND priority = $2 ORDER BY created_at DESC",
        ))
        .bind(user_id)
        .bind(priority)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Counts a user's tasks per status
    ///
    /// The three counts always sum to the user's total task count.
    pub async fn completion_stats(
        pool: &PgPool,
        user_id: i32,
    ) -> Result<CompletionStats, sqlx::Error> {
        let (completed, in_progress, pending): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'completed'),
                COUNT(*) FILTER (WHERE status = 'in-progress'),
                COUNT(*) FILTER (WHERE status = 'pending')
            FROM tasks
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(CompletionStats {
            completed,
            in_progress,
            pending,
        })
    }

    /// Counts a user's tasks per category
    ///
    /// Tasks without a category are grouped under `"Uncategorized"`.
    pub async fn count_by_category(
        pool: &PgPool,
        user_id: i32,
    ) -> Result<Vec<CategoryCount>, sqlx::Error> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT COALESCE(c.name, 'Uncategorized') AS category, COUNT(*) AS count
            FROM tasks t
            LEFT JOIN task_categories c ON t.category_id = c.id
            WHERE t.user_id = $1
            GROUP BY COALESCE(c.name, 'Uncategorized')
            ORDER BY count DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect())
    }

    /// Counts tasks created per day of week, Sunday first
    ///
    /// Always returns exactly 7 entries; days with no activity carry a zero.
    pub async fn weekly_activity(
        pool: &PgPool,
        user_id: i32,
    ) -> Result<Vec<DayActivity>, sqlx::Error> {
        let rows: Vec<(i32, i64)> = sqlx::query_as(
            r#"
            SELECT EXTRACT(DOW FROM created_at)::INT AS day_of_week, COUNT(*) AS count
            FROM tasks
            WHERE user_id = $1
            GROUP BY day_of_week
            ORDER BY day_of_week
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let mut counts = [0i64; 7];
        for (dow, count) in rows {
            if (0..7).contains(&dow) {
                counts[dow as usize] = count;
            }
        }

        Ok(WEEKDAYS
            .iter()
            .zip(counts)
            .map(|(day, count)| DayActivity {
                day: (*day).to_string(),
                count,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_status_round_trip() {
        for raw in TaskStatus::ALL {
            let status: TaskStatus = raw.parse().unwrap();
            assert_eq!(status.as_str(), raw);
        }
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert!("done".parse::<TaskStatus>().is_err());
        assert!("PENDING".parse::<TaskStatus>().is_err());
        assert!("".parse::<TaskStatus>().is_err());
        // The wire value is kebab-case, not snake_case.
        assert!("in_progress".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_priority_round_trip_and_rank() {
        for raw in TaskPriority::ALL {
            let priority: TaskPriority = raw.parse().unwrap();
            assert_eq!(priority.as_str(), raw);
        }
        assert!(TaskPriority::High.rank() > TaskPriority::Medium.rank());
        assert!(TaskPriority::Medium.rank() > TaskPriority::Low.rank());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn test_status_serde_uses_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let back: TaskStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(back, TaskStatus::InProgress);
    }

    #[test]
    fn test_coerce_due_date_rfc3339() {
        let dt = coerce_due_date("2025-06-01T09:30:00Z").unwrap();
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.minute(), 30);

        // Offset input normalizes to UTC
        let dt = coerce_due_date("2025-06-01T09:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 7);
    }

    #[test]
    fn test_coerce_due_date_bare_forms() {
        let dt = coerce_due_date("2025-06-01T09:30:00").unwrap();
        assert_eq!(dt.hour(), 9);

        let dt = coerce_due_date("2025-06-01").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.minute(), 0);
    }

    #[test]
    fn test_coerce_due_date_malformed_becomes_none() {
        assert!(coerce_due_date("not-a-date").is_none());
        assert!(coerce_due_date("").is_none());
        assert!(coerce_due_date("2025-13-45").is_none());
        assert!(coerce_due_date("tomorrow").is_none());
        assert!(coerce_due_date("01/06/2025").is_none());
    }

    #[test]
    fn test_update_task_is_empty() {
        assert!(UpdateTask::default().is_empty());

        let update = UpdateTask {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        assert!(!update.is_empty());

        // Clearing a nullable column still counts as a change.
        let clear = UpdateTask {
            due_date: Some(None),
            ..Default::default()
        };
        assert!(!clear.is_empty());
    }

    #[test]
    fn test_completion_stats_total() {
        let stats = CompletionStats {
            completed: 3,
            in_progress: 2,
            pending: 5,
        };
        assert_eq!(stats.total(), 10);
    }

    #[test]
    fn test_weekdays_sunday_first() {
        assert_eq!(WEEKDAYS[0], "Sun");
        assert_eq!(WEEKDAYS[6], "Sat");
        assert_eq!(WEEKDAYS.len(), 7);
    }

    // Database-backed coverage for the queries themselves needs a live
    // Postgres and lives outside the unit suite.
}
