/// Task category model and database operations
///
/// Categories are user-scoped labels with a display color, used for grouping
/// tasks. Names are unique across the whole table, not per user, which is
/// why the per-user copies of the default set carry a `-{user_id}` suffix (see
/// [`crate::db::seed`]).
///
/// The current surface only ever creates and lists categories; there is no
/// update or delete path.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task_categories (
///     id SERIAL PRIMARY KEY,
///     name TEXT NOT NULL UNIQUE,
///     user_id INTEGER NOT NULL,
///     color TEXT NOT NULL
/// );
/// ```
use serde::Serialize;
use sqlx::PgPool;

/// Task category: a user-scoped label with a display color
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskCategory {
    /// Unique category ID
    pub id: i32,

    /// Display name, unique across the table
    pub name: String,

    /// Owning user (0 for the seeded system defaults)
    pub user_id: i32,

    /// Hex color string, e.g. `#0070F3`
    pub color: String,
}

/// Input for creating a category
#[derive(Debug, Clone)]
pub struct CreateTaskCategory {
    pub name: String,
    pub user_id: i32,
    pub color: String,
}

impl TaskCategory {
    /// Creates a new category
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint violation if the name is taken.
    pub async fn create(pool: &PgPool, data: CreateTaskCategory) -> Result<Self, sqlx::Error> {
        let category = sqlx::query_as::<_, TaskCategory>(
            r#"
            INSERT INTO task_categories (name, user_id, color)
            VALUES ($1, $2, $3)
            RETURNING id, name, user_id, color
            "#,
        )
        .bind(data.name)
        .bind(data.user_id)
        .bind(data.color)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    /// Lists all categories owned by a user
    pub async fn list_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let categories = sqlx::query_as::<_, TaskCategory>(
            "SELECT id, name, user_id, color FROM task_categories WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }
}
