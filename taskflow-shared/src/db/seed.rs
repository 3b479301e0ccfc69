/// Default-category seeding
///
/// The default category set lives in the database under the sentinel
/// [`SYSTEM_USER_ID`], seeded once at deployment by [`seed_default_categories`]
/// (an explicit startup step, not a storage-constructor side effect). Each new
/// user gets a private copy of that set at registration via
/// [`copy_defaults_to_user`].
///
/// Category names are unique across the whole table, so the per-user copies
/// are suffixed with the owner's id: `Work-42`, `Personal-42`, and so on.
use crate::models::category::TaskCategory;
use sqlx::PgPool;
use tracing::info;

/// Sentinel owner id for the seeded default categories
///
/// No users row carries this id; it exists only to anchor the shared defaults.
pub const SYSTEM_USER_ID: i32 = 0;

/// The default category set every new user starts from
pub const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("Work", "#0070F3"),
    ("Personal", "#FF0080"),
    ("Learning", "#7928CA"),
    ("Health", "#50C878"),
];

/// Seeds the default categories under the system user, if not already present
///
/// Idempotent: a second run finds the sentinel rows and does nothing. Run once
/// at startup, after migrations.
pub async fn seed_default_categories(pool: &PgPool) -> Result<(), sqlx::Error> {
    let (existing,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM task_categories WHERE user_id = $1")
            .bind(SYSTEM_USER_ID)
            .fetch_one(pool)
            .await?;

    if existing > 0 {
        return Ok(());
    }

    for (name, color) in DEFAULT_CATEGORIES {
        sqlx::query("INSERT INTO task_categories (name, user_id, color) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(SYSTEM_USER_ID)
            .bind(color)
            .execute(pool)
            .await?;
    }

    info!(
        count = DEFAULT_CATEGORIES.len(),
        "Seeded default task categories"
    );
    Ok(())
}

/// Copies the system default categories to a newly created user
///
/// All-or-nothing: the lookup and every insert run in one transaction, so a
/// user either gets the complete default set or none of it. Names are suffixed
/// with the user id to satisfy the table-wide unique constraint.
pub async fn copy_defaults_to_user(
    pool: &PgPool,
    user_id: i32,
) -> Result<Vec<TaskCategory>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let defaults: Vec<TaskCategory> = sqlx::query_as(
        "SELECT id, name, user_id, color FROM task_categories WHERE user_id = $1 ORDER BY id",
    )
    .bind(SYSTEM_USER_ID)
    .fetch_all(&mut *tx)
    .await?;

    let mut copied = Vec::with_capacity(defaults.len());
    for default in defaults {
        let category: TaskCategory = sqlx::query_as(
            r#"
            INSERT INTO task_categories (name, user_id, color)
            VALUES ($1, $2, $3)
            RETURNING id, name, user_id, color
            "#,
        )
        .bind(format!("{}-{}", default.name, user_id))
        .bind(user_id)
        .bind(default.color)
        .fetch_one(&mut *tx)
        .await?;

        copied.push(category);
    }

    tx.commit().await?;

    Ok(copied)
}
