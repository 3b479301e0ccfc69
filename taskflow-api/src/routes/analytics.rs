/// Analytics endpoints
///
/// # Endpoints
///
/// - `GET /api/analytics/completion` - task counts per status
/// - `GET /api/analytics/categories` - task counts per category
/// - `GET /api/analytics/weekly` - tasks created per day of week, Sunday first
///
/// All three are single aggregate queries scoped to the caller; the client
/// derives its charts (and the productivity score) from these shapes.
use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use taskflow_shared::{
    auth::context::AuthContext,
    models::task::{CategoryCount, CompletionStats, DayActivity, Task},
};

/// Task counts per status
///
/// The counts always sum to the caller's total task count.
pub async fn completion_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<CompletionStats>> {
    let stats = Task::completion_stats(&state.db, auth.user_id).await?;

    Ok(Json(stats))
}

/// Task counts per category
///
/// Uncategorized tasks are grouped under `"Uncategorized"`.
pub async fn category_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<CategoryCount>>> {
    let stats = Task::count_by_category(&state.db, auth.user_id).await?;

    Ok(Json(stats))
}

/// Tasks created per day of week
///
/// Always exactly 7 entries, Sunday through Saturday, zero-filled.
pub async fn weekly_activity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<DayActivity>>> {
    let activity = Task::weekly_activity(&state.db, auth.user_id).await?;

    Ok(Json(activity))
}
