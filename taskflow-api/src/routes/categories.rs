/// Category endpoints
///
/// # Endpoints
///
/// - `GET  /api/categories` - list the caller's categories
/// - `POST /api/categories` - create a category; when no color is supplied,
///   the server picks a random `#RRGGBB` one
///
/// Category names are unique table-wide, so a duplicate name (including a
/// clash with another user's category) is a 409.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use rand::Rng;
use serde::Deserialize;
use taskflow_shared::{
    auth::context::AuthContext,
    models::category::{CreateTaskCategory, TaskCategory},
};
use validator::Validate;

/// Create-category request body
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Category name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Display color; generated server-side when omitted
    pub color: Option<String>,
}

/// Generates a random display color, always `#` plus six hex digits
fn random_color() -> String {
    let value: u32 = rand::thread_rng().gen_range(0..=0xFFFFFF);
    format!("#{value:06X}")
}

/// Lists the caller's categories
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<TaskCategory>>> {
    let categories = TaskCategory::list_by_user(&state.db, auth.user_id).await?;

    Ok(Json(categories))
}

/// Creates a category owned by the caller
///
/// # Errors
///
/// - `400` invalid data
/// - `409` name already taken
pub async fn create_category(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<TaskCategory>)> {
    req.validate()?;

    let color = req.color.filter(|c| !c.is_empty()).unwrap_or_else(random_color);

    let category = TaskCategory::create(
        &state.db,
        CreateTaskCategory {
            name: req.name,
            user_id: auth.user_id,
            color,
        },
    )
    .await
    .map_err(ApiError::from)?;

    tracing::info!(
        category_id = category.id,
        user_id = auth.user_id,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(category)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_color_is_six_hex_digits() {
        for _ in 0..200 {
            let color = random_color();
            assert!(color.starts_with('#'));
            assert_eq!(color.len(), 7);
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_create_request_rejects_empty_name() {
        let req = CreateCategoryRequest {
            name: String::new(),
            color: None,
        };
        assert!(req.validate().is_err());
    }
}
