/// Profile endpoint
///
/// # Endpoints
///
/// - `PUT /api/user/profile` - update the caller's profile fields
///
/// Only name, email, avatar and birthday can change through this path;
/// username and password are deliberately not accepted here, so a request
/// carrying them is simply ignored field-by-field by deserialization.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use taskflow_shared::{
    auth::context::AuthContext,
    models::user::{UpdateProfile, User},
};
use validator::Validate;

/// Profile update request; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// Avatar URL
    #[validate(length(max = 512, message = "Avatar URL must be at most 512 characters"))]
    pub avatar: Option<String>,

    /// Birthday, kept as the free text the profile form sends
    pub birthday: Option<String>,
}

/// Updates the caller's profile
///
/// Returns the updated user with the password hash omitted.
///
/// # Errors
///
/// - `400` validation failed
/// - `404` the account no longer exists
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    let user = User::update_profile(
        &state.db,
        auth.user_id,
        UpdateProfile {
            name: req.name,
            email: req.email,
            avatar: req.avatar,
            birthday: req.birthday,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_field_is_not_deserialized() {
        // A client sneaking credential fields into the profile body gets them
        // silently dropped; only the four profile fields exist.
        let req: UpdateProfileRequest = serde_json::from_str(
            r#"{ "name": "Maria", "password": "sneaky", "username": "other" }"#,
        )
        .unwrap();

        assert_eq!(req.name.as_deref(), Some("Maria"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_email_validation() {
        let req = UpdateProfileRequest {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
