/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/register` - create an account, returns user + tokens
/// - `POST /api/auth/login` - verify credentials, returns user + tokens
/// - `POST /api/auth/refresh` - exchange a refresh token for an access token
/// - `GET  /api/auth/me` - current user (requires access token)
///
/// Registration copies the default category set to the new user in one
/// transaction, so an account either starts with the full set or none of it.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use taskflow_shared::{
    auth::{
        context::AuthContext,
        jwt::{self, Claims, TokenType},
        password,
    },
    db::seed,
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login handle
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    /// Optional email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login handle
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Plaintext password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Register/login response: the user plus both tokens
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The authenticated user (password hash omitted)
    pub user: User,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh token
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,
}

/// Registers a new user
///
/// Creates the account, copies the default categories to it (transactional),
/// and returns the user with a fresh token pair.
///
/// # Errors
///
/// - `400` validation failed
/// - `409` username already exists
/// - `500` server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    if User::find_by_username(&state.db, &req.username)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Username already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username.clone(),
            password_hash,
            name: req.name.clone(),
            email: req.email.clone(),
            avatar: None,
            birthday: None,
        },
    )
    .await?;

    seed::copy_defaults_to_user(&state.db, user.id).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let access_token = jwt::create_token(&Claims::new(user.id, TokenType::Access), state.jwt_secret())?;
    let refresh_token =
        jwt::create_token(&Claims::new(user.id, TokenType::Refresh), state.jwt_secret())?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user,
            access_token,
            refresh_token,
        }),
    ))
}

/// Logs a user in
///
/// # Errors
///
/// - `400` validation failed
/// - `401` unknown username or wrong password (indistinguishable on purpose)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let access_token = jwt::create_token(&Claims::new(user.id, TokenType::Access), state.jwt_secret())?;
    let refresh_token =
        jwt::create_token(&Claims::new(user.id, TokenType::Refresh), state.jwt_secret())?;

    Ok(Json(AuthResponse {
        user,
        access_token,
        refresh_token,
    }))
}

/// Exchanges a refresh token for a new access token
///
/// # Errors
///
/// - `401` invalid or expired refresh token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let access_token = jwt::refresh_access_token(&req.refresh_token, state.jwt_secret())?;

    Ok(Json(RefreshResponse { access_token }))
}

/// Returns the currently authenticated user
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            username: "maria".to_string(),
            password: "long-enough-password".to_string(),
            name: Some("Maria".to_string()),
            email: Some("maria@example.com".to_string()),
        };
        assert!(valid.validate().is_ok());

        let short_username = RegisterRequest {
            username: "ab".to_string(),
            password: "long-enough-password".to_string(),
            name: None,
            email: None,
        };
        assert!(short_username.validate().is_err());

        let short_password = RegisterRequest {
            username: "maria".to_string(),
            password: "short".to_string(),
            name: None,
            email: None,
        };
        assert!(short_password.validate().is_err());

        let bad_email = RegisterRequest {
            username: "maria".to_string(),
            password: "long-enough-password".to_string(),
            name: None,
            email: Some("not-an-email".to_string()),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_login_request_requires_both_fields() {
        let empty = LoginRequest {
            username: String::new(),
            password: String::new(),
        };
        assert!(empty.validate().is_err());
    }
}
