/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware.
///
/// # Router Layout
///
/// ```text
/// /
/// ├── /health                        # Health check (public)
/// └── /api/
///     ├── /auth/
///     │   ├── POST /register          # Create account (public)
///     │   ├── POST /login             # Login (public)
///     │   ├── POST /refresh           # Exchange refresh token (public)
///     │   └── GET  /me                # Current user (authenticated)
///     ├── /tasks/                     # Task CRUD (authenticated)
///     │   ├── GET/POST /
///     │   ├── GET/PUT/DELETE /:id
///     │   └── GET /date/:date
///     ├── /categories/                # GET/POST (authenticated)
///     ├── /analytics/                 # completion|categories|weekly (authenticated)
///     └── /user/profile               # PUT (authenticated)
/// ```
///
/// # Middleware Stack
///
/// Applied bottom to top: request tracing (tower-http `TraceLayer`), CORS,
/// then per-route bearer-token authentication.
use crate::{config::Config, error::ApiError};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskflow_shared::auth::{
    context::{AuthContext, AuthError},
    jwt,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; uses `Arc`
/// internally so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    // Current-user route (requires a valid access token)
    let me_routes = Router::new()
        .route("/me", get(routes::auth::me))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    // Task routes (authenticated)
    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/date/:date", get(routes::tasks::tasks_by_date))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    // Category routes (authenticated)
    let category_routes = Router::new()
        .route(
            "/",
            get(routes::categories::list_categories).post(routes::categories::create_category),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    // Analytics routes (authenticated)
    let analytics_routes = Router::new()
        .route("/completion", get(routes::analytics::completion_stats))
        .route("/categories", get(routes::analytics::category_stats))
        .route("/weekly", get(routes::analytics::weekly_activity))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    // Profile routes (authenticated)
    let profile_routes = Router::new()
        .route("/profile", put(routes::profile::update_profile))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/api/auth", auth_routes.merge(me_routes))
        .nest("/api/tasks", task_routes)
        .nest("/api/categories", category_routes)
        .nest("/api/analytics", analytics_routes)
        .nest("/api/user", profile_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer-token authentication middleware
///
/// Validates the access token from the Authorization header and injects an
/// [`AuthContext`] into the request extensions. Any failure (missing header,
/// non-Bearer scheme, invalid or expired token, refresh token in place of an
/// access token) is an unauthenticated request.
async fn bearer_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_access_token(token, state.jwt_secret())
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    req.extensions_mut()
        .insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}
