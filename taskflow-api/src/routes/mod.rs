/// API route handlers, organized by resource
///
/// - `health`: health check endpoint
/// - `auth`: register, login, token refresh, current user
/// - `tasks`: task CRUD, by-date lookup
/// - `categories`: category list/create
/// - `analytics`: completion, category and weekly aggregates
/// - `profile`: profile update
pub mod analytics;
pub mod auth;
pub mod categories;
pub mod health;
pub mod profile;
pub mod tasks;
