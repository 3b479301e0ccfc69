/// Database models for TaskFlow
///
/// Each model owns its CRUD operations as static async methods over a
/// `&PgPool`. All task/category operations are scoped by `user_id`; resource
/// ownership is verified by the HTTP layer before calling in here.
///
/// # Models
///
/// - `user`: user accounts (identity root)
/// - `task`: tasks with status/priority enums plus the analytics aggregates
/// - `category`: user-scoped task categories with display colors
pub mod category;
pub mod task;
pub mod user;
