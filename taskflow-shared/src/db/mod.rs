/// Database utilities
///
/// - `pool`: connection pool construction and health check
/// - `migrations`: embedded migration runner
/// - `seed`: default-category seeding (startup) and per-user copy (registration)
pub mod migrations;
pub mod pool;
pub mod seed;
