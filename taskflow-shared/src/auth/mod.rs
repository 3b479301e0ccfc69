/// Authentication utilities
///
/// - `password`: Argon2id hashing and verification
/// - `jwt`: HS256 access/refresh token creation and validation
/// - `context`: the per-request identity injected by the API's auth middleware
pub mod context;
pub mod jwt;
pub mod password;
