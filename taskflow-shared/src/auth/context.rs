/// Authentication context
///
/// After the API's bearer-token middleware validates a request, it inserts an
/// [`AuthContext`] into the request extensions. Handlers extract it with
/// Axum's `Extension` extractor and use `user_id` for every ownership check.
///
/// # Example
///
/// ```ignore
/// use axum::Extension;
/// use taskflow_shared::auth::context::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("acting user: {}", auth.user_id)
/// }
/// ```
use serde::{Deserialize, Serialize};

use super::jwt::Claims;

/// Identity of the authenticated caller
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: i32,
}

impl AuthContext {
    /// Builds a context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
        }
    }

    /// True when the context's user owns a resource with the given owner id
    pub fn owns(&self, owner_id: i32) -> bool {
        self.user_id == owner_id
    }
}

/// Errors surfaced by the authentication middleware
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header was supplied
    #[error("Missing credentials")]
    MissingCredentials,

    /// The Authorization header was not a Bearer token
    #[error("Invalid authorization format: {0}")]
    InvalidFormat(String),

    /// The token failed validation
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::TokenType;

    #[test]
    fn test_from_claims() {
        let claims = Claims::new(42, TokenType::Access);
        let ctx = AuthContext::from_claims(&claims);
        assert_eq!(ctx.user_id, 42);
    }

    #[test]
    fn test_owns() {
        let ctx = AuthContext { user_id: 5 };
        assert!(ctx.owns(5));
        assert!(!ctx.owns(6));
    }
}
