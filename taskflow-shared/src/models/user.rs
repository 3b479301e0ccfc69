/// User model and database operations
///
/// Users are the identity root of the system: every task and category hangs
/// off a `user_id`. Passwords are stored as Argon2id hashes (see
/// [`crate::auth::password`]), never in plaintext, and the hash is never
/// serialized into API responses.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id SERIAL PRIMARY KEY,
///     username TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     name TEXT,
///     email TEXT,
///     avatar TEXT,
///     birthday TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     username: "maria".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     name: Some("Maria".to_string()),
///     email: None,
///     avatar: None,
///     birthday: None,
/// }).await?;
///
/// let found = User::find_by_username(&pool, "maria").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// User account
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID
    pub id: i32,

    /// Login handle, unique across all users
    pub username: String,

    /// Argon2id password hash; never leaves the server
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Optional display name
    pub name: Option<String>,

    /// Optional email address
    pub email: Option<String>,

    /// Optional avatar URL
    pub avatar: Option<String>,

    /// Optional birthday, stored as free text the way the profile form sends it
    pub birthday: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login handle (must be unique)
    pub username: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub birthday: Option<String>,
}

/// Input for updating profile fields
///
/// Credential fields (username, password) are deliberately absent: the profile
/// path never touches them. Only non-None fields are written.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub birthday: Option<String>,
}

impl UpdateProfile {
    /// True when no field would be written
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.avatar.is_none()
            && self.birthday.is_none()
    }
}

const USER_COLUMNS: &str = "id, username, password_hash, name, email, avatar, birthday, created_at";

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint violation if the username is taken.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, password_hash, name, email, avatar, birthday)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(data.username)
        .bind(data.password_hash)
        .bind(data.name)
        .bind(data.email)
        .bind(data.avatar)
        .bind(data.birthday)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(user)
    }

    /// Finds a user by username (exact match)
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1",
        ))
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Updates profile fields (name, email, avatar, birthday)
    ///
    /// Returns the updated user, or `None` if the id matched nothing.
    pub async fn update_profile(
        pool: &PgPool,
        id: i32,
        data: UpdateProfile,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let mut sets = Vec::new();
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            sets.push(format!("name = ${bind_count}"));
        }
        if data.email.is_some() {
            bind_count += 1;
            sets.push(format!("email = ${bind_count}"));
        }
        if data.avatar.is_some() {
            bind_count += 1;
            sets.push(format!("avatar = ${bind_count}"));
        }
        if data.birthday.is_some() {
            bind_count += 1;
            sets.push(format!("birthday = ${bind_count}"));
        }

        let query = format!(
            "UPDATE users SET {} WHERE id = $1 RETURNING {USER_COLUMNS}",
            sets.join(", ")
        );

        let mut q = sqlx::query_as::<_, User>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(email) = data.email {
            q = q.bind(email);
        }
        if let Some(avatar) = data.avatar {
            q = q.bind(avatar);
        }
        if let Some(birthday) = data.birthday {
            q = q.bind(birthday);
        }

        let user = q.fetch_optional(pool).await?;

        Ok(user)
    }

    /// Deletes a user by ID
    ///
    /// Returns true if a row was deleted. No route currently exposes this;
    /// account deletion is a stub in the UI.
    ///
    /// # Errors
    ///
    /// Fails on the tasks foreign key if the user still owns tasks.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_profile_is_empty() {
        assert!(UpdateProfile::default().is_empty());

        let update = UpdateProfile {
            name: Some("Maria".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let user = User {
            id: 1,
            username: "maria".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            name: None,
            email: None,
            avatar: None,
            birthday: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"username\":\"maria\""));
        assert!(json.contains("createdAt"));
    }
}
