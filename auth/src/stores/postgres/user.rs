//! PostgreSQL user repository.
//!
//! Case-insensitive lookups compare `LOWER(column) = LOWER($1)`, which is
//! what the unique indexes on `users` cover.

use super::database_error;
use crate::error::{AuthError, Result};
use crate::providers::UserRepository;
use crate::state::{User, UserId};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const USER_COLUMNS: &str = "id, username, email, password, created_at, updated_at";

/// PostgreSQL user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new PostgreSQL user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<User> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER({column}) = LOWER($1) LIMIT 1"
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to get user", &e))?
        .ok_or(AuthError::UserNotFound)?;

        user_from_row(&row).map_err(|e| database_error("Failed to decode user", &e))
    }

    async fn exists(&self, column: &str, value: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(&format!(
            "SELECT EXISTS (SELECT 1 FROM users WHERE LOWER({column}) = LOWER($1))"
        ))
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("Failed to check user existence", &e))
    }
}

fn user_from_row(row: &PgRow) -> std::result::Result<User, sqlx::Error> {
    Ok(User {
        id: UserId(row.try_get("id")?),
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Map a write failure, turning unique index violations into domain errors.
fn write_error(context: &str, e: &sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = e {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some("users_username_lower_key") => return AuthError::UsernameTaken,
                Some("users_email_lower_key") => return AuthError::EmailTaken,
                _ => {}
            }
        }
    }
    database_error(context, e)
}

impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<User> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to get user", &e))?
            .ok_or(AuthError::UserNotFound)?;

        user_from_row(&row).map_err(|e| database_error("Failed to decode user", &e))
    }

    async fn find_by_username(&self, username: &str) -> Result<User> {
        self.find_one("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<User> {
        self.find_one("email", email).await
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        self.exists("username", username).await
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        self.exists("email", email).await
    }

    async fn insert(&self, user: &User) -> Result<User> {
        let row = sqlx::query(&format!(
            "INSERT INTO users (id, username, email, password, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id.0)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("Failed to create user", &e))?;

        user_from_row(&row).map_err(|e| database_error("Failed to decode user", &e))
    }

    async fn update(&self, user: &User) -> Result<User> {
        let row = sqlx::query(&format!(
            "UPDATE users \
             SET username = $2, email = $3, password = $4, updated_at = $5 \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id.0)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("Failed to update user", &e))?
        .ok_or(AuthError::UserNotFound)?;

        user_from_row(&row).map_err(|e| database_error("Failed to decode user", &e))
    }
}
