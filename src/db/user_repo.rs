// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::User};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn create(
        &self,
        username: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        hashed_password: &str,
        is_admin: bool,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, first_name, last_name, email, hashed_password, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(hashed_password)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_to_conflict(e, username))
    }

    /// Full-row update; `hashed_password` is only touched when a new hash
    /// is supplied.
    pub async fn update(
        &self,
        id: Uuid,
        username: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        new_hash: Option<&str>,
        is_admin: bool,
        is_active: bool,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2,
                first_name = $3,
                last_name = $4,
                email = $5,
                hashed_password = COALESCE($6, hashed_password),
                is_admin = $7,
                is_active = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(new_hash)
        .bind(is_admin)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_to_conflict(e, username))?;

        user.ok_or(AppError::NotFound("user"))
    }
}

fn unique_to_conflict(e: sqlx::Error, username: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::UniqueViolation(format!("Username '{username}' is already taken."));
        }
    }
    e.into()
}
