// src/db/carrier_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::policy::Carrier};

#[derive(Clone)]
pub struct CarrierRepository {
    pool: PgPool,
}

impl CarrierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Carrier>, AppError> {
        let carriers = sqlx::query_as::<_, Carrier>("SELECT * FROM carriers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(carriers)
    }

    pub async fn create(&self, name: &str, is_active: bool) -> Result<Carrier, AppError> {
        sqlx::query_as::<_, Carrier>(
            "INSERT INTO carriers (name, is_active) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_to_conflict(e, name))
    }

    pub async fn update(&self, id: Uuid, name: &str, is_active: bool) -> Result<Carrier, AppError> {
        let carrier = sqlx::query_as::<_, Carrier>(
            "UPDATE carriers SET name = $2, is_active = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_to_conflict(e, name))?;

        carrier.ok_or(AppError::NotFound("carrier"))
    }

    /// Carriers are protected while policies reference them; the schema's
    /// RESTRICT rule surfaces here as a conflict, not a crash.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM carriers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::CarrierInUse;
                    }
                }
                e.into()
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("carrier"));
        }
        Ok(())
    }
}

fn unique_to_conflict(e: sqlx::Error, name: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::UniqueViolation(format!("Carrier '{name}' already exists."));
        }
    }
    e.into()
}
