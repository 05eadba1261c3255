// src/db/settings_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::settings::{Agency, UpdateAgencyPayload},
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the singleton agency row, creating it with defaults on first
    /// access. The fixed key keeps it a singleton.
    pub async fn get_or_create(&self) -> Result<Agency, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO agency (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(&mut *tx)
            .await?;

        let agency = sqlx::query_as::<_, Agency>("SELECT * FROM agency WHERE id = 1")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(agency)
    }

    pub async fn update(&self, input: &UpdateAgencyPayload) -> Result<Agency, AppError> {
        let mut tx = self.pool.begin().await?;

        // The row may not exist yet if settings are saved before any read
        sqlx::query("INSERT INTO agency (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(&mut *tx)
            .await?;

        let agency = sqlx::query_as::<_, Agency>(
            r#"
            UPDATE agency
            SET name = $1, address = $2, phone_number = $3, email = $4, logo_path = $5
            WHERE id = 1
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.phone_number)
        .bind(&input.email)
        .bind(&input.logo_path)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(agency)
    }
}
