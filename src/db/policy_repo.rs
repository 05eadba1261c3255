// src/db/policy_repo.rs

use serde_json::Value;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::policy::{Policy, PolicyFormPayload, PolicyType},
};

#[derive(Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Policy>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let policy = sqlx::query_as::<_, Policy>("SELECT * FROM policies WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(policy)
    }

    pub async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Policy>, AppError> {
        let policies = sqlx::query_as::<_, Policy>(
            "SELECT * FROM policies WHERE customer_id = $1 ORDER BY effective_date DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(policies)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        policy_type: PolicyType,
        input: &PolicyFormPayload,
        details: &Value,
    ) -> Result<Policy, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Policy>(
            r#"
            INSERT INTO policies (
                customer_id, carrier_id, policy_number, policy_type,
                effective_date, expiration_date, premium_amount, agency_fee,
                status, details, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(input.carrier)
        .bind(&input.policy_number)
        .bind(policy_type)
        .bind(input.effective_date)
        .bind(input.expiration_date)
        .bind(input.premium_amount)
        .bind(input.agency_fee)
        .bind(input.status)
        .bind(details)
        .bind(input.created_by)
        .fetch_one(executor)
        .await
        .map_err(|e| constraint_to_app_error(e, &input.policy_number))
    }

    /// Rewrites the fixed columns and the (already merged) details
    /// document. The policy type is immutable after create.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &PolicyFormPayload,
        details: &Value,
    ) -> Result<Policy, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let policy = sqlx::query_as::<_, Policy>(
            r#"
            UPDATE policies
            SET carrier_id = $2,
                policy_number = $3,
                effective_date = $4,
                expiration_date = $5,
                premium_amount = $6,
                agency_fee = $7,
                status = $8,
                details = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.carrier)
        .bind(&input.policy_number)
        .bind(input.effective_date)
        .bind(input.expiration_date)
        .bind(input.premium_amount)
        .bind(input.agency_fee)
        .bind(input.status)
        .bind(details)
        .fetch_optional(executor)
        .await
        .map_err(|e| constraint_to_app_error(e, &input.policy_number))?;

        policy.ok_or(AppError::NotFound("policy"))
    }
}

fn constraint_to_app_error(e: sqlx::Error, policy_number: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::UniqueViolation(format!(
                "Policy number '{policy_number}' already exists."
            ));
        }
        // The owning customer is checked before insert, so a foreign key
        // failure here means the carrier id is unknown.
        if db_err.is_foreign_key_violation() {
            return AppError::NotFound("carrier");
        }
    }
    e.into()
}
