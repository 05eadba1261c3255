// src/services/policy_service.rs

use serde_json::{Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CustomerRepository, PolicyRepository},
    models::{
        details,
        policy::{PolicyFormPayload, PolicyType, PolicyView},
    },
};

#[derive(Clone)]
pub struct PolicyService {
    policies: PolicyRepository,
    customers: CustomerRepository,
}

impl PolicyService {
    pub fn new(policies: PolicyRepository, customers: CustomerRepository) -> Self {
        Self { policies, customers }
    }

    /// Create a policy for a customer. The details document is built
    /// wholesale from the type-specific submission fields; nothing exists
    /// yet to merge into.
    pub async fn create_policy(
        &self,
        pool: &PgPool,
        customer_id: Uuid,
        policy_type: PolicyType,
        input: PolicyFormPayload,
    ) -> Result<PolicyView, AppError> {
        let mut tx = pool.begin().await?;

        self.customers
            .find_by_id(&mut *tx, customer_id)
            .await?
            .ok_or(AppError::NotFound("customer"))?;

        let mut document = details::encode_details(policy_type, &input.type_fields)
            .unwrap_or_else(|| Value::Object(Map::new()));
        if let Some(raw) = &input.total_customer_cost {
            details::set_total_customer_cost(&mut document, Some(raw));
        }

        let policy = self
            .policies
            .insert(&mut *tx, customer_id, policy_type, &input, &document)
            .await?;

        tx.commit().await?;
        Ok(PolicyView::from(policy))
    }

    /// Edit a policy: one read-modify-write cycle under a transaction.
    /// The stored document is loaded first (coerced to an object if
    /// malformed) and the encoded type-specific keys are merged into it,
    /// so keys written through other paths survive edits that do not
    /// resubmit them. Last write wins between concurrent editors.
    pub async fn update_policy(
        &self,
        pool: &PgPool,
        id: Uuid,
        input: PolicyFormPayload,
    ) -> Result<PolicyView, AppError> {
        let mut tx = pool.begin().await?;

        let existing = self
            .policies
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("policy"))?;

        let mut document = existing.details.clone();
        if !document.is_object() {
            document = Value::Object(Map::new());
        }
        if let Some(update) = details::encode_details(existing.policy_type, &input.type_fields) {
            details::merge_into(&mut document, update);
        }
        if let Some(raw) = &input.total_customer_cost {
            details::set_total_customer_cost(&mut document, Some(raw));
        }

        let policy = self.policies.update(&mut *tx, id, &input, &document).await?;

        tx.commit().await?;
        Ok(PolicyView::from(policy))
    }

    pub async fn get_policy(&self, pool: &PgPool, id: Uuid) -> Result<PolicyView, AppError> {
        let policy = self
            .policies
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::NotFound("policy"))?;
        Ok(PolicyView::from(policy))
    }
}
