// src/models/policy.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::details::{self, FormFields, PolicyDetails};

// --- ENUMS ---

// Maps the CREATE TYPE policy_type from the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "policy_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    Auto,
    Home,
    Life,
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "policy_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    Active,
    Expired,
    Cancelled,
    #[default]
    Pending,
}

// --- CARRIER ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Carrier {
    pub id: Uuid,
    #[schema(example = "ACME Mutual")]
    pub name: String,
    pub is_active: bool,
}

// --- POLICY ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Policy {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub carrier_id: Option<Uuid>,
    #[schema(example = "P-100")]
    pub policy_number: String,
    pub policy_type: PolicyType,
    pub effective_date: NaiveDate,
    pub expiration_date: NaiveDate,
    #[schema(example = "100.00")]
    pub premium_amount: Decimal,
    #[schema(example = "10.00")]
    pub agency_fee: Decimal,
    pub status: PolicyStatus,
    // Type-specific details document (JSONB). Always a JSON object.
    #[schema(value_type = Object)]
    pub details: Value,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Policy {
    /// Total amount for the policy: base premium plus the agency fee.
    /// Derived on every access, never stored.
    pub fn total_premium(&self) -> Decimal {
        self.premium_amount + self.agency_fee
    }

    /// Customer-facing total read out of the details document, if set.
    pub fn total_customer_cost(&self) -> Option<Decimal> {
        details::total_customer_cost(&self.details)
    }
}

// --- PAYLOADS ---

/// Common policy form fields, shared by create and edit. Type-specific
/// fields ride along in the flattened map keyed by the legacy form grammar
/// (`vehicle-0-vin`, `dwelling_limit`, ...); the encoders ignore anything
/// they do not recognize.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PolicyFormPayload {
    pub carrier: Option<Uuid>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "P-100")]
    pub policy_number: String,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub effective_date: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2025-01-01")]
    pub expiration_date: NaiveDate,

    #[schema(example = "100.00")]
    pub premium_amount: Decimal,

    #[serde(default)]
    #[schema(example = "10.00")]
    pub agency_fee: Decimal,

    #[serde(default)]
    pub status: PolicyStatus,

    pub created_by: Option<Uuid>,

    // Written through to the details document when present; absent means
    // "leave the stored value alone".
    #[schema(value_type = Option<String>, example = "660.00")]
    pub total_customer_cost: Option<Value>,

    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub type_fields: FormFields,
}

/// Detail view of a policy: the row itself plus the derived totals and the
/// details document serialized as text for client-side form prefill.
#[derive(Debug, Serialize, ToSchema)]
pub struct PolicyView {
    #[serde(flatten)]
    pub policy: Policy,
    #[schema(example = "110.00")]
    pub total_premium: Decimal,
    pub total_customer_cost: Option<Decimal>,
    #[schema(example = "2 vehicles")]
    pub details_summary: String,
    pub details_json: String,
}

impl From<Policy> for PolicyView {
    fn from(policy: Policy) -> Self {
        let decoded = PolicyDetails::from_document(policy.policy_type, &policy.details);
        Self {
            total_premium: policy.total_premium(),
            total_customer_cost: policy.total_customer_cost(),
            details_summary: decoded.summary(),
            details_json: policy.details.to_string(),
            policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn sample_policy(premium: &str, fee: &str, details: Value) -> Policy {
        Policy {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            carrier_id: None,
            policy_number: "P-100".to_string(),
            policy_type: PolicyType::Home,
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            expiration_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            premium_amount: Decimal::from_str(premium).unwrap(),
            agency_fee: Decimal::from_str(fee).unwrap(),
            status: PolicyStatus::Active,
            details,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn total_premium_is_the_exact_sum() {
        let policy = sample_policy("100.05", "10.10", json!({}));
        assert_eq!(policy.total_premium(), Decimal::from_str("110.15").unwrap());

        let zero_fee = sample_policy("250.00", "0.00", json!({}));
        assert_eq!(
            zero_fee.total_premium(),
            Decimal::from_str("250.00").unwrap()
        );
    }

    #[test]
    fn total_customer_cost_reads_through_the_document() {
        let policy = sample_policy("100.00", "10.00", json!({ "total_customer_cost": "660.00" }));
        assert_eq!(
            policy.total_customer_cost(),
            Some(Decimal::from_str("660.00").unwrap())
        );

        let unset = sample_policy("100.00", "10.00", json!({}));
        assert_eq!(unset.total_customer_cost(), None);
    }

    #[test]
    fn payload_collects_type_fields_through_the_flattened_map() {
        let payload: PolicyFormPayload = serde_json::from_value(json!({
            "policy_number": "P-200",
            "effective_date": "2024-01-01",
            "expiration_date": "2025-01-01",
            "premium_amount": 100.00,
            "agency_fee": 10.00,
            "status": "active",
            "total_customer_cost": "660.00",
            "vehicle-0-vin": "VIN0",
            "vehicle-0-make": "Toyota",
        }))
        .unwrap();

        assert_eq!(payload.status, PolicyStatus::Active);
        assert_eq!(payload.total_customer_cost, Some(json!("660.00")));
        assert_eq!(payload.type_fields["vehicle-0-vin"], "VIN0");
        assert_eq!(payload.type_fields["vehicle-0-make"], "Toyota");
        // declared fields never leak into the type-specific map
        assert!(!payload.type_fields.contains_key("policy_number"));
        assert!(!payload.type_fields.contains_key("total_customer_cost"));
    }

    #[test]
    fn payload_defaults_match_the_form_defaults() {
        let payload: PolicyFormPayload = serde_json::from_value(json!({
            "policy_number": "P-300",
            "effective_date": "2024-01-01",
            "expiration_date": "2025-01-01",
            "premium_amount": 100.00,
        }))
        .unwrap();

        assert_eq!(payload.status, PolicyStatus::Pending);
        assert_eq!(payload.agency_fee, Decimal::ZERO);
        assert_eq!(payload.total_customer_cost, None);
        assert!(payload.type_fields.is_empty());
    }

    #[test]
    fn view_carries_prefill_text_and_derived_totals() {
        let policy = sample_policy(
            "100.00",
            "10.00",
            json!({ "property_address": "123 Main St", "total_customer_cost": "500.00" }),
        );
        let view = PolicyView::from(policy);
        assert_eq!(view.total_premium, Decimal::from_str("110.00").unwrap());
        assert_eq!(
            view.total_customer_cost,
            Some(Decimal::from_str("500.00").unwrap())
        );
        let reparsed: Value = serde_json::from_str(&view.details_json).unwrap();
        assert_eq!(reparsed["property_address"], "123 Main St");
    }
}
