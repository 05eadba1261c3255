// src/models/crm.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::policy::PolicyView;

// --- ENUMS ---

// Maps the CREATE TYPE customer_status from the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "customer_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Inactive,
    #[default]
    Prospect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "customer_source", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CustomerSource {
    WalkIn,
    Transfer,
    #[default]
    Pending,
    Referral,
    Web,
    Other,
}

// --- CUSTOMER ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: Uuid,

    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,

    // Primary email, unique across customers
    #[schema(example = "john@example.com")]
    pub email: String,
    #[schema(example = "555-0100")]
    pub phone_number: String,
    pub address: String,

    pub status: CustomerStatus,
    pub source: CustomerSource,

    // Internal sticky note for the customer
    pub notes: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer page data: the customer plus their policies, most recent
/// effective date first.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub policies: Vec<PolicyView>,
}
