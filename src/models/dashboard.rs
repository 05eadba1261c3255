// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct DashboardSummary {
    pub total_customers: i64,
    pub active_policies: i64,

    // Sum of premium + agency fee over active policies
    #[schema(example = "12500.00")]
    pub active_premium_total: Decimal,

    // Active policies expiring within the next 30 days
    pub expiring_soon: i64,
}

/// One month bucket of written premium (premium + agency fee, grouped by
/// effective date).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MonthlyPremiumEntry {
    #[schema(example = "2024-01")]
    pub month: String,

    #[schema(example = "1520.00")]
    pub total_premium: Decimal,
}
