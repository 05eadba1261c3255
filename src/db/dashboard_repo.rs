// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{DashboardSummary, MonthlyPremiumEntry},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Headline numbers, read in one transaction for a consistent snapshot.
    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        let mut tx = self.pool.begin().await?;

        let total_customers =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
                .fetch_one(&mut *tx)
                .await?;

        let active_policies =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM policies WHERE status = 'active'")
                .fetch_one(&mut *tx)
                .await?;

        let active_premium_total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(premium_amount + agency_fee), 0)
            FROM policies
            WHERE status = 'active'
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let expiring_soon = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM policies
            WHERE status = 'active'
              AND expiration_date >= CURRENT_DATE
              AND expiration_date < CURRENT_DATE + INTERVAL '30 days'
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            total_customers,
            active_policies,
            active_premium_total,
            expiring_soon,
        })
    }

    /// Written premium bucketed by effective month.
    pub async fn premiums_by_month(&self) -> Result<Vec<MonthlyPremiumEntry>, AppError> {
        let entries = sqlx::query_as::<_, MonthlyPremiumEntry>(
            r#"
            SELECT
                to_char(date_trunc('month', effective_date), 'YYYY-MM') AS month,
                SUM(premium_amount + agency_fee) AS total_premium
            FROM policies
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
