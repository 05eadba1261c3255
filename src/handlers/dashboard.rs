// src/handlers/dashboard.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{DashboardSummary, MonthlyPremiumEntry},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Headline numbers", body = DashboardSummary)
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_repo.get_summary().await?;
    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/premiums-by-month
#[utoipa::path(
    get,
    path = "/api/dashboard/premiums-by-month",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Written premium per effective month", body = Vec<MonthlyPremiumEntry>)
    )
)]
pub async fn premiums_by_month(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.dashboard_repo.premiums_by_month().await?;
    Ok((StatusCode::OK, Json(entries)))
}
