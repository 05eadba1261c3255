// src/handlers/settings.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::settings::{Agency, UpdateAgencyPayload},
};

// GET /api/settings/agency
#[utoipa::path(
    get,
    path = "/api/settings/agency",
    tag = "Settings",
    responses(
        (status = 200, description = "Agency information", body = Agency)
    )
)]
pub async fn get_agency(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let agency = app_state.settings_repo.get_or_create().await?;
    Ok((StatusCode::OK, Json(agency)))
}

// PUT /api/settings/agency
#[utoipa::path(
    put,
    path = "/api/settings/agency",
    tag = "Settings",
    request_body = UpdateAgencyPayload,
    responses(
        (status = 200, description = "Agency information updated", body = Agency),
        (status = 400, description = "Invalid data")
    )
)]
pub async fn update_agency(
    State(app_state): State<AppState>,
    Json(payload): Json<UpdateAgencyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let agency = app_state.settings_repo.update(&payload).await?;
    Ok((StatusCode::OK, Json(agency)))
}
