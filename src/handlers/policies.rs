// src/handlers/policies.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::policy::{PolicyFormPayload, PolicyType, PolicyView},
};

// POST /api/customers/{customer_id}/policies/{policy_type}
#[utoipa::path(
    post,
    path = "/api/customers/{customer_id}/policies/{policy_type}",
    tag = "Policies",
    params(
        ("customer_id" = Uuid, Path, description = "Owning customer id"),
        ("policy_type" = PolicyType, Path, description = "Policy type (auto, home, life, health)")
    ),
    request_body = PolicyFormPayload,
    responses(
        (status = 201, description = "Policy created", body = PolicyView),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "Unknown customer or carrier"),
        (status = 409, description = "Policy number already in use")
    )
)]
pub async fn create_policy(
    State(app_state): State<AppState>,
    Path((customer_id, policy_type)): Path<(Uuid, PolicyType)>,
    Json(payload): Json<PolicyFormPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let policy = app_state
        .policy_service
        .create_policy(&app_state.db_pool, customer_id, policy_type, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(policy)))
}

// GET /api/policies/{id}
#[utoipa::path(
    get,
    path = "/api/policies/{id}",
    tag = "Policies",
    params(("id" = Uuid, Path, description = "Policy id")),
    responses(
        (status = 200, description = "Policy with derived totals and prefill text", body = PolicyView),
        (status = 404, description = "Unknown policy")
    )
)]
pub async fn get_policy(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let policy = app_state
        .policy_service
        .get_policy(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(policy)))
}

// PUT /api/policies/{id}
#[utoipa::path(
    put,
    path = "/api/policies/{id}",
    tag = "Policies",
    params(("id" = Uuid, Path, description = "Policy id")),
    request_body = PolicyFormPayload,
    responses(
        (status = 200, description = "Policy updated", body = PolicyView),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "Unknown policy"),
        (status = 409, description = "Policy number already in use")
    )
)]
pub async fn update_policy(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PolicyFormPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let policy = app_state
        .policy_service
        .update_policy(&app_state.db_pool, id, payload)
        .await?;
    Ok((StatusCode::OK, Json(policy)))
}
