// src/handlers/crm.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::crm::{Customer, CustomerDetail, CustomerSource, CustomerStatus},
    models::policy::Carrier,
};

// =============================================================================
//  CUSTOMERS
// =============================================================================

/// Create and edit share the same field set, like the original form.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CustomerFormPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "John")]
    pub first_name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Doe")]
    pub last_name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "john@example.com")]
    pub email: String,

    #[serde(default)]
    pub phone_number: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub status: CustomerStatus,

    #[serde(default)]
    pub source: CustomerSource,

    #[serde(default)]
    #[schema(example = "Prefers email contact.")]
    pub notes: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CustomerSearchQuery {
    /// Matches against first name, last name and email
    pub q: Option<String>,
}

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "CRM",
    params(CustomerSearchQuery),
    responses(
        (status = 200, description = "Customers, optionally filtered", body = Vec<Customer>)
    )
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    Query(query): Query<CustomerSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state
        .crm_service
        .list_customers(query.q.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer with their policies", body = CustomerDetail),
        (status = 404, description = "Unknown customer")
    )
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state
        .crm_service
        .customer_detail(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(detail)))
}

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "CRM",
    request_body = CustomerFormPayload,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Invalid data"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CustomerFormPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .crm_service
        .create_customer(
            &payload.first_name,
            &payload.last_name,
            &payload.email,
            &payload.phone_number,
            &payload.address,
            payload.status,
            payload.source,
            &payload.notes,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "Customer id")),
    request_body = CustomerFormPayload,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 404, description = "Unknown customer")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CustomerFormPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .crm_service
        .update_customer(
            id,
            &payload.first_name,
            &payload.last_name,
            &payload.email,
            &payload.phone_number,
            &payload.address,
            payload.status,
            payload.source,
            &payload.notes,
        )
        .await?;
    Ok((StatusCode::OK, Json(customer)))
}

// DELETE /api/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer and their policies deleted"),
        (status = 404, description = "Unknown customer")
    )
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_service.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  CARRIERS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CarrierFormPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "ACME Mutual")]
    pub name: String,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

// GET /api/carriers
#[utoipa::path(
    get,
    path = "/api/carriers",
    tag = "CRM",
    responses(
        (status = 200, description = "Carriers, ordered by name", body = Vec<Carrier>)
    )
)]
pub async fn list_carriers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let carriers = app_state.crm_service.list_carriers().await?;
    Ok((StatusCode::OK, Json(carriers)))
}

// POST /api/carriers
#[utoipa::path(
    post,
    path = "/api/carriers",
    tag = "CRM",
    request_body = CarrierFormPayload,
    responses(
        (status = 201, description = "Carrier created", body = Carrier),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn create_carrier(
    State(app_state): State<AppState>,
    Json(payload): Json<CarrierFormPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let carrier = app_state
        .crm_service
        .create_carrier(&payload.name, payload.is_active)
        .await?;
    Ok((StatusCode::CREATED, Json(carrier)))
}

// PUT /api/carriers/{id}
#[utoipa::path(
    put,
    path = "/api/carriers/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "Carrier id")),
    request_body = CarrierFormPayload,
    responses(
        (status = 200, description = "Carrier updated", body = Carrier),
        (status = 404, description = "Unknown carrier")
    )
)]
pub async fn update_carrier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CarrierFormPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let carrier = app_state
        .crm_service
        .update_carrier(id, &payload.name, payload.is_active)
        .await?;
    Ok((StatusCode::OK, Json(carrier)))
}

// DELETE /api/carriers/{id}
#[utoipa::path(
    delete,
    path = "/api/carriers/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "Carrier id")),
    responses(
        (status = 204, description = "Carrier deleted"),
        (status = 404, description = "Unknown carrier"),
        (status = 409, description = "Carrier still referenced by policies")
    )
)]
pub async fn delete_carrier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_service.delete_carrier(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
