// src/handlers/nav.rs

use axum::{Json, extract::Query, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::models::nav::{self, BackLink, NavItem};

#[derive(Debug, Deserialize, IntoParams)]
pub struct NavQuery {
    /// Include admin-only entries
    #[serde(default)]
    pub admin: bool,

    /// Customer context: substitutes a back-to-customer link
    pub customer_id: Option<Uuid>,

    /// Policy context: substitutes a back-to-policy link (wins over
    /// customer context)
    pub policy_id: Option<Uuid>,
}

// GET /api/nav
#[utoipa::path(
    get,
    path = "/api/nav",
    tag = "Navigation",
    params(NavQuery),
    responses(
        (status = 200, description = "Navigation tree for the request context", body = Vec<NavItem>)
    )
)]
pub async fn get_nav(Query(query): Query<NavQuery>) -> impl IntoResponse {
    let back = if let Some(policy_id) = query.policy_id {
        Some(BackLink::to_policy(format!("/policies/{policy_id}")))
    } else {
        query
            .customer_id
            .map(|customer_id| BackLink::to_customer(format!("/customers/{customer_id}")))
    };

    let items = nav::build_nav(query.admin, back.as_ref());
    (StatusCode::OK, Json(items))
}
