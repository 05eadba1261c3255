// src/models/settings.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// The agency's own information. A singleton row with fixed key 1, created
/// lazily on first read and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Agency {
    #[schema(ignore)]
    pub id: i32,

    #[schema(example = "My Insurance Agency")]
    pub name: String,

    #[schema(example = "1 Harbor Way, Suite 200")]
    pub address: String,

    #[schema(example = "555-0100")]
    pub phone_number: String,

    #[schema(example = "office@agency.example")]
    pub email: String,

    // Optional reference to an uploaded logo; file storage itself lives
    // outside this service.
    #[schema(example = "agency_logos/logo.png")]
    pub logo_path: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAgencyPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "My Insurance Agency")]
    pub name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub phone_number: String,

    // Blank is allowed here, unlike customer emails
    #[serde(default)]
    #[schema(example = "office@agency.example")]
    pub email: String,

    pub logo_path: Option<String>,
}
