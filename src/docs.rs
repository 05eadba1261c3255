// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Settings ---
        handlers::settings::get_agency,
        handlers::settings::update_agency,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::update_user,

        // --- CRM ---
        handlers::crm::list_customers,
        handlers::crm::get_customer,
        handlers::crm::create_customer,
        handlers::crm::update_customer,
        handlers::crm::delete_customer,
        handlers::crm::list_carriers,
        handlers::crm::create_carrier,
        handlers::crm::update_carrier,
        handlers::crm::delete_carrier,

        // --- Policies ---
        handlers::policies::create_policy,
        handlers::policies::get_policy,
        handlers::policies::update_policy,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::premiums_by_month,

        // --- Navigation ---
        handlers::nav::get_nav,
    ),
    components(
        schemas(
            // --- Settings ---
            models::settings::Agency,
            models::settings::UpdateAgencyPayload,

            // --- Users ---
            models::auth::User,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,

            // --- CRM ---
            models::crm::CustomerStatus,
            models::crm::CustomerSource,
            models::crm::Customer,
            models::crm::CustomerDetail,
            handlers::crm::CustomerFormPayload,
            handlers::crm::CarrierFormPayload,

            // --- Policies ---
            models::policy::PolicyType,
            models::policy::PolicyStatus,
            models::policy::Carrier,
            models::policy::Policy,
            models::policy::PolicyFormPayload,
            models::policy::PolicyView,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::MonthlyPremiumEntry,

            // --- Navigation ---
            models::nav::NavItem,
        )
    ),
    tags(
        (name = "Settings", description = "Agency information"),
        (name = "Users", description = "Agency staff accounts"),
        (name = "CRM", description = "Customers and carriers"),
        (name = "Policies", description = "Policy lifecycle and details"),
        (name = "Dashboard", description = "Counts and premium aggregates"),
        (name = "Navigation", description = "Navigation tree for the client shell")
    )
)]
pub struct ApiDoc;
