//src/main.rs

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // expect() is fine here: if configuration fails, the app must not start.
    let app_state = AppState::new()
        .await
        .expect("failed to initialise application state");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("failed to run database migrations");

    tracing::info!("database migrations applied");

    let settings_routes = Router::new().route(
        "/agency",
        get(handlers::settings::get_agency).put(handlers::settings::update_agency),
    );

    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/{id}",
            get(handlers::users::get_user).put(handlers::users::update_user),
        );

    let customer_routes = Router::new()
        .route(
            "/",
            get(handlers::crm::list_customers).post(handlers::crm::create_customer),
        )
        .route(
            "/{id}",
            get(handlers::crm::get_customer)
                .put(handlers::crm::update_customer)
                .delete(handlers::crm::delete_customer),
        )
        .route(
            "/{id}/policies/{policy_type}",
            post(handlers::policies::create_policy),
        );

    let carrier_routes = Router::new()
        .route(
            "/",
            get(handlers::crm::list_carriers).post(handlers::crm::create_carrier),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::crm::update_carrier).delete(handlers::crm::delete_carrier),
        );

    let policy_routes = Router::new().route(
        "/{id}",
        get(handlers::policies::get_policy).put(handlers::policies::update_policy),
    );

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route(
            "/premiums-by-month",
            get(handlers::dashboard::premiums_by_month),
        );

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/nav", get(handlers::nav::get_nav))
        .nest("/api/settings", settings_routes)
        .nest("/api/users", user_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/carriers", carrier_routes)
        .nest("/api/policies", policy_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind TCP listener");
    tracing::info!("server listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("axum server error");
}
