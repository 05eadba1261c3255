// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        CarrierRepository, CustomerRepository, DashboardRepository, PolicyRepository,
        SettingsRepository, UserRepository,
    },
    services::{CrmService, PolicyService, UserService},
};

// Shared state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub settings_repo: SettingsRepository,
    pub dashboard_repo: DashboardRepository,
    pub user_service: UserService,
    pub crm_service: CrmService,
    pub policy_service: PolicyService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("database connection established");

        // --- Wire the dependency graph ---
        let settings_repo = SettingsRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());
        let user_service = UserService::new(UserRepository::new(db_pool.clone()));

        let customers = CustomerRepository::new(db_pool.clone());
        let carriers = CarrierRepository::new(db_pool.clone());
        let policies = PolicyRepository::new(db_pool.clone());
        let crm_service = CrmService::new(customers.clone(), carriers, policies.clone());
        let policy_service = PolicyService::new(policies, customers);

        Ok(Self {
            db_pool,
            settings_repo,
            dashboard_repo,
            user_service,
            crm_service,
            policy_service,
        })
    }
}
