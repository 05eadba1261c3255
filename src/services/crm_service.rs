// src/services/crm_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CarrierRepository, CustomerRepository, PolicyRepository},
    models::{
        crm::{Customer, CustomerDetail, CustomerSource, CustomerStatus},
        policy::{Carrier, PolicyView},
    },
};

#[derive(Clone)]
pub struct CrmService {
    customers: CustomerRepository,
    carriers: CarrierRepository,
    policies: PolicyRepository,
}

impl CrmService {
    pub fn new(
        customers: CustomerRepository,
        carriers: CarrierRepository,
        policies: PolicyRepository,
    ) -> Self {
        Self {
            customers,
            carriers,
            policies,
        }
    }

    // =========================================================================
    //  CUSTOMERS
    // =========================================================================

    pub async fn list_customers(&self, query: Option<&str>) -> Result<Vec<Customer>, AppError> {
        match query {
            Some(q) if !q.trim().is_empty() => self.customers.search(q.trim()).await,
            _ => self.customers.list().await,
        }
    }

    /// Customer page: the customer plus their policies, newest effective
    /// date first.
    pub async fn customer_detail(&self, pool: &PgPool, id: Uuid) -> Result<CustomerDetail, AppError> {
        let customer = self
            .customers
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::NotFound("customer"))?;
        let policies = self
            .policies
            .list_by_customer(id)
            .await?
            .into_iter()
            .map(PolicyView::from)
            .collect();
        Ok(CustomerDetail { customer, policies })
    }

    pub async fn create_customer(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone_number: &str,
        address: &str,
        status: CustomerStatus,
        source: CustomerSource,
        notes: &str,
    ) -> Result<Customer, AppError> {
        self.customers
            .create(first_name, last_name, email, phone_number, address, status, source, notes)
            .await
    }

    pub async fn update_customer(
        &self,
        id: Uuid,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone_number: &str,
        address: &str,
        status: CustomerStatus,
        source: CustomerSource,
        notes: &str,
    ) -> Result<Customer, AppError> {
        self.customers
            .update(id, first_name, last_name, email, phone_number, address, status, source, notes)
            .await
    }

    /// Deleting a customer deletes their policies too (deliberate strong
    /// ownership, enforced by the schema).
    pub async fn delete_customer(&self, id: Uuid) -> Result<(), AppError> {
        self.customers.delete(id).await
    }

    // =========================================================================
    //  CARRIERS
    // =========================================================================

    pub async fn list_carriers(&self) -> Result<Vec<Carrier>, AppError> {
        self.carriers.list().await
    }

    pub async fn create_carrier(&self, name: &str, is_active: bool) -> Result<Carrier, AppError> {
        self.carriers.create(name, is_active).await
    }

    pub async fn update_carrier(
        &self,
        id: Uuid,
        name: &str,
        is_active: bool,
    ) -> Result<Carrier, AppError> {
        self.carriers.update(id, name, is_active).await
    }

    pub async fn delete_carrier(&self, id: Uuid) -> Result<(), AppError> {
        self.carriers.delete(id).await
    }
}
