// src/db/customer_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::crm::{Customer, CustomerSource, CustomerStatus},
};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers ORDER BY last_name ASC, first_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    /// Name/email search for the customer list page.
    pub async fn search(&self, query: &str) -> Result<Vec<Customer>, AppError> {
        let search_term = format!("%{query}%");
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customers
            WHERE first_name ILIKE $1
               OR last_name ILIKE $1
               OR email ILIKE $1
            ORDER BY last_name ASC, first_name ASC
            LIMIT 50
            "#,
        )
        .bind(search_term)
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    // Generic over the executor so policy transactions can reuse it
    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(customer)
    }

    pub async fn create(
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
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (first_name, last_name, email, phone_number, address, status, source, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone_number)
        .bind(address)
        .bind(status)
        .bind(source)
        .bind(notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_to_conflict(e, email))
    }

    pub async fn update(
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
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET first_name = $2,
                last_name = $3,
                email = $4,
                phone_number = $5,
                address = $6,
                status = $7,
                source = $8,
                notes = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone_number)
        .bind(address)
        .bind(status)
        .bind(source)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_to_conflict(e, email))?;

        customer.ok_or(AppError::NotFound("customer"))
    }

    /// Deletes the customer; dependent policies go with it (cascade is a
    /// schema-level rule).
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("customer"));
        }
        Ok(())
    }
}

fn unique_to_conflict(e: sqlx::Error, email: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::UniqueViolation(format!(
                "A customer with email '{email}' already exists."
            ));
        }
    }
    e.into()
}
