// src/services/user_service.rs

use bcrypt::hash;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{CreateUserPayload, UpdateUserPayload, User},
};

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repo.list().await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("user"))
    }

    pub async fn create_user(&self, input: CreateUserPayload) -> Result<User, AppError> {
        let hashed_password = hash_password(input.password).await?;
        self.repo
            .create(
                &input.username,
                &input.first_name,
                &input.last_name,
                &input.email,
                &hashed_password,
                input.is_admin,
            )
            .await
    }

    pub async fn update_user(&self, id: Uuid, input: UpdateUserPayload) -> Result<User, AppError> {
        let new_hash = match input.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };
        self.repo
            .update(
                id,
                &input.username,
                &input.first_name,
                &input.last_name,
                &input.email,
                new_hash.as_deref(),
                input.is_admin,
                input.is_active,
            )
            .await
    }
}

// bcrypt is CPU-bound; keep it off the async workers
async fn hash_password(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("hashing task failed: {e}"))??;
    Ok(hashed)
}
