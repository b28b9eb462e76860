use std::sync::Arc;

use actix_web::http::StatusCode;

use crate::error::{ApiError, StoreError};
use crate::models::user::{InsertAck, User};
use crate::services::store::UserStore;

/// Request handling for the users collection. Holds no state besides the
/// shared store handle.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    not_found_status: StatusCode,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, not_found_status: StatusCode) -> Self {
        Self {
            store,
            not_found_status,
        }
    }

    /// Parses `size` as a 64-bit integer and returns at most that many users.
    pub async fn list(&self, size: &str) -> Result<Vec<User>, ApiError> {
        let size: i64 = size
            .parse()
            .map_err(|e: std::num::ParseIntError| ApiError::InvalidSize(e.to_string()))?;
        let limit = u64::try_from(size)
            .map_err(|_| ApiError::InvalidSize(format!("size must not be negative: {size}")))?;

        self.store.find(limit).await.map_err(|e| self.store_error(e))
    }

    pub async fn insert(&self, user: User) -> Result<InsertAck, ApiError> {
        self.store.insert_one(user).await.map_err(|e| self.store_error(e))
    }

    pub async fn delete(&self, uid: &str) -> Result<User, ApiError> {
        self.store
            .find_one_and_delete(uid)
            .await
            .map_err(|e| self.store_error(e))
    }

    pub async fn update(&self, uid: &str, user: User) -> Result<User, ApiError> {
        self.store
            .find_one_and_update(uid, user)
            .await
            .map_err(|e| self.store_error(e))
    }

    fn store_error(&self, err: StoreError) -> ApiError {
        if let StoreError::Backend(message) = &err {
            log::error!("Store operation failed: {}", message);
        }
        ApiError::from_store(err, self.not_found_status)
    }
}
