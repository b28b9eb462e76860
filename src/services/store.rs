use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::user::{InsertAck, User};

/// Document-store operations backing the users collection.
///
/// `uid` filters match the stored `_uid` field.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns at most `limit` documents in the store's natural order.
    async fn find(&self, limit: u64) -> Result<Vec<User>, StoreError>;

    async fn insert_one(&self, user: User) -> Result<InsertAck, StoreError>;

    /// Removes one matching document and returns it.
    async fn find_one_and_delete(&self, uid: &str) -> Result<User, StoreError>;

    /// Sets every field of one matching document and returns the post-image.
    async fn find_one_and_update(&self, uid: &str, user: User) -> Result<User, StoreError>;
}
