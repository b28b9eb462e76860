use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::user::{InsertAck, User};
use crate::services::store::UserStore;

#[derive(Debug, Clone)]
struct Document {
    id: String,
    uid: Option<String>,
    user: User,
}

/// In-process stand-in for the document store.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    documents: Arc<Mutex<Vec<Document>>>,
    unreachable: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail like a dropped connection.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Writes a `_uid` onto an existing document, which the HTTP API never does.
    pub fn assign_uid(&self, inserted_id: &str, uid: &str) -> bool {
        let mut documents = self.documents.lock().unwrap();
        match documents.iter_mut().find(|d| d.id == inserted_id) {
            Some(document) => {
                document.uid = Some(uid.to_string());
                true
            }
            None => false,
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    /// Number of store operations attempted so far, including ones that
    /// failed because the store was unreachable.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(
                "server selection error: connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find(&self, limit: u64) -> Result<Vec<User>, StoreError> {
        self.begin()?;
        let documents = self.documents.lock().unwrap();
        Ok(documents
            .iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|d| d.user.clone())
            .collect())
    }

    async fn insert_one(&self, user: User) -> Result<InsertAck, StoreError> {
        self.begin()?;
        let id = Uuid::new_v4().simple().to_string();
        self.documents.lock().unwrap().push(Document {
            id: id.clone(),
            uid: None,
            user,
        });
        Ok(InsertAck::new(id))
    }

    async fn find_one_and_delete(&self, uid: &str) -> Result<User, StoreError> {
        self.begin()?;
        let mut documents = self.documents.lock().unwrap();
        let position = documents
            .iter()
            .position(|d| d.uid.as_deref() == Some(uid))
            .ok_or(StoreError::NotFound)?;
        Ok(documents.remove(position).user)
    }

    async fn find_one_and_update(&self, uid: &str, user: User) -> Result<User, StoreError> {
        self.begin()?;
        let mut documents = self.documents.lock().unwrap();
        let document = documents
            .iter_mut()
            .find(|d| d.uid.as_deref() == Some(uid))
            .ok_or(StoreError::NotFound)?;
        document.user = user;
        Ok(document.user.clone())
    }
}
