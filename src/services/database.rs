use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::SecondsFormat;
use serde::Serialize;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::models::user::{InsertAck, User};
use crate::services::store::UserStore;

// Datetimes are bound as RFC 3339 strings and cast on both sides of the wire,
// so the collection holds native datetimes while rows decode straight into `User`.
const USER_FIELDS: &str = "age, name, surname, <string> registered AS registered";

const USER_CONTENT: &str =
    "{ age: $age, name: $name, surname: $surname, registered: <datetime> $registered }";

#[derive(Clone)]
pub struct DatabaseService {
    db: Surreal<Any>,
    collection: String,
}

#[derive(Serialize)]
struct UserParams {
    table: String,
    age: i64,
    name: String,
    surname: String,
    registered: String,
}

impl DatabaseService {
    /// Connects, signs in when credentials are configured, selects the
    /// namespace/database and verifies the server is healthy.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db = tokio::time::timeout(config.connect_timeout, any::connect(config.url.as_str()))
            .await
            .map_err(|_| {
                anyhow!(
                    "timed out connecting to {} after {:?}",
                    config.url,
                    config.connect_timeout
                )
            })?
            .with_context(|| format!("failed to connect to {}", config.url))?;

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            db.signin(Root {
                username: username.as_str(),
                password: password.as_str(),
            })
            .await
            .context("failed to sign in to the database")?;
        }

        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await
            .with_context(|| {
                format!(
                    "failed to select namespace {} / database {}",
                    config.namespace, config.database
                )
            })?;

        db.health().await.context("database health check failed")?;

        log::info!(
            "Connected to {} ({}/{}), collection {}",
            config.url,
            config.namespace,
            config.database,
            config.collection
        );

        Ok(Self {
            db,
            collection: config.collection.clone(),
        })
    }

    fn params(&self, user: User) -> UserParams {
        UserParams {
            table: self.collection.clone(),
            age: user.age,
            name: user.name,
            surname: user.surname,
            registered: user.registered.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

#[async_trait]
impl UserStore for DatabaseService {
    async fn find(&self, limit: u64) -> Result<Vec<User>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        // SurrealQL limits are signed 64-bit.
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let users: Vec<User> = self
            .db
            .query(format!(
                "SELECT {USER_FIELDS} FROM type::table($table) LIMIT $limit"
            ))
            .bind(("table", self.collection.clone()))
            .bind(("limit", limit))
            .await?
            .take(0)?;

        Ok(users)
    }

    async fn insert_one(&self, user: User) -> Result<InsertAck, StoreError> {
        let key = Uuid::new_v4().simple().to_string();

        self.db
            .query(format!(
                "CREATE type::thing($table, $key) CONTENT {USER_CONTENT} RETURN NONE"
            ))
            .bind(self.params(user))
            .bind(("key", key.clone()))
            .await?
            .check()?;

        Ok(InsertAck::new(key))
    }

    async fn find_one_and_delete(&self, uid: &str) -> Result<User, StoreError> {
        let deleted: Vec<User> = self
            .db
            .query(format!(
                "SELECT {USER_FIELDS} FROM (\
                 DELETE (SELECT VALUE id FROM type::table($table) WHERE `_uid` = $uid LIMIT 1) \
                 RETURN BEFORE)"
            ))
            .bind(("table", self.collection.clone()))
            .bind(("uid", uid.to_string()))
            .await?
            .take(0)?;

        deleted.into_iter().next().ok_or(StoreError::NotFound)
    }

    async fn find_one_and_update(&self, uid: &str, user: User) -> Result<User, StoreError> {
        let updated: Vec<User> = self
            .db
            .query(format!(
                "SELECT {USER_FIELDS} FROM (\
                 UPDATE (SELECT VALUE id FROM type::table($table) WHERE `_uid` = $uid LIMIT 1) \
                 MERGE {USER_CONTENT} RETURN AFTER)"
            ))
            .bind(self.params(user))
            .bind(("uid", uid.to_string()))
            .await?
            .take(0)?;

        updated.into_iter().next().ok_or(StoreError::NotFound)
    }
}
