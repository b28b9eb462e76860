use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A user record as it travels over HTTP.
///
/// Every field falls back to its zero value when absent or `null` in a
/// request body, so `registered` defaults to the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub age: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub surname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub registered: DateTime<Utc>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Acknowledgment returned after an insert, carrying the store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertAck {
    #[serde(rename = "InsertedID")]
    pub inserted_id: String,
}

impl InsertAck {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        Self {
            inserted_id: inserted_id.into(),
        }
    }
}
