//! Data models
//!
//! Rust structs representing database rows. They double as the JSON
//! wire types, serialized in camelCase.

use serde::{Deserialize, Deserializer, Serialize};

/// Read an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Account
// =============================================================================

/// A registered account
///
/// The password is stored and returned as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[sqlx(rename = "id")]
    pub account_id: i64,
    pub username: String,
    pub password: String,
}

/// Username/password pair submitted to `/register` and `/login`
///
/// Missing or null fields become empty strings so they fail validation
/// instead of JSON extraction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Credentials {
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
}

// =============================================================================
// Message
// =============================================================================

/// A text post authored by an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[sqlx(rename = "id")]
    pub message_id: i64,
    /// Account id of the author
    pub posted_by: i64,
    pub message_text: String,
    /// Opaque client-supplied timestamp
    pub time_posted_epoch: i64,
}

/// Body of `POST /messages`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewMessage {
    #[serde(deserialize_with = "null_as_default")]
    pub posted_by: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub message_text: String,
    #[serde(alias = "postedEpoch", deserialize_with = "null_as_default")]
    pub time_posted_epoch: i64,
}

/// Body of `PATCH /messages/:id`
///
/// Only the text is read; any other fields in the body are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessagePatch {
    #[serde(deserialize_with = "null_as_default")]
    pub message_text: String,
}
