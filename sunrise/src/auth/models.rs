//! Session data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity carried inside a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub user_id: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// JWT claims of a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "encryptedUser")]
    pub encrypted_user: String, // Encoded identity
    pub iss: String,
    pub exp: i64, // Expiration timestamp
}

/// Freshly issued session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: SessionClaims,
    pub expires_at: DateTime<Utc>,
}
