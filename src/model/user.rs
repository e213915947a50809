//! User account model.

use serde::{Deserialize, Serialize};

/// A registered user.
///
/// Created at registration and never updated or deleted; the password
/// hash is an argon2id PHC string and never leaves the auth module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}
