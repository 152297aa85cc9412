use serde::{Deserialize, Serialize};

/// One line of the account store: `key username hash email phone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub primary_key: u64,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub phone_number: String,
}

/// Credentials as typed at registration, before hashing.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone_number: String,
}
