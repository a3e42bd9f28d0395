use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// A registered account. Identity is the unique username; `id` is the
/// surrogate key expenses reference. Passwords are stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
}
