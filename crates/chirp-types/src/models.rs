use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// A text post. `posted_at` is an epoch-second timestamp fixed at creation
/// and never recomputed; `text` is the only field that may change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub posted_by: i64,
    pub text: String,
    pub posted_at: i64,
}
