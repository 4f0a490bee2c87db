use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedText {
    pub id: u64,
    pub text: String,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// On-disk layout of the store file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreFile {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub texts: Vec<SavedText>,
    #[serde(default)]
    pub last_text_id: u64,
}

impl StoreFile {
    pub fn user(&self, username: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn next_text_id(&mut self) -> u64 {
        self.last_text_id += 1;
        self.last_text_id
    }
}
