use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::posting::Language;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub telegram_id: i64,
    pub username: Option<String>,
    /// Outlives any single draft; `None` until the user picks one via /language.
    pub interface_language: Option<Language>,
    pub created_at: DateTime<Utc>,
}

/// Who sent an inbound update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub telegram_id: i64,
    pub username: Option<String>,
}

impl Sender {
    pub fn new(telegram_id: i64, username: Option<String>) -> Self {
        Self {
            telegram_id,
            username,
        }
    }
}
