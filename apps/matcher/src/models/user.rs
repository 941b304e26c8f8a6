use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::preferences::UserPreferences;

/// Candidate profile. Read-only from the matcher's point of view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<i32>,
    pub preferences: Value,
    pub cv_text: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn preferences(&self) -> UserPreferences {
        UserPreferences::from_value(&self.preferences)
    }

    pub fn has_cv(&self) -> bool {
        self.cv_text
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
    }
}
