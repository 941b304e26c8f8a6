use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Persisted match. At most one row per (user_id, job_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub score: f64,
    pub status: String,
    pub reasoning: Value,
    pub analysis: Option<String>,
    pub applied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MatchRow {
    pub fn status(&self) -> Option<MatchStatus> {
        MatchStatus::parse(&self.status)
    }
}

/// Values the matcher writes on admission. Status and applied_at are never part of it.
#[derive(Debug, Clone)]
pub struct MatchUpsert {
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub score: f64,
    pub reasoning: Value,
    pub analysis: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    Interested,
    Applied,
    Rejected,
    Hidden,
}

impl MatchStatus {
    /// Statuses that permanently exclude a pair from automatic matching.
    pub const FROZEN: [MatchStatus; 2] = [MatchStatus::Rejected, MatchStatus::Hidden];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "matched" => Some(MatchStatus::Matched),
            "interested" => Some(MatchStatus::Interested),
            "applied" => Some(MatchStatus::Applied),
            "rejected" => Some(MatchStatus::Rejected),
            "hidden" => Some(MatchStatus::Hidden),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "matched",
            MatchStatus::Interested => "interested",
            MatchStatus::Applied => "applied",
            MatchStatus::Rejected => "rejected",
            MatchStatus::Hidden => "hidden",
        }
    }

    pub fn is_frozen(&self) -> bool {
        Self::FROZEN.contains(self)
    }
}
