use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Sentinel region meaning "open to everyone".
pub const WORLDWIDE: &str = "Worldwide";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    /// full | hybrid | onsite
    pub remote_type: Option<String>,
    /// permanent | contract | freelance | part-time
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub scraped_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    /// Written once by the eligibility backfill; never overwritten.
    pub eligible_regions: Option<Vec<String>>,
    /// NULL = unknown, false = explicitly no, true = explicitly yes.
    pub visa_sponsorship: Option<bool>,
}

impl Job {
    pub fn remote(&self) -> Option<RemoteType> {
        self.remote_type.as_deref().and_then(RemoteType::parse)
    }

    pub fn visa(&self) -> VisaSponsorship {
        VisaSponsorship::from(self.visa_sponsorship)
    }

    /// Freshness basis: first non-null of posted, scraped, created.
    pub fn listed_at(&self) -> Option<DateTime<Utc>> {
        self.posted_at.or(self.scraped_at).or(self.created_at)
    }

    pub fn is_worldwide(&self) -> bool {
        self.eligible_regions
            .as_deref()
            .map(|regions| regions.iter().any(|r| r.trim().eq_ignore_ascii_case(WORLDWIDE)))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteType {
    Full,
    Hybrid,
    Onsite,
}

impl RemoteType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "full" | "remote" | "fully remote" | "full_remote" => Some(RemoteType::Full),
            "hybrid" => Some(RemoteType::Hybrid),
            "onsite" | "on-site" | "on_site" | "office" => Some(RemoteType::Onsite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteType::Full => "full",
            RemoteType::Hybrid => "hybrid",
            RemoteType::Onsite => "onsite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    Permanent,
    Contract,
    Freelance,
    PartTime,
}

impl JobType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "permanent" | "full-time" | "full time" | "fulltime" => Some(JobType::Permanent),
            "contract" | "contractor" => Some(JobType::Contract),
            "freelance" => Some(JobType::Freelance),
            "part-time" | "part time" | "parttime" | "part_time" => Some(JobType::PartTime),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Permanent => "permanent",
            JobType::Contract => "contract",
            JobType::Freelance => "freelance",
            JobType::PartTime => "part-time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisaSponsorship {
    Unknown,
    No,
    Yes,
}

impl From<Option<bool>> for VisaSponsorship {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => VisaSponsorship::Unknown,
            Some(false) => VisaSponsorship::No,
            Some(true) => VisaSponsorship::Yes,
        }
    }
}
