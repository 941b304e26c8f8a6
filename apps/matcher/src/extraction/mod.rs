//! Requirement extraction — turns free-text postings into structured `JobRequirements`.
//!
//! The matcher only sees the `RequirementExtractor` trait. Backends:
//! - `LlmRequirementExtractor`: Claude via `llm_client`, `None` when unconfigured or on failure.
//! - `CachedExtractor`: wraps any extractor with a content-hash keyed `RequirementsCache`.

pub mod cache;
pub mod llm;
pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::skills::normalizer::normalize_all;

pub use cache::{CachedExtractor, InMemoryRequirementsCache, RedisRequirementsCache, RequirementsCache};
pub use llm::LlmRequirementExtractor;

/// Structured requirements for one posting. Ephemeral: never persisted by the matcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRequirements {
    pub required_skills: Vec<String>,
    pub nice_to_have_skills: Vec<String>,
    pub experience_years_min: Option<i32>,
    pub experience_years_max: Option<i32>,
    pub job_type: Option<String>,
    pub remote_type: Option<String>,
    pub eligible_regions: Option<Vec<String>>,
    pub visa_sponsorship: Option<bool>,
}

impl JobRequirements {
    pub fn has_skills(&self) -> bool {
        !self.required_skills.is_empty() || !self.nice_to_have_skills.is_empty()
    }

    /// Canonical skill names, deduplicated. A skill listed as required is dropped
    /// from nice-to-have.
    pub fn normalized(mut self) -> Self {
        self.required_skills = normalize_all(&self.required_skills);
        let nice = normalize_all(&self.nice_to_have_skills);
        self.nice_to_have_skills = nice
            .into_iter()
            .filter(|n| !self.required_skills.iter().any(|r| r.eq_ignore_ascii_case(n)))
            .collect();
        self
    }

    /// Required followed by nice-to-have, for category inference.
    pub fn all_skills(&self) -> Vec<String> {
        self.required_skills
            .iter()
            .chain(self.nice_to_have_skills.iter())
            .cloned()
            .collect()
    }
}

/// Black-box extractor. May be slow; returns `None` instead of failing.
#[async_trait]
pub trait RequirementExtractor: Send + Sync {
    async fn extract(&self, title: &str, company: &str, description: &str)
        -> Option<JobRequirements>;
}

/// SHA-256 over the posting content; the cache key for extracted requirements.
pub fn content_hash(title: &str, company: &str, description: &str) -> String {
    let mut hasher = Sha256::new();
    for part in [title, company, description] {
        hasher.update(part.trim().as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}
