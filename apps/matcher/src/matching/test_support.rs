use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::extraction::{JobRequirements, RequirementExtractor};
use crate::matching::{MatchEngine, MatchingConfig};
use crate::models::job::Job;
use crate::models::user::User;
use crate::store::MemoryMatchStore;

/// Extractor returning canned requirements per job title, counting every call.
#[derive(Default)]
pub struct ScriptedExtractor {
    by_title: HashMap<String, JobRequirements>,
    calls: AtomicUsize,
}

impl ScriptedExtractor {
    pub fn with(mut self, title: &str, reqs: JobRequirements) -> Self {
        self.by_title.insert(title.to_string(), reqs);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RequirementExtractor for ScriptedExtractor {
    async fn extract(&self, title: &str, _: &str, _: &str) -> Option<JobRequirements> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.by_title.get(title).cloned()
    }
}

pub fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn requires(required: &[&str]) -> JobRequirements {
    JobRequirements {
        required_skills: strings(required),
        ..JobRequirements::default()
    }
}

pub fn make_user(skills: &[&str], preferences: Value) -> User {
    User {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", Uuid::new_v4().simple()),
        full_name: Some("Test Candidate".to_string()),
        skills: strings(skills),
        experience_years: None,
        preferences,
        cv_text: Some("Experienced developer.".to_string()),
        is_active: true,
        created_at: Utc::now(),
    }
}

pub fn python_dev() -> User {
    make_user(&["Python", "FastAPI"], json!({}))
}

pub fn make_job(title: &str) -> Job {
    Job {
        id: Uuid::new_v4(),
        title: title.to_string(),
        company: "Acme".to_string(),
        description: format!("{title} at Acme"),
        salary_min: None,
        salary_max: None,
        remote_type: Some("full".to_string()),
        job_type: Some("permanent".to_string()),
        location: None,
        posted_at: None,
        scraped_at: None,
        created_at: None,
        eligible_regions: None,
        visa_sponsorship: None,
    }
}

pub fn engine(store: &Arc<MemoryMatchStore>, extractor: &Arc<ScriptedExtractor>) -> MatchEngine {
    MatchEngine::new(store.clone(), extractor.clone(), MatchingConfig::default())
}
