use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::Job;
use crate::models::matches::{MatchRow, MatchStatus, MatchUpsert};
use crate::models::user::User;
use crate::store::MatchStore;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    jobs: Vec<Job>,
    matches: HashMap<(Uuid, Uuid), MatchRow>,
    upserts: usize,
}

/// In-memory `MatchStore` mirroring the Postgres semantics: one row per pair,
/// write-once backfill, frozen rows never updated.
#[derive(Default)]
pub struct MemoryMatchStore {
    tables: Mutex<Tables>,
}

impl MemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.tables.lock().unwrap().users.push(user);
    }

    pub fn add_job(&self, job: Job) {
        self.tables.lock().unwrap().jobs.push(job);
    }

    /// Stamp a status the way the surrounding product would on user action.
    pub fn set_status(&self, user_id: Uuid, job_id: Uuid, status: MatchStatus) {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let row = tables
            .matches
            .entry((user_id, job_id))
            .or_insert_with(|| MatchRow {
                id: Uuid::new_v4(),
                user_id,
                job_id,
                score: 0.0,
                status: MatchStatus::Matched.as_str().to_string(),
                reasoning: serde_json::Value::Null,
                analysis: None,
                applied_at: None,
                created_at: now,
                updated_at: now,
            });
        row.status = status.as_str().to_string();
        if status == MatchStatus::Applied {
            row.applied_at = Some(now);
        }
    }

    pub fn get_match(&self, user_id: Uuid, job_id: Uuid) -> Option<MatchRow> {
        self.tables.lock().unwrap().matches.get(&(user_id, job_id)).cloned()
    }

    pub fn match_count(&self) -> usize {
        self.tables.lock().unwrap().matches.len()
    }

    /// Upsert calls that actually wrote a row.
    pub fn upsert_count(&self) -> usize {
        self.tables.lock().unwrap().upserts
    }

    pub fn job(&self, job_id: Uuid) -> Option<Job> {
        self.tables
            .lock()
            .unwrap()
            .jobs
            .iter()
            .find(|j| j.id == job_id)
            .cloned()
    }
}

#[async_trait]
impl MatchStore for MemoryMatchStore {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, AppError> {
        Ok(self.job(job_id))
    }

    async fn match_status(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<MatchStatus>, AppError> {
        Ok(self.get_match(user_id, job_id).and_then(|m| m.status()))
    }

    async fn frozen_job_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .matches
            .values()
            .filter(|m| m.user_id == user_id && m.status().is_some_and(|s| s.is_frozen()))
            .map(|m| m.job_id)
            .collect())
    }

    async fn frozen_user_ids(&self, job_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .matches
            .values()
            .filter(|m| m.job_id == job_id && m.status().is_some_and(|s| s.is_frozen()))
            .map(|m| m.user_id)
            .collect())
    }

    async fn backfill_job_eligibility(
        &self,
        job_id: Uuid,
        eligible_regions: Option<&[String]>,
        visa_sponsorship: Option<bool>,
    ) -> Result<Option<Job>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(job) = tables.jobs.iter_mut().find(|j| j.id == job_id) else {
            return Ok(None);
        };
        if job.eligible_regions.is_none() {
            job.eligible_regions = eligible_regions.map(|r| r.to_vec());
        }
        if job.visa_sponsorship.is_none() {
            job.visa_sponsorship = visa_sponsorship;
        }
        Ok(Some(job.clone()))
    }

    async fn upsert_match(&self, upsert: &MatchUpsert) -> Result<Option<MatchRow>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let key = (upsert.user_id, upsert.job_id);

        if let Some(existing) = tables.matches.get_mut(&key) {
            if existing.status().is_some_and(|s| s.is_frozen()) {
                return Ok(None);
            }
            existing.score = upsert.score;
            existing.reasoning = upsert.reasoning.clone();
            existing.analysis = Some(upsert.analysis.clone());
            existing.updated_at = now;
            let row = existing.clone();
            tables.upserts += 1;
            return Ok(Some(row));
        }

        let row = MatchRow {
            id: Uuid::new_v4(),
            user_id: upsert.user_id,
            job_id: upsert.job_id,
            score: upsert.score,
            status: MatchStatus::Matched.as_str().to_string(),
            reasoning: upsert.reasoning.clone(),
            analysis: Some(upsert.analysis.clone()),
            applied_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.matches.insert(key, row.clone());
        tables.upserts += 1;
        Ok(Some(row))
    }

    async fn jobs_newest_first(&self, limit: i64) -> Result<Vec<Job>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut jobs = tables.jobs.clone();
        // None sorts last, matching DESC NULLS LAST
        jobs.sort_by(|a, b| b.listed_at().cmp(&a.listed_at()));
        jobs.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(jobs)
    }

    async fn jobs_created_since(&self, since: DateTime<Utc>) -> Result<Vec<Job>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut jobs: Vec<Job> = tables
            .jobs
            .iter()
            .filter(|j| j.created_at.is_some_and(|t| t > since))
            .cloned()
            .collect();
        jobs.sort_by_key(|j| j.created_at);
        Ok(jobs)
    }

    async fn active_users_with_cv(&self) -> Result<Vec<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|u| u.is_active && u.has_cv())
            .cloned()
            .collect())
    }
}
