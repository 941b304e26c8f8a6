//! Persistence seam. The engine only talks to `MatchStore`; `PgMatchStore` is the
//! production backend, `MemoryMatchStore` backs the engine tests.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::Job;
use crate::models::matches::{MatchRow, MatchStatus, MatchUpsert};
use crate::models::user::User;

#[cfg(test)]
pub use memory::MemoryMatchStore;
pub use postgres::PgMatchStore;

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, AppError>;

    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, AppError>;

    /// Status of the existing match for the pair, if any.
    async fn match_status(&self, user_id: Uuid, job_id: Uuid)
        -> Result<Option<MatchStatus>, AppError>;

    /// Jobs this user has rejected or hidden.
    async fn frozen_job_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError>;

    /// Users who have rejected or hidden this job.
    async fn frozen_user_ids(&self, job_id: Uuid) -> Result<HashSet<Uuid>, AppError>;

    /// Write-once fill of `eligible_regions` / `visa_sponsorship`: only NULL columns are set.
    /// Returns the job as stored afterwards.
    async fn backfill_job_eligibility(
        &self,
        job_id: Uuid,
        eligible_regions: Option<&[String]>,
        visa_sponsorship: Option<bool>,
    ) -> Result<Option<Job>, AppError>;

    /// Insert or refresh score/reasoning/analysis for the pair, keeping status and applied_at.
    /// Returns `None` when the existing row is rejected/hidden and was left untouched.
    async fn upsert_match(&self, upsert: &MatchUpsert) -> Result<Option<MatchRow>, AppError>;

    async fn jobs_newest_first(&self, limit: i64) -> Result<Vec<Job>, AppError>;

    /// Jobs ingested strictly after `since`, oldest first.
    async fn jobs_created_since(&self, since: DateTime<Utc>) -> Result<Vec<Job>, AppError>;

    async fn active_users_with_cv(&self) -> Result<Vec<User>, AppError>;
}
