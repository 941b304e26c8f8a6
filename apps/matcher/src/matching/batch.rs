//! Batch Drivers — fan the orchestrator out over one user's jobs or one job's users.
//!
//! The frozen-pair exclusion set is read once before the loop. Pairs run sequentially;
//! a failing pair is logged and skipped.

use std::cmp::Ordering;

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::orchestrator::{MatchEngine, MatchOutcome};
use crate::models::matches::MatchRow;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub evaluated: usize,
    pub admitted: usize,
    pub rejected: usize,
    pub below_threshold: usize,
    pub unscorable: usize,
    pub frozen: usize,
    pub errors: usize,
}

impl BatchStats {
    fn record(&mut self, outcome: &Result<MatchOutcome, AppError>) {
        self.evaluated += 1;
        match outcome {
            Ok(MatchOutcome::Admitted(_)) => self.admitted += 1,
            Ok(MatchOutcome::Rejected(_)) => self.rejected += 1,
            Ok(MatchOutcome::BelowThreshold { .. }) => self.below_threshold += 1,
            Ok(MatchOutcome::Unscorable) => self.unscorable += 1,
            Ok(MatchOutcome::Frozen) => self.frozen += 1,
            Err(_) => self.errors += 1,
        }
    }
}

impl MatchEngine {
    /// Scores jobs newest first for one user. Returns admitted matches, best first.
    ///
    /// Only the `job_scan_limit` newest jobs are scanned (`JOB_SCAN_LIMIT`, default 1000).
    /// Older postings are reached through `match_job_with_all_users` when they are ingested.
    pub async fn match_user_with_all_jobs(&self, user_id: Uuid) -> Result<Vec<MatchRow>, AppError> {
        let user = self
            .store()
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;

        let excluded = self.store().frozen_job_ids(user_id).await?;
        let jobs = self.store().jobs_newest_first(self.config().job_scan_limit).await?;

        let mut stats = BatchStats::default();
        let mut admitted = Vec::new();
        for job in jobs.iter().filter(|j| !excluded.contains(&j.id)) {
            let outcome = self.evaluate_unfrozen(&user, job).await;
            stats.record(&outcome);
            match outcome {
                Ok(outcome) => admitted.extend(outcome.admitted()),
                Err(e) => warn!(user_id = %user_id, job_id = %job.id, error = %e, "pair evaluation failed"),
            }
        }

        info!(user_id = %user_id, excluded = excluded.len(), ?stats, "matched user against jobs");
        Ok(rank(admitted))
    }

    /// Scores one job for every active user with a CV. Returns admitted matches, best first.
    pub async fn match_job_with_all_users(&self, job_id: Uuid) -> Result<Vec<MatchRow>, AppError> {
        let job = self
            .store()
            .get_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("job {job_id}")))?;

        let excluded = self.store().frozen_user_ids(job_id).await?;
        let users = self.store().active_users_with_cv().await?;

        let mut stats = BatchStats::default();
        let mut admitted = Vec::new();
        for user in users.iter().filter(|u| !excluded.contains(&u.id)) {
            let outcome = self.evaluate_unfrozen(user, &job).await;
            stats.record(&outcome);
            match outcome {
                Ok(outcome) => admitted.extend(outcome.admitted()),
                Err(e) => warn!(user_id = %user.id, job_id = %job_id, error = %e, "pair evaluation failed"),
            }
        }

        info!(job_id = %job_id, excluded = excluded.len(), ?stats, "matched job against users");
        Ok(rank(admitted))
    }
}

fn rank(mut rows: Vec<MatchRow>) -> Vec<MatchRow> {
    rows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    rows
}
