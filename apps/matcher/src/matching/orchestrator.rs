//! Match Orchestrator — the per-(user, job) pipeline.
//!
//! frozen check → pre-extraction filters → extract → backfill → post-extraction
//! filters → score → threshold → idempotent upsert.
//!
//! Every failure short of a store error degrades to a non-admitted outcome.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{JobRequirements, RequirementExtractor};
use crate::matching::composite::{score_match, ScoreWeights, DEFAULT_WEIGHTS};
use crate::matching::filters::{
    check_post_extraction, check_pre_extraction, eligibility_filter, FilterRejection,
};
use crate::models::job::Job;
use crate::models::matches::{MatchRow, MatchUpsert};
use crate::models::user::User;
use crate::store::MatchStore;

pub const DEFAULT_THRESHOLD: f64 = 60.0;
pub const DEFAULT_JOB_SCAN_LIMIT: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchingConfig {
    /// Minimum composite score (inclusive) for a match to be persisted.
    pub threshold: f64,
    pub weights: ScoreWeights,
    /// Upper bound on jobs scanned per user in a batch run.
    pub job_scan_limit: i64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            weights: DEFAULT_WEIGHTS,
            job_scan_limit: DEFAULT_JOB_SCAN_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub enum MatchOutcome {
    /// The user already rejected or hid this job.
    Frozen,
    Rejected(FilterRejection),
    /// The extractor produced nothing; retried on a later sweep.
    Unscorable,
    BelowThreshold { score: f64 },
    Admitted(MatchRow),
}

impl MatchOutcome {
    pub fn admitted(self) -> Option<MatchRow> {
        match self {
            MatchOutcome::Admitted(row) => Some(row),
            _ => None,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::Frozen => f.write_str("frozen: rejected or hidden by the user"),
            MatchOutcome::Rejected(reason) => write!(f, "rejected: {reason}"),
            MatchOutcome::Unscorable => f.write_str("unscorable: no requirements extracted"),
            MatchOutcome::BelowThreshold { score } => write!(f, "below threshold ({score:.2})"),
            MatchOutcome::Admitted(row) => write!(f, "admitted ({:.2}, match {})", row.score, row.id),
        }
    }
}

pub struct MatchEngine {
    store: Arc<dyn MatchStore>,
    extractor: Arc<dyn RequirementExtractor>,
    config: MatchingConfig,
}

impl MatchEngine {
    pub fn new(
        store: Arc<dyn MatchStore>,
        extractor: Arc<dyn RequirementExtractor>,
        config: MatchingConfig,
    ) -> Self {
        Self {
            store,
            extractor,
            config,
        }
    }

    pub(crate) fn store(&self) -> &dyn MatchStore {
        self.store.as_ref()
    }

    pub(crate) fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Loads both records and evaluates the pair.
    pub async fn evaluate_pair(&self, user_id: Uuid, job_id: Uuid) -> Result<MatchOutcome, AppError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;
        let job = self
            .store
            .get_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("job {job_id}")))?;
        self.evaluate(&user, &job).await
    }

    /// Full pipeline for one pair, starting with the frozen-status check.
    pub async fn evaluate(&self, user: &User, job: &Job) -> Result<MatchOutcome, AppError> {
        if let Some(status) = self.store.match_status(user.id, job.id).await? {
            if status.is_frozen() {
                debug!(user_id = %user.id, job_id = %job.id, status = status.as_str(), "pair is frozen");
                return Ok(MatchOutcome::Frozen);
            }
        }
        self.evaluate_unfrozen(user, job).await
    }

    /// Pipeline without the frozen lookup; batch drivers exclude frozen pairs up front.
    pub(crate) async fn evaluate_unfrozen(
        &self,
        user: &User,
        job: &Job,
    ) -> Result<MatchOutcome, AppError> {
        let prefs = user.preferences();

        if let Err(rejection) = check_pre_extraction(&prefs, job) {
            return Ok(self.rejected(user, job, rejection));
        }

        let Some(reqs) = self
            .extractor
            .extract(&job.title, &job.company, &job.description)
            .await
        else {
            info!(user_id = %user.id, job_id = %job.id, "no requirements extracted, skipping job");
            return Ok(MatchOutcome::Unscorable);
        };
        let reqs = reqs.normalized();

        let backfilled = self.backfill(job, &reqs).await;
        let job = backfilled.as_ref().unwrap_or(job);
        if backfilled.is_some() {
            if let Err(rejection) = eligibility_filter(&prefs, job) {
                return Ok(self.rejected(user, job, rejection));
            }
        }

        if let Err(rejection) = check_post_extraction(user, &prefs, job, &reqs) {
            return Ok(self.rejected(user, job, rejection));
        }

        let reasoning = score_match(user, &prefs, job, &reqs, &self.config.weights, Utc::now());
        debug!(
            user_id = %user.id,
            job_id = %job.id,
            score = reasoning.overall,
            sub_scores = ?reasoning.sub_scores,
            "pair scored"
        );

        if reasoning.overall < self.config.threshold {
            return Ok(MatchOutcome::BelowThreshold {
                score: reasoning.overall,
            });
        }

        let upsert = MatchUpsert {
            user_id: user.id,
            job_id: job.id,
            score: reasoning.overall,
            reasoning: serde_json::to_value(&reasoning).map_err(anyhow::Error::from)?,
            analysis: reasoning.analysis(),
        };

        match self.store.upsert_match(&upsert).await? {
            Some(row) => {
                info!(user_id = %user.id, job_id = %job.id, score = row.score, "match admitted");
                Ok(MatchOutcome::Admitted(row))
            }
            None => {
                // Rejected or hidden between the frozen check and the write.
                info!(user_id = %user.id, job_id = %job.id, "pair frozen during evaluation");
                Ok(MatchOutcome::Frozen)
            }
        }
    }

    /// Writes extractor-supplied regions/visa policy onto the job where still unknown.
    /// Returns the updated job only when something was actually filled.
    async fn backfill(&self, job: &Job, reqs: &JobRequirements) -> Option<Job> {
        let regions = reqs
            .eligible_regions
            .as_deref()
            .filter(|r| !r.is_empty() && job.eligible_regions.is_none());
        let visa = reqs.visa_sponsorship.filter(|_| job.visa_sponsorship.is_none());
        if regions.is_none() && visa.is_none() {
            return None;
        }

        match self.store.backfill_job_eligibility(job.id, regions, visa).await {
            Ok(updated) => {
                debug!(job_id = %job.id, "backfilled job eligibility");
                updated
            }
            Err(e) => {
                warn!(job_id = %job.id, error = %e, "eligibility backfill failed");
                None
            }
        }
    }

    fn rejected(&self, user: &User, job: &Job, rejection: FilterRejection) -> MatchOutcome {
        info!(user_id = %user.id, job_id = %job.id, reason = %rejection, "pair rejected by filter");
        MatchOutcome::Rejected(rejection)
    }
}
