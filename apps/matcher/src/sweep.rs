//! Periodic sweep driving the batch matchers.
//!
//! A full sweep matches every active user with a CV against the newest jobs.
//! Between full sweeps, only jobs ingested since the previous tick are matched,
//! each against every eligible user.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::matching::MatchEngine;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub full: bool,
    pub users: usize,
    pub jobs: usize,
    pub admitted: usize,
    pub failures: usize,
}

pub struct Sweeper {
    engine: Arc<MatchEngine>,
    /// Every n-th tick is a full sweep; the first tick always is.
    full_sweep_every: u32,
    ticks: u32,
    last_tick: Option<DateTime<Utc>>,
}

impl Sweeper {
    pub fn new(engine: Arc<MatchEngine>, full_sweep_every: u32) -> Self {
        Self {
            engine,
            full_sweep_every: full_sweep_every.max(1),
            ticks: 0,
            last_tick: None,
        }
    }

    pub async fn tick(&mut self) -> Result<SweepReport, AppError> {
        let started = Utc::now();
        let report = match self.last_tick {
            Some(since) if self.ticks % self.full_sweep_every != 0 => {
                self.incremental_sweep(since).await?
            }
            _ => self.full_sweep().await?,
        };
        self.ticks = self.ticks.wrapping_add(1);
        self.last_tick = Some(started);

        info!(
            full = report.full,
            users = report.users,
            jobs = report.jobs,
            admitted = report.admitted,
            failures = report.failures,
            elapsed_ms = (Utc::now() - started).num_milliseconds(),
            "sweep finished"
        );
        Ok(report)
    }

    async fn full_sweep(&self) -> Result<SweepReport, AppError> {
        let users = self.engine.store().active_users_with_cv().await?;
        let mut report = SweepReport {
            full: true,
            users: users.len(),
            ..SweepReport::default()
        };
        for user in &users {
            match self.engine.match_user_with_all_jobs(user.id).await {
                Ok(matches) => report.admitted += matches.len(),
                Err(e) => {
                    report.failures += 1;
                    warn!(user_id = %user.id, error = %e, "user sweep failed");
                }
            }
        }
        Ok(report)
    }

    async fn incremental_sweep(&self, since: DateTime<Utc>) -> Result<SweepReport, AppError> {
        let jobs = self.engine.store().jobs_created_since(since).await?;
        let mut report = SweepReport {
            jobs: jobs.len(),
            ..SweepReport::default()
        };
        for job in &jobs {
            match self.engine.match_job_with_all_users(job.id).await {
                Ok(matches) => report.admitted += matches.len(),
                Err(e) => {
                    report.failures += 1;
                    warn!(job_id = %job.id, error = %e, "job sweep failed");
                }
            }
        }
        Ok(report)
    }
}
