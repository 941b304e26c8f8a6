use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::Job;
use crate::models::matches::{MatchRow, MatchStatus, MatchUpsert};
use crate::models::user::User;
use crate::store::MatchStore;

/// Postgres-backed store. The `UNIQUE (user_id, job_id)` constraint on `matches`
/// makes `upsert_match` safe under concurrent evaluation of the same pair.
#[derive(Clone)]
pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn frozen_statuses() -> Vec<String> {
    MatchStatus::FROZEN
        .iter()
        .map(|s| s.as_str().to_string())
        .collect()
}

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, AppError> {
        Ok(sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn match_status(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<MatchStatus>, AppError> {
        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM matches WHERE user_id = $1 AND job_id = $2")
                .bind(user_id)
                .bind(job_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(status.as_deref().and_then(MatchStatus::parse))
    }

    async fn frozen_job_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT job_id FROM matches WHERE user_id = $1 AND status = ANY($2)",
        )
        .bind(user_id)
        .bind(frozen_statuses())
        .fetch_all(&self.pool)
        .await?;
        Ok(ids.into_iter().collect())
    }

    async fn frozen_user_ids(&self, job_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT user_id FROM matches WHERE job_id = $1 AND status = ANY($2)",
        )
        .bind(job_id)
        .bind(frozen_statuses())
        .fetch_all(&self.pool)
        .await?;
        Ok(ids.into_iter().collect())
    }

    async fn backfill_job_eligibility(
        &self,
        job_id: Uuid,
        eligible_regions: Option<&[String]>,
        visa_sponsorship: Option<bool>,
    ) -> Result<Option<Job>, AppError> {
        Ok(sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET eligible_regions = COALESCE(eligible_regions, $2),
                visa_sponsorship = COALESCE(visa_sponsorship, $3)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(job_id)
        .bind(eligible_regions.map(|r| r.to_vec()))
        .bind(visa_sponsorship)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn upsert_match(&self, upsert: &MatchUpsert) -> Result<Option<MatchRow>, AppError> {
        // The WHERE on DO UPDATE leaves frozen rows alone; RETURNING then yields nothing.
        Ok(sqlx::query_as::<_, MatchRow>(
            r#"
            INSERT INTO matches (id, user_id, job_id, score, status, reasoning, analysis)
            VALUES ($1, $2, $3, $4, 'matched', $5, $6)
            ON CONFLICT (user_id, job_id) DO UPDATE
            SET score = EXCLUDED.score,
                reasoning = EXCLUDED.reasoning,
                analysis = EXCLUDED.analysis,
                updated_at = NOW()
            WHERE matches.status <> ALL($7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(upsert.user_id)
        .bind(upsert.job_id)
        .bind(upsert.score)
        .bind(&upsert.reasoning)
        .bind(&upsert.analysis)
        .bind(frozen_statuses())
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn jobs_newest_first(&self, limit: i64) -> Result<Vec<Job>, AppError> {
        Ok(sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            ORDER BY COALESCE(posted_at, scraped_at, created_at) DESC NULLS LAST, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn jobs_created_since(&self, since: DateTime<Utc>) -> Result<Vec<Job>, AppError> {
        Ok(sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE created_at > $1 ORDER BY created_at, id",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn active_users_with_cv(&self) -> Result<Vec<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE is_active AND cv_text IS NOT NULL AND btrim(cv_text) <> ''
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }
}
