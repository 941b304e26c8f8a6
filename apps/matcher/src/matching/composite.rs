//! Composite Scorer — weighted combination of the six sub-scores, plus the
//! breakdown persisted as `matches.reasoning`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extraction::JobRequirements;
use crate::matching::scoring::{
    experience_score, freshness_score, location_score, salary_score, skill_score, title_score,
};
use crate::models::job::Job;
use crate::models::preferences::UserPreferences;
use crate::models::user::User;

/// Skills named per list in the one-line analysis.
const ANALYSIS_LIST_LIMIT: usize = 3;

pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    skills: 0.35,
    title: 0.20,
    location: 0.10,
    salary: 0.10,
    experience: 0.15,
    freshness: 0.10,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub title: f64,
    pub location: f64,
    pub salary: f64,
    pub experience: f64,
    pub freshness: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub skills: f64,
    pub title: f64,
    pub location: f64,
    pub salary: f64,
    pub experience: f64,
    pub freshness: f64,
}

impl SubScores {
    /// Weighted sum rounded to two decimals.
    pub fn combine(&self, weights: &ScoreWeights) -> f64 {
        let raw = self.skills * weights.skills
            + self.title * weights.title
            + self.location * weights.location
            + self.salary * weights.salary
            + self.experience * weights.experience
            + self.freshness * weights.freshness;
        round2(raw)
    }
}

/// Explainability payload stored in `matches.reasoning`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReasoning {
    pub overall: f64,
    pub sub_scores: SubScores,
    pub weights: ScoreWeights,
    pub matched_skills: Vec<String>,
    pub related_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl MatchReasoning {
    /// One-line human summary, e.g. "Strong match (82/100). Matched: Python, Rust. Missing: Kafka."
    pub fn analysis(&self) -> String {
        let tier = if self.overall >= 80.0 {
            "Strong"
        } else if self.overall >= 60.0 {
            "Good"
        } else {
            "Weak"
        };
        let mut out = format!("{tier} match ({:.0}/100).", self.overall);
        for (label, skills) in [
            ("Matched", &self.matched_skills),
            ("Related", &self.related_skills),
            ("Missing", &self.missing_skills),
        ] {
            if !skills.is_empty() {
                let listed: Vec<&str> = skills
                    .iter()
                    .take(ANALYSIS_LIST_LIMIT)
                    .map(String::as_str)
                    .collect();
                out.push_str(&format!(" {label}: {}.", listed.join(", ")));
            }
        }
        out
    }
}

/// Runs every sub-scorer and combines them.
pub fn score_match(
    user: &User,
    prefs: &UserPreferences,
    job: &Job,
    reqs: &JobRequirements,
    weights: &ScoreWeights,
    now: DateTime<Utc>,
) -> MatchReasoning {
    let skills = skill_score(&user.skills, reqs);
    let sub_scores = SubScores {
        skills: skills.score,
        title: title_score(prefs, &job.title),
        location: location_score(prefs, job),
        salary: salary_score(prefs, job),
        experience: experience_score(user.experience_years, reqs),
        freshness: freshness_score(job.listed_at(), now),
    };

    MatchReasoning {
        overall: sub_scores.combine(weights),
        sub_scores,
        weights: *weights,
        matched_skills: skills.matched,
        related_skills: skills.related,
        missing_skills: skills.missing,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
