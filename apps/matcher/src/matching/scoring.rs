//! Sub-Score Calculators — six independent 0–100 scorers over (user, job, requirements).
//!
//! All pure and synchronous. Missing data yields a neutral score rather than a penalty,
//! except where noted.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extraction::JobRequirements;
use crate::matching::seniority::seniority_keyword;
use crate::models::job::{Job, RemoteType};
use crate::models::preferences::UserPreferences;
use crate::skills::category::word_normalize;
use crate::skills::similarity::{best_match, EXACT, RELATED};

pub const NEUTRAL: f64 = 50.0;

const REQUIRED_SHARE: f64 = 80.0;
const NICE_SHARE: f64 = 20.0;

/// How many recent CV titles stand in for missing target roles.
const CV_TITLE_LIMIT: usize = 3;
const SENIORITY_ADJUSTMENT: f64 = 10.0;

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Skill sub-score plus the explainability lists for required skills.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillScore {
    pub score: f64,
    /// Required skills the user has exactly.
    pub matched: Vec<String>,
    /// Required skills covered only by a related skill.
    pub related: Vec<String>,
    pub missing: Vec<String>,
}

/// Required skills: 1.0 exact / 0.5 related / 0 per skill, averaged, worth 80.
/// Nice-to-have: average best similarity, worth 20 (or 100 when nothing is required).
pub fn skill_score(user_skills: &[String], reqs: &JobRequirements) -> SkillScore {
    let required = &reqs.required_skills;
    let nice = &reqs.nice_to_have_skills;

    if required.is_empty() && nice.is_empty() {
        return SkillScore {
            score: NEUTRAL,
            ..SkillScore::default()
        };
    }

    let mut result = SkillScore::default();
    let mut required_total = 0.0;
    for skill in required {
        let (sim, _) = best_match(skill, user_skills);
        if sim >= EXACT {
            required_total += 1.0;
            result.matched.push(skill.clone());
        } else if sim >= RELATED {
            required_total += 0.5;
            result.related.push(skill.clone());
        } else {
            result.missing.push(skill.clone());
        }
    }

    let nice_avg = if nice.is_empty() {
        0.0
    } else {
        nice.iter()
            .map(|skill| best_match(skill, user_skills).0)
            .sum::<f64>()
            / nice.len() as f64
    };

    result.score = if required.is_empty() {
        nice_avg * 100.0
    } else {
        required_total / required.len() as f64 * REQUIRED_SHARE + nice_avg * NICE_SHARE
    };
    result
}

// ────────────────────────────────────────────────────────────────────────────
// Title
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RoleBucket {
    Engineer,
    Manager,
    Designer,
    Data,
    Devops,
}

const ROLE_KEYWORDS: &[(RoleBucket, &[&str])] = &[
    (
        RoleBucket::Engineer,
        &["engineer", "engineering", "developer", "programmer", "swe", "sde", "coder", "architect"],
    ),
    (
        RoleBucket::Manager,
        &["manager", "management", "director", "vp", "head", "chief", "cto", "owner"],
    ),
    (
        RoleBucket::Designer,
        &["designer", "design", "ux", "ui", "artist", "illustrator", "animator"],
    ),
    (
        RoleBucket::Data,
        &["data", "scientist", "analyst", "analytics", "ml", "ai"],
    ),
    (
        RoleBucket::Devops,
        &["devops", "sre", "reliability", "infrastructure", "platform", "cloud"],
    ),
];

/// Words that carry no role signal for token overlap.
const TITLE_STOPWORDS: &[&str] = &["of", "and", "the", "a", "an", "for", "in", "at", "to", "with"];

fn role_buckets(text: &str) -> HashSet<RoleBucket> {
    let normalized = word_normalize(text);
    let words: HashSet<&str> = normalized.split(' ').collect();
    ROLE_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| words.contains(k)))
        .map(|(bucket, _)| *bucket)
        .collect()
}

fn title_tokens(text: &str) -> HashSet<String> {
    word_normalize(text)
        .split(' ')
        .filter(|w| !w.is_empty() && !TITLE_STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Target roles when declared, otherwise the most recent CV titles.
fn user_title_text(prefs: &UserPreferences) -> Option<String> {
    let roles: Vec<String> = if prefs.target_roles.is_empty() {
        prefs.recent_cv_titles(CV_TITLE_LIMIT)
    } else {
        prefs.target_roles.clone()
    };
    let joined = roles
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .collect::<Vec<_>>()
        .join(" / ");
    (!joined.is_empty()).then_some(joined)
}

pub fn title_score(prefs: &UserPreferences, job_title: &str) -> f64 {
    let Some(user_text) = user_title_text(prefs) else {
        return NEUTRAL;
    };

    let user_buckets = role_buckets(&user_text);
    let job_buckets = role_buckets(job_title);
    let has = |set: &HashSet<RoleBucket>, b| set.contains(&b);

    let user_engineer =
        has(&user_buckets, RoleBucket::Engineer) && !has(&user_buckets, RoleBucket::Manager);
    let user_manager =
        has(&user_buckets, RoleBucket::Manager) && !has(&user_buckets, RoleBucket::Engineer);
    let job_manager_only =
        has(&job_buckets, RoleBucket::Manager) && !has(&job_buckets, RoleBucket::Engineer);

    let base = if user_engineer && job_manager_only {
        10.0
    } else if user_manager && !has(&job_buckets, RoleBucket::Manager) {
        30.0
    } else if !user_buckets.is_disjoint(&job_buckets) {
        90.0
    } else {
        let shared = title_tokens(&user_text)
            .intersection(&title_tokens(job_title))
            .count();
        match shared {
            0 => 20.0,
            1 => 50.0,
            _ => 70.0,
        }
    };

    let adjustment = match (seniority_keyword(&user_text), seniority_keyword(job_title)) {
        (Some(wanted), Some(offered)) if wanted == offered => SENIORITY_ADJUSTMENT,
        (Some(_), Some(_)) => -SENIORITY_ADJUSTMENT,
        _ => 0.0,
    };
    (base + adjustment).clamp(0.0, 100.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Location, salary, experience, freshness
// ────────────────────────────────────────────────────────────────────────────

pub fn location_score(prefs: &UserPreferences, job: &Job) -> f64 {
    let countries: Vec<&str> = prefs
        .preferred_countries
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    if countries.is_empty() {
        return 100.0;
    }

    let fully_remote = job.remote() == Some(RemoteType::Full);
    let location = job.location.as_deref().unwrap_or("").to_lowercase();

    // "Remote" also counts as a place: a fully remote job hits, and so does a location naming it.
    let hit = countries.iter().any(|country| {
        (fully_remote && country.eq_ignore_ascii_case("remote"))
            || (!location.is_empty() && location.contains(&country.to_lowercase()))
    });
    if hit {
        100.0
    } else {
        30.0
    }
}

pub fn salary_score(prefs: &UserPreferences, job: &Job) -> f64 {
    let Some(wanted) = prefs.min_salary.filter(|m| *m > 0.0) else {
        return 100.0;
    };
    let (Some(top), Some(floor)) = (
        job.salary_max.or(job.salary_min),
        job.salary_min.or(job.salary_max),
    ) else {
        return NEUTRAL;
    };

    if f64::from(top) >= wanted {
        100.0
    } else if f64::from(floor) >= wanted * 0.9 {
        80.0
    } else if f64::from(floor) >= wanted * 0.8 {
        60.0
    } else {
        30.0
    }
}

pub fn experience_score(user_years: Option<i32>, reqs: &JobRequirements) -> f64 {
    let Some(years) = user_years else {
        return NEUTRAL;
    };
    let (min, max) = (reqs.experience_years_min, reqs.experience_years_max);
    if min.is_none() && max.is_none() {
        return NEUTRAL;
    }

    if let Some(min) = min.filter(|m| years < *m) {
        return match min - years {
            1 => 80.0,
            2 => 60.0,
            _ => 40.0,
        };
    }
    match max {
        Some(max) if years > max => 90.0,
        _ => 100.0,
    }
}

/// Step function over listing age in whole days.
pub fn freshness_score(listed_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(listed_at) = listed_at else {
        return 85.0;
    };
    match (now - listed_at).num_days().max(0) {
        0..=7 => 100.0,
        8..=14 => 95.0,
        15..=30 => 85.0,
        _ => 70.0,
    }
}
