//! Hard-Filter Chain — independent yes/no gates evaluated in a fixed order.
//!
//! Pre-extraction gates (remote type, eligibility) run before the extractor is called.
//! Post-extraction gates (no skills, seniority, category, skill overlap) need requirements.
//! The first failing gate short-circuits; a rejection is an outcome, not an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::extraction::JobRequirements;
use crate::matching::seniority::{derive_job_seniority, Seniority};
use crate::models::job::{Job, RemoteType, VisaSponsorship, WORLDWIDE};
use crate::models::preferences::UserPreferences;
use crate::models::user::User;
use crate::skills::category::{compatible, infer_category, infer_job_category, Category};
use crate::skills::similarity::{best_match, RELATED};

/// Jobs with at least this many required skills use the ratio rule.
const RATIO_RULE_MIN_REQUIRED: usize = 3;
const MIN_OVERLAP_RATIO: f64 = 0.20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum FilterRejection {
    RemoteType {
        job: RemoteType,
        accepted: Vec<RemoteType>,
    },
    Region {
        job_regions: Vec<String>,
        user_regions: Vec<String>,
    },
    VisaSponsorship,
    NoSkills,
    Seniority {
        wanted: Seniority,
        job: Seniority,
    },
    Category {
        user: Category,
        job: Category,
    },
    SkillOverlap {
        matched: usize,
        required: usize,
    },
}

impl fmt::Display for FilterRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterRejection::RemoteType { job, .. } => {
                write!(f, "remote type '{}' not accepted", job.as_str())
            }
            FilterRejection::Region { job_regions, .. } => {
                write!(f, "not eligible for regions [{}]", job_regions.join(", "))
            }
            FilterRejection::VisaSponsorship => f.write_str("job does not sponsor visas"),
            FilterRejection::NoSkills => f.write_str("posting lists no skills"),
            FilterRejection::Seniority { wanted, job } => {
                write!(f, "seniority {job} does not match wanted {wanted}")
            }
            FilterRejection::Category { user, job } => {
                write!(f, "category {job} incompatible with {user}")
            }
            FilterRejection::SkillOverlap { matched, required } => {
                write!(f, "only {matched}/{required} required skills covered")
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Chains
// ────────────────────────────────────────────────────────────────────────────

/// Gates that need only the stored user and job. Run before any extractor call.
pub fn check_pre_extraction(prefs: &UserPreferences, job: &Job) -> Result<(), FilterRejection> {
    remote_type_filter(prefs, job)?;
    eligibility_filter(prefs, job)?;
    Ok(())
}

/// Gates that need extracted requirements, in order.
pub fn check_post_extraction(
    user: &User,
    prefs: &UserPreferences,
    job: &Job,
    reqs: &JobRequirements,
) -> Result<(), FilterRejection> {
    no_skills_filter(reqs)?;
    seniority_filter(prefs, job, reqs)?;
    category_filter(&user.skills, job, reqs)?;
    skill_overlap_filter(&user.skills, reqs)?;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Individual gates
// ────────────────────────────────────────────────────────────────────────────

/// Empty preference accepts everything; a job with no declared remote type is not excluded.
pub fn remote_type_filter(prefs: &UserPreferences, job: &Job) -> Result<(), FilterRejection> {
    if prefs.remote_types.is_empty() {
        return Ok(());
    }
    match job.remote() {
        Some(remote) if !prefs.remote_types.contains(&remote) => Err(FilterRejection::RemoteType {
            job: remote,
            accepted: prefs.remote_types.clone(),
        }),
        _ => Ok(()),
    }
}

/// Region overlap (case-insensitive, "Worldwide" on either side passes) and visa policy.
pub fn eligibility_filter(prefs: &UserPreferences, job: &Job) -> Result<(), FilterRejection> {
    if !prefs.eligible_regions.is_empty() {
        let job_regions = job.eligible_regions.as_deref().unwrap_or_default();
        let user_worldwide = prefs
            .eligible_regions
            .iter()
            .any(|r| r.eq_ignore_ascii_case(WORLDWIDE));
        let overlaps = job_regions.iter().any(|job_region| {
            prefs
                .eligible_regions
                .iter()
                .any(|user_region| user_region.trim().eq_ignore_ascii_case(job_region.trim()))
        });
        // No declared regions on the job means unknown, not excluded.
        if !job_regions.is_empty() && !job.is_worldwide() && !user_worldwide && !overlaps {
            return Err(FilterRejection::Region {
                job_regions: job_regions.to_vec(),
                user_regions: prefs.eligible_regions.clone(),
            });
        }
    }

    if prefs.needs_visa_sponsorship && job.visa() == VisaSponsorship::No {
        return Err(FilterRejection::VisaSponsorship);
    }
    Ok(())
}

pub fn no_skills_filter(reqs: &JobRequirements) -> Result<(), FilterRejection> {
    if reqs.has_skills() {
        Ok(())
    } else {
        Err(FilterRejection::NoSkills)
    }
}

pub fn seniority_filter(
    prefs: &UserPreferences,
    job: &Job,
    reqs: &JobRequirements,
) -> Result<(), FilterRejection> {
    let Some(wanted) = prefs.seniority_filter else {
        return Ok(());
    };
    let derived = derive_job_seniority(&job.title, reqs.experience_years_min);
    if derived == wanted {
        Ok(())
    } else {
        Err(FilterRejection::Seniority {
            wanted,
            job: derived,
        })
    }
}

pub fn category_filter(
    user_skills: &[String],
    job: &Job,
    reqs: &JobRequirements,
) -> Result<(), FilterRejection> {
    let user_cat = infer_category(user_skills);
    let job_cat = infer_job_category(&job.title, &reqs.all_skills());
    match (user_cat, job_cat) {
        (Some(user), Some(job)) if !compatible(Some(user), Some(job)) => {
            Err(FilterRejection::Category { user, job })
        }
        _ => Ok(()),
    }
}

/// ≥3 required skills: ratio ≥ 0.20. 1–2 required: at least one covered. None: pass.
pub fn skill_overlap_filter(
    user_skills: &[String],
    reqs: &JobRequirements,
) -> Result<(), FilterRejection> {
    let required = reqs.required_skills.len();
    if required == 0 {
        return Ok(());
    }
    let passes = if required >= RATIO_RULE_MIN_REQUIRED {
        skill_match_ratio(&reqs.required_skills, user_skills) >= MIN_OVERLAP_RATIO
    } else {
        matched_required_count(&reqs.required_skills, user_skills) >= 1
    };
    if passes {
        Ok(())
    } else {
        Err(FilterRejection::SkillOverlap {
            matched: matched_required_count(&reqs.required_skills, user_skills),
            required,
        })
    }
}

/// Required skills whose best similarity against the user's skills is at least related.
pub fn matched_required_count(required: &[String], user_skills: &[String]) -> usize {
    required
        .iter()
        .filter(|skill| best_match(skill, user_skills).0 >= RELATED)
        .count()
}

/// Share of required skills covered (exact or related). Zero when nothing is required;
/// callers special-case that before using the ratio as a gate.
pub fn skill_match_ratio(required: &[String], user_skills: &[String]) -> f64 {
    if required.is_empty() {
        return 0.0;
    }
    matched_required_count(required, user_skills) as f64 / required.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn make_job(title: &str) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Acme".to_string(),
            description: String::new(),
            salary_min: None,
            salary_max: None,
            remote_type: Some("full".to_string()),
            job_type: None,
            location: None,
            posted_at: None,
            scraped_at: None,
            created_at: None,
            eligible_regions: None,
            visa_sponsorship: None,
        }
    }

    fn make_user(skills: &[&str]) -> User {
        User {
            id: Uuid::new_v4(),
            email: "dev@example.com".to_string(),
            full_name: None,
            skills: strings(skills),
            experience_years: Some(4),
            preferences: json!({}),
            cv_text: Some("cv".to_string()),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn reqs(required: &[&str], nice: &[&str]) -> JobRequirements {
        JobRequirements {
            required_skills: strings(required),
            nice_to_have_skills: strings(nice),
            ..JobRequirements::default()
        }
    }

    fn prefs(value: serde_json::Value) -> UserPreferences {
        UserPreferences::from_value(&value)
    }

    #[test]
    fn test_remote_filter_empty_preference_accepts_all() {
        assert!(remote_type_filter(&prefs(json!({})), &make_job("Dev")).is_ok());
    }

    #[test]
    fn test_remote_filter_rejects_unlisted_type() {
        let mut job = make_job("Dev");
        job.remote_type = Some("onsite".to_string());
        let err = remote_type_filter(&prefs(json!({"remote_types": ["full", "hybrid"]})), &job)
            .unwrap_err();
        assert!(matches!(err, FilterRejection::RemoteType { job: RemoteType::Onsite, .. }));
    }

    #[test]
    fn test_remote_filter_unknown_job_type_passes() {
        let mut job = make_job("Dev");
        job.remote_type = None;
        assert!(remote_type_filter(&prefs(json!({"remote_types": ["full"]})), &job).is_ok());
    }

    #[test]
    fn test_eligibility_region_intersection_case_insensitive() {
        let mut job = make_job("Dev");
        job.eligible_regions = Some(strings(&["eu", "UK"]));
        assert!(eligibility_filter(&prefs(json!({"eligible_regions": ["EU"]})), &job).is_ok());
        let err =
            eligibility_filter(&prefs(json!({"eligible_regions": ["LATAM"]})), &job).unwrap_err();
        assert!(matches!(err, FilterRejection::Region { .. }));
    }

    #[test]
    fn test_eligibility_worldwide_on_either_side() {
        let mut job = make_job("Dev");
        job.eligible_regions = Some(strings(&["Worldwide"]));
        assert!(eligibility_filter(&prefs(json!({"eligible_regions": ["APAC"]})), &job).is_ok());

        job.eligible_regions = Some(strings(&["US"]));
        assert!(
            eligibility_filter(&prefs(json!({"eligible_regions": ["worldwide"]})), &job).is_ok()
        );
    }

    #[test]
    fn test_eligibility_unknown_job_regions_pass() {
        let job = make_job("Dev");
        assert!(eligibility_filter(&prefs(json!({"eligible_regions": ["EU"]})), &job).is_ok());
    }

    #[test]
    fn test_visa_tri_state() {
        let needs_visa = prefs(json!({"needs_visa_sponsorship": true}));
        let mut job = make_job("Dev");
        assert!(eligibility_filter(&needs_visa, &job).is_ok());
        job.visa_sponsorship = Some(true);
        assert!(eligibility_filter(&needs_visa, &job).is_ok());
        job.visa_sponsorship = Some(false);
        assert_eq!(
            eligibility_filter(&needs_visa, &job),
            Err(FilterRejection::VisaSponsorship)
        );
        // Users who don't need a visa don't care.
        assert!(eligibility_filter(&prefs(json!({})), &job).is_ok());
    }

    #[test]
    fn test_no_skills_filter() {
        assert_eq!(no_skills_filter(&reqs(&[], &[])), Err(FilterRejection::NoSkills));
        assert!(no_skills_filter(&reqs(&[], &["Go"])).is_ok());
    }

    #[test]
    fn test_seniority_filter() {
        let senior_only = prefs(json!({"seniority_filter": "senior"}));
        let mut r = reqs(&["Rust"], &[]);
        assert!(seniority_filter(&senior_only, &make_job("Senior Rust Engineer"), &r).is_ok());

        r.experience_years_min = Some(1);
        let err = seniority_filter(&senior_only, &make_job("Rust Engineer"), &r).unwrap_err();
        assert_eq!(
            err,
            FilterRejection::Seniority {
                wanted: Seniority::Senior,
                job: Seniority::Junior
            }
        );
        assert!(seniority_filter(&prefs(json!({})), &make_job("Rust Engineer"), &r).is_ok());
    }

    #[test]
    fn test_category_filter_incompatible() {
        let err = category_filter(
            &strings(&["Figma", "Sketch"]),
            &make_job("Engineer"),
            &reqs(&["Django", "PostgreSQL"], &[]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            FilterRejection::Category {
                user: Category::Design,
                job: Category::Backend
            }
        );
    }

    #[test]
    fn test_category_filter_unknown_passes() {
        assert!(category_filter(
            &strings(&["Basket Weaving"]),
            &make_job("Engineer"),
            &reqs(&["Django"], &[])
        )
        .is_ok());
    }

    #[test]
    fn test_overlap_ratio_rule_for_three_or_more() {
        let user = strings(&["Python", "FastAPI"]);
        // 1/3 >= 0.20
        assert!(skill_overlap_filter(&user, &reqs(&["Python", "Django", "PostgreSQL"], &[])).is_ok());
        // 1/6 < 0.20
        let err = skill_overlap_filter(
            &user,
            &reqs(&["Python", "Django", "PostgreSQL", "Kafka", "Terraform", "Figma"], &[]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            FilterRejection::SkillOverlap {
                matched: 1,
                required: 6
            }
        );
    }

    #[test]
    fn test_overlap_ratio_boundary_is_inclusive() {
        let user = strings(&["Rust"]);
        assert!(skill_overlap_filter(&user, &reqs(&["Rust", "A1", "A2", "A3", "A4"], &[])).is_ok());
    }

    #[test]
    fn test_overlap_small_requirement_needs_one_match() {
        let user = strings(&["Vue"]);
        // React is related to Vue.js
        assert!(skill_overlap_filter(&user, &reqs(&["React", "Figma"], &[])).is_ok());
        assert!(skill_overlap_filter(&user, &reqs(&["Kafka"], &[])).is_err());
    }

    #[test]
    fn test_overlap_no_required_skills_passes() {
        assert!(skill_overlap_filter(&[], &reqs(&[], &["Go"])).is_ok());
    }

    #[test]
    fn test_skill_match_ratio() {
        let user = strings(&["Python", "FastAPI"]);
        let ratio = skill_match_ratio(&strings(&["Python", "Django", "PostgreSQL"]), &user);
        assert!((ratio - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(skill_match_ratio(&[], &user), 0.0);
    }

    #[test]
    fn test_post_extraction_chain_order() {
        // No skills AND a seniority mismatch: the earlier gate is reported.
        let user = make_user(&["Rust"]);
        let p = prefs(json!({"seniority_filter": "junior"}));
        let err = check_post_extraction(&user, &p, &make_job("Senior Dev"), &reqs(&[], &[]))
            .unwrap_err();
        assert_eq!(err, FilterRejection::NoSkills);
    }

    #[test]
    fn test_rejection_display() {
        let msg = FilterRejection::SkillOverlap {
            matched: 0,
            required: 2,
        }
        .to_string();
        assert_eq!(msg, "only 0/2 required skills covered");
    }
}
