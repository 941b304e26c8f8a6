//! Typed view over the loosely-typed `users.preferences` JSONB bag.
//!
//! Parsing never fails: a missing key, a null, or a value of the wrong shape all
//! fall back to "no preference", which every filter treats as "accept all".

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::matching::seniority::Seniority;
use crate::models::job::{JobType, RemoteType};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub job_types: Vec<JobType>,
    pub remote_types: Vec<RemoteType>,
    pub eligible_regions: Vec<String>,
    pub needs_visa_sponsorship: bool,
    pub min_salary: Option<f64>,
    pub preferred_countries: Vec<String>,
    pub seniority_filter: Option<Seniority>,
    pub target_roles: Vec<String>,
    pub parsed_cv: Option<ParsedCv>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedCv {
    pub experience: Vec<CvExperience>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvExperience {
    pub title: String,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl CvExperience {
    /// A role with no end date (or an explicit "present") is the current one.
    pub fn is_current(&self) -> bool {
        match self.end_date.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(end) => matches!(end.to_lowercase().as_str(), "present" | "current" | "now"),
        }
    }
}

impl UserPreferences {
    pub fn from_value(value: &Value) -> Self {
        Self {
            job_types: string_list(value, "job_types")
                .iter()
                .filter_map(|s| JobType::parse(s))
                .collect(),
            remote_types: string_list(value, "remote_types")
                .iter()
                .filter_map(|s| RemoteType::parse(s))
                .collect(),
            eligible_regions: string_list(value, "eligible_regions"),
            needs_visa_sponsorship: flag(value, "needs_visa_sponsorship"),
            min_salary: number(value, "min_salary").filter(|n| *n > 0.0),
            preferred_countries: string_list(value, "preferred_countries"),
            seniority_filter: value
                .get("seniority_filter")
                .and_then(|v| v.as_str())
                .and_then(Seniority::parse),
            target_roles: string_list(value, "target_roles"),
            parsed_cv: value.get("parsed_cv").and_then(parse_cv),
        }
    }

    /// Up to `limit` job titles from the CV, current roles first, then newest start date.
    pub fn recent_cv_titles(&self, limit: usize) -> Vec<String> {
        let Some(cv) = &self.parsed_cv else {
            return Vec::new();
        };
        let mut roles: Vec<&CvExperience> = cv
            .experience
            .iter()
            .filter(|e| !e.title.trim().is_empty())
            .collect();
        // ISO-like dates ("2021-03", "2021-03-01") sort lexicographically.
        roles.sort_by(|a, b| {
            b.is_current()
                .cmp(&a.is_current())
                .then_with(|| b.start_date.cmp(&a.start_date))
        });
        roles
            .into_iter()
            .take(limit)
            .map(|e| e.title.trim().to_string())
            .collect()
    }
}

fn parse_cv(value: &Value) -> Option<ParsedCv> {
    let items = value.get("experience")?.as_array()?;
    let experience = items
        .iter()
        .filter_map(|item| {
            let title = item.get("title")?.as_str()?.to_string();
            Some(CvExperience {
                title,
                company: optional_str(item, "company"),
                start_date: optional_str(item, "start_date"),
                end_date: optional_str(item, "end_date"),
            })
        })
        .collect();
    Some(ParsedCv { experience })
}

fn optional_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Accepts an array of strings (non-strings skipped) or a single comma-separated string.
fn string_list(value: &Value, key: &str) -> Vec<String> {
    let raw: Vec<String> = match value.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) => s.split(',').map(String::from).collect(),
        _ => Vec::new(),
    };
    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn flag(value: &Value, key: &str) -> bool {
    match value.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64().map(|n| n != 0).unwrap_or(false),
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    }
}

fn number(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_bag_means_no_preferences() {
        let prefs = UserPreferences::from_value(&json!({}));
        assert_eq!(prefs, UserPreferences::default());
    }

    #[test]
    fn test_null_and_non_object_are_tolerated() {
        assert_eq!(UserPreferences::from_value(&Value::Null), UserPreferences::default());
        assert_eq!(
            UserPreferences::from_value(&json!(["not", "an", "object"])),
            UserPreferences::default()
        );
    }

    #[test]
    fn test_full_bag_parses() {
        let prefs = UserPreferences::from_value(&json!({
            "job_types": ["permanent", "contract"],
            "remote_types": ["full", "hybrid"],
            "eligible_regions": ["EU", "UK"],
            "needs_visa_sponsorship": true,
            "min_salary": 60000,
            "preferred_countries": ["Germany"],
            "seniority_filter": "senior",
            "target_roles": ["Backend Engineer"],
            "parsed_cv": {
                "experience": [
                    {"title": "Software Engineer", "company": "Acme", "start_date": "2019-01", "end_date": "2021-06"}
                ]
            }
        }));
        assert_eq!(prefs.job_types, vec![JobType::Permanent, JobType::Contract]);
        assert_eq!(prefs.remote_types, vec![RemoteType::Full, RemoteType::Hybrid]);
        assert_eq!(prefs.eligible_regions, vec!["EU", "UK"]);
        assert!(prefs.needs_visa_sponsorship);
        assert_eq!(prefs.min_salary, Some(60000.0));
        assert_eq!(prefs.seniority_filter, Some(Seniority::Senior));
        assert_eq!(prefs.target_roles, vec!["Backend Engineer"]);
        assert_eq!(prefs.parsed_cv.unwrap().experience.len(), 1);
    }

    #[test]
    fn test_wrong_types_fall_back_to_defaults() {
        let prefs = UserPreferences::from_value(&json!({
            "remote_types": 42,
            "needs_visa_sponsorship": "maybe",
            "min_salary": {"amount": 10},
            "seniority_filter": ["senior"],
            "parsed_cv": "see attached"
        }));
        assert!(prefs.remote_types.is_empty());
        assert!(!prefs.needs_visa_sponsorship);
        assert_eq!(prefs.min_salary, None);
        assert_eq!(prefs.seniority_filter, None);
        assert_eq!(prefs.parsed_cv, None);
    }

    #[test]
    fn test_lenient_scalars() {
        let prefs = UserPreferences::from_value(&json!({
            "target_roles": "Data Engineer, Analytics Engineer",
            "needs_visa_sponsorship": "yes",
            "min_salary": "75,000",
            "remote_types": ["remote", "somewhere", null]
        }));
        assert_eq!(prefs.target_roles, vec!["Data Engineer", "Analytics Engineer"]);
        assert!(prefs.needs_visa_sponsorship);
        assert_eq!(prefs.min_salary, Some(75000.0));
        assert_eq!(prefs.remote_types, vec![RemoteType::Full]);
    }

    #[test]
    fn test_recent_cv_titles_current_first() {
        let prefs = UserPreferences::from_value(&json!({
            "parsed_cv": {"experience": [
                {"title": "Intern", "start_date": "2015-06", "end_date": "2015-09"},
                {"title": "Staff Engineer", "start_date": "2021-01", "end_date": null},
                {"title": "Senior Engineer", "start_date": "2018-02", "end_date": "2020-12"},
                {"title": "Engineer", "start_date": "2016-01", "end_date": "2018-01"},
                {"title": "  "}
            ]}
        }));
        assert_eq!(
            prefs.recent_cv_titles(3),
            vec!["Staff Engineer", "Senior Engineer", "Engineer"]
        );
    }

    #[test]
    fn test_recent_cv_titles_without_cv() {
        assert!(UserPreferences::default().recent_cv_titles(3).is_empty());
    }
}
