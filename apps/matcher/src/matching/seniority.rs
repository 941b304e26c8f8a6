use std::fmt;

use serde::{Deserialize, Serialize};

use crate::skills::category::word_normalize;

const SENIOR_KEYWORDS: &[&str] = &["senior", "sr", "lead", "principal", "staff", "head"];
const JUNIOR_KEYWORDS: &[&str] = &[
    "junior", "jr", "intern", "internship", "graduate", "trainee", "entry", "apprentice",
];

/// Experience thresholds used when the title carries no seniority keyword.
const SENIOR_MIN_YEARS: i32 = 5;
const JUNIOR_MAX_YEARS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
}

impl Seniority {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "junior" | "jr" | "entry" | "entry-level" => Some(Seniority::Junior),
            "mid" | "mid-level" | "middle" | "intermediate" => Some(Seniority::Mid),
            "senior" | "sr" => Some(Seniority::Senior),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::Mid => "mid",
            Seniority::Senior => "senior",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seniority signalled by keywords in free text (a title or target role). Senior wins over junior.
pub fn seniority_keyword(text: &str) -> Option<Seniority> {
    let normalized = word_normalize(text);
    let words: Vec<&str> = normalized.split(' ').collect();
    if words.iter().any(|w| SENIOR_KEYWORDS.contains(w)) {
        Some(Seniority::Senior)
    } else if words.iter().any(|w| JUNIOR_KEYWORDS.contains(w)) {
        Some(Seniority::Junior)
    } else {
        None
    }
}

/// Job seniority: title keywords first, then the minimum required experience.
/// With neither available the job counts as mid-level.
pub fn derive_job_seniority(title: &str, experience_years_min: Option<i32>) -> Seniority {
    if let Some(from_title) = seniority_keyword(title) {
        return from_title;
    }
    match experience_years_min {
        Some(years) if years >= SENIOR_MIN_YEARS => Seniority::Senior,
        Some(years) if years <= JUNIOR_MAX_YEARS => Seniority::Junior,
        _ => Seniority::Mid,
    }
}
