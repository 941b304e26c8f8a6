//! Category Classifier — coarse career category from skills or job-title keywords.
//!
//! Ties on overlap count resolve to the category listed first in `CATEGORY_SKILLS`,
//! so classification is deterministic.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::skills::normalizer::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Frontend,
    Backend,
    Fullstack,
    Mobile,
    Devops,
    Data,
    Design,
    #[serde(rename = "3d")]
    ThreeD,
    Motion,
    Game,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Frontend => "frontend",
            Category::Backend => "backend",
            Category::Fullstack => "fullstack",
            Category::Mobile => "mobile",
            Category::Devops => "devops",
            Category::Data => "data",
            Category::Design => "design",
            Category::ThreeD => "3d",
            Category::Motion => "motion",
            Category::Game => "game",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category → canonical skills. Order is the tie-break order.
const CATEGORY_SKILLS: &[(Category, &[&str])] = &[
    (
        Category::Frontend,
        &[
            "JavaScript", "TypeScript", "React", "Vue.js", "Angular", "Svelte", "Next.js", "Nuxt",
            "HTML", "CSS", "Sass", "Tailwind CSS", "Redux", "Webpack", "Vite",
        ],
    ),
    (
        Category::Backend,
        &[
            "Python", "Java", "Go", "Rust", "C#", ".NET", "Ruby", "PHP", "Node.js", "Express",
            "NestJS", "Django", "Django REST Framework", "FastAPI", "Flask", "Spring Boot",
            "Ruby on Rails", "Laravel", "PostgreSQL", "MySQL", "MongoDB", "Redis", "Kafka",
            "RabbitMQ", "GraphQL", "REST", "gRPC",
        ],
    ),
    (
        Category::Fullstack,
        &["Node.js", "Express", "React", "Next.js", "TypeScript", "GraphQL", "Ruby on Rails", "Laravel"],
    ),
    (
        Category::Mobile,
        &["Swift", "Objective-C", "Kotlin", "React Native", "Flutter", "Dart", "Ionic", "Xamarin"],
    ),
    (
        Category::Devops,
        &[
            "Docker", "Kubernetes", "Helm", "Terraform", "Pulumi", "CloudFormation", "Ansible",
            "AWS", "GCP", "Azure", "Jenkins", "GitHub Actions", "GitLab CI", "CircleCI", "Linux",
            "Prometheus", "Grafana", "Datadog",
        ],
    ),
    (
        Category::Data,
        &[
            "Pandas", "NumPy", "SciPy", "scikit-learn", "PyTorch", "TensorFlow", "Keras", "JAX",
            "Spark", "Airflow", "dbt", "Snowflake", "BigQuery", "Tableau", "Power BI", "SQL",
        ],
    ),
    (
        Category::Design,
        &["Figma", "Sketch", "Adobe XD", "InVision", "Photoshop", "Illustrator", "InDesign"],
    ),
    (
        Category::ThreeD,
        &["Blender", "Maya", "3ds Max", "ZBrush", "Substance Painter", "Cinema 4D", "Houdini"],
    ),
    (Category::Motion, &["After Effects", "Premiere Pro", "Cinema 4D"]),
    (Category::Game, &["Unity", "Unreal Engine", "Godot"]),
];

/// Title keyword → category. First hit wins, so specific phrases come before generic ones.
const TITLE_KEYWORDS: &[(&str, Category)] = &[
    ("full stack", Category::Fullstack),
    ("fullstack", Category::Fullstack),
    ("3d", Category::ThreeD),
    ("modeler", Category::ThreeD),
    ("modeller", Category::ThreeD),
    ("motion", Category::Motion),
    ("animator", Category::Motion),
    ("animation", Category::Motion),
    ("video editor", Category::Motion),
    ("game", Category::Game),
    ("gameplay", Category::Game),
    ("unity", Category::Game),
    ("unreal", Category::Game),
    ("mobile", Category::Mobile),
    ("ios", Category::Mobile),
    ("android", Category::Mobile),
    ("flutter", Category::Mobile),
    ("devops", Category::Devops),
    ("sre", Category::Devops),
    ("site reliability", Category::Devops),
    ("platform engineer", Category::Devops),
    ("infrastructure", Category::Devops),
    ("cloud engineer", Category::Devops),
    ("data scientist", Category::Data),
    ("data engineer", Category::Data),
    ("data analyst", Category::Data),
    ("machine learning", Category::Data),
    ("ml engineer", Category::Data),
    ("analytics", Category::Data),
    ("ux", Category::Design),
    ("ui", Category::Design),
    ("product designer", Category::Design),
    ("graphic designer", Category::Design),
    ("designer", Category::Design),
    ("frontend", Category::Frontend),
    ("front end", Category::Frontend),
    ("react", Category::Frontend),
    ("vue", Category::Frontend),
    ("angular", Category::Frontend),
    ("backend", Category::Backend),
    ("back end", Category::Backend),
    ("python", Category::Backend),
    ("java", Category::Backend),
    ("golang", Category::Backend),
    ("node", Category::Backend),
];

/// Directed (user, job) pairs that are compatible although the categories differ.
const COMPATIBLE_PAIRS: &[(Category, Category)] = &[
    (Category::Fullstack, Category::Frontend),
    (Category::Frontend, Category::Fullstack),
    (Category::Fullstack, Category::Backend),
    (Category::Backend, Category::Fullstack),
    (Category::Design, Category::Frontend),
    (Category::ThreeD, Category::Motion),
    (Category::Motion, Category::ThreeD),
    (Category::ThreeD, Category::Game),
    (Category::Game, Category::ThreeD),
    (Category::Backend, Category::Devops),
    (Category::Devops, Category::Backend),
    (Category::Data, Category::Backend),
    (Category::Mobile, Category::Frontend),
];

/// Category with the largest skill overlap, or `None` when nothing overlaps.
pub fn infer_category(skills: &[String]) -> Option<Category> {
    let normalized: HashSet<String> = skills
        .iter()
        .map(|s| normalize(s).to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if normalized.is_empty() {
        return None;
    }

    let mut best: Option<(Category, usize)> = None;
    for (category, members) in CATEGORY_SKILLS {
        let overlap = members
            .iter()
            .filter(|m| normalized.contains(&m.to_lowercase()))
            .count();
        // strictly greater keeps the first-listed category on ties
        if overlap > 0 && best.map_or(true, |(_, n)| overlap > n) {
            best = Some((*category, overlap));
        }
    }
    best.map(|(category, _)| category)
}

/// Category of a job: from its skills first, falling back to title keywords.
pub fn infer_job_category(title: &str, job_skills: &[String]) -> Option<Category> {
    infer_category(job_skills).or_else(|| category_from_title(title))
}

fn category_from_title(title: &str) -> Option<Category> {
    let padded = format!(" {} ", word_normalize(title));
    TITLE_KEYWORDS
        .iter()
        .find(|(keyword, _)| padded.contains(&format!(" {keyword} ")))
        .map(|(_, category)| *category)
}

/// Lowercases and turns every non-alphanumeric run into a single space.
pub(crate) fn word_normalize(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a user of `user_cat` should see jobs of `job_cat`. Unknown on either side passes.
pub fn compatible(user_cat: Option<Category>, job_cat: Option<Category>) -> bool {
    match (user_cat, job_cat) {
        (Some(user), Some(job)) => user == job || COMPATIBLE_PAIRS.contains(&(user, job)),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_infer_category_by_overlap() {
        assert_eq!(
            infer_category(&skills(&["react", "ts", "css3"])),
            Some(Category::Frontend)
        );
        assert_eq!(
            infer_category(&skills(&["Blender", "ZBrush"])),
            Some(Category::ThreeD)
        );
    }

    #[test]
    fn test_infer_category_none_without_overlap() {
        assert_eq!(infer_category(&skills(&["Cobol Wizardry"])), None);
        assert_eq!(infer_category(&[]), None);
    }

    #[test]
    fn test_tie_goes_to_first_listed_category() {
        // One frontend skill, one backend skill.
        assert_eq!(
            infer_category(&skills(&["Svelte", "Flask"])),
            Some(Category::Frontend)
        );
        // Cinema 4D is both 3d and motion; 3d is listed first.
        assert_eq!(
            infer_category(&skills(&["Cinema 4D"])),
            Some(Category::ThreeD)
        );
    }

    #[test]
    fn test_job_category_prefers_skills() {
        assert_eq!(
            infer_job_category("Frontend Developer", &skills(&["Django", "PostgreSQL"])),
            Some(Category::Backend)
        );
    }

    #[test]
    fn test_job_category_falls_back_to_title() {
        assert_eq!(
            infer_job_category("Senior Full-Stack Engineer", &[]),
            Some(Category::Fullstack)
        );
        assert_eq!(
            infer_job_category("Motion Designer", &[]),
            Some(Category::Motion)
        );
        assert_eq!(infer_job_category("UI/UX Designer", &[]), Some(Category::Design));
        assert_eq!(infer_job_category("Office Manager", &[]), None);
    }

    #[test]
    fn test_title_keywords_match_whole_words() {
        // "bios" must not trigger the "ios" keyword.
        assert_eq!(infer_job_category("BIOS Firmware Tester", &[]), None);
    }

    #[test]
    fn test_compatible_same_category() {
        assert!(compatible(Some(Category::Data), Some(Category::Data)));
    }

    #[test]
    fn test_compatible_is_directed() {
        assert!(compatible(Some(Category::Design), Some(Category::Frontend)));
        assert!(!compatible(Some(Category::Frontend), Some(Category::Design)));
        assert!(compatible(Some(Category::ThreeD), Some(Category::Game)));
        assert!(compatible(Some(Category::Game), Some(Category::ThreeD)));
    }

    #[test]
    fn test_incompatible_pair() {
        assert!(!compatible(Some(Category::Design), Some(Category::Backend)));
    }

    #[test]
    fn test_unknown_category_fails_open() {
        assert!(compatible(None, Some(Category::Backend)));
        assert!(compatible(Some(Category::Design), None));
        assert!(compatible(None, None));
    }

    #[test]
    fn test_category_serializes_3d() {
        assert_eq!(serde_json::to_string(&Category::ThreeD).unwrap(), "\"3d\"");
        assert_eq!(Category::ThreeD.to_string(), "3d");
    }
}
