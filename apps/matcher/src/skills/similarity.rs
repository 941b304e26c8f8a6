//! Skill Similarity — discrete three-level model based on cluster co-membership.
//!
//! `1.0` identical after normalization, `0.5` related (share a cluster), `0.0` otherwise.
//! Never interpolated.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::skills::normalizer::normalize;

pub const EXACT: f64 = 1.0;
pub const RELATED: f64 = 0.5;
pub const UNRELATED: f64 = 0.0;

/// Cluster name → canonical member skills. A skill may sit in several clusters.
pub(crate) const SKILL_CLUSTERS: &[(&str, &[&str])] = &[
    ("javascript", &["JavaScript", "TypeScript", "Node.js", "Deno"]),
    ("jvm_languages", &["Java", "Kotlin", "Scala"]),
    ("systems_languages", &["Rust", "Go", "C", "C++"]),
    ("scripting_languages", &["Python", "Ruby", "PHP", "Perl"]),
    ("dotnet", &["C#", ".NET"]),
    ("apple_native", &["Swift", "Objective-C"]),
    ("cross_platform_mobile", &["React Native", "Flutter", "Dart", "Ionic", "Xamarin"]),
    ("styling", &["CSS", "Sass", "Tailwind CSS", "Bootstrap"]),
    ("frontend_frameworks", &["React", "Vue.js", "Angular", "Svelte"]),
    ("react_ecosystem", &["React", "Next.js", "Redux", "React Native"]),
    ("vue_ecosystem", &["Vue.js", "Nuxt"]),
    ("bundlers", &["Webpack", "Vite"]),
    ("node_frameworks", &["Node.js", "Express", "NestJS"]),
    ("django_ecosystem", &["Django", "Django REST Framework", "Celery"]),
    ("fastapi_ecosystem", &["FastAPI", "Pydantic", "Starlette"]),
    ("python_microframeworks", &["Flask", "FastAPI"]),
    ("jvm_web", &["Spring Boot", "Java", "Kotlin"]),
    ("mvc_frameworks", &["Ruby on Rails", "Laravel"]),
    ("api_styles", &["REST", "GraphQL", "gRPC"]),
    (
        "relational_databases",
        &["PostgreSQL", "MySQL", "MariaDB", "SQL Server", "Oracle", "SQLite", "SQL"],
    ),
    ("document_stores", &["MongoDB", "DynamoDB", "Couchbase", "Cassandra"]),
    ("caches", &["Redis", "Memcached"]),
    ("search_engines", &["Elasticsearch", "OpenSearch"]),
    ("message_brokers", &["Kafka", "RabbitMQ", "SQS", "NATS"]),
    ("cloud_providers", &["AWS", "GCP", "Azure"]),
    ("containers", &["Docker", "Kubernetes", "Podman", "Helm"]),
    ("infrastructure_as_code", &["Terraform", "Pulumi", "CloudFormation", "Ansible"]),
    ("ci_cd", &["Jenkins", "GitHub Actions", "GitLab CI", "CircleCI"]),
    ("observability", &["Prometheus", "Grafana", "Datadog"]),
    ("deep_learning", &["PyTorch", "TensorFlow", "Keras", "JAX"]),
    ("python_data", &["Pandas", "NumPy", "SciPy", "scikit-learn"]),
    ("data_engineering", &["Spark", "Airflow", "dbt", "Snowflake", "BigQuery"]),
    ("bi_tools", &["Tableau", "Power BI"]),
    ("ui_design", &["Figma", "Sketch", "Adobe XD", "InVision"]),
    (
        "adobe_creative",
        &["Photoshop", "Illustrator", "InDesign", "After Effects", "Premiere Pro"],
    ),
    ("motion_graphics", &["After Effects", "Cinema 4D", "Premiere Pro", "Houdini"]),
    (
        "3d_modeling",
        &["Blender", "Maya", "Cinema 4D", "3ds Max", "ZBrush", "Houdini", "Substance Painter"],
    ),
    ("game_engines", &["Unity", "Unreal Engine", "Godot"]),
];

/// Lowercased canonical skill → indices into `SKILL_CLUSTERS`.
static MEMBERSHIP: Lazy<HashMap<String, HashSet<usize>>> = Lazy::new(|| {
    let mut index: HashMap<String, HashSet<usize>> = HashMap::new();
    for (i, (_, members)) in SKILL_CLUSTERS.iter().enumerate() {
        for member in *members {
            index.entry(member.to_lowercase()).or_default().insert(i);
        }
    }
    index
});

/// Similarity between two skills in {1.0, 0.5, 0.0}. Symmetric by construction.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a).to_lowercase();
    let b = normalize(b).to_lowercase();
    if a == b {
        return EXACT;
    }
    match (MEMBERSHIP.get(&a), MEMBERSHIP.get(&b)) {
        (Some(left), Some(right)) if !left.is_disjoint(right) => RELATED,
        _ => UNRELATED,
    }
}

/// Highest similarity between `skill` and any candidate, with the candidate that produced it.
pub fn best_match<'a>(skill: &str, candidates: &'a [String]) -> (f64, Option<&'a str>) {
    let mut best = (UNRELATED, None);
    for candidate in candidates {
        let sim = similarity(skill, candidate);
        if sim > best.0 {
            best = (sim, Some(candidate.as_str()));
            if sim >= EXACT {
                break;
            }
        }
    }
    best
}
