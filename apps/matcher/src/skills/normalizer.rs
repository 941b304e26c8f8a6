//! Skill Normalizer — maps free-text skill strings onto canonical display names.
//!
//! The alias table is static and loaded once. Keys are lowercase and trimmed;
//! every canonical name also maps to itself so casing is normalized for known skills.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// (alias, canonical) pairs. Canonical names are added as their own alias below.
const ALIASES: &[(&str, &str)] = &[
    // Languages
    ("js", "JavaScript"),
    ("javascript", "JavaScript"),
    ("es6", "JavaScript"),
    ("ecmascript", "JavaScript"),
    ("ts", "TypeScript"),
    ("typescript", "TypeScript"),
    ("py", "Python"),
    ("python3", "Python"),
    ("python 3", "Python"),
    ("golang", "Go"),
    ("rustlang", "Rust"),
    ("c plus plus", "C++"),
    ("cpp", "C++"),
    ("c#", "C#"),
    ("csharp", "C#"),
    ("c sharp", "C#"),
    ("objective c", "Objective-C"),
    ("objc", "Objective-C"),
    ("kotlin/jvm", "Kotlin"),
    // Frontend
    ("react.js", "React"),
    ("reactjs", "React"),
    ("react js", "React"),
    ("vue", "Vue.js"),
    ("vuejs", "Vue.js"),
    ("vue 3", "Vue.js"),
    ("angularjs", "Angular"),
    ("angular.js", "Angular"),
    ("nextjs", "Next.js"),
    ("nuxtjs", "Nuxt"),
    ("nuxt.js", "Nuxt"),
    ("sveltekit", "Svelte"),
    ("tailwind", "Tailwind CSS"),
    ("tailwindcss", "Tailwind CSS"),
    ("scss", "Sass"),
    ("css3", "CSS"),
    ("html5", "HTML"),
    // Backend
    ("node", "Node.js"),
    ("nodejs", "Node.js"),
    ("node js", "Node.js"),
    ("express.js", "Express"),
    ("expressjs", "Express"),
    ("nestjs", "NestJS"),
    ("drf", "Django REST Framework"),
    ("django rest", "Django REST Framework"),
    ("spring", "Spring Boot"),
    ("springboot", "Spring Boot"),
    ("ror", "Ruby on Rails"),
    ("rails", "Ruby on Rails"),
    ("dotnet", ".NET"),
    (".net core", ".NET"),
    ("asp.net", ".NET"),
    // Data stores
    ("postgres", "PostgreSQL"),
    ("postgresql", "PostgreSQL"),
    ("psql", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("mssql", "SQL Server"),
    ("ms sql", "SQL Server"),
    ("mongo", "MongoDB"),
    ("mongodb", "MongoDB"),
    ("dynamo", "DynamoDB"),
    ("elastic", "Elasticsearch"),
    ("elasticsearch", "Elasticsearch"),
    // Cloud & ops
    ("amazon web services", "AWS"),
    ("aws", "AWS"),
    ("google cloud", "GCP"),
    ("google cloud platform", "GCP"),
    ("gcp", "GCP"),
    ("microsoft azure", "Azure"),
    ("k8s", "Kubernetes"),
    ("kube", "Kubernetes"),
    ("docker compose", "Docker"),
    ("gh actions", "GitHub Actions"),
    ("github ci", "GitHub Actions"),
    ("gitlab-ci", "GitLab CI"),
    ("cloudformation", "CloudFormation"),
    ("amazon sqs", "SQS"),
    ("apache kafka", "Kafka"),
    ("rabbit", "RabbitMQ"),
    // ML & data
    ("torch", "PyTorch"),
    ("tensorflow 2", "TensorFlow"),
    ("tf2", "TensorFlow"),
    ("sklearn", "scikit-learn"),
    ("scikit learn", "scikit-learn"),
    ("apache spark", "Spark"),
    ("pyspark", "Spark"),
    // Design & 3D
    ("adobe xd", "Adobe XD"),
    ("xd", "Adobe XD"),
    ("adobe photoshop", "Photoshop"),
    ("adobe illustrator", "Illustrator"),
    ("ae", "After Effects"),
    ("adobe after effects", "After Effects"),
    ("premiere", "Premiere Pro"),
    ("adobe premiere", "Premiere Pro"),
    ("c4d", "Cinema 4D"),
    ("cinema4d", "Cinema 4D"),
    ("3dsmax", "3ds Max"),
    ("3ds max", "3ds Max"),
    ("autodesk maya", "Maya"),
    ("ue", "Unreal Engine"),
    ("ue4", "Unreal Engine"),
    ("ue5", "Unreal Engine"),
    ("unreal", "Unreal Engine"),
    ("unity3d", "Unity"),
    ("substance", "Substance Painter"),
    // Mobile
    ("rn", "React Native"),
    ("react-native", "React Native"),
    ("swiftui", "Swift"),
    ("jetpack compose", "Kotlin"),
];

/// Every canonical skill the knowledge base knows about.
pub(crate) const CANONICAL_SKILLS: &[&str] = &[
    "JavaScript", "TypeScript", "Python", "Go", "Rust", "C", "C++", "C#", "Java", "Kotlin",
    "Scala", "Ruby", "PHP", "Perl", "Elixir", "Swift", "Objective-C", "Dart", "HTML", "CSS",
    "Sass", "Tailwind CSS", "Bootstrap", "React", "Vue.js", "Angular", "Svelte", "Next.js",
    "Nuxt", "Redux", "Webpack", "Vite", "Node.js", "Express", "NestJS", "Deno", "Django",
    "Django REST Framework", "Celery", "FastAPI", "Pydantic", "Starlette", "Flask", "Spring Boot",
    "Ruby on Rails", "Laravel", ".NET", "GraphQL", "REST", "gRPC", "PostgreSQL", "MySQL",
    "MariaDB", "SQL Server", "Oracle", "SQLite", "SQL", "MongoDB", "DynamoDB", "Cassandra",
    "Couchbase", "Redis", "Memcached", "Elasticsearch", "OpenSearch", "Kafka", "RabbitMQ", "SQS",
    "NATS", "AWS", "GCP", "Azure", "Docker", "Kubernetes", "Podman", "Helm", "Terraform",
    "Pulumi", "CloudFormation", "Ansible", "Jenkins", "GitHub Actions", "GitLab CI", "CircleCI",
    "Linux", "Prometheus", "Grafana", "Datadog", "PyTorch", "TensorFlow", "Keras",
    "scikit-learn", "JAX", "Pandas", "NumPy", "SciPy", "Spark", "Airflow", "dbt", "Snowflake",
    "BigQuery", "Tableau", "Power BI", "Figma", "Sketch", "Adobe XD", "InVision", "Photoshop",
    "Illustrator", "InDesign", "After Effects", "Premiere Pro", "Blender", "Maya",
    "Cinema 4D", "3ds Max", "ZBrush", "Houdini", "Substance Painter", "Unity", "Unreal Engine",
    "Godot", "React Native", "Flutter", "Ionic", "Xamarin",
];

static ALIAS_TABLE: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut table: HashMap<String, &'static str> = CANONICAL_SKILLS
        .iter()
        .map(|canonical| (canonical.to_lowercase(), *canonical))
        .collect();
    for (alias, canonical) in ALIASES {
        table.insert(alias.to_lowercase(), *canonical);
    }
    table
});

/// Returns the canonical name for a skill, or the trimmed input when unknown.
///
/// Lowercasing is only used for the lookup; unknown skills keep their casing.
pub fn normalize(skill: &str) -> String {
    let trimmed = skill.trim();
    match ALIAS_TABLE.get(&trimmed.to_lowercase()) {
        Some(canonical) => (*canonical).to_string(),
        None => trimmed.to_string(),
    }
}

/// Normalizes a list of skills, dropping blanks and case-insensitive duplicates.
/// Input order is preserved.
pub fn normalize_all(skills: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    skills
        .iter()
        .map(|s| normalize(s))
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_resolves_to_canonical() {
        assert_eq!(normalize("k8s"), "Kubernetes");
        assert_eq!(normalize("postgres"), "PostgreSQL");
        assert_eq!(normalize("ReactJS"), "React");
    }

    #[test]
    fn test_canonical_name_normalizes_casing() {
        assert_eq!(normalize("python"), "Python");
        assert_eq!(normalize("FASTAPI"), "FastAPI");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(normalize("  Docker \n"), "Docker");
    }

    #[test]
    fn test_unknown_skill_keeps_case() {
        assert_eq!(normalize("  Zig Comptime "), "Zig Comptime");
    }

    #[test]
    fn test_empty_input_is_total() {
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_all_dedups_and_drops_blanks() {
        let skills = vec![
            "python".to_string(),
            "Python".to_string(),
            " ".to_string(),
            "py".to_string(),
            "k8s".to_string(),
        ];
        assert_eq!(normalize_all(&skills), vec!["Python", "Kubernetes"]);
    }

    #[test]
    fn test_every_alias_targets_a_known_canonical() {
        for (alias, canonical) in ALIASES {
            assert!(
                CANONICAL_SKILLS.contains(canonical),
                "alias {alias} points at unknown skill {canonical}"
            );
        }
    }
}
