//! Skill catalog and synonym table.
//!
//! The built-in vocabulary is grouped by topic for readability only; at runtime the
//! groups are flattened into one ordered, de-duplicated [`SkillCatalog`].
//!
//! Entries are normalized with the lexicon's [`Normalizer`] when the catalog is built,
//! so "CI/CD" and "ci / cd" are the same skill and lookups never miss on casing or
//! punctuation. A side effect is that punctuation inside a skill name disappears
//! ("scikit-learn" is stored as "scikitlearn", "security+" as "security").

use indexmap::{IndexMap, IndexSet};

use crate::analysis::lexicon::LexiconError;
use crate::analysis::text::Normalizer;

// ────────────────────────────────────────────────────────────────────────────
// Built-in vocabulary
// ────────────────────────────────────────────────────────────────────────────

pub const PROGRAMMING: &[&str] = &[
    "python", "java", "cpp", "c", "csharp", "go", "rust", "scala", "javascript", "typescript",
    "r", "matlab",
];

pub const WEB_UI: &[&str] = &[
    "html", "css", "sass", "less", "react", "nextjs", "vue", "angular", "svelte", "vite",
    "webpack", "babel", "jest", "vitest", "mocha", "chai", "storybook", "cypress", "playwright",
    "tailwind", "bootstrap", "material ui", "responsive design", "accessibility", "aria", "pwa",
];

pub const BACKEND: &[&str] = &[
    "node", "express", "fastapi", "flask", "django", "spring", "spring boot", "graphql",
    "rest api", "grpc", "microservices", "event driven", "ddd", "clean architecture", "oauth",
    "jwt", "rbac",
];

pub const DATA_SCIENCE: &[&str] = &[
    "machine learning", "deep learning", "nlp", "computer vision", "data analysis",
    "data visualization", "statistics", "probability", "feature engineering", "time series",
    "recommendation systems", "ab testing", "optimization", "linear algebra",
];

pub const ML_LIBS: &[&str] = &[
    "numpy", "pandas", "scikit-learn", "tensorflow", "pytorch", "keras", "xgboost", "lightgbm",
    "prophet", "opencv", "nltk", "spacy", "transformers", "hugging face", "matplotlib",
    "plotly", "seaborn",
];

pub const DATA_ENG: &[&str] = &[
    "sql", "mysql", "postgresql", "sqlite", "oracle", "sql server", "mariadb", "snowflake",
    "redshift", "bigquery", "hive", "presto", "spark", "hadoop", "dbt", "airflow", "etl", "elt",
    "data pipeline", "orchestration", "kafka", "rabbitmq", "sqs", "sns", "kinesis", "pubsub",
    "pub/sub", "flink", "storm", "dask", "databricks", "glue", "emr",
];

pub const NOSQL_SEARCH: &[&str] = &[
    "mongodb", "redis", "dynamodb", "cassandra", "couchbase", "elasticsearch", "opensearch",
    "solr", "neo4j", "graph database",
];

pub const CLOUD: &[&str] = &[
    "aws", "azure", "gcp", "amazon web services", "microsoft azure", "google cloud platform",
];

pub const AWS_SERVICES: &[&str] = &[
    "ec2", "s3", "rds", "lambda", "ecr", "ecs", "eks", "cloudformation", "cloudwatch", "athena",
    "glue", "emr", "redshift", "api gateway", "sagemaker", "route 53", "cloudfront", "iam",
    "sns", "sqs", "kinesis",
];

pub const AZURE_SERVICES: &[&str] = &[
    "aks", "cosmos db", "functions", "app service", "azure devops", "synapse", "databricks",
    "event hubs", "service bus",
];

pub const GCP_SERVICES: &[&str] = &[
    "gke", "cloud run", "bigquery", "dataflow", "dataproc", "pub/sub", "vertex ai",
    "cloud functions", "cloud storage", "composer",
];

pub const DEVOPS: &[&str] = &[
    "docker", "kubernetes", "helm", "istio", "linkerd", "terraform", "ansible", "packer",
    "pulumi", "jenkins", "github actions", "gitlab ci", "travis ci", "argo", "argo cd", "tekton",
    "nexus", "artifactory", "ci/cd", "ci cd", "cicd", "git", "github", "gitlab",
];

pub const TESTING_QA: &[&str] = &[
    "pytest", "unittest", "junit", "testng", "selenium", "cypress", "playwright",
    "robot framework", "karate", "postman", "k6", "locust",
];

pub const SECURITY: &[&str] = &[
    "owasp", "threat modeling", "sast", "dast", "sonarqube", "vault", "kms", "secrets manager",
    "iam", "security+",
];

pub const MONITORING: &[&str] = &[
    "prometheus", "grafana", "datadog", "new relic", "sentry", "elk", "logstash", "kibana",
    "cloudwatch", "stackdriver", "opentelemetry",
];

pub const BI_TOOLS: &[&str] = &[
    "excel", "power query", "power bi", "tableau", "looker", "qlik", "google analytics",
];

pub const METHODOLOGIES: &[&str] = &[
    "agile", "scrum", "kanban", "waterfall", "tdd", "bdd", "pair programming", "xp",
    "design patterns", "solid", "sdlc",
];

pub const SOFT_SKILLS: &[&str] = &[
    "communication", "teamwork", "leadership", "problem solving", "stakeholder management",
    "mentoring", "presentation", "collaboration", "documentation",
];

pub const CERTIFICATIONS: &[&str] = &[
    "aws certified solutions architect", "aws certified developer", "azure fundamentals",
    "gcp professional data engineer", "pmp", "scrum master", "csm", "psm", "pspo", "cspo",
    "six sigma", "itil", "cka", "ckad", "terraform associate", "security+",
];

/// Topic groups in catalog order.
pub const DEFAULT_GROUPS: &[(&str, &[&str])] = &[
    ("programming", PROGRAMMING),
    ("web_ui", WEB_UI),
    ("backend", BACKEND),
    ("data_science", DATA_SCIENCE),
    ("ml_libs", ML_LIBS),
    ("data_eng", DATA_ENG),
    ("nosql_search", NOSQL_SEARCH),
    ("cloud", CLOUD),
    ("aws_services", AWS_SERVICES),
    ("azure_services", AZURE_SERVICES),
    ("gcp_services", GCP_SERVICES),
    ("devops", DEVOPS),
    ("testing_qa", TESTING_QA),
    ("security", SECURITY),
    ("monitoring", MONITORING),
    ("bi_tools", BI_TOOLS),
    ("methodologies", METHODOLOGIES),
    ("soft_skills", SOFT_SKILLS),
    ("certifications", CERTIFICATIONS),
];

/// Alias → canonical. "c++" and "c#" are absent: punctuation stripping turns
/// both into "c", which is itself a catalog skill.
pub const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("c plus plus", "cpp"),
    ("c sharp", "csharp"),
    ("node.js", "node"),
    ("nodejs", "node"),
    ("next.js", "nextjs"),
    ("react.js", "react"),
    ("vue.js", "vue"),
    ("angular.js", "angular"),
    ("ci/cd", "ci/cd"),
    ("ci cd", "ci/cd"),
    ("cicd", "ci/cd"),
    ("amazon web services", "aws"),
    ("aws cloud", "aws"),
    ("microsoft azure", "azure"),
    ("google cloud", "gcp"),
    ("google cloud platform", "gcp"),
    ("sklearn", "scikit-learn"),
    ("sci-kit learn", "scikit-learn"),
    ("tf", "tensorflow"),
    ("tf2", "tensorflow"),
    ("torch", "pytorch"),
    ("hf", "hugging face"),
    ("postgres", "postgresql"),
    ("ms sql", "sql server"),
    ("mssql", "sql server"),
    ("pubsub", "pub/sub"),
    ("ms excel", "excel"),
    ("microsoft excel", "excel"),
    ("elasticsearch kibana logstash", "elk"),
    ("aws csa", "aws certified solutions architect"),
    ("aws developer associate", "aws certified developer"),
    ("cka kubernetes", "cka"),
    ("comptia security+", "security+"),
];

// ────────────────────────────────────────────────────────────────────────────
// SkillCatalog
// ────────────────────────────────────────────────────────────────────────────

/// Ordered set of normalized skill strings.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    skills: IndexSet<String>,
}

impl SkillCatalog {
    /// Normalizes and de-duplicates `skills`, keeping first-seen order.
    pub fn new<'a, I>(normalizer: &Normalizer, skills: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut normalized = IndexSet::new();
        for raw in skills {
            let skill = normalizer.normalize(raw);
            if skill.is_empty() {
                return Err(LexiconError::EmptyEntry {
                    section: "catalog",
                    entry: raw.to_string(),
                });
            }
            normalized.insert(skill);
        }
        Ok(Self { skills: normalized })
    }

    pub fn contains(&self, term: &str) -> bool {
        self.skills.contains(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SynonymTable
// ────────────────────────────────────────────────────────────────────────────

/// Normalized alias → normalized canonical form. Single hop only.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    aliases: IndexMap<String, String>,
}

impl SynonymTable {
    /// Builds the table, rejecting empty entries, one alias pointing at two different
    /// canonical forms, and chains (a canonical form that is itself an alias).
    /// Pairs that normalize to `alias == canonical` are dropped.
    pub fn new<'a, I>(normalizer: &Normalizer, pairs: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut aliases: IndexMap<String, String> = IndexMap::new();

        for (raw_alias, raw_canonical) in pairs {
            let alias = normalizer.normalize(raw_alias);
            let canonical = normalizer.normalize(raw_canonical);
            if alias.is_empty() {
                return Err(LexiconError::EmptyEntry {
                    section: "synonyms",
                    entry: raw_alias.to_string(),
                });
            }
            if canonical.is_empty() {
                return Err(LexiconError::EmptyEntry {
                    section: "synonyms",
                    entry: raw_canonical.to_string(),
                });
            }
            if alias == canonical {
                continue;
            }
            match aliases.get(&alias) {
                Some(existing) if *existing != canonical => {
                    return Err(LexiconError::ConflictingAlias {
                        alias,
                        first: existing.clone(),
                        second: canonical,
                    });
                }
                Some(_) => {}
                None => {
                    aliases.insert(alias, canonical);
                }
            }
        }

        if let Some((alias, canonical)) = aliases
            .iter()
            .find(|(_, canonical)| aliases.contains_key(canonical.as_str()))
        {
            return Err(LexiconError::TransitiveAlias {
                alias: alias.clone(),
                canonical: canonical.clone(),
            });
        }

        Ok(Self { aliases })
    }

    /// Canonical form for an already-normalized term, if it is an alias.
    pub fn resolve(&self, normalized: &str) -> Option<&str> {
        self.aliases.get(normalized).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Every built-in skill, flattened in group order (duplicates included).
pub fn default_skills() -> impl Iterator<Item = &'static str> {
    DEFAULT_GROUPS.iter().flat_map(|(_, skills)| skills.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_deduplicates_across_groups() {
        let catalog = SkillCatalog::new(&Normalizer::default(), default_skills()).unwrap();
        let raw_count = default_skills().count();
        assert!(catalog.len() < raw_count, "cypress, glue, iam, ... appear twice");
        assert_eq!(catalog.iter().filter(|s| *s == "cypress").count(), 1);
    }

    #[test]
    fn test_catalog_entries_are_normalized() {
        let catalog = SkillCatalog::new(&Normalizer::default(), default_skills()).unwrap();
        assert!(catalog.contains("ci / cd"));
        assert!(catalog.contains("pub / sub"));
        assert!(catalog.contains("scikitlearn"));
        assert!(!catalog.contains("ci/cd"));
        let n = Normalizer::default();
        for skill in catalog.iter() {
            assert_eq!(n.normalize(skill), skill);
        }
    }

    #[test]
    fn test_catalog_keeps_first_seen_order() {
        let catalog = SkillCatalog::new(&Normalizer::default(), ["Rust", "go", "RUST"]).unwrap();
        assert_eq!(catalog.iter().collect::<Vec<_>>(), vec!["rust", "go"]);
    }

    #[test]
    fn test_catalog_rejects_entries_that_normalize_to_empty() {
        let err = SkillCatalog::new(&Normalizer::default(), ["rust", "+++"]).unwrap_err();
        assert!(matches!(err, LexiconError::EmptyEntry { section: "catalog", .. }));
    }

    #[test]
    fn test_default_synonyms_load() {
        let table = SynonymTable::new(&Normalizer::default(), DEFAULT_SYNONYMS.iter().copied())
            .unwrap();
        assert_eq!(table.resolve("nodejs"), Some("node"));
        assert_eq!(table.resolve("ci cd"), Some("ci / cd"));
        assert_eq!(table.resolve("sklearn"), Some("scikitlearn"));
        assert_eq!(table.resolve("comptia security"), Some("security"));
        // identity pair "ci/cd" → "ci/cd" is dropped
        assert_eq!(table.resolve("ci / cd"), None);
    }

    #[test]
    fn test_synonyms_reject_conflicting_alias() {
        let err = SynonymTable::new(
            &Normalizer::default(),
            [("c++", "cpp"), ("c#", "csharp")],
        )
        .unwrap_err();
        match err {
            LexiconError::ConflictingAlias { alias, first, second } => {
                assert_eq!(alias, "c");
                assert_eq!(first, "cpp");
                assert_eq!(second, "csharp");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_synonyms_allow_repeated_identical_pair() {
        let table = SynonymTable::new(
            &Normalizer::default(),
            [("node.js", "node"), ("NodeJS", "node")],
        )
        .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_synonyms_reject_transitive_chain() {
        let err = SynonymTable::new(
            &Normalizer::default(),
            [("k8s", "kube"), ("kube", "kubernetes")],
        )
        .unwrap_err();
        assert!(matches!(err, LexiconError::TransitiveAlias { .. }));
    }

    #[test]
    fn test_synonyms_reject_empty() {
        assert!(SynonymTable::new(&Normalizer::default(), [("!!", "rust")]).is_err());
        assert!(SynonymTable::new(&Normalizer::default(), [("rs", "")]).is_err());
    }
}
