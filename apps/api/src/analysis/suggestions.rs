//! Improvement suggestions for missing skills.
//!
//! One line per missing skill, picked by category. Categories are matched on normalized
//! names so "scikit-learn" here matches the catalog's "scikitlearn".

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::analysis::text::Normalizer;

const CORE_TOOLS: &[&str] = &[
    "python", "java", "sql", "excel", "power bi", "tableau", "pandas", "numpy", "dbt", "airflow",
];

const ML_DEVOPS_TOOLS: &[&str] = &[
    "tensorflow", "pytorch", "scikit-learn", "mlops", "docker", "kubernetes", "helm",
    "terraform", "ansible",
];

const CLOUD_SERVICES: &[&str] = &[
    "aws", "azure", "gcp", "ec2", "s3", "lambda", "bigquery", "redshift", "snowflake", "gke",
    "eks", "ecs",
];

const METHODS: &[&str] = &["agile", "scrum", "kanban", "tdd", "bdd"];

const OBSERVABILITY: &[&str] = &[
    "prometheus", "grafana", "datadog", "new relic", "sentry", "elk", "cloudwatch",
];

const SOFT_SKILL_MARKERS: &[&str] = &["communication", "presentation", "leadership"];

const SOFT_SKILLS_LINE: &str = "Add a soft-skills bullet: \"Strong written and verbal communication; \
     led cross-functional demos and stakeholder updates.\"";

const NOTHING_MISSING: &str =
    "Your resume already covers the main keywords. You can still mirror the exact wording from the job post.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    CoreTool,
    MlDevOpsTool,
    CloudService,
    Method,
    Observability,
}

/// Normalized skill name → category, built on first use. Earlier groups win on overlap.
fn categories() -> &'static HashMap<String, Category> {
    static CATEGORIES: OnceLock<HashMap<String, Category>> = OnceLock::new();
    CATEGORIES.get_or_init(|| {
        let normalizer = Normalizer::default();
        let groups = [
            (CORE_TOOLS, Category::CoreTool),
            (ML_DEVOPS_TOOLS, Category::MlDevOpsTool),
            (CLOUD_SERVICES, Category::CloudService),
            (METHODS, Category::Method),
            (OBSERVABILITY, Category::Observability),
        ];
        let mut table = HashMap::new();
        for (group, category) in groups {
            for entry in group {
                table.entry(normalizer.normalize(entry)).or_insert(category);
            }
        }
        table
    })
}

/// Suggestions for `missing`, in the given order (pass `missing_ranked` to get the most
/// important first). The soft-skills line is emitted at most once.
pub fn suggest_improvements(missing: &[String]) -> Vec<String> {
    let categories = categories();

    let mut suggestions: Vec<String> = Vec::with_capacity(missing.len());
    for skill in missing {
        let skill = skill.as_str();
        let line = match categories.get(skill) {
            Some(Category::CoreTool) => format!(
                "Add {skill} under a 'Technical Skills' section or inside a relevant experience bullet."
            ),
            Some(Category::MlDevOpsTool) => format!(
                "Include {skill} in a 'Tools' line for your ML/DevOps project, with outcomes (accuracy, latency, cost)."
            ),
            Some(Category::CloudService) => {
                format!("Show {skill} in a project, e.g. 'Deployed on {skill}; cut infra cost 20%'.")
            }
            Some(Category::Method) => format!(
                "Add {skill} to a 'Methods' line under a project or role, tied to a measurable result."
            ),
            Some(Category::Observability) => format!(
                "Add {skill} under 'Monitoring/Observability' with a clear metric (MTTR, uptime)."
            ),
            None if SOFT_SKILL_MARKERS.iter().any(|m| skill.contains(m)) => {
                SOFT_SKILLS_LINE.to_string()
            }
            None => {
                format!("Mention {skill} in a project, coursework or experience bullet if you used it.")
            }
        };

        if !suggestions.contains(&line) {
            suggestions.push(line);
        }
    }

    if suggestions.is_empty() {
        suggestions.push(NOTHING_MISSING.to_string());
    }
    suggestions
}
