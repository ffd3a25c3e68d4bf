//! Role catalog: the predefined interview questions, grouped by role.
//!
//! Treated as configuration: the built-in set can be replaced by a JSON file
//! (`ROLE_CATALOG_PATH`) shaped as `[{"role": "...", "questions": ["..."]}]`.

use std::path::Path;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::record::CUSTOM_ROLE;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read role catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid role catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid role catalog: {0}")]
    Invalid(String),
}

/// A role and its ordered list of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleQuestions {
    pub role: String,
    pub questions: Vec<String>,
}

/// Ordered role → questions mapping.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: Vec<RoleQuestions>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<RoleQuestions>) -> Result<Self, CatalogError> {
        if roles.is_empty() {
            return Err(CatalogError::Invalid("at least one role is required".into()));
        }
        for (i, entry) in roles.iter().enumerate() {
            if entry.role.trim().is_empty() {
                return Err(CatalogError::Invalid(format!("role #{} has no name", i + 1)));
            }
            if entry.role.eq_ignore_ascii_case(CUSTOM_ROLE) {
                return Err(CatalogError::Invalid(format!(
                    "'{CUSTOM_ROLE}' is reserved for user-entered questions"
                )));
            }
            if entry.questions.iter().all(|q| q.trim().is_empty()) {
                return Err(CatalogError::Invalid(format!(
                    "role '{}' has no questions",
                    entry.role
                )));
            }
            if roles[..i].iter().any(|prev| prev.role == entry.role) {
                return Err(CatalogError::Invalid(format!(
                    "role '{}' is listed twice",
                    entry.role
                )));
            }
        }
        Ok(Self { roles })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::new(serde_json::from_str(&raw)?)
    }

    pub fn builtin() -> Self {
        let roles = BUILTIN_ROLES
            .iter()
            .map(|(role, questions)| RoleQuestions {
                role: role.to_string(),
                questions: questions.iter().map(|q| q.to_string()).collect(),
            })
            .collect();
        Self { roles }
    }

    pub fn roles(&self) -> &[RoleQuestions] {
        &self.roles
    }

    pub fn questions(&self, role: &str) -> Option<&[String]> {
        self.roles
            .iter()
            .find(|r| r.role == role)
            .map(|r| r.questions.as_slice())
    }

    /// True for catalog roles and the reserved `custom` role.
    pub fn accepts_role(&self, role: &str) -> bool {
        role == CUSTOM_ROLE || self.questions(role).is_some()
    }

    /// Uniformly random question for `role`, or `None` for an unknown role.
    pub fn random_question(&self, role: &str) -> Option<&str> {
        self.questions(role)?
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
    }
}

const BUILTIN_ROLES: &[(&str, &[&str])] = &[
    (
        "Data Analyst",
        &[
            "Tell me about yourself.",
            "Why do you want to work in data analytics?",
            "Explain a project you’ve worked on using Python.",
            "What is the difference between inner join and left join?",
            "How do you handle missing data in a dataset?",
            "What are KPIs? Can you give an example from your experience?",
        ],
    ),
    (
        "Data Scientist",
        &[
            "What is overfitting in machine learning?",
            "Describe a time you tuned hyperparameters.",
            "Explain bias-variance tradeoff.",
            "What's the difference between classification and regression?",
            "When would you use logistic regression?",
            "How do you evaluate a classification model?",
        ],
    ),
    (
        "ML Engineer",
        &[
            "How do you deploy a model in production?",
            "Explain MLOps in simple terms.",
            "How would you scale a model?",
            "What are some challenges in model versioning?",
            "Describe the CI/CD pipeline for ML.",
            "How do you monitor model drift?",
        ],
    ),
];
