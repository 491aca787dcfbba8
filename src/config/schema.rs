use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct QueryConfig {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub queries: Vec<QueryDefinition>,
}

impl QueryConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.queries.is_empty() {
            issues.push(ValidationIssue::EmptyQueryList);
        }

        let mut seen = HashSet::new();
        for query in &self.queries {
            let id = query.id.trim();
            if id.is_empty() {
                issues.push(ValidationIssue::MissingField {
                    query_id: None,
                    field: "id",
                });
            } else if !seen.insert(id) {
                issues.push(ValidationIssue::DuplicateId { id: id.to_string() });
            }

            if query.field.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    query_id: (!id.is_empty()).then(|| id.to_string()),
                    field: "field",
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One field read at one node.
#[derive(Debug, Deserialize, Clone)]
pub struct QueryDefinition {
    pub id: String,
    /// Child indices from the root; empty selects the root itself.
    #[serde(default)]
    pub path: Vec<usize>,
    /// A schema field name, or a hash lookup such as `foo_value`.
    pub field: String,
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyQueryList,
    MissingField {
        query_id: Option<String>,
        field: &'static str,
    },
    DuplicateId {
        id: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyQueryList => write!(f, "query file contains no queries"),
            ValidationIssue::MissingField { query_id, field } => match query_id {
                Some(id) => write!(f, "query '{id}' missing required field '{field}'"),
                None => write!(f, "query missing required field '{field}'"),
            },
            ValidationIssue::DuplicateId { id } => write!(f, "query id '{id}' is used more than once"),
        }
    }
}
