//! Runs a query file against a tree.
//!
//! Each query walks a child-index path from the root and reads one field at
//! the node it lands on. Results come back per query id, in file order, so a
//! failing query never hides the others.

use crate::access::{FieldValue, KeyLookup};
use crate::config::schema::QueryConfig;
use crate::errors::NodeError;
use crate::node::{Child, Node};
use crate::serialize::HashValue;
use serde_json::Value as Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("no node at path {path}")]
    PathNotFound { path: String },

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("failed to encode result: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn run_queries(config: &QueryConfig, root: &Node) -> Vec<(String, Result<Json, QueryError>)> {
    config
        .queries
        .iter()
        .map(|query| {
            let result = root
                .at_path(&query.path)
                .ok_or_else(|| QueryError::PathNotFound {
                    path: format_path(&query.path),
                })
                .and_then(|node| select(node, &query.field));
            if let Err(err) = &result {
                tracing::debug!(id = %query.id, error = %err, "query failed");
            }
            (query.id.clone(), result)
        })
        .collect()
}

/// Read `name` at `node` as JSON.
///
/// Schema fields go through [`Node::field`]. A name ending in `_pair`,
/// `_value` or `_source` that is not a field falls back to a hash lookup on
/// hash-like nodes.
pub fn select(node: &Node, name: &str) -> Result<Json, QueryError> {
    match node.field(name) {
        Ok(value) => field_json(value),
        Err(err) if is_lookup_name(name) => match node.lookup(name) {
            Ok(found) => lookup_json(found),
            Err(_) => Err(err.into()),
        },
        Err(err) => Err(err.into()),
    }
}

/// Renders a child-index path the way the CLI accepts it: `0.2.1`, or `.`
/// for the root.
pub fn format_path(path: &[usize]) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    path.iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

fn is_lookup_name(name: &str) -> bool {
    ["_pair", "_value", "_source"]
        .iter()
        .any(|suffix| name.len() > suffix.len() && name.ends_with(suffix))
}

fn field_json(value: FieldValue<'_>) -> Result<Json, QueryError> {
    let hash = match value {
        FieldValue::Child(child) => child.to_hash()?,
        FieldValue::List(items) => HashValue::List(
            items
                .into_iter()
                .map(Child::to_hash)
                .collect::<Result<_, _>>()?,
        ),
    };
    Ok(serde_json::to_value(&hash)?)
}

fn lookup_json(found: KeyLookup<'_>) -> Result<Json, QueryError> {
    Ok(match found {
        KeyLookup::Pair(Some(pair)) => serde_json::to_value(pair.to_hash()?)?,
        KeyLookup::Value(Some(value)) => serde_json::to_value(&value)?,
        KeyLookup::Pair(None) | KeyLookup::Value(None) => Json::Null,
        KeyLookup::Source(source) => Json::String(source),
    })
}
