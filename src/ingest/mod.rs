//! Builds trees from the parser's JSON dump.
//!
//! Two node shapes are accepted and may be mixed within one document:
//!
//! ```text
//! ["send", null, "puts", ["int", 1]]
//! {"type": "send", "children": [null, "puts"], "range": [0, 4]}
//! ```
//!
//! The array shape is what `ruby-parse --emit-json` prints. The object shape
//! additionally carries the node's byte range in the source, which is what
//! [`Node::to_source`] needs.
//!
//! JSON strings become symbols, except directly under `str`, `rational` and
//! `complex` nodes, where they are string scalars. `{"sym": ".."}` and
//! `{"str": ".."}` force either kind.

pub mod errors;

pub use errors::IngestError;

use crate::node::{Child, Node, NodeRef, NodeType, SourceBuffer, SourceRange};
use serde_json::{Map, Value as Json};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Parse a JSON tree. `source` is required only if the tree carries ranges.
pub fn from_json_str(json: &str, source: Option<Arc<SourceBuffer>>) -> Result<NodeRef, IngestError> {
    let value: Json = serde_json::from_str(json)?;
    from_json_value(&value, source)
}

pub fn from_json_value(value: &Json, source: Option<Arc<SourceBuffer>>) -> Result<NodeRef, IngestError> {
    let mut builder = TreeBuilder {
        source,
        path: Vec::new(),
        nodes: 0,
    };
    let root = builder.node(value)?;
    tracing::debug!(nodes = builder.nodes, root = %root.node_type(), "ingested tree");
    Ok(root)
}

/// Read a JSON tree from `tree_path`, with the source text from
/// `source_path` when given.
pub fn from_json_path(
    tree_path: impl AsRef<Path>,
    source_path: Option<&Path>,
) -> Result<NodeRef, IngestError> {
    let tree_path = tree_path.as_ref();
    let json = fs::read_to_string(tree_path).map_err(|source| IngestError::Io {
        path: tree_path.to_path_buf(),
        source,
    })?;
    let source = source_path
        .map(|path| {
            fs::read_to_string(path)
                .map(|text| SourceBuffer::named(path, text))
                .map_err(|source| IngestError::Io {
                    path: path.to_path_buf(),
                    source,
                })
        })
        .transpose()?;
    from_json_str(&json, source)
}

struct TreeBuilder {
    source: Option<Arc<SourceBuffer>>,
    /// Child indices from the root to the value being read.
    path: Vec<usize>,
    nodes: usize,
}

impl TreeBuilder {
    fn location(&self) -> String {
        if self.path.is_empty() {
            return "root".to_string();
        }
        let parts: Vec<String> = self.path.iter().map(usize::to_string).collect();
        format!("root.{}", parts.join("."))
    }

    fn malformed(&self, message: impl Into<String>) -> IngestError {
        IngestError::Malformed {
            location: self.location(),
            message: message.into(),
        }
    }

    fn node(&mut self, value: &Json) -> Result<NodeRef, IngestError> {
        match value {
            Json::Array(items) => {
                let (tag, rest) = items
                    .split_first()
                    .ok_or_else(|| self.malformed("empty array"))?;
                let node_type = self.node_type(tag)?;
                self.finish(node_type, rest, None)
            }
            Json::Object(fields) if fields.contains_key("type") => {
                let node_type = self.node_type(&fields["type"])?;
                let children = match fields.get("children") {
                    None | Some(Json::Null) => &[][..],
                    Some(Json::Array(children)) => children.as_slice(),
                    Some(_) => return Err(self.malformed("`children` must be an array")),
                };
                let span = self.span(fields)?;
                self.finish(node_type, children, span)
            }
            _ => Err(self.malformed("expected a node")),
        }
    }

    fn finish(
        &mut self,
        node_type: NodeType,
        items: &[Json],
        span: Option<SourceRange>,
    ) -> Result<NodeRef, IngestError> {
        let mut children = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            self.path.push(index);
            let child = self.child(node_type, item);
            self.path.pop();
            children.push(child?);
        }
        self.nodes += 1;
        tracing::trace!(node_type = %node_type, children = children.len(), "built node");
        Ok(Node::new(node_type, children, span))
    }

    fn node_type(&self, tag: &Json) -> Result<NodeType, IngestError> {
        let tag = tag
            .as_str()
            .ok_or_else(|| self.malformed("node type must be a string"))?;
        tag.parse().map_err(|_| IngestError::UnknownType {
            tag: tag.to_string(),
            location: self.location(),
        })
    }

    fn child(&mut self, parent: NodeType, value: &Json) -> Result<Child, IngestError> {
        let child = match value {
            Json::Null => Child::Nil,
            Json::Bool(value) => Child::Bool(*value),
            Json::Number(number) => match number.as_i64() {
                Some(value) => Child::Int(value),
                None => Child::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(text) => match parent {
                NodeType::Str | NodeType::Rational | NodeType::Complex => Child::Str(text.clone()),
                _ => Child::Symbol(text.clone()),
            },
            Json::Object(fields) if !fields.contains_key("type") => {
                match (fields.get("sym"), fields.get("str")) {
                    (Some(Json::String(name)), None) => Child::Symbol(name.clone()),
                    (None, Some(Json::String(text))) => Child::Str(text.clone()),
                    _ => return Err(self.malformed("scalar object needs one `sym` or `str` string")),
                }
            }
            Json::Array(_) | Json::Object(_) => Child::Node(self.node(value)?),
        };
        Ok(child)
    }

    fn span(&self, fields: &Map<String, Json>) -> Result<Option<SourceRange>, IngestError> {
        let Some(range) = fields.get("range") else {
            return Ok(None);
        };
        let bounds = range
            .as_array()
            .filter(|bounds| bounds.len() == 2)
            .and_then(|bounds| Some((bounds[0].as_u64()?, bounds[1].as_u64()?)))
            .ok_or_else(|| self.malformed("`range` must be [start, end]"))?;
        let (start, end) = (bounds.0 as usize, bounds.1 as usize);

        let source = self.source.clone().ok_or_else(|| IngestError::MissingSource {
            location: self.location(),
        })?;
        SourceRange::new(source, start..end)
            .map(Some)
            .ok_or_else(|| IngestError::BadRange {
                location: self.location(),
                start,
                end,
            })
    }
}
