//! Hash literal and hash pattern access, including lookup by key name.

use crate::errors::NodeError;
use crate::node::{Child, Node, NodeRef, NodeType};
use crate::value::Value;

/// Answer to a dynamic [`Node::lookup`].
#[derive(Debug, Clone, PartialEq)]
pub enum KeyLookup<'a> {
    /// `<key>_pair`: the matching `pair` node.
    Pair(Option<&'a NodeRef>),
    /// `<key>_value`: the coerced value of the matching pair.
    Value(Option<Value<'a>>),
    /// `<key>_source`: source of the matching value, empty when unmatched.
    Source(String),
}

impl Node {
    fn is_hash_like(&self) -> bool {
        matches!(
            self.node_type(),
            NodeType::Hash | NodeType::HashPattern | NodeType::Kwargs
        )
    }

    fn hash_entries(&self, field: &str) -> Result<&[Child], NodeError> {
        if self.is_hash_like() {
            Ok(self.children())
        } else {
            Err(NodeError::unsupported(field, self))
        }
    }

    pub(crate) fn pair_slots(&self) -> Result<Vec<&Child>, NodeError> {
        Ok(self
            .hash_entries("pairs")?
            .iter()
            .filter(|child| child.is_type(NodeType::Pair))
            .collect())
    }

    pub(crate) fn kwsplat_slots(&self) -> Result<Vec<&Child>, NodeError> {
        Ok(self
            .hash_entries("kwsplats")?
            .iter()
            .filter(|child| child.is_type(NodeType::Kwsplat) || child.is_type(NodeType::MatchRest))
            .collect())
    }

    /// `pair` entries in source order, skipping `**splat` entries.
    pub fn pairs(&self) -> Result<Vec<&NodeRef>, NodeError> {
        Ok(self
            .pair_slots()?
            .into_iter()
            .filter_map(Child::as_node)
            .collect())
    }

    /// Double-splat entries (`**opts`, or `**rest` in a hash pattern).
    pub fn kwsplats(&self) -> Result<Vec<&NodeRef>, NodeError> {
        Ok(self
            .kwsplat_slots()?
            .into_iter()
            .filter_map(Child::as_node)
            .collect())
    }

    pub fn keys(&self) -> Result<Vec<&Child>, NodeError> {
        Ok(self.pairs_checked("keys")?.into_iter().map(|pair| pair.child(0)).collect())
    }

    pub fn values(&self) -> Result<Vec<&Child>, NodeError> {
        Ok(self.pairs_checked("values")?.into_iter().map(|pair| pair.child(1)).collect())
    }

    /// Whether a pair's key is `key`, as either a symbol or a string.
    pub fn has_key(&self, key: &str) -> Result<bool, NodeError> {
        Ok(self.hash_pair_checked("has_key", key)?.is_some())
    }

    /// The first pair whose key is `key` (symbol or string).
    pub fn hash_pair(&self, key: &str) -> Result<Option<&NodeRef>, NodeError> {
        self.hash_pair_checked("hash_pair", key)
    }

    /// Value node of the first pair whose key is `key` (symbol or string).
    pub fn hash_value(&self, key: &str) -> Result<Option<&Child>, NodeError> {
        Ok(self
            .hash_pair_checked("hash_value", key)?
            .map(|pair| pair.child(1)))
    }

    /// Look a hash entry up by a derived name: `foo_pair`, `foo_value` or
    /// `foo_source` for the key `foo`.
    ///
    /// A missing key is not an error; the key depends on the data, not on
    /// the node type.
    pub fn lookup(&self, name: &str) -> Result<KeyLookup<'_>, NodeError> {
        if !self.is_hash_like() {
            return Err(NodeError::unsupported(name, self));
        }
        if let Some(key) = name.strip_suffix("_pair") {
            return Ok(KeyLookup::Pair(self.hash_pair(key)?));
        }
        if let Some(key) = name.strip_suffix("_value") {
            return Ok(KeyLookup::Value(self.hash_value(key)?.map(Child::to_value)));
        }
        if let Some(key) = name.strip_suffix("_source") {
            let source = self
                .hash_value(key)?
                .and_then(Child::as_node)
                .and_then(|value| value.to_source())
                .unwrap_or_default();
            return Ok(KeyLookup::Source(source.to_string()));
        }
        Err(NodeError::unsupported(name, self))
    }

    fn pairs_checked(&self, field: &str) -> Result<Vec<&NodeRef>, NodeError> {
        self.hash_entries(field)?;
        self.pairs()
    }

    fn hash_pair_checked(&self, field: &str, key: &str) -> Result<Option<&NodeRef>, NodeError> {
        Ok(self
            .pairs_checked(field)?
            .into_iter()
            .find(|pair| key_matches(pair.child(0), key)))
    }
}

fn key_matches(key_node: &Child, key: &str) -> bool {
    match key_node.to_value() {
        Value::Symbol(name) | Value::Str(name) => name == key,
        _ => false,
    }
}
