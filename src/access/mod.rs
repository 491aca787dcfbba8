//! Semantic field access on [`Node`].
//!
//! Single-valued fields resolve through the schema table in
//! [`crate::schema`]; a handful of them have per-type overrides. List-valued
//! fields come from the extractors in [`extract`] and [`hash`].
//!
//! Every accessor is partial over node types: asking a node for a field its
//! type does not have is an [`NodeError::UnsupportedField`].

pub mod extract;
pub mod hash;

pub use hash::KeyLookup;

use crate::errors::NodeError;
use crate::node::{Child, Node, NodeType};
use crate::schema;

/// Result of a by-name field lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// A single positional slot.
    Child(&'a Child),
    /// A list computed by an extractor, in source order.
    List(Vec<&'a Child>),
}

impl<'a> FieldValue<'a> {
    pub fn as_child(&self) -> Option<&'a Child> {
        match self {
            FieldValue::Child(child) => Some(child),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[&'a Child]> {
        match self {
            FieldValue::Child(_) => None,
            FieldValue::List(items) => Some(items),
        }
    }
}

impl<'a> From<&'a [Child]> for FieldValue<'a> {
    fn from(children: &'a [Child]) -> Self {
        FieldValue::List(children.iter().collect())
    }
}

impl<'a> From<&'a Child> for FieldValue<'a> {
    fn from(child: &'a Child) -> Self {
        FieldValue::Child(child)
    }
}

macro_rules! positional_accessors {
    ($($(#[$doc:meta])* $method:ident => $field:literal),+ $(,)?) => {
        impl Node {
            $(
                $(#[$doc])*
                pub fn $method(&self) -> Result<&Child, NodeError> {
                    self.positional($field)
                }
            )+
        }
    };
}

positional_accessors! {
    /// Receiver of a `send`/`csend`/`index`; nil for an implicit receiver.
    receiver => "receiver",
    /// Method name of a `send`/`csend`, as a symbol.
    message => "message",
    name => "name",
    /// Call that a `block`/`numblock` is attached to.
    caller => "caller",
    key => "key",
    value => "value",
    right_value => "right_value",
    parent_class => "parent_class",
    parent_const => "parent_const",
    expression => "expression",
    if_statement => "if_statement",
    new_name => "new_name",
    old_name => "old_name",
    operator => "operator",
    variable => "variable",
    iterable => "iterable",
    guard => "guard",
    pattern => "pattern",
    begin => "begin",
    end => "end",
    arguments_count => "arguments_count",
    /// The `self` slot of a singleton method definition (`def self.foo`).
    singleton => "self",
}

impl Node {
    /// Plain schema lookup without per-type overrides.
    ///
    /// List-valued names are refused here even when the schema lists them:
    /// their value is not a single child.
    fn positional(&self, field: &str) -> Result<&Child, NodeError> {
        match schema::field_index(self.node_type(), field) {
            Some(index) if !schema::is_list_field(field) => Ok(self.child(index)),
            _ => Err(NodeError::unsupported(field, self)),
        }
    }

    /// Resolve a single-valued field by name, applying per-type overrides.
    pub fn resolve(&self, field: &str) -> Result<&Child, NodeError> {
        match field {
            "left_value" => self.left_value(),
            "else_statement" => self.else_statement(),
            "options" => self.options(),
            _ => self.positional(field),
        }
    }

    /// Resolve any field by name, single-valued or list-valued.
    pub fn field(&self, name: &str) -> Result<FieldValue<'_>, NodeError> {
        let value = match name {
            "arguments" => self.arguments()?.into(),
            "body" => self.body()?.into(),
            "elements" => self.elements()?.into(),
            "when_statements" => self.when_statements()?.into(),
            "in_statements" => self.in_statements()?.into(),
            "rescue_bodies" => self.rescue_bodies()?.into(),
            "ensure_body" => self.ensure_body()?.into(),
            "exceptions" => self.exceptions()?.into(),
            "pairs" => FieldValue::List(self.pair_slots()?),
            "kwsplats" => FieldValue::List(self.kwsplat_slots()?),
            "keys" => FieldValue::List(self.keys()?),
            "values" => FieldValue::List(self.values()?),
            _ => self.resolve(name)?.into(),
        };
        Ok(value)
    }

    /// Assigned target.
    ///
    /// For `or_asgn`, `and_asgn` and `op_asgn` the first child is itself an
    /// assignment node; when it assigns a plain variable the variable name is
    /// returned instead of the wrapper.
    pub fn left_value(&self) -> Result<&Child, NodeError> {
        match self.node_type() {
            NodeType::OrAsgn | NodeType::AndAsgn | NodeType::OpAsgn => {
                let target = self.child(0);
                match target.as_node() {
                    Some(node) if node.node_type().is_variable_assignment() => Ok(node.child(0)),
                    _ => Ok(target),
                }
            }
            _ => self.positional("left_value"),
        }
    }

    /// Trailing default branch. For `case`, `case_match` and `rescue` this is
    /// always the last child, whatever the number of clauses before it.
    pub fn else_statement(&self) -> Result<&Child, NodeError> {
        match self.node_type() {
            NodeType::Case | NodeType::CaseMatch | NodeType::Rescue => Ok(self.last_child()),
            _ => self.positional("else_statement"),
        }
    }

    /// The `regopt` flags of a regexp literal.
    pub fn options(&self) -> Result<&Child, NodeError> {
        match self.node_type() {
            NodeType::Regexp => Ok(self.last_child()),
            _ => Err(NodeError::unsupported("options", self)),
        }
    }
}
