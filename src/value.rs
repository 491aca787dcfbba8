//! Coercion of literal nodes to plain values.

use crate::node::{Child, Node, NodeType};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A literal's value, or the node itself when it is not a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(String),
    Array(Vec<Value<'a>>),
    Range {
        begin: Box<Value<'a>>,
        end: Box<Value<'a>>,
        exclusive: bool,
    },
    /// Anything that is not a literal coerces to itself.
    Node(&'a Node),
}

impl<'a> Value<'a> {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Ruby truthiness: everything but `nil` and `false`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn as_node(&self) -> Option<&'a Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl Node {
    /// Coerce a literal to its value.
    ///
    /// Never fails: a node that is not a literal (a call, a variable, an
    /// interpolated string, a multi-statement `begin`) comes back as
    /// [`Value::Node`].
    pub fn to_value(&self) -> Value<'_> {
        use NodeType::*;

        match self.node_type() {
            Int | Float | Str | Sym | Rational | Complex => self.last_child().to_value(),
            True => Value::Bool(true),
            False => Value::Bool(false),
            Nil => Value::Nil,
            Array => Value::Array(self.children().iter().map(Child::to_value).collect()),
            Irange | Erange => Value::Range {
                begin: Box::new(self.child(0).to_value()),
                end: Box::new(self.child(1).to_value()),
                exclusive: self.is(Erange),
            },
            Begin | Kwbegin if self.children().len() == 1 => self.child(0).to_value(),
            _ => Value::Node(self),
        }
    }
}

impl Child {
    pub fn to_value(&self) -> Value<'_> {
        match self {
            Child::Nil => Value::Nil,
            Child::Node(node) => node.to_value(),
            Child::Symbol(name) => Value::Symbol(name.clone()),
            Child::Str(text) => Value::Str(text.clone()),
            Child::Int(value) => Value::Int(*value),
            Child::Float(value) => Value::Float(*value),
            Child::Bool(value) => Value::Bool(*value),
        }
    }
}

/// Symbols and strings both serialize as JSON strings; ranges as
/// `{"begin", "end", "exclusive"}`; unconverted nodes as their s-expression.
impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Nil => serializer.serialize_none(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::Str(text) | Value::Symbol(text) => serializer.serialize_str(text),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Range {
                begin,
                end,
                exclusive,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("begin", begin)?;
                map.serialize_entry("end", end)?;
                map.serialize_entry("exclusive", exclusive)?;
                map.end()
            }
            Value::Node(node) => serializer.serialize_str(&node.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::build::*;
    use crate::s;

    #[test]
    fn scalar_literals() {
        assert_eq!(s!(Int, int(1)).to_value(), Value::Int(1));
        assert_eq!(s!(Float, float(1.5)).to_value(), Value::Float(1.5));
        assert_eq!(s!(Str, string("str")).to_value(), Value::Str("str".to_string()));
        assert_eq!(s!(Sym, sym("str")).to_value(), Value::Symbol("str".to_string()));
    }

    #[test]
    fn boolean_and_nil() {
        assert!(s!(True).to_value().is_truthy());
        assert!(!s!(False).to_value().is_truthy());
        assert!(s!(Nil).to_value().is_nil());
    }

    #[test]
    fn array_coerces_elementwise() {
        let node = s!(Array, s!(Int, int(1)), s!(Str, string("a")), s!(True));
        assert_eq!(
            node.to_value(),
            Value::Array(vec![Value::Int(1), Value::Str("a".to_string()), Value::Bool(true)])
        );
    }

    #[test]
    fn ranges() {
        let inclusive = s!(Irange, s!(Int, int(1)), s!(Int, int(10)));
        assert_eq!(
            inclusive.to_value(),
            Value::Range {
                begin: Box::new(Value::Int(1)),
                end: Box::new(Value::Int(10)),
                exclusive: false,
            }
        );

        let endless = s!(Erange, s!(Int, int(1)), nil());
        assert!(matches!(
            endless.to_value(),
            Value::Range { ref end, exclusive: true, .. } if end.is_nil()
        ));
    }

    #[test]
    fn parenthesized_literal_unwraps() {
        let node = s!(Begin, s!(Irange, s!(Int, int(1)), s!(Int, int(10))));
        assert!(matches!(node.to_value(), Value::Range { exclusive: false, .. }));

        let kw = s!(Kwbegin, s!(Int, int(3)));
        assert_eq!(kw.to_value(), Value::Int(3));
    }

    #[test]
    fn non_literals_coerce_to_themselves() {
        let call = s!(Send, nil(), sym("foo"));
        let value = call.to_value();
        assert!(Node::same(value.as_node().unwrap(), &call));

        let sequence = s!(Begin, s!(Int, int(1)), s!(Int, int(2)));
        assert!(Node::same(sequence.to_value().as_node().unwrap(), &sequence));
    }

    #[test]
    fn array_with_call_keeps_node() {
        let node = s!(Array, s!(Lvar, sym("x")), s!(Int, int(2)));
        match node.to_value() {
            Value::Array(items) => {
                assert!(items[0].as_node().unwrap().is(NodeType::Lvar));
                assert_eq!(items[1], Value::Int(2));
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn serializes_to_json() {
        let node = s!(Array, s!(Sym, sym("a")), s!(Nil), s!(Erange, s!(Int, int(1)), s!(Int, int(3))));
        let json = serde_json::to_string(&node.to_value()).unwrap();
        assert_eq!(json, r#"["a",null,{"begin":1,"end":3,"exclusive":true}]"#);
    }
}
