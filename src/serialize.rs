//! Structural dump of a tree as nested ordered maps.
//!
//! Registered types are dumped field by field under their schema names;
//! other types fall back to a raw `children` list. Literals stay tagged
//! nodes: no coercion happens here.

use crate::access::FieldValue;
use crate::errors::NodeError;
use crate::node::{Child, Node};
use crate::schema;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum HashValue {
    Nil,
    Symbol(String),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<HashValue>),
    /// `type` first, then fields in schema order.
    Map(IndexMap<&'static str, HashValue>),
}

impl HashValue {
    pub fn get(&self, key: &str) -> Option<&HashValue> {
        match self {
            HashValue::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[HashValue]> {
        match self {
            HashValue::List(items) => Some(items),
            _ => None,
        }
    }

    fn symbol(name: &str) -> Self {
        HashValue::Symbol(name.to_string())
    }
}

impl Node {
    /// Dump this node and everything below it.
    ///
    /// Fails only if the schema names a field that no accessor serves, which
    /// would be a bug in the registry rather than in the tree.
    pub fn to_hash(&self) -> Result<HashValue, NodeError> {
        let mut map = IndexMap::new();
        map.insert("type", HashValue::symbol(self.node_type().as_str()));

        match schema::fields(self.node_type()) {
            Some(fields) => {
                for field in fields {
                    let value = match self.field(field)? {
                        FieldValue::Child(child) => child.to_hash()?,
                        FieldValue::List(items) => HashValue::List(
                            items
                                .into_iter()
                                .map(Child::to_hash)
                                .collect::<Result<_, _>>()?,
                        ),
                    };
                    map.insert(*field, value);
                }
            }
            None => {
                let children = self
                    .children()
                    .iter()
                    .map(Child::to_hash)
                    .collect::<Result<_, _>>()?;
                map.insert("children", HashValue::List(children));
            }
        }

        Ok(HashValue::Map(map))
    }
}

impl Child {
    pub fn to_hash(&self) -> Result<HashValue, NodeError> {
        Ok(match self {
            Child::Nil => HashValue::Nil,
            Child::Node(node) => node.to_hash()?,
            Child::Symbol(name) => HashValue::symbol(name),
            Child::Str(text) => HashValue::Str(text.clone()),
            Child::Int(value) => HashValue::Int(*value),
            Child::Float(value) => HashValue::Float(*value),
            Child::Bool(value) => HashValue::Bool(*value),
        })
    }
}

impl Serialize for HashValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HashValue::Nil => serializer.serialize_none(),
            HashValue::Symbol(text) | HashValue::Str(text) => serializer.serialize_str(text),
            HashValue::Int(value) => serializer.serialize_i64(*value),
            HashValue::Float(value) => serializer.serialize_f64(*value),
            HashValue::Bool(value) => serializer.serialize_bool(*value),
            HashValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            HashValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::build::*;
    use crate::node::NodeRef;
    use crate::s;

    fn map(entries: Vec<(&'static str, HashValue)>) -> HashValue {
        HashValue::Map(entries.into_iter().collect())
    }

    fn sym_value(name: &str) -> HashValue {
        HashValue::Symbol(name.to_string())
    }

    /// class Synvert
    ///   def foobar(foo, bar)
    ///     { foo => bar }
    ///   end
    /// end
    fn class_tree() -> NodeRef {
        s!(
            Class,
            s!(Const, nil(), sym("Synvert")),
            nil(),
            s!(
                Def,
                sym("foobar"),
                s!(Args, s!(Arg, sym("foo")), s!(Arg, sym("bar"))),
                s!(Hash, s!(Pair, s!(Lvar, sym("foo")), s!(Lvar, sym("bar"))))
            )
        )
    }

    #[test]
    fn dumps_nested_fields() {
        let expected = map(vec![
            ("type", sym_value("class")),
            (
                "name",
                map(vec![
                    ("type", sym_value("const")),
                    ("parent_const", HashValue::Nil),
                    ("name", sym_value("Synvert")),
                ]),
            ),
            ("parent_class", HashValue::Nil),
            (
                "body",
                HashValue::List(vec![map(vec![
                    ("type", sym_value("def")),
                    ("name", sym_value("foobar")),
                    (
                        "arguments",
                        HashValue::List(vec![
                            map(vec![("type", sym_value("arg")), ("name", sym_value("foo"))]),
                            map(vec![("type", sym_value("arg")), ("name", sym_value("bar"))]),
                        ]),
                    ),
                    (
                        "body",
                        HashValue::List(vec![map(vec![
                            ("type", sym_value("hash")),
                            (
                                "pairs",
                                HashValue::List(vec![map(vec![
                                    ("type", sym_value("pair")),
                                    (
                                        "key",
                                        map(vec![("type", sym_value("lvar")), ("name", sym_value("foo"))]),
                                    ),
                                    (
                                        "value",
                                        map(vec![("type", sym_value("lvar")), ("name", sym_value("bar"))]),
                                    ),
                                ])]),
                            ),
                        ])]),
                    ),
                ])]),
            ),
        ]);

        assert_eq!(class_tree().to_hash().unwrap(), expected);
    }

    #[test]
    fn nested_fields_match_their_own_dump() {
        let tree = class_tree();
        let hash = tree.to_hash().unwrap();
        let def = tree.body().unwrap()[0].as_node().unwrap();
        assert_eq!(hash.get("body").unwrap().as_list().unwrap()[0], def.to_hash().unwrap());
    }

    #[test]
    fn unregistered_type_dumps_children() {
        let node = s!(Procarg0, s!(Arg, sym("a")));
        assert_eq!(
            node.to_hash().unwrap(),
            map(vec![
                ("type", sym_value("procarg0")),
                (
                    "children",
                    HashValue::List(vec![map(vec![("type", sym_value("arg")), ("name", sym_value("a"))])]),
                ),
            ])
        );
    }

    #[test]
    fn literals_stay_tagged() {
        let node = s!(Int, int(42));
        assert_eq!(
            node.to_hash().unwrap(),
            map(vec![("type", sym_value("int")), ("value", HashValue::Int(42))])
        );
    }

    #[test]
    fn json_keeps_field_order() {
        let node = s!(Send, nil(), sym("puts"), s!(Str, string("hi")));
        let json = serde_json::to_string(&node.to_hash().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"type":"send","receiver":null,"message":"puts","arguments":[{"type":"str","value":"hi"}]}"#
        );
    }
}
