//! Parser Node Ext: named access to Ruby parser syntax trees
//!
//! A Ruby parser hands back trees of positional nodes: `s(:send, nil, :foo,
//! s(:int, 1))`. This crate layers a field vocabulary over them, so callers
//! ask a `send` node for its `receiver` or a `def` for its `body` instead of
//! counting children.
//!
//! # Architecture
//!
//! - [`node`]: the owned tree. Nodes are [`NodeRef`]s (`Arc<Node>`) with a
//!   weak back pointer to their parent, set as the tree is assembled.
//! - [`schema`]: the static registry of node types and their field names.
//! - [`access`]: typed accessors, the generic [`Node::field`] entry point,
//!   structural extractors for list-valued fields and hash key lookup.
//! - [`value`] and [`serialize`]: literal coercion ([`Node::to_value`]) and
//!   the structural dump ([`Node::to_hash`]).
//! - [`ingest`]: builds trees from the parser's JSON output.
//! - [`config`]: TOML query files run against a tree.
//!
//! Asking a node for a field its type does not have is a caller bug and
//! fails with [`NodeError::UnsupportedField`].
//!
//! # Example
//!
//! ```
//! use parser_node_ext::{from_json_str, Value};
//!
//! let tree = from_json_str(r#"["send", null, "puts", ["int", 1]]"#, None).unwrap();
//!
//! assert_eq!(tree.message().unwrap().as_symbol(), Some("puts"));
//! let args = tree.arguments().unwrap();
//! assert_eq!(args[0].to_value(), Value::Int(1));
//! assert!(tree.body().is_err());
//! ```

pub mod access;
pub mod config;
pub mod errors;
pub mod ingest;
pub mod logging;
pub mod node;
pub mod schema;
pub mod serialize;
pub mod value;

// Re-exports
pub use access::{FieldValue, KeyLookup};
pub use config::{load_from_path, load_from_str, run_queries, ConfigError, QueryConfig, QueryError};
pub use errors::NodeError;
pub use ingest::{from_json_path, from_json_str, IngestError};
pub use node::{Child, Node, NodeRef, NodeType, SourceBuffer, SourceRange};
pub use serialize::HashValue;
pub use value::Value;
