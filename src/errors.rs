use crate::node::{Node, NodeType};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The accessor does not apply to this kind of node. This is a caller
    /// bug (the wrong field was asked of the node), not a data condition.
    #[error("{field} is not supported for {node_type} node {node}{}", suggestion_suffix(.suggestion))]
    UnsupportedField {
        field: String,
        node_type: NodeType,
        /// The node rendered as an s-expression.
        node: String,
        /// Closest field that the node type does support.
        suggestion: Option<&'static str>,
    },
}

impl NodeError {
    pub(crate) fn unsupported(field: &str, node: &Node) -> Self {
        let suggestion = crate::schema::closest_field(node.node_type(), field);
        tracing::debug!(field, node_type = %node.node_type(), "unsupported field");
        NodeError::UnsupportedField {
            field: field.to_string(),
            node_type: node.node_type(),
            node: node.to_string(),
            suggestion,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            NodeError::UnsupportedField { field, .. } => field,
        }
    }
}

fn suggestion_suffix(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean `{name}`?)"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::build::*;
    use crate::s;

    #[test]
    fn message_renders_node() {
        let node = s!(Class, s!(Const, nil(), sym("Synvert")), nil(), nil());
        let err = NodeError::unsupported("message", &node);
        assert_eq!(
            err.to_string(),
            "message is not supported for class node s(:class, s(:const, nil, :Synvert), nil, nil)"
        );
    }

    #[test]
    fn message_suggests_close_field() {
        let node = s!(Send, nil(), sym("foo"));
        let err = NodeError::unsupported("reciever", &node);
        assert!(err.to_string().ends_with("(did you mean `receiver`?)"));
        assert_eq!(err.field(), "reciever");
    }
}
