//! The owned syntax tree.
//!
//! A [`Node`] is a type tag plus an ordered list of [`Child`] slots, exactly
//! as the parser emits it. Nodes are shared through [`NodeRef`] and know
//! their parent through a weak back-reference that is filled in when the
//! enclosing node is constructed.

pub mod span;
pub mod types;

pub use span::{SourceBuffer, SourceRange};
pub use types::{NodeType, UnknownNodeType};

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};

/// Shared handle to a node.
pub type NodeRef = Arc<Node>;

/// One positional slot of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// Absent slot (`nil` in the parser's output).
    Nil,
    Node(NodeRef),
    Symbol(String),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

pub(crate) static NIL: Child = Child::Nil;

impl Child {
    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            Child::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Child::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Child::Str(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Child::Nil)
    }

    /// Type of the node in this slot, if it holds one.
    pub fn node_type(&self) -> Option<NodeType> {
        self.as_node().map(|node| node.node_type())
    }

    pub fn is_type(&self, node_type: NodeType) -> bool {
        self.node_type() == Some(node_type)
    }
}

impl From<NodeRef> for Child {
    fn from(node: NodeRef) -> Self {
        Child::Node(node)
    }
}

impl From<Option<NodeRef>> for Child {
    fn from(node: Option<NodeRef>) -> Self {
        node.map_or(Child::Nil, Child::Node)
    }
}

impl fmt::Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Nil => f.write_str("nil"),
            Child::Node(node) => write!(f, "{node}"),
            Child::Symbol(name) => write!(f, ":{name}"),
            Child::Str(text) => write!(f, "{text:?}"),
            Child::Int(value) => write!(f, "{value}"),
            Child::Float(value) => write!(f, "{value:?}"),
            Child::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// A syntax tree node.
///
/// Equality is structural: two nodes are equal when their types and
/// children are equal, regardless of where they sit in the source or which
/// tree they belong to. Use [`Node::same`] for identity.
pub struct Node {
    node_type: NodeType,
    children: Vec<Child>,
    span: Option<SourceRange>,
    parent: RwLock<Weak<Node>>,
}

impl Node {
    /// Build a node and adopt every node among `children`.
    ///
    /// Children must be fully constructed; the tree is assembled bottom-up.
    pub fn new(node_type: NodeType, children: Vec<Child>, span: Option<SourceRange>) -> NodeRef {
        Arc::new_cyclic(|this| {
            for child in &children {
                if let Child::Node(node) = child {
                    node.store_parent(this.clone());
                }
            }
            Node {
                node_type,
                children,
                span,
                parent: RwLock::new(Weak::new()),
            }
        })
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn is(&self, node_type: NodeType) -> bool {
        self.node_type == node_type
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn span(&self) -> Option<&SourceRange> {
        self.span.as_ref()
    }

    /// Source text of this node, when it was built with a span.
    pub fn to_source(&self) -> Option<&str> {
        self.span.as_ref().map(SourceRange::source)
    }

    /// Identity comparison.
    pub fn same(a: &Node, b: &Node) -> bool {
        std::ptr::eq(a, b)
    }

    /// The enclosing node, or `None` for a root (or a node whose parent has
    /// been dropped).
    pub fn parent(&self) -> Option<NodeRef> {
        self.parent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .upgrade()
    }

    /// Re-point the parent reference.
    ///
    /// Construction already links every child; this exists for rewriting
    /// tools that move nodes between trees. Nothing here checks that `parent`
    /// actually contains this node.
    pub fn set_parent(&self, parent: Option<&NodeRef>) {
        self.store_parent(parent.map_or_else(Weak::new, Arc::downgrade));
    }

    fn store_parent(&self, parent: Weak<Node>) {
        *self.parent.write().unwrap_or_else(PoisonError::into_inner) = parent;
    }

    /// Children of the parent that come after this node.
    ///
    /// Returns `None` for a detached node, or when the parent no longer holds
    /// this node among its children.
    pub fn siblings(&self) -> Option<Vec<Child>> {
        let parent = self.parent()?;
        let index = parent.children.iter().position(|child| {
            child
                .as_node()
                .is_some_and(|node| Node::same(node, self))
        })?;
        Some(parent.children[index + 1..].to_vec())
    }

    /// Follow child indices down from this node. An empty path is the node
    /// itself; an index that is out of range or lands on a scalar gives `None`.
    pub fn at_path(&self, path: &[usize]) -> Option<&Node> {
        let mut node = self;
        for &index in path {
            node = node.children.get(index)?.as_node()?.as_ref();
        }
        Some(node)
    }

    /// Child at `index`, or the nil marker when the node is shorter.
    pub(crate) fn child(&self, index: usize) -> &Child {
        self.children.get(index).unwrap_or(&NIL)
    }

    pub(crate) fn last_child(&self) -> &Child {
        self.children.last().unwrap_or(&NIL)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.node_type == other.node_type && self.children == other.children
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Renders the parser's s-expression form, e.g. `s(:send, nil, :foo, s(:int, 1))`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s(:{}", self.node_type)?;
        for child in &self.children {
            write!(f, ", {child}")?;
        }
        f.write_str(")")
    }
}

/// Scalar helpers for assembling trees by hand, mostly in tests.
pub mod build {
    use super::Child;

    pub fn nil() -> Child {
        Child::Nil
    }

    pub fn sym(name: &str) -> Child {
        Child::Symbol(name.to_string())
    }

    pub fn string(text: &str) -> Child {
        Child::Str(text.to_string())
    }

    pub fn int(value: i64) -> Child {
        Child::Int(value)
    }

    pub fn float(value: f64) -> Child {
        Child::Float(value)
    }
}

/// Build a node without a span: `s!(Send, nil(), sym("foo"), s!(Int, int(1)))`.
#[macro_export]
macro_rules! s {
    ($ty:ident $(, $child:expr)* $(,)?) => {
        $crate::node::Node::new(
            $crate::node::NodeType::$ty,
            vec![$($crate::node::Child::from($child)),*],
            None,
        )
    };
}
