//! Extractors for fields that are not a single positional child.
//!
//! Bodies are the awkward case: the parser stores a one-statement body
//! unwrapped and wraps two or more statements in a `begin` node, so the
//! same field is either "the `begin`'s children" or "the trailing slots".

use crate::errors::NodeError;
use crate::node::{Child, Node, NodeType};
use std::slice;

impl Node {
    /// Parameters of a definition or block, or arguments of a call.
    pub fn arguments(&self) -> Result<&[Child], NodeError> {
        use NodeType::*;

        match self.node_type() {
            Def | Block => Ok(self.parameter_list(1)),
            Defs => Ok(self.parameter_list(2)),
            Send | Csend => Ok(self.children().get(2..).unwrap_or_default()),
            Index => Ok(self.children().get(1..).unwrap_or_default()),
            Args | Defined | Super | Yield | Break | Next | Return => Ok(self.children()),
            _ => Err(NodeError::unsupported("arguments", self)),
        }
    }

    /// Statements of a block-like construct, in source order.
    ///
    /// Empty bodies yield an empty slice rather than an error.
    pub fn body(&self) -> Result<&[Child], NodeError> {
        use NodeType::*;

        match self.node_type() {
            Begin | Kwbegin => Ok(self.children()),
            Def | Block | Numblock | Class | For | InPattern | Resbody => Ok(self.trailing_body(2)),
            Module | Sclass | While | Until | WhilePost | UntilPost => Ok(self.trailing_body(1)),
            Defs => Ok(self.trailing_body(3)),
            When => Ok(self.trailing_body(self.children().len().saturating_sub(1))),
            Rescue | Ensure | Preexe | Postexe => Ok(unwrap_sequence(self.child(0))),
            _ => Err(NodeError::unsupported("body", self)),
        }
    }

    /// `when` clauses of a `case`.
    pub fn when_statements(&self) -> Result<&[Child], NodeError> {
        match self.node_type() {
            NodeType::Case => Ok(self.inner_clauses()),
            _ => Err(NodeError::unsupported("when_statements", self)),
        }
    }

    /// `in` clauses of a pattern-matching `case`.
    pub fn in_statements(&self) -> Result<&[Child], NodeError> {
        match self.node_type() {
            NodeType::CaseMatch => Ok(self.inner_clauses()),
            _ => Err(NodeError::unsupported("in_statements", self)),
        }
    }

    /// `resbody` handlers of a `rescue`.
    pub fn rescue_bodies(&self) -> Result<&[Child], NodeError> {
        match self.node_type() {
            NodeType::Rescue => Ok(self.inner_clauses()),
            _ => Err(NodeError::unsupported("rescue_bodies", self)),
        }
    }

    /// Statements of the `ensure` clause itself.
    pub fn ensure_body(&self) -> Result<&[Child], NodeError> {
        match self.node_type() {
            NodeType::Ensure => Ok(self.trailing_body(1)),
            _ => Err(NodeError::unsupported("ensure_body", self)),
        }
    }

    /// Exception classes matched by a `resbody`. A bare `rescue` has none.
    pub fn exceptions(&self) -> Result<&[Child], NodeError> {
        match self.node_type() {
            NodeType::Resbody => Ok(match self.child(0) {
                Child::Nil => &[],
                Child::Node(list) if list.is(NodeType::Array) => list.children(),
                other => slice::from_ref(other),
            }),
            _ => Err(NodeError::unsupported("exceptions", self)),
        }
    }

    /// Members of a literal collection, interpolation or pattern list.
    pub fn elements(&self) -> Result<&[Child], NodeError> {
        use NodeType::*;

        match self.node_type() {
            Array | ArrayPattern | ArrayPatternWithTail | FindPattern | Dstr | Dsym | Xstr
            | MatchAlt | Mlhs | Undef | Regopt => Ok(self.children()),
            // the trailing regopt holds flags, not pattern parts
            Regexp => {
                let len = self.children().len();
                Ok(&self.children()[..len.saturating_sub(1)])
            }
            _ => Err(NodeError::unsupported("elements", self)),
        }
    }

    /// Parameter slot of a definition: the `args` wrapper's children, or the
    /// lone node when the parser emitted one without a wrapper.
    fn parameter_list(&self, index: usize) -> &[Child] {
        match self.child(index) {
            Child::Nil => &[],
            Child::Node(args) if args.is(NodeType::Args) => args.children(),
            other => slice::from_ref(other),
        }
    }

    fn trailing_body(&self, slot: usize) -> &[Child] {
        match self.children().get(slot) {
            None | Some(Child::Nil) => &[],
            Some(Child::Node(seq)) if seq.is(NodeType::Begin) => seq.children(),
            Some(_) => &self.children()[slot..],
        }
    }

    /// Children between the leading discriminant and the trailing default.
    fn inner_clauses(&self) -> &[Child] {
        let len = self.children().len();
        if len < 2 {
            return &[];
        }
        &self.children()[1..len - 1]
    }
}

fn unwrap_sequence(child: &Child) -> &[Child] {
    match child {
        Child::Nil => &[],
        Child::Node(seq) if seq.is(NodeType::Begin) => seq.children(),
        other => slice::from_ref(other),
    }
}

#[cfg(test)]
mod tests {
    use crate::node::build::*;
    use crate::node::{Child, NodeRef, NodeType};
    use crate::s;

    fn call(message: &str) -> NodeRef {
        s!(Send, nil(), sym(message))
    }

    fn nodes(children: &[Child]) -> Vec<NodeRef> {
        children.iter().filter_map(|c| c.as_node().cloned()).collect()
    }

    fn types(children: &[Child]) -> Vec<NodeType> {
        children.iter().filter_map(Child::node_type).collect()
    }

    #[test]
    fn def_arguments_unwrap_args() {
        let node = s!(
            Def,
            sym("test"),
            s!(Args, s!(Arg, sym("foo")), s!(Arg, sym("bar"))),
            s!(Send, s!(Lvar, sym("foo")), sym("+"), s!(Lvar, sym("bar")))
        );
        assert_eq!(types(node.arguments().unwrap()), vec![NodeType::Arg, NodeType::Arg]);
    }

    #[test]
    fn bare_forward_args_become_one_element() {
        let node = s!(Def, sym("test"), s!(ForwardArgs), nil());
        assert_eq!(types(node.arguments().unwrap()), vec![NodeType::ForwardArgs]);

        let defs = s!(Defs, s!(SelfRef), sym("test"), s!(ForwardArgs), nil());
        assert_eq!(types(defs.arguments().unwrap()), vec![NodeType::ForwardArgs]);
    }

    #[test]
    fn call_arguments_skip_receiver_and_message() {
        let node = s!(
            Send,
            s!(Const, nil(), sym("FactoryGirl")),
            sym("create"),
            s!(Sym, sym("post")),
            s!(Hash, s!(Pair, s!(Sym, sym("title")), s!(Str, string("post"))))
        );
        assert_eq!(types(node.arguments().unwrap()), vec![NodeType::Sym, NodeType::Hash]);
        assert!(call("foo").arguments().unwrap().is_empty());

        let index = s!(Index, s!(Lvar, sym("params")), s!(Sym, sym("user")));
        assert_eq!(types(index.arguments().unwrap()), vec![NodeType::Sym]);
    }

    #[test]
    fn defined_arguments_are_all_children() {
        let node = s!(Defined, s!(Const, nil(), sym("Bundler")));
        assert_eq!(
            nodes(node.arguments().unwrap()),
            vec![s!(Const, nil(), sym("Bundler"))]
        );
    }

    #[test]
    fn arguments_unsupported_on_class() {
        let node = s!(Class, s!(Const, nil(), sym("A")), nil(), nil());
        assert!(node.arguments().is_err());
    }

    #[test]
    fn single_statement_body() {
        let node = s!(
            Block,
            s!(Send, s!(Const, nil(), sym("RSpec")), sym("configure")),
            s!(Args, s!(Arg, sym("config"))),
            call("include")
        );
        assert_eq!(nodes(node.body().unwrap()), vec![call("include")]);
    }

    #[test]
    fn multi_statement_body_is_flattened() {
        let node = s!(Def, sym("test"), s!(Args), s!(Begin, call("foo"), call("bar")));
        assert_eq!(nodes(node.body().unwrap()), vec![call("foo"), call("bar")]);

        let defs = s!(
            Defs,
            s!(SelfRef),
            sym("test"),
            s!(Args),
            s!(Begin, call("foo"), call("bar"))
        );
        assert_eq!(nodes(defs.body().unwrap()), vec![call("foo"), call("bar")]);
    }

    #[test]
    fn empty_bodies() {
        assert!(s!(Def, sym("test"), s!(Args), nil()).body().unwrap().is_empty());
        assert!(s!(Defs, s!(SelfRef), sym("test"), s!(Args), nil())
            .body()
            .unwrap()
            .is_empty());
        assert!(s!(Class, s!(Const, nil(), sym("User")), nil(), nil())
            .body()
            .unwrap()
            .is_empty());
        assert!(s!(Module, s!(Const, nil(), sym("Admin")), nil())
            .body()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn begin_body_is_its_children() {
        let node = s!(Begin, call("foo"), call("bar"));
        assert_eq!(nodes(node.body().unwrap()), vec![call("foo"), call("bar")]);
    }

    #[test]
    fn kwbegin_in_body_is_not_flattened() {
        let inner = s!(Kwbegin, call("foo"), call("bar"));
        let node = s!(While, call("cond"), inner.clone());
        assert_eq!(nodes(node.body().unwrap()), vec![inner]);
    }

    #[test]
    fn when_body_is_the_last_slot() {
        let single = s!(When, call("foo"), s!(Str, string("foo")));
        assert_eq!(nodes(single.body().unwrap()), vec![s!(Str, string("foo"))]);

        let multi_condition = s!(When, call("foo"), call("bar"), s!(Str, string("x")));
        assert_eq!(nodes(multi_condition.body().unwrap()), vec![s!(Str, string("x"))]);

        let empty = s!(When, call("foo"), nil());
        assert!(empty.body().unwrap().is_empty());
    }

    #[test]
    fn case_clauses() {
        let first = s!(When, call("foo"), s!(Str, string("foo")));
        let second = s!(When, call("bar"), s!(Str, string("bar")));
        let node = s!(Case, call("expression"), first.clone(), second.clone(), nil());
        assert_eq!(nodes(node.when_statements().unwrap()), vec![first, second]);
        assert!(node.in_statements().is_err());

        let clause = s!(InPattern, s!(MatchVar, sym("x")), nil(), call("x"));
        let matcher = s!(CaseMatch, call("value"), clause.clone(), s!(EmptyElse));
        assert_eq!(nodes(matcher.in_statements().unwrap()), vec![clause]);
        assert!(matcher.else_statement().unwrap().is_type(NodeType::EmptyElse));
    }

    #[test]
    fn rescue_parts() {
        let handler = s!(
            Resbody,
            s!(Array, s!(Const, nil(), sym("ArgumentError")), s!(Const, nil(), sym("TypeError"))),
            s!(Lvasgn, sym("e")),
            s!(Begin, call("log"), call("raise"))
        );
        let bare = s!(Resbody, nil(), nil(), nil());
        let rescue = s!(
            Rescue,
            s!(Begin, call("foo"), call("bar")),
            handler.clone(),
            bare.clone(),
            call("otherwise")
        );

        assert_eq!(nodes(rescue.body().unwrap()), vec![call("foo"), call("bar")]);
        assert_eq!(nodes(rescue.rescue_bodies().unwrap()), vec![handler.clone(), bare.clone()]);
        assert_eq!(rescue.else_statement().unwrap(), &Child::from(call("otherwise")));

        assert_eq!(handler.exceptions().unwrap().len(), 2);
        assert!(handler.variable().unwrap().is_type(NodeType::Lvasgn));
        assert_eq!(nodes(handler.body().unwrap()), vec![call("log"), call("raise")]);

        assert!(bare.exceptions().unwrap().is_empty());
        assert!(bare.body().unwrap().is_empty());
    }

    #[test]
    fn single_exception_is_one_element() {
        let handler = s!(Resbody, s!(Const, nil(), sym("IOError")), nil(), call("retry_it"));
        assert_eq!(types(handler.exceptions().unwrap()), vec![NodeType::Const]);
    }

    #[test]
    fn ensure_parts() {
        let node = s!(Ensure, call("work"), call("cleanup"));
        assert_eq!(nodes(node.body().unwrap()), vec![call("work")]);
        assert_eq!(nodes(node.ensure_body().unwrap()), vec![call("cleanup")]);

        let empty = s!(Ensure, nil(), call("cleanup"));
        assert!(empty.body().unwrap().is_empty());

        let no_cleanup = s!(Ensure, call("work"), nil());
        assert!(no_cleanup.ensure_body().unwrap().is_empty());

        let multi = s!(Ensure, call("work"), s!(Begin, call("close"), call("flush")));
        assert_eq!(nodes(multi.ensure_body().unwrap()), vec![call("close"), call("flush")]);
    }

    #[test]
    fn fixed_slot_bodies() {
        let bodies: [(&str, fn(Child) -> NodeRef); 8] = [
            ("for", |body| s!(For, s!(Lvasgn, sym("i")), call("items"), body)),
            ("in_pattern", |body| s!(InPattern, s!(MatchVar, sym("x")), nil(), body)),
            ("numblock", |body| s!(Numblock, call("each"), int(1), body)),
            ("sclass", |body| s!(Sclass, s!(SelfRef), body)),
            ("while_post", |body| s!(WhilePost, call("cond"), body)),
            ("until_post", |body| s!(UntilPost, call("cond"), body)),
            ("preexe", |body| s!(Preexe, body)),
            ("postexe", |body| s!(Postexe, body)),
        ];

        for (name, build) in bodies {
            assert!(build(nil()).body().unwrap().is_empty(), "{name} with no body");

            let single = build(Child::from(call("a")));
            assert_eq!(nodes(single.body().unwrap()), vec![call("a")], "{name} with one statement");

            let multi = build(Child::from(s!(Begin, call("a"), call("b"))));
            assert_eq!(
                nodes(multi.body().unwrap()),
                vec![call("a"), call("b")],
                "{name} with a begin body"
            );
        }
    }

    #[test]
    fn collection_elements() {
        let node = s!(Array, call("foo"), call("bar"));
        assert_eq!(nodes(node.elements().unwrap()), vec![call("foo"), call("bar")]);

        let regexp = s!(Regexp, s!(Str, string("^foo")), s!(Regopt, sym("i")));
        assert_eq!(nodes(regexp.elements().unwrap()), vec![s!(Str, string("^foo"))]);
        assert!(regexp.options().unwrap().is_type(NodeType::Regopt));

        assert!(call("foo").elements().is_err());
    }
}
