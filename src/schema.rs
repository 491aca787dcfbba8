//! Field schema for fixed-shape node types.
//!
//! Each registered type maps to its semantic field names in positional
//! order: the name at index `i` describes `children[i]`. Multi-valued names
//! (`body`, `arguments`, `elements`, ...) sit at the slot where their
//! children start, but are always served by the extractors in
//! [`crate::access`], never by plain indexing.

use crate::node::NodeType;

/// Field names whose value is a list computed by an extractor.
pub const LIST_FIELDS: &[&str] = &[
    "arguments",
    "body",
    "elements",
    "ensure_body",
    "exceptions",
    "in_statements",
    "keys",
    "kwsplats",
    "pairs",
    "rescue_bodies",
    "values",
    "when_statements",
];

/// Registered field names for `node_type`, or `None` when the type has no
/// fixed shape and callers must go through its raw children.
pub fn fields(node_type: NodeType) -> Option<&'static [&'static str]> {
    use NodeType::*;

    let fields: &'static [&'static str] = match node_type {
        Alias => &["new_name", "old_name"],
        And | Or => &["left_value", "right_value"],
        AndAsgn | OrAsgn => &["left_value", "right_value"],
        OpAsgn => &["left_value", "operator", "right_value"],
        Lvasgn | Ivasgn | Cvasgn | Gvasgn | Masgn => &["left_value", "right_value"],
        Casgn => &["parent_const", "name", "right_value"],
        Arg | Blockarg | Kwarg | Kwrestarg | Restarg | Shadowarg => &["name"],
        Optarg | Kwoptarg => &["name", "value"],
        Args => &["arguments"],
        Array | ArrayPattern | ArrayPatternWithTail | FindPattern | Dstr | Dsym | Xstr
        | MatchAlt | Mlhs | Undef | Regopt => &["elements"],
        BackRef | NthRef | Gvar | Ivar | Cvar | Lvar | MatchVar => &["name"],
        Begin | Kwbegin | Preexe | Postexe => &["body"],
        Block => &["caller", "arguments", "body"],
        Numblock => &["caller", "arguments_count", "body"],
        BlockPass => &["name"],
        Break | Next | Return | Super | Yield | Defined => &["arguments"],
        Case => &["expression", "when_statements", "else_statement"],
        CaseMatch => &["expression", "in_statements", "else_statement"],
        Class => &["name", "parent_class", "body"],
        Sclass | Module => &["name", "body"],
        Const => &["parent_const", "name"],
        Send | Csend => &["receiver", "message", "arguments"],
        Index => &["receiver", "arguments"],
        Def => &["name", "arguments", "body"],
        Defs => &["self", "name", "arguments", "body"],
        Int | Float | Str | Sym | Rational | Complex => &["value"],
        Irange | Erange | Iflipflop | Eflipflop => &["begin", "end"],
        Ensure => &["body", "ensure_body"],
        For => &["variable", "iterable", "body"],
        Hash | HashPattern | Kwargs => &["pairs"],
        If => &["expression", "if_statement", "else_statement"],
        InPattern => &["expression", "guard", "body"],
        IfGuard | UnlessGuard | Pin => &["expression"],
        Kwsplat | Splat => &["value"],
        MatchRest => &["variable"],
        MatchAs => &["value", "variable"],
        MatchPattern | MatchPatternP => &["value", "pattern"],
        Pair => &["key", "value"],
        Regexp => &["elements", "options"],
        Resbody => &["exceptions", "variable", "body"],
        Rescue => &["body", "rescue_bodies", "else_statement"],
        Until | While | UntilPost | WhilePost => &["expression", "body"],
        When => &["expression", "body"],
        Cbase | SelfRef | Nil | True | False | Zsuper | Redo | Retry | ForwardArgs
        | ForwardArg | Kwnilarg | Lambda | MatchNilPattern => &[],
        _ => return None,
    };
    Some(fields)
}

/// Position of `field` in the schema of `node_type`.
pub fn field_index(node_type: NodeType, field: &str) -> Option<usize> {
    fields(node_type)?.iter().position(|name| *name == field)
}

pub fn is_registered(node_type: NodeType) -> bool {
    fields(node_type).is_some()
}

pub fn is_list_field(field: &str) -> bool {
    LIST_FIELDS.contains(&field)
}

/// Every registered type with its fields, in [`NodeType::ALL`] order.
pub fn registered() -> impl Iterator<Item = (NodeType, &'static [&'static str])> {
    NodeType::ALL
        .iter()
        .filter_map(|ty| fields(*ty).map(|fields| (*ty, fields)))
}

/// Closest registered field of `node_type` to a misspelled `field`.
pub(crate) fn closest_field(node_type: NodeType, field: &str) -> Option<&'static str> {
    fields(node_type)?
        .iter()
        .copied()
        .filter(|candidate| *candidate != field)
        .map(|candidate| (candidate, strsim::damerau_levenshtein(candidate, field)))
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}
