use std::fmt;
use std::str::FromStr;

macro_rules! node_types {
    ($($variant:ident => $tag:literal),+ $(,)?) => {
        /// Node kinds emitted by the Ruby parser.
        ///
        /// The set is closed: a tag that is not listed here is rejected at
        /// ingestion rather than carried as an opaque string.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeType {
            $($variant),+
        }

        impl NodeType {
            /// Every known node type, in declaration order.
            pub const ALL: &'static [NodeType] = &[$(NodeType::$variant),+];

            /// The parser's tag for this type (`send`, `defined?`, ...).
            pub fn as_str(self) -> &'static str {
                match self {
                    $(NodeType::$variant => $tag),+
                }
            }
        }

        impl FromStr for NodeType {
            type Err = UnknownNodeType;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok(NodeType::$variant),)+
                    other => Err(UnknownNodeType(other.to_string())),
                }
            }
        }
    };
}

node_types! {
    Alias => "alias",
    And => "and",
    AndAsgn => "and_asgn",
    Arg => "arg",
    Args => "args",
    Array => "array",
    ArrayPattern => "array_pattern",
    ArrayPatternWithTail => "array_pattern_with_tail",
    BackRef => "back_ref",
    Begin => "begin",
    Block => "block",
    BlockPass => "block_pass",
    Blockarg => "blockarg",
    Break => "break",
    Case => "case",
    CaseMatch => "case_match",
    Casgn => "casgn",
    Cbase => "cbase",
    Class => "class",
    Complex => "complex",
    Const => "const",
    ConstPattern => "const_pattern",
    Csend => "csend",
    Cvar => "cvar",
    Cvasgn => "cvasgn",
    Def => "def",
    Defined => "defined?",
    Defs => "defs",
    Dstr => "dstr",
    Dsym => "dsym",
    Eflipflop => "eflipflop",
    EmptyElse => "empty_else",
    Encoding => "__ENCODING__",
    Ensure => "ensure",
    Erange => "erange",
    False => "false",
    File => "__FILE__",
    FindPattern => "find_pattern",
    Float => "float",
    For => "for",
    ForwardArg => "forward_arg",
    ForwardArgs => "forward_args",
    ForwardedArgs => "forwarded_args",
    Gvar => "gvar",
    Gvasgn => "gvasgn",
    Hash => "hash",
    HashPattern => "hash_pattern",
    Ident => "ident",
    If => "if",
    IfGuard => "if_guard",
    Iflipflop => "iflipflop",
    InMatch => "in_match",
    InPattern => "in_pattern",
    Index => "index",
    Indexasgn => "indexasgn",
    Int => "int",
    Irange => "irange",
    Ivar => "ivar",
    Ivasgn => "ivasgn",
    Kwarg => "kwarg",
    Kwargs => "kwargs",
    Kwbegin => "kwbegin",
    Kwnilarg => "kwnilarg",
    Kwoptarg => "kwoptarg",
    Kwrestarg => "kwrestarg",
    Kwsplat => "kwsplat",
    Lambda => "lambda",
    Line => "__LINE__",
    Lvar => "lvar",
    Lvasgn => "lvasgn",
    Masgn => "masgn",
    MatchAlt => "match_alt",
    MatchAs => "match_as",
    MatchCurrentLine => "match_current_line",
    MatchNilPattern => "match_nil_pattern",
    MatchPattern => "match_pattern",
    MatchPatternP => "match_pattern_p",
    MatchRest => "match_rest",
    MatchVar => "match_var",
    MatchWithLvasgn => "match_with_lvasgn",
    Mlhs => "mlhs",
    Module => "module",
    Next => "next",
    Nil => "nil",
    NthRef => "nth_ref",
    Numblock => "numblock",
    OpAsgn => "op_asgn",
    Optarg => "optarg",
    Or => "or",
    OrAsgn => "or_asgn",
    Pair => "pair",
    Pin => "pin",
    Postexe => "postexe",
    Preexe => "preexe",
    Procarg0 => "procarg0",
    Rational => "rational",
    Redo => "redo",
    Regexp => "regexp",
    Regopt => "regopt",
    Resbody => "resbody",
    Rescue => "rescue",
    Restarg => "restarg",
    Retry => "retry",
    Return => "return",
    Sclass => "sclass",
    SelfRef => "self",
    Send => "send",
    Shadowarg => "shadowarg",
    Splat => "splat",
    Str => "str",
    Super => "super",
    Sym => "sym",
    True => "true",
    Undef => "undef",
    UnlessGuard => "unless_guard",
    Until => "until",
    UntilPost => "until_post",
    When => "when",
    While => "while",
    WhilePost => "while_post",
    Xstr => "xstr",
    Yield => "yield",
    Zsuper => "zsuper",
}

impl NodeType {
    /// Variable assignment kinds whose first child is the bare variable name.
    pub fn is_variable_assignment(self) -> bool {
        matches!(
            self,
            NodeType::Lvasgn | NodeType::Ivasgn | NodeType::Cvasgn | NodeType::Gvasgn
        )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type tag that is not part of [`NodeType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNodeType(pub String);

impl fmt::Display for UnknownNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node type `{}`", self.0)
    }
}

impl std::error::Error for UnknownNodeType {}
