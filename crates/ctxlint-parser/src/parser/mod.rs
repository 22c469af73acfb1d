//! Go parser producing a thin-node `NodeArena`.

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod node;
pub use node::{Node, NodeArena};

mod node_access;
mod node_arena;
pub use node_access::PreorderWalk;

mod state;
pub use state::{ParseDiagnostic, ParserState};

mod state_declarations;
mod state_expressions;
mod state_statements;

/// Node kinds that never come out of the scanner.
///
/// Values start well above the last token kind so a `u16` kind is
/// unambiguous.
pub mod syntax_kind_ext {
    pub const FIRST_NODE: u16 = 256;

    // Files and declarations
    pub const SOURCE_FILE: u16 = FIRST_NODE;
    pub const IMPORT_SPEC: u16 = FIRST_NODE + 1;
    pub const GEN_DECL: u16 = FIRST_NODE + 2;
    pub const VALUE_SPEC: u16 = FIRST_NODE + 3;
    pub const TYPE_SPEC: u16 = FIRST_NODE + 4;
    pub const FUNCTION_DECLARATION: u16 = FIRST_NODE + 5;
    pub const PARAMETER: u16 = FIRST_NODE + 6;
    pub const FIELD: u16 = FIRST_NODE + 7;
    pub const TYPE_PARAMETER: u16 = FIRST_NODE + 8;

    // Expressions
    pub const IDENTIFIER: u16 = FIRST_NODE + 20;
    pub const BASIC_LITERAL: u16 = FIRST_NODE + 21;
    pub const SELECTOR_EXPRESSION: u16 = FIRST_NODE + 22;
    pub const CALL_EXPRESSION: u16 = FIRST_NODE + 23;
    pub const INDEX_EXPRESSION: u16 = FIRST_NODE + 24;
    pub const SLICE_EXPRESSION: u16 = FIRST_NODE + 25;
    pub const UNARY_EXPRESSION: u16 = FIRST_NODE + 26;
    pub const BINARY_EXPRESSION: u16 = FIRST_NODE + 27;
    pub const PAREN_EXPRESSION: u16 = FIRST_NODE + 28;
    pub const KEY_VALUE_EXPRESSION: u16 = FIRST_NODE + 29;
    pub const COMPOSITE_LITERAL: u16 = FIRST_NODE + 30;
    pub const FUNCTION_LITERAL: u16 = FIRST_NODE + 31;
    pub const TYPE_ASSERTION: u16 = FIRST_NODE + 32;
    pub const BAD_EXPRESSION: u16 = FIRST_NODE + 33;
    pub const INDEX_LIST_EXPRESSION: u16 = FIRST_NODE + 34;

    // Types
    pub const ARRAY_TYPE: u16 = FIRST_NODE + 40;
    pub const MAP_TYPE: u16 = FIRST_NODE + 41;
    pub const POINTER_TYPE: u16 = FIRST_NODE + 42;
    pub const FUNCTION_TYPE: u16 = FIRST_NODE + 43;
    pub const STRUCT_TYPE: u16 = FIRST_NODE + 44;
    pub const INTERFACE_TYPE: u16 = FIRST_NODE + 45;
    pub const CHAN_TYPE: u16 = FIRST_NODE + 46;
    /// Constraint union `A | ~B`.
    pub const UNION_TYPE: u16 = FIRST_NODE + 47;
    /// Underlying-type term `~T`.
    pub const TILDE_TYPE: u16 = FIRST_NODE + 48;

    // Statements
    pub const BLOCK: u16 = FIRST_NODE + 60;
    pub const EXPRESSION_STATEMENT: u16 = FIRST_NODE + 61;
    pub const ASSIGN_STATEMENT: u16 = FIRST_NODE + 62;
    pub const INC_DEC_STATEMENT: u16 = FIRST_NODE + 63;
    pub const SEND_STATEMENT: u16 = FIRST_NODE + 64;
    pub const DECL_STATEMENT: u16 = FIRST_NODE + 65;
    pub const RETURN_STATEMENT: u16 = FIRST_NODE + 66;
    pub const IF_STATEMENT: u16 = FIRST_NODE + 67;
    pub const FOR_STATEMENT: u16 = FIRST_NODE + 68;
    pub const RANGE_STATEMENT: u16 = FIRST_NODE + 69;
    pub const SWITCH_STATEMENT: u16 = FIRST_NODE + 70;
    pub const SELECT_STATEMENT: u16 = FIRST_NODE + 71;
    pub const CASE_CLAUSE: u16 = FIRST_NODE + 72;
    pub const GO_STATEMENT: u16 = FIRST_NODE + 73;
    pub const DEFER_STATEMENT: u16 = FIRST_NODE + 74;
    pub const BRANCH_STATEMENT: u16 = FIRST_NODE + 75;
    pub const LABELED_STATEMENT: u16 = FIRST_NODE + 76;
    pub const EMPTY_STATEMENT: u16 = FIRST_NODE + 77;
    pub const BAD_STATEMENT: u16 = FIRST_NODE + 78;

    /// Whether `kind` is an expression node (types used as values included).
    pub fn is_expression(kind: u16) -> bool {
        (IDENTIFIER..=INDEX_LIST_EXPRESSION).contains(&kind)
            || (ARRAY_TYPE..=TILDE_TYPE).contains(&kind)
    }

    pub fn is_statement(kind: u16) -> bool {
        (BLOCK..=BAD_STATEMENT).contains(&kind)
    }
}

/// Per-kind meanings of `Node::flags`.
pub mod node_flags {
    pub const NONE: u16 = 0;
    /// CHAN_TYPE: send-only (`chan<- T`)
    pub const CHAN_SEND: u16 = 1;
    /// CHAN_TYPE: receive-only (`<-chan T`)
    pub const CHAN_RECV: u16 = 2;
    /// SWITCH_STATEMENT: the tag is a type-switch guard
    pub const TYPE_SWITCH: u16 = 4;
}
