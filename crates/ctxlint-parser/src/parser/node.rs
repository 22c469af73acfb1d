//! Thin node storage for the Go syntax tree.
//!
//! Each node is a 16-byte header (`Node`) holding its kind, flags, source
//! range and an index into a typed pool. Nodes of the same shape share a
//! pool; the kind decides which pool `data_index` points into.
//!
//! | pool | kinds |
//! |------|-------|
//! | `identifiers` | `IDENTIFIER` |
//! | `literals` | `BASIC_LITERAL` |
//! | `source_files` | `SOURCE_FILE` |
//! | `import_specs` | `IMPORT_SPEC` |
//! | `gen_decls` | `GEN_DECL` |
//! | `value_specs` | `VALUE_SPEC` |
//! | `type_specs` | `TYPE_SPEC` |
//! | `functions` | `FUNCTION_DECLARATION`, `FUNCTION_LITERAL`, `FUNCTION_TYPE` |
//! | `parameters` | `PARAMETER`, `FIELD`, `TYPE_PARAMETER` |
//! | `lists` | `BLOCK`, `RETURN_STATEMENT`, `STRUCT_TYPE`, `INTERFACE_TYPE`, `UNION_TYPE` |
//! | `wrapped` | `PAREN_EXPRESSION`, `EXPRESSION_STATEMENT`, `GO_STATEMENT`, `DEFER_STATEMENT`, `DECL_STATEMENT`, `POINTER_TYPE`, `CHAN_TYPE`, `TILDE_TYPE` |
//! | `unary_exprs` | `UNARY_EXPRESSION`, `INC_DEC_STATEMENT`, `BRANCH_STATEMENT` |
//! | `binary_exprs` | `BINARY_EXPRESSION`, `KEY_VALUE_EXPRESSION`, `SEND_STATEMENT` |
//! | `selector_exprs` | `SELECTOR_EXPRESSION` |
//! | `call_exprs` | `CALL_EXPRESSION` |
//! | `index_exprs` | `INDEX_EXPRESSION`, `ARRAY_TYPE`, `MAP_TYPE`, `TYPE_ASSERTION` |
//! | `index_lists` | `INDEX_LIST_EXPRESSION` |
//! | `slice_exprs` | `SLICE_EXPRESSION` |
//! | `composite_literals` | `COMPOSITE_LITERAL` |
//! | `assignments` | `ASSIGN_STATEMENT` |
//! | `if_statements` | `IF_STATEMENT` |
//! | `loops` | `FOR_STATEMENT` |
//! | `range_statements` | `RANGE_STATEMENT` |
//! | `switch_data` | `SWITCH_STATEMENT`, `SELECT_STATEMENT` |
//! | `case_clauses` | `CASE_CLAUSE` |
//! | `labeled_data` | `LABELED_STATEMENT` |

use super::base::{NodeIndex, NodeList};
use serde::Serialize;
use std::sync::Arc;

/// A thin 16-byte node header.
#[repr(C)]
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Node {
    /// Token kind (`SyntaxKind`) or node kind (`syntax_kind_ext`)
    pub kind: u16,
    /// Per-kind flags (see `node_flags`)
    pub flags: u16,
    /// Start byte offset in source
    pub pos: u32,
    /// End byte offset in source (exclusive)
    pub end: u32,
    /// Index into the kind's storage pool (u32::MAX = no data)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }
}

/// Data not needed on the hot path.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

// =============================================================================
// Typed pool payloads
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// A literal token. The literal's `SyntaxKind` is stored in `Node::flags`.
#[derive(Clone, Debug, Serialize)]
pub struct LiteralData {
    pub text: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SourceFileData {
    pub file_name: String,
    #[serde(skip)]
    pub text: Arc<str>,
    pub package_name: NodeIndex,
    /// All `IMPORT_SPEC` nodes of the file, in source order.
    pub imports: NodeList,
    /// Top-level `GEN_DECL` and `FUNCTION_DECLARATION` nodes (import decls included).
    pub declarations: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ImportSpecData {
    /// Explicit local name (`IDENTIFIER`, may be `_` or `.`), or NONE.
    pub name: NodeIndex,
    /// Import path string literal.
    pub path: NodeIndex,
}

/// `import`, `const`, `var` or `type` declaration; keyword kind in `Node::flags`.
#[derive(Clone, Debug, Serialize)]
pub struct GenDeclData {
    pub specs: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ValueSpecData {
    pub names: NodeList,
    pub type_node: NodeIndex,
    pub values: NodeList,
    /// Position of this spec within its const group (drives implicit repetition).
    pub iota: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct TypeSpecData {
    pub name: NodeIndex,
    /// `TYPE_PARAMETER` nodes of a generic type.
    pub type_params: NodeList,
    pub type_node: NodeIndex,
    pub is_alias: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct FunctionData {
    /// Receiver `PARAMETER` for methods.
    pub receiver: NodeIndex,
    /// Name for declarations; NONE for literals and function types.
    pub name: NodeIndex,
    /// `TYPE_PARAMETER` nodes of a generic function declaration.
    pub type_params: NodeList,
    pub parameters: NodeList,
    pub results: NodeList,
    /// `BLOCK`; NONE for function types and body-less declarations.
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParameterData {
    pub names: NodeList,
    pub type_node: NodeIndex,
    pub is_variadic: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ListData {
    pub list: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct WrappedData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct UnaryExprData {
    pub operator: u16,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator: u16,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct SelectorExprData {
    pub expression: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
    /// Position of a trailing `...` (argument spread), or u32::MAX.
    pub ellipsis: u32,
}

impl CallExprData {
    #[inline]
    pub fn has_ellipsis(&self) -> bool {
        self.ellipsis != u32::MAX
    }
}

/// Two-operand shapes: `x[i]`, `[N]T`, `map[K]V`, `x.(T)`.
#[derive(Clone, Debug, Serialize)]
pub struct IndexExprData {
    pub expression: NodeIndex,
    pub index: NodeIndex,
}

/// Instantiation with several type arguments: `Pair[K, V]`, `f[int, string]`.
#[derive(Clone, Debug, Serialize)]
pub struct IndexListData {
    pub expression: NodeIndex,
    pub indices: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct SliceExprData {
    pub expression: NodeIndex,
    pub low: NodeIndex,
    pub high: NodeIndex,
    pub max: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CompositeLiteralData {
    /// Literal type; NONE when elided inside an outer composite literal.
    pub type_node: NodeIndex,
    pub elements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct AssignData {
    pub left: NodeList,
    pub operator: u16,
    pub right: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct IfStatementData {
    pub init: NodeIndex,
    pub condition: NodeIndex,
    pub then_block: NodeIndex,
    pub else_statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoopData {
    pub init: NodeIndex,
    pub condition: NodeIndex,
    pub post: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct RangeStatementData {
    pub key: NodeIndex,
    pub value: NodeIndex,
    pub is_define: bool,
    pub expression: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct SwitchData {
    pub init: NodeIndex,
    /// Tag expression, or the `ASSIGN_STATEMENT` guard of a type switch.
    pub tag: NodeIndex,
    pub clauses: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct CaseClauseData {
    /// Case expressions; empty for `default`.
    pub expressions: NodeList,
    pub is_default: bool,
    pub body: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

/// Arena holding every node of one parsed file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub extended_info: Vec<ExtendedNodeInfo>,
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub source_files: Vec<SourceFileData>,
    pub import_specs: Vec<ImportSpecData>,
    pub gen_decls: Vec<GenDeclData>,
    pub value_specs: Vec<ValueSpecData>,
    pub type_specs: Vec<TypeSpecData>,
    pub functions: Vec<FunctionData>,
    pub parameters: Vec<ParameterData>,
    pub lists: Vec<ListData>,
    pub wrapped: Vec<WrappedData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub selector_exprs: Vec<SelectorExprData>,
    pub call_exprs: Vec<CallExprData>,
    pub index_exprs: Vec<IndexExprData>,
    pub index_lists: Vec<IndexListData>,
    pub slice_exprs: Vec<SliceExprData>,
    pub composite_literals: Vec<CompositeLiteralData>,
    pub assignments: Vec<AssignData>,
    pub if_statements: Vec<IfStatementData>,
    pub loops: Vec<LoopData>,
    pub range_statements: Vec<RangeStatementData>,
    pub switch_data: Vec<SwitchData>,
    pub case_clauses: Vec<CaseClauseData>,
    pub labeled_data: Vec<LabeledData>,
}
