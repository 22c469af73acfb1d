//! NodeArena access methods, child enumeration and preorder traversal.

use smallvec::SmallVec;

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext as ext;

/// Typed pool getter: returns the payload when `node.kind` is one of `$kinds`.
macro_rules! pool_getter {
    ($(#[$meta:meta])* $name:ident, $pool:ident, $ty:ty, [$($kind:path),+ $(,)?]) => {
        $(#[$meta])*
        #[inline]
        pub fn $name(&self, node: &Node) -> Option<&$ty> {
            if node.has_data() && matches!(node.kind, $($kind)|+) {
                self.$pool.get(node.data_index as usize)
            } else {
                None
            }
        }
    };
}

impl NodeArena {
    /// Get a thin node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Parent of `index`, or NONE for the root.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|node| node.kind)
    }

    pool_getter!(get_identifier, identifiers, IdentifierData, [ext::IDENTIFIER]);
    pool_getter!(get_literal, literals, LiteralData, [ext::BASIC_LITERAL]);
    pool_getter!(get_source_file, source_files, SourceFileData, [ext::SOURCE_FILE]);
    pool_getter!(get_import_spec, import_specs, ImportSpecData, [ext::IMPORT_SPEC]);
    pool_getter!(get_gen_decl, gen_decls, GenDeclData, [ext::GEN_DECL]);
    pool_getter!(get_value_spec, value_specs, ValueSpecData, [ext::VALUE_SPEC]);
    pool_getter!(get_type_spec, type_specs, TypeSpecData, [ext::TYPE_SPEC]);
    pool_getter!(
        get_function,
        functions,
        FunctionData,
        [ext::FUNCTION_DECLARATION, ext::FUNCTION_LITERAL, ext::FUNCTION_TYPE]
    );
    pool_getter!(
        get_parameter,
        parameters,
        ParameterData,
        [ext::PARAMETER, ext::FIELD, ext::TYPE_PARAMETER]
    );
    pool_getter!(
        get_list,
        lists,
        ListData,
        [
            ext::BLOCK,
            ext::RETURN_STATEMENT,
            ext::STRUCT_TYPE,
            ext::INTERFACE_TYPE,
            ext::UNION_TYPE,
        ]
    );
    pool_getter!(
        get_wrapped,
        wrapped,
        WrappedData,
        [
            ext::PAREN_EXPRESSION,
            ext::EXPRESSION_STATEMENT,
            ext::GO_STATEMENT,
            ext::DEFER_STATEMENT,
            ext::DECL_STATEMENT,
            ext::POINTER_TYPE,
            ext::CHAN_TYPE,
            ext::TILDE_TYPE,
        ]
    );
    pool_getter!(
        get_unary_expr,
        unary_exprs,
        UnaryExprData,
        [ext::UNARY_EXPRESSION, ext::INC_DEC_STATEMENT, ext::BRANCH_STATEMENT]
    );
    pool_getter!(
        get_binary_expr,
        binary_exprs,
        BinaryExprData,
        [ext::BINARY_EXPRESSION, ext::KEY_VALUE_EXPRESSION, ext::SEND_STATEMENT]
    );
    pool_getter!(get_selector_expr, selector_exprs, SelectorExprData, [ext::SELECTOR_EXPRESSION]);
    pool_getter!(get_call_expr, call_exprs, CallExprData, [ext::CALL_EXPRESSION]);
    pool_getter!(
        get_index_expr,
        index_exprs,
        IndexExprData,
        [ext::INDEX_EXPRESSION, ext::ARRAY_TYPE, ext::MAP_TYPE, ext::TYPE_ASSERTION]
    );
    pool_getter!(get_index_list, index_lists, IndexListData, [ext::INDEX_LIST_EXPRESSION]);
    pool_getter!(get_slice_expr, slice_exprs, SliceExprData, [ext::SLICE_EXPRESSION]);
    pool_getter!(
        get_composite_literal,
        composite_literals,
        CompositeLiteralData,
        [ext::COMPOSITE_LITERAL]
    );
    pool_getter!(get_assignment, assignments, AssignData, [ext::ASSIGN_STATEMENT]);
    pool_getter!(get_if_statement, if_statements, IfStatementData, [ext::IF_STATEMENT]);
    pool_getter!(get_loop, loops, LoopData, [ext::FOR_STATEMENT]);
    pool_getter!(
        get_range_statement,
        range_statements,
        RangeStatementData,
        [ext::RANGE_STATEMENT]
    );
    pool_getter!(
        get_switch,
        switch_data,
        SwitchData,
        [ext::SWITCH_STATEMENT, ext::SELECT_STATEMENT]
    );
    pool_getter!(get_case_clause, case_clauses, CaseClauseData, [ext::CASE_CLAUSE]);
    pool_getter!(get_labeled, labeled_data, LabeledData, [ext::LABELED_STATEMENT]);

    /// Text of an identifier node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node).map(|id| id.escaped_text.as_str())
    }

    /// Source span `[pos, end)` of a node.
    pub fn span_of(&self, index: NodeIndex) -> Option<(u32, u32)> {
        self.get(index).map(|node| (node.pos, node.end))
    }

    /// Strip any number of enclosing parentheses.
    pub fn skip_parens(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(node) = self.get(index)
            && node.kind == ext::PAREN_EXPRESSION
            && let Some(inner) = self.get_wrapped(node)
        {
            index = inner.expression;
        }
        index
    }

    /// Call `f` on each direct child of `index`, in source order.
    pub fn for_each_child(&self, index: NodeIndex, mut f: impl FnMut(NodeIndex)) {
        let Some(node) = self.get(index) else {
            return;
        };
        let mut one = |child: NodeIndex| {
            if child.is_some() {
                f(child);
            }
        };
        let list = |list: &NodeList, g: &mut dyn FnMut(NodeIndex)| {
            for &child in &list.nodes {
                g(child);
            }
        };

        match node.kind {
            ext::SOURCE_FILE => {
                if let Some(data) = self.get_source_file(node) {
                    one(data.package_name);
                    list(&data.declarations, &mut one);
                }
            }
            ext::IMPORT_SPEC => {
                if let Some(data) = self.get_import_spec(node) {
                    one(data.name);
                    one(data.path);
                }
            }
            ext::GEN_DECL => {
                if let Some(data) = self.get_gen_decl(node) {
                    list(&data.specs, &mut one);
                }
            }
            ext::VALUE_SPEC => {
                if let Some(data) = self.get_value_spec(node) {
                    list(&data.names, &mut one);
                    one(data.type_node);
                    list(&data.values, &mut one);
                }
            }
            ext::TYPE_SPEC => {
                if let Some(data) = self.get_type_spec(node) {
                    one(data.name);
                    list(&data.type_params, &mut one);
                    one(data.type_node);
                }
            }
            ext::FUNCTION_DECLARATION | ext::FUNCTION_LITERAL | ext::FUNCTION_TYPE => {
                if let Some(data) = self.get_function(node) {
                    one(data.receiver);
                    one(data.name);
                    list(&data.type_params, &mut one);
                    list(&data.parameters, &mut one);
                    list(&data.results, &mut one);
                    one(data.body);
                }
            }
            ext::PARAMETER | ext::FIELD | ext::TYPE_PARAMETER => {
                if let Some(data) = self.get_parameter(node) {
                    list(&data.names, &mut one);
                    one(data.type_node);
                }
            }
            ext::BLOCK
            | ext::RETURN_STATEMENT
            | ext::STRUCT_TYPE
            | ext::INTERFACE_TYPE
            | ext::UNION_TYPE => {
                if let Some(data) = self.get_list(node) {
                    list(&data.list, &mut one);
                }
            }
            ext::PAREN_EXPRESSION
            | ext::EXPRESSION_STATEMENT
            | ext::GO_STATEMENT
            | ext::DEFER_STATEMENT
            | ext::DECL_STATEMENT
            | ext::POINTER_TYPE
            | ext::CHAN_TYPE
            | ext::TILDE_TYPE => {
                if let Some(data) = self.get_wrapped(node) {
                    one(data.expression);
                }
            }
            ext::UNARY_EXPRESSION | ext::INC_DEC_STATEMENT | ext::BRANCH_STATEMENT => {
                if let Some(data) = self.get_unary_expr(node) {
                    one(data.operand);
                }
            }
            ext::BINARY_EXPRESSION | ext::KEY_VALUE_EXPRESSION | ext::SEND_STATEMENT => {
                if let Some(data) = self.get_binary_expr(node) {
                    one(data.left);
                    one(data.right);
                }
            }
            ext::SELECTOR_EXPRESSION => {
                if let Some(data) = self.get_selector_expr(node) {
                    one(data.expression);
                    one(data.name);
                }
            }
            ext::CALL_EXPRESSION => {
                if let Some(data) = self.get_call_expr(node) {
                    one(data.expression);
                    list(&data.arguments, &mut one);
                }
            }
            ext::INDEX_EXPRESSION | ext::ARRAY_TYPE | ext::MAP_TYPE | ext::TYPE_ASSERTION => {
                if let Some(data) = self.get_index_expr(node) {
                    // `[N]T` stores the length as `index`, which precedes the element type.
                    if node.kind == ext::ARRAY_TYPE || node.kind == ext::MAP_TYPE {
                        one(data.index);
                        one(data.expression);
                    } else {
                        one(data.expression);
                        one(data.index);
                    }
                }
            }
            ext::INDEX_LIST_EXPRESSION => {
                if let Some(data) = self.get_index_list(node) {
                    one(data.expression);
                    list(&data.indices, &mut one);
                }
            }
            ext::SLICE_EXPRESSION => {
                if let Some(data) = self.get_slice_expr(node) {
                    one(data.expression);
                    one(data.low);
                    one(data.high);
                    one(data.max);
                }
            }
            ext::COMPOSITE_LITERAL => {
                if let Some(data) = self.get_composite_literal(node) {
                    one(data.type_node);
                    list(&data.elements, &mut one);
                }
            }
            ext::ASSIGN_STATEMENT => {
                if let Some(data) = self.get_assignment(node) {
                    list(&data.left, &mut one);
                    list(&data.right, &mut one);
                }
            }
            ext::IF_STATEMENT => {
                if let Some(data) = self.get_if_statement(node) {
                    one(data.init);
                    one(data.condition);
                    one(data.then_block);
                    one(data.else_statement);
                }
            }
            ext::FOR_STATEMENT => {
                if let Some(data) = self.get_loop(node) {
                    one(data.init);
                    one(data.condition);
                    one(data.post);
                    one(data.body);
                }
            }
            ext::RANGE_STATEMENT => {
                if let Some(data) = self.get_range_statement(node) {
                    one(data.key);
                    one(data.value);
                    one(data.expression);
                    one(data.body);
                }
            }
            ext::SWITCH_STATEMENT | ext::SELECT_STATEMENT => {
                if let Some(data) = self.get_switch(node) {
                    one(data.init);
                    one(data.tag);
                    list(&data.clauses, &mut one);
                }
            }
            ext::CASE_CLAUSE => {
                if let Some(data) = self.get_case_clause(node) {
                    list(&data.expressions, &mut one);
                    list(&data.body, &mut one);
                }
            }
            ext::LABELED_STATEMENT => {
                if let Some(data) = self.get_labeled(node) {
                    one(data.label);
                    one(data.statement);
                }
            }
            _ => {}
        }
    }

    /// Direct children of `index`, in source order.
    pub fn children(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 8]> {
        let mut out = SmallVec::new();
        self.for_each_child(index, |child| out.push(child));
        out
    }

    /// Depth-first, source-ordered walk of the subtree rooted at `root`.
    pub fn preorder(&self, root: NodeIndex) -> PreorderWalk<'_> {
        PreorderWalk::new(self, root)
    }
}

/// Preorder iterator over a subtree.
///
/// Uses an explicit stack, so deeply nested expressions cannot overflow the
/// call stack.
pub struct PreorderWalk<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeIndex>,
}

impl<'a> PreorderWalk<'a> {
    pub fn new(arena: &'a NodeArena, root: NodeIndex) -> Self {
        let mut stack = Vec::with_capacity(64);
        if arena.get(root).is_some() {
            stack.push(root);
        }
        PreorderWalk { arena, stack }
    }
}

impl Iterator for PreorderWalk<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let current = self.stack.pop()?;
        let children = self.arena.children(current);
        self.stack.extend(children.into_iter().rev());
        Some(current)
    }
}
