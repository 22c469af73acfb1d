//! NodeArena creation methods (add_* methods).
//!
//! Nodes are built bottom-up: children always exist before their parent, so
//! parent pointers are patched in as each parent is created.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext;

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child.is_some()
            && let Some(info) = self.extended_info.get_mut(child.0 as usize)
        {
            info.parent = parent;
        }
    }

    #[inline]
    fn set_parent_list(&mut self, list: &NodeList, parent: NodeIndex) {
        for &child in &list.nodes {
            self.set_parent(child, parent);
        }
    }

    fn push_node(&mut self, kind: u16, flags: u16, pos: u32, end: u32, data_index: u32) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            flags,
            pos,
            end,
            data_index,
        });
        self.extended_info.push(ExtendedNodeInfo::default());
        index
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a node that carries no pool data (`EMPTY_STATEMENT`, `BAD_*`).
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(kind, 0, pos, end, Node::NO_DATA)
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, text: impl Into<String>) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(IdentifierData {
            escaped_text: text.into(),
        });
        self.push_node(syntax_kind_ext::IDENTIFIER, 0, pos, end, data_index)
    }

    /// `literal_kind` is the scanner `SyntaxKind` of the literal token.
    pub fn add_literal(
        &mut self,
        literal_kind: u16,
        pos: u32,
        end: u32,
        text: impl Into<String>,
    ) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(LiteralData { text: text.into() });
        self.push_node(syntax_kind_ext::BASIC_LITERAL, literal_kind, pos, end, data_index)
    }

    pub fn add_source_file(&mut self, pos: u32, end: u32, data: SourceFileData) -> NodeIndex {
        let data_index = self.source_files.len() as u32;
        let package_name = data.package_name;
        let declarations = data.declarations.clone();
        self.source_files.push(data);
        let index = self.push_node(syntax_kind_ext::SOURCE_FILE, 0, pos, end, data_index);
        self.set_parent(package_name, index);
        self.set_parent_list(&declarations, index);
        index
    }

    pub fn add_import_spec(&mut self, pos: u32, end: u32, data: ImportSpecData) -> NodeIndex {
        let data_index = self.import_specs.len() as u32;
        let (name, path) = (data.name, data.path);
        self.import_specs.push(data);
        let index = self.push_node(syntax_kind_ext::IMPORT_SPEC, 0, pos, end, data_index);
        self.set_parent(name, index);
        self.set_parent(path, index);
        index
    }

    /// `keyword` is the `SyntaxKind` of `import`/`const`/`var`/`type`.
    pub fn add_gen_decl(&mut self, keyword: u16, pos: u32, end: u32, specs: NodeList) -> NodeIndex {
        let data_index = self.gen_decls.len() as u32;
        self.gen_decls.push(GenDeclData {
            specs: specs.clone(),
        });
        let index = self.push_node(syntax_kind_ext::GEN_DECL, keyword, pos, end, data_index);
        self.set_parent_list(&specs, index);
        index
    }

    pub fn add_value_spec(&mut self, pos: u32, end: u32, data: ValueSpecData) -> NodeIndex {
        let data_index = self.value_specs.len() as u32;
        let (names, values, type_node) = (data.names.clone(), data.values.clone(), data.type_node);
        self.value_specs.push(data);
        let index = self.push_node(syntax_kind_ext::VALUE_SPEC, 0, pos, end, data_index);
        self.set_parent_list(&names, index);
        self.set_parent(type_node, index);
        self.set_parent_list(&values, index);
        index
    }

    pub fn add_type_spec(&mut self, pos: u32, end: u32, data: TypeSpecData) -> NodeIndex {
        let data_index = self.type_specs.len() as u32;
        let (name, type_node) = (data.name, data.type_node);
        let type_params = data.type_params.clone();
        self.type_specs.push(data);
        let index = self.push_node(syntax_kind_ext::TYPE_SPEC, 0, pos, end, data_index);
        self.set_parent(name, index);
        self.set_parent_list(&type_params, index);
        self.set_parent(type_node, index);
        index
    }

    pub fn add_function(&mut self, kind: u16, pos: u32, end: u32, data: FunctionData) -> NodeIndex {
        let data_index = self.functions.len() as u32;
        let children = [data.receiver, data.name, data.body];
        let type_params = data.type_params.clone();
        let (parameters, results) = (data.parameters.clone(), data.results.clone());
        self.functions.push(data);
        let index = self.push_node(kind, 0, pos, end, data_index);
        for child in children {
            self.set_parent(child, index);
        }
        self.set_parent_list(&type_params, index);
        self.set_parent_list(&parameters, index);
        self.set_parent_list(&results, index);
        index
    }

    /// `PARAMETER`, `FIELD` or `TYPE_PARAMETER`.
    pub fn add_parameter(&mut self, kind: u16, pos: u32, end: u32, data: ParameterData) -> NodeIndex {
        let data_index = self.parameters.len() as u32;
        let (names, type_node) = (data.names.clone(), data.type_node);
        self.parameters.push(data);
        let index = self.push_node(kind, 0, pos, end, data_index);
        self.set_parent_list(&names, index);
        self.set_parent(type_node, index);
        index
    }

    pub fn add_list(&mut self, kind: u16, pos: u32, end: u32, list: NodeList) -> NodeIndex {
        let data_index = self.lists.len() as u32;
        self.lists.push(ListData { list: list.clone() });
        let index = self.push_node(kind, 0, pos, end, data_index);
        self.set_parent_list(&list, index);
        index
    }

    pub fn add_wrapped(
        &mut self,
        kind: u16,
        flags: u16,
        pos: u32,
        end: u32,
        expression: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.wrapped.len() as u32;
        self.wrapped.push(WrappedData { expression });
        let index = self.push_node(kind, flags, pos, end, data_index);
        self.set_parent(expression, index);
        index
    }

    pub fn add_unary_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        operator: u16,
        operand: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.unary_exprs.len() as u32;
        self.unary_exprs.push(UnaryExprData { operator, operand });
        let index = self.push_node(kind, 0, pos, end, data_index);
        self.set_parent(operand, index);
        index
    }

    pub fn add_binary_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        left: NodeIndex,
        operator: u16,
        right: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.binary_exprs.len() as u32;
        self.binary_exprs.push(BinaryExprData {
            left,
            operator,
            right,
        });
        let index = self.push_node(kind, 0, pos, end, data_index);
        self.set_parent(left, index);
        self.set_parent(right, index);
        index
    }

    pub fn add_selector_expr(
        &mut self,
        pos: u32,
        end: u32,
        expression: NodeIndex,
        name: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.selector_exprs.len() as u32;
        self.selector_exprs.push(SelectorExprData { expression, name });
        let index = self.push_node(syntax_kind_ext::SELECTOR_EXPRESSION, 0, pos, end, data_index);
        self.set_parent(expression, index);
        self.set_parent(name, index);
        index
    }

    pub fn add_call_expr(&mut self, pos: u32, end: u32, data: CallExprData) -> NodeIndex {
        let data_index = self.call_exprs.len() as u32;
        let (expression, arguments) = (data.expression, data.arguments.clone());
        self.call_exprs.push(data);
        let index = self.push_node(syntax_kind_ext::CALL_EXPRESSION, 0, pos, end, data_index);
        self.set_parent(expression, index);
        self.set_parent_list(&arguments, index);
        index
    }

    pub fn add_index_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        expression: NodeIndex,
        index_node: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.index_exprs.len() as u32;
        self.index_exprs.push(IndexExprData {
            expression,
            index: index_node,
        });
        let index = self.push_node(kind, 0, pos, end, data_index);
        self.set_parent(expression, index);
        self.set_parent(index_node, index);
        index
    }

    pub fn add_index_list(
        &mut self,
        pos: u32,
        end: u32,
        expression: NodeIndex,
        indices: NodeList,
    ) -> NodeIndex {
        let data_index = self.index_lists.len() as u32;
        self.index_lists.push(IndexListData {
            expression,
            indices: indices.clone(),
        });
        let index = self.push_node(syntax_kind_ext::INDEX_LIST_EXPRESSION, 0, pos, end, data_index);
        self.set_parent(expression, index);
        self.set_parent_list(&indices, index);
        index
    }

    pub fn add_slice_expr(&mut self, pos: u32, end: u32, data: SliceExprData) -> NodeIndex {
        let data_index = self.slice_exprs.len() as u32;
        let children = [data.expression, data.low, data.high, data.max];
        self.slice_exprs.push(data);
        let index = self.push_node(syntax_kind_ext::SLICE_EXPRESSION, 0, pos, end, data_index);
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub fn add_composite_literal(
        &mut self,
        pos: u32,
        end: u32,
        type_node: NodeIndex,
        elements: NodeList,
    ) -> NodeIndex {
        let data_index = self.composite_literals.len() as u32;
        self.composite_literals.push(CompositeLiteralData {
            type_node,
            elements: elements.clone(),
        });
        let index = self.push_node(syntax_kind_ext::COMPOSITE_LITERAL, 0, pos, end, data_index);
        self.set_parent(type_node, index);
        self.set_parent_list(&elements, index);
        index
    }

    pub fn add_assignment(&mut self, pos: u32, end: u32, data: AssignData) -> NodeIndex {
        let data_index = self.assignments.len() as u32;
        let (left, right) = (data.left.clone(), data.right.clone());
        self.assignments.push(data);
        let index = self.push_node(syntax_kind_ext::ASSIGN_STATEMENT, 0, pos, end, data_index);
        self.set_parent_list(&left, index);
        self.set_parent_list(&right, index);
        index
    }

    pub fn add_if_statement(&mut self, pos: u32, end: u32, data: IfStatementData) -> NodeIndex {
        let data_index = self.if_statements.len() as u32;
        let children = [data.init, data.condition, data.then_block, data.else_statement];
        self.if_statements.push(data);
        let index = self.push_node(syntax_kind_ext::IF_STATEMENT, 0, pos, end, data_index);
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub fn add_loop(&mut self, pos: u32, end: u32, data: LoopData) -> NodeIndex {
        let data_index = self.loops.len() as u32;
        let children = [data.init, data.condition, data.post, data.body];
        self.loops.push(data);
        let index = self.push_node(syntax_kind_ext::FOR_STATEMENT, 0, pos, end, data_index);
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub fn add_range_statement(&mut self, pos: u32, end: u32, data: RangeStatementData) -> NodeIndex {
        let data_index = self.range_statements.len() as u32;
        let children = [data.key, data.value, data.expression, data.body];
        self.range_statements.push(data);
        let index = self.push_node(syntax_kind_ext::RANGE_STATEMENT, 0, pos, end, data_index);
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub fn add_switch(
        &mut self,
        kind: u16,
        flags: u16,
        pos: u32,
        end: u32,
        data: SwitchData,
    ) -> NodeIndex {
        let data_index = self.switch_data.len() as u32;
        let (init, tag, clauses) = (data.init, data.tag, data.clauses.clone());
        self.switch_data.push(data);
        let index = self.push_node(kind, flags, pos, end, data_index);
        self.set_parent(init, index);
        self.set_parent(tag, index);
        self.set_parent_list(&clauses, index);
        index
    }

    pub fn add_case_clause(&mut self, pos: u32, end: u32, data: CaseClauseData) -> NodeIndex {
        let data_index = self.case_clauses.len() as u32;
        let (expressions, body) = (data.expressions.clone(), data.body.clone());
        self.case_clauses.push(data);
        let index = self.push_node(syntax_kind_ext::CASE_CLAUSE, 0, pos, end, data_index);
        self.set_parent_list(&expressions, index);
        self.set_parent_list(&body, index);
        index
    }

    pub fn add_labeled(
        &mut self,
        pos: u32,
        end: u32,
        label: NodeIndex,
        statement: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.labeled_data.len() as u32;
        self.labeled_data.push(LabeledData { label, statement });
        let index = self.push_node(syntax_kind_ext::LABELED_STATEMENT, 0, pos, end, data_index);
        self.set_parent(label, index);
        self.set_parent(statement, index);
        index
    }
}
