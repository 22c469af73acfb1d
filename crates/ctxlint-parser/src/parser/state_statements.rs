//! Statement parsing.

use ctxlint_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use ctxlint_scanner::{SyntaxKind, token_is_assignment_operator};

use super::base::{NodeIndex, NodeList};
use super::node::{
    AssignData, CaseClauseData, IfStatementData, LoopData, RangeStatementData, SwitchData,
};
use super::node_flags;
use super::state::ParserState;
use super::syntax_kind_ext;

#[derive(Clone, Copy, PartialEq, Eq)]
enum SimpleMode {
    Basic,
    LabelOk,
    RangeOk,
}

/// Result of a simple statement: either a node or the header of a `for range`.
enum SimpleStatement {
    Node(NodeIndex),
    Range {
        key: NodeIndex,
        value: NodeIndex,
        is_define: bool,
        expression: NodeIndex,
    },
}

impl ParserState {
    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end = self.prev_end();
        self.arena
            .add_list(syntax_kind_ext::BLOCK, pos, end, NodeList::from_vec(statements))
    }

    /// Statements up to `}`, `case`, `default` or EOF.
    fn parse_statement_list(&mut self) -> Vec<NodeIndex> {
        let mut statements = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CaseKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::EndOfFileToken => break,
                _ => {}
            }
            let before = self.token_pos();
            let statement = self.parse_statement();
            if self
                .arena
                .kind_of(statement)
                .is_some_and(|k| k != syntax_kind_ext::EMPTY_STATEMENT)
            {
                statements.push(statement);
            }
            if self.token_pos() == before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.next_token();
            }
        }
        statements
    }

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            let pos = self.token_pos();
            self.skip_to_statement_end();
            return self.arena.add_token(syntax_kind_ext::BAD_STATEMENT, pos, pos);
        }
        let statement = self.parse_statement_inner();
        self.exit_recursion();
        statement
    }

    fn parse_statement_inner(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::ConstKeyword | SyntaxKind::VarKeyword | SyntaxKind::TypeKeyword => {
                let keyword = self.token();
                let decl = self.parse_gen_decl(keyword);
                let end = self.prev_end();
                let statement = self
                    .arena
                    .add_wrapped(syntax_kind_ext::DECL_STATEMENT, 0, pos, end, decl);
                self.expect_semicolon();
                statement
            }
            SyntaxKind::GoKeyword | SyntaxKind::DeferKeyword => {
                let kind = if self.is_token(SyntaxKind::GoKeyword) {
                    syntax_kind_ext::GO_STATEMENT
                } else {
                    syntax_kind_ext::DEFER_STATEMENT
                };
                self.next_token();
                let call = self.parse_expression();
                let end = self.prev_end();
                let statement = self.arena.add_wrapped(kind, 0, pos, end, call);
                self.expect_semicolon();
                statement
            }
            SyntaxKind::ReturnKeyword => {
                self.next_token();
                let results = if matches!(
                    self.token(),
                    SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken
                ) {
                    Vec::new()
                } else {
                    self.parse_expression_list()
                };
                let end = self.prev_end();
                let statement = self.arena.add_list(
                    syntax_kind_ext::RETURN_STATEMENT,
                    pos,
                    end,
                    NodeList::from_vec(results),
                );
                self.expect_semicolon();
                statement
            }
            SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::GotoKeyword
            | SyntaxKind::FallthroughKeyword => {
                let keyword = self.token();
                self.next_token();
                let label = if keyword != SyntaxKind::FallthroughKeyword
                    && self.is_token(SyntaxKind::Identifier)
                {
                    self.parse_identifier()
                } else {
                    NodeIndex::NONE
                };
                let end = self.prev_end();
                let statement = self.arena.add_unary_expr(
                    syntax_kind_ext::BRANCH_STATEMENT,
                    pos,
                    end,
                    keyword as u16,
                    label,
                );
                self.expect_semicolon();
                statement
            }
            SyntaxKind::OpenBraceToken => {
                let block = self.parse_block();
                self.expect_semicolon();
                block
            }
            SyntaxKind::IfKeyword => {
                let statement = self.parse_if_statement();
                self.expect_semicolon();
                statement
            }
            SyntaxKind::ForKeyword => {
                let statement = self.parse_for_statement();
                self.expect_semicolon();
                statement
            }
            SyntaxKind::SwitchKeyword => {
                let statement = self.parse_switch_statement();
                self.expect_semicolon();
                statement
            }
            SyntaxKind::SelectKeyword => {
                let statement = self.parse_select_statement();
                self.expect_semicolon();
                statement
            }
            SyntaxKind::SemicolonToken => {
                let end = self.token_end();
                self.next_token();
                self.arena
                    .add_token(syntax_kind_ext::EMPTY_STATEMENT, pos, end)
            }
            _ if self.can_start_expression() => {
                let statement = self.parse_simple_statement_node(SimpleMode::LabelOk);
                if self.arena.kind_of(statement) != Some(syntax_kind_ext::LABELED_STATEMENT) {
                    self.expect_semicolon();
                }
                statement
            }
            _ => {
                self.error_at_current(
                    diagnostic_codes::EXPECTED_STATEMENT,
                    diagnostic_messages::EXPECTED_STATEMENT,
                );
                self.skip_to_statement_end();
                let end = self.prev_end().max(pos);
                self.arena.add_token(syntax_kind_ext::BAD_STATEMENT, pos, end)
            }
        }
    }

    fn parse_simple_statement_node(&mut self, mode: SimpleMode) -> NodeIndex {
        match self.parse_simple_statement(mode) {
            SimpleStatement::Node(node) => node,
            SimpleStatement::Range { expression, .. } => expression,
        }
    }

    fn parse_simple_statement(&mut self, mode: SimpleMode) -> SimpleStatement {
        let pos = self.token_pos();

        if mode == SimpleMode::RangeOk && self.is_token(SyntaxKind::RangeKeyword) {
            self.next_token();
            let expression = self.parse_expression();
            return SimpleStatement::Range {
                key: NodeIndex::NONE,
                value: NodeIndex::NONE,
                is_define: false,
                expression,
            };
        }

        let left = self.parse_expression_list();
        let first = left.first().copied().unwrap_or(NodeIndex::NONE);

        match self.token() {
            op if token_is_assignment_operator(op) => {
                self.next_token();
                let plain = matches!(op, SyntaxKind::ColonEqualsToken | SyntaxKind::EqualsToken);
                if mode == SimpleMode::RangeOk && plain && self.is_token(SyntaxKind::RangeKeyword) {
                    self.next_token();
                    let expression = self.parse_expression();
                    return SimpleStatement::Range {
                        key: first,
                        value: left.get(1).copied().unwrap_or(NodeIndex::NONE),
                        is_define: op == SyntaxKind::ColonEqualsToken,
                        expression,
                    };
                }
                let right = self.parse_expression_list();
                let end = self.prev_end();
                SimpleStatement::Node(self.arena.add_assignment(
                    pos,
                    end,
                    AssignData {
                        left: NodeList::from_vec(left),
                        operator: op as u16,
                        right: NodeList::from_vec(right),
                    },
                ))
            }
            SyntaxKind::ColonToken
                if mode == SimpleMode::LabelOk
                    && left.len() == 1
                    && self.arena.kind_of(first) == Some(syntax_kind_ext::IDENTIFIER) =>
            {
                self.next_token();
                let statement = if self.is_token(SyntaxKind::CloseBraceToken) {
                    let at = self.token_pos();
                    self.arena
                        .add_token(syntax_kind_ext::EMPTY_STATEMENT, at, at)
                } else {
                    self.parse_statement()
                };
                let end = self.prev_end();
                SimpleStatement::Node(self.arena.add_labeled(pos, end, first, statement))
            }
            SyntaxKind::LessThanMinusToken => {
                self.next_token();
                let value = self.parse_expression();
                let end = self.prev_end();
                SimpleStatement::Node(self.arena.add_binary_expr(
                    syntax_kind_ext::SEND_STATEMENT,
                    pos,
                    end,
                    first,
                    SyntaxKind::LessThanMinusToken as u16,
                    value,
                ))
            }
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                let op = self.token();
                self.next_token();
                let end = self.prev_end();
                SimpleStatement::Node(self.arena.add_unary_expr(
                    syntax_kind_ext::INC_DEC_STATEMENT,
                    pos,
                    end,
                    op as u16,
                    first,
                ))
            }
            _ => {
                if left.len() > 1 {
                    self.error_expected("':=' or '='");
                }
                let end = self.prev_end();
                SimpleStatement::Node(self.arena.add_wrapped(
                    syntax_kind_ext::EXPRESSION_STATEMENT,
                    0,
                    pos,
                    end,
                    first,
                ))
            }
        }
    }

    /// The condition expression carried by a simple statement header.
    fn header_expression(&mut self, statement: NodeIndex) -> NodeIndex {
        let Some(node) = self.arena.get(statement) else {
            return NodeIndex::NONE;
        };
        if node.kind == syntax_kind_ext::EXPRESSION_STATEMENT {
            return self
                .arena
                .get_wrapped(node)
                .map_or(NodeIndex::NONE, |w| w.expression);
        }
        let (pos, end) = (node.pos, node.end);
        self.error_at(
            pos,
            end - pos,
            diagnostic_codes::EXPECTED_EXPRESSION,
            "expected boolean expression, found simple statement".to_string(),
        );
        NodeIndex::NONE
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        let outer = self.expr_level;
        self.expr_level = -1;
        let mut init = NodeIndex::NONE;
        let mut condition = NodeIndex::NONE;
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            let mut header = NodeIndex::NONE;
            if !self.is_token(SyntaxKind::SemicolonToken) {
                header = self.parse_simple_statement_node(SimpleMode::Basic);
            }
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                init = header;
                if !self.is_token(SyntaxKind::OpenBraceToken) {
                    let cond = self.parse_simple_statement_node(SimpleMode::Basic);
                    condition = self.header_expression(cond);
                }
            } else {
                condition = self.header_expression(header);
            }
        }
        self.expr_level = outer;

        if condition.is_none() {
            self.error_at(pos, 2, diagnostic_codes::EXPECTED_EXPRESSION, "missing condition in if statement".to_string());
        }

        let then_block = self.parse_block();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            match self.token() {
                SyntaxKind::IfKeyword => self.parse_if_statement(),
                SyntaxKind::OpenBraceToken => self.parse_block(),
                _ => {
                    self.error_expected("if statement or block");
                    NodeIndex::NONE
                }
            }
        } else {
            NodeIndex::NONE
        };

        let end = self.prev_end();
        self.arena.add_if_statement(
            pos,
            end,
            IfStatementData {
                init,
                condition,
                then_block,
                else_statement,
            },
        )
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        let outer = self.expr_level;
        self.expr_level = -1;
        let mut init = NodeIndex::NONE;
        let mut cond_statement = NodeIndex::NONE;
        let mut post = NodeIndex::NONE;
        let mut range = None;

        if !self.is_token(SyntaxKind::OpenBraceToken) {
            if !self.is_token(SyntaxKind::SemicolonToken) {
                match self.parse_simple_statement(SimpleMode::RangeOk) {
                    SimpleStatement::Node(node) => cond_statement = node,
                    SimpleStatement::Range {
                        key,
                        value,
                        is_define,
                        expression,
                    } => range = Some((key, value, is_define, expression)),
                }
            }
            if range.is_none() && self.parse_optional(SyntaxKind::SemicolonToken) {
                init = cond_statement;
                cond_statement = NodeIndex::NONE;
                if !self.is_token(SyntaxKind::SemicolonToken) {
                    cond_statement = self.parse_simple_statement_node(SimpleMode::Basic);
                }
                self.parse_expected(SyntaxKind::SemicolonToken);
                if !self.is_token(SyntaxKind::OpenBraceToken) {
                    post = self.parse_simple_statement_node(SimpleMode::Basic);
                }
            }
        }
        self.expr_level = outer;

        let body = self.parse_block();
        let end = self.prev_end();

        if let Some((key, value, is_define, expression)) = range {
            return self.arena.add_range_statement(
                pos,
                end,
                RangeStatementData {
                    key,
                    value,
                    is_define,
                    expression,
                    body,
                },
            );
        }

        let condition = if cond_statement.is_some() {
            self.header_expression(cond_statement)
        } else {
            NodeIndex::NONE
        };
        self.arena.add_loop(
            pos,
            end,
            LoopData {
                init,
                condition,
                post,
                body,
            },
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        let outer = self.expr_level;
        self.expr_level = -1;
        let mut init = NodeIndex::NONE;
        let mut header = NodeIndex::NONE;
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            if !self.is_token(SyntaxKind::SemicolonToken) {
                header = self.parse_simple_statement_node(SimpleMode::Basic);
            }
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                init = header;
                header = NodeIndex::NONE;
                if !self.is_token(SyntaxKind::OpenBraceToken) {
                    header = self.parse_simple_statement_node(SimpleMode::Basic);
                }
            }
        }
        self.expr_level = outer;

        let is_type_switch = self.is_type_switch_guard(header);
        let tag = if header.is_none() {
            NodeIndex::NONE
        } else if is_type_switch
            && self.arena.kind_of(header) == Some(syntax_kind_ext::ASSIGN_STATEMENT)
        {
            header
        } else {
            self.header_expression(header)
        };

        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        while matches!(
            self.token(),
            SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
        ) {
            clauses.push(self.parse_case_clause(false));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end = self.prev_end();

        let flags = if is_type_switch {
            node_flags::TYPE_SWITCH
        } else {
            node_flags::NONE
        };
        self.arena.add_switch(
            syntax_kind_ext::SWITCH_STATEMENT,
            flags,
            pos,
            end,
            SwitchData {
                init,
                tag,
                clauses: NodeList::from_vec(clauses),
            },
        )
    }

    /// `x.(type)` or `v := x.(type)`.
    fn is_type_switch_guard(&self, header: NodeIndex) -> bool {
        let Some(node) = self.arena.get(header) else {
            return false;
        };
        let expression = match node.kind {
            syntax_kind_ext::EXPRESSION_STATEMENT => {
                self.arena.get_wrapped(node).map(|w| w.expression)
            }
            syntax_kind_ext::ASSIGN_STATEMENT => self.arena.get_assignment(node).and_then(|a| {
                (a.operator == SyntaxKind::ColonEqualsToken as u16 && a.right.len() == 1)
                    .then(|| a.right.nodes[0])
            }),
            _ => None,
        };
        expression
            .and_then(|e| self.arena.get(e))
            .filter(|n| n.kind == syntax_kind_ext::TYPE_ASSERTION)
            .and_then(|n| self.arena.get_index_expr(n))
            .is_some_and(|data| data.index.is_none())
    }

    fn parse_select_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        while matches!(
            self.token(),
            SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
        ) {
            clauses.push(self.parse_case_clause(true));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end = self.prev_end();
        self.arena.add_switch(
            syntax_kind_ext::SELECT_STATEMENT,
            node_flags::NONE,
            pos,
            end,
            SwitchData {
                init: NodeIndex::NONE,
                tag: NodeIndex::NONE,
                clauses: NodeList::from_vec(clauses),
            },
        )
    }

    /// `case x, y:` / `default:` followed by statements. In a `select` the
    /// single case element is a send or receive statement.
    fn parse_case_clause(&mut self, is_select: bool) -> NodeIndex {
        let pos = self.token_pos();
        let mut expressions = Vec::new();
        let is_default = self.is_token(SyntaxKind::DefaultKeyword);
        self.next_token();
        if !is_default {
            if is_select {
                expressions.push(self.parse_simple_statement_node(SimpleMode::Basic));
            } else {
                expressions = self.parse_expression_list();
            }
        }
        self.parse_expected(SyntaxKind::ColonToken);
        let body = self.parse_statement_list();
        let end = self.prev_end();
        self.arena.add_case_clause(
            pos,
            end,
            CaseClauseData {
                expressions: NodeList::from_vec(expressions),
                is_default,
                body: NodeList::from_vec(body),
            },
        )
    }
}
