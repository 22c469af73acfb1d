//! Expression parsing: precedence climbing over unary and primary expressions.

use ctxlint_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use ctxlint_scanner::{SyntaxKind, binary_precedence, token_is_literal};

use super::base::{NodeIndex, NodeList};
use super::node::{CallExprData, FunctionData, SliceExprData};
use super::state::ParserState;
use super::syntax_kind_ext;

impl ParserState {
    pub(crate) fn can_start_expression(&self) -> bool {
        let token = self.token();
        token_is_literal(token)
            || matches!(
                token,
                SyntaxKind::Identifier
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::PlusToken
                    | SyntaxKind::MinusToken
                    | SyntaxKind::ExclamationToken
                    | SyntaxKind::CaretToken
                    | SyntaxKind::AsteriskToken
                    | SyntaxKind::AmpersandToken
                    | SyntaxKind::LessThanMinusToken
                    | SyntaxKind::FuncKeyword
                    | SyntaxKind::StructKeyword
                    | SyntaxKind::MapKeyword
                    | SyntaxKind::ChanKeyword
                    | SyntaxKind::InterfaceKeyword
            )
    }

    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        self.parse_binary_expression(1)
    }

    pub(crate) fn parse_expression_list(&mut self) -> Vec<NodeIndex> {
        let mut list = vec![self.parse_expression()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            list.push(self.parse_expression());
        }
        list
    }

    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let mut left = self.parse_unary_expression();
        loop {
            let operator = self.token();
            let precedence = binary_precedence(operator);
            if precedence == 0 || precedence < min_precedence {
                return left;
            }
            self.next_token();
            let right = self.parse_binary_expression(precedence + 1);
            let pos = self.arena.get(left).map_or(0, |n| n.pos);
            let end = self.prev_end();
            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                pos,
                end,
                left,
                operator as u16,
                right,
            );
        }
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.bad_expression();
        }
        let result = self.parse_unary_expression_inner();
        self.exit_recursion();
        result
    }

    fn parse_unary_expression_inner(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::CaretToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::AsteriskToken => {
                let operator = self.token();
                self.next_token();
                let operand = self.parse_unary_expression();
                let end = self.prev_end();
                self.arena.add_unary_expr(
                    syntax_kind_ext::UNARY_EXPRESSION,
                    pos,
                    end,
                    operator as u16,
                    operand,
                )
            }
            SyntaxKind::LessThanMinusToken => {
                self.next_token();
                if self.is_token(SyntaxKind::ChanKeyword) {
                    let chan = self.parse_receive_chan_rest(pos);
                    return self.parse_primary_suffixes(chan);
                }
                let operand = self.parse_unary_expression();
                let end = self.prev_end();
                self.arena.add_unary_expr(
                    syntax_kind_ext::UNARY_EXPRESSION,
                    pos,
                    end,
                    SyntaxKind::LessThanMinusToken as u16,
                    operand,
                )
            }
            _ => self.parse_primary_expression(),
        }
    }

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let operand = self.parse_operand();
        self.parse_primary_suffixes(operand)
    }

    /// Selectors, type assertions, index/slice, calls and composite literal bodies.
    fn parse_primary_suffixes(&mut self, mut x: NodeIndex) -> NodeIndex {
        loop {
            let pos = self.arena.get(x).map_or(0, |n| n.pos);
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    match self.token() {
                        SyntaxKind::Identifier => {
                            let name = self.parse_identifier();
                            let end = self.prev_end();
                            x = self.arena.add_selector_expr(pos, end, x, name);
                        }
                        SyntaxKind::OpenParenToken => {
                            self.next_token();
                            let asserted = if self.parse_optional(SyntaxKind::TypeKeyword) {
                                NodeIndex::NONE
                            } else {
                                self.parse_type()
                            };
                            self.parse_expected(SyntaxKind::CloseParenToken);
                            let end = self.prev_end();
                            x = self.arena.add_index_expr(
                                syntax_kind_ext::TYPE_ASSERTION,
                                pos,
                                end,
                                x,
                                asserted,
                            );
                        }
                        _ => {
                            self.error_expected("selector or type assertion");
                            return x;
                        }
                    }
                }
                SyntaxKind::OpenBracketToken => x = self.parse_index_or_slice(x, pos),
                SyntaxKind::OpenParenToken => x = self.parse_call(x, pos),
                SyntaxKind::OpenBraceToken
                    if self.is_literal_type(x) && (self.expr_level >= 0 || !self.is_type_name(x)) =>
                {
                    x = self.parse_composite_literal(x, pos);
                }
                _ => return x,
            }
        }
    }

    fn parse_index_or_slice(&mut self, x: NodeIndex, pos: u32) -> NodeIndex {
        self.next_token();
        self.expr_level += 1;

        let low = if self.is_token(SyntaxKind::ColonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };

        if self.parse_optional(SyntaxKind::ColonToken) {
            let mut high = NodeIndex::NONE;
            let mut max = NodeIndex::NONE;
            if !matches!(
                self.token(),
                SyntaxKind::CloseBracketToken | SyntaxKind::ColonToken
            ) {
                high = self.parse_expression();
            }
            if self.parse_optional(SyntaxKind::ColonToken) {
                max = self.parse_expression();
            }
            self.expr_level -= 1;
            self.parse_expected(SyntaxKind::CloseBracketToken);
            let end = self.prev_end();
            self.arena.add_slice_expr(
                pos,
                end,
                SliceExprData {
                    expression: x,
                    low,
                    high,
                    max,
                },
            )
        } else if self.is_token(SyntaxKind::CommaToken) {
            // `f[K, V]`: several type arguments.
            let mut indices = vec![low];
            while self.parse_optional(SyntaxKind::CommaToken) {
                if self.is_token(SyntaxKind::CloseBracketToken) {
                    break;
                }
                indices.push(self.parse_type());
            }
            self.expr_level -= 1;
            self.parse_expected(SyntaxKind::CloseBracketToken);
            let end = self.prev_end();
            self.arena.add_index_list(pos, end, x, NodeList::from_vec(indices))
        } else {
            self.expr_level -= 1;
            self.parse_expected(SyntaxKind::CloseBracketToken);
            let end = self.prev_end();
            self.arena
                .add_index_expr(syntax_kind_ext::INDEX_EXPRESSION, pos, end, x, low)
        }
    }

    fn parse_call(&mut self, callee: NodeIndex, pos: u32) -> NodeIndex {
        self.next_token();
        self.expr_level += 1;

        let mut arguments = Vec::new();
        let mut ellipsis = u32::MAX;
        while !self.is_token(SyntaxKind::CloseParenToken) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.token_pos();
            arguments.push(self.parse_expression());
            if self.is_token(SyntaxKind::DotDotDotToken) {
                ellipsis = self.token_pos();
                self.next_token();
            }
            if !self.parse_optional(SyntaxKind::CommaToken) || self.token_pos() == before {
                break;
            }
        }

        self.expr_level -= 1;
        self.parse_expected(SyntaxKind::CloseParenToken);
        let end = self.prev_end();
        self.arena.add_call_expr(
            pos,
            end,
            CallExprData {
                expression: callee,
                arguments: NodeList::from_vec(arguments),
                ellipsis,
            },
        )
    }

    /// `{ elem, key: value, {nested}, ... }` following a literal type.
    fn parse_composite_literal(&mut self, type_node: NodeIndex, pos: u32) -> NodeIndex {
        self.next_token();
        self.expr_level += 1;

        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.token_pos();
            elements.push(self.parse_element());
            if !self.parse_optional(SyntaxKind::CommaToken) || self.token_pos() == before {
                break;
            }
        }

        self.expr_level -= 1;
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end = self.prev_end();
        self.arena
            .add_composite_literal(pos, end, type_node, NodeList::from_vec(elements))
    }

    fn parse_element(&mut self) -> NodeIndex {
        let key = self.parse_element_value();
        if !self.parse_optional(SyntaxKind::ColonToken) {
            return key;
        }
        let value = self.parse_element_value();
        let pos = self.arena.get(key).map_or(0, |n| n.pos);
        let end = self.prev_end();
        self.arena.add_binary_expr(
            syntax_kind_ext::KEY_VALUE_EXPRESSION,
            pos,
            end,
            key,
            SyntaxKind::ColonToken as u16,
            value,
        )
    }

    /// An element expression, or a nested literal with its type elided.
    fn parse_element_value(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            let pos = self.token_pos();
            return self.parse_composite_literal(NodeIndex::NONE, pos);
        }
        self.parse_expression()
    }

    fn parse_operand(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier => self.parse_identifier(),
            token if token_is_literal(token) => self.parse_literal(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                self.expr_level += 1;
                let inner = self.parse_expression();
                self.expr_level -= 1;
                self.parse_expected(SyntaxKind::CloseParenToken);
                let end = self.prev_end();
                self.arena
                    .add_wrapped(syntax_kind_ext::PAREN_EXPRESSION, 0, pos, end, inner)
            }
            SyntaxKind::FuncKeyword => self.parse_function_literal_or_type(),
            SyntaxKind::OpenBracketToken
            | SyntaxKind::MapKeyword
            | SyntaxKind::ChanKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword => match self.try_parse_type() {
                Some(type_node) => type_node,
                None => self.bad_expression(),
            },
            _ => {
                self.error_at_current(
                    diagnostic_codes::EXPECTED_EXPRESSION,
                    diagnostic_messages::EXPECTED_EXPRESSION,
                );
                if !matches!(
                    self.token(),
                    SyntaxKind::CloseParenToken
                        | SyntaxKind::CloseBracketToken
                        | SyntaxKind::CloseBraceToken
                        | SyntaxKind::SemicolonToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::EndOfFileToken
                ) {
                    self.next_token();
                }
                let end = self.prev_end().max(pos);
                self.arena
                    .add_token(syntax_kind_ext::BAD_EXPRESSION, pos, end)
            }
        }
    }

    pub(crate) fn parse_literal(&mut self) -> NodeIndex {
        let kind = self.token();
        let (pos, end) = (self.token_pos(), self.token_end());
        let text = self.scanner.get_token_text().to_string();
        self.next_token();
        self.arena.add_literal(kind as u16, pos, end, text)
    }

    fn parse_function_literal_or_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let (parameters, results) = self.parse_signature();

        let (kind, body) = if self.is_token(SyntaxKind::OpenBraceToken) {
            let saved = self.expr_level;
            self.expr_level = 0;
            let body = self.parse_block();
            self.expr_level = saved;
            (syntax_kind_ext::FUNCTION_LITERAL, body)
        } else {
            (syntax_kind_ext::FUNCTION_TYPE, NodeIndex::NONE)
        };

        let end = self.prev_end();
        self.arena.add_function(
            kind,
            pos,
            end,
            FunctionData {
                receiver: NodeIndex::NONE,
                name: NodeIndex::NONE,
                type_params: NodeList::new(),
                parameters: NodeList::from_vec(parameters),
                results: NodeList::from_vec(results),
                body,
            },
        )
    }

    fn bad_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena
            .add_token(syntax_kind_ext::BAD_EXPRESSION, pos, pos)
    }

    /// Whether `{` after `x` can open a composite literal body.
    fn is_literal_type(&self, x: NodeIndex) -> bool {
        let Some(node) = self.arena.get(x) else {
            return false;
        };
        match node.kind {
            syntax_kind_ext::IDENTIFIER
            | syntax_kind_ext::ARRAY_TYPE
            | syntax_kind_ext::STRUCT_TYPE
            | syntax_kind_ext::MAP_TYPE => true,
            syntax_kind_ext::SELECTOR_EXPRESSION => self
                .arena
                .get_selector_expr(node)
                .and_then(|s| self.arena.get(s.expression))
                .is_some_and(|n| n.kind == syntax_kind_ext::IDENTIFIER),
            // `List[int]{}` and `Pair[K, V]{}`.
            syntax_kind_ext::INDEX_EXPRESSION => self
                .arena
                .get_index_expr(node)
                .is_some_and(|data| self.is_named(data.expression)),
            syntax_kind_ext::INDEX_LIST_EXPRESSION => self
                .arena
                .get_index_list(node)
                .is_some_and(|data| self.is_named(data.expression)),
            _ => false,
        }
    }

    fn is_named(&self, x: NodeIndex) -> bool {
        matches!(
            self.arena.kind_of(x),
            Some(syntax_kind_ext::IDENTIFIER | syntax_kind_ext::SELECTOR_EXPRESSION)
        )
    }

    /// Names and instantiations that may be a type or a value; inside a
    /// control clause a following `{` opens the block.
    fn is_type_name(&self, x: NodeIndex) -> bool {
        self.is_named(x)
            || matches!(
                self.arena.kind_of(x),
                Some(syntax_kind_ext::INDEX_EXPRESSION | syntax_kind_ext::INDEX_LIST_EXPRESSION)
            )
    }
}
