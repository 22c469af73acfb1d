//! Declarations, parameter lists and type expressions.

use ctxlint_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use ctxlint_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::node::{FunctionData, ImportSpecData, ParameterData, TypeSpecData, ValueSpecData};
use super::node_flags;
use super::state::ParserState;
use super::syntax_kind_ext;

/// One comma-separated entry of a parameter list before grouping.
enum ParamItem {
    /// A lone identifier: a parameter name or a type name, decided later.
    Bare(NodeIndex),
    /// A type with no name.
    Type { type_node: NodeIndex, is_variadic: bool },
    /// `name Type` (the last name of a group).
    Named {
        name: NodeIndex,
        type_node: NodeIndex,
        is_variadic: bool,
    },
}

impl ParserState {
    // =========================================================================
    // Top-level declarations
    // =========================================================================

    pub(crate) fn parse_top_level_declaration(&mut self) -> Option<NodeIndex> {
        match self.token() {
            SyntaxKind::ConstKeyword
            | SyntaxKind::VarKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::ImportKeyword => {
                let keyword = self.token();
                if keyword == SyntaxKind::ImportKeyword {
                    self.error_at_current(
                        diagnostic_codes::EXPECTED_DECLARATION,
                        diagnostic_messages::EXPECTED_DECLARATION,
                    );
                }
                let decl = self.parse_gen_decl(keyword);
                self.expect_semicolon();
                Some(decl)
            }
            SyntaxKind::FuncKeyword => {
                let decl = self.parse_function_declaration();
                self.expect_semicolon();
                Some(decl)
            }
            SyntaxKind::SemicolonToken => {
                self.next_token();
                None
            }
            _ => {
                self.error_at_current(
                    diagnostic_codes::EXPECTED_DECLARATION,
                    diagnostic_messages::EXPECTED_DECLARATION,
                );
                self.skip_to_declaration_start();
                None
            }
        }
    }

    fn skip_to_declaration_start(&mut self) {
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken
                | SyntaxKind::FuncKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::ImportKeyword => return,
                _ => {
                    self.next_token();
                }
            }
        }
    }

    /// `keyword Spec` or `keyword ( Spec; Spec; ... )`.
    pub(crate) fn parse_gen_decl(&mut self, keyword: SyntaxKind) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        let mut specs = Vec::new();
        if self.parse_optional(SyntaxKind::OpenParenToken) {
            let mut iota = 0;
            while !self.is_token(SyntaxKind::CloseParenToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let before = self.token_pos();
                specs.push(self.parse_spec(keyword, iota));
                iota += 1;
                if !self.is_token(SyntaxKind::CloseParenToken) {
                    self.expect_semicolon();
                }
                if self.token_pos() == before {
                    self.next_token();
                }
            }
            self.parse_expected(SyntaxKind::CloseParenToken);
        } else {
            specs.push(self.parse_spec(keyword, 0));
        }

        let end = self.prev_end();
        self.arena
            .add_gen_decl(keyword as u16, pos, end, NodeList::from_vec(specs))
    }

    fn parse_spec(&mut self, keyword: SyntaxKind, iota: u32) -> NodeIndex {
        match keyword {
            SyntaxKind::ImportKeyword => self.parse_import_spec(),
            SyntaxKind::TypeKeyword => self.parse_type_spec(),
            _ => self.parse_value_spec(keyword, iota),
        }
    }

    fn parse_import_spec(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let name = match self.token() {
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::DotToken => {
                let (start, end) = (self.token_pos(), self.token_end());
                self.next_token();
                self.arena.add_identifier(start, end, ".")
            }
            _ => NodeIndex::NONE,
        };

        let path = if matches!(
            self.token(),
            SyntaxKind::StringLiteral | SyntaxKind::RawStringLiteral
        ) {
            self.parse_literal()
        } else {
            self.error_expected("import path");
            NodeIndex::NONE
        };

        let end = self.prev_end();
        self.arena
            .add_import_spec(pos, end, ImportSpecData { name, path })
    }

    fn parse_type_spec(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let name = self.parse_identifier();
        let type_params = if self.is_token(SyntaxKind::OpenBracketToken) && self.at_type_parameters() {
            self.parse_type_parameters()
        } else {
            Vec::new()
        };
        let is_alias = self.parse_optional(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        let end = self.prev_end();
        self.arena.add_type_spec(
            pos,
            end,
            TypeSpecData {
                name,
                type_params: NodeList::from_vec(type_params),
                type_node,
                is_alias,
            },
        )
    }

    /// `a, b T = x, y` for `var` and `const`. Const specs may omit both type
    /// and values to repeat the previous spec.
    fn parse_value_spec(&mut self, keyword: SyntaxKind, iota: u32) -> NodeIndex {
        let pos = self.token_pos();
        let names = self.parse_identifier_list();

        let type_node = if matches!(
            self.token(),
            SyntaxKind::EqualsToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::EndOfFileToken
        ) {
            NodeIndex::NONE
        } else {
            self.parse_type()
        };

        let values = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_expression_list()
        } else {
            if keyword == SyntaxKind::VarKeyword && type_node.is_none() {
                self.error_at_current(diagnostic_codes::EXPECTED_TYPE, diagnostic_messages::EXPECTED_TYPE);
            }
            Vec::new()
        };

        let end = self.prev_end();
        self.arena.add_value_spec(
            pos,
            end,
            ValueSpecData {
                names: NodeList::from_vec(names),
                type_node,
                values: NodeList::from_vec(values),
                iota,
            },
        )
    }

    pub(crate) fn parse_identifier_list(&mut self) -> Vec<NodeIndex> {
        let mut names = vec![self.parse_identifier()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            names.push(self.parse_identifier());
        }
        names
    }

    // =========================================================================
    // Functions
    // =========================================================================

    fn parse_function_declaration(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        let receiver = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_parameters().first().copied().unwrap_or(NodeIndex::NONE)
        } else {
            NodeIndex::NONE
        };
        let name = self.parse_identifier();
        let type_params = if self.is_token(SyntaxKind::OpenBracketToken) {
            self.parse_type_parameters()
        } else {
            Vec::new()
        };
        let (parameters, results) = self.parse_signature();

        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            let saved = self.expr_level;
            self.expr_level = 0;
            let body = self.parse_block();
            self.expr_level = saved;
            body
        } else {
            NodeIndex::NONE
        };

        let end = self.prev_end();
        self.arena.add_function(
            syntax_kind_ext::FUNCTION_DECLARATION,
            pos,
            end,
            FunctionData {
                receiver,
                name,
                type_params: NodeList::from_vec(type_params),
                parameters: NodeList::from_vec(parameters),
                results: NodeList::from_vec(results),
                body,
            },
        )
    }

    /// `[K comparable, V any]` or `[A, B C]`, at the opening `[`.
    fn parse_type_parameters(&mut self) -> Vec<NodeIndex> {
        self.next_token();
        let mut params = Vec::new();
        let mut names = Vec::new();
        while self.is_token(SyntaxKind::Identifier) {
            names.push(self.parse_identifier());
            if self.parse_optional(SyntaxKind::CommaToken) {
                continue;
            }
            let constraint = self.parse_constraint();
            let names = std::mem::take(&mut names);
            let pos = names.first().and_then(|&n| self.arena.get(n)).map_or(0, |n| n.pos);
            let end = self.prev_end();
            params.push(self.arena.add_parameter(
                syntax_kind_ext::TYPE_PARAMETER,
                pos,
                end,
                ParameterData {
                    names: NodeList::from_vec(names),
                    type_node: constraint,
                    is_variadic: false,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        if params.is_empty() || !names.is_empty() {
            self.error_at_current(diagnostic_codes::EXPECTED_TYPE, diagnostic_messages::EXPECTED_TYPE);
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        params
    }

    /// Whether the `[` after a type name opens type parameters rather than
    /// an array length: `type S[T any]` versus `type A [N]int`.
    fn at_type_parameters(&mut self) -> bool {
        self.look_ahead(|p| {
            if p.next_token() != SyntaxKind::Identifier {
                return false;
            }
            matches!(
                p.next_token(),
                SyntaxKind::Identifier
                    | SyntaxKind::CommaToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::TildeToken
                    | SyntaxKind::InterfaceKeyword
                    | SyntaxKind::FuncKeyword
                    | SyntaxKind::MapKeyword
                    | SyntaxKind::ChanKeyword
                    | SyntaxKind::StructKeyword
            )
        })
    }

    /// A type constraint or type-set element: `any`, `~int | ~string`.
    pub(crate) fn parse_constraint(&mut self) -> NodeIndex {
        let first = self.parse_constraint_term();
        self.parse_union_rest(first)
    }

    fn parse_constraint_term(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if self.parse_optional(SyntaxKind::TildeToken) {
            let inner = self.parse_type();
            let end = self.prev_end();
            return self
                .arena
                .add_wrapped(syntax_kind_ext::TILDE_TYPE, 0, pos, end, inner);
        }
        self.parse_type()
    }

    /// Further `| term` entries after `first`; returns `first` when none follow.
    fn parse_union_rest(&mut self, first: NodeIndex) -> NodeIndex {
        if !self.is_token(SyntaxKind::BarToken) {
            return first;
        }
        let pos = self.arena.get(first).map_or(0, |n| n.pos);
        let mut terms = vec![first];
        while self.parse_optional(SyntaxKind::BarToken) {
            terms.push(self.parse_constraint_term());
        }
        let end = self.prev_end();
        self.arena
            .add_list(syntax_kind_ext::UNION_TYPE, pos, end, NodeList::from_vec(terms))
    }

    /// `[A]` or `[A, B]` after a generic type name; returns `base` when no
    /// `[` follows.
    pub(crate) fn parse_type_arguments_opt(&mut self, base: NodeIndex) -> NodeIndex {
        if !self.is_token(SyntaxKind::OpenBracketToken) {
            return base;
        }
        let pos = self.arena.get(base).map_or(0, |n| n.pos);
        self.next_token();
        let mut arguments = vec![self.parse_type()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            if self.is_token(SyntaxKind::CloseBracketToken) {
                break;
            }
            arguments.push(self.parse_type());
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let end = self.prev_end();
        if arguments.len() == 1 {
            self.arena
                .add_index_expr(syntax_kind_ext::INDEX_EXPRESSION, pos, end, base, arguments[0])
        } else {
            self.arena
                .add_index_list(pos, end, base, NodeList::from_vec(arguments))
        }
    }

    /// `(params) results` where results is a parenthesized list, a single
    /// type, or nothing.
    pub(crate) fn parse_signature(&mut self) -> (Vec<NodeIndex>, Vec<NodeIndex>) {
        let parameters = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_parameters()
        } else {
            self.error_expected("'('");
            Vec::new()
        };

        let results = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_parameters()
        } else if self.can_start_type() {
            let pos = self.token_pos();
            let type_node = self.parse_type();
            let end = self.prev_end();
            vec![self.arena.add_parameter(
                syntax_kind_ext::PARAMETER,
                pos,
                end,
                ParameterData {
                    names: NodeList::new(),
                    type_node,
                    is_variadic: false,
                },
            )]
        } else {
            Vec::new()
        };

        (parameters, results)
    }

    /// A parenthesized parameter list. Either every entry is named
    /// (`a, b int, c string`) or none is (`int, string`).
    pub(crate) fn parse_parameters(&mut self) -> Vec<NodeIndex> {
        self.parse_expected(SyntaxKind::OpenParenToken);

        let mut items = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.token_pos();
            items.push(self.parse_parameter_item());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            if self.token_pos() == before {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);

        self.group_parameters(items)
    }

    fn parse_parameter_item(&mut self) -> ParamItem {
        if self.is_token(SyntaxKind::Identifier) {
            let ident = self.parse_identifier();
            match self.token() {
                SyntaxKind::CommaToken | SyntaxKind::CloseParenToken => ParamItem::Bare(ident),
                SyntaxKind::DotToken => {
                    let qualified = self.parse_qualified_rest(ident);
                    let type_node = self.parse_type_arguments_opt(qualified);
                    ParamItem::Type {
                        type_node,
                        is_variadic: false,
                    }
                }
                _ => {
                    let is_variadic = self.parse_optional(SyntaxKind::DotDotDotToken);
                    let type_node = self.parse_type();
                    ParamItem::Named {
                        name: ident,
                        type_node,
                        is_variadic,
                    }
                }
            }
        } else {
            let is_variadic = self.parse_optional(SyntaxKind::DotDotDotToken);
            let type_node = self.parse_type();
            ParamItem::Type {
                type_node,
                is_variadic,
            }
        }
    }

    fn group_parameters(&mut self, items: Vec<ParamItem>) -> Vec<NodeIndex> {
        let named = items.iter().any(|item| matches!(item, ParamItem::Named { .. }));
        let mut params = Vec::new();

        if !named {
            for item in items {
                let (type_node, is_variadic) = match item {
                    ParamItem::Bare(ident) => (ident, false),
                    ParamItem::Type {
                        type_node,
                        is_variadic,
                    } => (type_node, is_variadic),
                    ParamItem::Named { .. } => continue,
                };
                params.push(self.make_parameter(Vec::new(), type_node, is_variadic));
            }
            return params;
        }

        let mut pending = Vec::new();
        for item in items {
            match item {
                ParamItem::Bare(ident) => pending.push(ident),
                ParamItem::Named {
                    name,
                    type_node,
                    is_variadic,
                } => {
                    pending.push(name);
                    let names = std::mem::take(&mut pending);
                    params.push(self.make_parameter(names, type_node, is_variadic));
                }
                ParamItem::Type {
                    type_node,
                    is_variadic,
                } => {
                    // Mixing named and unnamed entries; keep the type and move on.
                    if let Some(node) = self.arena.get(type_node) {
                        let (pos, end) = (node.pos, node.end);
                        self.error_at(
                            pos,
                            end - pos,
                            diagnostic_codes::EXPECTED_TOKEN,
                            "mixed named and unnamed parameters".to_string(),
                        );
                    }
                    params.push(self.make_parameter(Vec::new(), type_node, is_variadic));
                }
            }
        }
        if let Some(&last) = pending.last()
            && let Some(node) = self.arena.get(last)
        {
            let (pos, end) = (node.pos, node.end);
            self.error_at(
                pos,
                end - pos,
                diagnostic_codes::EXPECTED_TYPE,
                "missing parameter type".to_string(),
            );
        }
        params
    }

    fn make_parameter(&mut self, names: Vec<NodeIndex>, type_node: NodeIndex, is_variadic: bool) -> NodeIndex {
        let first = names.first().copied().unwrap_or(type_node);
        let pos = self.arena.get(first).map_or(0, |n| n.pos);
        let end = self.arena.get(type_node).map_or(pos, |n| n.end);
        self.arena.add_parameter(
            syntax_kind_ext::PARAMETER,
            pos,
            end,
            ParameterData {
                names: NodeList::from_vec(names),
                type_node,
                is_variadic,
            },
        )
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub(crate) fn can_start_type(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::Identifier
                | SyntaxKind::AsteriskToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::MapKeyword
                | SyntaxKind::ChanKeyword
                | SyntaxKind::FuncKeyword
                | SyntaxKind::StructKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::OpenParenToken
                | SyntaxKind::LessThanMinusToken
        )
    }

    /// Parse a type, reporting (and returning a `BAD_EXPRESSION`) when none starts here.
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        if let Some(type_node) = self.try_parse_type() {
            return type_node;
        }
        self.error_at_current(diagnostic_codes::EXPECTED_TYPE, diagnostic_messages::EXPECTED_TYPE);
        let pos = self.token_pos();
        self.arena.add_token(syntax_kind_ext::BAD_EXPRESSION, pos, pos)
    }

    pub(crate) fn try_parse_type(&mut self) -> Option<NodeIndex> {
        if !self.enter_recursion() {
            return None;
        }
        let result = self.try_parse_type_inner();
        self.exit_recursion();
        result
    }

    fn try_parse_type_inner(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();
        let node = match self.token() {
            SyntaxKind::Identifier => {
                let ident = self.parse_identifier();
                let name = if self.is_token(SyntaxKind::DotToken) {
                    self.parse_qualified_rest(ident)
                } else {
                    ident
                };
                self.parse_type_arguments_opt(name)
            }
            SyntaxKind::AsteriskToken => {
                self.next_token();
                let elem = self.parse_type();
                let end = self.prev_end();
                self.arena
                    .add_wrapped(syntax_kind_ext::POINTER_TYPE, 0, pos, end, elem)
            }
            SyntaxKind::OpenBracketToken => self.parse_array_or_slice_type(),
            SyntaxKind::MapKeyword => self.parse_map_type(),
            SyntaxKind::ChanKeyword | SyntaxKind::LessThanMinusToken => self.parse_chan_type(),
            SyntaxKind::FuncKeyword => {
                self.next_token();
                let (parameters, results) = self.parse_signature();
                let end = self.prev_end();
                self.arena.add_function(
                    syntax_kind_ext::FUNCTION_TYPE,
                    pos,
                    end,
                    FunctionData {
                        receiver: NodeIndex::NONE,
                        name: NodeIndex::NONE,
                        type_params: NodeList::new(),
                        parameters: NodeList::from_vec(parameters),
                        results: NodeList::from_vec(results),
                        body: NodeIndex::NONE,
                    },
                )
            }
            SyntaxKind::StructKeyword => self.parse_struct_type(),
            SyntaxKind::InterfaceKeyword => self.parse_interface_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let inner = self.parse_type();
                self.parse_expected(SyntaxKind::CloseParenToken);
                let end = self.prev_end();
                self.arena
                    .add_wrapped(syntax_kind_ext::PAREN_EXPRESSION, 0, pos, end, inner)
            }
            _ => return None,
        };
        Some(node)
    }

    /// `pkg` `.` `Name` with `pkg` already parsed.
    pub(crate) fn parse_qualified_rest(&mut self, qualifier: NodeIndex) -> NodeIndex {
        self.next_token();
        let name = self.parse_identifier();
        let pos = self.arena.get(qualifier).map_or(0, |n| n.pos);
        let end = self.prev_end();
        self.arena.add_selector_expr(pos, end, qualifier, name)
    }

    /// `[]T`, `[N]T` or `[...]T`.
    pub(crate) fn parse_array_or_slice_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let length = match self.token() {
            SyntaxKind::CloseBracketToken => NodeIndex::NONE,
            SyntaxKind::DotDotDotToken => {
                let (start, end) = (self.token_pos(), self.token_end());
                self.next_token();
                self.arena.add_identifier(start, end, "...")
            }
            _ => {
                self.expr_level += 1;
                let length = self.parse_expression();
                self.expr_level -= 1;
                length
            }
        };
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let elem = self.parse_type();
        let end = self.prev_end();
        self.arena
            .add_index_expr(syntax_kind_ext::ARRAY_TYPE, pos, end, elem, length)
    }

    fn parse_map_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let key = self.parse_type();
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let value = self.parse_type();
        let end = self.prev_end();
        self.arena
            .add_index_expr(syntax_kind_ext::MAP_TYPE, pos, end, value, key)
    }

    fn parse_chan_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut flags = node_flags::NONE;
        if self.parse_optional(SyntaxKind::LessThanMinusToken) {
            flags = node_flags::CHAN_RECV;
            self.parse_expected(SyntaxKind::ChanKeyword);
        } else {
            self.next_token();
            if self.parse_optional(SyntaxKind::LessThanMinusToken) {
                flags = node_flags::CHAN_SEND;
            }
        }
        let elem = self.parse_type();
        let end = self.prev_end();
        self.arena
            .add_wrapped(syntax_kind_ext::CHAN_TYPE, flags, pos, end, elem)
    }

    /// Rest of a `<-chan T` type once `<-` has been consumed at `pos`.
    pub(crate) fn parse_receive_chan_rest(&mut self, pos: u32) -> NodeIndex {
        self.next_token();
        let elem = self.parse_type();
        let end = self.prev_end();
        self.arena
            .add_wrapped(syntax_kind_ext::CHAN_TYPE, node_flags::CHAN_RECV, pos, end, elem)
    }

    fn parse_struct_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut fields = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.token_pos();
            if let Some(field) = self.parse_field() {
                fields.push(field);
            }
            self.expect_semicolon();
            if self.token_pos() == before {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end = self.prev_end();
        self.arena
            .add_list(syntax_kind_ext::STRUCT_TYPE, pos, end, NodeList::from_vec(fields))
    }

    /// Struct field: `a, b T "tag"` or an embedded `T`, `*T`, `pkg.T`.
    fn parse_field(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();
        let (names, type_node) = match self.token() {
            SyntaxKind::Identifier => {
                let first = self.parse_identifier();
                match self.token() {
                    SyntaxKind::DotToken => (Vec::new(), self.parse_qualified_rest(first)),
                    SyntaxKind::SemicolonToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::StringLiteral
                    | SyntaxKind::RawStringLiteral => (Vec::new(), first),
                    _ => {
                        let mut names = vec![first];
                        while self.parse_optional(SyntaxKind::CommaToken) {
                            names.push(self.parse_identifier());
                        }
                        (names, self.parse_type())
                    }
                }
            }
            SyntaxKind::AsteriskToken => (Vec::new(), self.parse_type()),
            _ => {
                self.error_at_current(diagnostic_codes::EXPECTED_TYPE, diagnostic_messages::EXPECTED_TYPE);
                return None;
            }
        };
        // Tags carry no type information.
        if matches!(
            self.token(),
            SyntaxKind::StringLiteral | SyntaxKind::RawStringLiteral
        ) {
            self.next_token();
        }
        let end = self.prev_end();
        Some(self.arena.add_parameter(
            syntax_kind_ext::FIELD,
            pos,
            end,
            ParameterData {
                names: NodeList::from_vec(names),
                type_node,
                is_variadic: false,
            },
        ))
    }

    fn parse_interface_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.token_pos();
            if let Some(element) = self.parse_interface_element() {
                elements.push(element);
            }
            self.expect_semicolon();
            if self.token_pos() == before {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end = self.prev_end();
        self.arena.add_list(
            syntax_kind_ext::INTERFACE_TYPE,
            pos,
            end,
            NodeList::from_vec(elements),
        )
    }

    /// Method `Name(params) results`, an embedded interface or a type-set
    /// element such as `~int | ~string`.
    fn parse_interface_element(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();
        if !self.is_token(SyntaxKind::Identifier) {
            if !self.is_token(SyntaxKind::TildeToken) && !self.can_start_type() {
                self.error_at_current(diagnostic_codes::EXPECTED_TYPE, diagnostic_messages::EXPECTED_TYPE);
                return None;
            }
            let type_node = self.parse_constraint();
            let end = self.prev_end();
            return Some(self.arena.add_parameter(
                syntax_kind_ext::FIELD,
                pos,
                end,
                ParameterData {
                    names: NodeList::new(),
                    type_node,
                    is_variadic: false,
                },
            ));
        }
        let first = self.parse_identifier();
        let (names, type_node) = match self.token() {
            SyntaxKind::OpenParenToken => {
                let sig_pos = self.token_pos();
                let (parameters, results) = self.parse_signature();
                let end = self.prev_end();
                let signature = self.arena.add_function(
                    syntax_kind_ext::FUNCTION_TYPE,
                    sig_pos,
                    end,
                    FunctionData {
                        receiver: NodeIndex::NONE,
                        name: NodeIndex::NONE,
                        type_params: NodeList::new(),
                        parameters: NodeList::from_vec(parameters),
                        results: NodeList::from_vec(results),
                        body: NodeIndex::NONE,
                    },
                );
                (vec![first], signature)
            }
            _ => {
                let embedded = if self.is_token(SyntaxKind::DotToken) {
                    self.parse_qualified_rest(first)
                } else {
                    first
                };
                let embedded = self.parse_type_arguments_opt(embedded);
                (Vec::new(), self.parse_union_rest(embedded))
            }
        };
        let end = self.prev_end();
        Some(self.arena.add_parameter(
            syntax_kind_ext::FIELD,
            pos,
            end,
            ParameterData {
                names: NodeList::from_vec(names),
                type_node,
                is_variadic: false,
            },
        ))
    }
}
