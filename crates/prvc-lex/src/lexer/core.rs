//! Core lexer implementation.
//!
//! This module contains the main `Lexer` struct and its top-level
//! dispatch, including indentation tracking and newline suppression.

use prvc_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span};

use crate::cursor::Cursor;
use crate::indent::{IndentStack, IndentTransition};
use crate::token::{Token, TokenKind};

/// Lexer for Prove source code.
///
/// Transforms source text into a stream of tokens, tracking indentation
/// (emitting `INDENT`/`DEDENT`), bracket depth, and newline suppression
/// rules as it goes.
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    pub(crate) cursor: Cursor<'a>,

    /// Error handler for reporting lexical errors.
    pub(crate) handler: &'a mut Handler,

    /// Starting position of the current token (byte offset).
    pub(crate) token_start: usize,

    /// Line number where the current token starts (1-based).
    pub(crate) token_start_line: u32,

    /// Column number where the current token starts (1-based).
    pub(crate) token_start_column: u32,

    /// Whether the BOM (Byte Order Mark) has been checked.
    pub(crate) bom_checked: bool,

    /// Indent-width stack for the off-side rule.
    pub(crate) indents: IndentStack,

    /// Bracket nesting depth: `(` and `[` push, `)` and `]` pop.
    pub(crate) bracket_depth: i32,

    /// Whether the lexer is positioned at the start of a logical line and
    /// still needs to process indentation before the next token.
    pub(crate) at_line_start: bool,

    /// Pending structural tokens queued by indentation handling, drained
    /// before scanning a new token from the cursor.
    pub(crate) pending: Vec<Token>,

    /// The kind of the most recently returned token, used to decide
    /// newline suppression and regex-vs-division disambiguation.
    pub(crate) prev_kind: Option<TokenKind>,

    /// True once `EOF` has been produced, so repeated calls are idempotent.
    pub(crate) done: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
            bom_checked: false,
            indents: IndentStack::new(),
            bracket_depth: 0,
            at_line_start: true,
            pending: Vec::new(),
            prev_kind: None,
            done: false,
        }
    }

    /// Tokenizes the entire source, returning a flat vector ending with
    /// `EOF`. Errors are recorded on the handler; lexing continues past
    /// them so the caller can see every diagnostic in one pass.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Returns the next token from the input.
    pub fn next_token(&mut self) -> Token {
        if let Some(tok) = self.pending.pop() {
            self.prev_kind = Some(tok.kind.clone());
            return tok;
        }

        if self.done {
            return self.make(TokenKind::Eof, self.cursor.position());
        }

        self.check_bom();

        if self.at_line_start && self.bracket_depth == 0 {
            self.at_line_start = false;
            self.handle_indentation();
            if let Some(tok) = self.pending.pop() {
                self.prev_kind = Some(tok.kind.clone());
                return tok;
            }
        }

        self.skip_spaces_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return self.finish();
        }

        let c = self.cursor.current_char();

        let token = if c == '\n' {
            self.cursor.advance();
            self.at_line_start = true;
            let suppressed = self.bracket_depth > 0
                || self
                    .prev_kind
                    .as_ref()
                    .map(|k| k.suppresses_following_newline())
                    .unwrap_or(false)
                || matches!(self.prev_kind, Some(TokenKind::Newline) | None);
            if suppressed {
                return self.next_token();
            }
            self.make(TokenKind::Newline, self.token_start)
        } else if c == '/' && self.cursor.peek_char(1) == '/' && self.cursor.peek_char(2) == '/' {
            self.lex_doc_comment()
        } else if c == '"' && self.cursor.peek_char(1) == '"' && self.cursor.peek_char(2) == '"' {
            self.lex_triple_string()
        } else if c == '"' {
            self.lex_string()
        } else if c == '\'' {
            self.lex_char()
        } else if c == '/' && self.should_start_regex_or_path() {
            if self.is_path_literal() {
                self.lex_path()
            } else {
                self.lex_regex()
            }
        } else if c == 'r' && matches!(self.cursor.peek_char(1), '"') {
            self.lex_raw_string()
        } else if c.is_ascii_digit() {
            self.lex_number()
        } else if crate::unicode::is_ident_start(c) {
            self.lex_identifier()
        } else {
            self.lex_operator_or_punct()
        };

        self.prev_kind = Some(token.kind.clone());
        token
    }

    fn finish(&mut self) -> Token {
        let remaining = self.indents.close_all();
        if remaining > 0 {
            self.pending.push(self.make(TokenKind::Eof, self.cursor.position()));
            for _ in 1..remaining {
                self.pending.push(self.make(TokenKind::Dedent, self.cursor.position()));
            }
            self.done = true;
            return self.make(TokenKind::Dedent, self.cursor.position());
        }
        self.done = true;
        self.make(TokenKind::Eof, self.cursor.position())
    }

    fn check_bom(&mut self) {
        if !self.bom_checked {
            self.bom_checked = true;
            if self.cursor.remaining().starts_with('\u{FEFF}') {
                self.cursor.advance();
            }
        }
    }

    /// Counts leading spaces on a fresh logical line and emits the
    /// appropriate `INDENT`/`DEDENT` tokens. Blank lines and comment-only
    /// lines are skipped without affecting the indent stack. A leading
    /// tab is a hard error (`E100`), but the line is still processed.
    fn handle_indentation(&mut self) {
        loop {
            let line_start = self.cursor.position();
            let line = self.cursor.line();
            let mut width = 0usize;
            let mut saw_tab = false;

            loop {
                match self.cursor.current_char() {
                    ' ' => {
                        width += 1;
                        self.cursor.advance();
                    }
                    '\t' => {
                        saw_tab = true;
                        self.cursor.advance();
                    }
                    _ => break,
                }
            }

            if saw_tab {
                let span = Span::new(line_start, self.cursor.position(), line, 1);
                DiagnosticBuilder::error("tabs are not allowed for indentation")
                    .code(DiagnosticCode::E100)
                    .span(span)
                    .emit(self.handler);
            }

            let c = self.cursor.current_char();
            if c == '\n' || self.cursor.is_at_end() {
                // Blank line: don't touch the indent stack, keep scanning.
                if self.cursor.is_at_end() {
                    return;
                }
                self.cursor.advance();
                continue;
            }
            if c == '/' && self.cursor.peek_char(1) == '/' && self.cursor.peek_char(2) != '/' {
                // Comment-only line: skip it, keep scanning for indentation.
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
                continue;
            }

            match self.indents.transition(width) {
                IndentTransition::Same => {}
                IndentTransition::Indent => {
                    self.pending.push(self.make(TokenKind::Indent, line_start));
                }
                IndentTransition::Dedent { count } => {
                    for _ in 0..count {
                        self.pending.push(self.make(TokenKind::Dedent, line_start));
                    }
                }
                IndentTransition::Mismatch { dedents } => {
                    let span = Span::new(line_start, self.cursor.position(), line, 1);
                    DiagnosticBuilder::error("indentation matches no enclosing level")
                        .code(DiagnosticCode::E100)
                        .span(span)
                        .emit(self.handler);
                    for _ in 0..dedents {
                        self.pending.push(self.make(TokenKind::Dedent, line_start));
                    }
                }
            }
            return;
        }
    }

    fn skip_spaces_and_comments(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' => {
                    self.cursor.advance();
                }
                '/' if self.cursor.peek_char(1) == '/' && self.cursor.peek_char(2) != '/' => {
                    while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                        self.cursor.advance();
                    }
                }
                _ => return,
            }
        }
    }

    /// A `/` starts a regex (or path) literal only when the previous
    /// token is not value-producing.
    fn should_start_regex_or_path(&self) -> bool {
        !self
            .prev_kind
            .as_ref()
            .map(|k| k.is_value_producing())
            .unwrap_or(false)
    }

    pub(crate) fn make(&self, kind: TokenKind, start: usize) -> Token {
        let span = Span::new(
            start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        Token::new(kind, span)
    }

    pub(crate) fn report_error(&mut self, message: String, code: DiagnosticCode) {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        DiagnosticBuilder::error(message)
            .code(code)
            .span(span)
            .emit(self.handler);
    }

    pub(crate) fn lex_operator_or_punct(&mut self) -> Token {
        let start = self.token_start;
        match self.cursor.current_char() {
            '(' => {
                self.cursor.advance();
                self.bracket_depth += 1;
                self.make(TokenKind::LParen, start)
            }
            ')' => {
                self.cursor.advance();
                self.bracket_depth = (self.bracket_depth - 1).max(0);
                self.make(TokenKind::RParen, start)
            }
            '[' => {
                self.cursor.advance();
                self.bracket_depth += 1;
                self.make(TokenKind::LBracket, start)
            }
            ']' => {
                self.cursor.advance();
                self.bracket_depth = (self.bracket_depth - 1).max(0);
                self.make(TokenKind::RBracket, start)
            }
            ',' => {
                self.cursor.advance();
                self.make(TokenKind::Comma, start)
            }
            '+' => {
                self.cursor.advance();
                self.make(TokenKind::Plus, start)
            }
            '-' => {
                self.cursor.advance();
                if self.cursor.match_char('>') {
                    self.make(TokenKind::Arrow, start)
                } else {
                    self.make(TokenKind::Minus, start)
                }
            }
            '*' => {
                self.cursor.advance();
                self.make(TokenKind::Star, start)
            }
            '/' => {
                self.cursor.advance();
                self.make(TokenKind::Slash, start)
            }
            '%' => {
                self.cursor.advance();
                self.make(TokenKind::Percent, start)
            }
            '=' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    self.make(TokenKind::EqEq, start)
                } else if self.cursor.match_char('>') {
                    self.make(TokenKind::FatArrow, start)
                } else {
                    self.make(TokenKind::Assign, start)
                }
            }
            '!' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    self.make(TokenKind::NotEq, start)
                } else {
                    self.make(TokenKind::Bang, start)
                }
            }
            '<' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    self.make(TokenKind::LtEq, start)
                } else {
                    self.make(TokenKind::Lt, start)
                }
            }
            '>' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    self.make(TokenKind::GtEq, start)
                } else {
                    self.make(TokenKind::Gt, start)
                }
            }
            '&' => {
                self.cursor.advance();
                if self.cursor.match_char('&') {
                    self.make(TokenKind::AndAnd, start)
                } else {
                    self.report_error(
                        "unexpected character '&'".to_string(),
                        DiagnosticCode::E103,
                    );
                    self.make(TokenKind::Invalid("&".to_string()), start)
                }
            }
            '|' => {
                self.cursor.advance();
                if self.cursor.match_char('|') {
                    self.make(TokenKind::OrOr, start)
                } else if self.cursor.match_char('>') {
                    self.make(TokenKind::PipeArrow, start)
                } else {
                    self.make(TokenKind::Pipe, start)
                }
            }
            ':' => {
                self.cursor.advance();
                self.make(TokenKind::Colon, start)
            }
            '.' => {
                self.cursor.advance();
                if self.cursor.match_char('.') {
                    self.make(TokenKind::DotDot, start)
                } else {
                    self.make(TokenKind::Dot, start)
                }
            }
            c => {
                self.cursor.advance();
                self.report_error(format!("unexpected character '{}'", c), DiagnosticCode::E103);
                self.make(TokenKind::Invalid(c.to_string()), start)
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}
