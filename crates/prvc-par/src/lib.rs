//! prvc-par - recursive-descent / Pratt parser for the Prove compiler.
//!
//! Consumes the token stream produced by `prvc-lex` and builds the AST
//! defined in [`ast`]. Parsing mixes three styles depending on what's
//! being parsed:
//!
//! - top-level declarations and statements: ordinary recursive descent
//! - statement and match-arm bodies: indentation-driven block parsing,
//!   following the lexer's `INDENT`/`DEDENT` tokens rather than braces
//! - expressions: a Pratt parser over the binding-power table in
//!   [`expr::bp`]
//!
//! Errors are recorded on the `Handler` and parsing recovers at the
//! next statement or declaration boundary rather than aborting, so a
//! single pass reports every syntax error it can find.

pub mod ast;
#[cfg(test)]
mod edge_cases;
mod expr;
mod items;
mod pattern;
mod stmt;
mod types;

use prvc_lex::{Token, TokenKind};
use prvc_util::{Handler, Span, Symbol};

pub use ast::Module;

/// Recursive-descent / Pratt parser over a token stream.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    prev_index: usize,
    handler: &'a Handler,
    source: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a Handler, source: &'a str) -> Self {
        Self {
            tokens,
            position: 0,
            prev_index: 0,
            handler,
            source,
        }
    }

    /// Parses a full source file into a [`Module`].
    pub fn parse(&mut self) -> Module {
        let start = self.current_span();
        let mut decls = Vec::new();
        self.skip_newlines();
        while !self.is_at_end() {
            match self.parse_decl() {
                Some(decl) => decls.push(decl),
                None => self.recover_to_sync_point(),
            }
            self.skip_newlines();
        }
        let span = if decls.is_empty() {
            start
        } else {
            start.merge(decls.last().unwrap().span())
        };
        Module { decls, span }
    }

    // ── Token access ───────────────────────────────────────────────

    pub(crate) fn current_kind(&self) -> &TokenKind {
        &self.tokens[self.clamped_position()].kind
    }

    pub(crate) fn current_span(&self) -> Span {
        self.tokens[self.clamped_position()].span
    }

    pub(crate) fn prev_span(&self) -> Span {
        self.tokens[self.prev_index].span
    }

    fn clamped_position(&self) -> usize {
        self.position.min(self.tokens.len() - 1)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    pub(crate) fn advance(&mut self) {
        if !self.is_at_end() {
            self.prev_index = self.clamped_position();
            self.position += 1;
        }
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub(crate) fn match_kind(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_kind(&mut self, kind: &TokenKind, message: &str) -> Option<()> {
        if self.match_kind(kind) {
            Some(())
        } else {
            self.error(message.to_string());
            None
        }
    }

    /// Skips zero or more `NEWLINE` tokens, used between declarations,
    /// around block delimiters, and wherever a construct may be followed
    /// by blank logical lines.
    pub(crate) fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    pub(crate) fn expect_ident_name(&mut self) -> Option<Symbol> {
        match self.current_kind().clone() {
            TokenKind::Ident(s) => {
                self.advance();
                Some(s)
            }
            _ => {
                self.error("expected an identifier".to_string());
                None
            }
        }
    }

    pub(crate) fn expect_const_name(&mut self) -> Option<Symbol> {
        match self.current_kind().clone() {
            TokenKind::ConstIdent(s) => {
                self.advance();
                Some(s)
            }
            _ => {
                self.error("expected a constant name".to_string());
                None
            }
        }
    }

    /// Accepts any identifier class as a name; used for module/import
    /// paths where casing isn't semantically constrained by the grammar.
    pub(crate) fn expect_ident_or_type_name(&mut self) -> Option<Symbol> {
        match self.current_kind().clone() {
            TokenKind::Ident(s) | TokenKind::TypeIdent(s) | TokenKind::ConstIdent(s) => {
                self.advance();
                Some(s)
            }
            _ => {
                self.error("expected a name".to_string());
                None
            }
        }
    }

    pub(crate) fn expect_string_text(&mut self) -> Option<Symbol> {
        match self.current_kind().clone() {
            TokenKind::StringLit(s) => {
                self.advance();
                Some(s)
            }
            _ => {
                self.error("expected a string literal".to_string());
                None
            }
        }
    }

    /// Slices the original source text spanned by `span`, trimmed. Used
    /// for free-text proof obligations and dotted import paths, which
    /// aren't independently tokenized constructs.
    pub(crate) fn source_text(&self, span: Span) -> Symbol {
        let text = self.source.get(span.start..span.end).unwrap_or("").trim();
        Symbol::intern(text)
    }

    pub(crate) fn error(&mut self, message: String) {
        let span = self.current_span();
        self.handler.build_error(span, message).emit(self.handler);
    }

    /// Recovers from a parse error by advancing to the next top-level
    /// synchronization point: a `NEWLINE` at the start of a declaration,
    /// or a `DEDENT`/`EOF`. Keeps a single bad token from cascading into
    /// unrelated diagnostics for the rest of the file.
    pub(crate) fn recover_to_sync_point(&mut self) {
        while !self.is_at_end() {
            match self.current_kind() {
                TokenKind::Newline | TokenKind::Dedent => {
                    self.advance();
                    return;
                }
                _ => self.advance(),
            }
        }
    }
}
