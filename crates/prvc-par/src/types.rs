//! Type expression parsing: simple names, generic instantiation, and
//! modifier lists (`Type(arg, name: arg)`).

use prvc_lex::TokenKind;
use prvc_util::Symbol;

use crate::ast::{Modifier, TypeExpr};
use crate::Parser;

impl<'a> Parser<'a> {
    /// `Name` | `Name<Arg, Arg>` | `Name(arg, name: arg)`
    pub(crate) fn parse_type_expr(&mut self) -> Option<TypeExpr> {
        let start = self.current_span();
        let name = self.expect_type_name()?;

        if self.check(&TokenKind::Lt) {
            self.advance();
            let mut args = Vec::new();
            if !self.check(&TokenKind::Gt) {
                loop {
                    args.push(self.parse_type_expr()?);
                    if self.match_kind(&TokenKind::Comma) {
                        continue;
                    }
                    break;
                }
            }
            self.expect_kind(&TokenKind::Gt, "expected `>` to close generic arguments")?;
            let span = start.merge(self.prev_span());
            return Some(TypeExpr::Generic(name, args, span));
        }

        if self.check(&TokenKind::LParen) {
            self.advance();
            let mut mods = Vec::new();
            if !self.check(&TokenKind::RParen) {
                loop {
                    mods.push(self.parse_modifier()?);
                    if self.match_kind(&TokenKind::Comma) {
                        continue;
                    }
                    break;
                }
            }
            self.expect_kind(&TokenKind::RParen, "expected `)` to close type modifiers")?;
            let span = start.merge(self.prev_span());
            return Some(TypeExpr::Modified(name, mods, span));
        }

        Some(TypeExpr::Simple(name, start))
    }

    fn parse_modifier(&mut self) -> Option<Modifier> {
        // `name: value` or a bare positional modifier value.
        if let TokenKind::Ident(_) = self.current_kind() {
            let save = self.position;
            let first = self.expect_ident_name()?;
            if self.match_kind(&TokenKind::Colon) {
                let value = self.expect_modifier_value()?;
                return Some(Modifier::Named(first, value));
            }
            self.position = save;
        }
        let value = self.expect_modifier_value()?;
        Some(Modifier::Positional(value))
    }

    /// Modifier values are identifiers or integer literals; this covers
    /// every modifier used in practice (sizes, bounds, named parameters
    /// referencing constants).
    fn expect_modifier_value(&mut self) -> Option<Symbol> {
        match self.current_kind().clone() {
            TokenKind::Ident(s) | TokenKind::TypeIdent(s) | TokenKind::ConstIdent(s) => {
                self.advance();
                Some(s)
            }
            TokenKind::IntegerLit(n) => {
                self.advance();
                Some(Symbol::intern(&n.to_string()))
            }
            _ => {
                self.error("expected a type modifier value".to_string());
                None
            }
        }
    }

    pub(crate) fn expect_type_name(&mut self) -> Option<Symbol> {
        match self.current_kind().clone() {
            TokenKind::TypeIdent(s) => {
                self.advance();
                Some(s)
            }
            _ => {
                self.error("expected a type name".to_string());
                None
            }
        }
    }

    /// Looks ahead from the current position to decide whether a `type`
    /// declaration is a refinement (`where` appears before the defining
    /// `(`, `|`, or a newline) or an ordinary algebraic/record type.
    pub(crate) fn peek_is_refinement(&self) -> bool {
        let mut i = self.position;
        loop {
            match self.tokens.get(i).map(|t| &t.kind) {
                Some(TokenKind::Where) => return true,
                Some(TokenKind::LParen)
                | Some(TokenKind::Pipe)
                | Some(TokenKind::Newline)
                | Some(TokenKind::Eof)
                | None => return false,
                _ => i += 1,
            }
        }
    }
}
