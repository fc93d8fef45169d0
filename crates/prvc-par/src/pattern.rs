//! Pattern parsing: wildcard, binding, literal, and variant patterns.

use prvc_lex::TokenKind;

use crate::ast::{Literal, Pattern};
use crate::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_pattern(&mut self) -> Option<Pattern> {
        let span = self.current_span();
        match self.current_kind().clone() {
            TokenKind::Ident(s) if s.eq_str("_") => {
                self.advance();
                Some(Pattern::Wildcard(span))
            }
            TokenKind::Ident(s) => {
                self.advance();
                Some(Pattern::Binding(s, span))
            }
            TokenKind::IntegerLit(n) => {
                self.advance();
                Some(Pattern::Literal(Literal::Integer(n), span))
            }
            TokenKind::DecimalLit(n) => {
                self.advance();
                Some(Pattern::Literal(Literal::Decimal(n), span))
            }
            TokenKind::StringLit(s) => {
                self.advance();
                Some(Pattern::Literal(Literal::String(s), span))
            }
            TokenKind::CharLit(c) => {
                self.advance();
                Some(Pattern::Literal(Literal::Char(c), span))
            }
            TokenKind::BooleanLit(b) => {
                self.advance();
                Some(Pattern::Literal(Literal::Bool(b), span))
            }
            TokenKind::TypeIdent(name) => {
                self.advance();
                if self.check(&TokenKind::LParen) {
                    self.advance();
                    let mut subpatterns = Vec::new();
                    if !self.check(&TokenKind::RParen) {
                        loop {
                            subpatterns.push(self.parse_pattern()?);
                            if self.match_kind(&TokenKind::Comma) {
                                continue;
                            }
                            break;
                        }
                    }
                    self.expect_kind(&TokenKind::RParen, "expected `)` to close variant pattern")?;
                    let full_span = span.merge(self.prev_span());
                    Some(Pattern::Variant(name, subpatterns, full_span))
                } else {
                    Some(Pattern::Variant(name, Vec::new(), span))
                }
            }
            _ => {
                self.error("expected a pattern".to_string());
                None
            }
        }
    }
}
