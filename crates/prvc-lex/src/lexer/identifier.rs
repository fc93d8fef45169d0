//! Identifier and keyword lexing.

use prvc_util::Symbol;

use crate::token::{classify_ident, keyword_from_ident, IdentClass, Token, TokenKind};
use crate::unicode::is_ident_continue;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// After consuming the identifier, reserved words map to their
    /// keyword kind; everything else is classified by casing into a
    /// value, type, or constant identifier.
    pub fn lex_identifier(&mut self) -> Token {
        let start = self.token_start;
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start);

        if let Some(kind) = keyword_from_ident(text) {
            return self.make(kind, start);
        }

        let kind = match classify_ident(text) {
            IdentClass::Value => TokenKind::Ident(Symbol::intern(text)),
            IdentClass::Type => TokenKind::TypeIdent(Symbol::intern(text)),
            IdentClass::Constant => TokenKind::ConstIdent(Symbol::intern(text)),
        };
        self.make(kind, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_util::Handler;

    fn lex_ident(source: &str) -> TokenKind {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.lex_identifier().kind
    }

    #[test]
    fn value_identifier() {
        assert_eq!(lex_ident("total_count"), TokenKind::Ident(Symbol::intern("total_count")));
    }

    #[test]
    fn type_identifier() {
        assert_eq!(lex_ident("Account"), TokenKind::TypeIdent(Symbol::intern("Account")));
    }

    #[test]
    fn constant_identifier() {
        assert_eq!(lex_ident("MAX_RETRIES"), TokenKind::ConstIdent(Symbol::intern("MAX_RETRIES")));
    }

    #[test]
    fn verb_keyword() {
        assert_eq!(lex_ident("transforms"), TokenKind::Transforms);
    }

    #[test]
    fn contract_keyword() {
        assert_eq!(lex_ident("ensures"), TokenKind::Ensures);
    }

    #[test]
    fn boolean_literal() {
        assert_eq!(lex_ident("true"), TokenKind::BooleanLit(true));
        assert_eq!(lex_ident("false"), TokenKind::BooleanLit(false));
    }

    #[test]
    fn builtin_type_name_is_a_type_identifier_not_a_keyword() {
        assert_eq!(lex_ident("Integer"), TokenKind::TypeIdent(Symbol::intern("Integer")));
    }
}
