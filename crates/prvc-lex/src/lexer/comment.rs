//! Doc comment lexing.
//!
//! Prove has no block comments — only `//` line comments (skipped
//! entirely, handled in `core`) and `///` doc comments, which are
//! retained as tokens and attached to the declaration that follows.

use prvc_util::Symbol;

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a `///` doc comment, returning its text (without the `///`
    /// marker or a single leading space) as a `DocComment` token.
    pub fn lex_doc_comment(&mut self) -> Token {
        let start = self.token_start;
        self.cursor.advance();
        self.cursor.advance();
        self.cursor.advance();
        if self.cursor.current_char() == ' ' {
            self.cursor.advance();
        }

        let text_start = self.cursor.position();
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(text_start);

        self.make(TokenKind::DocComment(Symbol::intern(text)), start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_util::Handler;

    #[test]
    fn doc_comment_strips_marker_and_leading_space() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("/// does a thing\n", &mut handler);
        let token = lexer.next_token();
        assert_eq!(
            token.kind,
            TokenKind::DocComment(Symbol::intern("does a thing"))
        );
    }

    #[test]
    fn line_comment_is_skipped_entirely() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("// not a doc comment\nvalue", &mut handler);
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Ident(Symbol::intern("value")));
    }
}
