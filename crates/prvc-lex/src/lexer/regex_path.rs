//! Regex and path literal lexing.
//!
//! Both start with a `/` once `should_start_regex_or_path` has decided
//! the previous token isn't value-producing. A path literal is
//! distinguished from a regex by a lookahead: if an identifier-start
//! character immediately follows the `/`, and the region ahead has no
//! backslash escapes and reaches a terminator before any closing `/`,
//! it's a path; otherwise it's a regex bounded by `/…/`.

use prvc_util::{DiagnosticCode, Symbol};

use crate::token::Token;
use crate::token::TokenKind;
use crate::unicode::is_ident_start;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Looks ahead (without consuming) to decide whether the `/` at the
    /// cursor starts a path literal rather than a regex literal.
    pub(crate) fn is_path_literal(&self) -> bool {
        if !is_ident_start(self.cursor.peek_char(1)) {
            return false;
        }

        let mut i = 1;
        loop {
            match self.cursor.peek_char(i) {
                '\\' => return false,
                '/' => return false,
                '\0' => return true,
                '\n' | ' ' | '\t' | ',' | ')' | ']' => return true,
                _ => i += 1,
            }
        }
    }

    /// Lexes a path literal: everything from after the leading `/` up to
    /// the next terminator (whitespace, `,`, `)`, `]`, or end of input).
    pub fn lex_path(&mut self) -> Token {
        let start = self.token_start;
        self.cursor.advance(); // leading '/'
        let text_start = self.cursor.position();

        loop {
            if self.cursor.is_at_end() {
                break;
            }
            match self.cursor.current_char() {
                '\n' | ' ' | '\t' | ',' | ')' | ']' => break,
                _ => self.cursor.advance(),
            }
        }

        let text = self.cursor.slice_from(text_start);
        self.make(TokenKind::PathLit(Symbol::intern(text)), start)
    }

    /// Lexes a regex literal bounded by `/…/`. Backslash escapes inside
    /// are kept verbatim in the literal text.
    pub fn lex_regex(&mut self) -> Token {
        let start = self.token_start;
        self.cursor.advance(); // leading '/'
        let text_start = self.cursor.position();

        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                self.report_error(
                    "unterminated regex literal".to_string(),
                    DiagnosticCode::E101,
                );
                break;
            }
            if self.cursor.current_char() == '/' {
                break;
            }
            if self.cursor.current_char() == '\\' {
                self.cursor.advance();
                if !self.cursor.is_at_end() {
                    self.cursor.advance();
                }
                continue;
            }
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(text_start).to_string();
        if self.cursor.current_char() == '/' {
            self.cursor.advance();
        }

        self.make(TokenKind::RegexLit(Symbol::intern(&text)), start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_util::Handler;

    #[test]
    fn regex_literal_after_operator() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(r"/[a-z]+/", &mut handler);
        assert_eq!(
            lexer.lex_regex().kind,
            TokenKind::RegexLit(Symbol::intern("[a-z]+"))
        );
    }

    #[test]
    fn path_literal_detected_before_terminator() {
        let mut handler = Handler::new();
        let lexer = crate::Lexer::new("/usr/local/bin)", &mut handler);
        assert!(lexer.is_path_literal());
    }

    #[test]
    fn division_is_not_a_path_or_regex() {
        let mut handler = Handler::new();
        let lexer = crate::Lexer::new("/ 2", &mut handler);
        assert!(!lexer.is_path_literal());
    }

    #[test]
    fn lex_path_stops_at_terminator() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("/usr/local/bin)", &mut handler);
        assert_eq!(
            lexer.lex_path().kind,
            TokenKind::PathLit(Symbol::intern("usr/local/bin"))
        );
    }
}
