//! String, character, raw-string, and interpolation lexing.
//!
//! A plain `"…"` string is split into `StringLit` segments around any
//! `{expr}` interpolations, with `INTERP_START`/`INTERP_END` wrapping an
//! independently lexed sub-region. Triple-quoted strings scan through
//! lines and have no interpolation. Raw strings (`r"…"`) take no escapes.

use prvc_util::{DiagnosticCode, Symbol};

use crate::token::{Token, TokenKind};
use crate::unicode::is_ident_start;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a plain `"…"` string literal. Recognized escapes: `\n \r \t
    /// \\ \" \{ \} \0`; an unknown escape is reported but lexing
    /// continues, keeping the literal backslash and following character.
    pub fn lex_string(&mut self) -> Token {
        let start = self.token_start;
        self.cursor.advance(); // opening '"'

        let mut out: Vec<Token> = Vec::new();
        let mut text = String::new();

        loop {
            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    out.push(self.make(TokenKind::StringLit(Symbol::intern(&text)), start));
                    break;
                }
                '\n' => {
                    self.report_error(
                        "unterminated string literal".to_string(),
                        DiagnosticCode::E101,
                    );
                    out.push(self.make(TokenKind::StringLit(Symbol::intern(&text)), start));
                    break;
                }
                _ if self.cursor.is_at_end() => {
                    self.report_error(
                        "unterminated string literal".to_string(),
                        DiagnosticCode::E101,
                    );
                    out.push(self.make(TokenKind::StringLit(Symbol::intern(&text)), start));
                    break;
                }
                '\\' => {
                    self.cursor.advance();
                    self.push_escape(&mut text);
                }
                '{' if self.cursor.peek_char(1) == '{' => {
                    text.push('{');
                    self.cursor.advance();
                    self.cursor.advance();
                }
                '}' if self.cursor.peek_char(1) == '}' => {
                    text.push('}');
                    self.cursor.advance();
                    self.cursor.advance();
                }
                '{' => {
                    out.push(self.make(TokenKind::StringLit(Symbol::intern(&text)), start));
                    text.clear();
                    let brace_pos = self.cursor.position();
                    self.cursor.advance(); // consume '{'
                    out.push(self.make(TokenKind::InterpStart, brace_pos));
                    out.extend(self.lex_interpolation_tokens());
                    let end_pos = self.cursor.position();
                    out.push(self.make(TokenKind::InterpEnd, end_pos));
                }
                c => {
                    text.push(c);
                    self.cursor.advance();
                }
            }
        }

        let mut iter = out.into_iter();
        let first = iter
            .next()
            .unwrap_or_else(|| self.make(TokenKind::StringLit(Symbol::intern("")), start));
        for tok in iter.rev() {
            self.pending.push(tok);
        }
        first
    }

    /// Lexes the tokens of a `{expr}` interpolation, stopping at the
    /// matching `}`. Indentation and newline suppression don't apply
    /// inside an interpolation; whitespace is simply skipped.
    fn lex_interpolation_tokens(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut depth = 0i32;

        loop {
            while !self.cursor.is_at_end() && self.cursor.current_char().is_whitespace() {
                self.cursor.advance();
            }
            if self.cursor.is_at_end() {
                self.report_error(
                    "unterminated string interpolation".to_string(),
                    DiagnosticCode::E101,
                );
                return tokens;
            }
            if self.cursor.current_char() == '}' && depth == 0 {
                self.cursor.advance();
                return tokens;
            }

            self.token_start = self.cursor.position();
            self.token_start_line = self.cursor.line();
            self.token_start_column = self.cursor.column();

            let c = self.cursor.current_char();
            let token = if c == '{' {
                depth += 1;
                self.cursor.advance();
                self.make(TokenKind::Invalid("{".to_string()), self.token_start)
            } else if c == '}' {
                depth -= 1;
                self.cursor.advance();
                self.make(TokenKind::Invalid("}".to_string()), self.token_start)
            } else if c == '"' && self.cursor.peek_char(1) == '"' && self.cursor.peek_char(2) == '"' {
                self.lex_triple_string()
            } else if c == '"' {
                self.lex_string()
            } else if c == '\'' {
                self.lex_char()
            } else if c == 'r' && self.cursor.peek_char(1) == '"' {
                self.lex_raw_string()
            } else if c.is_ascii_digit() {
                self.lex_number()
            } else if is_ident_start(c) {
                self.lex_identifier()
            } else {
                self.lex_operator_or_punct()
            };
            tokens.push(token);
        }
    }

    /// Lexes a `"""…"""` triple-quoted string, scanning through line
    /// breaks. No interpolation inside triple strings.
    pub fn lex_triple_string(&mut self) -> Token {
        let start = self.token_start;
        self.cursor.advance();
        self.cursor.advance();
        self.cursor.advance();

        let mut text = String::new();
        loop {
            if self.cursor.is_at_end() {
                self.report_error(
                    "unterminated triple-quoted string".to_string(),
                    DiagnosticCode::E101,
                );
                break;
            }
            if self.cursor.current_char() == '"'
                && self.cursor.peek_char(1) == '"'
                && self.cursor.peek_char(2) == '"'
            {
                self.cursor.advance();
                self.cursor.advance();
                self.cursor.advance();
                break;
            }
            if self.cursor.current_char() == '\\' {
                self.cursor.advance();
                self.push_escape(&mut text);
                continue;
            }
            text.push(self.cursor.current_char());
            self.cursor.advance();
        }

        self.make(TokenKind::TripleStringLit(Symbol::intern(&text)), start)
    }

    /// Lexes a raw string `r"…"`. No escape processing at all.
    pub fn lex_raw_string(&mut self) -> Token {
        let start = self.token_start;
        self.cursor.advance(); // 'r'
        self.cursor.advance(); // '"'
        let text_start = self.cursor.position();

        while !self.cursor.is_at_end()
            && self.cursor.current_char() != '"'
            && self.cursor.current_char() != '\n'
        {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(text_start).to_string();

        if self.cursor.current_char() == '"' {
            self.cursor.advance();
        } else {
            self.report_error(
                "unterminated raw string literal".to_string(),
                DiagnosticCode::E101,
            );
        }

        self.make(TokenKind::RawStringLit(Symbol::intern(&text)), start)
    }

    /// Lexes a single-quoted character literal.
    pub fn lex_char(&mut self) -> Token {
        let start = self.token_start;
        self.cursor.advance(); // opening '\''

        let value = if self.cursor.current_char() == '\\' {
            self.cursor.advance();
            let mut buf = String::new();
            self.push_escape(&mut buf);
            buf.chars().next().unwrap_or('\0')
        } else {
            let c = self.cursor.current_char();
            self.cursor.advance();
            c
        };

        if self.cursor.current_char() == '\'' {
            self.cursor.advance();
        } else {
            self.report_error(
                "unterminated character literal".to_string(),
                DiagnosticCode::E101,
            );
        }

        self.make(TokenKind::CharLit(value), start)
    }

    /// Consumes one escape sequence (the backslash has already been
    /// consumed) and appends its decoded form to `text`.
    fn push_escape(&mut self, text: &mut String) {
        let c = self.cursor.current_char();
        match c {
            'n' => {
                text.push('\n');
                self.cursor.advance();
            }
            'r' => {
                text.push('\r');
                self.cursor.advance();
            }
            't' => {
                text.push('\t');
                self.cursor.advance();
            }
            '\\' => {
                text.push('\\');
                self.cursor.advance();
            }
            '"' => {
                text.push('"');
                self.cursor.advance();
            }
            '\'' => {
                text.push('\'');
                self.cursor.advance();
            }
            '{' => {
                text.push('{');
                self.cursor.advance();
            }
            '}' => {
                text.push('}');
                self.cursor.advance();
            }
            '0' => {
                text.push('\0');
                self.cursor.advance();
            }
            _ => {
                self.report_error(
                    format!("unknown escape sequence '\\{}'", c),
                    DiagnosticCode::E101,
                );
                text.push('\\');
                if !self.cursor.is_at_end() {
                    text.push(c);
                    self.cursor.advance();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_util::Handler;

    fn lex_str(source: &str) -> TokenKind {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.lex_string().kind
    }

    #[test]
    fn plain_string() {
        assert_eq!(lex_str(r#""hello""#), TokenKind::StringLit(Symbol::intern("hello")));
    }

    #[test]
    fn string_with_escapes() {
        assert_eq!(
            lex_str(r#""a\nb\t\"c\"""#),
            TokenKind::StringLit(Symbol::intern("a\nb\t\"c\""))
        );
    }

    #[test]
    fn string_with_interpolation_splits_into_segments() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(r#""hi {name}!""#, &mut handler);
        let tokens: Vec<TokenKind> = std::iter::from_fn(|| {
            let t = lexer.next_token();
            if t.is_eof() {
                None
            } else {
                Some(t.kind)
            }
        })
        .collect();
        assert_eq!(
            tokens,
            vec![
                TokenKind::StringLit(Symbol::intern("hi ")),
                TokenKind::InterpStart,
                TokenKind::Ident(Symbol::intern("name")),
                TokenKind::InterpEnd,
                TokenKind::StringLit(Symbol::intern("!")),
            ]
        );
    }

    #[test]
    fn triple_quoted_string_spans_lines() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("\"\"\"line one\nline two\"\"\"", &mut handler);
        assert_eq!(
            lexer.lex_triple_string().kind,
            TokenKind::TripleStringLit(Symbol::intern("line one\nline two"))
        );
    }

    #[test]
    fn raw_string_ignores_escapes() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(r#"r"a\nb""#, &mut handler);
        assert_eq!(
            lexer.lex_raw_string().kind,
            TokenKind::RawStringLit(Symbol::intern("a\\nb"))
        );
    }

    #[test]
    fn char_literal() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("'a'", &mut handler);
        assert_eq!(lexer.lex_char().kind, TokenKind::CharLit('a'));
    }

    #[test]
    fn char_literal_with_escape() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(r"'\n'", &mut handler);
        assert_eq!(lexer.lex_char().kind, TokenKind::CharLit('\n'));
    }
}
