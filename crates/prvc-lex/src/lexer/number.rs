//! Numeric literal lexing.
//!
//! Handles decimal, `0x`/`0b`/`0o`-prefixed integers, and decimal
//! literals with a fractional part. A bare trailing `.` (no digit after
//! the point) is not consumed as part of the number — the `.` is left
//! for the operator lexer to pick up (e.g. a following `.field` access).

use prvc_util::DiagnosticCode;

use crate::token::{Token, TokenKind};
use crate::unicode::is_digit_in_base;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a numeric literal.
    pub fn lex_number(&mut self) -> Token {
        let start = self.token_start;

        if self.cursor.current_char() == '0' {
            match self.cursor.peek_char(1) {
                'x' | 'X' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    return self.lex_prefixed_integer(16, start);
                }
                'b' | 'B' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    return self.lex_prefixed_integer(2, start);
                }
                'o' | 'O' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    return self.lex_prefixed_integer(8, start);
                }
                _ => {}
            }
        }

        while self.cursor.current_char().is_ascii_digit() || self.cursor.current_char() == '_' {
            self.cursor.advance();
        }

        let is_decimal =
            self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit();

        if !is_decimal {
            let text = self.cursor.slice_from(start).replace('_', "");
            return match text.parse::<i64>() {
                Ok(value) => self.make(TokenKind::IntegerLit(value), start),
                Err(e) => {
                    self.report_error(
                        format!("integer literal '{}' out of range: {}", text, e),
                        DiagnosticCode::E102,
                    );
                    self.make(TokenKind::IntegerLit(0), start)
                }
            };
        }

        self.cursor.advance(); // consume '.'
        while self.cursor.current_char().is_ascii_digit() || self.cursor.current_char() == '_' {
            self.cursor.advance();
        }

        if self.cursor.current_char() == 'e' || self.cursor.current_char() == 'E' {
            self.cursor.advance();
            if self.cursor.current_char() == '+' || self.cursor.current_char() == '-' {
                self.cursor.advance();
            }
            let exp_start = self.cursor.position();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            if exp_start == self.cursor.position() {
                self.report_error(
                    "no digits in decimal exponent".to_string(),
                    DiagnosticCode::E102,
                );
            }
        }

        let text = self.cursor.slice_from(start).replace('_', "");
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => self.make(TokenKind::DecimalLit(value), start),
            _ => {
                self.report_error(
                    format!("invalid decimal literal '{}'", text),
                    DiagnosticCode::E102,
                );
                self.make(TokenKind::DecimalLit(0.0), start)
            }
        }
    }

    /// Lexes an integer literal after a `0x`/`0b`/`0o` prefix has already
    /// been consumed. `start` is the position of the leading `0`.
    fn lex_prefixed_integer(&mut self, base: u32, start: usize) -> Token {
        let digits_start = self.cursor.position();
        loop {
            let c = self.cursor.current_char();
            if c == '_' || is_digit_in_base(c, base) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        if digits_start == self.cursor.position() {
            self.report_error(
                format!("no digits after base-{} prefix", base),
                DiagnosticCode::E102,
            );
            return self.make(TokenKind::IntegerLit(0), start);
        }

        let digits = self.cursor.slice_from(digits_start).replace('_', "");
        match i64::from_str_radix(&digits, base) {
            Ok(value) => self.make(TokenKind::IntegerLit(value), start),
            Err(e) => {
                self.report_error(
                    format!("integer literal out of range: {}", e),
                    DiagnosticCode::E102,
                );
                self.make(TokenKind::IntegerLit(0), start)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_util::Handler;

    fn lex_num(source: &str) -> TokenKind {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.lex_number().kind
    }

    #[test]
    fn decimal_integer() {
        assert_eq!(lex_num("42"), TokenKind::IntegerLit(42));
        assert_eq!(lex_num("1_000"), TokenKind::IntegerLit(1000));
    }

    #[test]
    fn hex_integer() {
        assert_eq!(lex_num("0xFF"), TokenKind::IntegerLit(0xFF));
        assert_eq!(lex_num("0xAB_CD"), TokenKind::IntegerLit(0xABCD));
    }

    #[test]
    fn binary_integer() {
        assert_eq!(lex_num("0b1010"), TokenKind::IntegerLit(0b1010));
    }

    #[test]
    fn octal_integer() {
        assert_eq!(lex_num("0o77"), TokenKind::IntegerLit(0o77));
    }

    #[test]
    fn decimal_with_fraction() {
        assert!(matches!(lex_num("3.14"), TokenKind::DecimalLit(f) if (f - 3.14).abs() < 0.001));
    }

    #[test]
    fn decimal_with_exponent() {
        assert!(matches!(lex_num("2.5e-3"), TokenKind::DecimalLit(f) if (f - 2.5e-3).abs() < 1e-6));
    }

    #[test]
    fn bare_trailing_dot_is_not_consumed() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("5.", &mut handler);
        assert_eq!(lexer.lex_number().kind, TokenKind::IntegerLit(5));
        assert_eq!(lexer.cursor.current_char(), '.');
    }
}
