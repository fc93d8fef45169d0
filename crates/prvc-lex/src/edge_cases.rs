//! Edge case tests for prvc-lex, exercising indentation, newline
//! suppression, and literal disambiguation rather than plain token
//! shapes (those are covered in each `lexer/*` submodule).

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use crate::Lexer;
    use prvc_util::{Handler, Symbol};

    fn lex_all(source: &str) -> Vec<TokenKind> {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(source, &mut handler);
        lexer.tokenize().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(lex_all(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn indent_and_dedent_emitted() {
        let toks = lex_all("if x\n    y\nz");
        assert!(toks.contains(&TokenKind::Indent));
        assert!(toks.contains(&TokenKind::Dedent));
    }

    #[test]
    fn deeper_block_emits_two_dedents_at_once() {
        let toks = lex_all("if x\n    if y\n        z\nw");
        let dedents = toks.iter().filter(|t| **t == TokenKind::Dedent).count();
        assert_eq!(dedents, 2);
    }

    #[test]
    fn mismatched_indent_reports_error_but_continues() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new("if x\n    y\n  z", &mut handler);
        let _ = lexer.tokenize();
        assert!(handler.has_errors());
    }

    #[test]
    fn tabs_in_indentation_are_an_error() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new("if x\n\ty", &mut handler);
        let _ = lexer.tokenize();
        assert!(handler.has_errors());
    }

    #[test]
    fn trailing_newlines_close_all_open_blocks() {
        let toks = lex_all("if x\n    y\n\n\n");
        assert_eq!(toks.last(), Some(&TokenKind::Eof));
        assert_eq!(toks[toks.len() - 2], TokenKind::Dedent);
    }

    #[test]
    fn comment_only_lines_dont_affect_indentation() {
        let toks = lex_all("if x\n    // a comment\n    y\nz");
        let indents = toks.iter().filter(|t| **t == TokenKind::Indent).count();
        assert_eq!(indents, 1);
    }

    #[test]
    fn newline_suppressed_inside_parens() {
        let toks = lex_all("f(\n    1,\n    2\n)");
        assert!(!toks.contains(&TokenKind::Newline));
    }

    #[test]
    fn newline_suppressed_after_comma() {
        let toks = lex_all("a,\nb");
        assert!(!toks.contains(&TokenKind::Newline));
    }

    #[test]
    fn newline_suppressed_after_operator() {
        let toks = lex_all("a +\nb");
        assert!(!toks.contains(&TokenKind::Newline));
    }

    #[test]
    fn newline_kept_between_plain_statements() {
        let toks = lex_all("a\nb");
        assert!(toks.contains(&TokenKind::Newline));
    }

    #[test]
    fn slash_after_identifier_is_division() {
        let toks = lex_all("a / b");
        assert!(toks.contains(&TokenKind::Slash));
    }

    #[test]
    fn slash_after_operator_is_regex() {
        let toks = lex_all("= /abc/");
        assert!(toks.iter().any(|t| matches!(t, TokenKind::RegexLit(_))));
    }

    #[test]
    fn slash_path_vs_regex_disambiguation() {
        let toks = lex_all("= /usr/local/bin)");
        assert!(toks.iter().any(|t| matches!(t, TokenKind::PathLit(_))));
    }

    #[test]
    fn nested_string_interpolation() {
        let toks = lex_all(r#""{a}{b}""#);
        let starts = toks.iter().filter(|t| **t == TokenKind::InterpStart).count();
        assert_eq!(starts, 2);
    }

    #[test]
    fn doc_comments_survive_tokenization() {
        let toks = lex_all("/// explains x\nvalue");
        assert!(toks
            .iter()
            .any(|t| matches!(t, TokenKind::DocComment(s) if s.as_str() == "explains x")));
    }

    #[test]
    fn constant_type_and_value_identifiers_classify_distinctly() {
        let toks = lex_all("MAX_SIZE Account total");
        assert_eq!(toks[0], TokenKind::ConstIdent(Symbol::intern("MAX_SIZE")));
        assert_eq!(toks[1], TokenKind::TypeIdent(Symbol::intern("Account")));
        assert_eq!(toks[2], TokenKind::Ident(Symbol::intern("total")));
    }

    #[test]
    fn unterminated_string_reports_error() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new("\"unterminated", &mut handler);
        let _ = lexer.tokenize();
        assert!(handler.has_errors());
    }

    #[test]
    fn invalid_character_reports_error_and_recovers() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new("a & b", &mut handler);
        let _ = lexer.tokenize();
        assert!(handler.has_errors());
    }

    #[test]
    fn hex_binary_octal_bounds() {
        let toks = lex_all("0x0 0xFF 0b0 0b1010 0o0 0o77");
        assert_eq!(toks[0], TokenKind::IntegerLit(0));
        assert_eq!(toks[1], TokenKind::IntegerLit(255));
        assert_eq!(toks[2], TokenKind::IntegerLit(0));
        assert_eq!(toks[3], TokenKind::IntegerLit(10));
        assert_eq!(toks[4], TokenKind::IntegerLit(0));
        assert_eq!(toks[5], TokenKind::IntegerLit(63));
    }

    #[test]
    fn leading_zeros_are_still_decimal() {
        assert_eq!(lex_all("007")[0], TokenKind::IntegerLit(7));
    }
}
