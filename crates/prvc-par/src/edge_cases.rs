//! Edge case tests for prvc-par, covering the constructs that don't fit
//! neatly into `expr.rs`/`stmt.rs`/`items.rs`'s per-module tests:
//! implicit match, error recovery, and the refinement/record/algebraic
//! type disambiguation.

#[cfg(test)]
mod tests {
    use crate::ast::{Decl, Expr, TypeBody};
    use crate::{Module, Parser};
    use prvc_lex::Lexer;
    use prvc_util::Handler;

    fn parse_source(source: &str) -> (Module, Handler) {
        let mut handler = Handler::new();
        let tokens = Lexer::new(source, &mut handler).tokenize();
        let module = Parser::new(tokens, &handler, source).parse();
        (module, handler)
    }

    #[test]
    fn empty_source_is_an_empty_module() {
        let (module, handler) = parse_source("");
        assert!(module.decls.is_empty());
        assert!(!handler.has_errors());
    }

    #[test]
    fn whitespace_only_source_is_an_empty_module() {
        let (module, handler) = parse_source("   \n\t  \n  ");
        assert!(module.decls.is_empty());
        assert!(!handler.has_errors());
    }

    #[test]
    fn blank_lines_between_declarations_are_ignored() {
        let (module, handler) = parse_source(
            "const A = 1\n\n\nconst B = 2\n",
        );
        assert_eq!(module.decls.len(), 2);
        assert!(!handler.has_errors());
    }

    #[test]
    fn doc_comment_is_attached_to_the_following_function() {
        let (module, handler) = parse_source(
            "/// Doubles a number.\ntransforms double(x Integer) Integer\nfrom\n    x * 2\n",
        );
        assert!(!handler.has_errors());
        match &module.decls[0] {
            Decl::Fn(f) => assert_eq!(f.doc.map(|s| s.as_str()), Some("Doubles a number.")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn implicit_match_function_body() {
        let (module, handler) = parse_source(
            "transforms classify(n Integer) Sign\nfrom\n    0 => Zero\n    _ => Nonzero\n",
        );
        assert!(!handler.has_errors());
        match &module.decls[0] {
            Decl::Fn(f) => match f.body.trailing.as_deref() {
                Some(Expr::Match(m)) => {
                    assert!(m.subject.is_none());
                    assert_eq!(m.arms.len(), 2);
                }
                other => panic!("unexpected: {other:?}"),
            },
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn explicit_match_with_subject_is_not_rewritten() {
        let (module, handler) = parse_source(
            "transforms classify(n Integer) Sign\nfrom\n    match n\n        0 => Zero\n        _ => Nonzero\n",
        );
        assert!(!handler.has_errors());
        match &module.decls[0] {
            Decl::Fn(f) => match f.body.trailing.as_deref() {
                Some(Expr::Match(m)) => assert!(m.subject.is_some()),
                other => panic!("unexpected: {other:?}"),
            },
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn refinement_disambiguated_from_algebraic_by_where() {
        let (module, handler) = parse_source("type Age = Integer where result >= 0\n");
        assert!(!handler.has_errors());
        match &module.decls[0] {
            Decl::Type(t) => assert!(matches!(t.body, TypeBody::Refinement(_, _))),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn algebraic_type_with_multiple_unit_variants() {
        let (module, handler) = parse_source("type Sign = Zero | Positive | Negative\n");
        assert!(!handler.has_errors());
        match &module.decls[0] {
            Decl::Type(t) => match &t.body {
                TypeBody::Algebraic(variants) => assert_eq!(variants.len(), 3),
                other => panic!("unexpected: {other:?}"),
            },
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn bad_token_in_one_declaration_does_not_cascade() {
        let (module, handler) = parse_source("const = 1\nconst B = 2\n");
        assert!(handler.has_errors());
        assert!(module.decls.iter().any(|d| matches!(d, Decl::Const(c) if c.name.as_str() == "B")));
    }

    #[test]
    fn nested_module_declaration() {
        let (module, handler) = parse_source("module shapes\n    const PI = 3\n");
        assert!(!handler.has_errors());
        match &module.decls[0] {
            Decl::Module(m) => assert_eq!(m.decls.len(), 1),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn pipe_chain_through_several_stages() {
        let (module, handler) = parse_source(
            "transforms process(x Integer) Integer\nfrom\n    x |> double |> increment\n",
        );
        assert!(!handler.has_errors());
        match &module.decls[0] {
            Decl::Fn(f) => match f.body.trailing.as_deref() {
                Some(Expr::Pipe(outer)) => matches!(*outer.value, Expr::Pipe(_)),
                other => panic!("unexpected: {other:?}"),
            },
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn nested_if_else_if_chain() {
        let (module, handler) = parse_source(
            "transforms grade(score Integer) Letter\nfrom\n    if score > 90\n        A\n    else if score > 80\n        B\n    else\n        C\n",
        );
        assert!(!handler.has_errors());
        match &module.decls[0] {
            Decl::Fn(f) => match f.body.trailing.as_deref() {
                Some(Expr::If(if_expr)) => {
                    assert!(matches!(
                        if_expr.else_branch.as_deref(),
                        Some(crate::ast::ElseBranch::If(_))
                    ));
                }
                other => panic!("unexpected: {other:?}"),
            },
            other => panic!("unexpected: {other:?}"),
        }
    }
}
