//! Edge-case tests for prvc-sem covering the checker rules that don't
//! fit neatly into the per-module tests: verb enforcement, match
//! exhaustiveness, fail-propagation, and contract well-typedness.

#[cfg(test)]
mod tests {
    use crate::analyze;
    use prvc_lex::Lexer;
    use prvc_par::Parser;
    use prvc_util::diagnostic::DiagnosticCode;
    use prvc_util::{Diagnostic, Handler};

    fn check_source(source: &str) -> Vec<Diagnostic> {
        let mut handler = Handler::new();
        let tokens = Lexer::new(source, &mut handler).tokenize();
        let module = Parser::new(tokens, &handler, source).parse();
        let (_, _) = analyze(&module, &handler);
        handler.diagnostics()
    }

    fn has_code(diagnostics: &[Diagnostic], code: DiagnosticCode) -> bool {
        diagnostics.iter().any(|d| d.code == Some(code))
    }

    #[test]
    fn pure_function_may_not_call_println() {
        let diagnostics = check_source("transforms greet(name String) String\nfrom\n    println(name)\n    name\n");
        assert!(has_code(&diagnostics, DiagnosticCode::E362));
    }

    #[test]
    fn pure_function_may_not_be_failable() {
        let diagnostics = check_source("transforms risky(x Integer) Integer!\nfrom\n    x\n");
        assert!(has_code(&diagnostics, DiagnosticCode::E361));
    }

    #[test]
    fn validates_with_explicit_return_type_is_rejected() {
        let diagnostics = check_source("validates is_positive(x Integer) Integer\nfrom\n    x > 0\n");
        assert!(has_code(&diagnostics, DiagnosticCode::E360));
    }

    #[test]
    fn fail_prop_outside_failable_function_is_rejected() {
        let diagnostics = check_source("reads load(path String) String\nfrom\n    path!\n");
        assert!(has_code(&diagnostics, DiagnosticCode::E350));
    }

    #[test]
    fn undefined_variant_in_match_is_reported() {
        let source = "type Sign = Positive | Negative | Zero\n\ntransforms classify(s Sign) Integer\nfrom\n    match s\n        Bogus => 0\n        Positive => 1\n        Negative => -1\n        Zero => 0\n";
        let diagnostics = check_source(source);
        assert!(has_code(&diagnostics, DiagnosticCode::E370));
    }

    #[test]
    fn non_exhaustive_match_is_reported() {
        let source = "type Sign = Positive | Negative | Zero\n\ntransforms classify(s Sign) Integer\nfrom\n    match s\n        Positive => 1\n        Negative => -1\n";
        let diagnostics = check_source(source);
        assert!(has_code(&diagnostics, DiagnosticCode::E371));
    }

    #[test]
    fn wildcard_arm_satisfies_exhaustiveness() {
        let source = "type Sign = Positive | Negative | Zero\n\ntransforms classify(s Sign) Integer\nfrom\n    match s\n        Positive => 1\n        _ => 0\n";
        let diagnostics = check_source(source);
        assert!(!has_code(&diagnostics, DiagnosticCode::E371));
    }

    #[test]
    fn undefined_name_in_body_is_reported() {
        let diagnostics = check_source("transforms broken() Integer\nfrom\n    nonexistent\n");
        assert!(has_code(&diagnostics, DiagnosticCode::E302));
    }

    #[test]
    fn unknown_field_access_is_reported() {
        let source = "type Point = (x: Integer, y: Integer)\n\ntransforms get_z(p Point) Integer\nfrom\n    p.z\n";
        let diagnostics = check_source(source);
        assert!(has_code(&diagnostics, DiagnosticCode::E340));
    }

    #[test]
    fn call_arity_mismatch_is_reported() {
        let diagnostics = check_source("transforms add(a Integer, b Integer) Integer\nfrom\n    a + b\n\nmain()\n    add(1)\n");
        assert!(has_code(&diagnostics, DiagnosticCode::E330));
    }
}
