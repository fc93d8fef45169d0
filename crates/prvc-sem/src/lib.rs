//! prvc-sem - semantic analyzer & type checker.
//!
//! ============================================================================
//! SEMANTIC ANALYSIS THEORY
//! ============================================================================
//!
//! Semantic analysis is the phase where we check the "meaning" of the
//! program, not just its syntax. It answers questions like:
//! - Is this name defined?
//! - Are these types compatible?
//! - Does every match cover its cases?
//! - Do the contracts a function declares actually typecheck?
//!
//! PHASES:
//! -------
//!
//! 1. NAME RESOLUTION
//!    - Match identifiers to their definitions
//!    - Build the symbol table (a scope stack plus function/type registries)
//!    - Check for undefined names
//!
//! 2. TYPE CHECKING
//!    - Infer the type of every expression
//!    - Check type compatibility
//!    - Check verb enforcement (`transforms`/`validates` must be pure)
//!    - Check match exhaustiveness over algebraic types
//!
//! 3. CONTRACT CHECKING
//!    - `requires`/`ensures`/`know`/`assume`/`believe` must be boolean
//!    - `ensures` binds `result` to the function's return type
//!    - `satisfies` must name a registered type
//!
//! 4. PROOF VERIFICATION
//!    - Every `ensures` clause needs a matching proof obligation
//!    - Obligations must be named uniquely and look relevant
//!
//! There is no borrow-checking phase: Prove has no references or
//! lifetimes for this analyzer to verify.

pub mod checker;
#[cfg(test)]
mod edge_cases;
pub mod hir;
pub mod infer;
pub mod proof;
pub mod scope;
pub mod stdlib;
pub mod types;

use prvc_par::ast::Module;
use prvc_util::Handler;

pub use checker::Checker;
pub use scope::SymbolTable;

/// Runs both checker passes plus proof verification over a parsed
/// module, emitting diagnostics to `handler` as it goes, and returns
/// the checked HIR alongside the symbol table that produced it.
pub fn analyze(module: &Module, handler: &Handler) -> (Vec<hir::Item>, SymbolTable) {
    let mut checker = Checker::new(handler);
    let stdlib = stdlib::load();
    for sig in &stdlib.signatures {
        checker.symbols.functions.register(sig.clone());
    }
    let items = checker.check_module(module);
    (items, checker.symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_lex::Lexer;
    use prvc_par::Parser;

    fn analyze_source(source: &str) -> Vec<prvc_util::Diagnostic> {
        let mut handler = Handler::new();
        let tokens = Lexer::new(source, &mut handler).tokenize();
        let module = Parser::new(tokens, &handler, source).parse();
        let (_, _) = analyze(&module, &handler);
        handler.diagnostics()
    }

    #[test]
    fn well_typed_function_has_no_diagnostics() {
        let diagnostics = analyze_source("transforms add(a Integer, b Integer) Integer\nfrom\n    a + b\n");
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);
    }

    #[test]
    fn undefined_name_is_reported() {
        let diagnostics = analyze_source("transforms broken() Integer\nfrom\n    missing_name\n");
        assert!(!diagnostics.is_empty());
    }
}
