//! prvc - orchestration crate wiring the Prove compiler's pipeline.
//!
//! ============================================================================
//! PIPELINE OVERVIEW
//! ============================================================================
//!
//! A compilation is a straight-line, single-threaded, synchronous data
//! flow with no operation blocking on anything but reading its input
//! string:
//!
//! ```text
//! source text
//!      │
//!      ▼
//!  [prvc-lex]  ──▶ token stream
//!      │
//!      ▼
//!  [prvc-par]  ──▶ AST (`prvc_par::Module`)
//!      │
//!      ▼
//!  [prvc-sem]  ──▶ checked HIR (`Vec<prvc_sem::hir::Item>`) + diagnostics
//!      │
//!      ▼
//!  [prvc-opt]  ──▶ optimized HIR (tail-call lowering, dead-branch
//!      │           elimination, small-function inlining, match
//!      │           compilation)
//!      ▼
//!  [prvc-gen]  ──▶ generated C source
//! ```
//!
//! A build driver that discovers source files on disk, shells out to a
//! C compiler, and links an executable is out of this crate's scope —
//! `compile` takes a source string and a parsed [`ProveConfig`] and
//! returns either generated C source or the diagnostics that stopped
//! it, nothing more. A CLI, language server, formatter, and scaffolder
//! are likewise out of scope; what's here is the library a driver or
//! CLI would be built on top of.

pub mod config;
pub mod error;

use prvc_sem::hir;
use prvc_util::diagnostic::{Diagnostic, Level};
use prvc_util::Handler;

pub use config::{find_config, load_config, BuildConfig, PackageConfig, ProveConfig, TestConfig};
pub use error::{CompileError, Result};

/// Everything a successful compilation produced.
#[derive(Debug)]
pub struct CompileOutput {
    /// The generated C translation unit.
    pub c_source: String,
    /// Warnings collected along the way; a successful compile may still
    /// carry these.
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the full pipeline — lex, parse, check, optimize, emit — over
/// one source string.
///
/// Optimization runs unconditionally; `config.build.optimize` governs
/// only whether a *driver* chooses to invoke the C compiler with
/// optimizations of its own, not whether this crate's own HIR-level
/// passes run (they're cheap, and `optimize` is referentially
/// transparent on input that doesn't need them, so skipping them buys
/// nothing a driver would need to control).
pub fn compile(source: &str, _config: &ProveConfig) -> Result<CompileOutput> {
    let mut handler = Handler::new();

    let tokens = {
        let _span = tracing::debug_span!("lex").entered();
        prvc_lex::Lexer::new(source, &mut handler).tokenize()
    };
    if handler.has_errors() {
        return Err(CompileError::Diagnostics(handler.diagnostics()));
    }

    let module = {
        let _span = tracing::debug_span!("parse").entered();
        prvc_par::Parser::new(tokens, &handler, source).parse()
    };
    if handler.has_errors() {
        return Err(CompileError::Diagnostics(handler.diagnostics()));
    }

    let items = {
        let _span = tracing::debug_span!("check").entered();
        analyze_checked(&module, &handler)
    };
    if handler.has_errors() {
        return Err(CompileError::Diagnostics(handler.diagnostics()));
    }

    let items = {
        let _span = tracing::debug_span!("optimize").entered();
        prvc_opt::optimize(items)
    };

    let c_source = {
        let _span = tracing::debug_span!("emit").entered();
        prvc_gen::emit(&items)?
    };

    Ok(CompileOutput { c_source, diagnostics: handler.diagnostics() })
}

/// Thin wrapper around [`prvc_sem::analyze`] kept separate so tracing's
/// `check` span covers exactly the checker's work, not the surrounding
/// diagnostic bookkeeping `compile` does on either side of it.
fn analyze_checked(module: &prvc_par::Module, handler: &Handler) -> Vec<hir::Item> {
    let (items, _symbols) = prvc_sem::analyze(module, handler);
    items
}

/// Installs a `tracing-subscriber` `EnvFilter`-based global subscriber.
///
/// None of the compiler crates ever call this themselves — they only
/// emit events through the `tracing` facade — so they stay composable
/// as libraries even with no subscriber installed. A binary entry point
/// built on top of this crate calls this once, at startup; tests that
/// want log output call it too (`tracing_subscriber::fmt().try_init()`
/// swallows the "already initialized" error from a second call, so this
/// is safe to call more than once per process).
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
}

/// True if any diagnostic in `diagnostics` is at error severity —
/// matching the specification's "a compilation fails if any diagnostic
/// is at error severity; warnings do not fail compilation."
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.level == Level::Error)
}

/// Same as [`compile`], but flattens the diagnostic list into a single
/// `anyhow` error for a caller that just wants "compilation failed,
/// here is why" without matching on [`CompileError`]'s variants.
pub fn compile_or_report(source: &str, config: &ProveConfig) -> anyhow::Result<CompileOutput> {
    compile(source, config).map_err(|err| match err {
        CompileError::Diagnostics(diags) => {
            let rendered: Vec<String> = diags.iter().map(|d| format!("{:?}: {}", d.level, d.message)).collect();
            anyhow::anyhow!("compilation failed:\n{}", rendered.join("\n"))
        }
        other => anyhow::Error::new(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_a_trivial_function_to_c_source() {
        let config = ProveConfig::default();
        let out = compile("transforms add(a Integer, b Integer) Integer\nfrom\n    a + b\n", &config).unwrap();
        assert!(out.c_source.contains("prv_transforms_add_Integer_Integer"));
        assert!(out.c_source.contains("#include \"prove_runtime.h\""));
    }

    #[test]
    fn undefined_name_stops_compilation_with_diagnostics() {
        let config = ProveConfig::default();
        let err = compile("transforms broken() Integer\nfrom\n    missing_name\n", &config).unwrap_err();
        match err {
            CompileError::Diagnostics(diags) => assert!(has_errors(&diags)),
            other => panic!("expected Diagnostics, got {:?}", other),
        }
    }

    #[test]
    fn syntax_error_is_caught_before_the_checker_runs() {
        let config = ProveConfig::default();
        let err = compile("transforms (((\n", &config).unwrap_err();
        assert!(matches!(err, CompileError::Diagnostics(_)));
    }
}
