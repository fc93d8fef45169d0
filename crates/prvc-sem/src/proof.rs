//! The proof verifier: purely structural checks over a function's
//! contract clauses, run directly against the parsed AST rather than
//! the HIR since none of these checks need resolved types.

use prvc_par::ast;
use prvc_util::diagnostic::{E391, E392, E393, W321, W322, W324, W390};
use prvc_util::Handler;

pub fn check_fn(handler: &Handler, f: &ast::FnDecl) {
    if !f.ensures.is_empty() && f.proof.is_none() {
        handler
            .build_warning(f.span, "`ensures` without a `proof` block is unverified")
            .code(W390)
            .emit(handler);
    }

    if !f.believe.is_empty() && f.ensures.is_empty() {
        handler
            .build_error(f.span, "`believe` is only meaningful alongside `ensures`")
            .code(E393)
            .emit(handler);
    }

    if !f.ensures.is_empty() && f.requires.is_empty() {
        handler
            .build_warning(f.span, "`ensures` without any `requires` constrains nothing about the inputs")
            .code(W324)
            .emit(handler);
    }

    if let Some(proof) = &f.proof {
        check_proof_block(handler, f, proof);
    }

    check_near_misses(handler, f);
}

fn check_proof_block(handler: &Handler, f: &ast::FnDecl, proof: &ast::ProofBlock) {
    let mut seen = std::collections::HashSet::new();
    for obligation in &proof.obligations {
        if !seen.insert(obligation.name) {
            handler
                .build_error(obligation.span, format!("duplicate proof obligation `{}`", obligation.name.as_str()))
                .code(E391)
                .emit(handler);
        }
        check_obligation_relevance(handler, f, obligation);
    }

    if proof.obligations.len() < f.ensures.len() {
        handler
            .build_error(
                proof.span,
                format!(
                    "{} `ensures` clause(s) but only {} proof obligation(s)",
                    f.ensures.len(),
                    proof.obligations.len()
                ),
            )
            .code(E392)
            .emit(handler);
    }
}

fn check_obligation_relevance(handler: &Handler, f: &ast::FnDecl, obligation: &ast::ProofObligation) {
    let text = obligation.text.as_str();
    let mentions_fn_name = text.contains(f.name.as_str());
    let mentions_param = f.params.iter().any(|p| text.contains(p.name.as_str()));
    let mentions_result = text.contains("result");
    if !mentions_fn_name && !mentions_param && !mentions_result {
        handler
            .build_warning(
                obligation.span,
                format!("proof obligation `{}` doesn't mention the function, its parameters, or `result`", obligation.name.as_str()),
            )
            .code(W321)
            .emit(handler);
    }
}

fn check_near_misses(handler: &Handler, f: &ast::FnDecl) {
    let mut seen: Vec<String> = Vec::new();
    for near_miss in &f.near_misses {
        let key = canonical_key(near_miss);
        if seen.contains(&key) {
            handler
                .build_warning(near_miss.span(), "duplicate near-miss input")
                .code(W322)
                .emit(handler);
        } else {
            seen.push(key);
        }
    }
}

/// A span-free structural key for an expression, used only to spot
/// duplicate near-miss inputs.
fn canonical_key(expr: &ast::Expr) -> String {
    match expr {
        ast::Expr::Literal(lit, _) => format!("lit:{:?}", lit),
        ast::Expr::Ident(name, _) => format!("ident:{}", name.as_str()),
        ast::Expr::TypeIdent(name, _) => format!("type_ident:{}", name.as_str()),
        ast::Expr::Binary(b) => format!("bin:{:?}({},{})", b.op, canonical_key(&b.left), canonical_key(&b.right)),
        ast::Expr::Unary(u) => format!("un:{:?}({})", u.op, canonical_key(&u.operand)),
        ast::Expr::Call(c) => {
            let args: Vec<String> = c.args.iter().map(canonical_key).collect();
            format!("call:{}({})", canonical_key(&c.callee), args.join(","))
        }
        ast::Expr::Field(f) => format!("field:{}.{}", canonical_key(&f.object), f.field.as_str()),
        ast::Expr::Index(i) => format!("index:{}[{}]", canonical_key(&i.object), canonical_key(&i.index)),
        ast::Expr::ListLit(items, _) => {
            let items: Vec<String> = items.iter().map(canonical_key).collect();
            format!("list:[{}]", items.join(","))
        }
        ast::Expr::ValidRef(name, _) => format!("valid_ref:{}", name.as_str()),
        _ => "expr".to_string(),
    }
}
