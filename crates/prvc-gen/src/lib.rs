//! Emits portable C source from checked, optimized HIR.
//!
//! The pipeline that reaches this crate has already run the checker
//! (so the HIR is well-typed and exhaustiveness-checked) and the
//! optimizer (so self-recursive tail calls are already `TailLoop`
//! nodes and small pure calls are already inlined) — this crate's only
//! job is mapping that HIR onto one self-contained C translation unit:
//! runtime `#include`s, type declarations, hoisted lambdas, and
//! function bodies, in that order.

pub mod decls;
pub mod error;
pub mod expr;
pub mod func;
pub mod header;
pub mod mangle;
pub mod types;

pub use error::{CodeGenError, Result};

use prvc_sem::hir;

use mangle::FnVerbTable;

/// Emits the full generated C source for a checked, optimized module.
pub fn emit(items: &[hir::Item]) -> Result<String> {
    let mut out = String::new();

    for header in header::required_headers(items) {
        out.push_str(&format!("#include \"{}\"\n", header));
    }
    out.push('\n');

    for item in collect_type_items(items) {
        let decl = decls::emit_type_item(item)?;
        if !decl.is_empty() {
            out.push_str(&decl);
            out.push('\n');
        }
    }

    let verbs = FnVerbTable::collect(items);
    let mut body = String::new();
    let mut hoisted = Vec::new();
    func::emit_items(items, &verbs, &mut body, &mut hoisted)?;

    for lambda_def in &hoisted {
        out.push_str(lambda_def);
    }
    out.push_str(&body);

    Ok(out)
}

fn collect_type_items(items: &[hir::Item]) -> Vec<&hir::TypeItem> {
    let mut out = Vec::new();
    collect_type_items_into(items, &mut out);
    out
}

fn collect_type_items_into<'a>(items: &'a [hir::Item], out: &mut Vec<&'a hir::TypeItem>) {
    for item in items {
        match item {
            hir::Item::Type(t) => out.push(t),
            hir::Item::Module(m) => collect_type_items_into(&m.items, out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_par::ast::{Literal, Verb};
    use prvc_sem::types::Type;
    use prvc_util::{DefId, Span, Symbol};

    fn int_ty() -> Type {
        Type::Primitive(Symbol::intern("Integer"), vec![])
    }

    #[test]
    fn emits_headers_and_a_simple_function() {
        let body = hir::Block {
            stmts: vec![],
            trailing: Some(Box::new(hir::Expr::new(hir::ExprKind::Literal(Literal::Integer(42)), int_ty(), Span::DUMMY))),
            ty: int_ty(),
            span: Span::DUMMY,
        };
        let f = hir::FnItem {
            def_id: DefId(0),
            verb: Verb::Transforms,
            name: Symbol::intern("answer"),
            params: vec![],
            ret: int_ty(),
            can_fail: false,
            body,
            span: Span::DUMMY,
        };
        let out = emit(&[hir::Item::Fn(f)]).unwrap();
        assert!(out.contains("#include \"prove_runtime.h\""));
        assert!(out.contains("prv_transforms_answer"));
        assert!(out.contains("return 42;"));
    }

    #[test]
    fn emits_a_record_type_declaration_before_functions() {
        let record = Type::Record(prvc_sem::types::RecordType {
            name: Symbol::intern("Point"),
            fields: vec![(Symbol::intern("x"), int_ty())],
            params: vec![],
        });
        let type_item = hir::TypeItem { name: Symbol::intern("Point"), ty: record, span: Span::DUMMY };
        let out = emit(&[hir::Item::Type(type_item)]).unwrap();
        assert!(out.contains("Prove_Point"));
    }
}
