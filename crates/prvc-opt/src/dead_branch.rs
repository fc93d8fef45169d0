//! Dead-branch elimination: when a `match` subject is a boolean
//! literal, drop every arm that cannot fire.

use prvc_par::ast::Literal;
use prvc_sem::hir;

use crate::walk::{walk_items, Rewriter};

struct DeadBranchEliminator;

impl Rewriter for DeadBranchEliminator {
    fn expr(&mut self, expr: hir::Expr) -> hir::Expr {
        let hir::Expr { kind, ty, span } = expr;
        match *kind {
            hir::ExprKind::Match(Some(subject), arms) => {
                let arms = match subject.kind.as_ref() {
                    hir::ExprKind::Literal(Literal::Bool(value)) => {
                        let value = *value;
                        arms.into_iter().filter(|a| matches_bool_arm(&a.pattern, value)).collect()
                    }
                    _ => arms,
                };
                hir::Expr::new(hir::ExprKind::Match(Some(subject), arms), ty, span)
            }
            other => hir::Expr::new(other, ty, span),
        }
    }
}

fn matches_bool_arm(pattern: &hir::Pattern, value: bool) -> bool {
    match pattern {
        hir::Pattern::Wildcard(_) | hir::Pattern::Binding(..) => true,
        hir::Pattern::Literal(Literal::Bool(v), _) => *v == value,
        // Not a boolean pattern; the checker wouldn't have accepted this
        // against a boolean subject, so keep it rather than guess.
        _ => true,
    }
}

pub fn eliminate(items: Vec<hir::Item>) -> Vec<hir::Item> {
    walk_items(items, &mut DeadBranchEliminator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_sem::types::Type;
    use prvc_util::{Span, Symbol};

    fn bool_ty() -> Type {
        Type::Primitive(Symbol::intern("Boolean"), vec![])
    }

    fn int_ty() -> Type {
        Type::Primitive(Symbol::intern("Integer"), vec![])
    }

    fn int_lit(n: i64) -> hir::Expr {
        hir::Expr::new(hir::ExprKind::Literal(Literal::Integer(n)), int_ty(), Span::DUMMY)
    }

    fn arm(pattern: hir::Pattern, value: i64) -> hir::Arm {
        hir::Arm {
            pattern,
            guard: None,
            body: hir::Block { stmts: vec![], trailing: Some(Box::new(int_lit(value))), ty: int_ty(), span: Span::DUMMY },
            span: Span::DUMMY,
        }
    }

    #[test]
    fn keeps_only_the_arm_matching_a_known_bool() {
        let subject = hir::Expr::new(hir::ExprKind::Literal(Literal::Bool(true)), bool_ty(), Span::DUMMY);
        let arms = vec![
            arm(hir::Pattern::Literal(Literal::Bool(true), Span::DUMMY), 1),
            arm(hir::Pattern::Literal(Literal::Bool(false), Span::DUMMY), 2),
        ];
        let expr = hir::Expr::new(hir::ExprKind::Match(Some(subject), arms), int_ty(), Span::DUMMY);
        let body = hir::Block { stmts: vec![], trailing: Some(Box::new(expr)), ty: int_ty(), span: Span::DUMMY };
        let f = hir::MainItem { body, span: Span::DUMMY };
        let items = eliminate(vec![hir::Item::Main(f)]);
        let hir::Item::Main(f) = &items[0] else { panic!("expected main") };
        let hir::ExprKind::Match(_, arms) = f.body.trailing.as_ref().unwrap().kind.as_ref() else {
            panic!("expected match")
        };
        assert_eq!(arms.len(), 1);
    }

    #[test]
    fn keeps_a_wildcard_catch_all() {
        let subject = hir::Expr::new(hir::ExprKind::Literal(Literal::Bool(false)), bool_ty(), Span::DUMMY);
        let arms = vec![
            arm(hir::Pattern::Literal(Literal::Bool(true), Span::DUMMY), 1),
            arm(hir::Pattern::Wildcard(Span::DUMMY), 2),
        ];
        let expr = hir::Expr::new(hir::ExprKind::Match(Some(subject), arms), int_ty(), Span::DUMMY);
        let body = hir::Block { stmts: vec![], trailing: Some(Box::new(expr)), ty: int_ty(), span: Span::DUMMY };
        let items = eliminate(vec![hir::Item::Main(hir::MainItem { body, span: Span::DUMMY })]);
        let hir::Item::Main(f) = &items[0] else { panic!("expected main") };
        let hir::ExprKind::Match(_, arms) = f.body.trailing.as_ref().unwrap().kind.as_ref() else {
            panic!("expected match")
        };
        assert_eq!(arms.len(), 1);
        assert!(matches!(arms[0].pattern, hir::Pattern::Wildcard(_)));
    }
}
