//! Cross-pass edge cases: behavior that only shows up once the full
//! `optimize` pipeline runs, as opposed to a single pass in isolation.

use prvc_par::ast::{Literal, Verb};
use prvc_sem::hir;
use prvc_sem::types::Type;
use prvc_util::{DefId, Span, Symbol};

use crate::optimize;

fn bool_ty() -> Type {
    Type::Primitive(Symbol::intern("Boolean"), vec![])
}

fn int_ty() -> Type {
    Type::Primitive(Symbol::intern("Integer"), vec![])
}

fn int_lit(n: i64) -> hir::Expr {
    hir::Expr::new(hir::ExprKind::Literal(Literal::Integer(n)), int_ty(), Span::DUMMY)
}

fn module_with_bool_match(value: bool, on_true: i64, on_false: i64) -> Vec<hir::Item> {
    let subject = hir::Expr::new(hir::ExprKind::Literal(Literal::Bool(value)), bool_ty(), Span::DUMMY);
    let arms = vec![
        hir::Arm {
            pattern: hir::Pattern::Literal(Literal::Bool(true), Span::DUMMY),
            guard: None,
            body: hir::Block { stmts: vec![], trailing: Some(Box::new(int_lit(on_true))), ty: int_ty(), span: Span::DUMMY },
            span: Span::DUMMY,
        },
        hir::Arm {
            pattern: hir::Pattern::Literal(Literal::Bool(false), Span::DUMMY),
            guard: None,
            body: hir::Block { stmts: vec![], trailing: Some(Box::new(int_lit(on_false))), ty: int_ty(), span: Span::DUMMY },
            span: Span::DUMMY,
        },
    ];
    let expr = hir::Expr::new(hir::ExprKind::Match(Some(subject), arms), int_ty(), Span::DUMMY);
    let body = hir::Block { stmts: vec![], trailing: Some(Box::new(expr)), ty: int_ty(), span: Span::DUMMY };
    vec![hir::Item::Main(hir::MainItem { body, span: Span::DUMMY })]
}

#[test]
fn optimize_is_idempotent_on_a_dead_branch_module() {
    for value in [true, false] {
        let m = module_with_bool_match(value, 1, 0);
        let once = format!("{:?}", optimize(m.clone()));
        let twice = format!("{:?}", optimize(optimize(m)));
        assert_eq!(once, twice);
    }
}

proptest::proptest! {
    /// `optimize(m) == optimize(optimize(m))` for any fixed input shape,
    /// checked here by structural `Debug` comparison across a range of
    /// arm literals and subject values.
    #[test]
    fn optimize_is_idempotent_across_arm_literals(value in proptest::prelude::any::<bool>(), on_true in -1000i64..1000, on_false in -1000i64..1000) {
        let m = module_with_bool_match(value, on_true, on_false);
        let once = format!("{:?}", optimize(m.clone()));
        let twice = format!("{:?}", optimize(optimize(m)));
        proptest::prop_assert_eq!(once, twice);
    }
}

/// A recursive `transforms count(n Integer, acc Integer) Integer` whose
/// body is `match n { 0 => acc, _ => count(n - 1, acc + 1) }` should
/// come out of the full pipeline as a `TailLoop`, not a direct
/// self-call, the same shape the emitter needs to produce a C `while`
/// loop instead of unbounded recursion.
#[test]
fn optimize_lowers_an_accumulator_style_tail_recursion() {
    let count_id = DefId(0);
    let n_id = DefId(1);
    let acc_id = DefId(2);

    let n_minus_1 = hir::Expr::new(
        hir::ExprKind::Binary(
            prvc_par::ast::BinOp::Sub,
            hir::Expr::new(hir::ExprKind::Ident(Symbol::intern("n"), n_id), int_ty(), Span::DUMMY),
            int_lit(1),
        ),
        int_ty(),
        Span::DUMMY,
    );
    let acc_plus_1 = hir::Expr::new(
        hir::ExprKind::Binary(
            prvc_par::ast::BinOp::Add,
            hir::Expr::new(hir::ExprKind::Ident(Symbol::intern("acc"), acc_id), int_ty(), Span::DUMMY),
            int_lit(1),
        ),
        int_ty(),
        Span::DUMMY,
    );
    let recursive_call = hir::Expr::new(
        hir::ExprKind::Call(
            hir::Expr::new(hir::ExprKind::Ident(Symbol::intern("count"), count_id), int_ty(), Span::DUMMY),
            vec![n_minus_1, acc_plus_1],
        ),
        int_ty(),
        Span::DUMMY,
    );

    let zero_arm = hir::Arm {
        pattern: hir::Pattern::Literal(Literal::Integer(0), Span::DUMMY),
        guard: None,
        body: hir::Block {
            stmts: vec![],
            trailing: Some(Box::new(hir::Expr::new(hir::ExprKind::Ident(Symbol::intern("acc"), acc_id), int_ty(), Span::DUMMY))),
            ty: int_ty(),
            span: Span::DUMMY,
        },
        span: Span::DUMMY,
    };
    let wildcard_arm = hir::Arm {
        pattern: hir::Pattern::Wildcard(Span::DUMMY),
        guard: None,
        body: hir::Block { stmts: vec![], trailing: Some(Box::new(recursive_call)), ty: int_ty(), span: Span::DUMMY },
        span: Span::DUMMY,
    };

    let match_expr = hir::Expr::new(
        hir::ExprKind::Match(
            Some(hir::Expr::new(hir::ExprKind::Ident(Symbol::intern("n"), n_id), int_ty(), Span::DUMMY)),
            vec![zero_arm, wildcard_arm],
        ),
        int_ty(),
        Span::DUMMY,
    );
    let body = hir::Block { stmts: vec![], trailing: Some(Box::new(match_expr)), ty: int_ty(), span: Span::DUMMY };

    let count_fn = hir::FnItem {
        def_id: count_id,
        verb: Verb::Transforms,
        name: Symbol::intern("count"),
        params: vec![
            hir::Param { def_id: n_id, name: Symbol::intern("n"), ty: int_ty() },
            hir::Param { def_id: acc_id, name: Symbol::intern("acc"), ty: int_ty() },
        ],
        ret: int_ty(),
        can_fail: false,
        body,
        span: Span::DUMMY,
    };

    let optimized = optimize(vec![hir::Item::Fn(count_fn)]);
    let hir::Item::Fn(f) = &optimized[0] else { panic!("expected a function") };
    let trailing = f.body.trailing.as_ref().expect("trailing expr");
    let hir::ExprKind::TailLoop(params, loop_body) = trailing.kind.as_ref() else {
        panic!("expected the recursive body to lower into a TailLoop, got {:?}", trailing.kind)
    };
    assert_eq!(params.len(), 2);

    // No self-recursive call to `count` should remain anywhere in the
    // loop body; the wildcard arm's tail should now be a TailContinue.
    let hir::ExprKind::Match(_, arms) = loop_body.trailing.as_ref().unwrap().kind.as_ref() else {
        panic!("expected the match to survive lowering")
    };
    let wildcard = arms.last().unwrap();
    assert!(matches!(wildcard.body.trailing.as_ref().unwrap().kind.as_ref(), hir::ExprKind::TailContinue(_)));
}
