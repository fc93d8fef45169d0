//! Tail-call lowering: a function whose body directly calls itself in
//! tail position becomes a loop instead of a recursive call.
//!
//! A call is in tail position if it is the block's trailing expression
//! (or the last bare/`return` statement), or sits at the tail of every
//! arm of a tail-position `if`/`match`. Eligibility is detected
//! structurally, by walking tail positions for a self-call, rather than
//! from a `terminates` annotation — a function with no such call is
//! left untouched either way, so the result is the same.
//!
//! Self-calls are matched by name, not `DefId`: the checker gives every
//! resolved call-site callee `DefId::DUMMY` rather than the callee
//! function's own id (see `check_call` in the checker), so a function's
//! own `def_id` never reappears at a call site referring to it.

use prvc_sem::hir;
use prvc_util::Symbol;

pub fn lower(items: Vec<hir::Item>) -> Vec<hir::Item> {
    items.into_iter().map(lower_item).collect()
}

fn lower_item(item: hir::Item) -> hir::Item {
    match item {
        hir::Item::Fn(mut f) => {
            if block_has_tail_self_call(&f.body, f.name) {
                let params: Vec<_> = f.params.iter().map(|p| p.name).collect();
                let body = rewrite_block_tail(f.body, f.name, &params);
                let ty = body.ty.clone();
                let span = body.span;
                let loop_expr = hir::Expr::new(hir::ExprKind::TailLoop(params, body), ty, span);
                f.body = hir::Block { stmts: Vec::new(), trailing: Some(Box::new(loop_expr)), ty: f.ret.clone(), span: f.span };
            }
            hir::Item::Fn(f)
        }
        hir::Item::Module(mut m) => {
            m.items = lower(m.items);
            hir::Item::Module(m)
        }
        other => other,
    }
}

fn block_has_tail_self_call(block: &hir::Block, name: Symbol) -> bool {
    if let Some(e) = &block.trailing {
        return expr_has_tail_self_call(e, name);
    }
    match block.stmts.last() {
        Some(hir::Stmt::Expr(e)) => expr_has_tail_self_call(e, name),
        Some(hir::Stmt::Return(Some(e), _)) => expr_has_tail_self_call(e, name),
        _ => false,
    }
}

fn expr_has_tail_self_call(e: &hir::Expr, name: Symbol) -> bool {
    match e.kind.as_ref() {
        hir::ExprKind::If(_, then_block, else_branch) => {
            block_has_tail_self_call(then_block, name)
                || else_branch.as_ref().is_some_and(|eb| else_branch_has_tail_self_call(eb, name))
        }
        hir::ExprKind::Match(_, arms) => arms.iter().any(|a| block_has_tail_self_call(&a.body, name)),
        hir::ExprKind::Call(callee, _) => is_self_call(callee, name),
        _ => false,
    }
}

fn else_branch_has_tail_self_call(eb: &hir::ElseBranch, name: Symbol) -> bool {
    match eb {
        hir::ElseBranch::Block(b) => block_has_tail_self_call(b, name),
        hir::ElseBranch::If(_, then_block, else_branch) => {
            block_has_tail_self_call(then_block, name)
                || else_branch.as_ref().is_some_and(|eb2| else_branch_has_tail_self_call(eb2, name))
        }
    }
}

fn is_self_call(callee: &hir::Expr, name: Symbol) -> bool {
    matches!(callee.kind.as_ref(), hir::ExprKind::Ident(n, _) if *n == name)
}

fn rewrite_block_tail(mut block: hir::Block, name: Symbol, params: &[Symbol]) -> hir::Block {
    if let Some(e) = block.trailing.take() {
        block.trailing = Some(Box::new(rewrite_tail_expr(*e, name, params)));
        return block;
    }
    if let Some(last) = block.stmts.pop() {
        let rewritten = match last {
            hir::Stmt::Expr(e) => hir::Stmt::Expr(rewrite_tail_expr(e, name, params)),
            hir::Stmt::Return(Some(e), span) => hir::Stmt::Return(Some(rewrite_tail_expr(e, name, params)), span),
            other => other,
        };
        block.stmts.push(rewritten);
    }
    block
}

fn rewrite_tail_expr(e: hir::Expr, name: Symbol, params: &[Symbol]) -> hir::Expr {
    let hir::Expr { kind, ty, span } = e;
    match *kind {
        hir::ExprKind::If(cond, then_block, else_branch) => {
            let then_block = rewrite_block_tail(then_block, name, params);
            let else_branch = else_branch.map(|eb| rewrite_else_branch_tail(eb, name, params));
            hir::Expr::new(hir::ExprKind::If(cond, then_block, else_branch), ty, span)
        }
        hir::ExprKind::Match(subject, arms) => {
            let arms = arms
                .into_iter()
                .map(|mut a| {
                    a.body = rewrite_block_tail(a.body, name, params);
                    a
                })
                .collect();
            hir::Expr::new(hir::ExprKind::Match(subject, arms), ty, span)
        }
        hir::ExprKind::Call(callee, args) if is_self_call(&callee, name) => {
            let pairs = params.iter().copied().zip(args).collect();
            hir::Expr::new(hir::ExprKind::TailContinue(pairs), ty, span)
        }
        other => hir::Expr::new(other, ty, span),
    }
}

fn rewrite_else_branch_tail(eb: hir::ElseBranch, name: Symbol, params: &[Symbol]) -> hir::ElseBranch {
    match eb {
        hir::ElseBranch::Block(b) => hir::ElseBranch::Block(rewrite_block_tail(b, name, params)),
        hir::ElseBranch::If(cond, then_block, else_branch) => {
            let then_block = rewrite_block_tail(then_block, name, params);
            let else_branch = else_branch.map(|b| Box::new(rewrite_else_branch_tail(*b, name, params)));
            hir::ElseBranch::If(cond, then_block, else_branch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_par::ast::Verb;
    use prvc_sem::types::Type;
    use prvc_util::{DefId, Span};

    fn int_ty() -> Type {
        Type::Primitive(Symbol::intern("Integer"), vec![])
    }

    fn ident(name: &str, def_id: DefId, ty: Type) -> hir::Expr {
        hir::Expr::new(hir::ExprKind::Ident(Symbol::intern(name), def_id), ty, Span::DUMMY)
    }

    /// Mirrors what the checker actually produces: a resolved call-site
    /// callee always carries `DefId::DUMMY`, never the callee's own id.
    #[test]
    fn self_tail_call_becomes_a_tail_loop() {
        let n_id = DefId(1);
        let call = hir::Expr::new(
            hir::ExprKind::Call(ident("count", DefId::DUMMY, Type::Fn(vec![], Box::new(int_ty()))), vec![ident("n", n_id, int_ty())]),
            int_ty(),
            Span::DUMMY,
        );
        let body = hir::Block { stmts: vec![], trailing: Some(Box::new(call)), ty: int_ty(), span: Span::DUMMY };
        let f = hir::FnItem {
            def_id: DefId(0),
            verb: Verb::Transforms,
            name: Symbol::intern("count"),
            params: vec![hir::Param { def_id: n_id, name: Symbol::intern("n"), ty: int_ty() }],
            ret: int_ty(),
            can_fail: false,
            body,
            span: Span::DUMMY,
        };
        let lowered = lower(vec![hir::Item::Fn(f)]);
        let hir::Item::Fn(f) = &lowered[0] else { panic!("expected a function") };
        let trailing = f.body.trailing.as_ref().expect("trailing expr");
        assert!(matches!(trailing.kind.as_ref(), hir::ExprKind::TailLoop(_, _)));
    }

    #[test]
    fn non_recursive_body_is_left_alone() {
        let body = hir::Block {
            stmts: vec![],
            trailing: Some(Box::new(hir::Expr::new(hir::ExprKind::Literal(prvc_par::ast::Literal::Integer(1)), int_ty(), Span::DUMMY))),
            ty: int_ty(),
            span: Span::DUMMY,
        };
        let f = hir::FnItem {
            def_id: DefId(0),
            verb: Verb::Transforms,
            name: Symbol::intern("one"),
            params: vec![],
            ret: int_ty(),
            can_fail: false,
            body,
            span: Span::DUMMY,
        };
        let lowered = lower(vec![hir::Item::Fn(f)]);
        let hir::Item::Fn(f) = &lowered[0] else { panic!("expected a function") };
        assert!(matches!(f.body.trailing.as_ref().unwrap().kind.as_ref(), hir::ExprKind::Literal(_)));
    }

    /// A call to a *different* function sharing no name must not be
    /// mistaken for self-recursion.
    #[test]
    fn call_to_another_function_is_not_a_tail_loop() {
        let call = hir::Expr::new(
            hir::ExprKind::Call(ident("helper", DefId::DUMMY, Type::Fn(vec![], Box::new(int_ty()))), vec![]),
            int_ty(),
            Span::DUMMY,
        );
        let body = hir::Block { stmts: vec![], trailing: Some(Box::new(call)), ty: int_ty(), span: Span::DUMMY };
        let f = hir::FnItem {
            def_id: DefId(0),
            verb: Verb::Transforms,
            name: Symbol::intern("count"),
            params: vec![],
            ret: int_ty(),
            can_fail: false,
            body,
            span: Span::DUMMY,
        };
        let lowered = lower(vec![hir::Item::Fn(f)]);
        let hir::Item::Fn(f) = &lowered[0] else { panic!("expected a function") };
        assert!(matches!(f.body.trailing.as_ref().unwrap().kind.as_ref(), hir::ExprKind::Call(_, _)));
    }
}
