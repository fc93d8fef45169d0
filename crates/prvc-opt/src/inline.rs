//! Small-function inlining: substitute the body of a single-expression
//! pure function at each of its call sites.
//!
//! A candidate is a function whose verb is in the inlinable pure set
//! (`transforms`, `validates`, `reads`, `creates`, `matches`), whose
//! body reduces to exactly one expression, and that doesn't call
//! itself. The checked HIR carries no trust/contract metadata by the
//! time the optimizer sees it, so there's no separate "not `binary`"
//! gate to apply here beyond non-recursion.
//!
//! Call sites are matched by the callee's name, not `DefId`: the
//! checker gives every resolved call-site callee `DefId::DUMMY` rather
//! than the callee function's own id (see `check_call` in the
//! checker), so candidates are keyed by `Symbol` instead. Parameter
//! substitution still uses `DefId`, since a plain identifier reference
//! to a parameter does carry the real id the checker assigned it via
//! scope lookup.

use std::collections::HashMap;

use indexmap::IndexMap;
use prvc_par::ast::Verb;
use prvc_sem::hir;
use prvc_util::{DefId, Symbol};

use crate::walk::{walk_expr, walk_items, Rewriter};

struct Candidate {
    param_ids: Vec<DefId>,
    body: hir::Expr,
}

pub fn inline_small_functions(items: Vec<hir::Item>) -> Vec<hir::Item> {
    let mut candidates = IndexMap::new();
    collect_candidates(&items, &mut candidates);
    if candidates.is_empty() {
        return items;
    }
    let mut inliner = Inliner { candidates: &candidates, stack: Vec::new() };
    walk_items(items, &mut inliner)
}

fn collect_candidates(items: &[hir::Item], out: &mut IndexMap<Symbol, Candidate>) {
    for item in items {
        match item {
            hir::Item::Fn(f) if is_inlinable_verb(f.verb) => {
                if let Some(body) = single_expression_body(&f.body) {
                    if !calls_function_named(&body, f.name) {
                        let param_ids = f.params.iter().map(|p| p.def_id).collect();
                        out.insert(f.name, Candidate { param_ids, body });
                    }
                }
            }
            hir::Item::Module(m) => collect_candidates(&m.items, out),
            _ => {}
        }
    }
}

fn is_inlinable_verb(v: Verb) -> bool {
    matches!(v, Verb::Transforms | Verb::Validates | Verb::Reads | Verb::Creates | Verb::Matches)
}

/// Reduces a block to its single expression, if it has exactly one:
/// either a bare trailing expression with no statements, or one
/// statement that is itself an expression or a `return`.
fn single_expression_body(block: &hir::Block) -> Option<hir::Expr> {
    if block.stmts.is_empty() {
        return block.trailing.as_ref().map(|e| (**e).clone());
    }
    if block.stmts.len() == 1 && block.trailing.is_none() {
        return match &block.stmts[0] {
            hir::Stmt::Expr(e) => Some(e.clone()),
            hir::Stmt::Return(Some(e), _) => Some(e.clone()),
            _ => None,
        };
    }
    None
}

struct Inliner<'a> {
    candidates: &'a IndexMap<Symbol, Candidate>,
    stack: Vec<Symbol>,
}

impl Rewriter for Inliner<'_> {
    fn expr(&mut self, expr: hir::Expr) -> hir::Expr {
        let hir::Expr { kind, ty, span } = expr;
        match *kind {
            hir::ExprKind::Call(callee, args) => {
                let target = match callee.kind.as_ref() {
                    hir::ExprKind::Ident(name, _) => self.candidates.get(name).map(|c| (*name, c)),
                    _ => None,
                };
                match target {
                    Some((name, candidate)) if !self.stack.contains(&name) && candidate.param_ids.len() == args.len() => {
                        let substituted = substitute(&candidate.body, &candidate.param_ids, args);
                        self.stack.push(name);
                        let result = walk_expr(substituted, self);
                        self.stack.pop();
                        result
                    }
                    _ => hir::Expr::new(hir::ExprKind::Call(callee, args), ty, span),
                }
            }
            other => hir::Expr::new(other, ty, span),
        }
    }
}

fn substitute(body: &hir::Expr, param_ids: &[DefId], args: Vec<hir::Expr>) -> hir::Expr {
    let map: HashMap<DefId, hir::Expr> = param_ids.iter().copied().zip(args).collect();
    subst_expr(body, &map)
}

fn subst_expr(expr: &hir::Expr, map: &HashMap<DefId, hir::Expr>) -> hir::Expr {
    let ty = expr.ty.clone();
    let span = expr.span;
    if let hir::ExprKind::Ident(_, def_id) = expr.kind.as_ref() {
        if let Some(replacement) = map.get(def_id) {
            return replacement.clone();
        }
    }
    let kind = match expr.kind.as_ref() {
        hir::ExprKind::Ident(name, def_id) => hir::ExprKind::Ident(*name, *def_id),
        hir::ExprKind::Literal(lit) => hir::ExprKind::Literal(lit.clone()),
        hir::ExprKind::TypeIdent(name) => hir::ExprKind::TypeIdent(*name),
        hir::ExprKind::ValidRef(name) => hir::ExprKind::ValidRef(*name),
        hir::ExprKind::Error => hir::ExprKind::Error,
        hir::ExprKind::Binary(op, l, r) => hir::ExprKind::Binary(*op, subst_expr(l, map), subst_expr(r, map)),
        hir::ExprKind::Unary(op, e) => hir::ExprKind::Unary(*op, subst_expr(e, map)),
        hir::ExprKind::Call(callee, args) => {
            hir::ExprKind::Call(subst_expr(callee, map), args.iter().map(|a| subst_expr(a, map)).collect())
        }
        hir::ExprKind::Field(e, name) => hir::ExprKind::Field(subst_expr(e, map), *name),
        hir::ExprKind::Index(obj, idx) => hir::ExprKind::Index(subst_expr(obj, map), subst_expr(idx, map)),
        hir::ExprKind::FailProp(e) => hir::ExprKind::FailProp(subst_expr(e, map)),
        hir::ExprKind::Lambda(params, body) => hir::ExprKind::Lambda(params.clone(), subst_expr(body, map)),
        hir::ExprKind::ListLit(items) => hir::ExprKind::ListLit(items.iter().map(|e| subst_expr(e, map)).collect()),
        hir::ExprKind::Interp(segs) => hir::ExprKind::Interp(
            segs.iter()
                .map(|s| match s {
                    hir::InterpSegment::Text(t) => hir::InterpSegment::Text(*t),
                    hir::InterpSegment::Expr(e) => hir::InterpSegment::Expr(subst_expr(e, map)),
                })
                .collect(),
        ),
        hir::ExprKind::If(cond, then_block, else_branch) => hir::ExprKind::If(
            subst_expr(cond, map),
            subst_block(then_block, map),
            else_branch.as_ref().map(|eb| subst_else_branch(eb, map)),
        ),
        hir::ExprKind::Match(subject, arms) => hir::ExprKind::Match(
            subject.as_ref().map(|e| subst_expr(e, map)),
            arms.iter()
                .map(|a| hir::Arm {
                    pattern: a.pattern.clone(),
                    guard: a.guard.as_ref().map(|g| subst_expr(g, map)),
                    body: subst_block(&a.body, map),
                    span: a.span,
                })
                .collect(),
        ),
        hir::ExprKind::Comptime(b) => hir::ExprKind::Comptime(subst_block(b, map)),
        hir::ExprKind::TailLoop(params, body) => hir::ExprKind::TailLoop(params.clone(), subst_block(body, map)),
        hir::ExprKind::TailContinue(pairs) => {
            hir::ExprKind::TailContinue(pairs.iter().map(|(n, e)| (*n, subst_expr(e, map))).collect())
        }
    };
    hir::Expr::new(kind, ty, span)
}

fn subst_block(block: &hir::Block, map: &HashMap<DefId, hir::Expr>) -> hir::Block {
    hir::Block {
        stmts: block.stmts.iter().map(|s| subst_stmt(s, map)).collect(),
        trailing: block.trailing.as_ref().map(|e| Box::new(subst_expr(e, map))),
        ty: block.ty.clone(),
        span: block.span,
    }
}

fn subst_stmt(stmt: &hir::Stmt, map: &HashMap<DefId, hir::Expr>) -> hir::Stmt {
    match stmt {
        hir::Stmt::Let(l) => hir::Stmt::Let(hir::LetStmt {
            def_id: l.def_id,
            name: l.name,
            mutable: l.mutable,
            ty: l.ty.clone(),
            init: l.init.as_ref().map(|e| subst_expr(e, map)),
            span: l.span,
        }),
        hir::Stmt::Assign(t, v) => hir::Stmt::Assign(Box::new(subst_expr(t, map)), Box::new(subst_expr(v, map))),
        hir::Stmt::Expr(e) => hir::Stmt::Expr(subst_expr(e, map)),
        hir::Stmt::Return(e, span) => hir::Stmt::Return(e.as_ref().map(|e| subst_expr(e, map)), *span),
        hir::Stmt::While(cond, body) => hir::Stmt::While(Box::new(subst_expr(cond, map)), subst_block(body, map)),
        hir::Stmt::For(pat, iter, body) => {
            hir::Stmt::For(pat.clone(), Box::new(subst_expr(iter, map)), subst_block(body, map))
        }
    }
}

fn subst_else_branch(eb: &hir::ElseBranch, map: &HashMap<DefId, hir::Expr>) -> hir::ElseBranch {
    match eb {
        hir::ElseBranch::Block(b) => hir::ElseBranch::Block(subst_block(b, map)),
        hir::ElseBranch::If(cond, then_block, else_branch) => hir::ElseBranch::If(
            Box::new(subst_expr(cond, map)),
            subst_block(then_block, map),
            else_branch.as_ref().map(|b| Box::new(subst_else_branch(b, map))),
        ),
    }
}

/// Whether `expr` contains a call to a function named `name` anywhere
/// within it — used to reject a candidate that recurses into itself.
fn calls_function_named(expr: &hir::Expr, name: Symbol) -> bool {
    match expr.kind.as_ref() {
        hir::ExprKind::Literal(_) | hir::ExprKind::Ident(_, _) | hir::ExprKind::TypeIdent(_) | hir::ExprKind::ValidRef(_) | hir::ExprKind::Error => false,
        hir::ExprKind::Binary(_, l, r) => calls_function_named(l, name) || calls_function_named(r, name),
        hir::ExprKind::Unary(_, e) => calls_function_named(e, name),
        hir::ExprKind::Call(callee, args) => {
            matches!(callee.kind.as_ref(), hir::ExprKind::Ident(n, _) if *n == name)
                || calls_function_named(callee, name)
                || args.iter().any(|a| calls_function_named(a, name))
        }
        hir::ExprKind::Field(e, _) => calls_function_named(e, name),
        hir::ExprKind::Index(o, i) => calls_function_named(o, name) || calls_function_named(i, name),
        hir::ExprKind::FailProp(e) => calls_function_named(e, name),
        hir::ExprKind::Lambda(_, body) => calls_function_named(body, name),
        hir::ExprKind::ListLit(items) => items.iter().any(|e| calls_function_named(e, name)),
        hir::ExprKind::Interp(segs) => {
            segs.iter().any(|s| matches!(s, hir::InterpSegment::Expr(e) if calls_function_named(e, name)))
        }
        hir::ExprKind::If(cond, then_block, else_branch) => {
            calls_function_named(cond, name)
                || block_calls_function_named(then_block, name)
                || else_branch.as_ref().is_some_and(|eb| else_branch_calls_function_named(eb, name))
        }
        hir::ExprKind::Match(subject, arms) => {
            subject.as_ref().is_some_and(|e| calls_function_named(e, name))
                || arms.iter().any(|a| {
                    a.guard.as_ref().is_some_and(|g| calls_function_named(g, name)) || block_calls_function_named(&a.body, name)
                })
        }
        hir::ExprKind::Comptime(b) => block_calls_function_named(b, name),
        hir::ExprKind::TailLoop(_, body) => block_calls_function_named(body, name),
        hir::ExprKind::TailContinue(pairs) => pairs.iter().any(|(_, e)| calls_function_named(e, name)),
    }
}

fn block_calls_function_named(block: &hir::Block, name: Symbol) -> bool {
    block.stmts.iter().any(|s| stmt_calls_function_named(s, name))
        || block.trailing.as_ref().is_some_and(|e| calls_function_named(e, name))
}

fn stmt_calls_function_named(stmt: &hir::Stmt, name: Symbol) -> bool {
    match stmt {
        hir::Stmt::Let(l) => l.init.as_ref().is_some_and(|e| calls_function_named(e, name)),
        hir::Stmt::Assign(t, v) => calls_function_named(t, name) || calls_function_named(v, name),
        hir::Stmt::Expr(e) => calls_function_named(e, name),
        hir::Stmt::Return(e, _) => e.as_ref().is_some_and(|e| calls_function_named(e, name)),
        hir::Stmt::While(cond, body) => calls_function_named(cond, name) || block_calls_function_named(body, name),
        hir::Stmt::For(_, iter, body) => calls_function_named(iter, name) || block_calls_function_named(body, name),
    }
}

fn else_branch_calls_function_named(eb: &hir::ElseBranch, name: Symbol) -> bool {
    match eb {
        hir::ElseBranch::Block(b) => block_calls_function_named(b, name),
        hir::ElseBranch::If(cond, then_block, else_branch) => {
            calls_function_named(cond, name)
                || block_calls_function_named(then_block, name)
                || else_branch.as_ref().is_some_and(|b| else_branch_calls_function_named(b, name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_sem::types::Type;
    use prvc_util::Span;

    fn int_ty() -> Type {
        Type::Primitive(Symbol::intern("Integer"), vec![])
    }

    #[test]
    fn inlines_a_single_expression_pure_function() {
        let double_id = DefId(0);
        let param_id = DefId(1);
        let x_ref = hir::Expr::new(hir::ExprKind::Ident(Symbol::intern("x"), param_id), int_ty(), Span::DUMMY);
        let two = hir::Expr::new(hir::ExprKind::Literal(prvc_par::ast::Literal::Integer(2)), int_ty(), Span::DUMMY);
        let double_body_expr =
            hir::Expr::new(hir::ExprKind::Binary(prvc_par::ast::BinOp::Mul, x_ref, two), int_ty(), Span::DUMMY);
        let double_body =
            hir::Block { stmts: vec![], trailing: Some(Box::new(double_body_expr)), ty: int_ty(), span: Span::DUMMY };
        let double_fn = hir::FnItem {
            def_id: double_id,
            verb: Verb::Transforms,
            name: Symbol::intern("double"),
            params: vec![hir::Param { def_id: param_id, name: Symbol::intern("x"), ty: int_ty() }],
            ret: int_ty(),
            can_fail: false,
            body: double_body,
            span: Span::DUMMY,
        };

        // Mirrors what the checker actually produces: the callee's
        // `DefId` is always `DefId::DUMMY`, never `double_id`.
        let five = hir::Expr::new(hir::ExprKind::Literal(prvc_par::ast::Literal::Integer(5)), int_ty(), Span::DUMMY);
        let callee = hir::Expr::new(hir::ExprKind::Ident(Symbol::intern("double"), DefId::DUMMY), int_ty(), Span::DUMMY);
        let call = hir::Expr::new(hir::ExprKind::Call(callee, vec![five]), int_ty(), Span::DUMMY);
        let main_body = hir::Block { stmts: vec![], trailing: Some(Box::new(call)), ty: int_ty(), span: Span::DUMMY };
        let main = hir::MainItem { body: main_body, span: Span::DUMMY };

        let items = inline_small_functions(vec![hir::Item::Fn(double_fn), hir::Item::Main(main)]);
        let hir::Item::Main(m) = items.iter().find(|i| matches!(i, hir::Item::Main(_))).unwrap() else {
            unreachable!()
        };
        let trailing = m.body.trailing.as_ref().unwrap();
        assert!(matches!(trailing.kind.as_ref(), hir::ExprKind::Binary(prvc_par::ast::BinOp::Mul, _, _)));
    }

    #[test]
    fn a_self_recursive_function_is_not_a_candidate() {
        let f_id = DefId(0);
        let call = hir::Expr::new(
            hir::ExprKind::Call(hir::Expr::new(hir::ExprKind::Ident(Symbol::intern("loopy"), DefId::DUMMY), int_ty(), Span::DUMMY), vec![]),
            int_ty(),
            Span::DUMMY,
        );
        let body = hir::Block { stmts: vec![], trailing: Some(Box::new(call)), ty: int_ty(), span: Span::DUMMY };
        let f = hir::FnItem {
            def_id: f_id,
            verb: Verb::Transforms,
            name: Symbol::intern("loopy"),
            params: vec![],
            ret: int_ty(),
            can_fail: false,
            body,
            span: Span::DUMMY,
        };
        let call_site = hir::Expr::new(
            hir::ExprKind::Call(hir::Expr::new(hir::ExprKind::Ident(Symbol::intern("loopy"), DefId::DUMMY), int_ty(), Span::DUMMY), vec![]),
            int_ty(),
            Span::DUMMY,
        );
        let main_body = hir::Block { stmts: vec![], trailing: Some(Box::new(call_site)), ty: int_ty(), span: Span::DUMMY };
        let main = hir::MainItem { body: main_body, span: Span::DUMMY };

        let items = inline_small_functions(vec![hir::Item::Fn(f), hir::Item::Main(main)]);
        let hir::Item::Main(m) = items.iter().find(|i| matches!(i, hir::Item::Main(_))).unwrap() else {
            unreachable!()
        };
        // Still a call, not inlined — inlining a self-recursive body
        // would either loop forever or require a separate guard.
        assert!(matches!(m.body.trailing.as_ref().unwrap().kind.as_ref(), hir::ExprKind::Call(_, _)));
    }
}
