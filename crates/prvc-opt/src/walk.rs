//! Shared recursive-descent rewriting used by every pass below. A
//! [`Rewriter`] gets called bottom-up on every expression (children
//! rewritten first) and on every block's final statement list, and can
//! override either hook; everything else passes through unchanged.

use prvc_sem::hir;

pub trait Rewriter {
    fn expr(&mut self, expr: hir::Expr) -> hir::Expr {
        expr
    }

    fn block(&mut self, block: hir::Block) -> hir::Block {
        block
    }
}

pub fn walk_items<R: Rewriter>(items: Vec<hir::Item>, r: &mut R) -> Vec<hir::Item> {
    items.into_iter().map(|item| walk_item(item, r)).collect()
}

fn walk_item<R: Rewriter>(item: hir::Item, r: &mut R) -> hir::Item {
    match item {
        hir::Item::Fn(mut f) => {
            f.body = walk_block(f.body, r);
            hir::Item::Fn(f)
        }
        hir::Item::Main(mut m) => {
            m.body = walk_block(m.body, r);
            hir::Item::Main(m)
        }
        hir::Item::Const(mut c) => {
            c.value = walk_expr(c.value, r);
            hir::Item::Const(c)
        }
        hir::Item::Module(mut m) => {
            m.items = walk_items(m.items, r);
            hir::Item::Module(m)
        }
        other @ hir::Item::Type(_) => other,
    }
}

pub fn walk_block<R: Rewriter>(block: hir::Block, r: &mut R) -> hir::Block {
    let hir::Block { stmts, trailing, ty, span } = block;
    let stmts = stmts.into_iter().map(|s| walk_stmt(s, r)).collect();
    let trailing = trailing.map(|e| Box::new(walk_expr(*e, r)));
    r.block(hir::Block { stmts, trailing, ty, span })
}

fn walk_stmt<R: Rewriter>(stmt: hir::Stmt, r: &mut R) -> hir::Stmt {
    match stmt {
        hir::Stmt::Let(mut l) => {
            l.init = l.init.map(|e| walk_expr(e, r));
            hir::Stmt::Let(l)
        }
        hir::Stmt::Assign(target, value) => {
            hir::Stmt::Assign(Box::new(walk_expr(*target, r)), Box::new(walk_expr(*value, r)))
        }
        hir::Stmt::Expr(e) => hir::Stmt::Expr(walk_expr(e, r)),
        hir::Stmt::Return(e, span) => hir::Stmt::Return(e.map(|e| walk_expr(e, r)), span),
        hir::Stmt::While(cond, body) => hir::Stmt::While(Box::new(walk_expr(*cond, r)), walk_block(body, r)),
        hir::Stmt::For(pat, iter, body) => hir::Stmt::For(pat, Box::new(walk_expr(*iter, r)), walk_block(body, r)),
    }
}

pub fn walk_expr<R: Rewriter>(expr: hir::Expr, r: &mut R) -> hir::Expr {
    let hir::Expr { kind, ty, span } = expr;
    let kind = match *kind {
        hir::ExprKind::Binary(op, l, rhs) => hir::ExprKind::Binary(op, walk_expr(l, r), walk_expr(rhs, r)),
        hir::ExprKind::Unary(op, e) => hir::ExprKind::Unary(op, walk_expr(e, r)),
        hir::ExprKind::Call(callee, args) => {
            hir::ExprKind::Call(walk_expr(callee, r), args.into_iter().map(|a| walk_expr(a, r)).collect())
        }
        hir::ExprKind::Field(e, name) => hir::ExprKind::Field(walk_expr(e, r), name),
        hir::ExprKind::Index(obj, idx) => hir::ExprKind::Index(walk_expr(obj, r), walk_expr(idx, r)),
        hir::ExprKind::FailProp(e) => hir::ExprKind::FailProp(walk_expr(e, r)),
        hir::ExprKind::Lambda(params, body) => hir::ExprKind::Lambda(params, walk_expr(body, r)),
        hir::ExprKind::ListLit(items) => hir::ExprKind::ListLit(items.into_iter().map(|e| walk_expr(e, r)).collect()),
        hir::ExprKind::Interp(segs) => hir::ExprKind::Interp(
            segs.into_iter()
                .map(|s| match s {
                    hir::InterpSegment::Text(t) => hir::InterpSegment::Text(t),
                    hir::InterpSegment::Expr(e) => hir::InterpSegment::Expr(walk_expr(e, r)),
                })
                .collect(),
        ),
        hir::ExprKind::If(cond, then_block, else_branch) => hir::ExprKind::If(
            walk_expr(cond, r),
            walk_block(then_block, r),
            else_branch.map(|eb| walk_else_branch(eb, r)),
        ),
        hir::ExprKind::Match(subject, arms) => hir::ExprKind::Match(
            subject.map(|e| walk_expr(e, r)),
            arms.into_iter()
                .map(|mut a| {
                    a.guard = a.guard.map(|g| walk_expr(g, r));
                    a.body = walk_block(a.body, r);
                    a
                })
                .collect(),
        ),
        hir::ExprKind::Comptime(b) => hir::ExprKind::Comptime(walk_block(b, r)),
        hir::ExprKind::TailLoop(params, body) => hir::ExprKind::TailLoop(params, walk_block(body, r)),
        hir::ExprKind::TailContinue(pairs) => {
            hir::ExprKind::TailContinue(pairs.into_iter().map(|(n, e)| (n, walk_expr(e, r))).collect())
        }
        other @ (hir::ExprKind::Literal(_)
        | hir::ExprKind::Ident(..)
        | hir::ExprKind::TypeIdent(_)
        | hir::ExprKind::ValidRef(_)
        | hir::ExprKind::Error) => other,
    };
    r.expr(hir::Expr::new(kind, ty, span))
}

fn walk_else_branch<R: Rewriter>(eb: hir::ElseBranch, r: &mut R) -> hir::ElseBranch {
    match eb {
        hir::ElseBranch::Block(b) => hir::ElseBranch::Block(walk_block(b, r)),
        hir::ElseBranch::If(cond, then_block, else_branch) => hir::ElseBranch::If(
            Box::new(walk_expr(*cond, r)),
            walk_block(then_block, r),
            else_branch.map(|b| Box::new(walk_else_branch(*b, r))),
        ),
    }
}
