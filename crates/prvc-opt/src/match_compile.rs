//! Match compilation: consecutive top-level statements that are all
//! `match` expressions on the same identifier fold into one `match`
//! with the arm lists concatenated in order.

use prvc_sem::hir;
use prvc_util::DefId;

use crate::walk::{walk_items, Rewriter};

struct MatchCompiler;

impl Rewriter for MatchCompiler {
    fn block(&mut self, block: hir::Block) -> hir::Block {
        hir::Block { stmts: merge_consecutive(block.stmts), ..block }
    }
}

pub fn merge(items: Vec<hir::Item>) -> Vec<hir::Item> {
    walk_items(items, &mut MatchCompiler)
}

fn merge_consecutive(stmts: Vec<hir::Stmt>) -> Vec<hir::Stmt> {
    let mut out: Vec<hir::Stmt> = Vec::with_capacity(stmts.len());
    for stmt in stmts {
        let (prev, cur) = match (out.pop(), stmt) {
            (Some(hir::Stmt::Expr(prev)), hir::Stmt::Expr(cur)) => (prev, cur),
            (Some(other), cur) => {
                out.push(other);
                out.push(cur);
                continue;
            }
            (None, cur) => {
                out.push(cur);
                continue;
            }
        };
        match try_merge_match(prev, cur) {
            Ok(merged) => out.push(hir::Stmt::Expr(merged)),
            Err((prev, cur)) => {
                out.push(hir::Stmt::Expr(prev));
                out.push(hir::Stmt::Expr(cur));
            }
        }
    }
    out
}

fn match_subject_def_id(expr: &hir::Expr) -> Option<DefId> {
    if let hir::ExprKind::Match(Some(subject), _) = expr.kind.as_ref() {
        if let hir::ExprKind::Ident(_, id) = subject.kind.as_ref() {
            return Some(*id);
        }
    }
    None
}

fn try_merge_match(prev: hir::Expr, cur: hir::Expr) -> Result<hir::Expr, (hir::Expr, hir::Expr)> {
    let prev_id = match_subject_def_id(&prev);
    let cur_id = match_subject_def_id(&cur);
    if prev_id.is_none() || prev_id != cur_id {
        return Err((prev, cur));
    }
    let span = prev.span.merge(cur.span);
    let ty = cur.ty.clone();
    let hir::Expr { kind: prev_kind, .. } = prev;
    let hir::Expr { kind: cur_kind, .. } = cur;
    let (subject, mut arms) = match *prev_kind {
        hir::ExprKind::Match(subject, arms) => (subject, arms),
        _ => unreachable!("match_subject_def_id only returns Some for a Match expr"),
    };
    let cur_arms = match *cur_kind {
        hir::ExprKind::Match(_, arms) => arms,
        _ => unreachable!("match_subject_def_id only returns Some for a Match expr"),
    };
    arms.extend(cur_arms);
    Ok(hir::Expr::new(hir::ExprKind::Match(subject, arms), ty, span))
}
