//! Function-item emission: signature mapping, failable-return wrapping,
//! and the tail-loop shape the optimizer's tail-call pass introduces.

use std::fmt::Write as _;

use prvc_sem::hir;
use prvc_sem::types::Type;
use prvc_util::Symbol;

use crate::error::{CodeGenError, Result};
use crate::expr::{emit_block_statements, emit_expr, EmitCtx};
use crate::mangle::FnVerbTable;
use crate::types::c_type;

pub fn emit_fn(f: &hir::FnItem, verbs: &FnVerbTable) -> Result<(String, Vec<String>)> {
    let mut ctx = EmitCtx::new(verbs);
    let name = crate::mangle::mangle_definition(f.verb, f.name, &f.params.iter().map(|p| p.ty.clone()).collect::<Vec<_>>())?;
    let ret_ty = if f.can_fail { "Prove_Result".to_string() } else { c_type(&f.ret)? };
    let params_c: Result<Vec<String>> = f.params.iter().map(|p| Ok(format!("{} {}", c_type(&p.ty)?, p.name.as_str()))).collect();

    let mut out = format!("{} {}({}) {{\n", ret_ty, name, params_c?.join(", "));
    out.push_str(&render_body(&f.body, f.can_fail, &f.params, &mut ctx)?);
    out.push_str("}\n\n");
    Ok((out, ctx.hoisted))
}

pub fn emit_main(m: &hir::MainItem, verbs: &FnVerbTable) -> Result<(String, Vec<String>)> {
    let mut ctx = EmitCtx::new(verbs);
    let mut out = "int main(void) {\n".to_string();
    out.push_str(&emit_block_statements(&m.body, &mut ctx)?);
    if let Some(trailing) = &m.body.trailing {
        let value = emit_expr(trailing, &mut ctx)?;
        out.push_str(&ctx.prelude);
        writeln!(out, "    (void)({});", value).unwrap();
    } else {
        out.push_str(&ctx.prelude);
    }
    out.push_str("    return 0;\n}\n\n");
    Ok((out, ctx.hoisted))
}

/// Renders a function body, special-casing the whole-body
/// [`hir::ExprKind::TailLoop`] shape the tail-call pass produces, and
/// wrapping the final value in a success [`Prove_Result`] when the
/// function is failable and its trailing value isn't already one.
fn render_body(body: &hir::Block, can_fail: bool, params: &[hir::Param], ctx: &mut EmitCtx) -> Result<String> {
    if body.stmts.is_empty() {
        if let Some(trailing) = &body.trailing {
            if let hir::ExprKind::TailLoop(loop_params, loop_body) = trailing.kind.as_ref() {
                return emit_tail_loop_as_fn_body(loop_params, loop_body, params, ctx);
            }
        }
    }

    let mut out = emit_block_statements(body, ctx)?;
    match &body.trailing {
        Some(trailing) => {
            let value = emit_expr(trailing, ctx)?;
            out.push_str(&std::mem::take(&mut ctx.prelude));
            let wrapped = wrap_if_failable(&value, &trailing.ty, can_fail);
            writeln!(out, "    return {};", wrapped).unwrap();
        }
        None => {
            if can_fail {
                out.push_str("    return prove_result_ok_unit();\n");
            }
        }
    }
    Ok(out)
}

fn emit_tail_loop_as_fn_body(
    loop_params: &[Symbol],
    loop_body: &hir::Block,
    fn_params: &[hir::Param],
    ctx: &mut EmitCtx,
) -> Result<String> {
    ctx.tail_loop_params = loop_params
        .iter()
        .map(|name| {
            let ty = fn_params.iter().find(|p| p.name == *name).map(|p| p.ty.clone()).unwrap_or(Type::Error);
            c_type(&ty).map(|ct| (name.as_str().to_string(), ct))
        })
        .collect::<Result<Vec<_>>>()?;
    let mut out = "    while (1) {\n".to_string();
    out.push_str(&emit_block_statements(loop_body, ctx)?);
    match &loop_body.trailing {
        Some(trailing) => {
            if !try_emit_tail_continue(trailing, ctx)? {
                let value = emit_expr(trailing, ctx)?;
                out.push_str(&std::mem::take(&mut ctx.prelude));
                writeln!(out, "    return {};", value).unwrap();
            } else {
                out.push_str(&std::mem::take(&mut ctx.prelude));
            }
        }
        None => {}
    }
    out.push_str("    }\n");
    Ok(out)
}

/// Emits a `TailLoop` reached as an ordinary statement (rather than a
/// whole function body) — the optimizer never currently produces this
/// shape, but a future pass might, so the emitter doesn't assume a
/// tail loop can only ever be a function's entire body.
pub fn emit_tail_loop(params: &[Symbol], body: &hir::Block, ctx: &mut EmitCtx) -> Result<String> {
    let saved = std::mem::take(&mut ctx.tail_loop_params);
    ctx.tail_loop_params = params.iter().map(|name| (name.as_str().to_string(), "int64_t".to_string())).collect();
    let mut out = "    while (1) {\n".to_string();
    out.push_str(&emit_block_statements(body, ctx)?);
    if let Some(trailing) = &body.trailing {
        if !try_emit_tail_continue(trailing, ctx)? {
            let _ = emit_expr(trailing, ctx)?;
            out.push_str(&std::mem::take(&mut ctx.prelude));
        } else {
            out.push_str(&std::mem::take(&mut ctx.prelude));
        }
    }
    out.push_str("    }\n");
    ctx.tail_loop_params = saved;
    Ok(out)
}

/// If `e` is a [`hir::ExprKind::TailContinue`], emits the parallel
/// reassignment of the enclosing loop's parameters followed by a C
/// `continue` into `ctx.prelude` and returns `true`; otherwise a no-op.
pub fn try_emit_tail_continue(e: &hir::Expr, ctx: &mut EmitCtx) -> Result<bool> {
    if let hir::ExprKind::TailContinue(pairs) = e.kind.as_ref() {
        emit_tail_continue(pairs, ctx)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

fn emit_tail_continue(pairs: &[(Symbol, hir::Expr)], ctx: &mut EmitCtx) -> Result<()> {
    let mut temps = Vec::with_capacity(pairs.len());
    for (name, value) in pairs {
        let value_c = emit_expr(value, ctx)?;
        let ty = ctx
            .tail_loop_params
            .iter()
            .find(|(n, _)| n == name.as_str())
            .map(|(_, t)| t.clone())
            .ok_or_else(|| CodeGenError::Internal(format!("tail continue reassigns unknown loop parameter `{}`", name.as_str())))?;
        let temp = format!("__tc_{}", name.as_str());
        writeln!(ctx.prelude, "    {} {} = {};", ty, temp, value_c).unwrap();
        temps.push((name.as_str().to_string(), temp));
    }
    for (name, temp) in &temps {
        writeln!(ctx.prelude, "    {} = {};", name, temp).unwrap();
    }
    writeln!(ctx.prelude, "    continue;").unwrap();
    Ok(())
}

/// Wraps a failable function's trailing value in a success `Result`
/// unless it's already `Result`-shaped (e.g. it forwards another
/// failable call's result without unwrapping it with `!`).
fn wrap_if_failable(value_c: &str, value_ty: &Type, can_fail: bool) -> String {
    if !can_fail {
        return value_c.to_string();
    }
    if matches!(value_ty, Type::Generic(name, _) if name.as_str() == "Result") {
        return value_c.to_string();
    }
    format!("prove_result_ok((void*)({}))", value_c)
}

pub fn emit_items(items: &[hir::Item], verbs: &FnVerbTable, out: &mut String, hoisted: &mut Vec<String>) -> Result<()> {
    for item in items {
        match item {
            hir::Item::Fn(f) => {
                let (body, mut lambda_defs) = emit_fn(f, verbs)?;
                hoisted.append(&mut lambda_defs);
                out.push_str(&body);
            }
            hir::Item::Main(m) => {
                let (body, mut lambda_defs) = emit_main(m, verbs)?;
                hoisted.append(&mut lambda_defs);
                out.push_str(&body);
            }
            hir::Item::Module(module) => emit_items(&module.items, verbs, out, hoisted)?,
            hir::Item::Const(c) => {
                let mut ctx = EmitCtx::new(verbs);
                let value = emit_expr(&c.value, &mut ctx)?;
                if !ctx.prelude.is_empty() {
                    return Err(CodeGenError::Internal(format!(
                        "const `{}`'s initializer isn't a plain constant expression",
                        c.name.as_str()
                    )));
                }
                hoisted.append(&mut ctx.hoisted);
                writeln!(out, "static const {} prv_const_{} = {};", c_type(&c.ty)?, c.name.as_str(), value).unwrap();
            }
            hir::Item::Type(_) => {}
        }
    }
    Ok(())
}
