//! Expression emission: turns one checked HIR expression into a C
//! value expression, plus whatever statements (temporaries, `switch`
//! blocks) it needs emitted immediately before it can be used.
//!
//! Control constructs that are expressions in the source (`if`,
//! `match`) aren't C expressions, so emitting one allocates a result
//! temporary, writes the construct as a statement into `ctx.prelude`,
//! and returns the temporary's name as the "value". A caller that only
//! wanted a statement (an `if`/`match` used as a bare statement, not a
//! value) can simply discard the returned name.

use std::fmt::Write as _;

use prvc_par::ast::{BinOp, Literal, UnOp};
use prvc_sem::hir;
use prvc_sem::types::Type;

use crate::error::{CodeGenError, Result};
use crate::mangle::{resolve_callee, FnVerbTable};
use crate::types::c_type;

pub struct EmitCtx<'a> {
    pub verbs: &'a FnVerbTable,
    pub prelude: String,
    temp_counter: u32,
    /// Hoisted lambda definitions, emitted before the function that
    /// first introduced them.
    pub hoisted: Vec<String>,
    lambda_counter: u32,
    /// Names (and C types) of the enclosing `TailLoop`'s parameters, if
    /// any expression being emitted is inside one — needed so a nested
    /// `TailContinue` knows which C locals to reassign.
    pub tail_loop_params: Vec<(String, String)>,
}

impl<'a> EmitCtx<'a> {
    pub fn new(verbs: &'a FnVerbTable) -> Self {
        EmitCtx { verbs, prelude: String::new(), temp_counter: 0, hoisted: Vec::new(), lambda_counter: 0, tail_loop_params: Vec::new() }
    }

    fn fresh_temp(&mut self, prefix: &str) -> String {
        let name = format!("__{}_{}", prefix, self.temp_counter);
        self.temp_counter += 1;
        name
    }

    fn fresh_lambda_name(&mut self) -> String {
        let name = format!("prv_lambda_{}", self.lambda_counter);
        self.lambda_counter += 1;
        name
    }
}

/// Emits `e` and returns the C expression text that evaluates to its
/// value. Any statements needed first are appended to `ctx.prelude`.
pub fn emit_expr(e: &hir::Expr, ctx: &mut EmitCtx) -> Result<String> {
    match e.kind.as_ref() {
        hir::ExprKind::Literal(lit) => emit_literal(lit),
        hir::ExprKind::Ident(name, _) => Ok(name.as_str().to_string()),
        hir::ExprKind::TypeIdent(name) => Ok(format!("Prove_{}", name.as_str())),
        hir::ExprKind::ValidRef(name) => Ok(name.as_str().to_string()),
        hir::ExprKind::Error => Err(CodeGenError::Internal("ExprKind::Error reached codegen".to_string())),

        hir::ExprKind::Binary(op, l, r) => emit_binary(*op, l, r, ctx),
        hir::ExprKind::Unary(op, operand) => {
            let inner = emit_expr(operand, ctx)?;
            Ok(match op {
                UnOp::Neg => format!("(-{})", inner),
                UnOp::Not => format!("(!{})", inner),
            })
        }

        hir::ExprKind::Call(callee, args) => emit_call(e, callee, args, ctx),
        hir::ExprKind::Field(obj, field) => Ok(format!("({}).{}", emit_expr(obj, ctx)?, field.as_str())),
        hir::ExprKind::Index(obj, idx) => {
            let obj_c = emit_expr(obj, ctx)?;
            let idx_c = emit_expr(idx, ctx)?;
            Ok(format!("prove_list_get({}, {})", obj_c, idx_c))
        }

        hir::ExprKind::FailProp(inner) => emit_fail_prop(e, inner, ctx),
        hir::ExprKind::ListLit(items) => emit_list_lit(items, ctx),
        hir::ExprKind::Interp(segments) => emit_interp(segments, ctx),
        hir::ExprKind::Lambda(params, body) => emit_lambda(params, body, &e.ty, ctx),

        hir::ExprKind::If(..) => emit_if_as_value(e, ctx),
        hir::ExprKind::Match(..) => emit_match_as_value(e, ctx),

        hir::ExprKind::Comptime(block) => {
            // Evaluated the same as a normal block; compile-time-ness
            // is a checker-side guarantee, not something the emitter
            // treats differently.
            emit_block_as_value(block, ctx)
        }

        hir::ExprKind::TailLoop(..) | hir::ExprKind::TailContinue(..) => {
            Err(CodeGenError::Internal("TailLoop/TailContinue must be emitted as a statement, not a value".to_string()))
        }
    }
}

fn emit_literal(lit: &Literal) -> Result<String> {
    Ok(match lit {
        Literal::Integer(n) => format!("{}", n),
        Literal::Decimal(f) => format!("{}", f),
        Literal::String(s) | Literal::TripleString(s) | Literal::RawString(s) => {
            format!("prove_string_from_literal({:?})", s.as_str())
        }
        Literal::Char(c) => format!("'{}'", c.escape_default()),
        Literal::Bool(b) => if *b { "true".to_string() } else { "false".to_string() },
        Literal::Regex(s) | Literal::Path(s) => format!("prove_string_from_literal({:?})", s.as_str()),
    })
}

fn is_string(ty: &Type) -> bool {
    matches!(ty, Type::Primitive(name, _) if name.as_str() == "String")
}

fn emit_binary(op: BinOp, l: &hir::Expr, r: &hir::Expr, ctx: &mut EmitCtx) -> Result<String> {
    let left = emit_expr(l, ctx)?;
    let right = emit_expr(r, ctx)?;
    if op == BinOp::Add && is_string(&l.ty) {
        return Ok(format!("prove_string_concat({}, {})", left, right));
    }
    if (op == BinOp::Eq || op == BinOp::Ne) && is_string(&l.ty) {
        let eq = format!("prove_string_eq({}, {})", left, right);
        return Ok(if op == BinOp::Eq { eq } else { format!("(!{})", eq) });
    }
    let c_op = match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Mod => "%",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::Lt => "<",
        BinOp::Gt => ">",
        BinOp::Le => "<=",
        BinOp::Ge => ">=",
        BinOp::And => "&&",
        BinOp::Or => "||",
        BinOp::Range => return Ok(format!("prove_list_range({}, {})", left, right)),
    };
    Ok(format!("({} {} {})", left, c_op, right))
}

fn emit_call(call_expr: &hir::Expr, callee: &hir::Expr, args: &[hir::Expr], ctx: &mut EmitCtx) -> Result<String> {
    let name = match callee.kind.as_ref() {
        hir::ExprKind::Ident(name, _) => *name,
        _ => {
            // A called lambda value rather than a named function: emit
            // the callee expression directly as a C function pointer.
            let callee_c = emit_expr(callee, ctx)?;
            let arg_cs: Result<Vec<String>> = args.iter().map(|a| emit_expr(a, ctx)).collect();
            return Ok(format!("{}({})", callee_c, arg_cs?.join(", ")));
        }
    };

    // `to_string`/`len` dispatch by their single argument's own type.
    if name.as_str() == "to_string" && args.len() == 1 {
        return emit_to_string(&args[0], ctx);
    }
    if name.as_str() == "len" && args.len() == 1 {
        let arg_c = emit_expr(&args[0], ctx)?;
        return Ok(if is_string(&args[0].ty) { format!("prove_string_len({})", arg_c) } else { format!("prove_list_len({})", arg_c) });
    }

    let resolved = resolve_callee(name, &call_expr.ty, args, ctx.verbs)?;
    let arg_cs: Result<Vec<String>> = args.iter().map(|a| emit_expr(a, ctx)).collect();
    Ok(format!("{}({})", resolved, arg_cs?.join(", ")))
}

fn emit_to_string(arg: &hir::Expr, ctx: &mut EmitCtx) -> Result<String> {
    let arg_c = emit_expr(arg, ctx)?;
    let converter = match &arg.ty {
        Type::Primitive(name, _) => match name.as_str() {
            "Integer" => "prove_int_to_string",
            "Decimal" => "prove_decimal_to_string",
            "Boolean" => "prove_bool_to_string",
            "Character" => "prove_char_to_string",
            "Byte" => "prove_byte_to_string",
            "String" => return Ok(arg_c),
            other => return Err(CodeGenError::TypeMappingError(format!("no `to_string` converter for `{}`", other))),
        },
        other => return Err(CodeGenError::TypeMappingError(format!("`to_string` not supported for {:?}", other))),
    };
    Ok(format!("{}({})", converter, arg_c))
}

/// `e!`: evaluate `e` (a `Result`) into a fresh temporary; if it's an
/// error, return it immediately; otherwise the value is the unwrapped
/// success payload.
fn emit_fail_prop(e: &hir::Expr, inner: &hir::Expr, ctx: &mut EmitCtx) -> Result<String> {
    let inner_c = emit_expr(inner, ctx)?;
    let temp = ctx.fresh_temp("failprop");
    writeln!(ctx.prelude, "    Prove_Result {} = {};", temp, inner_c).unwrap();
    writeln!(ctx.prelude, "    if (prove_result_is_err({})) return {};", temp, temp).unwrap();
    let unwrap_fn = unwrap_fn_for(&e.ty)?;
    Ok(format!("{}({})", unwrap_fn, temp))
}

fn unwrap_fn_for(ty: &Type) -> Result<&'static str> {
    Ok(match ty {
        Type::Primitive(name, _) => match name.as_str() {
            "Integer" | "Byte" | "Boolean" | "Character" => "prove_result_unwrap_int",
            "String" => "prove_result_unwrap_ptr",
            "Decimal" => "prove_result_unwrap_double",
            _ => "prove_result_unwrap_ptr",
        },
        Type::Unit => "prove_result_unwrap_unit",
        _ => "prove_result_unwrap_ptr",
    })
}

fn emit_list_lit(items: &[hir::Expr], ctx: &mut EmitCtx) -> Result<String> {
    let temp = ctx.fresh_temp("list");
    writeln!(ctx.prelude, "    Prove_List* {} = prove_list_new({});", temp, items.len()).unwrap();
    for item in items {
        let item_c = emit_expr(item, ctx)?;
        writeln!(ctx.prelude, "    prove_list_push({}, (void*){});", temp, item_c).unwrap();
    }
    Ok(temp)
}

fn emit_interp(segments: &[hir::InterpSegment], ctx: &mut EmitCtx) -> Result<String> {
    let mut pieces = Vec::with_capacity(segments.len());
    for seg in segments {
        match seg {
            hir::InterpSegment::Text(t) => pieces.push(format!("prove_string_from_literal({:?})", t.as_str())),
            hir::InterpSegment::Expr(e) => pieces.push(emit_to_string(e, ctx)?),
        }
    }
    if pieces.is_empty() {
        return Ok("prove_string_from_literal(\"\")".to_string());
    }
    let mut acc = pieces[0].clone();
    for piece in &pieces[1..] {
        acc = format!("prove_string_concat({}, {})", acc, piece);
    }
    Ok(acc)
}

fn emit_lambda(params: &[prvc_util::Symbol], body: &hir::Expr, ty: &Type, ctx: &mut EmitCtx) -> Result<String> {
    let name = ctx.fresh_lambda_name();
    let ret_ty = match ty {
        Type::Fn(_, ret) => c_type(ret)?,
        _ => c_type(&body.ty)?,
    };
    let param_tys = match ty {
        Type::Fn(param_tys, _) => param_tys.clone(),
        _ => params.iter().map(|_| body.ty.clone()).collect(),
    };
    let mut sub_ctx = EmitCtx::new(ctx.verbs);
    let value = emit_expr(body, &mut sub_ctx)?;
    let mut def = format!(
        "static {} {}({}) {{\n",
        ret_ty,
        name,
        params
            .iter()
            .zip(param_tys.iter())
            .map(|(p, t)| c_type(t).map(|ct| format!("{} {}", ct, p.as_str())))
            .collect::<Result<Vec<_>>>()?
            .join(", ")
    );
    def.push_str(&sub_ctx.prelude);
    def.push_str(&format!("    return {};\n", value));
    def.push_str("}\n\n");
    ctx.hoisted.push(def);
    ctx.hoisted.extend(sub_ctx.hoisted);
    Ok(name)
}

fn emit_if_as_value(e: &hir::Expr, ctx: &mut EmitCtx) -> Result<String> {
    let hir::ExprKind::If(cond, then_block, else_branch) = e.kind.as_ref() else { unreachable!() };
    if matches!(e.ty, Type::Unit) {
        emit_if_as_statement(cond, then_block, else_branch.as_ref(), ctx)?;
        return Ok("/* unit */ 0".to_string());
    }
    let result = ctx.fresh_temp("if_result");
    let result_ty = c_type(&e.ty)?;
    writeln!(ctx.prelude, "    {} {};", result_ty, result).unwrap();
    let cond_c = emit_expr(cond, ctx)?;
    writeln!(ctx.prelude, "    if ({}) {{", cond_c).unwrap();
    emit_assigning_block(then_block, &result, ctx)?;
    writeln!(ctx.prelude, "    }}").unwrap();
    if let Some(eb) = else_branch {
        write!(ctx.prelude, "    else ").unwrap();
        emit_else_branch_assigning(eb, &result, ctx)?;
    }
    Ok(result)
}

fn emit_if_as_statement(
    cond: &hir::Expr,
    then_block: &hir::Block,
    else_branch: Option<&hir::ElseBranch>,
    ctx: &mut EmitCtx,
) -> Result<()> {
    let cond_c = emit_expr(cond, ctx)?;
    writeln!(ctx.prelude, "    if ({}) {{", cond_c).unwrap();
    ctx.prelude.push_str(&emit_block_statements(then_block, ctx)?);
    writeln!(ctx.prelude, "    }}").unwrap();
    if let Some(eb) = else_branch {
        write!(ctx.prelude, "    else ").unwrap();
        match eb {
            hir::ElseBranch::Block(b) => {
                writeln!(ctx.prelude, "{{").unwrap();
                ctx.prelude.push_str(&emit_block_statements(b, ctx)?);
                writeln!(ctx.prelude, "    }}").unwrap();
            }
            hir::ElseBranch::If(c2, t2, e2) => {
                emit_if_as_statement(c2, t2, e2.as_deref(), ctx)?;
            }
        }
    }
    Ok(())
}

fn emit_assigning_block(block: &hir::Block, result: &str, ctx: &mut EmitCtx) -> Result<()> {
    ctx.prelude.push_str(&emit_block_statements(block, ctx)?);
    if let Some(trailing) = &block.trailing {
        if crate::func::try_emit_tail_continue(trailing, ctx)? {
            return Ok(());
        }
        let value = emit_expr(trailing, ctx)?;
        writeln!(ctx.prelude, "    {} = {};", result, value).unwrap();
    }
    Ok(())
}

fn emit_else_branch_assigning(eb: &hir::ElseBranch, result: &str, ctx: &mut EmitCtx) -> Result<()> {
    match eb {
        hir::ElseBranch::Block(b) => {
            writeln!(ctx.prelude, "{{").unwrap();
            emit_assigning_block(b, result, ctx)?;
            writeln!(ctx.prelude, "    }}").unwrap();
        }
        hir::ElseBranch::If(cond, then_block, else_branch) => {
            let cond_c = emit_expr(cond, ctx)?;
            writeln!(ctx.prelude, "if ({}) {{", cond_c).unwrap();
            emit_assigning_block(then_block, result, ctx)?;
            writeln!(ctx.prelude, "    }}").unwrap();
            if let Some(eb2) = else_branch.as_deref() {
                write!(ctx.prelude, "    else ").unwrap();
                emit_else_branch_assigning(eb2, result, ctx)?;
            }
        }
    }
    Ok(())
}

/// `match` on an algebraic subject compiles to a `switch` on its tag;
/// a boolean/other-literal subject compiles to a chain of `if`/`else`,
/// since C has no tag to switch on for those.
fn emit_match_as_value(e: &hir::Expr, ctx: &mut EmitCtx) -> Result<String> {
    let hir::ExprKind::Match(subject, arms) = e.kind.as_ref() else { unreachable!() };
    let Some(subject) = subject else {
        return Err(CodeGenError::Internal("subject-less match reached codegen".to_string()));
    };
    let result_needed = !matches!(e.ty, Type::Unit);
    let result = if result_needed {
        let temp = ctx.fresh_temp("match_result");
        writeln!(ctx.prelude, "    {} {};", c_type(&e.ty)?, temp).unwrap();
        Some(temp)
    } else {
        None
    };

    let subject_c = emit_expr(subject, ctx)?;
    let has_guard = arms.iter().any(|a| a.guard.is_some());
    if let Type::Algebraic(alg) = &subject.ty {
        let subject_temp = ctx.fresh_temp("match_subject");
        writeln!(ctx.prelude, "    Prove_{} {} = {};", alg.name.as_str(), subject_temp, subject_c).unwrap();
        if has_guard {
            emit_algebraic_arms_as_if_chain(&subject_temp, alg, arms, result.as_deref(), ctx)?;
        } else {
            writeln!(ctx.prelude, "    switch ({}.tag) {{", subject_temp).unwrap();
            for arm in arms {
                emit_algebraic_arm(arm, alg, &subject_temp, result.as_deref(), ctx)?;
            }
            writeln!(ctx.prelude, "    }}").unwrap();
        }
    } else {
        emit_literal_match_chain(&subject_c, &subject.ty, arms, result.as_deref(), ctx)?;
    }
    Ok(result.unwrap_or_else(|| "/* unit */ 0".to_string()))
}

/// Binds a variant pattern's field subpatterns (each a plain binding,
/// per how the parser desugars match-arm field patterns) as C locals
/// pulled out of the tagged union's payload.
fn bind_variant_fields(
    variant_name: prvc_util::Symbol,
    subpatterns: &[hir::Pattern],
    alg: &prvc_sem::types::AlgebraicType,
    subject_temp: &str,
    ctx: &mut EmitCtx,
) -> Result<()> {
    for (i, sub) in subpatterns.iter().enumerate() {
        if let hir::Pattern::Binding(_, name, _) = sub {
            let fields = alg.variants.iter().find(|(n, _)| *n == variant_name).map(|(_, f)| f.as_slice()).unwrap_or(&[]);
            let field_ty = fields.get(i).cloned().unwrap_or(Type::Error);
            writeln!(
                ctx.prelude,
                "        {} {} = {}.payload.{}._{};",
                c_type(&field_ty)?,
                name.as_str(),
                subject_temp,
                variant_name.as_str(),
                i
            )
            .unwrap();
        }
    }
    Ok(())
}

fn emit_algebraic_arm(
    arm: &hir::Arm,
    alg: &prvc_sem::types::AlgebraicType,
    subject_temp: &str,
    result: Option<&str>,
    ctx: &mut EmitCtx,
) -> Result<()> {
    match &arm.pattern {
        hir::Pattern::Variant(variant_name, subpatterns, _) => {
            writeln!(ctx.prelude, "    case {}_TAG_{}: {{", alg.name.as_str(), variant_name.as_str().to_uppercase()).unwrap();
            bind_variant_fields(*variant_name, subpatterns, alg, subject_temp, ctx)?;
            emit_arm_body(arm, result, ctx)?;
            writeln!(ctx.prelude, "        break;\n    }}").unwrap();
        }
        hir::Pattern::Wildcard(_) | hir::Pattern::Binding(..) => {
            writeln!(ctx.prelude, "    default: {{").unwrap();
            emit_arm_body(arm, result, ctx)?;
            writeln!(ctx.prelude, "        break;\n    }}").unwrap();
        }
        hir::Pattern::Literal(..) => {
            return Err(CodeGenError::Internal("a literal pattern against an algebraic subject should have been rejected by the checker".to_string()));
        }
    }
    Ok(())
}

/// Used instead of a `switch` when any arm carries a guard: tag
/// equality and the guard both gate each arm, in source order, so a
/// guard that fails falls through to the next arm testing the same
/// tag (exhaustiveness is the checker's responsibility, not emitted
/// code's).
fn emit_algebraic_arms_as_if_chain(
    subject_temp: &str,
    alg: &prvc_sem::types::AlgebraicType,
    arms: &[hir::Arm],
    result: Option<&str>,
    ctx: &mut EmitCtx,
) -> Result<()> {
    let mut first = true;
    for arm in arms {
        let prefix = if first { "    " } else { "    else " };
        match &arm.pattern {
            hir::Pattern::Variant(variant_name, subpatterns, _) => {
                writeln!(ctx.prelude, "{}if ({}.tag == {}_TAG_{}", prefix, subject_temp, alg.name.as_str(), variant_name.as_str().to_uppercase()).unwrap();
                write!(ctx.prelude, "    ").unwrap();
                close_guard_open_brace(arm, ctx)?;
                bind_variant_fields(*variant_name, subpatterns, alg, subject_temp, ctx)?;
                emit_arm_body(arm, result, ctx)?;
                writeln!(ctx.prelude, "    }}").unwrap();
            }
            hir::Pattern::Wildcard(_) | hir::Pattern::Binding(..) => {
                write!(ctx.prelude, "{}", prefix).unwrap();
                match &arm.guard {
                    Some(guard) => {
                        let guard_c = emit_expr(guard, ctx)?;
                        writeln!(ctx.prelude, "if ({}) {{", guard_c).unwrap();
                    }
                    None => {
                        writeln!(ctx.prelude, "{{").unwrap();
                    }
                }
                emit_arm_body(arm, result, ctx)?;
                writeln!(ctx.prelude, "    }}").unwrap();
            }
            hir::Pattern::Literal(..) => {
                return Err(CodeGenError::Internal("a literal pattern against an algebraic subject should have been rejected by the checker".to_string()));
            }
        }
        first = false;
    }
    Ok(())
}

/// Closes the tag-equality condition opened by the caller, ANDing in
/// the arm's guard (if any) before opening the arm's brace.
fn close_guard_open_brace(arm: &hir::Arm, ctx: &mut EmitCtx) -> Result<()> {
    match &arm.guard {
        Some(guard) => {
            let guard_c = emit_expr(guard, ctx)?;
            writeln!(ctx.prelude, " && ({})) {{", guard_c).unwrap();
        }
        None => {
            writeln!(ctx.prelude, ") {{").unwrap();
        }
    }
    Ok(())
}

fn emit_literal_match_chain(subject_c: &str, subject_ty: &Type, arms: &[hir::Arm], result: Option<&str>, ctx: &mut EmitCtx) -> Result<()> {
    let mut first = true;
    for arm in arms {
        let prefix = if first { "    " } else { "    else " };
        match &arm.pattern {
            hir::Pattern::Literal(lit, _) => {
                let lit_c = emit_literal(lit)?;
                write!(ctx.prelude, "{}if ({} == {}", prefix, subject_c, lit_c).unwrap();
                close_guard_open_brace(arm, ctx)?;
                emit_arm_body(arm, result, ctx)?;
                writeln!(ctx.prelude, "    }}").unwrap();
            }
            hir::Pattern::Wildcard(_) => {
                write!(ctx.prelude, "{}", prefix).unwrap();
                match &arm.guard {
                    Some(guard) => {
                        let guard_c = emit_expr(guard, ctx)?;
                        writeln!(ctx.prelude, "if ({}) {{", guard_c).unwrap();
                    }
                    None => writeln!(ctx.prelude, "{{").unwrap(),
                }
                emit_arm_body(arm, result, ctx)?;
                writeln!(ctx.prelude, "    }}").unwrap();
            }
            hir::Pattern::Binding(_, name, _) => {
                writeln!(ctx.prelude, "{}{{", prefix).unwrap();
                writeln!(ctx.prelude, "        {} {} = {};", c_type(subject_ty)?, name.as_str(), subject_c).unwrap();
                if let Some(guard) = &arm.guard {
                    let guard_c = emit_expr(guard, ctx)?;
                    writeln!(ctx.prelude, "        if ({}) {{", guard_c).unwrap();
                    emit_arm_body(arm, result, ctx)?;
                    writeln!(ctx.prelude, "        }}").unwrap();
                } else {
                    emit_arm_body(arm, result, ctx)?;
                }
                writeln!(ctx.prelude, "    }}").unwrap();
            }
            hir::Pattern::Variant(..) => {
                return Err(CodeGenError::Internal("a variant pattern against a non-algebraic subject should have been rejected by the checker".to_string()));
            }
        }
        first = false;
    }
    Ok(())
}

fn emit_arm_body(arm: &hir::Arm, result: Option<&str>, ctx: &mut EmitCtx) -> Result<()> {
    ctx.prelude.push_str(&emit_block_statements(&arm.body, ctx)?);
    if let Some(trailing) = &arm.body.trailing {
        if crate::func::try_emit_tail_continue(trailing, ctx)? {
            return Ok(());
        }
        if let Some(result) = result {
            let value = emit_expr(trailing, ctx)?;
            writeln!(ctx.prelude, "        {} = {};", result, value).unwrap();
        }
    }
    Ok(())
}

fn emit_block_as_value(block: &hir::Block, ctx: &mut EmitCtx) -> Result<String> {
    ctx.prelude.push_str(&emit_block_statements(block, ctx)?);
    match &block.trailing {
        Some(trailing) => {
            if crate::func::try_emit_tail_continue(trailing, ctx)? {
                return Ok("/* unreachable after continue */ 0".to_string());
            }
            emit_expr(trailing, ctx)
        }
        None => Ok("/* unit */ 0".to_string()),
    }
}

/// Emits every statement in `block` except its trailing expression
/// (the caller decides what to do with that: assign it, return it, or
/// drop it), returning the accumulated C source.
pub fn emit_block_statements(block: &hir::Block, ctx: &mut EmitCtx) -> Result<String> {
    let mut out = String::new();
    for stmt in &block.stmts {
        out.push_str(&emit_stmt(stmt, ctx)?);
    }
    Ok(out)
}

fn emit_stmt(stmt: &hir::Stmt, ctx: &mut EmitCtx) -> Result<String> {
    let mut out = String::new();
    match stmt {
        hir::Stmt::Let(l) => {
            let value = l.init.as_ref().map(|e| emit_expr(e, ctx)).transpose()?;
            out.push_str(&std::mem::take(&mut ctx.prelude));
            let ty = c_type(&l.ty)?;
            match value {
                Some(v) => writeln!(out, "    {} {} = {};", ty, l.name.as_str(), v).unwrap(),
                None => writeln!(out, "    {} {};", ty, l.name.as_str()).unwrap(),
            }
        }
        hir::Stmt::Assign(target, value) => {
            let value_c = emit_expr(value, ctx)?;
            let target_c = emit_expr(target, ctx)?;
            out.push_str(&std::mem::take(&mut ctx.prelude));
            writeln!(out, "    {} = {};", target_c, value_c).unwrap();
        }
        hir::Stmt::Expr(e) => {
            out.push_str(&emit_expr_statement(e, ctx)?);
        }
        hir::Stmt::Return(value, _) => {
            if let Some(e) = value {
                if crate::func::try_emit_tail_continue(e, ctx)? {
                    out.push_str(&std::mem::take(&mut ctx.prelude));
                } else {
                    let v = emit_expr(e, ctx)?;
                    out.push_str(&std::mem::take(&mut ctx.prelude));
                    writeln!(out, "    return {};", v).unwrap();
                }
            } else {
                out.push_str("    return;\n");
            }
        }
        hir::Stmt::While(cond, body) => {
            let cond_c = emit_expr(cond, ctx)?;
            out.push_str(&std::mem::take(&mut ctx.prelude));
            writeln!(out, "    while ({}) {{", cond_c).unwrap();
            out.push_str(&emit_block_statements(body, ctx)?);
            out.push_str("    }\n");
        }
        hir::Stmt::For(pattern, iter, body) => {
            let iter_c = emit_expr(iter, ctx)?;
            out.push_str(&std::mem::take(&mut ctx.prelude));
            let binder = match pattern {
                hir::Pattern::Binding(_, name, _) => name.as_str().to_string(),
                _ => "_".to_string(),
            };
            writeln!(out, "    PROVE_FOR_EACH({}, {}) {{", binder, iter_c).unwrap();
            out.push_str(&emit_block_statements(body, ctx)?);
            out.push_str("    }\n");
        }
    }
    Ok(out)
}

/// A bare expression statement: `if`/`match`/`TailLoop` emit as real C
/// statements directly (no temp needed when the value is discarded);
/// anything else is emitted for its side effect and discarded.
fn emit_expr_statement(e: &hir::Expr, ctx: &mut EmitCtx) -> Result<String> {
    match e.kind.as_ref() {
        hir::ExprKind::If(cond, then_block, else_branch) => {
            emit_if_as_statement(cond, then_block, else_branch.as_ref(), ctx)?;
            Ok(std::mem::take(&mut ctx.prelude))
        }
        hir::ExprKind::TailLoop(params, body) => crate::func::emit_tail_loop(params, body, ctx),
        hir::ExprKind::TailContinue(_) => {
            crate::func::try_emit_tail_continue(e, ctx)?;
            Ok(std::mem::take(&mut ctx.prelude))
        }
        _ => {
            let value = emit_expr(e, ctx)?;
            let mut out = std::mem::take(&mut ctx.prelude);
            writeln!(out, "    (void)({});", value).unwrap();
            Ok(out)
        }
    }
}
