//! The two-pass checker: Pass 1 registers every top-level name,
//! Pass 2 walks each function body, inferring and checking types.

use std::collections::HashSet;

use prvc_par::ast::{self, Verb};
use prvc_util::diagnostic::{
    E301, E302, E303, E320, E321, E322, E330, E331, E332, E333, E340, E350, E351, E360, E361,
    E362, E370, E371, E372, E380, E381, E382, E384, E385, E386, W300, W301, W310,
};
use prvc_util::{Handler, Span, Symbol};

use crate::hir;
use crate::infer::join_branches;
use crate::proof;
use crate::scope::{FnSignature, SymbolTable};
use crate::types::{AlgebraicType, RecordType, Type, TypeContext};

/// Known I/O primitives a pure (`transforms`/`validates`) function may
/// not call directly (verb enforcement).
const IO_FUNCTIONS: &[&str] = &[
    "println", "print", "readln", "read_file", "write_file", "open", "close", "flush", "sleep",
];

pub struct Checker<'a> {
    handler: &'a Handler,
    pub symbols: SymbolTable,
    pub type_ctx: TypeContext,
    current_verb: Option<Verb>,
    current_can_fail: bool,
    current_ret: Type,
}

impl<'a> Checker<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        let mut checker = Self {
            handler,
            symbols: SymbolTable::new(),
            type_ctx: TypeContext::new(),
            current_verb: None,
            current_can_fail: false,
            current_ret: Type::Unit,
        };
        checker.register_builtins();
        checker
    }

    fn error(&self, span: Span, code: prvc_util::diagnostic::DiagnosticCode, message: impl Into<String>) {
        self.handler.build_error(span, message).code(code).emit(self.handler);
    }

    fn warn(&self, span: Span, code: prvc_util::diagnostic::DiagnosticCode, message: impl Into<String>) {
        self.handler.build_warning(span, message).code(code).emit(self.handler);
    }

    // ── Pass 1: registration ────────────────────────────────────────

    fn register_builtins(&mut self) {
        for name in ["Integer", "Decimal", "Boolean", "Character", "String", "Byte"] {
            let sym = Symbol::intern(name);
            self.symbols.types.register(sym, Type::Primitive(sym, vec![]));
        }
        self.symbols.types.register(Symbol::intern("Unit"), Type::Unit);
        self.symbols
            .types
            .register(Symbol::intern("Error"), Type::Primitive(Symbol::intern("Error"), vec![]));
        for name in ["Result", "Option", "List"] {
            self.symbols.types.register(Symbol::intern(name), Type::Generic(Symbol::intern(name), vec![]));
        }

        let string_t = Type::Primitive(Symbol::intern("String"), vec![]);
        let integer_t = Type::Primitive(Symbol::intern("Integer"), vec![]);
        let boolean_t = Type::Primitive(Symbol::intern("Boolean"), vec![]);

        let builtin = |name: &str, params: Vec<Type>, ret: Type, can_fail: bool| FnSignature {
            verb: None,
            name: Symbol::intern(name),
            params,
            ret,
            can_fail,
        };

        self.symbols.functions.register(builtin("println", vec![string_t.clone()], Type::Unit, false));
        self.symbols.functions.register(builtin("print", vec![string_t.clone()], Type::Unit, false));
        self.symbols.functions.register(builtin("readln", vec![], string_t.clone(), false));

        let list_elem = self.type_ctx.fresh_var();
        self.symbols.functions.register(builtin(
            "len",
            vec![Type::List(Box::new(list_elem))],
            integer_t.clone(),
            false,
        ));
        self.symbols.functions.register(builtin("len", vec![string_t.clone()], integer_t.clone(), false));

        let map_elem = self.type_ctx.fresh_var();
        let map_out = self.type_ctx.fresh_var();
        self.symbols.functions.register(builtin(
            "map",
            vec![
                Type::List(Box::new(map_elem.clone())),
                Type::Fn(vec![map_elem], Box::new(map_out.clone())),
            ],
            Type::List(Box::new(map_out)),
            false,
        ));

        let filter_elem = self.type_ctx.fresh_var();
        self.symbols.functions.register(builtin(
            "filter",
            vec![
                Type::List(Box::new(filter_elem.clone())),
                Type::Fn(vec![filter_elem.clone()], Box::new(boolean_t.clone())),
            ],
            Type::List(Box::new(filter_elem)),
            false,
        ));

        let reduce_elem = self.type_ctx.fresh_var();
        let reduce_acc = self.type_ctx.fresh_var();
        self.symbols.functions.register(builtin(
            "reduce",
            vec![
                Type::List(Box::new(reduce_elem.clone())),
                reduce_acc.clone(),
                Type::Fn(vec![reduce_acc.clone(), reduce_elem], Box::new(reduce_acc.clone())),
            ],
            reduce_acc,
            false,
        ));

        let to_string_arg = self.type_ctx.fresh_var();
        self.symbols.functions.register(builtin("to_string", vec![to_string_arg], string_t.clone(), false));
        self.symbols.functions.register(builtin(
            "clamp",
            vec![integer_t.clone(), integer_t.clone(), integer_t.clone()],
            integer_t.clone(),
            false,
        ));

        let error_t = Type::Primitive(Symbol::intern("Error"), vec![]);
        let result_of = |ok: Type| Type::Generic(Symbol::intern("Result"), vec![ok, error_t.clone()]);
        self.symbols.functions.register(builtin("read_file", vec![string_t.clone()], result_of(string_t.clone()), true));
        self.symbols.functions.register(builtin(
            "write_file",
            vec![string_t.clone(), string_t.clone()],
            result_of(Type::Unit),
            true,
        ));
        self.symbols.functions.register(builtin("open", vec![string_t.clone()], result_of(integer_t.clone()), true));
        self.symbols.functions.register(builtin("close", vec![integer_t.clone()], Type::Unit, false));
        self.symbols.functions.register(builtin("flush", vec![], Type::Unit, false));
        self.symbols.functions.register(builtin("sleep", vec![integer_t], Type::Unit, false));
    }

    fn collect_decls(&mut self, decls: &[ast::Decl]) {
        for decl in decls {
            match decl {
                ast::Decl::Fn(f) => self.collect_fn_signature(f),
                ast::Decl::Type(t) => self.collect_type(t),
                ast::Decl::Const(c) => {
                    let ty = c.ty.as_ref().map(|te| self.resolve_type_expr(te)).unwrap_or(Type::Error);
                    if self.symbols.define(c.name, ty, false, c.span).is_err() {
                        self.error(c.span, E301, format!("`{}` is already defined", c.name.as_str()));
                    }
                }
                ast::Decl::Import(imp) => {
                    for item in &imp.items {
                        let _ = self.symbols.define(*item, Type::Error, false, imp.span);
                        self.symbols.functions.register(FnSignature {
                            verb: None,
                            name: *item,
                            params: vec![],
                            ret: Type::Error,
                            can_fail: false,
                        });
                    }
                }
                ast::Decl::Module(m) => self.collect_decls(&m.decls),
                ast::Decl::Main(_) | ast::Decl::InvariantNetwork(_) => {}
            }
        }
    }

    fn collect_fn_signature(&mut self, f: &ast::FnDecl) {
        let params: Vec<Type> = f.params.iter().map(|p| self.resolve_type_expr(&p.ty)).collect();
        let ret = match f.verb {
            Verb::Validates => Type::Primitive(Symbol::intern("Boolean"), vec![]),
            _ => f.ret_type.as_ref().map(|te| self.resolve_type_expr(te)).unwrap_or(Type::Unit),
        };
        self.symbols.functions.register(FnSignature {
            verb: Some(f.verb),
            name: f.name,
            params,
            ret,
            can_fail: f.can_fail,
        });
    }

    fn collect_type(&mut self, t: &ast::TypeDecl) {
        if self.symbols.types.contains(t.name) {
            self.error(t.span, E301, format!("type `{}` is already defined", t.name.as_str()));
        }
        match &t.body {
            ast::TypeBody::Refinement(base, _) => {
                let base_ty = self.resolve_type_expr(base);
                self.symbols.types.register(t.name, Type::Refinement(t.name, Box::new(base_ty)));
            }
            ast::TypeBody::Record(fields) => {
                let resolved = fields.iter().map(|f| (f.name, self.resolve_type_expr(&f.ty))).collect();
                self.symbols.types.register(
                    t.name,
                    Type::Record(RecordType { name: t.name, fields: resolved, params: t.params.clone() }),
                );
            }
            ast::TypeBody::Algebraic(variants) => {
                let resolved: Vec<(Symbol, Vec<Type>)> = variants
                    .iter()
                    .map(|v| (v.name, v.fields.iter().map(|te| self.resolve_type_expr(te)).collect()))
                    .collect();
                let algebraic_ty = Type::Algebraic(AlgebraicType {
                    name: t.name,
                    variants: resolved.clone(),
                    params: t.params.clone(),
                });
                self.symbols.types.register(t.name, algebraic_ty.clone());
                for (variant_name, fields) in resolved {
                    self.symbols.functions.register(FnSignature {
                        verb: None,
                        name: variant_name,
                        params: fields,
                        ret: algebraic_ty.clone(),
                        can_fail: false,
                    });
                }
            }
        }
    }

    fn resolve_type_expr(&mut self, te: &ast::TypeExpr) -> Type {
        match te {
            ast::TypeExpr::Simple(name, span) => self.lookup_type(*name, *span),
            ast::TypeExpr::Generic(name, args, span) => {
                let resolved_args: Vec<Type> = args.iter().map(|a| self.resolve_type_expr(a)).collect();
                if self.symbols.types.contains(*name) {
                    Type::Generic(*name, resolved_args)
                } else {
                    self.error(*span, E303, format!("undefined type `{}`", name.as_str()));
                    Type::Error
                }
            }
            ast::TypeExpr::Modified(name, mods, span) => {
                let base = self.lookup_type(*name, *span);
                match base {
                    Type::Primitive(n, _) => {
                        let values = mods
                            .iter()
                            .map(|m| match m {
                                ast::Modifier::Positional(v) | ast::Modifier::Named(_, v) => *v,
                            })
                            .collect();
                        Type::Primitive(n, values)
                    }
                    other => other,
                }
            }
        }
    }

    fn lookup_type(&self, name: Symbol, span: Span) -> Type {
        match self.symbols.types.lookup(name) {
            Some(ty) => ty.clone(),
            None => {
                self.error(span, E303, format!("undefined type `{}`", name.as_str()));
                Type::Error
            }
        }
    }

    // ── Driver ───────────────────────────────────────────────────────

    pub fn check_module(&mut self, module: &ast::Module) -> Vec<hir::Item> {
        self.collect_decls(&module.decls);
        let items = module.decls.iter().filter_map(|d| self.check_decl(d)).collect();
        for (name, span) in self.symbols.module_scope_unused() {
            self.warn(span, W300, format!("unused variable `{}`", name.as_str()));
        }
        items
    }

    fn check_decl(&mut self, decl: &ast::Decl) -> Option<hir::Item> {
        match decl {
            ast::Decl::Fn(f) => self.check_fn(f).map(hir::Item::Fn),
            ast::Decl::Main(m) => Some(hir::Item::Main(self.check_main(m))),
            ast::Decl::Type(t) => Some(hir::Item::Type(hir::TypeItem {
                name: t.name,
                ty: self.symbols.types.lookup(t.name).cloned().unwrap_or(Type::Error),
                span: t.span,
            })),
            ast::Decl::Const(c) => Some(hir::Item::Const(self.check_const(c))),
            ast::Decl::Import(_) | ast::Decl::InvariantNetwork(_) => None,
            ast::Decl::Module(m) => Some(hir::Item::Module(hir::ModuleItem {
                name: m.name,
                items: m.decls.iter().filter_map(|d| self.check_decl(d)).collect(),
                span: m.span,
            })),
        }
    }

    fn check_const(&mut self, c: &ast::ConstDecl) -> hir::ConstItem {
        let value = self.check_expr(&c.value);
        let declared = c.ty.as_ref().map(|te| self.resolve_type_expr(te));
        if let Some(declared) = &declared {
            if !declared.compatible(&value.ty) {
                self.error(c.span, E322, format!("constant `{}`'s initializer does not match its declared type", c.name.as_str()));
            }
        }
        let def_id = self.symbols.next_def_id();
        hir::ConstItem { def_id, name: c.name, ty: declared.unwrap_or_else(|| value.ty.clone()), value, span: c.span }
    }

    fn check_main(&mut self, m: &ast::MainDecl) -> hir::MainItem {
        self.current_verb = None;
        self.current_can_fail = false;
        self.current_ret = Type::Unit;
        self.symbols.push_scope();
        let body = self.check_block(&m.body);
        for (name, sym) in self.symbols.pop_scope() {
            if !sym.used {
                self.warn(sym.span, W300, format!("unused variable `{}`", name.as_str()));
            }
        }
        hir::MainItem { body, span: m.span }
    }

    fn check_fn(&mut self, f: &ast::FnDecl) -> Option<hir::FnItem> {
        if f.verb == Verb::Validates && f.ret_type.is_some() {
            self.error(f.span, E360, "`validates` functions have an implicit `Boolean` return and may not declare one");
        }
        if f.verb.is_pure() && f.can_fail {
            self.error(f.span, E361, format!("`{}` is a pure verb and may not be declared failable", verb_name(f.verb)));
        }

        let ret = match f.verb {
            Verb::Validates => Type::Primitive(Symbol::intern("Boolean"), vec![]),
            _ => f.ret_type.as_ref().map(|te| self.resolve_type_expr(te)).unwrap_or(Type::Unit),
        };

        self.current_verb = Some(f.verb);
        self.current_can_fail = f.can_fail;
        self.current_ret = ret.clone();

        self.symbols.push_scope();
        let mut params = Vec::with_capacity(f.params.len());
        for p in &f.params {
            let ty = self.resolve_type_expr(&p.ty);
            let def_id = self.symbols.define(p.name, ty.clone(), false, p.span).unwrap_or_else(|_| self.symbols.next_def_id());
            params.push(hir::Param { def_id, name: p.name, ty });
        }

        self.check_contracts(f);
        proof::check_fn(self.handler, f);

        let body = self.check_block(&f.body);
        let body_ty = body.trailing.as_ref().map(|e| e.ty.clone()).unwrap_or(Type::Unit);
        let accepted = ret.compatible(&body_ty)
            || ret.result_ok().map(|ok| ok.compatible(&body_ty)).unwrap_or(false);
        if !accepted {
            self.error(f.span, E322, format!("`{}`'s body does not match its declared return type", f.name.as_str()));
        }

        for (name, sym) in self.symbols.pop_scope() {
            if !sym.used {
                self.warn(sym.span, W300, format!("unused variable `{}`", name.as_str()));
            }
        }

        Some(hir::FnItem { def_id: self.symbols.next_def_id(), verb: f.verb, name: f.name, params, ret, can_fail: f.can_fail, body, span: f.span })
    }

    /// Contract well-typedness: `ensures`/`believe` see `result`
    /// bound to the return type; `requires`/`know`/`assume` see the
    /// parameter scope directly.
    fn check_contracts(&mut self, f: &ast::FnDecl) {
        for e in &f.requires {
            self.check_boolean_clause(e, E381);
        }
        for e in &f.know {
            self.check_boolean_clause(e, E384);
        }
        for e in &f.assume {
            self.check_boolean_clause(e, E385);
        }

        if !f.ensures.is_empty() || !f.believe.is_empty() {
            self.symbols.push_scope();
            let _ = self.symbols.define(Symbol::intern("result"), self.current_ret.clone(), false, f.span);
            for e in &f.ensures {
                self.check_boolean_clause(e, E380);
            }
            for e in &f.believe {
                self.check_boolean_clause(e, E386);
            }
            self.symbols.pop_scope();
        }

        for name in &f.satisfies {
            if !self.symbols.types.contains(*name) {
                self.error(f.span, E382, format!("`satisfies {}` names an unregistered type", name.as_str()));
            }
        }
        if f.intent.is_some() && f.requires.is_empty() && f.ensures.is_empty() {
            self.warn(f.span, W310, format!("`{}` states an intent but declares no `ensures`/`requires`", f.name.as_str()));
        }
        let _ = f.chosen;
        let _ = f.why_not;
    }

    fn check_boolean_clause(&mut self, e: &ast::Expr, code: prvc_util::diagnostic::DiagnosticCode) {
        let checked = self.check_expr(e);
        let boolean = Type::Primitive(Symbol::intern("Boolean"), vec![]);
        if !checked.ty.compatible(&boolean) {
            self.error(e.span(), code, "contract clause must be a boolean expression");
        }
    }

    // ── Statements and blocks ──────────────────────────────────────

    fn check_block(&mut self, block: &ast::Block) -> hir::Block {
        let stmts: Vec<hir::Stmt> = block.stmts.iter().map(|s| self.check_stmt(s)).collect();
        let trailing = block.trailing.as_ref().map(|e| Box::new(self.check_expr(e)));
        let ty = trailing.as_ref().map(|e| e.ty.clone()).unwrap_or(Type::Unit);
        hir::Block { stmts, trailing, ty, span: block.span }
    }

    fn check_stmt(&mut self, stmt: &ast::Stmt) -> hir::Stmt {
        match stmt {
            ast::Stmt::Let(l) => hir::Stmt::Let(self.check_let(l)),
            ast::Stmt::Assign(a) => {
                let target = self.check_expr(&a.target);
                let value = self.check_expr(&a.value);
                if !target.ty.compatible(&value.ty) {
                    self.error(a.span, E331, "assigned value does not match the target's type");
                }
                hir::Stmt::Assign(Box::new(target), Box::new(value))
            }
            ast::Stmt::Expr(e) => hir::Stmt::Expr(self.check_expr(e)),
            ast::Stmt::Return(e, span) => hir::Stmt::Return(e.as_ref().map(|e| self.check_expr(e)), *span),
            ast::Stmt::While(w) => {
                let cond = self.check_expr(&w.cond);
                let boolean = Type::Primitive(Symbol::intern("Boolean"), vec![]);
                if !cond.ty.compatible(&boolean) {
                    self.error(w.cond.span(), E333, "`while` condition must be boolean");
                }
                self.symbols.push_scope();
                let body = self.check_block(&w.body);
                self.pop_scope_with_warnings();
                hir::Stmt::While(Box::new(cond), body)
            }
            ast::Stmt::For(f) => {
                let iter = self.check_expr(&f.iter);
                let elem_ty = match &iter.ty {
                    Type::List(e) => (**e).clone(),
                    _ => Type::Error,
                };
                self.symbols.push_scope();
                let pattern = self.check_pattern(&f.pattern, &elem_ty);
                let body = self.check_block(&f.body);
                self.pop_scope_with_warnings();
                hir::Stmt::For(pattern, Box::new(iter), body)
            }
        }
    }

    fn check_let(&mut self, l: &ast::LetStmt) -> hir::LetStmt {
        let init = l.init.as_ref().map(|e| self.check_expr(e));
        let declared = l.ty.as_ref().map(|te| self.resolve_type_expr(te));
        let ty = declared.clone().or_else(|| init.as_ref().map(|e| e.ty.clone())).unwrap_or(Type::Error);
        if let (Some(declared), Some(init)) = (&declared, &init) {
            if !declared.compatible(&init.ty) {
                self.error(l.span, E322, format!("`{}`'s initializer does not match its declared type", l.name.as_str()));
            }
        }
        let def_id = self.symbols.define(l.name, ty.clone(), l.mutable, l.span).unwrap_or_else(|_| {
            self.error(l.span, E301, format!("`{}` is already defined in this scope", l.name.as_str()));
            self.symbols.next_def_id()
        });
        hir::LetStmt { def_id, name: l.name, mutable: l.mutable, ty, init, span: l.span }
    }

    fn pop_scope_with_warnings(&mut self) {
        for (name, sym) in self.symbols.pop_scope() {
            if !sym.used {
                self.warn(sym.span, W300, format!("unused variable `{}`", name.as_str()));
            }
        }
    }

    // ── Patterns ────────────────────────────────────────────────────

    fn check_pattern(&mut self, pattern: &ast::Pattern, subject_ty: &Type) -> hir::Pattern {
        match pattern {
            ast::Pattern::Wildcard(span) => hir::Pattern::Wildcard(*span),
            ast::Pattern::Binding(name, span) => {
                let def_id = self.symbols.define(*name, subject_ty.clone(), false, *span).unwrap_or_else(|_| self.symbols.next_def_id());
                hir::Pattern::Binding(def_id, *name, *span)
            }
            ast::Pattern::Literal(lit, span) => hir::Pattern::Literal(lit.clone(), *span),
            ast::Pattern::Variant(name, subpatterns, span) => {
                let field_tys = match subject_ty {
                    Type::Algebraic(alg) => alg.variants.iter().find(|(n, _)| n == name).map(|(_, f)| f.clone()),
                    _ => None,
                };
                if field_tys.is_none() {
                    self.error(*span, E370, format!("unknown variant `{}`", name.as_str()));
                }
                let field_tys = field_tys.unwrap_or_default();
                let checked = subpatterns
                    .iter()
                    .enumerate()
                    .map(|(i, p)| self.check_pattern(p, field_tys.get(i).unwrap_or(&Type::Error)))
                    .collect();
                hir::Pattern::Variant(*name, checked, *span)
            }
        }
    }

    // ── Expressions ─────────────────────────────────────────────────

    fn check_expr(&mut self, expr: &ast::Expr) -> hir::Expr {
        let span = expr.span();
        match expr {
            ast::Expr::Literal(lit, _) => hir::Expr::new(hir::ExprKind::Literal(lit.clone()), self.literal_type(lit), span),
            ast::Expr::Ident(name, _) | ast::Expr::ValidRef(name, _) => {
                match self.symbols.resolve_and_use(*name) {
                    Some(ty) => {
                        let def_id = self.symbols.lookup(*name).map(|s| s.def_id).unwrap_or(prvc_util::DefId::DUMMY);
                        hir::Expr::new(hir::ExprKind::Ident(*name, def_id), ty, span)
                    }
                    None => {
                        self.error(span, E302, format!("undefined name `{}`", name.as_str()));
                        hir::Expr::error(span)
                    }
                }
            }
            ast::Expr::TypeIdent(name, _) => {
                if let Some(sig) = self.symbols.functions.resolve(None, *name, 0) {
                    hir::Expr::new(hir::ExprKind::TypeIdent(*name), sig.ret.clone(), span)
                } else {
                    self.error(span, E302, format!("undefined name `{}`", name.as_str()));
                    hir::Expr::error(span)
                }
            }
            ast::Expr::Binary(b) => self.check_binary(b),
            ast::Expr::Unary(u) => self.check_unary(u),
            ast::Expr::Call(c) => self.check_call(&c.callee, &c.args, c.span),
            ast::Expr::Field(f) => self.check_field(f),
            ast::Expr::Index(i) => self.check_index(i),
            ast::Expr::Pipe(p) => self.check_pipe(p),
            ast::Expr::FailProp(inner, span) => self.check_fail_prop(inner, *span),
            ast::Expr::Lambda(l) => self.check_lambda(l),
            ast::Expr::ListLit(items, span) => self.check_list_lit(items, *span),
            ast::Expr::Interp(i) => self.check_interp(i),
            ast::Expr::If(i) => self.check_if(i),
            ast::Expr::Match(m) => self.check_match(m),
            ast::Expr::Comptime(block, span) => {
                self.symbols.push_scope();
                let checked = self.check_block(block);
                self.pop_scope_with_warnings();
                let ty = checked.ty.clone();
                hir::Expr::new(hir::ExprKind::Comptime(checked), ty, *span)
            }
        }
    }

    fn literal_type(&self, lit: &ast::Literal) -> Type {
        let name = match lit {
            ast::Literal::Integer(_) => "Integer",
            ast::Literal::Decimal(_) => "Decimal",
            ast::Literal::String(_) | ast::Literal::TripleString(_) | ast::Literal::RawString(_) => "String",
            ast::Literal::Char(_) => "Character",
            ast::Literal::Bool(_) => "Boolean",
            ast::Literal::Regex(_) => "Regex",
            ast::Literal::Path(_) => "Path",
        };
        Type::Primitive(Symbol::intern(name), vec![])
    }

    fn check_binary(&mut self, b: &ast::BinaryExpr) -> hir::Expr {
        let left = self.check_expr(&b.left);
        let right = self.check_expr(&b.right);
        let boolean = Type::Primitive(Symbol::intern("Boolean"), vec![]);
        let ty = match b.op {
            ast::BinOp::Add | ast::BinOp::Sub | ast::BinOp::Mul | ast::BinOp::Div | ast::BinOp::Mod => {
                if !left.ty.compatible(&right.ty) {
                    self.error(b.span, E332, "operand types do not match");
                }
                left.ty.clone()
            }
            ast::BinOp::Eq | ast::BinOp::Ne | ast::BinOp::Lt | ast::BinOp::Gt | ast::BinOp::Le | ast::BinOp::Ge => {
                if !left.ty.compatible(&right.ty) {
                    self.error(b.span, E332, "operand types do not match");
                }
                boolean
            }
            ast::BinOp::And | ast::BinOp::Or => {
                if !left.ty.compatible(&boolean) || !right.ty.compatible(&boolean) {
                    self.error(b.span, E332, "operand must be boolean");
                }
                boolean
            }
            ast::BinOp::Range => Type::List(Box::new(left.ty.clone())),
        };
        hir::Expr::new(hir::ExprKind::Binary(b.op, left, right), ty, b.span)
    }

    fn check_unary(&mut self, u: &ast::UnaryExpr) -> hir::Expr {
        let operand = self.check_expr(&u.operand);
        let ty = match u.op {
            ast::UnOp::Not => Type::Primitive(Symbol::intern("Boolean"), vec![]),
            ast::UnOp::Neg => operand.ty.clone(),
        };
        hir::Expr::new(hir::ExprKind::Unary(u.op, operand), ty, u.span)
    }

    fn check_call(&mut self, callee: &ast::Expr, args: &[ast::Expr], span: Span) -> hir::Expr {
        let checked_args: Vec<hir::Expr> = args.iter().map(|a| self.check_expr(a)).collect();
        let name = match callee {
            ast::Expr::Ident(name, _) | ast::Expr::TypeIdent(name, _) => Some(*name),
            _ => None,
        };
        let Some(name) = name else {
            let checked_callee = self.check_expr(callee);
            let ret = match &checked_callee.ty {
                Type::Fn(_, ret) => (**ret).clone(),
                _ => Type::Error,
            };
            return hir::Expr::new(hir::ExprKind::Call(checked_callee, checked_args), ret, span);
        };

        if self.current_verb.map(|v| v.is_pure()).unwrap_or(false) && IO_FUNCTIONS.contains(&name.as_str()) {
            self.error(span, E362, format!("pure function may not call `{}`", name.as_str()));
        }

        match self.symbols.functions.resolve_any(name).cloned() {
            Some(sig) => {
                if sig.params.len() != checked_args.len() {
                    self.error(span, E330, format!("`{}` expects {} argument(s), found {}", name.as_str(), sig.params.len(), checked_args.len()));
                } else {
                    for (param_ty, arg) in sig.params.iter().zip(&checked_args) {
                        if !param_ty.compatible(&arg.ty) {
                            self.error(arg.span, E331, format!("argument type does not match parameter type in call to `{}`", name.as_str()));
                        }
                    }
                }
                let callee_expr = hir::Expr::new(hir::ExprKind::Ident(name, prvc_util::DefId::DUMMY), sig.ret.clone(), callee.span());
                hir::Expr::new(hir::ExprKind::Call(callee_expr, checked_args), sig.ret, span)
            }
            None => {
                self.error(span, E320, format!("call to undefined function `{}`", name.as_str()));
                hir::Expr::error(span)
            }
        }
    }

    fn check_field(&mut self, f: &ast::FieldExpr) -> hir::Expr {
        let object = self.check_expr(&f.object);
        let ty = match &object.ty {
            Type::Record(r) => match r.fields.iter().find(|(n, _)| *n == f.field) {
                Some((_, ty)) => ty.clone(),
                None => {
                    self.error(f.span, E340, format!("unknown field `{}`", f.field.as_str()));
                    Type::Error
                }
            },
            Type::Error => Type::Error,
            _ => {
                self.error(f.span, E321, "field access on a non-record type");
                Type::Error
            }
        };
        hir::Expr::new(hir::ExprKind::Field(object, f.field), ty, f.span)
    }

    fn check_index(&mut self, i: &ast::IndexExpr) -> hir::Expr {
        let object = self.check_expr(&i.object);
        let index = self.check_expr(&i.index);
        let ty = match &object.ty {
            Type::List(elem) => (**elem).clone(),
            Type::Error => Type::Error,
            _ => {
                self.error(i.span, E332, "index target is not a list");
                Type::Error
            }
        };
        hir::Expr::new(hir::ExprKind::Index(object, index), ty, i.span)
    }

    fn check_pipe(&mut self, p: &ast::PipeExpr) -> hir::Expr {
        let mut args = Vec::with_capacity(1 + p.extra_args.len());
        args.push((*p.value).clone());
        args.extend(p.extra_args.iter().cloned());
        self.check_call(&p.func, &args, p.span)
    }

    fn check_fail_prop(&mut self, inner: &ast::Expr, span: Span) -> hir::Expr {
        let checked = self.check_expr(inner);
        if !self.current_can_fail {
            self.error(span, E350, "fail-propagation (`!`) used outside a failable function");
        }
        let ok_ty = match checked.ty.result_ok() {
            Some(ok) => ok.clone(),
            None => {
                self.error(span, E351, "fail-propagation applied to a non-`Result` expression");
                Type::Error
            }
        };
        hir::Expr::new(hir::ExprKind::FailProp(checked), ok_ty, span)
    }

    fn check_lambda(&mut self, l: &ast::LambdaExpr) -> hir::Expr {
        self.symbols.push_scope();
        let param_tys: Vec<Type> = l.params.iter().map(|_| self.type_ctx.fresh_var()).collect();
        for (name, ty) in l.params.iter().zip(&param_tys) {
            let _ = self.symbols.define(*name, ty.clone(), false, l.span);
        }
        let body = self.check_expr(&l.body);
        self.pop_scope_with_warnings();
        let fn_ty = Type::Fn(param_tys, Box::new(body.ty.clone()));
        hir::Expr::new(hir::ExprKind::Lambda(l.params.clone(), body), fn_ty, l.span)
    }

    fn check_list_lit(&mut self, items: &[ast::Expr], span: Span) -> hir::Expr {
        let checked: Vec<hir::Expr> = items.iter().map(|e| self.check_expr(e)).collect();
        let elem_ty = checked.first().map(|e| e.ty.clone()).unwrap_or_else(|| self.type_ctx.fresh_var());
        hir::Expr::new(hir::ExprKind::ListLit(checked), Type::List(Box::new(elem_ty)), span)
    }

    fn check_interp(&mut self, i: &ast::InterpExpr) -> hir::Expr {
        let segments = i
            .segments
            .iter()
            .map(|s| match s {
                ast::InterpSegment::Text(t) => hir::InterpSegment::Text(*t),
                ast::InterpSegment::Expr(e) => hir::InterpSegment::Expr(self.check_expr(e)),
            })
            .collect();
        hir::Expr::new(hir::ExprKind::Interp(segments), Type::Primitive(Symbol::intern("String"), vec![]), i.span)
    }

    fn check_if(&mut self, i: &ast::IfExpr) -> hir::Expr {
        let cond = self.check_expr(&i.cond);
        let boolean = Type::Primitive(Symbol::intern("Boolean"), vec![]);
        if !cond.ty.compatible(&boolean) {
            self.error(i.cond.span(), E333, "`if` condition must be boolean");
        }
        self.symbols.push_scope();
        let then_block = self.check_block(&i.then_block);
        self.pop_scope_with_warnings();

        let else_branch = i.else_branch.as_ref().map(|eb| self.check_else_branch(eb));
        let ty = match &else_branch {
            Some(hir::ElseBranch::Block(b)) => join_branches([then_block.ty.clone(), b.ty.clone()]),
            Some(hir::ElseBranch::If(_, _, _)) => then_block.ty.clone(),
            None => Type::Unit,
        };
        hir::Expr::new(hir::ExprKind::If(cond, then_block, else_branch), ty, i.span)
    }

    fn check_else_branch(&mut self, eb: &ast::ElseBranch) -> hir::ElseBranch {
        match eb {
            ast::ElseBranch::Block(b) => {
                self.symbols.push_scope();
                let checked = self.check_block(b);
                self.pop_scope_with_warnings();
                hir::ElseBranch::Block(checked)
            }
            ast::ElseBranch::If(inner) => {
                let checked = self.check_if(inner);
                let hir::ExprKind::If(cond, then_block, else_branch) = *checked.kind else {
                    unreachable!("check_if always returns ExprKind::If")
                };
                hir::ElseBranch::If(Box::new(cond), then_block, else_branch.map(Box::new))
            }
        }
    }

    fn check_match(&mut self, m: &ast::MatchExpr) -> hir::Expr {
        let subject = m.subject.as_ref().map(|s| self.check_expr(s));
        let subject_ty = subject.as_ref().map(|s| s.ty.clone());

        let mut seen_variants: HashSet<Symbol> = HashSet::new();
        let mut catch_all_seen = false;
        let mut arms = Vec::with_capacity(m.arms.len());
        for arm in &m.arms {
            if catch_all_seen {
                self.warn(arm.span, W301, "match arm is unreachable after a wildcard/binding arm");
            }
            self.symbols.push_scope();
            let pattern = self.check_pattern(&arm.pattern, subject_ty.as_ref().unwrap_or(&Type::Error));
            match &pattern {
                hir::Pattern::Wildcard(_) | hir::Pattern::Binding(..) => catch_all_seen = true,
                hir::Pattern::Variant(name, ..) => {
                    if !seen_variants.insert(*name) {
                        self.error(arm.span, E372, format!("duplicate pattern arm for variant `{}`", name.as_str()));
                    }
                }
                hir::Pattern::Literal(..) => {}
            }
            let guard = arm.guard.as_ref().map(|g| self.check_expr(g));
            let body = self.check_block(&arm.body);
            self.pop_scope_with_warnings();
            arms.push(hir::Arm { pattern, guard, body, span: arm.span });
        }

        if let Some(Type::Algebraic(alg)) = &subject_ty {
            if !catch_all_seen {
                let all: HashSet<Symbol> = alg.variants.iter().map(|(n, _)| *n).collect();
                let missing: Vec<&str> = all.difference(&seen_variants).map(|s| s.as_str()).collect();
                if !missing.is_empty() {
                    self.error(m.span, E371, format!("match is not exhaustive; missing variant(s): {}", missing.join(", ")));
                }
            }
        }

        let ty = join_branches(arms.iter().map(|a| a.body.ty.clone()));
        hir::Expr::new(hir::ExprKind::Match(subject, arms), ty, m.span)
    }
}

fn verb_name(verb: Verb) -> &'static str {
    match verb {
        Verb::Transforms => "transforms",
        Verb::Inputs => "inputs",
        Verb::Outputs => "outputs",
        Verb::Validates => "validates",
        Verb::Reads => "reads",
        Verb::Creates => "creates",
        Verb::Matches => "matches",
    }
}
