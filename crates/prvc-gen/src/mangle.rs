//! Name resolution for call sites: decides whether a callee is a
//! variant constructor, a stdlib/runtime call, a known user-defined
//! function, or a foreign import, and produces the C symbol to call.
//!
//! The checker gives every resolved call-site callee `DefId::DUMMY`
//! (see `check_call`), and its own bare-name lookup (`resolve_any`)
//! doesn't disambiguate by verb either — so a call is resolved purely
//! by name here too, same as the checker resolves it. A function's own
//! verb (needed for the `prv_<verb>_<name>_…` scheme) isn't carried on
//! the call site, so it's recovered from a table built once up front
//! by walking every top-level function declaration.

use std::collections::HashMap;

use prvc_par::ast::Verb;
use prvc_sem::hir;
use prvc_sem::types::Type;
use prvc_util::Symbol;

use crate::error::{CodeGenError, Result};
use crate::types::c_type;

/// Maps a user-defined function's name to the verb it was declared
/// with, so a call site (which doesn't carry verb) can still build the
/// same mangled symbol the definition uses.
pub struct FnVerbTable {
    verbs: HashMap<Symbol, Verb>,
}

impl FnVerbTable {
    pub fn collect(items: &[hir::Item]) -> FnVerbTable {
        let mut verbs = HashMap::new();
        collect_into(items, &mut verbs);
        FnVerbTable { verbs }
    }

    fn get(&self, name: Symbol) -> Option<Verb> {
        self.verbs.get(&name).copied()
    }
}

fn collect_into(items: &[hir::Item], out: &mut HashMap<Symbol, Verb>) {
    for item in items {
        match item {
            hir::Item::Fn(f) => {
                out.insert(f.name, f.verb);
            }
            hir::Item::Module(m) => collect_into(&m.items, out),
            _ => {}
        }
    }
}

fn verb_tag(verb: Verb) -> &'static str {
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

/// Every bundled stdlib module name, in the order the loader registers
/// them. Kept in lock-step with `prvc_sem::stdlib`'s module list; the
/// loader doesn't expose its own table's keys for iteration; so all two
/// are tried when resolving a call against it.
const STDLIB_MODULES: &[&str] = &["InputOutput", "Text", "Table", "Parse", "Character"];

const ALL_VERBS: &[Verb] =
    &[Verb::Transforms, Verb::Inputs, Verb::Outputs, Verb::Validates, Verb::Reads, Verb::Creates, Verb::Matches];

/// Tries every bundled module/verb combination for a runtime name
/// registered under `name`. Cheap: the module/verb space is fixed and
/// small (five modules, seven verbs).
fn stdlib_runtime_name(name: Symbol, first_param: Option<Symbol>) -> Option<String> {
    let stdlib = prvc_sem::stdlib::load();
    for module in STDLIB_MODULES {
        for verb in ALL_VERBS {
            if let Some(found) = stdlib.runtime_names.lookup(Symbol::intern(module), *verb, name, first_param) {
                return Some(found.to_string());
            }
        }
    }
    None
}

/// If `call_ty` is the algebraic type this `name` constructs (i.e.
/// `name` names one of its variants), returns the constructor's C
/// function name.
fn variant_constructor_name(name: Symbol, call_ty: &Type) -> Option<String> {
    if let Type::Algebraic(alg) = call_ty {
        if alg.variants.iter().any(|(variant_name, _)| *variant_name == name) {
            return Some(format!("Prove_{}_{}", alg.name.as_str(), name.as_str()));
        }
    }
    None
}

/// Resolves a `Call`'s callee to the C function name to invoke.
///
/// `call_ty` is the `Call` expression's own resolved type (used to spot
/// variant constructors); `args` are the checked argument expressions,
/// whose types supply the mangled name's parameter tags.
pub fn resolve_callee(name: Symbol, call_ty: &Type, args: &[hir::Expr], verbs: &FnVerbTable) -> Result<String> {
    if let Some(ctor) = variant_constructor_name(name, call_ty) {
        return Ok(ctor);
    }

    let first_param = args.first().and_then(|a| primitive_type_name(&a.ty));
    if let Some(runtime_name) = stdlib_runtime_name(name, first_param) {
        return Ok(runtime_name);
    }

    match verbs.get(name) {
        Some(verb) => {
            let param_tys: Vec<Type> = args.iter().map(|a| a.ty.clone()).collect();
            mangle_definition(verb, name, &param_tys)
        }
        // A foreign/imported function: call through with the bare name.
        None => Ok(name.as_str().to_string()),
    }
}

/// Builds the mangled C symbol for a function's own definition, from
/// its verb, name, and parameter types directly — used both by a
/// definition's own signature and, via [`resolve_callee`], by every
/// call site that resolves to it.
pub fn mangle_definition(verb: Verb, name: Symbol, param_tys: &[Type]) -> Result<String> {
    let mut mangled = format!("prv_{}_{}", verb_tag(verb), name.as_str());
    for ty in param_tys {
        mangled.push('_');
        mangled.push_str(&param_tag(ty)?);
    }
    Ok(mangled)
}

fn primitive_type_name(ty: &Type) -> Option<Symbol> {
    match ty {
        Type::Primitive(name, _) => Some(*name),
        Type::Refinement(_, base) => primitive_type_name(base),
        _ => None,
    }
}

/// One parameter's tag in a mangled name: the type's own name, with
/// lists collapsing to `List` and generics to their base name.
fn param_tag(ty: &Type) -> Result<String> {
    match ty {
        Type::Primitive(name, _) => Ok(name.as_str().to_string()),
        Type::List(_) => Ok("List".to_string()),
        Type::Generic(name, _) => Ok(name.as_str().to_string()),
        Type::Record(r) => Ok(r.name.as_str().to_string()),
        Type::Algebraic(a) => Ok(a.name.as_str().to_string()),
        Type::Refinement(name, _) => Ok(name.as_str().to_string()),
        Type::Unit => Ok("Unit".to_string()),
        Type::Fn(_, _) => Ok("Fn".to_string()),
        Type::Var(_) | Type::Error => {
            let _ = c_type(ty)?;
            Err(CodeGenError::Internal("unresolved type reached name mangling".to_string()))
        }
    }
}
