//! The symbol table: a stack of scopes plus the module-level
//! function and type registries.

use prvc_par::ast::Verb;
use prvc_util::{DefId, DefIdGenerator, Symbol};
use std::collections::HashMap;

use crate::types::Type;

#[derive(Debug, Clone)]
pub struct VarSymbol {
    pub def_id: DefId,
    pub ty: Type,
    pub mutable: bool,
    pub used: bool,
    pub span: prvc_util::Span,
}

#[derive(Default)]
struct Scope {
    bindings: HashMap<Symbol, VarSymbol>,
}

/// One registered function signature. `verb` is `None` only for
/// built-in functions registered without a verb key (Pass 1).
#[derive(Debug, Clone)]
pub struct FnSignature {
    pub verb: Option<Verb>,
    pub name: Symbol,
    pub params: Vec<Type>,
    pub ret: Type,
    pub can_fail: bool,
}

/// Keyed by `(verb, name)`; a name may have several overloads by
/// parameter-type vector.
#[derive(Default)]
pub struct FunctionRegistry {
    entries: HashMap<(Option<Verb>, Symbol), Vec<FnSignature>>,
}

impl FunctionRegistry {
    pub fn register(&mut self, sig: FnSignature) {
        self.entries.entry((sig.verb, sig.name)).or_default().push(sig);
    }

    /// Tries `(verb, name)` first, then `(None, name)` as a fallback for
    /// built-ins. When arity matches no candidate, the first candidate
    /// under the key is still returned so callers can diagnose an
    /// arity mismatch rather than "undefined function".
    pub fn resolve(&self, verb: Option<Verb>, name: Symbol, arity: usize) -> Option<&FnSignature> {
        let candidates = self
            .entries
            .get(&(verb, name))
            .or_else(|| self.entries.get(&(None, name)))?;
        candidates
            .iter()
            .find(|c| c.params.len() == arity)
            .or_else(|| candidates.first())
    }

    /// Looks up a function by name alone across every verb key,
    /// returning the first match regardless of arity. Used where the
    /// caller's own verb context is unknown (e.g. inside a contract
    /// clause).
    pub fn resolve_any(&self, name: Symbol) -> Option<&FnSignature> {
        self.entries
            .iter()
            .find(|((_, n), _)| *n == name)
            .and_then(|(_, sigs)| sigs.first())
    }
}

#[derive(Default)]
pub struct TypeRegistry {
    entries: HashMap<Symbol, Type>,
}

impl TypeRegistry {
    pub fn register(&mut self, name: Symbol, ty: Type) {
        self.entries.insert(name, ty);
    }

    pub fn lookup(&self, name: Symbol) -> Option<&Type> {
        self.entries.get(&name)
    }

    pub fn contains(&self, name: Symbol) -> bool {
        self.entries.contains_key(&name)
    }
}

/// A stack of scopes; index 0 is the module scope and is never popped.
pub struct SymbolTable {
    scopes: Vec<Scope>,
    pub functions: FunctionRegistry,
    pub types: TypeRegistry,
    def_ids: DefIdGenerator,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            functions: FunctionRegistry::default(),
            types: TypeRegistry::default(),
            def_ids: DefIdGenerator::new(),
        }
    }

    pub fn next_def_id(&self) -> DefId {
        self.def_ids.next()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Pops the current scope and returns the bindings it held, so the
    /// caller can check for unused variables at teardown.
    pub fn pop_scope(&mut self) -> Vec<(Symbol, VarSymbol)> {
        debug_assert!(self.scopes.len() > 1, "the module scope is never popped");
        self.scopes
            .pop()
            .map(|s| s.bindings.into_iter().collect())
            .unwrap_or_default()
    }

    /// Defines `name` in the current (innermost) scope. Fails if the
    /// name already exists in that scope; shadowing an outer scope is
    /// allowed.
    pub fn define(&mut self, name: Symbol, ty: Type, mutable: bool, span: prvc_util::Span) -> Result<DefId, ()> {
        let current = self.scopes.last_mut().expect("at least one scope");
        if current.bindings.contains_key(&name) {
            return Err(());
        }
        let def_id = self.def_ids.next();
        current.bindings.insert(name, VarSymbol { def_id, ty, mutable, used: false, span });
        Ok(def_id)
    }

    /// Walks the scope stack from innermost to outermost, marking the
    /// symbol used on a hit.
    pub fn resolve_and_use(&mut self, name: Symbol) -> Option<Type> {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(sym) = scope.bindings.get_mut(&name) {
                sym.used = true;
                return Some(sym.ty.clone());
            }
        }
        None
    }

    pub fn lookup(&self, name: Symbol) -> Option<&VarSymbol> {
        self.scopes.iter().rev().find_map(|s| s.bindings.get(&name))
    }

    pub fn lookup_mut(&mut self, name: Symbol) -> Option<&mut VarSymbol> {
        self.scopes.iter_mut().rev().find_map(|s| s.bindings.get_mut(&name))
    }

    /// Unused bindings still in the module scope, for the final
    /// whole-module check (Pass 2's last step).
    pub fn module_scope_unused(&self) -> Vec<(Symbol, prvc_util::Span)> {
        self.scopes[0]
            .bindings
            .iter()
            .filter(|(_, sym)| !sym.used)
            .map(|(name, sym)| (*name, sym.span))
            .collect()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
