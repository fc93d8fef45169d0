//! Loads the bundled standard-library declarations: the same
//! lexer and parser used for user sources, run once per process over
//! declaration-only `.prv` text embedded in the binary, registering
//! signatures the way Pass 1 does and recording each one's runtime C
//! entry point.

use std::collections::HashMap;
use std::sync::OnceLock;

use prvc_lex::Lexer;
use prvc_par::ast::{self, Verb};
use prvc_util::{Handler, Symbol};

use crate::scope::FnSignature;
use crate::types::Type;

/// One bundled module's declaration-only source, paired with the
/// module name used as the first component of a runtime lookup key.
struct StdlibModule {
    name: &'static str,
    source: &'static str,
}

const MODULES: &[StdlibModule] = &[
    StdlibModule {
        name: "InputOutput",
        source: "transforms println(text String) Unit\nfrom\n    pass\n\ntransforms print(text String) Unit\nfrom\n    pass\n\nreads readln() String\nfrom\n    pass\n\nreads read_file(path String) String!\nfrom\n    pass\n\ncreates write_file(path String, contents String) Unit!\nfrom\n    pass\n",
    },
    StdlibModule {
        name: "Text",
        source: "transforms to_string(value Integer) String\nfrom\n    pass\n\ntransforms uppercase(text String) String\nfrom\n    pass\n\ntransforms lowercase(text String) String\nfrom\n    pass\n\ntransforms trim(text String) String\nfrom\n    pass\n\nvalidates is_empty(text String)\nfrom\n    pass\n",
    },
    StdlibModule {
        name: "Table",
        source: "transforms len(items List<Integer>) Integer\nfrom\n    pass\n\ntransforms map(items List<Integer>, transform Integer) List<Integer>\nfrom\n    pass\n\ntransforms filter(items List<Integer>, predicate Integer) List<Integer>\nfrom\n    pass\n\ntransforms reduce(items List<Integer>, initial Integer, combine Integer) Integer\nfrom\n    pass\n",
    },
    StdlibModule {
        name: "Parse",
        source: "transforms parse_integer(text String) Integer!\nfrom\n    pass\n\ntransforms parse_decimal(text String) Decimal!\nfrom\n    pass\n",
    },
    StdlibModule {
        name: "Character",
        source: "validates is_alpha(c Character)\nfrom\n    pass\n\nvalidates is_digit(c Character)\nfrom\n    pass\n\nvalidates is_whitespace(c Character)\nfrom\n    pass\n",
    },
];

/// Maps `(module, verb, name)` plus, for overloaded names, the first
/// parameter's type name, to the literal runtime C function name the
/// emitter must call.
#[derive(Default)]
pub struct RuntimeNameTable {
    entries: HashMap<(Symbol, Option<Verb>, Symbol, Option<Symbol>), String>,
}

impl RuntimeNameTable {
    fn insert(&mut self, module: Symbol, verb: Verb, name: Symbol, first_param: Option<Symbol>, runtime_name: String) {
        self.entries.insert((module, Some(verb), name, first_param), runtime_name);
    }

    pub fn lookup(&self, module: Symbol, verb: Verb, name: Symbol, first_param: Option<Symbol>) -> Option<&str> {
        self.entries
            .get(&(module, Some(verb), name, first_param))
            .or_else(|| self.entries.get(&(module, Some(verb), name, None)))
            .map(|s| s.as_str())
    }
}

pub struct LoadedStdlib {
    pub signatures: Vec<FnSignature>,
    pub runtime_names: RuntimeNameTable,
}

static STDLIB: OnceLock<LoadedStdlib> = OnceLock::new();

pub fn load() -> &'static LoadedStdlib {
    STDLIB.get_or_init(build)
}

fn build() -> LoadedStdlib {
    let mut signatures = Vec::new();
    let mut runtime_names = RuntimeNameTable::default();

    for module in MODULES {
        let mut handler = Handler::new();
        let tokens = Lexer::new(module.source, &mut handler).tokenize();
        let parsed = prvc_par::Parser::new(tokens, &handler, module.source).parse();
        for decl in &parsed.decls {
            register_decl(module.name, decl, &mut signatures, &mut runtime_names);
        }
    }

    LoadedStdlib { signatures, runtime_names }
}

fn register_decl(module: &str, decl: &ast::Decl, signatures: &mut Vec<FnSignature>, runtime_names: &mut RuntimeNameTable) {
    let ast::Decl::Fn(f) = decl else { return };
    if f.body.stmts.is_empty() && f.body.trailing.is_none() {
        // still register: an empty/`pass` body is a declaration, not a
        // definition, and stdlib modules ship declarations only.
    }

    let params: Vec<Type> = f.params.iter().map(|p| stdlib_type(&p.ty)).collect();
    let ret = match f.verb {
        Verb::Validates => Type::Primitive(Symbol::intern("Boolean"), vec![]),
        _ => f.ret_type.as_ref().map(stdlib_type).unwrap_or(Type::Unit),
    };
    signatures.push(FnSignature { verb: Some(f.verb), name: f.name, params: params.clone(), ret, can_fail: f.can_fail });

    let first_param = f.params.first().and_then(|p| p.ty.name());
    let runtime_name = format!("prv_{}_{}", module.to_lowercase(), f.name.as_str());
    runtime_names.insert(Symbol::intern(module), f.verb, f.name, first_param, runtime_name);
}

/// Resolves a `TypeExpr` appearing in stdlib declarations. Limited to
/// the primitive and built-in generic vocabulary those declarations
/// actually use — stdlib modules don't declare their own record or
/// algebraic types.
fn stdlib_type(te: &ast::TypeExpr) -> Type {
    match te {
        ast::TypeExpr::Simple(name, _) => Type::Primitive(*name, vec![]),
        ast::TypeExpr::Generic(name, args, _) => Type::Generic(*name, args.iter().map(stdlib_type).collect()),
        ast::TypeExpr::Modified(name, mods, _) => {
            let values = mods
                .iter()
                .map(|m| match m {
                    ast::Modifier::Positional(v) | ast::Modifier::Named(_, v) => *v,
                })
                .collect();
            Type::Primitive(*name, values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdlib_loads_without_panicking() {
        let stdlib = load();
        assert!(!stdlib.signatures.is_empty());
    }

    #[test]
    fn println_is_registered_from_input_output() {
        let stdlib = load();
        assert!(stdlib.signatures.iter().any(|s| s.name.eq_str("println")));
    }

    #[test]
    fn runtime_names_are_namespaced_per_module() {
        let stdlib = load();
        let name = stdlib.runtime_names.lookup(Symbol::intern("InputOutput"), Verb::Transforms, Symbol::intern("println"), None);
        assert_eq!(name, Some("prv_inputoutput_println"));
    }
}
