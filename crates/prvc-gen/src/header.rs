//! Header pre-scan: walks every function signature (parameters and
//! return type) to decide which runtime headers the generated source
//! needs to `#include`.
//!
//! The base runtime header (the `Result`/panic/I-O plumbing) and the
//! string runtime header are always included, even for a program that
//! never mentions `String` — the base runtime backs every failable
//! function's return type. The list header is included only when a
//! `List` type actually appears somewhere in a signature.

use prvc_sem::hir;
use prvc_sem::types::Type;

use crate::types::mentions_string;

pub const BASE_HEADER: &str = "prove_runtime.h";
pub const STRING_HEADER: &str = "prove_string.h";
pub const LIST_HEADER: &str = "prove_list.h";

pub fn required_headers(items: &[hir::Item]) -> Vec<&'static str> {
    let mut headers = vec![BASE_HEADER, STRING_HEADER];
    if any_signature_mentions_list(items) {
        headers.push(LIST_HEADER);
    }
    headers
}

fn any_signature_mentions_list(items: &[hir::Item]) -> bool {
    items.iter().any(|item| match item {
        hir::Item::Fn(f) => f.params.iter().any(|p| mentions_list(&p.ty)) || mentions_list(&f.ret),
        hir::Item::Module(m) => any_signature_mentions_list(&m.items),
        _ => false,
    })
}

fn mentions_list(ty: &Type) -> bool {
    match ty {
        Type::List(_) => true,
        Type::Refinement(_, base) => mentions_list(base),
        Type::Generic(_, args) => args.iter().any(mentions_list),
        _ => false,
    }
}

/// Re-exported purely so callers scanning for `String` usage (as the
/// spec frames it) and `List` usage go through one module.
pub fn mentions_string_type(ty: &Type) -> bool {
    mentions_string(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_sem::types::Type;
    use prvc_util::{DefId, Span, Symbol};

    fn fn_item(ret: Type) -> hir::Item {
        hir::Item::Fn(hir::FnItem {
            def_id: DefId(0),
            verb: prvc_par::ast::Verb::Transforms,
            name: Symbol::intern("f"),
            params: vec![],
            ret,
            can_fail: false,
            body: hir::Block { stmts: vec![], trailing: None, ty: Type::Unit, span: Span::DUMMY },
            span: Span::DUMMY,
        })
    }

    #[test]
    fn base_and_string_headers_are_always_present() {
        let headers = required_headers(&[fn_item(Type::Unit)]);
        assert!(headers.contains(&BASE_HEADER));
        assert!(headers.contains(&STRING_HEADER));
        assert!(!headers.contains(&LIST_HEADER));
    }

    #[test]
    fn list_header_appears_when_a_signature_uses_a_list() {
        let list_ty = Type::List(Box::new(Type::Primitive(Symbol::intern("Integer"), vec![])));
        let headers = required_headers(&[fn_item(list_ty)]);
        assert!(headers.contains(&LIST_HEADER));
    }
}
