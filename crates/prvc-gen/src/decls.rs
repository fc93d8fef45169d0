//! Emits C type declarations for record and algebraic type items.
//!
//! A refinement type item emits nothing: its checked constraint is
//! structural only (see the "refinement constraints" open question),
//! and its mapped C type is simply its base type's, so no separate
//! declaration is needed.

use prvc_sem::hir;
use prvc_sem::types::Type;

use crate::error::Result;
use crate::types::c_type;

pub fn emit_type_item(item: &hir::TypeItem) -> Result<String> {
    match &item.ty {
        Type::Record(r) => emit_record(item.name.as_str(), r),
        Type::Algebraic(a) => emit_algebraic(item.name.as_str(), a),
        _ => Ok(String::new()),
    }
}

fn emit_record(name: &str, r: &prvc_sem::types::RecordType) -> Result<String> {
    let mut out = format!("typedef struct {{\n");
    for (field_name, field_ty) in &r.fields {
        out.push_str(&format!("    {} {};\n", c_type(field_ty)?, field_name.as_str()));
    }
    out.push_str(&format!("}} Prove_{};\n", name));
    Ok(out)
}

fn emit_algebraic(name: &str, a: &prvc_sem::types::AlgebraicType) -> Result<String> {
    let mut out = String::new();

    out.push_str("typedef enum {\n");
    for (variant_name, _) in &a.variants {
        out.push_str(&format!("    {}_TAG_{},\n", name, variant_name.as_str().to_uppercase()));
    }
    out.push_str(&format!("}} Prove_{}_Tag;\n\n", name));

    out.push_str("typedef struct {\n");
    out.push_str(&format!("    Prove_{}_Tag tag;\n", name));
    out.push_str("    union {\n");
    for (variant_name, fields) in &a.variants {
        if fields.is_empty() {
            continue;
        }
        out.push_str(&format!("        struct {{\n"));
        for (i, field_ty) in fields.iter().enumerate() {
            out.push_str(&format!("            {} _{};\n", c_type(field_ty)?, i));
        }
        out.push_str(&format!("        }} {};\n", variant_name.as_str()));
    }
    out.push_str("    } payload;\n");
    out.push_str(&format!("}} Prove_{};\n\n", name));

    for (variant_name, fields) in &a.variants {
        out.push_str(&emit_constructor(name, variant_name.as_str(), fields)?);
    }
    Ok(out)
}

fn emit_constructor(type_name: &str, variant_name: &str, fields: &[Type]) -> Result<String> {
    let params: Result<Vec<String>> =
        fields.iter().enumerate().map(|(i, ty)| Ok(format!("{} _{}", c_type(ty)?, i))).collect();
    let params = params?;
    let mut out =
        format!("static inline Prove_{} Prove_{}_{}({}) {{\n", type_name, type_name, variant_name, params.join(", "));
    out.push_str(&format!("    Prove_{} result;\n", type_name));
    out.push_str(&format!("    result.tag = {}_TAG_{};\n", type_name, variant_name.to_uppercase()));
    for i in 0..fields.len() {
        out.push_str(&format!("    result.payload.{}._{} = _{};\n", variant_name, i, i));
    }
    out.push_str("    return result;\n");
    out.push_str("}\n\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_sem::types::{AlgebraicType, RecordType};
    use prvc_util::Symbol;

    fn int_ty() -> Type {
        Type::Primitive(Symbol::intern("Integer"), vec![])
    }

    #[test]
    fn record_emits_a_struct_with_its_fields() {
        let r = RecordType { name: Symbol::intern("Point"), fields: vec![(Symbol::intern("x"), int_ty()), (Symbol::intern("y"), int_ty())], params: vec![] };
        let out = emit_record("Point", &r).unwrap();
        assert!(out.contains("typedef struct"));
        assert!(out.contains("int64_t x;"));
        assert!(out.contains("} Prove_Point;"));
    }

    #[test]
    fn algebraic_emits_tag_enum_union_and_constructors() {
        let a = AlgebraicType {
            name: Symbol::intern("Option"),
            variants: vec![(Symbol::intern("Some"), vec![int_ty()]), (Symbol::intern("None"), vec![])],
            params: vec![],
        };
        let out = emit_algebraic("Option", &a).unwrap();
        assert!(out.contains("Option_TAG_SOME"));
        assert!(out.contains("Option_TAG_NONE"));
        assert!(out.contains("Prove_Option_Some"));
        assert!(out.contains("Prove_Option_None"));
    }
}
