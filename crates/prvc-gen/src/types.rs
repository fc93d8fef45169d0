//! Maps a checked [`Type`] to its C representation.
//!
//! Every `Type` the emitter sees comes straight from the HIR's own
//! embedded annotations — there is no separate type table to consult.
//! Records and algebraics carry their own field/variant lists inline,
//! so a struct or tagged union's shape is always fully determined by
//! the `Type` value itself.

use prvc_sem::types::Type;

use crate::error::{CodeGenError, Result};

/// Maps a primitive/record/algebraic/list/generic type to the C type
/// name the emitter should use for a variable, field, or return type.
pub fn c_type(ty: &Type) -> Result<String> {
    match ty {
        Type::Primitive(name, mods) => primitive_c_type(name.as_str(), mods),
        Type::Unit => Ok("void".to_string()),
        Type::Record(r) => Ok(format!("Prove_{}", r.name.as_str())),
        Type::Algebraic(a) => Ok(format!("Prove_{}", a.name.as_str())),
        Type::List(_) => Ok("Prove_List*".to_string()),
        Type::Refinement(_, base) => c_type(base),
        Type::Generic(name, args) if name.as_str() == "Result" => {
            let _ = args;
            Ok("Prove_Result".to_string())
        }
        Type::Generic(name, args) if name.as_str() == "Option" => {
            let elem = args.first().ok_or_else(|| CodeGenError::TypeMappingError("Option with no element type".to_string()))?;
            Ok(format!("Prove_Option_{}", monomorph_tag(elem)?))
        }
        Type::Generic(name, _) => Ok(format!("Prove_{}", name.as_str())),
        Type::Fn(params, ret) => {
            let ret_c = c_type(ret)?;
            let param_c: Result<Vec<String>> = params.iter().map(c_type).collect();
            Ok(format!("{}(*)({})", ret_c, param_c?.join(", ")))
        }
        Type::Var(name) => Err(CodeGenError::TypeMappingError(format!("unresolved type variable `{}` reached codegen", name.as_str()))),
        Type::Error => Err(CodeGenError::Internal("Type::Error reached codegen; checker should have rejected this module".to_string())),
    }
}

fn primitive_c_type(name: &str, mods: &[prvc_util::Symbol]) -> Result<String> {
    match name {
        "Integer" => Ok(integer_c_type(mods)),
        "Decimal" => Ok(if has_mod(mods, "32") { "float".to_string() } else { "double".to_string() }),
        "Boolean" => Ok("bool".to_string()),
        "Character" => Ok("char".to_string()),
        "Byte" => Ok("uint8_t".to_string()),
        "String" => Ok("Prove_String*".to_string()),
        "Error" => Ok("Prove_Error".to_string()),
        other => Err(CodeGenError::TypeMappingError(format!("unknown primitive type `{}`", other))),
    }
}

fn has_mod(mods: &[prvc_util::Symbol], value: &str) -> bool {
    mods.iter().any(|m| m.as_str() == value)
}

fn integer_c_type(mods: &[prvc_util::Symbol]) -> String {
    let unsigned = has_mod(mods, "Unsigned");
    let width = ["8", "16", "32", "64"].iter().find(|w| has_mod(mods, w)).copied().unwrap_or("64");
    format!("{}int{}_t", if unsigned { "u" } else { "" }, width)
}

/// A name-safe fragment derived from a mapped C type, used to build a
/// monomorphized `Option` struct name (e.g. the `Integer` element type
/// maps to `int64_t`, giving `Prove_Option_int64_t`).
fn monomorph_tag(ty: &Type) -> Result<String> {
    Ok(c_type(ty)?.replace(['*', '(', ')'], "").replace(", ", "_").replace(' ', "_"))
}

/// Whether this type, anywhere in its structure, requires the string
/// runtime header (used by the header pre-scan).
pub fn mentions_string(ty: &Type) -> bool {
    match ty {
        Type::Primitive(name, _) => name.as_str() == "String",
        Type::Refinement(_, base) => mentions_string(base),
        Type::Generic(_, args) => args.iter().any(mentions_string),
        Type::List(elem) => mentions_string(elem),
        Type::Record(r) => r.fields.iter().any(|(_, t)| mentions_string(t)),
        Type::Algebraic(a) => a.variants.iter().any(|(_, fields)| fields.iter().any(mentions_string)),
        Type::Fn(params, ret) => params.iter().any(mentions_string) || mentions_string(ret),
        Type::Unit | Type::Var(_) | Type::Error => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prvc_util::Symbol;

    fn prim(name: &str, mods: &[&str]) -> Type {
        Type::Primitive(Symbol::intern(name), mods.iter().map(|m| Symbol::intern(m)).collect())
    }

    #[test]
    fn default_integer_is_signed_64_bit() {
        assert_eq!(c_type(&prim("Integer", &[])).unwrap(), "int64_t");
    }

    #[test]
    fn unsigned_16_bit_integer() {
        assert_eq!(c_type(&prim("Integer", &["Unsigned", "16"])).unwrap(), "uint16_t");
    }

    #[test]
    fn decimal_defaults_to_double_but_32_gives_float() {
        assert_eq!(c_type(&prim("Decimal", &[])).unwrap(), "double");
        assert_eq!(c_type(&prim("Decimal", &["32"])).unwrap(), "float");
    }

    #[test]
    fn string_maps_to_a_pointer() {
        assert_eq!(c_type(&prim("String", &[])).unwrap(), "Prove_String*");
    }

    #[test]
    fn option_is_monomorphized_per_element_type() {
        let opt = Type::Generic(Symbol::intern("Option"), vec![prim("Integer", &[])]);
        assert_eq!(c_type(&opt).unwrap(), "Prove_Option_int64_t");
    }

    #[test]
    fn result_is_not_monomorphized() {
        let res = Type::Generic(Symbol::intern("Result"), vec![prim("Integer", &[]), prim("String", &[])]);
        assert_eq!(c_type(&res).unwrap(), "Prove_Result");
    }
}
