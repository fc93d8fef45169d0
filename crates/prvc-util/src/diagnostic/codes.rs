//! Diagnostic codes for categorizing compiler errors and warnings.
//!
//! This module provides the [`DiagnosticCode`] type for uniquely identifying
//! diagnostic messages, enabling users to look up documentation and suppress
//! specific warnings.
//!
//! Code ranges follow the compiler's stage layout:
//!
//! - `E1xx` - lexer (disallowed characters, bad indentation, unterminated literals)
//! - `E2xx` - parser (unexpected/missing tokens, recovered via panic-mode sync)
//! - `E3xx`-`E319` - name resolution (duplicate definitions, undefined names)
//! - `E320`-`E349` - type checking (mismatches, bad field access, arity)
//! - `E350`-`E379` - structural checks (fail-prop placement, match exhaustiveness)
//! - `E360`-`E369` - verb enforcement (purity, I/O, failability)
//! - `E380`-`E399` - contract checking and proof verification
//!
//! # Examples
//!
//! ```
//! use prvc_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::E301;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.number(), 301);
//! assert_eq!(code.as_str(), "E0301");
//! ```

/// A unique code identifying a diagnostic message.
///
/// Diagnostic codes follow the format `{prefix}{number:04}` where `prefix`
/// is `"E"` for errors or `"W"` for warnings.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix (e.g., "E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the full code string (e.g., "E0301", "W0300")
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // =========================================================================
    // LEXER (E100-E199)
    // =========================================================================

    /// E100: bad indentation (tab used, or width matches no open indent level)
    pub const E100: Self = Self::new("E", 100);
    /// E101: unterminated string literal
    pub const E101: Self = Self::new("E", 101);
    /// E102: invalid numeric literal
    pub const E102: Self = Self::new("E", 102);
    /// E103: disallowed character / unknown token
    pub const E103: Self = Self::new("E", 103);

    // =========================================================================
    // PARSER (E200-E299)
    // =========================================================================

    /// E200: unexpected token
    pub const E200: Self = Self::new("E", 200);
    /// E201: expected token not found
    pub const E201: Self = Self::new("E", 201);
    /// E202: unexpected end of file
    pub const E202: Self = Self::new("E", 202);

    // =========================================================================
    // NAME RESOLUTION (E300-E319)
    // =========================================================================

    /// E301: duplicate registration (type, function, constant, or variant)
    pub const E301: Self = Self::new("E", 301);
    /// E302: undefined name
    pub const E302: Self = Self::new("E", 302);
    /// E303: undefined type
    pub const E303: Self = Self::new("E", 303);
    /// E310: import could not be resolved
    pub const E310: Self = Self::new("E", 310);
    /// E311: ambiguous name across verb keys
    pub const E311: Self = Self::new("E", 311);
    /// E312: name shadows an existing binding in the same scope
    pub const E312: Self = Self::new("E", 312);
    /// E320: call to an undefined function
    pub const E320: Self = Self::new("E", 320);
    /// E321: field access on a non-record type
    pub const E321: Self = Self::new("E", 321);

    // =========================================================================
    // TYPE CHECKING (E320-E349)
    // =========================================================================

    /// E322: function body type incompatible with declared return type
    pub const E322: Self = Self::new("E", 322);
    /// E323: refinement predicate rejected the value's static range
    pub const E323: Self = Self::new("E", 323);
    /// E330: call arity does not match any candidate signature
    pub const E330: Self = Self::new("E", 330);
    /// E331: argument type incompatible with parameter type
    pub const E331: Self = Self::new("E", 331);
    /// E332: binary/unary operand type mismatch
    pub const E332: Self = Self::new("E", 332);
    /// E333: condition expression is not boolean
    pub const E333: Self = Self::new("E", 333);
    /// E340: unknown field on a record type
    pub const E340: Self = Self::new("E", 340);
    /// E341: reassignment of an immutable binding
    pub const E341: Self = Self::new("E", 341);
    /// E342: type parameter count mismatch on a generic instantiation
    pub const E342: Self = Self::new("E", 342);

    // =========================================================================
    // STRUCTURAL (E350-E379)
    // =========================================================================

    /// E350: fail-propagation (`e!`) used outside a failable function
    pub const E350: Self = Self::new("E", 350);
    /// E351: fail-propagation applied to a non-`Result` expression
    pub const E351: Self = Self::new("E", 351);
    /// E360: `validates` function declares an explicit return type
    pub const E360: Self = Self::new("E", 360);
    /// E361: pure (`transforms`/`validates`) function declared failable
    pub const E361: Self = Self::new("E", 361);
    /// E362: pure function calls a known I/O primitive
    pub const E362: Self = Self::new("E", 362);
    /// E370: match arm names an unknown variant
    pub const E370: Self = Self::new("E", 370);
    /// E371: match over an algebraic subject is not exhaustive
    pub const E371: Self = Self::new("E", 371);
    /// E372: duplicate pattern arm for the same variant
    pub const E372: Self = Self::new("E", 372);

    // =========================================================================
    // CONTRACTS AND PROOFS (E380-E399)
    // =========================================================================

    /// E380: `ensures` expression is not boolean
    pub const E380: Self = Self::new("E", 380);
    /// E381: `requires` expression is not boolean
    pub const E381: Self = Self::new("E", 381);
    /// E382: `satisfies` names a type absent from the type registry
    pub const E382: Self = Self::new("E", 382);
    /// E383: `intent` clause is not a string literal
    pub const E383: Self = Self::new("E", 383);
    /// E384: `know` expression is not boolean
    pub const E384: Self = Self::new("E", 384);
    /// E385: `assume` expression is not boolean
    pub const E385: Self = Self::new("E", 385);
    /// E386: `believe` expression is not boolean
    pub const E386: Self = Self::new("E", 386);
    /// E391: duplicate proof obligation names within one `proof` block
    pub const E391: Self = Self::new("E", 391);
    /// E392: obligation count is smaller than the `ensures` count
    pub const E392: Self = Self::new("E", 392);
    /// E393: `believe` clause present without any `ensures` clause
    pub const E393: Self = Self::new("E", 393);

    // =========================================================================
    // WARNINGS (W300-W399)
    // =========================================================================

    /// W300: variable bound but never read
    pub const W300: Self = Self::new("W", 300);
    /// W301: match arm unreachable after a preceding wildcard/binding arm
    pub const W301: Self = Self::new("W", 301);
    /// W310: `intent` present without any `ensures`/`requires` clause
    pub const W310: Self = Self::new("W", 310);
    /// W321: obligation text mentions none of function name, a parameter, or `result`
    pub const W321: Self = Self::new("W", 321);
    /// W322: duplicate `near_miss` inputs under structural equality
    pub const W322: Self = Self::new("W", 322);
    /// W324: `ensures` present without any `requires` clause
    pub const W324: Self = Self::new("W", 324);
    /// W390: `ensures` clause present without a matching `proof` block
    pub const W390: Self = Self::new("W", 390);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Standalone constant exports for convenience, mirroring the associated consts above.
pub const E100: DiagnosticCode = DiagnosticCode::E100;
pub const E101: DiagnosticCode = DiagnosticCode::E101;
pub const E102: DiagnosticCode = DiagnosticCode::E102;
pub const E103: DiagnosticCode = DiagnosticCode::E103;
pub const E200: DiagnosticCode = DiagnosticCode::E200;
pub const E201: DiagnosticCode = DiagnosticCode::E201;
pub const E202: DiagnosticCode = DiagnosticCode::E202;
pub const E301: DiagnosticCode = DiagnosticCode::E301;
pub const E302: DiagnosticCode = DiagnosticCode::E302;
pub const E303: DiagnosticCode = DiagnosticCode::E303;
pub const E310: DiagnosticCode = DiagnosticCode::E310;
pub const E311: DiagnosticCode = DiagnosticCode::E311;
pub const E312: DiagnosticCode = DiagnosticCode::E312;
pub const E320: DiagnosticCode = DiagnosticCode::E320;
pub const E321: DiagnosticCode = DiagnosticCode::E321;
pub const E322: DiagnosticCode = DiagnosticCode::E322;
pub const E323: DiagnosticCode = DiagnosticCode::E323;
pub const E330: DiagnosticCode = DiagnosticCode::E330;
pub const E331: DiagnosticCode = DiagnosticCode::E331;
pub const E332: DiagnosticCode = DiagnosticCode::E332;
pub const E333: DiagnosticCode = DiagnosticCode::E333;
pub const E340: DiagnosticCode = DiagnosticCode::E340;
pub const E341: DiagnosticCode = DiagnosticCode::E341;
pub const E342: DiagnosticCode = DiagnosticCode::E342;
pub const E350: DiagnosticCode = DiagnosticCode::E350;
pub const E351: DiagnosticCode = DiagnosticCode::E351;
pub const E360: DiagnosticCode = DiagnosticCode::E360;
pub const E361: DiagnosticCode = DiagnosticCode::E361;
pub const E362: DiagnosticCode = DiagnosticCode::E362;
pub const E370: DiagnosticCode = DiagnosticCode::E370;
pub const E371: DiagnosticCode = DiagnosticCode::E371;
pub const E372: DiagnosticCode = DiagnosticCode::E372;
pub const E380: DiagnosticCode = DiagnosticCode::E380;
pub const E381: DiagnosticCode = DiagnosticCode::E381;
pub const E382: DiagnosticCode = DiagnosticCode::E382;
pub const E383: DiagnosticCode = DiagnosticCode::E383;
pub const E384: DiagnosticCode = DiagnosticCode::E384;
pub const E385: DiagnosticCode = DiagnosticCode::E385;
pub const E386: DiagnosticCode = DiagnosticCode::E386;
pub const E391: DiagnosticCode = DiagnosticCode::E391;
pub const E392: DiagnosticCode = DiagnosticCode::E392;
pub const E393: DiagnosticCode = DiagnosticCode::E393;
pub const W300: DiagnosticCode = DiagnosticCode::W300;
pub const W301: DiagnosticCode = DiagnosticCode::W301;
pub const W310: DiagnosticCode = DiagnosticCode::W310;
pub const W321: DiagnosticCode = DiagnosticCode::W321;
pub const W322: DiagnosticCode = DiagnosticCode::W322;
pub const W324: DiagnosticCode = DiagnosticCode::W324;
pub const W390: DiagnosticCode = DiagnosticCode::W390;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_code_formats_with_padding() {
        let code = DiagnosticCode::new("E", 301);
        assert_eq!(code.prefix(), "E");
        assert_eq!(code.number(), 301);
        assert_eq!(code.as_str(), "E0301");
    }

    #[test]
    fn display_matches_as_str() {
        let code = DiagnosticCode::E391;
        assert_eq!(format!("{}", code), code.as_str());
    }

    #[test]
    fn debug_wraps_as_str() {
        assert_eq!(format!("{:?}", DiagnosticCode::E100), "DiagnosticCode(E0100)");
    }

    #[test]
    fn contract_codes_fall_in_range() {
        for code in [
            DiagnosticCode::E380,
            DiagnosticCode::E381,
            DiagnosticCode::E391,
            DiagnosticCode::E393,
        ] {
            assert_eq!(code.prefix(), "E");
            assert!(code.number() >= 380 && code.number() < 400);
        }
    }

    #[test]
    fn codes_are_distinct() {
        assert_ne!(DiagnosticCode::E391, DiagnosticCode::E392);
        assert_ne!(DiagnosticCode::W300, DiagnosticCode::W310);
    }

    #[test]
    fn w390_falls_in_the_warning_range() {
        assert_eq!(DiagnosticCode::W390.prefix(), "W");
        assert!(DiagnosticCode::W390.number() >= 300 && DiagnosticCode::W390.number() < 400);
    }
}
