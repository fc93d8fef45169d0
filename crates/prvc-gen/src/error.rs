//! Error type for the C emitter.

use thiserror::Error;

/// Host-level failure in the emitter itself, distinct from a user-facing
/// [`Diagnostic`](prvc_sem::Diagnostic) — by the time HIR reaches this
/// crate the checker has already guaranteed it's error-free, so these
/// variants are for shapes the emitter's own exhaustive matches don't
/// expect, not for malformed user input.
#[derive(Debug, Error)]
pub enum CodeGenError {
    /// A type the mapper has no C representation for.
    #[error("cannot map type to C: {0}")]
    TypeMappingError(String),

    /// A call to a name with no registered signature, runtime name, or
    /// locally-known mangling — should be unreachable on checked HIR.
    #[error("unresolved call target: {0}")]
    UnresolvedCall(String),

    /// A variant name that doesn't appear in its algebraic type's
    /// variant list — should be unreachable on checked HIR.
    #[error("unknown variant `{0}` of type `{1}`")]
    UnknownVariant(String, String),

    /// Violation of an invariant the emitter relies on internally (an
    /// optimizer pass producing a shape the emitter's match doesn't
    /// expect, for instance).
    #[error("internal codegen error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
