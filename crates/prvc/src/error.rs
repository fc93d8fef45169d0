//! Top-level compile error, composing each phase's own error type.

use prvc_util::diagnostic::Diagnostic;
use thiserror::Error;

/// Why a [`crate::compile`] call failed.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Lexing, parsing, or checking produced at least one error-level
    /// diagnostic; the diagnostic list is the user-facing explanation,
    /// not a Rust `Error` variant of its own.
    #[error("compilation failed with {} diagnostic(s)", .0.len())]
    Diagnostics(Vec<Diagnostic>),

    /// The optimized HIR reached the emitter in a shape it couldn't
    /// handle — a bug in this implementation, not a user error.
    #[error("code generation failed: {0}")]
    CodeGen(#[from] prvc_gen::CodeGenError),

    /// `prove.toml` couldn't be read or parsed.
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Failure loading or parsing `prove.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no prove.toml found in any parent directory of {0}")]
    NotFound(std::path::PathBuf),

    #[error("failed to read {0}: {1}")]
    Io(std::path::PathBuf, #[source] std::io::Error),

    #[error("failed to parse {0}: {1}")]
    Parse(std::path::PathBuf, #[source] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CompileError>;
