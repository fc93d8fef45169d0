//! Token kinds for the Prove lexer.
//!
//! A token is a tagged value: kind, lexeme span, and (for identifiers and
//! literals) an associated payload carried directly on the `TokenKind`
//! variant, mirroring how the reference lexer attaches a `value: str` to
//! every token.

use prvc_util::{Span, Symbol};

/// A single lexical token: its kind plus the span of source it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // ── Verbs ───────────────────────────────────────────────────────
    Transforms,
    Inputs,
    Outputs,
    Validates,
    Reads,
    Creates,
    Matches,

    // ── Declarations and control flow ──────────────────────────────
    Main,
    TypeKw,
    Const,
    Import,
    Module,
    From,
    If,
    Else,
    For,
    While,
    Return,
    Match,
    In,
    Let,
    Mut,
    Where,
    Invariant,

    // ── Contract and epistemic keywords ────────────────────────────
    Ensures,
    Requires,
    Proof,
    Know,
    Assume,
    Believe,
    WhyNot,
    Chosen,
    NearMiss,
    Intent,
    Satisfies,
    ResultKw,
    When,

    // ── Identifier classes ──────────────────────────────────────────
    /// Lowercase-leading identifier ("value" form).
    Ident(Symbol),
    /// Uppercase-leading identifier containing a lowercase letter, or a
    /// single uppercase letter ("type" form).
    TypeIdent(Symbol),
    /// All-caps identifier with underscores, length >= 2 ("constant" form).
    ConstIdent(Symbol),

    // ── Literals ─────────────────────────────────────────────────────
    IntegerLit(i64),
    DecimalLit(f64),
    StringLit(Symbol),
    TripleStringLit(Symbol),
    RawStringLit(Symbol),
    CharLit(char),
    BooleanLit(bool),
    RegexLit(Symbol),
    PathLit(Symbol),

    // ── String interpolation boundaries ────────────────────────────
    InterpStart,
    InterpEnd,

    /// A `///` doc comment, attached to the declaration that follows it.
    DocComment(Symbol),

    // ── Operators ────────────────────────────────────────────────────
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AndAnd,
    OrOr,
    Bang,
    PipeArrow,
    FatArrow,
    Arrow,
    Dot,
    DotDot,

    // ── Punctuation ──────────────────────────────────────────────────
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Pipe,

    // ── Structural markers ───────────────────────────────────────────
    Newline,
    Indent,
    Dedent,
    Eof,

    /// Unrecognized character, retained for error recovery.
    Invalid(String),
}

impl TokenKind {
    /// True for tokens that complete a value expression — used to
    /// disambiguate a leading `/` as division rather than a regex or path
    /// literal, and to decide whether a `NEWLINE` continues a statement.
    pub fn is_value_producing(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident(_)
                | TokenKind::TypeIdent(_)
                | TokenKind::ConstIdent(_)
                | TokenKind::IntegerLit(_)
                | TokenKind::DecimalLit(_)
                | TokenKind::StringLit(_)
                | TokenKind::TripleStringLit(_)
                | TokenKind::RawStringLit(_)
                | TokenKind::CharLit(_)
                | TokenKind::BooleanLit(_)
                | TokenKind::RegexLit(_)
                | TokenKind::PathLit(_)
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::Bang
                | TokenKind::InterpEnd
        )
    }

    /// True for tokens after which a `NEWLINE` is suppressed because the
    /// statement is known to continue (the "continuation set").
    pub fn suppresses_following_newline(&self) -> bool {
        matches!(
            self,
            TokenKind::Comma
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Assign
                | TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::LtEq
                | TokenKind::GtEq
                | TokenKind::AndAnd
                | TokenKind::OrOr
                | TokenKind::PipeArrow
                | TokenKind::FatArrow
                | TokenKind::Arrow
                | TokenKind::Colon
                | TokenKind::Pipe
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::Dot
                | TokenKind::DotDot
        )
    }
}

/// Maps a scanned identifier to its keyword `TokenKind`, if it is reserved.
///
/// Only verbs, declaration/control-flow keywords, and contract/epistemic
/// keywords are reserved words; built-in type and function names (e.g.
/// `Integer`, `println`) are ordinary identifiers resolved later by the
/// symbol table.
pub fn keyword_from_ident(text: &str) -> Option<TokenKind> {
    Some(match text {
        "transforms" => TokenKind::Transforms,
        "inputs" => TokenKind::Inputs,
        "outputs" => TokenKind::Outputs,
        "validates" => TokenKind::Validates,
        "reads" => TokenKind::Reads,
        "creates" => TokenKind::Creates,
        "matches" => TokenKind::Matches,

        "main" => TokenKind::Main,
        "type" => TokenKind::TypeKw,
        "const" => TokenKind::Const,
        "import" => TokenKind::Import,
        "module" => TokenKind::Module,
        "from" => TokenKind::From,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "for" => TokenKind::For,
        "while" => TokenKind::While,
        "return" => TokenKind::Return,
        "match" => TokenKind::Match,
        "in" => TokenKind::In,
        "let" => TokenKind::Let,
        "mut" => TokenKind::Mut,
        "where" => TokenKind::Where,
        "invariant" => TokenKind::Invariant,

        "ensures" => TokenKind::Ensures,
        "requires" => TokenKind::Requires,
        "proof" => TokenKind::Proof,
        "know" => TokenKind::Know,
        "assume" => TokenKind::Assume,
        "believe" => TokenKind::Believe,
        "why_not" => TokenKind::WhyNot,
        "chosen" => TokenKind::Chosen,
        "near_miss" => TokenKind::NearMiss,
        "intent" => TokenKind::Intent,
        "satisfies" => TokenKind::Satisfies,
        "result" => TokenKind::ResultKw,
        "when" => TokenKind::When,

        "true" => TokenKind::BooleanLit(true),
        "false" => TokenKind::BooleanLit(false),

        _ => return None,
    })
}

/// Classifies a non-keyword identifier by its casing, per the lexer's
/// identifier-classification rule: all-caps with underscores and length
/// >= 2 is a constant; uppercase-leading with an internal lowercase
/// letter (or a single uppercase letter) is a type; otherwise a value.
pub fn classify_ident(text: &str) -> IdentClass {
    let mut chars = text.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return IdentClass::Value,
    };

    if !first.is_uppercase() {
        return IdentClass::Value;
    }

    let rest_has_lowercase = text.chars().any(|c| c.is_lowercase());
    if text.chars().count() == 1 {
        return IdentClass::Type;
    }
    if rest_has_lowercase {
        return IdentClass::Type;
    }

    let is_all_caps_with_underscores = text
        .chars()
        .all(|c| c.is_uppercase() || c == '_' || c.is_ascii_digit());
    if is_all_caps_with_underscores && text.len() >= 2 {
        return IdentClass::Constant;
    }

    IdentClass::Type
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentClass {
    Value,
    Type,
    Constant,
}
