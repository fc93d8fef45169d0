//! AST node definitions for the Prove parser.
//!
//! Every node is frozen after construction; the optimizer builds fresh
//! nodes rather than mutating these in place.

use prvc_util::{Span, Symbol};

/// A source file: an ordered list of top-level declarations.
#[derive(Debug, Clone)]
pub struct Module {
    pub decls: Vec<Decl>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Decl {
    Fn(FnDecl),
    Main(MainDecl),
    Type(TypeDecl),
    Const(ConstDecl),
    Import(ImportDecl),
    Module(ModuleDecl),
    InvariantNetwork(InvariantNetworkDecl),
}

impl Decl {
    pub fn span(&self) -> Span {
        match self {
            Decl::Fn(d) => d.span,
            Decl::Main(d) => d.span,
            Decl::Type(d) => d.span,
            Decl::Const(d) => d.span,
            Decl::Import(d) => d.span,
            Decl::Module(d) => d.span,
            Decl::InvariantNetwork(d) => d.span,
        }
    }
}

/// One of the seven verbs a function declaration may be classified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Transforms,
    Inputs,
    Outputs,
    Validates,
    Reads,
    Creates,
    Matches,
}

impl Verb {
    /// `transforms` and `validates` are pure: no failability, no direct I/O.
    pub fn is_pure(self) -> bool {
        matches!(self, Verb::Transforms | Verb::Validates)
    }
}

#[derive(Debug, Clone)]
pub struct FnDecl {
    pub doc: Option<Symbol>,
    pub verb: Verb,
    pub name: Symbol,
    pub params: Vec<Param>,
    pub ret_type: Option<TypeExpr>,
    pub can_fail: bool,
    pub ensures: Vec<Expr>,
    pub requires: Vec<Expr>,
    pub proof: Option<ProofBlock>,
    pub know: Vec<Expr>,
    pub assume: Vec<Expr>,
    pub believe: Vec<Expr>,
    pub why_not: Vec<Symbol>,
    pub chosen: Option<Symbol>,
    pub near_misses: Vec<(Expr, Expr)>,
    pub intent: Option<Symbol>,
    pub satisfies: Vec<Symbol>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: Symbol,
    pub ty: TypeExpr,
    pub where_clause: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ProofBlock {
    pub obligations: Vec<ProofObligation>,
    pub span: Span,
}

/// `name: free-text [when condition]`.
#[derive(Debug, Clone)]
pub struct ProofObligation {
    pub name: Symbol,
    pub text: Symbol,
    pub when: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct MainDecl {
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: Symbol,
    pub params: Vec<Symbol>,
    pub body: TypeBody,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum TypeBody {
    /// `Variant(Ty, Ty) | OtherVariant`
    Algebraic(Vec<VariantDef>),
    /// `(field: Ty, field: Ty)`
    Record(Vec<FieldDef>),
    /// `where <constraint>` over a base type.
    Refinement(Box<TypeExpr>, Expr),
}

#[derive(Debug, Clone)]
pub struct VariantDef {
    pub name: Symbol,
    pub fields: Vec<TypeExpr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: Symbol,
    pub ty: TypeExpr,
    pub where_clause: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ConstDecl {
    pub name: Symbol,
    pub ty: Option<TypeExpr>,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ImportDecl {
    pub path: Symbol,
    pub items: Vec<Symbol>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ModuleDecl {
    pub name: Symbol,
    pub decls: Vec<Decl>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct InvariantNetworkDecl {
    pub name: Symbol,
    pub invariants: Vec<Expr>,
    pub span: Span,
}

// ── Type expressions ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Simple(Symbol, Span),
    Generic(Symbol, Vec<TypeExpr>, Span),
    Modified(Symbol, Vec<Modifier>, Span),
}

impl TypeExpr {
    pub fn name(&self) -> Symbol {
        match self {
            TypeExpr::Simple(n, _) | TypeExpr::Generic(n, _, _) | TypeExpr::Modified(n, _, _) => {
                *n
            }
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeExpr::Simple(_, s) | TypeExpr::Generic(_, _, s) | TypeExpr::Modified(_, _, s) => {
                *s
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    Positional(Symbol),
    Named(Symbol, Symbol),
}

// ── Patterns ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Pattern {
    Wildcard(Span),
    Binding(Symbol, Span),
    Literal(Literal, Span),
    /// A variant constructor pattern; zero nested patterns for a unit
    /// variant or a plain binding/wildcard reference to it.
    Variant(Symbol, Vec<Pattern>, Span),
}

impl Pattern {
    pub fn span(&self) -> Span {
        match self {
            Pattern::Wildcard(s)
            | Pattern::Binding(_, s)
            | Pattern::Literal(_, s)
            | Pattern::Variant(_, _, s) => *s,
        }
    }
}

// ── Expressions ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Literal {
    Integer(i64),
    Decimal(f64),
    String(Symbol),
    TripleString(Symbol),
    RawString(Symbol),
    Char(char),
    Bool(bool),
    Regex(Symbol),
    Path(Symbol),
}

#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal, Span),
    /// Lowercase-leading ("value") identifier reference.
    Ident(Symbol, Span),
    /// Type- or constant-classified identifier used as a value (e.g. a
    /// nullary variant constructor or a type used as an expression).
    TypeIdent(Symbol, Span),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    Field(FieldExpr),
    Index(IndexExpr),
    Pipe(PipeExpr),
    /// `expr!` — fail-propagation.
    FailProp(Box<Expr>, Span),
    Lambda(LambdaExpr),
    ListLit(Vec<Expr>, Span),
    Interp(InterpExpr),
    If(IfExpr),
    Match(MatchExpr),
    Comptime(Box<Block>, Span),
    ValidRef(Symbol, Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(_, s)
            | Expr::Ident(_, s)
            | Expr::TypeIdent(_, s)
            | Expr::FailProp(_, s)
            | Expr::ListLit(_, s)
            | Expr::Comptime(_, s)
            | Expr::ValidRef(_, s) => *s,
            Expr::Binary(e) => e.span,
            Expr::Unary(e) => e.span,
            Expr::Call(e) => e.span,
            Expr::Field(e) => e.span,
            Expr::Index(e) => e.span,
            Expr::Pipe(e) => e.span,
            Expr::Lambda(e) => e.span,
            Expr::Interp(e) => e.span,
            Expr::If(e) => e.span,
            Expr::Match(e) => e.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnOp {
    Neg,
    Not,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: BinOp,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub op: UnOp,
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FieldExpr {
    pub object: Box<Expr>,
    pub field: Symbol,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub object: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

/// `a |> f`, desugared by the checker to a call with `a` prepended.
#[derive(Debug, Clone)]
pub struct PipeExpr {
    pub value: Box<Expr>,
    pub func: Box<Expr>,
    pub extra_args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct LambdaExpr {
    pub params: Vec<Symbol>,
    pub body: Box<Expr>,
    pub span: Span,
}

/// Interleaved literal segments and embedded expressions from a `"…{e}…"`.
#[derive(Debug, Clone)]
pub struct InterpExpr {
    pub segments: Vec<InterpSegment>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum InterpSegment {
    Text(Symbol),
    Expr(Expr),
}

#[derive(Debug, Clone)]
pub struct IfExpr {
    pub cond: Box<Expr>,
    pub then_block: Block,
    pub else_branch: Option<Box<ElseBranch>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ElseBranch {
    Block(Block),
    If(IfExpr),
}

#[derive(Debug, Clone)]
pub struct MatchExpr {
    /// `None` for an implicit match rewritten from a run of `pattern => …` lines.
    pub subject: Option<Box<Expr>>,
    pub arms: Vec<MatchArm>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Block,
    pub span: Span,
}

// ── Statements and blocks ─────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub trailing: Option<Box<Expr>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Let(LetStmt),
    Assign(AssignStmt),
    Expr(Expr),
    Return(Option<Expr>, Span),
    While(WhileStmt),
    For(ForStmt),
}

#[derive(Debug, Clone)]
pub struct LetStmt {
    pub name: Symbol,
    pub mutable: bool,
    pub ty: Option<TypeExpr>,
    pub init: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct AssignStmt {
    pub target: Expr,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ForStmt {
    pub pattern: Pattern,
    pub iter: Expr,
    pub body: Block,
    pub span: Span,
}
