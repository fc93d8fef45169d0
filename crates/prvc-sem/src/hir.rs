//! Checked HIR: the parser's AST after name resolution and type
//! inference. Every expression carries its resolved [`Type`] inline;
//! every binding carries the [`DefId`] the symbol table assigned it.

use prvc_par::ast::{BinOp, Literal, UnOp, Verb};
use prvc_util::{DefId, Span, Symbol};

use crate::types::Type;

#[derive(Debug, Clone)]
pub enum Item {
    Fn(FnItem),
    Main(MainItem),
    Type(TypeItem),
    Const(ConstItem),
    Module(ModuleItem),
}

#[derive(Debug, Clone)]
pub struct FnItem {
    pub def_id: DefId,
    pub verb: Verb,
    pub name: Symbol,
    pub params: Vec<Param>,
    pub ret: Type,
    pub can_fail: bool,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub def_id: DefId,
    pub name: Symbol,
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub struct MainItem {
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeItem {
    pub name: Symbol,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ConstItem {
    pub def_id: DefId,
    pub name: Symbol,
    pub ty: Type,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ModuleItem {
    pub name: Symbol,
    pub items: Vec<Item>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub trailing: Option<Box<Expr>>,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Let(LetStmt),
    Assign(Box<Expr>, Box<Expr>),
    Expr(Expr),
    Return(Option<Expr>, Span),
    While(Box<Expr>, Block),
    For(Pattern, Box<Expr>, Block),
}

#[derive(Debug, Clone)]
pub struct LetStmt {
    pub def_id: DefId,
    pub name: Symbol,
    pub mutable: bool,
    pub ty: Type,
    pub init: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Pattern {
    Wildcard(Span),
    Binding(DefId, Symbol, Span),
    Literal(Literal, Span),
    Variant(Symbol, Vec<Pattern>, Span),
}

#[derive(Debug, Clone)]
pub struct Arm {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ElseBranch {
    Block(Block),
    If(Box<Expr>, Block, Option<Box<ElseBranch>>),
}

#[derive(Debug, Clone)]
pub enum InterpSegment {
    Text(Symbol),
    Expr(Expr),
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: Box<ExprKind>,
    pub ty: Type,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: Type, span: Span) -> Expr {
        Expr { kind: Box::new(kind), ty, span }
    }

    pub fn error(span: Span) -> Expr {
        Expr::new(ExprKind::Error, Type::Error, span)
    }
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Literal(Literal),
    Ident(Symbol, DefId),
    /// A reference to a nullary variant constructor or other
    /// type-classified value (e.g. `Zero` in a `Sign` algebraic type).
    TypeIdent(Symbol),
    Binary(BinOp, Expr, Expr),
    Unary(UnOp, Expr),
    Call(Expr, Vec<Expr>),
    Field(Expr, Symbol),
    Index(Expr, Expr),
    /// `e!` lowered form; the inner expression's type is `Result<T,E>`.
    FailProp(Expr),
    Lambda(Vec<Symbol>, Expr),
    ListLit(Vec<Expr>),
    Interp(Vec<InterpSegment>),
    If(Expr, Block, Option<ElseBranch>),
    Match(Option<Expr>, Vec<Arm>),
    Comptime(Block),
    ValidRef(Symbol),
    Error,
    /// Introduced by the optimizer's tail-call lowering pass: a
    /// self-recursive body rewritten into a loop over its parameters.
    TailLoop(Vec<Symbol>, Block),
    /// A tail-position recursive call, rewritten into parallel
    /// reassignment of the enclosing [`ExprKind::TailLoop`]'s parameters.
    TailContinue(Vec<(Symbol, Expr)>),
}
