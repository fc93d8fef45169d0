//! Expression parsing: a Pratt parser over the binding-power table in
//! [`bp`], with prefix/postfix handling for unary operators, fail
//! propagation (`!`), and the full chain of postfix forms (field access,
//! calls, indexing).

use prvc_lex::TokenKind;
use prvc_util::{Span, Symbol};

use crate::ast::{
    BinOp, BinaryExpr, CallExpr, Expr, FieldExpr, IfExpr, IndexExpr, InterpExpr, InterpSegment,
    LambdaExpr, Literal, MatchExpr, PipeExpr, UnOp, UnaryExpr,
};
use crate::Parser;

/// Binding powers for infix operators, lowest to highest. All are
/// left-associative: the right binding power is one higher than the
/// left, so a repeated operator at the same level parses left-to-right.
pub mod bp {
    pub const PIPE: (u8, u8) = (1, 2);
    pub const OR: (u8, u8) = (3, 4);
    pub const AND: (u8, u8) = (5, 6);
    pub const COMPARISON: (u8, u8) = (7, 8);
    pub const RANGE: (u8, u8) = (9, 10);
    pub const ADDITIVE: (u8, u8) = (11, 12);
    pub const MULTIPLICATIVE: (u8, u8) = (13, 14);
}

fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    use TokenKind::*;
    Some(match kind {
        PipeArrow => bp::PIPE,
        OrOr => bp::OR,
        AndAnd => bp::AND,
        EqEq | NotEq | Lt | Gt | LtEq | GtEq => bp::COMPARISON,
        DotDot => bp::RANGE,
        Plus | Minus => bp::ADDITIVE,
        Star | Slash | Percent => bp::MULTIPLICATIVE,
        _ => return None,
    })
}

fn token_to_binop(kind: &TokenKind) -> Option<BinOp> {
    use TokenKind::*;
    Some(match kind {
        Plus => BinOp::Add,
        Minus => BinOp::Sub,
        Star => BinOp::Mul,
        Slash => BinOp::Div,
        Percent => BinOp::Mod,
        EqEq => BinOp::Eq,
        NotEq => BinOp::Ne,
        Lt => BinOp::Lt,
        Gt => BinOp::Gt,
        LtEq => BinOp::Le,
        GtEq => BinOp::Ge,
        AndAnd => BinOp::And,
        OrOr => BinOp::Or,
        DotDot => BinOp::Range,
        _ => return None,
    })
}

impl<'a> Parser<'a> {
    /// Parses a full expression at the lowest binding power.
    pub(crate) fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_expr_bp(0)
    }

    /// Pratt-parses an expression, only consuming infix operators whose
    /// left binding power is at least `min_bp`.
    pub(crate) fn parse_expr_bp(&mut self, min_bp: u8) -> Option<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let kind = self.current_kind().clone();
            let (lbp, rbp) = match infix_binding_power(&kind) {
                Some(powers) => powers,
                None => break,
            };
            if lbp < min_bp {
                break;
            }
            self.advance();

            if kind == TokenKind::PipeArrow {
                let rhs = self.parse_expr_bp(rbp)?;
                left = build_pipe(left, rhs);
            } else {
                let op = token_to_binop(&kind).expect("binding power table covers every BinOp");
                let rhs = self.parse_expr_bp(rbp)?;
                let span = left.span().merge(rhs.span());
                left = Expr::Binary(BinaryExpr {
                    left: Box::new(left),
                    op,
                    right: Box::new(rhs),
                    span,
                });
            }
        }

        Some(left)
    }

    /// Prefix position: `-x`, `!x`. A `!` here is always logical
    /// negation — fail-propagation `expr!` only exists in postfix
    /// position, once an atom has already been assembled.
    fn parse_unary(&mut self) -> Option<Expr> {
        let start = self.current_span();
        match self.current_kind() {
            TokenKind::Minus => {
                self.advance();
                let operand = Box::new(self.parse_unary()?);
                let span = start.merge(operand.span());
                Some(Expr::Unary(UnaryExpr { op: UnOp::Neg, operand, span }))
            }
            TokenKind::Bang => {
                self.advance();
                let operand = Box::new(self.parse_unary()?);
                let span = start.merge(operand.span());
                Some(Expr::Unary(UnaryExpr { op: UnOp::Not, operand, span }))
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Option<Expr> {
        let mut expr = self.parse_atom()?;
        loop {
            match self.current_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let field = self.expect_ident_name()?;
                    let span = expr.span().merge(self.prev_span());
                    expr = Expr::Field(FieldExpr { object: Box::new(expr), field, span });
                }
                TokenKind::LParen => {
                    self.advance();
                    let args = self.parse_args_until(&TokenKind::RParen)?;
                    self.expect_kind(&TokenKind::RParen, "expected `)` to close call arguments")?;
                    let span = expr.span().merge(self.prev_span());
                    expr = Expr::Call(CallExpr { callee: Box::new(expr), args, span });
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = Box::new(self.parse_expr_bp(0)?);
                    self.expect_kind(&TokenKind::RBracket, "expected `]` to close index expression")?;
                    let span = expr.span().merge(self.prev_span());
                    expr = Expr::Index(IndexExpr { object: Box::new(expr), index, span });
                }
                TokenKind::Bang => {
                    self.advance();
                    let span = expr.span().merge(self.prev_span());
                    expr = Expr::FailProp(Box::new(expr), span);
                }
                _ => break,
            }
        }
        Some(expr)
    }

    fn parse_atom(&mut self) -> Option<Expr> {
        let start = self.current_span();
        match self.current_kind().clone() {
            TokenKind::IntegerLit(n) => {
                self.advance();
                Some(Expr::Literal(Literal::Integer(n), start))
            }
            TokenKind::DecimalLit(n) => {
                self.advance();
                Some(Expr::Literal(Literal::Decimal(n), start))
            }
            TokenKind::StringLit(s) => {
                self.advance();
                if self.check(&TokenKind::InterpStart) {
                    self.parse_interp_continuation(s, start)
                } else {
                    Some(Expr::Literal(Literal::String(s), start))
                }
            }
            TokenKind::TripleStringLit(s) => {
                self.advance();
                Some(Expr::Literal(Literal::TripleString(s), start))
            }
            TokenKind::RawStringLit(s) => {
                self.advance();
                Some(Expr::Literal(Literal::RawString(s), start))
            }
            TokenKind::CharLit(c) => {
                self.advance();
                Some(Expr::Literal(Literal::Char(c), start))
            }
            TokenKind::BooleanLit(b) => {
                self.advance();
                Some(Expr::Literal(Literal::Bool(b), start))
            }
            TokenKind::RegexLit(s) => {
                self.advance();
                Some(Expr::Literal(Literal::Regex(s), start))
            }
            TokenKind::PathLit(s) => {
                self.advance();
                Some(Expr::Literal(Literal::Path(s), start))
            }
            TokenKind::Ident(s) => {
                self.advance();
                Some(Expr::Ident(s, start))
            }
            TokenKind::TypeIdent(s) => {
                self.advance();
                Some(Expr::TypeIdent(s, start))
            }
            TokenKind::ResultKw => {
                self.advance();
                Some(Expr::ValidRef(Symbol::intern("result"), start))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr_bp(0)?;
                self.expect_kind(&TokenKind::RParen, "expected `)` to close grouped expression")?;
                Some(inner)
            }
            TokenKind::LBracket => {
                self.advance();
                let items = self.parse_args_until(&TokenKind::RBracket)?;
                self.expect_kind(&TokenKind::RBracket, "expected `]` to close list literal")?;
                let span = start.merge(self.prev_span());
                Some(Expr::ListLit(items, span))
            }
            TokenKind::Pipe => self.parse_lambda(),
            TokenKind::If => self.parse_if_expr(),
            TokenKind::Match => self.parse_match_expr(),
            TokenKind::Const => {
                self.advance();
                let block = self.parse_block()?;
                let span = start.merge(block.span);
                Some(Expr::Comptime(Box::new(block), span))
            }
            _ => {
                self.error("expected an expression".to_string());
                None
            }
        }
    }

    fn parse_args_until(&mut self, end: &TokenKind) -> Option<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.check(end) {
            loop {
                args.push(self.parse_expr_bp(0)?);
                if self.match_kind(&TokenKind::Comma) {
                    continue;
                }
                break;
            }
        }
        Some(args)
    }

    /// `|x, y| body`.
    fn parse_lambda(&mut self) -> Option<Expr> {
        let start = self.current_span();
        self.advance(); // leading `|`
        let mut params = Vec::new();
        if !self.check(&TokenKind::Pipe) {
            loop {
                params.push(self.expect_ident_name()?);
                if self.match_kind(&TokenKind::Comma) {
                    continue;
                }
                break;
            }
        }
        self.expect_kind(&TokenKind::Pipe, "expected `|` to close lambda parameters")?;
        let body = Box::new(self.parse_expr_bp(0)?);
        let span = start.merge(body.span());
        Some(Expr::Lambda(LambdaExpr { params, body, span }))
    }

    /// Continues a string literal already holding its leading text
    /// segment into a full interpolation, consuming alternating
    /// `INTERP_START expr INTERP_END StringLit` groups.
    fn parse_interp_continuation(&mut self, first_text: Symbol, start: Span) -> Option<Expr> {
        let mut segments = vec![InterpSegment::Text(first_text)];
        while self.check(&TokenKind::InterpStart) {
            self.advance();
            let inner = self.parse_expr_bp(0)?;
            segments.push(InterpSegment::Expr(inner));
            self.expect_kind(&TokenKind::InterpEnd, "expected end of interpolated expression")?;
            match self.current_kind().clone() {
                TokenKind::StringLit(s) => {
                    self.advance();
                    segments.push(InterpSegment::Text(s));
                }
                _ => {
                    self.error("expected string text after interpolated expression".to_string());
                    break;
                }
            }
        }
        let span = start.merge(self.prev_span());
        Some(Expr::Interp(InterpExpr { segments, span }))
    }

    pub(crate) fn parse_if_expr(&mut self) -> Option<Expr> {
        let start = self.current_span();
        self.advance(); // `if`
        let cond = Box::new(self.parse_expr_bp(0)?);
        let then_block = self.parse_block()?;
        let mut span = start.merge(then_block.span);

        let else_branch = if self.check(&TokenKind::Else) {
            self.advance();
            if self.check(&TokenKind::If) {
                let elif = self.parse_if_expr()?;
                span = span.merge(elif.span());
                let inner = match elif {
                    Expr::If(e) => e,
                    _ => unreachable!("parse_if_expr always returns Expr::If"),
                };
                Some(Box::new(crate::ast::ElseBranch::If(inner)))
            } else {
                let block = self.parse_block()?;
                span = span.merge(block.span);
                Some(Box::new(crate::ast::ElseBranch::Block(block)))
            }
        } else {
            None
        };

        Some(Expr::If(IfExpr { cond, then_block, else_branch, span }))
    }

    /// `match subject` followed by an indented run of arms.
    pub(crate) fn parse_match_expr(&mut self) -> Option<Expr> {
        let start = self.current_span();
        self.advance(); // `match`
        let subject = Box::new(self.parse_expr_bp(0)?);
        let arms = self.parse_match_arms()?;
        let span = match arms.last() {
            Some(arm) => start.merge(arm.span),
            None => start.merge(subject.span()),
        };
        Some(Expr::Match(MatchExpr { subject: Some(subject), arms, span }))
    }
}

fn build_pipe(value: Expr, rhs: Expr) -> Expr {
    match rhs {
        Expr::Call(call) => {
            let span = value.span().merge(call.span);
            Expr::Pipe(PipeExpr {
                value: Box::new(value),
                func: call.callee,
                extra_args: call.args,
                span,
            })
        }
        other => {
            let span = value.span().merge(other.span());
            Expr::Pipe(PipeExpr {
                value: Box::new(value),
                func: Box::new(other),
                extra_args: Vec::new(),
                span,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinOp, Expr, Literal, UnOp};
    use crate::Parser;
    use prvc_lex::Lexer;
    use prvc_util::Handler;

    fn parse_expr(source: &str) -> Expr {
        let mut handler = Handler::new();
        let tokens = Lexer::new(source, &mut handler).tokenize();
        let mut parser = Parser::new(tokens, &handler, source);
        let expr = parser.parse_expr().expect("expression should parse");
        assert!(!handler.has_errors(), "unexpected parse errors for {source:?}");
        expr
    }

    #[test]
    fn integer_literal() {
        match parse_expr("42") {
            Expr::Literal(Literal::Integer(42), _) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn precedence_multiplication_over_addition() {
        match parse_expr("1 + 2 * 3") {
            Expr::Binary(b) => {
                assert_eq!(b.op, BinOp::Add);
                match *b.right {
                    Expr::Binary(inner) => assert_eq!(inner.op, BinOp::Mul),
                    other => panic!("unexpected: {other:?}"),
                }
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn left_associative_subtraction() {
        match parse_expr("10 - 3 - 2") {
            Expr::Binary(b) => {
                assert_eq!(b.op, BinOp::Sub);
                match *b.left {
                    Expr::Binary(inner) => assert_eq!(inner.op, BinOp::Sub),
                    other => panic!("unexpected: {other:?}"),
                }
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn pipe_into_call_prepends_value() {
        match parse_expr("x |> double(step)") {
            Expr::Pipe(p) => {
                assert_eq!(p.extra_args.len(), 1);
                matches!(*p.func, Expr::Ident(_, _));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn pipe_into_bare_function() {
        match parse_expr("x |> normalize") {
            Expr::Pipe(p) => assert!(p.extra_args.is_empty()),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn prefix_bang_is_logical_not() {
        match parse_expr("!ready") {
            Expr::Unary(u) => assert_eq!(u.op, UnOp::Not),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn postfix_bang_is_fail_propagation() {
        match parse_expr("parse_input(raw)!") {
            Expr::FailProp(inner, _) => matches!(*inner, Expr::Call(_)),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn field_then_call_chain() {
        match parse_expr("request.headers.get(name)") {
            Expr::Call(c) => matches!(*c.callee, Expr::Field(_)),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn result_keyword_is_valid_ref() {
        match parse_expr("result") {
            Expr::ValidRef(s, _) => assert_eq!(s.as_str(), "result"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn interpolated_string_segments() {
        match parse_expr("\"hello {name}!\"") {
            Expr::Interp(i) => assert_eq!(i.segments.len(), 3),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn lambda_with_two_params() {
        match parse_expr("|a, b| a + b") {
            Expr::Lambda(l) => assert_eq!(l.params.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn list_literal() {
        match parse_expr("[1, 2, 3]") {
            Expr::ListLit(items, _) => assert_eq!(items.len(), 3),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn comparison_binds_looser_than_additive() {
        match parse_expr("a + 1 == b - 1") {
            Expr::Binary(b) => assert_eq!(b.op, BinOp::Eq),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
