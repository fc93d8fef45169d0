//! Statement and block parsing.
//!
//! Blocks are delimited by `INDENT`/`DEDENT` rather than braces. A block
//! whose statements are entirely a run of `pattern [when guard] => body`
//! lines is rewritten into a single implicit `match` with no subject —
//! this is how a function or `if`/`else` body written as a bare case
//! list is distinguished from an ordinary statement sequence.

use prvc_lex::TokenKind;

use crate::ast::{AssignStmt, Block, ForStmt, LetStmt, MatchArm, MatchExpr, Stmt, WhileStmt};
use crate::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_stmt(&mut self) -> Option<Stmt> {
        match self.current_kind() {
            TokenKind::Let => self.parse_let_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            _ => self.parse_assign_or_expr_stmt(),
        }
    }

    fn parse_let_stmt(&mut self) -> Option<Stmt> {
        let start = self.current_span();
        self.advance(); // `let`
        let mutable = self.match_kind(&TokenKind::Mut);
        let name = self.expect_ident_name()?;
        let ty = if self.match_kind(&TokenKind::Colon) {
            Some(self.parse_type_expr()?)
        } else {
            None
        };
        let init = if self.match_kind(&TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let span = start.merge(self.prev_span());
        Some(Stmt::Let(LetStmt { name, mutable, ty, init, span }))
    }

    fn parse_while_stmt(&mut self) -> Option<Stmt> {
        let start = self.current_span();
        self.advance(); // `while`
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(Stmt::While(WhileStmt { cond, body, span }))
    }

    fn parse_for_stmt(&mut self) -> Option<Stmt> {
        let start = self.current_span();
        self.advance(); // `for`
        let pattern = self.parse_pattern()?;
        self.expect_kind(&TokenKind::In, "expected `in` in `for` loop")?;
        let iter = self.parse_expr()?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(Stmt::For(ForStmt { pattern, iter, body, span }))
    }

    fn parse_return_stmt(&mut self) -> Option<Stmt> {
        let start = self.current_span();
        self.advance(); // `return`
        let value = if self.check(&TokenKind::Newline) || self.check(&TokenKind::Dedent) || self.is_at_end() {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let span = start.merge(self.prev_span());
        Some(Stmt::Return(value, span))
    }

    /// An expression statement, possibly followed by `= value` to make
    /// it an assignment. There is no separate compound-assignment
    /// syntax: `+=`-style operators aren't in the token set.
    fn parse_assign_or_expr_stmt(&mut self) -> Option<Stmt> {
        let start = self.current_span();
        let target = self.parse_expr()?;
        if self.match_kind(&TokenKind::Assign) {
            let value = self.parse_expr()?;
            let span = start.merge(value.span());
            return Some(Stmt::Assign(AssignStmt { target, value, span }));
        }
        Some(Stmt::Expr(target))
    }

    /// Parses an `INDENT`-delimited block. If the statement run is
    /// entirely match arms (`pattern [when guard] => body`), the whole
    /// block becomes a single implicit-match expression instead.
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        self.skip_newlines();
        let start = self.current_span();
        self.expect_kind(&TokenKind::Indent, "expected an indented block")?;

        if self.peek_is_match_arm() {
            let arms = self.parse_match_arms_until_dedent()?;
            self.expect_kind(&TokenKind::Dedent, "expected end of block")?;
            let span = match arms.last() {
                Some(arm) => start.merge(arm.span),
                None => start,
            };
            let match_expr = crate::ast::Expr::Match(MatchExpr { subject: None, arms, span });
            return Some(Block { stmts: Vec::new(), trailing: Some(Box::new(match_expr)), span });
        }

        let mut stmts = Vec::new();
        self.skip_newlines();
        while !self.check(&TokenKind::Dedent) && !self.is_at_end() {
            match self.parse_stmt() {
                Some(stmt) => stmts.push(stmt),
                None => self.recover_to_sync_point(),
            }
            self.skip_newlines();
        }
        self.expect_kind(&TokenKind::Dedent, "expected end of block")?;

        let trailing = match stmts.last() {
            Some(Stmt::Expr(_)) => match stmts.pop() {
                Some(Stmt::Expr(e)) => Some(Box::new(e)),
                _ => unreachable!(),
            },
            _ => None,
        };

        let span = start.merge(self.prev_span());
        Some(Block { stmts, trailing, span })
    }

    /// Parses a run of match arms until the enclosing `DEDENT`, without
    /// consuming it. Shared by explicit `match subject` expressions and
    /// the implicit-match block rewrite.
    pub(crate) fn parse_match_arms(&mut self) -> Option<Vec<MatchArm>> {
        self.skip_newlines();
        self.expect_kind(&TokenKind::Indent, "expected indented match arms")?;
        let arms = self.parse_match_arms_until_dedent()?;
        self.expect_kind(&TokenKind::Dedent, "expected end of match arms")?;
        Some(arms)
    }

    fn parse_match_arms_until_dedent(&mut self) -> Option<Vec<MatchArm>> {
        let mut arms = Vec::new();
        self.skip_newlines();
        while !self.check(&TokenKind::Dedent) && !self.is_at_end() {
            arms.push(self.parse_match_arm()?);
            self.skip_newlines();
        }
        Some(arms)
    }

    fn parse_match_arm(&mut self) -> Option<MatchArm> {
        let start = self.current_span();
        let pattern = self.parse_pattern()?;
        let guard = if self.match_kind(&TokenKind::When) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_kind(&TokenKind::FatArrow, "expected `=>` in match arm")?;
        let body = self.parse_arm_body()?;
        let span = start.merge(body.span);
        Some(MatchArm { pattern, guard, body, span })
    }

    /// An arm body is either a single expression on the same line or an
    /// indented block, matching how `=>` is used elsewhere.
    fn parse_arm_body(&mut self) -> Option<Block> {
        if self.check(&TokenKind::Newline) {
            return self.parse_block();
        }
        let start = self.current_span();
        let expr = self.parse_expr()?;
        let span = start.merge(expr.span());
        Some(Block { stmts: Vec::new(), trailing: Some(Box::new(expr)), span })
    }

    /// Scans forward from the current position (which must be just past
    /// the `INDENT` of a block) to decide whether the block is entirely
    /// a run of match arms: a `=>` appears at paren-depth 0 before a
    /// `NEWLINE`/`INDENT`/`DEDENT`/`EOF`.
    pub(crate) fn peek_is_match_arm(&self) -> bool {
        let mut i = self.position;
        let mut depth = 0i32;
        loop {
            match self.tokens.get(i).map(|t| &t.kind) {
                Some(TokenKind::LParen) | Some(TokenKind::LBracket) => {
                    depth += 1;
                    i += 1;
                }
                Some(TokenKind::RParen) | Some(TokenKind::RBracket) => {
                    depth -= 1;
                    i += 1;
                }
                Some(TokenKind::FatArrow) if depth <= 0 => return true,
                Some(TokenKind::Newline) | Some(TokenKind::Indent) | Some(TokenKind::Dedent)
                | Some(TokenKind::Eof) | None => return false,
                _ => i += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Stmt;
    use crate::Parser;
    use prvc_lex::Lexer;
    use prvc_util::Handler;

    fn parse_block(source: &str) -> crate::ast::Block {
        let mut handler = Handler::new();
        let tokens = Lexer::new(source, &mut handler).tokenize();
        let mut parser = Parser::new(tokens, &handler, source);
        let block = parser.parse_block().expect("block should parse");
        assert!(!handler.has_errors(), "unexpected parse errors for {source:?}");
        block
    }

    #[test]
    fn let_binding_with_init() {
        let block = parse_block("\n    let x = 1\n");
        assert_eq!(block.stmts.len(), 1);
        matches!(block.stmts[0], Stmt::Let(_));
    }

    #[test]
    fn trailing_expression_becomes_the_block_value() {
        let block = parse_block("\n    let x = 1\n    x\n");
        assert_eq!(block.stmts.len(), 1);
        assert!(block.trailing.is_some());
    }

    #[test]
    fn assignment_statement() {
        let block = parse_block("\n    total = total + 1\n");
        matches!(block.stmts[0], Stmt::Assign(_));
    }

    #[test]
    fn for_loop_over_a_pattern() {
        let block = parse_block("\n    for item in items\n        use(item)\n");
        matches!(block.stmts[0], Stmt::For(_));
    }

    #[test]
    fn bare_arm_run_becomes_implicit_match() {
        let block = parse_block(
            "\n    Ok(value) => value\n    Err(reason) => default\n",
        );
        assert!(block.stmts.is_empty());
        match block.trailing.as_deref() {
            Some(crate::ast::Expr::Match(m)) => {
                assert!(m.subject.is_none());
                assert_eq!(m.arms.len(), 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn match_arm_with_guard() {
        let block = parse_block("\n    n when n > 0 => positive\n    _ => non_positive\n");
        match block.trailing.as_deref() {
            Some(crate::ast::Expr::Match(m)) => assert!(m.arms[0].guard.is_some()),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
