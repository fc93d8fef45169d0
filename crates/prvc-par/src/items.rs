//! Top-level declaration parsing: function declarations with their full
//! contract vocabulary, `main`, `type`, `const`, `import`/`from`,
//! `module`, and `invariant` network declarations.

use prvc_lex::TokenKind;
use prvc_util::Symbol;

use crate::ast::{
    ConstDecl, Decl, FnDecl, ImportDecl, InvariantNetworkDecl, MainDecl, ModuleDecl, Param,
    ProofBlock, ProofObligation, TypeBody, TypeDecl, Verb, VariantDef,
};
use crate::Parser;

fn verb_from_kind(kind: &TokenKind) -> Option<Verb> {
    Some(match kind {
        TokenKind::Transforms => Verb::Transforms,
        TokenKind::Inputs => Verb::Inputs,
        TokenKind::Outputs => Verb::Outputs,
        TokenKind::Validates => Verb::Validates,
        TokenKind::Reads => Verb::Reads,
        TokenKind::Creates => Verb::Creates,
        TokenKind::Matches => Verb::Matches,
        _ => return None,
    })
}

impl<'a> Parser<'a> {
    /// Parses one top-level (or module-nested) declaration.
    pub(crate) fn parse_decl(&mut self) -> Option<Decl> {
        self.skip_newlines();
        let doc = self.consume_doc_comment();
        if doc.is_some() {
            self.skip_newlines();
        }

        if let Some(verb) = verb_from_kind(self.current_kind()) {
            return self.parse_fn_decl(verb, doc);
        }

        match self.current_kind() {
            TokenKind::Main => self.parse_main_decl(),
            TokenKind::TypeKw => self.parse_type_decl(),
            TokenKind::Const => self.parse_const_decl(),
            TokenKind::Import | TokenKind::From => self.parse_import_decl(),
            TokenKind::Module => self.parse_module_decl(),
            TokenKind::Invariant => self.parse_invariant_network(),
            _ => {
                self.error(
                    "expected a declaration: a verb, `main`, `type`, `const`, `import`, \
                     `from`, `module`, or `invariant`"
                        .to_string(),
                );
                None
            }
        }
    }

    fn consume_doc_comment(&mut self) -> Option<Symbol> {
        match self.current_kind().clone() {
            TokenKind::DocComment(s) => {
                self.advance();
                Some(s)
            }
            _ => None,
        }
    }

    fn parse_fn_decl(&mut self, verb: Verb, doc: Option<Symbol>) -> Option<Decl> {
        let start = self.current_span();
        self.advance(); // the verb token
        let name = self.expect_ident_name()?;
        let params = self.parse_param_list()?;
        let ret_type = if matches!(self.current_kind(), TokenKind::TypeIdent(_)) {
            Some(self.parse_type_expr()?)
        } else {
            None
        };
        let can_fail = self.match_kind(&TokenKind::Bang);

        let mut ensures = Vec::new();
        let mut requires = Vec::new();
        let mut proof = None;
        let mut know = Vec::new();
        let mut assume = Vec::new();
        let mut believe = Vec::new();
        let mut why_not = Vec::new();
        let mut chosen = None;
        let mut near_misses = Vec::new();
        let mut intent = None;
        let mut satisfies = Vec::new();

        self.skip_newlines();
        loop {
            match self.current_kind() {
                TokenKind::Ensures => {
                    self.advance();
                    ensures.push(self.parse_expr()?);
                }
                TokenKind::Requires => {
                    self.advance();
                    requires.push(self.parse_expr()?);
                }
                TokenKind::Know => {
                    self.advance();
                    know.push(self.parse_expr()?);
                }
                TokenKind::Assume => {
                    self.advance();
                    assume.push(self.parse_expr()?);
                }
                TokenKind::Believe => {
                    self.advance();
                    believe.push(self.parse_expr()?);
                }
                TokenKind::WhyNot => {
                    self.advance();
                    why_not.push(self.expect_string_text()?);
                }
                TokenKind::Chosen => {
                    self.advance();
                    chosen = Some(self.expect_string_text()?);
                }
                TokenKind::Intent => {
                    self.advance();
                    intent = Some(self.expect_string_text()?);
                }
                TokenKind::NearMiss => {
                    self.advance();
                    self.expect_kind(&TokenKind::LParen, "expected `(` after `near_miss`")?;
                    let considered = self.parse_expr()?;
                    self.expect_kind(&TokenKind::FatArrow, "expected `=>` in `near_miss` clause")?;
                    let rejected_because = self.parse_expr()?;
                    self.expect_kind(&TokenKind::RParen, "expected `)` to close `near_miss` clause")?;
                    near_misses.push((considered, rejected_because));
                }
                TokenKind::Satisfies => {
                    self.advance();
                    loop {
                        satisfies.push(self.expect_ident_or_type_name()?);
                        if self.match_kind(&TokenKind::Comma) {
                            continue;
                        }
                        break;
                    }
                }
                TokenKind::Proof => {
                    proof = Some(self.parse_proof_block()?);
                }
                _ => break,
            }
            self.skip_newlines();
        }

        self.expect_kind(&TokenKind::From, "expected `from` to introduce the function body")?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);

        Some(Decl::Fn(FnDecl {
            doc,
            verb,
            name,
            params,
            ret_type,
            can_fail,
            ensures,
            requires,
            proof,
            know,
            assume,
            believe,
            why_not,
            chosen,
            near_misses,
            intent,
            satisfies,
            body,
            span,
        }))
    }

    fn parse_param_list(&mut self) -> Option<Vec<Param>> {
        self.expect_kind(&TokenKind::LParen, "expected `(` to begin parameter list")?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let start = self.current_span();
                let name = self.expect_ident_name()?;
                let ty = self.parse_type_expr()?;
                let where_clause = if self.match_kind(&TokenKind::Where) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                let span = start.merge(self.prev_span());
                params.push(Param { name, ty, where_clause, span });
                if self.match_kind(&TokenKind::Comma) {
                    continue;
                }
                break;
            }
        }
        self.expect_kind(&TokenKind::RParen, "expected `)` to close parameter list")?;
        Some(params)
    }

    fn parse_main_decl(&mut self) -> Option<Decl> {
        let start = self.current_span();
        self.advance(); // `main`
        self.expect_kind(&TokenKind::LParen, "expected `(` after `main`")?;
        self.expect_kind(&TokenKind::RParen, "expected `)` after `main(`")?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(Decl::Main(MainDecl { body, span }))
    }

    fn parse_type_decl(&mut self) -> Option<Decl> {
        let start = self.current_span();
        self.advance(); // `type`
        let name = self.expect_type_name()?;

        let mut params = Vec::new();
        if self.match_kind(&TokenKind::Lt) {
            if !self.check(&TokenKind::Gt) {
                loop {
                    params.push(self.expect_ident_or_type_name()?);
                    if self.match_kind(&TokenKind::Comma) {
                        continue;
                    }
                    break;
                }
            }
            self.expect_kind(&TokenKind::Gt, "expected `>` to close type parameters")?;
        }

        self.expect_kind(&TokenKind::Assign, "expected `=` in type declaration")?;

        let body = if self.peek_is_refinement() {
            self.parse_refinement_body()?
        } else if self.check(&TokenKind::LParen) {
            self.parse_record_body()?
        } else {
            self.parse_algebraic_body()?
        };

        let span = start.merge(self.prev_span());
        Some(Decl::Type(TypeDecl { name, params, body, span }))
    }

    fn parse_refinement_body(&mut self) -> Option<TypeBody> {
        let base = self.parse_type_expr()?;
        self.expect_kind(&TokenKind::Where, "expected `where` in refinement type")?;
        let constraint = self.parse_expr()?;
        Some(TypeBody::Refinement(Box::new(base), constraint))
    }

    fn parse_record_body(&mut self) -> Option<TypeBody> {
        self.expect_kind(&TokenKind::LParen, "expected `(` to begin record fields")?;
        let mut fields = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let start = self.current_span();
                let name = self.expect_ident_name()?;
                self.expect_kind(&TokenKind::Colon, "expected `:` before field type")?;
                let ty = self.parse_type_expr()?;
                let where_clause = if self.match_kind(&TokenKind::Where) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                let span = start.merge(self.prev_span());
                fields.push(crate::ast::FieldDef { name, ty, where_clause, span });
                if self.match_kind(&TokenKind::Comma) {
                    continue;
                }
                break;
            }
        }
        self.expect_kind(&TokenKind::RParen, "expected `)` to close record fields")?;
        Some(TypeBody::Record(fields))
    }

    fn parse_algebraic_body(&mut self) -> Option<TypeBody> {
        let mut variants = Vec::new();
        loop {
            let start = self.current_span();
            let name = self.expect_type_name()?;
            let fields = if self.match_kind(&TokenKind::LParen) {
                let mut fields = Vec::new();
                if !self.check(&TokenKind::RParen) {
                    loop {
                        fields.push(self.parse_type_expr()?);
                        if self.match_kind(&TokenKind::Comma) {
                            continue;
                        }
                        break;
                    }
                }
                self.expect_kind(&TokenKind::RParen, "expected `)` to close variant fields")?;
                fields
            } else {
                Vec::new()
            };
            let span = start.merge(self.prev_span());
            variants.push(VariantDef { name, fields, span });
            if self.match_kind(&TokenKind::Pipe) {
                continue;
            }
            break;
        }
        Some(TypeBody::Algebraic(variants))
    }

    fn parse_const_decl(&mut self) -> Option<Decl> {
        let start = self.current_span();
        self.advance(); // `const`
        let name = self.expect_const_name()?;
        let ty = if self.match_kind(&TokenKind::Colon) {
            Some(self.parse_type_expr()?)
        } else {
            None
        };
        self.expect_kind(&TokenKind::Assign, "expected `=` in constant declaration")?;
        let value = self.parse_expr()?;
        let span = start.merge(self.prev_span());
        Some(Decl::Const(ConstDecl { name, ty, value, span }))
    }

    /// `import path` or `from path import a, b`.
    fn parse_import_decl(&mut self) -> Option<Decl> {
        let start = self.current_span();
        if self.match_kind(&TokenKind::Import) {
            let path = self.parse_dotted_path()?;
            let span = start.merge(self.prev_span());
            return Some(Decl::Import(ImportDecl { path, items: Vec::new(), span }));
        }

        self.expect_kind(&TokenKind::From, "expected `from` or `import`")?;
        let path = self.parse_dotted_path()?;
        self.expect_kind(&TokenKind::Import, "expected `import` after `from` path")?;
        let mut items = Vec::new();
        loop {
            items.push(self.expect_ident_or_type_name()?);
            if self.match_kind(&TokenKind::Comma) {
                continue;
            }
            break;
        }
        let span = start.merge(self.prev_span());
        Some(Decl::Import(ImportDecl { path, items, span }))
    }

    fn parse_dotted_path(&mut self) -> Option<Symbol> {
        let start = self.current_span();
        self.expect_ident_or_type_name()?;
        while self.check(&TokenKind::Dot) {
            self.advance();
            self.expect_ident_or_type_name()?;
        }
        let span = start.merge(self.prev_span());
        Some(self.source_text(span))
    }

    fn parse_module_decl(&mut self) -> Option<Decl> {
        let start = self.current_span();
        self.advance(); // `module`
        let name = self.expect_ident_or_type_name()?;
        self.skip_newlines();
        self.expect_kind(&TokenKind::Indent, "expected an indented module body")?;
        let mut decls = Vec::new();
        self.skip_newlines();
        while !self.check(&TokenKind::Dedent) && !self.is_at_end() {
            match self.parse_decl() {
                Some(decl) => decls.push(decl),
                None => self.recover_to_sync_point(),
            }
            self.skip_newlines();
        }
        self.expect_kind(&TokenKind::Dedent, "expected end of module body")?;
        let span = start.merge(self.prev_span());
        Some(Decl::Module(ModuleDecl { name, decls, span }))
    }

    fn parse_invariant_network(&mut self) -> Option<Decl> {
        let start = self.current_span();
        self.advance(); // `invariant`
        let name = self.expect_ident_or_type_name()?;
        self.skip_newlines();
        self.expect_kind(&TokenKind::Indent, "expected an indented invariant list")?;
        let mut invariants = Vec::new();
        self.skip_newlines();
        while !self.check(&TokenKind::Dedent) && !self.is_at_end() {
            invariants.push(self.parse_expr()?);
            self.skip_newlines();
        }
        self.expect_kind(&TokenKind::Dedent, "expected end of invariant list")?;
        let span = start.merge(self.prev_span());
        Some(Decl::InvariantNetwork(InvariantNetworkDecl { name, invariants, span }))
    }

    fn parse_proof_block(&mut self) -> Option<ProofBlock> {
        let start = self.current_span();
        self.advance(); // `proof`
        self.skip_newlines();
        self.expect_kind(&TokenKind::Indent, "expected an indented proof block")?;
        let mut obligations = Vec::new();
        self.skip_newlines();
        while !self.check(&TokenKind::Dedent) && !self.is_at_end() {
            obligations.push(self.parse_proof_obligation()?);
            self.skip_newlines();
        }
        self.expect_kind(&TokenKind::Dedent, "expected end of proof block")?;
        let span = start.merge(self.prev_span());
        Some(ProofBlock { obligations, span })
    }

    /// `name: free-text [when condition]`. The obligation's prose isn't
    /// tokenized — it's sliced out of the original source text, scanning
    /// forward until `when`, a block boundary, or the start of the next
    /// `name:` obligation.
    fn parse_proof_obligation(&mut self) -> Option<ProofObligation> {
        let start = self.current_span();
        let name = self.expect_ident_name()?;
        self.expect_kind(&TokenKind::Colon, "expected `:` after proof obligation name")?;

        let text_start = self.current_span();
        loop {
            match self.current_kind() {
                TokenKind::When | TokenKind::Dedent | TokenKind::Eof => break,
                TokenKind::Newline => {
                    if self.next_starts_obligation() {
                        break;
                    }
                    self.advance();
                }
                _ => self.advance(),
            }
        }
        let text = self.source_text(text_start.merge(self.prev_span()));

        let when = if self.match_kind(&TokenKind::When) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let span = start.merge(self.prev_span());
        Some(ProofObligation { name, text, when, span })
    }

    /// From a `NEWLINE`, looks past any further blank newlines to see if
    /// the next real tokens are `Ident Colon` — the shape of a fresh
    /// proof obligation.
    fn next_starts_obligation(&self) -> bool {
        let mut i = self.position + 1;
        while matches!(self.tokens.get(i).map(|t| &t.kind), Some(TokenKind::Newline)) {
            i += 1;
        }
        matches!(self.tokens.get(i).map(|t| &t.kind), Some(TokenKind::Ident(_)))
            && matches!(self.tokens.get(i + 1).map(|t| &t.kind), Some(TokenKind::Colon))
    }
}
