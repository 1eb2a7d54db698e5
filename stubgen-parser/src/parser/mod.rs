// Stubgen Go Parser
// Recursive-descent declaration parser over the token stream
//
// Only the declarations stub generation needs are parsed in full: the
// package clause, imports, and type declarations. Function bodies and
// var/const declarations are skipped as balanced token soup.

mod types;

use crate::ast::{File, ImportSpec, Span, TypeDecl};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{lex, Lexeme, Token};

pub struct GoParser<'src> {
    src: &'src str,
    source_file: Option<String>,
    tokens: Vec<Lexeme>,
    pos: usize,
}

impl<'src> GoParser<'src> {
    /// Parse a Go source file down to its declarations.
    pub fn parse_file(input: &str) -> ParseResult<File> {
        Self::parse_file_named(input, None)
    }

    /// Parse a Go source file, recording `source_file` for diagnostics.
    pub fn parse_file_named(input: &str, source_file: Option<String>) -> ParseResult<File> {
        let tokens = lex(input)?;
        let mut parser = GoParser {
            src: input,
            source_file,
            tokens,
            pos: 0,
        };
        parser.file()
    }

    // ── Token stream helpers ─────────────────────────────────

    pub(crate) fn current(&self) -> Option<Lexeme> {
        self.tokens.get(self.pos).copied()
    }

    pub(crate) fn peek(&self) -> Option<Token> {
        self.current().map(|l| l.token)
    }

    pub(crate) fn peek_at(&self, offset: usize) -> Option<Token> {
        self.tokens.get(self.pos + offset).map(|l| l.token)
    }

    pub(crate) fn bump(&mut self) -> Option<Lexeme> {
        let lexeme = self.current();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    pub(crate) fn at(&self, token: Token) -> bool {
        self.peek() == Some(token)
    }

    pub(crate) fn eat(&mut self, token: Token) -> bool {
        if self.at(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, token: Token, expected: &str) -> ParseResult<Lexeme> {
        match self.current() {
            Some(lexeme) if lexeme.token == token => {
                self.pos += 1;
                Ok(lexeme)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    pub(crate) fn text(&self, span: Span) -> &'src str {
        &self.src[span.start..span.end]
    }

    fn eof_span(&self) -> Span {
        Span::new(self.src.len(), self.src.len())
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match self.current() {
            Some(lexeme) => {
                let found = if lexeme.span.is_empty() {
                    "newline".to_string()
                } else {
                    format!("`{}`", self.text(lexeme.span))
                };
                ParseError::UnexpectedToken {
                    expected: expected.to_string(),
                    found,
                    src: self.src.to_string(),
                    span: lexeme.span.into(),
                }
            }
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                src: self.src.to_string(),
                span: self.eof_span().into(),
            },
        }
    }

    pub(crate) fn error_at(
        &self,
        span: Span,
        make: impl FnOnce(String, miette::SourceSpan) -> ParseError,
    ) -> ParseError {
        make(self.src.to_string(), span.into())
    }

    // ── File structure ───────────────────────────────────────

    fn file(&mut self) -> ParseResult<File> {
        let (package_name, package_span) = self.package_clause()?;

        let mut imports = Vec::new();
        let mut decls = Vec::new();

        while let Some(lexeme) = self.current() {
            match lexeme.token {
                Token::Semi => {
                    self.bump();
                }
                Token::Import => self.import_decl(&mut imports)?,
                Token::Type => self.type_decl(&mut decls)?,
                Token::Func => self.skip_func_decl()?,
                Token::Var | Token::Const => self.skip_simple_decl()?,
                _ => return Err(self.unexpected("a declaration")),
            }
        }

        Ok(File {
            package_name,
            package_span,
            imports,
            decls,
            source_file: self.source_file.take(),
        })
    }

    fn package_clause(&mut self) -> ParseResult<(String, Span)> {
        if !self.at(Token::Package) {
            let span = self.current().map(|l| l.span).unwrap_or(self.eof_span());
            return Err(self.error_at(span, |src, span| ParseError::MissingPackageClause {
                src,
                span,
            }));
        }
        self.bump();
        let name = self.expect(Token::Ident, "a package name")?;
        self.expect(Token::Semi, "end of the package clause")?;
        Ok((self.text(name.span).to_string(), name.span))
    }

    // ── Imports ──────────────────────────────────────────────

    fn import_decl(&mut self, imports: &mut Vec<ImportSpec>) -> ParseResult<()> {
        self.bump(); // `import`
        if self.eat(Token::LParen) {
            loop {
                while self.eat(Token::Semi) {}
                if self.eat(Token::RParen) {
                    break;
                }
                imports.push(self.import_spec()?);
            }
        } else {
            imports.push(self.import_spec()?);
        }
        self.expect(Token::Semi, "end of the import declaration")?;
        Ok(())
    }

    fn import_spec(&mut self) -> ParseResult<ImportSpec> {
        let mut alias = None;
        let mut start = None;
        if self.at(Token::Ident) {
            let lexeme = self.bump().unwrap();
            alias = Some(self.text(lexeme.span).to_string());
            start = Some(lexeme.span);
        } else if self.at(Token::Dot) {
            let lexeme = self.bump().unwrap();
            alias = Some(".".to_string());
            start = Some(lexeme.span);
        }

        let path_lexeme = match self.peek() {
            Some(Token::String) | Some(Token::RawString) => self.bump().unwrap(),
            _ => return Err(self.unexpected("an import path string")),
        };
        let quoted = self.text(path_lexeme.span);
        let path = quoted[1..quoted.len() - 1].to_string();
        let span = start.map_or(path_lexeme.span, |s| s.to(path_lexeme.span));

        Ok(ImportSpec { alias, path, span })
    }

    // ── Type declarations ────────────────────────────────────

    fn type_decl(&mut self, decls: &mut Vec<TypeDecl>) -> ParseResult<()> {
        self.bump(); // `type`
        if self.eat(Token::LParen) {
            loop {
                while self.eat(Token::Semi) {}
                if self.eat(Token::RParen) {
                    break;
                }
                decls.push(self.type_spec()?);
                if !self.at(Token::RParen) {
                    self.expect(Token::Semi, "end of the type spec")?;
                }
            }
        } else {
            decls.push(self.type_spec()?);
        }
        self.expect(Token::Semi, "end of the type declaration")?;
        Ok(())
    }

    // ── Skipped declarations ─────────────────────────────────

    /// Skip a func declaration: scan the signature (consuming bracketed
    /// groups and `interface{...}`/`struct{...}` literals whole so their braces
    /// are not mistaken for the body), then the body if one follows.
    fn skip_func_decl(&mut self) -> ParseResult<()> {
        self.bump(); // `func`
        loop {
            match self.peek() {
                None => return Ok(()),
                Some(Token::Semi) => {
                    self.bump();
                    return Ok(());
                }
                Some(Token::LParen) | Some(Token::LBracket) => self.skip_balanced()?,
                Some(Token::Interface) | Some(Token::Struct) => {
                    self.bump();
                    if self.at(Token::LBrace) {
                        self.skip_balanced()?;
                    }
                }
                Some(Token::LBrace) => {
                    self.skip_balanced()?;
                    self.eat(Token::Semi);
                    return Ok(());
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// Skip a var or const declaration, grouped or not.
    fn skip_simple_decl(&mut self) -> ParseResult<()> {
        self.bump(); // `var` or `const`
        if self.at(Token::LParen) {
            self.skip_balanced()?;
            self.eat(Token::Semi);
            return Ok(());
        }
        loop {
            match self.peek() {
                None => return Ok(()),
                Some(Token::Semi) => {
                    self.bump();
                    return Ok(());
                }
                Some(Token::LParen) | Some(Token::LBracket) | Some(Token::LBrace) => {
                    self.skip_balanced()?
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// Consume a bracketed group starting at the current opening token,
    /// tracking nesting across all three bracket kinds.
    pub(crate) fn skip_balanced(&mut self) -> ParseResult<()> {
        self.bump();
        let mut depth = 1usize;
        loop {
            match self.peek() {
                None => return Err(self.unexpected("a closing delimiter")),
                Some(Token::LParen) | Some(Token::LBracket) | Some(Token::LBrace) => {
                    depth += 1;
                    self.bump();
                }
                Some(Token::RParen) | Some(Token::RBracket) | Some(Token::RBrace) => {
                    depth -= 1;
                    self.bump();
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// Consume an opaque type expression: everything up to (but not
    /// including) the terminating semicolon, or the `)` closing a grouped
    /// type declaration.
    pub(crate) fn skip_type_soup(&mut self) -> ParseResult<()> {
        loop {
            match self.peek() {
                None | Some(Token::Semi) | Some(Token::RParen) => return Ok(()),
                Some(Token::LParen) | Some(Token::LBracket) | Some(Token::LBrace) => {
                    self.skip_balanced()?
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }
}
