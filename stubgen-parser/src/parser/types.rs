// Type declaration and signature parsing
// Handles interface types, method signatures, parameter lists, and the
// full Go type-expression grammar stub signatures can contain.

use crate::ast::{ChanDir, InterfaceType, Method, Param, Span, TypeDecl, TypeDeclKind, TypeExpr, TypeName};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;
use crate::parser::GoParser;

impl<'src> GoParser<'src> {
    /// Parse one type spec: `Name Type` or `Name = Type`. Interface types
    /// are parsed in full; anything else is recorded as an opaque name.
    pub(crate) fn type_spec(&mut self) -> ParseResult<TypeDecl> {
        let name = self.expect(Token::Ident, "a type name")?;

        if self.at(Token::LBracket) && self.looks_like_type_params() {
            let span = self.current().unwrap().span;
            return Err(self.error_at(span, |src, span| ParseError::GenericType { src, span }));
        }

        // Alias form: `type Name = Type`.
        if let Some(lexeme) = self.current() {
            if lexeme.token == Token::Op && self.text(lexeme.span) == "=" {
                self.bump();
            }
        }

        let kind = if self.at(Token::Interface) {
            TypeDeclKind::Interface(self.interface_type()?)
        } else {
            self.skip_type_soup()?;
            TypeDeclKind::Opaque
        };

        Ok(TypeDecl {
            name: self.text(name.span).to_string(),
            kind,
            span: name.span,
        })
    }

    /// Distinguish `type Name[T any] ...` (type parameters) from
    /// `type Name [N]Elem` (array). After the `[`, a type parameter list
    /// always reads as an identifier followed by more of a type, or a comma.
    fn looks_like_type_params(&self) -> bool {
        if self.peek_at(1) != Some(Token::Ident) {
            return false;
        }
        matches!(
            self.peek_at(2),
            Some(
                Token::Ident
                    | Token::Star
                    | Token::LBracket
                    | Token::Map
                    | Token::Chan
                    | Token::Interface
                    | Token::Struct
                    | Token::Func
                    | Token::Arrow
                    | Token::Comma
            )
        )
    }

    /// Parse `interface { ... }`: embedded interface names and method
    /// signatures, in declaration order.
    pub(crate) fn interface_type(&mut self) -> ParseResult<InterfaceType> {
        let start = self.expect(Token::Interface, "`interface`")?.span;
        self.expect(Token::LBrace, "`{`")?;

        let mut embedded = Vec::new();
        let mut methods = Vec::new();

        loop {
            while self.eat(Token::Semi) {}
            if self.at(Token::RBrace) {
                break;
            }
            if !self.at(Token::Ident) {
                let Some(lexeme) = self.current() else {
                    return Err(self.unexpected("`}` or an interface element"));
                };
                return Err(self.error_at(lexeme.span, |src, span| {
                    ParseError::UnsupportedInterfaceElement { src, span }
                }));
            }

            if self.peek_at(1) == Some(Token::LParen) {
                methods.push(self.method()?);
            } else {
                embedded.push(self.embedded_name()?);
            }

            if !self.at(Token::RBrace) {
                self.expect(Token::Semi, "`;` or newline after the interface element")?;
            }
        }

        let end = self.expect(Token::RBrace, "`}`")?.span;
        Ok(InterfaceType {
            embedded,
            methods,
            span: start.to(end),
        })
    }

    fn method(&mut self) -> ParseResult<Method> {
        let name = self.expect(Token::Ident, "a method name")?;
        let (params, results) = self.signature()?;
        Ok(Method {
            name: self.text(name.span).to_string(),
            params,
            results,
            span: name.span,
        })
    }

    fn embedded_name(&mut self) -> ParseResult<TypeName> {
        let name = self.type_name()?;
        if self.at(Token::LBracket) {
            let span = self.current().unwrap().span;
            return Err(self.error_at(span, |src, span| ParseError::GenericType { src, span }));
        }
        Ok(name)
    }

    /// Parse `(params) results`, shared by methods and function types.
    pub(crate) fn signature(&mut self) -> ParseResult<(Vec<Param>, Vec<Param>)> {
        let params = self.param_list(true)?;
        let results = if self.at(Token::LParen) {
            self.param_list(false)?
        } else if self.starts_type() {
            vec![Param {
                name: None,
                ty: self.type_expr()?,
                variadic: false,
            }]
        } else {
            Vec::new()
        };
        Ok((params, results))
    }

    fn starts_type(&self) -> bool {
        matches!(
            self.peek(),
            Some(
                Token::Ident
                    | Token::Star
                    | Token::LBracket
                    | Token::Map
                    | Token::Chan
                    | Token::Interface
                    | Token::Struct
                    | Token::Func
                    | Token::Arrow
            )
        )
    }

    /// Parse a parenthesized parameter (or result) list. Go's grammar is
    /// ambiguous between `(a, b Type)` and `(TypeA, TypeB)` until the end
    /// of a group, so each group is first scanned as a candidate name list
    /// and committed only if a type follows.
    fn param_list(&mut self, allow_variadic: bool) -> ParseResult<Vec<Param>> {
        self.expect(Token::LParen, "`(`")?;
        let mut params = Vec::new();
        let mut variadic_span: Option<Span> = None;

        loop {
            while self.eat(Token::Semi) {}
            if self.at(Token::RParen) {
                break;
            }
            if let Some(span) = variadic_span {
                // A previous group was variadic but the list continues.
                return Err(
                    self.error_at(span, |src, span| ParseError::MisplacedVariadic { src, span })
                );
            }
            self.param_group(allow_variadic, &mut params, &mut variadic_span)?;
            if !self.eat(Token::Comma) {
                break;
            }
        }

        self.expect(Token::RParen, "`)`")?;
        Ok(params)
    }

    fn param_group(
        &mut self,
        allow_variadic: bool,
        params: &mut Vec<Param>,
        variadic_span: &mut Option<Span>,
    ) -> ParseResult<()> {
        if let Some(name_count) = self.named_group_lookahead() {
            let mut names = Vec::with_capacity(name_count);
            for i in 0..name_count {
                if i > 0 {
                    self.expect(Token::Comma, "`,`")?;
                }
                let name = self.expect(Token::Ident, "a parameter name")?;
                names.push(self.text(name.span).to_string());
            }

            let mut variadic = false;
            if self.at(Token::Ellipsis) {
                let span = self.current().unwrap().span;
                if !allow_variadic || names.len() > 1 {
                    return Err(
                        self.error_at(span, |src, span| ParseError::MisplacedVariadic { src, span })
                    );
                }
                self.bump();
                variadic = true;
                *variadic_span = Some(span);
            }

            let ty = self.type_expr()?;
            for name in names {
                params.push(Param {
                    name: Some(name),
                    ty: ty.clone(),
                    variadic,
                });
            }
            return Ok(());
        }

        // Unnamed: a single type, possibly variadic.
        let mut variadic = false;
        if self.at(Token::Ellipsis) {
            let span = self.current().unwrap().span;
            if !allow_variadic {
                return Err(
                    self.error_at(span, |src, span| ParseError::MisplacedVariadic { src, span })
                );
            }
            self.bump();
            variadic = true;
            *variadic_span = Some(span);
        }
        let ty = self.type_expr()?;
        params.push(Param {
            name: None,
            ty,
            variadic,
        });
        Ok(())
    }

    /// If the group at the current position is a named one, return how many
    /// names it declares; otherwise None. Pure lookahead, consumes nothing.
    fn named_group_lookahead(&self) -> Option<usize> {
        let mut offset = 0;
        let mut count = 0;
        loop {
            if self.peek_at(offset) != Some(Token::Ident) {
                return None;
            }
            count += 1;
            offset += 1;
            match self.peek_at(offset) {
                Some(Token::Comma) => offset += 1,
                Some(
                    Token::Ident
                    | Token::Star
                    | Token::LBracket
                    | Token::Map
                    | Token::Chan
                    | Token::Interface
                    | Token::Struct
                    | Token::Func
                    | Token::Arrow
                    | Token::Ellipsis
                    | Token::LParen,
                ) => return Some(count),
                _ => return None,
            }
        }
    }

    fn type_name(&mut self) -> ParseResult<TypeName> {
        let first = self.expect(Token::Ident, "a type name")?;
        if self.at(Token::Dot) {
            self.bump();
            let name = self.expect(Token::Ident, "a type name after `.`")?;
            return Ok(TypeName {
                package: Some(self.text(first.span).to_string()),
                name: self.text(name.span).to_string(),
                span: first.span.to(name.span),
            });
        }
        Ok(TypeName {
            package: None,
            name: self.text(first.span).to_string(),
            span: first.span,
        })
    }

    /// Parse a full type expression.
    pub(crate) fn type_expr(&mut self) -> ParseResult<TypeExpr> {
        match self.peek() {
            Some(Token::Star) => {
                self.bump();
                Ok(TypeExpr::Pointer(Box::new(self.type_expr()?)))
            }
            Some(Token::LBracket) => {
                self.bump();
                if self.eat(Token::RBracket) {
                    return Ok(TypeExpr::Slice(Box::new(self.type_expr()?)));
                }
                let len = self.array_length()?;
                Ok(TypeExpr::Array {
                    len,
                    elem: Box::new(self.type_expr()?),
                })
            }
            Some(Token::Map) => {
                self.bump();
                self.expect(Token::LBracket, "`[`")?;
                let key = self.type_expr()?;
                self.expect(Token::RBracket, "`]`")?;
                let value = self.type_expr()?;
                Ok(TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            Some(Token::Chan) => {
                self.bump();
                let dir = if self.eat(Token::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Ok(TypeExpr::Chan {
                    dir,
                    elem: Box::new(self.type_expr()?),
                })
            }
            Some(Token::Arrow) => {
                self.bump();
                self.expect(Token::Chan, "`chan`")?;
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(self.type_expr()?),
                })
            }
            Some(Token::Func) => {
                self.bump();
                let (params, results) = self.signature()?;
                Ok(TypeExpr::Func { params, results })
            }
            Some(Token::Interface) => {
                let start = self.bump().unwrap().span;
                self.expect(Token::LBrace, "`{`")?;
                if self.eat(Token::RBrace) {
                    return Ok(TypeExpr::EmptyInterface);
                }
                Err(self.error_at(start, |src, span| ParseError::UnsupportedType { src, span }))
            }
            Some(Token::Struct) => {
                let span = self.current().unwrap().span;
                Err(self.error_at(span, |src, span| ParseError::UnsupportedType { src, span }))
            }
            Some(Token::Ident) => {
                let name = self.type_name()?;
                if self.at(Token::LBracket) {
                    let span = self.current().unwrap().span;
                    return Err(
                        self.error_at(span, |src, span| ParseError::GenericType { src, span })
                    );
                }
                Ok(TypeExpr::Named(name))
            }
            Some(Token::LParen) => {
                self.bump();
                let ty = self.type_expr()?;
                self.expect(Token::RParen, "`)`")?;
                Ok(ty)
            }
            _ => Err(self.unexpected("a type")),
        }
    }

    /// Capture the raw text of an array length expression, up to the
    /// matching `]`.
    fn array_length(&mut self) -> ParseResult<String> {
        let start = match self.current() {
            Some(lexeme) => lexeme.span,
            None => return Err(self.unexpected("an array length")),
        };
        let mut end = start;
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return Err(self.unexpected("`]`")),
                Some(Token::RBracket) if depth == 0 => break,
                Some(Token::LBracket) => {
                    depth += 1;
                    end = self.bump().unwrap().span;
                }
                Some(Token::RBracket) => {
                    depth -= 1;
                    end = self.bump().unwrap().span;
                }
                Some(_) => {
                    end = self.bump().unwrap().span;
                }
            }
        }
        self.expect(Token::RBracket, "`]`")?;
        Ok(self.text(start.to(end)).to_string())
    }
}
