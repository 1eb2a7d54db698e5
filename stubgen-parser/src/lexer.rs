// Stubgen Lexer
// Logos-based Go token scanner with line-based semicolon insertion

use crate::ast::Span;
use crate::error::ParseError;
use logos::Logos;

/// Go tokens, reduced to what declaration parsing needs. Keywords that only
/// occur inside skipped regions (`if`, `for`, `return`, ...) deliberately lex
/// as identifiers; the statement-terminator set below still matches Go's
/// semicolon insertion for them.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
pub enum Token {
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("type")]
    Type,
    #[token("func")]
    Func,
    #[token("var")]
    Var,
    #[token("const")]
    Const,
    #[token("map")]
    Map,
    #[token("chan")]
    Chan,
    #[token("interface")]
    Interface,
    #[token("struct")]
    Struct,

    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    #[regex(r"(0[xX][0-9a-fA-F_]+|0[oO][0-7_]+|0[bB][01_]+|[0-9][0-9_]*)i?")]
    Int,
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?i?")]
    Float,
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    String,
    #[regex(r"`[^`]*`")]
    RawString,
    #[regex(r"'([^'\\\n]|\\[^\n])*'")]
    Rune,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("*")]
    Star,
    #[token("<-")]
    Arrow,

    /// Any other operator sequence. Declaration parsing only ever inspects
    /// its text (for `=` in type aliases); the rest is skipped soup.
    #[regex(r"[+\-/%&|^<>=!:~?]+")]
    Op,
}

impl Token {
    /// Tokens after which a newline triggers semicolon insertion.
    fn ends_statement(self) -> bool {
        matches!(
            self,
            Token::Ident
                | Token::Int
                | Token::Float
                | Token::String
                | Token::RawString
                | Token::Rune
                | Token::RParen
                | Token::RBracket
                | Token::RBrace
        )
    }
}

/// A token with its source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Span,
}

impl Lexeme {
    fn new(token: Token, span: Span) -> Self {
        Self { token, span }
    }
}

/// Tokenize a whole file, inserting semicolons exactly where Go's scanner
/// would: at any newline (including one hidden inside a skipped comment)
/// that follows a statement-ending token, and at end of input.
pub fn lex(src: &str) -> Result<Vec<Lexeme>, ParseError> {
    let mut lexemes: Vec<Lexeme> = Vec::new();
    let mut lexer = Token::lexer(src);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(range.start, range.end);
        let token = result.map_err(|_| ParseError::InvalidToken {
            src: src.to_string(),
            span: span.into(),
        })?;

        if let Some(prev) = lexemes.last().copied() {
            if prev.token.ends_statement() && src[prev.span.end..span.start].contains('\n') {
                let at = prev.span.end;
                lexemes.push(Lexeme::new(Token::Semi, Span::new(at, at)));
            }
        }
        lexemes.push(Lexeme::new(token, span));
    }

    if let Some(last) = lexemes.last().copied() {
        if last.token.ends_statement() {
            let at = last.span.end;
            lexemes.push(Lexeme::new(Token::Semi, Span::new(at, at)));
        }
    }

    Ok(lexemes)
}
