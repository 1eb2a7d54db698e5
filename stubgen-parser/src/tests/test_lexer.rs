use crate::lexer::{lex, Token};

fn tokens(src: &str) -> Vec<Token> {
    lex(src).unwrap().into_iter().map(|l| l.token).collect()
}

#[test]
fn test_keywords_and_idents() {
    assert_eq!(
        tokens("package main"),
        vec![Token::Package, Token::Ident, Token::Semi]
    );
}

#[test]
fn test_semicolon_inserted_at_newline() {
    // A newline after an identifier terminates the statement; a newline
    // after a keyword does not.
    assert_eq!(
        tokens("package main\nimport\n\"fmt\"\n"),
        vec![
            Token::Package,
            Token::Ident,
            Token::Semi,
            Token::Import,
            Token::String,
            Token::Semi,
        ]
    );
}

#[test]
fn test_semicolon_inserted_at_eof() {
    assert_eq!(tokens("package main"), vec![Token::Package, Token::Ident, Token::Semi]);
    // No trailing terminator token, no insertion.
    assert_eq!(tokens("package"), vec![Token::Package]);
}

#[test]
fn test_semicolon_after_closing_brackets() {
    assert_eq!(
        tokens("}\n)"),
        vec![Token::RBrace, Token::Semi, Token::RParen, Token::Semi]
    );
}

#[test]
fn test_comments_are_skipped_but_count_as_newlines() {
    // A line comment hides the newline from the raw token stream, but the
    // terminator rule still fires.
    assert_eq!(
        tokens("x // trailing\ny"),
        vec![Token::Ident, Token::Semi, Token::Ident, Token::Semi]
    );
    assert_eq!(
        tokens("x /* multi\nline */ y"),
        vec![Token::Ident, Token::Semi, Token::Ident, Token::Semi]
    );
    // A block comment on one line is plain whitespace.
    assert_eq!(
        tokens("x /* same line */ y"),
        vec![Token::Ident, Token::Ident, Token::Semi]
    );
}

#[test]
fn test_string_literals() {
    assert_eq!(tokens(r#""hello \"quoted\"""#), vec![Token::String, Token::Semi]);
    assert_eq!(tokens("`raw\nstring`"), vec![Token::RawString, Token::Semi]);
    assert_eq!(tokens(r"'\n'"), vec![Token::Rune, Token::Semi]);
}

#[test]
fn test_numeric_literals() {
    assert_eq!(
        tokens("42 0x1F 0b10 1_000"),
        vec![Token::Int, Token::Int, Token::Int, Token::Int, Token::Semi]
    );
    assert_eq!(tokens("3.14 1.5e-3"), vec![Token::Float, Token::Float, Token::Semi]);
}

#[test]
fn test_ellipsis_vs_dot() {
    assert_eq!(
        tokens("...int\na.b"),
        vec![
            Token::Ellipsis,
            Token::Ident,
            Token::Semi,
            Token::Ident,
            Token::Dot,
            Token::Ident,
            Token::Semi,
        ]
    );
}

#[test]
fn test_channel_arrow() {
    assert_eq!(
        tokens("<-chan chan<- elem"),
        vec![
            Token::Arrow,
            Token::Chan,
            Token::Chan,
            Token::Arrow,
            Token::Ident,
            Token::Semi,
        ]
    );
}

#[test]
fn test_operator_soup() {
    assert_eq!(
        tokens("a && b == c"),
        vec![
            Token::Ident,
            Token::Op,
            Token::Ident,
            Token::Op,
            Token::Ident,
            Token::Semi,
        ]
    );
}

#[test]
fn test_invalid_token() {
    assert!(lex("package @").is_err());
}
