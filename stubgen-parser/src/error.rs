// Stubgen Parser Error Handling
// Parse diagnostics with miette integration

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main parse error type
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("invalid token")]
    #[diagnostic(
        code(stubgen::parse::invalid_token),
        help("This character sequence is not valid Go")
    )]
    InvalidToken {
        #[source_code]
        src: String,
        #[label("unrecognized input")]
        span: SourceSpan,
    },

    #[error("expected {expected}, found {found}")]
    #[diagnostic(code(stubgen::parse::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        #[source_code]
        src: String,
        #[label("found {found}")]
        span: SourceSpan,
    },

    #[error("unexpected end of file: expected {expected}")]
    #[diagnostic(code(stubgen::parse::unexpected_eof))]
    UnexpectedEof {
        expected: String,
        #[source_code]
        src: String,
        #[label("file ends here")]
        span: SourceSpan,
    },

    #[error("missing package clause")]
    #[diagnostic(
        code(stubgen::parse::missing_package_clause),
        help("Every Go source file must begin with `package <name>`")
    )]
    MissingPackageClause {
        #[source_code]
        src: String,
        #[label("expected `package <name>` here")]
        span: SourceSpan,
    },

    #[error("generic type declarations are not supported")]
    #[diagnostic(
        code(stubgen::parse::generic_type),
        help("Stubs cannot be generated for parameterized types; remove the type parameter list or exclude this interface")
    )]
    GenericType {
        #[source_code]
        src: String,
        #[label("type parameter list")]
        span: SourceSpan,
    },

    #[error("unsupported interface element")]
    #[diagnostic(
        code(stubgen::parse::interface_element),
        help("Only method signatures and embedded interface names are supported; type-set constraint elements cannot be stubbed")
    )]
    UnsupportedInterfaceElement {
        #[source_code]
        src: String,
        #[label("not a method or embedded interface")]
        span: SourceSpan,
    },

    #[error("unsupported type in signature")]
    #[diagnostic(
        code(stubgen::parse::unsupported_type),
        help("Anonymous struct types and non-empty interface literals cannot appear in stubbed signatures")
    )]
    UnsupportedType {
        #[source_code]
        src: String,
        #[label("unsupported type expression")]
        span: SourceSpan,
    },

    #[error("variadic parameter must be the final parameter")]
    #[diagnostic(code(stubgen::parse::misplaced_variadic))]
    MisplacedVariadic {
        #[source_code]
        src: String,
        #[label("`...` used before the last parameter")]
        span: SourceSpan,
    },
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
