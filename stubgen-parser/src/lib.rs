// Stubgen Parser Library
// Declaration-level parser for Go source files

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use parser::GoParser;

/// Parse a single Go source file down to its declarations.
///
/// Function bodies and var/const initializers are scanned over, never
/// analyzed; type declarations (and interface types in particular) are
/// parsed in full.
pub fn parse_file(input: &str) -> Result<File, ParseError> {
    GoParser::parse_file(input)
}

/// Parse a single Go source file, recording the file name for diagnostics.
pub fn parse_file_named(input: &str, source_file: Option<String>) -> Result<File, ParseError> {
    GoParser::parse_file_named(input, source_file)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests;
