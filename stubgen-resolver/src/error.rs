//! Error types for source resolution
//!
//! Following the miette patterns from the parser crate for consistent error
//! reporting across the pipeline.

use miette::{Diagnostic, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Main resolution error type extending the parser error system
#[derive(Error, Diagnostic, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] stubgen_parser::ParseError),

    #[error("cannot read {}: {source}", path.display())]
    #[diagnostic(code(stubgen::resolve::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: no buildable Go files", dir.display())]
    #[diagnostic(
        code(stubgen::resolve::no_go_files),
        help("Generated `*_stubs.go` and `*_test.go` files are not scanned")
    )]
    NoGoFiles { dir: PathBuf },

    #[error("found packages {first} and {second} in {}", dir.display())]
    #[diagnostic(code(stubgen::resolve::mixed_packages))]
    MixedPackages {
        dir: PathBuf,
        first: String,
        second: String,
    },

    #[error("{name} redeclared in this package")]
    #[diagnostic(code(stubgen::resolve::redeclared))]
    DuplicateType {
        name: String,
        #[source_code]
        src: String,
        #[label("redeclared here")]
        span: SourceSpan,
    },

    #[error("undefined type: {name}")]
    #[diagnostic(
        code(stubgen::resolve::undefined_type),
        help("The name must be declared in this package, be a predeclared Go type, or be qualified with an imported package")
    )]
    UndefinedType {
        name: String,
        #[source_code]
        src: String,
        #[label("not declared in this package")]
        span: SourceSpan,
    },

    #[error("undefined package: {name}")]
    #[diagnostic(
        code(stubgen::resolve::undefined_package),
        help("Add the matching import to this file")
    )]
    UndefinedPackage {
        name: String,
        #[source_code]
        src: String,
        #[label("no import provides this identifier")]
        span: SourceSpan,
    },

    #[error("dot imports are not supported")]
    #[diagnostic(
        code(stubgen::resolve::dot_import),
        help("Identifiers pulled in by `import .` cannot be told apart from package-local names; use a named import instead")
    )]
    DotImport {
        #[source_code]
        src: String,
        #[label("dot import")]
        span: SourceSpan,
    },

    #[error("cannot flatten {name}: embedded interface is defined in another package")]
    #[diagnostic(
        code(stubgen::resolve::foreign_embedding),
        help("Only interfaces declared in the scanned package can be embedded; inline the foreign interface's methods instead")
    )]
    ForeignEmbedding {
        name: String,
        #[source_code]
        src: String,
        #[label("embedded from another package")]
        span: SourceSpan,
    },

    #[error("{name} is not an interface")]
    #[diagnostic(code(stubgen::resolve::embedded_not_interface))]
    EmbeddedNotInterface {
        name: String,
        #[source_code]
        src: String,
        #[label("embedded name does not refer to an interface")]
        span: SourceSpan,
    },

    #[error("invalid recursive interface: {name} embeds itself")]
    #[diagnostic(code(stubgen::resolve::embedding_cycle))]
    EmbeddingCycle {
        name: String,
        #[source_code]
        src: String,
        #[label("embedding cycle through this interface")]
        span: SourceSpan,
    },
}

/// Result type for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;
