//! Error types for stub modeling and emission

use miette::Diagnostic;
use thiserror::Error;

/// Main code generation error type
#[derive(Error, Diagnostic, Debug)]
pub enum CodegenError {
    #[error("invalid rename directive `{directive}`")]
    #[diagnostic(
        code(stubgen::codegen::invalid_rename),
        help("Rename directives take the form `pkg.StubbedName=NewName`")
    )]
    InvalidRename { directive: String },

    #[error("rename target `{target}` does not match any stub")]
    #[diagnostic(
        code(stubgen::codegen::unknown_rename),
        help("The left-hand side must be the qualified default stub name, e.g. `bank.StubbedAccount`")
    )]
    UnknownRename { target: String },

    #[error("import identifier {ident} refers to both {first:?} and {second:?}")]
    #[diagnostic(
        code(stubgen::codegen::import_conflict),
        help("Two files of the package bind the same identifier to different import paths; alias one of them")
    )]
    ImportConflict {
        ident: String,
        first: String,
        second: String,
    },

    #[error("cannot qualify references to package {package}: its import path is unknown")]
    #[diagnostic(
        code(stubgen::codegen::missing_import_path),
        help("Writing stubs into a different package requires the input package's import path; run inside a module so it can be derived from go.mod")
    )]
    MissingImportPath { package: String },

    #[error("internal render error: {message}")]
    #[diagnostic(
        code(stubgen::codegen::render),
        help("This is a bug in stubgen: the model violated an emitter invariant")
    )]
    Render { message: String },

    #[error("cannot format generated source for {unit}: {message}")]
    #[diagnostic(
        code(stubgen::codegen::format),
        help("The unformatted text is preserved on the error for diagnosis")
    )]
    Format {
        unit: String,
        message: String,
        /// The rendered source exactly as the emitter produced it.
        unformatted: String,
    },
}

/// Result type for code generation operations
pub type CodegenResult<T> = Result<T, CodegenError>;
