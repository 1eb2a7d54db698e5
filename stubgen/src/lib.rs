//! The stubgen run pipeline
//!
//! Wires the resolver and codegen crates to the filesystem: load every
//! requested input unit, generate all stubs (the naming pass sees the whole
//! set before anything is emitted), then write the buffered output - one
//! `<unit>_stubs.go` per input unit, or a single concatenated stream. Any
//! failure at any stage aborts the run; nothing is written until every unit
//! has generated and formatted cleanly.

use miette::Diagnostic;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use stubgen_codegen::{generate, ImportNormalizer, RenameDirective, UnitInput};
use stubgen_resolver::ResolvedUnit;
use thiserror::Error;

/// Where the generated stubs go.
pub enum OutputMode {
    /// Next to their inputs: each unit's file lands in its own directory.
    InPlace,
    /// All units into one directory, created if absent. When the directory
    /// names a different package than an input unit, that unit's stubs are
    /// generated in "external" mode.
    Directory(PathBuf),
    /// Concatenated to the stream passed to [`run`].
    Stream,
}

pub struct Options {
    pub inputs: Vec<PathBuf>,
    pub types: Vec<String>,
    pub output: OutputMode,
    pub renames: Vec<RenameDirective>,
}

#[derive(Error, Diagnostic, Debug)]
pub enum AppError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] stubgen_resolver::ResolveError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Codegen(#[from] stubgen_codegen::CodegenError),

    #[error("cannot stat input directory {}: {source}", path.display())]
    #[diagnostic(code(stubgen::cli::stat))]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create output directory {}: {source}", path.display())]
    #[diagnostic(code(stubgen::cli::mkdir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    #[diagnostic(code(stubgen::cli::write))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write to the output stream: {source}")]
    #[diagnostic(code(stubgen::cli::stream))]
    Stream {
        #[source]
        source: io::Error,
    },
}

/// Run one complete generation pass. `stream` receives the output in
/// [`OutputMode::Stream`] and is untouched otherwise.
pub fn run(options: Options, stream: &mut dyn io::Write) -> Result<(), AppError> {
    let mut inputs = Vec::with_capacity(options.inputs.len());
    let mut unit_dirs: Vec<(String, PathBuf)> = Vec::new();
    for dir in &options.inputs {
        let unit = ResolvedUnit::load(dir)?;
        let output_package = output_package_for(&options.output, dir, &unit);
        unit_dirs.push((unit.name.clone(), dir.clone()));
        inputs.push(UnitInput {
            unit,
            output_package,
        });
    }

    let outputs = generate(inputs, &options.types, &options.renames, &ImportNormalizer)?;

    match &options.output {
        OutputMode::Stream => {
            for output in &outputs {
                stream
                    .write_all(output.source.as_bytes())
                    .map_err(|source| AppError::Stream { source })?;
            }
        }
        OutputMode::InPlace => {
            // A unit that produced no stubs has no output entry, so pair
            // outputs back to their directories by unit name.
            for output in &outputs {
                let dir = unit_dirs
                    .iter()
                    .find(|(name, _)| name == &output.unit_name)
                    .map(|(_, dir)| dir.clone())
                    .unwrap_or_else(|| PathBuf::from("."));
                write_output(&dir.join(&output.file_name), &output.source)?;
            }
        }
        OutputMode::Directory(dir) => {
            ensure_output_dir(dir, &options.inputs)?;
            for output in &outputs {
                write_output(&dir.join(&output.file_name), &output.source)?;
            }
        }
    }

    Ok(())
}

fn output_package_for(mode: &OutputMode, input_dir: &Path, unit: &ResolvedUnit) -> Option<String> {
    let OutputMode::Directory(dir) = mode else {
        return None;
    };
    if same_dir(dir, input_dir) {
        return None;
    }
    let package = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())?;
    if package == unit.name {
        None
    } else {
        Some(package)
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Create the destination directory if needed, inheriting the first input
/// directory's permission bits.
fn ensure_output_dir(dir: &Path, inputs: &[PathBuf]) -> Result<(), AppError> {
    if dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| AppError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    #[cfg(unix)]
    if let Some(first) = inputs.first() {
        let meta = fs::metadata(first).map_err(|source| AppError::Stat {
            path: first.clone(),
            source,
        })?;
        fs::set_permissions(dir, meta.permissions()).map_err(|source| AppError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    Ok(())
}

fn write_output(path: &Path, source: &str) -> Result<(), AppError> {
    fs::write(path, source).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
