//! Package loading for stubgen input units
//!
//! Loads one Go package directory, parses every buildable source file, and
//! hands the merged file set to the resolver. Previously generated
//! `*_stubs.go` files and `*_test.go` files are never scanned, so
//! regeneration is idempotent.

use crate::error::{ResolveError, ResolveResult};
use crate::resolve::{resolve_files, ResolvedInterface};
use indexmap::IndexSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One parsed source file, kept with its text for diagnostics.
pub struct SourceFile {
    pub name: String,
    pub text: String,
    pub ast: stubgen_parser::File,
}

/// A fully resolved input unit: one Go package with every interface's
/// method set flattened and every referenced type resolved.
#[derive(Debug)]
pub struct ResolvedUnit {
    /// Package name from the package clauses.
    pub name: String,
    /// Directory the unit was loaded from, when it came from disk.
    pub dir: Option<PathBuf>,
    /// The unit's own import path, when an enclosing go.mod reveals it.
    /// Needed when stubs are generated into a different package.
    pub import_path: Option<String>,
    /// All package-level type names, for qualification lookups.
    pub scope: IndexSet<String>,
    /// All interfaces declared in the unit, in file-then-declaration order.
    pub interfaces: Vec<ResolvedInterface>,
}

impl ResolvedUnit {
    /// Load the Go package in `dir` from disk.
    pub fn load(dir: &Path) -> ResolveResult<Self> {
        let entries = fs::read_dir(dir).map_err(|source| ResolveError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut file_names: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ResolveError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.ends_with(".go")
                || name.ends_with("_test.go")
                || name.ends_with("_stubs.go")
            {
                continue;
            }
            if entry.path().is_dir() {
                continue;
            }
            file_names.push(name);
        }
        // Deterministic processing order regardless of directory iteration.
        file_names.sort();

        if file_names.is_empty() {
            return Err(ResolveError::NoGoFiles {
                dir: dir.to_path_buf(),
            });
        }

        let mut files = Vec::with_capacity(file_names.len());
        for name in file_names {
            let path = dir.join(&name);
            let text = fs::read_to_string(&path).map_err(|source| ResolveError::Io {
                path: path.clone(),
                source,
            })?;
            let ast = stubgen_parser::parse_file_named(&text, Some(name.clone()))?;
            files.push(SourceFile { name, text, ast });
        }

        let import_path = discover_import_path(dir);
        Self::from_files(files, Some(dir.to_path_buf()), import_path)
    }

    /// Resolve an in-memory set of `(file name, source)` pairs as one unit.
    pub fn from_sources(sources: Vec<(String, String)>) -> ResolveResult<Self> {
        let mut files = Vec::with_capacity(sources.len());
        for (name, text) in sources {
            let ast = stubgen_parser::parse_file_named(&text, Some(name.clone()))?;
            files.push(SourceFile { name, text, ast });
        }
        Self::from_files(files, None, None)
    }

    fn from_files(
        files: Vec<SourceFile>,
        dir: Option<PathBuf>,
        import_path: Option<String>,
    ) -> ResolveResult<Self> {
        let reported_dir = dir.clone().unwrap_or_else(|| PathBuf::from("."));
        if files.is_empty() {
            return Err(ResolveError::NoGoFiles { dir: reported_dir });
        }

        let name = files[0].ast.package_name.clone();
        for file in &files[1..] {
            if file.ast.package_name != name {
                return Err(ResolveError::MixedPackages {
                    dir: reported_dir,
                    first: name,
                    second: file.ast.package_name.clone(),
                });
            }
        }

        let (scope, interfaces) = resolve_files(&files)?;
        Ok(ResolvedUnit {
            name,
            dir,
            import_path,
            scope,
            interfaces,
        })
    }
}

/// Derive the unit's import path by locating an enclosing `go.mod` and
/// joining its module path with the unit's relative directory.
pub fn discover_import_path(dir: &Path) -> Option<String> {
    let absolute = dir.canonicalize().ok()?;
    for ancestor in absolute.ancestors() {
        let go_mod = ancestor.join("go.mod");
        if !go_mod.is_file() {
            continue;
        }
        let module = module_path_of(&go_mod)?;
        let rel = absolute.strip_prefix(ancestor).ok()?;
        if rel.as_os_str().is_empty() {
            return Some(module);
        }
        let mut path = module;
        for component in rel.components() {
            path.push('/');
            path.push_str(&component.as_os_str().to_string_lossy());
        }
        return Some(path);
    }
    None
}

fn module_path_of(go_mod: &Path) -> Option<String> {
    let text = fs::read_to_string(go_mod).ok()?;
    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("module") {
            if !rest.starts_with([' ', '\t']) {
                continue;
            }
            let rest = rest.trim();
            if rest.is_empty() {
                continue;
            }
            return Some(rest.trim_matches('"').to_string());
        }
    }
    None
}
