//! Interface resolution and embedding flattening
//!
//! Builds the package scope, then resolves every interface declaration into
//! a flattened, fully qualified method set. Each file keeps its own import
//! table, so a type reference is always resolved against the imports of the
//! file that wrote it.

use crate::error::{ResolveError, ResolveResult};
use crate::unit::SourceFile;
use indexmap::{IndexMap, IndexSet};
use stubgen_parser::{
    ChanDir, InterfaceType, Method, Param, TypeDecl, TypeDeclKind, TypeExpr, TypeName,
};

/// An interface with its embedded interfaces flattened away and every type
/// reference resolved. Methods are ordered by name, the order of a Go
/// method set.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInterface {
    pub name: String,
    pub methods: Vec<ResolvedMethod>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMethod {
    pub name: String,
    pub params: Vec<ResolvedVar>,
    pub results: Vec<ResolvedVar>,
}

/// A resolved parameter or result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVar {
    pub name: Option<String>,
    pub ty: ResolvedType,
    pub variadic: bool,
}

/// A type with its package reference resolved. `local` marks a name
/// declared in the scanned package itself, which is what needs
/// re-qualification when stubs land in a different package.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedType {
    Named {
        package: Option<PackageRef>,
        name: String,
        local: bool,
    },
    Pointer(Box<ResolvedType>),
    Slice(Box<ResolvedType>),
    Array {
        len: String,
        elem: Box<ResolvedType>,
    },
    Map {
        key: Box<ResolvedType>,
        value: Box<ResolvedType>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<ResolvedType>,
    },
    Func {
        params: Vec<ResolvedVar>,
        results: Vec<ResolvedVar>,
    },
    EmptyInterface,
}

/// An imported package as seen from one file: the identifier used to
/// qualify names, and the import path that provides it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRef {
    pub ident: String,
    pub path: String,
}

/// Go's predeclared type identifiers.
const UNIVERSE_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex128",
    "complex64",
    "error",
    "float32",
    "float64",
    "int",
    "int16",
    "int32",
    "int64",
    "int8",
    "rune",
    "string",
    "uint",
    "uint16",
    "uint32",
    "uint64",
    "uint8",
    "uintptr",
];

pub fn is_universe_type(name: &str) -> bool {
    UNIVERSE_TYPES.binary_search(&name).is_ok()
}

/// Resolve all interfaces declared across `files` (already checked to share
/// one package name). Returns the package type scope and the interfaces in
/// file-then-declaration order.
pub(crate) fn resolve_files(
    files: &[SourceFile],
) -> ResolveResult<(IndexSet<String>, Vec<ResolvedInterface>)> {
    let resolver = Resolver::new(files)?;
    let interfaces = resolver.resolve_all()?;
    let scope = resolver.scope.keys().cloned().collect();
    Ok((scope, interfaces))
}

struct Resolver<'a> {
    files: &'a [SourceFile],
    /// Type name -> (file index, declaration).
    scope: IndexMap<String, (usize, &'a TypeDecl)>,
    /// Per-file import tables: local identifier -> import path.
    imports: Vec<IndexMap<String, String>>,
}

impl<'a> Resolver<'a> {
    fn new(files: &'a [SourceFile]) -> ResolveResult<Self> {
        let mut scope: IndexMap<String, (usize, &'a TypeDecl)> = IndexMap::new();
        for (idx, file) in files.iter().enumerate() {
            for decl in &file.ast.decls {
                if scope.insert(decl.name.clone(), (idx, decl)).is_some() {
                    return Err(ResolveError::DuplicateType {
                        name: decl.name.clone(),
                        src: file.text.clone(),
                        span: decl.span.into(),
                    });
                }
            }
        }

        let mut imports = Vec::with_capacity(files.len());
        for file in files {
            let mut table = IndexMap::new();
            for spec in &file.ast.imports {
                match spec.alias.as_deref() {
                    Some("_") => continue,
                    Some(".") => {
                        return Err(ResolveError::DotImport {
                            src: file.text.clone(),
                            span: spec.span.into(),
                        });
                    }
                    _ => {}
                }
                table.insert(spec.local_name().to_string(), spec.path.clone());
            }
            imports.push(table);
        }

        Ok(Resolver {
            files,
            scope,
            imports,
        })
    }

    fn resolve_all(&self) -> ResolveResult<Vec<ResolvedInterface>> {
        let mut interfaces = Vec::new();
        for (idx, file) in self.files.iter().enumerate() {
            for decl in &file.ast.decls {
                if let TypeDeclKind::Interface(iface) = &decl.kind {
                    let mut visiting = vec![decl.name.clone()];
                    let mut methods = self.flatten(iface, idx, &mut visiting)?;
                    methods.sort_by(|a, b| a.name.cmp(&b.name));
                    interfaces.push(ResolvedInterface {
                        name: decl.name.clone(),
                        methods,
                    });
                }
            }
        }
        Ok(interfaces)
    }

    /// Flatten one interface literal into its complete method set.
    /// `file_idx` names the file the literal appears in, which fixes the
    /// import table for its signatures. `visiting` is the embedding path,
    /// for cycle detection.
    fn flatten(
        &self,
        iface: &InterfaceType,
        file_idx: usize,
        visiting: &mut Vec<String>,
    ) -> ResolveResult<Vec<ResolvedMethod>> {
        let mut methods: Vec<ResolvedMethod> = Vec::new();

        for embedded in &iface.embedded {
            for method in self.embedded_methods(embedded, file_idx, visiting)? {
                if !methods.iter().any(|m| m.name == method.name) {
                    methods.push(method);
                }
            }
        }

        for method in &iface.methods {
            let resolved = self.resolve_method(method, file_idx)?;
            if !methods.iter().any(|m| m.name == resolved.name) {
                methods.push(resolved);
            }
        }

        Ok(methods)
    }

    fn embedded_methods(
        &self,
        embedded: &TypeName,
        file_idx: usize,
        visiting: &mut Vec<String>,
    ) -> ResolveResult<Vec<ResolvedMethod>> {
        let file = &self.files[file_idx];

        if embedded.package.is_some() {
            return Err(ResolveError::ForeignEmbedding {
                name: embedded.qualified(),
                src: file.text.clone(),
                span: embedded.span.into(),
            });
        }

        let Some(&(decl_idx, decl)) = self.scope.get(&embedded.name) else {
            return Err(ResolveError::UndefinedType {
                name: embedded.name.clone(),
                src: file.text.clone(),
                span: embedded.span.into(),
            });
        };

        let TypeDeclKind::Interface(target) = &decl.kind else {
            return Err(ResolveError::EmbeddedNotInterface {
                name: embedded.name.clone(),
                src: file.text.clone(),
                span: embedded.span.into(),
            });
        };

        if visiting.iter().any(|n| n == &embedded.name) {
            return Err(ResolveError::EmbeddingCycle {
                name: embedded.name.clone(),
                src: file.text.clone(),
                span: embedded.span.into(),
            });
        }

        visiting.push(embedded.name.clone());
        // Signatures of the embedded interface resolve against the imports
        // of the file that declares it, not the embedding site.
        let methods = self.flatten(target, decl_idx, visiting);
        visiting.pop();
        methods
    }

    fn resolve_method(&self, method: &Method, file_idx: usize) -> ResolveResult<ResolvedMethod> {
        Ok(ResolvedMethod {
            name: method.name.clone(),
            params: self.resolve_vars(&method.params, file_idx)?,
            results: self.resolve_vars(&method.results, file_idx)?,
        })
    }

    fn resolve_vars(&self, params: &[Param], file_idx: usize) -> ResolveResult<Vec<ResolvedVar>> {
        params
            .iter()
            .map(|param| {
                Ok(ResolvedVar {
                    name: param.name.clone(),
                    ty: self.resolve_type(&param.ty, file_idx)?,
                    variadic: param.variadic,
                })
            })
            .collect()
    }

    fn resolve_type(&self, ty: &TypeExpr, file_idx: usize) -> ResolveResult<ResolvedType> {
        let file = &self.files[file_idx];
        match ty {
            TypeExpr::Named(name) => match &name.package {
                Some(pkg) => {
                    let Some(path) = self.imports[file_idx].get(pkg) else {
                        return Err(ResolveError::UndefinedPackage {
                            name: pkg.clone(),
                            src: file.text.clone(),
                            span: name.span.into(),
                        });
                    };
                    Ok(ResolvedType::Named {
                        package: Some(PackageRef {
                            ident: pkg.clone(),
                            path: path.clone(),
                        }),
                        name: name.name.clone(),
                        local: false,
                    })
                }
                None => {
                    let local = self.scope.contains_key(&name.name);
                    if !local && !is_universe_type(&name.name) {
                        return Err(ResolveError::UndefinedType {
                            name: name.name.clone(),
                            src: file.text.clone(),
                            span: name.span.into(),
                        });
                    }
                    Ok(ResolvedType::Named {
                        package: None,
                        name: name.name.clone(),
                        local,
                    })
                }
            },
            TypeExpr::Pointer(inner) => Ok(ResolvedType::Pointer(Box::new(
                self.resolve_type(inner, file_idx)?,
            ))),
            TypeExpr::Slice(inner) => Ok(ResolvedType::Slice(Box::new(
                self.resolve_type(inner, file_idx)?,
            ))),
            TypeExpr::Array { len, elem } => Ok(ResolvedType::Array {
                len: len.clone(),
                elem: Box::new(self.resolve_type(elem, file_idx)?),
            }),
            TypeExpr::Map { key, value } => Ok(ResolvedType::Map {
                key: Box::new(self.resolve_type(key, file_idx)?),
                value: Box::new(self.resolve_type(value, file_idx)?),
            }),
            TypeExpr::Chan { dir, elem } => Ok(ResolvedType::Chan {
                dir: *dir,
                elem: Box::new(self.resolve_type(elem, file_idx)?),
            }),
            TypeExpr::Func { params, results } => Ok(ResolvedType::Func {
                params: self.resolve_vars(params, file_idx)?,
                results: self.resolve_vars(results, file_idx)?,
            }),
            TypeExpr::EmptyInterface => Ok(ResolvedType::EmptyInterface),
        }
    }
}
