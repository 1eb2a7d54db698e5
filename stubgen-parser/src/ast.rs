// Stubgen AST Definitions
// Declaration-level AST for Go source files with source spans

/// Source position information for AST nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both operands.
    pub fn to(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

/// One parsed Go source file, reduced to the declarations stubgen cares
/// about. Non-type declarations are dropped during parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    /// Package name from the package clause.
    pub package_name: String,
    pub package_span: Span,
    /// All import specs, in declaration order.
    pub imports: Vec<ImportSpec>,
    /// All package-level type declarations, in declaration order.
    pub decls: Vec<TypeDecl>,
    /// File name supplied by the caller, for diagnostics.
    pub source_file: Option<String>,
}

/// A single import spec. `alias` is the explicit local identifier when one
/// was written (including `_` and `.`).
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    pub alias: Option<String>,
    pub path: String,
    pub span: Span,
}

impl ImportSpec {
    /// The identifier this import binds in the file, as far as the source
    /// alone can tell: the explicit alias, or the last path segment with
    /// any trailing major-version segment (`v2`, `v3`, ...) skipped.
    pub fn local_name(&self) -> &str {
        if let Some(alias) = &self.alias {
            return alias;
        }
        default_import_name(&self.path)
    }
}

/// Default identifier for an import path: its last segment, skipping a
/// trailing `vN` major-version segment.
pub fn default_import_name(path: &str) -> &str {
    let mut segments = path.rsplit('/');
    let last = segments.next().unwrap_or(path);
    if is_version_segment(last) {
        segments.next().unwrap_or(last)
    } else {
        last
    }
}

fn is_version_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars.next() == Some('v') && segment.len() > 1 && chars.all(|c| c.is_ascii_digit())
}

/// A package-level type declaration. Only interface types are kept in
/// structured form; everything else is recorded as an opaque name so the
/// resolver can still answer scope lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeDeclKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDeclKind {
    Interface(InterfaceType),
    /// A struct, alias, or any other non-interface type. The shape is
    /// irrelevant to stub generation; only the name participates in scope.
    Opaque,
}

/// An interface type literal: embedded interface references plus explicit
/// methods, both in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub embedded: Vec<TypeName>,
    pub methods: Vec<Method>,
    pub span: Span,
}

/// A possibly package-qualified type name.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    pub package: Option<String>,
    pub name: String,
    pub span: Span,
}

impl TypeName {
    pub fn qualified(&self) -> String {
        match &self.package {
            Some(pkg) => format!("{}.{}", pkg, self.name),
            None => self.name.clone(),
        }
    }
}

/// One interface method signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub params: Vec<Param>,
    pub results: Vec<Param>,
    pub span: Span,
}

/// A parameter or result. `name` is `None` for unnamed entries; `variadic`
/// only ever appears on the final parameter of a signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Option<String>,
    pub ty: TypeExpr,
    pub variadic: bool,
}

/// A Go type expression as it appears in a signature.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Named(TypeName),
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    /// Fixed-size array; the length expression is kept as raw source text.
    Array { len: String, elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    Func { params: Vec<Param>, results: Vec<Param> },
    /// The empty interface literal `interface{}`.
    EmptyInterface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Recv,
    Send,
}

impl TypeExpr {
    /// Span of the leading name, where one exists. Used to anchor
    /// resolution diagnostics.
    pub fn name_span(&self) -> Option<Span> {
        match self {
            TypeExpr::Named(name) => Some(name.span),
            TypeExpr::Pointer(inner) | TypeExpr::Slice(inner) => inner.name_span(),
            TypeExpr::Array { elem, .. } | TypeExpr::Chan { elem, .. } => elem.name_span(),
            _ => None,
        }
    }
}
