//! Stub model construction
//!
//! Turns resolved units into the model the emitter renders: one `UnitModel`
//! per input unit, holding its interfaces with ordered, fully named
//! parameter and result lists plus the unit's dependency set. This is the
//! extractor and signature-modeler seat of the pipeline; stub naming happens
//! afterwards, over the complete model, in [`crate::naming`].

use crate::error::{CodegenError, CodegenResult};
use indexmap::{IndexMap, IndexSet};
use stubgen_resolver::{PackageRef, ResolvedType, ResolvedUnit, ResolvedVar};

/// One input unit plus its requested output package.
pub struct UnitInput {
    pub unit: ResolvedUnit,
    /// Package name for the emitted source; `None` keeps the input's.
    pub output_package: Option<String>,
}

/// The complete model for one generation run.
#[derive(Debug)]
pub struct Model {
    pub units: Vec<UnitModel>,
}

#[derive(Debug)]
pub struct UnitModel {
    pub info: UnitInfo,
    pub interfaces: Vec<Interface>,
}

/// Identity and context of one input unit, shared by every interface it
/// declares. Rendering receives this wherever qualification decisions are
/// made.
#[derive(Debug)]
pub struct UnitInfo {
    /// Package name of the scanned source.
    pub input_name: String,
    /// Package name the generated file declares.
    pub output_name: String,
    /// True when output and input live in different packages, so
    /// own-package references must be qualified.
    pub external: bool,
    /// Package-level type names of the input unit.
    pub scope: IndexSet<String>,
    /// Referenced dependency packages, identifier -> import path, in
    /// first-reference order.
    pub deps: IndexMap<String, String>,
}

#[derive(Debug)]
pub struct Interface {
    pub name: String,
    /// Input-unit-qualified name, e.g. `bank.Account`.
    pub qualified_name: String,
    /// The generated type's name. Assigned a default at construction and
    /// only ever mutated by the naming pass.
    pub stub_name: String,
    pub funcs: Vec<Func>,
}

#[derive(Debug)]
pub struct Func {
    pub name: String,
    pub params: Vec<Var>,
    pub results: Vec<Var>,
}

impl Func {
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

/// A parameter or result. Parameters always carry a name (synthesized when
/// the source left them unnamed); results may be anonymous.
#[derive(Debug)]
pub struct Var {
    pub name: String,
    pub ty: ResolvedType,
    pub variadic: bool,
}

/// Build the run-wide model: extract the requested interfaces from every
/// unit and model their signatures. `include` restricts extraction to the
/// named interfaces when non-empty.
pub fn build_model(inputs: Vec<UnitInput>, include: &[String]) -> CodegenResult<Model> {
    let mut units = Vec::with_capacity(inputs.len());
    for input in inputs {
        units.push(build_unit(input, include)?);
    }
    Ok(Model { units })
}

fn build_unit(input: UnitInput, include: &[String]) -> CodegenResult<UnitModel> {
    let unit = input.unit;
    let output_name = input.output_package.unwrap_or_else(|| unit.name.clone());
    let external = output_name != unit.name;

    let mut interfaces = Vec::new();
    for resolved in &unit.interfaces {
        if !include.is_empty() && !include.iter().any(|n| n == &resolved.name) {
            continue;
        }

        let mut funcs = Vec::new();
        for method in &resolved.methods {
            // A blank method name is a documentation-only sentinel, never a
            // real contract method.
            if method.name == "_" {
                continue;
            }
            funcs.push(Func {
                name: method.name.clone(),
                params: model_params(&method.params),
                results: model_results(&method.results),
            });
        }

        interfaces.push(Interface {
            name: resolved.name.clone(),
            qualified_name: format!("{}.{}", unit.name, resolved.name),
            stub_name: String::new(),
            funcs,
        });
    }

    let mut info = UnitInfo {
        input_name: unit.name.clone(),
        output_name,
        external,
        scope: unit.scope.clone(),
        deps: IndexMap::new(),
    };
    collect_deps(&interfaces, &mut info)?;

    if info.external && !interfaces.is_empty() {
        // The assertion and struct references name the input package.
        let path = unit
            .import_path
            .clone()
            .ok_or_else(|| CodegenError::MissingImportPath {
                package: unit.name.clone(),
            })?;
        insert_dep(&mut info.deps, &unit.name, &path)?;
    }

    Ok(UnitModel { info, interfaces })
}

/// Parameters become call-record fields, so every one of them needs a name:
/// position `i` of an unnamed (or blank) parameter synthesizes `arg<i>`.
fn model_params(params: &[ResolvedVar]) -> Vec<Var> {
    params
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let name = match param.name.as_deref() {
                Some("_") | None => format!("arg{}", i),
                Some(name) => name.to_string(),
            };
            Var {
                name,
                ty: param.ty.clone(),
                variadic: param.variadic,
            }
        })
        .collect()
}

fn model_results(results: &[ResolvedVar]) -> Vec<Var> {
    results
        .iter()
        .map(|result| Var {
            name: result.name.clone().unwrap_or_default(),
            ty: result.ty.clone(),
            variadic: false,
        })
        .collect()
}

/// Walk every signature type and record the externally defined packages it
/// references.
fn collect_deps(interfaces: &[Interface], info: &mut UnitInfo) -> CodegenResult<()> {
    let mut deps = std::mem::take(&mut info.deps);
    for iface in interfaces {
        for func in &iface.funcs {
            for var in func.params.iter().chain(func.results.iter()) {
                walk_type(&var.ty, &mut deps)?;
            }
        }
    }
    info.deps = deps;
    Ok(())
}

fn walk_type(ty: &ResolvedType, deps: &mut IndexMap<String, String>) -> CodegenResult<()> {
    match ty {
        ResolvedType::Named { package, .. } => {
            if let Some(PackageRef { ident, path }) = package {
                insert_dep(deps, ident, path)?;
            }
            Ok(())
        }
        ResolvedType::Pointer(inner) | ResolvedType::Slice(inner) => walk_type(inner, deps),
        ResolvedType::Array { elem, .. } | ResolvedType::Chan { elem, .. } => {
            walk_type(elem, deps)
        }
        ResolvedType::Map { key, value } => {
            walk_type(key, deps)?;
            walk_type(value, deps)
        }
        ResolvedType::Func { params, results } => {
            for var in params.iter().chain(results.iter()) {
                walk_type(&var.ty, deps)?;
            }
            Ok(())
        }
        ResolvedType::EmptyInterface => Ok(()),
    }
}

fn insert_dep(
    deps: &mut IndexMap<String, String>,
    ident: &str,
    path: &str,
) -> CodegenResult<()> {
    match deps.get(ident) {
        Some(existing) if existing != path => Err(CodegenError::ImportConflict {
            ident: ident.to_string(),
            first: existing.clone(),
            second: path.to_string(),
        }),
        Some(_) => Ok(()),
        None => {
            deps.insert(ident.to_string(), path.to_string());
            Ok(())
        }
    }
}
