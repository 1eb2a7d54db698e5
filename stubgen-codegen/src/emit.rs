//! Source emission
//!
//! A pure, single-pass transform from the final model to Go source text,
//! one rendered unit per input unit. Everything here is deterministic
//! string building; the model is never mutated.
//!
//! Per interface the emitter produces: the stub struct (one function-typed
//! backing field and one unexported call log per method), one delegating
//! method per interface method, one log accessor per method, and a
//! compile-time assertion that the stub satisfies the interface.

use crate::error::{CodegenError, CodegenResult};
use crate::model::{Func, Interface, UnitInfo, UnitModel, Var};
use crate::naming::{escape_ident, privatize, publicize};
use std::fmt::Write;
use stubgen_resolver::{default_import_name, ChanDir, ResolvedType, ResolvedVar};

/// Render one unit's stubs to Go source text.
pub fn emit_unit(unit: &UnitModel) -> CodegenResult<String> {
    check_invariants(unit)?;

    let info = &unit.info;
    let mut out = String::new();

    out.push_str("// Code generated by stubgen; DO NOT EDIT.\n\n");
    out.push_str("//go:build !nostubs\n// +build !nostubs\n\n");
    let _ = writeln!(out, "package {}", info.output_name);

    if !info.deps.is_empty() {
        let mut entries: Vec<(&String, &String)> = info.deps.iter().collect();
        entries.sort_by(|a, b| a.1.cmp(b.1));
        out.push_str("\nimport (\n");
        for (ident, path) in entries {
            if ident == default_import_name(path) {
                let _ = writeln!(out, "\t\"{}\"", path);
            } else {
                let _ = writeln!(out, "\t{} \"{}\"", ident, path);
            }
        }
        out.push_str(")\n");
    }

    for iface in &unit.interfaces {
        emit_interface(&mut out, iface, info);
    }

    Ok(out)
}

/// File name for a unit's generated output.
pub fn output_file_name(unit_name: &str) -> String {
    format!("{}_stubs.go", unit_name)
}

fn check_invariants(unit: &UnitModel) -> CodegenResult<()> {
    for iface in &unit.interfaces {
        if iface.stub_name.is_empty() {
            return Err(CodegenError::Render {
                message: format!("interface {} reached the emitter unnamed", iface.name),
            });
        }
        for func in &iface.funcs {
            let misplaced = func
                .params
                .iter()
                .rev()
                .skip(1)
                .any(|param| param.variadic);
            if misplaced {
                return Err(CodegenError::Render {
                    message: format!(
                        "{}.{} models a variadic parameter before the end of the list",
                        iface.name, func.name
                    ),
                });
            }
        }
    }
    Ok(())
}

fn emit_interface(out: &mut String, iface: &Interface, info: &UnitInfo) {
    let stub = &iface.stub_name;
    let iface_ref = if info.external {
        format!("{}.{}", info.input_name, iface.name)
    } else {
        iface.name.clone()
    };

    let _ = writeln!(out, "\n// {} is a stubbed implementation of {}.", stub, iface_ref);
    let _ = writeln!(out, "type {} struct {{", stub);
    for func in &iface.funcs {
        let _ = writeln!(
            out,
            "\t// {} defines the implementation for {}.",
            stub_field(func),
            func.name
        );
        let _ = writeln!(
            out,
            "\t{} {}",
            stub_field(func),
            func_type_string(func, info)
        );
        let _ = writeln!(out, "\t{} []{}", calls_field(func), params_struct(func, info));
    }
    out.push_str("}\n");

    for func in &iface.funcs {
        emit_method(out, stub, func, info);
        emit_accessor(out, stub, func, info);
    }

    let _ = writeln!(out, "\n// Compile-time check that the implementation matches the interface.");
    let _ = writeln!(out, "var _ {} = (*{})(nil)", iface_ref, stub);
}

fn emit_method(out: &mut String, stub: &str, func: &Func, info: &UnitInfo) {
    let _ = writeln!(
        out,
        "\n// {} delegates its behavior to the field {}.",
        func.name,
        stub_field(func)
    );
    let results = results_string(&func.results, info);
    let signature = if results.is_empty() {
        format!("func (s *{}) {}({})", stub, func.name, params_string(func, info))
    } else {
        format!(
            "func (s *{}) {}({}) {}",
            stub,
            func.name,
            params_string(func, info),
            results
        )
    };
    let _ = writeln!(out, "{} {{", signature);
    let _ = writeln!(out, "\tif s.{} == nil {{", stub_field(func));
    let _ = writeln!(out, "\t\tpanic(\"{}.{}: nil method stub\")", stub, func.name);
    out.push_str("\t}\n");
    let _ = writeln!(
        out,
        "\ts.{} = append(s.{}, {}{{{}}})",
        calls_field(func),
        calls_field(func),
        params_struct(func, info),
        params_struct_values(func, info)
    );
    let ret = if func.has_results() { "return " } else { "" };
    let _ = writeln!(
        out,
        "\t{}(s.{})({})",
        ret,
        stub_field(func),
        param_names(func, info)
    );
    out.push_str("}\n");
}

fn emit_accessor(out: &mut String, stub: &str, func: &Func, info: &UnitInfo) {
    let _ = writeln!(
        out,
        "\n// {}Calls returns a slice of calls made to {}. Each element",
        func.name, func.name
    );
    out.push_str("// of the slice represents the parameters that were provided.\n");
    let _ = writeln!(
        out,
        "func (s *{}) {}Calls() []{} {{",
        stub,
        func.name,
        params_struct(func, info)
    );
    let _ = writeln!(out, "\treturn s.{}", calls_field(func));
    out.push_str("}\n");
}

// ── Name helpers ─────────────────────────────────────────────

fn stub_field(func: &Func) -> String {
    format!("{}Stub", func.name)
}

fn calls_field(func: &Func) -> String {
    format!("{}Calls", privatize(&func.name))
}

// ── Signature rendering ──────────────────────────────────────

/// The backing field's type: the method signature as a function type.
fn func_type_string(func: &Func, info: &UnitInfo) -> String {
    let results = results_string(&func.results, info);
    if results.is_empty() {
        format!("func({})", params_string(func, info))
    } else {
        format!("func({}) {}", params_string(func, info), results)
    }
}

fn params_string(func: &Func, info: &UnitInfo) -> String {
    let parts: Vec<String> = func
        .params
        .iter()
        .map(|param| {
            let marker = if param.variadic { "..." } else { "" };
            format!(
                "{} {}{}",
                escape_ident(&param.name, &info.deps),
                marker,
                type_string(&param.ty, info)
            )
        })
        .collect();
    parts.join(", ")
}

fn results_string(results: &[Var], info: &UnitInfo) -> String {
    if results.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = results
        .iter()
        .map(|result| {
            if result.name.is_empty() {
                type_string(&result.ty, info)
            } else {
                format!(
                    "{} {}",
                    escape_ident(&result.name, &info.deps),
                    type_string(&result.ty, info)
                )
            }
        })
        .collect();
    if results.len() > 1 || !results[0].name.is_empty() {
        format!("({})", parts.join(", "))
    } else {
        parts.join(", ")
    }
}

/// The call-record type: one capitalized field per parameter, in declared
/// order. A variadic argument list arrives as a slice, so its field is the
/// plain slice form.
fn params_struct(func: &Func, info: &UnitInfo) -> String {
    if func.params.is_empty() {
        return "struct{}".to_string();
    }
    let fields: Vec<String> = func
        .params
        .iter()
        .map(|param| {
            let prefix = if param.variadic { "[]" } else { "" };
            format!(
                "{} {}{}",
                field_name(param, info),
                prefix,
                type_string(&param.ty, info)
            )
        })
        .collect();
    format!("struct{{ {} }}", fields.join("; "))
}

fn params_struct_values(func: &Func, info: &UnitInfo) -> String {
    let values: Vec<String> = func
        .params
        .iter()
        .map(|param| {
            format!(
                "{}: {}",
                field_name(param, info),
                escape_ident(&param.name, &info.deps)
            )
        })
        .collect();
    values.join(", ")
}

fn param_names(func: &Func, info: &UnitInfo) -> String {
    let names: Vec<String> = func
        .params
        .iter()
        .map(|param| {
            let name = escape_ident(&param.name, &info.deps);
            if param.variadic {
                format!("{}...", name)
            } else {
                name
            }
        })
        .collect();
    names.join(", ")
}

fn field_name(param: &Var, info: &UnitInfo) -> String {
    escape_ident(&publicize(&param.name), &info.deps)
}

// ── Type rendering ───────────────────────────────────────────

/// Render a resolved type as Go source, qualifying own-package names with
/// the input package identifier when the output is external.
pub fn type_string(ty: &ResolvedType, info: &UnitInfo) -> String {
    match ty {
        ResolvedType::Named {
            package,
            name,
            local,
        } => match package {
            Some(pkg) => format!("{}.{}", pkg.ident, name),
            None if *local && info.external => format!("{}.{}", info.input_name, name),
            None => name.clone(),
        },
        ResolvedType::Pointer(inner) => format!("*{}", type_string(inner, info)),
        ResolvedType::Slice(inner) => format!("[]{}", type_string(inner, info)),
        ResolvedType::Array { len, elem } => format!("[{}]{}", len, type_string(elem, info)),
        ResolvedType::Map { key, value } => format!(
            "map[{}]{}",
            type_string(key, info),
            type_string(value, info)
        ),
        ResolvedType::Chan { dir, elem } => match dir {
            ChanDir::Recv => format!("<-chan {}", type_string(elem, info)),
            ChanDir::Send => format!("chan<- {}", type_string(elem, info)),
            ChanDir::Both => {
                // `chan <-chan T` would re-parse as `chan<- chan T`.
                if matches!(elem.as_ref(), ResolvedType::Chan { dir: ChanDir::Recv, .. }) {
                    format!("chan ({})", type_string(elem, info))
                } else {
                    format!("chan {}", type_string(elem, info))
                }
            }
        },
        ResolvedType::Func { params, results } => {
            let params: Vec<String> = params
                .iter()
                .map(|param| inner_var_string(param, info))
                .collect();
            let rendered_results = inner_results_string(results, info);
            if rendered_results.is_empty() {
                format!("func({})", params.join(", "))
            } else {
                format!("func({}) {}", params.join(", "), rendered_results)
            }
        }
        ResolvedType::EmptyInterface => "interface{}".to_string(),
    }
}

/// A parameter inside a function *type*: names are part of the type syntax
/// only and bind nothing, so they render untouched.
fn inner_var_string(var: &ResolvedVar, info: &UnitInfo) -> String {
    let marker = if var.variadic { "..." } else { "" };
    match &var.name {
        Some(name) => format!("{} {}{}", name, marker, type_string(&var.ty, info)),
        None => format!("{}{}", marker, type_string(&var.ty, info)),
    }
}

fn inner_results_string(results: &[ResolvedVar], info: &UnitInfo) -> String {
    if results.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = results
        .iter()
        .map(|result| inner_var_string(result, info))
        .collect();
    if results.len() > 1 || results[0].name.is_some() {
        format!("({})", parts.join(", "))
    } else {
        parts.join(", ")
    }
}
