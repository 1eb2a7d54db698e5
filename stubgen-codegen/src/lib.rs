//! Stub generation core for stubgen
//!
//! The pipeline over resolved units: extract the requested interfaces,
//! model their signatures, resolve stub naming across the whole run, and
//! emit one Go source text per input unit. Everything is a single
//! synchronous pass; the naming step deliberately sees every unit before
//! any unit is emitted, because a later unit's duplicate stub name forces a
//! rename of an earlier one.

pub mod emit;
pub mod error;
pub mod format;
pub mod model;
pub mod naming;

pub use emit::{emit_unit, output_file_name};
pub use error::*;
pub use format::{ImportNormalizer, Passthrough, SourceFormatter};
pub use model::{build_model, Model, UnitInput, UnitModel};
pub use naming::{apply_naming, RenameDirective, STUB_PREFIX};

/// One finished output unit.
#[derive(Debug)]
pub struct GeneratedUnit {
    /// Input package name.
    pub unit_name: String,
    /// File name the output collaborator should write, `<unit>_stubs.go`.
    pub file_name: String,
    /// Formatted Go source.
    pub source: String,
}

/// Run the whole generation pipeline: model every input unit, apply the
/// run-wide naming pass, then render and format each unit. Units in which
/// no interface survives extraction produce no output. The first error
/// aborts the run with nothing produced.
pub fn generate(
    inputs: Vec<UnitInput>,
    include: &[String],
    renames: &[RenameDirective],
    formatter: &dyn SourceFormatter,
) -> CodegenResult<Vec<GeneratedUnit>> {
    let mut model = build_model(inputs, include)?;
    apply_naming(&mut model, renames)?;

    let mut outputs = Vec::new();
    for unit in &model.units {
        if unit.interfaces.is_empty() {
            continue;
        }
        let rendered = emit_unit(unit)?;
        let file_name = output_file_name(&unit.info.input_name);
        let source = formatter
            .format(&file_name, &rendered)
            .map_err(|message| CodegenError::Format {
                unit: unit.info.input_name.clone(),
                message,
                unformatted: rendered.clone(),
            })?;
        outputs.push(GeneratedUnit {
            unit_name: unit.info.input_name.clone(),
            file_name,
            source,
        });
    }
    Ok(outputs)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests;
