mod test_emit;
mod test_format;
mod test_generate;
mod test_naming;

use crate::model::UnitInput;
use stubgen_resolver::ResolvedUnit;

/// Resolve one in-memory source file as an input unit.
pub(crate) fn unit_from(src: &str) -> ResolvedUnit {
    ResolvedUnit::from_sources(vec![("input.go".to_string(), src.to_string())]).unwrap()
}

pub(crate) fn input_from(src: &str) -> UnitInput {
    UnitInput {
        unit: unit_from(src),
        output_package: None,
    }
}
