//! Stub naming and collision resolution
//!
//! Runs once over the complete model, after every unit has been modeled and
//! before any unit is emitted: a later unit's duplicate name can force a
//! rename of an earlier unit's stub, so the pass must see everything first.
//! Order inside the pass: defaults, then explicit rename directives, then
//! run-wide dedup.

use crate::error::{CodegenError, CodegenResult};
use crate::model::Model;
use indexmap::IndexMap;
use std::collections::HashMap;

/// The token prefixed onto an interface name to form the default stub name.
pub const STUB_PREFIX: &str = "Stubbed";

/// One `old=new` rename directive, keyed by qualified default stub name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDirective {
    pub target: String,
    pub replacement: String,
}

impl RenameDirective {
    /// Parse `pkg.StubbedName=NewName`.
    pub fn parse(directive: &str) -> CodegenResult<Self> {
        let invalid = || CodegenError::InvalidRename {
            directive: directive.to_string(),
        };
        let (target, replacement) = directive.split_once('=').ok_or_else(invalid)?;
        let (target, replacement) = (target.trim(), replacement.trim());
        if target.is_empty() || replacement.is_empty() || !target.contains('.') {
            return Err(invalid());
        }
        Ok(RenameDirective {
            target: target.to_string(),
            replacement: replacement.to_string(),
        })
    }
}

/// Assign every stub its final name. Defaults first, explicit renames next
/// (these always win), then the dedup pass: any stub name appearing more
/// than once across the whole run gets its owning unit's public name
/// prefixed onto every occurrence.
pub fn apply_naming(model: &mut Model, renames: &[RenameDirective]) -> CodegenResult<()> {
    // Defaults. A stub generated next to its interface needs a distinct
    // name; a stub in another package can reuse the bare interface name.
    for unit in &mut model.units {
        for iface in &mut unit.interfaces {
            iface.stub_name = if unit.info.external {
                iface.name.clone()
            } else {
                format!("{}{}", STUB_PREFIX, iface.name)
            };
        }
    }

    for rename in renames {
        let mut matched = false;
        for unit in &mut model.units {
            for iface in &mut unit.interfaces {
                let qualified = format!("{}.{}", unit.info.input_name, iface.stub_name);
                if qualified == rename.target {
                    iface.stub_name = rename.replacement.clone();
                    matched = true;
                }
            }
        }
        if !matched {
            return Err(CodegenError::UnknownRename {
                target: rename.target.clone(),
            });
        }
    }

    // Count every stub name across all units, then qualify all occurrences
    // of any name seen twice - not just the duplicates.
    let mut counts: HashMap<String, usize> = HashMap::new();
    for unit in &model.units {
        for iface in &unit.interfaces {
            *counts.entry(iface.stub_name.clone()).or_insert(0) += 1;
        }
    }
    for unit in &mut model.units {
        for iface in &mut unit.interfaces {
            if counts[&iface.stub_name] > 1 {
                iface.stub_name =
                    format!("{}{}", publicize(&unit.info.input_name), iface.stub_name);
            }
        }
    }

    Ok(())
}

/// Capitalize the first character, Go-export style.
pub fn publicize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lowercase the first character, for unexported field names.
pub fn privatize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Escape an identifier that would shadow an imported package identifier by
/// prepending underscores until it no longer collides.
pub fn escape_ident(name: &str, deps: &IndexMap<String, String>) -> String {
    let mut escaped = name.to_string();
    while deps.contains_key(&escaped) {
        escaped.insert(0, '_');
    }
    escaped
}
