use crate::format::{ImportNormalizer, Passthrough, SourceFormatter};
use pretty_assertions::assert_eq;

#[test]
fn test_passthrough_formatter() {
    let src = "package p\n\nfunc F() {}\n";
    assert_eq!(Passthrough.format("p_stubs.go", src).unwrap(), src);
}

#[test]
fn test_imports_are_sorted_and_deduped() {
    let src = r#"package p

import (
	"io"
	"database/sql"
	"io"
)

var _ = io.Discard
var _ = sql.ErrNoRows
"#;
    let out = ImportNormalizer.format("p_stubs.go", src).unwrap();
    assert!(out.contains("import (\n\t\"database/sql\"\n\t\"io\"\n)\n"));
    assert_eq!(out.matches("\"io\"").count(), 1);
}

#[test]
fn test_unused_import_is_pruned() {
    let src = r#"package p

import (
	"io"
	"time"
)

var _ = io.Discard
"#;
    let out = ImportNormalizer.format("p_stubs.go", src).unwrap();
    assert!(!out.contains("time"));
    assert!(out.contains("\"io\""));
}

#[test]
fn test_emptied_import_block_disappears() {
    let src = "package p\n\nimport (\n\t\"time\"\n)\n\nvar x = 1\n";
    let out = ImportNormalizer.format("p_stubs.go", src).unwrap();
    assert_eq!(out, "package p\n\nvar x = 1\n");
}

#[test]
fn test_aliased_import_is_preserved() {
    let src = r#"package p

import (
	stdio "io"
)

var _ = stdio.Discard
"#;
    let out = ImportNormalizer.format("p_stubs.go", src).unwrap();
    assert!(out.contains("\tstdio \"io\"\n"));
}

#[test]
fn test_qualifier_matching_ignores_longer_identifiers() {
    // `stdio.` must not count as a use of `io.`.
    let src = "package p\n\nimport (\n\t\"io\"\n)\n\nvar _ = stdio.Discard\n";
    let out = ImportNormalizer.format("p_stubs.go", src).unwrap();
    assert!(!out.contains("\"io\""));
}

#[test]
fn test_unbalanced_source_fails() {
    let src = "package p\n\nfunc F() {\n";
    let err = ImportNormalizer.format("p_stubs.go", src).unwrap_err();
    assert!(err.contains("unbalanced"));
}

#[test]
fn test_braces_in_strings_do_not_affect_balance() {
    let src = "package p\n\nfunc F() string {\n\treturn \"}}}\"\n}\n";
    assert!(ImportNormalizer.format("p_stubs.go", src).is_ok());
}

#[test]
fn test_whitespace_tidying() {
    let src = "package p\t\n\n\n\nvar x = 1   \n\n\n";
    let out = ImportNormalizer.format("p_stubs.go", src).unwrap();
    assert_eq!(out, "package p\n\nvar x = 1\n");
}

#[test]
fn test_formatting_is_idempotent() {
    let src = r#"package p

import (
	"database/sql"
	"io"
)

var _ = io.Discard
var _ = sql.ErrNoRows
"#;
    let once = ImportNormalizer.format("p_stubs.go", src).unwrap();
    let twice = ImportNormalizer.format("p_stubs.go", &once).unwrap();
    assert_eq!(once, twice);
}
