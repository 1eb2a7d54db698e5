use crate::error::CodegenError;
use crate::format::{ImportNormalizer, SourceFormatter};
use crate::generate;
use crate::model::UnitInput;
use crate::naming::RenameDirective;
use crate::tests::unit_from;

struct FailingFormatter;

impl SourceFormatter for FailingFormatter {
    fn format(&self, file_name: &str, _source: &str) -> Result<String, String> {
        Err(format!("{}: synthetic failure", file_name))
    }
}

fn bank_and_ledger() -> Vec<UnitInput> {
    vec![
        UnitInput {
            unit: unit_from("package bank\n\ntype Account interface {\n\tBalance() int\n}\n"),
            output_package: None,
        },
        UnitInput {
            unit: unit_from("package ledger\n\ntype Account interface {\n\tPost(amount int)\n}\n"),
            output_package: None,
        },
    ]
}

#[test]
fn test_cross_unit_collision_end_to_end() {
    let outputs = generate(bank_and_ledger(), &[], &[], &ImportNormalizer).unwrap();
    assert_eq!(outputs.len(), 2);

    assert!(outputs[0].source.contains("type BankStubbedAccount struct"));
    assert!(outputs[0]
        .source
        .contains("var _ Account = (*BankStubbedAccount)(nil)"));
    assert!(outputs[1].source.contains("type LedgerStubbedAccount struct"));
}

#[test]
fn test_rename_end_to_end() {
    let rename = RenameDirective::parse("bank.StubbedAccount=FakeAccount").unwrap();
    let outputs = generate(bank_and_ledger(), &[], &[rename], &ImportNormalizer).unwrap();

    assert!(outputs[0].source.contains("type FakeAccount struct"));
    // The untouched unit keeps the plain default once the collision is gone.
    assert!(outputs[1].source.contains("type StubbedAccount struct"));
}

#[test]
fn test_unit_without_surviving_interfaces_produces_no_output() {
    let outputs = generate(bank_and_ledger(), &["Missing".to_string()], &[], &ImportNormalizer)
        .unwrap();
    assert!(outputs.is_empty());
}

#[test]
fn test_format_failure_surfaces_unformatted_source() {
    let err = generate(bank_and_ledger(), &[], &[], &FailingFormatter).unwrap_err();
    match err {
        CodegenError::Format {
            unit, unformatted, ..
        } => {
            assert_eq!(unit, "bank");
            assert!(unformatted.contains("type BankStubbedAccount struct"));
        }
        other => panic!("expected format error, got {:?}", other),
    }
}

#[test]
fn test_default_formatter_keeps_emitted_imports() {
    let src = r#"package pkg

import "database/sql"

type SessionManager interface {
	GetUserID(db *sql.DB, username string) (int64, error)
}
"#;
    let outputs = generate(
        vec![UnitInput {
            unit: unit_from(src),
            output_package: None,
        }],
        &[],
        &[],
        &ImportNormalizer,
    )
    .unwrap();
    let out = &outputs[0].source;
    assert!(out.contains("import (\n\t\"database/sql\"\n)\n"));
    assert!(out.contains("GetUserIDStub func(db *sql.DB, username string) (int64, error)"));
    assert!(out.contains("getUserIDCalls []struct{ Db *sql.DB; Username string }"));
}
