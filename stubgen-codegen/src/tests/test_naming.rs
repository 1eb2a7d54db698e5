use crate::error::CodegenError;
use crate::model::{build_model, Model, UnitInput};
use crate::naming::{apply_naming, escape_ident, privatize, publicize, RenameDirective};
use crate::tests::unit_from;
use indexmap::IndexMap;

fn two_bank_units() -> Model {
    let account = "package bank\n\ntype Account interface {\n\tBalance() int\n}\n";
    let ledger = "package ledger\n\ntype Account interface {\n\tPost(amount int)\n}\n";
    build_model(
        vec![
            UnitInput {
                unit: unit_from(account),
                output_package: None,
            },
            UnitInput {
                unit: unit_from(ledger),
                output_package: None,
            },
        ],
        &[],
    )
    .unwrap()
}

fn stub_names(model: &Model) -> Vec<String> {
    model
        .units
        .iter()
        .flat_map(|u| u.interfaces.iter().map(|i| i.stub_name.clone()))
        .collect()
}

#[test]
fn test_default_stub_name_is_prefixed() {
    let mut model = build_model(
        vec![UnitInput {
            unit: unit_from("package bank\n\ntype Account interface{}\n"),
            output_package: None,
        }],
        &[],
    )
    .unwrap();
    apply_naming(&mut model, &[]).unwrap();
    assert_eq!(stub_names(&model), vec!["StubbedAccount"]);
}

#[test]
fn test_colliding_stub_names_are_qualified_on_both_sides() {
    let mut model = two_bank_units();
    apply_naming(&mut model, &[]).unwrap();
    assert_eq!(
        stub_names(&model),
        vec!["BankStubbedAccount", "LedgerStubbedAccount"]
    );
}

#[test]
fn test_rename_affects_only_its_target() {
    let mut model = two_bank_units();
    let rename = RenameDirective::parse("bank.StubbedAccount=FakeAccount").unwrap();
    apply_naming(&mut model, &[rename]).unwrap();
    // After the rename there is no collision left, so the other unit keeps
    // its plain default.
    assert_eq!(stub_names(&model), vec!["FakeAccount", "StubbedAccount"]);
}

#[test]
fn test_rename_that_reintroduces_collision_is_still_qualified() {
    let mut model = two_bank_units();
    let rename = RenameDirective::parse("bank.StubbedAccount=SharedName").unwrap();
    apply_naming(&mut model, &[rename]).unwrap();
    assert_eq!(stub_names(&model), vec!["SharedName", "StubbedAccount"]);

    let mut model = two_bank_units();
    let renames = [
        RenameDirective::parse("bank.StubbedAccount=SharedName").unwrap(),
        RenameDirective::parse("ledger.StubbedAccount=SharedName").unwrap(),
    ];
    apply_naming(&mut model, &renames).unwrap();
    assert_eq!(
        stub_names(&model),
        vec!["BankSharedName", "LedgerSharedName"]
    );
}

#[test]
fn test_unknown_rename_target_fails() {
    let mut model = two_bank_units();
    let rename = RenameDirective::parse("bank.StubbedMissing=X").unwrap();
    let err = apply_naming(&mut model, &[rename]).unwrap_err();
    assert!(matches!(err, CodegenError::UnknownRename { .. }));
}

#[test]
fn test_rename_directive_parsing() {
    let ok = RenameDirective::parse("bank.StubbedAccount=FakeAccount").unwrap();
    assert_eq!(ok.target, "bank.StubbedAccount");
    assert_eq!(ok.replacement, "FakeAccount");

    for bad in ["", "no-equals", "=X", "bank.Stubbed=", "NoDot=X"] {
        assert!(
            RenameDirective::parse(bad).is_err(),
            "{:?} should be rejected",
            bad
        );
    }
}

#[test]
fn test_external_stub_reuses_bare_interface_name() {
    let mut unit = unit_from("package bank\n\ntype Account interface{}\n");
    unit.import_path = Some("example.com/mod/bank".to_string());
    let mut model = build_model(
        vec![UnitInput {
            unit,
            output_package: Some("stubs".to_string()),
        }],
        &[],
    )
    .unwrap();
    apply_naming(&mut model, &[]).unwrap();
    assert_eq!(stub_names(&model), vec!["Account"]);
}

#[test]
fn test_publicize_and_privatize() {
    assert_eq!(publicize("db"), "Db");
    assert_eq!(publicize("userIds"), "UserIds");
    assert_eq!(publicize("_w"), "_w");
    assert_eq!(privatize("Balance"), "balance");
    assert_eq!(privatize("URL"), "uRL");
}

#[test]
fn test_escape_ident_prepends_underscores_until_unique() {
    let mut deps = IndexMap::new();
    deps.insert("sql".to_string(), "database/sql".to_string());
    deps.insert("_sql".to_string(), "other/sql".to_string());

    assert_eq!(escape_ident("sql", &deps), "__sql");
    assert_eq!(escape_ident("io", &deps), "io");
}
