use crate::format::Passthrough;
use crate::generate;
use crate::model::UnitInput;
use crate::tests::unit_from;
use pretty_assertions::assert_eq;

fn generated(src: &str, include: &[String]) -> String {
    let outputs = generate(
        vec![UnitInput {
            unit: unit_from(src),
            output_package: None,
        }],
        include,
        &[],
        &Passthrough,
    )
    .unwrap();
    assert_eq!(outputs.len(), 1);
    outputs[0].source.clone()
}

#[test]
fn test_account_scenario() {
    let src = r#"package bank

type Writer interface {
	Write(p []byte) (int, error)
}

type Account interface {
	Balance() int
	Summarize(w Writer)
}
"#;
    let expected = r#"// Code generated by stubgen; DO NOT EDIT.

//go:build !nostubs
// +build !nostubs

package bank

// StubbedAccount is a stubbed implementation of Account.
type StubbedAccount struct {
	// BalanceStub defines the implementation for Balance.
	BalanceStub func() int
	balanceCalls []struct{}
	// SummarizeStub defines the implementation for Summarize.
	SummarizeStub func(w Writer)
	summarizeCalls []struct{ W Writer }
}

// Balance delegates its behavior to the field BalanceStub.
func (s *StubbedAccount) Balance() int {
	if s.BalanceStub == nil {
		panic("StubbedAccount.Balance: nil method stub")
	}
	s.balanceCalls = append(s.balanceCalls, struct{}{})
	return (s.BalanceStub)()
}

// BalanceCalls returns a slice of calls made to Balance. Each element
// of the slice represents the parameters that were provided.
func (s *StubbedAccount) BalanceCalls() []struct{} {
	return s.balanceCalls
}

// Summarize delegates its behavior to the field SummarizeStub.
func (s *StubbedAccount) Summarize(w Writer) {
	if s.SummarizeStub == nil {
		panic("StubbedAccount.Summarize: nil method stub")
	}
	s.summarizeCalls = append(s.summarizeCalls, struct{ W Writer }{W: w})
	(s.SummarizeStub)(w)
}

// SummarizeCalls returns a slice of calls made to Summarize. Each element
// of the slice represents the parameters that were provided.
func (s *StubbedAccount) SummarizeCalls() []struct{ W Writer } {
	return s.summarizeCalls
}

// Compile-time check that the implementation matches the interface.
var _ Account = (*StubbedAccount)(nil)
"#;
    assert_eq!(generated(src, &["Account".to_string()]), expected);
}

#[test]
fn test_variadic_method() {
    let src = r#"package pkg

import "database/sql"

type SessionManager interface {
	Deactivate(db *sql.DB, userIds ...int64)
}
"#;
    let out = generated(src, &[]);

    assert!(out.contains("import (\n\t\"database/sql\"\n)\n"));
    assert!(out.contains("DeactivateStub func(db *sql.DB, userIds ...int64)"));
    // The call record captures the variadic list as a plain slice.
    assert!(out.contains("deactivateCalls []struct{ Db *sql.DB; UserIds []int64 }"));
    assert!(out.contains(
        "append(s.deactivateCalls, struct{ Db *sql.DB; UserIds []int64 }{Db: db, UserIds: userIds})"
    ));
    // Delegation re-expands the slice.
    assert!(out.contains("(s.DeactivateStub)(db, userIds...)"));
}

#[test]
fn test_zero_parameter_call_record() {
    let out = generated("package p\n\ntype Pinger interface {\n\tPing()\n}\n", &[]);
    assert!(out.contains("pingCalls []struct{}"));
    assert!(out.contains("append(s.pingCalls, struct{}{})"));
    assert!(out.contains("\t(s.PingStub)()\n"));
    assert!(!out.contains("return (s.PingStub)"));
}

#[test]
fn test_synthesized_parameter_names_flow_through() {
    let out = generated(
        "package p\n\ntype H interface {\n\tHandle(string, int) error\n}\n",
        &[],
    );
    assert!(out.contains("HandleStub func(arg0 string, arg1 int) error"));
    assert!(out.contains("handleCalls []struct{ Arg0 string; Arg1 int }"));
    assert!(out.contains("{Arg0: arg0, Arg1: arg1}"));
    assert!(out.contains("return (s.HandleStub)(arg0, arg1)"));
}

#[test]
fn test_parameter_shadowing_an_import_is_escaped() {
    let src = r#"package p

import "database/sql"

type Q interface {
	Exec(sql string, db *sql.DB) error
}
"#;
    let out = generated(src, &[]);
    assert!(out.contains("ExecStub func(_sql string, db *sql.DB) error"));
    assert!(out.contains("execCalls []struct{ Sql string; Db *sql.DB }"));
    assert!(out.contains("{Sql: _sql, Db: db}"));
    assert!(out.contains("return (s.ExecStub)(_sql, db)"));
}

#[test]
fn test_named_results_render_parenthesized() {
    let out = generated(
        "package p\n\ntype R interface {\n\tRead(p []byte) (n int, err error)\n}\n",
        &[],
    );
    assert!(out.contains("ReadStub func(p []byte) (n int, err error)"));
    assert!(out.contains("func (s *StubbedR) Read(p []byte) (n int, err error) {"));
}

#[test]
fn test_single_named_result_is_parenthesized() {
    let out = generated(
        "package p\n\ntype C interface {\n\tCount() (n int)\n}\n",
        &[],
    );
    assert!(out.contains("CountStub func() (n int)"));
}

#[test]
fn test_external_mode_qualifies_own_package_references() {
    let src = r#"package bank

type Writer interface {
	Write(p []byte) (int, error)
}

type Account interface {
	Summarize(w Writer)
}
"#;
    let mut unit = unit_from(src);
    unit.import_path = Some("example.com/mod/bank".to_string());
    let outputs = generate(
        vec![UnitInput {
            unit,
            output_package: Some("bankstubs".to_string()),
        }],
        &["Account".to_string()],
        &[],
        &Passthrough,
    )
    .unwrap();
    let out = &outputs[0].source;

    assert!(out.contains("package bankstubs"));
    assert!(out.contains("import (\n\t\"example.com/mod/bank\"\n)\n"));
    // The bare interface name serves as the stub name in external mode.
    assert!(out.contains("// Account is a stubbed implementation of bank.Account."));
    assert!(out.contains("type Account struct {"));
    assert!(out.contains("SummarizeStub func(w bank.Writer)"));
    assert!(out.contains("var _ bank.Account = (*Account)(nil)"));
}

#[test]
fn test_interface_and_alias_like_types_render() {
    let src = r#"package p

import "context"

type Store interface {
	Fetch(ctx context.Context, keys map[string][8]byte) (chan (<-chan int), func(prefix string) bool)
}
"#;
    let out = generated(src, &[]);
    assert!(out.contains("keys map[string][8]byte"));
    // A receive-direction element needs parentheses to survive re-parsing.
    assert!(out.contains("(chan (<-chan int), func(prefix string) bool)"));
}

#[test]
fn test_empty_interface_parameter() {
    let out = generated(
        "package p\n\ntype L interface {\n\tLog(values ...interface{})\n}\n",
        &[],
    );
    assert!(out.contains("LogStub func(values ...interface{})"));
    assert!(out.contains("logCalls []struct{ Values []interface{} }"));
}

#[test]
fn test_unit_file_name() {
    let outputs = generate(
        vec![UnitInput {
            unit: unit_from("package bank\n\ntype A interface{}\n"),
            output_package: None,
        }],
        &[],
        &[],
        &Passthrough,
    )
    .unwrap();
    assert_eq!(outputs[0].file_name, "bank_stubs.go");
    assert_eq!(outputs[0].unit_name, "bank");
}

#[test]
fn test_empty_stub_for_zero_method_interface() {
    let out = generated("package p\n\ntype Marker interface{}\n", &[]);
    assert!(out.contains("// StubbedMarker is a stubbed implementation of Marker.\ntype StubbedMarker struct {\n}\n"));
    assert!(out.contains("var _ Marker = (*StubbedMarker)(nil)"));
}
