//! Lowering rules for function, aggregate and window calls, exercised
//! through the public API.

use rstest::rstest;
use sqlbridge_core::ir::{Expr, FunctionCall, FunctionRef, NullsOrder, SortSpec};
use sqlbridge_core::{compile_expression, sqlast, CompileError};

fn compile_call(call: FunctionCall) -> sqlast::FuncCall {
    match compile_expression(&Expr::FunctionCall(call)).unwrap() {
        sqlast::Expr::FuncCall(node) => node,
        other => panic!("expected a function call, got {other:?}"),
    }
}

fn column_names(exprs: &[sqlast::Expr]) -> Vec<&str> {
    exprs
        .iter()
        .map(|expr| match expr {
            sqlast::Expr::ColumnRef(col) => col.name.as_str(),
            other => panic!("expected a column ref, got {other:?}"),
        })
        .collect()
}

fn sort_columns(keys: &[sqlast::SortBy]) -> Vec<&str> {
    keys.iter()
        .map(|key| match &key.expr {
            sqlast::Expr::ColumnRef(col) => col.name.as_str(),
            other => panic!("expected a column ref, got {other:?}"),
        })
        .collect()
}

/// Ordering belongs to exactly one of the call and its window.
fn assert_exclusive_ordering(node: &sqlast::FuncCall) {
    if node.over.is_some() {
        assert!(
            node.agg_order.is_empty(),
            "agg_order and a window must not coexist"
        );
    }
}

#[test]
fn window_routing_sends_ordering_and_partitions_to_the_window() {
    let call = FunctionCall::new(
        FunctionRef::aggregate("array_agg", "array_agg"),
        vec![Expr::column("val")],
    )
    .with_order_by(vec![
        SortSpec::ascending(Expr::column("first_key")),
        SortSpec::descending(Expr::column("second_key")).with_nulls(NullsOrder::First),
    ])
    .with_partition_by(vec![Expr::column("p1"), Expr::column("p2")])
    .over_window();

    let node = compile_call(call);
    assert_exclusive_ordering(&node);

    assert!(node.agg_order.is_empty());
    let over = node.over.as_ref().expect("window definition");
    assert_eq!(sort_columns(&over.order_by), ["first_key", "second_key"]);
    assert_eq!(
        over.order_by[1].nulls,
        Some(sqlast::NullsOrder::First),
        "null ordering must be carried verbatim"
    );
    assert_eq!(column_names(&over.partition), ["p1", "p2"]);
}

#[test]
fn plain_aggregate_routing_keeps_ordering_on_the_call() {
    let call = FunctionCall::new(
        FunctionRef::aggregate("string_agg", "string_agg"),
        vec![Expr::column("name"), Expr::string(", ")],
    )
    .with_order_by(vec![SortSpec::ascending(Expr::column("name"))]);

    let node = compile_call(call);
    assert_exclusive_ordering(&node);

    assert!(node.over.is_none());
    assert_eq!(sort_columns(&node.agg_order), ["name"]);
}

#[test]
fn argument_order_is_preserved() {
    let call = FunctionCall::new(
        FunctionRef::scalar("coalesce", "coalesce"),
        vec![Expr::column("a"), Expr::column("b"), Expr::column("c")],
    );
    let node = compile_call(call);
    assert_eq!(column_names(&node.args), ["a", "b", "c"]);
}

#[test]
fn zero_argument_call_compiles_to_an_empty_node() {
    let node = compile_call(FunctionCall::new(
        FunctionRef::aggregate("count", "count"),
        Vec::new(),
    ));
    assert!(node.args.is_empty());
    assert!(node.agg_order.is_empty());
    assert!(node.agg_filter.is_none());
    assert!(node.over.is_none());
}

#[test]
fn sort_specs_on_a_scalar_call_are_still_lowered() {
    // The resolver should have rejected this, but the compiler accepts the
    // shape and lowers the sort specs as ordinary expressions.
    let call = FunctionCall::new(FunctionRef::scalar("lower", "lower"), vec![Expr::column("x")])
        .with_order_by(vec![SortSpec::ascending(Expr::column("y"))]);
    let node = compile_call(call);
    assert_eq!(sort_columns(&node.agg_order), ["y"]);
    assert!(node.over.is_none());
}

#[rstest]
#[case::scalar(false, false)]
#[case::scalar_window(false, true)]
#[case::aggregate(true, false)]
#[case::windowed_aggregate(true, true)]
fn unmapped_function_fails_in_every_shape(#[case] aggregate: bool, #[case] window: bool) {
    let mut function = FunctionRef::unmapped("ext::custom");
    function.aggregate = aggregate;
    let mut call = FunctionCall::new(function, vec![Expr::column("x")]);
    call.window = window;

    let err = compile_expression(&Expr::FunctionCall(call)).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnsupportedFunction {
            name: "ext::custom".into()
        }
    );
}

#[rstest]
#[case::no_filter(None)]
#[case::with_filter(Some(Expr::binary(
    sqlbridge_core::ir::BinaryOp::Gt,
    Expr::column("amount"),
    Expr::integer(100),
)))]
fn filter_compiles_only_when_present(#[case] filter: Option<Expr>) {
    let mut call = FunctionCall::new(
        FunctionRef::aggregate("sum", "sum"),
        vec![Expr::column("amount")],
    );
    let expect_filter = filter.is_some();
    if let Some(filter) = filter {
        call = call.with_filter(filter);
    }

    let node = compile_call(call);
    assert_eq!(node.agg_filter.is_some(), expect_filter);
}

#[test]
fn windowed_aggregate_with_filter_keeps_filter_outside_the_window() {
    let call = FunctionCall::new(
        FunctionRef::aggregate("count", "count"),
        vec![Expr::column("id")],
    )
    .with_filter(Expr::IsNull {
        operand: Box::new(Expr::column("deleted_at")),
        negated: true,
    })
    .with_partition_by(vec![Expr::column("region")])
    .over_window();

    let node = compile_call(call);
    assert!(node.agg_filter.is_some());
    let over = node.over.expect("window definition");
    assert_eq!(column_names(&over.partition), ["region"]);
    assert!(over.order_by.is_empty());
}
