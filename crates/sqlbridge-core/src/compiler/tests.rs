use super::context::CompileContext;
use super::{
    compile_expr, compile_expression, compile_query, compile_query_with_options, CompileOptions,
};
use crate::error::CompileError;
use crate::ir::{
    Expr, FunctionCall, FunctionRef, Literal, Projection, Relation, SelectQuery, SortSpec,
};
use crate::sqlast;

fn count_star() -> FunctionCall {
    FunctionCall::new(FunctionRef::aggregate("count", "count"), Vec::new())
}

fn sum_of(column: &str) -> FunctionCall {
    FunctionCall::new(
        FunctionRef::aggregate("sum", "sum"),
        vec![Expr::column(column)],
    )
}

fn unwrap_func_call(expr: sqlast::Expr) -> sqlast::FuncCall {
    match expr {
        sqlast::Expr::FuncCall(call) => call,
        other => panic!("expected a function call, got {other:?}"),
    }
}

#[test]
fn scalar_call_compiles_args_in_order() {
    let call = FunctionCall::new(
        FunctionRef::scalar("concat", "concat"),
        vec![Expr::column("a"), Expr::column("b"), Expr::column("c")],
    );
    let compiled = unwrap_func_call(compile_expression(&Expr::FunctionCall(call)).unwrap());

    assert_eq!(compiled.name, "concat");
    let names: Vec<_> = compiled
        .args
        .iter()
        .map(|arg| match arg {
            sqlast::Expr::ColumnRef(col) => col.name.as_str(),
            other => panic!("expected a column ref, got {other:?}"),
        })
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert!(compiled.agg_order.is_empty());
    assert!(compiled.over.is_none());
}

#[test]
fn zero_argument_call() {
    let compiled = unwrap_func_call(compile_expression(&Expr::FunctionCall(count_star())).unwrap());
    assert!(compiled.args.is_empty());
    assert!(compiled.agg_order.is_empty());
    assert!(compiled.agg_filter.is_none());
    assert!(compiled.over.is_none());
}

#[test]
fn plain_aggregate_keeps_order_on_the_call() {
    let call = sum_of("amount").with_order_by(vec![
        SortSpec::descending(Expr::column("ts")),
        SortSpec::ascending(Expr::column("id")),
    ]);
    let compiled = unwrap_func_call(compile_expression(&Expr::FunctionCall(call)).unwrap());

    assert!(compiled.over.is_none());
    assert_eq!(compiled.agg_order.len(), 2);
    assert_eq!(compiled.agg_order[0].direction, sqlast::SortDirection::Desc);
    assert_eq!(compiled.agg_order[1].direction, sqlast::SortDirection::Asc);
}

#[test]
fn windowed_call_moves_order_into_the_window() {
    let call = sum_of("amount")
        .with_order_by(vec![SortSpec::ascending(Expr::column("ts"))])
        .with_partition_by(vec![Expr::column("region"), Expr::column("city")])
        .over_window();
    let compiled = unwrap_func_call(compile_expression(&Expr::FunctionCall(call)).unwrap());

    assert!(compiled.agg_order.is_empty());
    let over = compiled.over.expect("window definition");
    assert_eq!(over.order_by.len(), 1);
    let partitions: Vec<_> = over
        .partition
        .iter()
        .map(|p| match p {
            sqlast::Expr::ColumnRef(col) => col.name.as_str(),
            other => panic!("expected a column ref, got {other:?}"),
        })
        .collect();
    assert_eq!(partitions, ["region", "city"]);
}

#[test]
fn window_without_aggregate_gets_over_clause() {
    let call = FunctionCall::new(FunctionRef::scalar("row_number", "row_number"), Vec::new())
        .with_order_by(vec![SortSpec::ascending(Expr::column("id"))])
        .over_window();
    let compiled = unwrap_func_call(compile_expression(&Expr::FunctionCall(call)).unwrap());

    assert!(compiled.agg_order.is_empty());
    assert!(compiled.over.is_some());
}

#[test]
fn aggregate_filter_compiles_inside_the_aggregate_scope() {
    let call = sum_of("amount").with_filter(Expr::binary(
        crate::ir::BinaryOp::Gt,
        Expr::column("amount"),
        Expr::integer(0),
    ));
    let compiled = unwrap_func_call(compile_expression(&Expr::FunctionCall(call)).unwrap());
    assert!(compiled.agg_filter.is_some());
}

#[test]
fn unsupported_function_names_the_display_name() {
    let call = FunctionCall::new(FunctionRef::unmapped("std::fancy"), vec![Expr::integer(1)]);
    let err = compile_expression(&Expr::FunctionCall(call)).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnsupportedFunction {
            name: "std::fancy".into()
        }
    );
}

#[test]
fn unsupported_function_fails_before_assembly_even_with_clauses() {
    let call = FunctionCall::new(FunctionRef::unmapped("std::fancy").as_aggregate(), Vec::new())
        .with_order_by(vec![SortSpec::ascending(Expr::column("x"))])
        .over_window();
    let err = compile_expression(&Expr::FunctionCall(call)).unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedFunction { .. }));
}

#[test]
fn aggregate_scope_is_closed_before_sibling_compilation() {
    let mut ctx = CompileContext::new();
    let options = CompileOptions::default();

    let aggregate = Expr::FunctionCall(sum_of("amount"));
    compile_expr(&mut ctx, &options, &aggregate, 0).unwrap();
    assert!(
        !ctx.in_aggregate_arg(),
        "aggregate scope leaked past the call"
    );

    // A sibling non-aggregate call compiles with a clean scope.
    let sibling = Expr::FunctionCall(FunctionCall::new(
        FunctionRef::scalar("lower", "lower"),
        vec![Expr::column("name")],
    ));
    compile_expr(&mut ctx, &options, &sibling, 0).unwrap();
    assert!(!ctx.in_aggregate_arg());
}

#[test]
fn aggregate_marks_the_query_and_the_mark_persists() {
    let mut ctx = CompileContext::new();
    let options = CompileOptions::default();
    assert!(!ctx.query_has_aggregates());

    let aggregate = Expr::FunctionCall(count_star());
    compile_expr(&mut ctx, &options, &aggregate, 0).unwrap();
    assert!(
        ctx.query_has_aggregates(),
        "aggregates flag must persist after the call's scope is popped"
    );
}

#[test]
fn nested_aggregate_is_rejected() {
    let inner = Expr::FunctionCall(count_star());
    let outer = Expr::FunctionCall(FunctionCall::new(
        FunctionRef::aggregate("sum", "sum"),
        vec![inner],
    ));
    let err = compile_expression(&outer).unwrap_err();
    assert!(matches!(err, CompileError::Malformed(_)));
}

#[test]
fn aggregate_inside_scalar_sibling_is_fine() {
    // lower(count()) is resolver-legal: the aggregate is not directly inside
    // another aggregate's argument list.
    let call = Expr::FunctionCall(FunctionCall::new(
        FunctionRef::scalar("lower", "lower"),
        vec![Expr::FunctionCall(count_star())],
    ));
    compile_expression(&call).unwrap();
}

#[test]
fn failure_inside_aggregate_args_unwinds_the_scope() {
    let mut ctx = CompileContext::new();
    let options = CompileOptions::default();

    let call = Expr::FunctionCall(FunctionCall::new(
        FunctionRef::aggregate("sum", "sum"),
        vec![Expr::FunctionCall(FunctionCall::new(
            FunctionRef::unmapped("std::fancy"),
            Vec::new(),
        ))],
    ));
    let err = compile_expr(&mut ctx, &options, &call, 0).unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedFunction { .. }));
    assert!(!ctx.in_aggregate_arg(), "scope leaked on the failure path");
}

#[test]
fn depth_limit_is_a_compile_error() {
    let mut deep = Expr::integer(1);
    for _ in 0..256 {
        deep = Expr::Unary {
            op: crate::ir::UnaryOp::Minus,
            operand: Box::new(deep),
        };
    }
    let err = compile_expression(&deep).unwrap_err();
    assert_eq!(
        err,
        CompileError::TooDeeplyNested {
            limit: super::DEFAULT_MAX_DEPTH
        }
    );
}

#[test]
fn depth_limit_is_configurable() {
    let options = CompileOptions { max_depth: 4 };
    let mut deep = Expr::integer(1);
    for _ in 0..8 {
        deep = Expr::Unary {
            op: crate::ir::UnaryOp::Minus,
            operand: Box::new(deep),
        };
    }
    let err = super::compile_expression_with_options(&deep, &options).unwrap_err();
    assert_eq!(err, CompileError::TooDeeplyNested { limit: 4 });
}

#[test]
fn case_with_no_branches_is_malformed() {
    let case = Expr::Case {
        subject: None,
        branches: Vec::new(),
        otherwise: Some(Box::new(Expr::integer(1))),
    };
    let err = compile_expression(&case).unwrap_err();
    assert!(matches!(err, CompileError::Malformed(_)));
}

#[test]
fn empty_projection_is_malformed() {
    let query = SelectQuery::projecting(Vec::new());
    let err = compile_query(&query).unwrap_err();
    assert!(matches!(err, CompileError::Malformed(_)));
}

#[test]
fn query_level_aggregate_flag_lands_on_the_statement() {
    let query = SelectQuery::projecting(vec![Expr::FunctionCall(count_star())])
        .with_from(Relation::named("orders"));
    let stmt = compile_query(&query).unwrap();
    assert!(stmt.aggregates);
}

#[test]
fn subquery_aggregates_do_not_mark_the_outer_query() {
    let inner = SelectQuery::projecting(vec![Expr::FunctionCall(count_star())])
        .with_from(Relation::named("orders"));
    let outer = SelectQuery {
        projection: vec![
            Projection::unnamed(Expr::column("id")),
            Projection::named(
                Expr::Subquery {
                    query: Box::new(inner),
                },
                "order_count",
            ),
        ],
        from: Some(Relation::named("users")),
        filter: None,
        group_by: Vec::new(),
        having: None,
        order_by: Vec::new(),
        limit: None,
        offset: None,
    };

    let stmt = compile_query(&outer).unwrap();
    assert!(!stmt.aggregates, "inner aggregates leaked to the outer query");

    let sqlast::Expr::SubLink(sqlast::SubLink::Scalar { query }) = &stmt.targets[1].expr else {
        panic!("expected a scalar sublink");
    };
    assert!(query.aggregates);
}

#[test]
fn projection_order_and_labels() {
    let query = SelectQuery {
        projection: vec![
            Projection::unnamed(Expr::column("id")),
            Projection::named(Expr::FunctionCall(sum_of("total")), "grand_total"),
            Projection::unnamed(Expr::integer(42)),
        ],
        from: Some(Relation::named("orders")),
        filter: None,
        group_by: vec![Expr::column("id")],
        having: None,
        order_by: vec![SortSpec::descending(Expr::column("id"))],
        limit: Some(10),
        offset: None,
    };
    let stmt = compile_query(&query).unwrap();

    assert_eq!(stmt.targets.len(), 3);
    assert_eq!(stmt.targets[0].name, None);
    assert_eq!(stmt.targets[1].name.as_deref(), Some("grand_total"));
    assert_eq!(stmt.targets[2].name.as_deref(), Some("column3"));
    assert_eq!(stmt.group_by.len(), 1);
    assert_eq!(stmt.order_by.len(), 1);
    assert_eq!(
        stmt.limit,
        Some(sqlast::Expr::Literal(sqlast::Literal::Integer(10)))
    );
}

#[test]
fn literal_kinds_map_verbatim() {
    for (input, expected) in [
        (Literal::Null, sqlast::Literal::Null),
        (Literal::Boolean(true), sqlast::Literal::Boolean(true)),
        (Literal::Integer(-7), sqlast::Literal::Integer(-7)),
        (
            Literal::String("it's".into()),
            sqlast::Literal::String("it's".into()),
        ),
    ] {
        let compiled = compile_expression(&Expr::Literal { value: input }).unwrap();
        assert_eq!(compiled, sqlast::Expr::Literal(expected));
    }
}

#[test]
fn exists_compiles_to_a_sublink() {
    let inner = SelectQuery::projecting(vec![Expr::integer(1)])
        .with_from(Relation::named("orders"))
        .with_filter(Expr::binary(
            crate::ir::BinaryOp::Eq,
            Expr::qualified_column("orders", "user_id"),
            Expr::qualified_column("users", "id"),
        ));
    let exists = Expr::Exists {
        query: Box::new(inner),
        negated: true,
    };
    let compiled = compile_expression(&exists).unwrap();
    let sqlast::Expr::SubLink(sqlast::SubLink::Exists { negated, .. }) = compiled else {
        panic!("expected an EXISTS sublink");
    };
    assert!(negated);
}

#[test]
fn options_are_honored_through_query_compilation() {
    let options = CompileOptions { max_depth: 2 };
    let query = SelectQuery::projecting(vec![Expr::Unary {
        op: crate::ir::UnaryOp::Minus,
        operand: Box::new(Expr::Unary {
            op: crate::ir::UnaryOp::Minus,
            operand: Box::new(Expr::Unary {
                op: crate::ir::UnaryOp::Minus,
                operand: Box::new(Expr::integer(1)),
            }),
        }),
    }]);
    let err = compile_query_with_options(&query, &options).unwrap_err();
    assert!(matches!(err, CompileError::TooDeeplyNested { .. }));
}
