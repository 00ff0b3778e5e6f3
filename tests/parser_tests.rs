// tests/parser_tests.rs

use staffql::ast::{AggregateFn, CompareOp, Comparison, FilterExpr, Statement, TokenKind, Value};
use staffql::lexer::{LexError, Position};
use staffql::parser::{ParseError, parse};

fn single(script: &str) -> Statement {
    let program = parse(script).unwrap();
    assert_eq!(program.len(), 1, "expected one statement in {script:?}");
    program.statements.into_iter().next().unwrap()
}

fn filter_expr(script: &str) -> FilterExpr {
    match single(script) {
        Statement::Filter(expr) => expr,
        other => panic!("Expected filter statement, got {:?}", other),
    }
}

fn leaf(column: &str, op: CompareOp, value: Value) -> FilterExpr {
    FilterExpr::Comparison(Comparison::new(column, op, value))
}

fn and(left: FilterExpr, right: FilterExpr) -> FilterExpr {
    FilterExpr::And(Box::new(left), Box::new(right))
}

fn or(left: FilterExpr, right: FilterExpr) -> FilterExpr {
    FilterExpr::Or(Box::new(left), Box::new(right))
}

// ============================================================================
// Simple statements
// ============================================================================

#[test]
fn test_load() {
    assert_eq!(
        single(r#"load "empleados.csv";"#),
        Statement::Load {
            path: "empleados.csv".into()
        }
    );
}

#[test]
fn test_print() {
    assert_eq!(single("print;"), Statement::Print);
}

#[test]
fn test_aggregate_functions() {
    let cases = [
        ("count", AggregateFn::Count),
        ("sum", AggregateFn::Sum),
        ("average", AggregateFn::Average),
    ];
    for (word, function) in cases {
        let script = format!(r#"aggregate {word} column "salario";"#);
        assert_eq!(
            single(&script),
            Statement::Aggregate {
                function,
                column: "salario".into()
            }
        );
    }
}

#[test]
fn test_sort_directions() {
    assert_eq!(
        single(r#"sort column "salary" asc;"#),
        Statement::Sort {
            column: "salary".into(),
            ascending: true
        }
    );
    assert_eq!(
        single(r#"sort column "salary" desc;"#),
        Statement::Sort {
            column: "salary".into(),
            ascending: false
        }
    );
}

#[test]
fn test_program_keeps_statement_order() {
    let program = parse(
        r#"
        load "a.csv";
        filter column "age" > 25;
        aggregate count column "id";
        sort column "age" desc;
        print;
        "#,
    )
    .unwrap();

    let keywords: Vec<_> = program.iter().map(Statement::keyword).collect();
    assert_eq!(keywords, ["load", "filter", "aggregate", "sort", "print"]);
}

// ============================================================================
// Filter values
// ============================================================================

#[test]
fn test_filter_number_and_string_values() {
    assert_eq!(
        filter_expr(r#"filter column "age" >= 25;"#),
        leaf("age", CompareOp::GreaterEqual, Value::Number(25.0))
    );
    assert_eq!(
        filter_expr(r#"filter column "department" != "Legal";"#),
        leaf("department", CompareOp::NotEqual, Value::Text("Legal".into()))
    );
}

#[test]
fn test_every_operator() {
    let cases = [
        (">", CompareOp::GreaterThan),
        ("<", CompareOp::LessThan),
        (">=", CompareOp::GreaterEqual),
        ("<=", CompareOp::LessEqual),
        ("==", CompareOp::Equal),
        ("!=", CompareOp::NotEqual),
    ];
    for (symbol, op) in cases {
        let script = format!(r#"filter column "x" {symbol} 1;"#);
        assert_eq!(filter_expr(&script), leaf("x", op, Value::Number(1.0)));
    }
}

#[test]
fn test_between_range() {
    assert_eq!(
        filter_expr(r#"filter column "x" between 10 and 20;"#),
        leaf("x", CompareOp::Between, Value::Range { min: 10.0, max: 20.0 })
    );
}

#[test]
fn test_range_followed_by_connective() {
    assert_eq!(
        filter_expr(r#"filter column "x" between 10 and 20 and column "y" == "a";"#),
        and(
            leaf("x", CompareOp::Between, Value::Range { min: 10.0, max: 20.0 }),
            leaf("y", CompareOp::Equal, Value::Text("a".into())),
        )
    );
}

#[test]
fn test_mismatched_operator_value_still_parses() {
    // Checked when the filter runs, not here
    assert_eq!(
        filter_expr(r#"filter column "x" > 1 and 5;"#),
        leaf("x", CompareOp::GreaterThan, Value::Range { min: 1.0, max: 5.0 })
    );
    assert_eq!(
        filter_expr(r#"filter column "x" between 3;"#),
        leaf("x", CompareOp::Between, Value::Number(3.0))
    );
}

// ============================================================================
// Connective precedence
// ============================================================================

#[test]
fn test_and_binds_tighter_than_or() {
    let expr = filter_expr(r#"filter column "a" > 1 and column "b" < 2 or column "c" == 3;"#);
    assert_eq!(
        expr,
        or(
            and(
                leaf("a", CompareOp::GreaterThan, Value::Number(1.0)),
                leaf("b", CompareOp::LessThan, Value::Number(2.0)),
            ),
            leaf("c", CompareOp::Equal, Value::Number(3.0)),
        )
    );
}

#[test]
fn test_or_then_and() {
    let expr = filter_expr(r#"filter column "a" > 1 or column "b" < 2 and column "c" == 3;"#);
    assert_eq!(
        expr,
        or(
            leaf("a", CompareOp::GreaterThan, Value::Number(1.0)),
            and(
                leaf("b", CompareOp::LessThan, Value::Number(2.0)),
                leaf("c", CompareOp::Equal, Value::Number(3.0)),
            ),
        )
    );
}

#[test]
fn test_connectives_are_left_associative() {
    let a = || leaf("a", CompareOp::Equal, Value::Number(1.0));
    let b = || leaf("b", CompareOp::Equal, Value::Number(2.0));
    let c = || leaf("c", CompareOp::Equal, Value::Number(3.0));

    assert_eq!(
        filter_expr(r#"filter column "a" == 1 or column "b" == 2 or column "c" == 3;"#),
        or(or(a(), b()), c())
    );
    assert_eq!(
        filter_expr(r#"filter column "a" == 1 and column "b" == 2 and column "c" == 3;"#),
        and(and(a(), b()), c())
    );
}

#[test]
fn test_repeated_filter_keyword_after_connective() {
    let with_keyword =
        filter_expr(r#"filter column "a" > 1 and filter column "b" < 2 or filter column "c" == 3;"#);
    let without_keyword =
        filter_expr(r#"filter column "a" > 1 and column "b" < 2 or column "c" == 3;"#);
    assert_eq!(with_keyword, without_keyword);
}

#[test]
fn test_long_chain_leaves_in_order() {
    let mut script = String::from("filter column \"c0\" > 0");
    for i in 1..200 {
        let connective = if i % 3 == 0 { "or" } else { "and" };
        script.push_str(&format!(" {connective} column \"c{i}\" > {i}"));
    }
    script.push(';');

    let expr = filter_expr(&script);
    let columns: Vec<_> = expr.leaves().iter().map(|c| c.column.clone()).collect();
    let expected: Vec<_> = (0..200).map(|i| format!("c{i}")).collect();
    assert_eq!(columns, expected);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_program() {
    assert_eq!(parse(""), Err(ParseError::EmptyProgram));
    assert_eq!(parse("  // only a comment\n"), Err(ParseError::EmptyProgram));
}

#[test]
fn test_unknown_statement_start() {
    match parse(r#"column "x";"#) {
        Err(ParseError::Unexpected {
            found,
            expected,
            position,
        }) => {
            assert_eq!(found, "'column'");
            assert_eq!(
                expected,
                vec![
                    TokenKind::Load,
                    TokenKind::Filter,
                    TokenKind::Aggregate,
                    TokenKind::Sort,
                    TokenKind::Print,
                ]
            );
            assert_eq!(position, Position { line: 1, column: 1 });
        }
        other => panic!("Expected Unexpected, got {:?}", other),
    }
}

#[test]
fn test_missing_semicolon() {
    match parse("print") {
        Err(ParseError::Unexpected { found, expected, .. }) => {
            assert_eq!(found, "end of input");
            assert_eq!(expected, vec![TokenKind::Semicolon]);
        }
        other => panic!("Expected Unexpected, got {:?}", other),
    }
}

#[test]
fn test_unterminated_filter_lists_connectives() {
    match parse(r#"filter column "a" > 1 print;"#) {
        Err(ParseError::Unexpected { found, expected, .. }) => {
            assert_eq!(found, "'print'");
            assert_eq!(
                expected,
                vec![TokenKind::Semicolon, TokenKind::And, TokenKind::Or]
            );
        }
        other => panic!("Expected Unexpected, got {:?}", other),
    }
}

#[test]
fn test_semicolon_only_at_end_of_chain() {
    let result = parse(r#"filter column "a" > 1; and column "b" < 2;"#);
    assert!(matches!(result, Err(ParseError::Unexpected { .. })));
}

#[test]
fn test_missing_operator_lists_operators() {
    match parse(r#"filter column "a" 5;"#) {
        Err(ParseError::Unexpected { expected, .. }) => {
            assert_eq!(expected.len(), 7);
            assert!(expected.contains(&TokenKind::Between));
        }
        other => panic!("Expected Unexpected, got {:?}", other),
    }
}

#[test]
fn test_missing_sort_direction() {
    match parse(r#"sort column "a";"#) {
        Err(ParseError::Unexpected { expected, .. }) => {
            assert_eq!(expected, vec![TokenKind::Asc, TokenKind::Desc]);
        }
        other => panic!("Expected Unexpected, got {:?}", other),
    }
}

#[test]
fn test_lex_error_aborts_parse() {
    assert!(matches!(
        parse("print;\nprint; $"),
        Err(ParseError::Lex(LexError::UnexpectedChar { ch: '$', .. }))
    ));
}

#[test]
fn test_error_message_names_expectations() {
    let err = parse(r#"aggregate median column "x";"#).unwrap_err();
    // 'median' is not a keyword, so the lexer rejects it first
    assert!(matches!(err, ParseError::Lex(LexError::UnknownWord { .. })));

    let err = parse(r#"aggregate column "x";"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected 'column' at line 1, column 11; expected one of 'count', 'sum', 'average'"
    );
}
