// tests/parser_tests.rs

use filterql::ast::{ClauseValue, Connective, Literal, Node, Operator, Token};
use filterql::lexer::tokenize;
use filterql::parse_to_query;
use filterql::parser::{MAX_NESTING_DEPTH, ParseError, Parser, parse};

fn parse_str(input: &str) -> Result<Node, ParseError> {
    let tokens = tokenize(input).unwrap();
    parse(&tokens, 0)
}

fn eq(field: &str, n: i64) -> Node {
    Node::clause(field, Operator::Eq, ClauseValue::Literal(Literal::Integer(n)))
}

fn and(children: Vec<Node>) -> Node {
    Node::Group {
        op: Connective::And,
        children,
    }
}

fn or(children: Vec<Node>) -> Node {
    Node::Group {
        op: Connective::Or,
        children,
    }
}

fn not(node: Node) -> Node {
    Node::Not(Box::new(node))
}

/// Every group has two or more children and no same-op group directly inside.
fn assert_condensed(node: &Node) {
    match node {
        Node::Clause { .. } => {}
        Node::Not(inner) => assert_condensed(inner),
        Node::Group { op, children } => {
            assert!(children.len() >= 2, "group with {} child(ren)", children.len());
            for child in children {
                if let Node::Group { op: child_op, .. } = child {
                    assert_ne!(child_op, op, "same-op group nested in {:?}", node);
                }
                assert_condensed(child);
            }
        }
    }
}

// ============================================================================
// Clauses
// ============================================================================

#[test]
fn test_single_clause() {
    assert_eq!(parse_str("a == 5").unwrap(), eq("a", 5));
}

#[test]
fn test_every_operator() {
    let test_cases = vec![
        ("==", Operator::Eq),
        ("!=", Operator::Ne),
        ("<", Operator::Lt),
        ("<=", Operator::Lte),
        (">", Operator::Gt),
        (">=", Operator::Gte),
        ("~", Operator::Regex),
    ];

    for (symbol, expected) in test_cases {
        let node = parse_str(&format!("x {} 1", symbol)).unwrap();
        assert!(
            matches!(node, Node::Clause { op, .. } if op == expected),
            "Failed for operator: {}",
            symbol
        );
    }
}

#[test]
fn test_in_with_list() {
    let node = parse_str("role in ['admin', 'root']").unwrap();
    assert_eq!(
        node,
        Node::clause(
            "role",
            Operator::In,
            ClauseValue::List(vec![
                Literal::String("admin".into()),
                Literal::String("root".into()),
            ])
        )
    );
}

#[test]
fn test_not_in_with_list() {
    let node = parse_str("a.b.c not-in [1,2,3]").unwrap();
    assert!(matches!(
        node,
        Node::Clause { op: Operator::NotIn, value: ClauseValue::List(ref items), .. } if items.len() == 3
    ));
}

#[test]
fn test_empty_list() {
    let node = parse_str("tags in []").unwrap();
    assert_eq!(node, Node::clause("tags", Operator::In, ClauseValue::List(vec![])));
}

#[test]
fn test_list_with_other_operator_is_kept() {
    let node = parse_str("a == [1, 2]").unwrap();
    assert!(matches!(
        node,
        Node::Clause { op: Operator::Eq, value: ClauseValue::List(_), .. }
    ));
}

#[test]
fn test_scalar_value_with_in_parses() {
    // Rejected later by the converter
    let node = parse_str("a.b.c in 5").unwrap();
    assert!(matches!(
        node,
        Node::Clause { op: Operator::In, value: ClauseValue::Literal(Literal::Integer(5)), .. }
    ));
}

// ============================================================================
// Precedence and Condensation
// ============================================================================

#[test]
fn test_and_chain_is_flattened() {
    let node = parse_str("a == 1 and b == 2 and c == 3").unwrap();
    assert_eq!(node, and(vec![eq("a", 1), eq("b", 2), eq("c", 3)]));
}

#[test]
fn test_or_chain_is_flattened() {
    let node = parse_str("a == 1 or b == 2 || c == 3").unwrap();
    assert_eq!(node, or(vec![eq("a", 1), eq("b", 2), eq("c", 3)]));
}

#[test]
fn test_and_binds_tighter_than_or() {
    let node = parse_str("A == 5 and B == 6 or C == -7 and d == 8 or e == 10").unwrap();
    assert_eq!(
        node,
        or(vec![
            and(vec![eq("A", 5), eq("B", 6)]),
            and(vec![eq("C", -7), eq("d", 8)]),
            eq("e", 10),
        ])
    );
}

#[test]
fn test_or_then_and() {
    let node = parse_str("a == 1 or b == 2 and c == 3").unwrap();
    assert_eq!(node, or(vec![eq("a", 1), and(vec![eq("b", 2), eq("c", 3)])]));
}

#[test]
fn test_parentheses_override_precedence() {
    let node = parse_str("a == 1 and (b == 2 or c == 3)").unwrap();
    assert_eq!(node, and(vec![eq("a", 1), or(vec![eq("b", 2), eq("c", 3)])]));
}

#[test]
fn test_redundant_parentheses_are_flattened() {
    assert_eq!(
        parse_str("(a == 1 and b == 2) and c == 3").unwrap(),
        and(vec![eq("a", 1), eq("b", 2), eq("c", 3)])
    );
    assert_eq!(
        parse_str("a == 1 and (b == 2 and c == 3)").unwrap(),
        and(vec![eq("a", 1), eq("b", 2), eq("c", 3)])
    );
    assert_eq!(
        parse_str("a == 1 or (b == 2 or c == 3)").unwrap(),
        or(vec![eq("a", 1), eq("b", 2), eq("c", 3)])
    );
}

#[test]
fn test_nested_parentheses() {
    assert_eq!(parse_str("((a == 1))").unwrap(), eq("a", 1));
    assert_eq!(
        parse_str("(a == 1 or b == 2) and (c == 3 or d == 4)").unwrap(),
        and(vec![
            or(vec![eq("a", 1), eq("b", 2)]),
            or(vec![eq("c", 3), eq("d", 4)]),
        ])
    );
}

#[test]
fn test_mixed_connective_symbols() {
    assert_eq!(
        parse_str("a == 1 && b == 2 or c == 3").unwrap(),
        parse_str("a == 1 and b == 2 || c == 3").unwrap()
    );
}

// ============================================================================
// Negation
// ============================================================================

#[test]
fn test_not_binds_to_next_clause() {
    assert_eq!(
        parse_str("A == 5 and NOT B == 6").unwrap(),
        and(vec![eq("A", 5), not(eq("B", 6))])
    );
    assert_eq!(
        parse_str("not a == 1 and b == 2").unwrap(),
        and(vec![not(eq("a", 1)), eq("b", 2)])
    );
}

#[test]
fn test_not_group() {
    assert_eq!(
        parse_str("!(a == 1 or b == 2) and c == 3").unwrap(),
        and(vec![not(or(vec![eq("a", 1), eq("b", 2)])), eq("c", 3)])
    );
}

#[test]
fn test_double_negation() {
    assert_eq!(
        parse_str("a == 1 and not not b == 2").unwrap(),
        and(vec![eq("a", 1), not(not(eq("b", 2)))])
    );
}

#[test]
fn test_not_before_list_clause() {
    assert!(matches!(
        parse_str("not role in ['x']").unwrap(),
        Node::Not(inner) if matches!(*inner, Node::Clause { op: Operator::In, .. })
    ));
}

// ============================================================================
// Start Position
// ============================================================================

#[test]
fn test_parse_from_position() {
    let tokens = tokenize("a == 1 and b == 2").unwrap();
    assert_eq!(parse(&tokens, 4).unwrap(), eq("b", 2));
    assert_eq!(Parser::with_position(&tokens, 0).parse().unwrap(), and(vec![eq("a", 1), eq("b", 2)]));
}

#[test]
fn test_parse_past_end_is_empty() {
    let tokens = tokenize("a == 1").unwrap();
    assert_eq!(parse(&tokens, 3), Err(ParseError::EmptyExpression));
    assert_eq!(parse(&tokens, 10), Err(ParseError::EmptyExpression));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_expression() {
    assert_eq!(parse_str(""), Err(ParseError::EmptyExpression));
}

#[test]
fn test_stray_comma() {
    assert_eq!(parse_str("a == 1, b == 2"), Err(ParseError::StrayComma { index: 3 }));
}

#[test]
fn test_unexpected_closing_bracket() {
    assert!(matches!(
        parse_str("a == 1 ]"),
        Err(ParseError::UnexpectedToken { index: 3, .. })
    ));
}

#[test]
fn test_unbalanced_groups() {
    assert_eq!(parse_str("a == 1)"), Err(ParseError::UnbalancedGroup { index: 3 }));
    assert_eq!(parse_str("((a == 1)"), Err(ParseError::UnclosedGroup { depth: 1 }));
}

#[test]
fn test_empty_group() {
    assert_eq!(parse_str("()"), Err(ParseError::EmptyGroup { index: 1 }));
}

#[test]
fn test_unclosed_array() {
    assert_eq!(parse_str("a in [1, 2"), Err(ParseError::UnclosedArray { index: 2 }));
}

#[test]
fn test_malformed_arrays() {
    let test_cases = vec![
        ("a in [[1]]", 3),  // nested array
        ("a in [1,]", 5),   // trailing comma
        ("a in [1 2]", 4),  // missing comma
        ("a in [,1]", 3),   // leading comma
        ("a in [1,,2]", 5), // doubled comma
        ("a in [b]", 3),    // identifier element
        ("a in [(1)]", 3),  // grouping inside array
    ];

    for (input, index) in test_cases {
        match parse_str(input) {
            Err(ParseError::UnexpectedToken { index: at, .. }) => {
                assert_eq!(at, index, "Wrong index for input: {}", input)
            }
            other => panic!("Expected UnexpectedToken for {}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_identifier_in_value_slot() {
    let err = parse_str("a == b").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            index: 2,
            found: "identifier `b`".to_string()
        }
    );
}

#[test]
fn test_group_in_value_slot() {
    assert!(matches!(
        parse_str("a == (b == 1)"),
        Err(ParseError::UnexpectedToken { index: 2, .. })
    ));
}

#[test]
fn test_dangling_connective() {
    assert_eq!(
        parse_str("a == 1 and"),
        Err(ParseError::Incomplete {
            index: 3,
            found: "boolean `and`".to_string()
        })
    );
    assert!(matches!(
        parse_str("or a == 1"),
        Err(ParseError::Incomplete { index: 0, .. })
    ));
    assert!(matches!(parse_str("not"), Err(ParseError::Incomplete { .. })));
}

#[test]
fn test_literal_on_left_is_incomplete() {
    assert!(matches!(
        parse_str("5 == a"),
        Err(ParseError::Incomplete { index: 0, .. })
    ));
}

#[test]
fn test_missing_connective_is_ambiguous() {
    assert_eq!(parse_str("a == 1 b == 2"), Err(ParseError::Ambiguous { roots: 2 }));
    assert_eq!(
        parse_str("(a == 1) (b == 2) (c == 3)"),
        Err(ParseError::Ambiguous { roots: 3 })
    );
}

#[test]
fn test_unknown_operator() {
    let tokens = vec![
        Token::Identifier("a".to_string()),
        Token::Operator("=~".to_string()),
        Token::Literal(Literal::Integer(1)),
    ];
    assert_eq!(
        parse(&tokens, 0),
        Err(ParseError::UnknownOperator {
            index: 1,
            symbol: "=~".to_string()
        })
    );
}

#[test]
fn test_nesting_limit() {
    let deepest = format!(
        "{}a == 1{}",
        "(".repeat(MAX_NESTING_DEPTH),
        ")".repeat(MAX_NESTING_DEPTH)
    );
    assert_eq!(parse_str(&deepest).unwrap(), eq("a", 1));

    let too_deep = format!(
        "{}a == 1{}",
        "(".repeat(MAX_NESTING_DEPTH + 1),
        ")".repeat(MAX_NESTING_DEPTH + 1)
    );
    assert_eq!(
        parse_str(&too_deep),
        Err(ParseError::TooDeep {
            index: MAX_NESTING_DEPTH
        })
    );
}

#[test]
fn test_negation_chain_limit() {
    let deepest = format!("{}a == 1", "!".repeat(MAX_NESTING_DEPTH));
    assert_eq!(parse_str(&deepest).unwrap().depth(), MAX_NESTING_DEPTH + 1);

    let long_chain = format!("{}a == 1", "!".repeat(10_000));
    assert_eq!(
        parse_str(&long_chain),
        Err(ParseError::TooDeep {
            index: MAX_NESTING_DEPTH
        })
    );
    assert!(parse_to_query(&long_chain).is_err());
}

#[test]
fn test_negations_and_groups_share_limit() {
    let half = MAX_NESTING_DEPTH / 2;
    let deepest = format!("{}a == 1{}", "!(".repeat(half), ")".repeat(half));
    assert!(parse_str(&deepest).is_ok());

    let too_deep = format!("{}a == 1{}", "!(".repeat(half + 1), ")".repeat(half + 1));
    assert_eq!(
        parse_str(&too_deep),
        Err(ParseError::TooDeep {
            index: MAX_NESTING_DEPTH
        })
    );
}

#[test]
fn test_absorbed_negations_do_not_count() {
    let query = (0..200)
        .map(|i| format!("not f{} == {}", i, i))
        .collect::<Vec<_>>()
        .join(" and ");
    let Node::Group { op, children } = parse_str(&query).unwrap() else {
        panic!("expected a group");
    };
    assert_eq!(op, Connective::And);
    assert_eq!(children.len(), 200);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        parse_str("a == 1, b == 2").unwrap_err().to_string(),
        "Unexpected ',' at index 3 outside an array literal"
    );
    assert_eq!(
        parse_str("a == 1 b == 2").unwrap_err().to_string(),
        "Ambiguous expression: 2 top-level expressions are not joined by 'and' or 'or'"
    );
}

// ============================================================================
// Tree Shape
// ============================================================================

#[test]
fn test_condensation_invariant() {
    let queries = vec![
        "a == 1 and b == 2 and c == 3 or d == 4 or e == 5",
        "(a == 1 or b == 2) or (c == 3 or (d == 4 or e == 5))",
        "((a == 1 and b == 2) and c == 3) and (d == 4 and e == 5)",
        "not (a == 1 and (b == 2 and c == 3)) or (d == 4 or e == 5) and f == 6",
        "a == 1 and (b == 2 or (c == 3 and (d == 4 or e == 5)))",
    ];

    for query in queries {
        let node = parse_str(query).unwrap();
        assert_condensed(&node);
    }
}

#[test]
fn test_display_round_trip() {
    let queries = vec![
        "A == 5 and B == 6 or C == -7 and d == 8 or e == 10",
        "a == 1 and (b == 2 or c == 3)",
        "not (a == 1 or b == 2) and not c != 'x'",
        "user.role in ['admin', 'root'] && (user.address.state == 'VA' || user.address.city == 'Springfield')",
        "name ~ /^jo\\/hn/i or score >= -6.2 or ok == true or gone == null",
        "w == 6.0 and note == 'it\\'s'",
        "tags not-in []",
        "a == 99999999999999999999",
        "a == 0.0000001 or b < 0.000000000000000000000015",
        "a == -123456789012345678901234.5",
    ];

    for query in queries {
        let node = parse_str(query).unwrap();
        let rendered = node.to_string();
        assert_eq!(
            parse_str(&rendered).unwrap(),
            node,
            "Round trip changed {:?} (rendered as {:?})",
            query,
            rendered
        );
    }
}

#[test]
fn test_display_canonical_text() {
    assert_eq!(
        parse_str("A==5&&!B==6||(c in[1,2])").unwrap().to_string(),
        "A == 5 and not B == 6 or c in [1, 2]"
    );
}
