use thistle::{
    ast::{Color, Number, StringPart, Value},
    BinaryOp, ListSeparator, QuoteKind, UnaryOp,
};


use macros::parse_value;

#[test]
fn numbers_with_units() {
    assert_eq!(parse_value("12px"), Value::Number(Number::new(12.0, "px")));
    assert_eq!(parse_value(".5"), Value::Number(Number::new(0.5, "")));
    assert_eq!(parse_value("50%"), Value::Number(Number::new(50.0, "%")));
}

#[test]
fn zero_and_zero_px_are_distinct() {
    assert_ne!(parse_value("0"), parse_value("0px"));
}

#[test]
fn hex_colors() {
    assert_eq!(
        parse_value("#102030"),
        Value::Color(Color { r: 16, g: 32, b: 48 })
    );
    // each nibble of the short form expands to a full byte
    assert_eq!(
        parse_value("#fff"),
        Value::Color(Color { r: 255, g: 255, b: 255 })
    );
    assert_eq!(
        parse_value("#a1b"),
        Value::Color(Color { r: 0xaa, g: 0x11, b: 0xbb })
    );
}

#[test]
fn null_keyword_is_case_sensitive() {
    assert_eq!(parse_value("null"), Value::Null);
    assert_eq!(parse_value("Null"), Value::Keyword("Null".to_owned()));
}

#[test]
fn important_is_a_keyword() {
    let value = parse_value("red !important");
    match value {
        Value::List(list) => {
            assert_eq!(list.items[1], Value::Keyword("!important".to_owned()));
        }
        value => panic!("expected a list, got {:?}", value),
    }
}

#[test]
fn quoted_string_with_interpolation() {
    match parse_value("\"a#{$b}c\"") {
        Value::String(string) => {
            assert_eq!(string.quote, QuoteKind::Double);
            assert_eq!(string.parts.len(), 3);
            assert_eq!(string.parts[0], StringPart::Text("a".to_owned()));
            match &string.parts[1] {
                StringPart::Interpolation(inter) => {
                    assert_eq!(inter.value, Value::Variable("b".to_owned()));
                    // adjacency flags are not recorded inside string bodies
                    assert!(!inter.left_ws);
                    assert!(!inter.right_ws);
                }
                part => panic!("expected interpolation, got {:?}", part),
            }
            assert_eq!(string.parts[2], StringPart::Text("c".to_owned()));
        }
        value => panic!("expected a string, got {:?}", value),
    }
}

#[test]
fn escaped_quote_in_string() {
    match parse_value("\"a\\\"b\"") {
        Value::String(string) => {
            assert_eq!(
                string.parts,
                vec![
                    StringPart::Text("a".to_owned()),
                    StringPart::Text("\\\"".to_owned()),
                    StringPart::Text("b".to_owned()),
                ]
            );
        }
        value => panic!("expected a string, got {:?}", value),
    }
}

#[test]
fn space_and_comma_lists() {
    match parse_value("1px 2px 3px") {
        Value::List(list) => {
            assert_eq!(list.separator, ListSeparator::Space);
            assert_eq!(list.items.len(), 3);
        }
        value => panic!("expected a list, got {:?}", value),
    }
    match parse_value("1px, 2px") {
        Value::List(list) => {
            assert_eq!(list.separator, ListSeparator::Comma);
            assert_eq!(list.items.len(), 2);
        }
        value => panic!("expected a list, got {:?}", value),
    }
}

#[test]
fn single_item_lists_flatten() {
    assert_eq!(parse_value("1px"), Value::Number(Number::new(1.0, "px")));
}

#[test]
fn parenthesized_list_and_empty_list() {
    match parse_value("(1, 2, 3)") {
        Value::List(list) => {
            assert_eq!(list.separator, ListSeparator::Comma);
            assert_eq!(list.items.len(), 3);
        }
        value => panic!("expected a list, got {:?}", value),
    }
    match parse_value("()") {
        Value::List(list) => {
            assert_eq!(list.separator, ListSeparator::Undecided);
            assert!(list.items.is_empty());
        }
        value => panic!("expected a list, got {:?}", value),
    }
}

#[test]
fn map_preserves_insertion_order() {
    match parse_value("(a: 1, b: 2)") {
        Value::Map(map) => {
            assert_eq!(map.entries.len(), 2);
            assert_eq!(map.entries[0].0, Value::Keyword("a".to_owned()));
            assert_eq!(map.entries[0].1, Value::Number(Number::new(1.0, "")));
            assert_eq!(map.entries[1].0, Value::Keyword("b".to_owned()));
        }
        value => panic!("expected a map, got {:?}", value),
    }
}

#[test]
fn bare_parenthesized_values_are_not_maps() {
    assert!(matches!(parse_value("(a, b, c)"), Value::List(..)));
    assert!(matches!(parse_value("(1 + 2)"), Value::BinaryOp(..)));
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    match parse_value("1 + 2 * 3") {
        Value::BinaryOp(op) => {
            assert_eq!(op.op, BinaryOp::Plus);
            assert_eq!(op.lhs, Value::Number(Number::new(1.0, "")));
            match &op.rhs {
                Value::BinaryOp(rhs) => assert_eq!(rhs.op, BinaryOp::Mul),
                rhs => panic!("expected a product, got {:?}", rhs),
            }
        }
        value => panic!("expected a sum, got {:?}", value),
    }
    match parse_value("2 * 3 + 1") {
        Value::BinaryOp(op) => {
            assert_eq!(op.op, BinaryOp::Plus);
            assert!(matches!(&op.lhs, Value::BinaryOp(lhs) if lhs.op == BinaryOp::Mul));
        }
        value => panic!("expected a sum, got {:?}", value),
    }
}

#[test]
fn parens_override_precedence() {
    match parse_value("(1 + 2) * 3") {
        Value::BinaryOp(op) => {
            assert_eq!(op.op, BinaryOp::Mul);
            assert!(!op.in_parens);
            match &op.lhs {
                Value::BinaryOp(lhs) => {
                    assert_eq!(lhs.op, BinaryOp::Plus);
                    assert!(lhs.in_parens);
                }
                lhs => panic!("expected a sum, got {:?}", lhs),
            }
        }
        value => panic!("expected a product, got {:?}", value),
    }
}

#[test]
fn operator_keywords_are_case_insensitive() {
    match parse_value("$a AND $b OR $c") {
        Value::BinaryOp(op) => {
            assert_eq!(op.op, BinaryOp::Or);
            assert!(matches!(&op.lhs, Value::BinaryOp(lhs) if lhs.op == BinaryOp::And));
        }
        value => panic!("expected a boolean expression, got {:?}", value),
    }
}

#[test]
fn comparison_and_spaceship_operators() {
    assert!(matches!(
        parse_value("1 <= 2"),
        Value::BinaryOp(op) if op.op == BinaryOp::LessThanEqual
    ));
    assert!(matches!(
        parse_value("1 <=> 2"),
        Value::BinaryOp(op) if op.op == BinaryOp::Spaceship
    ));
    assert!(matches!(
        parse_value("1 != 2"),
        Value::BinaryOp(op) if op.op == BinaryOp::NotEqual
    ));
}

#[test]
fn single_equals_expression() {
    assert!(matches!(
        parse_value("a=b"),
        Value::BinaryOp(op) if op.op == BinaryOp::SingleEq
    ));
}

#[test]
fn not_value() {
    match parse_value("not $a") {
        Value::UnaryOp(op) => {
            assert_eq!(op.op, UnaryOp::Not);
            assert_eq!(op.operand, Value::Variable("a".to_owned()));
        }
        value => panic!("expected a negation, got {:?}", value),
    }
    // `not` only binds as an operator when followed by whitespace or parens
    assert_eq!(parse_value("nothing"), Value::Keyword("nothing".to_owned()));
}

#[test]
fn leading_minus_is_unary() {
    match parse_value("-5px") {
        Value::UnaryOp(op) => {
            assert_eq!(op.op, UnaryOp::Neg);
            assert_eq!(op.operand, Value::Number(Number::new(5.0, "px")));
        }
        value => panic!("expected a negation, got {:?}", value),
    }
}

#[test]
fn minus_without_following_space_is_not_subtraction() {
    // `10px -5px` is a two-element space list
    match parse_value("10px -5px") {
        Value::List(list) => {
            assert_eq!(list.separator, ListSeparator::Space);
            assert!(matches!(list.items[0], Value::Number(..)));
            assert!(matches!(list.items[1], Value::UnaryOp(..)));
        }
        value => panic!("expected a list, got {:?}", value),
    }
    // with balanced whitespace it is a subtraction
    assert!(matches!(
        parse_value("10px - 5px"),
        Value::BinaryOp(op) if op.op == BinaryOp::Minus
    ));
    // a variable on the right is a subtraction even without a space
    assert!(matches!(
        parse_value("10px -$x"),
        Value::BinaryOp(op) if op.op == BinaryOp::Minus
    ));
}

#[test]
fn slash_is_kept_as_an_expression() {
    // the font-shorthand case: division is the evaluator's decision
    match parse_value("12px/1.5") {
        Value::BinaryOp(op) => {
            assert_eq!(op.op, BinaryOp::Div);
            assert!(!op.ws_before);
            assert!(!op.ws_after);
        }
        value => panic!("expected a division, got {:?}", value),
    }
}

#[test]
fn function_call_with_positional_and_named_args() {
    match parse_value("rgba($color, $alpha: 0.5)") {
        Value::FunctionCall(call) => {
            assert_eq!(call.name, "rgba");
            assert_eq!(call.args.len(), 2);
            assert_eq!(call.args[0].name, None);
            assert_eq!(call.args[1].name, Some("alpha".to_owned()));
            assert!(!call.args[1].is_splat);
        }
        value => panic!("expected a call, got {:?}", value),
    }
}

#[test]
fn function_call_with_splat() {
    match parse_value("join($lists...)") {
        Value::FunctionCall(call) => {
            assert_eq!(call.args.len(), 1);
            assert!(call.args[0].is_splat);
        }
        value => panic!("expected a call, got {:?}", value),
    }
}

#[test]
fn empty_argument_list() {
    match parse_value("unique-id()") {
        Value::FunctionCall(call) => assert!(call.args.is_empty()),
        value => panic!("expected a call, got {:?}", value),
    }
}

#[test]
fn calc_preserves_raw_body() {
    match parse_value("calc(100% - 10px)") {
        Value::Function(func) => {
            assert_eq!(func.name, "calc");
            assert_eq!(func.body.plain_text(), "100% - 10px");
        }
        value => panic!("expected a raw function, got {:?}", value),
    }
    assert!(matches!(
        parse_value("-moz-calc(100% / 3)"),
        Value::Function(..)
    ));
    assert!(matches!(
        parse_value("expression(document.body.clientWidth)"),
        Value::Function(..)
    ));
}

#[test]
fn calc_body_allows_nested_parens() {
    match parse_value("calc((100% - 10px) / 2)") {
        Value::Function(func) => {
            assert_eq!(func.body.plain_text(), "(100% - 10px) / 2");
        }
        value => panic!("expected a raw function, got {:?}", value),
    }
}

#[test]
fn alpha_filter_syntax_is_preserved() {
    match parse_value("alpha(opacity=50)") {
        Value::Function(func) => {
            assert_eq!(func.name, "alpha");
            assert_eq!(func.body.parts[0], StringPart::Text("opacity=".to_owned()));
            assert!(matches!(&func.body.parts[1], StringPart::Nested(..)));
        }
        value => panic!("expected a raw function, got {:?}", value),
    }
    // a plain alpha() call still gets a real argument list
    assert!(matches!(parse_value("alpha(0.5)"), Value::FunctionCall(..)));
}

#[test]
fn progid_expression() {
    match parse_value("progid:DXImageTransform.Microsoft.gradient(enabled='false')") {
        Value::String(string) => {
            assert_eq!(string.parts[0], StringPart::Text("progid:".to_owned()));
            assert!(matches!(&string.parts[1], StringPart::Nested(..)));
        }
        value => panic!("expected a string composite, got {:?}", value),
    }
}

#[test]
fn interpolation_records_adjacent_whitespace() {
    match parse_value("a #{$b} c") {
        Value::List(list) => match &list.items[1] {
            Value::Interpolation(inter) => {
                assert!(inter.left_ws);
                assert!(inter.right_ws);
            }
            value => panic!("expected interpolation, got {:?}", value),
        },
        value => panic!("expected a list, got {:?}", value),
    }
    match parse_value("a#{$b}c") {
        Value::List(list) => match &list.items[1] {
            Value::Interpolation(inter) => {
                assert!(!inter.left_ws);
                assert!(!inter.right_ws);
            }
            value => panic!("expected interpolation, got {:?}", value),
        },
        value => panic!("expected a list, got {:?}", value),
    }
}

#[test]
fn variables_in_expressions() {
    match parse_value("$base * 2") {
        Value::BinaryOp(op) => {
            assert_eq!(op.lhs, Value::Variable("base".to_owned()));
        }
        value => panic!("expected a product, got {:?}", value),
    }
}
