use thistle::ast::{SelectorPart, Value};


use macros::parse_selectors;

fn texts(parts: &[&str]) -> Vec<SelectorPart> {
    parts.iter().map(|p| SelectorPart::Text((*p).to_owned())).collect()
}

#[test]
fn simple_selectors() {
    assert_eq!(parse_selectors("a")[0].parts, texts(&["a"]));
    assert_eq!(parse_selectors(".a")[0].parts, texts(&[".", "a"]));
    assert_eq!(parse_selectors("#a")[0].parts, texts(&["#", "a"]));
    assert_eq!(parse_selectors("*")[0].parts, texts(&["*"]));
}

#[test]
fn selector_list() {
    let selectors = parse_selectors(".a, .b");
    assert_eq!(selectors.len(), 2);
    assert_eq!(selectors[0].parts, texts(&[".", "a"]));
    assert_eq!(selectors[1].parts, texts(&[".", "b"]));
}

#[test]
fn descendant_combinator_is_explicit() {
    assert_eq!(parse_selectors("a b")[0].parts, texts(&["a", " ", "b"]));
}

#[test]
fn child_and_sibling_combinators() {
    assert_eq!(parse_selectors("a > b")[0].parts, texts(&["a", ">", "b"]));
    assert_eq!(parse_selectors("a + b")[0].parts, texts(&["a", "+", "b"]));
    assert_eq!(parse_selectors("a ~ b")[0].parts, texts(&["a", "~", "b"]));
}

#[test]
fn parent_reference() {
    assert_eq!(parse_selectors("&.on")[0].parts, texts(&["&", ".", "on"]));
}

#[test]
fn pseudo_classes() {
    assert_eq!(
        parse_selectors("a:hover")[0].parts,
        texts(&["a", ":", "hover"])
    );
    assert_eq!(
        parse_selectors("p::first-line")[0].parts,
        texts(&["p", "::", "first-line"])
    );
}

#[test]
fn pseudo_class_arguments_are_raw() {
    let parts = &parse_selectors("a:not(.b, .c)")[0].parts;
    assert_eq!(parts[0], SelectorPart::Text("a".to_owned()));
    assert_eq!(parts[1], SelectorPart::Text(":".to_owned()));
    assert_eq!(parts[2], SelectorPart::Text("not".to_owned()));
    assert_eq!(parts[3], SelectorPart::Text("(".to_owned()));
    match &parts[4] {
        SelectorPart::String(args) => assert_eq!(args.plain_text(), ".b, .c"),
        part => panic!("expected raw arguments, got {:?}", part),
    }
    assert_eq!(parts[5], SelectorPart::Text(")".to_owned()));
}

#[test]
fn pseudo_class_arguments_allow_nested_parens() {
    let parts = &parse_selectors(":nth-child(2n+1)")[0].parts;
    match &parts[3] {
        SelectorPart::String(args) => assert_eq!(args.plain_text(), "2n+1"),
        part => panic!("expected raw arguments, got {:?}", part),
    }
}

#[test]
fn attribute_selector_tokens() {
    let parts = &parse_selectors("[href^=\"http\"]")[0].parts;
    assert_eq!(parts[0], SelectorPart::Text("[".to_owned()));
    assert_eq!(parts[1], SelectorPart::Text("href".to_owned()));
    assert_eq!(parts[2], SelectorPart::Text("^=".to_owned()));
    match &parts[3] {
        SelectorPart::String(value) => assert_eq!(value.plain_text(), "http"),
        part => panic!("expected a quoted value, got {:?}", part),
    }
    assert_eq!(parts[4], SelectorPart::Text("]".to_owned()));
}

#[test]
fn placeholder_selector() {
    assert_eq!(parse_selectors("%strong")[0].parts, texts(&["%", "strong"]));
}

#[test]
fn namespace_separator() {
    assert_eq!(
        parse_selectors("svg|circle")[0].parts,
        texts(&["svg", "|", "circle"])
    );
}

#[test]
fn keyframes_percentage() {
    assert_eq!(parse_selectors("50%")[0].parts, texts(&["50%"]));
}

#[test]
fn interpolation_in_selector() {
    let parts = &parse_selectors(".#{$cls}")[0].parts;
    assert_eq!(parts[0], SelectorPart::Text(".".to_owned()));
    match &parts[1] {
        SelectorPart::Interpolation(inter) => {
            assert_eq!(inter.value, Value::Variable("cls".to_owned()));
            assert!(!inter.left_ws);
            assert!(!inter.right_ws);
        }
        part => panic!("expected interpolation, got {:?}", part),
    }
}

#[test]
fn parent_pseudo_and_interpolated_class() {
    // `&:hover .#{$cls}` keeps its shape: parent ref, pseudo, descendant,
    // class dot, interpolation
    let parts = &parse_selectors("&:hover .#{$cls}")[0].parts;
    assert_eq!(parts.len(), 6);
    assert_eq!(parts[0], SelectorPart::Text("&".to_owned()));
    assert_eq!(parts[1], SelectorPart::Text(":".to_owned()));
    assert_eq!(parts[2], SelectorPart::Text("hover".to_owned()));
    assert_eq!(parts[3], SelectorPart::Text(" ".to_owned()));
    assert_eq!(parts[4], SelectorPart::Text(".".to_owned()));
    match &parts[5] {
        SelectorPart::Interpolation(inter) => {
            assert_eq!(inter.value, Value::Variable("cls".to_owned()));
            assert!(!inter.left_ws);
            assert!(!inter.right_ws);
        }
        part => panic!("expected interpolation, got {:?}", part),
    }
}

#[test]
fn interpolated_placeholder() {
    let parts = &parse_selectors("%#{$name}")[0].parts;
    assert_eq!(parts[0], SelectorPart::Text("%".to_owned()));
    assert!(matches!(&parts[1], SelectorPart::Interpolation(..)));
}

#[test]
fn escape_sequences_pass_through() {
    assert_eq!(
        parse_selectors(".\\31 23")[0].parts,
        texts(&[".", "\\3", "1", " ", "23"])
    );
}
