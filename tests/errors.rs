use thistle::Options;


error!(
    unclosed_block,
    "a { color: red", "unclosed block: failed at `` (stdin) on line 1"
);

error!(
    unclosed_block_line_number,
    "a {\n  color: red;\n  b {\n", "unclosed block: failed at `` (stdin) on line 3"
);

error!(
    stray_closing_brace,
    "}", "unexpected }: failed at `` (stdin) on line 1"
);

error!(
    unexpected_input_shows_snippet,
    "a { & }", "parse error: failed at `& }` (stdin) on line 1"
);

error!(
    unexpected_input_at_root,
    "$x: ;", "parse error: failed at `$x: ;` (stdin) on line 1"
);

error!(
    splat_must_be_final_argument,
    "@mixin m($a..., $b) { }",
    "... has to be after the final argument: failed at `, $b) { }` (stdin) on line 1"
);

error!(
    else_without_if,
    "a { } @else { x: 1; }",
    "unexpected @else: failed at `@else { x: 1; }` (stdin) on line 1"
);

#[test]
fn source_name_appears_in_diagnostics() {
    let options = Options::default().source_name("input.scss");
    match thistle::parse("a { color: red", &options) {
        Ok(..) => panic!("did not fail"),
        Err(e) => {
            assert_eq!(
                e.to_string(),
                "unclosed block: failed at `` input.scss on line 1"
            );
            assert_eq!(e.source_name(), "input.scss");
            assert_eq!(e.line(), 1);
            assert_eq!(e.message(), "unclosed block");
        }
    }
}

#[test]
fn error_location_counts_newlines() {
    match thistle::parse("a { x: 1; }\nb {\n  & }\n", &Options::default()) {
        Ok(..) => panic!("did not fail"),
        Err(e) => assert_eq!(e.line(), 3),
    }
}

#[test]
fn valid_input_consumes_entire_buffer() {
    // trailing whitespace and control bytes are not part of the document
    assert!(thistle::parse("a { x: 1; }\n\n\x00\x1f", &Options::default()).is_ok());
}
