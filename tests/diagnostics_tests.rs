//! Positioned compile-time diagnostics.
//!
//! Every message has the shape `[Parse Error in <name> | Line L Col C (<token>)] <message>`.
//!
//! Review changes: `cargo insta review`

use stencil::Environment;

fn compile_error(source: &str) -> String {
    Environment::new().compile("page", source).unwrap_err().to_string()
}

#[test]
fn unclosed_block_reports_expected_closers() {
    insta::assert_snapshot!(
        compile_error("{% if x %}hello"),
        @"[Parse Error in page | Line 1 Col 11 (<Token Typ=HTML Val='hello' Line=1 Col=11>)] Unexpected EOF, expected tag else or endif."
    );
}

#[test]
fn closing_tag_with_arguments() {
    insta::assert_snapshot!(
        compile_error("{% if x %}a{% endif x %}"),
        @"[Parse Error in page | Line 1 Col 15 (<Token Typ=Identifier Val='endif' Line=1 Col=15>)] No arguments allowed for tag 'endif'"
    );
}

#[test]
fn unknown_tag() {
    insta::assert_snapshot!(
        compile_error("{% frobnicate %}"),
        @"[Parse Error in page | Line 1 Col 4 (<Token Typ=Identifier Val='frobnicate' Line=1 Col=4>)] Tag 'frobnicate' does not exist"
    );
}

#[test]
fn stray_closer_is_an_unknown_tag() {
    insta::assert_snapshot!(
        compile_error("a\n{% endif %}"),
        @"[Parse Error in page | Line 2 Col 4 (<Token Typ=Identifier Val='endif' Line=2 Col=4>)] Tag 'endif' does not exist"
    );
}

#[test]
fn tag_never_closed() {
    insta::assert_snapshot!(
        compile_error("{% if x"),
        @"[Parse Error in page | Line 1 Col 4 (<Token Typ=Identifier Val='if' Line=1 Col=4>)] Tag 'if' is not closed, '%}' expected."
    );
}

#[test]
fn lone_tag_opener() {
    insta::assert_snapshot!(
        compile_error("{%"),
        @"[Parse Error in page | Line 1 Col 1 (<Token Typ=Symbol Val='{%' Line=1 Col=1>)] Unexpected EOF, expected tag name after '{%'."
    );
}

#[test]
fn tag_name_must_be_identifier() {
    insta::assert_snapshot!(
        compile_error("{% 'x' %}"),
        @"[Parse Error in page | Line 1 Col 4 (<Token Typ=String Val='x' Line=1 Col=4>)] Tag name must be an identifier."
    );
}

#[test]
fn unclosed_variable() {
    insta::assert_snapshot!(
        compile_error("{{ name "),
        @"[Parse Error in page | Line 1 Col 4 (<Token Typ=Identifier Val='name' Line=1 Col=4>)] '}}' expected"
    );
}

#[test]
fn leftover_tag_arguments() {
    insta::assert_snapshot!(
        compile_error("{% if x y %}a{% endif %}"),
        @"[Parse Error in page | Line 1 Col 9 (<Token Typ=Identifier Val='y' Line=1 Col=9>)] Malformed 'if'-tag arguments."
    );
}

#[test]
fn tag_without_required_arguments() {
    insta::assert_snapshot!(
        compile_error("{% for %}{% endfor %}"),
        @"[Parse Error in page | Line 1 Col 4 (<Token Typ=Identifier Val='for' Line=1 Col=4>)] Tag 'for' requires arguments."
    );
}

#[test]
fn unknown_filter() {
    insta::assert_snapshot!(
        compile_error("{{ name|shout }}"),
        @"[Parse Error in page | Line 1 Col 9 (<Token Typ=Identifier Val='shout' Line=1 Col=9>)] Filter 'shout' does not exist."
    );
}

#[test]
fn lexer_errors_are_positioned() {
    insta::assert_snapshot!(
        compile_error("ok\n{{ 'abc }}"),
        @"[Lexer Error in page | Line 2 Col 4] Unterminated string literal"
    );
}

#[test]
fn nested_error_surfaces_unchanged() {
    let err = Environment::new()
        .compile("page", "{% if a %}{% for x in %}{% endfor %}{% endif %}")
        .unwrap_err();
    let stencil::TemplateError::Parse(parse) = err else {
        panic!("expected a parse error");
    };
    assert_eq!(parse.message, "Expected an expression.");
    assert_eq!(parse.line(), Some(1));
}
