use alloc::string::ToString;

use rstest::rstest;

use super::utils::parse_chars;
use crate::{JsonBrook, ParserError, ParserOptions, SyntaxError, Value};

fn assert_err_contains(err: &ParserError, expected_sub: &str, line: usize, col: usize) {
    let msg = err.to_string();
    assert!(
        msg.contains(expected_sub),
        "error message {msg:?} does not contain {expected_sub:?}"
    );
    assert_eq!((err.line, err.column), (line, col), "{msg}");
}

#[rstest]
#[case::trailing_comma_in_array("[1,]", SyntaxError::InvalidCharacter(']'), 1, 4)]
#[case::leading_comma_in_array("[,1]", SyntaxError::InvalidCharacter(','), 1, 2)]
#[case::missing_comma("[1 2]", SyntaxError::InvalidCharacter('2'), 1, 4)]
#[case::missing_colon(r#"{"a" 1}"#, SyntaxError::InvalidCharacter('1'), 1, 6)]
#[case::trailing_comma_in_object(r#"{"a":1,}"#, SyntaxError::InvalidCharacter('}'), 1, 8)]
#[case::unquoted_key("{1:2}", SyntaxError::InvalidCharacter('1'), 1, 2)]
#[case::single_quoted_key("{'a':2}", SyntaxError::InvalidCharacter('\''), 1, 2)]
#[case::mismatched_close("[1}", SyntaxError::InvalidCharacter('}'), 1, 3)]
#[case::comment("/* x */ 1", SyntaxError::InvalidCharacter('/'), 1, 1)]
#[case::bad_keyword("tru!", SyntaxError::InvalidKeyword { expected: "true", found: '!' }, 1, 4)]
#[case::capitalized_keyword("[nulL]", SyntaxError::InvalidKeyword { expected: "null", found: 'L' }, 1, 5)]
#[case::dot_without_digit("1.e", SyntaxError::InvalidNumber('e'), 1, 3)]
#[case::sign_without_digit("-a", SyntaxError::InvalidNumber('a'), 1, 2)]
#[case::exponent_without_digit("[1e]", SyntaxError::InvalidNumber(']'), 1, 4)]
#[case::leading_zero("01", SyntaxError::TrailingCharacter('1'), 1, 2)]
#[case::plus_sign("+1", SyntaxError::InvalidCharacter('+'), 1, 1)]
#[case::leading_dot(".5", SyntaxError::InvalidCharacter('.'), 1, 1)]
#[case::bad_escape(r#""\x""#, SyntaxError::InvalidEscape('x'), 1, 3)]
#[case::bad_hex(r#""\u12g4""#, SyntaxError::InvalidUnicodeEscapeChar('g'), 1, 6)]
#[case::raw_newline("\"a\nb\"", SyntaxError::ControlCharacterInString('\n'), 1, 3)]
#[case::raw_tab("[\"\t\"]", SyntaxError::ControlCharacterInString('\t'), 1, 3)]
#[case::after_array("[1]x", SyntaxError::TrailingCharacter('x'), 1, 4)]
#[case::second_value("1 2", SyntaxError::TrailingCharacter('2'), 1, 3)]
#[case::second_document("{} {}", SyntaxError::TrailingCharacter('{'), 1, 4)]
#[case::comma_on_next_line("[1,\n,]", SyntaxError::InvalidCharacter(','), 2, 1)]
#[case::nbsp_is_not_whitespace("[\u{A0}1]", SyntaxError::InvalidCharacter('\u{A0}'), 1, 2)]
fn rejects_invalid_documents(
    #[case] text: &str,
    #[case] expected: SyntaxError,
    #[case] line: usize,
    #[case] column: usize,
) {
    let err = parse_chars(text, ParserOptions::default()).unwrap_err();
    assert_eq!(err.source, expected, "{text:?}");
    assert_eq!((err.line, err.column), (line, column), "{text:?}");
}

#[rstest]
#[case::open_array("[")]
#[case::open_object("{")]
#[case::after_key(r#"{"a""#)]
#[case::after_colon(r#"{"a":"#)]
#[case::open_string(r#""abc"#)]
#[case::open_escape(r#""\"#)]
#[case::open_unicode_escape(r#""\u12"#)]
#[case::partial_keyword("nul")]
#[case::dot("1.")]
#[case::exponent("2e")]
#[case::exponent_sign("2e-")]
#[case::minus("-")]
fn rejects_unexpected_end(#[case] text: &str) {
    let err = parse_chars(text, ParserOptions::default()).unwrap_err();
    assert_eq!(err.source, SyntaxError::UnexpectedEndOfInput, "{text:?}");
    // End-of-input errors point one past the last character.
    assert_eq!((err.line, err.column), (1, text.chars().count() + 1), "{text:?}");
}

#[test]
fn error_messages() {
    let err = parse_chars("[1,]", ParserOptions::default()).unwrap_err();
    assert_err_contains(&err, "invalid character ']'", 1, 4);

    let err = parse_chars("fals3", ParserOptions::default()).unwrap_err();
    assert_err_contains(&err, "invalid character '3' in keyword 'false'", 1, 5);

    let err = parse_chars("[\n  \"\\q\"]", ParserOptions::default()).unwrap_err();
    assert_err_contains(&err, "invalid escape character 'q'", 2, 5);

    let err = parse_chars("{", ParserOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "unexpected end of input at 1:2");
}

#[rstest]
#[case::arrays("[[[", 3)]
#[case::mixed(r#"[{"a":["#, 7)]
#[case::after_sibling("[[],[[", 6)]
#[case::object_values(r#"{"a":{},"b":{"c":{"#, 18)]
fn rejects_nesting_past_limit(#[case] text: &str, #[case] column: usize) {
    let options = ParserOptions {
        max_depth: 2,
        ..Default::default()
    };
    let err = parse_chars(text, options).unwrap_err();
    assert_eq!(err.source, SyntaxError::DepthLimitExceeded(2), "{text:?}");
    assert_eq!((err.line, err.column), (1, column), "{text:?}");
}

#[test]
fn runaway_nesting_stops_at_default_limit() {
    let mut parser = JsonBrook::default();
    let err = parser.write_str(&"[".repeat(20_000)).unwrap_err();
    assert_eq!(err.source, SyntaxError::DepthLimitExceeded(1024));
    assert_err_contains(&err, "nesting deeper than 1024 levels", 1, 1025);
    assert_eq!(parser.write(']'), Err(err.clone()));
    assert_eq!(parser.end(), Err(err));

    // Everything opened before the limit is still reported.
    let value = parser.current_value().unwrap();
    let mut depth = 0;
    let mut current = Some(&value);
    while let Some(Value::Array(items)) = current {
        depth += 1;
        current = items.first();
    }
    assert_eq!(depth, 1024);
}
