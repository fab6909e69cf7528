use alloc::{string::ToString, vec::Vec};

use quickcheck::QuickCheck;

use super::utils::{chunks, is_prefix_of, parse_chars, strict_options};
use crate::{JsonBrook, LiteralMode, ParserOptions, Value};

fn tests() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

fn options(literal_mode: LiteralMode) -> ParserOptions {
    ParserOptions {
        literal_mode,
        ..strict_options()
    }
}

#[test]
fn serialized_values_parse_back() {
    fn prop(value: Value, literal_mode: LiteralMode) -> bool {
        let text = value.to_string();
        parse_chars(&text, options(literal_mode)).unwrap() == Some(value)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Value, LiteralMode) -> bool);
}

#[test]
fn chunking_does_not_change_the_result() {
    fn prop(value: Value, splits: Vec<usize>) -> bool {
        let text = value.to_string();
        let mut parser = JsonBrook::new(strict_options());
        for chunk in chunks(&text, &splits) {
            parser.write_str(&chunk).unwrap();
        }
        parser.end().unwrap();
        parser.current_value() == Some(value)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Value, Vec<usize>) -> bool);
}

#[test]
fn every_intermediate_value_is_a_prefix_of_the_final_value() {
    fn prop(value: Value, literal_mode: LiteralMode) -> bool {
        let text = value.to_string();
        let mut parser = JsonBrook::new(options(literal_mode));
        for ch in text.chars() {
            parser.write(ch).unwrap();
            let current = parser.current_value();
            // Querying never changes what is reported.
            if parser.current_value() != current {
                return false;
            }
            if let Some(partial) = current {
                if !is_prefix_of(&partial, &value) {
                    return false;
                }
            }
        }
        true
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Value, LiteralMode) -> bool);
}

#[test]
fn pretty_printed_values_parse_back() {
    fn prop(value: Value) -> bool {
        let text = serde_json::to_string_pretty(&value).unwrap();
        parse_chars(&text, strict_options()).unwrap() == Some(value)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Value) -> bool);
}
