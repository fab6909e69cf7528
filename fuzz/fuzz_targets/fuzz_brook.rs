#![no_main]
//! Feeds fuzzed documents to `JsonBrook` in random chunks.
//!
//! Input layout: one flag byte, a little-endian `u32` chunking seed, then the
//! document. Flag bit 0 enables Unicode whitespace and bit 1 selects
//! `LiteralMode::Committed`.
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use jsonbrook::{JsonBrook, LiteralMode, ParserOptions};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng};
use serde_json::{Map, Value};

const HEADER: usize = 5;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

/// Separators to pad generated documents with. The Unicode ones only parse
/// with flag bit 0 set.
static WHITESPACE: &[&str] = &[
    " ", "\t", "\n", "\r", "\u{A0}", "\u{1680}", "\u{2003}", "\u{2028}", "\u{2029}", "\u{3000}",
];

fn with_rng<R>(f: impl FnOnce(&mut SmallRng) -> R) -> R {
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Usually defers to libFuzzer. Every tenth call, or when the input is too
/// short to hold a header, writes a fresh header followed by generated
/// values separated by whitespace.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if (size >= HEADER && !seed.is_multiple_of(10)) || max_size < HEADER {
        return fuzzer_mutate(data, size, max_size);
    }

    with_rng(|rng| {
        data[0] = rng.next_u32() as u8 & 0b11;
        data[1..HEADER].copy_from_slice(&rng.next_u32().to_le_bytes());
    });
    let mut len = HEADER;
    while len < size.max(HEADER + 1) && len < max_size {
        len += write_whitespace(&mut data[len..max_size]);
        len += write_value(&mut data[len..max_size], size);
        len += write_whitespace(&mut data[len..max_size]);
    }
    len
}

/// Writes up to eight whitespace characters that fit in `buf`.
fn write_whitespace(buf: &mut [u8]) -> usize {
    with_rng(|rng| {
        let mut written = 0;
        for _ in 0..rng.random_range(0..=8) {
            let ws = WHITESPACE[rng.random_range(0..WHITESPACE.len())].as_bytes();
            if written + ws.len() > buf.len() {
                break;
            }
            buf[written..written + ws.len()].copy_from_slice(ws);
            written += ws.len();
        }
        written
    })
}

/// Writes a serialized random value, truncated to fit `buf`.
fn write_value(buf: &mut [u8], size: usize) -> usize {
    if buf.is_empty() {
        return 0;
    }
    let value = loop {
        let entropy: Vec<u8> = with_rng(|rng| {
            let len = rng.random_range(1..=size.max(2) * 2);
            (0..len).map(|_| rng.random()).collect()
        });
        if let Ok(doc) = Document::arbitrary(&mut Unstructured::new(&entropy)) {
            break doc.0;
        }
    };
    let Ok(text) = serde_json::to_vec(&value) else {
        return 0;
    };
    let len = text.len().min(buf.len());
    buf[..len].copy_from_slice(&text[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// A JSON value built from fuzzer entropy. Containers are favored so that
/// nesting gets exercised.
#[derive(Debug)]
struct Document(Value);

impl<'a> Arbitrary<'a> for Document {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(16)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 | 3 => {
                let n: f64 = u.arbitrary()?;
                serde_json::Number::from_f64(n)
                    .map(Value::Number)
                    .ok_or(arbitrary::Error::IncorrectFormat)?
            }
            4..=7 => Value::String(u.arbitrary()?),
            8..=11 => {
                let items: Vec<Document> = u.arbitrary()?;
                Value::Array(items.into_iter().map(|d| d.0).collect())
            }
            _ => {
                let entries: Vec<(String, Document)> = u.arbitrary()?;
                Value::Object(entries.into_iter().map(|(k, d)| (k, d.0)).collect::<Map<_, _>>())
            }
        };
        Ok(Document(value))
    }
}

fn to_brook(value: Value) -> jsonbrook::Value {
    match value {
        Value::Null => jsonbrook::Value::Null,
        Value::Bool(b) => jsonbrook::Value::Boolean(b),
        Value::Number(n) => jsonbrook::Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => jsonbrook::Value::String(s),
        Value::Array(items) => jsonbrook::Value::Array(items.into_iter().map(to_brook).collect()),
        Value::Object(entries) => {
            jsonbrook::Value::Object(entries.into_iter().map(|(k, v)| (k, to_brook(v))).collect())
        }
    }
}

/// Cuts `text` into non-empty pieces on char boundaries. The same seed always
/// gives the same cuts.
fn chunks(text: &str, seed: u64) -> Vec<&str> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut out = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let mut at = rng.random_range(1..=rest.len().min(32));
        while !rest.is_char_boundary(at) {
            at += 1;
        }
        let (chunk, tail) = rest.split_at(at);
        out.push(chunk);
        rest = tail;
    }
    out
}

fn run(data: &[u8]) {
    let Some((header, doc)) = data.split_first_chunk::<HEADER>() else {
        return;
    };
    let flags = header[0];
    let seed = u64::from(u32::from_le_bytes([header[1], header[2], header[3], header[4]]));
    let text = String::from_utf8_lossy(doc);
    let allow_unicode_whitespace = flags & 1 != 0;

    let mut parser = JsonBrook::new(ParserOptions {
        allow_unicode_whitespace,
        literal_mode: if flags & 2 != 0 {
            LiteralMode::Committed
        } else {
            LiteralMode::Provisional
        },
        ..Default::default()
    });
    let mut result = Ok(());
    for chunk in chunks(&text, seed) {
        result = parser.write_str(chunk);
        let current = parser.current_value();
        assert_eq!(current, parser.current_value(), "querying changed the value");
        if result.is_err() {
            break;
        }
    }
    if result.is_ok() {
        result = parser.end();
    }

    // serde_json only knows the four JSON whitespace characters.
    if allow_unicode_whitespace {
        return;
    }
    if let Ok(expected) = serde_json::from_str::<Value>(&text) {
        assert!(result.is_ok(), "rejected valid JSON: {result:?}");
        assert_eq!(parser.current_value(), Some(to_brook(expected)));
    }
}

fuzz_target!(|data: &[u8]| run(data));
