#![allow(missing_docs)]
#![allow(dead_code)]
#![expect(clippy::needless_raw_string_hashes)]

use jsonbrook::{Map, Value};

pub const ORIGINAL: &str = r#"
{
    "tool": "search_flights",
    "arguments": {
        "origin": "SFO",
        "destination": "NRT",
        "passengers": [
            {
                "name": "Ada",
                "age": 36,
                "seat": null
            },
            {
                "name": "Lin \"Jr.\"",
                "age": 7.5,
                "seat": "14C"
            }
        ],
        "flexible": true,
        "max_price": -1.25e3,
        "notes": "window\nplease"
    },
    "matrix": [
        [
            0,
            1
        ],
        []
    ],
    "empty": {}
}"#;

// A tool-call response streamed in compact form. Chunks end mid-token
// (inside keywords, numbers, strings and escapes) as well as on structural
// seams.
#[rustfmt::skip]
pub const STREAM: [&str; 14] = [
    r#"{"tool":"search_fl"#,                                                // inside a string
    r#"ights","arguments":{"origin":"S"#,
    r#"FO","destination":"NRT","passengers":[{"name":"Ada","age":3"#,      // inside a number
    r#"6,"seat":nu"#,                                                       // inside a keyword
    r#"ll},{"name":"Lin \"#,                                                // inside an escape
    r#""Jr.\"","age":7."#,                                                  // after a decimal point
    r#"5,"seat":"14C"}"#,
    r#"],"flexible":tr"#,
    r#"ue,"max_price":-"#,                                                  // after a sign
    r#"1250.0,"notes":"window\"#,
    r#"nplease"}"#,
    r#","matrix":[[0,1]"#,
    r#",[]],"empty":{"#,
    r#"}}"#,
];

pub fn from_serde(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap()),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Array(items.into_iter().map(from_serde).collect()),
        serde_json::Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k, from_serde(v)))
                .collect::<Map>(),
        ),
    }
}

pub fn reference(text: &str) -> Value {
    from_serde(serde_json::from_str(text).unwrap())
}

/// Looks up a value by a `/`-separated path of keys and indices.
pub fn pointer<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
            _ => None,
        })
}
