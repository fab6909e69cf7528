//! An incremental JSON parser that reports a best-effort value after every
//! character.
//!
//! Text produced gradually, such as JSON streamed token by token from a
//! language model, can be rendered while it arrives: feed characters to a
//! [`JsonBrook`] and ask for [`JsonBrook::current_value`] whenever needed.
//! Once [`JsonBrook::end`] is called the value equals what a standard JSON
//! parser returns for the whole document.
//!
//! ```rust
//! use jsonbrook::{JsonBrook, Value};
//!
//! let mut parser = JsonBrook::default();
//! let mut seen = Vec::new();
//! for ch in r#"["a", "bc"]"#.chars() {
//!     parser.write(ch).unwrap();
//!     seen.push(parser.current_value());
//! }
//! parser.end().unwrap();
//!
//! assert_eq!(seen[0], Some(Value::Array(vec![])));
//! assert_eq!(seen[2], Some(Value::Array(vec!["a".into()])));
//! assert_eq!(
//!     parser.current_value(),
//!     Some(Value::Array(vec!["a".into(), "bc".into()]))
//! );
//! ```
//!
//! The lexical layer is also available on its own as a [`Tokenizer`].

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod generate;
mod options;
mod parser;
mod position;
mod tokenizer;
mod tree;
mod value;

#[cfg(test)]
mod tests;

pub use error::{ParserError, SyntaxError};
pub use options::{LiteralMode, ParserOptions};
pub use parser::JsonBrook;
pub use tokenizer::{Symbol, Token, Tokenizer};
pub use value::{Array, Map, Value};
