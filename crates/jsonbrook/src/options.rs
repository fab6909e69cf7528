/// Configuration options for [`JsonBrook`](crate::JsonBrook) and
/// [`Tokenizer`](crate::Tokenizer).
///
/// # Examples
///
/// ```rust
/// use jsonbrook::{JsonBrook, LiteralMode, ParserOptions};
///
/// let parser = JsonBrook::new(ParserOptions {
///     literal_mode: LiteralMode::Committed,
///     ..Default::default()
/// });
/// assert_eq!(parser.current_value(), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default, the parser only recognizes the four whitespace characters
    /// defined by the JSON specification: space (U+0020), line feed (U+000A),
    /// carriage return (U+000D), and horizontal tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// How literals that are still being lexed show up in
    /// [`JsonBrook::current_value`](crate::JsonBrook::current_value).
    ///
    /// # Default
    ///
    /// [`LiteralMode::Provisional`]
    pub literal_mode: LiteralMode,

    /// How many arrays and objects may be open at once.
    ///
    /// Opening one more fails with
    /// [`SyntaxError::DepthLimitExceeded`](crate::SyntaxError::DepthLimitExceeded).
    /// Values are dropped, compared and printed recursively, so this bounds
    /// the stack those operations need.
    ///
    /// # Default
    ///
    /// `1024`
    pub max_depth: usize,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on syntax errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_unicode_whitespace: false,
            literal_mode: LiteralMode::default(),
            max_depth: 1024,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}

/// Reporting policy for literals whose token is not complete yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LiteralMode {
    /// Report a best-effort value for incomplete literals: the valid prefix
    /// of a number, the decoded text of a string so far, or the keyword a
    /// partial `t`/`f`/`n` can only become.
    ///
    /// After writing `1` of `10`, the current value is `1`.
    #[default]
    Provisional,
    /// Report literals only once their token is complete. Incomplete
    /// literals are left out of arrays and objects, and an incomplete root
    /// literal reports no value.
    ///
    /// After writing `1` of `10`, there is no current value.
    Committed,
}

impl ParserOptions {
    pub(crate) fn is_whitespace(&self, ch: char) -> bool {
        matches!(ch, ' ' | '\t' | '\n' | '\r') || (self.allow_unicode_whitespace && ch.is_whitespace())
    }
}
