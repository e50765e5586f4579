/// Dialect options for the [`Tokenizer`](crate::Tokenizer).
///
/// # Examples
///
/// ```rust
/// use jsontree::ParserOptions;
///
/// let strict = ParserOptions {
///     check_utf8: true,
///     ..Default::default()
/// };
/// assert!(!strict.allow_comments);
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether `// line` and `/* block */` comments may appear between
    /// tokens.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_comments: bool,

    /// Whether string contents, keys included, must be valid UTF-8.
    ///
    /// When `false`, strings are passed through as raw bytes.
    ///
    /// # Default
    ///
    /// `false`
    pub check_utf8: bool,
}

impl ParserOptions {
    /// The dialect used by [`parse`](crate::parse): comments allowed, no
    /// encoding validation.
    #[must_use]
    pub const fn tree() -> Self {
        Self {
            allow_comments: true,
            check_utf8: false,
        }
    }
}
