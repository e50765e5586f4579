//! Builds an in-memory tree from a JSON document.
//!
//! A [`Tokenizer`] turns bytes into parse events; a [`TreeBuilder`] listening
//! to those events assembles them into a [`Node`] tree with an explicit stack
//! of open objects and arrays. [`parse`] wires the two together.
//!
//! ```rust
//! let root = jsontree::parse(r#"{"a": 1, "a": [true, null]} // trailing comment"#).unwrap();
//!
//! let object = root.as_object().unwrap();
//! assert_eq!(object.len(), 2); // duplicate keys are kept
//! assert_eq!(object.get("a").and_then(|n| n.as_i64()), Some(1));
//! assert_eq!(root.to_string(), r#"{"a":1,"a":[true,null]}"#);
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod builder;
mod callbacks;
mod emit;
mod error;
mod handlers;
mod lookup;
mod node;
mod number;
mod parser;
#[cfg(feature = "serde")]
mod ser;

#[cfg(test)]
mod tests;

pub use builder::TreeBuilder;
pub use callbacks::Callbacks;
pub use error::BuildError;
pub use lookup::{PathComponent, PathComponentFrom};
pub use node::{Array, JsonString, Node, NodeKind, Object, free};
pub use number::Number;
pub use parser::{ErrorSource, ParseError, ParserOptions, SyntaxError, Tokenizer};

#[doc(hidden)]
pub use alloc::vec;

/// Parses a complete document into a tree.
///
/// Comments are accepted and strings are not checked for valid UTF-8, see
/// [`ParserOptions::tree`]. Nothing partial is returned on failure.
///
/// # Errors
///
/// A syntax error in `input`, located by line and column.
pub fn parse(input: impl AsRef<[u8]>) -> Result<Node, ParseError<BuildError>> {
    parse_with_options(input, ParserOptions::tree())
}

/// Parses a complete document with an explicit dialect.
///
/// ```rust
/// use jsontree::{ParserOptions, SyntaxError};
///
/// let err = jsontree::parse_with_options("[1 /* no comments */]", ParserOptions::default())
///     .unwrap_err();
/// assert_eq!(err.syntax(), Some(&SyntaxError::InvalidByte(b'/')));
/// assert_eq!(err.column(), 4);
///
/// // After a complete document, anything but whitespace is trailing content.
/// let err = jsontree::parse_with_options("[1] // no comments", ParserOptions::default())
///     .unwrap_err();
/// assert_eq!(err.syntax(), Some(&SyntaxError::TrailingContent));
/// ```
///
/// # Errors
///
/// A syntax error in `input`, located by line and column.
pub fn parse_with_options(
    input: impl AsRef<[u8]>,
    options: ParserOptions,
) -> Result<Node, ParseError<BuildError>> {
    let mut tokenizer = Tokenizer::new(TreeBuilder::new(), options);
    tokenizer.feed(input.as_ref())?;
    tokenizer.finish()?;

    let (line, column) = tokenizer.position();
    tokenizer
        .into_callbacks()
        .into_root()
        .map_err(|err| ParseError {
            source: ErrorSource::Aborted(err),
            line,
            column,
        })
}

/// Macro to build a `Vec<PathComponent>` from a heterogeneous list of keys and
/// indices.
///
/// ```rust
/// extern crate alloc;
/// # use jsontree::{path, PathComponent};
/// let p = path![0, "foo", 2];
/// assert_eq!(
///     p,
///     vec![
///         PathComponent::Index(0),
///         PathComponent::Key("foo".into()),
///         PathComponent::Index(2)
///     ]
/// );
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        use $crate::PathComponentFrom;
        $crate::vec![$($crate::PathComponent::from_path_component($elem)),*]
    }};
}
