use core::error::Error;

use thiserror::Error;

/// A failed parse, with the input position it failed at.
///
/// `E` is the error type of the [`Callbacks`](crate::Callbacks) sink; when the
/// sink aborts, its error is carried in [`ErrorSource::Aborted`].
#[derive(Error, Debug, PartialEq)]
#[error("{source} at {line}:{column}")]
pub struct ParseError<E: Error + 'static> {
    pub(crate) source: ErrorSource<E>,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl<E: Error + 'static> ParseError<E> {
    /// 1-based line of the byte that failed.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based byte column within [`line`](Self::line).
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn kind(&self) -> &ErrorSource<E> {
        &self.source
    }

    #[must_use]
    pub fn into_kind(self) -> ErrorSource<E> {
        self.source
    }

    /// The sink's error, if the sink aborted the parse.
    #[must_use]
    pub fn aborted(&self) -> Option<&E> {
        match &self.source {
            ErrorSource::Aborted(err) => Some(err),
            ErrorSource::Syntax(_) => None,
        }
    }

    /// The grammar error, if the input was malformed.
    #[must_use]
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match &self.source {
            ErrorSource::Syntax(err) => Some(err),
            ErrorSource::Aborted(_) => None,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ErrorSource<E: Error + 'static> {
    #[error("aborted by callback: {0}")]
    Aborted(E),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("invalid byte {}", display_byte(.0))]
    InvalidByte(u8),
    #[error("invalid escape character {}", display_byte(.0))]
    InvalidEscape(u8),
    #[error("invalid unicode escape sequence at byte {}", display_byte(.0))]
    InvalidUnicodeEscape(u8),
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("trailing content after the document")]
    TrailingContent,
    #[error("parser already failed")]
    Poisoned,
}

struct DisplayByte(u8);

#[allow(clippy::trivially_copy_pass_by_ref)]
fn display_byte(b: &u8) -> DisplayByte {
    DisplayByte(*b)
}

impl core::fmt::Display for DisplayByte {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            b'\'' => f.write_str("'\\''"),
            b @ 0x20..=0x7E => write!(f, "'{}'", char::from(b)),
            b => write!(f, "0x{b:02X}"),
        }
    }
}
