//! The streaming JSON tokenizer.
//!
//! [`Tokenizer`] lexes raw bytes into the events of the [`Callbacks`] trait.
//! Input may be fed in chunks split at any byte; a token cut by a chunk
//! boundary is held until the rest of it arrives. Calling
//! [`Tokenizer::finish`] marks the end of input, which flushes a trailing
//! number and checks that the document is complete.
//!
//! # Examples
//!
//! ```rust
//! use jsontree::{ParserOptions, Tokenizer, TreeBuilder};
//!
//! let mut tokenizer = Tokenizer::new(TreeBuilder::new(), ParserOptions::default());
//! tokenizer.feed(br#"{"key": [null, tr"#).unwrap();
//! tokenizer.feed(br#"ue, 3.14]}"#).unwrap();
//! tokenizer.finish().unwrap();
//!
//! let root = tokenizer.into_callbacks().into_root().unwrap();
//! assert_eq!(root.to_string(), r#"{"key":[null,true,3.14]}"#);
//! ```
#![allow(clippy::enum_glob_use)]

mod error;
mod escape;
mod literal;
mod options;

use alloc::{string::String, vec::Vec};

pub use error::{ErrorSource, ParseError, SyntaxError};
use escape::{UnicodeEscapeBuffer, combine_surrogates, is_high_surrogate, is_low_surrogate};
use literal::{ExpectedLiteralBuffer, Literal, Step};
pub use options::ParserOptions;

use crate::callbacks::Callbacks;

// ------------------------------------------------------------------------------------------------
// States
// ------------------------------------------------------------------------------------------------

/// Where in the grammar the next token is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    BeforeFirstPropertyName,
    BeforePropertyName,
    AfterPropertyName,
    BeforePropertyValue,
    AfterPropertyValue,
    BeforeFirstArrayValue,
    BeforeArrayValue,
    AfterArrayValue,
    End,
    Error,
}

/// Position inside the token currently being lexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Default,
    Literal,
    Sign,
    Zero,
    DecimalInteger,
    DecimalPoint,
    DecimalFraction,
    DecimalExponent,
    DecimalExponentSign,
    DecimalExponentInteger,
    String,
    StringEscape,
    StringEscapeUnicode,
    StringSurrogateBackslash,
    StringSurrogateU,
    CommentStart,
    LineComment,
    BlockComment,
    BlockCommentStar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Object,
    Array,
}

/// Whether the byte just lexed was consumed, or must be lexed again in the
/// new state (a number only ends when the byte after it arrives).
enum Advance {
    Consumed,
    Again,
}

use Advance::*;

type Failure<C> = ErrorSource<<C as Callbacks>::Error>;

/// Streaming tokenizer driving a [`Callbacks`] sink.
#[derive(Debug)]
pub struct Tokenizer<C: Callbacks> {
    callbacks: C,
    options: ParserOptions,

    parse_state: ParseState,
    lex_state: LexState,
    scopes: Vec<Scope>,

    /// Lexer helpers
    string: Vec<u8>, // decoded contents of the string being lexed
    numeral: String,
    literal: ExpectedLiteralBuffer,
    escape: UnicodeEscapeBuffer,
    high_surrogate: Option<u16>,

    line: usize,
    column: usize,
}

impl<C: Callbacks> Tokenizer<C> {
    #[must_use]
    pub fn new(callbacks: C, options: ParserOptions) -> Self {
        Self {
            callbacks,
            options,
            parse_state: ParseState::Start,
            lex_state: LexState::Default,
            scopes: Vec::new(),
            string: Vec::new(),
            numeral: String::new(),
            literal: ExpectedLiteralBuffer::none(),
            escape: UnicodeEscapeBuffer::new(),
            high_surrogate: None,
            line: 1,
            column: 1,
        }
    }

    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    /// Consumes the tokenizer and hands back its sink.
    pub fn into_callbacks(self) -> C {
        self.callbacks
    }

    /// Current `(line, column)`, both 1-based; columns count bytes.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Lexes one chunk of input, issuing events for every token it completes.
    ///
    /// # Errors
    ///
    /// A syntax error in the input, or the sink aborting. Once a call has
    /// failed every later call fails with [`SyntaxError::Poisoned`].
    pub fn feed(&mut self, input: &[u8]) -> Result<(), ParseError<C::Error>> {
        if self.parse_state == ParseState::Error {
            return Err(self.fail(SyntaxError::Poisoned.into()));
        }

        let mut i = 0;
        while i < input.len() {
            if self.lex_state == LexState::String {
                // Fast path: copy the run of plain string bytes in one go. A
                // run cannot contain a newline, so only the column moves.
                let run = input[i..]
                    .iter()
                    .position(|&b| matches!(b, b'"' | b'\\') || b < 0x20)
                    .unwrap_or(input.len() - i);
                if run > 0 {
                    self.string.extend_from_slice(&input[i..i + run]);
                    self.column += run;
                    i += run;
                    continue;
                }
            }

            let b = input[i];
            if let Err(source) = self.step(b) {
                return Err(self.fail(source));
            }
            self.advance(b);
            i += 1;
        }

        Ok(())
    }

    /// Marks the end of input.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::UnexpectedEndOfInput`] if the document is empty or cut
    /// short, or the sink aborting on a flushed trailing number.
    pub fn finish(&mut self) -> Result<(), ParseError<C::Error>> {
        if self.parse_state == ParseState::Error {
            return Err(self.fail(SyntaxError::Poisoned.into()));
        }
        self.end_of_input().map_err(|source| self.fail(source))
    }

    // ------------------------------------------------------------------------------------------------
    // Lexer
    // ------------------------------------------------------------------------------------------------

    fn step(&mut self, b: u8) -> Result<(), Failure<C>> {
        while let Again = self.lex(b)? {}
        Ok(())
    }

    fn advance(&mut self, b: u8) {
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    #[allow(clippy::too_many_lines)]
    fn lex(&mut self, b: u8) -> Result<Advance, Failure<C>> {
        use LexState::*;
        match self.lex_state {
            Default => self.lex_default(b),

            // -------------------------- LITERALS -----------------------------
            Literal => match self.literal.step(b) {
                Step::NeedMore => Ok(Consumed),
                Step::Done(literal) => {
                    self.lex_state = Default;
                    self.emit_literal(literal)?;
                    Ok(Consumed)
                }
                Step::Reject => Err(SyntaxError::InvalidByte(b).into()),
            },

            // -------------------------- NUMBERS -----------------------------
            Sign => match b {
                b'0' => Ok(self.number_byte(b, Zero)),
                b'1'..=b'9' => Ok(self.number_byte(b, DecimalInteger)),
                _ => Err(SyntaxError::InvalidByte(b).into()),
            },

            Zero => match b {
                b'.' => Ok(self.number_byte(b, DecimalPoint)),
                b'e' | b'E' => Ok(self.number_byte(b, DecimalExponent)),
                _ => self.end_number(),
            },

            DecimalInteger => match b {
                b'0'..=b'9' => Ok(self.number_byte(b, DecimalInteger)),
                b'.' => Ok(self.number_byte(b, DecimalPoint)),
                b'e' | b'E' => Ok(self.number_byte(b, DecimalExponent)),
                _ => self.end_number(),
            },

            DecimalPoint => match b {
                b'0'..=b'9' => Ok(self.number_byte(b, DecimalFraction)),
                _ => Err(SyntaxError::InvalidByte(b).into()),
            },

            DecimalFraction => match b {
                b'0'..=b'9' => Ok(self.number_byte(b, DecimalFraction)),
                b'e' | b'E' => Ok(self.number_byte(b, DecimalExponent)),
                _ => self.end_number(),
            },

            DecimalExponent => match b {
                b'+' | b'-' => Ok(self.number_byte(b, DecimalExponentSign)),
                b'0'..=b'9' => Ok(self.number_byte(b, DecimalExponentInteger)),
                _ => Err(SyntaxError::InvalidByte(b).into()),
            },

            DecimalExponentSign => match b {
                b'0'..=b'9' => Ok(self.number_byte(b, DecimalExponentInteger)),
                _ => Err(SyntaxError::InvalidByte(b).into()),
            },

            DecimalExponentInteger => match b {
                b'0'..=b'9' => Ok(self.number_byte(b, DecimalExponentInteger)),
                _ => self.end_number(),
            },

            // -------------------------- STRING -----------------------------
            String => match b {
                b'"' => {
                    self.lex_state = Default;
                    self.end_string()?;
                    Ok(Consumed)
                }
                b'\\' => {
                    self.lex_state = StringEscape;
                    Ok(Consumed)
                }
                // JSON allows 0x20 and above unescaped.
                0x00..=0x1F => Err(SyntaxError::InvalidByte(b).into()),
                _ => {
                    self.string.push(b);
                    Ok(Consumed)
                }
            },

            StringEscape => {
                let unescaped = match b {
                    b'"' | b'\\' | b'/' => b,
                    b'b' => 0x08,
                    b'f' => 0x0C,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'u' => {
                        self.escape.reset();
                        self.lex_state = StringEscapeUnicode;
                        return Ok(Consumed);
                    }
                    _ => return Err(SyntaxError::InvalidEscape(b).into()),
                };
                self.string.push(unescaped);
                self.lex_state = String;
                Ok(Consumed)
            }

            StringEscapeUnicode => match self.escape.feed(b) {
                Ok(None) => Ok(Consumed),
                Ok(Some(unit)) => {
                    self.push_code_unit(unit);
                    Ok(Consumed)
                }
                Err(()) => Err(SyntaxError::InvalidUnicodeEscape(b).into()),
            },

            // A high surrogate was decoded; only `\u` + low surrogate completes it.
            StringSurrogateBackslash => {
                if b == b'\\' {
                    self.lex_state = StringSurrogateU;
                    Ok(Consumed)
                } else {
                    self.lone_surrogate();
                    self.lex_state = String;
                    Ok(Again)
                }
            }

            StringSurrogateU => {
                if b == b'u' {
                    self.escape.reset();
                    self.lex_state = StringEscapeUnicode;
                    Ok(Consumed)
                } else {
                    // The backslash starts some other escape.
                    self.lone_surrogate();
                    self.lex_state = StringEscape;
                    Ok(Again)
                }
            }

            // -------------------------- COMMENTS -----------------------------
            CommentStart => match b {
                b'/' => {
                    self.lex_state = LineComment;
                    Ok(Consumed)
                }
                b'*' => {
                    self.lex_state = BlockComment;
                    Ok(Consumed)
                }
                _ => Err(SyntaxError::InvalidByte(b).into()),
            },

            LineComment => {
                if b == b'\n' {
                    self.lex_state = Default;
                }
                Ok(Consumed)
            }

            BlockComment => {
                if b == b'*' {
                    self.lex_state = BlockCommentStar;
                }
                Ok(Consumed)
            }

            BlockCommentStar => {
                self.lex_state = match b {
                    b'/' => Default,
                    b'*' => BlockCommentStar,
                    _ => BlockComment,
                };
                Ok(Consumed)
            }
        }
    }

    /// Between tokens: skip whitespace and comments, otherwise dispatch on
    /// what the grammar expects next.
    fn lex_default(&mut self, b: u8) -> Result<Advance, Failure<C>> {
        use ParseState::*;

        match b {
            b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C => return Ok(Consumed),
            b'/' if self.options.allow_comments => {
                self.lex_state = LexState::CommentStart;
                return Ok(Consumed);
            }
            _ => {}
        }

        match self.parse_state {
            Start | BeforePropertyValue | BeforeArrayValue => self.begin_value(b)?,
            BeforeFirstArrayValue if b == b']' => self.end_scope(Scope::Array)?,
            BeforeFirstArrayValue => self.begin_value(b)?,
            BeforeFirstPropertyName if b == b'}' => self.end_scope(Scope::Object)?,
            BeforeFirstPropertyName | BeforePropertyName if b == b'"' => {
                self.string.clear();
                self.lex_state = LexState::String;
            }
            AfterPropertyName if b == b':' => self.parse_state = BeforePropertyValue,
            AfterPropertyValue if b == b',' => self.parse_state = BeforePropertyName,
            AfterPropertyValue if b == b'}' => self.end_scope(Scope::Object)?,
            AfterArrayValue if b == b',' => self.parse_state = BeforeArrayValue,
            AfterArrayValue if b == b']' => self.end_scope(Scope::Array)?,
            End => return Err(SyntaxError::TrailingContent.into()),
            _ => return Err(SyntaxError::InvalidByte(b).into()),
        }

        Ok(Consumed)
    }

    fn begin_value(&mut self, b: u8) -> Result<(), Failure<C>> {
        match b {
            b'{' => {
                self.callbacks.on_start_map().map_err(ErrorSource::Aborted)?;
                self.scopes.push(Scope::Object);
                self.parse_state = ParseState::BeforeFirstPropertyName;
            }
            b'[' => {
                self.callbacks
                    .on_start_array()
                    .map_err(ErrorSource::Aborted)?;
                self.scopes.push(Scope::Array);
                self.parse_state = ParseState::BeforeFirstArrayValue;
            }
            b'"' => {
                self.string.clear();
                self.lex_state = LexState::String;
            }
            b'-' => {
                self.numeral.clear();
                self.number_byte(b, LexState::Sign);
            }
            b'0' => {
                self.numeral.clear();
                self.number_byte(b, LexState::Zero);
            }
            b'1'..=b'9' => {
                self.numeral.clear();
                self.number_byte(b, LexState::DecimalInteger);
            }
            b'n' | b't' | b'f' => {
                self.literal = ExpectedLiteralBuffer::new(b);
                self.lex_state = LexState::Literal;
            }
            _ => return Err(SyntaxError::InvalidByte(b).into()),
        }
        Ok(())
    }

    fn number_byte(&mut self, b: u8, next: LexState) -> Advance {
        self.numeral.push(char::from(b));
        self.lex_state = next;
        Consumed
    }

    fn end_number(&mut self) -> Result<Advance, Failure<C>> {
        self.lex_state = LexState::Default;
        let result = self.callbacks.on_number(&self.numeral);
        self.numeral.clear();
        result.map_err(ErrorSource::Aborted)?;
        self.value_done();
        Ok(Again)
    }

    fn end_string(&mut self) -> Result<(), Failure<C>> {
        if self.options.check_utf8 && core::str::from_utf8(&self.string).is_err() {
            return Err(SyntaxError::InvalidUtf8.into());
        }

        let is_key = matches!(
            self.parse_state,
            ParseState::BeforeFirstPropertyName | ParseState::BeforePropertyName
        );
        let result = if is_key {
            self.callbacks.on_map_key(&self.string)
        } else {
            self.callbacks.on_string(&self.string)
        };
        self.string.clear();
        result.map_err(ErrorSource::Aborted)?;

        if is_key {
            self.parse_state = ParseState::AfterPropertyName;
        } else {
            self.value_done();
        }
        Ok(())
    }

    fn emit_literal(&mut self, literal: Literal) -> Result<(), Failure<C>> {
        match literal {
            Literal::Null => self.callbacks.on_null(),
            Literal::True => self.callbacks.on_boolean(true),
            Literal::False => self.callbacks.on_boolean(false),
        }
        .map_err(ErrorSource::Aborted)?;
        self.value_done();
        Ok(())
    }

    fn end_scope(&mut self, scope: Scope) -> Result<(), Failure<C>> {
        let popped = self.scopes.pop();
        #[cfg(any(test, feature = "fuzzing"))]
        assert_eq!(
            popped,
            Some(scope),
            "Internal error: closed a scope that was not the innermost one"
        );
        #[cfg(not(any(test, feature = "fuzzing")))]
        let _ = popped;
        match scope {
            Scope::Object => self.callbacks.on_end_map(),
            Scope::Array => self.callbacks.on_end_array(),
        }
        .map_err(ErrorSource::Aborted)?;
        self.value_done();
        Ok(())
    }

    /// A value just completed; what may follow depends on its container.
    fn value_done(&mut self) {
        self.parse_state = match self.scopes.last() {
            None => ParseState::End,
            Some(Scope::Object) => ParseState::AfterPropertyValue,
            Some(Scope::Array) => ParseState::AfterArrayValue,
        };
    }

    // Unpaired surrogates are not representable, so they decode as `?`.
    fn push_code_unit(&mut self, unit: u16) {
        if let Some(high) = self.high_surrogate.take() {
            if is_low_surrogate(unit) {
                self.push_char(combine_surrogates(high, unit));
                self.lex_state = LexState::String;
                return;
            }
            self.string.push(b'?');
        }

        if is_high_surrogate(unit) {
            self.high_surrogate = Some(unit);
            self.lex_state = LexState::StringSurrogateBackslash;
        } else if is_low_surrogate(unit) {
            self.string.push(b'?');
            self.lex_state = LexState::String;
        } else {
            self.push_char(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
            self.lex_state = LexState::String;
        }
    }

    fn lone_surrogate(&mut self) {
        self.high_surrogate = None;
        self.string.push(b'?');
    }

    fn push_char(&mut self, c: char) {
        let mut buf = [0; 4];
        self.string
            .extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    fn end_of_input(&mut self) -> Result<(), Failure<C>> {
        use LexState::*;
        match self.lex_state {
            Zero | DecimalInteger | DecimalFraction | DecimalExponentInteger => {
                self.end_number()?;
            }
            Default | LineComment => self.lex_state = Default,
            _ => return Err(SyntaxError::UnexpectedEndOfInput.into()),
        }

        if self.parse_state == ParseState::End {
            Ok(())
        } else {
            Err(SyntaxError::UnexpectedEndOfInput.into())
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------------------------------------

    fn fail(&mut self, source: Failure<C>) -> ParseError<C::Error> {
        self.parse_state = ParseState::Error;
        tracing::debug!(
            line = self.line,
            column = self.column,
            error = %source,
            "tokenizer failed"
        );
        ParseError {
            source,
            line: self.line,
            column: self.column,
        }
    }
}
