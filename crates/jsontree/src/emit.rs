//! Replaying a tree as parse events.
//!
//! [`Node::emit`] walks a tree in document order and issues the exact event
//! sequence a tokenizer would have produced for it, so feeding the events
//! into a fresh [`TreeBuilder`](crate::TreeBuilder) rebuilds an equal tree.
//! The JSON rendering behind `Display` is one more sink for the same walk.
use alloc::vec::Vec;
use core::{fmt, slice};

use bstr::ByteSlice;

use crate::{
    callbacks::Callbacks,
    node::{JsonString, Node},
};

enum Cursor<'a> {
    Array(slice::Iter<'a, Node>),
    Object(slice::Iter<'a, (JsonString, Node)>),
}

impl Node {
    /// Issues the events describing this tree to `sink`, in document order.
    ///
    /// Object keys go through [`Callbacks::on_map_key`].
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first error `sink` reports.
    pub fn emit<C: Callbacks>(&self, sink: &mut C) -> Result<(), C::Error> {
        let mut stack: Vec<Cursor<'_>> = Vec::new();
        let mut next = Some(self);

        loop {
            if let Some(node) = next.take() {
                match node {
                    Node::Null => sink.on_null()?,
                    Node::True => sink.on_boolean(true)?,
                    Node::False => sink.on_boolean(false)?,
                    Node::Number(n) => sink.on_number(n.as_str())?,
                    Node::String(s) => sink.on_string(s.as_bytes())?,
                    Node::Array(items) => {
                        sink.on_start_array()?;
                        stack.push(Cursor::Array(items.iter()));
                    }
                    Node::Object(object) => {
                        sink.on_start_map()?;
                        stack.push(Cursor::Object(object.iter()));
                    }
                }
            }

            let Some(top) = stack.last_mut() else {
                return Ok(());
            };
            match top {
                Cursor::Array(items) => match items.next() {
                    Some(child) => next = Some(child),
                    None => {
                        stack.pop();
                        sink.on_end_array()?;
                    }
                },
                Cursor::Object(entries) => match entries.next() {
                    Some((key, value)) => {
                        sink.on_map_key(key.as_bytes())?;
                        next = Some(value);
                    }
                    None => {
                        stack.pop();
                        sink.on_end_map()?;
                    }
                },
            }
        }
    }
}

/// Renders events as compact JSON.
struct JsonWriter<'a, W> {
    out: &'a mut W,
    needs_comma: bool,
}

impl<W: fmt::Write> JsonWriter<'_, W> {
    fn separate(&mut self) -> fmt::Result {
        if self.needs_comma {
            self.out.write_char(',')?;
        }
        Ok(())
    }

    fn scalar(&mut self, text: &str) -> fmt::Result {
        self.separate()?;
        self.out.write_str(text)?;
        self.needs_comma = true;
        Ok(())
    }

    fn open(&mut self, bracket: char) -> fmt::Result {
        self.separate()?;
        self.out.write_char(bracket)?;
        self.needs_comma = false;
        Ok(())
    }

    fn close(&mut self, bracket: char) -> fmt::Result {
        self.out.write_char(bracket)?;
        self.needs_comma = true;
        Ok(())
    }

    fn string(&mut self, bytes: &[u8]) -> fmt::Result {
        self.out.write_char('"')?;
        write_escaped_string(bytes, self.out)?;
        self.out.write_char('"')
    }
}

impl<W: fmt::Write> Callbacks for JsonWriter<'_, W> {
    type Error = fmt::Error;

    fn on_null(&mut self) -> fmt::Result {
        self.scalar("null")
    }

    fn on_boolean(&mut self, value: bool) -> fmt::Result {
        self.scalar(if value { "true" } else { "false" })
    }

    fn on_number(&mut self, numeral: &str) -> fmt::Result {
        self.scalar(numeral)
    }

    fn on_string(&mut self, bytes: &[u8]) -> fmt::Result {
        self.separate()?;
        self.string(bytes)?;
        self.needs_comma = true;
        Ok(())
    }

    fn on_map_key(&mut self, bytes: &[u8]) -> fmt::Result {
        self.separate()?;
        self.string(bytes)?;
        self.out.write_char(':')?;
        self.needs_comma = false;
        Ok(())
    }

    fn on_start_map(&mut self) -> fmt::Result {
        self.open('{')
    }

    fn on_end_map(&mut self) -> fmt::Result {
        self.close('}')
    }

    fn on_start_array(&mut self) -> fmt::Result {
        self.open('[')
    }

    fn on_end_array(&mut self) -> fmt::Result {
        self.close(']')
    }
}

/// Escapes a string's bytes for inclusion in a JSON string literal.
///
/// Quotes, backslashes, control characters and the Unicode line separators
/// are written as escapes. Byte sequences that are not UTF-8 come out as
/// U+FFFD.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &[u8], f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            // Every control character is in the BMP, so four hex digits suffice.
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
                write!(f, "\\u{:04X}", u32::from(c))?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

impl fmt::Display for Node {
    /// Compact JSON. Numbers are written from their original text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.emit(&mut JsonWriter {
            out: f,
            needs_comma: false,
        })
    }
}
