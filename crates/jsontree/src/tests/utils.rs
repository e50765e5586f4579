use alloc::vec::Vec;

use crate::{BuildError, Node, ParseError, ParserOptions, Tokenizer, TreeBuilder};

/// Feeds `input` split at every offset in `splits` (taken modulo the
/// remaining length) and returns the finished tree.
pub(crate) fn parse_chunked(
    input: &[u8],
    splits: &[usize],
    options: ParserOptions,
) -> Result<Node, ParseError<BuildError>> {
    let mut tokenizer = Tokenizer::new(TreeBuilder::new(), options);
    let mut rest = input;
    for &s in splits {
        if rest.is_empty() {
            break;
        }
        let (chunk, tail) = rest.split_at(s % (rest.len() + 1));
        tokenizer.feed(chunk)?;
        rest = tail;
    }
    tokenizer.feed(rest)?;
    tokenizer.finish()?;
    let (line, column) = tokenizer.position();
    tokenizer
        .into_callbacks()
        .into_root()
        .map_err(|err| ParseError {
            source: crate::ErrorSource::Aborted(err),
            line,
            column,
        })
}

/// Byte-at-a-time feeding.
pub(crate) fn parse_bytewise(input: &[u8]) -> Result<Node, ParseError<BuildError>> {
    let ones: Vec<usize> = core::iter::repeat_n(1, input.len()).collect();
    parse_chunked(input, &ones, ParserOptions::tree())
}

/// Rebuilds a tree by replaying its events into a fresh builder.
pub(crate) fn rebuild(node: &Node) -> Result<Node, BuildError> {
    let mut builder = TreeBuilder::new();
    node.emit(&mut builder)?;
    builder.into_root()
}
