use alloc::{string::ToString, vec::Vec};

use quickcheck::QuickCheck;

use super::{
    arbitrary::RawTree,
    utils::{parse_chunked, rebuild},
};
use crate::{Node, ParserOptions, parse};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: replaying a tree's events into a fresh builder yields an equal
/// tree.
#[test]
fn emit_rebuild_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(node: Node) -> bool {
        rebuild(&node).is_ok_and(|rebuilt| rebuilt == node)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Node) -> bool);
}

/// Property: string payloads are opaque bytes to the builder.
#[test]
fn raw_bytes_rebuild_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(tree: RawTree) -> bool {
        rebuild(&tree.0).is_ok_and(|rebuilt| rebuilt == tree.0)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(RawTree) -> bool);
}

/// Property: the rendered text of a tree parses back to the same tree.
#[test]
fn render_parse_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(node: Node) -> bool {
        parse(node.to_string()).is_ok_and(|parsed| parsed == node)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Node) -> bool);
}

/// Property: feeding a document in arbitrary byte-sized chunks, splitting
/// multi-byte characters and escapes alike, builds the same tree as feeding it
/// whole.
#[test]
fn partition_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(node: Node, splits: Vec<usize>) -> bool {
        let src = node.to_string();
        parse_chunked(src.as_bytes(), &splits, ParserOptions::default())
            .is_ok_and(|parsed| parsed == node)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Node, Vec<usize>) -> bool);
}

/// Property: chunking never changes the outcome of parsing arbitrary bytes.
#[test]
fn garbage_input_is_chunk_invariant_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(input: Vec<u8>, splits: Vec<usize>) -> bool {
        let whole = parse(&input);
        let chunked = parse_chunked(&input, &splits, ParserOptions::tree());
        match (whole, chunked) {
            (Ok(a), Ok(b)) => a == b,
            (Err(a), Err(b)) => a == b,
            _ => false,
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>, Vec<usize>) -> bool);
}
