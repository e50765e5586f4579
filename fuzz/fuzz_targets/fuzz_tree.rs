#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use jsontree::{BuildError, Node, ParseError, ParserOptions, Tokenizer, TreeBuilder};
use libfuzzer_sys::fuzz_target;

#[derive(Debug)]
struct Input<'a> {
    allow_comments: bool,
    check_utf8: bool,
    splits: Vec<u16>,
    data: &'a [u8],
}

impl<'a> Arbitrary<'a> for Input<'a> {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Input {
            allow_comments: u.arbitrary()?,
            check_utf8: u.arbitrary()?,
            splits: u.arbitrary()?,
            data: u.bytes(u.len())?,
        })
    }
}

fn parse_chunked(
    data: &[u8],
    splits: &[u16],
    options: ParserOptions,
) -> Result<Node, ParseError<BuildError>> {
    let mut tokenizer = Tokenizer::new(TreeBuilder::new(), options);
    let mut rest = data;
    for &s in splits {
        if rest.is_empty() {
            break;
        }
        let (chunk, tail) = rest.split_at(usize::from(s) % (rest.len() + 1));
        tokenizer.feed(chunk)?;
        rest = tail;
    }
    tokenizer.feed(rest)?;
    tokenizer.finish()?;
    Ok(tokenizer
        .into_callbacks()
        .into_root()
        .expect("a finished tokenizer always leaves a complete tree"))
}

fn check(data: &[u8]) {
    let Ok(input) = Input::arbitrary(&mut Unstructured::new(data)) else {
        return;
    };
    let options = ParserOptions {
        allow_comments: input.allow_comments,
        check_utf8: input.check_utf8,
    };

    let whole = jsontree::parse_with_options(input.data, options);
    let chunked = parse_chunked(input.data, &input.splits, options);
    assert_eq!(whole, chunked, "chunking changed the outcome");

    let Ok(root) = whole else {
        return;
    };

    let mut rebuilt = TreeBuilder::new();
    root.emit(&mut rebuilt).expect("replaying a tree cannot fail");
    assert_eq!(rebuilt.into_root().as_ref(), Ok(&root));

    // Rendering is only lossless for valid UTF-8 strings.
    if input.check_utf8 {
        let text = root.to_string();
        let reparsed = jsontree::parse(&text).expect("rendered text must parse");
        assert_eq!(reparsed, root);

        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
            assert_eq!(value.is_array(), root.is_array());
            assert_eq!(value.is_object(), root.is_object());
        }
    }
}

fuzz_target!(|data: &[u8]| check(data));
