use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::{Node, parse};

const DEPTH: usize = 100_000;

fn nested_arrays(depth: usize) -> String {
    let mut s = String::with_capacity(depth * 2);
    s.extend(core::iter::repeat_n('[', depth));
    s.extend(core::iter::repeat_n(']', depth));
    s
}

fn measure_depth(mut node: &Node) -> usize {
    let mut depth = 0;
    while let Some(items) = node.as_array() {
        depth += 1;
        match items.first() {
            Some(child) => node = child,
            None => break,
        }
    }
    depth
}

#[test]
fn deep_arrays_parse_render_and_drop() {
    let src = nested_arrays(DEPTH);
    let root = parse(&src).unwrap();
    assert_eq!(measure_depth(&root), DEPTH);
    assert_eq!(root.to_string(), src);
    drop(root);
}

#[test]
fn deep_objects_parse_and_drop() {
    let mut src = String::new();
    for _ in 0..DEPTH {
        src.push_str(r#"{"k":"#);
    }
    src.push_str("null");
    src.extend(core::iter::repeat_n('}', DEPTH));

    let root = parse(&src).unwrap();
    let mut node = &root;
    let mut depth = 0;
    while let Some(child) = node.as_object().and_then(|o| o.get("k")) {
        node = child;
        depth += 1;
    }
    assert_eq!(depth, DEPTH);
    assert!(node.is_null());
}

#[test]
fn deep_unfinished_input_cleans_up() {
    let src: Vec<u8> = core::iter::repeat_n(b'[', DEPTH).collect();
    let err = parse(&src).unwrap_err();
    assert_eq!(err.syntax(), Some(&crate::SyntaxError::UnexpectedEndOfInput));
}

fn nested_around(depth: usize, leaf: &str) -> String {
    let mut s = String::new();
    s.extend(core::iter::repeat_n('[', depth));
    s.push_str(leaf);
    s.extend(core::iter::repeat_n(']', depth));
    s
}

// `assert!` rather than `assert_eq!`: a failure message would `Debug` the
// whole tree.
#[test]
fn deep_arrays_compare_and_clone() {
    let src = nested_arrays(DEPTH);
    let a = parse(&src).unwrap();
    let b = parse(&src).unwrap();
    assert!(a == b);

    let copy = a.clone();
    assert!(copy == a);
    assert_eq!(measure_depth(&copy), DEPTH);

    assert!(a != parse(nested_arrays(DEPTH - 1)).unwrap());
    assert!(
        parse(nested_around(DEPTH, "1")).unwrap() != parse(nested_around(DEPTH, "2")).unwrap()
    );
}

#[test]
fn deep_objects_compare_and_clone() {
    let mut src = String::new();
    for i in 0..DEPTH {
        src.push_str(if i % 2 == 0 { r#"{"k":"# } else { r#"{"j":"# });
    }
    src.push_str("true");
    src.extend(core::iter::repeat_n('}', DEPTH));

    let root = parse(&src).unwrap();
    let copy = root.clone();
    assert!(copy == root);
    assert!(copy.to_string() == src);

    let other = parse(src.replace("true", "false")).unwrap();
    assert!(other != root);
}

#[test]
fn equality_respects_order_kind_and_duplicates() {
    assert_eq!(parse(r#"{"a":1,"a":2}"#).unwrap(), parse(r#"{"a":1,"a":2}"#).unwrap());
    assert_ne!(parse(r#"{"a":1,"b":2}"#).unwrap(), parse(r#"{"b":2,"a":1}"#).unwrap());
    assert_ne!(parse(r#"{"a":1}"#).unwrap(), parse(r#"{"a":1,"a":1}"#).unwrap());
    assert_ne!(parse("[1,2]").unwrap(), parse("[2,1]").unwrap());
    assert_ne!(parse("[]").unwrap(), parse("{}").unwrap());
    assert_ne!(parse("1").unwrap(), parse("1.0").unwrap());
    assert_ne!(parse("true").unwrap(), parse("false").unwrap());

    let root = parse(r#"{"a":[1,{"b":null}],"a":"x"}"#).unwrap();
    assert_eq!(root.clone(), root);
}
