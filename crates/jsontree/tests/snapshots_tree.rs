#![expect(missing_docs)]
#![expect(clippy::needless_raw_string_hashes)]

use core::fmt::Write;

use jsontree::{Node, parse};

fn render(inputs: &[&str]) -> String {
    let mut out = String::new();
    for src in inputs {
        match parse(src) {
            Ok(root) => writeln!(out, "{src} => {root}").unwrap(),
            Err(err) => writeln!(out, "{src} => error: {err}").unwrap(),
        }
    }
    out
}

#[test]
fn snapshot_rendered_trees() {
    let inputs = [
        r#"{"a":[1,"x",null,true],"b":{}}"#,
        r#"[ 1.0e+2 , -0 ]"#,
        r#""tab\there""#,
        r#""\u00e9\u2028""#,
        r#"{"k":1,"k":2} // dup"#,
        r#"[1,]"#,
        r#"{"a" 1}"#,
        r#"[1] [2]"#,
    ];

    insta::assert_snapshot!(render(&inputs), @r#"
    {"a":[1,"x",null,true],"b":{}} => {"a":[1,"x",null,true],"b":{}}
    [ 1.0e+2 , -0 ] => [1.0e+2,-0]
    "tab\there" => "tab\there"
    "\u00e9\u2028" => "é\u2028"
    {"k":1,"k":2} // dup => {"k":1,"k":2}
    [1,] => error: syntax error: invalid byte ']' at 1:4
    {"a" 1} => error: syntax error: invalid byte '1' at 1:6
    [1] [2] => error: syntax error: trailing content after the document at 1:5
    "#);
}

#[test]
fn snapshot_debug_tree() {
    let root = parse(r#"[1, "s", {"k": true}, null]"#).unwrap();
    insta::assert_snapshot!(format!("{root:?}"), @r#"Array([Number(Number { raw: "1", int: Some(1), double: Some(1.0) }), String("s"), Object(Object { entries: [("k", True)] }), Null])"#);
}

#[test]
fn snapshot_lookup_results() {
    let root = parse(r#"{"users":[{"name":"ada","id":1},{"name":"bob","id":99999999999999999999}]}"#)
        .unwrap();
    let mut out = String::new();
    for i in 0..3 {
        let user = root.get_path(&jsontree::path!["users", i]);
        let name = user.and_then(|u| u.get_path(&jsontree::path!["name"]));
        let id = user
            .and_then(|u| u.as_object())
            .and_then(|o| o.get("id"))
            .and_then(Node::as_number);
        writeln!(
            out,
            "{i}: name={:?} id_int={:?} id_double={:?}",
            name.and_then(Node::as_str),
            id.and_then(|n| n.as_i64()),
            id.and_then(|n| n.as_f64()),
        )
        .unwrap();
    }
    insta::assert_snapshot!(out, @r#"
    0: name=Some("ada") id_int=Some(1) id_double=Some(1.0)
    1: name=Some("bob") id_int=None id_double=Some(1e20)
    2: name=None id_int=None id_double=None
    "#);
}
