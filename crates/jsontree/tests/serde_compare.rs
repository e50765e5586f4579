#![expect(missing_docs)]

use rstest::rstest;

#[rstest]
#[case(r#"{"a":[1,2.5,"x",null,true,false],"b":{"c":{}}}"#)]
#[case(r#"[-7, 1e3, 12345678901234, "é😀"]"#)]
#[case(r#""😀""#)]
#[case("[]")]
fn serializes_like_serde_json(#[case] src: &str) {
    let root = jsontree::parse(src).unwrap();
    let ours = serde_json::to_value(&root).unwrap();
    let theirs: serde_json::Value = serde_json::from_str(src).unwrap();
    assert_eq!(ours, theirs);
}

#[test]
fn out_of_range_numbers_fall_back() {
    let root = jsontree::parse("[99999999999999999999, 1e400]").unwrap();
    assert_eq!(serde_json::to_string(&root).unwrap(), r#"[1e+20,"1e400"]"#);
}

#[test]
fn duplicate_keys_are_repeated_entries() {
    let root = jsontree::parse(r#"{"a":1,"a":2}"#).unwrap();
    assert_eq!(serde_json::to_string(&root).unwrap(), r#"{"a":1,"a":2}"#);
}
