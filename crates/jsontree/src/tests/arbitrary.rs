use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use quickcheck::{Arbitrary, Gen};

use crate::{Array, JsonString, Node, Number, Object};

/// A numeral as a JSON writer would produce it.
#[derive(Debug, Clone)]
pub(crate) struct Numeral(pub(crate) String);

impl Arbitrary for Numeral {
    fn arbitrary(g: &mut Gen) -> Self {
        match usize::arbitrary(g) % 3 {
            0 => Self(i64::arbitrary(g).to_string()),
            1 => {
                let mut value = f64::arbitrary(g);
                while !value.is_finite() {
                    value = f64::arbitrary(g);
                }
                Self(format!("{value}"))
            }
            _ => Self(format!(
                "{}.{}e{}",
                i8::arbitrary(g),
                u16::arbitrary(g),
                i16::arbitrary(g) % 500
            )),
        }
    }
}

// Keys come from a small pool so that duplicates show up regularly.
fn key(g: &mut Gen) -> JsonString {
    if bool::arbitrary(g) {
        g.choose(&["a", "b", "", "\u{0}", "ключ"])
            .copied()
            .unwrap_or("a")
            .into()
    } else {
        String::arbitrary(g).into()
    }
}

impl Arbitrary for Node {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_node(g: &mut Gen, depth: usize) -> Node {
            let choices = if depth == 0 { 5 } else { 7 };
            match usize::arbitrary(g) % choices {
                0 => Node::Null,
                1 => bool::arbitrary(g).into(),
                2 => Node::Number(Number::from_numeral(&Numeral::arbitrary(g).0)),
                3 | 4 => Node::String(String::arbitrary(g).into()),
                5 => {
                    let len = usize::arbitrary(g) % 4;
                    let items: Array = (0..len).map(|_| gen_node(g, depth - 1)).collect();
                    Node::Array(items)
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let object: Object = (0..len)
                        .map(|_| (key(g), gen_node(g, depth - 1)))
                        .collect();
                    Node::Object(object)
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        gen_node(g, depth)
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        let children: Vec<Node> = match self {
            Node::Array(items) => items.clone(),
            Node::Object(object) => object.values().cloned().collect(),
            _ => Vec::new(),
        };
        alloc::boxed::Box::new(children.into_iter())
    }
}

/// Raw bytes for string payloads, not necessarily UTF-8.
#[derive(Debug, Clone)]
pub(crate) struct RawTree(pub(crate) Node);

impl Arbitrary for RawTree {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut items = Array::new();
        for _ in 0..usize::arbitrary(g) % 6 {
            let bytes = Vec::<u8>::arbitrary(g);
            items.push(Node::String(bytes.clone().into()));
            items.push(Node::Object(core::iter::once((bytes, Node::Null)).collect()));
        }
        Self(Node::Array(items))
    }
}
