use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::node::{JsonString, Node};

// Duplicate keys are written as repeated map entries, in order.
//
// A serializer nests one call per level, so unlike `Drop`, `Clone`, equality
// and `Display` this walk uses the call stack. Trees deeper than a few
// thousand levels should be rendered with `Display` or replayed with
// `Node::emit` instead.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::True => serializer.serialize_bool(true),
            Node::False => serializer.serialize_bool(false),
            Node::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => serializer.serialize_i64(i),
                (None, Some(f)) => serializer.serialize_f64(f),
                (None, None) => serializer.serialize_str(n.as_str()),
            },
            Node::String(s) => s.serialize(serializer),
            Node::Array(items) => serializer.collect_seq(items),
            Node::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, value) in object {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for JsonString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_str() {
            Ok(s) => serializer.serialize_str(s),
            Err(_) => serializer.serialize_bytes(self.as_bytes()),
        }
    }
}
