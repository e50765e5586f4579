//! The tree produced by a parse.
//!
//! This module defines the [`Node`] enum and the owned payload types it is
//! made of. Every node exclusively owns its children; there is no sharing and
//! no way to form a cycle, so dropping a node releases its subtree exactly
//! once.
use alloc::{ffi::CString, string::String, vec::Vec};
use core::{fmt, mem, slice};

use bstr::{BStr, BString, ByteSlice};

use crate::number::Number;

pub type Array = Vec<Node>;

/// The kind of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    String,
    Number,
    Object,
    Array,
    True,
    False,
    Null,
}

impl NodeKind {
    #[must_use]
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Object => "object",
            Self::Array => "array",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
        })
    }
}

/// An immutable byte string with an explicit length.
///
/// The bytes are whatever the tokenizer decoded. They are valid UTF-8 when the
/// parse validated encoding, and arbitrary otherwise.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsonString(BString);

impl JsonString {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.0.as_bstr()
    }

    /// The contents as `&str`, if they are valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns the UTF-8 error when the bytes are not valid UTF-8.
    pub fn to_str(&self) -> Result<&str, bstr::Utf8Error> {
        self.0.to_str()
    }

    /// A NUL-terminated copy for handing to C.
    ///
    /// # Errors
    ///
    /// Fails when the string contains an interior NUL byte.
    pub fn to_c_string(&self) -> Result<CString, alloc::ffi::NulError> {
        CString::new(self.as_bytes())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for JsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for JsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<&[u8]> for JsonString {
    fn from(v: &[u8]) -> Self {
        Self(BString::from(v))
    }
}

impl From<Vec<u8>> for JsonString {
    fn from(v: Vec<u8>) -> Self {
        Self(BString::from(v))
    }
}

impl From<&str> for JsonString {
    fn from(v: &str) -> Self {
        Self(BString::from(v))
    }
}

impl From<String> for JsonString {
    fn from(v: String) -> Self {
        Self(BString::from(v))
    }
}

impl PartialEq<str> for JsonString {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for JsonString {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<[u8]> for JsonString {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

/// An ordered list of key/value entries.
///
/// Entries stay in the order they were inserted. Keys are not deduplicated:
/// `{"a":1,"a":2}` is an object with two entries, both keyed `"a"`. Lookups
/// with [`Object::get`] return the first match; use [`Object::get_all`] to
/// see every entry for a key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    entries: Vec<(JsonString, Node)>,
}

impl Object {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends an entry after every existing one, even if `key` is already
    /// present.
    pub fn push(&mut self, key: JsonString, value: Node) {
        self.entries.push((key, value));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The value of the first entry whose key equals `key`.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Node> {
        let key = key.as_ref();
        self.entries
            .iter()
            .find(|(k, _)| k.as_bytes() == key)
            .map(|(_, v)| v)
    }

    /// Every value stored under `key`, in insertion order.
    pub fn get_all(&self, key: impl AsRef<[u8]>) -> impl Iterator<Item = &Node> {
        self.entries
            .iter()
            .filter(move |(k, _)| k.as_bytes() == key.as_ref())
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn entries(&self) -> &[(JsonString, Node)] {
        &self.entries
    }

    pub fn iter(&self) -> core::slice::Iter<'_, (JsonString, Node)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &JsonString> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(_, v)| v)
    }

    fn drain_values_into(&mut self, out: &mut Vec<Node>) {
        out.extend(mem::take(&mut self.entries).into_iter().map(|(_, v)| v));
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = &'a (JsonString, Node);
    type IntoIter = core::slice::Iter<'a, (JsonString, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Object {
    type Item = (JsonString, Node);
    type IntoIter = alloc::vec::IntoIter<(JsonString, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<JsonString>> FromIterator<(K, Node)> for Object {
    fn from_iter<T: IntoIterator<Item = (K, Node)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// One element of a parsed document.
///
/// # Examples
///
/// ```
/// use jsontree::{Node, NodeKind};
///
/// let root = jsontree::parse(r#"{"name": "jsontree", "tags": [1, 2]}"#).unwrap();
/// assert_eq!(root.kind(), NodeKind::Object);
///
/// let object = root.as_object().unwrap();
/// assert_eq!(object.get("name").and_then(Node::as_str), Some("jsontree"));
/// assert_eq!(object.get("tags").and_then(Node::as_array).map(Vec::len), Some(2));
/// ```
#[derive(Debug, Default)]
pub enum Node {
    String(JsonString),
    Number(Number),
    Object(Object),
    Array(Array),
    True,
    False,
    #[default]
    Null,
}

impl Node {
    /// A node of `kind` with an empty payload.
    ///
    /// Numbers start from the numeral `0`.
    #[must_use]
    pub fn empty(kind: NodeKind) -> Self {
        match kind {
            NodeKind::String => Self::String(JsonString::default()),
            NodeKind::Number => Self::Number(Number::from_numeral("0")),
            NodeKind::Object => Self::Object(Object::new()),
            NodeKind::Array => Self::Array(Array::new()),
            NodeKind::True => Self::True,
            NodeKind::False => Self::False,
            NodeKind::Null => Self::Null,
        }
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::String(_) => NodeKind::String,
            Self::Number(_) => NodeKind::Number,
            Self::Object(_) => NodeKind::Object,
            Self::Array(_) => NodeKind::Array,
            Self::True => NodeKind::True,
            Self::False => NodeKind::False,
            Self::Null => NodeKind::Null,
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Node::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::True | Self::False)
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_json_string(&self) -> Option<&JsonString> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.as_json_string().map(JsonString::as_bytes)
    }

    /// The string contents, if this is a string holding valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_json_string().and_then(|s| s.to_str().ok())
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Moves this node's children into `out`, leaving it an empty composite.
    fn take_children(&mut self, out: &mut Vec<Node>) {
        match self {
            Self::Array(items) => out.append(items),
            Self::Object(object) => object.drain_values_into(out),
            _ => {}
        }
    }
}

impl Drop for Node {
    // Children are detached onto a heap stack before they drop, so the depth
    // of the tree never turns into depth of the call stack.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

// Deep comparison walks pairs of nodes off a heap stack, like `Drop`.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = alloc::vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Self::Array(a), Self::Array(b)) => {
                    if a.len() != b.len() {
                        return false;
                    }
                    pending.extend(a.iter().zip(b));
                }
                (Self::Object(a), Self::Object(b)) => {
                    if a.len() != b.len() {
                        return false;
                    }
                    for ((ka, va), (kb, vb)) in a.iter().zip(b) {
                        if ka != kb {
                            return false;
                        }
                        pending.push((va, vb));
                    }
                }
                (Self::String(a), Self::String(b)) if a == b => {}
                (Self::Number(a), Self::Number(b)) if a == b => {}
                (Self::True, Self::True) | (Self::False, Self::False) | (Self::Null, Self::Null) => {}
                _ => return false,
            }
        }
        true
    }
}

/// A composite being copied: the source children still to visit and the
/// copy built so far.
enum CloneFrame<'a> {
    Array {
        source: slice::Iter<'a, Node>,
        items: Array,
    },
    Object {
        source: slice::Iter<'a, (JsonString, Node)>,
        object: Object,
        key: Option<JsonString>,
    },
}

impl<'a> CloneFrame<'a> {
    fn file(&mut self, value: Node) {
        match self {
            Self::Array { items, .. } => items.push(value),
            Self::Object { object, key, .. } => {
                if let Some(key) = key.take() {
                    object.push(key, value);
                }
            }
        }
    }

    fn next_child(&mut self) -> Option<&'a Node> {
        match self {
            Self::Array { source, .. } => source.next(),
            Self::Object { source, key, .. } => source.next().map(|(k, v)| {
                *key = Some(k.clone());
                v
            }),
        }
    }

    fn finish(self) -> Node {
        match self {
            Self::Array { items, .. } => Node::Array(items),
            Self::Object { object, .. } => Node::Object(object),
        }
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        let mut stack: Vec<CloneFrame<'_>> = Vec::new();
        let mut next = Some(self);

        while let Some(node) = next.take() {
            let mut done = match node {
                Self::Array(items) => {
                    stack.push(CloneFrame::Array {
                        source: items.iter(),
                        items: Array::with_capacity(items.len()),
                    });
                    None
                }
                Self::Object(object) => {
                    stack.push(CloneFrame::Object {
                        source: object.iter(),
                        object: Object::with_capacity(object.len()),
                        key: None,
                    });
                    None
                }
                Self::String(s) => Some(Self::String(s.clone())),
                Self::Number(n) => Some(Self::Number(n.clone())),
                Self::True => Some(Self::True),
                Self::False => Some(Self::False),
                Self::Null => Some(Self::Null),
            };

            // Climb until some composite has a child left to copy.
            while next.is_none() {
                let Some(frame) = stack.last_mut() else {
                    return done.unwrap_or_default();
                };
                if let Some(value) = done.take() {
                    frame.file(value);
                }
                match frame.next_child() {
                    Some(child) => next = Some(child),
                    None => done = stack.pop().map(CloneFrame::finish),
                }
            }
        }

        Self::Null
    }
}

impl From<bool> for Node {
    fn from(v: bool) -> Self {
        if v { Self::True } else { Self::False }
    }
}

impl From<Number> for Node {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Self::Number(v.into())
    }
}

impl From<JsonString> for Node {
    fn from(v: JsonString) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Node {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Node {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

/// Releases a tree.
///
/// Equivalent to dropping it; `None` is accepted and does nothing. Because the
/// node is moved in, the same tree cannot be released twice.
pub fn free(node: Option<Node>) {
    drop(node);
}
