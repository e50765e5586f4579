use alloc::string::String;

use crate::node::Node;

/// One step of a lookup path into a tree: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    Key(String),
    Index(usize),
}

// Convenient conversions so users can write `path![0, "foo"]` etc.
impl From<&str> for PathComponent {
    fn from(s: &str) -> Self {
        Self::Key(s.into())
    }
}

impl From<String> for PathComponent {
    fn from(s: String) -> Self {
        Self::Key(s)
    }
}

impl From<usize> for PathComponent {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

#[doc(hidden)]
pub trait PathComponentFrom<T> {
    fn from_path_component(value: T) -> PathComponent;
}

macro_rules! impl_integer_as_path_component {
    ($($t:ty),+) => {
        $(
            impl PathComponentFrom<$t> for PathComponent {
                fn from_path_component(value: $t) -> Self {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    PathComponent::Index(value as usize)
                }
            }
        )+
    };
}
impl_integer_as_path_component!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl PathComponentFrom<&str> for PathComponent {
    fn from_path_component(value: &str) -> Self {
        PathComponent::Key(value.into())
    }
}

impl Node {
    /// Follows `path` from this node.
    ///
    /// Keys only match objects and indices only match arrays. When an object
    /// holds the same key more than once, the first entry is followed.
    ///
    /// ```rust
    /// use jsontree::path;
    ///
    /// let root = jsontree::parse(r#"{"a": [10, {"b": true}]}"#).unwrap();
    /// assert_eq!(root.get_path(&path!["a", 0]).and_then(|n| n.as_i64()), Some(10));
    /// assert_eq!(root.get_path(&path!["a", 1, "b"]).and_then(|n| n.as_bool()), Some(true));
    /// assert!(root.get_path(&path!["a", "b"]).is_none());
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &[PathComponent]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, component| match (node, component) {
                (Node::Object(object), PathComponent::Key(key)) => object.get(key),
                (Node::Array(items), PathComponent::Index(i)) => items.get(*i),
                _ => None,
            })
    }
}
