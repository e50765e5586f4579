//! Incremental construction of a [`Node`] tree from parse events.
//!
//! Open objects and arrays live on an explicit stack of frames; nothing here
//! recurses, so the nesting depth of a document is bounded by memory rather
//! than by the call stack. When a value completes it is handed to
//! [`TreeBuilder::add_value`], which files it under whatever the top frame
//! exposes: the pending key slot or entry list of an object, the item list of
//! an array, or, once the stack is empty, the root.
use alloc::vec::Vec;
use core::mem;

use crate::{
    error::BuildError,
    node::{Array, JsonString, Node, NodeKind, Object},
};

/// Stack entry – one per open container
#[derive(Debug)]
enum Frame {
    Object {
        object: Object,
        pending_key: Option<JsonString>, // key waiting for its value
    },
    Array {
        items: Array,
    },
}

impl Frame {
    fn open(mut node: Node) -> Result<Self, BuildError> {
        match &mut node {
            Node::Object(object) => Ok(Frame::Object {
                object: mem::take(object),
                pending_key: None,
            }),
            Node::Array(items) => Ok(Frame::Array {
                items: mem::take(items),
            }),
            other => Err(BuildError::NotAComposite(other.kind())),
        }
    }

    fn kind(&self) -> NodeKind {
        match self {
            Frame::Object { .. } => NodeKind::Object,
            Frame::Array { .. } => NodeKind::Array,
        }
    }

    fn into_node(self) -> Node {
        match self {
            Frame::Object { object, .. } => Node::Object(object),
            Frame::Array { items } => Node::Array(items),
        }
    }
}

/// State for building one tree.
///
/// A builder is normally driven by a [`Tokenizer`](crate::Tokenizer) through
/// its [`Callbacks`](crate::Callbacks) implementation, but the stack
/// operations are public so that events can be replayed by hand.
///
/// # Examples
///
/// ```rust
/// use jsontree::{Callbacks, TreeBuilder};
///
/// let mut builder = TreeBuilder::new();
/// builder.on_start_map().unwrap();
/// builder.on_map_key(b"k").unwrap();
/// builder.on_string(b"v").unwrap();
/// builder.on_end_map().unwrap();
///
/// let root = builder.into_root().unwrap();
/// assert_eq!(root.as_object().unwrap().get("k").and_then(|v| v.as_str()), Some("v"));
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    frames: Vec<Frame>,
    root: Option<Node>,
}

impl TreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(16),
            root: None,
        }
    }

    /// Number of composites currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The completed root, if the last value has been added.
    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Opens `node` as the new innermost composite.
    ///
    /// # Errors
    ///
    /// [`BuildError::NotAComposite`] if `node` is not an object or an array.
    pub fn push(&mut self, node: Node) -> Result<(), BuildError> {
        let frame = Frame::open(node).map_err(abort)?;
        tracing::trace!(depth = self.frames.len() + 1, kind = %frame.kind(), "open");
        self.frames.push(frame);
        Ok(())
    }

    /// Removes the innermost composite and returns it as a node.
    ///
    /// A pending key held by an object frame is discarded.
    pub fn pop(&mut self) -> Option<Node> {
        self.frames.pop().map(Frame::into_node)
    }

    /// Closes the innermost composite, which must be of kind `closing`, and
    /// files it under its parent.
    pub(crate) fn close(&mut self, closing: NodeKind) -> Result<(), BuildError> {
        let frame = self.frames.pop().ok_or_else(|| abort(BuildError::UnbalancedClose))?;
        tracing::trace!(depth = self.frames.len(), kind = %frame.kind(), "close");
        match frame {
            Frame::Object {
                pending_key: Some(_),
                ..
            } => Err(abort(BuildError::DanglingKey)),
            frame if frame.kind() != closing => Err(abort(BuildError::MismatchedClose {
                expected: frame.kind(),
                found: closing,
            })),
            frame => self.add_value(frame.into_node()),
        }
    }

    /// Files a completed value under the innermost composite, or makes it the
    /// root when no composite is open.
    ///
    /// Inside an object, values alternate between keys and the values paired
    /// with them: a value arriving while no key is pending becomes the key and
    /// must be a string.
    ///
    /// # Errors
    ///
    /// [`BuildError::RootAlreadySet`] for a second top-level value, and
    /// [`BuildError::TypeMismatch`] for a non-string key.
    pub fn add_value(&mut self, value: Node) -> Result<(), BuildError> {
        match self.frames.last_mut() {
            None => {
                if self.root.is_some() {
                    return Err(abort(BuildError::RootAlreadySet));
                }
                tracing::trace!(kind = %value.kind(), "root complete");
                self.root = Some(value);
            }
            Some(Frame::Object {
                object,
                pending_key,
            }) => match pending_key.take() {
                Some(key) => object.push(key, value),
                None => *pending_key = Some(into_key(value).map_err(abort)?),
            },
            Some(Frame::Array { items }) => items.push(value),
        }
        Ok(())
    }

    /// Consumes the builder and returns the finished tree.
    ///
    /// # Errors
    ///
    /// [`BuildError::Incomplete`] while composites are still open, and
    /// [`BuildError::NoValue`] if no value was ever completed.
    pub fn into_root(mut self) -> Result<Node, BuildError> {
        if !self.frames.is_empty() {
            return Err(abort(BuildError::Incomplete {
                open: self.frames.len(),
            }));
        }
        self.root.take().ok_or_else(|| abort(BuildError::NoValue))
    }
}

fn into_key(mut value: Node) -> Result<JsonString, BuildError> {
    match &mut value {
        Node::String(key) => Ok(mem::take(key)),
        other => Err(BuildError::TypeMismatch {
            expected: NodeKind::String,
            found: other.kind(),
        }),
    }
}

fn abort(err: BuildError) -> BuildError {
    tracing::debug!(%err, "tree builder aborted");
    err
}
