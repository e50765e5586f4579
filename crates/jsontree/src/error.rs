use thiserror::Error;

use crate::node::NodeKind;

/// Reasons the tree builder refuses an event.
///
/// Any of these aborts the parse. The builder owns every node it has seen so
/// far, so nothing built before the failure outlives it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// An object expected a key and was offered some other kind of value.
    #[error("expected {expected} but found {found}")]
    TypeMismatch {
        expected: NodeKind,
        found: NodeKind,
    },
    /// Only objects and arrays can be opened as frames.
    #[error("cannot open a frame for {0}")]
    NotAComposite(NodeKind),
    /// A close event arrived with no open composite.
    #[error("close event without a matching open")]
    UnbalancedClose,
    /// A close event named the wrong kind of composite.
    #[error("expected the close of {expected} but found the close of {found}")]
    MismatchedClose {
        expected: NodeKind,
        found: NodeKind,
    },
    /// An object was closed while a key was still waiting for its value.
    #[error("object closed with a key that has no value")]
    DanglingKey,
    /// A second top-level value completed.
    #[error("root value is already set")]
    RootAlreadySet,
    /// The events ended with composites still open.
    #[error("{open} composite value(s) left open")]
    Incomplete { open: usize },
    /// The events ended before any value completed.
    #[error("no value was built")]
    NoValue,
}
