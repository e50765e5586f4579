use crate::{
    builder::TreeBuilder,
    callbacks::Callbacks,
    error::BuildError,
    node::{Array, Node, NodeKind, Object},
    number::Number,
};

// Keys and string values take the same path: the builder tells them apart by
// whether the innermost object already holds a pending key.
impl Callbacks for TreeBuilder {
    type Error = BuildError;

    fn on_null(&mut self) -> Result<(), BuildError> {
        self.add_value(Node::Null)
    }

    fn on_boolean(&mut self, value: bool) -> Result<(), BuildError> {
        self.add_value(value.into())
    }

    fn on_number(&mut self, numeral: &str) -> Result<(), BuildError> {
        self.add_value(Node::Number(Number::from_numeral(numeral)))
    }

    fn on_string(&mut self, bytes: &[u8]) -> Result<(), BuildError> {
        self.add_value(Node::String(bytes.into()))
    }

    fn on_start_map(&mut self) -> Result<(), BuildError> {
        self.push(Node::Object(Object::new()))
    }

    fn on_end_map(&mut self) -> Result<(), BuildError> {
        self.close(NodeKind::Object)
    }

    fn on_start_array(&mut self) -> Result<(), BuildError> {
        self.push(Node::Array(Array::new()))
    }

    fn on_end_array(&mut self) -> Result<(), BuildError> {
        self.close(NodeKind::Array)
    }
}
