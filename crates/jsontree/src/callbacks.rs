use core::{error::Error, fmt::Debug};

/// The event interface between a tokenizer and whatever consumes its output.
///
/// A tokenizer calls these methods synchronously, in document order, once per
/// token. Returning `Err` aborts the parse: the tokenizer stops issuing events
/// and reports the error to its caller.
///
/// Strings and keys are handed over as raw bytes. They are only borrowed for
/// the duration of the call.
pub trait Callbacks {
    type Error: Error + Debug + PartialEq + 'static;

    fn on_null(&mut self) -> Result<(), Self::Error>;
    fn on_boolean(&mut self, value: bool) -> Result<(), Self::Error>;

    /// A numeral, verbatim as it appeared in the input.
    fn on_number(&mut self, numeral: &str) -> Result<(), Self::Error>;
    fn on_string(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// An object key. Consumers that do not distinguish keys from string
    /// values can leave the default.
    fn on_map_key(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.on_string(bytes)
    }

    fn on_start_map(&mut self) -> Result<(), Self::Error>;
    fn on_end_map(&mut self) -> Result<(), Self::Error>;
    fn on_start_array(&mut self) -> Result<(), Self::Error>;
    fn on_end_array(&mut self) -> Result<(), Self::Error>;
}
