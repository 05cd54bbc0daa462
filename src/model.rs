/// A `KEY=VALUE` pair read from or written to a store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Formatting flags for serialized entries.
///
/// These affect writing only; the parser accepts quoted and unquoted,
/// spaced and unspaced assignments alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Wrap values in single quotes.
    pub use_quotes: bool,
    /// Put a space on each side of the `=`.
    pub space_assignment: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            use_quotes: true,
            space_assignment: true,
        }
    }
}
