//! Structs for representing a bibliography entry and all its parts, independent of the text
//! format it is read from or written to.
mod entry;
mod library;

pub use entry::*;
pub use library::Library;

/// An entry field which is essentially a key value pair.
///
/// The `line` marker orders the fields of an [`Entry`] when it is composed to text and has no
/// other meaning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    /// Name of the entry field.
    pub name: String,
    /// Value of the entry field.
    pub value: String,
    line: usize,
}

impl Field {
    pub(crate) fn new<N, V>(name: N, value: V, line: usize) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            value: value.into(),
            line,
        }
    }

    /// The `&str` representation of the `value` field.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Position of this field within its entry.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}
