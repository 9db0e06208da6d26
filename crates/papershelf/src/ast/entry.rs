use std::collections::HashMap;

use crate::Error;

use super::Field;

/// An intermediate representation of a bibliography entry which is not tied to a specific end
/// format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    kind: String,
    key: String,
    fields: Vec<Field>,
}

impl Entry {
    /// `fields` must be in strictly increasing [`Field::line`] order.
    pub(crate) fn new<K, C>(kind: K, key: C, fields: Vec<Field>) -> Self
    where
        K: Into<String>,
        C: Into<String>,
    {
        debug_assert!(
            fields.windows(2).all(|w| w[0].line() < w[1].line()),
            "entry fields must have strictly increasing line markers"
        );

        Self {
            kind: kind.into(),
            key: key.into(),
            fields,
        }
    }

    /// The entry type tag, e.g. `article`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The citation key of the entry.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The fields of the entry in the order they are composed.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Checks for a field called `name`, ignoring case.
    #[must_use]
    pub fn contains_field(&self, name: &str) -> bool {
        self.find_field(name).is_some()
    }

    /// The value of the first field called `name`, ignoring case.
    #[must_use]
    pub fn find_field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(Field::value)
    }

    /// Builds a name lookup over the fields of this entry.
    #[must_use]
    pub fn field_map(&self) -> FieldMap<'_> {
        FieldMap::new(self)
    }
}

/// Lookup of an [`Entry`]'s field values by field name.
///
/// Names are matched case-insensitively. When a name occurs more than once the first field wins.
#[derive(Debug)]
pub struct FieldMap<'e> {
    key: &'e str,
    values: HashMap<String, &'e str>,
}

impl<'e> FieldMap<'e> {
    fn new(entry: &'e Entry) -> Self {
        let mut values = HashMap::with_capacity(entry.fields.len());
        for field in &entry.fields {
            values
                .entry(field.name.to_lowercase())
                .or_insert_with(|| field.value());
        }

        Self {
            key: entry.key(),
            values,
        }
    }

    /// The citation key of the entry this map was built from.
    #[must_use]
    pub const fn key(&self) -> &'e str {
        self.key
    }

    /// The value of a field that must be present.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::MissingField`](crate::ErrorKind::MissingField) error naming the
    /// field and the entry key when the field is absent.
    pub fn required(&self, name: &str) -> Result<&'e str, Error> {
        self.optional(name)
            .ok_or_else(|| Error::missing_field(name, self.key))
    }

    /// The value of a field that may be absent.
    #[must_use]
    pub fn optional(&self, name: &str) -> Option<&'e str> {
        self.values.get(&name.to_lowercase()).copied()
    }
}
