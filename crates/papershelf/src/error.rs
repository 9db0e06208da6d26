pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// The Errors that may occur when calling the papershelf functions.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    field: Option<String>,
    key: Option<String>,
    value: Option<String>,
    source: Option<DynError>,
}

/// Types of errors that make up an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The error is associated with an underlying IO error.
    IO,
    /// An error caused when parsing the bibliography text fails.
    Deserialize,
    /// A required field is absent from an entry.
    MissingField,
    /// A date field holds text that is not a recognizable date.
    DateParse,
    /// No file of the format was found where one was looked for.
    NotFound,
}

impl Error {
    /// Creates a new [`Error`] based on the [`ErrorKind`] and message to describe the error.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            field: None,
            key: None,
            value: None,
            source: None,
        }
    }

    /// Wraps an existing error as the source of [`Error`].
    pub fn wrap<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<DynError>,
    {
        Self {
            kind,
            message: None,
            field: None,
            key: None,
            value: None,
            source: Some(source.into()),
        }
    }

    /// Wraps an existing error as the source of [`Error`] with a message describing what was
    /// being attempted.
    pub fn wrap_with<E, S>(kind: ErrorKind, source: E, message: S) -> Self
    where
        E: Into<DynError>,
        S: Into<String>,
    {
        Self {
            message: Some(message.into()),
            ..Self::wrap(kind, source)
        }
    }

    /// A required `field` was not found in the entry with the citation `key`.
    pub fn missing_field<F, K>(field: F, key: K) -> Self
    where
        F: Into<String>,
        K: Into<String>,
    {
        let (field, key) = (field.into(), key.into());
        Self {
            field: Some(field.clone()),
            key: Some(key.clone()),
            ..Self::new(
                ErrorKind::MissingField,
                format!("required field `{field}` not found in entry `{key}`"),
            )
        }
    }

    /// The `value` of the date `field` in the entry with the citation `key` is not a date.
    pub fn date_parse<F, K, V>(field: F, key: K, value: V) -> Self
    where
        F: Into<String>,
        K: Into<String>,
        V: Into<String>,
    {
        let (field, key, value) = (field.into(), key.into(), value.into());
        Self {
            field: Some(field.clone()),
            key: Some(key.clone()),
            value: Some(value.clone()),
            ..Self::new(
                ErrorKind::DateParse,
                format!("cannot read `{value}` in the `{field}` field of entry `{key}` as a date"),
            )
        }
    }

    /// More than one entry uses the citation `key`.
    pub fn duplicate_key<K: Into<String>>(key: K) -> Self {
        let key = key.into();
        Self {
            key: Some(key.clone()),
            ..Self::new(
                ErrorKind::Deserialize,
                format!("citation key `{key}` is used by more than one entry"),
            )
        }
    }

    /// Returns the kind of error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The name of the field the error is about, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// The citation key of the entry the error is about, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The offending field text, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::IO => f.write_str("IO error")?,
            ErrorKind::Deserialize => f.write_str("Deserialize error")?,
            ErrorKind::MissingField => f.write_str("Missing field error")?,
            ErrorKind::DateParse => f.write_str("Date parse error")?,
            ErrorKind::NotFound => f.write_str("Not found error")?,
        };

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }

        if let Some(cause) = &self.source {
            write!(f, ": caused by {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}
