use chrono::NaiveDate;
use log::{debug, trace, warn};

use crate::{
    ast::{Entry, FieldMap, Library},
    Error,
};

use super::{date, fields, Paper, ARTICLE, AUTHOR_SEPARATOR};

fn parse_authors(authors: &str) -> Vec<String> {
    if authors.is_empty() {
        return Vec::new();
    }

    authors
        .split(AUTHOR_SEPARATOR)
        .map(ToOwned::to_owned)
        .collect()
}

fn parse_date(map: &FieldMap<'_>, name: &str, value: &str) -> Result<Option<NaiveDate>, Error> {
    date::parse(value).map_err(|e| Error::date_parse(name, map.key(), e.text()))
}

fn required_date(map: &FieldMap<'_>, name: &str) -> Result<NaiveDate, Error> {
    let value = map.required(name)?;
    parse_date(map, name, value)?.ok_or_else(|| {
        debug!("'{name}' of entry '{}' is present but empty", map.key());
        Error::missing_field(name, map.key())
    })
}

fn optional_date(map: &FieldMap<'_>, name: &str) -> Result<Option<NaiveDate>, Error> {
    match map.optional(name) {
        Some(value) => parse_date(map, name, value),
        None => Ok(None),
    }
}

fn optional_string(map: &FieldMap<'_>, name: &str) -> Option<String> {
    let value = map.optional(name).map(ToOwned::to_owned);
    if value.is_none() {
        debug!("entry '{}' has no '{name}' field", map.key());
    }
    value
}

/// Decodes an [`Entry`] into a [`Paper`], using the entry's key as the paper's name.
///
/// # Errors
///
/// - [`ErrorKind::MissingField`](crate::ErrorKind::MissingField) when one of `author`, `title`,
///   `journal`, `year` or `date_seen` is absent, or `date_seen` is empty.
/// - [`ErrorKind::DateParse`](crate::ErrorKind::DateParse) when `date_seen` or `date_read` is not
///   a date (see [`date::parse`]).
pub fn paper_from_entry(entry: &Entry) -> Result<Paper, Error> {
    trace!("Decoding entry '{}'", entry.key());

    if !entry.kind().eq_ignore_ascii_case(ARTICLE) {
        warn!(
            "entry '{}' is a '{}' entry, decoding it as an {ARTICLE}",
            entry.key(),
            entry.kind()
        );
    }

    let map = entry.field_map();

    Ok(Paper {
        name: entry.key().to_owned(),
        authors: parse_authors(map.required(fields::AUTHOR)?),
        title: map.required(fields::TITLE)?.to_owned(),
        journal: map.required(fields::JOURNAL)?.to_owned(),
        year: map.required(fields::YEAR)?.to_owned(),
        date_seen: required_date(&map, fields::DATE_SEEN)?,
        volume: optional_string(&map, fields::VOLUME),
        number: optional_string(&map, fields::NUMBER),
        pages: optional_string(&map, fields::PAGES),
        r#abstract: optional_string(&map, fields::ABSTRACT),
        date_read: optional_date(&map, fields::DATE_READ)?,
        notes: optional_string(&map, fields::NOTES),
    })
}

/// Decodes every entry of the library in order.
///
/// # Errors
///
/// Stops at the first entry that fails to decode and returns its error, see
/// [`paper_from_entry`].
pub fn papers_from_library(library: &Library) -> Result<Vec<Paper>, Error> {
    trace!("Decoding {} entries", library.len());
    library.entries().map(paper_from_entry).collect()
}
