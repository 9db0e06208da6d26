use std::collections::{HashMap, HashSet};

use crate::{
    ast::{Entry, Field, Library},
    Error, ErrorKind,
};

use super::Format;

use biblatex::{RawBibliography, RawEntry};
use log::{debug, trace};

/// Entry types that carry no citation and are dropped when parsing.
const NON_CITATIONS: [&str; 2] = ["comment", "preamble"];

/// A type wrapper around [`String`] to represent a `BibTex` format string.
///
/// Field values are read as they are written between their delimiters, so TeX markup such as
/// `\"o`, `~` or `$...$` and line breaks are kept unchanged.
#[derive(Debug, PartialEq, Eq)]
pub struct BibTex(String);

impl Format for BibTex {
    fn new(val: String) -> Self {
        Self(val)
    }

    fn parse(self) -> Result<Library, Error> {
        if self.0.trim().is_empty() {
            trace!("Empty BibTeX string parsed as an empty library");
            return Ok(Library::default());
        }

        // biblatex panics on a `}` that closes a quoted value
        let raw = std::panic::catch_unwind(|| RawBibliography::parse(&self.0)).map_err(|_| {
            Error::new(
                ErrorKind::Deserialize,
                "Unbalanced braces or quotes in BibTeX string",
            )
        })?;

        let mut keys = HashSet::new();
        let mut entries = Vec::with_capacity(raw.entries.len());
        for raw_entry in &raw.entries {
            if NON_CITATIONS
                .iter()
                .any(|kind| raw_entry.entry_type.eq_ignore_ascii_case(kind))
            {
                debug!("Skipping @{} block", raw_entry.entry_type);
                continue;
            }

            let entry = entry_from_raw(raw_entry, &raw.abbreviations)?;
            if !keys.insert(entry.key().to_lowercase()) {
                return Err(Error::duplicate_key(entry.key()));
            }
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(Error::new(
                ErrorKind::Deserialize,
                "Unable to parse string as BibTeX",
            ));
        }

        trace!("Parsed {} BibTeX entries", entries.len());
        Ok(Library::new(entries))
    }

    fn compose(library: &Library) -> Self {
        let bib = library
            .entries()
            .map(Self::compose_entry)
            .collect::<Vec<_>>()
            .join("\n");

        Self(bib)
    }

    fn compose_entry(entry: &Entry) -> String {
        format!(
            "@{}{{{},\n{}}}\n",
            entry.kind(),
            entry.key(),
            compose_fields(entry.fields())
        )
    }

    fn raw(self) -> String {
        self.0
    }

    fn name() -> &'static str {
        "BibTex"
    }

    fn ext() -> &'static str {
        "bib"
    }
}

fn compose_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| format!("    {} = {{{}}},\n", field.name, field.value))
        .collect()
}

fn entry_from_raw(
    entry: &RawEntry<'_>,
    abbreviations: &HashMap<&str, &str>,
) -> Result<Entry, Error> {
    if entry.key.is_empty() {
        return Err(Error::new(
            ErrorKind::Deserialize,
            format!("Found a @{} entry without a citation key", entry.entry_type),
        ));
    }

    // Raw fields are slices of the source text so their addresses give the source order
    let mut fields = entry.fields.iter().collect::<Vec<_>>();
    fields.sort_by_key(|(name, _)| name.as_ptr());

    let fields = fields
        .into_iter()
        .enumerate()
        .map(|(i, (name, value))| Field::new(*name, field_text(value, abbreviations), i + 1))
        .collect();

    Ok(Entry::new(entry.entry_type, entry.key, fields))
}

/// The text of a raw field value: `#` concatenations are joined, delimiters are removed and bare
/// words naming an `@string` abbreviation are replaced by its text.
fn field_text(value: &str, abbreviations: &HashMap<&str, &str>) -> String {
    split_concatenation(value)
        .into_iter()
        .map(|part| match strip_delimiters(part) {
            Some(text) => text,
            None => abbreviations
                .get(part)
                .map_or(part, |abbr| strip_delimiters(abbr).unwrap_or(*abbr)),
        })
        .collect()
}

fn split_concatenation(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0_usize;
    let mut quoted = false;
    let mut escape = false;

    for (i, c) in value.char_indices() {
        if escape {
            escape = false;
            continue;
        }

        match c {
            '\\' => escape = true,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '"' if depth == 0 => quoted = !quoted,
            '#' if depth == 0 && !quoted => {
                parts.push(value[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(value[start..].trim());

    parts
}

/// The text inside a `{...}` or `"..."` value, `None` for a bare word or number.
fn strip_delimiters(part: &str) -> Option<&str> {
    let delimited = (part.starts_with('{') && part.ends_with('}'))
        || (part.starts_with('"') && part.ends_with('"'));

    (part.len() >= 2 && delimited).then(|| &part[1..part.len() - 1])
}
