//! The [`Paper`] record and its conversion to and from bibliography [`Entry`]s.
//!
//! A [`Paper`] is encoded as an `article` entry keyed by [`Paper::name`]. Fields are written in a
//! fixed order and optional values that are `None` are left out of the entry rather than written
//! empty. Decoding looks fields up by name, so the order of fields in a file doesn't matter.
//!
//! [`Entry`]: crate::ast::Entry
pub mod date;
mod decode;
mod encode;

pub use decode::{paper_from_entry, papers_from_library};
pub use encode::{entry_from_paper, library_from_papers};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Separator placed between author names in the `author` field.
///
/// Author names containing this separator won't survive a round trip.
pub const AUTHOR_SEPARATOR: &str = " and ";

/// The entry type every [`Paper`] is encoded as.
pub const ARTICLE: &str = "article";

/// Field names used by the encoded entry, in the order they are written.
pub mod fields {
    /// Author names joined by [`AUTHOR_SEPARATOR`](super::AUTHOR_SEPARATOR).
    pub const AUTHOR: &str = "author";
    /// Title of the paper.
    pub const TITLE: &str = "title";
    /// Journal the paper was published in.
    pub const JOURNAL: &str = "journal";
    /// Publication year.
    pub const YEAR: &str = "year";
    /// Journal volume.
    pub const VOLUME: &str = "volume";
    /// Date the paper was added, written as `YYYY-MM-DD`.
    pub const DATE_SEEN: &str = "date_seen";
    /// Journal issue number.
    pub const NUMBER: &str = "number";
    /// Page range.
    pub const PAGES: &str = "pages";
    /// Abstract of the paper.
    pub const ABSTRACT: &str = "abstract";
    /// Date the paper was read, written as `YYYY-MM-DD`.
    pub const DATE_READ: &str = "date_read";
    /// Free text notes.
    pub const NOTES: &str = "notes";
}

/// A paper in the collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// Unique name of the paper, used as the citation key.
    pub name: String,
    /// Title of the paper.
    pub title: String,
    /// Author names in citation order.
    pub authors: Vec<String>,
    /// Journal the paper was published in.
    pub journal: String,
    /// Publication year, kept as written.
    pub year: String,
    /// The date the paper was added to the collection.
    pub date_seen: NaiveDate,
    /// Journal volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    /// Journal issue number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Page range, e.g. `666-731`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    /// Abstract of the paper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#abstract: Option<String>,
    /// The date the paper was read, if it has been.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_read: Option<NaiveDate>,
    /// Free text notes about the paper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Paper {
    /// Create a [`Paper`] from its required values, with every optional value left as `None`.
    #[must_use]
    pub fn new<N, T, J, Y>(
        name: N,
        title: T,
        authors: Vec<String>,
        journal: J,
        year: Y,
        date_seen: NaiveDate,
    ) -> Self
    where
        N: Into<String>,
        T: Into<String>,
        J: Into<String>,
        Y: Into<String>,
    {
        Self {
            name: name.into(),
            title: title.into(),
            authors,
            journal: journal.into(),
            year: year.into(),
            date_seen,
            volume: None,
            number: None,
            pages: None,
            r#abstract: None,
            date_read: None,
            notes: None,
        }
    }
}
