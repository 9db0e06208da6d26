use log::trace;

use crate::ast::{Entry, Field, Library};

use super::{date, fields, Paper, ARTICLE, AUTHOR_SEPARATOR};

/// Collects the fields of an entry, numbering them in the order they are added.
struct FieldBuilder {
    line: usize,
    fields: Vec<Field>,
}

impl FieldBuilder {
    const fn new() -> Self {
        Self {
            line: 1,
            fields: Vec::new(),
        }
    }

    fn add(&mut self, name: &str, value: impl Into<String>) {
        self.fields.push(Field::new(name, value, self.line));
        self.line += 1;
    }

    /// Adds the field only when there is a value, `None` leaves the field out.
    fn add_optional(&mut self, name: &str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.add(name, value);
        }
    }

    fn build(self, key: &str) -> Entry {
        Entry::new(ARTICLE, key, self.fields)
    }
}

fn encode_authors(authors: &[String]) -> String {
    authors.join(AUTHOR_SEPARATOR)
}

/// Encodes a [`Paper`] as an `article` [`Entry`] keyed by the paper's name.
///
/// Fields are added in a fixed order and any optional value that is `None` is left out of the
/// entry.
#[must_use]
pub fn entry_from_paper(paper: &Paper) -> Entry {
    trace!("Encoding paper '{}' as an {ARTICLE} entry", paper.name);

    let mut builder = FieldBuilder::new();
    builder.add(fields::AUTHOR, encode_authors(&paper.authors));
    builder.add(fields::TITLE, paper.title.as_str());
    builder.add(fields::JOURNAL, paper.journal.as_str());
    builder.add(fields::YEAR, paper.year.as_str());
    builder.add_optional(fields::VOLUME, paper.volume.as_deref());
    builder.add(fields::DATE_SEEN, date::format(paper.date_seen));
    builder.add_optional(fields::NUMBER, paper.number.as_deref());
    builder.add_optional(fields::PAGES, paper.pages.as_deref());
    builder.add_optional(fields::ABSTRACT, paper.r#abstract.as_deref());
    builder.add_optional(fields::DATE_READ, paper.date_read.map(date::format));
    builder.add_optional(fields::NOTES, paper.notes.as_deref());

    builder.build(&paper.name)
}

/// Encodes every paper, keeping their order.
#[must_use]
pub fn library_from_papers(papers: &[Paper]) -> Library {
    trace!("Encoding {} papers", papers.len());
    papers.iter().map(entry_from_paper).collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::paper::tests::lovelace;

    fn field_names(entry: &Entry) -> Vec<&str> {
        entry.fields().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn entry_is_an_article_keyed_by_name() {
        let entry = entry_from_paper(&lovelace());

        assert_eq!("article", entry.kind());
        assert_eq!("menabrea1843", entry.key());
    }

    #[test]
    fn all_fields_are_written_in_fixed_order() {
        let paper = Paper {
            number: Some("1".to_owned()),
            r#abstract: Some("An abstract".to_owned()),
            date_read: NaiveDate::from_ymd_opt(2023, 6, 1),
            ..lovelace()
        };

        let entry = entry_from_paper(&paper);

        assert_eq!(
            vec![
                "author",
                "title",
                "journal",
                "year",
                "volume",
                "date_seen",
                "number",
                "pages",
                "abstract",
                "date_read",
                "notes"
            ],
            field_names(&entry)
        );
        let lines: Vec<_> = entry.fields().iter().map(Field::line).collect();
        assert_eq!((1..=11).collect::<Vec<_>>(), lines);
    }

    #[test]
    fn absent_optional_values_are_left_out() {
        let paper = Paper {
            volume: None,
            ..lovelace()
        };

        let entry = entry_from_paper(&paper);

        assert!(!entry.contains_field("volume"));
        assert!(!entry.contains_field("number"));
        assert!(!entry.contains_field("date_read"));
        assert_eq!(
            vec!["author", "title", "journal", "year", "date_seen", "pages", "notes"],
            field_names(&entry)
        );
    }

    #[test]
    fn empty_optional_value_is_still_written() {
        let paper = Paper {
            notes: Some(String::new()),
            ..lovelace()
        };

        assert_eq!(Some(""), entry_from_paper(&paper).find_field("notes"));
    }

    #[test]
    fn authors_are_joined_with_and() {
        let entry = entry_from_paper(&lovelace());

        assert_eq!(
            Some("Ada Lovelace and Charles Babbage"),
            entry.find_field("author")
        );
    }

    #[test]
    fn dates_are_written_as_iso_dates() {
        let paper = Paper {
            date_read: NaiveDate::from_ymd_opt(2024, 1, 2),
            ..lovelace()
        };

        let entry = entry_from_paper(&paper);

        assert_eq!(Some("2023-05-17"), entry.find_field("date_seen"));
        assert_eq!(Some("2024-01-02"), entry.find_field("date_read"));
    }

    #[test]
    fn library_keeps_paper_order() {
        let second = Paper {
            name: "babbage1864".to_owned(),
            ..lovelace()
        };

        let library = library_from_papers(&[lovelace(), second]);
        let keys: Vec<_> = library.entries().map(Entry::key).collect();

        assert_eq!(vec!["menabrea1843", "babbage1864"], keys);
    }
}
