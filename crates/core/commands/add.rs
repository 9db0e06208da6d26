use chrono::NaiveDate;
use clap::Args;
use eyre::eyre;
use log::{info, trace};
use papershelf::Paper;

use super::{parse_date, today};
use crate::interact;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Unique name of the paper, used as its citation key
    name: String,

    /// Title of the paper
    #[clap(short, long)]
    title: Option<String>,

    /// An author of the paper, repeat the option for each author in citation order
    #[clap(short, long = "author")]
    authors: Vec<String>,

    /// Journal the paper was published in
    #[clap(short, long)]
    journal: Option<String>,

    /// Year the paper was published
    #[clap(short, long)]
    year: Option<String>,

    #[clap(long)]
    volume: Option<String>,

    #[clap(long)]
    number: Option<String>,

    #[clap(long)]
    pages: Option<String>,

    #[clap(long = "abstract")]
    summary: Option<String>,

    #[clap(long)]
    notes: Option<String>,

    /// The date the paper was seen, defaults to today
    #[clap(long, parse(try_from_str = parse_date))]
    seen: Option<NaiveDate>,

    /// The date the paper was read
    #[clap(long, parse(try_from_str = parse_date))]
    read: Option<NaiveDate>,
}

impl AddArgs {
    pub fn into_paper(self, interact: bool) -> eyre::Result<Paper> {
        let Self {
            name,
            title,
            mut authors,
            journal,
            year,
            volume,
            number,
            pages,
            summary,
            notes,
            seen,
            read,
        } = self;

        let title = required(title, "title", interact)?;
        if authors.is_empty() {
            if !interact {
                return Err(eyre!("At least one --author is required to add '{name}'"));
            }
            authors = prompt_authors()?;
        }
        let journal = required(journal, "journal", interact)?;
        let year = required(year, "year", interact)?;

        let date_seen = seen.unwrap_or_else(|| {
            info!("No --seen date given - using today");
            today()
        });

        Ok(Paper {
            volume,
            number,
            pages,
            r#abstract: summary,
            date_read: read,
            notes,
            ..Paper::new(name, title, authors, journal, year, date_seen)
        })
    }
}

fn required(value: Option<String>, name: &str, interact: bool) -> eyre::Result<String> {
    match value {
        Some(value) => Ok(value),
        None if interact => {
            trace!("Prompting for the missing {name}");
            interact::user_input(&format!("Enter value for the {name} field"))
        }
        None => Err(eyre!("The --{name} option is required")),
    }
}

fn prompt_authors() -> eyre::Result<Vec<String>> {
    let mut authors = Vec::new();
    while let Some(author) = interact::user_input_optional("Enter an author (empty to finish)")? {
        authors.push(author);
    }

    if authors.is_empty() {
        Err(eyre!("At least one author is required"))
    } else {
        Ok(authors)
    }
}
