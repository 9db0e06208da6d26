mod add;

use crate::app::Shelf;
use add::AddArgs;

use chrono::NaiveDate;
use clap::Subcommand;
use eyre::WrapErr;
use log::trace;

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Add a paper to the bibliography file
    #[clap(arg_required_else_help = true)]
    Add(AddArgs),

    /// Record that a paper has been read
    #[clap(arg_required_else_help = true)]
    Read {
        /// The name of the paper
        name: String,

        /// The date the paper was read, defaults to today
        #[clap(long, parse(try_from_str = parse_date))]
        on: Option<NaiveDate>,
    },

    /// Remove a paper from the bibliography file using its name
    #[clap(arg_required_else_help = true)]
    Rm {
        /// The name of the paper to remove
        name: String,
    },

    /// List the papers in the bibliography file
    List {
        /// Print the papers as JSON
        #[clap(long)]
        json: bool,
    },

    /// Check that every entry of the bibliography file has the fields of a paper.
    ///
    /// This check is done before every command but can be done explicitly using this command.
    Check,
}

impl Commands {
    pub fn execute(self, shelf: &mut Shelf, interact: bool) -> eyre::Result<String> {
        match self {
            Commands::Add(args) => {
                let paper = args.into_paper(interact)?;
                let name = paper.name.clone();
                shelf.insert(paper)?;
                Ok(format!("Added '{name}' to the bibliography"))
            }
            Commands::Read { name, on } => {
                let on = on.unwrap_or_else(today);
                let paper = shelf.mark_read(&name, on)?;
                Ok(format!("'{}' read on {on}", paper.name))
            }
            Commands::Rm { name } => {
                trace!("Checking current bibliography for a paper with this name..");
                if shelf.remove(&name) {
                    Ok("Paper removed from bibliography".to_owned())
                } else {
                    Ok(format!("No paper found with the name of '{name}'"))
                }
            }
            Commands::List { json } => {
                if json {
                    serde_json::to_string_pretty(shelf.papers())
                        .wrap_err("Cannot serialize papers as JSON")
                } else {
                    Ok(shelf
                        .papers()
                        .iter()
                        .map(|p| format!("{}: {} ({})", p.name, p.title, p.year))
                        .collect::<Vec<_>>()
                        .join("\n"))
                }
            }
            // trivially if the papers were read at this point then every entry was valid
            Commands::Check => Ok(format!(
                "All {} entries contain the fields of a paper!",
                shelf.papers().len()
            )),
        }
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Reads a command line date using the same rules as dates in the bibliography file.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    papershelf::paper::date::parse(s)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "a date is required".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_dates_follow_file_rules() {
        assert_eq!(NaiveDate::from_ymd_opt(2023, 5, 17), parse_date("2023-05-17").ok());
        assert_eq!(
            NaiveDate::from_ymd_opt(2023, 5, 17),
            parse_date("2023-05-17T09:00:00Z").ok()
        );
        assert!(parse_date("").is_err());
        assert!(parse_date("tomorrow").is_err());
    }
}
