#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{path::PathBuf, process};

mod app;
mod commands;
mod file;
mod interact;

use app::Shelf;
use commands::Commands;

use papershelf::format::{BibTex, Reader, Writer};

use clap::{Args, Parser};
use eyre::WrapErr;
use log::trace;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli {
        command,
        global_opts:
            GlobalOpts {
                file,
                interact,
                verbosity,
                quiet,
            },
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    // `quiet` and `interact` cannot be set at the same time
    let interact = interact && !quiet;

    if interact {
        trace!("Interact mode enabled");
    }

    let mut file = file::open_or_create_format_file::<BibTex>(file)?;
    let papers = file
        .read_papers()
        .wrap_err_with(|| format!("Cannot read papers from '{}'", file.path().display()))?;

    let mut shelf = Shelf::new(papers);

    let command_res = command.execute(&mut shelf, interact);

    if shelf.dirty() {
        trace!("Updating the bibliography file..");
        file.write_papers(shelf.papers())
            .wrap_err_with(|| format!("Cannot update '{}'", file.path().display()))?;
        trace!("Done!");
    }

    let message = command_res?;
    if !quiet {
        println!("{message}");
    }
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 1 } else { verbosity + 2 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "papershelf")]
#[clap(about = "Keep track of the papers you have seen and read in a BibTeX file")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// The name of the bibliography file
    ///
    /// When not given the current directory is searched for a single .bib file, and
    /// `bibliography.bib` is created when there is none.
    #[clap(short, long, parse(from_os_str), global = true)]
    file: Option<PathBuf>,

    /// Enables interactive mode, which prompts for values that were not given on the command line.
    #[clap(short, long, global = true)]
    interact: bool,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long, global = true)]
    quiet: bool,
}
