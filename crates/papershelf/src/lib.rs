#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

//! # papershelf
//!
//! papershelf keeps a collection of [`Paper`]s in a plain-text bibliography file. Each paper is
//! encoded as one `article` entry, so the file stays readable by any BibTeX tool, and decoded back
//! into a [`Paper`] when the file is read.
//!
//! The conversion is split in two layers:
//!
//! - [`paper`] maps a [`Paper`] to and from an [`ast::Entry`], a format independent list of
//!   named fields.
//! - [`format`] turns a [`ast::Library`] of entries into text and back, see [`format::BibTex`].
//!
//! The [`format::Reader`] and [`format::Writer`] traits combine both layers through
//! `read_papers` and `write_papers`. With the `file` feature [`file::FormatFile`] reads and
//! writes papers straight from a file on disk.

pub mod ast;
mod error;
#[cfg(feature = "file")]
pub mod file;
pub mod format;
pub mod paper;

pub use error::{Error, ErrorKind};
pub use paper::{
    entry_from_paper, library_from_papers, paper_from_entry, papers_from_library, Paper,
};
