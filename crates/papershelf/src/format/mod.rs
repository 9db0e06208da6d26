//! Contains traits and implementions of the [`Format`], [`Reader`], and [`Writer`] trait.
use std::marker::PhantomData;

#[cfg(feature = "bibtex")]
mod bibtex;

use log::trace;

use crate::{
    ast::{Entry, Library},
    paper::{library_from_papers, papers_from_library, Paper},
    Error,
};
#[cfg(feature = "bibtex")]
pub use bibtex::BibTex;

/// A textual representation that can be parsed into and composed from a [`Library`].
///
/// Formats are promises at the type level about what a [`String`] (or similar) represents.
pub trait Format {
    /// Construct a new type using a [`String`] input.
    ///
    /// This function should not panic or fail as creating a [`Format`] is a type promise about
    /// what the [`String`] represents.
    fn new(val: String) -> Self;

    /// Parses this [`Format`] into a [`Library`].
    ///
    /// # Errors
    ///
    /// Will return [`Err`] if it's not possible to parse this [`Format`] to [`Library`].
    fn parse(self) -> Result<Library, Error>;

    /// Composes a [`Library`] to this [`Format`].
    ///
    /// This function should not fail as every [`Library`] built by this crate is valid and every
    /// [`Format`] must correctly represent every valid [`Library`].
    fn compose(library: &Library) -> Self;

    /// Composes a single [`Entry`] to a [`String`].
    fn compose_entry(entry: &Entry) -> String;

    /// The current [`Format`] in a raw [`String`].
    ///
    /// Most [`Format`]s are likely to be type wrappers around [`String`] so this is a method to
    /// consume self and get that raw [`String`].
    fn raw(self) -> String;

    /// The display name of the format.
    fn name() -> &'static str;

    /// The file extension associated with this format.
    fn ext() -> &'static str;
}

/// A trait for objects which are [`Format`]-oriented sinks.
///
/// Writers are defined by implementing the [`Writer::write`] method which writes a format to this
/// given writer.
pub trait Writer {
    /// The format associated with the writer.
    type Format: Format;

    /// Write a format into this writer.
    ///
    /// # Errors
    ///
    /// The call to write should only return an [`Err`] when writing to the writer cannot be
    /// completed.
    fn write(&mut self, format: Self::Format) -> Result<(), Error>;

    /// Write a [`Library`] into this writer using [`Format::compose`] from the
    /// [`Writer::Format`] associated type.
    ///
    /// # Errors
    ///
    /// See [`Writer::write`].
    fn write_library(&mut self, library: &Library) -> Result<(), Error> {
        let format = Self::Format::compose(library);
        self.write(format)
    }

    /// Encode `papers` and write them into this writer.
    ///
    /// # Errors
    ///
    /// See [`Writer::write`].
    fn write_papers(&mut self, papers: &[Paper]) -> Result<(), Error> {
        trace!("Writing {} papers as {}", papers.len(), Self::Format::name());
        self.write_library(&library_from_papers(papers))
    }
}

/// The [`Reader`] trait allows for reading a [`Format`] from a source.
pub trait Reader {
    /// The format associated with the reader.
    type Format: Format;

    /// Pull some bytes from this reader in order to produce a [`Reader::Format`] instance.
    ///
    /// # Errors
    /// If this method encounters any form of error making it unable to read the bytes in order
    /// to create the format.
    fn read(&mut self) -> Result<Self::Format, Error>;

    /// Read using [`Reader::read`] and then parse using [`Format::parse`].
    ///
    /// # Errors
    /// This will return [`Err`] if there is an error from [`Reader::read`] or an error when
    /// parsing using [`Format::parse`].
    fn read_library(&mut self) -> Result<Library, Error> {
        let format = self.read()?;
        format.parse()
    }

    /// Read a [`Library`] and decode every entry as a [`Paper`].
    ///
    /// # Errors
    /// Any error from [`Reader::read_library`], or the first entry that fails to decode.
    fn read_papers(&mut self) -> Result<Vec<Paper>, Error> {
        let library = self.read_library()?;
        papers_from_library(&library)
    }
}

/// A [`String`] wrapper that includes type information of the format the wrapped [`String`]
/// represents.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, PartialEq, Eq)]
pub struct FormatString<F: Format> {
    inner: String,
    _format: PhantomData<F>,
}

impl<F: Format> Default for FormatString<F> {
    fn default() -> Self {
        Self {
            inner: String::default(),
            _format: PhantomData,
        }
    }
}

impl<F: Format> FormatString<F> {
    /// Construct a new instance by wrapping an existing [`String`].
    #[must_use]
    pub const fn new(val: String) -> Self {
        Self {
            inner: val,
            _format: PhantomData,
        }
    }
}

impl<F: Format> From<FormatString<F>> for String {
    fn from(val: FormatString<F>) -> Self {
        val.inner
    }
}

impl<F: Format> Reader for FormatString<F> {
    type Format = F;

    fn read(&mut self) -> Result<Self::Format, Error> {
        Ok(F::new(self.inner.clone()))
    }
}

impl<F: Format> Writer for FormatString<F> {
    type Format = F;

    /// Replaces the wrapped [`String`] with the raw format.
    fn write(&mut self, format: F) -> Result<(), Error> {
        self.inner = format.raw();
        Ok(())
    }
}
