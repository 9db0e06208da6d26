//! Format supporting Filesystem operations.
//!
//! This module contains basic methods for opening/creating files into a supported format and also
//! provides types to read and write from those format files.

use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, Write},
    marker::PhantomData,
    path::{Path, PathBuf},
};

use crate::{
    format::{Format, Reader, Writer},
    Error, ErrorKind,
};

use glob::glob;

/// A reference to an open file on the filesystem which should have the textual content that
/// matches the generic [`Format`].
///
/// `FormatFile`s are automatically closed when they go out of scope. Errors detected on closing are
/// ignored by the implementation of `Drop`.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct FormatFile<F: Format> {
    file: File,
    path: PathBuf,
    _format: PhantomData<F>,
}

impl<F: Format> FormatFile<F> {
    fn new(file: File, path: PathBuf) -> Self {
        Self {
            file,
            path,
            _format: PhantomData,
        }
    }

    /// Attempts to open a format file in read and write mode.
    ///
    /// The extension of `path` is replaced by [`Format::ext`].
    ///
    /// # Errors
    /// This function will return an error if `path` does not already exist or the user lacks
    /// permissions to open the file.
    ///
    /// # Examples
    /// ```no_run
    /// use papershelf::{
    ///     file::FormatFile,
    ///     format::BibTex
    /// };
    ///
    /// fn main() -> Result<(), papershelf::Error> {
    ///     let mut f = FormatFile::<BibTex>::open("papers.bib")?;
    ///     Ok(())
    /// }
    ///
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path_buf = path.as_ref().with_extension(F::ext());
        open_file_for_read_and_write(path_buf)
    }

    /// Attempts to find a single format file in the directory.
    ///
    /// This function will use the value from the [`Format::ext`] associated function to
    /// find a file with the same extension.
    ///
    /// # Errors
    /// This function will return an error if:
    /// - The path is not a directory
    /// - No file can be found in the directory, this error has the [`ErrorKind::NotFound`] kind
    /// - More than one file is found in the directory
    /// - User lacks permissions to open the file
    pub fn find<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        find_format_file_in_directory(path)
    }

    /// Creates a new format file and opens it in read and write mode.
    ///
    /// The extension of `path` is replaced by [`Format::ext`].
    ///
    /// # Errors
    /// This function will return an error if the file already exists or the user lacks
    /// permissions to create the file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path_buf = path.as_ref().with_extension(F::ext());
        create_file_for_read_and_write(path_buf)
    }

    /// The path the file was opened with.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<F: Format> Reader for FormatFile<F> {
    type Format = F;

    fn read(&mut self) -> Result<Self::Format, Error> {
        read_file_to_string(&mut self.file).map(F::new)
    }
}

fn read_file_to_string(file: &mut File) -> Result<String, Error> {
    let mut content = String::new();
    file.rewind()
        .and_then(|_| file.read_to_string(&mut content))
        .map_err(|e| Error::wrap_with(ErrorKind::IO, e, "Cannot read contents of file"))
        .map(move |bytes| {
            log::trace!("{bytes} bytes read from the file");
            content
        })
}

impl<F: Format> Writer for FormatFile<F> {
    type Format = F;

    fn write(&mut self, format: F) -> Result<(), Error> {
        fn overwrite_file_from_start(file: &mut File, bytes: &[u8]) -> std::io::Result<()> {
            // Rewind the cursor back to the start of the file to write over the contents and set
            // the length of the file to be equal to bytes so that existing data is removed
            file.rewind()?;
            file.set_len(bytes.len() as u64)?;
            file.write_all(bytes)
        }

        let bytes = format.raw().into_bytes();
        log::trace!("writing {} bytes to {}", bytes.len(), self.path.display());
        overwrite_file_from_start(&mut self.file, &bytes).map_err(|e| {
            Error::wrap_with(
                ErrorKind::IO,
                e,
                format!("Cannot write to the '{}' file", self.path.display()),
            )
        })
    }
}

#[inline]
fn open_file_for_read_and_write<F: Format>(path: PathBuf) -> Result<FormatFile<F>, Error> {
    match OpenOptions::new().read(true).write(true).open(&path) {
        Ok(file) => Ok(FormatFile::new(file, path)),
        Err(e) => Err(Error::wrap_with(
            ErrorKind::IO,
            e,
            format!(
                "Failed to open the '{}' file for reading and writing",
                path.display()
            ),
        )),
    }
}

#[inline]
fn create_file_for_read_and_write<F: Format>(path: PathBuf) -> Result<FormatFile<F>, Error> {
    match OpenOptions::new()
        .create_new(true)
        .read(true)
        .write(true)
        .open(&path)
    {
        Ok(file) => Ok(FormatFile::new(file, path)),
        Err(e) => Err(Error::wrap_with(
            ErrorKind::IO,
            e,
            format!(
                "Failed to create and open the '{}' file for reading and writing",
                path.display()
            ),
        )),
    }
}

fn find_format_file_in_directory<F, P>(dir: P) -> Result<FormatFile<F>, Error>
where
    F: Format,
    P: AsRef<Path>,
{
    let path = dir.as_ref();
    if !path.is_dir() {
        return Err(Error::new(
            ErrorKind::IO,
            format!("{} is not a directory", path.display()),
        ));
    }

    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&path.to_string_lossy()),
        F::ext()
    );

    // a directory can match the pattern too, so only keep files
    let mut iter = glob(&pattern)
        .map_err(|e| Error::wrap(ErrorKind::IO, e))?
        .filter(|entry| match entry {
            Ok(path) => path.is_file(),
            Err(_) => true,
        });

    let path_buf = iter
        .next()
        .ok_or_else(|| {
            Error::new(
                ErrorKind::NotFound,
                format!(
                    "No .{} file found in the '{}' directory",
                    F::ext(),
                    path.display()
                ),
            )
        })?
        .map_err(|e| {
            Error::wrap_with(
                ErrorKind::IO,
                e,
                "Cannot determine a file path - Do you have the correct permissions?",
            )
        })?;

    if iter.next().is_some() {
        return Err(Error::new(
            ErrorKind::IO,
            format!("More than one .{} file found", F::ext()),
        ));
    }

    open_file_for_read_and_write(path_buf)
}
