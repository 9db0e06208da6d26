use std::path::{Path, PathBuf};

use papershelf::{file::FormatFile, format::Format, ErrorKind};

use eyre::{Context, Result};
use log::{info, trace};

const DEFAULT_FILE_NAME: &str = "bibliography";

#[allow(clippy::module_name_repetitions)]
pub fn open_or_create_format_file<F: Format>(file_name: Option<PathBuf>) -> Result<FormatFile<F>> {
    if let Some(path) = file_name {
        trace!("opening {} file as a {} file", path.display(), F::name());
        return open_or_create(&path);
    }

    trace!("Searching current directory for any {} files", F::name());
    match FormatFile::find(".") {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let path = PathBuf::from(DEFAULT_FILE_NAME).with_extension(F::ext());
            info!(
                "No .{} file found in current directory - creating the new file `{}`",
                F::ext(),
                path.display()
            );
            FormatFile::create(&path).map_err(Into::into)
        }
        Err(e) => Err(e).wrap_err("Use the --file option to select a file"),
    }
}

fn open_or_create<F: Format>(path: &Path) -> Result<FormatFile<F>> {
    if path.with_extension(F::ext()).exists() {
        FormatFile::open(path).map_err(Into::into)
    } else {
        info!("Creating the new file `{}`", path.with_extension(F::ext()).display());
        FormatFile::create(path).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use papershelf::format::BibTex;

    use assert_fs::{
        fixture::{FileTouch, PathChild},
        TempDir,
    };

    #[test]
    fn open_existing_file_by_name() {
        let dir = TempDir::new().expect("Cannot create temp directory for test");
        let child = dir.child("papers.bib");
        child.touch().unwrap();

        let file = open_or_create::<BibTex>(child.path()).unwrap();

        assert_eq!(child.path(), file.path());
    }

    #[test]
    fn create_named_file_when_missing() {
        let dir = TempDir::new().expect("Cannot create temp directory for test");
        let path = dir.child("papers");

        let file = open_or_create::<BibTex>(path.path()).unwrap();

        assert!(dir.child("papers.bib").path().exists());
        assert_eq!(Some(std::ffi::OsStr::new("bib")), file.path().extension());
    }
}
