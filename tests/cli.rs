use assert_cmd::prelude::*;
use assert_fs::{
    fixture::{FileWriteStr, PathChild},
    TempDir,
};
use std::process::Command;

// We check the --help output in order to confirm that the clap cli is setup correctly.
// Any arguments that are incorrectly will cause clap to panic regardless of the arguments or
// options provided.
// Calling help does not require any application logic so if this tests fails then we know it
// is to do with the clap cli setup code.
#[test]
fn check_clap_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("papershelf")?;

    cmd.arg("--help");
    cmd.assert().success();

    Ok(())
}

fn papershelf(dir: &TempDir) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("papershelf")?;
    cmd.current_dir(dir.path());
    Ok(cmd)
}

#[test]
fn add_creates_bibliography_and_list_shows_paper() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    papershelf(&dir)?
        .args([
            "add",
            "turing1936",
            "--title",
            "On Computable Numbers",
            "--author",
            "Alan Turing",
            "--journal",
            "Proc. LMS",
            "--year",
            "1936",
            "--seen",
            "2023-05-17",
        ])
        .assert()
        .success();

    let bib = std::fs::read_to_string(dir.child("bibliography.bib").path())?;
    assert!(bib.starts_with("@article{turing1936,\n"));
    assert!(bib.contains("    date_seen = {2023-05-17},\n"));

    let output = papershelf(&dir)?.arg("list").output()?;
    assert!(output.status.success());
    assert_eq!(
        "turing1936: On Computable Numbers (1936)\n",
        String::from_utf8(output.stdout)?
    );

    Ok(())
}

#[test]
fn read_sets_date_read_in_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    dir.child("papers.bib").write_str(
        "@article{turing1936,
    author = {Alan Turing},
    title = {On Computable Numbers},
    journal = {Proc. LMS},
    year = {1936},
    date_seen = {2023-05-17},
}",
    )?;

    papershelf(&dir)?
        .args(["read", "turing1936", "--on", "2023-06-01"])
        .assert()
        .success();

    let bib = std::fs::read_to_string(dir.child("papers.bib").path())?;
    assert!(bib.contains("    date_read = {2023-06-01},\n"));

    Ok(())
}

#[test]
fn invalid_entry_fails_every_command() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    dir.child("papers.bib").write_str(
        "@article{turing1936,
    author = {Alan Turing},
    journal = {Proc. LMS},
    year = {1936},
    date_seen = {2023-05-17},
}",
    )?;

    let output = papershelf(&dir)?.arg("check").output()?;

    assert_eq!(Some(2), output.status.code());
    assert!(String::from_utf8(output.stderr)?.contains("required field `title`"));

    Ok(())
}

#[test]
fn adding_a_paper_keeps_other_entries_as_written() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let existing = r#"@article{schrodinger1926,
    author = {Erwin Schr\"odinger},
    title = {Quantisierung als Eigenwertproblem},
    journal = {Annalen der Physik},
    year = {1926},
    date_seen = {2023-05-17},
    abstract = {First line.
Second line with $\psi$ and Fig.~1.},
}
"#;
    dir.child("papers.bib").write_str(existing)?;

    papershelf(&dir)?
        .args([
            "add",
            "turing1936",
            "--title",
            "On Computable Numbers",
            "--author",
            "Alan Turing",
            "--journal",
            "Proc. LMS",
            "--year",
            "1936",
            "--seen",
            "2023-05-18",
        ])
        .assert()
        .success();

    let bib = std::fs::read_to_string(dir.child("papers.bib").path())?;
    assert!(bib.starts_with(existing));
    assert!(bib.contains("@article{turing1936,\n"));

    Ok(())
}

#[test]
fn duplicate_keys_leave_the_file_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let entry = "@article{turing1936,
    author = {Alan Turing},
    title = {On Computable Numbers},
    journal = {Proc. LMS},
    year = {1936},
    date_seen = {2023-05-17},
}
";
    let content = format!("{entry}\n{entry}");
    dir.child("papers.bib").write_str(&content)?;

    let output = papershelf(&dir)?.args(["rm", "turing1936"]).output()?;

    assert_eq!(Some(2), output.status.code());
    assert!(String::from_utf8(output.stderr)?
        .contains("`turing1936` is used by more than one entry"));
    assert_eq!(content, std::fs::read_to_string(dir.child("papers.bib").path())?);

    Ok(())
}

#[test]
fn directory_named_like_a_bib_file_is_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    std::fs::create_dir(dir.child("drafts.bib").path())?;

    papershelf(&dir)?.arg("list").assert().success();

    assert!(dir.child("bibliography.bib").path().is_file());

    Ok(())
}
