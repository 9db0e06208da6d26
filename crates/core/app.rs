use chrono::NaiveDate;
use eyre::eyre;
use log::{info, trace};
use papershelf::Paper;

/// The papers of the bibliography file, keeping track of whether they need writing back.
///
/// Paper names are unique on the shelf, compared without case.
#[derive(Debug, Default)]
pub struct Shelf {
    dirty: bool,
    papers: Vec<Paper>,
}

impl Shelf {
    pub fn new(papers: Vec<Paper>) -> Self {
        Self {
            dirty: false,
            papers,
        }
    }

    /// Checks and resets the `dirty` flag.
    pub fn dirty(&mut self) -> bool {
        let dirty = self.dirty;
        self.dirty = false;
        dirty
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.papers
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn insert(&mut self, paper: Paper) -> eyre::Result<()> {
        if self.contains(&paper.name) {
            return Err(eyre!(
                "A paper already exists with the name of '{}'.",
                paper.name
            ));
        }

        trace!("Adding paper '{}'", paper.name);
        self.papers.push(paper);
        self.dirty = true;
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        if let Some(at) = self.position(name) {
            let paper = self.papers.remove(at);
            info!("Removed paper '{}'", paper.name);
            self.dirty = true;
            true
        } else {
            false
        }
    }

    pub fn mark_read(&mut self, name: &str, on: NaiveDate) -> eyre::Result<&Paper> {
        let at = self
            .position(name)
            .ok_or_else(|| eyre!("No paper found with the name of '{name}'"))?;

        let paper = &mut self.papers[at];
        if paper.date_read != Some(on) {
            paper.date_read = Some(on);
            self.dirty = true;
        }
        Ok(paper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(name: &str) -> Paper {
        Paper::new(
            name,
            "On Computable Numbers",
            vec!["Alan Turing".to_owned()],
            "Proc. LMS",
            "1936",
            NaiveDate::from_ymd_opt(2023, 5, 17).unwrap(),
        )
    }

    #[test]
    fn insertion_of_paper_makes_shelf_dirty() {
        let mut shelf = Shelf::default();

        assert!(!shelf.dirty(), "Shelf::default should be clean");

        shelf.insert(paper("turing1936")).unwrap();

        assert!(shelf.dirty());
        assert!(
            !shelf.dirty(),
            "After calling Shelf::dirty the flag is reset so this second call \
                to the function should return false"
        );
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut shelf = Shelf::new(vec![paper("turing1936")]);

        let err = shelf.insert(paper("Turing1936")).unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(1, shelf.papers().len());
        assert!(!shelf.dirty());
    }

    #[test]
    fn dirty_flag_should_not_be_effected_when_nothing_is_removed() {
        let mut shelf = Shelf::new(vec![paper("turing1936")]);

        assert!(!shelf.remove("this doesn't exist!"));
        assert!(!shelf.dirty());
    }

    #[test]
    fn remove_paper_by_name() {
        let mut shelf = Shelf::new(vec![paper("a"), paper("b")]);

        assert!(shelf.remove("a"));
        assert!(shelf.dirty());
        assert_eq!("b", shelf.papers()[0].name);
    }

    #[test]
    fn mark_read_sets_date_read() {
        let mut shelf = Shelf::new(vec![paper("turing1936")]);
        let on = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();

        let read = shelf.mark_read("turing1936", on).unwrap();

        assert_eq!(Some(on), read.date_read);
        assert!(shelf.dirty());

        shelf.mark_read("turing1936", on).unwrap();
        assert!(!shelf.dirty(), "Reading on the same date changes nothing");
    }

    #[test]
    fn mark_read_unknown_paper_fails() {
        let mut shelf = Shelf::default();

        assert!(shelf
            .mark_read("missing", NaiveDate::from_ymd_opt(2023, 6, 1).unwrap())
            .is_err());
    }
}
