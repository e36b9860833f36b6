//! Handles extraction of a section's professor, course and roster from the
//! enrollment query page.

use super::{pattern, sel, text_of};
use crate::config::PortalConfig;
use crate::data_structs::{SectionRecord, SectionSkip, StudentRecord};
use crate::error::*;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// The compiled selectors, labels and patterns `SectionPageScraper` needs.
#[derive(Debug, Clone)]
pub struct SectionPageSels {
    label_cell: Selector,
    label: Selector,
    roster_row: Selector,
    student_id: Selector,
    student_name: Selector,
    discipline: Regex,
    professor_label: String,
    discipline_label: String
}

impl SectionPageSels {
    pub fn new(config: &PortalConfig) -> Result<Self> {
        let selectors = &config.selectors;

        Ok(SectionPageSels {
            label_cell: sel(&selectors.label_cell)?,
            label: sel(&selectors.label)?,
            roster_row: sel(&selectors.roster_row)?,
            student_id: sel(&selectors.student_id)?,
            student_name: sel(&selectors.student_name)?,
            discipline: pattern(&config.patterns.discipline, &["code", "section", "name"])?,
            professor_label: config.labels.professor.trim().into(),
            discipline_label: config.labels.discipline.trim().into()
        })
    }
}

/// Course code, section id and display name, as printed in the page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisciplineInfo {
    pub code: String,
    pub section: String,
    pub name: String
}

/// What a single pass over the roster table found.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RosterScan {
    /// Rows that had both an ID and a name, in page order.
    pub students: Vec<StudentRecord>,
    /// Number of ID cells seen.
    pub ids: usize,
    /// Number of name cells seen.
    pub names: usize,
    /// Rows with only one of the two cells.
    pub half_rows: usize
}

/// Handles extraction of content from one section's query result page.
///
/// You can either provide your own HTML string (see the `From<String>` impl)
/// or use the `http_client::Downloader`.
pub struct SectionPageScraper {
    doc: Html
}

impl From<String> for SectionPageScraper {
    fn from(html: String) -> Self {
        SectionPageScraper {
            doc: Html::parse_document(&html)
        }
    }
}

impl SectionPageScraper {
    /// Name of the professor responsible for the section.
    pub fn professor(&self, sels: &SectionPageSels) -> Option<String> {
        self.labelled_value(sels, &sels.professor_label)
    }

    /// The `Disciplina:` header line, split into its parts.
    pub fn discipline(&self, sels: &SectionPageSels) -> Option<DisciplineInfo> {
        let value = self.labelled_value(sels, &sels.discipline_label)?;
        let caps = sels.discipline.captures(&value)?;

        Some(DisciplineInfo {
            code: caps.name("code")?.as_str().trim().into(),
            section: caps.name("section")?.as_str().trim().into(),
            name: caps.name("name")?.as_str().trim().into()
        })
    }

    /// Walks the roster table once, row by row.
    ///
    /// An ID only pairs with the name in its own row. IDs must be numeric.
    pub fn roster(&self, sels: &SectionPageSels) -> RosterScan {
        let mut scan = RosterScan::default();

        for row in self.doc.select(&sels.roster_row) {
            let mut id = None;
            let mut name = None;

            // Only direct children, so an outer row doesn't swallow a nested table
            for cell in row.children().filter_map(ElementRef::wrap) {
                if sels.student_id.matches(&cell) {
                    let text = text_of(cell);
                    let text = text.trim();
                    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
                        id = Some(text.to_string());
                    }
                } else if sels.student_name.matches(&cell) {
                    let text = text_of(cell);
                    let text = text.trim();
                    if !text.is_empty() {
                        name = Some(text.to_string());
                    }
                }
            }

            scan.ids += id.is_some() as usize;
            scan.names += name.is_some() as usize;

            match (id, name) {
                (Some(institutional_id), Some(full_name)) => {
                    scan.students.push(StudentRecord { institutional_id, full_name });
                }
                (None, None) => {}
                _ => scan.half_rows += 1
            }
        }

        scan
    }

    /// Runs every extraction and decides whether the page describes a usable
    /// section. `section` is only used to label the skip reason.
    pub fn section_record(&self, sels: &SectionPageSels, section: &str) -> ::std::result::Result<SectionRecord, SectionSkip> {
        let section = section.to_string();

        let professor_name = match self.professor(sels) {
            Some(prof) => prof,
            None => return Err(SectionSkip::NoProfessor { section })
        };

        let discipline = match self.discipline(sels) {
            Some(disc) => disc,
            None => return Err(SectionSkip::NoDiscipline { section })
        };

        let scan = self.roster(sels);

        if scan.names == 0 {
            return Err(SectionSkip::EmptyRoster { section });
        }

        if scan.ids != scan.names || scan.half_rows > 0 {
            return Err(SectionSkip::InconsistentRoster {
                section,
                ids: scan.ids,
                names: scan.names
            });
        }

        Ok(SectionRecord {
            course_code: discipline.code,
            section_id: discipline.section,
            course_display_name: discipline.name,
            professor_name,
            roster: scan.students
        })
    }

    /// Text following `label` in the cell that starts with it.
    fn labelled_value(&self, sels: &SectionPageSels, label: &str) -> Option<String> {
        for cell in self.doc.select(&sels.label_cell) {
            if_chain! {
                if let Some(label_elem) = cell.children()
                                              .filter_map(ElementRef::wrap)
                                              .find(|e| sels.label.matches(e));
                if text_of(label_elem).trim() == label;
                let text = text_of(cell);
                if let Some(value) = text.trim_start().strip_prefix(label);
                let value = value.trim();
                if !value.is_empty();

            then {
                return Some(value.into());
            }}
        }

        None
    }
}

#[cfg(test)]
mod test_local_data {
    use super::*;
    use crate::test_utils::*;

    const TEST_DATA_SECTION_A: &str = include_str!("../../test_data/mc868a.html");
    const TEST_DATA_NO_PROFESSOR: &str = include_str!("../../test_data/mc868b.html");
    const TEST_DATA_EMPTY: &str = include_str!("../../test_data/mc868c_empty.html");
    const TEST_DATA_MISALIGNED: &str = include_str!("../../test_data/mc868d_misaligned.html");
    const TEST_DATA_GRAD: &str = include_str!("../../test_data/ia369z.html");
    const SECTION_A_PATH: &str = "test_data/mc868a.json";

    fn sels() -> SectionPageSels {
        SectionPageSels::new(&PortalConfig::embedded().unwrap()).unwrap()
    }

    fn scraper(html: &str) -> SectionPageScraper {
        SectionPageScraper::from(String::from(html))
    }

    #[test]
    fn valid_section() {
        let record = scraper(TEST_DATA_SECTION_A).section_record(&sels(), "MC868A").unwrap();
        let expected: SectionRecord = load(SECTION_A_PATH).unwrap();

        assert_eq!(record, expected);
        assert_eq!(record.roster.len(), 3);
    }

    #[test]
    fn fields_are_trimmed() {
        let sels = sels();
        let page = scraper(TEST_DATA_SECTION_A);

        assert_eq!(page.professor(&sels).unwrap(), "Arnaldo Vieira Moura");

        let disc = page.discipline(&sels).unwrap();
        assert_eq!(disc.code, "MC868");
        assert_eq!(disc.section, "A");
        assert_eq!(disc.name, "Linguagens Formais e Autômatos");

        for student in page.roster(&sels).students {
            assert_eq!(student.full_name, student.full_name.trim());
            assert!(!student.full_name.is_empty());
        }
    }

    #[test]
    fn same_page_same_record() {
        let sels = sels();
        let first = scraper(TEST_DATA_SECTION_A).section_record(&sels, "MC868A").unwrap();
        let second = scraper(TEST_DATA_SECTION_A).section_record(&sels, "MC868A").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_professor_stops_extraction() {
        let skip = scraper(TEST_DATA_NO_PROFESSOR).section_record(&sels(), "MC868B").unwrap_err();

        assert_eq!(skip, SectionSkip::NoProfessor { section: "MC868B".into() });
    }

    #[test]
    fn missing_discipline_line() {
        let html = TEST_DATA_SECTION_A.replace("Disciplina:", "Curso:");
        let skip = scraper(&html).section_record(&sels(), "MC868A").unwrap_err();

        assert_eq!(skip, SectionSkip::NoDiscipline { section: "MC868A".into() });
    }

    #[test]
    fn empty_section() {
        let skip = scraper(TEST_DATA_EMPTY).section_record(&sels(), "MC868C").unwrap_err();

        assert_eq!(skip, SectionSkip::EmptyRoster { section: "MC868C".into() });
    }

    #[test]
    fn count_mismatch_is_inconsistent() {
        let skip = scraper(TEST_DATA_MISALIGNED).section_record(&sels(), "MC868D").unwrap_err();

        assert_eq!(skip, SectionSkip::InconsistentRoster {
            section: "MC868D".into(),
            ids: 3,
            names: 2
        });
    }

    #[test]
    fn balanced_counts_in_wrong_rows_are_inconsistent() {
        // One row loses its name, another its ID: counts still agree
        let html = TEST_DATA_SECTION_A
            .replace(">&nbsp;&nbsp;&nbsp;&nbsp;Beatriz Santos Oliveira<", ">&nbsp;&nbsp;<")
            .replace(">123458<", "><");
        let page = scraper(&html);
        let scan = page.roster(&sels());

        assert_eq!(scan.ids, 2);
        assert_eq!(scan.names, 2);
        assert_eq!(scan.half_rows, 2);

        match page.section_record(&sels(), "MC868A") {
            Err(SectionSkip::InconsistentRoster { ids: 2, names: 2, .. }) => {}
            other => panic!("unexpected result: {:?}", other)
        }
    }

    #[test]
    fn course_code_with_space() {
        let html = TEST_DATA_SECTION_A.replace("MC868 A", "F 128 A");
        let disc = scraper(&html).discipline(&sels()).unwrap();

        assert_eq!(disc.code, "F 128");
        assert_eq!(disc.section, "A");
    }

    #[test]
    fn graduate_section() {
        let record = scraper(TEST_DATA_GRAD).section_record(&sels(), "IA369Z").unwrap();

        assert_eq!(record.course_code, "IA369");
        assert_eq!(record.section_id, "Z");
        assert_eq!(record.professor_name, "Maria Cecília Calani Baranauskas");
        assert_eq!(record.roster.len(), 2);
        assert_eq!(record.roster[0].institutional_id, "98765");
    }
}
