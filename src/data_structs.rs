use crate::error::*;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a course is offered to undergraduate or graduate students.
///
/// The portal keeps one semester selector per kind; see `SemesterSelectors`.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum EnrollmentKind {
    Undergraduate,
    Graduate
}

impl FromStr for EnrollmentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "undergrad" | "undergraduate" => Ok(EnrollmentKind::Undergraduate),
            "grad" | "graduate" => Ok(EnrollmentKind::Graduate),
            other => bail!(ErrorKind::InvalidEnrollmentKind(other.into()))
        }
    }
}

/// What to ask the portal for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Course code, e.g. `MC868`.
    pub course_code: String,
    /// Section letters to fetch, in order.
    pub section_letters: Vec<char>,
    pub academic_year: String,
    /// Semester number as the portal shows it (`1`, `2`, ...).
    pub semester: String,
    pub enrollment_kind: EnrollmentKind
}

impl QueryRequest {
    /// Builds a request from loosely typed input, the way it usually arrives
    /// from a command line or a form.
    ///
    /// Surrounding whitespace is dropped but the casing of `course` is kept as
    /// given. Fails only when `kind` is not one of the recognized enrollment
    /// kinds.
    pub fn parse(course: &str, sections: &str, year: &str, semester: &str, kind: &str) -> Result<Self> {
        Ok(QueryRequest {
            course_code: course.trim().into(),
            section_letters: sections.chars().filter(|c| !c.is_whitespace()).collect(),
            academic_year: year.trim().into(),
            semester: semester.trim().into(),
            enrollment_kind: kind.parse()?
        })
    }
}

/// The pair of semester selectors sent with every query.
///
/// Exactly one of them carries a real value; the other holds the portal's
/// "unset" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterSelectors {
    pub undergrad: String,
    pub grad: String
}

impl SemesterSelectors {
    pub fn new(kind: EnrollmentKind, semester: &str, unset: &str, grad_prefix: &str) -> Self {
        match kind {
            EnrollmentKind::Undergraduate => SemesterSelectors {
                undergrad: semester.into(),
                grad: unset.into()
            },
            EnrollmentKind::Graduate => SemesterSelectors {
                undergrad: unset.into(),
                grad: format!("{}{}", grad_prefix, semester)
            }
        }
    }
}

/// One-time security value handed out by the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        SessionToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Institutional ID ("RA").
    pub institutional_id: String,
    pub full_name: String
}

/// Everything extracted from a valid section page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub course_code: String,
    pub section_id: String,
    pub course_display_name: String,
    pub professor_name: String,
    /// Students in the order the portal lists them.
    pub roster: Vec<StudentRecord>
}

/// Why a section page did not produce a `SectionRecord`.
///
/// None of these abort a request; the section is left out of the result and
/// the reason is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionSkip {
    /// No responsible professor on the page.
    NoProfessor { section: String },
    /// No course code / section / display name line.
    NoDiscipline { section: String },
    /// The section exists but nobody is enrolled.
    EmptyRoster { section: String },
    /// IDs and names could not be paired up.
    InconsistentRoster { section: String, ids: usize, names: usize }
}

impl SectionSkip {
    /// Course code followed by the section letter, e.g. `MC868B`.
    pub fn section(&self) -> &str {
        use SectionSkip::*;

        match self {
            NoProfessor { section } |
            NoDiscipline { section } |
            EmptyRoster { section } |
            InconsistentRoster { section, .. } => section
        }
    }
}

impl fmt::Display for SectionSkip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use SectionSkip::*;

        match self {
            NoProfessor { section } => write!(f, "Section {} invalid (no professor)", section),
            NoDiscipline { section } => write!(f, "Section {} invalid (no discipline)", section),
            EmptyRoster { section } => write!(f, "Section {} invalid (no students)", section),
            InconsistentRoster { section, ids, names } => write!(
                f,
                "Problem reading students of section {} ({} ids, {} names)",
                section, ids, names
            )
        }
    }
}
