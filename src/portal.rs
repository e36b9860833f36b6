//! Drives a session against the portal: one token handshake, then one query
//! per requested section.

use crate::browser::Browser;
use crate::config::PortalConfig;
use crate::data_structs::{QueryRequest, SectionRecord, SectionSkip, SemesterSelectors, SessionToken};
use crate::error::*;
use crate::scrapers::landing_page::{LandingPageScraper, LandingPageSels};
use crate::scrapers::section_page::{SectionPageScraper, SectionPageSels};
use tracing::{debug, info, warn};

/// A client for the portal's public enrollment query.
///
/// Owns the page source and everything compiled from the `PortalConfig`, so a
/// single value carries the whole session.
pub struct Portal<B> {
    browser: B,
    config: PortalConfig,
    landing_sels: LandingPageSels,
    section_sels: SectionPageSels
}

impl<B: Browser> Portal<B> {
    /// Uses the built-in description of the portal.
    pub fn new(browser: B) -> Result<Self> {
        Self::with_config(browser, PortalConfig::embedded()?)
    }

    pub fn with_config(browser: B, config: PortalConfig) -> Result<Self> {
        Ok(Portal {
            landing_sels: LandingPageSels::new(&config)?,
            section_sels: SectionPageSels::new(&config)?,
            browser,
            config
        })
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Opens the landing page and pulls the security token out of it.
    ///
    /// Every later query depends on this token, so failing to get one (network
    /// error or a page without it) is reported as `PortalUnreachable`.
    pub fn acquire_token(&mut self) -> Result<SessionToken> {
        let html = self.browser
            .open(&self.config.urls.landing)
            .chain_err(|| ErrorKind::PortalUnreachable)?;

        match LandingPageScraper::from(html).token(&self.landing_sels) {
            Some(token) => {
                info!("session token acquired");
                Ok(token)
            }
            None => bail!(ErrorKind::PortalUnreachable)
        }
    }

    /// Queries a single section and extracts its record.
    ///
    /// The outer `Result` is a failure to fetch the page; the inner one says
    /// whether the page described a usable section.
    pub fn fetch_section(
        &mut self,
        token: &SessionToken,
        course_code: &str,
        section_letter: char,
        year: &str,
        semester: &SemesterSelectors
    ) -> Result<::std::result::Result<SectionRecord, SectionSkip>> {
        let url = self.config.query_url(
            token.as_str(),
            course_code,
            section_letter,
            &semester.undergrad,
            &semester.grad,
            year
        );
        let html = self.browser.open(&url)?;
        let section = format!("{}{}", course_code, section_letter);

        Ok(SectionPageScraper::from(html).section_record(&self.section_sels, &section))
    }

    /// Gets the professor, course name and roster of every requested section.
    ///
    /// Sections that turn out invalid, empty or unreadable are logged and left
    /// out; so is a section whose page could not be downloaded. Only a failure
    /// to start the session aborts the whole request.
    pub fn students(&mut self, request: &QueryRequest) -> Result<Vec<SectionRecord>> {
        let semester = SemesterSelectors::new(
            request.enrollment_kind,
            &request.semester,
            &self.config.semester.unset,
            &self.config.semester.grad_prefix
        );

        let token = self.acquire_token()?;
        let mut result = vec![];

        for &letter in &request.section_letters {
            debug!(course = %request.course_code, section = %letter, "fetching section");

            match self.fetch_section(&token, &request.course_code, letter, &request.academic_year, &semester) {
                Ok(Ok(record)) => {
                    debug!(
                        section = %format!("{}{}", record.course_code, record.section_id),
                        students = record.roster.len(),
                        "section read"
                    );
                    result.push(record);
                }
                Ok(Err(skip)) => warn!(section = %skip.section(), "{}", skip),
                Err(e) => warn!(
                    section = %format!("{}{}", request.course_code, letter),
                    error = %e,
                    "could not fetch section"
                )
            }
        }

        info!(
            course = %request.course_code,
            requested = request.section_letters.len(),
            found = result.len(),
            "request finished"
        );

        Ok(result)
    }
}

/// Checks `kind` and, if it is recognized, fetches every section in
/// `sections` through `browser`.
///
/// An unrecognized `kind` returns `InvalidEnrollmentKind` before anything is
/// requested.
pub fn get_students<B: Browser>(
    browser: B,
    course: &str,
    sections: &str,
    year: &str,
    semester: &str,
    kind: &str
) -> Result<Vec<SectionRecord>> {
    let request = QueryRequest::parse(course, sections, year, semester, kind)?;

    Portal::new(browser)?.students(&request)
}
