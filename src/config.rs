//! Everything the scrapers need to know about the portal's URLs and markup.
//!
//! The defaults are embedded from `config/portal.toml`; a replacement file with
//! the same layout can be loaded at runtime when the portal changes.

use crate::error::*;
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_PORTAL_CONFIG_STR: &str = include_str!("../config/portal.toml");

/// Placeholders the query template must contain.
pub const QUERY_PLACEHOLDERS: [&str; 6] =
    ["{token}", "{course}", "{section}", "{undergrad}", "{grad}", "{year}"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    pub urls: Urls,
    pub patterns: Patterns,
    pub labels: Labels,
    pub selectors: SelectorStrs,
    pub semester: SemesterConfig
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Urls {
    /// Page that hands out the session token.
    pub landing: String,
    /// Query URL template; see `QUERY_PLACEHOLDERS`.
    pub query: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patterns {
    /// Must have a `token` capture group.
    pub token: String,
    /// Must have `code`, `section` and `name` capture groups.
    pub discipline: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    pub professor: String,
    pub discipline: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorStrs {
    pub label_cell: String,
    pub label: String,
    pub roster_row: String,
    pub student_id: String,
    pub student_name: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterConfig {
    /// Value sent in the selector that does not apply.
    pub unset: String,
    /// Prepended to the semester for graduate queries.
    pub grad_prefix: String
}

impl PortalConfig {
    /// The built-in description of the DAC portal.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_PORTAL_CONFIG_STR)
    }

    /// Parses a TOML document with the layout of `config/portal.toml`.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: PortalConfig = toml::from_str(s)?;
        config.check()?;

        Ok(config)
    }

    /// Loads a replacement config from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Fills the query template in.
    pub fn query_url(
        &self,
        token: &str,
        course: &str,
        section: char,
        undergrad: &str,
        grad: &str,
        year: &str
    ) -> String {
        self.urls.query
            .replace("{token}", token)
            .replace("{course}", course)
            .replace("{section}", &section.to_string())
            .replace("{undergrad}", undergrad)
            .replace("{grad}", grad)
            .replace("{year}", year)
    }

    fn check(&self) -> Result<()> {
        for placeholder in QUERY_PLACEHOLDERS.iter() {
            if !self.urls.query.contains(placeholder) {
                bail!(ErrorKind::InvalidConfig(
                    format!("query URL template is missing {}", placeholder)));
            }
        }

        if self.semester.unset.is_empty() {
            bail!(ErrorKind::InvalidConfig("semester.unset must not be empty".into()));
        }

        Ok(())
    }
}
