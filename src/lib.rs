//! Reads who is enrolled in a course's sections from the Unicamp DAC public
//! enrollment query.
//!
//! ```no_run
//! use dac_scraper::http_client::Downloader;
//! use dac_scraper::get_students;
//!
//! # fn main() -> dac_scraper::error::Result<()> {
//! let sections = get_students(Downloader::new()?, "MC868", "AB", "2013", "2", "undergrad")?;
//!
//! for section in sections {
//!     println!("{}{}: {} students", section.course_code, section.section_id, section.roster.len());
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate if_chain;

pub mod error;
pub mod browser;
pub mod config;
pub mod data_structs;
pub mod portal;
pub mod scrapers;
#[cfg(feature = "http-client")]
pub mod http_client;
#[cfg(test)]
mod test_utils;

pub use crate::browser::Browser;
pub use crate::config::PortalConfig;
pub use crate::data_structs::{EnrollmentKind, QueryRequest, SectionRecord, StudentRecord};
pub use crate::portal::{get_students, Portal};
