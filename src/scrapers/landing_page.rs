//! Handles extraction of the session token from the portal's landing page.

use super::{pattern, sel};
use crate::config::PortalConfig;
use crate::data_structs::SessionToken;
use crate::error::*;
use regex::Regex;
use scraper::{Html, Selector};

/// The compiled pieces `LandingPageScraper` needs.
#[derive(Debug, Clone)]
pub struct LandingPageSels {
    script: Selector,
    token: Regex
}

impl LandingPageSels {
    pub fn new(config: &PortalConfig) -> Result<Self> {
        Ok(LandingPageSels {
            script: sel("script")?,
            token: pattern(&config.patterns.token, &["token"])?
        })
    }
}

/// Handles extraction of content from the landing page.
///
/// You can either provide your own HTML string (see the `From<String>` impl)
/// or use the `http_client::Downloader`.
pub struct LandingPageScraper {
    doc: Html
}

impl From<String> for LandingPageScraper {
    fn from(html: String) -> Self {
        LandingPageScraper {
            doc: Html::parse_document(&html)
        }
    }
}

impl LandingPageScraper {
    /// Finds the security token the portal embeds in inline script.
    ///
    /// `None` usually means the portal is down or showing a maintenance page.
    pub fn token(&self, sels: &LandingPageSels) -> Option<SessionToken> {
        self.doc
            .select(&sels.script)
            .filter_map(|script| {
                let code = script.text().collect::<String>();
                sels.token
                    .captures(&code)
                    .and_then(|caps| caps.name("token"))
                    .map(|m| SessionToken::new(m.as_str()))
            })
            .next()
    }
}
