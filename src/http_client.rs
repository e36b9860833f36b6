//! A quick, built-in way to grab HTML from the live portal.
//!
//! This module can be disabled by building this crate without default features.

use crate::browser::Browser;
use crate::error::*;
use reqwest::blocking::Client;
use reqwest::IntoUrl;
use tracing::debug;

/// A quick, built-in way to grab HTML from the live portal.
///
/// The portal ties its security token to a session cookie, so the default
/// client keeps a cookie store.
pub struct Downloader {
    client: Client
}

impl Downloader {
    /// Create a HTTP client with reqwest's default `Client` config plus a
    /// cookie store.
    #[inline]
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::builder().cookie_store(true).build()?
        })
    }

    /// Wraps a client you built yourself, e.g. with a proxy or a timeout.
    ///
    /// The DAC hands out its token together with a session cookie and rejects
    /// queries that arrive without it, so the client needs `cookie_store(true)`.
    #[inline]
    pub fn with_client(client: Client) -> Self {
        Self {
            client
        }
    }

    /// Helper to get the HTML of the given URL.
    #[inline]
    fn get_string<U: IntoUrl>(&self, url: U) -> Result<String> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();

        if !status.is_success() {
            bail!(ErrorKind::NonSuccessStatus(resp.url().to_string(), status.as_u16()));
        }

        Ok(resp.text()?)
    }
}

impl Browser for Downloader {
    fn open(&mut self, url: &str) -> Result<String> {
        debug!(url, "opening page");
        self.get_string(url)
    }
}
