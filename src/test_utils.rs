use crate::browser::Browser;
use crate::error::*;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const TEST_DATA_LANDING_PAGE: &str = include_str!("../test_data/landing.html");
pub const TEST_DATA_MAINTENANCE_PAGE: &str = include_str!("../test_data/maintenance.html");

/// A `Browser` that serves canned pages and remembers what it was asked for.
///
/// Pages are looked up by a substring of the requested URL; the first
/// matching route wins. Unrouted URLs get an empty page. URLs matching a
/// `fail` entry error out as if the connection had dropped.
#[derive(Debug, Default)]
pub struct FixtureBrowser {
    routes: Vec<(String, String)>,
    failing: Vec<String>,
    pub opened: Vec<String>
}

impl FixtureBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route<S: Into<String>>(mut self, url_part: &str, body: S) -> Self {
        self.routes.push((url_part.into(), body.into()));
        self
    }

    pub fn fail(mut self, url_part: &str) -> Self {
        self.failing.push(url_part.into());
        self
    }
}

impl Browser for FixtureBrowser {
    fn open(&mut self, url: &str) -> Result<String> {
        self.opened.push(url.into());

        if self.failing.iter().any(|part| url.contains(part.as_str())) {
            bail!(io::Error::new(
                io::ErrorKind::ConnectionReset,
                format!("connection reset while reading {}", url)));
        }

        Ok(self.routes
            .iter()
            .find(|(part, _)| url.contains(part.as_str()))
            .map(|(_, body)| body.clone())
            .unwrap_or_default())
    }
}

/// A `Browser` whose every request fails, as if the network were down.
#[derive(Debug, Default)]
pub struct OfflineBrowser {
    pub attempts: usize
}

impl Browser for OfflineBrowser {
    fn open(&mut self, url: &str) -> Result<String> {
        self.attempts += 1;
        bail!(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            format!("could not connect to {}", url)))
    }
}

/// Collects formatted `tracing` output so tests can look at the diagnostics.
#[derive(Debug, Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Runs `f` with every WARN-and-above event written into this capture.
    pub fn warnings<T, F: FnOnce() -> T>(&self, f: F) -> T {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn lines(&self) -> Vec<String> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).lines().map(String::from).collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn load<P, S>(path: P) -> Result<S>
    where P: AsRef<Path>,
          S: DeserializeOwned {

    let file = File::open(path)?;
    let mut buf_reader = BufReader::new(file);
    let mut contents = String::new();
    buf_reader.read_to_string(&mut contents)?;

    serde_json::from_str(&contents)
        .map_err(|e| ErrorKind::Msg(format!("bad JSON fixture: {}", e)).into())
}
