//! Prints the rosters of a course's sections.
//!
//! Exit status is 1 when the portal could not be reached and 2 for bad input
//! or configuration.

use chrono::Datelike;
use clap::{Parser, ValueEnum};
use dac_scraper::error::{Error, ErrorKind};
use dac_scraper::http_client::Downloader;
use dac_scraper::{Portal, PortalConfig, QueryRequest, SectionRecord};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json
}

#[derive(Debug, Parser)]
#[command(version, about = "List the students enrolled in a course's sections")]
struct Args {
    /// Course code, e.g. MC868
    course: String,

    /// Section letters, e.g. AB
    sections: String,

    /// Academic year (defaults to the current year)
    #[arg(short, long)]
    year: Option<String>,

    /// Semester number
    #[arg(short, long)]
    semester: String,

    /// Enrollment kind: undergrad or grad
    #[arg(short, long, default_value = "undergrad")]
    kind: String,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Portal description to use instead of the built-in one
    #[arg(long, env = "DAC_SCRAPER_CONFIG")]
    config: Option<PathBuf>,

    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,dac_scraper={level},dac_roster={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            match e.kind() {
                ErrorKind::InvalidEnrollmentKind(_) |
                ErrorKind::InvalidConfig(_) |
                ErrorKind::Io(_) |
                ErrorKind::Toml(_) |
                ErrorKind::Regex(_) => ExitCode::from(2),
                _ => ExitCode::from(1)
            }
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let year = match &args.year {
        Some(year) => year.clone(),
        None => chrono::Local::now().year().to_string()
    };
    let request = QueryRequest::parse(&args.course, &args.sections, &year, &args.semester, &args.kind)?;

    let config = match &args.config {
        Some(path) => PortalConfig::from_file(path)?,
        None => PortalConfig::embedded()?
    };

    let mut portal = Portal::with_config(Downloader::new()?, config)?;
    debug!(landing = %portal.config().urls.landing, ?request, "starting request");

    let sections = portal.students(&request)?;

    match args.format {
        OutputFormat::Text => print_text(&sections),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&sections)
                .map_err(|e| Error::from(format!("could not serialize result: {}", e)))?
        )
    }

    Ok(())
}

fn print_text(sections: &[SectionRecord]) {
    for section in sections {
        println!(
            "{} {} - {} ({})",
            section.course_code,
            section.section_id,
            section.course_display_name,
            section.professor_name
        );

        for student in &section.roster {
            println!("  {:>8}  {}", student.institutional_id, student.full_name);
        }

        println!();
    }
}
