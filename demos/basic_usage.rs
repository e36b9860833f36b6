// You may want your own error setup in your own code; here we just use the scraper's
// error types.
use dac_scraper::error::*;
use dac_scraper::http_client::Downloader;
use dac_scraper::{EnrollmentKind, Portal, QueryRequest};

fn main() {
    match actual_main() {
        Ok(()) => {},
        Err(e) => println!("\n{}\n", e)
    }
}

// We write a function so that we can return a `Result` and use `?`
fn actual_main() -> Result<()> {
    let request = QueryRequest {
        course_code: "MC868".into(),
        section_letters: vec!['A', 'B'],
        academic_year: "2013".into(),
        semester: "2".into(),
        enrollment_kind: EnrollmentKind::Undergraduate
    };

    // Get the data...
    let mut portal = Portal::new(Downloader::new()?)?;
    let sections = portal.students(&request)?;

    // ...use the data.
    println!();

    for section in &sections {
        println!("{} {} ({}) is taught by {}",
            section.course_code,
            section.section_id,
            section.course_display_name,
            section.professor_name);

        if let Some(first) = section.roster.first() {
            println!("  first of {} students: {} ({})",
                section.roster.len(),
                first.full_name,
                first.institutional_id);
        }
    }

    println!();

    Ok(())
}
