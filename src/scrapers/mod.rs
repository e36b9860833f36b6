//! Various modules for getting data from the portal's HTML.

pub mod landing_page;
pub mod section_page;

use crate::error::*;
use regex::Regex;
use scraper::{ElementRef, Selector};

fn sel<S: AsRef<str>>(sel: S) -> Result<Selector> {
    let sel = sel.as_ref();

    Selector::parse(sel)
        .map_err(|e| ErrorKind::InvalidConfig(format!("bad selector {:?}: {}", sel, e)).into())
}

/// Compiles `pattern`, making sure it exposes every named group in `groups`.
fn pattern(pattern: &str, groups: &[&str]) -> Result<Regex> {
    let re = Regex::new(pattern)?;

    for group in groups {
        if !re.capture_names().any(|name| name == Some(*group)) {
            bail!(ErrorKind::InvalidConfig(
                format!("pattern {:?} has no `{}` group", pattern, group)));
        }
    }

    Ok(re)
}

/// All the text below `elem`, with no-break spaces turned into plain ones.
fn text_of(elem: ElementRef) -> String {
    elem.text().collect::<String>().replace('\u{a0}', " ")
}
