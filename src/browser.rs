//! The one capability the portal client needs from the outside world.

use crate::error::*;

/// Something that can open a URL and hand back the page body.
///
/// Implementations keep whatever session state the portal relies on (cookies)
/// between calls, which is why `open` takes `&mut self`.
pub trait Browser {
    fn open(&mut self, url: &str) -> Result<String>;
}

impl<B: Browser + ?Sized> Browser for &mut B {
    fn open(&mut self, url: &str) -> Result<String> {
        (**self).open(url)
    }
}
