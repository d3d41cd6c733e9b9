//! ar5iv endpoint URL for an identifier.

use crate::arxiv_id::ArxivId;
use std::fmt;

/// Template prefix for ar5iv HTML renderings.
pub const DEFAULT_BASE_URL: &str = "https://ar5iv.org/html/";

/// The ar5iv HTML URL of one paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl(String);

impl SourceUrl {
    /// `<base>/<id>`, e.g. `https://ar5iv.org/html/2010.11929v2` for
    /// [`DEFAULT_BASE_URL`]. Other prefixes point at mirrors or test servers.
    pub fn with_base(base: &str, id: &ArxivId) -> Self {
        SourceUrl(format!("{}/{}", base.trim_end_matches('/'), id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
