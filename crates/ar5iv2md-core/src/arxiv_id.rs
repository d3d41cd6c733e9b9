//! arXiv identifier normalization.
//!
//! Accepts a bare id (new style `2010.11929`, old style `math/0301234`), either
//! one with a version suffix, an `arXiv:` prefixed id, or an arxiv.org / ar5iv
//! URL in `abs`, `pdf` or `html` form. Pure string processing; never touches
//! the network.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static NEW_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4}\.[0-9]{4,5})(?:v([0-9]+))?$").unwrap());

static OLD_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z-]+(?:\.[A-Z]{2})?/[0-9]{7})(?:v([0-9]+))?$").unwrap());

const ARXIV_PREFIX: &str = "arxiv:";

/// Hosts whose `abs`/`pdf`/`html` paths carry an identifier.
const KNOWN_HOSTS: &[&str] = &[
    "arxiv.org",
    "www.arxiv.org",
    "ar5iv.org",
    "www.ar5iv.org",
    "ar5iv.labs.arxiv.org",
];

const PATH_MARKERS: &[&str] = &["/abs/", "/pdf/", "/html/"];

/// A canonical arXiv identifier, optionally pinned to a version.
///
/// `id` always has one of the two canonical shapes: `YYMM.NNNNN` or
/// `category/YYMMNNN`. A missing version means "latest".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArxivId {
    id: String,
    version: Option<String>,
}

impl ArxivId {
    /// Normalizes `input` into an identifier. Shapes are tried in order and
    /// the first match wins.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        match_bare(trimmed)
            .or_else(|| strip_arxiv_prefix(trimmed).and_then(match_bare))
            .or_else(|| match_url(trimmed))
            .ok_or_else(|| Error::InvalidIdentifier {
                input: input.to_string(),
            })
    }

    /// The identifier without version suffix.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Version digits as given by the user (without the `v`).
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// True for pre-2007 `category/YYMMNNN` identifiers.
    pub fn is_old_style(&self) -> bool {
        self.id.contains('/')
    }

    /// Directory name for the output bundle: `<id>[-v<version>]`, with the
    /// old-style `/` replaced so the bundle stays one directory deep.
    pub fn dir_name(&self) -> String {
        let base = if self.is_old_style() {
            self.id.replace('/', "_")
        } else {
            self.id.clone()
        };
        match &self.version {
            Some(v) => format!("{base}-v{v}"),
            None => base,
        }
    }
}

impl fmt::Display for ArxivId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}v{}", self.id, v),
            None => f.write_str(&self.id),
        }
    }
}

impl FromStr for ArxivId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ArxivId::parse(s)
    }
}

fn match_bare(s: &str) -> Option<ArxivId> {
    [&*NEW_STYLE, &*OLD_STYLE].into_iter().find_map(|re| {
        let caps = re.captures(s)?;
        Some(ArxivId {
            id: caps[1].to_string(),
            version: caps.get(2).map(|m| m.as_str().to_string()),
        })
    })
}

fn strip_arxiv_prefix(s: &str) -> Option<&str> {
    let head = s.get(..ARXIV_PREFIX.len())?;
    if head.eq_ignore_ascii_case(ARXIV_PREFIX) {
        Some(&s[ARXIV_PREFIX.len()..])
    } else {
        None
    }
}

fn match_url(s: &str) -> Option<ArxivId> {
    let parsed = url::Url::parse(s).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?;
    if !KNOWN_HOSTS.iter().any(|h| host.eq_ignore_ascii_case(h)) {
        return None;
    }
    let path = parsed.path();
    PATH_MARKERS.iter().find_map(|marker| {
        let start = path.find(marker)? + marker.len();
        let rest = path[start..].trim_end_matches('/');
        let rest = rest.strip_suffix(".pdf").unwrap_or(rest);
        match_bare(rest)
    })
}
