//! Local filenames for downloaded images.
//!
//! Names come from the image URL's last path segment, sanitized. When that
//! name is unusable or already taken in the same document, a stable hash of
//! the URL keeps it unique and reproducible across runs.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::{sanitize_asset_filename, split_extension, MAX_NAME_LEN};

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use url::Url;

/// Stem used when the URL offers nothing usable.
const FALLBACK_STEM: &str = "image";
/// Extension used when the URL name has none.
const FALLBACK_EXT: &str = ".bin";
/// Hex digits of the URL hash appended to disambiguated names.
const HASH_LEN: usize = 12;
/// Room kept for a `-<n>` counter after the hash.
const COUNTER_RESERVE: usize = 8;

/// Hands out unique asset filenames within one document.
///
/// Uniqueness is case-insensitive so bundles survive case-folding filesystems.
#[derive(Debug, Default)]
pub struct AssetNamer {
    taken: HashSet<String>,
}

impl AssetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a filename for `url` and reserves it.
    ///
    /// # Examples
    ///
    /// - `.../assets/x1.png` → `"x1.png"`
    /// - a second, different `.../x1.png` → `"x1-<12 hex>.png"`
    /// - `.../render?id=3` → `"render-<12 hex>.bin"`
    pub fn assign(&mut self, url: &Url) -> String {
        let candidate = filename_from_url_path(url)
            .map(|raw| sanitize_asset_filename(&raw))
            .unwrap_or_default();

        let (stem, ext) = split_extension(&candidate);
        let usable = !candidate.is_empty() && ext.is_some();

        let name = if usable && !self.is_taken(&candidate) {
            candidate.clone()
        } else {
            let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };
            self.hashed_name(url, stem, ext.unwrap_or(FALLBACK_EXT))
        };

        self.taken.insert(name.to_ascii_lowercase());
        name
    }

    fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(&name.to_ascii_lowercase())
    }

    fn hashed_name(&self, url: &Url, stem: &str, ext: &str) -> String {
        let digest = hex::encode(Sha256::digest(url.as_str().as_bytes()));
        let stem_max = MAX_NAME_LEN - 1 - HASH_LEN - COUNTER_RESERVE - ext.len();
        let stem = &stem[..stem.len().min(stem_max)];
        let base = format!("{}-{}", stem, &digest[..HASH_LEN]);
        let mut name = format!("{base}{ext}");
        let mut n = 1;
        while self.is_taken(&name) {
            name = format!("{base}-{n}{ext}");
            n += 1;
        }
        name
    }
}
