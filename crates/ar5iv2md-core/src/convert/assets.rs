//! Image reference discovery and rewriting during conversion.

use super::AssetReference;
use crate::asset_name::AssetNamer;
use std::collections::HashMap;
use url::Url;

/// Hosts that serve the same ar5iv content; ar5iv.org redirects to the labs host.
const AR5IV_HOSTS: &[&str] = &["ar5iv.org", "www.ar5iv.org", "ar5iv.labs.arxiv.org"];

/// Collects same-origin images in the order they appear.
#[derive(Debug)]
pub(super) struct AssetCollector {
    page: Url,
    namer: AssetNamer,
    pub(super) assets: Vec<AssetReference>,
    by_url: HashMap<String, usize>,
}

impl AssetCollector {
    pub(super) fn new(page: Url) -> Self {
        Self {
            page,
            namer: AssetNamer::new(),
            assets: Vec::new(),
            by_url: HashMap::new(),
        }
    }

    /// Markdown link target for an `<img src>`.
    ///
    /// Same-origin images become `assets/<name>` and are recorded once per
    /// resolved URL. Cross-origin images keep their absolute URL, `data:` URIs
    /// are kept verbatim. Empty sources yield `None`.
    pub(super) fn target_for(&mut self, src: &str) -> Option<String> {
        let src = src.trim();
        if src.is_empty() {
            return None;
        }
        if src.starts_with("data:") {
            return Some(src.to_string());
        }
        let url = match self.page.join(src) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!(src, "unresolvable image source: {}", e);
                return Some(src.to_string());
            }
        };
        if !self.is_same_origin(&url) {
            return Some(super::link_target(&url));
        }
        if let Some(&i) = self.by_url.get(url.as_str()) {
            return Some(self.assets[i].local_path());
        }

        let file_name = self.namer.assign(&url);
        let asset = AssetReference { url, file_name };
        let target = asset.local_path();
        self.by_url.insert(asset.url.to_string(), self.assets.len());
        self.assets.push(asset);
        Some(target)
    }

    fn is_same_origin(&self, url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }
        let (Some(host), Some(page_host)) = (url.host_str(), self.page.host_str()) else {
            return false;
        };
        let same_host = host.eq_ignore_ascii_case(page_host)
            && url.port_or_known_default() == self.page.port_or_known_default();
        let ar5iv = |h: &str| AR5IV_HOSTS.iter().any(|a| h.eq_ignore_ascii_case(a));
        same_host || (ar5iv(host) && ar5iv(page_host))
    }
}
