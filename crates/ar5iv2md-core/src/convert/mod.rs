//! ar5iv HTML to Markdown.
//!
//! Runs html2md with handlers that drop page chrome, keep TeX for formulas and
//! collect same-origin images as [`AssetReference`]s pointing at `assets/`.
//! Same document and page URL always give the same Markdown and asset list.

mod article;
mod assets;
mod dom;
mod handlers;
mod math;
mod table;

use crate::fetch::FetchedDocument;
use assets::AssetCollector;
use std::cell::RefCell;
use std::rc::Rc;
use url::Url;

/// Directory inside the bundle that holds downloaded images.
pub const ASSETS_DIR: &str = "assets";

/// An image the Markdown refers to by local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    /// Absolute source URL.
    pub url: Url,
    /// Filename under `assets/`, unique within the document.
    pub file_name: String,
}

impl AssetReference {
    /// Relative path used in the Markdown, e.g. `assets/x1.png`.
    pub fn local_path(&self) -> String {
        format!("{}/{}", ASSETS_DIR, self.file_name)
    }
}

/// Converter output.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub markdown: String,
    /// Assets in order of first appearance.
    pub assets: Vec<AssetReference>,
}

/// Convert a fetched page.
pub fn convert(doc: &FetchedDocument) -> Conversion {
    convert_html(&doc.text(), &doc.url)
}

/// Convert `html` served from `page_url` (the base for relative image links).
pub fn convert_html(html: &str, page_url: &Url) -> Conversion {
    let collector = Rc::new(RefCell::new(AssetCollector::new(page_url.clone())));
    let registry = handlers::registry(&collector);
    let content = article::main_content(html);
    let markdown = html2md::parse_html_custom(&content, &registry);
    drop(registry);

    let assets = std::mem::take(&mut collector.borrow_mut().assets);
    Conversion { markdown, assets }
}

/// Points every link to `asset` back at its remote URL. Used when the
/// download failed so the README does not reference a missing file.
pub fn relink_remote(markdown: &str, asset: &AssetReference) -> String {
    markdown.replace(
        &format!("]({})", asset.local_path()),
        &format!("]({})", link_target(&asset.url)),
    )
}

/// Absolute URL as a Markdown link destination. `Url` leaves parentheses
/// unencoded, and an unbalanced `)` would end the link early.
pub(crate) fn link_target(url: &Url) -> String {
    url.as_str().replace('(', "%28").replace(')', "%29")
}
