//! One identifier in, one bundle out.
//!
//! normalize → build URL → fetch page → convert → fetch images → write.
//! The identifier, page and write steps are fatal; image failures are
//! collected into the [`RunReport`] and their links point back at the
//! remote URL.

use crate::arxiv_id::ArxivId;
use crate::config::Config;
use crate::convert::{self, relink_remote};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::source::SourceUrl;
use crate::storage::OutputBundle;
use std::path::{Path, PathBuf};

/// An image that could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAsset {
    pub url: String,
    pub reason: String,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub id: ArxivId,
    pub readme: PathBuf,
    pub assets_total: usize,
    pub assets_failed: Vec<FailedAsset>,
}

impl RunReport {
    /// `"N of M images failed to download"`, or `None` when all succeeded.
    pub fn failure_summary(&self) -> Option<String> {
        if self.assets_failed.is_empty() {
            return None;
        }
        Some(format!(
            "{} of {} images failed to download",
            self.assets_failed.len(),
            self.assets_total
        ))
    }
}

/// Convert `input` into `<download_dir>/<id>[-v<version>]/`.
///
/// An invalid identifier fails before any network or filesystem access. A
/// failed page fetch fails before the bundle directory is created.
pub fn run(input: &str, download_dir: &Path, cfg: &Config) -> Result<RunReport> {
    let id = ArxivId::parse(input)?;
    let source = SourceUrl::with_base(&cfg.base_url, &id);
    tracing::info!(%id, url = %source, "fetching page");

    let fetcher = Fetcher::from_config(cfg);
    let page = fetcher.fetch_page(&source)?;
    let conversion = convert::convert(&page);
    tracing::info!(
        %id,
        images = conversion.assets.len(),
        chars = conversion.markdown.len(),
        "converted"
    );

    let downloads = fetcher.fetch_assets(&conversion.assets, cfg.max_concurrent_assets);
    let mut markdown = conversion.markdown;
    let mut fetched = Vec::with_capacity(downloads.len());
    let mut assets_failed = Vec::new();
    for (asset, result) in downloads {
        match result {
            Ok(bytes) => fetched.push((asset, bytes)),
            Err(e) => {
                tracing::warn!(url = %asset.url, error = %e, "image download failed");
                markdown = relink_remote(&markdown, asset);
                assets_failed.push(FailedAsset {
                    url: asset.url.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let bundle = OutputBundle::new(download_dir, &id);
    let readme = bundle.write(
        &markdown,
        fetched.iter().map(|(asset, bytes)| (*asset, bytes.as_slice())),
    )?;
    tracing::info!(
        readme = %readme.display(),
        images = fetched.len(),
        failed = assets_failed.len(),
        "bundle written"
    );

    Ok(RunReport {
        id,
        readme,
        assets_total: conversion.assets.len(),
        assets_failed,
    })
}
