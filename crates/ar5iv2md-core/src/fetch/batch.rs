//! Bounded-concurrency image downloads.

use super::Fetcher;
use crate::convert::AssetReference;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

impl Fetcher {
    /// Downloads every asset, at most `max_concurrent` at a time.
    ///
    /// Results come back in the order of `assets`. A failed download is
    /// returned as an `Err` entry; it never aborts the others.
    pub fn fetch_assets<'a>(
        &self,
        assets: &'a [AssetReference],
        max_concurrent: usize,
    ) -> Vec<(&'a AssetReference, Result<Vec<u8>>)> {
        if assets.is_empty() {
            return Vec::new();
        }

        let work: Mutex<VecDeque<(usize, &AssetReference)>> =
            Mutex::new(assets.iter().enumerate().collect());
        let (tx, rx) = mpsc::channel();
        let num_workers = max_concurrent.max(1).min(assets.len());

        thread::scope(|s| {
            for _ in 0..num_workers {
                let tx = tx.clone();
                let work = &work;
                s.spawn(move || loop {
                    let next = match work.lock() {
                        Ok(mut queue) => queue.pop_front(),
                        Err(_) => None,
                    };
                    let Some((index, asset)) = next else {
                        break;
                    };
                    let result = self.get(asset.url.as_str()).map(|r| r.body);
                    if tx.send((index, result)).is_err() {
                        break;
                    }
                });
            }
        });
        drop(tx);

        let mut slots: Vec<Option<Result<Vec<u8>>>> = assets.iter().map(|_| None).collect();
        for (index, result) in rx {
            slots[index] = Some(result);
        }

        assets
            .iter()
            .zip(slots)
            .map(|(asset, slot)| {
                let result = slot.unwrap_or_else(|| {
                    Err(Error::network(asset.url.as_str(), "download worker stopped"))
                });
                (asset, result)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use url::Url;

    fn unreachable(name: &str) -> AssetReference {
        AssetReference {
            url: Url::parse(&format!("http://127.0.0.1:9/assets/{name}")).unwrap(),
            file_name: name.to_string(),
        }
    }

    #[test]
    fn empty_batch_makes_no_requests() {
        let fetcher = Fetcher::from_config(&Config::default());
        assert!(fetcher.fetch_assets(&[], 4).is_empty());
    }

    #[test]
    fn failures_are_per_asset_and_keep_order() {
        let cfg = Config {
            connect_timeout_secs: 2,
            timeout_secs: 2,
            ..Config::default()
        };
        let fetcher = Fetcher::from_config(&cfg);
        let assets = [unreachable("x1.png"), unreachable("x2.png"), unreachable("x3.png")];
        let results = fetcher.fetch_assets(&assets, 2);
        let names: Vec<&str> = results.iter().map(|(a, _)| a.file_name.as_str()).collect();
        assert_eq!(names, ["x1.png", "x2.png", "x3.png"]);
        for (_, result) in results {
            assert!(matches!(result, Err(Error::Network { .. })));
        }
    }
}
