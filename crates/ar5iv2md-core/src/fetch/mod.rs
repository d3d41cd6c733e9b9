//! HTTP GET for the ar5iv page and its images.
//!
//! Uses the curl crate (libcurl). One request per call, no retries: a failed
//! page fetch ends the run, a failed image is reported by the caller.

mod batch;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::source::SourceUrl;
use std::borrow::Cow;
use std::time::Duration;
use url::Url;

/// Raw ar5iv page plus the URL it was finally served from.
///
/// `url` is the post-redirect location and is the base for relative image links.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub url: Url,
    pub body: Vec<u8>,
}

impl FetchedDocument {
    /// Body decoded as UTF-8; invalid sequences become U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Successful response of a single GET.
#[derive(Debug, Clone)]
pub struct Response {
    /// URL after following redirects.
    pub effective_url: String,
    pub body: Vec<u8>,
}

/// Blocking HTTP client settings shared by all requests of a run.
#[derive(Debug, Clone)]
pub struct Fetcher {
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    max_redirects: u32,
}

impl Fetcher {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            max_redirects: cfg.max_redirects,
        }
    }

    /// GET `url`, following redirects. Non-2xx status is an error.
    pub fn get(&self, url: &str) -> Result<Response> {
        let net = |e: curl::Error| Error::network(url, e);
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(net)?;
        easy.useragent(&self.user_agent).map_err(net)?;
        easy.follow_location(true).map_err(net)?;
        easy.max_redirections(self.max_redirects).map_err(net)?;
        easy.connect_timeout(self.connect_timeout).map_err(net)?;
        easy.timeout(self.timeout).map_err(net)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(net)?;
            transfer.perform().map_err(net)?;
        }

        let code = easy.response_code().map_err(net)?;
        if !(200..300).contains(&code) {
            return Err(Error::network(url, format!("HTTP {code}")));
        }

        let effective_url = easy
            .effective_url()
            .map_err(net)?
            .map(str::to_string)
            .unwrap_or_else(|| url.to_string());
        tracing::debug!(url, effective = %effective_url, bytes = body.len(), "GET ok");

        Ok(Response {
            effective_url,
            body,
        })
    }

    /// Fetch the paper page. Any failure here is fatal for the run.
    pub fn fetch_page(&self, source: &SourceUrl) -> Result<FetchedDocument> {
        let response = self.get(source.as_str())?;
        let url = Url::parse(&response.effective_url)
            .or_else(|_| Url::parse(source.as_str()))
            .map_err(|e| Error::network(source.as_str(), e))?;
        Ok(FetchedDocument {
            url,
            body: response.body,
        })
    }
}
