//! Error taxonomy for a single conversion run.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input matched none of the accepted identifier shapes. Raised before any I/O.
    #[error("not a recognizable arXiv identifier or URL: {input:?}")]
    InvalidIdentifier { input: String },

    /// Connection failure, timeout, or non-2xx HTTP status.
    #[error("fetching {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// Directory creation or file write failed.
    #[error("writing {} failed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file given with `--config` could not be read or parsed.
    #[error("config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

impl Error {
    pub(crate) fn network(url: &str, reason: impl ToString) -> Self {
        Error::Network {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for scripting consumers.
    ///
    /// 2 is what clap uses for usage errors, so a bad config file shares it.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidIdentifier { .. } => 1,
            Error::Config { .. } => 2,
            Error::Network { .. } => 3,
            Error::Io { .. } => 4,
        }
    }
}
