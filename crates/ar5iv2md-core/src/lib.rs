pub mod config;
pub mod error;
pub mod logging;

pub mod arxiv_id;
pub mod asset_name;
pub mod convert;
pub mod fetch;
pub mod pipeline;
pub mod source;
pub mod storage;

pub use arxiv_id::ArxivId;
pub use error::{Error, Result};
