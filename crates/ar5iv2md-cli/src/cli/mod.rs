//! CLI for ar5iv2md.

use anyhow::Result;
use ar5iv2md_core::config::Config;
use ar5iv2md_core::pipeline;
use clap::Parser;
use std::path::PathBuf;

/// Convert one arXiv paper into a Markdown bundle via its ar5iv HTML rendering.
#[derive(Debug, Parser)]
#[command(name = "ar5iv2md", version)]
#[command(about = "Convert an arXiv paper to Markdown with local images", long_about = None)]
pub struct Cli {
    /// arXiv identifier or URL (2010.11929v2, arXiv:1706.03762, math/0301234, https://arxiv.org/abs/...).
    pub source: String,

    /// Directory the `<id>[-v<version>]/` bundle is written into.
    #[arg(long, short = 'o', default_value = "out", value_name = "DIR")]
    pub download_dir: PathBuf,

    /// TOML config file. Nothing is read unless this is given.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Download up to N images at once (overrides the config file).
    #[arg(long, short = 'j', value_name = "N")]
    pub jobs: Option<usize>,

    /// Per-request timeout in seconds (overrides the config file).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Append logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Debug-level logging.
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Defaults, then the `--config` file, then flags.
    pub fn effective_config(&self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(jobs) = self.jobs {
            cfg.max_concurrent_assets = jobs;
        }
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = secs;
        }
        tracing::debug!("effective config: {:?}", cfg);
        Ok(cfg)
    }

    pub fn run(&self) -> Result<()> {
        let cfg = self.effective_config()?;
        let report = pipeline::run(&self.source, &self.download_dir, &cfg)?;
        if let Some(summary) = report.failure_summary() {
            eprintln!("{summary}");
        }
        println!("{}", report.readme.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests;
