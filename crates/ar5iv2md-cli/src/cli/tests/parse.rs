//! Argument parsing.

use super::parse;
use crate::cli::Cli;
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_defaults() {
    let cli = parse(&["ar5iv2md", "2010.11929v2"]);
    assert_eq!(cli.source, "2010.11929v2");
    assert_eq!(cli.download_dir, Path::new("out"));
    assert!(cli.config.is_none());
    assert!(cli.jobs.is_none());
    assert!(cli.timeout.is_none());
    assert!(cli.log_file.is_none());
    assert!(!cli.verbose);
}

#[test]
fn cli_parse_all_flags() {
    let cli = parse(&[
        "ar5iv2md",
        "https://arxiv.org/abs/1706.03762",
        "--download-dir",
        "/tmp/papers",
        "--config",
        "ar5iv2md.toml",
        "--jobs",
        "8",
        "--timeout",
        "60",
        "--log-file",
        "run.log",
        "-v",
    ]);
    assert_eq!(cli.source, "https://arxiv.org/abs/1706.03762");
    assert_eq!(cli.download_dir, Path::new("/tmp/papers"));
    assert_eq!(cli.config.as_deref(), Some(Path::new("ar5iv2md.toml")));
    assert_eq!(cli.jobs, Some(8));
    assert_eq!(cli.timeout, Some(60));
    assert_eq!(cli.log_file.as_deref(), Some(Path::new("run.log")));
    assert!(cli.verbose);
}

#[test]
fn cli_parse_short_flags() {
    let cli = parse(&["ar5iv2md", "-o", "papers", "-j", "1", "arXiv:math/0301234"]);
    assert_eq!(cli.source, "arXiv:math/0301234");
    assert_eq!(cli.download_dir, Path::new("papers"));
    assert_eq!(cli.jobs, Some(1));
}

#[test]
fn cli_requires_exactly_one_source() {
    assert!(Cli::try_parse_from(["ar5iv2md"]).is_err());
    assert!(Cli::try_parse_from(["ar5iv2md", "1706.03762", "2010.11929"]).is_err());
}

#[test]
fn cli_rejects_non_numeric_jobs() {
    assert!(Cli::try_parse_from(["ar5iv2md", "1706.03762", "--jobs", "many"]).is_err());
}
