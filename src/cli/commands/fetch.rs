//! # Fetch Command Module / 获取命令模块
//!
//! Implements `galaxy-ci fetch <url>`.
//!
//! 实现 `galaxy-ci fetch <url>`。

use anyhow::Result;
use clap::ArgMatches;
use colored::*;
use std::path::PathBuf;

use crate::core::artifacts;
use crate::infra::github::GhCliBackend;
use crate::infra::t;
use crate::reporting;

pub async fn execute(matches: &ArgMatches, locale: &str) -> Result<()> {
    let raw_url = matches
        .get_one::<String>("url")
        .map(String::as_str)
        .unwrap_or_default();
    let run = artifacts::parse_run_url(raw_url)?;
    let output_dir = matches
        .get_one::<PathBuf>("output-dir")
        .cloned()
        .unwrap_or_else(|| artifacts::default_output_dir(&run));

    println!("{}", t!("fetch.repository", locale = locale, repo = &run.repo).bold());
    println!("{}", t!("fetch.run_id", locale = locale, run_id = &run.run_id).bold());
    println!(
        "{}",
        t!("fetch.output_dir", locale = locale, path = output_dir.display()).bold()
    );

    let summary = artifacts::fetch_artifacts(&run, &output_dir, &GhCliBackend::new()).await?;
    reporting::print_fetch_summary(&summary, &output_dir, locale);
    Ok(())
}
