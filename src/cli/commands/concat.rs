//! # Concat Command Module / 合并命令模块
//!
//! Implements `galaxy-ci concat`, the fan-in step after all matrix jobs.
//!
//! 实现 `galaxy-ci concat`，即所有矩阵作业之后的汇总步骤。

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::fs;
use std::path::PathBuf;

use crate::core::aggregate::{self, ArtifactLayout, ConcatOptions, FileFilter};
use crate::infra::t;
use crate::reporting;

pub fn execute(matches: &ArgMatches, locale: &str) -> Result<()> {
    let path_arg = |name: &str, fallback: &str| {
        matches
            .get_one::<PathBuf>(name)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(fallback))
    };

    let filter = match matches.get_one::<String>("file-name") {
        Some(name) => FileFilter::Name(name.clone()),
        None => matches
            .get_one::<String>("extension")
            .map(|ext| FileFilter::Extension(ext.trim_start_matches('.').to_string()))
            .unwrap_or_default(),
    };
    let layout = if matches.get_flag("flat") {
        ArtifactLayout::Flat
    } else {
        ArtifactLayout::PerArtifact
    };

    let options = ConcatOptions {
        artifacts_dir: path_arg("artifacts-dir", "./artifacts"),
        output_file: path_arg("output-file", "./all_invocation_ids.txt"),
        layout,
        filter,
    };

    let summary = aggregate::concatenate(&options)?;

    let combined = if matches.get_flag("show") {
        Some(
            fs::read_to_string(&options.output_file)
                .with_context(|| t!("concat.read_failed", path = options.output_file.display()))?,
        )
    } else {
        None
    };
    reporting::print_concat_summary(&summary, &options.output_file, combined.as_deref(), locale);
    Ok(())
}
