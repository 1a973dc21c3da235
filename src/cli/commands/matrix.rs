//! # Matrix Command Module / 矩阵命令模块
//!
//! Implements `galaxy-ci matrix`: scans the input directory and hands the
//! resulting JSON array to the CI as a step output.
//!
//! 实现 `galaxy-ci matrix`：扫描输入目录，并将生成的 JSON 数组作为步骤输出交给 CI。

use anyhow::Result;
use clap::ArgMatches;
use colored::*;
use std::path::PathBuf;

use crate::core::config::{CiConfig, CiEnvironment};
use crate::core::matrix::{self, FileSelector};
use crate::infra::{ci_output, t};

pub fn execute(
    matches: &ArgMatches,
    config: &CiConfig,
    environment: &CiEnvironment,
    locale: &str,
) -> Result<()> {
    let input_dir = matches
        .get_one::<PathBuf>("input-dir")
        .cloned()
        .unwrap_or_default();
    let extensions = |name: &str, fallback: &[String]| -> Vec<String> {
        matches
            .get_many::<String>(name)
            .map(|values| values.cloned().collect())
            .unwrap_or_else(|| fallback.to_vec())
    };
    let selector = FileSelector {
        workflow_extensions: extensions("workflow-ext", &config.workflow_extensions),
        params_extensions: extensions("params-ext", &config.params_extensions),
    };
    let output_key = matches
        .get_one::<String>("output-key")
        .cloned()
        .unwrap_or_else(|| config.matrix_output_key.clone());

    let report = matrix::generate_matrix(&input_dir, &selector)?;
    if !report.root_found {
        // Still emit an empty matrix so the pipeline keeps going.
        eprintln!(
            "{}",
            t!("matrix.dir_not_found", locale = locale, path = input_dir.display()).yellow()
        );
    } else {
        eprintln!(
            "{}",
            t!("matrix.found", locale = locale, count = report.entries.len()).cyan()
        );
    }

    let json = report.to_json()?;
    ci_output::emit_output(environment.github_output.as_deref(), &output_key, &json)?;
    Ok(())
}
