//! # Prepare Command Module / 准备命令模块
//!
//! Implements `galaxy-ci prepare`, the staging simulator that feeds a demo matrix.
//!
//! 实现 `galaxy-ci prepare`，即为演示矩阵提供数据的暂存模拟器。

use anyhow::Result;
use clap::ArgMatches;
use colored::*;
use std::path::PathBuf;

use crate::core::config::CiEnvironment;
use crate::core::staging::{self, SIMULATED_WORKFLOWS};
use crate::infra::{ci_output, t};

/// Output key the staged ids are published under.
const MATRIX_OUTPUT_KEY: &str = "matrix_json";

pub fn execute(matches: &ArgMatches, environment: &CiEnvironment, locale: &str) -> Result<()> {
    let staging_dir = matches
        .get_one::<PathBuf>("staging-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("staging"));

    println!("{}", t!("prepare.discovering", locale = locale).blue());
    let staged = staging::stage_workflows(&staging_dir, SIMULATED_WORKFLOWS)?;
    for workflow in &staged {
        println!(
            "  {}",
            t!(
                "prepare.staged",
                locale = locale,
                id = &workflow.id,
                path = workflow.dir.display()
            )
        );
    }
    println!(
        "{}",
        t!("prepare.generated", locale = locale, count = staged.len()).green()
    );

    let json = staging::ids_json(&staged)?;
    ci_output::emit_output_if_configured(environment.github_output.as_deref(), MATRIX_OUTPUT_KEY, &json)?;
    println!("{}", t!("prepare.matrix_next_step", locale = locale, json = &json));
    Ok(())
}
