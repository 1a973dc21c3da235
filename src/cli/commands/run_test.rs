//! # Run-Test Command Module / 运行测试命令模块
//!
//! Implements `galaxy-ci run-test`, the body of one matrix job.
//!
//! 实现 `galaxy-ci run-test`，即一个矩阵作业的主体。

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::config::{CiConfig, CiEnvironment};
use crate::core::invocation::{self, RunTestConfig};
use crate::core::models::{RunMode, WorkflowRef};
use crate::infra::planemo::PlanemoInvoker;
use crate::infra::t;
use crate::reporting;

pub async fn execute(
    matches: &ArgMatches,
    config: &CiConfig,
    environment: &CiEnvironment,
    locale: &str,
) -> Result<()> {
    let mode = matches
        .get_one::<String>("mode")
        .and_then(|m| RunMode::parse(m))
        .unwrap_or_default();

    let workflow_path = matches.get_one::<PathBuf>("workflow").cloned();
    let params_path = matches.get_one::<PathBuf>("params").cloned();

    let workflow = match (workflow_path, params_path, mode) {
        (Some(definition), Some(params), _) => WorkflowRef::new(definition, params),
        // Demo jobs only need a name, not real files.
        (Some(definition), None, RunMode::Demo) => WorkflowRef::new(definition, PathBuf::new()),
        (None, _, RunMode::Demo) => {
            let run_id = matches
                .get_one::<String>("run-id")
                .context(t!("run.demo_needs_name", locale = locale))?;
            WorkflowRef::new(run_id, PathBuf::new())
        }
        _ => anyhow::bail!(t!("run.inputs_required", locale = locale)),
    };

    let run_id = matches
        .get_one::<String>("run-id")
        .map(|id| id.trim().to_string())
        .unwrap_or_else(|| workflow.id.clone());

    let records_file = match matches.get_one::<PathBuf>("records-file") {
        Some(path) => path.clone(),
        None => config.records_path(&environment.workspace_root())?,
    };

    let galaxy_url = matches
        .get_one::<String>("galaxy-url")
        .cloned()
        .unwrap_or_else(|| config.galaxy_url.clone());

    let tool_command = match matches.get_one::<String>("tool") {
        Some(tool) => CiConfig {
            test_tool: tool.clone(),
            ..CiConfig::default()
        }
        .test_tool_command()?,
        None => config.test_tool_command()?,
    };

    let run_config = RunTestConfig {
        workflow,
        run_id,
        mode,
        records_file,
        output_dir: matches
            .get_one::<PathBuf>("output-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        galaxy_url,
        api_key: environment.api_key.clone(),
        api_key_env: config.api_key_env.clone(),
        demo_delay: Duration::from_secs(
            matches.get_one::<u64>("demo-delay-secs").copied().unwrap_or(0),
        ),
    };

    let invoker = PlanemoInvoker::new(tool_command);
    let outcome = invocation::run_test(&run_config, &invoker).await?;
    reporting::print_run_outcome(&outcome, locale);
    Ok(())
}
