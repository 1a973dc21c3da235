//! # Invocation Module / 调用模块
//!
//! The per-job test runner. In `dedup` mode it first looks the run id up in the
//! combined records file and only calls the test tool when no invocation is
//! recorded yet; in `demo` mode it fabricates a random invocation id.
//!
//! Either way the job ends with a single-line `run_id<TAB>invocation_id` file
//! named after the run id. When anything fails, that file is not written.
//!
//! 每个作业的测试运行器。在 `dedup` 模式下，先在合并的记录文件中查找运行 ID，
//! 只有在尚无调用记录时才调用测试工具；在 `demo` 模式下生成随机调用 ID。
//! 无论哪种方式，作业都以一个以运行 ID 命名的单行 `run_id<TAB>invocation_id` 文件结束。
//! 任何步骤失败时都不会写入该文件。

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::models::{InvocationId, InvocationRecord, RunMode, RunOutcome, ToolError, WorkflowRef};
use crate::core::records;
use crate::infra::t;

/// Everything the test tool needs for one invocation.
/// 测试工具执行一次调用所需的全部信息。
#[derive(Debug, Clone, Copy)]
pub struct InvocationRequest<'a> {
    pub workflow: &'a WorkflowRef,
    pub galaxy_url: &'a str,
    pub api_key: &'a str,
}

/// The narrow seam around the external test tool: invoke a workflow with its
/// test data and return the invocation id Galaxy assigned.
///
/// 外部测试工具的窄接口：使用测试数据调用工作流，并返回 Galaxy 分配的调用 ID。
#[allow(async_fn_in_trait)]
pub trait WorkflowInvoker {
    async fn invoke(&self, request: &InvocationRequest<'_>) -> Result<InvocationId, ToolError>;
}

/// Explicit inputs of one `run-test` job.
/// 一次 `run-test` 作业的显式输入。
#[derive(Debug, Clone)]
pub struct RunTestConfig {
    pub workflow: WorkflowRef,
    /// Key used to deduplicate invocations across pipeline re-runs.
    pub run_id: String,
    pub mode: RunMode,
    /// Combined records file consulted in `dedup` mode.
    pub records_file: PathBuf,
    /// Directory receiving `<run_id>.txt`.
    pub output_dir: PathBuf,
    pub galaxy_url: String,
    pub api_key: Option<String>,
    /// Name of the variable `api_key` was read from, for error messages.
    pub api_key_env: String,
    /// Pause before fabricating an id in `demo` mode.
    pub demo_delay: Duration,
}

/// Runs one job according to `config.mode`.
///
/// # Errors
/// Fails when the run id cannot be stored as a record key, when the credential
/// is missing, when the test tool fails in any way, or when the record file
/// cannot be written.
///
/// 按 `config.mode` 运行一个作业。运行 ID 无法作为记录键、凭据缺失、
/// 测试工具以任何方式失败或记录文件无法写入时返回错误。
pub async fn run_test<I: WorkflowInvoker>(config: &RunTestConfig, invoker: &I) -> Result<RunOutcome> {
    let run_id = InvocationRecord::normalize_run_id(&config.run_id)
        .with_context(|| t!("run.invalid_run_id", run_id = format!("{:?}", config.run_id)))?;

    println!(
        "{}",
        t!("run.header", workflow = &config.workflow.id, run_id = run_id).bold()
    );

    match config.mode {
        RunMode::Dedup => run_dedup(config, run_id, invoker).await,
        RunMode::Demo => run_demo(config, run_id).await,
    }
}

async fn run_dedup<I: WorkflowInvoker>(
    config: &RunTestConfig,
    run_id: &str,
    invoker: &I,
) -> Result<RunOutcome> {
    if !config.records_file.exists() {
        println!(
            "{}",
            t!("run.records_missing", path = config.records_file.display()).dimmed()
        );
    }

    if let Some(existing) = records::lookup_invocation(&config.records_file, run_id)? {
        println!(
            "{}",
            t!("run.reusing_invocation", run_id = run_id, invocation_id = &existing).cyan()
        );
        let record = InvocationRecord::new(run_id, existing);
        let output_file = records::write_record_file(&config.output_dir, &record)?;
        return Ok(RunOutcome::Reused { record, output_file });
    }

    let api_key = config
        .api_key
        .as_deref()
        .with_context(|| t!("run.missing_credential", var = &config.api_key_env))?;

    for path in [&config.workflow.definition, &config.workflow.params] {
        if !path.is_file() {
            anyhow::bail!(t!("run.input_missing", path = path.display()));
        }
    }

    println!(
        "{}",
        t!("run.invoking", workflow = config.workflow.definition.display(), url = &config.galaxy_url).blue()
    );

    let request = InvocationRequest {
        workflow: &config.workflow,
        galaxy_url: &config.galaxy_url,
        api_key,
    };
    let invocation_id = invoker
        .invoke(&request)
        .await
        .with_context(|| t!("run.invoke_failed", workflow = &config.workflow.id))?;

    let record = InvocationRecord::new(run_id, invocation_id);
    let output_file = records::write_record_file(&config.output_dir, &record)?;
    println!(
        "{}",
        t!("run.invocation_created", run_id = &record.run_id, invocation_id = &record.invocation_id).green()
    );
    Ok(RunOutcome::Invoked { record, output_file })
}

async fn run_demo(config: &RunTestConfig, run_id: &str) -> Result<RunOutcome> {
    println!("{}", t!("run.demo_mode").yellow());
    if !config.demo_delay.is_zero() {
        tokio::time::sleep(config.demo_delay).await;
    }

    let invocation_id = InvocationId::new(uuid::Uuid::new_v4().to_string());
    let record = InvocationRecord::new(run_id, invocation_id);
    let output_file = records::write_record_file(&config.output_dir, &record)?;
    println!(
        "{}",
        t!("run.demo_complete", workflow = &config.workflow.id, invocation_id = &record.invocation_id).green()
    );
    Ok(RunOutcome::Simulated { record, output_file })
}
