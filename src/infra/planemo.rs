//! # Planemo Adapter Module / Planemo 适配器模块
//!
//! Runs `planemo run` against an external Galaxy in no-wait mode and reads the
//! invocation id back from its JSON test report.
//!
//! 以不等待模式针对外部 Galaxy 运行 `planemo run`，并从其 JSON 测试报告中读取调用 ID。

use colored::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::core::invocation::{InvocationRequest, WorkflowInvoker};
use crate::core::models::{InvocationId, ToolError};
use crate::infra::{command, t};

/// JSON pointer to the invocation id inside a planemo test report.
pub const INVOCATION_ID_POINTER: &str = "/tests/0/data/invocation_details/details/invocation_id";

/// File name of the report inside the per-invocation temporary directory.
const REPORT_FILE_NAME: &str = "report.json";

/// Flags after which the next argument is a secret.
const SECRET_FLAGS: &[&str] = &["--galaxy_user_key"];

/// Invokes workflows through the `planemo` command line.
/// 通过 `planemo` 命令行调用工作流。
#[derive(Debug, Clone)]
pub struct PlanemoInvoker {
    /// Program followed by leading arguments, e.g. `["planemo"]` or
    /// `["python", "-m", "planemo"]`.
    command: Vec<String>,
}

impl PlanemoInvoker {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    /// Builds the argument list passed after the program.
    pub fn build_args(&self, request: &InvocationRequest<'_>, report_path: &Path) -> Vec<String> {
        let mut args: Vec<String> = self.command.iter().skip(1).cloned().collect();
        args.extend([
            "run".to_string(),
            request.workflow.definition.display().to_string(),
            request.workflow.params.display().to_string(),
            "--engine".to_string(),
            "external_galaxy".to_string(),
            "--galaxy_url".to_string(),
            request.galaxy_url.to_string(),
            "--galaxy_user_key".to_string(),
            request.api_key.to_string(),
            "--no_wait".to_string(),
            "--simultaneous_uploads".to_string(),
            "--check_uploads_ok".to_string(),
            "--test_output_json".to_string(),
            report_path.display().to_string(),
        ]);
        args
    }
}

impl WorkflowInvoker for PlanemoInvoker {
    async fn invoke(&self, request: &InvocationRequest<'_>) -> Result<InvocationId, ToolError> {
        let program = self.command.first().ok_or(ToolError::EmptyCommand)?;

        // The report directory lives until this function returns.
        let report_dir = tempfile::Builder::new()
            .prefix("galaxy_ci_report_")
            .tempdir()
            .map_err(ToolError::Workspace)?;
        let report_path = report_dir.path().join(REPORT_FILE_NAME);
        let args = self.build_args(request, &report_path);

        println!(
            "{} {}",
            t!("run.command_prefix").blue(),
            command::describe_command(program, &args, SECRET_FLAGS)
        );

        let mut cmd = Command::new(program);
        cmd.args(&args).kill_on_drop(true);

        let run = command::capture_tool_run(cmd, program).await?;
        if !run.output.trim().is_empty() {
            println!("{}", run.output.trim_end());
        }
        run.into_success()?;

        read_invocation_id(&report_path)
    }
}

/// Reads a planemo JSON report and extracts the invocation id of its first test.
///
/// 读取 planemo JSON 报告并提取第一个测试的调用 ID。
pub fn read_invocation_id(report_path: &Path) -> Result<InvocationId, ToolError> {
    let content = fs::read_to_string(report_path).map_err(|source| ToolError::ReportMissing {
        path: report_path.to_path_buf(),
        source,
    })?;
    let report: Value = serde_json::from_str(&content).map_err(|source| ToolError::ReportInvalid {
        path: report_path.to_path_buf(),
        source,
    })?;
    extract_invocation_id(&report).ok_or_else(|| ToolError::InvocationIdMissing {
        path: PathBuf::from(report_path),
        pointer: INVOCATION_ID_POINTER.to_string(),
    })
}

/// Pulls `tests[0].data.invocation_details.details.invocation_id` out of a report.
/// Non-string or empty values count as missing.
pub fn extract_invocation_id(report: &Value) -> Option<InvocationId> {
    report
        .pointer(INVOCATION_ID_POINTER)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(InvocationId::new)
}
