//! # Command Execution Module / 命令执行模块
//!
//! Spawns external tools and captures their output.
//!
//! 派生外部工具并捕获其输出。

use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::core::models::ToolError;
use crate::infra::t;

/// A finished tool run: its exit status and stdout/stderr merged line by line.
/// 已结束的工具运行：退出状态以及按行合并的 stdout/stderr。
#[derive(Debug)]
pub struct CapturedRun {
    pub program: String,
    pub status: ExitStatus,
    pub output: String,
}

impl CapturedRun {
    /// Hands the output back on a zero exit and turns any other exit into
    /// `ToolError::Failed`.
    pub fn into_success(self) -> Result<String, ToolError> {
        if self.status.success() {
            Ok(self.output)
        } else {
            Err(ToolError::Failed {
                program: self.program,
                status: self.status.to_string(),
                output: self.output,
            })
        }
    }
}

/// Runs `cmd` to completion with stdin closed, merging stdout and stderr into
/// one transcript in the order lines arrive.
///
/// Failing to start the program or to wait for it is `ToolError::Spawn`; a
/// non-zero exit is not an error here, see [`CapturedRun::into_success`].
///
/// 在关闭 stdin 的情况下运行 `cmd` 直到结束，按到达顺序把 stdout 和 stderr 合并为一份记录。
/// 无法启动或等待程序时返回 `ToolError::Spawn`；非零退出在这里不算错误。
pub async fn capture_tool_run(mut cmd: Command, program: &str) -> Result<CapturedRun, ToolError> {
    let spawn_error = |source| ToolError::Spawn {
        program: program.to_string(),
        source,
    };

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return Err(spawn_error(std::io::Error::other(
            t!("command.capture_failed").to_string(),
        )));
    };
    let mut stdout = BufReader::new(stdout).lines();
    let mut stderr = BufReader::new(stderr).lines();

    let mut output = String::new();
    let (mut stdout_open, mut stderr_open) = (true, true);
    while stdout_open || stderr_open {
        tokio::select! {
            line = stdout.next_line(), if stdout_open => match line {
                Ok(Some(line)) => push_line(&mut output, &line),
                _ => stdout_open = false,
            },
            line = stderr.next_line(), if stderr_open => match line {
                Ok(Some(line)) => push_line(&mut output, &line),
                _ => stderr_open = false,
            },
        }
    }

    let status = child.wait().await.map_err(spawn_error)?;
    Ok(CapturedRun {
        program: program.to_string(),
        status,
        output,
    })
}

fn push_line(output: &mut String, line: &str) {
    output.push_str(line);
    output.push('\n');
}

/// Runs a command and returns its stdout when it exits successfully.
/// Stderr is returned as the error text otherwise.
///
/// 运行命令，成功退出时返回其 stdout；否则以 stderr 作为错误文本返回。
pub async fn run_for_stdout(mut cmd: Command, program: &str) -> anyhow::Result<String> {
    let output = cmd
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| anyhow::anyhow!(t!("command.spawn_failed", program = program, error = e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(t!(
            "command.exit_failed",
            program = program,
            status = output.status,
            stderr = stderr.trim()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Renders a command line for logs, masking the value after any flag listed
/// in `secret_flags`.
///
/// 渲染用于日志的命令行，并屏蔽 `secret_flags` 中列出的参数之后的值。
pub fn describe_command(program: &str, args: &[String], secret_flags: &[&str]) -> String {
    let mut rendered = vec![program.to_string()];
    let mut mask_next = false;
    for arg in args {
        if mask_next {
            rendered.push("********".to_string());
            mask_next = false;
            continue;
        }
        mask_next = secret_flags.contains(&arg.as_str());
        rendered.push(shlex::try_quote(arg).map(|q| q.into_owned()).unwrap_or_else(|_| arg.clone()));
    }
    rendered.join(" ")
}
