//! # Command Module Unit Tests / Command 模块单元测试
//!
//! Tests for tool-run capture, stdout-only runs and the masked command rendering.
//!
//! 子进程输出捕获以及带屏蔽的命令渲染的测试。

use galaxy_ci::infra::command::{capture_tool_run, describe_command, run_for_stdout};
use galaxy_ci::models::ToolError;
use tokio::process::Command;

#[cfg(test)]
mod describe_command_tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_masks_value_after_secret_flag() {
        let rendered = describe_command(
            "planemo",
            &args(&["run", "wf.ga", "--galaxy_user_key", "abc123", "--no_wait"]),
            &["--galaxy_user_key"],
        );
        assert_eq!(rendered, "planemo run wf.ga --galaxy_user_key ******** --no_wait");
        assert!(!rendered.contains("abc123"));
    }

    #[test]
    fn test_quotes_arguments_with_spaces() {
        let rendered = describe_command("planemo", &args(&["run", "my workflow.ga"]), &[]);
        assert_eq!(rendered, "planemo run 'my workflow.ga'");
    }

    #[test]
    fn test_secret_flag_as_last_argument() {
        let rendered = describe_command("planemo", &args(&["--galaxy_user_key"]), &["--galaxy_user_key"]);
        assert_eq!(rendered, "planemo --galaxy_user_key");
    }
}

#[cfg(all(test, unix))]
mod spawn_tests {
    use super::*;

    #[tokio::test]
    async fn test_capture_tool_run_merges_streams() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo out; echo err >&2");

        let run = capture_tool_run(cmd, "sh").await.unwrap();

        assert!(run.status.success());
        assert!(run.output.contains("out\n"));
        assert!(run.output.contains("err\n"));
        assert_eq!(run.into_success().unwrap().lines().count(), 2);
    }

    #[tokio::test]
    async fn test_non_zero_exit_becomes_failed_with_output() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo 'upload rejected' >&2; exit 4");

        let run = capture_tool_run(cmd, "planemo").await.unwrap();
        assert_eq!(run.status.code(), Some(4));

        match run.into_success() {
            Err(ToolError::Failed { program, output, .. }) => {
                assert_eq!(program, "planemo");
                assert!(output.contains("upload rejected"));
            }
            other => panic!("expected ToolError::Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_a_spawn_error() {
        let cmd = Command::new("definitely-not-a-real-program-galaxy-ci");
        let err = capture_tool_run(cmd, "definitely-not-a-real-program-galaxy-ci")
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_stdin_is_closed() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("cat; echo done");

        let run = capture_tool_run(cmd, "sh").await.unwrap();
        assert_eq!(run.into_success().unwrap(), "done\n");
    }

    #[tokio::test]
    async fn test_run_for_stdout_returns_stdout_only() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo '{\"ok\":true}'; echo noise >&2");

        let stdout = run_for_stdout(cmd, "sh").await.unwrap();
        assert_eq!(stdout, "{\"ok\":true}\n");
    }

    #[tokio::test]
    async fn test_run_for_stdout_fails_with_stderr() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo 'HTTP 404: Not Found' >&2; exit 1");

        let err = run_for_stdout(cmd, "gh").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("gh"));
        assert!(message.contains("HTTP 404: Not Found"));
    }
}
