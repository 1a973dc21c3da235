//! # CI Output Channel Module / CI 输出通道模块
//!
//! Step outputs are handed to the orchestrator by appending `key=value` lines
//! to the file named by `GITHUB_OUTPUT`. When no such file is available the
//! deprecated `::set-output` workflow command is printed instead.
//!
//! 通过向 `GITHUB_OUTPUT` 指定的文件追加 `key=value` 行，将步骤输出交给编排器。
//! 没有该文件时，改为打印已弃用的 `::set-output` 工作流命令。

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::infra::t;

/// Where a step output ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Appended to the output file.
    File(PathBuf),
    /// Printed with the legacy `::set-output` syntax.
    Legacy,
    /// Not emitted.
    Skipped,
}

/// Appends `key=value` to the output file. Values must be single-line.
///
/// 向输出文件追加 `key=value`。值必须是单行。
pub fn append_output(path: &Path, key: &str, value: &str) -> Result<()> {
    if value.contains('\n') {
        anyhow::bail!(t!("ci_output.multiline_value", key = key));
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| t!("ci_output.open_failed", path = path.display()))?;
    writeln!(file, "{}={}", key, value)
        .with_context(|| t!("ci_output.write_failed", path = path.display()))?;
    Ok(())
}

/// The legacy workflow command for setting a step output.
pub fn legacy_output_line(key: &str, value: &str) -> String {
    format!("::set-output name={}::{}", key, value)
}

/// Emits a step output to the file if one is configured, otherwise prints the
/// legacy line to stdout.
///
/// 如果配置了输出文件则写入该文件，否则向 stdout 打印旧式语法行。
pub fn emit_output(github_output: Option<&Path>, key: &str, value: &str) -> Result<OutputTarget> {
    match github_output {
        Some(path) => {
            append_output(path, key, value)?;
            Ok(OutputTarget::File(path.to_path_buf()))
        }
        None => {
            println!("{}", legacy_output_line(key, value));
            Ok(OutputTarget::Legacy)
        }
    }
}

/// Emits a step output only when an output file is configured.
pub fn emit_output_if_configured(
    github_output: Option<&Path>,
    key: &str,
    value: &str,
) -> Result<OutputTarget> {
    match github_output {
        Some(path) => {
            append_output(path, key, value)?;
            Ok(OutputTarget::File(path.to_path_buf()))
        }
        None => Ok(OutputTarget::Skipped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn appends_key_value_lines() {
        let file = NamedTempFile::new().unwrap();
        append_output(file.path(), "matrix_json", "[\"a\"]").unwrap();
        append_output(file.path(), "other", "1").unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "matrix_json=[\"a\"]\nother=1\n");
    }

    #[test]
    fn rejects_multiline_values() {
        let file = NamedTempFile::new().unwrap();
        assert!(append_output(file.path(), "k", "a\nb").is_err());
    }

    #[test]
    fn legacy_line_format() {
        assert_eq!(
            legacy_output_line("matrix_json", "[]"),
            "::set-output name=matrix_json::[]"
        );
    }

    #[test]
    fn skipped_without_output_file() {
        let target = emit_output_if_configured(None, "k", "v").unwrap();
        assert_eq!(target, OutputTarget::Skipped);
    }
}
