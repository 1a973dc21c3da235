//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures shared by the pipeline steps:
//! workflow references, invocation records, artifact listings and the
//! summaries printed at the end of each step.
//!
//! 此模块定义流水线步骤共享的数据结构：
//! 工作流引用、调用记录、产物列表以及每个步骤结束时打印的摘要。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A discovered workflow: its definition file, its test-data file and an
/// identifier derived from the definition's file stem.
/// 已发现的工作流：定义文件、测试数据文件以及由定义文件名主干派生的标识符。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRef {
    /// Path to the `.ga` workflow definition / `.ga` 工作流定义的路径
    pub definition: PathBuf,
    /// Path to the test parameters file / 测试参数文件的路径
    pub params: PathBuf,
    /// File stem of `definition` / `definition` 的文件名主干
    pub id: String,
}

impl WorkflowRef {
    pub fn new(definition: impl Into<PathBuf>, params: impl Into<PathBuf>) -> Self {
        let definition = definition.into();
        let id = workflow_id_from_path(&definition);
        Self {
            definition,
            params: params.into(),
            id,
        }
    }
}

/// Derives a workflow identifier from a path, e.g. `iwc/a/workflow-a.ga` -> `workflow-a`.
/// 从路径派生工作流标识符，例如 `iwc/a/workflow-a.ga` -> `workflow-a`。
pub fn workflow_id_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// An opaque identifier returned by Galaxy for one triggered workflow run.
/// Galaxy 为一次触发的工作流运行返回的不透明标识符。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationId(String);

impl InvocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `(run id, invocation id)` pair, stored as one tab-separated line.
/// 一个 `(运行 ID, 调用 ID)` 对，存储为一行以制表符分隔的文本。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRecord {
    pub run_id: String,
    pub invocation_id: InvocationId,
}

impl InvocationRecord {
    pub fn new(run_id: impl Into<String>, invocation_id: InvocationId) -> Self {
        Self {
            run_id: run_id.into(),
            invocation_id,
        }
    }

    /// Parses `run_id<TAB>invocation_id`. Returns `None` for lines without a
    /// tab or with an empty field.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (run_id, invocation_id) = line.split_once('\t')?;
        let run_id = run_id.trim();
        let invocation_id = invocation_id.trim();
        if run_id.is_empty() || invocation_id.is_empty() {
            return None;
        }
        Some(Self::new(run_id, InvocationId::new(invocation_id)))
    }

    /// Normalizes a run id into a record key. Surrounding whitespace is
    /// dropped; an empty id or one holding a tab or line break cannot be
    /// stored on a single line and yields `None`.
    ///
    /// 将运行 ID 规范化为记录键。去除首尾空白；空 ID 或包含制表符、换行符的 ID 无法存为单行，返回 `None`。
    pub fn normalize_run_id(raw: &str) -> Option<&str> {
        let run_id = raw.trim();
        if run_id.is_empty() || run_id.contains(['\t', '\r', '\n']) {
            None
        } else {
            Some(run_id)
        }
    }

    pub fn to_line(&self) -> String {
        format!("{}\t{}", self.run_id, self.invocation_id)
    }
}

/// Selects between the deduplicating runner and the random-id demo.
/// 在去重运行器和随机 ID 演示之间进行选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Look up existing invocations and call the test tool only when needed.
    #[default]
    Dedup,
    /// Fabricate a random invocation id without calling anything.
    Demo,
}

impl RunMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dedup" => Some(Self::Dedup),
            "demo" => Some(Self::Demo),
            _ => None,
        }
    }
}

/// What `run-test` ended up doing.
/// `run-test` 最终执行的操作。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// An invocation already existed in the records file; the tool was not called.
    Reused {
        record: InvocationRecord,
        output_file: PathBuf,
    },
    /// The test tool was called and produced a new invocation.
    Invoked {
        record: InvocationRecord,
        output_file: PathBuf,
    },
    /// Demo mode fabricated an invocation id.
    Simulated {
        record: InvocationRecord,
        output_file: PathBuf,
    },
}

impl RunOutcome {
    pub fn record(&self) -> &InvocationRecord {
        match self {
            RunOutcome::Reused { record, .. }
            | RunOutcome::Invoked { record, .. }
            | RunOutcome::Simulated { record, .. } => record,
        }
    }

    pub fn output_file(&self) -> &Path {
        match self {
            RunOutcome::Reused { output_file, .. }
            | RunOutcome::Invoked { output_file, .. }
            | RunOutcome::Simulated { output_file, .. } => output_file,
        }
    }
}

/// Failures of the external test tool. All variants are fatal for the job.
/// 外部测试工具的失败。所有变体对作业都是致命的。
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with {status}\n{output}")]
    Failed {
        program: String,
        status: String,
        output: String,
    },
    #[error("test report {} could not be read: {source}", path.display())]
    ReportMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("test report {} is not valid JSON: {source}", path.display())]
    ReportInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("test report {} has no invocation id at {pointer}", path.display())]
    InvocationIdMissing { path: PathBuf, pointer: String },
    #[error("test tool command is empty")]
    EmptyCommand,
    #[error("could not prepare a report directory: {0}")]
    Workspace(#[source] std::io::Error),
}

/// Location of a GitHub Actions run parsed from its URL.
/// 从 URL 解析出的 GitHub Actions 运行位置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLocator {
    /// `owner/repo`
    pub repo: String,
    pub run_id: String,
}

/// One entry of the artifact list API.
/// 产物列表 API 的一个条目。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArtifactEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub expired: bool,
}

/// Response body of `GET /repos/{repo}/actions/runs/{run_id}/artifacts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtifactList {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub artifacts: Vec<ArtifactEntry>,
}

/// Tally of one `fetch` batch.
/// 一次 `fetch` 批处理的统计。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl FetchSummary {
    /// Artifacts for which a download was attempted.
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Tally of one `concat` run.
/// 一次 `concat` 运行的统计。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConcatSummary {
    pub sources: usize,
    pub files_read: usize,
    pub lines_written: usize,
}
