//! # Data Staging Simulator / 数据暂存模拟器
//!
//! Demo step: pretends to discover a few workflows, stages one directory per
//! workflow id and returns the ids for the matrix. No real data is read.
//!
//! 演示步骤：模拟发现若干工作流，为每个工作流 ID 暂存一个目录，并返回用于矩阵的 ID。不读取真实数据。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::models::workflow_id_from_path;
use crate::infra::{fs as infra_fs, t};

/// Workflow paths the simulator pretends to have found.
pub const SIMULATED_WORKFLOWS: &[&str] = &[
    "iwc/workflows/proteomics/workflow-a.ga",
    "iwc/workflows/metabolomics/workflow-b.ga",
    "iwc/workflows/genomics/workflow-c.ga",
];

/// Name of the placeholder written into each staged directory.
pub const PLACEHOLDER_FILE: &str = "workflow.ga";

/// One staged workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedWorkflow {
    pub id: String,
    pub source: String,
    pub dir: PathBuf,
}

/// Recreates `staging_dir` from scratch and stages every path of `workflows`.
///
/// Whatever was in `staging_dir` before is deleted.
///
/// 从头重建 `staging_dir` 并暂存 `workflows` 中的每个路径。`staging_dir` 中原有的内容会被删除。
pub fn stage_workflows(staging_dir: &Path, workflows: &[&str]) -> Result<Vec<StagedWorkflow>> {
    if staging_dir.exists() {
        fs::remove_dir_all(staging_dir)
            .with_context(|| t!("prepare.clean_failed", path = staging_dir.display()))?;
    }
    fs::create_dir_all(staging_dir)
        .with_context(|| t!("fs.create_dir_failed", path = staging_dir.display()))?;

    let mut staged = Vec::with_capacity(workflows.len());
    for source in workflows {
        let id = workflow_id_from_path(Path::new(source));
        let dir = staging_dir.join(&id);
        infra_fs::write_file(
            &dir.join(PLACEHOLDER_FILE),
            &format!("# This is the content of {}\n", source),
        )?;
        staged.push(StagedWorkflow {
            id,
            source: (*source).to_string(),
            dir,
        });
    }
    Ok(staged)
}

/// The staged ids as a compact JSON array.
pub fn ids_json(staged: &[StagedWorkflow]) -> Result<String> {
    let ids: Vec<&str> = staged.iter().map(|s| s.id.as_str()).collect();
    serde_json::to_string(&ids).context(t!("matrix.serialize_failed"))
}
