//! # Matrix Generation Module / 矩阵生成模块
//!
//! Finds the directories that hold a workflow definition together with its
//! test parameters and turns their relative paths into the JSON array the CI
//! fans jobs out over.
//!
//! 查找同时包含工作流定义及其测试参数的目录，并将其相对路径转换为 CI 用于展开作业的 JSON 数组。

use anyhow::{Context, Result};
use colored::*;
use std::path::{Component, Path, PathBuf};

use crate::infra::{fs as infra_fs, t};

/// Which file extensions make a directory a matrix entry.
/// 哪些文件扩展名使目录成为矩阵条目。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelector {
    pub workflow_extensions: Vec<String>,
    pub params_extensions: Vec<String>,
}

impl Default for FileSelector {
    fn default() -> Self {
        Self {
            workflow_extensions: vec!["ga".to_string()],
            params_extensions: vec!["yml".to_string()],
        }
    }
}

/// Result of a matrix scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixReport {
    /// Relative paths of the qualifying directories.
    pub entries: Vec<String>,
    /// `false` when the root did not exist and the matrix degraded to `[]`.
    pub root_found: bool,
}

impl MatrixReport {
    /// Compact single-line JSON array.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.entries).context(t!("matrix.serialize_failed"))
    }
}

/// Walks `root` top-down and collects every directory that directly contains
/// both a workflow file and a params file. Siblings are visited in name order.
/// A subdirectory that cannot be listed is reported and skipped; only a failure
/// on `root` itself is an error.
///
/// 自上而下遍历 `root`，收集所有直接包含工作流文件和参数文件的目录。同级目录按名称顺序访问。
/// 无法列出的子目录会给出警告并跳过；只有 `root` 本身失败时才返回错误。
pub fn find_terminal_dirs(root: &Path, selector: &FileSelector) -> Result<Vec<String>> {
    walk(root, selector, infra_fs::sorted_entries)
}

fn walk<F>(root: &Path, selector: &FileSelector, mut list: F) -> Result<Vec<String>>
where
    F: FnMut(&Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)>,
{
    let mut entries = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let (subdirs, files) = match list(&dir) {
            Ok(listing) => listing,
            Err(e) if dir != root => {
                eprintln!(
                    "{}",
                    t!("matrix.dir_skipped", path = dir.display(), error = format!("{:#}", e)).yellow()
                );
                continue;
            }
            Err(e) => return Err(e),
        };

        let has_workflow = files
            .iter()
            .any(|f| infra_fs::has_extension(f, &selector.workflow_extensions));
        let has_params = files
            .iter()
            .any(|f| infra_fs::has_extension(f, &selector.params_extensions));
        if has_workflow && has_params {
            entries.push(relative_entry(root, &dir));
        }

        // Reverse so the stack pops children in ascending order.
        pending.extend(subdirs.into_iter().rev());
    }

    Ok(entries)
}

/// Scans `root`, degrading to an empty matrix when it is not a directory.
///
/// 扫描 `root`；当它不是目录时降级为空矩阵。
pub fn generate_matrix(root: &Path, selector: &FileSelector) -> Result<MatrixReport> {
    if !infra_fs::is_directory(root) {
        return Ok(MatrixReport {
            entries: Vec::new(),
            root_found: false,
        });
    }
    Ok(MatrixReport {
        entries: find_terminal_dirs(root, selector)?,
        root_found: true,
    })
}

/// `dir` relative to `root` with `/` separators; the root itself is `.`.
fn relative_entry(root: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
