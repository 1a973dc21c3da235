//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations used by several
//! pipeline steps: sanitizing file names, writing per-job record files and
//! listing directory entries in a stable order.
//!
//! 此模块提供多个流水线步骤使用的文件系统操作：
//! 清理文件名、写入每个作业的记录文件，以及按稳定顺序列出目录条目。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::t;

/// Replaces every character that is unsafe in a file name with `_`.
/// Alphanumerics, `-`, `_` and `.` are kept.
///
/// 将文件名中所有不安全的字符替换为 `_`。保留字母数字、`-`、`_` 和 `.`。
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        sanitized
    }
}

/// Writes `content` to `path`, creating parent directories if needed.
///
/// 将 `content` 写入 `path`，必要时创建父目录。
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| t!("fs.create_dir_failed", path = parent.display()))?;
    }
    fs::write(path, content).with_context(|| t!("fs.write_failed", path = path.display()))?;
    Ok(())
}

/// Lists the entries of `dir` sorted by file name, split into directories and
/// regular files.
///
/// 列出 `dir` 的条目，按文件名排序，并分为目录和普通文件。
pub fn sorted_entries(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| t!("fs.read_dir_failed", path = dir.display()))? {
        let entry = entry.with_context(|| t!("fs.read_dir_failed", path = dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| t!("fs.read_dir_failed", path = dir.display()))?;
        let path = entry.path();
        if file_type.is_dir() {
            dirs.push(path);
        } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
            files.push(path);
        }
    }
    dirs.sort();
    files.sort();
    Ok((dirs, files))
}

/// Checks whether `path` carries one of `extensions` (compared without the dot,
/// case-sensitively).
///
/// 检查 `path` 是否带有 `extensions` 中的某个扩展名（不含点，区分大小写）。
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.trim_start_matches('.') == ext))
}

/// Checks if a path exists and is a directory.
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}
