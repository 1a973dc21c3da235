//! # Artifact Aggregation Module / 产物聚合模块
//!
//! Fans per-job artifacts back in: every selected text file under the
//! artifacts directory is trimmed and appended as one line of a combined file.
//!
//! 将每个作业的产物汇总：产物目录下每个选中的文本文件经去除首尾空白后，
//! 作为一行追加到合并文件中。

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::models::ConcatSummary;
use crate::infra::{fs as infra_fs, t};

/// How artifacts are laid out on disk.
/// 产物在磁盘上的布局方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactLayout {
    /// One subdirectory per artifact, as produced by `fetch`.
    #[default]
    PerArtifact,
    /// All files directly inside the artifacts directory.
    Flat,
}

/// Which files of a source directory are read.
/// 读取源目录中的哪些文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFilter {
    /// Files carrying this extension (without the dot).
    Extension(String),
    /// Files with exactly this name.
    Name(String),
}

impl Default for FileFilter {
    fn default() -> Self {
        FileFilter::Extension("txt".to_string())
    }
}

impl FileFilter {
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            FileFilter::Extension(ext) => infra_fs::has_extension(path, std::slice::from_ref(ext)),
            FileFilter::Name(name) => path.file_name().is_some_and(|n| n == name.as_str()),
        }
    }
}

/// Explicit inputs of one `concat` run.
#[derive(Debug, Clone)]
pub struct ConcatOptions {
    pub artifacts_dir: PathBuf,
    pub output_file: PathBuf,
    pub layout: ArtifactLayout,
    pub filter: FileFilter,
}

/// Source directories in processing order.
pub fn source_dirs(artifacts_dir: &Path, layout: ArtifactLayout) -> Result<Vec<PathBuf>> {
    match layout {
        ArtifactLayout::PerArtifact => Ok(infra_fs::sorted_entries(artifacts_dir)?.0),
        ArtifactLayout::Flat => Ok(vec![artifacts_dir.to_path_buf()]),
    }
}

/// Concatenates the selected files into `options.output_file`.
///
/// Sources are processed in name order and files within a source in name
/// order. Each file contributes its trimmed content plus `\n`; empty files
/// contribute nothing.
///
/// # Errors
/// Fails when the artifacts directory does not exist or any file cannot be
/// read or written.
///
/// 将选中的文件合并到 `options.output_file`。源目录和其中的文件都按名称顺序处理。
/// 每个文件贡献去除首尾空白后的内容加 `\n`；空文件不贡献任何内容。
pub fn concatenate(options: &ConcatOptions) -> Result<ConcatSummary> {
    if !infra_fs::is_directory(&options.artifacts_dir) {
        anyhow::bail!(t!(
            "concat.dir_missing",
            path = options.artifacts_dir.display()
        ));
    }

    let sources = source_dirs(&options.artifacts_dir, options.layout)?;
    let mut summary = ConcatSummary {
        sources: sources.len(),
        ..ConcatSummary::default()
    };

    if let Some(parent) = options.output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| t!("fs.create_dir_failed", path = parent.display()))?;
    }
    let file = File::create(&options.output_file)
        .with_context(|| t!("fs.write_failed", path = options.output_file.display()))?;
    let mut writer = BufWriter::new(file);

    for source in &sources {
        let (_, files) = infra_fs::sorted_entries(source)?;
        for path in files.iter().filter(|p| options.filter.matches(p)) {
            // Never read the output back in when it lives among the sources.
            if same_file(path, &options.output_file) {
                continue;
            }
            let content = fs::read_to_string(path)
                .with_context(|| t!("concat.read_failed", path = path.display()))?;
            summary.files_read += 1;

            let content = content.trim();
            if content.is_empty() {
                continue;
            }
            writeln!(writer, "{}", content)
                .with_context(|| t!("fs.write_failed", path = options.output_file.display()))?;
            summary.lines_written += content.lines().count();
        }
    }

    writer
        .flush()
        .with_context(|| t!("fs.write_failed", path = options.output_file.display()))?;
    Ok(summary)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
