//! # Invocation Records Module / 调用记录模块
//!
//! Reads the combined records file (`run_id<TAB>invocation_id` per line) and
//! writes the single-line record file each job uploads as its artifact.
//!
//! The lookup is a plain read without any lock. Two jobs racing on the same run
//! id before the combined file is refreshed can both miss and both invoke.
//!
//! 读取合并的记录文件（每行 `run_id<TAB>invocation_id`），并写入每个作业作为产物上传的单行记录文件。
//! 查找是不加锁的普通读取。两个作业如果在合并文件更新前争用同一运行 ID，
//! 可能都找不到记录并各自发起调用。

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use crate::core::models::{InvocationId, InvocationRecord};
use crate::infra::{fs as infra_fs, t};

/// Scans `records` line by line and returns the invocation id stored for
/// `run_id`. The first matching line wins; malformed lines are ignored.
/// Both sides are compared trimmed.
///
/// 逐行扫描 `records`，返回为 `run_id` 保存的调用 ID。以第一条匹配行为准；忽略格式错误的行。
/// 比较时两侧都去除首尾空白。
pub fn find_in_reader<R: BufRead>(records: R, run_id: &str) -> Result<Option<InvocationId>> {
    let run_id = run_id.trim();
    for line in records.lines() {
        let line = line.context(t!("records.read_line_failed"))?;
        if let Some(record) = InvocationRecord::parse_line(&line) {
            if record.run_id == run_id {
                return Ok(Some(record.invocation_id));
            }
        }
    }
    Ok(None)
}

/// Looks up `run_id` in the records file at `path`.
/// A missing file is treated as an empty one.
///
/// 在 `path` 处的记录文件中查找 `run_id`。文件不存在时视为空文件。
pub fn lookup_invocation(path: &Path, run_id: &str) -> Result<Option<InvocationId>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| t!("records.open_failed", path = path.display()));
        }
    };
    find_in_reader(BufReader::new(file), run_id)
        .with_context(|| t!("records.open_failed", path = path.display()))
}

/// Path of the per-job record file for `run_id` inside `output_dir`.
///
/// `output_dir` 中 `run_id` 对应的每作业记录文件路径。
pub fn record_file_path(output_dir: &Path, run_id: &str) -> PathBuf {
    output_dir.join(format!("{}.txt", infra_fs::sanitize_file_name(run_id)))
}

/// Writes `record` as the single line of the per-job record file and returns
/// the file's path.
///
/// 将 `record` 作为每作业记录文件的唯一一行写入，并返回文件路径。
pub fn write_record_file(output_dir: &Path, record: &InvocationRecord) -> Result<PathBuf> {
    let path = record_file_path(output_dir, &record.run_id);
    infra_fs::write_file(&path, &record.to_line())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn first_match_wins() {
        let data = "run1\tinv1\nrun2\tinv2\nrun1\tinv-late\n";
        let found = find_in_reader(Cursor::new(data), "run1").unwrap();
        assert_eq!(found, Some(InvocationId::new("inv1")));
    }

    #[test]
    fn ignores_malformed_lines() {
        let data = "garbage\n\t\nrun3\t\nrun2\tinv2\n";
        assert_eq!(find_in_reader(Cursor::new(data), "garbage").unwrap(), None);
        assert_eq!(find_in_reader(Cursor::new(data), "run3").unwrap(), None);
        assert_eq!(
            find_in_reader(Cursor::new(data), "run2").unwrap(),
            Some(InvocationId::new("inv2"))
        );
    }

    #[test]
    fn handles_crlf_line_endings() {
        let data = "run1\tinv1\r\n";
        assert_eq!(
            find_in_reader(Cursor::new(data), "run1").unwrap(),
            Some(InvocationId::new("inv1"))
        );
    }

    #[test]
    fn query_whitespace_is_ignored() {
        let data = "run1\tinv1\n";
        assert_eq!(
            find_in_reader(Cursor::new(data), " run1 ").unwrap(),
            Some(InvocationId::new("inv1"))
        );
    }

    #[test]
    fn record_file_name_is_sanitized() {
        let path = record_file_path(Path::new("out"), "proteomics/workflow a");
        assert_eq!(path, Path::new("out").join("proteomics_workflow_a.txt"));
    }
}
