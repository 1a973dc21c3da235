//! # Artifact Fetching Module / 产物获取模块
//!
//! Downloads and extracts every artifact of a GitHub Actions run. A failure on
//! one artifact is counted and the batch moves on.
//!
//! 下载并解压 GitHub Actions 运行的所有产物。单个产物失败会被计数，批处理继续进行。

use anyhow::{Context, Result};
use colored::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::core::models::{ArtifactEntry, FetchSummary, RunLocator};
use crate::infra::t;

/// Documented shape of a run URL, shown when parsing fails.
pub const RUN_URL_FORMAT: &str = "https://github.com/owner/repo/actions/runs/RUN_ID";

/// Operations needed from the CI platform to fetch a run's artifacts.
/// 获取运行产物所需的 CI 平台操作。
#[allow(async_fn_in_trait)]
pub trait ArtifactBackend {
    /// Lists the artifacts of a run.
    async fn list_artifacts(&self, run: &RunLocator) -> Result<Vec<ArtifactEntry>>;
    /// Downloads the zip archive of one artifact to `dest`.
    async fn download_archive(&self, run: &RunLocator, artifact: &ArtifactEntry, dest: &Path) -> Result<()>;
    /// Extracts `archive` into the existing directory `dest`.
    async fn extract_archive(&self, archive: &Path, dest: &Path) -> Result<()>;
}

/// Parses `https://<host>/<owner>/<repo>/actions/runs/<run_id>` into its parts.
/// Anything after the run id is ignored.
///
/// 将 `https://<host>/<owner>/<repo>/actions/runs/<run_id>` 解析为各个部分。忽略运行 ID 之后的内容。
pub fn parse_run_url(raw: &str) -> Result<RunLocator> {
    let invalid = || {
        anyhow::anyhow!(t!(
            "fetch.invalid_url",
            expected = RUN_URL_FORMAT,
            received = raw
        ))
    };

    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();

    match segments.as_slice() {
        [owner, repo, "actions", "runs", run_id, ..]
            if !owner.is_empty()
                && !repo.is_empty()
                && !run_id.is_empty()
                && run_id.chars().all(|c| c.is_ascii_digit()) =>
        {
            Ok(RunLocator {
                repo: format!("{}/{}", owner, repo),
                run_id: (*run_id).to_string(),
            })
        }
        _ => Err(invalid()),
    }
}

/// Default output directory for a run: `./artifacts_<run_id>`.
pub fn default_output_dir(run: &RunLocator) -> PathBuf {
    PathBuf::from(format!("./artifacts_{}", run.run_id))
}

/// Fetches every artifact of `run` into `output_dir`.
///
/// Expired artifacts are skipped. Each remaining artifact is downloaded to
/// `<output_dir>/<name>.zip` and extracted into `<output_dir>/<name>/`, using
/// the artifact name unchanged. A name that would leave `output_dir`, or one
/// already fetched in this batch, is counted as failed without touching the
/// disk. A failed download or extraction removes the zip and is counted as
/// failed.
///
/// # Errors
/// Only setup problems (creating `output_dir`, listing artifacts) are errors.
///
/// 将 `run` 的所有产物获取到 `output_dir`。跳过过期产物。
/// 每个剩余产物按原名下载到 `<output_dir>/<name>.zip` 并解压到 `<output_dir>/<name>/`。
/// 会离开 `output_dir` 的名称或本批次已获取过的名称直接计为失败，不写入磁盘。
/// 下载或解压失败会删除 zip 并计为失败。只有准备阶段的问题才会返回错误。
pub async fn fetch_artifacts<B: ArtifactBackend>(
    run: &RunLocator,
    output_dir: &Path,
    backend: &B,
) -> Result<FetchSummary> {
    println!("{}", t!("fetch.fetching", run_id = &run.run_id).blue());
    fs::create_dir_all(output_dir)
        .with_context(|| t!("fs.create_dir_failed", path = output_dir.display()))?;

    println!("{}", t!("fetch.listing").blue());
    let artifacts = backend
        .list_artifacts(run)
        .await
        .with_context(|| t!("fetch.list_failed", repo = &run.repo, run_id = &run.run_id))?;

    let total = artifacts.len();
    println!("{}", t!("fetch.found", count = total).green());

    let mut summary = FetchSummary {
        total,
        ..FetchSummary::default()
    };
    let mut claimed: HashSet<&str> = HashSet::new();

    for (i, artifact) in artifacts.iter().enumerate() {
        let position = format!("[{}/{}]", i + 1, total);

        if artifact.expired {
            println!(
                "{}",
                t!("fetch.skipping_expired", position = &position, name = &artifact.name).red()
            );
            summary.skipped += 1;
            continue;
        }

        println!(
            "{}",
            t!("fetch.downloading", position = &position, name = &artifact.name).blue()
        );

        let result = if !is_safe_artifact_name(&artifact.name) {
            Err(anyhow::anyhow!(t!("fetch.unsafe_name", name = &artifact.name)))
        } else if !claimed.insert(artifact.name.as_str()) {
            Err(anyhow::anyhow!(t!("fetch.duplicate_name", name = &artifact.name)))
        } else {
            fetch_one(run, artifact, output_dir, backend).await
        };

        match result {
            Ok(extract_dir) => {
                println!(
                    "{}",
                    t!("fetch.extracted", path = extract_dir.display()).green()
                );
                summary.succeeded += 1;
            }
            Err(e) => {
                println!("{}", t!("fetch.item_failed", error = format!("{:#}", e)).red());
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Whether `name` can be used as a single path component inside the output
/// directory.
pub fn is_safe_artifact_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Downloads and extracts one artifact, removing the archive on any failure.
async fn fetch_one<B: ArtifactBackend>(
    run: &RunLocator,
    artifact: &ArtifactEntry,
    output_dir: &Path,
    backend: &B,
) -> Result<PathBuf> {
    let archive = output_dir.join(format!("{}.zip", artifact.name));
    let extract_dir = output_dir.join(&artifact.name);

    let result = async {
        backend
            .download_archive(run, artifact, &archive)
            .await
            .with_context(|| t!("fetch.download_failed", name = &artifact.name))?;

        let size = fs::metadata(&archive).map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            anyhow::bail!(t!("fetch.download_empty", name = &artifact.name));
        }
        println!("{}", t!("fetch.saved", path = archive.display()).green());

        fs::create_dir_all(&extract_dir)
            .with_context(|| t!("fs.create_dir_failed", path = extract_dir.display()))?;
        backend
            .extract_archive(&archive, &extract_dir)
            .await
            .with_context(|| t!("fetch.extract_failed", name = &artifact.name))?;
        Ok::<(), anyhow::Error>(())
    }
    .await;

    match result {
        Ok(()) => Ok(extract_dir),
        Err(e) => {
            if archive.exists() {
                if let Err(remove_err) = fs::remove_file(&archive) {
                    eprintln!(
                        "{}",
                        t!("fetch.cleanup_failed", path = archive.display(), error = remove_err).yellow()
                    );
                }
            }
            Err(e)
        }
    }
}
