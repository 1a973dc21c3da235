//! # GitHub CLI Adapter Module / GitHub CLI 适配器模块
//!
//! Talks to the GitHub artifact API through the authenticated `gh` CLI and
//! extracts archives with `unzip`.
//!
//! 通过已认证的 `gh` CLI 访问 GitHub 产物 API，并使用 `unzip` 解压归档。

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::core::artifacts::ArtifactBackend;
use crate::core::models::{ArtifactEntry, ArtifactList, RunLocator};
use crate::infra::{command, t};

/// Page size of the artifact listing.
pub const ARTIFACTS_PER_PAGE: u32 = 100;

/// Endpoint listing one page (1-based) of the artifacts of a run.
pub fn artifacts_endpoint(run: &RunLocator, page: u32) -> String {
    format!(
        "repos/{}/actions/runs/{}/artifacts?per_page={}&page={}",
        run.repo, run.run_id, ARTIFACTS_PER_PAGE, page
    )
}

/// Whether another page has to be requested after a page of `received`
/// entries brought the total to `collected` out of `total_count`.
pub fn has_more_pages(total_count: u64, collected: usize, received: usize) -> bool {
    received > 0 && (collected as u64) < total_count
}

/// Endpoint serving the zip archive of one artifact.
pub fn archive_endpoint(run: &RunLocator, artifact: &ArtifactEntry) -> String {
    format!("repos/{}/actions/artifacts/{}/zip", run.repo, artifact.id)
}

/// `ArtifactBackend` backed by the `gh` and `unzip` executables.
#[derive(Debug, Clone)]
pub struct GhCliBackend {
    gh: String,
    unzip: String,
}

impl Default for GhCliBackend {
    fn default() -> Self {
        Self {
            gh: "gh".to_string(),
            unzip: "unzip".to_string(),
        }
    }
}

impl GhCliBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactBackend for GhCliBackend {
    async fn list_artifacts(&self, run: &RunLocator) -> Result<Vec<ArtifactEntry>> {
        let mut artifacts = Vec::new();
        let mut page = 1;
        loop {
            let mut cmd = Command::new(&self.gh);
            cmd.arg("api").arg(artifacts_endpoint(run, page));
            let stdout = command::run_for_stdout(cmd, &self.gh).await?;

            let list: ArtifactList =
                serde_json::from_str(&stdout).context(t!("fetch.list_parse_failed"))?;
            let received = list.artifacts.len();
            artifacts.extend(list.artifacts);

            if !has_more_pages(list.total_count, artifacts.len(), received) {
                return Ok(artifacts);
            }
            page += 1;
        }
    }

    async fn download_archive(&self, run: &RunLocator, artifact: &ArtifactEntry, dest: &Path) -> Result<()> {
        let file = File::create(dest).with_context(|| t!("fs.write_failed", path = dest.display()))?;

        // `output()` would replace the file handle with a pipe, so spawn and wait instead.
        let child = Command::new(&self.gh)
            .arg("api")
            .arg(archive_endpoint(run, artifact))
            .stdin(Stdio::null())
            .stdout(Stdio::from(file))
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| t!("command.start_failed", program = &self.gh))?;
        let output = child
            .wait_with_output()
            .await
            .with_context(|| t!("command.start_failed", program = &self.gh))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(t!(
                "command.exit_failed",
                program = &self.gh,
                status = output.status,
                stderr = stderr.trim()
            ));
        }
        Ok(())
    }

    async fn extract_archive(&self, archive: &Path, dest: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.unzip);
        cmd.arg("-q").arg("-o").arg(archive).arg("-d").arg(dest);
        command::run_for_stdout(cmd, &self.unzip).await?;
        Ok(())
    }
}
