//! # Configuration Module / 配置模块
//!
//! Settings come from an optional `GalaxyCi.toml` file and from a handful of
//! CI environment variables. Both are resolved once, at the edge, into plain
//! structs that the pipeline steps receive explicitly.
//!
//! 设置来自可选的 `GalaxyCi.toml` 文件和少量 CI 环境变量。
//! 两者都在边界处一次性解析为普通结构体，并显式传递给各流水线步骤。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::t;

/// Default config file name looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "GalaxyCi.toml";

/// Settings loaded from `GalaxyCi.toml`. Every field has a default, so an
/// empty file is a valid configuration.
/// 从 `GalaxyCi.toml` 加载的设置。每个字段都有默认值，因此空文件也是有效配置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CiConfig {
    /// The language for console messages (e.g. "en", "zh-CN").
    /// 控制台消息的语言（例如 "en", "zh-CN"）。
    pub language: Option<String>,
    /// Galaxy server the workflows are invoked on.
    /// 调用工作流的 Galaxy 服务器。
    pub galaxy_url: String,
    /// Environment variable holding the Galaxy API key.
    /// 保存 Galaxy API 密钥的环境变量。
    pub api_key_env: String,
    /// Command used to run the test tool; split like a shell would.
    /// 用于运行测试工具的命令；按 shell 规则拆分。
    pub test_tool: String,
    /// Combined records file, relative to the workspace root.
    /// 合并的记录文件，相对于工作区根目录。
    pub records_file: String,
    /// Extensions that mark a workflow definition.
    pub workflow_extensions: Vec<String>,
    /// Extensions that mark a test parameters file.
    pub params_extensions: Vec<String>,
    /// Key used when writing the matrix to the CI output channel.
    pub matrix_output_key: String,
}

impl Default for CiConfig {
    fn default() -> Self {
        Self {
            language: None,
            galaxy_url: "https://usegalaxy.org".to_string(),
            api_key_env: "GALAXY_API_KEY".to_string(),
            test_tool: "planemo".to_string(),
            records_file: "all_invocation_ids.txt".to_string(),
            workflow_extensions: vec!["ga".to_string()],
            params_extensions: vec!["yml".to_string()],
            matrix_output_key: "matrix_json".to_string(),
        }
    }
}

impl CiConfig {
    /// Splits `test_tool` into program and arguments, expanding `~` and
    /// environment variables first.
    pub fn test_tool_command(&self) -> Result<Vec<String>> {
        let expanded = shellexpand::full(&self.test_tool)
            .with_context(|| t!("config.expand_failed", value = &self.test_tool))?;
        let parts = shlex::split(&expanded)
            .with_context(|| t!("config.command_parse_failed", value = &*expanded))?;
        if parts.is_empty() {
            anyhow::bail!(t!("config.command_empty"));
        }
        Ok(parts)
    }

    /// Resolves the combined records file against the workspace root.
    pub fn records_path(&self, workspace: &Path) -> Result<PathBuf> {
        let expanded = shellexpand::full(&self.records_file)
            .with_context(|| t!("config.expand_failed", value = &self.records_file))?;
        Ok(workspace.join(&*expanded))
    }
}

/// Loads a configuration file.
///
/// A missing file at the default location yields the defaults; a missing file
/// that was asked for explicitly is an error, as is malformed TOML.
///
/// 加载配置文件。默认位置缺失文件时返回默认值；显式指定的文件缺失或 TOML 格式错误时报错。
pub fn load_config(path: &Path, explicit: bool) -> Result<CiConfig> {
    if !path.exists() && !explicit {
        return Ok(CiConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| t!("config.read_failed", path = path.display()))?;
    let config: CiConfig = toml::from_str(&content)
        .with_context(|| t!("config.parse_failed", path = path.display()))?;
    Ok(config)
}

/// The CI-provided environment, captured once.
/// CI 提供的环境，一次性捕获。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiEnvironment {
    /// File that step outputs are appended to (`GITHUB_OUTPUT`).
    pub github_output: Option<PathBuf>,
    /// Workspace root (`GITHUB_WORKSPACE`).
    pub workspace: Option<PathBuf>,
    /// Galaxy API key read from the variable named by `api_key_env`.
    pub api_key: Option<String>,
}

impl CiEnvironment {
    /// Reads the process environment. Empty values count as unset.
    pub fn from_process_env(api_key_env: &str) -> Self {
        let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            github_output: non_empty("GITHUB_OUTPUT").map(PathBuf::from),
            workspace: non_empty("GITHUB_WORKSPACE").map(PathBuf::from),
            api_key: non_empty(api_key_env),
        }
    }

    /// The workspace root, or the current directory when the CI did not set one.
    pub fn workspace_root(&self) -> PathBuf {
        self.workspace
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
