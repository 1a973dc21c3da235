//! # Galaxy CI Library / Galaxy CI 库
//!
//! This library provides the pipeline steps used to test Galaxy workflows in CI:
//! matrix discovery, deduplicated `planemo` invocations, artifact fetching and
//! artifact concatenation.
//!
//! 此库提供在 CI 中测试 Galaxy 工作流的流水线步骤：
//! 矩阵发现、去重的 `planemo` 调用、产物下载和产物合并。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models and the logic behind each pipeline step
//! - `infra` - Subprocesses, CI output channel, `gh` and `planemo` adapters
//! - `reporting` - Console summaries
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型以及每个流水线步骤的逻辑
//! - `infra` - 子进程、CI 输出通道、`gh` 与 `planemo` 适配器
//! - `reporting` - 控制台摘要
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::models;

/// Picks the best available locale for a requested language tag.
///
/// Tries the full tag (e.g. "zh-CN"), then the language part (e.g. "en" from
/// "en-US"), and finally falls back to "en".
pub fn resolve_locale(requested: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    let is_available = |code: &str| available_locales.iter().any(|l| *l == code);

    if is_available(requested) {
        return requested.to_string();
    }
    requested
        .split(['-', '_'])
        .next()
        .filter(|lang_code| is_available(lang_code))
        .unwrap_or("en")
        .to_string()
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
