//! # Infrastructure Module / 基础设施模块
//!
//! This module provides the side-effecting services used by the pipeline
//! steps: subprocess execution, file system helpers, the CI output channel
//! and the adapters for `gh` and `planemo`.
//!
//! 此模块提供流水线步骤使用的带副作用的服务：
//! 子进程执行、文件系统辅助函数、CI 输出通道以及 `gh` 和 `planemo` 的适配器。

pub mod ci_output;
pub mod command;
pub mod fs;
pub mod github;
pub mod planemo;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
