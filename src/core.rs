//! # Core Module / 核心模块
//!
//! This module contains the data models, configuration and the logic behind
//! each pipeline step. Nothing in here reads process environment variables;
//! every entry point takes an explicit configuration.
//!
//! 此模块包含数据模型、配置以及每个流水线步骤背后的逻辑。
//! 这里不读取进程环境变量；每个入口都接受显式配置。

pub mod aggregate;
pub mod artifacts;
pub mod config;
pub mod invocation;
pub mod matrix;
pub mod models;
pub mod records;
pub mod staging;

// Re-exports
pub use config::CiConfig;
pub use invocation::{WorkflowInvoker, run_test};
pub use models::{InvocationId, InvocationRecord, WorkflowRef};
