//! # Reporting Module / 报告模块
//!
//! This module prints the colored, localized summaries shown at the end of each
//! pipeline step.
//!
//! 此模块打印每个流水线步骤结束时显示的彩色本地化摘要。

pub mod console;

// Re-export common reporting functions
pub use console::{print_concat_summary, print_fetch_summary, print_run_outcome};
