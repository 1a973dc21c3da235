//! # Commands / 命令
//!
//! One module per subcommand. Each turns parsed arguments plus the resolved
//! configuration into an explicit call into `core`.
//!
//! 每个子命令一个模块。每个模块将解析后的参数和配置转换为对 `core` 的显式调用。

pub mod concat;
pub mod fetch;
pub mod init;
pub mod matrix;
pub mod prepare;
pub mod run_test;
