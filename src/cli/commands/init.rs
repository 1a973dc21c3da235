//! # Init Command Module / 初始化命令模块
//!
//! Implements `galaxy-ci init`, which writes a `GalaxyCi.toml` with the
//! defaults. In interactive mode the user can adjust the Galaxy server, the
//! credential variable and the test tool command before the file is saved.
//!
//! 实现 `galaxy-ci init`，写入带默认值的 `GalaxyCi.toml`。
//! 交互模式下，用户可以在保存前调整 Galaxy 服务器、凭据变量和测试工具命令。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::Path;

use crate::core::config::CiConfig;
use crate::infra::{fs as infra_fs, t};

const CONFIG_HEADER: &str = "\
# Galaxy CI configuration / Galaxy CI 配置
# Every key is optional; removed keys fall back to their defaults.
# 所有键都是可选的；删除的键会回退到默认值。
#
# The API key itself is never stored here, only the name of the variable
# holding it. / API 密钥本身不会保存在这里，只保存存放它的环境变量名。

";

/// Executes the init command.
///
/// # Arguments
/// * `path` - Where the configuration file is written
/// * `non_interactive` - Skip all prompts; never overwrite an existing file
/// * `locale` - Language recorded in the new file and used for messages
pub fn execute(path: &Path, non_interactive: bool, locale: &str) -> Result<()> {
    let mut config = CiConfig {
        language: Some(locale.to_string()),
        ..CiConfig::default()
    };

    if non_interactive {
        if path.exists() {
            println!(
                "{}",
                t!("init.file_exists", locale = locale, path = path.display()).yellow()
            );
            return Ok(());
        }
    } else {
        let theme = ColorfulTheme::default();
        println!("\n{}", t!("init.welcome", locale = locale).bold().cyan());

        if !confirm_overwrite(path, &theme, locale)? {
            println!("{}", t!("init.aborted", locale = locale).yellow());
            return Ok(());
        }
        prompt_for_settings(&mut config, &theme, locale)?;
    }

    let body = toml::to_string_pretty(&config).context(t!("init.serialize_failed", locale = locale))?;
    infra_fs::write_file(path, &format!("{}{}", CONFIG_HEADER, body))?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init.success", locale = locale, path = path.display()).bold()
    );
    println!("{}", t!("init.next_steps", locale = locale));
    Ok(())
}

/// Asks before replacing an existing file. A missing file needs no confirmation.
fn confirm_overwrite(path: &Path, theme: &ColorfulTheme, locale: &str) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Confirm::with_theme(theme)
        .with_prompt(t!("init.overwrite_prompt", locale = locale, path = path.display()))
        .default(false)
        .interact()
        .context(t!("init.prompt_failed", locale = locale))
}

fn prompt_for_settings(config: &mut CiConfig, theme: &ColorfulTheme, locale: &str) -> Result<()> {
    config.galaxy_url = Input::with_theme(theme)
        .with_prompt(t!("init.galaxy_url_prompt", locale = locale))
        .default(config.galaxy_url.clone())
        .interact_text()
        .context(t!("init.prompt_failed", locale = locale))?;
    config.api_key_env = Input::with_theme(theme)
        .with_prompt(t!("init.api_key_env_prompt", locale = locale))
        .default(config.api_key_env.clone())
        .interact_text()
        .context(t!("init.prompt_failed", locale = locale))?;
    config.test_tool = Input::with_theme(theme)
        .with_prompt(t!("init.test_tool_prompt", locale = locale))
        .default(config.test_tool.clone())
        .interact_text()
        .context(t!("init.prompt_failed", locale = locale))?;
    Ok(())
}
