//! # Internationalization Integration Tests / 国际化集成测试
//!
//! Checks that `--lang` and the `language` setting of `GalaxyCi.toml` switch
//! the console messages.
//!
//! 检查 `--lang` 和 `GalaxyCi.toml` 的 `language` 设置能切换控制台消息。

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn galaxy_ci(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("galaxy-ci").unwrap();
    cmd.current_dir(dir).env_remove("GITHUB_OUTPUT");
    cmd
}

#[test]
fn test_chinese_messages_with_lang_flag() {
    let temp = tempdir().unwrap();

    galaxy_ci(temp.path())
        .arg("--lang")
        .arg("zh-CN")
        .arg("prepare")
        .assert()
        .success()
        .stdout(predicate::str::contains("已生成 3 个作业。"))
        .stdout(predicate::str::contains("下一步的矩阵："));
}

#[test]
fn test_lang_flag_with_equals_sign() {
    let temp = tempdir().unwrap();

    galaxy_ci(temp.path())
        .arg("--lang=zh-CN")
        .arg("concat")
        .arg("--artifacts-dir")
        .arg("missing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("目录不存在"));
}

#[test]
fn test_language_from_config_file() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("GalaxyCi.toml"), "language = \"zh-CN\"\n").unwrap();

    galaxy_ci(temp.path())
        .arg("prepare")
        .assert()
        .success()
        .stdout(predicate::str::contains("已生成 3 个作业。"));
}

#[test]
fn test_lang_flag_overrides_config_file() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("GalaxyCi.toml"), "language = \"zh-CN\"\n").unwrap();

    galaxy_ci(temp.path())
        .arg("--lang")
        .arg("en")
        .arg("prepare")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 3 jobs."));
}

#[test]
fn test_unknown_language_falls_back_to_english() {
    let temp = tempdir().unwrap();

    galaxy_ci(temp.path())
        .arg("--lang")
        .arg("xx-YY")
        .arg("prepare")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 3 jobs."));
}

#[test]
fn test_help_is_localized() {
    let temp = tempdir().unwrap();

    galaxy_ci(temp.path())
        .arg("--lang")
        .arg("zh-CN")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("用于测试 Galaxy 工作流的 CI 工具"));
}
