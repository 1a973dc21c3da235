//! # Command-Line Interface / 命令行接口
//!
//! Builds the `galaxy-ci` command tree with localized help, resolves the
//! configuration and locale, and dispatches to the subcommands.
//!
//! 构建带本地化帮助信息的 `galaxy-ci` 命令树，解析配置和语言环境，并分派到各子命令。

use anyhow::Result;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::core::config::{self, CiConfig, CiEnvironment, DEFAULT_CONFIG_FILE};
use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    for (pos, arg) in args.iter().enumerate() {
        if arg == "--lang" {
            return args.get(pos + 1).cloned();
        }
        if let Some(lang) = arg.strip_prefix("--lang=") {
            return Some(lang.to_string());
        }
    }
    None
}

fn system_language() -> String {
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("galaxy-ci")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("cli.config", locale = locale).to_string())
                .value_name("CONFIG")
                .default_value(DEFAULT_CONFIG_FILE)
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("matrix")
                .about(t!("cli.matrix_about", locale = locale).to_string())
                .arg(
                    Arg::new("input-dir")
                        .long("input-dir")
                        .help(t!("cli.input_dir", locale = locale).to_string())
                        .value_name("INPUT_DIR")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("workflow-ext")
                        .long("workflow-ext")
                        .help(t!("cli.workflow_ext", locale = locale).to_string())
                        .value_name("EXT")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("params-ext")
                        .long("params-ext")
                        .help(t!("cli.params_ext", locale = locale).to_string())
                        .value_name("EXT")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("output-key")
                        .long("output-key")
                        .help(t!("cli.output_key", locale = locale).to_string())
                        .value_name("KEY")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("run-test")
                .about(t!("cli.run_test_about", locale = locale).to_string())
                .arg(
                    Arg::new("workflow")
                        .long("workflow")
                        .help(t!("cli.workflow", locale = locale).to_string())
                        .value_name("WORKFLOW")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("params")
                        .long("params")
                        .help(t!("cli.params", locale = locale).to_string())
                        .value_name("PARAMS")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("run-id")
                        .long("run-id")
                        .help(t!("cli.run_id", locale = locale).to_string())
                        .value_name("RUN_ID")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .help(t!("cli.mode", locale = locale).to_string())
                        .value_name("MODE")
                        .value_parser(["dedup", "demo"])
                        .default_value("dedup")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("records-file")
                        .long("records-file")
                        .help(t!("cli.records_file", locale = locale).to_string())
                        .value_name("RECORDS_FILE")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .help(t!("cli.run_output_dir", locale = locale).to_string())
                        .value_name("OUTPUT_DIR")
                        .default_value(".")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("galaxy-url")
                        .long("galaxy-url")
                        .help(t!("cli.galaxy_url", locale = locale).to_string())
                        .value_name("URL")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("tool")
                        .long("tool")
                        .help(t!("cli.tool", locale = locale).to_string())
                        .value_name("COMMAND")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("demo-delay-secs")
                        .long("demo-delay-secs")
                        .help(t!("cli.demo_delay", locale = locale).to_string())
                        .value_name("SECONDS")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("fetch")
                .about(t!("cli.fetch_about", locale = locale).to_string())
                .arg(
                    Arg::new("url")
                        .help(t!("cli.url", locale = locale).to_string())
                        .value_name("URL")
                        .required(true)
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .help(t!("cli.fetch_output_dir", locale = locale).to_string())
                        .value_name("OUTPUT_DIR")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("concat")
                .about(t!("cli.concat_about", locale = locale).to_string())
                .arg(
                    Arg::new("artifacts-dir")
                        .long("artifacts-dir")
                        .help(t!("cli.artifacts_dir", locale = locale).to_string())
                        .value_name("ARTIFACTS_DIR")
                        .default_value("./artifacts")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output-file")
                        .long("output-file")
                        .help(t!("cli.output_file", locale = locale).to_string())
                        .value_name("OUTPUT_FILE")
                        .default_value("./all_invocation_ids.txt")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("extension")
                        .long("extension")
                        .help(t!("cli.extension", locale = locale).to_string())
                        .value_name("EXT")
                        .default_value("txt")
                        .conflicts_with("file-name")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("file-name")
                        .long("file-name")
                        .help(t!("cli.file_name", locale = locale).to_string())
                        .value_name("NAME")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("flat")
                        .long("flat")
                        .help(t!("cli.flat", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help(t!("cli.show", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("prepare")
                .about(t!("cli.prepare_about", locale = locale).to_string())
                .arg(
                    Arg::new("staging-dir")
                        .long("staging-dir")
                        .help(t!("cli.staging_dir", locale = locale).to_string())
                        .value_name("STAGING_DIR")
                        .default_value("staging")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cli.init_about", locale = locale).to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("cli.non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn config_path(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Loads the configuration file named by `--config`.
fn load_config(matches: &ArgMatches) -> Result<CiConfig> {
    let explicit = matches.value_source("config") == Some(ValueSource::CommandLine);
    config::load_config(&config_path(matches), explicit)
}

/// Parses the command line and runs the selected subcommand.
pub async fn run() -> Result<()> {
    // Pre-parse language so that help output is localized.
    let explicit_language = pre_parse_language();
    let help_locale =
        crate::resolve_locale(&explicit_language.clone().unwrap_or_else(system_language));
    rust_i18n::set_locale(&help_locale);

    let matches = build_cli(&help_locale).get_matches();
    let Some((name, sub_matches)) = matches.subcommand() else {
        return Ok(());
    };

    if name == "init" {
        let non_interactive = sub_matches.get_flag("non-interactive");
        return commands::init::execute(&config_path(sub_matches), non_interactive, &help_locale);
    }

    let config = load_config(sub_matches)?;
    let locale = match (&explicit_language, &config.language) {
        (Some(lang), _) | (None, Some(lang)) => crate::resolve_locale(lang),
        (None, None) => help_locale.clone(),
    };
    rust_i18n::set_locale(&locale);

    let environment = CiEnvironment::from_process_env(&config.api_key_env);

    match name {
        "matrix" => commands::matrix::execute(sub_matches, &config, &environment, &locale),
        "run-test" => commands::run_test::execute(sub_matches, &config, &environment, &locale).await,
        "fetch" => commands::fetch::execute(sub_matches, &locale).await,
        "concat" => commands::concat::execute(sub_matches, &locale),
        "prepare" => commands::prepare::execute(sub_matches, &environment, &locale),
        _ => Ok(()),
    }
}
