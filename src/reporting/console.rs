//! # Console Reporting Module / 控制台报告模块
//!
//! Final summaries for `run-test`, `fetch` and `concat`.
//!
//! `run-test`、`fetch` 和 `concat` 的最终摘要。

use colored::*;
use std::path::Path;

use crate::core::models::{ConcatSummary, FetchSummary, RunOutcome};
use crate::infra::t;

/// Prints the tally of a `fetch` batch.
///
/// # Output Format / 输出格式
/// ```text
/// Done! 3 artifacts downloaded successfully
/// 1 artifacts skipped (expired)
/// 1 artifacts failed to download
/// Artifacts saved to: ./artifacts_123
/// ```
pub fn print_fetch_summary(summary: &FetchSummary, output_dir: &Path, locale: &str) {
    println!(
        "\n{}",
        t!("fetch.summary_succeeded", locale = locale, count = summary.succeeded).green()
    );
    if summary.skipped > 0 {
        println!(
            "{}",
            t!("fetch.summary_skipped", locale = locale, count = summary.skipped).yellow()
        );
    }
    if summary.failed > 0 {
        println!(
            "{}",
            t!("fetch.summary_failed", locale = locale, count = summary.failed).red()
        );
    }
    println!(
        "{}",
        t!("fetch.summary_saved", locale = locale, path = output_dir.display()).green()
    );
}

/// Prints the result of a `concat` run, optionally followed by the combined content.
pub fn print_concat_summary(
    summary: &ConcatSummary,
    output_file: &Path,
    combined: Option<&str>,
    locale: &str,
) {
    println!(
        "{}",
        t!(
            "concat.done",
            locale = locale,
            sources = summary.sources,
            path = output_file.display()
        )
        .green()
    );
    println!(
        "  {}",
        t!(
            "concat.total_lines",
            locale = locale,
            files = summary.files_read,
            lines = summary.lines_written
        )
    );

    if let Some(content) = combined {
        println!("\n{}", t!("concat.content_banner", locale = locale).bold());
        print!("{}", content);
        println!("{}", "-".repeat(40));
    }
}

/// Prints where the record of a `run-test` job was written.
pub fn print_run_outcome(outcome: &RunOutcome, locale: &str) {
    let status = match outcome {
        RunOutcome::Reused { .. } => t!("report.status_reused", locale = locale).cyan(),
        RunOutcome::Invoked { .. } => t!("report.status_invoked", locale = locale).green(),
        RunOutcome::Simulated { .. } => t!("report.status_simulated", locale = locale).yellow(),
    };
    let record = outcome.record();
    println!(
        "  - {:<10} | {:<30} | {}",
        status, record.run_id, record.invocation_id
    );
    println!(
        "{}",
        t!("run.record_written", locale = locale, path = outcome.output_file().display())
    );
}
