use criterion::{Criterion, criterion_group, criterion_main};
use galaxy_ci::core::invocation::{InvocationRequest, RunTestConfig, WorkflowInvoker, run_test};
use galaxy_ci::core::matrix::{FileSelector, generate_matrix};
use galaxy_ci::core::records::lookup_invocation;
use galaxy_ci::models::{InvocationId, RunMode, ToolError, WorkflowRef};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::{TempDir, tempdir};
use tokio::runtime::Runtime;

/// 20 topics x 10 workflows, plus a docs directory per topic that never qualifies.
fn workflow_tree() -> TempDir {
    let temp = tempdir().unwrap();
    for topic in 0..20 {
        for workflow in 0..10 {
            let dir = temp.path().join(format!("topic-{topic}/workflow-{workflow}"));
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("main.ga"), "{}").unwrap();
            fs::write(dir.join("main-tests.yml"), "- doc: bench").unwrap();
        }
        let docs = temp.path().join(format!("topic-{topic}/docs"));
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("README.md"), "docs").unwrap();
    }
    temp
}

fn records_file(dir: &Path, count: usize) -> std::path::PathBuf {
    let path = dir.join("all_invocation_ids.txt");
    let content: String = (0..count).map(|i| format!("run-{i}\tinv-{i}\n")).collect();
    fs::write(&path, content).unwrap();
    path
}

struct NeverInvoked;

impl WorkflowInvoker for NeverInvoked {
    async fn invoke(&self, _request: &InvocationRequest<'_>) -> Result<InvocationId, ToolError> {
        Err(ToolError::EmptyCommand)
    }
}

fn bench_generate_matrix(c: &mut Criterion) {
    let tree = workflow_tree();
    let selector = FileSelector::default();

    c.bench_function("generate_matrix_200_workflows", |b| {
        b.iter(|| generate_matrix(tree.path(), &selector).unwrap());
    });
}

fn bench_lookup_invocation(c: &mut Criterion) {
    let temp = tempdir().unwrap();
    let path = records_file(temp.path(), 5_000);

    c.bench_function("lookup_invocation_last_of_5000", |b| {
        b.iter(|| lookup_invocation(&path, "run-4999").unwrap());
    });
}

fn bench_reused_run(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let temp = tempdir().unwrap();
    let records = records_file(temp.path(), 1_000);
    let config = RunTestConfig {
        workflow: WorkflowRef::new("wf.ga", "wf-tests.yml"),
        run_id: "run-500".to_string(),
        mode: RunMode::Dedup,
        records_file: records,
        output_dir: temp.path().join("out"),
        galaxy_url: "https://usegalaxy.org".to_string(),
        api_key: None,
        api_key_env: "GALAXY_API_KEY".to_string(),
        demo_delay: Duration::ZERO,
    };

    c.bench_function("run_test_reused", |b| {
        b.to_async(&rt).iter(|| async {
            let _ = run_test(&config, &NeverInvoked).await;
        });
    });
}

criterion_group!(benches, bench_generate_matrix, bench_lookup_invocation, bench_reused_run);
criterion_main!(benches);
