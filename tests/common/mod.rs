// Shared test helpers for integration tests
#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

/// A `galaxy-ci` command running in `dir` with English messages and none of
/// the CI variables leaking in from the host.
pub fn galaxy_ci(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("galaxy-ci").expect("binary should be built");
    cmd.current_dir(dir)
        .arg("--lang")
        .arg("en")
        .env_remove("GITHUB_OUTPUT")
        .env_remove("GITHUB_WORKSPACE")
        .env_remove("GALAXY_API_KEY");
    cmd
}

pub fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write file");
}

/// Builds a workflow tree:
///
/// ```text
/// root/
///   topics/
///     proteomics/ (workflow-a.ga, workflow-a-tests.yml)
///     genomics/
///       variant/  (workflow-c.ga, workflow-c-tests.yml)
///   docs/README.md
/// ```
pub fn create_workflow_tree() -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let root = temp_dir.path();
    write(&root.join("topics/proteomics/workflow-a.ga"), "{}");
    write(&root.join("topics/proteomics/workflow-a-tests.yml"), "- doc: a");
    write(&root.join("topics/genomics/variant/workflow-c.ga"), "{}");
    write(&root.join("topics/genomics/variant/workflow-c-tests.yml"), "- doc: c");
    write(&root.join("docs/README.md"), "docs");
    temp_dir
}

/// Writes an executable shell script standing in for `planemo`. It records
/// its arguments in `<dir>/args.txt` and then runs `body`.
#[cfg(unix)]
pub fn write_fake_tool(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-planemo.sh");
    let script = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"{}\"\n{}\n",
        dir.join("args.txt").display(),
        body
    );
    fs::write(&path, script).expect("Failed to write fake tool");
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Script body that writes a planemo-style report holding `invocation_id`
/// to the path following `--test_output_json`.
pub fn report_writing_body(invocation_id: &str) -> String {
    format!(
        r#"report=""
while [ "$#" -gt 0 ]; do
  if [ "$1" = "--test_output_json" ]; then report="$2"; fi
  shift
done
echo '{{"tests":[{{"data":{{"invocation_details":{{"details":{{"invocation_id":"{}"}}}}}}}}]}}' > "$report""#,
        invocation_id
    )
}
