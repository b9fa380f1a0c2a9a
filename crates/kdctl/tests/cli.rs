//! Exit codes and output of the `kdctl` binary for paths that never reach a cluster.

use std::io::Write;

use assert_cmd::Command;
use predicates::str::contains;

fn kdctl() -> Command {
    let mut cmd = Command::cargo_bin("kdctl").unwrap();
    cmd.env_remove("KDCTL_KUBECONFIG").env_remove("RUST_LOG");
    cmd
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const BILLING: &str = "name: billing\nteam: payments\nimage: repo/billing:1.2\nport: 8080\nreplicas: 3\n";

#[test]
fn dry_run_prints_manifest_and_exits_zero() {
    let file = write_config(BILLING);

    kdctl()
        .args(["create", "--dry-run"])
        .arg(file.path())
        .assert()
        .success()
        .code(0)
        .stdout(contains("kind: Deployment"))
        .stdout(contains("kdctl.dev/app-name: billing"));
}

#[test]
fn missing_config_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    kdctl()
        .args(["create", "--dry-run"])
        .arg(dir.path().join("missing.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to read"));
}

#[test]
fn invalid_replicas_exit_one() {
    let file = write_config(&BILLING.replace("replicas: 3", "replicas: 0"));

    kdctl()
        .args(["create", "--dry-run"])
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(contains("replicas"));
}

#[test]
fn malformed_yaml_exits_one() {
    let file = write_config("name: [unterminated");

    kdctl()
        .args(["create", "--dry-run"])
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to parse deployment config"));
}

#[test]
fn strict_labels_reject_reserved_key() {
    let file = write_config(&format!("{BILLING}labels:\n  app-name: other\n"));

    kdctl()
        .args(["create", "--dry-run", "--strict-labels"])
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(contains("kdctl.dev/app-name"));
}
