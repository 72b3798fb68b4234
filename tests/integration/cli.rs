//! The `netviz` binary end to end.

use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::TestRoot;

fn netviz() -> Command {
    Command::cargo_bin("netviz").unwrap()
}

#[test]
fn resolve_prints_the_expanded_document() {
    let root = TestRoot::new().with_basic_graph();

    netviz()
        .arg("resolve")
        .arg(root.path().join("model.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("channels: 64"))
        .stdout(predicate::str::contains("_resolved_config_path"));
}

#[test]
fn resolve_json_emits_json() {
    let root = TestRoot::new().with_basic_graph();

    let output = netviz()
        .arg("resolve")
        .arg(root.path().join("model.yaml"))
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        parsed["modules"]["backbone"]["config"]["channels"],
        serde_json::json!(64)
    );
}

#[test]
fn resolve_writes_to_the_output_file() {
    let root = TestRoot::new().with_basic_graph();
    let out = root.path().join("expanded.yaml");

    netviz()
        .arg("--quiet")
        .arg("resolve")
        .arg(root.path().join("model.yaml"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("channels: 64"));
}

#[test]
fn resolve_respects_an_explicit_root() {
    let root = TestRoot::new();
    root.write(
        "nested/sub.yaml",
        "modules:\n  m:\n    cls: Conv\n    config: shared.yaml\n",
    )
    .write("shared.yaml", "origin: root\n");

    netviz()
        .arg("resolve")
        .arg(root.path().join("nested/sub.yaml"))
        .arg("--root")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("origin: root"));
}

#[test]
fn resolve_fails_cleanly_on_a_missing_file() {
    let root = TestRoot::new();

    netviz()
        .arg("resolve")
        .arg(root.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open"));
}

#[test]
fn refs_lists_transitive_references() {
    let root = TestRoot::new().with_basic_graph();

    netviz()
        .arg("refs")
        .arg(root.path().join("model.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "blocks/backbone.yaml\nblocks/head.yaml\n",
        ));
}

#[test]
fn presets_lists_the_catalog() {
    let root = TestRoot::new();
    root.write("resnet/model.yaml", "modules: {}\n")
        .write("tiny.yaml", "modules: {}\n");

    netviz()
        .arg("presets")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("resnet\tresnet/model.yaml"))
        .stdout(predicate::str::contains("tiny\ttiny.yaml"));
}

#[test]
fn presets_reports_an_empty_catalog() {
    let root = TestRoot::new();

    netviz()
        .arg("presets")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no presets found"));
}
