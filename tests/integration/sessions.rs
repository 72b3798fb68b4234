//! Upload sessions end to end: ingest, resolve, drill down, destroy.

use netviz::core::NetvizError;
use netviz::document::RESOLVED_PATH_KEY;
use netviz::session::SessionManager;
use netviz::subgraph::fetch_subgraph;
use serde_yaml::Value;

use crate::common::{TestRoot, zip_bundle};

#[tokio::test]
async fn archive_upload_then_subgraph_drill_down() {
    let base = TestRoot::new();
    let sessions = SessionManager::new_local(base.path()).unwrap();
    let id = sessions.create().unwrap();

    let bundle = zip_bundle(&[
        (
            "model.yaml",
            "modules:\n  head:\n    cls: ComposableModel\n    config: blocks/head.yaml\n",
        ),
        (
            "blocks/head.yaml",
            "modules:\n  conv:\n    cls: Conv\n    config: conv.yaml\n",
        ),
        ("blocks/conv.yaml", "kernel: 3\n"),
    ]);
    sessions.ingest_archive(&id, &bundle).await.unwrap();

    // Top level: the lazy node advertises its canonical path.
    let doc = fetch_subgraph(&sessions, &id, "model.yaml").await.unwrap();
    let head = doc.modules().unwrap().get("head").unwrap();
    assert_eq!(
        head.get("config").and_then(Value::as_str),
        Some("blocks/head.yaml")
    );
    assert!(head.get(RESOLVED_PATH_KEY).is_some());

    // Drill-down: the subgraph resolves its own references relative to its
    // directory, exactly as a top-level upload would.
    let sub = fetch_subgraph(&sessions, &id, "blocks/head.yaml").await.unwrap();
    let conv = sub.modules().unwrap().get("conv").unwrap();
    assert_eq!(
        conv.get("config").unwrap().get("kernel").and_then(Value::as_u64),
        Some(3)
    );
}

#[tokio::test]
async fn sessions_are_isolated_from_each_other() {
    let base = TestRoot::new();
    let sessions = SessionManager::new_local(base.path()).unwrap();
    let first = sessions.create().unwrap();
    let second = sessions.create().unwrap();

    sessions
        .ingest_file(&first, "model.yaml", b"only: here\n")
        .await
        .unwrap();

    let err = fetch_subgraph(&sessions, &second, "model.yaml").await.unwrap_err();
    assert!(matches!(err, NetvizError::TargetNotFound { .. }));
}

#[tokio::test]
async fn destroyed_session_rejects_further_fetches() {
    let base = TestRoot::new();
    let sessions = SessionManager::new_local(base.path()).unwrap();
    let id = sessions.create().unwrap();
    sessions
        .ingest_file(&id, "model.yaml", b"modules: {}\n")
        .await
        .unwrap();

    sessions.destroy(&id).await;
    let err = fetch_subgraph(&sessions, &id, "model.yaml").await.unwrap_err();
    assert!(matches!(err, NetvizError::SessionNotFound { .. }));
}

#[tokio::test]
async fn malicious_archive_is_rejected_before_extraction_completes() {
    let base = TestRoot::new();
    let sessions = SessionManager::new_local(base.path()).unwrap();
    let id = sessions.create().unwrap();

    let bundle = zip_bundle(&[("../../outside.yaml", "owned: true\n")]);
    let err = sessions.ingest_archive(&id, &bundle).await.unwrap_err();
    assert!(matches!(err, NetvizError::ArchiveEntryEscape { .. }));
    assert!(!base.path().join("outside.yaml").exists());
}
