//! End-to-end reference resolution over a local root.

use netviz::document::{ConfigDocument, RESOLVED_PATH_KEY};
use netviz::resolver::ReferenceResolver;
use netviz::storage::LocalStorage;
use serde_yaml::Value;

use crate::common::TestRoot;

async fn resolve(root: &TestRoot, relative: &str) -> ConfigDocument {
    let storage = LocalStorage::new(root.path()).unwrap();
    let mut doc = ConfigDocument::parse(&root.read(relative)).unwrap();
    let dir = relative.rsplit_once('/').map_or("", |(dir, _)| dir);
    ReferenceResolver::new(&storage)
        .resolve_document(&mut doc, dir)
        .await;
    doc
}

fn module<'a>(doc: &'a ConfigDocument, name: &str) -> &'a Value {
    doc.modules().unwrap().get(name).unwrap()
}

#[tokio::test]
async fn eager_references_are_inlined_and_lazy_ones_kept() {
    let root = TestRoot::new().with_basic_graph();
    let doc = resolve(&root, "model.yaml").await;

    // Eager module: the string became the referenced file's parsed content.
    let backbone = module(&doc, "backbone");
    assert_eq!(
        backbone.get("config").unwrap().get("channels").and_then(Value::as_u64),
        Some(64)
    );
    assert!(backbone.get(RESOLVED_PATH_KEY).is_some());

    // Lazy module: still a string, canonicalized to a root-relative path.
    let head = module(&doc, "head");
    assert_eq!(
        head.get("config").and_then(Value::as_str),
        Some("blocks/head.yaml")
    );
    assert!(head.get(RESOLVED_PATH_KEY).is_some());

    // Reserved modules never participate.
    assert!(module(&doc, "entry").get("config").is_none());
    assert!(module(&doc, "exit").get("config").is_none());
}

#[tokio::test]
async fn sibling_candidate_wins_over_root() {
    let root = TestRoot::new();
    root.write(
        "nested/sub.yaml",
        "modules:\n  m:\n    cls: Conv\n    config: shared.yaml\n",
    )
    .write("nested/shared.yaml", "origin: sibling\n")
    .write("shared.yaml", "origin: root\n");

    let doc = resolve(&root, "nested/sub.yaml").await;
    assert_eq!(
        module(&doc, "m").get("config").unwrap().get("origin").and_then(Value::as_str),
        Some("sibling")
    );
}

#[tokio::test]
async fn root_candidate_is_the_fallback() {
    let root = TestRoot::new();
    root.write(
        "nested/sub.yaml",
        "modules:\n  m:\n    cls: Conv\n    config: shared.yaml\n",
    )
    .write("shared.yaml", "origin: root\n");

    let doc = resolve(&root, "nested/sub.yaml").await;
    assert_eq!(
        module(&doc, "m").get("config").unwrap().get("origin").and_then(Value::as_str),
        Some("root")
    );
}

#[tokio::test]
async fn leading_slash_anchors_to_the_root() {
    let root = TestRoot::new();
    root.write(
        "nested/sub.yaml",
        "modules:\n  m:\n    cls: Conv\n    config: /shared.yaml\n",
    )
    .write("nested/shared.yaml", "origin: sibling\n")
    .write("shared.yaml", "origin: root\n");

    let doc = resolve(&root, "nested/sub.yaml").await;
    assert_eq!(
        module(&doc, "m").get("config").unwrap().get("origin").and_then(Value::as_str),
        Some("root")
    );
}

#[tokio::test]
async fn escaping_references_are_left_verbatim() {
    let root = TestRoot::new();
    root.write(
        "model.yaml",
        "modules:\n  m:\n    cls: Conv\n    config: ../../etc/passwd\n",
    );

    let doc = resolve(&root, "model.yaml").await;
    let m = module(&doc, "m");
    assert_eq!(m.get("config").and_then(Value::as_str), Some("../../etc/passwd"));
    assert!(m.get(RESOLVED_PATH_KEY).is_none());
}

#[tokio::test]
async fn unresolved_references_keep_their_string() {
    let root = TestRoot::new();
    root.write(
        "model.yaml",
        "modules:\n  m:\n    cls: Conv\n    config: missing.yaml\n",
    );

    let doc = resolve(&root, "model.yaml").await;
    assert_eq!(
        module(&doc, "m").get("config").and_then(Value::as_str),
        Some("missing.yaml")
    );
}

#[tokio::test]
async fn interpolation_runs_inside_referenced_files() {
    let root = TestRoot::new();
    root.write(
        "model.yaml",
        "modules:\n  m:\n    cls: Conv\n    config: sub.yaml\n",
    )
    .write("sub.yaml", "base: 32\nwidth: ${base}\n");

    let doc = resolve(&root, "model.yaml").await;
    assert_eq!(
        module(&doc, "m").get("config").unwrap().get("width").and_then(Value::as_u64),
        Some(32)
    );
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let root = TestRoot::new().with_basic_graph();
    let storage = LocalStorage::new(root.path()).unwrap();

    let mut doc = ConfigDocument::parse(&root.read("model.yaml")).unwrap();
    let resolver = ReferenceResolver::new(&storage);
    resolver.resolve_document(&mut doc, "").await;
    let first = doc.to_yaml().unwrap();
    resolver.resolve_document(&mut doc, "").await;
    assert_eq!(doc.to_yaml().unwrap(), first);
}

#[tokio::test]
async fn reference_cycles_terminate_with_a_usable_document() {
    let root = TestRoot::new();
    root.write("a.yaml", "modules:\n  m:\n    cls: Conv\n    config: b.yaml\n")
        .write("b.yaml", "modules:\n  m:\n    cls: Conv\n    config: a.yaml\n");

    let doc = resolve(&root, "a.yaml").await;
    // a -> b -> a expands; the second visit of b is caught by the chain and
    // the back-reference stays a string.
    let through_b = module(&doc, "m").get("config").unwrap();
    let through_a = through_b
        .get("modules")
        .and_then(|m| m.get("m"))
        .and_then(|m| m.get("config"))
        .unwrap();
    assert_eq!(
        through_a
            .get("modules")
            .and_then(|m| m.get("m"))
            .and_then(|m| m.get("config"))
            .and_then(Value::as_str),
        Some("b.yaml")
    );
}

#[tokio::test]
async fn collect_references_walks_breadth_first() {
    let root = TestRoot::new().with_basic_graph();
    let storage = LocalStorage::new(root.path()).unwrap();

    let refs = ReferenceResolver::new(&storage)
        .collect_references("model.yaml")
        .await;
    assert_eq!(refs, vec!["blocks/backbone.yaml", "blocks/head.yaml"]);
}
