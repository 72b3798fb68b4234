//! Preset catalogs: discovery on disk and cloning into sessions.

use netviz::presets::{Preset, list_presets};
use netviz::session::SessionManager;
use netviz::storage::LocalStorage;
use netviz::subgraph::fetch_subgraph;
use serde_yaml::Value;

use crate::common::TestRoot;

fn seed_catalog(root: &TestRoot) {
    root.write(
        "resnet/model.yaml",
        "modules:\n  backbone:\n    cls: Sequential\n    config: blocks/backbone.yaml\n",
    )
    .write("resnet/blocks/backbone.yaml", "channels: 64\n")
    .write("tiny.yaml", "modules: {}\n")
    .write("notes.txt", "not a preset\n")
    .write("unmarked/readme.md", "also not a preset\n");
}

#[tokio::test]
async fn catalog_discovery_finds_both_layouts() {
    let root = TestRoot::new();
    seed_catalog(&root);
    let storage = LocalStorage::new(root.path()).unwrap();

    let presets = list_presets(&storage, "").await.unwrap();
    assert_eq!(
        presets,
        vec![
            Preset {
                name: "resnet".to_string(),
                entry_path: "resnet/model.yaml".to_string(),
            },
            Preset {
                name: "tiny".to_string(),
                entry_path: "tiny.yaml".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn cloned_preset_resolves_like_an_upload() {
    let catalog_root = TestRoot::new();
    seed_catalog(&catalog_root);
    let catalog = LocalStorage::new(catalog_root.path()).unwrap();

    let base = TestRoot::new();
    let sessions = SessionManager::new_local(base.path()).unwrap();
    let id = sessions.create().unwrap();

    let presets = list_presets(&catalog, "").await.unwrap();
    let resnet = presets.iter().find(|p| p.name == "resnet").unwrap();
    let copied = sessions.clone_preset(&id, &catalog, resnet).await.unwrap();
    assert_eq!(copied, 2);

    let doc = fetch_subgraph(&sessions, &id, "model.yaml").await.unwrap();
    let backbone = doc.modules().unwrap().get("backbone").unwrap();
    assert_eq!(
        backbone.get("config").unwrap().get("channels").and_then(Value::as_u64),
        Some(64)
    );
}
