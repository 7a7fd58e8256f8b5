use btnav_core::{DocumentKey, InstanceId, StateStore, StoreError};
use btnav_project::JsonFileStore;

#[test]
fn missing_file_loads_as_empty_stack() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("state.json"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn saved_stack_loads_back_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/.btnav/window_state.json");
    let stack = vec![
        DocumentKey::asset("ai/root.tree.json"),
        DocumentKey::instance("ai/sub.tree.json", InstanceId(3)),
    ];

    let mut store = JsonFileStore::new(&path);
    store.save(&stack).unwrap();

    let mut reopened = JsonFileStore::new(&path);
    assert_eq!(reopened.load().unwrap(), stack);
    assert!(!path.with_file_name("window_state.json.tmp").exists());
}

#[test]
fn file_layout_is_versioned_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let mut store = JsonFileStore::new(&path);
    store.save(&[DocumentKey::asset("a.tree.json")]).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["tree_stack"][0]["kind"], "asset");
    assert_eq!(value["tree_stack"][0]["path"], "a.tree.json");
}

#[test]
fn saving_empty_stack_overwrites_previous() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("state.json"));
    store.save(&[DocumentKey::asset("a.tree.json")]).unwrap();
    store.save(&[]).unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn malformed_file_is_reported_as_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));
}

#[test]
fn newer_state_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{"version": 9, "tree_stack": []}"#).unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));
}
