//! Aggregate snapshots and their encoded round trip

use conf_core::ConfigManager;
use conf_sources::{ConfigSources, MemoryEnv};
use conf_test_utils::ConfigDir;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeMap;

#[test]
fn test_snapshot_skips_supplier_stores() {
    let mut conf = ConfigManager::new();
    conf.with_store(json!({ "a": 1 }))
        .with_supplier(|name| (name == "computed").then(|| json!("value")));

    assert_eq!(conf.get("computed"), Some(json!("value")));
    assert_eq!(conf.to_json(), json!({ "a": 1 }));
}

#[test]
fn test_snapshot_of_unprefixed_env_is_empty() {
    let env: MemoryEnv = [("HOME_DIR", "/home")].into_iter().collect();

    let mut conf = ConfigManager::new();
    conf.with_env_from(env, "", "");

    assert_eq!(conf.get("homeDir"), Some(json!("/home")));
    assert_eq!(conf.to_json(), json!({}));
}

#[test]
fn test_snapshot_travels_as_encoded_payload() {
    let dir = ConfigDir::new();
    let file = dir.write_json(
        "app.json",
        &json!({ "features": { "search": true, "beta": false }, "limits": [10, 20] }),
    );
    let env: MemoryEnv = [("APP_FEATURES__BETA", "true")].into_iter().collect();

    let mut server = ConfigManager::new();
    server
        .with_file(&file)
        .with_env_from(env, "app", "")
        .set("release", "2024.1");

    let attributes = BTreeMap::from([("bootstrap".to_string(), server.to_base64())]);
    let mut client = ConfigManager::new();
    client.with_encoded("bootstrap", &attributes).unwrap();

    assert_eq!(
        client.to_json(),
        json!({
            "features": { "search": true, "beta": "true" },
            "limits": [10, 20],
            "release": "2024.1"
        })
    );
    assert!(client.get_boolean("features") && client.get_object("features").unwrap().is_some());
    assert_eq!(client.get("limits"), Some(json!([10, 20])));
}

#[test]
fn test_overrides_deep_merge_into_snapshot() {
    let mut conf = ConfigManager::new();
    conf.with_store(json!({ "server": { "host": "localhost", "port": 80 } }));
    conf.set("server", json!({ "port": 8080 }));

    // Lookups see the override alone; the snapshot merges it.
    assert_eq!(conf.get("server"), Some(json!({ "port": 8080 })));
    assert_eq!(
        conf.to_json(),
        json!({ "server": { "host": "localhost", "port": 8080 } })
    );
}
