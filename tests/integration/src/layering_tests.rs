//! End-to-end layering across every source kind
//!
//! Precedence, lowest first: defaults, file, environment, argv, overrides.

use conf_core::ConfigManager;
use conf_sources::{ConfigSources, MemoryEnv};
use conf_test_utils::ConfigDir;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Database {
    host: String,
    port: u16,
    pool_size: u32,
    #[serde(default)]
    replicas: Vec<String>,
}

struct Fixture {
    _dir: ConfigDir,
    env: MemoryEnv,
    conf: ConfigManager,
}

fn layered() -> Fixture {
    let dir = ConfigDir::new();
    let file = dir.write_toml(
        "service.toml",
        &json!({
            "name": "billing",
            "database": { "host": "db.local", "port": 5432, "poolSize": 4 }
        }),
    );

    let env: MemoryEnv = [
        ("BILLING_DATABASE__HOST", "db.prod"),
        ("BILLING_LOG_LEVEL", "info"),
    ]
    .into_iter()
    .collect();

    let mut conf = ConfigManager::new();
    conf.with_named_store(
        "defaults",
        json!({
            "name": "unnamed",
            "logLevel": "warn",
            "database": { "host": "localhost", "port": 5432, "poolSize": 1, "replicas": ["r1"] }
        }),
    )
    .with_file(&file)
    .with_env_from(env.clone(), "billing", "__")
    .with_args(["--database.pool-size", "16", "--dry-run"]);

    Fixture {
        _dir: dir,
        env,
        conf,
    }
}

#[test]
fn test_store_order() {
    let fixture = layered();
    let names = fixture.conf.store_names();

    assert_eq!(names.len(), 4);
    assert_eq!(names[0], "defaults");
    assert!(names[1].ends_with("service.toml"));
    assert_eq!(&names[2..], ["ENV_BILLING", "__argv__"]);
}

#[test]
fn test_object_merges_across_every_layer() {
    let fixture = layered();

    assert_eq!(
        fixture.conf.get_object("database").unwrap(),
        Some(json!({
            "host": "db.prod",
            "port": 5432,
            "poolSize": 16,
            "replicas": ["r1"]
        }))
    );
}

#[test]
fn test_deserialize_merged_object() {
    let fixture = layered();

    // Environment leaves are strings, so deserialize after argv provides the number.
    let database: Database = fixture.conf.get_deserialized("database").unwrap().unwrap();
    assert_eq!(
        database,
        Database {
            host: "db.prod".into(),
            port: 5432,
            pool_size: 16,
            replicas: vec!["r1".into()],
        }
    );
}

#[test]
fn test_scalars_resolve_from_highest_layer() {
    let fixture = layered();
    let conf = &fixture.conf;

    assert_eq!(conf.get_string("name").unwrap().as_deref(), Some("billing"));
    assert_eq!(conf.get_string("logLevel").unwrap().as_deref(), Some("info"));
    assert!(conf.get_boolean("dryRun"));
    assert!(!conf.get_boolean("verbose"));
}

#[test]
fn test_override_beats_every_store() {
    let mut fixture = layered();
    fixture.conf.set("database", json!({ "host": "override" }));

    assert_eq!(
        fixture.conf.get_object("database").unwrap(),
        Some(json!({ "host": "override" }))
    );

    fixture.conf.unset("database");
    assert_eq!(
        fixture.conf.get("database").unwrap()["host"],
        json!("db.prod")
    );
}

#[test]
fn test_environment_is_read_at_lookup_time() {
    let fixture = layered();
    fixture.env.set("BILLING_NAME", "billing-v2");

    assert_eq!(
        fixture.conf.get_string("name").unwrap().as_deref(),
        Some("billing-v2")
    );
}

#[test]
fn test_late_registration_of_existing_name_keeps_slot() {
    let mut fixture = layered();
    fixture
        .conf
        .with_named_store("defaults", json!({ "name": "replaced", "timeout": 30 }));

    assert_eq!(fixture.conf.store_names()[0], "defaults");
    assert_eq!(fixture.conf.get_string("name").unwrap().as_deref(), Some("billing"));
    assert_eq!(fixture.conf.get_number("timeout").unwrap(), Some(30.0));
    assert_eq!(fixture.conf.get("logLevel"), Some(json!("info")));
}
