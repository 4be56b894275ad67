use conf_core::ConfigManager;
use conf_sources::{ARGV_STORE, ConfigSources};
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

#[test]
fn test_args_store() {
    let mut conf = ConfigManager::new();
    conf.with_args(["--number", "42", "--string=test", "--verbose", "--no-cache"]);

    assert_eq!(conf.store_names(), vec![ARGV_STORE]);
    assert_eq!(conf.get_number("number").unwrap(), Some(42.0));
    assert_eq!(conf.get_string("string").unwrap().as_deref(), Some("test"));
    assert!(conf.get_boolean("verbose"));
    assert!(!conf.get_boolean("cache"));
    assert!(conf.exists("cache"));
}

#[test]
fn test_lookup_names_fold_to_camel_case() {
    let mut conf = ConfigManager::new();
    conf.with_args(["--log-level", "debug"]);

    assert_eq!(conf.get_string("logLevel").unwrap().as_deref(), Some("debug"));
    assert_eq!(conf.get_string("LOG_LEVEL").unwrap().as_deref(), Some("debug"));
    assert_eq!(conf.get_string("log-level").unwrap().as_deref(), Some("debug"));
}

#[test]
fn test_args_override_lower_stores() {
    let mut conf = ConfigManager::new();
    conf.with_store(json!({ "server": { "host": "localhost", "port": 80 } }))
        .with_args(["--server.port=8080"]);

    assert_eq!(
        conf.get_object("server").unwrap(),
        Some(json!({ "host": "localhost", "port": 8080 }))
    );
}

#[test]
fn test_custom_parser() {
    fn pairs(args: &[String]) -> Map<String, Value> {
        args.iter()
            .filter_map(|arg| arg.split_once(':'))
            .map(|(k, v)| (k.to_string(), Value::from(v)))
            .collect()
    }

    let mut conf = ConfigManager::new();
    conf.with_args_parsed(["mode:fast", "ignored"], pairs);

    assert_eq!(conf.get("mode"), Some(json!("fast")));
    assert_eq!(conf.to_json(), json!({ "mode": "fast" }));
}
