//! Command implementations

use crate::cli::{Cli, Commands, ValueKind};
use crate::error::{CliError, Result};
use conf_core::{ConfigManager, Store};
use conf_sources::ConfigSources;
use conf_sources::file::{absolute_path, load_file};
use serde_json::Value;
use std::io::Write;

/// Build the manager described by the global options.
pub fn build_manager(cli: &Cli) -> Result<ConfigManager> {
    let mut conf = ConfigManager::new();

    for file in &cli.files {
        if cli.strict {
            let path = absolute_path(file)?;
            let storage = load_file(&path)?;
            conf.add_store(path.display().to_string(), Store::from_map(storage));
        } else {
            conf.with_file(file);
        }
    }

    if !cli.no_env {
        let prefix = cli.env_prefix.as_deref().unwrap_or_default();
        conf.with_env(prefix, &cli.separator);
    }

    for entry in &cli.overrides {
        let (name, value) = parse_override(entry)?;
        conf.set(name, value);
    }

    Ok(conf)
}

/// Split `name=value`, reading the value as JSON when it parses.
pub fn parse_override(entry: &str) -> Result<(String, Value)> {
    let (name, raw) = entry
        .split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| CliError::user(format!("Invalid override '{entry}': expected NAME=VALUE")))?;
    Ok((name.to_string(), parse_literal(raw)))
}

fn parse_literal(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Run `command` against `conf`, writing results to `out`.
///
/// Returns whether the command succeeded; `exists` on a missing name is
/// the only unsuccessful outcome that is not an error.
pub fn execute(conf: &ConfigManager, command: &Commands, out: &mut impl Write) -> Result<bool> {
    match command {
        Commands::Get {
            name,
            kind,
            default,
        } => run_get(conf, name, *kind, default.as_deref(), out),
        Commands::Dump { base64, compact } => run_dump(conf, *base64, *compact, out),
        Commands::Exists { name } => {
            let exists = conf.exists(name);
            writeln!(out, "{exists}")?;
            Ok(exists)
        }
        Commands::Stores => {
            for name in conf.store_names().iter().rev() {
                writeln!(out, "{name}")?;
            }
            Ok(true)
        }
    }
}

fn run_get(
    conf: &ConfigManager,
    name: &str,
    kind: ValueKind,
    default: Option<&str>,
    out: &mut impl Write,
) -> Result<bool> {
    let default = default.map(parse_literal);
    let not_set = || CliError::user(format!("'{name}' is not set"));

    match kind {
        ValueKind::String => {
            let value = match default {
                Some(fallback) => conf.get_string_or(name, fallback)?,
                None => conf.get_string(name)?.ok_or_else(not_set)?,
            };
            writeln!(out, "{value}")?;
        }
        ValueKind::Number => {
            let value = match default {
                Some(fallback) => conf.get_number_or(name, fallback)?,
                None => conf.get_number(name)?.ok_or_else(not_set)?,
            };
            writeln!(out, "{value}")?;
        }
        ValueKind::Boolean => {
            // Flags have no fallback: absent is always false.
            if default.is_some() {
                tracing::warn!(name = %name, "Ignoring --default for a boolean lookup");
            }
            writeln!(out, "{}", conf.get_boolean(name))?;
        }
        ValueKind::Object => {
            let value = match default {
                Some(fallback) => conf.get_object_or(name, fallback)?,
                None => conf.get_object(name)?.ok_or_else(not_set)?,
            };
            write_json(&value, false, out)?;
        }
        ValueKind::Raw => {
            let value = conf.get(name).or(default).ok_or_else(not_set)?;
            match value {
                Value::String(text) => writeln!(out, "{text}")?,
                other => write_json(&other, false, out)?,
            }
        }
    }
    Ok(true)
}

fn run_dump(conf: &ConfigManager, base64: bool, compact: bool, out: &mut impl Write) -> Result<bool> {
    if base64 {
        writeln!(out, "{}", conf.to_base64())?;
    } else {
        write_json(&conf.to_json(), compact, out)?;
    }
    Ok(true)
}

fn write_json(value: &Value, compact: bool, out: &mut impl Write) -> Result<()> {
    if compact {
        writeln!(out, "{value}")?;
    } else {
        // Pretty printing a Value cannot fail; the fallback keeps the output valid JSON.
        let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        writeln!(out, "{pretty}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn manager() -> ConfigManager {
        let mut conf = ConfigManager::new();
        conf.with_named_store(
            "defaults",
            json!({ "port": "8080", "debug": "false", "server": { "host": "localhost" } }),
        );
        conf
    }

    fn run(conf: &ConfigManager, command: Commands) -> (bool, String) {
        let mut out = Vec::new();
        let ok = execute(conf, &command, &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    fn get(name: &str, kind: ValueKind, default: Option<&str>) -> Commands {
        Commands::Get {
            name: name.into(),
            kind,
            default: default.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(parse_override("port=9000").unwrap(), ("port".into(), json!(9000)));
        assert_eq!(parse_override("name=web").unwrap(), ("name".into(), json!("web")));
        assert_eq!(
            parse_override("db={\"host\":\"h\"}").unwrap(),
            ("db".into(), json!({ "host": "h" }))
        );
        assert_eq!(parse_override("empty=").unwrap(), ("empty".into(), json!("")));
        assert!(parse_override("novalue").is_err());
        assert!(parse_override("=value").is_err());
    }

    #[test]
    fn test_get_kinds() {
        let conf = manager();
        assert_eq!(run(&conf, get("port", ValueKind::Number, None)).1, "8080\n");
        assert_eq!(run(&conf, get("port", ValueKind::Raw, None)).1, "8080\n");
        assert_eq!(run(&conf, get("debug", ValueKind::Boolean, None)).1, "false\n");
        assert_eq!(
            run(&conf, get("server", ValueKind::String, None)).1,
            "{\"host\":\"localhost\"}\n"
        );
    }

    #[test]
    fn test_boolean_ignores_fallback() {
        let conf = ConfigManager::new();
        assert_eq!(run(&conf, get("missing", ValueKind::Boolean, Some("yes"))).1, "false\n");
        assert_eq!(run(&manager(), get("debug", ValueKind::Boolean, Some("true"))).1, "false\n");
    }

    #[test]
    fn test_get_fallbacks() {
        let conf = manager();
        assert_eq!(run(&conf, get("missing", ValueKind::String, Some("x"))).1, "x\n");
        assert_eq!(run(&conf, get("missing", ValueKind::Number, Some("1.5"))).1, "1.5\n");

        let mut out = Vec::new();
        let err = execute(&conf, &get("missing", ValueKind::Number, Some("abc")), &mut out)
            .unwrap_err();
        assert!(matches!(err, CliError::Core(e) if e.is_type_mismatch()));
    }

    #[test]
    fn test_missing_value_is_user_error() {
        let conf = manager();
        let mut out = Vec::new();
        let err = execute(&conf, &get("missing", ValueKind::Raw, None), &mut out).unwrap_err();
        assert_eq!(err.to_string(), "'missing' is not set");
    }

    #[test]
    fn test_exists_and_stores() {
        let mut conf = manager();
        conf.with_named_store("local", json!({}));

        assert_eq!(run(&conf, Commands::Exists { name: "port".into() }), (true, "true\n".into()));
        assert_eq!(
            run(&conf, Commands::Exists { name: "nope".into() }),
            (false, "false\n".into())
        );
        assert_eq!(run(&conf, Commands::Stores).1, "local\ndefaults\n");
    }

    #[test]
    fn test_dump_compact() {
        let conf = manager();
        let (_, out) = run(&conf, Commands::Dump { base64: false, compact: true });
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, conf.to_json());
    }
}
