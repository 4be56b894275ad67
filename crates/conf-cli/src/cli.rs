//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Look up values in layered configuration
///
/// Sources are layered in this order, later ones winning: files in the
/// order given, environment variables, then `--set` overrides.
#[derive(Parser, Debug)]
#[command(name = "conf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (JSON, YAML or TOML); repeat to layer files
    #[arg(short, long = "file", value_name = "PATH", global = true)]
    pub files: Vec<PathBuf>,

    /// Fail on files that cannot be loaded instead of skipping them
    #[arg(long, global = true)]
    pub strict: bool,

    /// Read environment variables starting with this prefix
    #[arg(short, long, env = "CONF_ENV_PREFIX", global = true)]
    pub env_prefix: Option<String>,

    /// Separator for nested environment variable keys
    #[arg(long, default_value = conf_sources::DEFAULT_SEPARATOR, global = true)]
    pub separator: String,

    /// Skip environment variables entirely
    #[arg(long, global = true)]
    pub no_env: bool,

    /// Override a value: `name=value`, where value is JSON or a plain string
    #[arg(short, long = "set", value_name = "NAME=VALUE", global = true)]
    pub overrides: Vec<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print a single value
    ///
    /// Examples:
    ///   conf get server.port                # raw JSON
    ///   conf get port --as number           # coerced
    ///   conf get name --default anonymous   # fallback when absent
    Get {
        /// Name to look up
        name: String,

        /// Shape to coerce the value into
        #[arg(long = "as", value_enum, default_value_t = ValueKind::Raw)]
        kind: ValueKind,

        /// Fallback used when the name is absent (JSON or plain string).
        /// Ignored with `--as boolean`, where absent is always false
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Print every enumerable value merged into one document
    Dump {
        /// Print the snapshot base64 encoded instead of JSON
        #[arg(long)]
        base64: bool,

        /// Compact JSON on a single line
        #[arg(long, conflicts_with = "base64")]
        compact: bool,
    },

    /// Exit with success if any source provides the name
    Exists {
        /// Name to look up
        name: String,
    },

    /// List the registered stores, highest precedence first
    Stores,
}

/// Shape requested by `conf get --as`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Object,
    Raw,
}
