use clap::Args;
use colfmt::Dialect;
use serde::Deserialize;

use super::error::DumpError;

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub dialect: Option<Dialect>,
    pub separator: Option<String>,
    pub skip_errors: Option<bool>,
}

pub fn load_config(path: &str) -> Result<Config, DumpError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DumpError::Config { context: "read", detail: format!("'{path}': {e}") })?;
    toml::from_str(&content).map_err(|e| DumpError::Config { context: "parse", detail: format!("'{path}': {e}") })
}

// ═══════════════════════════════════════════════════════════════
//  CLI args
// ═══════════════════════════════════════════════════════════════

#[derive(Args, Clone, Debug)]
pub struct DumpArgs {
    /// Path to colfmt.toml
    #[arg(long, default_value = "colfmt.toml", env = "COLFMT_CONFIG")]
    pub config: String,

    /// Output dialect: literal, simple or compat
    #[arg(long)]
    pub dialect: Option<Dialect>,

    /// JSON lines input (stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Column separator, `\t` by default
    #[arg(long)]
    pub separator: Option<String>,

    /// Log and skip rows that fail instead of stopping
    #[arg(long)]
    pub skip_errors: bool,
}

// ═══════════════════════════════════════════════════════════════
//  Effective: merged config
// ═══════════════════════════════════════════════════════════════

/// Final settings: colfmt.toml < env/CLI.
#[derive(Debug)]
pub struct Effective {
    pub dialect: Dialect,
    pub input: Option<String>,
    pub separator: String,
    pub skip_errors: bool,
}

impl Effective {
    pub fn new(args: &DumpArgs) -> Result<Self, DumpError> {
        let cfg = match load_config(&args.config) {
            Ok(c) => c,
            Err(e) => {
                if std::path::Path::new(&args.config).exists() {
                    return Err(e);
                }
                Config::default()
            }
        };
        Ok(Self::merge(args, cfg))
    }

    fn merge(args: &DumpArgs, cfg: Config) -> Self {
        Self {
            dialect: args.dialect.or(cfg.dialect).unwrap_or_default(),
            input: args.input.clone(),
            separator: args.separator.clone().or(cfg.separator).unwrap_or_else(|| "\t".into()),
            skip_errors: args.skip_errors || cfg.skip_errors.unwrap_or(false),
        }
    }
}
