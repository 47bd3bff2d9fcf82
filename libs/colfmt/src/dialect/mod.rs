//! The three preconfigured dialects and the handlers they share.

pub mod cast;
pub mod compat;
pub mod literal;
pub mod simple;

mod legacy_json;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::DialectConfig;

/// Named output dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Round-trippable SQL literals.
    #[default]
    Literal,
    /// Debug text.
    Simple,
    /// Output of the legacy CLI client.
    Compat,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::Literal, Dialect::Simple, Dialect::Compat];

    /// The shared, immutable configuration for this dialect.
    pub fn config(self) -> &'static DialectConfig {
        match self {
            Dialect::Literal => &literal::CONFIG,
            Dialect::Simple => &simple::CONFIG,
            Dialect::Compat => &compat::CONFIG,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Literal => write!(f, "literal"),
            Dialect::Simple => write!(f, "simple"),
            Dialect::Compat => write!(f, "compat"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect {0:?} (expected literal, simple or compat)")]
pub struct ParseDialectError(String);

impl FromStr for Dialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "literal" => Ok(Dialect::Literal),
            "simple" => Ok(Dialect::Simple),
            "compat" | "cli" => Ok(Dialect::Compat),
            _ => Err(ParseDialectError(s.to_string())),
        }
    }
}
