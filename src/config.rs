//! Server configuration from environment variables (a `.env` file is honoured by the binary).

use crate::error::ConfigError;
use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddr;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/students";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SCHEMA: &str = "public";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Variables read by `ServerConfig::from_env`.
const VARS: &[&str] = &[
    "DATABASE_URL",
    "STUDENT_STORE",
    "STUDENTS_SCHEMA",
    "BIND_ADDR",
    "DB_MAX_CONNECTIONS",
    "BODY_LIMIT_BYTES",
];

/// Which engine backs the student store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl StoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKind::Postgres => "postgres",
            StoreKind::Memory => "memory",
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::UnknownStore(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub store: StoreKind,
    /// Schema holding the `students` table. Plain identifier only.
    pub schema: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit: usize,
}

impl ServerConfig {
    /// Reads only the variables this server knows; a non UTF-8 value for one of
    /// them is rejected rather than silently ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut vars = HashMap::new();
        for &key in VARS {
            match std::env::var(key) {
                Ok(v) => {
                    vars.insert(key.to_string(), v);
                }
                Err(std::env::VarError::NotPresent) => {}
                Err(e @ std::env::VarError::NotUnicode(_)) => {
                    return Err(ConfigError::InvalidVar {
                        var: key,
                        reason: e.to_string(),
                    })
                }
            }
        }
        Self::from_vars(&vars)
    }

    /// Build from an explicit variable map. Missing keys fall back to defaults.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |k: &str| var(vars, k);

        let store = get("STUDENT_STORE")
            .map(str::parse::<StoreKind>)
            .transpose()?
            .unwrap_or(StoreKind::Postgres);

        let schema = get("STUDENTS_SCHEMA").unwrap_or(DEFAULT_SCHEMA).to_string();
        if !is_identifier(&schema) {
            return Err(ConfigError::InvalidVar {
                var: "STUDENTS_SCHEMA",
                reason: format!("'{}' is not a plain identifier", schema),
            });
        }

        let bind_addr = get("BIND_ADDR")
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidVar {
                var: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let max_connections = parse_number(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let body_limit = parse_number(get("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT)?;

        Ok(ServerConfig {
            database_url: get("DATABASE_URL").unwrap_or(DEFAULT_DATABASE_URL).to_string(),
            store,
            schema,
            bind_addr,
            max_connections,
            body_limit,
        })
    }
}

fn var<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_number<T>(raw: Option<&str>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(s) => s.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var,
            reason: e.to_string(),
        }),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
