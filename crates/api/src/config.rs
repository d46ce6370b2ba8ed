//! Server configuration, read from `QUICKBASKET_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

use quickbasket_observability::LogFormat;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `QUICKBASKET_BIND`
    pub bind: SocketAddr,
    /// `QUICKBASKET_DATA`; unset keeps everything in memory.
    pub data_file: Option<PathBuf>,
    /// `QUICKBASKET_ADMIN_TOKEN`; bearer token guarding `/admin`.
    pub admin_token: Option<String>,
    /// `QUICKBASKET_LOG_FORMAT`
    pub log_format: LogFormat,
    /// `QUICKBASKET_SEED`; seed fresh stores with the sample catalog.
    pub seed: bool,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = get("QUICKBASKET_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind
            .trim()
            .parse()
            .with_context(|| format!("QUICKBASKET_BIND: invalid socket address {bind:?}"))?;

        let log_format = match get("QUICKBASKET_LOG_FORMAT") {
            Some(v) => v.parse().context("QUICKBASKET_LOG_FORMAT")?,
            None => LogFormat::default(),
        };

        let seed = match get("QUICKBASKET_SEED") {
            Some(v) => parse_bool(&v).with_context(|| format!("QUICKBASKET_SEED: {v:?}"))?,
            None => true,
        };

        Ok(Self {
            bind,
            data_file: get("QUICKBASKET_DATA").map(PathBuf::from),
            admin_token: get("QUICKBASKET_ADMIN_TOKEN"),
            log_format,
            seed,
        })
    }
}

fn parse_bool(v: &str) -> anyhow::Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("expected a boolean"),
    }
}
