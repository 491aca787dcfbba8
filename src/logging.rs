//! Diagnostic logging for the `node-ext` binary.
//!
//! The library only emits `tracing` events. This module installs a
//! subscriber for them when `NODE_EXT_LOG` (or `RUST_LOG`) is set:
//!
//! ```bash
//! NODE_EXT_LOG=debug node-ext get tree.json body
//! NODE_EXT_LOG=parser_node_ext::ingest=trace NODE_EXT_LOG_FORMAT=json node-ext dump tree.json
//! ```
//!
//! Output always goes to stderr; stdout carries the JSON results.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        Self::parse(&std::env::var("NODE_EXT_LOG_FORMAT").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// `NODE_EXT_LOG` wins over `RUST_LOG`; both use the `RUST_LOG` syntax.
fn build_filter() -> EnvFilter {
    match std::env::var("NODE_EXT_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber. A no-op unless one of the log variables
/// is set, or when a subscriber is already installed.
pub fn init_tracing() {
    if std::env::var_os("NODE_EXT_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    let installed = match LogFormat::from_env() {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).try_init().is_ok()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    };
    if !installed {
        tracing::debug!("tracing subscriber already installed");
    }
}
