//! INI configuration for the Humio handler.
//!
//! A section describes one handler. Recognised keys:
//!
//! ```ini
//! [handler_humio]
//! ingest_token_env = HUMIO_INGEST_TOKEN
//! api_base_url = https://cloud.humio.com
//! level = warn
//! suppress_errors = no
//! tags = app=web, env=prod
//! ```
//!
//! `ingest_token` may be given inline instead of `ingest_token_env`; the
//! inline value wins when both are present. Parsing uses `rust-ini` so the
//! syntax matches other INI-driven configuration.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ini::{Ini, Properties};
use thiserror::Error;

use crate::handlers::HumioHandlerBuilder;

/// Errors raised while loading handler configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid INI syntax: {0}")]
    Parse(#[from] ini::ParseError),
    #[error("section [{0}] not found")]
    MissingSection(String),
    #[error("{key} must be a boolean, got {value:?}")]
    InvalidBool { key: String, value: String },
    #[error("tag entry {0:?} must have the form key=value")]
    InvalidTag(String),
    #[error("environment variable {0} named by ingest_token_env is not set")]
    MissingEnv(String),
}

/// Read `path` and build a handler builder from `section`.
pub fn load_handler_builder(
    path: impl AsRef<Path>,
    section: &str,
) -> Result<HumioHandlerBuilder, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    builder_from_ini_str(&text, section)
}

/// Build a handler builder from `section` of the INI document `text`.
///
/// The level is carried through as text; it is validated when the builder
/// is built.
pub fn builder_from_ini_str(text: &str, section: &str) -> Result<HumioHandlerBuilder, ConfigError> {
    let ini = Ini::load_from_str(text)?;
    let props = ini
        .section(Some(section))
        .ok_or_else(|| ConfigError::MissingSection(section.to_owned()))?;

    let mut builder = HumioHandlerBuilder::new();
    if let Some(token) = resolve_token(props)? {
        builder = builder.with_ingest_token(token);
    }
    if let Some(url) = props.get("api_base_url") {
        builder = builder.with_api_base_url(url.trim());
    }
    if let Some(level) = props.get("level") {
        builder = builder.with_level(level);
    }
    if let Some(raw) = props.get("suppress_errors") {
        builder = builder.with_suppress_errors(parse_bool("suppress_errors", raw)?);
    }
    if let Some(raw) = props.get("tags") {
        builder = builder.with_tags(parse_tags(raw)?);
    }
    Ok(builder)
}

fn resolve_token(props: &Properties) -> Result<Option<String>, ConfigError> {
    if let Some(token) = props.get("ingest_token") {
        return Ok(Some(token.trim().to_owned()));
    }
    let Some(var) = props.get("ingest_token_env") else {
        return Ok(None);
    };
    let var = var.trim();
    std::env::var(var)
        .map(Some)
        .map_err(|_| ConfigError::MissingEnv(var.to_owned()))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_owned(),
            value: raw.to_owned(),
        }),
    }
}

fn parse_tags(raw: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_owned(), value.trim().to_owned()))
            }
            _ => Err(ConfigError::InvalidTag(entry.to_owned())),
        })
        .collect()
}
