//! Engine configuration for the CLI
//!
//! A TOML file holds the [`MapboxConfig`] fields; the token and API URL may
//! also come from flags or the environment, which take precedence.

use std::path::Path;

use anyhow::{Context, bail};
use integration_mapbox::MapboxConfig;
use tracing::debug;

/// Load the engine configuration
pub fn load(
    path: Option<&Path>,
    token: Option<String>,
    api_url: Option<String>,
) -> anyhow::Result<MapboxConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read configuration file {}", path.display()))?;
            debug!(path = %path.display(), "Loaded configuration file");
            from_toml(&text, token, api_url)?
        },
        None => {
            let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
                bail!("no access token: pass --token, set MAPBOX_ACCESS_TOKEN or use --config");
            };
            let mut config = MapboxConfig::new(token);
            if let Some(api_url) = api_url {
                config.api_url = api_url;
            }
            config
        },
    };

    config.validate()?;
    Ok(config)
}

/// Parse a configuration document, applying overrides first
fn from_toml(text: &str, token: Option<String>, api_url: Option<String>) -> anyhow::Result<MapboxConfig> {
    let mut table: toml::Table = toml::from_str(text).context("invalid configuration file")?;

    if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
        table.insert("access_token".to_string(), toml::Value::String(token));
    }
    if let Some(api_url) = api_url {
        table.insert("api_url".to_string(), toml::Value::String(api_url));
    }
    if !table.contains_key("access_token") {
        bail!("no access token: set access_token in the configuration file or MAPBOX_ACCESS_TOKEN");
    }

    toml::Value::Table(table)
        .try_into()
        .context("invalid configuration file")
}
