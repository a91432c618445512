use serde::Deserialize;

use crate::{cli::Cli, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/ledger.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api".to_string(),
            level: "info".to_string(),
        }
    }
}

/// Layers the TOML file, `LEDGER_*` variables and command-line overrides.
pub fn load(cli: &Cli) -> Result<AppConfig> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("LEDGER"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &cli.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(level) = &cli.log_level {
        settings.level = level.clone();
    }

    Ok(settings)
}
