use clap::{Subcommand, ValueEnum};
use serde_json::json;

use crate::app::Runtime;
use crate::config::{CliConfig, save_config, validate_url};
use crate::errors::CliError;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with defaults (and an optional endpoint)
    Init {
        #[arg(long = "api-url")]
        api_url: Option<String>,
    },
    /// Read a config key
    Get { key: ConfigKey },
    /// Set a config key
    Set { key: ConfigKey, value: String },
    /// Print the config file location
    Path,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigKey {
    #[value(name = "apiUrl")]
    ApiUrl,
    #[value(name = "assetBase")]
    AssetBase,
    #[value(name = "rotateSecs")]
    RotateSecs,
    #[value(name = "backgrounds")]
    Backgrounds,
}

impl ConfigKey {
    fn name(self) -> &'static str {
        match self {
            ConfigKey::ApiUrl => "apiUrl",
            ConfigKey::AssetBase => "assetBase",
            ConfigKey::RotateSecs => "rotateSecs",
            ConfigKey::Backgrounds => "backgrounds",
        }
    }
}

pub async fn handle(runtime: &mut Runtime, command: ConfigCommand) -> Result<(), CliError> {
    match command {
        ConfigCommand::Init { api_url } => init(runtime, api_url).await,
        ConfigCommand::Get { key } => get(runtime, key).await,
        ConfigCommand::Set { key, value } => set(runtime, key, value).await,
        ConfigCommand::Path => path(runtime).await,
    }
}

async fn init(runtime: &mut Runtime, api_url: Option<String>) -> Result<(), CliError> {
    let mut config = CliConfig::default();
    if let Some(url) = api_url {
        validate_url(&url)?;
        config.api_url = url;
    }

    runtime.config = config;
    let path = save_config(&runtime.config)?;
    runtime.config_path = path.clone();

    if runtime.output.json {
        runtime
            .output
            .print_json(&json!({ "ok": true, "path": path }))?;
    } else {
        runtime
            .output
            .print_human(&format!("Config initialized: {}", path.display()));
    }
    Ok(())
}

fn read_key(config: &CliConfig, key: ConfigKey) -> String {
    match key {
        ConfigKey::ApiUrl => config.api_url.clone(),
        ConfigKey::AssetBase => config.asset_base.clone(),
        ConfigKey::RotateSecs => config.rotate_secs.to_string(),
        ConfigKey::Backgrounds => config.backgrounds.join(","),
    }
}

fn apply_key(config: &mut CliConfig, key: ConfigKey, value: &str) -> Result<(), CliError> {
    match key {
        ConfigKey::ApiUrl => {
            validate_url(value)?;
            config.api_url = value.to_string();
        }
        ConfigKey::AssetBase => {
            config.asset_base = value.trim().to_string();
        }
        ConfigKey::RotateSecs => {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| {
                    CliError::Usage("rotateSecs must be a positive whole number.".to_string())
                })?;
            config.rotate_secs = secs;
        }
        ConfigKey::Backgrounds => {
            let images: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if images.is_empty() {
                return Err(CliError::Usage(
                    "backgrounds needs at least one file name.".to_string(),
                ));
            }
            config.backgrounds = images;
        }
    }
    Ok(())
}

async fn get(runtime: &mut Runtime, key: ConfigKey) -> Result<(), CliError> {
    let value = read_key(&runtime.config, key);
    if runtime.output.json {
        runtime.output.print_json(&json!({
            "key": key.name(),
            "value": value
        }))?;
    } else {
        runtime.output.print_human(&value);
    }
    Ok(())
}

async fn set(runtime: &mut Runtime, key: ConfigKey, value: String) -> Result<(), CliError> {
    apply_key(&mut runtime.config, key, &value)?;

    let path = save_config(&runtime.config)?;
    runtime.config_path = path;

    if runtime.output.json {
        runtime.output.print_json(&json!({ "ok": true }))?;
    } else {
        runtime.output.print_human("Config updated.");
    }

    Ok(())
}

async fn path(runtime: &mut Runtime) -> Result<(), CliError> {
    if runtime.output.json {
        runtime
            .output
            .print_json(&json!({ "path": runtime.config_path }))?;
    } else {
        runtime
            .output
            .print_human(&runtime.config_path.display().to_string());
    }
    Ok(())
}
