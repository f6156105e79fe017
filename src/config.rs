use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::CliError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_ASSET_BASE: &str = "/";
pub const DEFAULT_ROTATE_SECS: u64 = 5;
pub const DEFAULT_LOGO: &str = "cosmo-logo.png";
pub const DEFAULT_AVATAR: &str = "temoc.png";

pub fn default_backgrounds() -> Vec<String> {
    vec![
        "bg1.jpg".to_string(),
        "bg2.jpg".to_string(),
        "bg3.jpg".to_string(),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    pub api_url: String,
    #[serde(default = "default_asset_base")]
    pub asset_base: String,
    #[serde(default = "default_backgrounds")]
    pub backgrounds: Vec<String>,
    #[serde(default = "default_rotate_secs")]
    pub rotate_secs: u64,
    #[serde(default = "default_logo")]
    pub logo: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
}

fn default_asset_base() -> String {
    DEFAULT_ASSET_BASE.to_string()
}

fn default_rotate_secs() -> u64 {
    DEFAULT_ROTATE_SECS
}

fn default_logo() -> String {
    DEFAULT_LOGO.to_string()
}

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            asset_base: default_asset_base(),
            backgrounds: default_backgrounds(),
            rotate_secs: DEFAULT_ROTATE_SECS,
            logo: default_logo(),
            avatar: default_avatar(),
        }
    }
}

impl CliConfig {
    /// Repairs values a hand-edited file may have broken.
    fn normalize(&mut self) {
        self.backgrounds.retain(|name| !name.trim().is_empty());
        if self.backgrounds.is_empty() {
            tracing::warn!("config has no backgrounds; using defaults");
            self.backgrounds = default_backgrounds();
        }
        if self.rotate_secs == 0 {
            self.rotate_secs = DEFAULT_ROTATE_SECS;
        }
    }
}

pub fn config_path() -> Result<PathBuf, CliError> {
    let base = dirs::config_dir().ok_or_else(|| {
        CliError::Generic("Could not resolve config directory for this OS.".to_string())
    })?;
    Ok(base.join("cosmo").join("config.json"))
}

pub fn load_config_from(path: &Path) -> Result<CliConfig, CliError> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }

    let text = fs::read_to_string(path)?;
    let mut config: CliConfig = serde_json::from_str(&text)?;
    config.normalize();
    Ok(config)
}

/// For commands that must work on a broken file (`config init`, `config path`).
pub fn load_config_or_default(path: &Path) -> CliConfig {
    load_config_from(path).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), "ignoring unreadable config: {err}");
        CliConfig::default()
    })
}

pub fn save_config(config: &CliConfig) -> Result<PathBuf, CliError> {
    let path = config_path()?;
    save_config_to(&path, config)?;
    Ok(path)
}

pub fn save_config_to(path: &Path, config: &CliConfig) -> Result<(), CliError> {
    let parent = path
        .parent()
        .ok_or_else(|| CliError::Generic("Invalid config path.".to_string()))?;
    fs::create_dir_all(parent)?;
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    Ok(())
}

pub fn resolve_api_url(config: &CliConfig, api_override: Option<&str>) -> Result<String, CliError> {
    if let Some(url) = api_override {
        validate_url(url)?;
        return Ok(url.to_string());
    }

    validate_url(&config.api_url)?;
    Ok(config.api_url.clone())
}

pub fn validate_url(value: &str) -> Result<(), CliError> {
    let parsed = Url::parse(value)?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(CliError::Usage(
            "API URL must use http:// or https://.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.backgrounds.len(), 3);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cosmo").join("config.json");
        let mut config = CliConfig::default();
        config.api_url = "https://chat.example.edu".to_string();
        config.rotate_secs = 9;
        save_config_to(&path, &config).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_defaults_and_repairs_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"apiUrl":"http://10.0.0.2:8000","backgrounds":[" "],"rotateSecs":0}"#,
        )
        .unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.api_url, "http://10.0.0.2:8000");
        assert_eq!(loaded.backgrounds, default_backgrounds());
        assert_eq!(loaded.rotate_secs, DEFAULT_ROTATE_SECS);
        assert_eq!(loaded.avatar, DEFAULT_AVATAR);
    }

    #[test]
    fn corrupt_file_errors_unless_defaults_are_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(load_config_from(&path).is_err());
        assert_eq!(load_config_or_default(&path), CliConfig::default());
    }

    #[test]
    fn override_wins_and_is_validated() {
        let config = CliConfig::default();
        assert_eq!(
            resolve_api_url(&config, Some("https://x.test")).unwrap(),
            "https://x.test"
        );
        assert!(resolve_api_url(&config, Some("ftp://x.test")).is_err());
        assert!(resolve_api_url(&config, Some("not a url")).is_err());
        assert_eq!(resolve_api_url(&config, None).unwrap(), DEFAULT_API_URL);
    }
}
