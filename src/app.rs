use std::path::PathBuf;

use crate::api::ApiClient;
use crate::config::{CliConfig, resolve_api_url};
use crate::errors::CliError;
use crate::output::OutputMode;

#[derive(Debug, Clone)]
pub struct Runtime {
    pub output: OutputMode,
    pub config: CliConfig,
    pub config_path: PathBuf,
    pub api_url_override: Option<String>,
    pub asset_base_override: Option<String>,
    pub timeout_ms: u64,
}

impl Runtime {
    pub fn resolved_api_url(&self) -> Result<String, CliError> {
        resolve_api_url(&self.config, self.api_url_override.as_deref())
    }

    pub fn resolved_asset_base(&self) -> String {
        self.asset_base_override
            .clone()
            .unwrap_or_else(|| self.config.asset_base.clone())
    }

    pub fn api_client(&self) -> Result<ApiClient, CliError> {
        ApiClient::new(
            self.resolved_api_url()?,
            self.timeout_ms,
            self.output.debug,
        )
    }
}
