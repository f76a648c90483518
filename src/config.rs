use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{ResidueMode, SourceDescriptor};
use crate::error::FeedError;
use crate::source::{DEFAULT_BASE_URL, normalize_base_url};

pub const CONFIG_FILE_NAME: &str = "msa-feed.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
    #[serde(default)]
    pub residue_mode: Option<ResidueMode>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SourceEntry {
    Shorthand(String),
    Detailed(SourceEntryObject),
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SourceEntryObject {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub base_url: String,
    pub sources: Vec<SourceDescriptor>,
    pub residue_mode: ResidueMode,
    pub timeout: Option<Duration>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            schema_version: 1,
            base_url: DEFAULT_BASE_URL.to_string(),
            sources: Vec::new(),
            residue_mode: ResidueMode::default(),
            timeout: None,
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, FeedError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(CONFIG_FILE_NAME),
        };

        if path.is_none() && !config_path.exists() {
            return Err(FeedError::MissingConfig);
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| FeedError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| FeedError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_or_default(path: Option<&str>) -> Result<ResolvedConfig, FeedError> {
        match Self::resolve(path) {
            Err(FeedError::MissingConfig) => Ok(ResolvedConfig::default()),
            other => other,
        }
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, FeedError> {
        let schema_version = config.schema_version.unwrap_or(1);
        if schema_version != 1 {
            return Err(FeedError::ConfigParse(format!(
                "unsupported schema_version {schema_version}"
            )));
        }

        let base_url = normalize_base_url(config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let sources = config
            .sources
            .into_iter()
            .map(|entry| match entry {
                SourceEntry::Shorthand(name) => name.parse(),
                SourceEntry::Detailed(obj) => obj.name.parse(),
            })
            .collect::<Result<Vec<SourceDescriptor>, FeedError>>()?;

        Ok(ResolvedConfig {
            schema_version,
            base_url,
            sources,
            residue_mode: config.residue_mode.unwrap_or_default(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        })
    }
}
