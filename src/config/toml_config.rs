use crate::config::AppConfig;
use crate::utils::error::{EtlError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk configuration. Every section and field is optional; whatever is
/// present overrides the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub api: Option<ApiSection>,
    pub search: Option<SearchSection>,
    pub storage: Option<StorageSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchSection {
    pub query: Option<String>,
    pub data_type: Option<String>,
    pub page_size: Option<usize>,
    pub max_pages: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub key: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${USDA_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            EtlError::ConfigError {
                message: format!("invalid placeholder pattern: {}", e),
            }
        })?;

        let mut missing = None;
        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            })
        });

        match missing {
            Some(field) => Err(EtlError::MissingConfigError { field }),
            None => Ok(result.into_owned()),
        }
    }

    pub fn apply_to(self, config: &mut AppConfig) {
        if let Some(api) = self.api {
            if let Some(endpoint) = api.endpoint {
                config.endpoint = endpoint;
            }
            if let Some(api_key) = api.api_key {
                config.api_key = api_key;
            }
            if let Some(timeout) = api.timeout_seconds {
                config.request_timeout_secs = timeout;
            }
        }

        if let Some(search) = self.search {
            if let Some(query) = search.query {
                config.search.query = query;
            }
            if let Some(data_type) = search.data_type {
                config.search.data_type = data_type;
            }
            if let Some(page_size) = search.page_size {
                config.search.page_size = page_size;
            }
            if let Some(max_pages) = search.max_pages {
                config.search.max_pages = max_pages;
            }
        }

        if let Some(storage) = self.storage {
            if let Some(bucket) = storage.bucket {
                config.bucket = bucket;
            }
            if let Some(region) = storage.region {
                config.region = region;
            }
            if let Some(key) = storage.key {
                config.object_key = key;
            }
        }
    }
}
