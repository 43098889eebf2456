#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::SearchParams;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::fmt;
use std::path::Path;
use toml_config::TomlConfig;

pub const API_KEY_ENV: &str = "USDA_API_KEY";
pub const DEFAULT_ENDPOINT: &str = "https://api.nal.usda.gov/fdc/v1/foods/search";
pub const DEFAULT_BUCKET: &str = "usda-analytics-data-lake";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_OBJECT_KEY: &str = "raw-data/usda_data.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Largest page the search endpoint will serve.
pub const MAX_PAGE_SIZE: usize = 200;

/// Everything a run needs, resolved once at startup and handed to the
/// fetcher and uploader constructors.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: String,
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    pub object_key: String,
    pub search: SearchParams,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            region: DEFAULT_REGION.to_string(),
            object_key: DEFAULT_OBJECT_KEY.to_string(),
            search: SearchParams::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// The key ends up in request URLs; keep it out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("AppConfig")
            .field("api_key", &api_key)
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("object_key", &self.object_key)
            .field("search", &self.search)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Defaults, then the optional TOML file, then the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = config_file {
            tracing::debug!("Loading configuration file {}", path.display());
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = key.trim().to_string();
            }
        }
    }

    /// Without a key every request is rejected by the API, which the run
    /// reports like any other request failure.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_search(mut self, search: SearchParams) -> Self {
        self.search = search;
        self
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_s3_bucket_name("bucket", &self.bucket)?;
        validation::validate_aws_region("region", &self.region)?;
        validation::validate_object_key("key", &self.object_key)?;

        validation::validate_non_empty_string("query", &self.search.query)?;
        validation::validate_non_empty_string("data_type", &self.search.data_type)?;
        validation::validate_range("page_size", self.search.page_size, 1, MAX_PAGE_SIZE)?;
        validation::validate_positive_number("max_pages", self.search.max_pages, 1)?;
        validation::validate_positive_number(
            "request_timeout_secs",
            self.request_timeout_secs as usize,
            1,
        )?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
