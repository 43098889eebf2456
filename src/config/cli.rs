use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "usda-food-etl")]
#[command(about = "Fetch branded food records from FoodData Central and upload them to S3")]
pub struct CliArgs {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Search string; `*` matches everything
    #[arg(long)]
    pub query: Option<String>,

    /// FoodData Central data type filter
    #[arg(long)]
    pub data_type: Option<String>,

    #[arg(long)]
    pub page_size: Option<usize>,

    /// Hard cap on the number of pages requested
    #[arg(long)]
    pub max_pages: Option<usize>,

    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub bucket: Option<String>,

    #[arg(long)]
    pub region: Option<String>,

    /// Object key the result is written to
    #[arg(long)]
    pub key: Option<String>,

    /// Write the object under this directory instead of S3
    #[arg(long)]
    pub local_dir: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliArgs {
    /// Flags win over every other configuration source.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(query) = &self.query {
            config.search.query = query.clone();
        }
        if let Some(data_type) = &self.data_type {
            config.search.data_type = data_type.clone();
        }
        if let Some(page_size) = self.page_size {
            config.search.page_size = page_size;
        }
        if let Some(max_pages) = self.max_pages {
            config.search.max_pages = max_pages;
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(bucket) = &self.bucket {
            config.bucket = bucket.clone();
        }
        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(key) = &self.key {
            config.object_key = key.clone();
        }
    }
}
