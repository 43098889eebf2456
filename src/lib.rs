pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;
pub use config::AppConfig;

pub use adapters::{LocalObjectStore, MemoryObjectStore, S3ObjectStore};
pub use crate::core::{etl::EtlEngine, fetcher::FoodFetcher, pipeline::FoodPipeline, uploader::Uploader};
pub use domain::model::{FoodRecord, RunReport, SearchParams, UploadOutcome};
pub use utils::error::{EtlError, Result};
