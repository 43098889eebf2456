use crate::config::AppConfig;
use crate::core::fetcher::FoodFetcher;
use crate::core::uploader::Uploader;
use crate::core::{FoodRecord, ObjectStore, Pipeline, Result, SearchParams, UploadOutcome};

/// Search API in, one JSON object out.
pub struct FoodPipeline<S: ObjectStore> {
    fetcher: FoodFetcher,
    uploader: Uploader<S>,
    search: SearchParams,
}

impl<S: ObjectStore> FoodPipeline<S> {
    pub fn new(store: S, config: &AppConfig) -> Result<Self> {
        Ok(Self::from_parts(
            FoodFetcher::new(config)?,
            Uploader::from_config(store, config),
            config.search.clone(),
        ))
    }

    pub fn from_parts(fetcher: FoodFetcher, uploader: Uploader<S>, search: SearchParams) -> Self {
        Self {
            fetcher,
            uploader,
            search,
        }
    }
}

#[async_trait::async_trait]
impl<S: ObjectStore> Pipeline for FoodPipeline<S> {
    async fn extract(&self) -> Vec<FoodRecord> {
        self.fetcher.fetch_all(&self.search).await
    }

    async fn load(&self, records: &[FoodRecord]) -> UploadOutcome {
        self.uploader.upload(records).await
    }
}
