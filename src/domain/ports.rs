use crate::domain::model::{FoodRecord, UploadOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Destination for the serialized result set. One write replaces whatever
/// object already lives at `bucket`/`key`.
pub trait ObjectStore: Send + Sync {
    fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Extract and load halves of a run. Neither step fails past its own boundary.
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Vec<FoodRecord>;
    async fn load(&self, records: &[FoodRecord]) -> UploadOutcome;
}
