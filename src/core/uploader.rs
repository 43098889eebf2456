use crate::config::AppConfig;
use crate::domain::model::{FoodRecord, UploadOutcome};
use crate::domain::ports::ObjectStore;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Writes a result set as one JSON object at a fixed bucket and key.
pub struct Uploader<S: ObjectStore> {
    store: S,
    bucket: String,
    key: String,
}

impl<S: ObjectStore> Uploader<S> {
    pub fn new(store: S, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    pub fn from_config(store: S, config: &AppConfig) -> Self {
        Self::new(store, config.bucket.clone(), config.object_key.clone())
    }

    /// One `put_object` call; a failure is returned as-is, never retried.
    pub async fn try_upload(&self, records: &[FoodRecord]) -> Result<()> {
        let body = to_json(records)?;
        tracing::debug!(
            "Uploading {} records ({} bytes) to s3://{}/{}",
            records.len(),
            body.len(),
            self.bucket,
            self.key
        );
        self.store.put_object(&self.bucket, &self.key, body).await
    }

    pub async fn upload(&self, records: &[FoodRecord]) -> UploadOutcome {
        match self.try_upload(records).await {
            Ok(()) => {
                tracing::info!("Uploaded {} items to S3: {}", records.len(), self.key);
                UploadOutcome::Uploaded {
                    key: self.key.clone(),
                    count: records.len(),
                }
            }
            Err(e) => {
                tracing::error!("Error uploading data to S3: {}", e);
                tracing::debug!("Suggestion: {}", e.recovery_suggestion());
                UploadOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// JSON array of records, indented with four spaces.
pub fn to_json(records: &[FoodRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut serializer)?;
    Ok(buf)
}
