use crate::domain::ports::ObjectStore;
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory object store. Clones share the same contents, so a test can keep
/// one handle while the uploader owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
    puts: Arc<Mutex<usize>>,
    fail_with: Option<String>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every write fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::default()
        }
    }

    pub async fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        let objects = self.objects.lock().await;
        objects.get(&(bucket.to_string(), key.to_string())).cloned()
    }

    /// Number of `put_object` calls, failed ones included.
    pub async fn put_count(&self) -> usize {
        *self.puts.lock().await
    }
}

impl ObjectStore for MemoryObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        *self.puts.lock().await += 1;

        if let Some(message) = &self.fail_with {
            return Err(EtlError::UploadError {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: message.clone(),
            });
        }

        let mut objects = self.objects.lock().await;
        objects.insert((bucket.to_string(), key.to_string()), body);
        Ok(())
    }
}
