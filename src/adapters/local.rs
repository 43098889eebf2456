use crate::domain::ports::ObjectStore;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Writes objects to `<base>/<bucket>/<key>` on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    base_path: PathBuf,
}

impl LocalObjectStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.base_path.join(bucket).join(key)
    }
}

impl ObjectStore for LocalObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        let full_path = self.object_path(bucket, key);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tracing::debug!("Writing {} bytes to {}", body.len(), full_path.display());
        tokio::fs::write(full_path, body).await?;
        Ok(())
    }
}
