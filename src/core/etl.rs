use crate::core::{Pipeline, RunReport};

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract, then load only when something was extracted.
    pub async fn run(&self) -> RunReport {
        tracing::info!("Fetching all food data...");
        let records = self.pipeline.extract().await;
        tracing::debug!("Extracted {} records", records.len());

        if records.is_empty() {
            tracing::warn!("No data fetched.");
            return RunReport {
                records_fetched: 0,
                upload: None,
            };
        }

        let outcome = self.pipeline.load(&records).await;
        RunReport {
            records_fetched: records.len(),
            upload: Some(outcome),
        }
    }
}
