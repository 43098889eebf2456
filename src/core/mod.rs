pub mod etl;
pub mod fetcher;
pub mod pipeline;
pub mod uploader;

pub use crate::domain::model::{FoodRecord, RunReport, SearchParams, UploadOutcome};
pub use crate::domain::ports::{ObjectStore, Pipeline};
pub use crate::utils::error::Result;
