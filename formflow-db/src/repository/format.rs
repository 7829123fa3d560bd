use async_trait::async_trait;
use formflow_api::FormatStatus;
use serde::Deserialize;
use sqlx::Database;

use crate::models::FormatModel;
use crate::repository::{CreateBatch, DeleteBatch, Load, LoadBatch, UpdateBatch};

/// Optional exact-match filters for listing formats.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormatFilter {
    #[serde(default, alias = "titulo")]
    pub title: Option<String>,
    #[serde(default, alias = "estado")]
    pub status: Option<FormatStatus>,
}

impl FormatFilter {
    pub fn matches(&self, format: &FormatModel) -> bool {
        self.title.as_ref().is_none_or(|t| *t == format.title)
            && self.status.is_none_or(|s| s == format.status)
    }
}

#[async_trait]
pub trait FormatRepository<DB: Database>:
    Load<DB, FormatModel>
    + LoadBatch<DB, FormatModel>
    + CreateBatch<DB, FormatModel>
    + UpdateBatch<DB, FormatModel>
    + DeleteBatch<DB>
    + Send
    + Sync
{
    /// Formats matching every set filter, newest first.
    async fn find_by_filter(
        &self,
        filter: &FormatFilter,
    ) -> Result<Vec<FormatModel>, Box<dyn std::error::Error + Send + Sync>>;
}
