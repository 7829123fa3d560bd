use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Generic repository trait for deleting multiple entities in a batch
///
/// # Returns
/// * `Ok(usize)` - The number of rows actually deleted
#[async_trait]
pub trait DeleteBatch<DB: Database>: Send + Sync {
    async fn delete_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
