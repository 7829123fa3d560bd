pub mod repo_impl;
pub mod create_batch;
pub mod load;
pub mod update_batch;
pub mod find_by_user_id;
pub mod delete_updated_before;
pub mod stats;

pub use repo_impl::NotificationRepositoryImpl;
