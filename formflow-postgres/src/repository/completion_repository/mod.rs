pub mod repo_impl;
pub mod create_batch;
pub mod load_batch;
pub mod update_batch;
pub mod find_by_owner_id;
pub mod find_without_validation;

pub use repo_impl::CompletionRepositoryImpl;
