pub mod repo_impl;
pub mod load_batch;
pub mod find_by_completion_id;
pub mod find_by_validator_id;
pub mod find_by_statuses;
pub mod create_decision;
pub mod update_decision;

pub use repo_impl::ValidationRepositoryImpl;
