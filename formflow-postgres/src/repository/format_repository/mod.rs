pub mod repo_impl;
pub mod create_batch;
pub mod load_batch;
pub mod update_batch;
pub mod delete_batch;
pub mod find_by_filter;

pub use repo_impl::FormatRepositoryImpl;
