pub mod repo_impl;
pub mod create_batch;
pub mod load_batch;
pub mod update_batch;
pub mod find_all;
pub mod find_by_role;
pub mod find_by_email;

pub use repo_impl::UserRepositoryImpl;
