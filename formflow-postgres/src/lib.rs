pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use postgres_repositories::{PostgresRepositories, PostgresRepositoryBundle};
pub use repository::{
    CompletionRepositoryImpl, FormatRepositoryImpl, NotificationRepositoryImpl,
    UserRepositoryImpl, ValidationRepositoryImpl,
};

#[cfg(test)]
pub mod test_helper;
