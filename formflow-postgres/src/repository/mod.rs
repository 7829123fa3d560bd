pub mod completion_repository;
pub mod db_init;
pub mod format_repository;
pub mod notification_repository;
pub mod user_repository;
pub mod validation_repository;

#[cfg(test)]
pub mod test_utils;

pub use completion_repository::CompletionRepositoryImpl;
pub use format_repository::FormatRepositoryImpl;
pub use notification_repository::NotificationRepositoryImpl;
pub use user_repository::UserRepositoryImpl;
pub use validation_repository::ValidationRepositoryImpl;
