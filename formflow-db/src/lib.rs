pub mod models;
pub mod repository;

// `models` and `repository` share submodule names, so re-export by item.
pub use models::{
    CompletionModel, FormatModel, Identifiable, NotificationModel, NotificationStats, UserModel, ValidationModel,
};
pub use repository::{
    CompletionRepository, CreateBatch, DeleteBatch, FormatFilter, FormatRepository, Load, LoadBatch,
    NotificationRepository, UpdateBatch, UserRepository, ValidationRepository,
};
