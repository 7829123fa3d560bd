pub mod create_batch;
pub mod delete_batch;
pub mod load;
pub mod load_batch;
pub mod update_batch;

pub mod completion;
pub mod format;
pub mod notification;
pub mod user;
pub mod validation;

// Re-exports
pub use create_batch::*;
pub use delete_batch::*;
pub use load::*;
pub use load_batch::*;
pub use update_batch::*;

pub use completion::*;
pub use format::*;
pub use notification::*;
pub use user::*;
pub use validation::*;
