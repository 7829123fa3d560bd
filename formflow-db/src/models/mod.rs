pub mod completion;
pub mod format;
pub mod identifiable;
pub mod notification;
pub mod user;
pub mod validation;

// Re-exports
pub use completion::*;
pub use format::*;
pub use identifiable::*;
pub use notification::*;
pub use user::*;
pub use validation::*;
