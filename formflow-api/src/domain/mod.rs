pub mod payload;
pub mod requester;
pub mod role;
pub mod status;
pub mod variable;

pub use payload::*;
pub use requester::*;
pub use role::*;
pub use status::*;
pub use variable::*;
