//! HTTP surface of the formflow workflow.

pub mod config;
pub mod error;
pub mod extract;
pub mod identity;
pub mod logging;
pub mod routes;
pub mod state;

pub use routes::app;
pub use state::AppState;
