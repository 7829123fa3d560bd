use std::sync::Arc;

use formflow_service::{Scheduler, Services};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub scheduler: Arc<Scheduler>,
}

impl AppState {
    pub fn new(services: Services, scheduler: Arc<Scheduler>) -> Self {
        Self {
            services: Arc::new(services),
            scheduler,
        }
    }
}
