//! HTTP API for OfficeWhiz

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;

use crate::brand::Brand;
use crate::llm::CompletionGateway;
use crate::session::SessionManager;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub gateway: Arc<dyn CompletionGateway>,
    pub brand: Brand,
}

impl AppState {
    pub fn new(brand: Brand, gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new(brand)),
            gateway,
            brand,
        }
    }
}
