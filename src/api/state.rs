//! Application state shared by every handler

use std::sync::Arc;

use crate::infrastructure::services::FaqCacheService;

/// Cloned into each request; services are shared behind `Arc`
#[derive(Debug, Clone)]
pub struct AppState {
    pub faqs: Arc<FaqCacheService>,
}

impl AppState {
    pub fn new(faqs: Arc<FaqCacheService>) -> Self {
        Self { faqs }
    }
}
