//! Shared application state for all workers.

use std::sync::Arc;

use fb_configs::Settings;
use fb_core::traits::PostRenderer;
use fb_services::ForumService;

pub struct AppState {
    pub service: Arc<ForumService>,
    pub settings: Settings,
    pub renderer: Arc<dyn PostRenderer>,
}
