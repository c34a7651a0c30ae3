use std::sync::Arc;

use crate::config::AppConfig;
use crate::contacts::store::ContactRepository;
use crate::image::ImageService;

/// Shared per-process state handed to every handler. Holds no connection of
/// its own; the repository checks one out of the pool per request.
pub struct AppState {
    pub repo: Arc<dyn ContactRepository>,
    pub images: ImageService,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(repo: Arc<dyn ContactRepository>, images: ImageService, config: AppConfig) -> Self {
        Self {
            repo,
            images,
            config,
        }
    }
}
