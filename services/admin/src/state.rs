//! Application state shared across console views

use std::sync::Arc;

use common::config::ApiConfig;
use common::cookies::TokenStore;

use crate::{client::CatalogApi, feedback::Feedback, routes::Navigator};

/// Collaborators every console view works with
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub api: Arc<dyn CatalogApi>,
    pub tokens: Arc<dyn TokenStore>,
    pub feedback: Arc<dyn Feedback>,
    pub navigator: Arc<dyn Navigator>,
}
