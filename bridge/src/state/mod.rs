use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::dispatcher::Dispatcher;
use crate::core::model::ModelAdapter;

/// Application state that can be shared across handlers
pub struct AppState {
    pub config: ServerConfig,
    /// Synthesis entry point; owns the single shared model handle
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let model = Arc::new(ModelAdapter::new(config.model_config()));
        Self::with_model(config, model)
    }

    /// Build state around an existing model adapter
    pub fn with_model(config: ServerConfig, model: Arc<ModelAdapter>) -> Arc<Self> {
        let dispatcher = Arc::new(Dispatcher::new(config.dispatcher_config(), model));
        Arc::new(Self { config, dispatcher })
    }

    /// The shared model adapter
    pub fn model(&self) -> &Arc<ModelAdapter> {
        self.dispatcher.model()
    }
}
