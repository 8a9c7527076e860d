pub mod config;
pub mod context;
pub mod error;
pub mod knowledge;
pub mod model;
pub mod prompt;
pub mod web;

use std::sync::Arc;

use config::AppConfig;
use knowledge::{KnowledgeBase, StaticKnowledgeBase};
use model::prediction::PredictionProxy;
use model::CompletionClient;

// App state structure
pub struct AppState {
    pub knowledge: Arc<dyn KnowledgeBase>,
    pub completion: CompletionClient,
    pub prediction: PredictionProxy,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Self::with_knowledge(config, Arc::new(StaticKnowledgeBase::new()))
    }

    pub fn with_knowledge(
        config: &AppConfig,
        knowledge: Arc<dyn KnowledgeBase>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            knowledge,
            completion: CompletionClient::new(config)?,
            prediction: PredictionProxy::new(config)?,
        })
    }
}
