pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::services::completion_client::ChatCompletionClient;
use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub completion_client: ChatCompletionClient,
}

impl AppState {
    pub fn new(config: Config) -> error::Result<Self> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.llm_timeout_secs))
            .build()?;
        let completion_client = ChatCompletionClient::from_config(&config, http_client);

        Ok(Self {
            config: Arc::new(config),
            completion_client,
        })
    }
}

/// All routes, without the transport layers `main` adds.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/questions/preview", post(routes::generation::preview_records))
        .route("/api/questions/generate", post(routes::generation::generate_questions))
        .route("/api/questions/export", post(routes::export::export_questions))
        .route("/api/questions/check", post(routes::check::check_questions))
        .with_state(state)
}
