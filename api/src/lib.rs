pub mod error;
pub mod handlers;
pub mod pdf_payload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use quiz_generator::{DocumentProcessor, GeneratorConfig, QuestionService, TextGenerator};
use std::env;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

// Uploads arrive base64 encoded inside the JSON body.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
    pub environment: String,
    pub ping_message: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: "development".to_string(),
            ping_message: "ping".to_string(),
        }
    }
}

impl ServerSettings {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.port),
            environment: env::var("APP_ENV")
                .or_else(|_| env::var("NODE_ENV"))
                .unwrap_or(default.environment),
            ping_message: env::var("PING_MESSAGE").unwrap_or(default.ping_message),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub document_processor: Arc<DocumentProcessor>,
    pub settings: Arc<ServerSettings>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        config: &GeneratorConfig,
        settings: ServerSettings,
    ) -> Self {
        Self {
            question_service: Arc::new(QuestionService::new(generator, config)),
            document_processor: Arc::new(DocumentProcessor::new()),
            settings: Arc::new(settings),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        .route("/api/generate-questions", post(handlers::generate_questions))
        .route("/api/process-pdf", post(handlers::process_pdf))
        .route("/api/test-questions", get(handlers::test_questions))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
