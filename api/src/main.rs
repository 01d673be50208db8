use quiz_api::{router, AppState, ServerSettings};
use quiz_generator::{GeminiService, GeneratorConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = GeneratorConfig::from_env();
    let settings = ServerSettings::from_env();

    if config.api_key.is_none() {
        log::warn!("GEMINI_API_KEY not set; generation requests will be rejected");
    }
    log::info!("Using Gemini model {}", config.model_name);

    let port = settings.port;
    let generator = Arc::new(GeminiService::new(config.clone()));
    let app = router(AppState::new(generator, &config, settings));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
